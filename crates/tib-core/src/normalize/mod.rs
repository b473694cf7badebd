//! Canonical Unicode form for Tibetan text.
//!
//! The same stack can be encoded several ways: deprecated precomposed vowel
//! signs, precomposed aspirates, doubled vowel signs and arbitrary mark
//! orders. [`canonicalize`] rewrites all of them into one form so that the
//! transliterator only sees a single spelling per stack.
//!
//! See <https://unicode.org/charts/normalization/chart_Tibetan.html>.

mod reorder;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::unicode::{is_stacking, SUBJOINED_AA, VOWEL_SIGN_AA};

pub use reorder::reorder_clusters;

/// How consonant + aspirate pairs are represented after canonicalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalForm {
    /// Base + subjoined HA (U+0F42 U+0FB7).
    #[default]
    Nfd,
    /// Single legacy codepoint (U+0F43).
    Nfc,
}

impl fmt::Display for NormalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalForm::Nfd => f.write_str("nfd"),
            NormalForm::Nfc => f.write_str("nfc"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown normalization form {0:?} (expected \"nfd\" or \"nfc\")")]
pub struct ParseFormError(String);

impl FromStr for NormalForm {
    type Err = ParseFormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nfd" => Ok(NormalForm::Nfd),
            "nfc" => Ok(NormalForm::Nfc),
            _ => Err(ParseFormError(s.to_string())),
        }
    }
}

/// Canonicalized text plus the structural validity flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
    pub text: String,
    /// False when a combining mark was found outside any cluster.
    pub valid: bool,
}

/// Discouraged or deprecated signs and their decompositions. Applied in
/// order; no replacement produces the source of a later one.
const DEPRECATED: &[(&str, &str)] = &[
    ("\u{0F73}", "\u{0F71}\u{0F72}"),
    ("\u{0F75}", "\u{0F71}\u{0F74}"),
    ("\u{0F77}", "\u{0FB2}\u{0F71}\u{0F80}"),
    ("\u{0F79}", "\u{0FB3}\u{0F71}\u{0F80}"),
    ("\u{0F81}", "\u{0F71}\u{0F80}"),
];

/// Precomposed letters and their decomposed spelling.
const COMPOSITES: &[(&str, &str)] = &[
    ("\u{0F43}", "\u{0F42}\u{0FB7}"),
    ("\u{0F4D}", "\u{0F4C}\u{0FB7}"),
    ("\u{0F52}", "\u{0F51}\u{0FB7}"),
    ("\u{0F57}", "\u{0F56}\u{0FB7}"),
    ("\u{0F5C}", "\u{0F5B}\u{0FB7}"),
    ("\u{0F69}", "\u{0F40}\u{0FB5}"),
    ("\u{0F76}", "\u{0FB2}\u{0F80}"),
    ("\u{0F78}", "\u{0FB3}\u{0F80}"),
    ("\u{0F93}", "\u{0F92}\u{0FB7}"),
    ("\u{0F9D}", "\u{0F9C}\u{0FB7}"),
    ("\u{0FA2}", "\u{0FA1}\u{0FB7}"),
    ("\u{0FA7}", "\u{0FA6}\u{0FB7}"),
    ("\u{0FAC}", "\u{0FAB}\u{0FB7}"),
    ("\u{0FB9}", "\u{0F90}\u{0FB5}"),
];

/// U+0F00 was never marked as precomposed in Unicode. That cannot change
/// under the stability policy, so it is decomposed here.
const LEGACY_OM: (&str, &str) = ("\u{0F00}", "\u{0F68}\u{0F7C}\u{0F7E}");

/// Doubled e/o signs render like the diphthong signs.
const REPEATED_SIGNS: &[(&str, &str)] = &[
    ("\u{0F7A}\u{0F7A}", "\u{0F7B}"),
    ("\u{0F7C}\u{0F7C}", "\u{0F7D}"),
];

/// Rewrite `text` into the canonical form.
///
/// Never fails; a malformed cluster only clears [`Canonical::valid`].
///
/// Reordering can make a composition or a repeated-sign fold applicable
/// that was not before, so the rewrite runs until the text stops changing.
/// Every rerun that changes the text shortens it; stacking and reordering
/// are already stable on reordered text.
pub fn canonicalize(text: &str, form: NormalForm) -> Canonical {
    let _span = debug_span!("canonicalize", chars = text.chars().count(), %form).entered();

    let mut current = rewrite(text, form);
    let mut passes = 1;
    loop {
        let next = rewrite(&current.text, form);
        if next.text == current.text {
            debug!(passes, "canonical form reached");
            if !next.valid {
                debug!("combining mark outside of any cluster");
            }
            return next;
        }
        current = next;
        passes += 1;
    }
}

/// One pass of every rewrite step, ending with cluster reordering.
fn rewrite(text: &str, form: NormalForm) -> Canonical {
    let mut s = replace_each(text, DEPRECATED.iter().copied());
    s = match form {
        NormalForm::Nfd => replace_each(&s, COMPOSITES.iter().copied()),
        NormalForm::Nfc => replace_each(&s, COMPOSITES.iter().map(|&(c, d)| (d, c))),
    };
    s = replace_each(&s, std::iter::once(LEGACY_OM));
    s = replace_each(&s, REPEATED_SIGNS.iter().copied());
    s = fix_stacking(&s);
    reorder_clusters(&s)
}

/// Apply literal substitutions one after the other.
fn replace_each<'a>(text: &str, rules: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    rules.fold(text.to_string(), |s, (from, to)| {
        if s.contains(from) {
            s.replace(from, to)
        } else {
            s
        }
    })
}

/// Choose between vowel sign AA and its stacking variant.
///
/// Inside a stack (followed by a stacking codepoint) AA must be U+0FB0; at the
/// end of a stack it must be U+0F71. Each direction is a single pass. Passes
/// run right to left so every decision sees the final form of its successor,
/// which keeps runs of adjacent AA signs stable under reapplication.
///
/// Forward leftmost-match passes give the same result except on runs of two
/// or more adjacent AA signs: before a stacking codepoint the whole run
/// becomes U+0FB0 (forward: only the last sign), and at the end of a stack
/// the whole run becomes U+0F71 (forward: only the last sign).
pub fn fix_stacking(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();

    for i in (0..chars.len()).rev() {
        if chars[i] == VOWEL_SIGN_AA && chars.get(i + 1).is_some_and(|&c| is_stacking(c)) {
            chars[i] = SUBJOINED_AA;
        }
    }
    for i in (0..chars.len()).rev() {
        if chars[i] == SUBJOINED_AA && !chars.get(i + 1).is_some_and(|&c| is_stacking(c)) {
            chars[i] = VOWEL_SIGN_AA;
        }
    }

    chars.into_iter().collect()
}
