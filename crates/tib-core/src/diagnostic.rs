//! Non-fatal events raised while converting.
//!
//! Conversion never aborts. Each event is logged where it is detected and
//! also collected into [`crate::iast::Conversion::diagnostics`].

use serde::Serialize;

use crate::unicode::codepoint_label;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Tibetan-only letter with no Sanskrit value; dropped from the output.
    #[error("{ch} ({}) cannot be converted to IAST", label(.ch))]
    UnsupportedCharacter { ch: char },

    /// Reverse gigu (U+0F80/U+0F81) not preceded by ra or la.
    #[error("reverse vowel sign outside liquid context")]
    ReverseSignOutsideLiquid,

    /// Virama directly after a vowel sign.
    #[error("virama after a vowel")]
    ViramaAfterVowel,
}

fn label(ch: &char) -> String {
    codepoint_label(*ch)
}
