//! Character-level classification for the Tibetan block (U+0F00..U+0FBC).
//!
//! The ordering categories drive cluster reordering: inside a stack, marks are
//! emitted in ascending category order, so the declaration order of
//! [`Category`] is significant.

/// Ordering category of a codepoint inside a combining-mark cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Other = 0,
    Base = 1,
    Subscript = 2,
    BottomVowel = 3,
    BottomMark = 4,
    TopVowel = 5,
    TopMark = 6,
    RightMark = 7,
}

/// First and last codepoints covered by the category table.
pub const TIBETAN_FIRST: char = '\u{0F00}';
pub const TIBETAN_LAST: char = '\u{0FBC}';

/// Vowel sign AA (U+0F71) and its subjoined stacking variant (U+0FB0).
pub const VOWEL_SIGN_AA: char = '\u{0F71}';
pub const SUBJOINED_AA: char = '\u{0FB0}';

/// Returns the ordering category of `c`.
///
/// Total: anything outside U+0F00..U+0FBC is [`Category::Other`].
pub fn classify(c: char) -> Category {
    match c as u32 {
        // U+0F01 is usually followed by U+0F83
        0x0F01 => Category::Base,
        0x0F18..=0x0F19 => Category::BottomVowel,
        // digits can carry U+0F18/U+0F19 and, exceptionally, vowels
        0x0F20..=0x0F33 => Category::Base,
        0x0F35 | 0x0F37 => Category::BottomMark,
        0x0F39 => Category::Subscript,
        0x0F3E => Category::RightMark,
        0x0F40..=0x0F6C => Category::Base,
        0x0F71 => Category::BottomVowel,
        0x0F72..=0x0F73 => Category::TopVowel,
        0x0F74..=0x0F75 => Category::BottomVowel,
        0x0F76..=0x0F7D => Category::TopVowel,
        0x0F7E => Category::TopMark,
        0x0F7F => Category::RightMark,
        0x0F80..=0x0F81 => Category::TopVowel,
        0x0F82..=0x0F83 => Category::TopMark,
        0x0F84 => Category::BottomMark,
        0x0F86..=0x0F87 => Category::TopMark,
        // U+0F8A is always followed by U+0F82
        0x0F88..=0x0F8A | 0x0F8C => Category::Base,
        0x0F8D..=0x0FBC => Category::Subscript,
        _ => Category::Other,
    }
}

pub fn is_tibetan(c: char) -> bool {
    (TIBETAN_FIRST..=TIBETAN_LAST).contains(&c)
}

/// Codepoints that continue a stack downwards: subjoined consonants, the
/// subjoined AA and a few marks. Vowel sign AA before one of these takes its
/// stacking form.
pub fn is_stacking(c: char) -> bool {
    matches!(c as u32, 0x0F8D..=0x0FAC | 0x0FAE | 0x0FB0 | 0x0FB3..=0x0FBC)
}

/// Format a codepoint as `U+XXXX`.
pub fn codepoint_label(c: char) -> String {
    format!("U+{:04X}", c as u32)
}
