use std::collections::HashMap;
use std::sync::OnceLock;

use crate::settings::{settings, OutputSettings};

use Special as S;
use TokenCategory::{AfterVowel, Base, Other, Subscript, Virama, Vowel};

/// Role a grapheme plays when assembling a syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Other,
    Base,
    Subscript,
    /// Anusvara, visarga, candrabindu and avagraha.
    AfterVowel,
    Vowel,
    Virama,
}

/// Marks graphemes that need more than their literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Special {
    #[default]
    None,
    /// Vowel sign AA: lengthens the syllable vowel.
    Lengthener,
    /// Ra, subjoined ra.
    R,
    /// La, subjoined la.
    L,
    /// Reverse gigu, vocalic r/l after a liquid.
    I,
    /// Long reverse gigu.
    LongI,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub category: TokenCategory,
    pub special: Special,
}

impl Token {
    pub fn new(text: impl Into<String>, category: TokenCategory, special: Special) -> Self {
        Self {
            text: text.into(),
            category,
            special,
        }
    }

    /// Token for a codepoint absent from the table. Line breaks survive,
    /// anything else becomes empty text.
    pub fn passthrough(c: char) -> Self {
        let text = if matches!(c, '\n' | '\r') {
            c.to_string()
        } else {
            String::new()
        };
        Self::new(text, TokenCategory::Other, Special::None)
    }
}

#[derive(Debug, PartialEq)]
pub enum TableLookup<'a> {
    /// A table entry spanning `len` codepoints (1 or 2).
    Token { token: &'a Token, len: usize },
    /// Tibetan-only letter with no Sanskrit counterpart.
    Unsupported(char),
    /// Not in the table.
    Unknown(char),
}

/// Single-codepoint graphemes.
const SINGLES: &[(char, &str, TokenCategory, Special)] = &[
    // marks and punctuation
    ('\u{0F00}', "oṃ", Other, S::None),
    ('\u{0F0B}', " ", Other, S::None),
    ('\u{0F0D}', "|", Other, S::None),
    ('\u{0F0E}', "||", Other, S::None),
    ('\u{0F0F}', "|", Other, S::None),
    ('\u{0F10}', "|", Other, S::None),
    ('\u{0F12}', "|", Other, S::None),
    ('\u{0F14}', "|", Other, S::None),
    // consonants
    ('\u{0F40}', "k", Base, S::None),
    ('\u{0F41}', "kh", Base, S::None),
    ('\u{0F42}', "g", Base, S::None),
    ('\u{0F43}', "gh", Base, S::None),
    ('\u{0F44}', "ṅ", Base, S::None),
    ('\u{0F45}', "c", Base, S::None),
    ('\u{0F46}', "ch", Base, S::None),
    ('\u{0F47}', "j", Base, S::None),
    ('\u{0F49}', "ñ", Base, S::None),
    ('\u{0F4A}', "ṭ", Base, S::None),
    ('\u{0F4B}', "ṭh", Base, S::None),
    ('\u{0F4C}', "ḍ", Base, S::None),
    ('\u{0F4D}', "ḍh", Base, S::None),
    ('\u{0F4E}', "ṇ", Base, S::None),
    ('\u{0F4F}', "t", Base, S::None),
    ('\u{0F50}', "th", Base, S::None),
    ('\u{0F51}', "d", Base, S::None),
    ('\u{0F52}', "dh", Base, S::None),
    ('\u{0F53}', "n", Base, S::None),
    ('\u{0F54}', "p", Base, S::None),
    ('\u{0F55}', "ph", Base, S::None),
    ('\u{0F56}', "b", Base, S::None),
    ('\u{0F57}', "bh", Base, S::None),
    ('\u{0F58}', "m", Base, S::None),
    ('\u{0F59}', "c", Base, S::None),
    ('\u{0F5A}', "ch", Base, S::None),
    ('\u{0F5B}', "j", Base, S::None),
    ('\u{0F5C}', "jh", Base, S::None),
    // wa is v in Sanskrit
    ('\u{0F5D}', "v", Base, S::None),
    ('\u{0F61}', "y", Base, S::None),
    ('\u{0F62}', "r", Base, S::R),
    ('\u{0F63}', "l", Base, S::L),
    ('\u{0F64}', "ś", Base, S::None),
    ('\u{0F65}', "ṣ", Base, S::None),
    ('\u{0F66}', "s", Base, S::None),
    ('\u{0F67}', "h", Base, S::None),
    // the inherent "a" is added when the syllable is flushed
    ('\u{0F68}', "", Base, S::None),
    ('\u{0F69}', "kṣ", Base, S::None),
    ('\u{0F6A}', "r", Base, S::R),
    // vowel signs
    ('\u{0F71}', "ā", Vowel, S::Lengthener),
    ('\u{0F72}', "i", Vowel, S::None),
    ('\u{0F73}', "ī", Vowel, S::None),
    ('\u{0F74}', "u", Vowel, S::None),
    ('\u{0F75}', "ū", Vowel, S::None),
    ('\u{0F76}', "ṛ", Vowel, S::None),
    ('\u{0F77}', "ṝ", Vowel, S::None),
    ('\u{0F78}', "ḷ", Vowel, S::None),
    ('\u{0F79}', "ḹ", Vowel, S::None),
    ('\u{0F7A}', "e", Vowel, S::None),
    ('\u{0F7B}', "ai", Vowel, S::None),
    ('\u{0F7C}', "o", Vowel, S::None),
    ('\u{0F7D}', "au", Vowel, S::None),
    ('\u{0F80}', "i", Vowel, S::I),
    ('\u{0F81}', "ī", Vowel, S::LongI),
    // post-vocalic marks
    ('\u{0F7E}', "ṃ", AfterVowel, S::None),
    ('\u{0F7F}', "ḥ", AfterVowel, S::None),
    ('\u{0F82}', "m\u{0301}", AfterVowel, S::None),
    ('\u{0F83}', "m\u{0310}", AfterVowel, S::None),
    ('\u{0F85}', "’", AfterVowel, S::None),
    ('\u{0F84}', "-", Virama, S::None),
    // subjoined consonants
    ('\u{0F90}', "k", Subscript, S::None),
    ('\u{0F91}', "kh", Subscript, S::None),
    ('\u{0F92}', "g", Subscript, S::None),
    ('\u{0F93}', "gh", Subscript, S::None),
    ('\u{0F94}', "ṅ", Subscript, S::None),
    ('\u{0F95}', "c", Subscript, S::None),
    ('\u{0F96}', "ch", Subscript, S::None),
    ('\u{0F97}', "j", Subscript, S::None),
    ('\u{0F99}', "ñ", Subscript, S::None),
    ('\u{0F9A}', "ṭ", Subscript, S::None),
    ('\u{0F9B}', "ṭh", Subscript, S::None),
    ('\u{0F9C}', "ḍ", Subscript, S::None),
    ('\u{0F9D}', "ḍh", Subscript, S::None),
    ('\u{0F9E}', "ṇ", Subscript, S::None),
    ('\u{0F9F}', "t", Subscript, S::None),
    ('\u{0FA0}', "th", Subscript, S::None),
    ('\u{0FA1}', "d", Subscript, S::None),
    ('\u{0FA2}', "dh", Subscript, S::None),
    ('\u{0FA3}', "n", Subscript, S::None),
    ('\u{0FA4}', "p", Subscript, S::None),
    ('\u{0FA5}', "ph", Subscript, S::None),
    ('\u{0FA6}', "b", Subscript, S::None),
    ('\u{0FA7}', "bh", Subscript, S::None),
    ('\u{0FA8}', "m", Subscript, S::None),
    ('\u{0FA9}', "c", Subscript, S::None),
    ('\u{0FAA}', "ch", Subscript, S::None),
    ('\u{0FAB}', "j", Subscript, S::None),
    ('\u{0FAC}', "jh", Subscript, S::None),
    ('\u{0FAD}', "v", Subscript, S::None),
    ('\u{0FB1}', "y", Subscript, S::None),
    ('\u{0FB2}', "r", Subscript, S::R),
    ('\u{0FB3}', "l", Subscript, S::L),
    ('\u{0FB4}', "ś", Subscript, S::None),
    ('\u{0FB5}', "ṣ", Subscript, S::None),
    ('\u{0FB6}', "s", Subscript, S::None),
    ('\u{0FB7}', "h", Subscript, S::None),
    ('\u{0FB9}', "kṣ", Subscript, S::None),
    ('\u{0FBA}', "v", Subscript, S::None),
    ('\u{0FBB}', "y", Subscript, S::None),
    ('\u{0FBC}', "r", Subscript, S::R),
];

/// Two-codepoint ligatures, matched before [`SINGLES`].
const PAIRS: &[(char, char, &str, TokenCategory)] = &[
    ('\u{0F42}', '\u{0FB7}', "gh", Base),
    ('\u{0F4C}', '\u{0FB7}', "ḍh", Base),
    ('\u{0F51}', '\u{0FB7}', "dh", Base),
    ('\u{0F56}', '\u{0FB7}', "bh", Base),
    ('\u{0F5B}', '\u{0FB7}', "jh", Base),
    ('\u{0F40}', '\u{0FB5}', "kṣ", Base),
    ('\u{0F92}', '\u{0FB7}', "gh", Subscript),
    ('\u{0F9C}', '\u{0FB7}', "ḍh", Subscript),
    ('\u{0FA1}', '\u{0FB7}', "dh", Subscript),
    ('\u{0FA6}', '\u{0FB7}', "bh", Subscript),
    ('\u{0FAB}', '\u{0FB7}', "jh", Subscript),
    ('\u{0F90}', '\u{0FB5}', "kṣ", Subscript),
];

/// Tibetan letters with no Sanskrit value: zha, za, 'a, their subjoined
/// forms and the subjoined a-chung.
pub const UNSUPPORTED: &[char] = &[
    '\u{0F5E}', '\u{0F5F}', '\u{0F60}', '\u{0FB8}', '\u{0FAE}', '\u{0FAF}', '\u{0FB0}',
];

/// Replace the default rendering of punctuation and marks that are
/// configurable.
fn configured_text(c: char, output: &OutputSettings) -> Option<&str> {
    let text = match c {
        '\u{0F0B}' => &output.tsheg,
        '\u{0F0D}' | '\u{0F0F}' | '\u{0F10}' | '\u{0F12}' | '\u{0F14}' => &output.shad,
        '\u{0F0E}' => &output.double_shad,
        '\u{0F82}' => &output.nyi_zla,
        '\u{0F83}' => &output.sna_ldan,
        '\u{0F85}' => &output.avagraha,
        _ => return None,
    };
    Some(text.as_str())
}

/// Grapheme → token mapping. Immutable once built.
pub struct TokenTable {
    singles: HashMap<char, Token>,
    pairs: HashMap<(char, char), Token>,
}

impl TokenTable {
    /// Get or initialize the global table, built from the global settings.
    pub fn global() -> &'static TokenTable {
        static INSTANCE: OnceLock<TokenTable> = OnceLock::new();
        INSTANCE.get_or_init(|| TokenTable::new(&settings().output))
    }

    pub fn new(output: &OutputSettings) -> Self {
        let singles = SINGLES
            .iter()
            .map(|&(c, text, category, special)| {
                let text = configured_text(c, output).unwrap_or(text);
                (c, Token::new(text, category, special))
            })
            .collect();
        let pairs = PAIRS
            .iter()
            .map(|&(a, b, text, category)| ((a, b), Token::new(text, category, Special::None)))
            .collect();
        Self { singles, pairs }
    }

    /// Match the grapheme starting at `c`, preferring a two-codepoint entry
    /// when `next` completes one.
    pub fn lookup(&self, c: char, next: Option<char>) -> TableLookup<'_> {
        if let Some(token) = next.and_then(|n| self.pairs.get(&(c, n))) {
            return TableLookup::Token { token, len: 2 };
        }
        if let Some(token) = self.singles.get(&c) {
            return TableLookup::Token { token, len: 1 };
        }
        if UNSUPPORTED.contains(&c) {
            TableLookup::Unsupported(c)
        } else {
            TableLookup::Unknown(c)
        }
    }

    /// All single-codepoint entries of the given category.
    pub fn singles_of(&self, category: TokenCategory) -> impl Iterator<Item = (char, &Token)> + '_ {
        self.singles
            .iter()
            .filter(move |(_, t)| t.category == category)
            .map(|(&c, t)| (c, t))
    }

    pub fn len(&self) -> usize {
        self.singles.len() + self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{parse_settings_toml, DEFAULT_SETTINGS_TOML};

    fn default_table() -> TokenTable {
        TokenTable::new(&parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap().output)
    }

    fn text_of(table: &TokenTable, c: char, next: Option<char>) -> String {
        match table.lookup(c, next) {
            TableLookup::Token { token, .. } => token.text.clone(),
            other => panic!("expected a token for U+{:04X}, got {other:?}", c as u32),
        }
    }

    #[test]
    fn test_single_consonant() {
        let table = default_table();
        match table.lookup('\u{0F40}', None) {
            TableLookup::Token { token, len } => {
                assert_eq!(len, 1);
                assert_eq!(token.text, "k");
                assert_eq!(token.category, TokenCategory::Base);
                assert_eq!(token.special, Special::None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_pair_is_greedy() {
        let table = default_table();
        match table.lookup('\u{0F42}', Some('\u{0FB7}')) {
            TableLookup::Token { token, len } => {
                assert_eq!(len, 2);
                assert_eq!(token.text, "gh");
                assert_eq!(token.category, TokenCategory::Base);
            }
            other => panic!("unexpected {other:?}"),
        }
        // no ligature with a different follower
        assert_eq!(text_of(&table, '\u{0F42}', Some('\u{0F72}')), "g");
    }

    #[test]
    fn test_composed_and_decomposed_aspirates_agree() {
        let table = default_table();
        for &(a, b, text, _) in PAIRS {
            let composed = crate::normalize::canonicalize(
                &format!("{a}{b}"),
                crate::normalize::NormalForm::Nfc,
            );
            let c = composed.text.chars().next().unwrap();
            assert_eq!(text_of(&table, c, None), text, "U+{:04X}", c as u32);
        }
    }

    #[test]
    fn test_liquids_are_marked() {
        let table = default_table();
        for (c, special) in [
            ('\u{0F62}', Special::R),
            ('\u{0F6A}', Special::R),
            ('\u{0FB2}', Special::R),
            ('\u{0FBC}', Special::R),
            ('\u{0F63}', Special::L),
            ('\u{0FB3}', Special::L),
        ] {
            match table.lookup(c, None) {
                TableLookup::Token { token, .. } => assert_eq!(token.special, special),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_unsupported() {
        let table = default_table();
        for &c in UNSUPPORTED {
            assert_eq!(table.lookup(c, None), TableLookup::Unsupported(c));
        }
    }

    #[test]
    fn test_unknown() {
        let table = default_table();
        assert_eq!(table.lookup('x', None), TableLookup::Unknown('x'));
        assert_eq!(table.lookup('\u{0F20}', None), TableLookup::Unknown('\u{0F20}'));
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(Token::passthrough('\n').text, "\n");
        assert_eq!(Token::passthrough('\r').text, "\r");
        assert_eq!(Token::passthrough(' ').text, "");
        assert_eq!(Token::passthrough('x').category, TokenCategory::Other);
    }

    #[test]
    fn test_output_settings_override() {
        let toml = DEFAULT_SETTINGS_TOML
            .replace("tsheg = \" \"", "tsheg = \"-\"")
            .replace("shad = \"|\"", "shad = \"/\"");
        let table = TokenTable::new(&parse_settings_toml(&toml).unwrap().output);
        assert_eq!(text_of(&table, '\u{0F0B}', None), "-");
        assert_eq!(text_of(&table, '\u{0F0D}', None), "/");
        assert_eq!(text_of(&table, '\u{0F14}', None), "/");
        assert_eq!(text_of(&table, '\u{0F0E}', None), "||");
    }

    #[test]
    fn test_table_size() {
        let table = default_table();
        assert_eq!(table.len(), SINGLES.len() + PAIRS.len());
        assert!(!table.is_empty());
        assert!(table.singles_of(TokenCategory::Base).count() > 30);
    }
}
