use proptest::prelude::*;

use super::*;
use crate::diagnostic::Diagnostic;
use crate::normalize::NormalForm;
use crate::unicode::is_tibetan;

fn nfd(s: &str) -> String {
    transliterate(s, NormalForm::Nfd)
}

/// (input, expected) pairs that must hold in both normalization forms.
const CASES: &[(&str, &str)] = &[
    // ཀརྨ
    ("\u{0F40}\u{0F62}\u{0FA8}", "karma"),
    // པདྨ
    ("\u{0F54}\u{0F51}\u{0FA8}", "padma"),
    // ཨཱ
    ("\u{0F68}\u{0F71}", "ā"),
    // deprecated long vocalic r and its decomposition
    ("\u{0F58}\u{0F77}\u{0F4F}", "mṝta"),
    ("\u{0F58}\u{0FB2}\u{0F71}\u{0F80}\u{0F4F}", "mṝta"),
    // AA and U in either order
    ("\u{0F42}\u{0F71}\u{0F74}", "gū"),
    ("\u{0F42}\u{0F74}\u{0F71}", "gū"),
    // virama joins without an inherent vowel
    ("\u{0F42}\u{0F84}\u{0F58}", "gma"),
    // བྷིཀྵཱུ
    ("\u{0F56}\u{0FB7}\u{0F72}\u{0F40}\u{0FB5}\u{0F71}\u{0F74}", "bhikṣū"),
    ("\u{0F57}\u{0F72}\u{0F69}\u{0F71}\u{0F74}", "bhikṣū"),
    // ཎཱཾ
    ("\u{0F4E}\u{0F71}\u{0F7E}", "ṇāṃ"),
    // དུརྦྲྀཏྟཾ
    (
        "\u{0F51}\u{0F74}\u{0F62}\u{0FA6}\u{0FB2}\u{0F80}\u{0F4F}\u{0F9F}\u{0F7E}",
        "durbṛttaṃ",
    ),
    // precomposed vocalic r
    ("\u{0F40}\u{0F76}", "kṛ"),
    ("\u{0F40}\u{0FB3}\u{0F81}", "kḹ"),
    // ཨོཾ
    ("\u{0F00}", "oṃ"),
    ("\u{0F42}\u{0F7A}\u{0F7A}", "gai"),
    ("\u{0F40}\u{0F0B}\u{0F40}\u{0F0D}", "ka ka|"),
];

#[test]
fn test_scenarios_nfd() {
    for &(input, expected) in CASES {
        assert_eq!(nfd(input), expected, "input {:?}", input);
    }
}

#[test]
fn test_scenarios_nfc() {
    for &(input, expected) in CASES {
        assert_eq!(
            transliterate(input, NormalForm::Nfc),
            expected,
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_full_sentence() {
    let input = "\u{0F0D}\u{0F40}\u{0F62}\u{0FA8}\u{0FA8}\u{0F7C}\u{0F0B}\
                 \u{0F54}\u{0F0B}\
                 \u{0F51}\u{0F7A}\u{0F0B}\
                 \u{0F64}\u{0F7E}\u{0F0B}\
                 \u{0F56}\u{0FB7}\u{0F72}\u{0F40}\u{0FB5}\u{0F71}\u{0F74}\u{0F0B}\
                 \u{0F4E}\u{0F71}\u{0F7E}\u{0F0B}\
                 \u{0F66}\u{0F62}\u{0FA6}\u{0FA6}\u{0F0B}\
                 \u{0F5B}\u{0F99}\u{0F7F}\u{0F40}\u{0F62}\u{0F9F}\u{0F9F}\u{0F0B}\
                 \u{0F58}\u{0F74}\u{0F0B}\
                 \u{0F4F}\u{0FB1}\u{0F0B}\
                 \u{0F4F}\u{0F7F}\u{0F0D}";
    let c = convert(input, NormalForm::Nfd);
    assert_eq!(
        c.text,
        "|karmmo pa de śaṃ bhikṣū ṇāṃ sarbba jñaḥkartta mu tya taḥ|"
    );
    assert!(c.valid);
    assert!(c.diagnostics.is_empty());
}

#[test]
fn test_unsupported_letter_is_dropped() {
    // ཀཞཀ
    let c = convert("\u{0F40}\u{0F5E}\u{0F40}", NormalForm::Nfd);
    assert_eq!(c.text, "kaka");
    assert_eq!(
        c.diagnostics,
        vec![Diagnostic::UnsupportedCharacter { ch: '\u{0F5E}' }]
    );
}

#[test]
fn test_unsupported_letters_each_reported() {
    let c = convert("\u{0F60}\u{0F0B}\u{0F58}\u{0F5F}", NormalForm::Nfd);
    assert_eq!(c.text, " ma");
    assert_eq!(c.diagnostics.len(), 2);
}

#[test]
fn test_anomalies_are_collected() {
    let c = convert("\u{0F40}\u{0F80}", NormalForm::Nfd);
    assert_eq!(c.text, "kii");
    assert_eq!(c.diagnostics, vec![Diagnostic::ReverseSignOutsideLiquid]);

    // u sorts before the virama; a top vowel would sort after it
    let c = convert("\u{0F40}\u{0F74}\u{0F84}\u{0F58}", NormalForm::Nfd);
    assert_eq!(c.text, "kma");
    assert_eq!(c.diagnostics, vec![Diagnostic::ViramaAfterVowel]);
}

#[test]
fn test_line_breaks_pass_through() {
    assert_eq!(nfd("\u{0F40}\n\u{0F41}\r\n"), "ka\nkha\r\n");
}

#[test]
fn test_foreign_characters_are_dropped() {
    assert_eq!(nfd("\u{0F40} x1\u{0F58}"), "kama");
    assert_eq!(nfd(""), "");
}

#[test]
fn test_invalid_cluster_is_flagged() {
    let c = convert("\u{0F0B}\u{0F72}", NormalForm::Nfd);
    assert!(!c.valid);
    assert!(c.diagnostics.is_empty());
    assert!(convert("\u{0F40}\u{0F72}", NormalForm::Nfd).valid);
}

#[test]
fn test_liquid_after_virama_opens_syllable() {
    assert_eq!(nfd("\u{0F40}\u{0F84}\u{0F62}"), "kra");
}

#[test]
fn test_custom_output_table() {
    let toml = crate::settings::DEFAULT_SETTINGS_TOML
        .replace("tsheg = \" \"", "tsheg = \"-\"")
        .replace("shad = \"|\"", "shad = \"/\"");
    let settings = crate::settings::parse_settings_toml(&toml).unwrap();
    let table = TokenTable::new(&settings.output);
    let c = convert_with(&table, "\u{0F40}\u{0F0B}\u{0F58}\u{0F0D}", NormalForm::Nfd);
    assert_eq!(c.text, "ka-ma/");
}

#[test]
fn test_drive_automaton_by_hand() {
    let table = TokenTable::global();
    let mut automaton = Automaton::new();
    for c in ['\u{0F54}', '\u{0F51}', '\u{0FA8}'] {
        match table.lookup(c, None) {
            TableLookup::Token { token, .. } => automaton.feed(token),
            other => panic!("unexpected {other:?}"),
        }
    }
    assert!(automaton.take_diagnostics().is_empty());
    assert_eq!(automaton.finalize(), "padma");
}

#[test]
fn test_bare_consonants() {
    let table = TokenTable::global();
    for (c, token) in table.singles_of(TokenCategory::Base) {
        let expected = format!("{}a", token.text);
        assert_eq!(nfd(&c.to_string()), expected, "U+{:04X}", c as u32);
        assert_eq!(
            transliterate(&c.to_string(), NormalForm::Nfc),
            expected,
            "U+{:04X}",
            c as u32
        );
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn base_consonants() -> Vec<(char, String)> {
    TokenTable::global()
        .singles_of(TokenCategory::Base)
        .map(|(c, t)| (c, t.text.clone()))
        .collect()
}

fn arb_tibetan() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            9 => (0x0F00u32..=0x0FBC).prop_filter_map("unassigned", char::from_u32),
            1 => Just('\n'),
        ],
        0..24,
    )
    .prop_map(|cs| cs.into_iter().collect::<String>())
}

proptest! {
    #[test]
    fn prop_bare_consonant(entry in prop::sample::select(base_consonants())) {
        let (c, text) = entry;
        prop_assert_eq!(nfd(&c.to_string()), format!("{text}a"));
    }

    #[test]
    fn prop_bare_consonants_joined_by_tsheg(
        entries in prop::collection::vec(prop::sample::select(base_consonants()), 1..6)
    ) {
        let input: Vec<String> = entries.iter().map(|(c, _)| c.to_string()).collect();
        let expected: Vec<String> = entries.iter().map(|(_, t)| format!("{t}a")).collect();
        prop_assert_eq!(nfd(&input.join("\u{0F0B}")), expected.join(" "));
    }

    #[test]
    fn prop_output_has_no_tibetan(text in arb_tibetan()) {
        for form in [NormalForm::Nfd, NormalForm::Nfc] {
            let c = convert(&text, form);
            prop_assert!(!c.text.chars().any(is_tibetan), "{:?} -> {:?}", text, c.text);
        }
    }

    #[test]
    fn prop_unsupported_reported_once_each(text in arb_tibetan()) {
        let c = convert(&text, NormalForm::Nfd);
        let expected = crate::normalize::canonicalize(&text, NormalForm::Nfd)
            .text
            .chars()
            .filter(|ch| UNSUPPORTED.contains(ch))
            .count();
        let reported = c
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnsupportedCharacter { .. }))
            .count();
        prop_assert_eq!(reported, expected);
    }
}
