use serde::Serialize;
use tracing::debug_span;

use crate::diagnostic::Diagnostic;
use crate::normalize::{canonicalize, NormalForm};

use super::automaton::Automaton;
use super::table::{TableLookup, Token, TokenTable};

/// Result of one conversion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub text: String,
    /// Structural validity reported by the canonicalizer.
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Convert Tibetan-script Sanskrit to IAST using the global token table.
pub fn convert(text: &str, form: NormalForm) -> Conversion {
    convert_with(TokenTable::global(), text, form)
}

/// Convert with an explicit token table.
pub fn convert_with(table: &TokenTable, text: &str, form: NormalForm) -> Conversion {
    let _span = debug_span!("convert", chars = text.chars().count(), %form).entered();

    let canonical = canonicalize(text, form);
    let chars: Vec<char> = canonical.text.chars().collect();
    let mut automaton = Automaton::new();

    let mut i = 0;
    while i < chars.len() {
        match table.lookup(chars[i], chars.get(i + 1).copied()) {
            TableLookup::Token { token, len } => {
                automaton.feed(token);
                i += len;
            }
            TableLookup::Unsupported(ch) => {
                automaton.report(Diagnostic::UnsupportedCharacter { ch });
                i += 1;
            }
            TableLookup::Unknown(ch) => {
                automaton.feed(&Token::passthrough(ch));
                i += 1;
            }
        }
    }

    let diagnostics = automaton.take_diagnostics();
    Conversion {
        text: automaton.finalize(),
        valid: canonical.valid,
        diagnostics,
    }
}

/// Shorthand for [`convert`] when only the text is wanted.
pub fn transliterate(text: &str, form: NormalForm) -> String {
    convert(text, form).text
}
