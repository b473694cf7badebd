//! Tibetan-script Sanskrit → IAST.
//!
//! Input is canonicalized first, then split into table tokens (two-codepoint
//! ligatures win over single codepoints) and fed through [`Automaton`].
//!
//! ```
//! use tib_core::iast::transliterate;
//! use tib_core::normalize::NormalForm;
//!
//! assert_eq!(transliterate("\u{0F40}\u{0F62}\u{0FA8}", NormalForm::Nfd), "karma");
//! ```

mod automaton;
mod convert;
mod table;
#[cfg(test)]
mod tests;

pub use automaton::Automaton;
pub use convert::{convert, convert_with, transliterate, Conversion};
pub use table::{Special, TableLookup, Token, TokenCategory, TokenTable, UNSUPPORTED};
