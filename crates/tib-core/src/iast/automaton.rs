use std::mem;

use tracing::{debug, error, warn};

use crate::diagnostic::Diagnostic;
use crate::unicode::codepoint_label;

use super::table::{Special, Token, TokenCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Other,
    AfterConsonant,
    AfterVowel,
    AfterVirama,
}

/// Pending parts of the syllable being assembled. Reset on every flush.
#[derive(Debug, Default)]
struct Syllable {
    after_r: bool,
    after_l: bool,
    vowel: Option<String>,
    lengthened: bool,
    post_vowel: Option<String>,
}

/// Left-to-right transliteration state machine.
///
/// Consonants are written as soon as they arrive. The vowel, an unresolved
/// ra/la and post-vocalic marks are held until the syllable is flushed, which
/// happens on the next base consonant, on punctuation, or on [`finalize`].
///
/// [`finalize`]: Automaton::finalize
#[derive(Debug)]
pub struct Automaton {
    out: String,
    state: State,
    syllable: Syllable,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

fn lengthen(vowel: &str) -> &str {
    match vowel {
        "a" => "ā",
        "i" => "ī",
        "u" => "ū",
        other => other,
    }
}

impl Automaton {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            state: State::Other,
            syllable: Syllable::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn feed(&mut self, token: &Token) {
        debug!(
            text = %token.text,
            category = ?token.category,
            special = ?token.special,
            state = ?self.state,
            after_r = self.syllable.after_r,
            after_l = self.syllable.after_l,
            lengthened = self.syllable.lengthened,
            "token"
        );

        // ra/la as a base always starts a new syllable
        if token.category == TokenCategory::Base
            && matches!(token.special, Special::R | Special::L)
            && self.is_open()
        {
            self.flush();
        }

        match token.special {
            Special::R => {
                if mem::take(&mut self.syllable.after_l) {
                    self.out.push('l');
                }
                if self.syllable.after_r {
                    self.out.push('r');
                }
                self.syllable.after_r = true;
                self.state = State::AfterConsonant;
            }
            Special::L => {
                if mem::take(&mut self.syllable.after_r) {
                    self.out.push('r');
                }
                if self.syllable.after_l {
                    self.out.push('l');
                }
                self.syllable.after_l = true;
                self.state = State::AfterConsonant;
            }
            Special::I | Special::LongI => self.reverse_sign(token),
            Special::Lengthener => match self.syllable.vowel.as_mut() {
                // lengthener after its vowel sign is attested in sources
                Some(vowel) => *vowel = lengthen(vowel).to_string(),
                None => self.syllable.lengthened = true,
            },
            Special::None => self.feed_plain(token),
        }
    }

    /// Reverse gigu: vocalic r/l when it follows a liquid.
    fn reverse_sign(&mut self, token: &Token) {
        if token.special == Special::LongI {
            self.syllable.lengthened = true;
        }
        let long = self.syllable.lengthened;
        let vowel = if self.syllable.after_r {
            if long {
                "ṝ"
            } else {
                "ṛ"
            }
        } else if self.syllable.after_l {
            if long {
                "ḹ"
            } else {
                "ḷ"
            }
        } else {
            self.report(Diagnostic::ReverseSignOutsideLiquid);
            let vowel = if long {
                lengthen(token.text.as_str())
            } else {
                token.text.as_str()
            };
            self.out.push_str(vowel);
            vowel
        };
        self.syllable.vowel = Some(vowel.to_string());
        self.syllable.after_r = false;
        self.syllable.after_l = false;
        self.syllable.lengthened = false;
        self.state = State::AfterVowel;
    }

    fn feed_plain(&mut self, token: &Token) {
        match token.category {
            TokenCategory::Vowel => {
                let vowel = if mem::take(&mut self.syllable.lengthened) {
                    lengthen(token.text.as_str())
                } else {
                    token.text.as_str()
                };
                self.syllable.vowel = Some(vowel.to_string());
                self.state = State::AfterVowel;
            }
            TokenCategory::Other => {
                self.release_liquids();
                self.flush();
                self.out.push_str(&token.text);
            }
            TokenCategory::Virama => {
                self.release_liquids();
                if self.state == State::AfterVowel {
                    self.report(Diagnostic::ViramaAfterVowel);
                }
                // pending parts are dropped, not resolved
                self.syllable = Syllable::default();
                self.state = State::AfterVirama;
            }
            TokenCategory::AfterVowel => {
                self.release_liquids();
                self.syllable.post_vowel = Some(token.text.clone());
            }
            TokenCategory::Base => {
                self.release_liquids();
                if self.is_open() {
                    self.flush();
                }
                self.out.push_str(&token.text);
                self.state = State::AfterConsonant;
            }
            TokenCategory::Subscript => {
                self.release_liquids();
                self.out.push_str(&token.text);
            }
        }
    }

    /// A ra/la that was not followed by a reverse gigu is a plain letter.
    fn release_liquids(&mut self) {
        if mem::take(&mut self.syllable.after_r) {
            self.out.push('r');
        }
        if mem::take(&mut self.syllable.after_l) {
            self.out.push('l');
        }
    }

    fn is_open(&self) -> bool {
        matches!(self.state, State::AfterConsonant | State::AfterVowel)
    }

    /// Write out the pending vowel and marks of the open syllable.
    fn flush(&mut self) {
        let syllable = mem::take(&mut self.syllable);
        if self.is_open() {
            let vowel = syllable.vowel.unwrap_or_else(|| "a".to_string());
            let vowel = if syllable.lengthened {
                lengthen(vowel.as_str())
            } else {
                vowel.as_str()
            };
            if syllable.after_r {
                self.out.push('r');
            } else if syllable.after_l {
                self.out.push('l');
            }
            self.out.push_str(vowel);
            if let Some(post) = syllable.post_vowel {
                self.out.push_str(&post);
            }
        }
        self.state = State::Other;
    }

    /// Record a non-fatal event and log it.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnsupportedCharacter { ch } => {
                error!(ch = %codepoint_label(*ch), "{diagnostic}")
            }
            _ => warn!("{diagnostic}"),
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        mem::take(&mut self.diagnostics)
    }

    /// Flush the last syllable and return the accumulated output.
    pub fn finalize(mut self) -> String {
        self.flush();
        self.out
    }
}
