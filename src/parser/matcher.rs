//! Token cursor and primitive matchers.

use crate::base::{Token, TokenString};
use crate::error::Error;
use crate::morphology::digit_word_value;

/// Why a pattern did not complete.
#[derive(Debug)]
pub enum MatchFail {
    /// Quietly try the next pattern.
    Backtrack,
    /// The pattern committed (or the action failed); stop and report.
    Error(Error),
}

pub type MatchResult<T> = Result<T, MatchFail>;

/// A monotonic cursor over the statement's tokens. Patterns save and
/// restore positions explicitly; there is no lookahead buffer.
pub struct Matcher<'a> {
    tokens: &'a [Token],
    sentence: &'a str,
    pattern: &'static str,
    pos: usize,
    committed: bool,
}

impl<'a> Matcher<'a> {
    pub fn new(tokens: &'a [Token], sentence: &'a str, pattern: &'static str) -> Self {
        Matcher {
            tokens,
            sentence,
            pattern,
            pos: 0,
            committed: false,
        }
    }

    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn save(&self) -> usize {
        self.pos
    }

    pub fn restore(&mut self, saved: usize) {
        self.pos = saved;
    }

    /// Commit to this pattern: later mismatches become diagnostics
    /// instead of silent backtracking.
    pub fn cut(&mut self) {
        self.committed = true;
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Fail the current constituent, honoring the cut.
    pub fn fail<T>(&self, expected: impl Into<String>) -> MatchResult<T> {
        if self.committed {
            Err(MatchFail::Error(Error::Grammatical {
                sentence: self.sentence.to_string(),
                pattern: Some(self.pattern),
                expected: expected.into(),
            }))
        } else {
            Err(MatchFail::Backtrack)
        }
    }

    /// Lift an action error; these never backtrack.
    pub fn act<T>(&self, result: crate::error::Result<T>) -> MatchResult<T> {
        result.map_err(MatchFail::Error)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    pub fn next_is(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.eq_word(word))
    }

    pub fn next_is_one_of(&self, words: &[&str]) -> bool {
        self.peek()
            .is_some_and(|t| words.iter().any(|w| t.eq_word(w)))
    }

    pub fn advance(&mut self) -> Option<&'a Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    /// Require a specific literal word.
    pub fn word(&mut self, word: &str) -> MatchResult<()> {
        if self.next_is(word) {
            self.pos += 1;
            Ok(())
        } else {
            self.fail(format!("the word '{word}'"))
        }
    }

    /// Require a run of literal words.
    pub fn words(&mut self, words: &[&str]) -> MatchResult<()> {
        for w in words {
            self.word(w)?;
        }
        Ok(())
    }

    /// Consume a literal word if present.
    pub fn opt_word(&mut self, word: &str) -> bool {
        if self.next_is(word) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Require one word from a closed list, returning which.
    pub fn one_of(&mut self, words: &[&'static str]) -> MatchResult<&'static str> {
        if let Some(t) = self.peek() {
            for w in words {
                if t.eq_word(w) {
                    self.pos += 1;
                    return Ok(w);
                }
            }
        }
        self.fail(format!("one of: {}", words.join(", ")))
    }

    /// Require end of input.
    pub fn end(&mut self) -> MatchResult<()> {
        if self.at_end() {
            Ok(())
        } else {
            self.fail("the end of the sentence")
        }
    }

    /// An integer, written as digits or as a digit word ("one".."ten").
    pub fn integer(&mut self) -> MatchResult<usize> {
        if let Some(t) = self.peek() {
            if t.is_integer() {
                if let Ok(value) = t.as_str().parse() {
                    self.pos += 1;
                    return Ok(value);
                }
            }
            if let Some(value) = digit_word_value(t) {
                self.pos += 1;
                return Ok(value);
            }
        }
        self.fail("a number")
    }

    /// A number with an optional fractional part.
    pub fn number(&mut self) -> MatchResult<f64> {
        if let Some(t) = self.peek() {
            if let Ok(value) = t.as_str().parse::<f64>() {
                self.pos += 1;
                return Ok(value);
            }
            if let Some(value) = digit_word_value(t) {
                self.pos += 1;
                return Ok(value as f64);
            }
        }
        self.fail("a number")
    }

    /// A quoted string, with the quotes stripped and case preserved.
    pub fn quoted(&mut self) -> MatchResult<String> {
        if let Some(t) = self.peek() {
            if let Some(inner) = t.quoted_text() {
                let text = inner.to_string();
                self.pos += 1;
                return Ok(text);
            }
        }
        self.fail("a quoted string")
    }

    /// Free text through the end of the sentence.
    pub fn rest_text(&mut self) -> MatchResult<String> {
        if self.at_end() {
            return self.fail("some text");
        }
        let mut out = String::new();
        while let Some(t) = self.advance() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(t.quoted_text().unwrap_or(t.as_str()));
        }
        Ok(out)
    }

    /// Word tokens up to (not including) any stop word or punctuation.
    pub fn words_until(&mut self, stops: &[&str]) -> MatchResult<TokenString> {
        let start = self.pos;
        while let Some(t) = self.peek() {
            if !t.is_word() || stops.iter().any(|s| t.eq_word(s)) {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return self.fail("a word");
        }
        Ok(TokenString::from(&self.tokens[start..self.pos]))
    }

    /// The token slice between two cursor positions.
    pub fn slice(&self, from: usize, to: usize) -> TokenString {
        TokenString::from(&self.tokens[from..to])
    }
}
