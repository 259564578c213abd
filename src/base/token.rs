//! Logos-based tokenizer for statement text.
//!
//! Statements are split into word tokens and punctuation-as-tokens; all
//! comparison is case-insensitive because word tokens are lowercased on
//! creation. Quoted strings become a single token that preserves its inner
//! text verbatim, so templates keep their capitalization.

use std::fmt;
use std::ops::Deref;

use logos::Logos;
use smol_str::SmolStr;

/// A single lowercased word, number, or punctuation mark.
///
/// Quoted-string tokens keep their surrounding quotes and original case;
/// everything else is lowercased so that equality is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(SmolStr);

impl Token {
    pub fn new(text: &str) -> Self {
        if text.starts_with('"') {
            Token(SmolStr::new(text))
        } else {
            Token(SmolStr::new(text.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for plain word tokens (no digits, no punctuation).
    pub fn is_word(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_alphabetic())
    }

    pub fn is_integer(&self) -> bool {
        !self.0.is_empty() && self.0.chars().all(|c| c.is_ascii_digit())
    }

    pub fn is_quoted(&self) -> bool {
        self.0.starts_with('"')
    }

    /// The text inside a quoted token, without the quotes.
    pub fn quoted_text(&self) -> Option<&str> {
        self.0
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
    }

    pub fn eq_word(&self, word: &str) -> bool {
        self.0 == word
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::new(s)
    }
}

/// An ordered sequence of tokens. Equality is element-wise; `Display`
/// joins with single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TokenString(Vec<Token>);

impl TokenString {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenString(tokens)
    }

    pub fn from_word(word: &str) -> Self {
        TokenString(vec![Token::new(word)])
    }

    pub fn push(&mut self, t: Token) {
        self.0.push(t);
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.0
    }

    /// The final token, which carries the inflection for noun phrases.
    pub fn last_word(&self) -> Option<&Token> {
        self.0.last()
    }

    /// The first token, which carries the inflection for verb phrases.
    pub fn head_word(&self) -> Option<&Token> {
        self.0.first()
    }
}

impl Deref for TokenString {
    type Target = [Token];

    fn deref(&self) -> &[Token] {
        &self.0
    }
}

impl fmt::Display for TokenString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(t.as_str())?;
        }
        Ok(())
    }
}

impl From<&str> for TokenString {
    fn from(s: &str) -> Self {
        TokenString(tokenize(s))
    }
}

impl From<&[Token]> for TokenString {
    fn from(ts: &[Token]) -> Self {
        TokenString(ts.to_vec())
    }
}

impl FromIterator<Token> for TokenString {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        TokenString(iter.into_iter().collect())
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r"[A-Za-z]+")]
    Word,

    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r#""[^"]*""#)]
    Quoted,

    #[regex(r#"[-',()./:;?!#\[\]]"#)]
    Punct,
}

/// Split input into tokens. Unknown characters are skipped.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = RawToken::lexer(input);
    let mut out = Vec::new();
    while let Some(raw) = lexer.next() {
        if raw.is_ok() {
            out.push(Token::new(lexer.slice()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_words() {
        let tokens = tokenize("A Persian IS a kind of Cat");
        let words: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
        assert_eq!(words, ["a", "persian", "is", "a", "kind", "of", "cat"]);
    }

    #[test]
    fn tokenize_splits_punctuation() {
        let tokens = tokenize("tabby (10), and siamese");
        let words: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
        assert_eq!(words, ["tabby", "(", "10", ")", ",", "and", "siamese"]);
    }

    #[test]
    fn quoted_strings_keep_case() {
        let tokens = tokenize(r#"cats are described as "A Fine [Noun]""#);
        let quoted = tokens.last().unwrap();
        assert!(quoted.is_quoted());
        assert_eq!(quoted.quoted_text(), Some("A Fine [Noun]"));
    }

    #[test]
    fn token_string_display_joins_with_spaces() {
        let ts = TokenString::from("sea monster");
        assert_eq!(ts.to_string(), "sea monster");
        assert_eq!(ts.len(), 2);
    }

    #[test]
    fn numbers_tokenize_whole() {
        let tokens = tokenize("between 0.5 and 15");
        let words: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
        assert_eq!(words, ["between", "0.5", "and", "15"]);
        assert!(tokens[3].is_integer());
    }
}
