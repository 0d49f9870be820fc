// src/lexer.rs

use std::fmt;

use crate::error::LexError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Number,
    /// Identifiers and the keywords `true` / `false`.
    Word,
    Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub class: TokenClass,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

const MULTI_CHAR_SYMBOLS: [&str; 3] = ["=>", "<=", "=="];
const SINGLE_CHAR_SYMBOLS: &str = "!¬&∧|+*/<>=()-≤";

/// Splits `input` into tokens. Whitespace between tokens is dropped; any
/// span that is not a number, word or known symbol is an error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        let Some(c) = rest.chars().next() else { break };

        if c.is_whitespace() {
            pos += c.len_utf8();
            continue;
        }

        if let Some(sym) = MULTI_CHAR_SYMBOLS.iter().find(|s| rest.starts_with(**s)) {
            tokens.push(Token { text: sym.to_string(), class: TokenClass::Symbol });
            pos += sym.len();
            continue;
        }

        if c.is_ascii_alphabetic() {
            let len = run_length(rest, |c| c.is_ascii_alphabetic());
            tokens.push(Token { text: rest[..len].to_string(), class: TokenClass::Word });
            pos += len;
            continue;
        }

        if c.is_ascii_digit() {
            let len = run_length(rest, |c| c.is_ascii_digit());
            tokens.push(Token { text: rest[..len].to_string(), class: TokenClass::Number });
            pos += len;
            continue;
        }

        if SINGLE_CHAR_SYMBOLS.contains(c) {
            tokens.push(Token { text: c.to_string(), class: TokenClass::Symbol });
            pos += c.len_utf8();
            continue;
        }

        let len = run_length(rest, |c| !c.is_whitespace() && !starts_token(c));
        return Err(LexError { span: rest[..len].to_string(), offset: pos });
    }

    log::trace!("tokenized {} tokens", tokens.len());
    Ok(tokens)
}

fn starts_token(c: char) -> bool {
    c.is_ascii_alphanumeric() || SINGLE_CHAR_SYMBOLS.contains(c)
}

// Byte length of the leading run of `s` whose chars satisfy `pred`.
fn run_length(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(i, _)| i)
}
