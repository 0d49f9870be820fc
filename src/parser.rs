// src/parser.rs

use crate::ast::{BinaryOp, Expr};
use crate::error::{Error, ParseError, ParseErrorKind};
use crate::lexer::{tokenize, Token, TokenClass};

/// Tokens whose presence anywhere in the input selects the boolean grammar.
static BOOLEAN_TRIGGERS: phf::Set<&'static str> = phf::phf_set! {
    "=", "<=", "≤", "∧", "&", "¬", "!", "true", "false",
};

/// Deepest tree, and deepest bracket or negation nesting, the parser accepts.
pub const MAX_DEPTH: usize = 256;

// A subtree together with its depth.
type Node = (Expr, usize);

// --- The Parser ---
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    boolean: bool,
    nesting: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let boolean = tokens.iter().any(|t| BOOLEAN_TRIGGERS.contains(t.as_str()));
        Parser { tokens, pos: 0, boolean, nesting: 0 }
    }

    /// Whether the token stream routed parsing through the boolean grammar.
    pub fn is_boolean(&self) -> bool {
        self.boolean
    }

    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(Token::as_str)
    }

    fn peek_is(&self, candidates: &[&str]) -> bool {
        self.peek().map_or(false, |t| candidates.contains(&t))
    }

    fn consume(&mut self, expected: Option<&str>) -> Result<Token, ParseError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParseError::new(ParseErrorKind::UnexpectedEnd))?;
        if let Some(expected) = expected {
            if token.as_str() != expected {
                return Err(ParseError::new(ParseErrorKind::Expected {
                    expected: expected.to_string(),
                    found: token.text,
                }));
            }
        }
        self.pos += 1;
        Ok(token)
    }

    fn check_depth(depth: usize) -> Result<usize, ParseError> {
        if depth > MAX_DEPTH {
            return Err(ParseError::new(ParseErrorKind::TooDeep(MAX_DEPTH)));
        }
        Ok(depth)
    }

    fn join(left: Node, right: Node, build: impl FnOnce(Expr, Expr) -> Expr) -> Result<Node, ParseError> {
        let depth = Self::check_depth(1 + left.1.max(right.1))?;
        Ok((build(left.0, right.0), depth))
    }

    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        log::debug!(
            "parsing {} tokens with the {} grammar",
            self.tokens.len(),
            if self.boolean { "boolean" } else { "arithmetic" }
        );
        let (expr, depth) = self.parse_expression()?;
        log::trace!("tree depth {}", depth);
        match self.tokens.get(self.pos) {
            Some(extra) => Err(ParseError::new(ParseErrorKind::TrailingInput(extra.text.clone()))),
            None => Ok(expr),
        }
    }

    // The grammar entry is fixed for the whole input by the trigger scan.
    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        if self.boolean {
            self.parse_logical_and()
        } else {
            self.parse_additive()
        }
    }

    fn parse_logical_and(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_comparison()?;
        while self.peek_is(&["∧", "&"]) {
            self.consume(None)?;
            let right = self.parse_comparison()?;
            node = Self::join(node, right, Expr::and)?;
        }
        Ok(node)
    }

    fn parse_comparison(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_additive()?;
        while self.peek_is(&["=", "<=", "≤"]) {
            let op = match self.consume(None)?.as_str() {
                "=" => BinaryOp::Eq,
                _ => BinaryOp::Le,
            };
            let right = self.parse_additive()?;
            node = Self::join(node, right, |l, r| Expr::binary(op, l, r))?;
        }
        Ok(node)
    }

    fn parse_additive(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_multiplicative()?;
        while self.peek_is(&["+", "-"]) {
            let op = match self.consume(None)?.as_str() {
                "+" => BinaryOp::Add,
                _ => BinaryOp::Sub,
            };
            let right = self.parse_multiplicative()?;
            node = Self::join(node, right, |l, r| Expr::binary(op, l, r))?;
        }
        Ok(node)
    }

    fn parse_multiplicative(&mut self) -> Result<Node, ParseError> {
        let mut node = self.parse_primary()?;
        while self.peek_is(&["*", "/"]) {
            let op = match self.consume(None)?.as_str() {
                "*" => BinaryOp::Mul,
                _ => BinaryOp::Div,
            };
            let right = self.parse_primary()?;
            node = Self::join(node, right, |l, r| Expr::binary(op, l, r))?;
        }
        Ok(node)
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let token = self.consume(None)?;
        match (token.class, token.as_str()) {
            (_, "(") => {
                self.nesting = Self::check_depth(self.nesting + 1)?;
                let node = self.parse_expression()?;
                self.consume(Some(")"))?;
                self.nesting -= 1;
                Ok(node)
            }
            (_, "¬") | (_, "!") => {
                self.nesting = Self::check_depth(self.nesting + 1)?;
                let (argument, depth) = self.parse_primary()?;
                self.nesting -= 1;
                Ok((Expr::not(argument), Self::check_depth(depth + 1)?))
            }
            (TokenClass::Number, digits) => digits
                .parse::<i64>()
                .map(|n| (Expr::Literal(n), 1))
                .map_err(|_| ParseError::new(ParseErrorKind::InvalidNumber(digits.to_string()))),
            (TokenClass::Word, "true") => Ok((Expr::BooleanLiteral(true), 1)),
            (TokenClass::Word, "false") => Ok((Expr::BooleanLiteral(false), 1)),
            (TokenClass::Word, name) => Ok((Expr::Identifier(name.to_string()), 1)),
            (TokenClass::Symbol, other) => {
                Err(ParseError::new(ParseErrorKind::UnsupportedPrimary(other.to_string())))
            }
        }
    }
}

// Convenience function for parsing
pub fn parse(input: &str) -> Result<Expr, Error> {
    let tokens = tokenize(input)?;
    Ok(Parser::new(tokens).parse()?)
}
