// src/error.rs

use std::fmt;

/// An input span the tokenizer could not match.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub span: String,
    /// Byte offset of the span in the source.
    pub offset: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lex error at offset {}: unrecognized input '{}'", self.offset, self.span)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    Expected { expected: String, found: String },
    UnexpectedEnd,
    UnsupportedPrimary(String),
    InvalidNumber(String),
    TrailingInput(String),
    /// Nesting or tree depth beyond the given limit.
    TooDeep(usize),
}

impl ParseError {
    pub fn new(kind: ParseErrorKind) -> Self {
        ParseError { kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error: {}", self.kind)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Expected { expected, found } => {
                write!(f, "expected '{}', got '{}'", expected, found)
            }
            ParseErrorKind::UnexpectedEnd => write!(f, "unexpected end of input"),
            ParseErrorKind::UnsupportedPrimary(tok) => write!(f, "unexpected token in primary: '{}'", tok),
            ParseErrorKind::InvalidNumber(s) => write!(f, "invalid number: '{}'", s),
            ParseErrorKind::TrailingInput(tok) => write!(f, "unexpected trailing token: '{}'", tok),
            ParseErrorKind::TooDeep(limit) => write!(f, "expression nests deeper than {} levels", limit),
        }
    }
}

/// A malformed `(name, value)` entry of the variable environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub name: String,
    pub value: String,
    pub reason: ValidationReason,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationReason {
    EmptyName,
    NotNumeric,
    DuplicateName,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            ValidationReason::EmptyName => "variable name is empty",
            ValidationReason::NotNumeric => "value is not an integer",
            ValidationReason::DuplicateName => "variable is defined more than once",
        };
        write!(f, "Invalid variable {}={}: {}", self.name, self.value, reason)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    UnboundVariable(String),
    DivisionByZero,
    Overflow,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnboundVariable(var) => write!(f, "Missing value for variable: '{}'", var),
            EvalError::DivisionByZero => write!(f, "Arithmetic error: division by zero"),
            EvalError::Overflow => write!(f, "Arithmetic error: integer overflow"),
        }
    }
}

/// An AST node reached an engine that has no rule for it. The grammar
/// cannot produce such trees for the engine the dispatcher picks, so this
/// signals a broken invariant rather than bad user input.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralError {
    pub node: &'static str,
    pub context: &'static str,
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Structural error: {} node is not supported in {}", self.node, self.context)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
    Validation(ValidationError),
    Eval(EvalError),
    Structural(StructuralError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => e.fmt(f),
            Error::Parse(e) => e.fmt(f),
            Error::Validation(e) => e.fmt(f),
            Error::Eval(e) => e.fmt(f),
            Error::Structural(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self { Error::Lex(e) }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self { Error::Parse(e) }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self { Error::Validation(e) }
}

impl From<EvalError> for Error {
    fn from(e: EvalError) -> Self { Error::Eval(e) }
}

impl From<StructuralError> for Error {
    fn from(e: StructuralError) -> Self { Error::Structural(e) }
}
