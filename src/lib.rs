// src/lib.rs

// --- Module Declarations ---
pub mod arith;
pub mod ast;
pub mod boolean;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod rules;
pub mod step;

// --- Public API Re-exports ---
pub use arith::derive_arith;
pub use ast::{BinaryOp, Expr, Kind, Operator, TreeNode};
pub use boolean::derive_bool;
pub use env::Environment;
pub use error::{Error, EvalError, LexError, ParseError, StructuralError, ValidationError};
pub use parser::{parse, MAX_DEPTH};
pub use step::{Form, Judgement, Phase, Step};

/// A parsed expression together with its full derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation {
    pub expr: Expr,
    pub kind: Kind,
    pub steps: Vec<Step>,
}

/// Which engine an expression belongs to.
pub fn classify(expr: &Expr) -> Kind {
    expr.kind()
}

/// Routes an expression to the arithmetic or boolean engine.
pub fn derive(expr: &Expr, env: &Environment) -> Result<Vec<Step>, Error> {
    match classify(expr) {
        Kind::Arithmetic => derive_arith(expr, env),
        Kind::Boolean => derive_bool(expr, env),
    }
}

/// Parses `source` and derives it against an already built environment.
pub fn run_with_env(source: &str, env: &Environment) -> Result<Vec<Step>, Error> {
    let expr = parse(source)?;
    derive(&expr, env)
}

/// Tokenizes, parses and validates everything before deriving anything,
/// so input errors never come with a partial result.
pub fn run<N, V>(source: &str, pairs: &[(N, V)]) -> Result<Derivation, Error>
where
    N: AsRef<str>,
    V: AsRef<str>,
{
    let expr = parse(source)?;
    let env = Environment::from_pairs(pairs)?;
    let kind = classify(&expr);
    log::debug!("{:?} expression of depth {}", kind, expr.depth());
    let steps = derive(&expr, &env)?;
    log::debug!("derived {} steps", steps.len());
    Ok(Derivation { expr, kind, steps })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_line(source: &str, pairs: &[(&str, &str)]) -> String {
        run(source, pairs).unwrap().steps.last().unwrap().to_string()
    }

    #[test]
    fn test_sample_expression() {
        let d = run("((x - y) * 3) + 2", &[("x", "6"), ("y", "1")]).unwrap();
        assert_eq!(d.kind, Kind::Arithmetic);
        assert_eq!(d.steps[1].to_string(), "E⟦(x - y) * 3⟧s ⊕ E⟦2⟧s");
        assert_eq!(d.steps.last().unwrap().form(), Some(&Form::Value(17)));
    }

    #[test]
    fn test_boolean_examples() {
        assert_eq!(last_line("x <= y", &[("x", "1"), ("y", "2")]), "𝔅⟦x <= y⟧s = tt");
        let d = run("!(x = y) ∧ true", &[("x", "1"), ("y", "1")]).unwrap();
        assert_eq!(d.kind, Kind::Boolean);
        assert_eq!(d.steps.last().unwrap().truth(), Some(false));
    }

    #[test]
    fn test_missing_variable() {
        assert_eq!(
            run("x + y", &[("x", "1")]),
            Err(Error::Eval(EvalError::UnboundVariable("y".to_string())))
        );
    }

    #[test]
    fn test_input_errors_fail_fast() {
        assert!(matches!(run("1 +", &[("x", "1")]), Err(Error::Parse(_))));
        assert!(matches!(run("1 + 1", &[("x", "one")]), Err(Error::Validation(_))));
        assert!(matches!(run("1 ? 1", &[("", "")]), Err(Error::Lex(_))));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(&parse("x").unwrap()), Kind::Arithmetic);
        assert_eq!(classify(&parse("¬false").unwrap()), Kind::Boolean);
        assert_eq!(classify(&parse("(1 + 2) = 3").unwrap()), Kind::Boolean);
    }

    #[test]
    fn test_empty_environment_pairs() {
        let pairs: [(&str, &str); 0] = [];
        assert_eq!(last_line("2 * 3", &pairs), "6");
    }
}
