// src/evaluator.rs

use crate::ast::{BinaryOp, Expr};
use crate::env::Environment;
use crate::error::{Error, EvalError, StructuralError};

/// Applies an arithmetic operator to two integers. Comparison operators
/// have no numeric result and are rejected.
pub fn apply_arith(op: BinaryOp, a: i64, b: i64) -> Result<i64, Error> {
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div => {
            if b == 0 {
                return Err(EvalError::DivisionByZero.into());
            }
            a.checked_div(b)
        }
        BinaryOp::Eq | BinaryOp::Le => {
            return Err(StructuralError { node: "BinaryExpression", context: "arithmetic evaluation" }.into())
        }
    };
    result.ok_or_else(|| EvalError::Overflow.into())
}

pub fn compare(op: BinaryOp, a: i64, b: i64) -> Result<bool, Error> {
    match op {
        BinaryOp::Eq => Ok(a == b),
        BinaryOp::Le => Ok(a <= b),
        _ => Err(StructuralError { node: "BinaryExpression", context: "comparison" }.into()),
    }
}

// --- The Evaluator ---
impl Expr {
    /// Direct recursive evaluation of an arithmetic expression.
    pub fn eval(&self, env: &Environment) -> Result<i64, Error> {
        match self {
            Expr::Literal(n) => Ok(*n),
            Expr::Identifier(name) => Ok(env.lookup(name)?),
            Expr::Binary { op, left, right } => {
                let a = left.eval(env)?;
                let b = right.eval(env)?;
                apply_arith(*op, a, b)
            }
            Expr::BooleanLiteral(_) | Expr::Unary { .. } | Expr::Logical { .. } => {
                Err(StructuralError { node: self.node_name(), context: "arithmetic evaluation" }.into())
            }
        }
    }

    /// Direct recursive evaluation of a boolean expression.
    pub fn eval_bool(&self, env: &Environment) -> Result<bool, Error> {
        match self {
            Expr::BooleanLiteral(b) => Ok(*b),
            Expr::Binary { op, left, right } => compare(*op, left.eval(env)?, right.eval(env)?),
            Expr::Unary { argument } => Ok(!argument.eval_bool(env)?),
            Expr::Logical { left, right } => {
                let l = left.eval_bool(env)?;
                let r = right.eval_bool(env)?;
                Ok(l && r)
            }
            Expr::Literal(_) | Expr::Identifier(_) => {
                Err(StructuralError { node: self.node_name(), context: "boolean evaluation" }.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn env() -> Environment {
        [("x", 6i64), ("y", 1)].into_iter().collect()
    }

    #[test]
    fn test_eval_arithmetic() {
        assert_eq!(parse("((x - y) * 3) + 2").unwrap().eval(&env()), Ok(17));
        assert_eq!(parse("7 / 2").unwrap().eval(&env()), Ok(3));
        assert_eq!(parse("y - x").unwrap().eval(&env()), Ok(-5));
    }

    #[test]
    fn test_eval_errors() {
        assert_eq!(
            parse("x + z").unwrap().eval(&env()),
            Err(Error::Eval(EvalError::UnboundVariable("z".to_string())))
        );
        assert_eq!(parse("x / (y - 1)").unwrap().eval(&env()), Err(Error::Eval(EvalError::DivisionByZero)));
        assert_eq!(
            parse("9223372036854775807 + 1").unwrap().eval(&env()),
            Err(Error::Eval(EvalError::Overflow))
        );
        assert!(matches!(parse("true").unwrap().eval(&env()), Err(Error::Structural(_))));
    }

    #[test]
    fn test_eval_bool() {
        assert_eq!(parse("x <= y").unwrap().eval_bool(&env()), Ok(false));
        assert_eq!(parse("!(x = y) ∧ true").unwrap().eval_bool(&env()), Ok(true));
        assert_eq!(parse("x = 6 & y = 2").unwrap().eval_bool(&env()), Ok(false));
        assert!(matches!(parse("x & true").unwrap().eval_bool(&env()), Err(Error::Structural(_))));
    }
}
