// src/boolean.rs

use crate::arith::derive_arith;
use crate::ast::{BinaryOp, Expr, Operator};
use crate::env::Environment;
use crate::error::{Error, StructuralError};
use crate::evaluator::compare;
use crate::step::{BoolSubject, Step};

/// Derives the step sequence for a boolean expression. Comparisons embed
/// the full arithmetic derivation of each operand; `¬` and `∧` embed the
/// derivations of their operands and close with their own judgement.
pub fn derive_bool(expr: &Expr, env: &Environment) -> Result<Vec<Step>, Error> {
    match expr {
        Expr::BooleanLiteral(value) => Ok(vec![Step::boolean(BoolSubject::Literal(*value), *value, None)]),

        Expr::Binary { op: op @ (BinaryOp::Eq | BinaryOp::Le), left, right } => {
            let mut steps = derive_arith(left, env)?;
            steps.extend(derive_arith(right, env)?);
            // The verdict comes from evaluating the operands, not from the trace.
            let result = compare(*op, left.eval(env)?, right.eval(env)?)?;
            let subject = BoolSubject::Compare { op: *op, left: left.to_string(), right: right.to_string() };
            steps.push(Step::boolean(subject, result, Some(Operator::Binary(*op))));
            Ok(steps)
        }

        Expr::Unary { argument } => {
            let mut steps = derive_bool(argument, env)?;
            let inner = last_truth(&steps, argument)?;
            steps.push(Step::boolean(BoolSubject::Not(argument.to_string()), !inner, Some(Operator::Not)));
            Ok(steps)
        }

        Expr::Logical { left, right } => {
            let mut steps = derive_bool(left, env)?;
            let l = last_truth(&steps, left)?;
            let right_steps = derive_bool(right, env)?;
            let r = last_truth(&right_steps, right)?;
            steps.extend(right_steps);
            let subject = BoolSubject::And { left: left.to_string(), right: right.to_string() };
            steps.push(Step::boolean(subject, l && r, Some(Operator::And)));
            Ok(steps)
        }

        Expr::Binary { .. } | Expr::Literal(_) | Expr::Identifier(_) => {
            Err(StructuralError { node: expr.node_name(), context: "boolean derivation" }.into())
        }
    }
}

/// The truth value of the most recent boolean judgement in `steps`.
pub fn last_truth(steps: &[Step], operand: &Expr) -> Result<bool, Error> {
    steps
        .iter()
        .rev()
        .find_map(Step::truth)
        .ok_or_else(|| StructuralError { node: operand.node_name(), context: "boolean derivation" }.into())
}
