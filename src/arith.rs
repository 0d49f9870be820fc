// src/arith.rs

use crate::ast::{BinaryOp, Expr, Operator};
use crate::env::Environment;
use crate::error::{Error, StructuralError};
use crate::step::{Form, Phase, Step};

/// Derives the step sequence for an arithmetic expression:
///
/// 1. the symbolic judgement `E⟦e⟧s`
/// 2. expansion of the root operator (depth >= 2)
/// 3. a forced one-level split of the root's children (depth >= 3)
/// 4. the fully expanded operator tree (depth >= 4)
/// 5. leaf-by-leaf substitution, two micro-steps per leaf
/// 6. folding down to a single number
///
/// Either the whole sequence is produced or nothing is.
pub fn derive_arith(expr: &Expr, env: &Environment) -> Result<Vec<Step>, Error> {
    check_arith(expr)?;
    let depth = expr.depth();
    let mut steps = vec![Step::arith(Phase::Symbolic, Form::Eval(expr.render_bare()), None)];

    if let Expr::Binary { op, left, right } = expr {
        if depth >= 2 {
            let form = Form::Apply {
                op: *op,
                left: Box::new(Form::Eval(left.render_bare())),
                right: Box::new(Form::Eval(right.render_bare())),
                bracketed: false,
                focus: true,
            };
            steps.push(Step::arith(Phase::Expansion, form, Some(Operator::Binary(*op))));
        }
        if depth >= 3 {
            let mut slot = None;
            let form = Form::apply(*op, split_child(left, &mut slot), split_child(right, &mut slot));
            steps.push(Step::arith(Phase::Split, form, slot));
        }
        if depth >= 4 {
            let mut slot = None;
            let form = Form::apply(*op, expand(left, &mut slot), expand(right, &mut slot));
            steps.push(Step::arith(Phase::FullExpansion, form, slot));
        }
    }

    let before = steps.len();
    substitution_steps(expr, env, &mut steps)?;
    log::debug!("depth {}: {} substitution steps", depth, steps.len() - before);

    let before = steps.len();
    fold_steps(expr, env, &mut steps)?;
    log::debug!("depth {}: {} folding steps", depth, steps.len() - before);

    Ok(steps)
}

// Rejects boolean nodes up front so no partial sequence is ever built.
fn check_arith(expr: &Expr) -> Result<(), StructuralError> {
    match expr {
        Expr::Literal(_) | Expr::Identifier(_) => Ok(()),
        Expr::Binary { op, left, right } if op.kind() == crate::ast::Kind::Arithmetic => {
            check_arith(left)?;
            check_arith(right)
        }
        Expr::Binary { .. } | Expr::BooleanLiteral(_) | Expr::Unary { .. } | Expr::Logical { .. } => {
            Err(StructuralError { node: expr.node_name(), context: "arithmetic derivation" })
        }
    }
}

fn eval_of(expr: &Expr) -> Form {
    Form::Eval(expr.render_bare())
}

// Claims the highlight slot for `op` if nothing has claimed it yet.
fn claim(slot: &mut Option<Operator>, op: BinaryOp) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(Operator::Binary(op));
    true
}

fn split_child(node: &Expr, slot: &mut Option<Operator>) -> Form {
    match node {
        Expr::Binary { op, left, right } => Form::Apply {
            op: *op,
            left: Box::new(eval_of(left)),
            right: Box::new(eval_of(right)),
            bracketed: true,
            focus: claim(slot, *op),
        },
        _ => eval_of(node),
    }
}

fn expand(node: &Expr, slot: &mut Option<Operator>) -> Form {
    match node {
        Expr::Binary { op, left, right } => {
            let focus = claim(slot, *op);
            Form::Apply {
                op: *op,
                left: Box::new(expand(left, slot)),
                right: Box::new(expand(right, slot)),
                bracketed: true,
                focus,
            }
        }
        _ => eval_of(node),
    }
}

/// Pre-order leaf numbering shared by one rendering pass.
struct LeafCursor {
    next: usize,
}

// Renders the tree as seen at micro-step `k`. The i-th leaf (0-based)
// owns micro-steps 2i+1 (named form) and 2i+2 (its value).
fn substitute(node: &Expr, env: &Environment, k: usize, cursor: &mut LeafCursor) -> Result<Form, Error> {
    match node {
        Expr::Literal(_) | Expr::Identifier(_) => {
            let first = 2 * cursor.next + 1;
            cursor.next += 1;
            if k < first {
                return Ok(eval_of(node));
            }
            match node {
                Expr::Literal(n) if k == first => Ok(Form::Numeral(*n)),
                Expr::Identifier(name) if k == first => Ok(Form::Lookup(name.clone())),
                _ => leaf_value(node, env).map(Form::Value),
            }
        }
        Expr::Binary { op, left, right } => {
            let left = substitute(left, env, k, cursor)?;
            let right = substitute(right, env, k, cursor)?;
            Ok(Form::apply(*op, left, right))
        }
        _ => Err(StructuralError { node: node.node_name(), context: "substitution" }.into()),
    }
}

fn leaf_value(node: &Expr, env: &Environment) -> Result<i64, Error> {
    match node {
        Expr::Literal(n) => Ok(*n),
        Expr::Identifier(name) => Ok(env.lookup(name)?),
        _ => Err(StructuralError { node: node.node_name(), context: "substitution" }.into()),
    }
}

fn substitution_steps(expr: &Expr, env: &Environment, steps: &mut Vec<Step>) -> Result<(), Error> {
    let total = 2 * expr.leaf_count();
    let mut last: Option<String> = None;
    for k in 1..=total {
        let form = substitute(expr, env, k, &mut LeafCursor { next: 0 })?;
        let rendered = form.to_string();
        if last.as_deref() == Some(rendered.as_str()) {
            continue;
        }
        last = Some(rendered);
        steps.push(Step::arith(Phase::Substitution, form, None));
    }
    Ok(())
}

/// Every leaf replaced by its value, operators in semantic form.
fn numeral_form(node: &Expr, env: &Environment) -> Result<Form, Error> {
    match node {
        Expr::Binary { op, left, right } => {
            Ok(Form::apply(*op, numeral_form(left, env)?, numeral_form(right, env)?))
        }
        _ => leaf_value(node, env).map(Form::Value),
    }
}

fn fold_steps(expr: &Expr, env: &Environment, steps: &mut Vec<Step>) -> Result<(), Error> {
    let mut current = numeral_form(expr, env)?;
    let mut emitted: Vec<Form> = Vec::new();

    while current.reduce_first()? {
        if emitted.last() != Some(&current) {
            emitted.push(current.clone());
        }
    }
    if emitted.last() != Some(&current) {
        emitted.push(current);
    }

    steps.extend(emitted.into_iter().map(|form| Step::arith(Phase::Fold, form, None)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use crate::parser::parse;

    fn env() -> Environment {
        [("x", 6i64), ("y", 1)].into_iter().collect()
    }

    fn rendered(input: &str) -> Vec<String> {
        let expr = parse(input).unwrap();
        derive_arith(&expr, &env()).unwrap().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_sequence_for_sample() {
        let steps = rendered("((x - y) * 3) + 2");
        let expected = vec![
            "E⟦((x - y) * 3) + 2⟧s",
            "E⟦(x - y) * 3⟧s ⊕ E⟦2⟧s",
            "((E⟦x - y⟧s ⊗ E⟦3⟧s) ⊕ E⟦2⟧s)",
            "((((E⟦x⟧s ⊖ E⟦y⟧s) ⊗ E⟦3⟧s) ⊕ E⟦2⟧s)",
            "(((s x ⊖ E⟦y⟧s) ⊗ E⟦3⟧s) ⊕ E⟦2⟧s)",
            "(((6 ⊖ E⟦y⟧s) ⊗ E⟦3⟧s) ⊕ E⟦2⟧s)",
            "(((6 ⊖ s y) ⊗ E⟦3⟧s) ⊕ E⟦2⟧s)",
            "(((6 ⊖ 1) ⊗ E⟦3⟧s) ⊕ E⟦2⟧s)",
            "(((6 ⊖ 1) ⊗ N⟦3⟧) ⊕ E⟦2⟧s)",
            "(((6 ⊖ 1) ⊗ 3) ⊕ E⟦2⟧s)",
            "(((6 ⊖ 1) ⊗ 3) ⊕ N⟦2⟧)",
            "(((6 ⊖ 1) ⊗ 3) ⊕ 2)",
            "((5 ⊗ 3) ⊕ 2)",
            "(15 ⊕ 2)",
            "17",
        ];
        assert_eq!(steps, expected);
    }

    #[test]
    fn test_highlight_slots() {
        let expr = parse("((x - y) * 3) + (1 + 2)").unwrap();
        let steps = derive_arith(&expr, &env()).unwrap();
        assert_eq!(steps[1].highlight, Some(Operator::Binary(BinaryOp::Add)));
        assert_eq!(steps[2].phase, Phase::Split);
        assert_eq!(steps[2].highlight, Some(Operator::Binary(BinaryOp::Mul)));
        assert_eq!(steps[3].phase, Phase::FullExpansion);
        assert_eq!(steps[3].highlight, Some(Operator::Binary(BinaryOp::Mul)));
        assert!(steps[4..].iter().all(|s| s.highlight.is_none()));
    }

    #[test]
    fn test_split_highlight_skips_leaf_children() {
        let expr = parse("2 * (x - y)").unwrap();
        let steps = derive_arith(&expr, &env()).unwrap();
        assert_eq!(steps[2].to_string(), "(E⟦2⟧s ⊗ (E⟦x⟧s ⊖ E⟦y⟧s))");
        assert_eq!(steps[2].highlight, Some(Operator::Binary(BinaryOp::Sub)));
        let p = steps[2].partition().unwrap();
        assert_eq!((p.left.as_str(), p.operator.as_str(), p.right.as_str()), ("E⟦x⟧s", "⊖", "E⟦y⟧s"));
    }

    #[test]
    fn test_depth_gating() {
        let steps = derive_arith(&parse("x").unwrap(), &env()).unwrap();
        let phases: Vec<Phase> = steps.iter().map(|s| s.phase).collect();
        assert_eq!(phases, vec![Phase::Symbolic, Phase::Substitution, Phase::Substitution, Phase::Fold]);
        assert_eq!(steps.iter().map(|s| s.to_string()).collect::<Vec<_>>(), vec!["E⟦x⟧s", "s x", "6", "6"]);

        let steps = derive_arith(&parse("1 + 2").unwrap(), &env()).unwrap();
        assert!(steps.iter().all(|s| s.phase != Phase::Split && s.phase != Phase::FullExpansion));
        assert_eq!(steps.last().unwrap().to_string(), "3");

        let steps = derive_arith(&parse("(1 + 2) * 3").unwrap(), &env()).unwrap();
        assert!(steps.iter().any(|s| s.phase == Phase::Split));
        assert!(steps.iter().all(|s| s.phase != Phase::FullExpansion));
    }

    #[test]
    fn test_substitution_count() {
        let expr = parse("(x + 2) * (y - 3) / 4").unwrap();
        let steps = derive_arith(&expr, &env()).unwrap();
        let count = steps.iter().filter(|s| s.phase == Phase::Substitution).count();
        assert_eq!(count, 2 * expr.leaf_count());
    }

    #[test]
    fn test_division_folds() {
        let steps = rendered("(x + 2) / 3");
        assert_eq!(steps.last().unwrap(), "2");
        assert!(steps.contains(&"(8 ÷ 3)".to_string()));
    }

    #[test]
    fn test_unbound_variable() {
        let expr = parse("x + z").unwrap();
        assert_eq!(
            derive_arith(&expr, &env()),
            Err(Error::Eval(EvalError::UnboundVariable("z".to_string())))
        );
    }

    #[test]
    fn test_boolean_node_is_structural() {
        let expr = parse("1 = 1").unwrap();
        assert!(matches!(derive_arith(&expr, &env()), Err(Error::Structural(_))));
    }

    #[test]
    fn test_calls_do_not_share_state() {
        let a = parse("(1 + 2) * (3 + 4)").unwrap();
        let b = parse("1 + (2 * 3)").unwrap();
        let first = derive_arith(&a, &env()).unwrap();
        let _ = derive_arith(&b, &env()).unwrap();
        assert_eq!(derive_arith(&a, &env()).unwrap(), first);
    }
}
