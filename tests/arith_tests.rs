// tests/arith_tests.rs


use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sem_steps::{BinaryOp, Expr, Form, Operator, Phase, MAX_DEPTH};
use test_utils::{env_of, rendered, steps_err, steps_ok};

#[cfg(test)]
mod arith_tests {
    use super::*;

    #[test]
    fn test_sample_from_the_form() {
        let steps = steps_ok("((x - y) * 3) + 2", &[("x", 6), ("y", 1)]);
        assert_eq!(steps[0].to_string(), "E⟦((x - y) * 3) + 2⟧s");
        assert_eq!(steps[1].to_string(), "E⟦(x - y) * 3⟧s ⊕ E⟦2⟧s");
        assert_eq!(steps.last().unwrap().to_string(), "17");
    }

    #[test]
    fn test_step_two_partition() {
        let steps = steps_ok("((x - y) * 3) + 2", &[("x", 6), ("y", 1)]);
        let p = steps[1].partition().unwrap();
        assert_eq!(p.left, "E⟦(x - y) * 3⟧s");
        assert_eq!(p.operator, "⊕");
        assert_eq!(p.right, "E⟦2⟧s");
        assert_eq!(p.result, None);
        assert_eq!(steps[1].highlight, Some(Operator::Binary(BinaryOp::Add)));
    }

    #[test]
    fn test_literal_only() {
        let steps = steps_ok("42", &[]);
        assert_eq!(rendered(&steps), vec!["E⟦42⟧s", "N⟦42⟧", "42", "42"]);
        assert_eq!(steps[0].phase, Phase::Symbolic);
        assert_eq!(steps.last().unwrap().phase, Phase::Fold);
    }

    #[test]
    fn test_parentheses_do_not_add_nodes() {
        assert_eq!(rendered(&steps_ok("((7))", &[])), rendered(&steps_ok("7", &[])));
    }

    #[test]
    fn test_subtraction_can_go_negative() {
        let steps = steps_ok("x - 10", &[("x", 6)]);
        assert_eq!(steps.last().unwrap().form(), Some(&Form::Value(-4)));
    }

    #[test]
    fn test_fold_order_is_leftmost_innermost() {
        let steps = steps_ok("(1 + 2) * (3 + 4)", &[]);
        let folds: Vec<String> = steps
            .iter()
            .filter(|s| s.phase == Phase::Fold)
            .map(|s| s.to_string())
            .collect();
        assert_eq!(folds, vec!["(3 ⊗ (3 ⊕ 4))", "(3 ⊗ 7)", "21"]);
    }

    #[test]
    fn test_substitution_walks_leaves_in_order() {
        let steps = steps_ok("a + b", &[("a", 1), ("b", 2)]);
        let subs: Vec<String> = steps
            .iter()
            .filter(|s| s.phase == Phase::Substitution)
            .map(|s| s.to_string())
            .collect();
        assert_eq!(subs, vec!["(s a ⊕ E⟦b⟧s)", "(1 ⊕ E⟦b⟧s)", "(1 ⊕ s b)", "(1 ⊕ 2)"]);
    }

    #[test]
    fn test_missing_variable_names_it() {
        let err = steps_err("x + y", &[("x", 1)]);
        assert_eq!(err.to_string(), "Missing value for variable: 'y'");
    }

    #[test]
    fn test_division_by_zero() {
        let err = steps_err("4 / (x - x)", &[("x", 3)]);
        assert_eq!(err, sem_steps::Error::Eval(sem_steps::EvalError::DivisionByZero));
    }

    #[test]
    fn test_long_chain_is_refused_by_the_parser() {
        let chain = vec!["1"; 5000].join(" + ");
        let err = steps_err(&chain, &[]);
        assert!(matches!(err, sem_steps::Error::Parse(_)), "got {:?}", err);
        assert_eq!(err.to_string(), format!("Parse error: expression nests deeper than {} levels", MAX_DEPTH));
    }

    #[test]
    fn test_deepest_accepted_chain_derives() {
        let chain = vec!["x"; MAX_DEPTH].join(" + ");
        let steps = steps_ok(&chain, &[("x", 2)]);
        assert_eq!(steps.last().unwrap().form(), Some(&Form::Value(2 * MAX_DEPTH as i64)));
        let subs = steps.iter().filter(|s| s.phase == Phase::Substitution).count();
        assert_eq!(subs, 2 * MAX_DEPTH);
    }

    // --- Randomised agreement with direct evaluation ---

    fn random_expr(rng: &mut impl Rng, depth: usize) -> Expr {
        if depth == 0 || rng.gen_bool(0.3) {
            return match rng.gen_range(0..3) {
                0 => Expr::ident("x"),
                1 => Expr::ident("y"),
                _ => Expr::Literal(rng.gen_range(0..10)),
            };
        }
        let op = match rng.gen_range(0..3) {
            0 => BinaryOp::Add,
            1 => BinaryOp::Sub,
            _ => BinaryOp::Mul,
        };
        Expr::binary(op, random_expr(rng, depth - 1), random_expr(rng, depth - 1))
    }

    #[test]
    fn test_random_trees_fold_to_their_value() {
        let mut rng = StdRng::seed_from_u64(0x5e11);
        let env = env_of(&[("x", 6), ("y", -3)]);
        for _ in 0..200 {
            let expr = random_expr(&mut rng, 4);
            let steps = sem_steps::derive_arith(&expr, &env).unwrap();
            let expected = expr.eval(&env).unwrap();
            assert_eq!(steps.last().unwrap().form(), Some(&Form::Value(expected)), "expr {}", expr);

            let subs = steps.iter().filter(|s| s.phase == Phase::Substitution).count();
            assert_eq!(subs, 2 * expr.leaf_count(), "expr {}", expr);

            let depth = expr.depth();
            assert_eq!(steps.iter().any(|s| s.phase == Phase::Expansion), depth >= 2);
            assert_eq!(steps.iter().any(|s| s.phase == Phase::Split), depth >= 3);
            assert_eq!(steps.iter().any(|s| s.phase == Phase::FullExpansion), depth >= 4);

            // The rendering reparses to the same tree.
            assert_eq!(sem_steps::parse(&expr.to_string()).unwrap(), expr);
        }
    }
}
