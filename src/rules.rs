// src/rules.rs

use crate::step::{BoolSubject, Form, Judgement, Phase, Step};

/// One inference rule of the natural semantics.
#[derive(Debug, PartialEq)]
pub struct Rule {
    pub key: &'static str,
    pub text: &'static str,
}

pub static RULES: phf::Map<&'static str, Rule> = phf::phf_map! {
    "n" => Rule { key: "n", text: "E⟦n⟧s = N⟦n⟧" },
    "x" => Rule { key: "x", text: "E⟦x⟧s = s x" },
    "+" => Rule { key: "+", text: "E⟦e1 + e2⟧s = E⟦e1⟧s ⊕ E⟦e2⟧s" },
    "-" => Rule { key: "-", text: "E⟦e1 - e2⟧s = E⟦e1⟧s ⊖ E⟦e2⟧s" },
    "*" => Rule { key: "*", text: "E⟦e1 * e2⟧s = E⟦e1⟧s ⊗ E⟦e2⟧s" },
    "/" => Rule { key: "/", text: "E⟦e1 / e2⟧s = E⟦e1⟧s ÷ E⟦e2⟧s" },
    "group" => Rule { key: "group", text: "E⟦(e)⟧s = (E⟦e⟧s)" },
    "true" => Rule { key: "true", text: "𝔅⟦true⟧s = tt" },
    "false" => Rule { key: "false", text: "𝔅⟦false⟧s = ff" },
    "=" => Rule { key: "=", text: "𝔅⟦e1 = e2⟧s = tt if E⟦e1⟧s = E⟦e2⟧s, ff otherwise" },
    "<=" => Rule { key: "<=", text: "𝔅⟦e1 <= e2⟧s = tt if E⟦e1⟧s ≤ E⟦e2⟧s, ff otherwise" },
    "¬" => Rule { key: "¬", text: "𝔅⟦¬b⟧s = tt if 𝔅⟦b⟧s = ff, ff if 𝔅⟦b⟧s = tt" },
    "∧" => Rule { key: "∧", text: "𝔅⟦b1 ∧ b2⟧s = tt if 𝔅⟦b1⟧s = tt and 𝔅⟦b2⟧s = tt, ff otherwise" },
};

/// Listing order for rule tables.
pub const ARITHMETIC_RULES: [&str; 7] = ["n", "x", "+", "-", "*", "/", "group"];
pub const BOOLEAN_RULES: [&str; 6] = ["true", "false", "=", "<=", "¬", "∧"];

impl Step {
    /// The rule this step applies, when it points at one.
    pub fn rule(&self) -> Option<&'static Rule> {
        if let Some(op) = self.highlight {
            return RULES.get(op.symbol());
        }
        match (&self.judgement, self.phase) {
            (Judgement::Bool { subject: BoolSubject::Literal(true), .. }, _) => RULES.get("true"),
            (Judgement::Bool { subject: BoolSubject::Literal(false), .. }, _) => RULES.get("false"),
            (Judgement::Arith(form), Phase::Substitution) => substituted_leaf(form).and_then(|k| RULES.get(k)),
            _ => None,
        }
    }
}

fn substituted_leaf(form: &Form) -> Option<&'static str> {
    match form {
        Form::Numeral(_) => Some("n"),
        Form::Lookup(_) => Some("x"),
        Form::Apply { left, right, .. } => substituted_leaf(left).or_else(|| substituted_leaf(right)),
        Form::Eval(_) | Form::Value(_) => None,
    }
}
