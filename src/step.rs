// src/step.rs

use std::fmt;

use crate::ast::{BinaryOp, Operator};
use crate::error::Error;
use crate::evaluator::apply_arith;

/// The part of a judgement a piece of text plays, for emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Left,
    Operator,
    Right,
    /// A leaf in its intermediate `N⟦n⟧` / `s x` form.
    Substituted,
    Truth(bool),
}

/// Turns a role-tagged piece of a step into display text.
pub trait Highlighter {
    fn paint(&self, role: Role, text: &str) -> String;
}

/// No emphasis at all; this is what `Display` uses.
pub struct Plain;

impl Highlighter for Plain {
    fn paint(&self, _role: Role, text: &str) -> String {
        text.to_string()
    }
}

/// ANSI terminal colours.
pub struct Ansi;

impl Highlighter for Ansi {
    fn paint(&self, role: Role, text: &str) -> String {
        let code = match role {
            Role::Left => "33",
            Role::Operator => "38;5;208",
            Role::Right => "36",
            Role::Substituted => "34",
            Role::Truth(true) => "32",
            Role::Truth(false) => "31",
        };
        format!("\x1b[{}m{}\x1b[0m", code, text)
    }
}

/// Right-hand side of an arithmetic judgement.
#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    /// `E⟦e⟧s`, holding the bare rendering of `e`.
    Eval(String),
    /// `N⟦n⟧`
    Numeral(i64),
    /// `s x`
    Lookup(String),
    Value(i64),
    Apply {
        op: BinaryOp,
        left: Box<Form>,
        right: Box<Form>,
        bracketed: bool,
        /// Marks the operation the step is about.
        focus: bool,
    },
}

impl Form {
    pub fn apply(op: BinaryOp, left: Form, right: Form) -> Form {
        Form::Apply { op, left: Box::new(left), right: Box::new(right), bracketed: true, focus: false }
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            Form::Value(n) => Some(*n),
            _ => None,
        }
    }

    /// The focused operation, searched in pre-order.
    pub fn focused(&self) -> Option<(&Form, BinaryOp, &Form)> {
        match self {
            Form::Apply { op, left, right, focus: true, .. } => Some((&**left, *op, &**right)),
            Form::Apply { left, right, .. } => left.focused().or_else(|| right.focused()),
            _ => None,
        }
    }

    /// Folds the leftmost operation whose operands are both values.
    /// Returns `Ok(false)` once nothing is left to fold.
    pub fn reduce_first(&mut self) -> Result<bool, Error> {
        let Form::Apply { op, left, right, .. } = self else {
            return Ok(false);
        };
        if let (Some(a), Some(b)) = (left.value(), right.value()) {
            let folded = apply_arith(*op, a, b)?;
            *self = Form::Value(folded);
            return Ok(true);
        }
        if left.reduce_first()? {
            return Ok(true);
        }
        right.reduce_first()
    }

    fn write(&self, out: &mut String, hl: &dyn Highlighter) {
        match self {
            Form::Eval(expr) => {
                out.push_str("E⟦");
                out.push_str(expr);
                out.push_str("⟧s");
            }
            Form::Numeral(n) => out.push_str(&hl.paint(Role::Substituted, &format!("N⟦{}⟧", n))),
            Form::Lookup(name) => out.push_str(&hl.paint(Role::Substituted, &format!("s {}", name))),
            Form::Value(n) => out.push_str(&n.to_string()),
            Form::Apply { op, left, right, bracketed, focus } => {
                if *bracketed {
                    out.push('(');
                }
                if *focus {
                    out.push_str(&hl.paint(Role::Left, &left.to_string()));
                    out.push(' ');
                    out.push_str(&hl.paint(Role::Operator, op.semantic_symbol()));
                    out.push(' ');
                    out.push_str(&hl.paint(Role::Right, &right.to_string()));
                } else {
                    left.write(out, hl);
                    out.push(' ');
                    out.push_str(op.semantic_symbol());
                    out.push(' ');
                    right.write(out, hl);
                }
                if *bracketed {
                    out.push(')');
                }
            }
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write(&mut out, &Plain);
        f.write_str(&out)
    }
}

/// What a boolean judgement is about.
#[derive(Debug, Clone, PartialEq)]
pub enum BoolSubject {
    Literal(bool),
    Compare { op: BinaryOp, left: String, right: String },
    Not(String),
    And { left: String, right: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Judgement {
    Arith(Form),
    /// `𝔅⟦b⟧s = tt|ff`
    Bool { subject: BoolSubject, result: bool },
}

/// Which inference rule produced a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Symbolic,
    Expansion,
    Split,
    FullExpansion,
    Substitution,
    Fold,
    Boolean,
}

/// Left operand, operator and right operand of the focused operation,
/// plus the truth value for boolean judgements.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub left: String,
    pub operator: String,
    pub right: String,
    pub result: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub phase: Phase,
    pub judgement: Judgement,
    pub highlight: Option<Operator>,
}

pub fn truth_str(value: bool) -> &'static str {
    if value { "tt" } else { "ff" }
}

impl Step {
    pub fn arith(phase: Phase, form: Form, highlight: Option<Operator>) -> Self {
        Step { phase, judgement: Judgement::Arith(form), highlight }
    }

    pub fn boolean(subject: BoolSubject, result: bool, highlight: Option<Operator>) -> Self {
        Step { phase: Phase::Boolean, judgement: Judgement::Bool { subject, result }, highlight }
    }

    pub fn form(&self) -> Option<&Form> {
        match &self.judgement {
            Judgement::Arith(form) => Some(form),
            Judgement::Bool { .. } => None,
        }
    }

    pub fn truth(&self) -> Option<bool> {
        match &self.judgement {
            Judgement::Bool { result, .. } => Some(*result),
            Judgement::Arith(_) => None,
        }
    }

    pub fn partition(&self) -> Option<Partition> {
        match &self.judgement {
            Judgement::Arith(form) => form.focused().map(|(left, op, right)| Partition {
                left: left.to_string(),
                operator: op.semantic_symbol().to_string(),
                right: right.to_string(),
                result: None,
            }),
            Judgement::Bool { subject, result } => {
                let (left, operator, right) = match subject {
                    BoolSubject::Compare { op, left, right } => (left.clone(), op.symbol(), right.clone()),
                    BoolSubject::And { left, right } => (left.clone(), "∧", right.clone()),
                    BoolSubject::Not(arg) => (String::new(), "¬", arg.clone()),
                    BoolSubject::Literal(_) => return None,
                };
                Some(Partition { left, operator: operator.to_string(), right, result: Some(*result) })
            }
        }
    }

    pub fn render(&self, hl: &dyn Highlighter) -> String {
        match &self.judgement {
            Judgement::Arith(form) => {
                let mut out = String::new();
                form.write(&mut out, hl);
                out
            }
            Judgement::Bool { subject, result } => {
                let body = match subject {
                    BoolSubject::Literal(b) => b.to_string(),
                    BoolSubject::Compare { op, left, right } => format!(
                        "{} {} {}",
                        hl.paint(Role::Left, left),
                        hl.paint(Role::Operator, op.symbol()),
                        hl.paint(Role::Right, right)
                    ),
                    BoolSubject::Not(arg) => {
                        format!("{}{}", hl.paint(Role::Operator, "¬"), hl.paint(Role::Right, arg))
                    }
                    BoolSubject::And { left, right } => format!(
                        "{} {} {}",
                        hl.paint(Role::Left, left),
                        hl.paint(Role::Operator, "∧"),
                        hl.paint(Role::Right, right)
                    ),
                };
                format!("𝔅⟦{}⟧s = {}", body, hl.paint(Role::Truth(*result), truth_str(*result)))
            }
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Plain))
    }
}
