// src/export.rs

use crate::step::{Highlighter, Judgement, Phase, Step};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Append the referenced inference rule to each line.
    pub rules: bool,
}

/// Text shown for one step inside a listing. Arithmetic steps that
/// continue a chain of equalities start with `= `.
pub fn step_line(step: &Step, hl: &dyn Highlighter) -> String {
    let body = step.render(hl);
    match (&step.judgement, step.phase) {
        (Judgement::Arith(_), Phase::Symbolic) | (Judgement::Bool { .. }, _) => body,
        (Judgement::Arith(_), _) => format!("= {}", body),
    }
}

/// Numbered listing of a finished derivation.
pub fn to_text(steps: &[Step], hl: &dyn Highlighter, options: ExportOptions) -> String {
    let width = steps.len().to_string().len();
    let mut out = String::new();
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("{:>width$}. {}", i + 1, step_line(step, hl), width = width));
        if options.rules {
            if let Some(rule) = step.rule() {
                out.push_str(&format!("    [{}]", rule.text));
            }
        }
        out.push('\n');
    }
    out
}
