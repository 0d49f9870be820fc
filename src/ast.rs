// src/ast.rs

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Le,
}

impl BinaryOp {
    /// The operator as written in source.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "=",
            BinaryOp::Le => "<=",
        }
    }

    /// The semantic operator that stands between two evaluated operands
    /// once a judgement has been expanded one level.
    pub fn semantic_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "⊕",
            BinaryOp::Sub => "⊖",
            BinaryOp::Mul => "⊗",
            BinaryOp::Div => "÷",
            BinaryOp::Eq => "=",
            BinaryOp::Le => "≤",
        }
    }

    pub fn kind(self) -> Kind {
        match self {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => Kind::Arithmetic,
            BinaryOp::Eq | BinaryOp::Le => Kind::Boolean,
        }
    }
}

/// Any operator a derivation step can point the rule reference at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Binary(BinaryOp),
    Not,
    And,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Binary(op) => op.symbol(),
            Operator::Not => "¬",
            Operator::And => "∧",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Arithmetic,
    Boolean,
}

// AST Definition
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(i64),
    BooleanLiteral(bool),
    Identifier(String),
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    /// Negation `¬`.
    Unary { argument: Box<Expr> },
    /// Conjunction `∧`.
    Logical { left: Box<Expr>, right: Box<Expr> },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn not(argument: Expr) -> Expr {
        Expr::Unary { argument: Box::new(argument) }
    }

    pub fn and(left: Expr, right: Expr) -> Expr {
        Expr::Logical { left: Box::new(left), right: Box::new(right) }
    }

    pub fn ident(name: &str) -> Expr {
        Expr::Identifier(name.to_string())
    }

    /// Identifiers are always read as numbers, so they count as arithmetic.
    pub fn kind(&self) -> Kind {
        match self {
            Expr::Literal(_) | Expr::Identifier(_) => Kind::Arithmetic,
            Expr::Binary { op, .. } => op.kind(),
            Expr::BooleanLiteral(_) | Expr::Unary { .. } | Expr::Logical { .. } => Kind::Boolean,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Expr::Literal(_) | Expr::Identifier(_) | Expr::BooleanLiteral(_))
    }

    pub fn node_name(&self) -> &'static str {
        match self {
            Expr::Literal(_) => "Literal",
            Expr::BooleanLiteral(_) => "BooleanLiteral",
            Expr::Identifier(_) => "Identifier",
            Expr::Binary { .. } => "BinaryExpression",
            Expr::Unary { .. } => "UnaryExpression",
            Expr::Logical { .. } => "LogicalExpression",
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::BooleanLiteral(_) | Expr::Identifier(_) => 1,
            Expr::Binary { left, right, .. } | Expr::Logical { left, right } => {
                1 + left.depth().max(right.depth())
            }
            Expr::Unary { argument } => 1 + argument.depth(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::BooleanLiteral(_) | Expr::Identifier(_) => 1,
            Expr::Binary { left, right, .. } | Expr::Logical { left, right } => {
                left.leaf_count() + right.leaf_count()
            }
            Expr::Unary { argument } => argument.leaf_count(),
        }
    }

    /// Canonical form with the outermost parentheses dropped, used inside
    /// judgement brackets: `E⟦(x - y) * 3⟧s` rather than `E⟦((x - y) * 3)⟧s`.
    pub fn render_bare(&self) -> String {
        match self {
            Expr::Binary { op, left, right } => format!("{} {} {}", left, op.symbol(), right),
            Expr::Logical { left, right } => format!("{} ∧ {}", left, right),
            _ => self.to_string(),
        }
    }

    pub fn to_tree(&self) -> TreeNode {
        match self {
            Expr::Literal(n) => TreeNode::leaf(n.to_string()),
            Expr::BooleanLiteral(b) => TreeNode::leaf(b.to_string()),
            Expr::Identifier(name) => TreeNode::leaf(name.clone()),
            Expr::Binary { op, left, right } => TreeNode {
                label: op.symbol().to_string(),
                children: vec![left.to_tree(), right.to_tree()],
            },
            Expr::Logical { left, right } => TreeNode {
                label: "∧".to_string(),
                children: vec![left.to_tree(), right.to_tree()],
            },
            Expr::Unary { argument } => TreeNode {
                label: "¬".to_string(),
                children: vec![argument.to_tree()],
            },
        }
    }
}

/// Fully parenthesized infix form.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(n) => write!(f, "{}", n),
            Expr::BooleanLiteral(b) => write!(f, "{}", b),
            Expr::Identifier(name) => write!(f, "{}", name),
            Expr::Binary { op, left, right } => write!(f, "({} {} {})", left, op.symbol(), right),
            Expr::Logical { left, right } => write!(f, "({} ∧ {})", left, right),
            Expr::Unary { argument } => write!(f, "¬{}", argument),
        }
    }
}

/// Labelled tree handed to tree views. Operators label inner nodes,
/// leaves carry their value or name.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: String) -> Self {
        TreeNode { label, children: Vec::new() }
    }

    fn write_children(&self, f: &mut fmt::Formatter<'_>, prefix: &str) -> fmt::Result {
        let last = self.children.len().saturating_sub(1);
        for (i, child) in self.children.iter().enumerate() {
            let (branch, indent) = if i == last { ("└── ", "    ") } else { ("├── ", "│   ") };
            writeln!(f, "{}{}{}", prefix, branch, child.label)?;
            child.write_children(f, &format!("{}{}", prefix, indent))?;
        }
        Ok(())
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label)?;
        self.write_children(f, "")
    }
}
