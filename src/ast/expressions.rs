use std::fmt::Display;

use crate::Span;

use super::ast::Ident;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Plus,
    Minus,
    Times,
    Divide,
}

impl Display for ArithOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithOp::Plus => write!(f, "+"),
            ArithOp::Minus => write!(f, "-"),
            ArithOp::Times => write!(f, "*"),
            ArithOp::Divide => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Display for RelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelOp::Eq => write!(f, "=="),
            RelOp::Ne => write!(f, "!="),
            RelOp::Lt => write!(f, "<"),
            RelOp::Le => write!(f, "<="),
            RelOp::Gt => write!(f, ">"),
            RelOp::Ge => write!(f, ">="),
        }
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary(BinaryExpr),
    Ident(Ident),
    Number(NumberExpr),
    Negated(NegatedExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Binary(expr) => &expr.span,
            Expr::Ident(ident) => &ident.span,
            Expr::Number(expr) => &expr.span,
            Expr::Negated(expr) => &expr.span,
        }
    }
}

/// Binary Expression
/// Represents `left op right` for the arithmetic operators.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: ArithOp,
    pub right: Box<Expr>,
    pub span: Span,
}

/// Number Expression
/// Represents an unsigned integer literal. Signs are separate `Negated` nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: i32,
    pub span: Span,
}

/// Negated Expression
/// Represents unary minus.
#[derive(Debug, Clone, PartialEq)]
pub struct NegatedExpr {
    pub expr: Box<Expr>,
    pub span: Span,
}

/// Condition
///
/// Conditions only appear in `if` and `while`, they are not expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Divisible(DivisibleCondition),
    RelOp(RelOpCondition),
}

impl Condition {
    pub fn get_span(&self) -> &Span {
        match self {
            Condition::Divisible(condition) => &condition.span,
            Condition::RelOp(condition) => &condition.span,
        }
    }
}

/// `divisible dividend by divisor`
#[derive(Debug, Clone, PartialEq)]
pub struct DivisibleCondition {
    pub dividend: Expr,
    pub divisor: Expr,
    pub span: Span,
}

/// `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct RelOpCondition {
    pub left: Expr,
    pub operator: RelOp,
    pub right: Expr,
    pub span: Span,
}
