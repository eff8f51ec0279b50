use crate::Span;

use super::{ast::{Block, Ident}, expressions::{Condition, Expr}};

/// Statement
///
/// One variant per statement form of the language. The checker matches this
/// exhaustively, so adding a form forces every pass to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign(AssignStmt),
    Call(CallStmt),
    If(IfStmt),
    While(WhileStmt),
    Read(ReadStmt),
    Print(PrintStmt),
    Block(BlockStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Assign(stmt) => &stmt.span,
            Stmt::Call(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::Read(stmt) => &stmt.span,
            Stmt::Print(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
        }
    }
}

/// `x := expr`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub name: Ident,
    pub expr: Expr,
    pub span: Span,
}

/// `call p`
#[derive(Debug, Clone, PartialEq)]
pub struct CallStmt {
    pub name: Ident,
    pub span: Span,
}

/// `if cond then stmts [else stmts] end`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Condition,
    pub then_stmts: Vec<Stmt>,
    pub else_stmts: Option<Vec<Stmt>>,
    pub span: Span,
}

/// `while cond do stmts end`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Condition,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// `read x`
#[derive(Debug, Clone, PartialEq)]
pub struct ReadStmt {
    pub name: Ident,
    pub span: Span,
}

/// `print expr`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub expr: Expr,
    pub span: Span,
}

/// A nested `begin ... end` used as a statement. Opens its own scope.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub block: Block,
    pub span: Span,
}
