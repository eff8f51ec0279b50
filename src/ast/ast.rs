use crate::{scope_checker::id_use::IdUse, Position, Span};

use super::{expressions::{Condition, Expr}, statements::Stmt};

/// Identifier occurrence
///
/// Every name mentioned in the tree, whether declared or used. `id_use` is
/// empty when the parser builds the node and is filled exactly once by the
/// scope checker for use sites. Declaration sites keep it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
    pub id_use: Option<IdUse>,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
            id_use: None,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }
}

/// `const a = 1, b = -2;`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub defs: Vec<ConstDef>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDef {
    pub name: Ident,
    pub value: i32,
    pub span: Span,
}

/// `var x, y;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub names: Vec<Ident>,
    pub span: Span,
}

/// `proc p begin ... end;`
#[derive(Debug, Clone, PartialEq)]
pub struct ProcDecl {
    pub name: Ident,
    pub block: Block,
    pub span: Span,
}

/// Block
///
/// The unit of lexical scoping: the program itself, every procedure body and
/// every nested block statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub const_decls: Vec<ConstDecl>,
    pub var_decls: Vec<VarDecl>,
    pub proc_decls: Vec<ProcDecl>,
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    /// Visits every identifier *use* (never a declaration name) in source
    /// order, descending into procedure bodies and nested blocks.
    pub fn for_each_ident_use<F: FnMut(&Ident)>(&self, mut f: F) {
        for ident in self.ident_uses() {
            f(ident);
        }
    }

    /// Collects the identifier uses into a vector, see [`Block::for_each_ident_use`].
    pub fn ident_uses(&self) -> Vec<&Ident> {
        let mut uses = vec![];
        collect_block(self, &mut uses);
        uses
    }
}

fn collect_block<'a>(block: &'a Block, out: &mut Vec<&'a Ident>) {
    for proc_decl in block.proc_decls.iter() {
        collect_block(&proc_decl.block, out);
    }
    for stmt in block.stmts.iter() {
        collect_stmt(stmt, out);
    }
}

fn collect_stmt<'a>(stmt: &'a Stmt, out: &mut Vec<&'a Ident>) {
    match stmt {
        Stmt::Assign(assign) => {
            out.push(&assign.name);
            collect_expr(&assign.expr, out);
        }
        Stmt::Call(call) => out.push(&call.name),
        Stmt::If(if_stmt) => {
            collect_condition(&if_stmt.condition, out);
            for stmt in if_stmt.then_stmts.iter() {
                collect_stmt(stmt, out);
            }
            for stmt in if_stmt.else_stmts.iter().flatten() {
                collect_stmt(stmt, out);
            }
        }
        Stmt::While(while_stmt) => {
            collect_condition(&while_stmt.condition, out);
            for stmt in while_stmt.body.iter() {
                collect_stmt(stmt, out);
            }
        }
        Stmt::Read(read) => out.push(&read.name),
        Stmt::Print(print) => collect_expr(&print.expr, out),
        Stmt::Block(block) => collect_block(&block.block, out),
    }
}

fn collect_condition<'a>(condition: &'a Condition, out: &mut Vec<&'a Ident>) {
    match condition {
        Condition::Divisible(db) => {
            collect_expr(&db.dividend, out);
            collect_expr(&db.divisor, out);
        }
        Condition::RelOp(rel) => {
            collect_expr(&rel.left, out);
            collect_expr(&rel.right, out);
        }
    }
}

fn collect_expr<'a>(expr: &'a Expr, out: &mut Vec<&'a Ident>) {
    match expr {
        Expr::Binary(binary) => {
            collect_expr(&binary.left, out);
            collect_expr(&binary.right, out);
        }
        Expr::Ident(ident) => out.push(ident),
        Expr::Number(_) => {}
        Expr::Negated(negated) => collect_expr(&negated.expr, out),
    }
}
