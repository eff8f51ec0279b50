use log::{debug, trace};

use crate::{
    ast::{
        ast::{Block, ConstDecl, Ident, ProcDecl, VarDecl},
        expressions::{Condition, Expr},
        statements::Stmt,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    id_use::{DeclKind, IdUse},
    scope_table::ScopeTable,
};

#[derive(Debug, Default)]
pub struct ScopeChecker {
    pub table: ScopeTable,
    diagnostics: Vec<Error>,
}

impl ScopeChecker {
    pub fn new(table: ScopeTable) -> Self {
        ScopeChecker {
            table,
            diagnostics: vec![],
        }
    }

    /// Records a user error and lets checking carry on.
    pub fn report(&mut self, error: Error) {
        debug!("{}", error);
        self.diagnostics.push(error);
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Error> {
        self.diagnostics
    }
}

/// Declares `ident` with `kind` in the innermost scope. Duplicates are
/// reported and skipped, so the first declaration stays authoritative.
pub fn scope_check_declare_ident(checker: &mut ScopeChecker, ident: &Ident, kind: DeclKind) -> Result<(), Error> {
    if ident.name.is_empty() {
        return Err(Error::malformed(format!("{} declaration without a name", kind)));
    }

    match checker.table.declare(&ident.name, kind, ident.get_position().clone()) {
        Ok(offset) => {
            trace!("declared {} `{}` at offset {}", kind, ident.name, offset);
            Ok(())
        }
        Err(error) if error.is_internal() => Err(error),
        Err(error) => {
            checker.report(error);
            Ok(())
        }
    }
}

pub fn scope_check_const_decl(checker: &mut ScopeChecker, decl: &ConstDecl) -> Result<(), Error> {
    for def in decl.defs.iter() {
        scope_check_declare_ident(checker, &def.name, DeclKind::Constant)?;
    }
    Ok(())
}

pub fn scope_check_var_decl(checker: &mut ScopeChecker, decl: &VarDecl) -> Result<(), Error> {
    for name in decl.names.iter() {
        scope_check_declare_ident(checker, name, DeclKind::Variable)?;
    }
    Ok(())
}

/// The procedure's own name goes into the enclosing scope before its body is
/// checked, so the body can call itself and later siblings can call it.
pub fn scope_check_proc_decl(checker: &mut ScopeChecker, decl: &mut ProcDecl) -> Result<(), Error> {
    scope_check_declare_ident(checker, &decl.name, DeclKind::Procedure)?;

    debug!("checking body of procedure `{}`", decl.name.name);
    scope_check_program(checker, &mut decl.block)
}

/// Resolves a use against the live scopes and annotates it in place.
///
/// A miss is an `UndeclaredIdentifier` and nothing is attached. An
/// identifier that is already annotated means the tree has been through
/// this pass before, which is not supported.
pub fn scope_check_ident_use(checker: &mut ScopeChecker, ident: &mut Ident) -> Result<IdUse, Error> {
    if ident.name.is_empty() {
        return Err(Error::malformed("identifier use without a name"));
    }
    if ident.id_use.is_some() {
        return Err(Error::malformed(format!(
            "identifier `{}` was already resolved, the scope checker cannot run twice on one tree",
            ident.name
        )));
    }

    let (binding, levels_outward) = match checker.table.lookup(&ident.name) {
        Some(found) => found,
        None => {
            return Err(Error::new(
                ErrorImpl::UndeclaredIdentifier { name: ident.name.clone() },
                ident.get_position().clone(),
            ))
        }
    };

    let id_use = IdUse {
        kind: binding.kind,
        decl_position: binding.position.clone(),
        offset: binding.offset,
        levels_outward,
    };
    trace!("resolved `{}` to {}", ident.name, id_use);

    ident.id_use = Some(id_use.clone());
    Ok(id_use)
}

pub fn scope_check_expr(checker: &mut ScopeChecker, expr: &mut Expr) -> Result<(), Error> {
    match expr {
        Expr::Binary(binary) => {
            scope_check_expr(checker, &mut binary.left)?;
            scope_check_expr(checker, &mut binary.right)
        }
        Expr::Ident(ident) => scope_check_ident_use(checker, ident).map(|_| ()),
        Expr::Number(_) => Ok(()),
        Expr::Negated(negated) => scope_check_expr(checker, &mut negated.expr),
    }
}

pub fn scope_check_condition(checker: &mut ScopeChecker, condition: &mut Condition) -> Result<(), Error> {
    match condition {
        Condition::Divisible(db) => {
            scope_check_expr(checker, &mut db.dividend)?;
            scope_check_expr(checker, &mut db.divisor)
        }
        Condition::RelOp(rel) => {
            scope_check_expr(checker, &mut rel.left)?;
            scope_check_expr(checker, &mut rel.right)
        }
    }
}

pub fn scope_check_stmt(checker: &mut ScopeChecker, stmt: &mut Stmt) -> Result<(), Error> {
    match stmt {
        Stmt::Assign(assign) => {
            scope_check_ident_use(checker, &mut assign.name)?;
            scope_check_expr(checker, &mut assign.expr)
        }
        Stmt::Call(call) => {
            let id_use = scope_check_ident_use(checker, &mut call.name)?;
            if id_use.kind != DeclKind::Procedure {
                checker.report(Error::new(
                    ErrorImpl::InvalidCallTarget {
                        name: call.name.name.clone(),
                        found_kind: id_use.kind,
                    },
                    call.name.get_position().clone(),
                ));
            }
            Ok(())
        }
        Stmt::If(if_stmt) => {
            scope_check_condition(checker, &mut if_stmt.condition)?;
            scope_check_stmts(checker, &mut if_stmt.then_stmts)?;
            if let Some(else_stmts) = if_stmt.else_stmts.as_mut() {
                scope_check_stmts(checker, else_stmts)?;
            }
            Ok(())
        }
        Stmt::While(while_stmt) => {
            scope_check_condition(checker, &mut while_stmt.condition)?;
            scope_check_stmts(checker, &mut while_stmt.body)
        }
        Stmt::Read(read) => scope_check_ident_use(checker, &mut read.name).map(|_| ()),
        Stmt::Print(print) => scope_check_expr(checker, &mut print.expr),
        Stmt::Block(block) => scope_check_program(checker, &mut block.block),
    }
}

/// Checks each statement in turn. A user error abandons only the statement
/// it occurred in; internal errors abort the whole pass.
pub fn scope_check_stmts(checker: &mut ScopeChecker, stmts: &mut [Stmt]) -> Result<(), Error> {
    for stmt in stmts.iter_mut() {
        match scope_check_stmt(checker, stmt) {
            Ok(()) => {}
            Err(error) if error.is_internal() => return Err(error),
            Err(error) => checker.report(error),
        }
    }
    Ok(())
}

/// Opens a scope for `block`, declares constants, then variables, then
/// procedures (checking each body), checks the statements and closes the scope.
pub fn scope_check_program(checker: &mut ScopeChecker, block: &mut Block) -> Result<(), Error> {
    checker.table.enter_scope();

    for decl in block.const_decls.iter() {
        scope_check_const_decl(checker, decl)?;
    }
    for decl in block.var_decls.iter() {
        scope_check_var_decl(checker, decl)?;
    }
    for decl in block.proc_decls.iter_mut() {
        scope_check_proc_decl(checker, decl)?;
    }

    scope_check_stmts(checker, &mut block.stmts)?;

    checker.table.leave_scope()
}

/// Runs the scope checker over a whole program.
///
/// Returns the annotated tree only when no diagnostic was produced, so a tree
/// with unresolved uses is never handed on. Internal errors come back alone.
pub fn scope_check(mut block: Block) -> Result<Block, Vec<Error>> {
    let mut checker = ScopeChecker::new(ScopeTable::new());

    if let Err(error) = scope_check_program(&mut checker, &mut block) {
        return Err(vec![error]);
    }
    if checker.table.depth() != 0 {
        return Err(vec![Error::malformed(format!(
            "{} scope(s) still open after checking the program",
            checker.table.depth()
        ))]);
    }

    let diagnostics = checker.into_diagnostics();
    if diagnostics.is_empty() {
        debug!("scope check finished without errors");
        Ok(block)
    } else {
        debug!("scope check finished with {} error(s)", diagnostics.len());
        Err(diagnostics)
    }
}
