//! Unit tests for the scope table and the scope checker.
//!
//! Programs are built from source text through the lexer and parser so the
//! expectations read like the language itself.

use std::rc::Rc;

use crate::{
    ast::{ast::Block, statements::Stmt},
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    parser::parser::parse,
    Position,
};

use super::{
    id_use::{DeclKind, IdUse},
    scope_checker::{scope_check, scope_check_program, ScopeChecker},
    scope_table::ScopeTable,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pos(offset: u32) -> Position {
    Position(offset, Rc::new("test.pl0".to_string()))
}

fn parse_source(source: &str) -> Block {
    let tokens = tokenize(source.to_string(), Some("test.pl0".to_string())).unwrap();
    parse(tokens, Rc::new("test.pl0".to_string())).unwrap()
}

/// Checks `source` with a fresh checker and returns the annotated tree
/// alongside the checker so tests can look at both.
fn check_source(source: &str) -> (Block, ScopeChecker) {
    init_logger();
    let mut block = parse_source(source);
    let mut checker = ScopeChecker::new(ScopeTable::new());
    scope_check_program(&mut checker, &mut block).unwrap();
    (block, checker)
}

/// Resolutions of every use of `name`, in source order.
fn uses_of(block: &Block, name: &str) -> Vec<Option<IdUse>> {
    block
        .ident_uses()
        .into_iter()
        .filter(|ident| ident.name == name)
        .map(|ident| ident.id_use.clone())
        .collect()
}

// Scope table

#[test]
fn test_offsets_shared_across_kinds() {
    let mut table = ScopeTable::new();
    table.enter_scope();

    assert_eq!(table.declare("c", DeclKind::Constant, pos(0)).unwrap(), 0);
    assert_eq!(table.declare("v", DeclKind::Variable, pos(5)).unwrap(), 1);
    assert_eq!(table.declare("p", DeclKind::Procedure, pos(9)).unwrap(), 2);
    assert_eq!(table.current_slot_count(), 3);
}

#[test]
fn test_duplicate_keeps_first_binding() {
    let mut table = ScopeTable::new();
    table.enter_scope();
    table.declare("x", DeclKind::Constant, pos(3)).unwrap();

    let error = table.declare("x", DeclKind::Variable, pos(12)).unwrap_err();
    match error.get_impl() {
        ErrorImpl::DuplicateDeclaration { name, first_kind, first_position } => {
            assert_eq!(name, "x");
            assert_eq!(*first_kind, DeclKind::Constant);
            assert_eq!(*first_position, pos(3));
        }
        other => panic!("expected a duplicate declaration, got {:?}", other),
    }
    assert_eq!(*error.get_position(), pos(12));

    // The rejected declaration neither replaces the binding nor uses a slot
    let (binding, _) = table.lookup("x").unwrap();
    assert_eq!(binding.kind, DeclKind::Constant);
    assert_eq!(table.current_slot_count(), 1);
}

#[test]
fn test_lookup_reports_levels_outward() {
    let mut table = ScopeTable::new();
    table.enter_scope();
    table.declare("outer", DeclKind::Variable, pos(0)).unwrap();
    table.enter_scope();
    table.enter_scope();
    table.declare("inner", DeclKind::Variable, pos(1)).unwrap();

    let (binding, levels) = table.lookup("outer").unwrap();
    assert_eq!(levels, 2);
    assert_eq!(binding.offset, 0);

    let (_, levels) = table.lookup("inner").unwrap();
    assert_eq!(levels, 0);

    assert!(table.lookup("missing").is_none());
}

#[test]
fn test_lookup_prefers_innermost_declaration() {
    let mut table = ScopeTable::new();
    table.enter_scope();
    table.declare("a", DeclKind::Constant, pos(0)).unwrap();
    table.declare("x", DeclKind::Constant, pos(1)).unwrap();
    table.enter_scope();
    table.declare("x", DeclKind::Variable, pos(2)).unwrap();

    let (binding, levels) = table.lookup("x").unwrap();
    assert_eq!(levels, 0);
    assert_eq!(binding.kind, DeclKind::Variable);
    assert_eq!(binding.offset, 0);

    table.leave_scope().unwrap();
    let (binding, levels) = table.lookup("x").unwrap();
    assert_eq!(levels, 0);
    assert_eq!(binding.kind, DeclKind::Constant);
    assert_eq!(binding.offset, 1);
}

#[test]
fn test_declared_in_current_scope_does_not_search_outward() {
    let mut table = ScopeTable::new();
    table.enter_scope();
    table.declare("x", DeclKind::Variable, pos(0)).unwrap();
    table.enter_scope();

    assert!(!table.declared_in_current_scope("x"));
    assert!(table.lookup("x").is_some());

    // Shadowing across scopes is allowed
    assert_eq!(table.declare("x", DeclKind::Variable, pos(4)).unwrap(), 0);
    assert!(table.declared_in_current_scope("x"));
}

#[test]
fn test_leave_scope_underflow_is_internal() {
    let mut table = ScopeTable::new();
    table.enter_scope();
    table.leave_scope().unwrap();

    let error = table.leave_scope().unwrap_err();
    assert!(error.is_internal());
    assert_eq!(table.depth(), 0);
}

#[test]
fn test_declare_without_scope_is_internal() {
    let mut table = ScopeTable::new();

    let error = table.declare("x", DeclKind::Variable, pos(0)).unwrap_err();
    assert!(error.is_internal());
    assert!(!table.declared_in_current_scope("x"));
    assert_eq!(table.current_slot_count(), 0);
}

// Scope checker

#[test]
fn test_valid_program_resolves_every_use() {
    let (block, checker) = check_source(
        "begin
            const limit = 10;
            var i, total;
            proc add begin total := total + i end;
            i := 0;
            total := 0;
            while i < limit do
                call add;
                i := i + 1
            end;
            print total
        end.",
    );

    assert!(!checker.has_errors());
    assert_eq!(checker.table.depth(), 0);

    for ident in block.ident_uses() {
        assert!(ident.id_use.is_some(), "`{}` was left unresolved", ident.name);
    }

    let limit = uses_of(&block, "limit");
    assert_eq!(limit.len(), 1);
    let limit = limit[0].as_ref().unwrap();
    assert_eq!(limit.kind, DeclKind::Constant);
    assert_eq!(limit.offset, 0);
    assert_eq!(limit.levels_outward, 0);

    let add = uses_of(&block, "add")[0].clone().unwrap();
    assert_eq!(add.kind, DeclKind::Procedure);
    assert_eq!(add.offset, 3);

    // `total` inside `add` is one scope out, in the main block it is local
    let total = uses_of(&block, "total");
    assert_eq!(total[0].as_ref().unwrap().levels_outward, 1);
    assert_eq!(total[1].as_ref().unwrap().levels_outward, 1);
    assert_eq!(total[2].as_ref().unwrap().levels_outward, 0);
    assert!(total.iter().all(|id_use| id_use.as_ref().unwrap().offset == 2));
}

#[test]
fn test_duplicate_constant_reported_once() {
    let (block, checker) = check_source("begin const x = 1, x = 2; var y; y := x end.");

    assert_eq!(checker.diagnostics().len(), 1);
    match checker.diagnostics()[0].get_impl() {
        ErrorImpl::DuplicateDeclaration { name, first_kind, .. } => {
            assert_eq!(name, "x");
            assert_eq!(*first_kind, DeclKind::Constant);
        }
        other => panic!("expected a duplicate declaration, got {:?}", other),
    }

    let x = uses_of(&block, "x")[0].clone().unwrap();
    assert_eq!(x.kind, DeclKind::Constant);
    assert_eq!(x.offset, 0);
    assert_eq!(x.decl_position.0, 12);

    // The duplicate did not take a slot
    assert_eq!(uses_of(&block, "y")[0].as_ref().unwrap().offset, 1);
}

#[test]
fn test_duplicate_across_kinds_names_first_kind() {
    let (_, checker) = check_source("begin var p; proc p begin end; p := 1 end.");

    assert_eq!(checker.diagnostics().len(), 1);
    let error = &checker.diagnostics()[0];
    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
    assert_eq!(error.get_tip().to_string(), "\"p\" is already declared as a variable");
}

#[test]
fn test_outer_variable_distance_matches_nesting() {
    let (block, checker) = check_source(
        "begin
            var x;
            proc p begin
                proc q begin x := 1 end;
                x := 2;
                call q
            end;
            x := 3;
            call p
        end.",
    );

    assert!(!checker.has_errors());
    let x = uses_of(&block, "x");
    let levels: Vec<usize> = x.iter().map(|id_use| id_use.as_ref().unwrap().levels_outward).collect();
    assert_eq!(levels, vec![2, 1, 0]);
    assert!(x.iter().all(|id_use| id_use.as_ref().unwrap().offset == 0));
}

#[test]
fn test_shadowing_and_sibling_scopes() {
    let (block, checker) = check_source(
        "begin
            var x;
            proc p begin var x; x := 1 end;
            proc r begin x := 2 end;
            x := 3
        end.",
    );

    assert!(!checker.has_errors());
    let x: Vec<IdUse> = uses_of(&block, "x").into_iter().map(Option::unwrap).collect();

    // Inside p: p's own x
    assert_eq!(x[0].levels_outward, 0);
    assert_eq!(x[0].offset, 0);
    // Inside r: the global x
    assert_eq!(x[1].levels_outward, 1);
    assert_eq!(x[1].offset, 0);
    assert_ne!(x[0].decl_position, x[1].decl_position);
    // Main block
    assert_eq!(x[2].levels_outward, 0);
    assert_eq!(x[2].decl_position, x[1].decl_position);
}

#[test]
fn test_undeclared_identifier_in_print() {
    let (block, checker) = check_source("begin print y end.");

    assert_eq!(checker.diagnostics().len(), 1);
    let error = &checker.diagnostics()[0];
    match error.get_impl() {
        ErrorImpl::UndeclaredIdentifier { name } => assert_eq!(name, "y"),
        other => panic!("expected an undeclared identifier, got {:?}", other),
    }
    assert_eq!(error.get_position().0, 12);
    assert_eq!(uses_of(&block, "y"), vec![None]);
}

#[test]
fn test_undeclared_identifier_abandons_rest_of_statement() {
    let (block, checker) = check_source("begin var x; x := y + x; x := 1 end.");

    assert_eq!(checker.diagnostics().len(), 1);
    let x = uses_of(&block, "x");
    // Target of the first assignment, its right operand, the second assignment
    assert!(x[0].is_some());
    assert!(x[1].is_none());
    assert!(x[2].is_some());
}

#[test]
fn test_independent_errors_are_all_reported() {
    let (_, checker) = check_source("begin const c = 1; var c; print a; read b; call c end.");

    let names: Vec<&str> = checker.diagnostics().iter().map(|error| error.get_error_name()).collect();
    assert_eq!(
        names,
        vec![
            "DuplicateDeclaration",
            "UndeclaredIdentifier",
            "UndeclaredIdentifier",
            "InvalidCallTarget",
        ]
    );
}

#[test]
fn test_recursive_procedure_sees_itself() {
    let (block, checker) = check_source(
        "begin
            var n;
            proc down begin
                if n > 0 then n := n - 1; call down end
            end;
            proc other begin call down end;
            n := 3;
            call down
        end.",
    );

    assert!(!checker.has_errors());
    let down: Vec<IdUse> = uses_of(&block, "down").into_iter().map(Option::unwrap).collect();
    assert_eq!(down.len(), 3);
    assert!(down.iter().all(|id_use| id_use.kind == DeclKind::Procedure && id_use.offset == 1));

    // From its own body and from a sibling body the declaration is one scope out
    assert_eq!(down[0].levels_outward, 1);
    assert_eq!(down[1].levels_outward, 1);
    // From the block that declares it, it is local
    assert_eq!(down[2].levels_outward, 0);
}

#[test]
fn test_procedure_not_visible_before_declaration() {
    let (_, checker) = check_source(
        "begin
            proc a begin call b end;
            proc b begin call a end;
            call a
        end.",
    );

    assert_eq!(checker.diagnostics().len(), 1);
    match checker.diagnostics()[0].get_impl() {
        ErrorImpl::UndeclaredIdentifier { name } => assert_eq!(name, "b"),
        other => panic!("expected an undeclared identifier, got {:?}", other),
    }
}

#[test]
fn test_call_to_non_procedure() {
    let (block, checker) = check_source("begin const k = 4; var v; call v; call k end.");

    assert_eq!(checker.diagnostics().len(), 2);
    match checker.diagnostics()[0].get_impl() {
        ErrorImpl::InvalidCallTarget { name, found_kind } => {
            assert_eq!(name, "v");
            assert_eq!(*found_kind, DeclKind::Variable);
        }
        other => panic!("expected an invalid call target, got {:?}", other),
    }
    match checker.diagnostics()[1].get_impl() {
        ErrorImpl::InvalidCallTarget { found_kind, .. } => assert_eq!(*found_kind, DeclKind::Constant),
        other => panic!("expected an invalid call target, got {:?}", other),
    }

    // The use still resolves, it is just the wrong kind
    assert_eq!(uses_of(&block, "v")[0].as_ref().unwrap().kind, DeclKind::Variable);
}

#[test]
fn test_nested_block_statement_opens_scope() {
    let (block, checker) = check_source(
        "begin
            var x, y;
            begin var x; x := 1; y := 2 end;
            x := 3
        end.",
    );

    assert!(!checker.has_errors());
    let x: Vec<IdUse> = uses_of(&block, "x").into_iter().map(Option::unwrap).collect();
    assert_eq!((x[0].levels_outward, x[0].offset), (0, 0));
    assert_eq!((x[1].levels_outward, x[1].offset), (0, 0));
    assert_ne!(x[0].decl_position, x[1].decl_position);

    let y = uses_of(&block, "y")[0].clone().unwrap();
    assert_eq!((y.levels_outward, y.offset), (1, 1));
}

#[test]
fn test_conditions_are_checked() {
    let (block, checker) = check_source(
        "begin
            var a, b;
            if divisible a by b then print a else print b end;
            while a != b do a := -a end
        end.",
    );

    assert!(!checker.has_errors());
    assert_eq!(uses_of(&block, "a").len(), 5);
    assert!(block.ident_uses().iter().all(|ident| ident.id_use.is_some()));

    let (_, checker) = check_source("begin if divisible 4 by z then end end.");
    assert_eq!(checker.diagnostics().len(), 1);
    assert_eq!(checker.diagnostics()[0].get_error_name(), "UndeclaredIdentifier");
}

#[test]
fn test_procedure_locals_start_at_offset_zero() {
    let (block, _) = check_source(
        "begin
            var a, b, c;
            proc p begin var d; d := 1 end;
            call p
        end.",
    );

    assert_eq!(uses_of(&block, "d")[0].as_ref().unwrap().offset, 0);
    assert_eq!(uses_of(&block, "p")[0].as_ref().unwrap().offset, 3);
}

#[test]
fn test_second_run_is_rejected() {
    let (mut block, checker) = check_source("begin var x; x := 1 end.");
    assert!(!checker.has_errors());

    let mut checker = ScopeChecker::new(ScopeTable::new());
    let error = scope_check_program(&mut checker, &mut block).unwrap_err();
    assert!(error.is_internal());

    // The first run's resolution is left as it was
    let x = uses_of(&block, "x")[0].clone().unwrap();
    assert_eq!((x.levels_outward, x.offset), (0, 0));
}

#[test]
fn test_scope_check_entry_point() {
    init_logger();

    let block = scope_check(parse_source("begin var x; read x; print x end.")).unwrap();
    assert!(block.ident_uses().iter().all(|ident| ident.id_use.is_some()));

    let errors = scope_check(parse_source("begin var x; x := x; x := q end.")).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UndeclaredIdentifier");
}

#[test]
fn test_declaration_names_are_not_annotated() {
    let (block, _) = check_source("begin var x; x := 1 end.");

    assert!(block.var_decls[0].names[0].id_use.is_none());
    match &block.stmts[0] {
        Stmt::Assign(assign) => assert!(assign.name.id_use.is_some()),
        other => panic!("expected an assignment, got {:?}", other),
    }
}
