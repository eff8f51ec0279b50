//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::scope_checker::id_use::DeclKind;
use crate::Position;
use std::rc::Rc;

fn pos(offset: u32) -> Position {
    Position(offset, Rc::new("test.pl0".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        pos(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(!error.is_internal());
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "end".to_string(),
        },
        pos(42),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_duplicate_declaration_tip_names_first_kind() {
    let error = Error::new(
        ErrorImpl::DuplicateDeclaration {
            name: "x".to_string(),
            first_kind: DeclKind::Constant,
            first_position: pos(3),
        },
        pos(20),
    );

    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
    assert_eq!(error.get_tip().to_string(), "\"x\" is already declared as a constant");
    assert_eq!(error.get_impl().to_string(), "\"x\" is already declared as a constant");
}

#[test]
fn test_undeclared_identifier_error() {
    let error = Error::new(
        ErrorImpl::UndeclaredIdentifier {
            name: "y".to_string(),
        },
        pos(7),
    );

    assert_eq!(error.get_error_name(), "UndeclaredIdentifier");
    assert_eq!(error.get_tip().to_string(), "identifier \"y\" is not declared");
    assert_eq!(error.to_string(), "test.pl0:7: identifier \"y\" is not declared");
}

#[test]
fn test_invalid_call_target_error() {
    let error = Error::new(
        ErrorImpl::InvalidCallTarget {
            name: "v".to_string(),
            found_kind: DeclKind::Variable,
        },
        pos(0),
    );

    assert_eq!(error.get_error_name(), "InvalidCallTarget");
    assert_eq!(
        error.get_tip().to_string(),
        "\"v\" is not a procedure, it is declared as a variable"
    );
}

#[test]
fn test_malformed_ast_is_internal() {
    let error = Error::malformed("scope stack underflow");

    assert_eq!(error.get_error_name(), "MalformedAst");
    assert!(error.is_internal());
    assert_eq!(*error.get_position(), Position::null());
    assert_eq!(error.to_string(), "malformed syntax tree: scope stack underflow");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        pos(0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "99999999999".to_string(),
        },
        pos(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("99999999999")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
