use std::fmt::Display;

use thiserror::Error;

use crate::{scope_checker::id_use::DeclKind, Position};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// An internal invariant violation. These are never tied to a source
    /// location since they point at a bug in an earlier pass, not in the program.
    pub fn malformed(description: impl Into<String>) -> Self {
        Error {
            internal_error: ErrorImpl::MalformedAst { description: description.into() },
            position: Position::null(),
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::MalformedAst { .. })
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UndeclaredIdentifier { .. } => "UndeclaredIdentifier",
            ErrorImpl::InvalidCallTarget { .. } => "InvalidCallTarget",
            ErrorImpl::MalformedAst { .. } => "MalformedAst",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("`{}` cannot appear here", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DuplicateDeclaration { name, first_kind, .. } => ErrorTip::Suggestion(
                format!("\"{}\" is already declared as a {}", name, first_kind),
            ),
            ErrorImpl::UndeclaredIdentifier { name } => {
                ErrorTip::Suggestion(format!("identifier \"{}\" is not declared", name))
            }
            ErrorImpl::InvalidCallTarget { name, found_kind } => ErrorTip::Suggestion(format!(
                "\"{}\" is not a procedure, it is declared as a {}",
                name, found_kind
            )),
            ErrorImpl::MalformedAst { description } => {
                ErrorTip::Suggestion(format!("internal compiler error: {}", description))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_internal() {
            write!(f, "{}", self.internal_error)
        } else {
            write!(f, "{}:{}: {}", self.position.1, self.position.0, self.internal_error)
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("{name:?} is already declared as a {first_kind}")]
    DuplicateDeclaration {
        name: String,
        first_kind: DeclKind,
        first_position: Position,
    },
    #[error("identifier {name:?} is not declared")]
    UndeclaredIdentifier { name: String },
    #[error("{name:?} is not a procedure")]
    InvalidCallTarget { name: String, found_kind: DeclKind },
    #[error("malformed syntax tree: {description}")]
    MalformedAst { description: String },
}
