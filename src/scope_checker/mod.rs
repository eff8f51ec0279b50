//! Scope checking and name resolution module.
//!
//! This module walks the block tree produced by the parser and:
//!
//! - Builds a stack of lexical scopes, one per block
//! - Declares constants, variables and procedures in declaration order,
//!   assigning each a scope-local storage offset
//! - Rejects duplicate declarations within a single scope
//! - Resolves every identifier use to its innermost enclosing declaration,
//!   recording the kind, offset and how many scopes outward it was found
//! - Rejects undeclared identifiers and calls to non-procedures
//!
//! Resolutions are written back onto the use nodes of the tree so that a
//! later pass can address storage without the scope table.

pub mod id_use;
pub mod scope_checker;
pub mod scope_table;

#[cfg(test)]
mod tests;
