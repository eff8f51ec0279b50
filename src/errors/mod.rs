//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and scope checking
//! - The split between user diagnostics and internal (malformed tree) errors
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
