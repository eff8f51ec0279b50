//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into the block tree consumed by the scope checker. It uses recursive
//! descent for blocks, declarations and statements, and a Pratt parser for
//! expressions with binding powers for operator precedence.
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing, and a statement lookup keyed by the leading token.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
