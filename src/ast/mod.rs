/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Blocks, declarations and identifier occurrences
/// - expressions: Expressions and conditions
/// - statements: The statement variants
pub mod ast;
pub mod expressions;
pub mod statements;
