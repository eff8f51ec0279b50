use std::fmt::Display;

use crate::Position;

/// What a name was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Constant,
    Variable,
    Procedure,
}

impl Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclKind::Constant => write!(f, "constant"),
            DeclKind::Variable => write!(f, "variable"),
            DeclKind::Procedure => write!(f, "procedure"),
        }
    }
}

/// Resolution attached to an identifier use.
///
/// A copy of the declaration's binding plus the lexical distance, so it stays
/// valid after the scope that held the declaration has been popped.
#[derive(Debug, Clone, PartialEq)]
pub struct IdUse {
    pub kind: DeclKind,
    pub decl_position: Position,
    /// Slot of the declaration within its own scope
    pub offset: usize,
    /// Scopes crossed from the use to the declaration, 0 for the innermost
    pub levels_outward: usize,
}

impl Display for IdUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (levels outward: {}, offset: {})",
            self.kind, self.levels_outward, self.offset
        )
    }
}
