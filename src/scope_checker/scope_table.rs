use std::collections::HashMap;

use log::trace;

use crate::{errors::errors::{Error, ErrorImpl}, Position};

use super::id_use::DeclKind;

/// Declaration information for one name in one scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub kind: DeclKind,
    pub position: Position,
    pub offset: usize,
}

/// A single lexical scope
///
/// Constants, variables and procedures share one slot counter, so offsets
/// follow declaration order across all three kinds.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: HashMap<String, Binding>,
    next_offset: usize,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Stack of scopes mirroring block nesting. The last element is innermost.
#[derive(Debug, Default)]
pub struct ScopeTable {
    scopes: Vec<Scope>,
}

impl ScopeTable {
    pub fn new() -> Self {
        ScopeTable::default()
    }

    /// Number of live scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::new());
        trace!("entered scope, depth {}", self.depth());
    }

    /// Pops the innermost scope. Underflow means the checker's enter/leave
    /// calls are unbalanced, which is reported as an internal error.
    pub fn leave_scope(&mut self) -> Result<(), Error> {
        match self.scopes.pop() {
            Some(scope) => {
                trace!("left scope with {} bindings, depth {}", scope.len(), self.depth());
                Ok(())
            }
            None => Err(Error::malformed("leave_scope called with no scope to leave")),
        }
    }

    /// Only looks at the innermost scope, never outward.
    pub fn declared_in_current_scope(&self, name: &str) -> bool {
        self.scopes.last().is_some_and(|scope| scope.contains(name))
    }

    /// Offset the next declaration in the innermost scope will receive.
    pub fn current_slot_count(&self) -> usize {
        self.scopes.last().map_or(0, |scope| scope.next_offset)
    }

    /// Declares `name` in the innermost scope and returns its offset.
    ///
    /// A name already bound in that scope is left untouched and a
    /// `DuplicateDeclaration` carrying the first declaration is returned.
    pub fn declare(&mut self, name: &str, kind: DeclKind, position: Position) -> Result<usize, Error> {
        let scope = match self.scopes.last_mut() {
            Some(scope) => scope,
            None => return Err(Error::malformed(format!("declaration of `{}` outside of any scope", name))),
        };

        if let Some(first) = scope.get(name) {
            return Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    name: String::from(name),
                    first_kind: first.kind,
                    first_position: first.position.clone(),
                },
                position,
            ));
        }

        let offset = scope.next_offset;
        scope.next_offset += 1;
        scope.bindings.insert(String::from(name), Binding { kind, position, offset });

        Ok(offset)
    }

    /// Searches from the innermost scope outward. Returns the binding and the
    /// number of scopes crossed to reach it.
    pub fn lookup(&self, name: &str) -> Option<(&Binding, usize)> {
        self.scopes
            .iter()
            .rev()
            .enumerate()
            .find_map(|(levels_outward, scope)| scope.get(name).map(|binding| (binding, levels_outward)))
    }
}
