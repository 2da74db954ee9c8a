use std::collections::HashMap;

use crate::lexer::Span;

/// A variable binding as the analyzer sees it. The type stays the opaque
/// spelling from the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub mutable: bool,
    pub type_name: String,
    pub position: Span,
}

/// A single lexical frame in the scope stack.
#[derive(Debug, Clone, Default)]
struct Frame {
    variables: HashMap<String, Variable>,
}

/// Lexical scope stack. Frames are pushed and popped in strict LIFO by
/// block boundaries; lookups walk from the innermost frame outwards.
#[derive(Debug, Clone)]
pub struct Scope {
    frames: Vec<Frame>,
}

impl Default for Scope {
    fn default() -> Self {
        Scope {
            frames: vec![Frame::default()],
        }
    }
}

impl Scope {
    pub fn new() -> Scope {
        Self::default()
    }

    pub fn enter_scope(&mut self) {
        self.frames.push(Frame::default());
    }

    pub fn exit_scope(&mut self) {
        self.frames.pop();
    }

    /// Add a binding to the current frame. Fails with the existing binding
    /// if the name is already taken in this frame; shadowing an outer frame
    /// is allowed.
    pub fn add_variable(&mut self, variable: Variable) -> Result<(), Variable> {
        let Some(frame) = self.frames.last_mut() else {
            return Ok(());
        };

        if let Some(existing) = frame.variables.get(&variable.name) {
            return Err(existing.clone());
        }

        frame.variables.insert(variable.name.clone(), variable);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Option<&Variable> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.variables.get(name))
    }
}
