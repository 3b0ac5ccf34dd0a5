use std::{collections::HashMap, rc::Rc};

use crate::{ast::FunctionDef, interpreter::value::core::Value};

/// Identifies a frame in the [`Scopes`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// What a name is bound to.
#[derive(Debug, Clone)]
pub enum Binding {
    /// A plain value.
    Value(Value),
    /// A function, together with the frame it was defined in. Calls chain
    /// their frame to that one.
    Function(Rc<FunctionDef>, ScopeId),
}

#[derive(Debug, Default)]
struct Frame {
    bindings: HashMap<String, Binding>,
    parent:   Option<ScopeId>,
}

/// Arena of scope frames.
///
/// Frame 0 is the root and lives as long as the arena. Every other frame is
/// a function call frame: it is pushed when the call starts and popped when
/// it returns, so frames are always released in reverse order of creation.
///
/// Writes only ever touch the frame they are given; reads walk the parent
/// chain.
///
/// # Example
/// ```
/// use foolang::interpreter::{
///     evaluator::scope::{Binding, Scopes},
///     value::core::Value,
/// };
///
/// let mut scopes = Scopes::new();
/// scopes.define(Scopes::ROOT, "a", Binding::Value(Value::Integer(1)));
///
/// let call = scopes.push(Scopes::ROOT);
/// assert!(scopes.lookup(call, "a").is_some());
/// assert!(!scopes.contains(call, "a"));
///
/// scopes.pop();
/// assert_eq!(scopes.depth(), 1);
/// ```
#[derive(Debug)]
pub struct Scopes {
    frames: Vec<Frame>,
}

impl Default for Scopes {
    fn default() -> Self {
        Self::new()
    }
}

impl Scopes {
    /// The root frame.
    pub const ROOT: ScopeId = ScopeId(0);

    /// Creates an arena holding only an empty root frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![Frame::default()] }
    }

    /// Binds `name` in `scope` itself, replacing any binding of the same
    /// name in that frame. Parent frames are never touched.
    pub fn define(&mut self, scope: ScopeId, name: impl Into<String>, binding: Binding) {
        if let Some(frame) = self.frames.get_mut(scope.0) {
            frame.bindings.insert(name.into(), binding);
        }
    }

    /// Resolves `name`, starting in `scope` and walking up the parent chain.
    #[must_use]
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Binding> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let frame = self.frames.get(id.0)?;
            if let Some(binding) = frame.bindings.get(name) {
                return Some(binding);
            }
            current = frame.parent;
        }

        None
    }

    /// Returns the binding of `name` in `scope` only, without consulting
    /// parents.
    #[must_use]
    pub fn local(&self, scope: ScopeId, name: &str) -> Option<&Binding> {
        self.frames.get(scope.0)?.bindings.get(name)
    }

    /// Whether `scope` itself binds `name`.
    #[must_use]
    pub fn contains(&self, scope: ScopeId, name: &str) -> bool {
        self.local(scope, name).is_some()
    }

    /// Creates a new empty frame chained to `parent`.
    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        self.frames.push(Frame { bindings: HashMap::new(),
                                 parent:   Some(parent), });
        ScopeId(self.frames.len() - 1)
    }

    /// Discards the most recently pushed frame. The root frame is never
    /// discarded.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of live frames, the root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
