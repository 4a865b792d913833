use std::collections::HashMap;

/// Index of one scope in a [`Scopes`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug)]
struct Scope<V, F> {
    parent: Option<ScopeId>,
    variables: HashMap<String, V>,
    functions: HashMap<(String, usize), F>,
}

impl<V, F> Scope<V, F> {
    fn new(parent: Option<ScopeId>) -> Self {
        Self { parent, variables: HashMap::new(), functions: HashMap::new() }
    }
}

/// An arena of parent-chained scopes with stack discipline.
///
/// Scopes are pushed and popped in LIFO order, but a scope's parent need not
/// be the scope it was entered from: a function call enters a scope parented
/// to the function's defining scope, so the caller's locals stay invisible to
/// the callee. Variables are keyed by name, functions by name and arity.
///
/// The analyzer instantiates this with static bindings, the interpreter with
/// runtime cells; lookup always walks the parent chain from the current
/// scope, and definition always targets the current scope alone.
#[derive(Debug)]
pub struct Scopes<V, F> {
    arena: Vec<Scope<V, F>>,
    current: ScopeId,
}

impl<V, F> Scopes<V, F> {
    /// Creates an arena holding only the root scope.
    #[must_use]
    pub fn new() -> Self {
        Self { arena: vec![Scope::new(None)], current: ScopeId(0) }
    }

    /// The scope lookups currently start from.
    #[must_use]
    pub const fn current(&self) -> ScopeId {
        self.current
    }

    /// Pushes a child of the current scope and makes it current.
    pub fn enter(&mut self) {
        self.enter_at(self.current);
    }

    /// Pushes a child of `parent` and makes it current.
    pub fn enter_at(&mut self, parent: ScopeId) {
        let id = ScopeId(self.arena.len());
        self.arena.push(Scope::new(Some(parent)));
        self.current = id;
    }

    /// Discards the current scope and resumes its parent.
    pub fn exit(&mut self) {
        // The root scope has no parent and is never popped.
        if let Some(parent) = self.arena[self.current.0].parent {
            self.arena.truncate(self.current.0);
            self.current = parent;
        }
    }

    /// Discards the current scope and resumes `scope`.
    ///
    /// Used when leaving a function call, where the scope to resume is the
    /// caller's rather than the call scope's parent.
    pub fn exit_to(&mut self, scope: ScopeId) {
        self.arena.truncate(self.current.0);
        self.current = scope;
    }

    /// Binds a variable in the current scope.
    ///
    /// Returns `false`, leaving the existing binding untouched, when the name
    /// is already bound in this scope. Shadowing an outer scope is fine.
    pub fn define_variable(&mut self, name: &str, binding: V) -> bool {
        let variables = &mut self.arena[self.current.0].variables;
        if variables.contains_key(name) {
            return false;
        }
        variables.insert(name.to_string(), binding);
        true
    }

    /// Binds a function in the current scope, keyed by name and arity.
    ///
    /// Returns `false`, leaving the existing binding untouched, when that key
    /// is already bound in this scope.
    pub fn define_function(&mut self, name: &str, arity: usize, binding: F) -> bool {
        let functions = &mut self.arena[self.current.0].functions;
        let key = (name.to_string(), arity);
        if functions.contains_key(&key) {
            return false;
        }
        functions.insert(key, binding);
        true
    }

    /// Finds the nearest binding of `name`, walking the parent chain.
    #[must_use]
    pub fn lookup_variable(&self, name: &str) -> Option<&V> {
        let scope = self.find_defining_scope(name)?;
        self.arena[scope.0].variables.get(name)
    }

    /// Mutable counterpart of [`Self::lookup_variable`].
    #[must_use]
    pub fn lookup_variable_mut(&mut self, name: &str) -> Option<&mut V> {
        let scope = self.find_defining_scope(name)?;
        self.arena[scope.0].variables.get_mut(name)
    }

    /// Finds the nearest binding of `name` with the given arity.
    #[must_use]
    pub fn lookup_function(&self, name: &str, arity: usize) -> Option<&F> {
        let key = (name.to_string(), arity);
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            if let Some(binding) = self.arena[id.0].functions.get(&key) {
                return Some(binding);
            }
            cursor = self.arena[id.0].parent;
        }
        None
    }

    fn find_defining_scope(&self, name: &str) -> Option<ScopeId> {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            if self.arena[id.0].variables.contains_key(name) {
                return Some(id);
            }
            cursor = self.arena[id.0].parent;
        }
        None
    }
}

impl<V, F> Default for Scopes<V, F> {
    fn default() -> Self {
        Self::new()
    }
}
