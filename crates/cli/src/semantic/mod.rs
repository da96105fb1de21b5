// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scopes and bindings for one module.
//!
//! The model answers two questions for rules: what a dotted expression
//! refers to once imports and aliases are followed, and which call a
//! plain name was assigned from.

mod binding;
mod builtins;
mod scope;

pub use binding::{Binding, BindingId, BindingKind, QualifiedName};
pub use builtins::is_python_builtin;
pub use scope::{Scope, ScopeId, ScopeKind};

use crate::ast::{Expr, collect_call_path};
use crate::source::TextRange;

#[derive(Debug)]
pub struct SemanticModel {
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
    scope_id: ScopeId,
}

impl Default for SemanticModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticModel {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Module, None)],
            bindings: Vec::new(),
            scope_id: ScopeId::MODULE,
        }
    }

    pub fn scope_id(&self) -> ScopeId {
        self.scope_id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn current_scope(&self) -> &Scope {
        self.scope(self.scope_id)
    }

    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.0 as usize]
    }

    /// Create a scope whose parent is the current scope, without entering it.
    pub fn add_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, Some(self.scope_id)));
        id
    }

    /// Create a child scope and make it current.
    pub fn push_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let id = self.add_scope(kind);
        self.scope_id = id;
        id
    }

    /// Return to the parent of the current scope.
    pub fn pop_scope(&mut self) {
        if let Some(parent) = self.current_scope().parent {
            self.scope_id = parent;
        }
    }

    /// Make `id` current, returning the previously current scope.
    pub fn enter_scope(&mut self, id: ScopeId) -> ScopeId {
        std::mem::replace(&mut self.scope_id, id)
    }

    fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0 as usize]
    }

    pub fn declare_global(&mut self, name: &str) {
        let id = self.scope_id;
        self.scope_mut(id).add_global(name);
    }

    pub fn declare_nonlocal(&mut self, name: &str) {
        let id = self.scope_id;
        self.scope_mut(id).add_nonlocal(name);
    }

    /// Bind `name` in the current scope, honoring `global` and `nonlocal`.
    pub fn add_binding(&mut self, name: &str, kind: BindingKind, range: TextRange) -> BindingId {
        let target = self.binding_scope(name);
        let id = BindingId(self.bindings.len() as u32);
        let shadowed = self.scope(target).get(name);
        self.bindings.push(Binding {
            name: name.to_string(),
            kind,
            range,
            scope: target,
            shadowed,
        });
        self.scope_mut(target).set(name, id);
        id
    }

    /// The scope a store of `name` lands in.
    fn binding_scope(&self, name: &str) -> ScopeId {
        let current = self.current_scope();
        if current.is_global(name) {
            return ScopeId::MODULE;
        }
        if current.is_nonlocal(name) {
            let mut parent = current.parent;
            let mut fallback = None;
            while let Some(id) = parent {
                let scope = self.scope(id);
                if scope.kind == ScopeKind::Function {
                    if scope.get(name).is_some() {
                        return id;
                    }
                    fallback.get_or_insert(id);
                }
                parent = scope.parent;
            }
            if let Some(id) = fallback {
                return id;
            }
        }
        self.scope_id
    }

    /// Resolve a load of `name` from the current scope.
    ///
    /// Class scopes are only visible from code directly in the class body.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        let current = self.current_scope();
        if current.is_global(name) {
            return self.visible_binding(self.scope(ScopeId::MODULE).get(name));
        }

        let mut id = Some(self.scope_id);
        let mut first = true;
        while let Some(scope_id) = id {
            let scope = self.scope(scope_id);
            let visible = first || scope.kind != ScopeKind::Class;
            if visible && let Some(binding) = self.visible_binding(scope.get(name)) {
                return Some(binding);
            }
            first = false;
            id = scope.parent;
        }
        None
    }

    /// Skip annotation-only bindings back to the one they shadow.
    fn visible_binding(&self, mut id: Option<BindingId>) -> Option<&Binding> {
        while let Some(current) = id {
            let binding = self.binding(current);
            if binding.kind != BindingKind::Annotation {
                return Some(binding);
            }
            id = binding.shadowed;
        }
        None
    }

    /// Resolve a name or attribute chain to the qualified name it refers to.
    ///
    /// Follows imports, aliases and builtins. Returns `None` when the root of
    /// the chain is not an import or an unshadowed builtin.
    pub fn resolve_qualified_name(&self, expr: &Expr) -> Option<QualifiedName> {
        let path = collect_call_path(expr)?;
        let (head, tail) = path.split_first()?;
        let tail = tail.iter().copied();

        match self.lookup(head) {
            Some(binding) => match &binding.kind {
                BindingKind::Import(name) | BindingKind::FromImport(name) => Some(name.join(tail)),
                BindingKind::SubmoduleImport(name) => {
                    let root = QualifiedName::from_segments([name.first()?]);
                    Some(root.join(tail))
                }
                _ => None,
            },
            None if is_python_builtin(head) => Some(QualifiedName::builtin(head).join(tail)),
            None => None,
        }
    }

    /// The callee of the assignment that bound `expr`, when `expr` is a plain
    /// name whose latest binding is `name = call(...)`.
    pub fn resolve_assignment(&self, expr: &Expr) -> Option<&QualifiedName> {
        let name = expr.as_name_expr()?;
        self.lookup(&name.id)?.assigned_call()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
