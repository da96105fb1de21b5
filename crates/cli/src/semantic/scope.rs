// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::{HashMap, HashSet};

use super::BindingId;

/// Index of a scope in the semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(super) u32);

impl ScopeId {
    pub const MODULE: ScopeId = ScopeId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    Class,
    Function,
}

#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// Latest binding of each name.
    bindings: HashMap<String, BindingId>,
    globals: HashSet<String>,
    nonlocals: HashSet<String>,
}

impl Scope {
    pub(super) fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            parent,
            bindings: HashMap::new(),
            globals: HashSet::new(),
            nonlocals: HashSet::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<BindingId> {
        self.bindings.get(name).copied()
    }

    pub(super) fn set(&mut self, name: &str, id: BindingId) {
        self.bindings.insert(name.to_string(), id);
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.globals.contains(name)
    }

    pub fn is_nonlocal(&self, name: &str) -> bool {
        self.nonlocals.contains(name)
    }

    pub(super) fn add_global(&mut self, name: &str) {
        self.globals.insert(name.to_string());
    }

    pub(super) fn add_nonlocal(&mut self, name: &str) {
        self.nonlocals.insert(name.to_string());
    }
}
