// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt;

use crate::source::TextRange;

use super::ScopeId;

/// Index of a binding in the semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(pub(super) u32);

/// Fully qualified dotted name, e.g. `paramiko.client.SSHClient`.
///
/// Builtins are rooted at an empty segment: `["", "print"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName(Vec<String>);

impl QualifiedName {
    pub fn from_segments<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Split a dotted module path into segments.
    pub fn from_dotted_name(name: &str) -> Self {
        Self::from_segments(name.split('.'))
    }

    pub fn builtin(name: &str) -> Self {
        Self::from_segments(["", name])
    }

    pub fn segments(&self) -> Vec<&str> {
        self.0.iter().map(String::as_str).collect()
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Append trailing member segments.
    pub fn join<'a>(&self, tail: impl IntoIterator<Item = &'a str>) -> Self {
        let mut segments = self.0.clone();
        segments.extend(tail.into_iter().map(str::to_string));
        Self(segments)
    }

    pub fn is_builtin(&self) -> bool {
        self.first() == Some("")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_builtin() {
            f.write_str(&self.0[1..].join("."))
        } else {
            f.write_str(&self.0.join("."))
        }
    }
}

/// How a name came to be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    /// `import a` or `import a.b as c`.
    Import(QualifiedName),
    /// `import a.b`, which binds `a`.
    SubmoduleImport(QualifiedName),
    /// `from a import b`.
    FromImport(QualifiedName),
    /// `x = value`. Carries the callee when `value` is a resolvable call.
    Assignment { call: Option<QualifiedName> },
    /// `x: int` with no value.
    Annotation,
    AugmentedAssignment,
    LoopVar,
    WithItemVar,
    ExceptHandler,
    NamedExprAssignment,
    FunctionDefinition,
    ClassDefinition,
    Argument,
    Deletion,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub name: String,
    pub kind: BindingKind,
    pub range: TextRange,
    pub scope: ScopeId,
    /// The binding of the same name this one replaced, in the same scope.
    pub shadowed: Option<BindingId>,
}

impl Binding {
    /// The callee of the assignment that created this binding, if any.
    pub fn assigned_call(&self) -> Option<&QualifiedName> {
        match &self.kind {
            BindingKind::Assignment { call } => call.as_ref(),
            _ => None,
        }
    }
}
