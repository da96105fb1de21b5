// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Source-order traversal that builds the semantic model and runs rules.
//!
//! Rules see the bindings that are live at the point of the node they
//! inspect. Function bodies are deferred until the enclosing module has been
//! visited, so they see its final bindings.

use std::collections::HashSet;
use std::sync::Arc;

use crate::ast::{
    Expr, ExprCall, ModModule, Stmt, StmtFunctionDef, StmtImport, StmtImportFrom,
};
use crate::diagnostic::Diagnostic;
use crate::fix::{self, Edit};
use crate::rules::Rule;
use crate::semantic::{BindingKind, QualifiedName, ScopeId, ScopeKind, SemanticModel};
use crate::source::{Locator, TextRange};

/// Statement currently being visited, with the suite that holds it.
#[derive(Clone, Copy)]
struct StmtRef<'a> {
    stmt: &'a Stmt,
    suite: &'a [Stmt],
    /// True for indented blocks, which must stay non-empty.
    nested: bool,
}

pub struct Checker<'a> {
    locator: &'a Locator<'a>,
    rules: &'a [Arc<dyn Rule>],
    semantic: SemanticModel,
    diagnostics: Vec<Diagnostic>,
    deferred_functions: Vec<(ScopeId, &'a StmtFunctionDef)>,
    current: Option<StmtRef<'a>>,
    /// Statements removed by fixes reported in this pass.
    deleted: HashSet<TextRange>,
}

/// Run `rules` over `module`, returning diagnostics in traversal order.
pub fn check_module(
    module: &ModModule,
    locator: &Locator,
    rules: &[Arc<dyn Rule>],
) -> Vec<Diagnostic> {
    let mut checker = Checker::new(locator, rules);
    checker.visit_suite(&module.body, false);
    checker.visit_deferred_functions();
    checker.diagnostics
}

impl<'a> Checker<'a> {
    fn new(locator: &'a Locator<'a>, rules: &'a [Arc<dyn Rule>]) -> Self {
        Self {
            locator,
            rules,
            semantic: SemanticModel::new(),
            diagnostics: Vec::new(),
            deferred_functions: Vec::new(),
            current: None,
            deleted: HashSet::new(),
        }
    }

    pub fn semantic(&self) -> &SemanticModel {
        &self.semantic
    }

    pub fn locator(&self) -> &Locator<'a> {
        self.locator
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Edit removing the current statement, if it consists of exactly `expr`.
    pub fn delete_current_expression_statement(&mut self, expr: TextRange) -> Option<Edit> {
        let current = self.current?;
        let stmt = current.stmt.as_expr_stmt()?;
        if stmt.value.range() != expr {
            return None;
        }
        let edit = fix::delete_stmt(
            current.stmt,
            current.suite,
            current.nested,
            &self.deleted,
            self.locator,
        );
        self.deleted.insert(current.stmt.range());
        Some(edit)
    }

    fn visit_deferred_functions(&mut self) {
        let mut index = 0;
        while let Some(&(scope, function)) = self.deferred_functions.get(index) {
            index += 1;
            let previous = self.semantic.enter_scope(scope);
            for parameter in &function.parameters {
                self.semantic.add_binding(
                    &parameter.name.id,
                    BindingKind::Argument,
                    parameter.name.range,
                );
            }
            self.visit_suite(&function.body, true);
            self.semantic.enter_scope(previous);
        }
    }

    fn visit_suite(&mut self, suite: &'a [Stmt], nested: bool) {
        for stmt in suite {
            let parent = self.current.replace(StmtRef {
                stmt,
                suite,
                nested,
            });
            self.visit_stmt(stmt);
            self.current = parent;
        }
    }

    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        match stmt {
            Stmt::Expr(s) => self.visit_expr(&s.value),
            Stmt::Assign(s) => {
                self.visit_expr(&s.value);
                let call = self.assigned_call(&s.value);
                for target in &s.targets {
                    self.bind_assignment_target(target, call.clone());
                }
            }
            Stmt::AnnAssign(s) => {
                self.visit_expr(&s.annotation);
                match &s.value {
                    Some(value) => {
                        self.visit_expr(value);
                        let call = self.assigned_call(value);
                        self.bind_assignment_target(&s.target, call);
                    }
                    None => self.bind_target(&s.target, &BindingKind::Annotation),
                }
            }
            Stmt::AugAssign(s) => {
                self.visit_expr(&s.value);
                self.bind_target(&s.target, &BindingKind::AugmentedAssignment);
            }
            Stmt::Import(s) => self.bind_import(s),
            Stmt::ImportFrom(s) => self.bind_import_from(s),
            Stmt::FunctionDef(s) => {
                for decorator in &s.decorators {
                    self.visit_expr(decorator);
                }
                for parameter in &s.parameters {
                    if let Some(annotation) = &parameter.annotation {
                        self.visit_expr(annotation);
                    }
                    if let Some(default) = &parameter.default {
                        self.visit_expr(default);
                    }
                }
                if let Some(returns) = &s.returns {
                    self.visit_expr(returns);
                }
                let scope = self.semantic.add_scope(ScopeKind::Function);
                self.deferred_functions.push((scope, s));
                self.semantic
                    .add_binding(&s.name.id, BindingKind::FunctionDefinition, s.name.range);
            }
            Stmt::ClassDef(s) => {
                for decorator in &s.decorators {
                    self.visit_expr(decorator);
                }
                if let Some(arguments) = &s.arguments {
                    self.visit_exprs(&arguments.args);
                    for keyword in &arguments.keywords {
                        self.visit_expr(&keyword.value);
                    }
                }
                self.semantic.push_scope(ScopeKind::Class);
                self.visit_suite(&s.body, true);
                self.semantic.pop_scope();
                self.semantic
                    .add_binding(&s.name.id, BindingKind::ClassDefinition, s.name.range);
            }
            Stmt::If(s) => {
                self.visit_expr(&s.test);
                self.visit_suite(&s.body, true);
                for clause in &s.elif_else_clauses {
                    if let Some(test) = &clause.test {
                        self.visit_expr(test);
                    }
                    self.visit_suite(&clause.body, true);
                }
            }
            Stmt::For(s) => {
                self.visit_expr(&s.iter);
                self.bind_target(&s.target, &BindingKind::LoopVar);
                self.visit_suite(&s.body, true);
                self.visit_suite(&s.orelse, true);
            }
            Stmt::While(s) => {
                self.visit_expr(&s.test);
                self.visit_suite(&s.body, true);
                self.visit_suite(&s.orelse, true);
            }
            Stmt::With(s) => {
                for item in &s.items {
                    self.visit_expr(&item.context_expr);
                    if let Some(vars) = &item.optional_vars {
                        self.bind_target(vars, &BindingKind::WithItemVar);
                    }
                }
                self.visit_suite(&s.body, true);
            }
            Stmt::Try(s) => {
                self.visit_suite(&s.body, true);
                for handler in &s.handlers {
                    if let Some(type_) = &handler.type_ {
                        self.visit_expr(type_);
                    }
                    if let Some(name) = &handler.name {
                        self.semantic
                            .add_binding(&name.id, BindingKind::ExceptHandler, name.range);
                    }
                    self.visit_suite(&handler.body, true);
                }
                self.visit_suite(&s.orelse, true);
                self.visit_suite(&s.finalbody, true);
            }
            Stmt::Return(s) => {
                if let Some(value) = &s.value {
                    self.visit_expr(value);
                }
            }
            Stmt::Delete(s) => {
                for target in &s.targets {
                    self.bind_target(target, &BindingKind::Deletion);
                }
            }
            Stmt::Global(s) => {
                for name in &s.names {
                    self.semantic.declare_global(&name.id);
                }
            }
            Stmt::Nonlocal(s) => {
                for name in &s.names {
                    self.semantic.declare_nonlocal(&name.id);
                }
            }
            Stmt::Pass(_) => {}
            Stmt::Other(s) => {
                self.visit_exprs(&s.exprs);
                for body in &s.bodies {
                    self.visit_suite(body, true);
                }
            }
        }
    }

    fn visit_exprs(&mut self, exprs: &'a [Expr]) {
        for expr in exprs {
            self.visit_expr(expr);
        }
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Attribute(e) => self.visit_expr(&e.value),
            Expr::Call(call) => {
                self.visit_expr(&call.func);
                self.visit_exprs(&call.arguments.args);
                for keyword in &call.arguments.keywords {
                    self.visit_expr(&keyword.value);
                }
                self.run_call_rules(call);
            }
            Expr::Starred(e) => self.visit_expr(&e.value),
            Expr::Named(e) => {
                self.visit_expr(&e.value);
                self.bind_target(&e.target, &BindingKind::NamedExprAssignment);
            }
            Expr::Other(e) => self.visit_exprs(&e.children),
            Expr::Name(_)
            | Expr::NoneLiteral(_)
            | Expr::BooleanLiteral(_)
            | Expr::NumberLiteral(_)
            | Expr::StringLiteral(_) => {}
        }
    }

    fn run_call_rules(&mut self, call: &ExprCall) {
        let rules = self.rules;
        for rule in rules {
            rule.check_call(self, call);
        }
    }

    fn assigned_call(&self, value: &Expr) -> Option<QualifiedName> {
        let call = value.as_call_expr()?;
        self.semantic.resolve_qualified_name(&call.func)
    }

    /// Bind an assignment target. Only a plain name keeps the callee; names
    /// inside an unpacking do not.
    fn bind_assignment_target(&mut self, target: &'a Expr, call: Option<QualifiedName>) {
        match target {
            Expr::Name(name) => {
                self.semantic
                    .add_binding(&name.id, BindingKind::Assignment { call }, name.range);
            }
            _ => self.bind_target(target, &BindingKind::Assignment { call: None }),
        }
    }

    /// Bind every name stored by `target`; other parts are loads.
    fn bind_target(&mut self, target: &'a Expr, kind: &BindingKind) {
        match target {
            Expr::Name(name) => {
                self.semantic.add_binding(&name.id, kind.clone(), name.range);
            }
            Expr::Starred(e) => self.bind_target(&e.value, kind),
            Expr::Other(e) if is_unpacking(e.kind) => {
                for child in &e.children {
                    self.bind_target(child, kind);
                }
            }
            _ => self.visit_expr(target),
        }
    }

    fn bind_import(&mut self, import: &StmtImport) {
        for alias in &import.names {
            let module = QualifiedName::from_dotted_name(alias.name.as_str());
            match &alias.asname {
                Some(asname) => {
                    self.semantic
                        .add_binding(&asname.id, BindingKind::Import(module), asname.range);
                }
                None => {
                    let name = alias.name.as_str();
                    let root = name.split('.').next().unwrap_or(name);
                    let kind = if root.len() == name.len() {
                        BindingKind::Import(module)
                    } else {
                        BindingKind::SubmoduleImport(module)
                    };
                    self.semantic.add_binding(root, kind, alias.range);
                }
            }
        }
    }

    fn bind_import_from(&mut self, import: &StmtImportFrom) {
        let dots = ".".repeat(import.level as usize);
        let module = match &import.module {
            Some(module) if import.level == 0 => module.as_str().to_string(),
            Some(module) => format!("{dots}{}", module.as_str()),
            None => dots,
        };
        for alias in &import.names {
            if alias.name.as_str() == "*" {
                continue;
            }
            let qualified = if import.level == 0 {
                QualifiedName::from_dotted_name(&module).join([alias.name.as_str()])
            } else {
                QualifiedName::from_segments([module.as_str(), alias.name.as_str()])
            };
            let bound = alias.asname.as_ref().unwrap_or(&alias.name);
            self.semantic
                .add_binding(&bound.id, BindingKind::FromImport(qualified), bound.range);
        }
    }
}

fn is_unpacking(kind: &str) -> bool {
    matches!(
        kind,
        "pattern_list" | "tuple_pattern" | "list_pattern" | "tuple" | "list" | "list_splat_pattern"
    )
}

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;
