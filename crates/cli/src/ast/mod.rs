// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Owned Python syntax tree.
//!
//! The tree covers the statements and expressions the semantic model and
//! rules care about. Everything else is kept as an `Other` node that still
//! carries its nested expressions and bodies, so calls are never lost.

mod helpers;
mod lower;

pub use helpers::{collect_call_path, is_const_none, map_callable};
pub use lower::{ParseError, parse_module};

use crate::source::TextRange;

/// A parsed module.
#[derive(Debug, Clone)]
pub struct ModModule {
    pub body: Vec<Stmt>,
    pub range: TextRange,
}

/// An identifier with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub id: String,
    pub range: TextRange,
}

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expr(StmtExpr),
    Assign(StmtAssign),
    AnnAssign(StmtAnnAssign),
    AugAssign(StmtAugAssign),
    Import(StmtImport),
    ImportFrom(StmtImportFrom),
    FunctionDef(StmtFunctionDef),
    ClassDef(StmtClassDef),
    If(StmtIf),
    For(StmtFor),
    While(StmtWhile),
    With(StmtWith),
    Try(StmtTry),
    Return(StmtReturn),
    Delete(StmtDelete),
    Global(StmtGlobal),
    Nonlocal(StmtNonlocal),
    Pass(TextRange),
    Other(StmtOther),
}

impl Stmt {
    pub fn range(&self) -> TextRange {
        match self {
            Stmt::Expr(s) => s.range,
            Stmt::Assign(s) => s.range,
            Stmt::AnnAssign(s) => s.range,
            Stmt::AugAssign(s) => s.range,
            Stmt::Import(s) => s.range,
            Stmt::ImportFrom(s) => s.range,
            Stmt::FunctionDef(s) => s.range,
            Stmt::ClassDef(s) => s.range,
            Stmt::If(s) => s.range,
            Stmt::For(s) => s.range,
            Stmt::While(s) => s.range,
            Stmt::With(s) => s.range,
            Stmt::Try(s) => s.range,
            Stmt::Return(s) => s.range,
            Stmt::Delete(s) => s.range,
            Stmt::Global(s) => s.range,
            Stmt::Nonlocal(s) => s.range,
            Stmt::Pass(range) => *range,
            Stmt::Other(s) => s.range,
        }
    }

    pub fn as_expr_stmt(&self) -> Option<&StmtExpr> {
        match self {
            Stmt::Expr(s) => Some(s),
            _ => None,
        }
    }
}

/// An expression evaluated for its side effects.
#[derive(Debug, Clone)]
pub struct StmtExpr {
    pub value: Expr,
    pub range: TextRange,
}

/// `a = b = value`
#[derive(Debug, Clone)]
pub struct StmtAssign {
    pub targets: Vec<Expr>,
    pub value: Expr,
    pub range: TextRange,
}

/// `target: annotation = value`
#[derive(Debug, Clone)]
pub struct StmtAnnAssign {
    pub target: Expr,
    pub annotation: Expr,
    pub value: Option<Expr>,
    pub range: TextRange,
}

/// `target += value`
#[derive(Debug, Clone)]
pub struct StmtAugAssign {
    pub target: Expr,
    pub value: Expr,
    pub range: TextRange,
}

/// One imported name, with its optional `as` alias.
#[derive(Debug, Clone)]
pub struct Alias {
    /// Dotted name as written, e.g. `paramiko.client` or `*`.
    pub name: Identifier,
    pub asname: Option<Identifier>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtImport {
    pub names: Vec<Alias>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtImportFrom {
    /// Module path without leading dots; `None` for `from . import x`.
    pub module: Option<Identifier>,
    pub names: Vec<Alias>,
    /// Number of leading dots.
    pub level: u32,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: Identifier,
    pub annotation: Option<Expr>,
    pub default: Option<Expr>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtFunctionDef {
    pub name: Identifier,
    pub decorators: Vec<Expr>,
    pub parameters: Vec<Parameter>,
    pub returns: Option<Expr>,
    pub body: Vec<Stmt>,
    pub is_async: bool,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtClassDef {
    pub name: Identifier,
    pub decorators: Vec<Expr>,
    pub arguments: Option<Arguments>,
    pub body: Vec<Stmt>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtIf {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub elif_else_clauses: Vec<ElifElseClause>,
    pub range: TextRange,
}

/// `elif test:` (with a test) or `else:` (without).
#[derive(Debug, Clone)]
pub struct ElifElseClause {
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtFor {
    pub target: Expr,
    pub iter: Expr,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtWhile {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub orelse: Vec<Stmt>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct WithItem {
    pub context_expr: Expr,
    pub optional_vars: Option<Expr>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtWith {
    pub items: Vec<WithItem>,
    pub body: Vec<Stmt>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct ExceptHandler {
    pub type_: Option<Expr>,
    pub name: Option<Identifier>,
    pub body: Vec<Stmt>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtTry {
    pub body: Vec<Stmt>,
    pub handlers: Vec<ExceptHandler>,
    pub orelse: Vec<Stmt>,
    pub finalbody: Vec<Stmt>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtReturn {
    pub value: Option<Expr>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtDelete {
    pub targets: Vec<Expr>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtGlobal {
    pub names: Vec<Identifier>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct StmtNonlocal {
    pub names: Vec<Identifier>,
    pub range: TextRange,
}

/// Any other statement (`raise`, `assert`, `match`, ...).
#[derive(Debug, Clone)]
pub struct StmtOther {
    pub kind: &'static str,
    pub exprs: Vec<Expr>,
    pub bodies: Vec<Vec<Stmt>>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Name(ExprName),
    Attribute(ExprAttribute),
    Call(ExprCall),
    Starred(ExprStarred),
    Named(ExprNamed),
    NoneLiteral(TextRange),
    BooleanLiteral(ExprBooleanLiteral),
    NumberLiteral(ExprLiteral),
    StringLiteral(ExprLiteral),
    Other(ExprOther),
}

impl Expr {
    pub fn range(&self) -> TextRange {
        match self {
            Expr::Name(e) => e.range,
            Expr::Attribute(e) => e.range,
            Expr::Call(e) => e.range,
            Expr::Starred(e) => e.range,
            Expr::Named(e) => e.range,
            Expr::NoneLiteral(range) => *range,
            Expr::BooleanLiteral(e) => e.range,
            Expr::NumberLiteral(e) => e.range,
            Expr::StringLiteral(e) => e.range,
            Expr::Other(e) => e.range,
        }
    }

    pub fn as_name_expr(&self) -> Option<&ExprName> {
        match self {
            Expr::Name(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_call_expr(&self) -> Option<&ExprCall> {
        match self {
            Expr::Call(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_starred_expr(&self) -> bool {
        matches!(self, Expr::Starred(_))
    }
}

#[derive(Debug, Clone)]
pub struct ExprName {
    pub id: String,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct ExprAttribute {
    pub value: Box<Expr>,
    pub attr: Identifier,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct ExprCall {
    pub func: Box<Expr>,
    pub arguments: Arguments,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct ExprStarred {
    pub value: Box<Expr>,
    pub range: TextRange,
}

/// `target := value`
#[derive(Debug, Clone)]
pub struct ExprNamed {
    pub target: Box<Expr>,
    pub value: Box<Expr>,
    pub range: TextRange,
}

#[derive(Debug, Clone)]
pub struct ExprBooleanLiteral {
    pub value: bool,
    pub range: TextRange,
}

/// Number or string literal, kept as source text.
#[derive(Debug, Clone)]
pub struct ExprLiteral {
    pub text: String,
    pub range: TextRange,
}

/// Any other expression; `kind` is the grammar node kind.
#[derive(Debug, Clone)]
pub struct ExprOther {
    pub kind: &'static str,
    pub children: Vec<Expr>,
    pub range: TextRange,
}

/// Call arguments in source order.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    /// Positional arguments, including `*args` as `Expr::Starred`.
    pub args: Vec<Expr>,
    pub keywords: Vec<Keyword>,
    pub range: TextRange,
}

impl Arguments {
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.keywords.is_empty()
    }

    pub fn find_keyword(&self, name: &str) -> Option<&Keyword> {
        self.keywords
            .iter()
            .find(|keyword| keyword.arg.as_ref().is_some_and(|arg| arg.as_str() == name))
    }

    /// Positional argument at `position`, stopping at the first `*args`.
    pub fn find_positional(&self, position: usize) -> Option<&Expr> {
        self.args
            .iter()
            .take_while(|expr| !expr.is_starred_expr())
            .nth(position)
    }

    /// The argument bound to parameter `name` at `position`, keyword first.
    pub fn find_argument(&self, name: &str, position: usize) -> Option<&Expr> {
        self.find_keyword(name)
            .map(|keyword| &keyword.value)
            .or_else(|| self.find_positional(position))
    }
}

/// `name=value`, or `**value` when `arg` is `None`.
#[derive(Debug, Clone)]
pub struct Keyword {
    pub arg: Option<Identifier>,
    pub value: Expr,
    pub range: TextRange,
}
