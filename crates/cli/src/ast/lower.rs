// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lowering of the tree-sitter concrete syntax tree into the owned AST.
//!
//! Parsing is error-tolerant in tree-sitter; we are not. A tree that
//! contains an `ERROR` or missing node is reported as a syntax error at the
//! first such node, and nothing is lowered.

use tree_sitter::{Node, Parser};

use super::{
    Alias, Arguments, ElifElseClause, ExceptHandler, Expr, ExprAttribute, ExprBooleanLiteral,
    ExprCall, ExprLiteral, ExprName, ExprNamed, ExprOther, ExprStarred, Identifier, Keyword,
    ModModule, Parameter, Stmt, StmtAnnAssign, StmtAssign, StmtAugAssign, StmtClassDef,
    StmtDelete, StmtExpr, StmtFor, StmtFunctionDef, StmtGlobal, StmtIf, StmtImport,
    StmtImportFrom, StmtNonlocal, StmtOther, StmtReturn, StmtTry, StmtWhile, StmtWith, WithItem,
};
use crate::source::TextRange;

/// A file that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

/// Parse Python source into a module.
pub fn parse_module(source: &str) -> Result<ModModule, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| ParseError {
            message: format!("failed to load Python grammar: {e}"),
            range: TextRange::empty(0),
        })?;

    let tree = parser.parse(source, None).ok_or_else(|| ParseError {
        message: "parser returned no tree".to_string(),
        range: TextRange::empty(0),
    })?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(match first_error(root) {
            Some(node) => syntax_error(node, source),
            None => ParseError {
                message: "invalid syntax".to_string(),
                range: TextRange::empty(0),
            },
        });
    }

    let lowerer = Lowerer { source };
    Ok(ModModule {
        body: lowerer.suite(root),
        range: range(root),
    })
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

fn syntax_error(node: Node<'_>, source: &str) -> ParseError {
    let message = if node.is_missing() {
        format!("Expected `{}`", node.kind())
    } else {
        let text = source
            .get(node.start_byte()..node.end_byte())
            .and_then(|text| text.split_whitespace().next())
            .unwrap_or_default();
        if text.is_empty() {
            "Unexpected end of input".to_string()
        } else {
            format!("Unexpected token `{text}`")
        }
    };
    ParseError {
        message,
        range: range(node),
    }
}

fn range(node: Node<'_>) -> TextRange {
    TextRange::new(node.start_byte() as u32, node.end_byte() as u32)
}

/// Named children, minus comments and other extras.
fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

struct Lowerer<'src> {
    source: &'src str,
}

impl Lowerer<'_> {
    fn text(&self, node: Node<'_>) -> &str {
        self.source
            .get(node.start_byte()..node.end_byte())
            .unwrap_or_default()
    }

    fn identifier(&self, node: Node<'_>) -> Identifier {
        Identifier {
            id: self.text(node).to_string(),
            range: range(node),
        }
    }

    /// Statements of a module or block.
    fn suite(&self, node: Node<'_>) -> Vec<Stmt> {
        named_children(node)
            .into_iter()
            .map(|child| self.stmt(child))
            .collect()
    }

    fn field_suite(&self, node: Node<'_>, field: &str) -> Vec<Stmt> {
        node.child_by_field_name(field)
            .map(|body| self.suite(body))
            .unwrap_or_default()
    }

    fn stmt(&self, node: Node<'_>) -> Stmt {
        let lowered = match node.kind() {
            "expression_statement" => self.expression_statement(node),
            "import_statement" => Some(self.import(node)),
            "import_from_statement" => self.import_from(node),
            "future_import_statement" => Some(self.future_import(node)),
            "function_definition" => self.function_def(node, Vec::new(), range(node)),
            "class_definition" => self.class_def(node, Vec::new(), range(node)),
            "decorated_definition" => self.decorated(node),
            "if_statement" => self.if_stmt(node),
            "for_statement" => self.for_stmt(node),
            "while_statement" => self.while_stmt(node),
            "with_statement" => Some(self.with_stmt(node)),
            "try_statement" => Some(self.try_stmt(node)),
            "return_statement" => Some(Stmt::Return(StmtReturn {
                value: named_children(node).first().map(|value| self.expr(*value)),
                range: range(node),
            })),
            "delete_statement" => Some(self.delete(node)),
            "global_statement" => Some(Stmt::Global(StmtGlobal {
                names: self.declared_names(node),
                range: range(node),
            })),
            "nonlocal_statement" => Some(Stmt::Nonlocal(StmtNonlocal {
                names: self.declared_names(node),
                range: range(node),
            })),
            "pass_statement" => Some(Stmt::Pass(range(node))),
            _ => None,
        };
        lowered.unwrap_or_else(|| self.other_stmt(node))
    }

    fn other_stmt(&self, node: Node<'_>) -> Stmt {
        let mut other = StmtOther {
            kind: node.kind(),
            exprs: Vec::new(),
            bodies: Vec::new(),
            range: range(node),
        };
        self.collect_other(node, &mut other);
        Stmt::Other(other)
    }

    fn collect_other(&self, node: Node<'_>, other: &mut StmtOther) {
        for child in named_children(node) {
            let kind = child.kind();
            if kind == "block" {
                other.bodies.push(self.suite(child));
            } else if kind.ends_with("_clause") {
                self.collect_other(child, other);
            } else {
                other.exprs.push(self.expr(child));
            }
        }
    }

    fn expression_statement(&self, node: Node<'_>) -> Option<Stmt> {
        let children = named_children(node);
        let stmt_range = range(node);
        match children.as_slice() {
            [child] if child.kind() == "assignment" => self.assignment(*child, stmt_range),
            [child] if child.kind() == "augmented_assignment" => {
                Some(Stmt::AugAssign(StmtAugAssign {
                    target: self.expr(child.child_by_field_name("left")?),
                    value: self.expr(child.child_by_field_name("right")?),
                    range: stmt_range,
                }))
            }
            [child] => Some(Stmt::Expr(StmtExpr {
                value: self.expr(*child),
                range: stmt_range,
            })),
            _ => Some(Stmt::Expr(StmtExpr {
                value: Expr::Other(ExprOther {
                    kind: "tuple",
                    children: children.iter().map(|child| self.expr(*child)).collect(),
                    range: stmt_range,
                }),
                range: stmt_range,
            })),
        }
    }

    fn assignment(&self, node: Node<'_>, stmt_range: TextRange) -> Option<Stmt> {
        let left = node.child_by_field_name("left")?;

        if let Some(annotation) = node.child_by_field_name("type") {
            return Some(Stmt::AnnAssign(StmtAnnAssign {
                target: self.expr(left),
                annotation: self.expr(annotation),
                value: node.child_by_field_name("right").map(|v| self.expr(v)),
                range: stmt_range,
            }));
        }

        // `a = b = value` nests the second assignment as the right-hand side.
        let mut targets = vec![self.expr(left)];
        let mut value = node.child_by_field_name("right")?;
        while value.kind() == "assignment" && value.child_by_field_name("type").is_none() {
            targets.push(self.expr(value.child_by_field_name("left")?));
            value = value.child_by_field_name("right")?;
        }

        Some(Stmt::Assign(StmtAssign {
            targets,
            value: self.expr(value),
            range: stmt_range,
        }))
    }

    fn alias(&self, node: Node<'_>) -> Alias {
        if node.kind() == "aliased_import" {
            let name = node
                .child_by_field_name("name")
                .map(|n| self.identifier(n))
                .unwrap_or_else(|| self.identifier(node));
            let asname = node
                .child_by_field_name("alias")
                .map(|n| self.identifier(n));
            Alias {
                name,
                asname,
                range: range(node),
            }
        } else {
            Alias {
                name: self.identifier(node),
                asname: None,
                range: range(node),
            }
        }
    }

    fn import(&self, node: Node<'_>) -> Stmt {
        Stmt::Import(StmtImport {
            names: field_children(node, "name")
                .into_iter()
                .map(|n| self.alias(n))
                .collect(),
            range: range(node),
        })
    }

    fn future_import(&self, node: Node<'_>) -> Stmt {
        Stmt::ImportFrom(StmtImportFrom {
            module: Some(Identifier {
                id: "__future__".to_string(),
                range: range(node),
            }),
            names: field_children(node, "name")
                .into_iter()
                .map(|n| self.alias(n))
                .collect(),
            level: 0,
            range: range(node),
        })
    }

    fn import_from(&self, node: Node<'_>) -> Option<Stmt> {
        let module_node = node.child_by_field_name("module_name")?;
        let (module, level) = if module_node.kind() == "relative_import" {
            let mut level = 0;
            let mut module = None;
            for child in named_children(module_node) {
                match child.kind() {
                    "import_prefix" => {
                        level = self.text(child).chars().filter(|c| *c == '.').count() as u32;
                    }
                    "dotted_name" => module = Some(self.identifier(child)),
                    _ => {}
                }
            }
            (module, level)
        } else {
            (Some(self.identifier(module_node)), 0)
        };

        let mut names: Vec<Alias> = field_children(node, "name")
            .into_iter()
            .map(|n| self.alias(n))
            .collect();
        if let Some(wildcard) = named_children(node)
            .into_iter()
            .find(|child| child.kind() == "wildcard_import")
        {
            names.push(Alias {
                name: self.identifier(wildcard),
                asname: None,
                range: range(wildcard),
            });
        }

        Some(Stmt::ImportFrom(StmtImportFrom {
            module,
            names,
            level,
            range: range(node),
        }))
    }

    fn decorated(&self, node: Node<'_>) -> Option<Stmt> {
        let decorators = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "decorator")
            .filter_map(|decorator| named_children(decorator).first().map(|e| self.expr(*e)))
            .collect();
        let definition = node.child_by_field_name("definition")?;
        match definition.kind() {
            "function_definition" => self.function_def(definition, decorators, range(node)),
            "class_definition" => self.class_def(definition, decorators, range(node)),
            _ => None,
        }
    }

    fn function_def(
        &self,
        node: Node<'_>,
        decorators: Vec<Expr>,
        stmt_range: TextRange,
    ) -> Option<Stmt> {
        let name = self.identifier(node.child_by_field_name("name")?);
        let parameters = node
            .child_by_field_name("parameters")
            .map(|params| {
                named_children(params)
                    .into_iter()
                    .filter_map(|param| self.parameter(param))
                    .collect()
            })
            .unwrap_or_default();

        Some(Stmt::FunctionDef(StmtFunctionDef {
            name,
            decorators,
            parameters,
            returns: node.child_by_field_name("return_type").map(|r| self.expr(r)),
            body: self.field_suite(node, "body"),
            is_async: self.text(node).starts_with("async"),
            range: stmt_range,
        }))
    }

    fn parameter(&self, node: Node<'_>) -> Option<Parameter> {
        let (name_node, annotation, default) = match node.kind() {
            "identifier" => (Some(node), None, None),
            "typed_parameter" => (
                named_children(node).first().copied(),
                node.child_by_field_name("type"),
                None,
            ),
            "default_parameter" | "typed_default_parameter" => (
                node.child_by_field_name("name"),
                node.child_by_field_name("type"),
                node.child_by_field_name("value"),
            ),
            "list_splat_pattern" | "dictionary_splat_pattern" => (Some(node), None, None),
            _ => return None,
        };

        Some(Parameter {
            name: self.parameter_name(name_node?)?,
            annotation: annotation.map(|a| self.expr(a)),
            default: default.map(|d| self.expr(d)),
            range: range(node),
        })
    }

    /// The identifier inside `x`, `*x` or `**x`.
    fn parameter_name(&self, node: Node<'_>) -> Option<Identifier> {
        if node.kind() == "identifier" {
            return Some(self.identifier(node));
        }
        named_children(node)
            .into_iter()
            .find_map(|child| self.parameter_name(child))
    }

    fn class_def(
        &self,
        node: Node<'_>,
        decorators: Vec<Expr>,
        stmt_range: TextRange,
    ) -> Option<Stmt> {
        Some(Stmt::ClassDef(StmtClassDef {
            name: self.identifier(node.child_by_field_name("name")?),
            decorators,
            arguments: node
                .child_by_field_name("superclasses")
                .map(|args| self.arguments(args)),
            body: self.field_suite(node, "body"),
            range: stmt_range,
        }))
    }

    fn if_stmt(&self, node: Node<'_>) -> Option<Stmt> {
        let elif_else_clauses = field_children(node, "alternative")
            .into_iter()
            .map(|clause| match clause.kind() {
                "elif_clause" => ElifElseClause {
                    test: clause.child_by_field_name("condition").map(|c| self.expr(c)),
                    body: self.field_suite(clause, "consequence"),
                    range: range(clause),
                },
                _ => ElifElseClause {
                    test: None,
                    body: self.field_suite(clause, "body"),
                    range: range(clause),
                },
            })
            .collect();

        Some(Stmt::If(StmtIf {
            test: self.expr(node.child_by_field_name("condition")?),
            body: self.field_suite(node, "consequence"),
            elif_else_clauses,
            range: range(node),
        }))
    }

    fn else_body(&self, node: Node<'_>) -> Vec<Stmt> {
        node.child_by_field_name("alternative")
            .map(|clause| self.field_suite(clause, "body"))
            .unwrap_or_default()
    }

    fn for_stmt(&self, node: Node<'_>) -> Option<Stmt> {
        Some(Stmt::For(StmtFor {
            target: self.expr(node.child_by_field_name("left")?),
            iter: self.expr(node.child_by_field_name("right")?),
            body: self.field_suite(node, "body"),
            orelse: self.else_body(node),
            range: range(node),
        }))
    }

    fn while_stmt(&self, node: Node<'_>) -> Option<Stmt> {
        Some(Stmt::While(StmtWhile {
            test: self.expr(node.child_by_field_name("condition")?),
            body: self.field_suite(node, "body"),
            orelse: self.else_body(node),
            range: range(node),
        }))
    }

    fn with_stmt(&self, node: Node<'_>) -> Stmt {
        let items = named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "with_clause")
            .flat_map(named_children)
            .filter(|item| item.kind() == "with_item")
            .filter_map(|item| self.with_item(item))
            .collect();

        Stmt::With(StmtWith {
            items,
            body: self.field_suite(node, "body"),
            range: range(node),
        })
    }

    fn with_item(&self, node: Node<'_>) -> Option<WithItem> {
        let value = node.child_by_field_name("value")?;
        if value.kind() == "as_pattern" {
            let context = named_children(value).first().copied()?;
            let target = value.child_by_field_name("alias").and_then(|alias| {
                if alias.kind() == "as_pattern_target" {
                    named_children(alias).first().copied()
                } else {
                    Some(alias)
                }
            });
            return Some(WithItem {
                context_expr: self.expr(context),
                optional_vars: target.map(|t| self.expr(t)),
                range: range(node),
            });
        }
        Some(WithItem {
            context_expr: self.expr(value),
            optional_vars: None,
            range: range(node),
        })
    }

    fn try_stmt(&self, node: Node<'_>) -> Stmt {
        let mut handlers = Vec::new();
        let mut orelse = Vec::new();
        let mut finalbody = Vec::new();

        for child in named_children(node) {
            match child.kind() {
                "except_clause" | "except_group_clause" => handlers.push(self.handler(child)),
                "else_clause" => orelse = self.field_suite(child, "body"),
                "finally_clause" => {
                    if let Some(block) = named_children(child)
                        .into_iter()
                        .find(|n| n.kind() == "block")
                    {
                        finalbody = self.suite(block);
                    }
                }
                _ => {}
            }
        }

        Stmt::Try(StmtTry {
            body: self.field_suite(node, "body"),
            handlers,
            orelse,
            finalbody,
            range: range(node),
        })
    }

    fn handler(&self, node: Node<'_>) -> ExceptHandler {
        let mut handler = ExceptHandler {
            type_: None,
            name: None,
            body: Vec::new(),
            range: range(node),
        };

        for child in named_children(node) {
            match child.kind() {
                "block" => handler.body = self.suite(child),
                "as_pattern" => {
                    handler.type_ = named_children(child).first().map(|t| self.expr(*t));
                    handler.name = child
                        .child_by_field_name("alias")
                        .and_then(|alias| self.parameter_name(alias));
                }
                "identifier" if handler.type_.is_some() => {
                    handler.name = Some(self.identifier(child));
                }
                _ if handler.type_.is_none() => handler.type_ = Some(self.expr(child)),
                _ => {}
            }
        }

        handler
    }

    fn delete(&self, node: Node<'_>) -> Stmt {
        let targets = named_children(node)
            .into_iter()
            .flat_map(|child| {
                if child.kind() == "expression_list" {
                    named_children(child)
                } else {
                    vec![child]
                }
            })
            .map(|target| self.expr(target))
            .collect();
        Stmt::Delete(StmtDelete {
            targets,
            range: range(node),
        })
    }

    fn declared_names(&self, node: Node<'_>) -> Vec<Identifier> {
        named_children(node)
            .into_iter()
            .filter(|child| child.kind() == "identifier")
            .map(|child| self.identifier(child))
            .collect()
    }

    fn expr(&self, node: Node<'_>) -> Expr {
        match node.kind() {
            "identifier" => Expr::Name(ExprName {
                id: self.text(node).to_string(),
                range: range(node),
            }),
            "attribute" => {
                match (
                    node.child_by_field_name("object"),
                    node.child_by_field_name("attribute"),
                ) {
                    (Some(object), Some(attribute)) => Expr::Attribute(ExprAttribute {
                        value: Box::new(self.expr(object)),
                        attr: self.identifier(attribute),
                        range: range(node),
                    }),
                    _ => self.other_expr(node),
                }
            }
            "call" => match node.child_by_field_name("function") {
                Some(function) => {
                    let arguments = match node.child_by_field_name("arguments") {
                        Some(args) if args.kind() == "argument_list" => self.arguments(args),
                        Some(generator) => Arguments {
                            args: vec![self.expr(generator)],
                            keywords: Vec::new(),
                            range: range(generator),
                        },
                        None => Arguments::default(),
                    };
                    Expr::Call(ExprCall {
                        func: Box::new(self.expr(function)),
                        arguments,
                        range: range(node),
                    })
                }
                None => self.other_expr(node),
            },
            "parenthesized_expression" | "type" => match named_children(node).as_slice() {
                [inner] => self.expr(*inner),
                _ => self.other_expr(node),
            },
            "list_splat" => match named_children(node).first() {
                Some(value) => Expr::Starred(ExprStarred {
                    value: Box::new(self.expr(*value)),
                    range: range(node),
                }),
                None => self.other_expr(node),
            },
            "named_expression" => {
                match (
                    node.child_by_field_name("name"),
                    node.child_by_field_name("value"),
                ) {
                    (Some(target), Some(value)) => Expr::Named(ExprNamed {
                        target: Box::new(self.expr(target)),
                        value: Box::new(self.expr(value)),
                        range: range(node),
                    }),
                    _ => self.other_expr(node),
                }
            }
            "none" => Expr::NoneLiteral(range(node)),
            "true" | "false" => Expr::BooleanLiteral(ExprBooleanLiteral {
                value: node.kind() == "true",
                range: range(node),
            }),
            "integer" | "float" => Expr::NumberLiteral(ExprLiteral {
                text: self.text(node).to_string(),
                range: range(node),
            }),
            "string" | "concatenated_string" => self.string(node),
            _ => self.other_expr(node),
        }
    }

    fn other_expr(&self, node: Node<'_>) -> Expr {
        Expr::Other(ExprOther {
            kind: node.kind(),
            children: named_children(node)
                .into_iter()
                .map(|child| self.expr(child))
                .collect(),
            range: range(node),
        })
    }

    /// Plain strings become literals; f-strings keep their interpolated expressions.
    fn string(&self, node: Node<'_>) -> Expr {
        let mut interpolations = Vec::new();
        self.collect_interpolations(node, &mut interpolations);
        if interpolations.is_empty() {
            Expr::StringLiteral(ExprLiteral {
                text: self.text(node).to_string(),
                range: range(node),
            })
        } else {
            Expr::Other(ExprOther {
                kind: node.kind(),
                children: interpolations,
                range: range(node),
            })
        }
    }

    fn collect_interpolations(&self, node: Node<'_>, out: &mut Vec<Expr>) {
        for child in named_children(node) {
            match child.kind() {
                "interpolation" => {
                    if let Some(expression) = child
                        .child_by_field_name("expression")
                        .or_else(|| named_children(child).first().copied())
                    {
                        out.push(self.expr(expression));
                    }
                }
                "string" | "string_content" | "format_specifier" => {
                    self.collect_interpolations(child, out)
                }
                _ => {}
            }
        }
    }

    fn arguments(&self, node: Node<'_>) -> Arguments {
        let mut arguments = Arguments {
            args: Vec::new(),
            keywords: Vec::new(),
            range: range(node),
        };

        for child in named_children(node) {
            match child.kind() {
                "keyword_argument" => {
                    if let (Some(name), Some(value)) = (
                        child.child_by_field_name("name"),
                        child.child_by_field_name("value"),
                    ) {
                        arguments.keywords.push(Keyword {
                            arg: Some(self.identifier(name)),
                            value: self.expr(value),
                            range: range(child),
                        });
                    }
                }
                "dictionary_splat" => {
                    if let Some(value) = named_children(child).first() {
                        arguments.keywords.push(Keyword {
                            arg: None,
                            value: self.expr(*value),
                            range: range(child),
                        });
                    }
                }
                _ => arguments.args.push(self.expr(child)),
            }
        }

        arguments
    }
}

#[cfg(test)]
#[path = "lower_tests.rs"]
mod tests;
