// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Expr;

/// Dotted segments of a name or attribute chain, e.g. `a.b.c` -> `["a", "b", "c"]`.
///
/// Returns `None` when the chain is rooted in anything but a plain name.
pub fn collect_call_path(expr: &Expr) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    let mut current = expr;
    loop {
        match current {
            Expr::Attribute(attribute) => {
                segments.push(attribute.attr.as_str());
                current = &attribute.value;
            }
            Expr::Name(name) => {
                segments.push(name.id.as_str());
                segments.reverse();
                return Some(segments);
            }
            _ => return None,
        }
    }
}

pub fn is_const_none(expr: &Expr) -> bool {
    matches!(expr, Expr::NoneLiteral(_))
}

/// The callee of a call, or the expression itself.
///
/// `AutoAddPolicy()` and `AutoAddPolicy` both map to the `AutoAddPolicy` name.
pub fn map_callable(expr: &Expr) -> &Expr {
    match expr {
        Expr::Call(call) => call.func.as_ref(),
        _ => expr,
    }
}
