#![deny(missing_docs)]

//! # Structural Parser
//!
//! Parses TypeScript module descriptors with tree-sitter and lowers the
//! concrete syntax tree into the small typed tree in [`models`].
//!
//! The lowering keeps byte offsets intact, so every span points straight back
//! into the original text. Comments are dropped; error recovery nodes are kept
//! as opaque nodes so a half-edited file still yields its import list.

use crate::error::{AppError, AppResult};
use tree_sitter::Parser;

/// Typed tree definitions.
pub mod models;

pub use models::{ArrayLiteral, ImportDecl, Node, Other, OtherKind, SourceTree, Span};

/// Parses a descriptor into a [`SourceTree`].
pub fn parse_source(source: &str) -> AppResult<SourceTree> {
    let language: tree_sitter::Language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into();

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| AppError::Parse(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AppError::Parse("Failed to parse TypeScript source".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        tracing::warn!("source contains syntax errors, continuing with recovered tree");
    }

    let mut cursor = root.walk();
    let items = root
        .named_children(&mut cursor)
        .filter_map(|child| lower(child, source))
        .collect();

    Ok(SourceTree::new(source, items))
}

fn lower(node: tree_sitter::Node, source: &str) -> Option<Node> {
    if node.is_extra() {
        return None;
    }

    let span = Span::new(node.start_byte(), node.end_byte());

    let lowered = match node.kind() {
        "import_statement" => Node::ImportDecl(ImportDecl {
            span,
            source: node
                .child_by_field_name("source")
                .map(|s| unquote(text_of(s, source)))
                .unwrap_or_default(),
        }),
        "array" => {
            let close_bracket = closing_token(node, "]").unwrap_or(span.end.saturating_sub(1));
            Node::ArrayLiteral(ArrayLiteral {
                span,
                close_bracket,
                elements: lower_named_children(node, source),
            })
        }
        "decorator" => {
            let name = decorator_name(node, source);
            other(OtherKind::Decorator(name), span, lower_named_children(node, source))
        }
        "call_expression" => {
            let callee = node
                .child_by_field_name("function")
                .map(|f| text_of(f, source).to_string())
                .unwrap_or_default();
            let args = node
                .child_by_field_name("arguments")
                .map(|a| lower_named_children(a, source))
                .unwrap_or_default();
            other(OtherKind::Call(callee), span, args)
        }
        "lexical_declaration" | "variable_declaration" => other(
            OtherKind::Declaration,
            span,
            lower_named_children(node, source),
        ),
        "variable_declarator" => {
            let name = node
                .child_by_field_name("name")
                .map(|n| text_of(n, source).to_string())
                .unwrap_or_default();
            let value = node
                .child_by_field_name("value")
                .and_then(|v| lower(v, source))
                .into_iter()
                .collect();
            other(OtherKind::Binding(name), span, value)
        }
        "object" => other(
            OtherKind::ObjectLiteral,
            span,
            lower_named_children(node, source),
        ),
        "pair" => {
            let key = node
                .child_by_field_name("key")
                .map(|k| unquote(text_of(k, source)))
                .unwrap_or_default();
            let value = node
                .child_by_field_name("value")
                .and_then(|v| lower(v, source))
                .into_iter()
                .collect();
            other(OtherKind::Property(key), span, value)
        }
        "identifier" => other(
            OtherKind::Identifier(text_of(node, source).to_string()),
            span,
            Vec::new(),
        ),
        "string" => other(
            OtherKind::StringLiteral(unquote(text_of(node, source))),
            span,
            Vec::new(),
        ),
        _ => other(OtherKind::Opaque, span, lower_named_children(node, source)),
    };

    Some(lowered)
}

fn other(kind: OtherKind, span: Span, children: Vec<Node>) -> Node {
    Node::Other(Other {
        kind,
        span,
        children,
    })
}

fn lower_named_children(node: tree_sitter::Node, source: &str) -> Vec<Node> {
    let mut cursor = node.walk();
    let children: Vec<tree_sitter::Node> = node.named_children(&mut cursor).collect();
    children
        .into_iter()
        .filter_map(|child| lower(child, source))
        .collect()
}

fn closing_token(node: tree_sitter::Node, token: &str) -> Option<usize> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|c| !c.is_named() && c.kind() == token)
        .last()
        .map(|c| c.start_byte());
    found
}

/// `@NgModule({...})` -> `NgModule`, `@a.b.Input()` -> `a.b.Input`.
fn decorator_name(node: tree_sitter::Node, source: &str) -> String {
    let mut cursor = node.walk();
    let target = node.named_children(&mut cursor).find(|c| !c.is_extra());
    match target {
        Some(t) if t.kind() == "call_expression" => t
            .child_by_field_name("function")
            .map(|f| text_of(f, source).to_string())
            .unwrap_or_default(),
        Some(t) => text_of(t, source).to_string(),
        None => String::new(),
    }
}

fn text_of<'a>(node: tree_sitter::Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

fn unquote(text: &str) -> String {
    let trimmed = text.trim();
    let quoted = trimmed.len() >= 2
        && matches!(trimmed.as_bytes()[0], b'\'' | b'"' | b'`')
        && trimmed.as_bytes()[0] == trimmed.as_bytes()[trimmed.len() - 1];
    if quoted {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}
