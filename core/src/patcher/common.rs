use crate::parser::{Node, OtherKind, SourceTree};

/// Returns the line break and indentation that precede `offset`, when the
/// node at `offset` starts its own line.
///
/// `"[\n    Foo"` at the offset of `Foo` gives `"\n    "`. CRLF files keep their `\r`.
pub(crate) fn leading_line_break(source: &str, offset: usize) -> Option<String> {
    let before = &source[..offset];
    let indent_start = before
        .char_indices()
        .rev()
        .find(|&(_, c)| c != ' ' && c != '\t')
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);

    let indent = &before[indent_start..];
    let head = &before[..indent_start];

    if head.ends_with("\r\n") {
        Some(format!("\r\n{}", indent))
    } else if head.ends_with('\n') {
        Some(format!("\n{}", indent))
    } else {
        None
    }
}

/// Separator placed between the last element of a list and a new one.
///
/// Follows the layout of the last element: one per line, or inline.
pub(crate) fn list_separator(source: &str, last: &Node) -> String {
    match leading_line_break(source, last.span().start) {
        Some(brk) => format!(",{}", brk),
        None => ", ".to_string(),
    }
}

/// Finds the object literal passed to `@<decorator>(...)`.
pub(crate) fn decorator_metadata<'a>(tree: &'a SourceTree, decorator: &str) -> Option<&'a Node> {
    let deco = tree.descendants().find(
        |n| matches!(n.other_kind(), Some(OtherKind::Decorator(name)) if name == decorator),
    )?;

    deco.descendants()
        .find(|n| matches!(n.other_kind(), Some(OtherKind::ObjectLiteral)))
}

/// Finds `key: value` among the direct properties of an object literal.
pub(crate) fn object_property<'a>(object: &'a Node, key: &str) -> Option<&'a Node> {
    object
        .children()
        .iter()
        .find(|n| matches!(n.other_kind(), Some(OtherKind::Property(k)) if k == key))
}
