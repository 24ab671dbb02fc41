use crate::parser::{Node, OtherKind, SourceTree};
use crate::patcher::recorder::PendingEdit;

/// Computes where a new import statement goes and the text to insert.
///
/// The statement lands right after the last top-level import. Without
/// imports it goes after a leading `'use strict'` directive, or at offset 0.
/// No deduplication is attempted: the same statement staged twice is
/// inserted twice.
pub fn import_insertion(tree: &SourceTree, import_statement: &str) -> PendingEdit {
    let clean_stmt = import_statement.trim();

    if let Some(last) = tree.imports().last() {
        return PendingEdit::new(last.span.end, format!("\n{}", clean_stmt));
    }

    match use_strict_end(tree) {
        Some(end) => PendingEdit::new(end, format!("\n{}", clean_stmt)),
        None => PendingEdit::new(0, format!("{}\n", clean_stmt)),
    }
}

fn use_strict_end(tree: &SourceTree) -> Option<usize> {
    let first = tree.items().first()?;
    let is_directive = first.children().first().is_some_and(|child| {
        matches!(child.other_kind(), Some(OtherKind::StringLiteral(s)) if s == "use strict")
    });
    match first {
        Node::Other(stmt) if is_directive => Some(stmt.span.end),
        _ => None,
    }
}
