use crate::parser::{Node, SourceTree};
use crate::patcher::common::{decorator_metadata, list_separator, object_property};
use crate::patcher::recorder::PendingEdit;

/// Computes the insert that lists `symbol` in an `@NgModule` metadata array
/// such as `imports` or `declarations`.
///
/// - Existing array: appended after the last element, or placed inside `[]`.
/// - Missing property: `<property>: [Symbol]` is added to the metadata object.
///
/// Returns `None` when the file has no `@NgModule({...})` decorator or when the
/// property is not an array literal (e.g. a shared constant).
pub fn ng_module_symbol(tree: &SourceTree, property: &str, symbol: &str) -> Option<PendingEdit> {
    let source = tree.text();
    let metadata = decorator_metadata(tree, "NgModule")?;

    let Some(prop) = object_property(metadata, property) else {
        return Some(add_property(source, metadata, property, symbol));
    };

    let array = prop.children().first().and_then(Node::as_array)?;

    let edit = match array.elements.last() {
        Some(last) => PendingEdit::new(
            last.span().end,
            format!("{}{}", list_separator(source, last), symbol),
        ),
        None => PendingEdit::new(array.close_bracket, symbol),
    };
    Some(edit)
}

fn add_property(source: &str, object: &Node, property: &str, symbol: &str) -> PendingEdit {
    let entry = format!("{}: [{}]", property, symbol);

    match object.children().last() {
        Some(last) => PendingEdit::new(
            last.span().end,
            format!("{}{}", list_separator(source, last), entry),
        ),
        // `{}`: the closing brace is the last byte of the object.
        None => PendingEdit::new(
            object.span().end.saturating_sub(1),
            format!(" {} ", entry),
        ),
    }
}
