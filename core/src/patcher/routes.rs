use crate::error::{AppError, AppResult};
use crate::parser::{ArrayLiteral, Node, OtherKind, SourceTree};
use crate::patcher::common::{decorator_metadata, list_separator, object_property};
use crate::patcher::recorder::PendingEdit;

/// Computes the insert that appends `route_literal` to the route table of a
/// module descriptor.
///
/// The route table is the first argument of the `RouterModule.forRoot(...)` /
/// `RouterModule.forChild(...)` call listed in `@NgModule({ imports })`. It is
/// either an inline array or an identifier bound to an array by a top-level
/// variable declaration.
///
/// The entry always goes last: before `]` when the table is empty, otherwise
/// after the final element using the table's own layout.
///
/// # Arguments
///
/// * `tree` - Parsed route host.
/// * `path` - Path of the route host (used in error messages).
/// * `route_literal` - Object literal text produced by the code generator.
pub fn route_insertion(tree: &SourceTree, path: &str, route_literal: &str) -> AppResult<PendingEdit> {
    let source = tree.text();
    let routes = find_route_table(tree, path)?;

    let edit = match routes.elements.last() {
        Some(last) => PendingEdit::new(
            last.span().end,
            format!("{}{}", list_separator(source, last), route_literal),
        ),
        None => PendingEdit::new(routes.close_bracket, route_literal),
    };

    Ok(edit)
}

fn find_route_table<'a>(tree: &'a SourceTree, path: &str) -> AppResult<&'a ArrayLiteral> {
    let not_found = |reason: &str| AppError::RouteHostNotFound {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let metadata =
        decorator_metadata(tree, "NgModule").ok_or_else(|| not_found("no @NgModule metadata"))?;

    let imports = object_property(metadata, "imports")
        .and_then(|prop| prop.children().first())
        .and_then(Node::as_array)
        .ok_or_else(|| not_found("no imports array in @NgModule"))?;

    let router_call = imports
        .elements
        .iter()
        .find(|el| matches!(el.other_kind(), Some(OtherKind::Call(callee)) if is_router_call(callee)))
        .ok_or_else(|| not_found("no RouterModule call in @NgModule imports"))?;

    let argument = router_call
        .children()
        .first()
        .ok_or_else(|| not_found("RouterModule call has no arguments"))?;

    match argument {
        Node::ArrayLiteral(arr) => Ok(arr),
        Node::Other(other) => match &other.kind {
            OtherKind::Identifier(name) => bound_array(tree, name).ok_or_else(|| {
                not_found(&format!("no route array is bound to '{}'", name))
            }),
            _ => Err(not_found("RouterModule argument is not a route array")),
        },
        Node::ImportDecl(_) => Err(not_found("RouterModule argument is not a route array")),
    }
}

fn is_router_call(callee: &str) -> bool {
    matches!(callee, "RouterModule.forRoot" | "RouterModule.forChild")
}

/// First array literal inside the top-level declaration of `name`.
///
/// Declarations nested in functions or blocks are not considered.
fn bound_array<'a>(tree: &'a SourceTree, name: &str) -> Option<&'a ArrayLiteral> {
    tree.items()
        .iter()
        .flat_map(top_level_bindings)
        .find(|n| matches!(n.other_kind(), Some(OtherKind::Binding(b)) if b == name))
        .and_then(|binding| binding.descendants().find_map(Node::as_array))
}

/// Bindings declared directly by a top-level item, including `export const`.
fn top_level_bindings(item: &Node) -> Vec<&Node> {
    let is_declaration = |n: &Node| matches!(n.other_kind(), Some(OtherKind::Declaration));

    if is_declaration(item) {
        return item.children().iter().collect();
    }
    match item.other_kind() {
        Some(OtherKind::Opaque) => item
            .children()
            .iter()
            .filter(|child| is_declaration(*child))
            .flat_map(|decl| decl.children())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;

    const ENTRY: &str = "{ path: 'widgets', loadChildren: './widget/widget.module#WidgetModule' }";

    fn patched(source: &str) -> AppResult<String> {
        let tree = parse_source(source)?;
        let edit = route_insertion(&tree, "/app-routing.module.ts", ENTRY)?;
        let mut out = source.to_string();
        out.insert_str(edit.offset, &edit.text);
        Ok(out)
    }

    #[test]
    fn test_empty_bound_table() {
        let code = r#"import { NgModule } from '@angular/core';
import { Routes, RouterModule } from '@angular/router';

const routes: Routes = [];

@NgModule({
  imports: [RouterModule.forRoot(routes)],
  exports: [RouterModule]
})
export class AppRoutingModule { }
"#;
        let out = patched(code).unwrap();
        assert!(out.contains(&format!("const routes: Routes = [{}];", ENTRY)));
    }

    #[test]
    fn test_append_multiline_table() {
        let code = r#"const routes: Routes = [
  { path: 'home', component: HomeComponent }
];

@NgModule({
  imports: [RouterModule.forChild(routes)],
})
export class FeatureRoutingModule { }
"#;
        let out = patched(code).unwrap();
        let entry_line = format!("  {}", ENTRY);
        assert_eq!(
            out.lines().take(4).collect::<Vec<_>>(),
            vec![
                "const routes: Routes = [",
                "  { path: 'home', component: HomeComponent },",
                entry_line.as_str(),
                "];",
            ]
        );
    }

    #[test]
    fn test_appends_after_wildcard() {
        let code = "const routes: Routes = [{ path: '**', component: NotFound }];\n@NgModule({ imports: [RouterModule.forRoot(routes)] })\nexport class R {}\n";
        let out = patched(code).unwrap();
        assert!(out.contains(&format!(
            "[{{ path: '**', component: NotFound }}, {}]",
            ENTRY
        )));
    }

    #[test]
    fn test_inline_table() {
        let code = "@NgModule({\n  imports: [\n    BrowserModule,\n    RouterModule.forRoot([])\n  ]\n})\nexport class AppModule { }\n";
        let out = patched(code).unwrap();
        assert!(out.contains(&format!("RouterModule.forRoot([{}])", ENTRY)));
    }

    #[test]
    fn test_exported_binding() {
        let code = "export const routes: Routes = [\n  { path: '' }\n];\n@NgModule({ imports: [RouterModule.forChild(routes)] })\nexport class R {}\n";
        let out = patched(code).unwrap();
        assert!(out.contains(&format!("{{ path: '' }},\n  {}\n];", ENTRY)));
    }

    #[test]
    fn test_nested_binding_is_ignored() {
        let code = "function legacy() {\n  const routes = [{ path: 'old' }];\n  return routes;\n}\nconst routes: Routes = [];\n@NgModule({ imports: [RouterModule.forRoot(routes)] })\nexport class R {}\n";
        let out = patched(code).unwrap();
        assert!(out.contains("  const routes = [{ path: 'old' }];\n"));
        assert!(out.contains(&format!("const routes: Routes = [{}];", ENTRY)));
    }

    #[test]
    fn test_only_nested_binding_is_not_found() {
        let code = "function legacy() {\n  const routes = [];\n}\n@NgModule({ imports: [RouterModule.forRoot(routes)] })\nexport class R {}\n";
        let err = patched(code).unwrap_err();
        assert!(matches!(err, AppError::RouteHostNotFound { .. }));
    }

    #[test]
    fn test_router_like_callee_is_rejected() {
        let code = "const routes = [];\n@NgModule({ imports: [RouterModuleFoo.forRoot(routes)] })\nexport class R {}\n";
        let err = patched(code).unwrap_err();
        assert!(err.to_string().contains("no RouterModule call"));
    }

    #[test]
    fn test_missing_router_call() {
        let code = "@NgModule({ imports: [BrowserModule] })\nexport class AppModule { }\n";
        let err = patched(code).unwrap_err();
        assert!(matches!(err, AppError::RouteHostNotFound { .. }));
        assert!(err.to_string().contains("no RouterModule call"));
    }

    #[test]
    fn test_unbound_identifier() {
        let code = "@NgModule({ imports: [RouterModule.forRoot(routes)] })\nexport class AppModule { }\n";
        let err = patched(code).unwrap_err();
        assert!(err.to_string().contains("no route array is bound to 'routes'"));
    }
}
