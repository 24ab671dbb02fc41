#![deny(missing_docs)]

//! # Code Generation
//!
//! Builds the literal text inserted into descriptors: import statements and
//! lazy route entries. Output is deterministic for identical inputs.

/// How a lazily loaded route references its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderStyle {
    /// `() => import('./x/x.module').then(m => m.XModule)`
    DynamicImport,
    /// `'./x/x.module#XModule'`
    StringReference,
}

impl LoaderStyle {
    /// Picks the loader style from the project's advanced compilation flag.
    pub fn from_advanced_compilation(enabled: bool) -> Self {
        if enabled {
            LoaderStyle::DynamicImport
        } else {
            LoaderStyle::StringReference
        }
    }
}

/// Generates a named import statement.
///
/// e.g. `import { WidgetModule } from './widget/widget.module';`
pub fn import_statement(symbol: &str, module_path: &str) -> String {
    format!("import {{ {} }} from '{}';", symbol, module_path)
}

/// Generates the `loadChildren` value for a lazy route.
pub fn loader_expression(module_path: &str, symbol: &str, style: LoaderStyle) -> String {
    match style {
        LoaderStyle::DynamicImport => {
            format!("() => import('{}').then(m => m.{})", module_path, symbol)
        }
        LoaderStyle::StringReference => format!("'{}#{}'", module_path, symbol),
    }
}

/// Generates a route object literal for a lazily loaded module.
///
/// # Arguments
///
/// * `route` - URL segment (e.g. `widgets`).
/// * `module_path` - Import specifier of the module, relative to the route host.
/// * `symbol` - Exported module class (e.g. `WidgetModule`).
/// * `style` - Loader text shape.
pub fn route_entry(route: &str, module_path: &str, symbol: &str, style: LoaderStyle) -> String {
    format!(
        "{{ path: '{}', loadChildren: {} }}",
        route,
        loader_expression(module_path, symbol, style)
    )
}
