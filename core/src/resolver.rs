#![deny(missing_docs)]

//! # Module Resolution
//!
//! Finds the descriptor an explicit `module` option refers to, and the
//! optional `-routing` sibling of a descriptor.

use crate::error::{AppError, AppResult};
use crate::paths;
use crate::patcher::FileStore;
use indexmap::IndexSet;

/// Extension of module descriptors.
pub const MODULE_EXT: &str = ".module.ts";

/// Suffix that names a routing descriptor.
pub const ROUTING_SUFFIX: &str = "-routing";

/// What to resolve and where to look.
#[derive(Debug, Clone, Copy)]
pub struct ModuleQuery<'a> {
    /// Module identifier as given by the user (`app`, `app.module.ts`, `admin/admin`).
    pub module: &'a str,
    /// Directory the generation runs in.
    pub path: &'a str,
    /// Raw name of the generated unit.
    pub name: &'a str,
}

/// Resolves a module identifier to an existing descriptor.
///
/// Searches the generation directory, every ancestor of `<path>/<module>` and
/// every ancestor of `<path>/<name>`, deepest first. In each directory the
/// identifier is tried as-is, with `.ts` and with `.module.ts`.
pub fn resolve_module(store: &(impl FileStore + ?Sized), query: ModuleQuery<'_>) -> AppResult<String> {
    let module_path = paths::normalize(&format!("/{}/{}", query.path, query.module));
    let component_path = paths::normalize(&format!("/{}/{}", query.path, query.name));
    let module_base = paths::basename(&module_path);

    let mut candidates: IndexSet<String> = IndexSet::new();
    let search_root = if query.path.is_empty() { "/" } else { query.path };
    candidates.insert(paths::normalize(&format!("/{}", search_root)));
    candidates.extend(paths::ancestors(&module_path));
    candidates.extend(paths::ancestors(&component_path));

    let mut dirs: Vec<String> = candidates.into_iter().collect();
    dirs.sort_by(|a, b| b.len().cmp(&a.len()));

    for dir in &dirs {
        let files = [
            dir.clone(),
            paths::join(dir, &format!("{}.ts", module_base)),
            paths::join(dir, &format!("{}{}", module_base, MODULE_EXT)),
        ];
        if let Some(found) = files.into_iter().find(|f| store.exists(f)) {
            tracing::debug!(module = query.module, resolved = %found, "resolved module");
            return Ok(found);
        }
    }

    Err(AppError::ModuleResolution(format!(
        "Specified module '{}' does not exist.\nLooked in the following directories:\n    {}",
        query.module,
        dirs.join("\n    ")
    )))
}

/// Derives the identifier of a descriptor's routing sibling.
///
/// Everything from the first `.` of the base name is dropped and `-routing`
/// appended: `app.module.ts` -> `app-routing`.
pub fn routing_sibling_identifier(module_path: &str) -> String {
    let base = paths::basename(module_path);
    let stem = base.split('.').next().unwrap_or_default();
    format!("{}{}", stem, ROUTING_SUFFIX)
}

/// Looks up the routing sibling of a resolved descriptor.
///
/// A missing sibling is not an error; callers fall back to the descriptor itself.
pub fn resolve_routing_sibling(store: &(impl FileStore + ?Sized), module_path: &str, name: &str) -> Option<String> {
    let identifier = routing_sibling_identifier(module_path);
    let dir = paths::dirname(module_path);

    let resolved = resolve_module(
        store,
        ModuleQuery {
            module: &identifier,
            path: &dir,
            name,
        },
    );

    if let Err(e) = &resolved {
        tracing::debug!(identifier = %identifier, error = %e, "no routing sibling");
    }
    resolved.ok()
}
