#![deny(missing_docs)]

//! # Collaborator Interfaces
//!
//! Steps the orchestrator delegates: writing new files from templates,
//! generating the companion component and fixing lint in generated code.

use crate::error::AppResult;
use crate::options::RoutingScope;
use crate::patcher::FileStore;

/// Everything the module templates need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTemplate {
    /// Leaf name of the module (`widget`).
    pub name: String,
    /// Directory the files are written to.
    pub directory: String,
    /// Also emit `<name>-routing.module.ts`.
    pub routing_file: bool,
    /// Scope used by the routing module.
    pub routing_scope: RoutingScope,
    /// The module is lazily routed.
    pub lazy_route: bool,
    /// The lazy route host is a separate routing descriptor.
    pub lazy_route_with_routing_module: bool,
}

/// Options of the companion component generated for lazy modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionOptions {
    /// Leaf name, shared with the module.
    pub name: String,
    /// Directory the module is generated in.
    pub path: String,
    /// Owning project.
    pub project: Option<String>,
    /// Module file the component belongs to, relative to `path`.
    pub module: Option<String>,
    /// Generate without a dedicated folder.
    pub flat: bool,
    /// Do not register the component in `module`.
    pub skip_import: bool,
    /// Selector prefix.
    pub prefix: String,
}

/// Writes new files for a generation run.
pub trait Scaffolder {
    /// Writes the module files described by `template`. Returns the created paths.
    fn apply_template(&self, store: &mut dyn FileStore, template: &ModuleTemplate) -> AppResult<Vec<String>>;

    /// Generates the companion component. Returns the created paths.
    fn generate_companion(&self, store: &mut dyn FileStore, options: &CompanionOptions) -> AppResult<Vec<String>>;
}

/// Fixes lint issues in generated code.
pub trait LintFixer {
    /// Runs the fixer over everything under the workspace directory `path`.
    fn fix(&self, path: &str) -> AppResult<()>;
}
