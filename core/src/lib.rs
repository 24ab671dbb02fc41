#![deny(missing_docs)]

//! # Modpatch Core
//!
//! Core library for registering generated Angular modules in existing module
//! descriptors: import lines, `@NgModule` metadata and lazy route entries are
//! inserted in place, leaving the rest of the file untouched.

/// Shared error types.
pub mod error;

/// Workspace path helpers.
pub mod paths;

/// Name conversions (classify, dasherize, parse name).
pub mod naming;

/// TypeScript parsing into a typed AST.
pub mod parser;

/// Import and route text generation.
pub mod codegen;

/// Insertion points, staged edits and file stores.
pub mod patcher;

/// Module descriptor lookup.
pub mod resolver;

/// Generation options.
pub mod options;

/// `angular.json` reader.
pub mod workspace;

/// Scaffolding and lint collaborator traits.
pub mod collaborators;

/// Built-in file templates.
pub mod templates;

/// Planning and execution of a generation run.
pub mod generator;

pub use codegen::{import_statement, route_entry, LoaderStyle};
pub use collaborators::{CompanionOptions, LintFixer, ModuleTemplate, Scaffolder};
pub use error::{AppError, AppResult};
pub use generator::{execute_plan, plan_module, Change, GenerationPlan, Operation};
pub use options::{GenerationOptions, RegistrationMode, RoutingScope};
pub use parser::{parse_source, Node, SourceTree};
pub use patcher::{begin_update, commit_update, DiskStore, FileStore, MemoryStore, UpdateRecorder};
pub use resolver::{resolve_module, resolve_routing_sibling, ModuleQuery};
pub use templates::TemplateScaffolder;
pub use workspace::{ProjectContext, Workspace};
