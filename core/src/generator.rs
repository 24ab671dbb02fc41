#![deny(missing_docs)]

//! # Module Generation
//!
//! Plans a module generation run against the current file tree and executes
//! the planned operations in order.
//!
//! Planning resolves the parent descriptor, decides between a direct import
//! and a lazy route, and stages every descriptor edit in an [`UpdateRecorder`].
//! Nothing is written until [`execute_plan`] runs.

use crate::codegen::{import_statement, route_entry, LoaderStyle};
use crate::collaborators::{CompanionOptions, LintFixer, ModuleTemplate, Scaffolder};
use crate::error::AppResult;
use crate::naming::{classify, dasherize, parse_name, Location};
use crate::options::{GenerationOptions, RegistrationMode, RoutingScope};
use crate::parser::parse_source;
use crate::paths;
use crate::patcher::{begin_update, commit_update, import_insertion, ng_module_symbol, route_insertion};
use crate::patcher::{FileStore, UpdateRecorder};
use crate::resolver::{resolve_module, resolve_routing_sibling, ModuleQuery};
use crate::workspace::ProjectContext;
use derive_more::Display;

/// One step of a generation run.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Write the staged edits of one descriptor.
    Commit(UpdateRecorder),
    /// Generate the companion component of a lazy module.
    Companion(CompanionOptions),
    /// Write the new module files.
    Scaffold(ModuleTemplate),
    /// Run the lint fixer over a directory.
    LintFix {
        /// Workspace directory to fix.
        path: String,
    },
}

/// Ordered operations of one run.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    /// Operations, executed first to last.
    pub operations: Vec<Operation>,
    /// How the module is registered, `None` when it is not registered.
    pub mode: Option<RegistrationMode>,
}

/// A change made to the file tree.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Change {
    /// An existing descriptor was patched.
    #[display("UPDATE {_0}")]
    Updated(String),
    /// A new file was written.
    #[display("CREATE {_0}")]
    Created(String),
    /// The lint fixer ran over a directory.
    #[display("LINT {_0}")]
    Linted(String),
}

/// Plans the generation of a module.
///
/// Fails before anything is staged when the options are invalid or the parent
/// descriptor cannot be resolved or patched.
pub fn plan_module(
    store: &(impl FileStore + ?Sized),
    options: &GenerationOptions,
    ctx: &ProjectContext,
) -> AppResult<GenerationPlan> {
    options.validate()?;

    let base_path = paths::normalize(&format!(
        "/{}",
        options.path.as_deref().unwrap_or(&ctx.default_path)
    ));

    let module_path = match (&options.module, options.skip_import) {
        (Some(module), false) => Some(resolve_module(
            store,
            ModuleQuery {
                module,
                path: &base_path,
                name: &options.name,
            },
        )?),
        _ => None,
    };

    let lazy = options.is_lazy_route();
    let routing_scope = if lazy { RoutingScope::Child } else { options.routing_scope };
    let routing_sibling = match (&module_path, lazy) {
        (Some(module), true) => resolve_routing_sibling(store, module, &options.name),
        _ => None,
    };

    let location = parse_name(&base_path, &options.name);
    let mode = module_path.as_ref().and(options.registration_mode());
    tracing::debug!(
        name = %location.name,
        path = %location.path,
        module = ?module_path,
        mode = ?mode,
        "planning module"
    );

    let mut operations = Vec::new();

    if let (Some(module), Some(mode)) = (&module_path, mode) {
        let recorder = match mode {
            RegistrationMode::DirectImport => stage_import(store, module, &location, options.flat)?,
            RegistrationMode::LazyRoute => {
                let host = routing_sibling.clone().unwrap_or_else(|| module.clone());
                let route = options.route.as_deref().unwrap_or_default();
                let style = LoaderStyle::from_advanced_compilation(ctx.advanced_compilation);
                stage_route(store, &host, route, &location, options.flat, style)?
            }
        };
        operations.push(Operation::Commit(recorder));
    }

    let stem = dasherize(&location.name);
    if lazy {
        let module_file = if options.flat {
            format!("{}.module.ts", stem)
        } else {
            format!("{}/{}.module.ts", stem, stem)
        };
        operations.push(Operation::Companion(CompanionOptions {
            name: location.name.clone(),
            path: location.path.clone(),
            project: options.project.clone(),
            module: Some(module_file),
            flat: options.flat,
            skip_import: true,
            prefix: ctx.prefix.clone(),
        }));
    }

    let directory = module_directory(&location, options.flat);
    operations.push(Operation::Scaffold(ModuleTemplate {
        name: location.name.clone(),
        directory: directory.clone(),
        routing_file: options.routing || (lazy && routing_sibling.is_some()),
        routing_scope,
        lazy_route: lazy,
        lazy_route_with_routing_module: lazy && routing_sibling.is_some(),
    }));

    if options.lint_fix {
        operations.push(Operation::LintFix { path: directory });
    }

    Ok(GenerationPlan { operations, mode })
}

/// Runs the planned operations in order.
///
/// Stops at the first failure; earlier writes stay in place.
pub fn execute_plan(
    store: &mut dyn FileStore,
    plan: GenerationPlan,
    scaffolder: &dyn Scaffolder,
    lint: Option<&dyn LintFixer>,
) -> AppResult<Vec<Change>> {
    let mut changes = Vec::new();

    for operation in plan.operations {
        match operation {
            Operation::Commit(recorder) => {
                commit_update(store, &recorder)?;
                changes.push(Change::Updated(recorder.path().to_string()));
            }
            Operation::Companion(options) => {
                let created = scaffolder.generate_companion(store, &options)?;
                changes.extend(created.into_iter().map(Change::Created));
            }
            Operation::Scaffold(template) => {
                let created = scaffolder.apply_template(store, &template)?;
                changes.extend(created.into_iter().map(Change::Created));
            }
            Operation::LintFix { path } => match lint {
                Some(fixer) => {
                    fixer.fix(&path)?;
                    changes.push(Change::Linted(path));
                }
                None => tracing::warn!(path = %path, "lint fix requested but no fixer is configured"),
            },
        }
    }

    tracing::info!(changes = changes.len(), "generation finished");
    Ok(changes)
}

fn module_directory(location: &Location, flat: bool) -> String {
    if flat {
        location.path.clone()
    } else {
        paths::join(&location.path, &dasherize(&location.name))
    }
}

/// Workspace path of the generated module file, without extension.
fn generated_module(location: &Location, flat: bool) -> String {
    paths::join(
        &module_directory(location, flat),
        &format!("{}.module", dasherize(&location.name)),
    )
}

fn module_symbol(location: &Location) -> String {
    format!("{}Module", classify(&location.name))
}

fn stage_import(
    store: &(impl FileStore + ?Sized),
    module: &str,
    location: &Location,
    flat: bool,
) -> AppResult<UpdateRecorder> {
    let symbol = module_symbol(location);
    let specifier = paths::build_relative_path(module, &generated_module(location, flat));

    let mut recorder = begin_update(store, module)?;
    let tree = parse_source(recorder.original())?;

    let import_edit = import_insertion(&tree, &import_statement(&symbol, &specifier));
    let metadata_edit = ng_module_symbol(&tree, "imports", &symbol);

    recorder.push(import_edit);
    match metadata_edit {
        Some(edit) => {
            recorder.push(edit);
        }
        None => tracing::warn!(module, symbol = %symbol, "no @NgModule imports array, only the import line is added"),
    }
    Ok(recorder)
}

fn stage_route(
    store: &(impl FileStore + ?Sized),
    host: &str,
    route: &str,
    location: &Location,
    flat: bool,
    style: LoaderStyle,
) -> AppResult<UpdateRecorder> {
    let symbol = module_symbol(location);
    let specifier = paths::build_relative_path(host, &generated_module(location, flat));

    let mut recorder = begin_update(store, host)?;
    let tree = parse_source(recorder.original())?;
    let edit = route_insertion(&tree, host, &route_entry(route, &specifier, &symbol, style))?;
    recorder.push(edit);
    Ok(recorder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::patcher::MemoryStore;
    use crate::templates::TemplateScaffolder;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    const APP_MODULE: &str = "import { NgModule } from '@angular/core';\nimport { BrowserModule } from '@angular/platform-browser';\n\n@NgModule({\n  declarations: [],\n  imports: [\n    BrowserModule\n  ]\n})\nexport class AppModule { }\n";

    const APP_ROUTING: &str = "import { NgModule } from '@angular/core';\nimport { Routes, RouterModule } from '@angular/router';\n\nconst routes: Routes = [];\n\n@NgModule({\n  imports: [RouterModule.forRoot(routes)],\n  exports: [RouterModule]\n})\nexport class AppRoutingModule { }\n";

    #[derive(Default)]
    struct RecordingFixer {
        paths: RefCell<Vec<String>>,
    }

    impl LintFixer for RecordingFixer {
        fn fix(&self, path: &str) -> AppResult<()> {
            self.paths.borrow_mut().push(path.to_string());
            Ok(())
        }
    }

    fn options(name: &str) -> GenerationOptions {
        let mut options = GenerationOptions::new(name);
        options.module = Some("app".into());
        options
    }

    #[test]
    fn test_direct_import_plan() {
        let store = MemoryStore::new().with_file("/src/app/app.module.ts", APP_MODULE);
        let plan = plan_module(&store, &options("widget"), &ProjectContext::default()).unwrap();

        assert_eq!(plan.mode, Some(RegistrationMode::DirectImport));
        assert_eq!(plan.operations.len(), 2);
        match &plan.operations[0] {
            Operation::Commit(rec) => {
                assert_eq!(rec.path(), "/src/app/app.module.ts");
                assert_eq!(rec.edits().len(), 2);
            }
            other => panic!("unexpected operation {:?}", other),
        }
        // Planning never writes.
        assert_eq!(store.get("/src/app/app.module.ts"), Some(APP_MODULE));
    }

    #[test]
    fn test_execute_direct_import() {
        let mut store = MemoryStore::new().with_file("/src/app/app.module.ts", APP_MODULE);
        let plan = plan_module(&store, &options("widget"), &ProjectContext::default()).unwrap();
        let changes = execute_plan(&mut store, plan, &TemplateScaffolder, None).unwrap();

        assert_eq!(
            changes,
            vec![
                Change::Updated("/src/app/app.module.ts".into()),
                Change::Created("/src/app/widget/widget.module.ts".into()),
            ]
        );
        assert_eq!(
            store.get("/src/app/app.module.ts").unwrap(),
            "import { NgModule } from '@angular/core';\nimport { BrowserModule } from '@angular/platform-browser';\nimport { WidgetModule } from './widget/widget.module';\n\n@NgModule({\n  declarations: [],\n  imports: [\n    BrowserModule,\n    WidgetModule\n  ]\n})\nexport class AppModule { }\n"
        );
    }

    #[test]
    fn test_lazy_route_targets_routing_sibling() {
        let mut store = MemoryStore::new()
            .with_file("/src/app/app.module.ts", APP_MODULE)
            .with_file("/src/app/app-routing.module.ts", APP_ROUTING);
        let mut opts = options("widgets");
        opts.route = Some("widgets".into());
        opts.routing_scope = RoutingScope::Root;

        let plan = plan_module(&store, &opts, &ProjectContext::default()).unwrap();
        assert_eq!(plan.mode, Some(RegistrationMode::LazyRoute));
        match plan.operations.last() {
            Some(Operation::Scaffold(t)) => {
                assert_eq!(t.routing_scope, RoutingScope::Child);
                assert!(t.routing_file);
                assert!(t.lazy_route_with_routing_module);
            }
            other => panic!("unexpected operation {:?}", other),
        }

        let changes = execute_plan(&mut store, plan, &TemplateScaffolder, None).unwrap();
        assert_eq!(changes[0], Change::Updated("/src/app/app-routing.module.ts".into()));
        assert_eq!(store.get("/src/app/app.module.ts"), Some(APP_MODULE));
        assert!(store
            .get("/src/app/app-routing.module.ts")
            .unwrap()
            .contains("const routes: Routes = [{ path: 'widgets', loadChildren: () => import('./widgets/widgets.module').then(m => m.WidgetsModule) }];"));
        assert!(store.get("/src/app/widgets/widgets.component.ts").is_some());
        assert!(store.get("/src/app/widgets/widgets-routing.module.ts").is_some());
    }

    #[test]
    fn test_companion_precedes_template() {
        let store = MemoryStore::new().with_file("/src/app/app.module.ts", APP_MODULE);
        let mut opts = options("widgets");
        opts.route = Some("widgets".into());
        let plan = plan_module(&store, &opts, &ProjectContext::default());
        // No RouterModule call in the module descriptor.
        assert!(matches!(plan, Err(AppError::RouteHostNotFound { .. })));

        let hosted = MemoryStore::new().with_file("/src/app/app-routing.module.ts", APP_ROUTING);
        let mut opts = GenerationOptions::new("widgets");
        opts.module = Some("app-routing".into());
        opts.route = Some("widgets".into());
        let plan = plan_module(&hosted, &opts, &ProjectContext::default()).unwrap();
        let kinds: Vec<&str> = plan
            .operations
            .iter()
            .map(|op| match op {
                Operation::Commit(_) => "commit",
                Operation::Companion(_) => "companion",
                Operation::Scaffold(_) => "scaffold",
                Operation::LintFix { .. } => "lint",
            })
            .collect();
        assert_eq!(kinds, vec!["commit", "companion", "scaffold"]);
        match &plan.operations[1] {
            Operation::Companion(c) => {
                assert!(c.skip_import);
                assert_eq!(c.module.as_deref(), Some("widgets/widgets.module.ts"));
            }
            other => panic!("unexpected operation {:?}", other),
        }
    }

    #[test]
    fn test_skip_import_disables_resolution() {
        let store = MemoryStore::new();
        let mut opts = options("widget");
        opts.skip_import = true;
        let plan = plan_module(&store, &opts, &ProjectContext::default()).unwrap();
        assert_eq!(plan.mode, None);
        assert!(matches!(plan.operations.as_slice(), [Operation::Scaffold(_)]));
    }

    #[test]
    fn test_unresolved_module() {
        let store = MemoryStore::new();
        let err = plan_module(&store, &options("widget"), &ProjectContext::default()).unwrap_err();
        assert!(matches!(err, AppError::ModuleResolution(_)));
    }

    #[test]
    fn test_lint_fix_runs_last() {
        let mut store = MemoryStore::new().with_file("/src/app/app.module.ts", APP_MODULE);
        let mut opts = options("widget");
        opts.lint_fix = true;
        opts.flat = true;
        let plan = plan_module(&store, &opts, &ProjectContext::default()).unwrap();

        let fixer = RecordingFixer::default();
        let changes = execute_plan(&mut store, plan, &TemplateScaffolder, Some(&fixer)).unwrap();
        assert_eq!(changes.last(), Some(&Change::Linted("/src/app".into())));
        assert_eq!(*fixer.paths.borrow(), vec!["/src/app".to_string()]);
        assert!(store
            .get("/src/app/app.module.ts")
            .unwrap()
            .contains("import { WidgetModule } from './widget.module';"));
    }

    #[test]
    fn test_lint_fix_without_fixer_is_skipped() {
        let mut store = MemoryStore::new();
        let mut opts = GenerationOptions::new("widget");
        opts.lint_fix = true;
        let plan = plan_module(&store, &opts, &ProjectContext::default()).unwrap();
        let changes = execute_plan(&mut store, plan, &TemplateScaffolder, None).unwrap();
        assert_eq!(changes, vec![Change::Created("/src/app/widget/widget.module.ts".into())]);
    }

    #[test]
    fn test_change_display() {
        assert_eq!(Change::Updated("/a.ts".into()).to_string(), "UPDATE /a.ts");
        assert_eq!(Change::Created("/b.ts".into()).to_string(), "CREATE /b.ts");
        assert_eq!(Change::Linted("/src".into()).to_string(), "LINT /src");
    }
}
