#![deny(missing_docs)]

//! # Module Command
//!
//! Generates an Angular module in a workspace on disk and registers it in its
//! parent module, either as a direct import or as a lazily loaded route.
//!
//! 1. **Context**: reads `angular.json` for the default path, prefix and Ivy flag.
//! 2. **Plan**: resolves the parent descriptor and stages every edit.
//! 3. **Execute**: commits edits, writes new files, optionally runs the lint fixer.

use crate::lint::{CommandExecutor, EslintFixer};
use modpatch_core::workspace::WORKSPACE_FILE;
use modpatch_core::{
    execute_plan, plan_module, AppError, AppResult, Change, DiskStore, FileStore,
    GenerationOptions, LintFixer, ProjectContext, RoutingScope, TemplateScaffolder, Workspace,
};
use std::path::PathBuf;

/// Arguments for the module command.
#[derive(clap::Args, Debug, Clone)]
pub struct ModuleArgs {
    /// Name of the module, optionally prefixed with directories (e.g. `admin/users`).
    pub name: String,

    /// Workspace path to generate into (defaults to the project's app directory).
    #[clap(long)]
    pub path: Option<String>,

    /// Project in `angular.json` (defaults to `defaultProject`).
    #[clap(long)]
    pub project: Option<String>,

    /// Module to register the new module in (e.g. `app` or `app.module.ts`).
    #[clap(long)]
    pub module: Option<String>,

    /// Create a lazily loaded route with this path in `--module`.
    #[clap(long)]
    pub route: Option<String>,

    /// Scope of the generated routing module.
    #[clap(long, default_value = "Child")]
    pub routing_scope: RoutingScope,

    /// Generate files at the top level of `--path`.
    #[clap(long)]
    pub flat: bool,

    /// Also generate a routing module.
    #[clap(long)]
    pub routing: bool,

    /// Run the lint fixer over the generated files.
    #[clap(long)]
    pub lint_fix: bool,

    /// Do not register the module anywhere.
    #[clap(long)]
    pub skip_import: bool,

    /// Workspace root on disk.
    #[clap(long, env = "MODPATCH_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Command used by `--lint-fix`; file paths are appended.
    #[clap(long, default_value = "npx eslint --fix")]
    pub lint_command: String,
}

impl ModuleArgs {
    /// Converts the arguments into generation options.
    pub fn to_options(&self) -> GenerationOptions {
        GenerationOptions {
            name: self.name.clone(),
            path: self.path.clone(),
            project: self.project.clone(),
            module: self.module.clone(),
            route: self.route.clone(),
            routing_scope: self.routing_scope,
            flat: self.flat,
            routing: self.routing,
            lint_fix: self.lint_fix,
            skip_import: self.skip_import,
        }
    }
}

/// Executes the module command.
///
/// # Arguments
///
/// * `args` - Command arguments.
/// * `executor` - Runs the lint command (use `ShellExecutor` for real execution).
pub fn execute(args: &ModuleArgs, executor: impl CommandExecutor) -> AppResult<Vec<Change>> {
    let options = args.to_options();
    let mut store = DiskStore::new(&args.root);

    let ctx = project_context(&store, args.project.as_deref())?;
    let plan = plan_module(&store, &options, &ctx)?;

    let fixer = if args.lint_fix {
        Some(
            EslintFixer::new(&args.root, &args.lint_command, executor)
                .map_err(|e| AppError::General(e.to_string()))?,
        )
    } else {
        None
    };
    let lint = fixer.as_ref().map(|f| f as &dyn LintFixer);

    let changes = execute_plan(&mut store, plan, &TemplateScaffolder, lint)?;
    for change in &changes {
        println!("{}", change);
    }
    Ok(changes)
}

/// Reads the project context, falling back to defaults outside a workspace.
fn project_context(store: &DiskStore, project: Option<&str>) -> AppResult<ProjectContext> {
    if !store.exists(WORKSPACE_FILE) {
        tracing::warn!(root = %store.root().display(), "no angular.json found, using default project settings");
        return Ok(ProjectContext::default());
    }

    let workspace = Workspace::load(store)?;
    let (name, config) = workspace.project(project)?;
    let ctx = config.context(store);
    tracing::debug!(project = name, path = %ctx.default_path, ivy = ctx.advanced_compilation, "project context");
    Ok(ctx)
}
