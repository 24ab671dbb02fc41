#![deny(missing_docs)]

//! # Generation Options
//!
//! The input contract of one module generation run.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Where the generated routing module is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoutingScope {
    /// `RouterModule.forRoot`
    Root,
    /// `RouterModule.forChild`
    #[default]
    Child,
}

impl Display for RoutingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingScope::Root => write!(f, "Root"),
            RoutingScope::Child => write!(f, "Child"),
        }
    }
}

impl FromStr for RoutingScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "root" => Ok(RoutingScope::Root),
            "child" => Ok(RoutingScope::Child),
            other => Err(format!("invalid routing scope '{}', expected Root or Child", other)),
        }
    }
}

/// How the generated module is registered with its parent. Chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationMode {
    /// Imported and listed in the parent's `@NgModule` imports.
    DirectImport,
    /// Referenced only from a lazy route entry; never imported directly.
    LazyRoute,
}

/// Options of a module generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    /// Name of the unit, possibly with leading directories (`admin/users`).
    pub name: String,
    /// Directory to generate into. Defaults to the project's app directory.
    pub path: Option<String>,
    /// Owning project in the workspace.
    pub project: Option<String>,
    /// Descriptor to register the new module in.
    pub module: Option<String>,
    /// URL segment of a lazy route. Requires `module`.
    pub route: Option<String>,
    /// Scope of the generated routing module.
    pub routing_scope: RoutingScope,
    /// Generate files without a dedicated folder.
    pub flat: bool,
    /// Also generate a `-routing` module.
    pub routing: bool,
    /// Run the lint fixer over the generated files.
    pub lint_fix: bool,
    /// Do not register the unit anywhere.
    pub skip_import: bool,
}

impl GenerationOptions {
    /// Creates options for `name` with everything else defaulted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Rejects option combinations that cannot be generated.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Configuration("the name option is required".into()));
        }
        if self.route.is_some() && self.module.is_none() {
            return Err(AppError::Configuration(
                "Module option required when creating a lazy loaded routing module.".into(),
            ));
        }
        Ok(())
    }

    /// True when the module is registered through a lazy route.
    pub fn is_lazy_route(&self) -> bool {
        self.route.is_some() && self.module.is_some()
    }

    /// Registration mode implied by the options, `None` when there is no parent module.
    pub fn registration_mode(&self) -> Option<RegistrationMode> {
        match (&self.module, &self.route) {
            (None, _) => None,
            (Some(_), Some(_)) => Some(RegistrationMode::LazyRoute),
            (Some(_), None) => Some(RegistrationMode::DirectImport),
        }
    }
}
