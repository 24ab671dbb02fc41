#![deny(missing_docs)]

//! # Workspace Configuration
//!
//! Reads `angular.json` to find a project's default generation directory, its
//! selector prefix and whether it builds in advanced compilation (Ivy) mode.

use crate::error::{AppError, AppResult};
use crate::paths;
use crate::patcher::FileStore;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Location of the workspace file.
pub const WORKSPACE_FILE: &str = "/angular.json";

/// Kind of project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Deployable application; sources under `app/`.
    #[default]
    Application,
    /// Library; sources under `lib/`.
    Library,
}

/// A build target entry (`architect.build`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Builder options, kept untyped.
    pub options: Option<Value>,
}

/// One project of the workspace.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    /// Project root relative to the workspace.
    pub root: String,
    /// Source root relative to the workspace.
    pub source_root: Option<String>,
    /// Application or library.
    pub project_type: ProjectType,
    /// Component selector prefix.
    pub prefix: Option<String>,
    /// Build targets.
    #[serde(alias = "targets")]
    pub architect: IndexMap<String, TargetConfig>,
}

/// Parsed `angular.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workspace {
    /// Project used when none is named.
    pub default_project: Option<String>,
    /// Projects by name, in file order.
    pub projects: IndexMap<String, ProjectConfig>,
}

/// Project settings a generation run needs, read once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    /// Directory used when the options carry no `path`.
    pub default_path: String,
    /// Advanced compilation mode; selects the lazy loader text shape.
    pub advanced_compilation: bool,
    /// Component selector prefix.
    pub prefix: String,
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self {
            default_path: "/src/app".to_string(),
            advanced_compilation: true,
            prefix: "app".to_string(),
        }
    }
}

impl Workspace {
    /// Parses workspace JSON.
    pub fn from_json(text: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads `/angular.json` from the store.
    pub fn load(store: &(impl FileStore + ?Sized)) -> AppResult<Self> {
        let text = store
            .read(WORKSPACE_FILE)?
            .ok_or_else(|| AppError::Configuration("Could not find an angular.json workspace file".into()))?;
        Self::from_json(&text)
    }

    /// Finds a project by name, falling back to `defaultProject`, then to the
    /// only project of a single-project workspace.
    pub fn project(&self, name: Option<&str>) -> AppResult<(&str, &ProjectConfig)> {
        let wanted = name.or(self.default_project.as_deref());

        let found = match wanted {
            Some(n) => self.projects.get_key_value(n),
            None if self.projects.len() == 1 => self.projects.iter().next(),
            None => None,
        };

        found
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "Project '{}' does not exist in the workspace",
                    wanted.unwrap_or("<default>")
                ))
            })
    }
}

impl ProjectConfig {
    /// Default generation directory: `/<sourceRoot>/app` (or `lib`).
    pub fn default_path(&self) -> String {
        let root = match &self.source_root {
            Some(src) => format!("/{}/", src),
            None => format!("/{}/src/", self.root),
        };
        let dir = match self.project_type {
            ProjectType::Application => "app",
            ProjectType::Library => "lib",
        };
        paths::normalize(&format!("{}{}", root, dir))
    }

    /// Whether the project compiles in advanced (Ivy) mode.
    ///
    /// Reads `angularCompilerOptions.enableIvy` from the build target's
    /// tsconfig. Missing or unreadable configuration counts as enabled.
    pub fn advanced_compilation(&self, store: &(impl FileStore + ?Sized)) -> bool {
        let Some(ts_config) = self.build_ts_config() else {
            return true;
        };

        let text = match store.read(&ts_config) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::warn!(path = %ts_config, "tsconfig not found, assuming advanced compilation");
                return true;
            }
            Err(e) => {
                tracing::warn!(path = %ts_config, error = %e, "tsconfig unreadable, assuming advanced compilation");
                return true;
            }
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(json) => json
                .pointer("/angularCompilerOptions/enableIvy")
                .and_then(Value::as_bool)
                .unwrap_or(true),
            Err(e) => {
                tracing::warn!(path = %ts_config, error = %e, "tsconfig is not plain JSON, assuming advanced compilation");
                true
            }
        }
    }

    fn build_ts_config(&self) -> Option<String> {
        let options = self.architect.get("build")?.options.as_ref()?;
        let ts_config = options.get("tsConfig")?.as_str()?;
        Some(paths::normalize(&format!("/{}", ts_config)))
    }

    /// Builds the run context for this project.
    pub fn context(&self, store: &(impl FileStore + ?Sized)) -> ProjectContext {
        ProjectContext {
            default_path: self.default_path(),
            advanced_compilation: self.advanced_compilation(store),
            prefix: self.prefix.clone().unwrap_or_else(|| "app".to_string()),
        }
    }
}
