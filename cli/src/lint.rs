#![deny(missing_docs)]

//! # Lint Fix
//!
//! Runs an external lint fixer (ESLint by default) over the TypeScript files
//! of a generated directory.
//!
//! Command execution sits behind [`CommandExecutor`] so tests can run without
//! Node.js installed.

use crate::error::{CliError, CliResult};
use modpatch_core::{AppError, AppResult, LintFixer};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use walkdir::WalkDir;

/// Interface for executing the fix command.
pub trait CommandExecutor {
    /// Executes the command and returns the output.
    fn execute(&self, program: &str, args: &[&str]) -> CliResult<Output>;
}

/// Standard executor using `std::process::Command`.
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    fn execute(&self, program: &str, args: &[&str]) -> CliResult<Output> {
        let output = Command::new(program).args(args).output()?;
        Ok(output)
    }
}

/// [`LintFixer`] running a shell command over generated sources.
pub struct EslintFixer<E: CommandExecutor> {
    root: PathBuf,
    program: String,
    base_args: Vec<String>,
    executor: E,
}

impl<E: CommandExecutor> EslintFixer<E> {
    /// Creates a fixer for the workspace at `root`.
    ///
    /// # Arguments
    ///
    /// * `root` - Workspace directory on disk.
    /// * `command_line` - Program and leading arguments, split on whitespace
    ///   (e.g. `npx eslint --fix`). File paths are appended.
    /// * `executor` - The command runner (use `ShellExecutor` for real execution).
    pub fn new(root: impl Into<PathBuf>, command_line: &str, executor: E) -> CliResult<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| CliError::General("lint command is empty".to_string()))?;

        Ok(Self {
            root: root.into(),
            program,
            base_args: parts.collect(),
            executor,
        })
    }

    fn run(&self, files: &[PathBuf]) -> CliResult<()> {
        let file_args: Vec<String> = files.iter().map(|f| f.to_string_lossy().into_owned()).collect();
        let args: Vec<&str> = self
            .base_args
            .iter()
            .chain(file_args.iter())
            .map(String::as_str)
            .collect();

        let output = self.executor.execute(&self.program, &args)?;
        if !output.status.success() {
            return Err(CliError::Command {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

impl<E: CommandExecutor> LintFixer for EslintFixer<E> {
    fn fix(&self, path: &str) -> AppResult<()> {
        let dir = self.root.join(path.trim_start_matches('/'));
        let files = typescript_sources(&dir);

        if files.is_empty() {
            tracing::debug!(dir = %dir.display(), "no TypeScript sources to fix");
            return Ok(());
        }

        tracing::debug!(dir = %dir.display(), files = files.len(), "running lint fix");
        self.run(&files).map_err(|e| AppError::General(e.to_string()))
    }
}

/// Collects `.ts` files under `dir`, sorted by path.
fn typescript_sources(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "ts"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;
    use tempfile::tempdir;

    // Mock Executor to capture commands
    struct MockExecutor {
        last_command: RefCell<Option<(String, Vec<String>)>>,
        should_fail: bool,
    }

    impl MockExecutor {
        fn new(should_fail: bool) -> Self {
            Self {
                last_command: RefCell::new(None),
                should_fail,
            }
        }
    }

    impl CommandExecutor for MockExecutor {
        fn execute(&self, program: &str, args: &[&str]) -> CliResult<Output> {
            self.last_command.borrow_mut().replace((
                program.to_string(),
                args.iter().map(|s| s.to_string()).collect(),
            ));

            let status = if self.should_fail {
                ExitStatus::from_raw(1 << 8)
            } else {
                ExitStatus::from_raw(0)
            };

            Ok(Output {
                status,
                stdout: Vec::new(),
                stderr: if self.should_fail {
                    b"Mock Error".to_vec()
                } else {
                    Vec::new()
                },
            })
        }
    }

    fn workspace() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let widget = dir.path().join("src/app/widget");
        fs::create_dir_all(&widget).unwrap();
        fs::write(widget.join("widget.module.ts"), "export class WidgetModule {}\n").unwrap();
        fs::write(widget.join("widget.component.ts"), "export class WidgetComponent {}\n").unwrap();
        fs::write(widget.join("widget.component.html"), "<p>widget works!</p>\n").unwrap();
        dir
    }

    #[test]
    fn test_fix_passes_typescript_files() {
        let dir = workspace();
        let fixer = EslintFixer::new(dir.path(), "npx eslint --fix", MockExecutor::new(false)).unwrap();

        fixer.fix("/src/app/widget").unwrap();

        let (prog, args) = fixer.executor.last_command.take().unwrap();
        assert_eq!(prog, "npx");
        assert_eq!(args.len(), 4);
        assert_eq!(&args[..2], &["eslint".to_string(), "--fix".to_string()]);
        assert!(args[2].ends_with("widget.component.ts"));
        assert!(args[3].ends_with("widget.module.ts"));
    }

    #[test]
    fn test_fix_failure() {
        let dir = workspace();
        let fixer = EslintFixer::new(dir.path(), "eslint --fix", MockExecutor::new(true)).unwrap();

        let err = fixer.fix("/src/app/widget").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("eslint failed"));
        assert!(msg.contains("Mock Error"));
    }

    #[test]
    fn test_empty_directory_skips_command() {
        let dir = tempdir().unwrap();
        let fixer = EslintFixer::new(dir.path(), "eslint --fix", MockExecutor::new(true)).unwrap();

        fixer.fix("/src/app").unwrap();
        assert!(fixer.executor.last_command.take().is_none());
    }

    #[test]
    fn test_empty_command_rejected() {
        let res = EslintFixer::new("/tmp", "   ", MockExecutor::new(false));
        assert!(matches!(res, Err(CliError::General(_))));
    }

    #[test]
    fn test_shell_executor_runs() {
        let res = ShellExecutor.execute("echo", &["test"]);
        // `echo` may be missing on exotic hosts; an IO error is still a proper CliResult.
        if let Ok(output) = res {
            assert!(output.status.success());
        }
    }
}
