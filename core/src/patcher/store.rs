//! File stores the patcher reads descriptors from and commits them to.

use crate::error::AppResult;
use crate::paths;
use indexmap::IndexMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Persisted file representation addressed by workspace paths.
pub trait FileStore {
    /// Reads a file. `Ok(None)` when it does not exist.
    fn read(&self, path: &str) -> AppResult<Option<String>>;

    /// Whether a regular file exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Replaces (or creates) the file at `path` in one step.
    fn write(&mut self, path: &str, content: &str) -> AppResult<()>;
}

/// A store backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Creates a store rooted at the workspace directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Workspace root on disk.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a workspace path to a filesystem path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let normalized = paths::normalize(path);
        self.root.join(normalized.trim_start_matches('/'))
    }
}

impl FileStore for DiskStore {
    fn read(&self, path: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.resolve(path)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    /// Writes through a temp file in the target directory, then renames it
    /// over the target so readers never observe a partial file.
    ///
    /// The target keeps its permissions; new files get the process defaults.
    fn write(&mut self, path: &str, content: &str) -> AppResult<()> {
        let target = self.resolve(path);
        let parent = match target.parent() {
            Some(parent) => parent.to_path_buf(),
            None => self.root.clone(),
        };
        fs::create_dir_all(&parent)?;

        let permissions = target_permissions(&target)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().set_permissions(permissions)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Permissions the written file must end up with.
///
/// A missing target is created empty through `std::fs` first, so the process
/// umask decides its mode; the temp file then replaces it.
fn target_permissions(target: &Path) -> AppResult<fs::Permissions> {
    match fs::metadata(target) {
        Ok(meta) => Ok(meta.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let placeholder = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(target)?;
            Ok(placeholder.metadata()?.permissions())
        }
        Err(e) => Err(e.into()),
    }
}

/// An in-memory store, ordered by insertion.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: IndexMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder helper that seeds a file.
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(paths::normalize(path), content.to_string());
        self
    }

    /// Current content of a file.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(&paths::normalize(path)).map(String::as_str)
    }

    /// Paths of all files, in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl FileStore for MemoryStore {
    fn read(&self, path: &str) -> AppResult<Option<String>> {
        Ok(self.get(path).map(str::to_string))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(&paths::normalize(path))
    }

    fn write(&mut self, path: &str, content: &str) -> AppResult<()> {
        self.files
            .insert(paths::normalize(path), content.to_string());
        Ok(())
    }
}
