//! Staged insertions against one descriptor, committed as a single rewrite.

use crate::error::{AppError, AppResult};
use crate::patcher::store::FileStore;
use std::cmp::Reverse;

/// A single left-insertion at an offset of the pre-edit text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    /// Byte offset into the original text.
    pub offset: usize,
    /// Text inserted at `offset`.
    pub text: String,
}

impl PendingEdit {
    /// Creates an edit.
    pub fn new(offset: usize, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: text.into(),
        }
    }
}

/// Collects inserts for one file until they are committed.
#[derive(Debug, Clone)]
pub struct UpdateRecorder {
    path: String,
    original: String,
    edits: Vec<PendingEdit>,
}

impl UpdateRecorder {
    /// Starts recording against `original`, the current text of `path`.
    pub fn new(path: impl Into<String>, original: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            original: original.into(),
            edits: Vec::new(),
        }
    }

    /// Target file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Text the offsets refer to.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Edits in registration order.
    pub fn edits(&self) -> &[PendingEdit] {
        &self.edits
    }

    /// True when nothing was staged.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Stages `text` at `offset`.
    ///
    /// Inserts sharing an offset stack in reverse registration order: the
    /// later one lands to the left of the earlier one.
    pub fn insert_left(&mut self, offset: usize, text: impl Into<String>) -> &mut Self {
        self.edits.push(PendingEdit::new(offset, text));
        self
    }

    /// Stages a prepared edit.
    pub fn push(&mut self, edit: PendingEdit) -> &mut Self {
        self.edits.push(edit);
        self
    }

    /// Merges every staged insert into the original text.
    ///
    /// All offsets are validated first; nothing is produced if one is invalid.
    pub fn apply(&self) -> AppResult<String> {
        for edit in &self.edits {
            if edit.offset > self.original.len() || !self.original.is_char_boundary(edit.offset) {
                return Err(AppError::InvalidEdit(format!(
                    "offset {} is outside {} ({} bytes)",
                    edit.offset,
                    self.path,
                    self.original.len()
                )));
            }
        }

        let mut ordered: Vec<(usize, &PendingEdit)> = self.edits.iter().enumerate().collect();
        ordered.sort_by_key(|(seq, edit)| (edit.offset, Reverse(*seq)));

        let extra: usize = self.edits.iter().map(|e| e.text.len()).sum();
        let mut merged = String::with_capacity(self.original.len() + extra);
        let mut cursor = 0;
        for (_, edit) in ordered {
            merged.push_str(&self.original[cursor..edit.offset]);
            merged.push_str(&edit.text);
            cursor = edit.offset;
        }
        merged.push_str(&self.original[cursor..]);

        Ok(merged)
    }
}

/// Opens a recorder on the current content of `path`.
pub fn begin_update(store: &(impl FileStore + ?Sized), path: &str) -> AppResult<UpdateRecorder> {
    let text = store
        .read(path)?
        .ok_or_else(|| AppError::SourceNotFound(path.to_string()))?;
    Ok(UpdateRecorder::new(path, text))
}

/// Applies the recorder and writes the merged text back in one write.
pub fn commit_update(store: &mut (impl FileStore + ?Sized), recorder: &UpdateRecorder) -> AppResult<()> {
    let merged = recorder.apply()?;
    store.write(recorder.path(), &merged)?;
    tracing::debug!(
        path = recorder.path(),
        edits = recorder.edits().len(),
        "committed update"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patcher::store::MemoryStore;

    #[test]
    fn test_inserts_at_independent_offsets() {
        let mut rec = UpdateRecorder::new("/a.ts", "abcdef");
        rec.insert_left(4, "Y").insert_left(1, "X");
        assert_eq!(rec.apply().unwrap(), "aXbcdYef");
    }

    #[test]
    fn test_same_offset_stacks_in_reverse_registration_order() {
        let mut rec = UpdateRecorder::new("/a.ts", "[]");
        rec.insert_left(1, "first");
        rec.insert_left(1, "second");
        assert_eq!(rec.apply().unwrap(), "[secondfirst]");
    }

    #[test]
    fn test_insert_at_end_and_start() {
        let mut rec = UpdateRecorder::new("/a.ts", "mid");
        rec.insert_left(3, ">").insert_left(0, "<");
        assert_eq!(rec.apply().unwrap(), "<mid>");
    }

    #[test]
    fn test_out_of_range_rejects_everything() {
        let mut store = MemoryStore::new().with_file("/a.ts", "abc");
        let mut rec = begin_update(&store, "/a.ts").unwrap();
        rec.insert_left(1, "ok").insert_left(10, "bad");

        let err = commit_update(&mut store, &rec).unwrap_err();
        assert!(matches!(err, AppError::InvalidEdit(_)));
        assert_eq!(store.get("/a.ts"), Some("abc"));
    }

    #[test]
    fn test_char_boundary_is_enforced() {
        let mut rec = UpdateRecorder::new("/a.ts", "é");
        rec.insert_left(1, "x");
        assert!(rec.apply().is_err());
    }

    #[test]
    fn test_begin_update_missing_file() {
        let store = MemoryStore::new();
        let err = begin_update(&store, "/nope.module.ts").unwrap_err();
        assert!(matches!(err, AppError::SourceNotFound(p) if p == "/nope.module.ts"));
    }

    #[test]
    fn test_commit_writes_merged_text() {
        let mut store = MemoryStore::new().with_file("/a.ts", "ac");
        let mut rec = begin_update(&store, "/a.ts").unwrap();
        rec.insert_left(1, "b");
        commit_update(&mut store, &rec).unwrap();
        assert_eq!(store.get("/a.ts"), Some("abc"));
    }
}
