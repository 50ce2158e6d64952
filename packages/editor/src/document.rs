//! # Document Handle
//!
//! Core document abstraction for UI map editing.
//!
//! A Document wraps one loaded [`UiMapDocument`] together with its editing
//! state. Documents can be:
//! - **Memory-backed**: built from an in-memory tree, for tests and tooling
//! - **File-backed**: loaded from disk through a [`DocumentCodec`]
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Edit → Save
//!   ↓      ↓      ↓
//! Codec  Engine  Codec (+ backup)
//! ```
//!
//! `is_modified` starts out false, is raised by every successful mutation and
//! is only cleared once the codec reports a successful save.

use chrono::{Local, NaiveDateTime};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uimap_model::{DocumentCodec, NodeRef, UiMapDocument};

use crate::engine::{self, Change};
use crate::search::{self, OutlineEntry};
use crate::{EditorError, Mutation, MutationError, MutationResult};

/// Editable UI map document
#[derive(Debug)]
pub struct Document {
    /// Backing file (if any)
    pub path: Option<PathBuf>,

    /// Current version number (increments on each successful mutation)
    pub version: u64,

    tree: UiMapDocument,
    is_modified: bool,
}

/// Where and whether to keep a copy of the previous file on save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupPolicy {
    pub enabled: bool,

    /// Directory name, relative to the saved file's directory
    pub directory: String,

    /// Save anyway when the backup copy cannot be written
    pub continue_without_backup: bool,
}

impl Default for BackupPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: "backups".to_string(),
            continue_without_backup: false,
        }
    }
}

impl BackupPolicy {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// `<dir>/<backup dir>/<stem>_<yyyyMMdd_HHmmss><.ext>`
    pub fn backup_path(&self, file: &Path, at: NaiveDateTime) -> PathBuf {
        let dir = file.parent().unwrap_or_else(|| Path::new(""));
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = file
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        dir.join(&self.directory)
            .join(format!("{}_{}{}", stem, at.format("%Y%m%d_%H%M%S"), ext))
    }
}

impl Document {
    /// Create document from an in-memory tree (memory-backed)
    pub fn from_tree(tree: UiMapDocument) -> Self {
        Self {
            path: None,
            version: 0,
            tree,
            is_modified: false,
        }
    }

    /// Read a document through `codec` (memory-backed)
    pub fn from_reader(reader: &mut dyn Read, codec: &dyn DocumentCodec) -> Result<Self, EditorError> {
        Ok(Self::from_tree(codec.load(reader)?))
    }

    /// Load document from file (file-backed)
    pub fn load(path: impl Into<PathBuf>, codec: &dyn DocumentCodec) -> Result<Self, EditorError> {
        let path = path.into();
        let tree = read_tree(&path, codec)?;
        info!(path = %path.display(), maps = tree.maps.len(), actions = tree.execute_actions.len(), "Loaded UI map document");

        Ok(Self {
            path: Some(path),
            version: 0,
            tree,
            is_modified: false,
        })
    }

    pub fn tree(&self) -> &UiMapDocument {
        &self.tree
    }

    /// Check if document has unsaved changes
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Id of the first map, or empty when the document has none
    pub fn document_name(&self) -> &str {
        engine::document_name(&self.tree)
    }

    pub fn find(&self, path: &str) -> Option<NodeRef<'_>> {
        engine::find(&self.tree, path)
    }

    pub fn outline(&self) -> Vec<OutlineEntry> {
        search::outline(&self.tree)
    }

    pub fn find_next(&self, after: Option<&str>, text: &str) -> Option<String> {
        search::find_next(&self.tree, after, text)
    }

    /// Move an element within this document
    pub fn move_element(&mut self, source_path: &str, destination_parent_path: &str) -> Result<Change, MutationError> {
        let change = engine::move_element(&mut self.tree, None, source_path, destination_parent_path)?;
        self.record(&change);
        Ok(change)
    }

    /// Move an element out of `source` into this document.
    ///
    /// Both documents are flagged as modified on success.
    pub fn move_from(
        &mut self,
        source: &mut Document,
        source_path: &str,
        destination_parent_path: &str,
    ) -> Result<Change, MutationError> {
        let change = engine::move_element(
            &mut self.tree,
            Some(&mut source.tree),
            source_path,
            destination_parent_path,
        )?;
        self.record(&change);
        source.record(&change);
        Ok(change)
    }

    pub fn delete(&mut self, path: &str) -> Result<Change, MutationError> {
        let change = engine::delete(&mut self.tree, path)?;
        self.record(&change);
        Ok(change)
    }

    /// Rename the element at `path`, returning its new path
    pub fn rename(&mut self, path: &str, new_id: &str) -> Result<String, MutationError> {
        let change = engine::rename(&mut self.tree, path, new_id)?;
        self.record(&change);
        Ok(change.path.unwrap_or_else(|| path.to_string()))
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let change = mutation.apply(&mut self.tree)?;
        self.record(&change);

        Ok(MutationResult {
            version: self.version,
            path: change.path,
            merged: change.merged,
        })
    }

    /// Apply mutations in order, stopping at the first failure
    pub fn apply_all(&mut self, mutations: Vec<Mutation>) -> Result<Vec<MutationResult>, EditorError> {
        mutations.into_iter().map(|m| self.apply(m)).collect()
    }

    fn record(&mut self, change: &Change) {
        if change.modified {
            self.version += 1;
            self.is_modified = true;
        }
    }

    /// Write through `codec`; clears the modified flag on success
    pub fn write_to(&mut self, writer: &mut dyn Write, codec: &dyn DocumentCodec) -> Result<(), EditorError> {
        codec.save(&self.tree, writer)?;
        self.is_modified = false;
        Ok(())
    }

    /// Save document to its backing file
    pub fn save(&mut self, codec: &dyn DocumentCodec) -> Result<(), EditorError> {
        let path = self.path.clone().ok_or(EditorError::NotFileBacked)?;
        self.save_to(&path, codec)
    }

    /// Save to `path` and make it the backing file
    pub fn save_as(&mut self, path: impl Into<PathBuf>, codec: &dyn DocumentCodec) -> Result<(), EditorError> {
        let path = path.into();
        self.save_to(&path, codec)?;
        self.path = Some(path);
        Ok(())
    }

    /// Copy the current file according to `policy`, then save.
    ///
    /// Returns the backup location when one was written.
    pub fn save_with_backup(
        &mut self,
        codec: &dyn DocumentCodec,
        policy: &BackupPolicy,
    ) -> Result<Option<PathBuf>, EditorError> {
        let path = self.path.clone().ok_or(EditorError::NotFileBacked)?;

        let backup = if policy.enabled && path.exists() {
            let backup_path = policy.backup_path(&path, Local::now().naive_local());
            match write_backup(&path, &backup_path) {
                Ok(()) => {
                    debug!(backup = %backup_path.display(), "Wrote backup");
                    Some(backup_path)
                }
                Err(source) if policy.continue_without_backup => {
                    warn!(backup = %backup_path.display(), error = %source, "Backup failed - saving without backup");
                    None
                }
                Err(source) => {
                    return Err(EditorError::Backup {
                        path: backup_path,
                        source,
                    })
                }
            }
        } else {
            None
        };

        self.save_to(&path, codec)?;
        Ok(backup)
    }

    /// Re-read the backing file, discarding the in-memory tree.
    ///
    /// Refuses to drop unsaved changes unless `force` is set.
    pub fn reload(&mut self, codec: &dyn DocumentCodec, force: bool) -> Result<(), EditorError> {
        let path = self.path.clone().ok_or(EditorError::NotFileBacked)?;
        if self.is_modified && !force {
            return Err(EditorError::UnsavedChanges(self.document_name().to_string()));
        }

        self.tree = read_tree(&path, codec)?;
        self.is_modified = false;
        self.version += 1;
        info!(path = %path.display(), "Reloaded UI map document");
        Ok(())
    }

    fn save_to(&mut self, path: &Path, codec: &dyn DocumentCodec) -> Result<(), EditorError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer, codec)?;
        info!(path = %path.display(), "Saved UI map document");
        Ok(())
    }
}

fn read_tree(path: &Path, codec: &dyn DocumentCodec) -> Result<UiMapDocument, EditorError> {
    let mut reader = BufReader::new(File::open(path)?);
    Ok(codec.load(&mut reader)?)
}

fn write_backup(file: &Path, backup: &Path) -> std::io::Result<()> {
    if let Some(dir) = backup.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::copy(file, backup)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uimap_model::{JsonCodec, UiMap, UiObject};

    fn tree() -> UiMapDocument {
        UiMapDocument::new().with_map(
            UiMap::new("MainUIMap")
                .with_window(UiObject::new("UIMainWindow").with_child(UiObject::new("UIOkButton"))),
        )
    }

    #[test]
    fn test_create_memory_document() {
        let doc = Document::from_tree(tree());

        assert_eq!(doc.version, 0);
        assert!(!doc.is_modified());
        assert_eq!(doc.document_name(), "MainUIMap");
        assert!(doc.path.is_none());
    }

    #[test]
    fn test_failed_mutation_does_not_flag_document() {
        let mut doc = Document::from_tree(tree());

        let result = doc.apply(Mutation::RenameElement {
            path: "MainUIMap.UIMissing".to_string(),
            new_id: "Other".to_string(),
        });

        assert!(result.is_err());
        assert_eq!(doc.version, 0);
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_document_version_increments() {
        let mut doc = Document::from_tree(tree());

        let result = doc
            .apply(Mutation::RenameElement {
                path: "MainUIMap.UIMainWindow".to_string(),
                new_id: "UIAppWindow".to_string(),
            })
            .unwrap();

        assert_eq!(result.version, 1);
        assert_eq!(result.path.as_deref(), Some("MainUIMap.UIAppWindow"));
        assert!(doc.is_modified());
    }

    #[test]
    fn test_write_clears_modified_flag() {
        let mut doc = Document::from_tree(tree());
        doc.delete("MainUIMap.UIMainWindow.UIOkButton").unwrap();
        assert!(doc.is_modified());

        let mut out = Vec::new();
        doc.write_to(&mut out, &JsonCodec::new()).unwrap();
        assert!(!doc.is_modified());

        let reread = Document::from_reader(&mut out.as_slice(), &JsonCodec::new()).unwrap();
        assert!(reread.find("MainUIMap.UIMainWindow.UIOkButton").is_none());
    }

    #[test]
    fn test_memory_document_cannot_save_or_reload() {
        let mut doc = Document::from_tree(tree());
        assert!(matches!(doc.save(&JsonCodec::new()), Err(EditorError::NotFileBacked)));
        assert!(matches!(doc.reload(&JsonCodec::new(), true), Err(EditorError::NotFileBacked)));
    }

    #[test]
    fn test_backup_path_format() {
        let policy = BackupPolicy::default();
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(17, 5, 1)
            .unwrap();

        let path = policy.backup_path(Path::new("maps/NotepadUIMap1.uitest"), at);

        assert_eq!(path, PathBuf::from("maps/backups/NotepadUIMap1_20240309_170501.uitest"));
    }
}
