//! # Edit Session Management
//!
//! An EditSession is one open document plus the paths currently selected
//! in it. A Workbench holds two sessions side by side so elements can be
//! dragged from one document into the other.

use tracing::debug;
use uimap_model::path::{is_same_or_descendant, rewrite_prefix};

use crate::engine::Change;
use crate::{Document, EditorError, Mutation, MutationResult};

/// Single open document and its selection
#[derive(Debug)]
pub struct EditSession {
    /// Session identifier
    pub id: String,

    /// Document being edited
    pub document: Document,

    /// Currently selected element paths
    pub selected_paths: Vec<String>,
}

impl EditSession {
    /// Create new edit session
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self {
            id: id.into(),
            document,
            selected_paths: Vec::new(),
        }
    }

    /// Update selection
    pub fn set_selection(&mut self, paths: Vec<String>) {
        self.selected_paths = paths;
    }

    /// Apply a mutation and keep the selection pointing at live nodes
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.document.apply(mutation.clone())?;

        match &mutation {
            Mutation::MoveElement { .. } => {
                self.selected_paths = result.path.iter().cloned().collect();
            }
            Mutation::RenameElement { path, .. } => {
                if let Some(new_path) = &result.path {
                    self.rewrite_selection(path, new_path);
                }
            }
            Mutation::RemoveElement { path } => self.drop_selection_under(path),
        }

        Ok(result)
    }

    /// Delete every selected element; returns how many were removed
    pub fn delete_selected(&mut self) -> Result<usize, EditorError> {
        let paths = std::mem::take(&mut self.selected_paths);
        let mut removed = 0;

        for path in &paths {
            // an ancestor deleted earlier in the loop makes this a no-op
            if self.document.delete(path)?.modified {
                removed += 1;
            }
        }

        debug!(session = %self.id, selected = paths.len(), removed, "Deleted selection");
        Ok(removed)
    }

    /// Move every selected element under `destination_parent_path`
    pub fn move_selected(&mut self, destination_parent_path: &str) -> Result<Vec<Change>, EditorError> {
        let paths = self.selected_paths.clone();
        let mut changes = Vec::with_capacity(paths.len());

        for path in &paths {
            changes.push(self.document.move_element(path, destination_parent_path)?);
        }

        self.selected_paths = changes.iter().filter_map(|c| c.path.clone()).collect();
        Ok(changes)
    }

    fn rewrite_selection(&mut self, old: &str, new: &str) {
        for selected in &mut self.selected_paths {
            if let Some(updated) = rewrite_prefix(selected, old, new) {
                *selected = updated;
            }
        }
    }

    fn drop_selection_under(&mut self, path: &str) {
        self.selected_paths.retain(|p| !is_same_or_descendant(p, path));
    }
}

/// One side of a workbench
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Left,
    Right,
}

/// Two documents open side by side
#[derive(Debug)]
pub struct Workbench {
    pub left: EditSession,
    pub right: EditSession,
}

impl Workbench {
    pub fn new(left: Document, right: Document) -> Self {
        Self {
            left: EditSession::new("left", left),
            right: EditSession::new("right", right),
        }
    }

    pub fn pane(&self, pane: Pane) -> &EditSession {
        match pane {
            Pane::Left => &self.left,
            Pane::Right => &self.right,
        }
    }

    pub fn pane_mut(&mut self, pane: Pane) -> &mut EditSession {
        match pane {
            Pane::Left => &mut self.left,
            Pane::Right => &mut self.right,
        }
    }

    /// Move `source_path` from pane `from` under `destination_parent_path`
    /// in pane `to`. Equal panes make this a same-document move.
    pub fn move_between(
        &mut self,
        from: Pane,
        to: Pane,
        source_path: &str,
        destination_parent_path: &str,
    ) -> Result<Change, EditorError> {
        let change = if from == to {
            self.pane_mut(to)
                .document
                .move_element(source_path, destination_parent_path)?
        } else {
            let (source, target) = match to {
                Pane::Left => (&mut self.right, &mut self.left),
                Pane::Right => (&mut self.left, &mut self.right),
            };
            let change = target
                .document
                .move_from(&mut source.document, source_path, destination_parent_path)?;
            source.drop_selection_under(source_path);
            change
        };

        self.pane_mut(to).selected_paths = change.path.iter().cloned().collect();
        Ok(change)
    }

    /// One line per pane with unsaved changes
    pub fn modified_summary(&self) -> Vec<String> {
        [&self.left, &self.right]
            .into_iter()
            .filter(|s| s.document.is_modified())
            .map(|s| format!("UIMap '{}' has been modified.", s.document.document_name()))
            .collect()
    }
}
