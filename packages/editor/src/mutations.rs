//! # Structural Mutations
//!
//! Serializable, path-addressed operations on a UI map document.
//!
//! ## Mutation Semantics
//!
//! ### MoveElement
//! - Relocates a subtree under a new parent
//! - Merges into an existing same-id child instead of duplicating it
//! - Top-level windows may only move directly under a map
//! - Fails if it would place a node inside itself
//!
//! ### RenameElement
//! - Changes a node's id in place and rewrites bound actions
//! - Never merges: fails if the new path is taken
//!
//! ### RemoveElement
//! - Removes a node, its descendants and the actions bound to them
//! - Removing a missing node is a no-op

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uimap_model::UiMapDocument;

use crate::engine::{self, Change};

/// Path-based structural mutations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Move an element under a new parent within the same document
    MoveElement {
        source_path: String,
        destination_parent_path: String,
    },

    /// Remove an element and everything under it
    RemoveElement { path: String },

    /// Give an element a new id
    RenameElement { path: String, new_id: String },
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    Unsupported,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Could not find UI object with path '{0}'")]
    NodeNotFound(String),

    #[error("Could not find source UI object with path '{0}'")]
    SourceNotFound(String),

    #[error("Could not find source parent UI object with path '{0}'")]
    SourceParentNotFound(String),

    #[error("Could not find destination parent UI object with path '{0}'")]
    DestinationParentNotFound(String),

    #[error("Could not find UIMap '{0}'")]
    MapNotFound(String),

    #[error("A top level element ({path}) can only be moved to a UIMap root, not '{destination}'")]
    TopLevelRequiresMap { path: String, destination: String },

    #[error("Element '{path}' cannot be placed directly under UIMap '{destination}'")]
    ElementRequiresElementParent { path: String, destination: String },

    #[error("UIMap '{0}' cannot be moved")]
    CannotMoveMap(String),

    #[error("Cannot move '{path}' into its own subtree '{destination}'")]
    CycleDetected { path: String, destination: String },

    #[error("An UI element with path '{0}' already exists")]
    AlreadyExists(String),

    #[error("Invalid element id '{0}'")]
    InvalidIdentifier(String),

    #[error("Source document contains actions referencing '{0}'; moving them between documents is not supported")]
    CrossDocumentActions(String),
}

impl MutationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MutationError::NodeNotFound(_)
            | MutationError::SourceNotFound(_)
            | MutationError::SourceParentNotFound(_)
            | MutationError::DestinationParentNotFound(_)
            | MutationError::MapNotFound(_) => ErrorKind::NotFound,

            MutationError::TopLevelRequiresMap { .. }
            | MutationError::ElementRequiresElementParent { .. }
            | MutationError::CannotMoveMap(_)
            | MutationError::CycleDetected { .. }
            | MutationError::AlreadyExists(_)
            | MutationError::InvalidIdentifier(_) => ErrorKind::InvalidArgument,

            MutationError::CrossDocumentActions(_) => ErrorKind::Unsupported,
        }
    }
}

impl Mutation {
    /// Apply mutation to the document with validation
    pub fn apply(&self, doc: &mut UiMapDocument) -> Result<Change, MutationError> {
        match self {
            Mutation::MoveElement {
                source_path,
                destination_parent_path,
            } => engine::move_element(doc, None, source_path, destination_parent_path),

            Mutation::RemoveElement { path } => engine::delete(doc, path),

            Mutation::RenameElement { path, new_id } => engine::rename(doc, path, new_id),
        }
    }

    /// Validate without applying
    pub fn validate(&self, doc: &UiMapDocument) -> Result<(), MutationError> {
        match self {
            Mutation::MoveElement {
                source_path,
                destination_parent_path,
            } => engine::plan_move(doc, None, source_path, destination_parent_path).map(|_| ()),

            Mutation::RemoveElement { .. } => Ok(()),

            Mutation::RenameElement { path, new_id } => {
                engine::plan_rename(doc, path, new_id).map(|_| ())
            }
        }
    }

    /// Path the mutation operates on
    pub fn target_path(&self) -> &str {
        match self {
            Mutation::MoveElement { source_path, .. } => source_path,
            Mutation::RemoveElement { path } | Mutation::RenameElement { path, .. } => path,
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// New version number
    pub version: u64,

    /// Path of the affected node afterwards (none after a removal)
    pub path: Option<String>,

    /// Whether a move merged into an existing node
    pub merged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uimap_model::{UiMap, UiObject};

    fn doc() -> UiMapDocument {
        UiMapDocument::new().with_map(
            UiMap::new("M")
                .with_window(UiObject::new("W1").with_child(UiObject::new("Button")))
                .with_window(UiObject::new("W2")),
        )
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::RenameElement {
            path: "M.W1.Button".to_string(),
            new_id: "OkButton".to_string(),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_validation_rejects_empty_paths() {
        let doc = doc();

        let mutation = Mutation::RenameElement {
            path: "".to_string(),
            new_id: "test".to_string(),
        };

        assert!(mutation.validate(&doc).is_err());
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let doc = doc();
        let mutation = Mutation::MoveElement {
            source_path: "M.W1.Button".to_string(),
            destination_parent_path: "M.W2".to_string(),
        };

        assert!(mutation.validate(&doc).is_ok());
        assert!(doc.find("M.W1.Button").is_some());
    }

    #[test]
    fn test_apply_dispatches() {
        let mut doc = doc();

        let moved = Mutation::MoveElement {
            source_path: "M.W1.Button".to_string(),
            destination_parent_path: "M.W2".to_string(),
        }
        .apply(&mut doc)
        .unwrap();
        assert_eq!(moved.path.as_deref(), Some("M.W2.Button"));

        let removed = Mutation::RemoveElement {
            path: "M.W2.Button".to_string(),
        }
        .apply(&mut doc)
        .unwrap();
        assert!(removed.modified);
        assert!(doc.find("M.W2.Button").is_none());
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            MutationError::MapNotFound("M".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            MutationError::AlreadyExists("M.W".into()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            MutationError::CrossDocumentActions("M.W".into()).kind(),
            ErrorKind::Unsupported
        );
    }
}
