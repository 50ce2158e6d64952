//! # UI Map Editor
//!
//! Core editing engine for UI map documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: codec → maps + actions               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Load/save documents (with backups)       │
//! │  - Find / Move / Delete / Rename by path    │
//! │  - Merge subtrees on move collisions        │
//! │  - Keep action references consistent       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ sessions: selection + two-pane workbench    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Paths are the only handles**: every call re-resolves its dotted path
//! 2. **Validate, then mutate**: no call leaves a half-applied change behind
//! 3. **Actions follow their elements**: moves and renames rewrite references,
//!    deletes prune them
//! 4. **Merge, never duplicate**: moving onto a namesake unions the subtrees
//!
//! ## Usage
//!
//! ```rust,ignore
//! use uimap_editor::{Document, Mutation};
//! use uimap_model::JsonCodec;
//!
//! let codec = JsonCodec::new();
//! let mut doc = Document::load("NotepadUIMap1.json", &codec)?;
//!
//! doc.apply(Mutation::MoveElement {
//!     source_path: "NotepadUIMap1.UIFindWindow.UIItemWindow".to_string(),
//!     destination_parent_path: "NotepadUIMap1.UIReplaceWindow".to_string(),
//! })?;
//!
//! let new_path = doc.rename("NotepadUIMap1.UIReplaceWindow", "UIReplaceDialog")?;
//! doc.save(&codec)?;
//! ```

mod document;
mod errors;
mod merge;
mod mutations;
mod search;
mod session;

pub mod engine;

pub use document::{BackupPolicy, Document};
pub use engine::{Change, MovePlan};
pub use errors::EditorError;
pub use merge::merge_into;
pub use mutations::{ErrorKind, Mutation, MutationError, MutationResult};
pub use search::{find_next, outline, OutlineEntry};
pub use session::{EditSession, Pane, Workbench};

// Re-export model types for convenience
pub use uimap_model::{Action, NodeRef, UiMap, UiMapDocument, UiObject};
