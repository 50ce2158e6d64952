//! # Structural Editing Engine
//!
//! Path-based Find / Move / Delete / Rename over one or two
//! [`UiMapDocument`]s, keeping every action's `ui_object_name` in step with
//! the tree.
//!
//! ## Guarantees
//!
//! - Every precondition of a call is checked before anything is mutated.
//! - Action prefixes are matched per path segment: `A.B` covers `A.B.C`
//!   but never `A.BC`.
//! - Moves onto an existing namesake merge instead of duplicating.
//!
//! Engine functions report what they changed through [`Change`]; flagging
//! the owning document as modified is left to the caller.

use tracing::{debug, instrument};
use uimap_model::path::{is_same_or_descendant, is_valid_identifier, rewrite_prefix};
use uimap_model::{NodeRef, UiMapDocument, UiObject, UiPath};

use crate::merge::merge_into;
use crate::mutations::MutationError;

/// Outcome of a structural operation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Change {
    /// Whether the document(s) changed
    pub modified: bool,

    /// Path of the affected node after the operation (none after a delete)
    pub path: Option<String>,

    /// Whether a move was resolved by merging into an existing node
    pub merged: bool,
}

impl Change {
    fn unchanged(path: Option<String>) -> Self {
        Self {
            modified: false,
            path,
            merged: false,
        }
    }
}

/// Validated move, ready to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub source: UiPath,
    pub source_parent: UiPath,
    pub destination_parent: UiPath,
    pub destination: UiPath,
    pub top_level: bool,
    pub merge: bool,
    pub same_document: bool,
}

impl MovePlan {
    /// Moving a node onto its current parent
    pub fn is_noop(&self) -> bool {
        self.same_document && self.destination == self.source
    }
}

/// Resolve a dotted path. Absence is not an error.
pub fn find<'a>(doc: &'a UiMapDocument, path: &str) -> Option<NodeRef<'a>> {
    doc.find(path)
}

/// Id of the document's first map, or empty when it has none
pub fn document_name(doc: &UiMapDocument) -> &str {
    doc.document_name()
}

/// Check every precondition of a move without touching either document.
///
/// `source` is `None` when the node moves within `target`.
pub fn plan_move(
    target: &UiMapDocument,
    source: Option<&UiMapDocument>,
    source_path: &str,
    destination_parent_path: &str,
) -> Result<MovePlan, MutationError> {
    let same_document = source.is_none();
    let source_doc = source.unwrap_or(target);

    let src = UiPath::parse(source_path)
        .ok_or_else(|| MutationError::SourceNotFound(source_path.to_string()))?;
    let node = source_doc
        .resolve(&src)
        .ok_or_else(|| MutationError::SourceNotFound(source_path.to_string()))?;
    if let NodeRef::Map(map) = node {
        return Err(MutationError::CannotMoveMap(map.id.clone()));
    }

    let source_parent = src
        .parent()
        .ok_or_else(|| MutationError::SourceParentNotFound(source_path.to_string()))?;
    if source_doc.resolve(&source_parent).is_none() {
        return Err(MutationError::SourceParentNotFound(source_parent.to_string()));
    }

    // actions never migrate between documents
    if !same_document {
        let src_str = src.to_string();
        let bound = source_doc.execute_actions.iter().any(|a| {
            a.ui_object_name
                .as_deref()
                .is_some_and(|name| is_same_or_descendant(name, &src_str))
        });
        if bound {
            return Err(MutationError::CrossDocumentActions(src_str));
        }
    }

    let top_level = node.is_top_level();
    let destination_parent = if top_level {
        if destination_parent_path.contains(uimap_model::path::SEPARATOR) {
            return Err(MutationError::TopLevelRequiresMap {
                path: src.to_string(),
                destination: destination_parent_path.to_string(),
            });
        }
        let map_path = UiPath::parse(destination_parent_path)
            .ok_or_else(|| MutationError::MapNotFound(destination_parent_path.to_string()))?;
        if target.map(map_path.map_id()).is_none() {
            return Err(MutationError::MapNotFound(destination_parent_path.to_string()));
        }
        if source_doc.map(source_parent.map_id()).is_none() {
            return Err(MutationError::MapNotFound(source_parent.to_string()));
        }
        map_path
    } else {
        let dest = UiPath::parse(destination_parent_path).ok_or_else(|| {
            MutationError::DestinationParentNotFound(destination_parent_path.to_string())
        })?;
        match target.resolve(&dest) {
            None => {
                return Err(MutationError::DestinationParentNotFound(
                    destination_parent_path.to_string(),
                ))
            }
            Some(NodeRef::Map(_)) => {
                return Err(MutationError::ElementRequiresElementParent {
                    path: src.to_string(),
                    destination: dest.to_string(),
                })
            }
            Some(_) => {}
        }
        if same_document && dest.starts_with(&src) {
            return Err(MutationError::CycleDetected {
                path: src.to_string(),
                destination: dest.to_string(),
            });
        }
        dest
    };

    let destination = destination_parent.child(src.leaf());
    let merge = target.resolve(&destination).is_some();

    Ok(MovePlan {
        source: src,
        source_parent,
        destination_parent,
        destination,
        top_level,
        merge,
        same_document,
    })
}

/// Relocate the subtree at `source_path` under `destination_parent_path`.
///
/// `source` holds the document the node comes from, or `None` to move
/// within `target`. When the destination already has a child with the same
/// id the two subtrees are merged and the source location is deleted.
#[instrument(skip(target, source), fields(cross_document = source.is_some()))]
pub fn move_element(
    target: &mut UiMapDocument,
    mut source: Option<&mut UiMapDocument>,
    source_path: &str,
    destination_parent_path: &str,
) -> Result<Change, MutationError> {
    let plan = plan_move(target, source.as_deref(), source_path, destination_parent_path)?;
    let destination_str = plan.destination.to_string();

    if plan.is_noop() {
        debug!(path = %destination_str, "Element already under destination parent");
        return Ok(Change::unchanged(Some(destination_str)));
    }

    let source_str = plan.source.to_string();
    if plan.same_document {
        let rewritten = rewrite_actions(target, &source_str, &destination_str);
        debug!(from = %source_str, to = %destination_str, rewritten, "Rewrote action references");
    }

    let mut node = match source.as_deref_mut() {
        Some(doc) => detach(doc, &plan.source_parent, plan.source.leaf())?,
        None => detach(target, &plan.source_parent, plan.source.leaf())?,
    };

    if plan.merge {
        let existing = target
            .resolve_object_mut(&plan.destination)
            .ok_or_else(|| MutationError::DestinationParentNotFound(destination_str.clone()))?;
        let grafted = merge_into(&mut node, existing);
        debug!(destination = %destination_str, grafted, "Merged into existing element");

        let origin = match source.as_deref_mut() {
            Some(doc) => doc,
            None => &mut *target,
        };
        prune_actions(origin, &source_str);
    } else {
        target
            .children_mut(&plan.destination_parent)
            .ok_or_else(|| {
                MutationError::DestinationParentNotFound(plan.destination_parent.to_string())
            })?
            .push(node);
    }

    debug!(from = %source_str, to = %destination_str, merged = plan.merge, top_level = plan.top_level, "Moved element");

    Ok(Change {
        modified: true,
        path: Some(destination_str),
        merged: plan.merge,
    })
}

/// Remove the node at `path`, its descendants, and every action bound to them.
///
/// Deleting a path that does not resolve is a no-op.
#[instrument(skip(doc))]
pub fn delete(doc: &mut UiMapDocument, path: &str) -> Result<Change, MutationError> {
    let Some(target) = UiPath::parse(path) else {
        return Ok(Change::unchanged(None));
    };
    if doc.resolve(&target).is_none() {
        debug!("Nothing to delete");
        return Ok(Change::unchanged(None));
    }

    let target_str = target.to_string();
    match target.parent() {
        None => {
            let pruned = prune_actions(doc, &target_str);
            doc.maps.retain(|m| m.id != target.map_id());
            debug!(pruned, "Deleted map");
        }
        Some(parent) => {
            if doc.resolve(&parent).is_none() {
                return Err(MutationError::SourceParentNotFound(parent.to_string()));
            }
            let pruned = prune_actions(doc, &target_str);
            detach(doc, &parent, target.leaf())?;
            debug!(pruned, "Deleted element");
        }
    }

    Ok(Change {
        modified: true,
        path: None,
        merged: false,
    })
}

/// Check the preconditions of a rename and compute the resulting path
pub fn plan_rename(doc: &UiMapDocument, path: &str, new_id: &str) -> Result<(UiPath, UiPath), MutationError> {
    let current = UiPath::parse(path).ok_or_else(|| MutationError::NodeNotFound(path.to_string()))?;
    if doc.resolve(&current).is_none() {
        return Err(MutationError::NodeNotFound(path.to_string()));
    }
    if !is_valid_identifier(new_id) {
        return Err(MutationError::InvalidIdentifier(new_id.to_string()));
    }

    let renamed = match current.parent() {
        Some(parent) => parent.child(new_id),
        None => UiPath::from_segments([new_id]),
    };
    if doc.resolve(&renamed).is_some() {
        return Err(MutationError::AlreadyExists(renamed.to_string()));
    }

    Ok((current, renamed))
}

/// Change a node's id in place and rewrite every action reference.
///
/// Returns the node's new path. Unlike a move, a rename never merges.
#[instrument(skip(doc))]
pub fn rename(doc: &mut UiMapDocument, path: &str, new_id: &str) -> Result<Change, MutationError> {
    let (current, renamed) = plan_rename(doc, path, new_id)?;
    let current_str = current.to_string();
    let renamed_str = renamed.to_string();

    if current.is_map() {
        let map = doc
            .map_mut(current.map_id())
            .ok_or_else(|| MutationError::NodeNotFound(current_str.clone()))?;
        map.id = new_id.to_string();
    } else {
        let node = doc
            .resolve_object_mut(&current)
            .ok_or_else(|| MutationError::NodeNotFound(current_str.clone()))?;
        node.id = new_id.to_string();
    }

    let rewritten = rewrite_actions(doc, &current_str, &renamed_str);
    debug!(from = %current_str, to = %renamed_str, rewritten, "Renamed element");

    Ok(Change {
        modified: true,
        path: Some(renamed_str),
        merged: false,
    })
}

/// Detach the child `id` from the node at `parent`
fn detach(doc: &mut UiMapDocument, parent: &UiPath, id: &str) -> Result<UiObject, MutationError> {
    let children = doc
        .children_mut(parent)
        .ok_or_else(|| MutationError::SourceParentNotFound(parent.to_string()))?;
    let pos = children
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| MutationError::SourceNotFound(parent.child(id).to_string()))?;
    Ok(children.remove(pos))
}

/// Rewrite action references under `old` to live under `new`, in list order
fn rewrite_actions(doc: &mut UiMapDocument, old: &str, new: &str) -> usize {
    let mut rewritten = 0;
    for action in doc.execute_actions.iter_mut() {
        let Some(name) = action.ui_object_name.as_deref() else {
            continue;
        };
        if let Some(updated) = rewrite_prefix(name, old, new) {
            action.ui_object_name = Some(updated);
            rewritten += 1;
        }
    }
    rewritten
}

/// Drop every action bound to `path` or anything under it
fn prune_actions(doc: &mut UiMapDocument, path: &str) -> usize {
    let mut pruned = 0;
    for i in (0..doc.execute_actions.len()).rev() {
        let bound = doc.execute_actions.actions[i]
            .ui_object_name
            .as_deref()
            .is_some_and(|name| is_same_or_descendant(name, path));
        if bound {
            doc.execute_actions.actions.remove(i);
            pruned += 1;
        }
    }
    pruned
}
