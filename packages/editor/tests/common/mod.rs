//! Shared fixtures for editor integration tests

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::PathBuf;

use uimap_editor::{Document, NodeRef, UiObject};
use uimap_model::JsonCodec;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load(name: &str) -> Document {
    Document::load(fixture_path(name), &JsonCodec::new()).unwrap()
}

/// Ids of every node under `node` (excluding the node itself)
pub fn descendant_ids(node: NodeRef<'_>) -> BTreeSet<String> {
    fn collect(obj: &UiObject, out: &mut BTreeSet<String>) {
        for child in &obj.descendants {
            out.insert(child.id.clone());
            collect(child, out);
        }
    }

    let mut ids = BTreeSet::new();
    match node {
        NodeRef::Map(map) => {
            for window in &map.top_level_windows {
                ids.insert(window.id.clone());
                collect(window, &mut ids);
            }
        }
        NodeRef::TopLevel(obj) | NodeRef::Element(obj) => collect(obj, &mut ids),
    }
    ids
}

pub fn action_names(doc: &Document) -> Vec<Option<String>> {
    doc.tree()
        .execute_actions
        .iter()
        .map(|a| a.ui_object_name.clone())
        .collect()
}
