//! Document outline and incremental id search

use uimap_common::{walk_map, walk_object, Visitor};
use uimap_model::{UiMap, UiMapDocument, UiObject};

/// One node of the flattened tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub path: String,
    pub id: String,
    /// 0 for maps, 1 for top-level windows, ...
    pub depth: usize,
}

struct OutlineCollector {
    entries: Vec<OutlineEntry>,
}

impl Visitor for OutlineCollector {
    fn visit_map(&mut self, map: &UiMap) {
        self.entries.push(OutlineEntry {
            path: map.id.clone(),
            id: map.id.clone(),
            depth: 0,
        });
        walk_map(self, map);
    }

    fn visit_object(&mut self, path: &str, depth: usize, object: &UiObject) {
        self.entries.push(OutlineEntry {
            path: path.to_string(),
            id: object.id.clone(),
            depth,
        });
        walk_object(self, path, depth, object);
    }
}

/// Every node in document order (pre-order)
pub fn outline(doc: &UiMapDocument) -> Vec<OutlineEntry> {
    let mut collector = OutlineCollector { entries: vec![] };
    collector.visit_document(doc);
    collector.entries
}

/// Path of the next node after `after` whose id contains `text`,
/// ignoring case.
///
/// Starts from the top when `after` is `None` or no longer resolves.
/// Does not wrap around.
pub fn find_next(doc: &UiMapDocument, after: Option<&str>, text: &str) -> Option<String> {
    let needle = text.to_lowercase();
    let entries = outline(doc);

    let start = after
        .and_then(|path| entries.iter().position(|e| e.path == path))
        .map_or(0, |pos| pos + 1);

    entries[start..]
        .iter()
        .find(|e| e.id.to_lowercase().contains(&needle))
        .map(|e| e.path.clone())
}
