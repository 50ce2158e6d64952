use uimap_model::path::join;
use uimap_model::{UiMap, UiMapDocument, UiObject};

/// Visitor pattern for traversing a UI map document immutably
///
/// The default implementations walk maps, then top-level windows, then
/// descendants in document order. Each element is visited together with its
/// dotted path and depth (maps are depth 0, top-level windows depth 1).
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &UiMapDocument) {
        walk_document(self, doc);
    }

    fn visit_map(&mut self, map: &UiMap) {
        walk_map(self, map);
    }

    fn visit_object(&mut self, path: &str, depth: usize, object: &UiObject) {
        walk_object(self, path, depth, object);
    }
}

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &UiMapDocument) {
    for map in &doc.maps {
        visitor.visit_map(map);
    }
}

pub fn walk_map<V: Visitor>(visitor: &mut V, map: &UiMap) {
    for window in &map.top_level_windows {
        let path = join(&map.id, &window.id);
        visitor.visit_object(&path, 1, window);
    }
}

pub fn walk_object<V: Visitor>(visitor: &mut V, path: &str, depth: usize, object: &UiObject) {
    for child in &object.descendants {
        let child_path = join(path, &child.id);
        visitor.visit_object(&child_path, depth + 1, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PathCollector {
        paths: Vec<(String, usize)>,
    }

    impl Visitor for PathCollector {
        fn visit_map(&mut self, map: &UiMap) {
            self.paths.push((map.id.clone(), 0));
            walk_map(self, map);
        }

        fn visit_object(&mut self, path: &str, depth: usize, object: &UiObject) {
            self.paths.push((path.to_string(), depth));
            walk_object(self, path, depth, object);
        }
    }

    #[test]
    fn test_walk_visits_in_document_order() {
        let doc = UiMapDocument::new().with_map(
            UiMap::new("M")
                .with_window(
                    UiObject::new("W1")
                        .with_child(UiObject::new("A").with_child(UiObject::new("A1")))
                        .with_child(UiObject::new("B")),
                )
                .with_window(UiObject::new("W2")),
        );

        let mut collector = PathCollector { paths: vec![] };
        collector.visit_document(&doc);

        let expected = vec![
            ("M", 0),
            ("M.W1", 1),
            ("M.W1.A", 2),
            ("M.W1.A.A1", 3),
            ("M.W1.B", 2),
            ("M.W2", 1),
        ];
        let actual: Vec<(&str, usize)> = collector
            .paths
            .iter()
            .map(|(p, d)| (p.as_str(), *d))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_overriding_without_walking_prunes_subtree() {
        struct TopLevelOnly(Vec<String>);

        impl Visitor for TopLevelOnly {
            fn visit_object(&mut self, path: &str, _depth: usize, _object: &UiObject) {
                self.0.push(path.to_string());
            }
        }

        let doc = UiMapDocument::new().with_map(
            UiMap::new("M").with_window(UiObject::new("W").with_child(UiObject::new("C"))),
        );

        let mut visitor = TopLevelOnly(vec![]);
        visitor.visit_document(&doc);
        assert_eq!(visitor.0, vec!["M.W"]);
    }
}
