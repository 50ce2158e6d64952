//! # Subtree Merge
//!
//! Reconciles two subtrees that must occupy the same path. Destination
//! nodes stay where they are; source children are either grafted whole
//! (no id collision) or merged recursively (collision).

use uimap_model::UiObject;

/// Incorporate every descendant of `source` into `destination`.
///
/// Source children are visited from the last index down. A child whose id
/// is free under `destination` is detached and appended there, subtree and
/// all, without being rescanned. A colliding child is merged into its
/// namesake. Afterwards `source` only retains (emptied) colliding children;
/// removing it is up to the caller.
///
/// Returns the number of grafted subtrees.
pub fn merge_into(source: &mut UiObject, destination: &mut UiObject) -> usize {
    let mut grafted = 0;

    for i in (0..source.descendants.len()).rev() {
        let existing = destination
            .descendants
            .iter()
            .position(|d| d.id == source.descendants[i].id);

        match existing {
            None => {
                let child = source.descendants.remove(i);
                destination.descendants.push(child);
                grafted += 1;
            }
            Some(pos) => {
                grafted += merge_into(&mut source.descendants[i], &mut destination.descendants[pos]);
            }
        }
    }

    grafted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(obj: &UiObject) -> Vec<&str> {
        obj.descendants.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_graft_without_collision() {
        let mut source = UiObject::new("UIItemWindow").with_child(UiObject::new("UIFindwhatEdit"));
        let mut destination =
            UiObject::new("UIItemWindow").with_child(UiObject::new("UIReplacewithEdit"));

        let grafted = merge_into(&mut source, &mut destination);

        assert_eq!(grafted, 1);
        assert!(source.descendants.is_empty());
        assert_eq!(ids(&destination), vec!["UIReplacewithEdit", "UIFindwhatEdit"]);
    }

    #[test]
    fn test_grafted_children_arrive_in_reverse_order() {
        let mut source = UiObject::new("S")
            .with_child(UiObject::new("A"))
            .with_child(UiObject::new("B"))
            .with_child(UiObject::new("C"));
        let mut destination = UiObject::new("D").with_child(UiObject::new("X"));

        merge_into(&mut source, &mut destination);

        assert_eq!(ids(&destination), vec!["X", "C", "B", "A"]);
    }

    #[test]
    fn test_recursive_merge_keeps_destination_nodes() {
        let mut source = UiObject::new("Window").with_child(
            UiObject::new("MenuBar")
                .with_control_type("MenuBar")
                .with_child(UiObject::new("Edit").with_child(UiObject::new("Undo"))),
        );
        let mut destination = UiObject::new("Window").with_child(
            UiObject::new("MenuBar")
                .with_control_type("ToolBar")
                .with_child(UiObject::new("File"))
                .with_child(UiObject::new("Edit").with_child(UiObject::new("Cut"))),
        );

        let grafted = merge_into(&mut source, &mut destination);
        assert_eq!(grafted, 1);

        let menu = destination.child("MenuBar").unwrap();
        assert_eq!(menu.control_type, "ToolBar");
        assert_eq!(ids(menu), vec!["File", "Edit"]);
        assert_eq!(ids(menu.child("Edit").unwrap()), vec!["Cut", "Undo"]);

        // colliding shells stay behind, emptied
        let leftover = source.child("MenuBar").unwrap();
        assert_eq!(ids(leftover), vec!["Edit"]);
        assert!(leftover.child("Edit").unwrap().descendants.is_empty());
    }

    #[test]
    fn test_grafted_subtree_is_not_rescanned() {
        let mut source = UiObject::new("S")
            .with_child(UiObject::new("New").with_child(UiObject::new("Shared")));
        let mut destination = UiObject::new("D").with_child(UiObject::new("Shared"));

        merge_into(&mut source, &mut destination);

        // "Shared" under "New" travels with its parent instead of merging
        assert_eq!(ids(&destination), vec!["Shared", "New"]);
        assert_eq!(ids(destination.child("New").unwrap()), vec!["Shared"]);
    }

    #[test]
    fn test_deep_merge() {
        fn chain(depth: usize, leaf: &str) -> UiObject {
            let mut node = UiObject::new(leaf);
            for i in (0..depth).rev() {
                node = UiObject::new(format!("L{i}")).with_child(node);
            }
            node
        }

        let mut source = UiObject::new("root").with_child(chain(200, "from-source"));
        let mut destination = UiObject::new("root").with_child(chain(200, "from-destination"));

        merge_into(&mut source, &mut destination);

        let mut node = destination.child("L0").unwrap();
        for i in 1..200 {
            node = node.child(&format!("L{i}")).unwrap();
        }
        assert_eq!(ids(node), vec!["from-destination", "from-source"]);
    }
}
