use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::path::UiPath;

/// Addressable UI element (window, control, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiObject {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub control_type: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub search_properties: BTreeMap<String, String>,
    #[serde(default)]
    pub descendants: Vec<UiObject>,
}

/// Named root collection of top-level windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiMap {
    pub id: String,
    #[serde(default)]
    pub top_level_windows: Vec<UiObject>,
}

/// Recorded action, optionally bound to an element path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_object_name: Option<String>,
}

/// Ordered list of recorded actions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionList {
    pub actions: Vec<Action>,
}

/// Loaded document: maps plus the action list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiMapDocument {
    #[serde(default)]
    pub maps: Vec<UiMap>,
    #[serde(default)]
    pub execute_actions: ActionList,
}

/// Result of resolving a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeRef<'a> {
    Map(&'a UiMap),
    TopLevel(&'a UiObject),
    Element(&'a UiObject),
}

impl UiObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            control_type: String::new(),
            search_properties: BTreeMap::new(),
            descendants: Vec::new(),
        }
    }

    pub fn with_control_type(mut self, control_type: impl Into<String>) -> Self {
        self.control_type = control_type.into();
        self
    }

    pub fn with_child(mut self, child: UiObject) -> Self {
        self.descendants.push(child);
        self
    }

    pub fn child(&self, id: &str) -> Option<&UiObject> {
        self.descendants.iter().find(|d| d.id == id)
    }

    pub fn child_mut(&mut self, id: &str) -> Option<&mut UiObject> {
        self.descendants.iter_mut().find(|d| d.id == id)
    }

    /// Number of nodes in this subtree, including `self`
    pub fn subtree_len(&self) -> usize {
        1 + self.descendants.iter().map(UiObject::subtree_len).sum::<usize>()
    }
}

impl UiMap {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            top_level_windows: Vec::new(),
        }
    }

    pub fn with_window(mut self, window: UiObject) -> Self {
        self.top_level_windows.push(window);
        self
    }

    pub fn window(&self, id: &str) -> Option<&UiObject> {
        self.top_level_windows.iter().find(|w| w.id == id)
    }
}

impl Action {
    pub fn new(id: impl Into<String>, ui_object_name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            ui_object_name: ui_object_name.map(str::to_string),
        }
    }

    /// True when the action references an element
    pub fn is_bound(&self) -> bool {
        self.ui_object_name.as_deref().is_some_and(|n| !n.is_empty())
    }
}

impl ActionList {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Action> {
        self.actions.iter_mut()
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Remove the action with the given id, returning it if present
    pub fn delete(&mut self, id: &str) -> Option<Action> {
        let pos = self.actions.iter().position(|a| a.id == id)?;
        Some(self.actions.remove(pos))
    }
}

impl UiMapDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map(mut self, map: UiMap) -> Self {
        self.maps.push(map);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.execute_actions.push(action);
        self
    }

    /// Id of the first map, or empty when the document has none
    pub fn document_name(&self) -> &str {
        self.maps.first().map(|m| m.id.as_str()).unwrap_or_default()
    }

    pub fn map(&self, id: &str) -> Option<&UiMap> {
        self.maps.iter().find(|m| m.id == id)
    }

    pub fn map_mut(&mut self, id: &str) -> Option<&mut UiMap> {
        self.maps.iter_mut().find(|m| m.id == id)
    }

    /// Resolve a dotted path. Missing nodes yield `None`, never an error.
    pub fn find(&self, path: &str) -> Option<NodeRef<'_>> {
        UiPath::parse(path).and_then(|p| self.resolve(&p))
    }

    /// Resolve an element path (maps are not `UiObject`s)
    pub fn find_object(&self, path: &str) -> Option<&UiObject> {
        match self.find(path)? {
            NodeRef::TopLevel(obj) | NodeRef::Element(obj) => Some(obj),
            NodeRef::Map(_) => None,
        }
    }

    pub fn resolve(&self, path: &UiPath) -> Option<NodeRef<'_>> {
        let segments = path.segments();
        let map = self.map(segments.first()?)?;
        let Some(window_id) = segments.get(1) else {
            return Some(NodeRef::Map(map));
        };

        let mut current = map.window(window_id)?;
        if segments.len() == 2 {
            return Some(NodeRef::TopLevel(current));
        }
        for id in &segments[2..] {
            current = current.child(id)?;
        }
        Some(NodeRef::Element(current))
    }

    pub fn resolve_object_mut(&mut self, path: &UiPath) -> Option<&mut UiObject> {
        let segments = path.segments();
        if segments.len() < 2 {
            return None;
        }
        let map = self.map_mut(&segments[0])?;
        let mut current = map
            .top_level_windows
            .iter_mut()
            .find(|w| w.id == segments[1])?;
        for id in &segments[2..] {
            current = current.child_mut(id)?;
        }
        Some(current)
    }

    /// Child collection of the node at `path`: a map's top-level windows
    /// or an element's descendants.
    pub fn children_mut(&mut self, path: &UiPath) -> Option<&mut Vec<UiObject>> {
        if path.is_map() {
            return self.map_mut(path.map_id()).map(|m| &mut m.top_level_windows);
        }
        self.resolve_object_mut(path).map(|o| &mut o.descendants)
    }
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            NodeRef::Map(map) => &map.id,
            NodeRef::TopLevel(obj) | NodeRef::Element(obj) => &obj.id,
        }
    }

    /// Ids of the node's direct children
    pub fn child_ids(&self) -> Vec<&'a str> {
        match self {
            NodeRef::Map(map) => map.top_level_windows.iter().map(|w| w.id.as_str()).collect(),
            NodeRef::TopLevel(obj) | NodeRef::Element(obj) => {
                obj.descendants.iter().map(|d| d.id.as_str()).collect()
            }
        }
    }

    pub fn as_object(&self) -> Option<&'a UiObject> {
        match self {
            NodeRef::Map(_) => None,
            NodeRef::TopLevel(obj) | NodeRef::Element(obj) => Some(obj),
        }
    }

    pub fn is_top_level(&self) -> bool {
        matches!(self, NodeRef::TopLevel(_))
    }
}
