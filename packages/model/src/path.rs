//! # Dotted Paths
//!
//! Every node in a UI map document is addressed by a dotted path:
//!
//! ```text
//! MapId.TopLevelId.ChildId.ChildId...
//!   ↓       ↓         ↓
//!  map   window   descendants
//! ```
//!
//! A path of length 1 denotes a map, length 2 a top-level window and
//! anything longer a nested element. Nodes never cache their path; it is
//! always recomputed from the chain of ids.

use std::fmt;
use std::str::FromStr;

pub const SEPARATOR: char = '.';

/// Parsed dotted path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UiPath {
    segments: Vec<String>,
}

impl UiPath {
    /// Parse a dotted path.
    ///
    /// Returns `None` for empty or whitespace-only input. The map and
    /// top-level segments are kept verbatim; empty segments after them are
    /// skipped, so `"Map.Window.Child."` addresses `Child`.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }

        let segments = raw
            .split(SEPARATOR)
            .enumerate()
            .filter(|(i, s)| *i < 2 || !s.trim().is_empty())
            .map(|(_, s)| s.to_string())
            .collect();

        Some(Self { segments })
    }

    /// Build a path directly from segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Id of the map this path starts in
    pub fn map_id(&self) -> &str {
        self.segments.first().map(String::as_str).unwrap_or_default()
    }

    /// Last id in the chain
    pub fn leaf(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn is_map(&self) -> bool {
        self.segments.len() == 1
    }

    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 2
    }

    /// Path of the containing node (`None` for a map)
    pub fn parent(&self) -> Option<UiPath> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn child(&self, id: &str) -> UiPath {
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        Self { segments }
    }

    /// True when `self` equals `ancestor` or lies underneath it
    pub fn starts_with(&self, ancestor: &UiPath) -> bool {
        self.segments.starts_with(&ancestor.segments)
    }
}

impl fmt::Display for UiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Empty path")]
pub struct EmptyPathError;

impl FromStr for UiPath {
    type Err = EmptyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UiPath::parse(s).ok_or(EmptyPathError)
    }
}

/// Text before the last separator, `None` for a single-segment path
pub fn parent_path(path: &str) -> Option<&str> {
    path.rfind(SEPARATOR).map(|pos| &path[..pos])
}

pub fn join(parent: &str, id: &str) -> String {
    if parent.is_empty() {
        id.to_string()
    } else {
        format!("{}{}{}", parent, SEPARATOR, id)
    }
}

/// Prefix test on the dotted-path domain.
///
/// `"A.B"` covers `"A.B"` and `"A.B.C"` but not `"A.BC"`.
pub fn is_same_or_descendant(candidate: &str, prefix: &str) -> bool {
    match candidate.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
        None => false,
    }
}

/// Replace the leading `old` prefix of `name` with `new`.
///
/// Returns `None` when `name` is not `old` or a path underneath it.
pub fn rewrite_prefix(name: &str, old: &str, new: &str) -> Option<String> {
    if !is_same_or_descendant(name, old) {
        return None;
    }
    Some(format!("{}{}", new, &name[old.len()..]))
}

/// An id usable as a single path segment
pub fn is_valid_identifier(id: &str) -> bool {
    !id.trim().is_empty() && !id.contains(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        let map = UiPath::parse("NotepadUIMap1").unwrap();
        assert!(map.is_map());
        assert_eq!(map.map_id(), "NotepadUIMap1");

        let window = UiPath::parse("NotepadUIMap1.UIFindWindow").unwrap();
        assert!(window.is_top_level());
        assert_eq!(window.leaf(), "UIFindWindow");

        let nested = UiPath::parse("NotepadUIMap1.UIFindWindow.UIItemWindow.UIFindwhatEdit").unwrap();
        assert_eq!(nested.len(), 4);
        assert_eq!(nested.leaf(), "UIFindwhatEdit");
    }

    #[test]
    fn test_parse_rejects_blank_input() {
        assert!(UiPath::parse("").is_none());
        assert!(UiPath::parse("   ").is_none());
        assert!("".parse::<UiPath>().is_err());
    }

    #[test]
    fn test_parse_skips_trailing_and_empty_segments() {
        let path = UiPath::parse("Map.Window..Child. ").unwrap();
        assert_eq!(path.segments(), &["Map", "Window", "Child"]);
        assert_eq!(path.to_string(), "Map.Window.Child");
    }

    #[test]
    fn test_parent_and_child() {
        let path = UiPath::parse("Map.Window.Child").unwrap();
        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "Map.Window");
        assert_eq!(parent.child("Other").to_string(), "Map.Window.Other");
        assert!(UiPath::parse("Map").unwrap().parent().is_none());
        assert!(path.starts_with(&parent));
        assert!(!parent.starts_with(&path));
    }

    #[test]
    fn test_parent_path_of_raw_string() {
        assert_eq!(parent_path("A.B.C"), Some("A.B"));
        assert_eq!(parent_path("A"), None);
        assert_eq!(join("A.B", "C"), "A.B.C");
        assert_eq!(join("", "C"), "C");
    }

    #[test]
    fn test_prefix_is_segment_aware() {
        assert!(is_same_or_descendant("A.B", "A.B"));
        assert!(is_same_or_descendant("A.B.C", "A.B"));
        assert!(!is_same_or_descendant("A.BC", "A.B"));
        assert!(!is_same_or_descendant("A", "A.B"));
    }

    #[test]
    fn test_rewrite_prefix_once() {
        assert_eq!(
            rewrite_prefix("M.Old.Menu.Old", "M.Old", "M.New").as_deref(),
            Some("M.New.Menu.Old")
        );
        assert_eq!(rewrite_prefix("M.Old", "M.Old", "M.New").as_deref(), Some("M.New"));
        assert_eq!(rewrite_prefix("M.Older", "M.Old", "M.New"), None);
    }

    #[test]
    fn test_identifier_validation() {
        assert!(is_valid_identifier("UINotepadWindow"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("  "));
        assert!(!is_valid_identifier("A.B"));
    }
}
