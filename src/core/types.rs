use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single entry in a PDF outline / bookmark tree.
///
/// A document's outline is a *forest*: an ordered `Vec<Bookmark>` of
/// top-level trees. Child order is semantically significant — it defines
/// the displayed and exported sequence — and is preserved across every
/// conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Display title, taken verbatim from the PDF or XML. May be empty.
    pub title: String,
    /// Zero-based page index. `None` when the bookmark's destination
    /// could not be resolved to a page.
    pub page: Option<u32>,
    /// Nesting depth; top-level bookmarks have level 1, and every child's
    /// level is its parent's level + 1.
    pub level: u32,
    /// Child bookmarks in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Bookmark>,
    /// Schema pass-through attributes (`OPEN`, `FONTSTYLE`, `COLOR`,
    /// `ZOOMMODE`, `PARMA`, …) carried verbatim between XML round-trips.
    /// Never synthesized: absent in the source means absent here.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Bookmark {
    /// Create a leaf bookmark with no pass-through attributes.
    pub fn new(title: impl Into<String>, page: Option<u32>, level: u32) -> Self {
        Self {
            title: title.into(),
            page,
            level,
            children: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Total number of bookmarks in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Bookmark::subtree_size).sum::<usize>()
    }
}

/// Total number of bookmarks in a forest, including all descendants.
pub fn total_count(forest: &[Bookmark]) -> usize {
    forest.iter().map(Bookmark::subtree_size).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtree_size_counts_descendants() {
        let mut root = Bookmark::new("Ch1", Some(0), 1);
        let mut sub = Bookmark::new("1.1", Some(2), 2);
        sub.children.push(Bookmark::new("1.1.1", Some(3), 3));
        root.children.push(sub);
        root.children.push(Bookmark::new("1.2", Some(5), 2));

        assert_eq!(root.subtree_size(), 4);
        assert_eq!(total_count(&[root, Bookmark::new("Ch2", Some(9), 1)]), 5);
    }

    #[test]
    fn serde_round_trip() {
        let mut bm = Bookmark::new("Einleitung", Some(3), 1);
        bm.attributes.insert("COLOR".into(), "4278190080".into());
        bm.children.push(Bookmark::new("Motivation", Some(4), 2));

        let json = serde_json::to_string(&bm).unwrap();
        let back: Bookmark = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bm);
    }

    #[test]
    fn serde_defaults_for_omitted_fields() {
        let bm: Bookmark =
            serde_json::from_str(r#"{"title":"A","page":0,"level":1}"#).unwrap();
        assert!(bm.children.is_empty());
        assert!(bm.attributes.is_empty());
    }
}
