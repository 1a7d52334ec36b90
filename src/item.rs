//! Checklist items.

use serde::{Deserialize, Serialize};

/// A single checklist entry as persisted in the items document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub title: String,
    pub tags: Vec<String>,
    pub status: bool,
}

/// Loosely-typed form read from disk before validation.
///
/// `tags` and `status` may be absent in hand-edited files; `title` may not.
/// Wrong JSON types (e.g. a string `status`) fail deserialization outright.
#[derive(Debug, Deserialize)]
pub(crate) struct RawItem {
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: bool,
}

impl Item {
    /// Create an unchecked, untagged item.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags: Vec::new(),
            status: false,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    /// True when every tag in `required` is present (an empty set always matches).
    pub fn has_all_tags(&self, required: &[String]) -> bool {
        required.iter().all(|tag| self.has_tag(tag))
    }

    /// Add `tag` if missing, remove it otherwise.
    ///
    /// Returns whether the item carries the tag afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        match self.tags.iter().position(|existing| existing == tag) {
            Some(index) => {
                self.tags.remove(index);
                false
            }
            None => {
                self.tags.push(tag.to_string());
                true
            }
        }
    }

    /// Collapse duplicate tags, keeping the first occurrence of each.
    pub fn dedupe_tags(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.tags.retain(|tag| seen.insert(tag.clone()));
    }

    pub(crate) fn from_raw(raw: RawItem) -> Option<Self> {
        let mut item = Item {
            title: raw.title?,
            tags: raw.tags,
            status: raw.status,
        };
        item.dedupe_tags();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_is_unchecked_and_untagged() {
        let item = Item::new("buy milk");
        assert_eq!(item.title, "buy milk");
        assert!(item.tags.is_empty());
        assert!(!item.status);
    }

    #[test]
    fn toggle_twice_restores_tags() {
        let mut item = Item::new("x");
        item.tags = vec!["home".to_string()];
        let before = item.tags.clone();

        assert!(item.toggle_tag("urgent"));
        assert_eq!(item.tags, vec!["home".to_string(), "urgent".to_string()]);
        assert!(!item.toggle_tag("urgent"));
        assert_eq!(item.tags, before);
    }

    #[test]
    fn untag_keeps_order_of_remaining_tags() {
        let mut item = Item::new("x");
        item.tags = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        item.toggle_tag("b");
        assert_eq!(item.tags, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn has_all_tags_is_superset_check() {
        let mut item = Item::new("x");
        item.tags = vec!["urgent".to_string(), "home".to_string(), "errand".to_string()];

        assert!(item.has_all_tags(&[]));
        assert!(item.has_all_tags(&["home".to_string(), "urgent".to_string()]));
        assert!(!item.has_all_tags(&["home".to_string(), "work".to_string()]));
    }

    #[test]
    fn from_raw_normalizes_tags_and_defaults() {
        let raw: RawItem = serde_json::from_str(r#"{"title":"t","tags":["a","b","a"]}"#).unwrap();
        let item = Item::from_raw(raw).unwrap();
        assert_eq!(item.tags, vec!["a".to_string(), "b".to_string()]);
        assert!(!item.status);

        let raw: RawItem = serde_json::from_str(r#"{"title":"t","status":true}"#).unwrap();
        let item = Item::from_raw(raw).unwrap();
        assert!(item.tags.is_empty());
        assert!(item.status);
    }

    #[test]
    fn from_raw_requires_title() {
        let raw: RawItem = serde_json::from_str(r#"{"tags":[],"status":false}"#).unwrap();
        assert!(Item::from_raw(raw).is_none());
    }

    #[test]
    fn non_boolean_status_is_rejected() {
        let result: Result<RawItem, _> = serde_json::from_str(r#"{"title":"t","status":"yes"}"#);
        assert!(result.is_err());
    }
}
