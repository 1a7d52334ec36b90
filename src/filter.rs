//! Keyword filters shared by `list` and `remove`.
//!
//! The first argument is checked against the reserved keywords:
//! - all
//! - checked / unchecked
//! - tagged <tag>...
//!
//! Anything else is interpreted per command: `list` reads the whole term list
//! as required tags, `remove` reads the first term as an item id.

use crate::item::Item;

pub const KEYWORD_ALL: &str = "all";
pub const KEYWORD_TAGGED: &str = "tagged";
pub const KEYWORD_CHECKED: &str = "checked";
pub const KEYWORD_UNCHECKED: &str = "unchecked";

/// Which items a `list` or bulk `remove` applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    /// Explicit `tagged t1 t2`: items carrying every listed tag.
    TaggedWith(Vec<String>),
    Checked,
    Unchecked,
    /// Bare terms with no keyword, read as required tags.
    ByTerms(Vec<String>),
}

/// Target of a `remove` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    Matching(Filter),
    /// Raw base-36 id as typed; decoding happens against the store.
    Id(String),
}

impl Filter {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Filter::All => true,
            Filter::Checked => item.status,
            Filter::Unchecked => !item.status,
            Filter::TaggedWith(tags) | Filter::ByTerms(tags) => item.has_all_tags(tags),
        }
    }
}

/// Recognize a leading keyword; `None` when the first term is not one.
fn parse_keyword(terms: &[String]) -> Option<Filter> {
    let (first, rest) = terms.split_first()?;
    match first.as_str() {
        KEYWORD_ALL => Some(Filter::All),
        KEYWORD_CHECKED => Some(Filter::Checked),
        KEYWORD_UNCHECKED => Some(Filter::Unchecked),
        KEYWORD_TAGGED => Some(Filter::TaggedWith(rest.to_vec())),
        _ => None,
    }
}

/// Parse `list` arguments. No terms selects everything.
pub fn parse_list_filter(terms: &[String]) -> Filter {
    if terms.is_empty() {
        return Filter::All;
    }
    parse_keyword(terms).unwrap_or_else(|| Filter::ByTerms(terms.to_vec()))
}

/// Parse `remove` arguments. Returns `None` when no terms were given.
pub fn parse_remove_target(terms: &[String]) -> Option<RemoveTarget> {
    let first = terms.first()?;
    Some(match parse_keyword(terms) {
        Some(filter) => RemoveTarget::Matching(filter),
        None => RemoveTarget::Id(first.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn list_without_terms_is_all() {
        assert_eq!(parse_list_filter(&[]), Filter::All);
        assert_eq!(parse_list_filter(&terms(&["all"])), Filter::All);
    }

    #[test]
    fn list_status_keywords_ignore_rest() {
        assert_eq!(parse_list_filter(&terms(&["checked", "x"])), Filter::Checked);
        assert_eq!(parse_list_filter(&terms(&["unchecked"])), Filter::Unchecked);
    }

    #[test]
    fn list_tagged_collects_remaining_terms() {
        assert_eq!(
            parse_list_filter(&terms(&["tagged", "urgent", "home"])),
            Filter::TaggedWith(terms(&["urgent", "home"]))
        );
    }

    #[test]
    fn list_bare_terms_are_tags() {
        assert_eq!(
            parse_list_filter(&terms(&["urgent", "home"])),
            Filter::ByTerms(terms(&["urgent", "home"]))
        );
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(
            parse_list_filter(&terms(&["Checked"])),
            Filter::ByTerms(terms(&["Checked"]))
        );
    }

    #[test]
    fn remove_parses_keywords_and_ids() {
        assert_eq!(parse_remove_target(&[]), None);
        assert_eq!(
            parse_remove_target(&terms(&["all"])),
            Some(RemoveTarget::Matching(Filter::All))
        );
        assert_eq!(
            parse_remove_target(&terms(&["tagged", "home"])),
            Some(RemoveTarget::Matching(Filter::TaggedWith(terms(&["home"]))))
        );
        assert_eq!(
            parse_remove_target(&terms(&["1a", "ignored"])),
            Some(RemoveTarget::Id("1a".to_string()))
        );
    }

    #[test]
    fn filter_matching() {
        let mut done = Item::new("done");
        done.status = true;
        done.tags = terms(&["home"]);
        let open = Item::new("open");

        assert!(Filter::All.matches(&done));
        assert!(Filter::Checked.matches(&done));
        assert!(!Filter::Checked.matches(&open));
        assert!(Filter::Unchecked.matches(&open));
        assert!(Filter::TaggedWith(terms(&["home"])).matches(&done));
        assert!(!Filter::ByTerms(terms(&["home"])).matches(&open));
        assert!(Filter::TaggedWith(Vec::new()).matches(&open));
    }
}
