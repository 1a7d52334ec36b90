//! checklist list command implementation
//!
//! Renders one line per selected item:
//!
//! ```text
//! 0 ✔ buy milk tagged: errand, home
//! 1 ✘ call mom
//! ```

use serde::Serialize;

use crate::cli::Context;
use crate::config::DisplayConfig;
use crate::error::Result;
use crate::filter::parse_list_filter;
use crate::id;
use crate::item::Item;
use crate::output::{emit_success, HumanOutput};

#[derive(Debug, Serialize)]
struct ListEntry {
    id: String,
    title: String,
    status: bool,
    tags: Vec<String>,
}

#[derive(Serialize)]
struct ListReport {
    items: Vec<ListEntry>,
}

/// Format a single item the way `list` prints it.
pub fn format_item(id: u64, item: &Item, display: &DisplayConfig) -> String {
    let glyph = if item.status {
        &display.checked
    } else {
        &display.unchecked
    };
    let mut line = format!("{} {} {}", id::encode(id), glyph, item.title);
    if !item.tags.is_empty() {
        line.push_str(" tagged: ");
        line.push_str(&item.tags.join(", "));
    }
    line
}

pub fn run(ctx: &Context, terms: &[String]) -> Result<()> {
    let filter = parse_list_filter(terms);
    tracing::debug!(filter = ?filter, "listing");

    let (report, human) = ctx.storage.read(|store| {
        let mut human = HumanOutput::new();
        let mut items = Vec::new();
        for (item_id, item) in store.select(&filter) {
            human.push_line(format_item(item_id, item, &ctx.display));
            items.push(ListEntry {
                id: id::encode(item_id),
                title: item.title.clone(),
                status: item.status,
                tags: item.tags.clone(),
            });
        }
        Ok((ListReport { items }, human))
    })?;

    emit_success(ctx.output, "list", &report, Some(&human))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_untagged_item() {
        let item = Item::new("call mom");
        assert_eq!(format_item(1, &item, &DisplayConfig::default()), "1 ✘ call mom");
    }

    #[test]
    fn format_tagged_checked_item_uses_base36_id() {
        let mut item = Item::new("buy milk");
        item.status = true;
        item.tags = vec!["errand".to_string(), "home".to_string()];
        assert_eq!(
            format_item(35, &item, &DisplayConfig::default()),
            "z ✔ buy milk tagged: errand, home"
        );
    }

    #[test]
    fn format_respects_configured_glyphs() {
        let display = DisplayConfig {
            checked: "[x]".to_string(),
            unchecked: "[ ]".to_string(),
        };
        assert_eq!(format_item(0, &Item::new("a"), &display), "0 [ ] a");
    }
}
