//! checklist tag command implementation

use serde::Serialize;

use crate::cli::{require_id, Context};
use crate::error::Result;
use crate::output::emit_success;

#[derive(Serialize)]
struct TagReport {
    id: String,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
}

/// Toggle each given tag on one item, in order.
pub fn run(ctx: &Context, args: &[String]) -> Result<()> {
    let (raw_id, tags) = require_id(args, "tag")?;

    let current = ctx.storage.update(|store| {
        let Some(item_id) = store.resolve(raw_id) else {
            return Ok(None);
        };
        store.toggle_tags(item_id, tags);
        Ok(store.get(item_id).map(|item| item.tags.clone()))
    })?;
    tracing::debug!(id = raw_id, found = current.is_some(), "tag");

    let report = TagReport {
        id: raw_id.to_string(),
        found: current.is_some(),
        tags: current,
    };
    emit_success(ctx.output, "tag", &report, None)
}
