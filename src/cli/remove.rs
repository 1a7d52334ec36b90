//! checklist remove command implementation

use serde::Serialize;

use crate::cli::Context;
use crate::error::{Error, Result};
use crate::filter::{parse_remove_target, Filter, RemoveTarget};
use crate::id;
use crate::output::emit_success;

#[derive(Serialize)]
struct RemoveReport {
    removed: Vec<String>,
}

/// Remove items by keyword (`all`, `checked`, `unchecked`, `tagged <tag>...`)
/// or a single id. The counter is never touched.
pub fn run(ctx: &Context, terms: &[String]) -> Result<()> {
    let target = parse_remove_target(terms).ok_or_else(|| {
        Error::InvalidArgument(
            "remove requires all, checked, unchecked, tagged <tag>... or an item id".to_string(),
        )
    })?;
    if matches!(&target, RemoveTarget::Matching(Filter::TaggedWith(tags)) if tags.is_empty()) {
        return Err(Error::InvalidArgument(
            "remove tagged requires at least one tag".to_string(),
        ));
    }

    let removed = ctx.storage.update(|store| {
        Ok(match &target {
            RemoveTarget::Matching(filter) => store.remove_matching(filter),
            RemoveTarget::Id(raw_id) => store
                .resolve(raw_id)
                .and_then(|item_id| store.remove(item_id).map(|_| item_id))
                .into_iter()
                .collect(),
        })
    })?;
    tracing::debug!(remove_target = ?target, removed = removed.len(), "remove");

    let report = RemoveReport {
        removed: removed.into_iter().map(id::encode).collect(),
    };
    emit_success(ctx.output, "remove", &report, None)
}
