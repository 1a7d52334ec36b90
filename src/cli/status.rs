//! checklist check / uncheck command implementation

use serde::Serialize;

use crate::cli::{require_id, Context};
use crate::error::Result;
use crate::output::emit_success;

#[derive(Serialize)]
struct StatusReport {
    id: String,
    found: bool,
    changed: bool,
    status: bool,
}

/// Set the status of one item. Unknown ids are a no-op; the store is still saved.
pub fn run(ctx: &Context, args: &[String], status: bool) -> Result<()> {
    let command = if status { "check" } else { "uncheck" };
    let (raw_id, _) = require_id(args, command)?;

    let (found, changed) = ctx.storage.update(|store| {
        Ok(match store.resolve(raw_id) {
            Some(item_id) => (true, store.set_status(item_id, status)),
            None => (false, false),
        })
    })?;
    tracing::debug!(command, id = raw_id, found, changed, "status set");

    let report = StatusReport {
        id: raw_id.to_string(),
        found,
        changed,
        status,
    };
    emit_success(ctx.output, command, &report, None)
}
