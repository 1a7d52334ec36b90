//! checklist rename command implementation

use serde::Serialize;

use crate::cli::{join_title, require_id, Context};
use crate::error::Result;
use crate::output::emit_success;

#[derive(Serialize)]
struct RenameReport {
    id: String,
    found: bool,
    title: String,
}

pub fn run(ctx: &Context, args: &[String]) -> Result<()> {
    let (raw_id, words) = require_id(args, "rename")?;
    let title = join_title(words, "rename")?;

    let found = ctx.storage.update(|store| {
        Ok(match store.resolve(raw_id) {
            Some(item_id) => store.rename(item_id, title.clone()),
            None => false,
        })
    })?;
    tracing::debug!(id = raw_id, found, "rename");

    let report = RenameReport {
        id: raw_id.to_string(),
        found,
        title,
    };
    emit_success(ctx.output, "rename", &report, None)
}
