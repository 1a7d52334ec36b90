//! checklist add command implementation

use serde::Serialize;

use crate::cli::{join_title, Context};
use crate::error::Result;
use crate::id;
use crate::output::emit_success;

#[derive(Serialize)]
struct AddReport {
    id: String,
    title: String,
}

/// Create an unchecked item titled with `words` joined by spaces.
pub fn run(ctx: &Context, words: &[String]) -> Result<()> {
    let title = join_title(words, "add")?;
    let new_id = ctx.storage.update(|store| store.add(title.clone()))?;
    tracing::debug!(id = new_id, "item added");

    let report = AddReport {
        id: id::encode(new_id),
        title,
    };
    emit_success(ctx.output, "add", &report, None)
}
