//! `chatmark spans` — shows what the shielding pass captures.

use std::path::Path;

use anyhow::Result;

pub fn run(file: Option<&Path>) -> Result<()> {
    let input = super::super::read_input(file)?;
    let shielded = chatmark_core::shield(&input);
    tracing::debug!(spans = shielded.spans.len(), "extracted math spans");

    for span in &shielded.spans {
        println!("{span}");
    }
    Ok(())
}
