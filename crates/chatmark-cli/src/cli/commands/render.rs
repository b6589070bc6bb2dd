//! `chatmark render` — the default mode.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct RenderOutput<'a> {
    markup: &'a str,
    math_spans: &'a [String],
}

pub fn run(file: Option<&Path>, json: bool) -> Result<()> {
    let input = super::super::read_input(file)?;
    tracing::debug!(bytes = input.len(), "rendering input");

    if json {
        let shielded = chatmark_core::shield(&input);
        let markup = chatmark_core::convert(&shielded.text);
        let restored = chatmark_core::restore(&markup, &shielded.spans);
        let output = RenderOutput {
            markup: &restored,
            math_spans: &shielded.spans,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("serialize render output")?
        );
    } else {
        println!("{}", chatmark_core::render_message(&input));
    }
    Ok(())
}
