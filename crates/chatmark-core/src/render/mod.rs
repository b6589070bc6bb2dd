//! Markdown-to-markup conversion.
//!
//! `convert()` is a pure, total function over the chat-message markdown
//! dialect: block scanning first, inline spans second, paragraph wrapping
//! for whatever remains. That ordering is a correctness requirement — inline
//! rules must never see unconsumed block syntax, and paragraph wrapping runs
//! structurally last so produced block markup is never re-wrapped. Unmatched
//! syntax degrades to literal text; nothing fails.

mod block;
mod html;
mod inline;

/// Converts markdown `text` to structural markup.
///
/// Block elements join with single newlines. Empty input produces empty
/// output.
pub fn convert(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let blocks = block::scan(text);
    tracing::trace!(blocks = blocks.len(), "scanned block elements");
    let rendered: Vec<String> = blocks.iter().map(html::emit).collect();
    rendered.join("\n")
}
