//! Rendering core for chat-message markdown.
//!
//! This crate turns the constrained markdown dialect used in chat replies
//! (headings, fenced code, tables, blockquotes, flat lists, inline
//! emphasis/code/links) into structural markup, while protecting embedded
//! TeX math from the conversion:
//!
//! - [`math::shield`] / [`math::restore`] bracket the converter with
//!   placeholder substitution so `$...$` and `$$...$$` spans pass through
//!   untouched for the host's typesetting layer.
//! - [`render::convert`] is the pure markdown-to-markup function.
//! - [`StreamCollector`] renders a growing buffer safely while the host
//!   animates a streaming reply.
//!
//! Everything here is synchronous, allocation-only, and reentrant; each call
//! owns its own span list and no state survives a call.

pub mod math;
pub mod render;
pub mod stream;

pub use math::{Shielded, restore, shield};
pub use render::convert;
pub use stream::StreamCollector;

/// Renders one chat message: math spans are shielded, the markdown dialect
/// is converted to markup, and the spans are restored verbatim.
pub fn render_message(text: &str) -> String {
    let shielded = math::shield(text);
    let markup = render::convert(&shielded.text);
    math::restore(&markup, &shielded.spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shielding_is_noop_without_math() {
        let inputs = [
            "",
            "# Title",
            "plain text",
            "**bold** and *italic*",
            "```js\n<tag>\n```",
            "> quote\n\n* item",
        ];
        for input in inputs {
            assert_eq!(render_message(input), convert(input), "input: {input:?}");
        }
    }

    #[test]
    fn test_math_survives_conversion_verbatim() {
        let rendered = render_message("The map $x \\mapsto x_i^*$ is *linear*");
        assert!(rendered.contains("$x \\mapsto x_i^*$"));
        assert!(rendered.contains("<em>linear</em>"));
    }

    #[test]
    fn test_display_math_survives_paragraph_wrapping() {
        assert_eq!(
            render_message("Inline $x^2$ and block $$y=mx+b$$ end"),
            "<p>Inline $x^2$ and block $$y=mx+b$$ end</p>"
        );
    }

    #[test]
    fn test_all_spans_restored() {
        let input = "$a_1$ then $$b_2$$ then $c_3$";
        let shielded = shield(input);
        let rendered = render_message(input);
        for span in &shielded.spans {
            assert!(rendered.contains(span.as_str()), "missing span {span:?}");
        }
    }

    #[test]
    fn test_math_inside_table_cell() {
        let rendered = render_message("| f | value |\n| --- | --- |\n| sq | $x^2$ |");
        assert!(rendered.contains("<td>$x^2$</td>"));
    }

    #[test]
    fn test_underscores_in_math_not_mangled_by_markdown() {
        // Without shielding the asterisk in the math would pair with the
        // emphasis marker in the prose.
        let rendered = render_message("norm $\\|x\\|_*$ and *emphasis*");
        assert!(rendered.contains("$\\|x\\|_*$"));
        assert!(rendered.contains("<em>emphasis</em>"));
    }
}
