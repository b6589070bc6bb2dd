//! Markup emission for scanned blocks.

use super::block::{Block, ListKind};
use super::inline;

/// Emits one block element as markup. Inline spans are resolved here for
/// every text-bearing block; code bodies are escaped instead.
pub fn emit(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => {
            format!("<h{level}>{}</h{level}>", inline::tokenize(text))
        }
        Block::Code { lang, body } => format!(
            "<pre><code class=\"language-{lang}\">{}</code></pre>",
            escape_code(body.trim())
        ),
        Block::Table { header, rows } => emit_table(header, rows),
        Block::Quote(text) => format!("<blockquote>{}</blockquote>", inline::tokenize(text)),
        Block::List { kind, items } => {
            let tag = match kind {
                ListKind::Unordered => "ul",
                ListKind::Ordered => "ol",
            };
            let mut out = format!("<{tag}>");
            for item in items {
                out.push_str("<li>");
                out.push_str(&inline::tokenize(item));
                out.push_str("</li>");
            }
            out.push_str(&format!("</{tag}>"));
            out
        }
        Block::Paragraph { lines } => {
            // Internal single newlines become explicit breaks; inline spans
            // are resolved per line and never cross one.
            let body: Vec<String> = lines.iter().map(|l| inline::tokenize(l)).collect();
            format!("<p>{}</p>", body.join("<br />"))
        }
    }
}

fn emit_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table><thead><tr>");
    for cell in header {
        out.push_str("<th>");
        out.push_str(&inline::tokenize(cell));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str("<td>");
            out.push_str(&inline::tokenize(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

/// Escapes exactly `<` and `>` in fenced-code content. Anything further is
/// the host's sanitization problem.
fn escape_code(body: &str) -> String {
    body.replace('<', "&lt;").replace('>', "&gt;")
}
