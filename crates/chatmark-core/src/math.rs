//! Math span shielding for the rendering pipeline.
//!
//! Chat messages mix markdown with TeX math (`$...$` inline, `$$...$$`
//! display). Math is full of characters the converter would chew on
//! (underscores, asterisks, pipes), so every math span is swapped for an
//! opaque placeholder token before conversion and swapped back afterwards.
//! The host's typesetting layer picks the restored spans up unchanged.

/// Delimiter for placeholder tokens.
///
/// A private-use-area character: it has no markdown or markup meaning and no
/// keyboard produces it, so a placeholder can never be partially consumed by
/// a conversion rule. Input that already contains this character breaks
/// restoration; that is a known limitation, not a handled case.
const SENTINEL: char = '\u{e000}';

/// The placeholder token standing in for span `index`.
fn placeholder(index: usize) -> String {
    format!("{SENTINEL}math:{index}{SENTINEL}")
}

/// Text with its math spans swapped out for placeholder tokens.
#[derive(Debug, Clone, Default)]
pub struct Shielded {
    /// Input text with every matched math span replaced by a placeholder.
    pub text: String,
    /// Captured spans, delimiters included, in first-seen order.
    pub spans: Vec<String>,
}

/// Extracts math spans from `text`, replacing each with an indexed
/// placeholder token.
///
/// Scans left to right. `$$` is treated as a single token and takes priority
/// over `$` at the same position. Matching is non-greedy: a span ends at the
/// next closing delimiter of its own kind, so several spans can share a line.
/// Display spans may cross newlines; inline spans may not. An opening
/// delimiter with no closer stays in the text as literal characters.
pub fn shield(text: &str) -> Shielded {
    let mut out = String::with_capacity(text.len());
    let mut spans: Vec<String> = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            // Copy straight through to the next dollar sign.
            let next = text[i..].find('$').map_or(text.len(), |n| i + n);
            out.push_str(&text[i..next]);
            i = next;
            continue;
        }

        if text[i..].starts_with("$$") {
            if let Some(rel) = text[i + 2..].find("$$") {
                let end = i + 2 + rel + 2;
                spans.push(text[i..end].to_string());
                out.push_str(&placeholder(spans.len() - 1));
                i = end;
            } else {
                // Unterminated display span: the opener is literal text and
                // its characters are not rescanned as inline openers.
                out.push_str("$$");
                i += 2;
            }
            continue;
        }

        // Inline span: the closer must sit on the same line.
        match text[i + 1..].find(['$', '\n']) {
            Some(rel) if bytes[i + 1 + rel] == b'$' => {
                let end = i + 1 + rel + 1;
                spans.push(text[i..end].to_string());
                out.push_str(&placeholder(spans.len() - 1));
                i = end;
            }
            _ => {
                out.push('$');
                i += 1;
            }
        }
    }

    tracing::trace!(spans = spans.len(), "shielded math spans");
    Shielded { text: out, spans }
}

/// Replaces each placeholder token in `markup` with its captured span,
/// verbatim.
///
/// Index-addressed: placeholder `i` is looked up directly, so restoration
/// holds even if the converter moved text around. A placeholder the converter
/// consumed is skipped silently; one it duplicated is restored once and the
/// copy stays visible. Restored content is never re-processed.
pub fn restore(markup: &str, spans: &[String]) -> String {
    let mut out = markup.to_string();
    for (i, span) in spans.iter().enumerate() {
        let token = placeholder(i);
        if let Some(pos) = out.find(&token) {
            out.replace_range(pos..pos + token.len(), span);
        } else {
            tracing::debug!(index = i, "math placeholder missing from markup");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shield_no_math_is_noop() {
        let shielded = shield("plain text with **markdown** only");
        assert_eq!(shielded.text, "plain text with **markdown** only");
        assert!(shielded.spans.is_empty());
    }

    #[test]
    fn test_shield_inline_and_display_in_order() {
        let shielded = shield("Inline $x^2$ and block $$y=mx+b$$ end");
        assert_eq!(shielded.spans, vec!["$x^2$", "$$y=mx+b$$"]);
        assert!(!shielded.text.contains('$'), "all delimiters captured");
        assert!(shielded.text.contains(&placeholder(0)));
        assert!(shielded.text.contains(&placeholder(1)));
    }

    #[test]
    fn test_shield_display_wins_over_inline() {
        let shielded = shield("$$a+b$$");
        assert_eq!(shielded.spans, vec!["$$a+b$$"]);
    }

    #[test]
    fn test_shield_multiple_spans_per_line() {
        let shielded = shield("$a$ then $b$");
        assert_eq!(shielded.spans, vec!["$a$", "$b$"]);
    }

    #[test]
    fn test_shield_display_crosses_newline() {
        let shielded = shield("$$\na+b\n$$");
        assert_eq!(shielded.spans, vec!["$$\na+b\n$$"]);
    }

    #[test]
    fn test_shield_inline_does_not_cross_newline() {
        let shielded = shield("price $5\nand $6 more");
        assert!(shielded.spans.is_empty());
        assert_eq!(shielded.text, "price $5\nand $6 more");
    }

    #[test]
    fn test_shield_unterminated_display_is_literal() {
        let shielded = shield("$$a+b");
        assert!(shielded.spans.is_empty());
        assert_eq!(shielded.text, "$$a+b");
    }

    #[test]
    fn test_restore_round_trip() {
        let shielded = shield("before $x_1$ after");
        let restored = restore(&shielded.text, &shielded.spans);
        assert_eq!(restored, "before $x_1$ after");
    }

    #[test]
    fn test_restore_inside_surrounding_markup() {
        let shielded = shield("$E=mc^2$");
        let wrapped = format!("<p>{}</p>", shielded.text);
        assert_eq!(restore(&wrapped, &shielded.spans), "<p>$E=mc^2$</p>");
    }

    #[test]
    fn test_restore_skips_consumed_placeholder() {
        let shielded = shield("$a$ and $b$");
        // Simulate the converter deleting the first placeholder.
        let mangled = shielded.text.replace(&placeholder(0), "");
        let restored = restore(&mangled, &shielded.spans);
        assert!(!restored.contains("$a$"));
        assert!(restored.contains("$b$"));
    }

    #[test]
    fn test_span_count_matches_placeholder_count() {
        let shielded = shield("$a$ $$b$$ $c$ text $$d$$");
        assert_eq!(shielded.spans.len(), 4);
        for i in 0..shielded.spans.len() {
            assert_eq!(shielded.text.matches(&placeholder(i)).count(), 1);
        }
    }
}
