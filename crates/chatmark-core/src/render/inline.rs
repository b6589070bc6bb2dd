//! Inline span tokenizer.
//!
//! A single left-to-right pass over block text. Two-character delimiters are
//! checked before their one-character prefixes (`**` before `*`), so the
//! bold/italic overlap hazard of pattern-chain converters cannot arise here.
//! Code spans are atomic: their content is never reprocessed. Emphasis and
//! link labels are tokenized recursively. An unmatched delimiter is literal
//! text; spans never cross line boundaries because callers tokenize per line.

/// Converts inline markdown spans in `text` to markup.
pub fn tokenize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'`' => match text[i + 1..].find('`') {
                // Shortest span with at least one character of content,
                // emitted verbatim.
                Some(rel) if rel > 0 => {
                    out.push_str("<code>");
                    out.push_str(&text[i + 1..i + 1 + rel]);
                    out.push_str("</code>");
                    i += rel + 2;
                }
                _ => {
                    out.push('`');
                    i += 1;
                }
            },
            b'*' if text[i..].starts_with("**") => match text[i + 2..].find("**") {
                Some(rel) if rel > 0 => {
                    out.push_str("<strong>");
                    out.push_str(&tokenize(&text[i + 2..i + 2 + rel]));
                    out.push_str("</strong>");
                    i += rel + 4;
                }
                // No bold closer; the single-star rule gets a try.
                _ => emphasis(text, &mut out, &mut i),
            },
            b'*' => emphasis(text, &mut out, &mut i),
            b'~' if text[i..].starts_with("~~") => match text[i + 2..].find("~~") {
                Some(rel) if rel > 0 => {
                    out.push_str("<del>");
                    out.push_str(&tokenize(&text[i + 2..i + 2 + rel]));
                    out.push_str("</del>");
                    i += rel + 4;
                }
                _ => {
                    out.push_str("~~");
                    i += 2;
                }
            },
            b'~' => {
                out.push('~');
                i += 1;
            }
            b'[' => {
                if let Some((markup, len)) = link(&text[i..]) {
                    out.push_str(&markup);
                    i += len;
                } else {
                    out.push('[');
                    i += 1;
                }
            }
            _ => {
                // Copy straight through to the next delimiter candidate.
                let next = text[i..]
                    .find(['`', '*', '~', '['])
                    .map_or(text.len(), |n| i + n);
                out.push_str(&text[i..next]);
                i = next;
            }
        }
    }

    out
}

/// `*italic*` with at least one character of content.
fn emphasis(text: &str, out: &mut String, i: &mut usize) {
    match text[*i + 1..].find('*') {
        Some(rel) if rel > 0 => {
            out.push_str("<em>");
            out.push_str(&tokenize(&text[*i + 1..*i + 1 + rel]));
            out.push_str("</em>");
            *i += rel + 2;
        }
        _ => {
            out.push('*');
            *i += 1;
        }
    }
}

/// `[label](url)` starting at the head of `s`. Returns the markup and the
/// number of input bytes consumed. The label is tokenized; the url is taken
/// verbatim. Links open a new browsing context when the host renders them.
fn link(s: &str) -> Option<(String, usize)> {
    let label_end = s.find(']')?;
    let rest = &s[label_end + 1..];
    if !rest.starts_with('(') {
        return None;
    }
    let url_len = rest[1..].find(')')?;
    let label = &s[1..label_end];
    let url = &rest[1..1 + url_len];
    let markup = format!(
        "<a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        tokenize(label)
    );
    Some((markup, label_end + url_len + 3))
}
