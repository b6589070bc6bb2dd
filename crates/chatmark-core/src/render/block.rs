//! Line-oriented block scanner.
//!
//! One pass over the input lines produces a flat sequence of [`Block`]s.
//! Block syntax is recognized per line (fences and tables look ahead), and
//! anything that matches no rule falls through into the current paragraph.
//! There is no nesting: this dialect renders chat messages, not documents.

/// A recognized block element. Text fields are raw markdown; inline spans are
/// resolved at emission time, never for code bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    /// Fenced code. `lang` is the tag from the opening fence, possibly empty.
    Code { lang: String, body: String },
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
    /// One blockquote line. Consecutive quote lines stay separate elements.
    Quote(String),
    List { kind: ListKind, items: Vec<String> },
    Paragraph { lines: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

/// Scans `text` into block elements.
pub fn scan(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut blocks: Vec<Block> = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();
    // List items merge only when their lines are directly adjacent; a blank
    // line or any other block ends the container.
    let mut list_adjacent = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            list_adjacent = false;
            i += 1;
            continue;
        }

        if let Some((level, rest)) = heading(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            list_adjacent = false;
            blocks.push(Block::Heading {
                level,
                text: rest.to_string(),
            });
            i += 1;
            continue;
        }

        if let Some(lang) = line.strip_prefix("```") {
            // Non-greedy: the block ends at the next fence line. Without a
            // closer the opener stays literal and falls through below.
            if let Some(len) = lines[i + 1..].iter().position(|l| l.starts_with("```")) {
                flush_paragraph(&mut blocks, &mut paragraph);
                list_adjacent = false;
                blocks.push(Block::Code {
                    lang: lang.trim().to_string(),
                    body: lines[i + 1..i + 1 + len].join("\n"),
                });
                i += len + 2;
                continue;
            }
        }

        if line.starts_with('|') {
            if let Some((table, consumed)) = table(&lines[i..]) {
                flush_paragraph(&mut blocks, &mut paragraph);
                list_adjacent = false;
                blocks.push(table);
                i += consumed;
                continue;
            }
        }

        if let Some(rest) = line.strip_prefix("> ") {
            flush_paragraph(&mut blocks, &mut paragraph);
            list_adjacent = false;
            blocks.push(Block::Quote(rest.to_string()));
            i += 1;
            continue;
        }

        if let Some((kind, item)) = list_item(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            match blocks.last_mut() {
                Some(Block::List { kind: prev, items }) if list_adjacent && *prev == kind => {
                    items.push(item);
                }
                _ => blocks.push(Block::List {
                    kind,
                    items: vec![item],
                }),
            }
            list_adjacent = true;
            i += 1;
            continue;
        }

        paragraph.push(line.to_string());
        list_adjacent = false;
        i += 1;
    }

    flush_paragraph(&mut blocks, &mut paragraph);
    blocks
}

fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<String>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph {
            lines: std::mem::take(paragraph),
        });
    }
}

/// `# ` through `###### ` at the start of a line. Longer hash runs are not
/// headings.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.len() - line.trim_start_matches('#').len();
    if (1..=6).contains(&hashes) {
        if let Some(rest) = line[hashes..].strip_prefix(' ') {
            return Some((u8::try_from(hashes).unwrap_or(6), rest));
        }
    }
    None
}

/// A table needs a `|`-led header line and a `|`-led separator line; rows
/// follow until the first line that does not start with `|`.
fn table(lines: &[&str]) -> Option<(Block, usize)> {
    let sep = lines.get(1)?;
    if !sep.starts_with('|') || !is_separator_row(sep) {
        return None;
    }
    let header = split_cells(lines[0]);
    let mut rows = Vec::new();
    let mut consumed = 2;
    while let Some(line) = lines.get(consumed) {
        if !line.starts_with('|') {
            break;
        }
        rows.push(split_cells(line));
        consumed += 1;
    }
    Some((Block::Table { header, rows }, consumed))
}

/// Separator cells are runs of dashes, with optional alignment colons at
/// either edge.
fn is_separator_row(line: &str) -> bool {
    let cells = split_cells(line);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':')
        })
}

/// Splits on `|`, discarding the empty edge cells the outer pipes produce and
/// trimming the rest.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.split('|').collect();
    if cells.first().is_some_and(|c| c.trim().is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.trim().is_empty()) {
        cells.pop();
    }
    cells.iter().map(|c| c.trim().to_string()).collect()
}

/// `* ` or `- ` (unordered), or digits then `. ` (ordered), after optional
/// indentation. The ordered number is discarded: element semantics number the
/// items, so rendering always counts from one.
fn list_item(line: &str) -> Option<(ListKind, String)> {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
    {
        return Some((ListKind::Unordered, rest.to_string()));
    }
    let digits = trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = trimmed[digits..].strip_prefix(". ") {
            return Some((ListKind::Ordered, rest.to_string()));
        }
    }
    None
}
