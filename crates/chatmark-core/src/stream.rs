//! Incremental rendering for streamed message deltas.
//!
//! Hosts animate assistant replies by re-rendering a growing prefix of the
//! raw text. Rendering an arbitrary prefix is unstable: a half-open code
//! fence renders as a literal fence line, and a half-open `$$` span leaks
//! TeX into the paragraph flow, both of which flicker away once the closer
//! arrives. The collector buffers deltas and renders only up to the last
//! safe commit point, so committed markup never changes shape later.

/// Bytes to buffer before forcing a commit on a newline-free paragraph, so a
/// very long single line does not delay rendering indefinitely.
const FORCE_COMMIT_BYTES: usize = 500;

/// Accumulates streamed markdown and renders the committed prefix.
#[derive(Debug, Clone, Default)]
pub struct StreamCollector {
    buffer: String,
}

impl StreamCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a streamed delta to the raw buffer.
    pub fn push_delta(&mut self, delta: &str) {
        self.buffer.push_str(delta);
    }

    /// Renders the prefix up to the last safe commit point.
    ///
    /// A commit point is the last newline that is not inside an unclosed
    /// code fence or an unclosed `$$` display span. Content before such an
    /// unclosed opener still commits. Returns an empty string while no
    /// commit point exists.
    pub fn render_committed(&self) -> String {
        let cut = self.commit_point();
        if cut == 0 {
            return String::new();
        }
        crate::render_message(&self.buffer[..cut])
    }

    /// Renders the full buffer once streaming has ended.
    pub fn render_final(&self) -> String {
        crate::render_message(&self.buffer)
    }

    fn commit_point(&self) -> usize {
        if self.buffer.is_empty() {
            return 0;
        }

        let safe = self.open_block_start().unwrap_or(self.buffer.len());
        if let Some(pos) = self.buffer[..safe].rfind('\n') {
            return pos + 1;
        }

        // One long line and nothing withheld: cut at a word boundary rather
        // than stalling the animation.
        if safe == self.buffer.len() && self.buffer.len() > FORCE_COMMIT_BYTES {
            if let Some(pos) = self.buffer[..FORCE_COMMIT_BYTES].rfind(' ') {
                return pos + 1;
            }
            let mut cut = FORCE_COMMIT_BYTES;
            while !self.buffer.is_char_boundary(cut) {
                cut -= 1;
            }
            return cut;
        }

        0
    }

    /// Byte offset where the currently unclosed fence or display-math span
    /// begins, if any. Fence parity is tracked per line; `$$` parity is
    /// tracked outside fences only, since fenced content is opaque.
    fn open_block_start(&self) -> Option<usize> {
        let mut in_fence = false;
        let mut fence_start = 0;
        let mut math_open: Option<usize> = None;
        let mut offset = 0;

        for line in self.buffer.split_inclusive('\n') {
            if line.starts_with("```") {
                if !in_fence {
                    fence_start = offset;
                }
                in_fence = !in_fence;
            } else if !in_fence {
                let mut search = 0;
                while let Some(rel) = line[search..].find("$$") {
                    let abs = offset + search + rel;
                    math_open = match math_open {
                        Some(_) => None,
                        None => Some(abs),
                    };
                    search += rel + 2;
                }
            }
            offset += line.len();
        }

        match (in_fence.then_some(fence_start), math_open) {
            (Some(fence), Some(math)) => Some(fence.min(math)),
            (fence, math) => fence.or(math),
        }
    }

    /// True while the buffer ends inside an unclosed fence or display span.
    #[cfg(test)]
    fn is_holding_back(&self) -> bool {
        self.open_block_start().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_commits_nothing() {
        let collector = StreamCollector::new();
        assert_eq!(collector.render_committed(), "");
    }

    #[test]
    fn test_no_newline_commits_nothing() {
        let mut collector = StreamCollector::new();
        collector.push_delta("Hello world");
        assert_eq!(collector.render_committed(), "");
    }

    #[test]
    fn test_complete_line_commits() {
        let mut collector = StreamCollector::new();
        collector.push_delta("# Title\n");
        assert_eq!(collector.render_committed(), "<h1>Title</h1>");
    }

    #[test]
    fn test_unclosed_fence_is_withheld() {
        let mut collector = StreamCollector::new();
        collector.push_delta("```rust\nfn main() {\n");
        assert!(collector.is_holding_back());
        assert_eq!(collector.render_committed(), "");
    }

    #[test]
    fn test_closed_fence_commits() {
        let mut collector = StreamCollector::new();
        collector.push_delta("```rust\nfn f() {}\n```\n");
        assert!(!collector.is_holding_back());
        assert_eq!(
            collector.render_committed(),
            "<pre><code class=\"language-rust\">fn f() {}</code></pre>"
        );
    }

    #[test]
    fn test_content_before_unclosed_fence_commits() {
        let mut collector = StreamCollector::new();
        collector.push_delta("# Heading\n\nParagraph\n```rust\nfn main() {\n");
        let committed = collector.render_committed();
        assert!(committed.contains("<h1>Heading</h1>"));
        assert!(committed.contains("<p>Paragraph</p>"));
        assert!(!committed.contains("language-rust"));
    }

    #[test]
    fn test_unclosed_display_math_is_withheld() {
        let mut collector = StreamCollector::new();
        collector.push_delta("$$\ne = mc^2\n");
        assert!(collector.is_holding_back());
        assert_eq!(collector.render_committed(), "");
    }

    #[test]
    fn test_closed_display_math_commits() {
        let mut collector = StreamCollector::new();
        collector.push_delta("$$e = mc^2$$\n");
        assert!(!collector.is_holding_back());
        assert_eq!(collector.render_committed(), "<p>$$e = mc^2$$</p>");
    }

    #[test]
    fn test_dollars_inside_fence_do_not_hold_back() {
        let mut collector = StreamCollector::new();
        collector.push_delta("```\necho $$PID\n```\n");
        assert!(!collector.is_holding_back());
    }

    #[test]
    fn test_committed_prefix_matches_direct_render() {
        let mut collector = StreamCollector::new();
        collector.push_delta("# A\n\ntext **bold**\n\ntail without newline");
        let committed = collector.render_committed();
        assert_eq!(committed, crate::render_message("# A\n\ntext **bold**\n"));
    }

    #[test]
    fn test_incremental_deltas_extend_commit() {
        let mut collector = StreamCollector::new();
        collector.push_delta("* one");
        assert_eq!(collector.render_committed(), "");
        collector.push_delta("\n* two\n");
        assert_eq!(
            collector.render_committed(),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn test_force_commit_on_long_single_line() {
        let mut collector = StreamCollector::new();
        let words = "word ".repeat(150);
        collector.push_delta(&words);
        assert!(!collector.render_committed().is_empty());
    }

    #[test]
    fn test_render_final_uses_full_buffer() {
        let mut collector = StreamCollector::new();
        collector.push_delta("tail without newline");
        assert_eq!(collector.render_committed(), "");
        assert_eq!(collector.render_final(), "<p>tail without newline</p>");
    }
}
