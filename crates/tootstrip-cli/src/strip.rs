//! Terminal stand-in for the hardware strip renderer.

use std::io::Write;

use tracing::warn;

use tootstrip_core::decode::Post;
use tootstrip_core::feed::Present;
use tootstrip_core::ring::{FreshnessRank, SlotIndex};

/// Renders each presented post as one line: `[slot] display_name: text`.
///
/// Freshness is implicit in line order here; a graphical renderer would use
/// the rank for stacking instead.
pub struct LineStrip<W> {
    out: W,
}

impl LineStrip<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> LineStrip<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Present for LineStrip<W> {
    fn present(&mut self, slot: SlotIndex, post: &Post, rank: FreshnessRank) {
        let line = format!(
            "[{slot}] {}: {}",
            post.account.display_name,
            post.plain_text()
        );
        if let Err(e) = writeln!(self.out, "{line}") {
            warn!(rank, error = %e, "failed to write strip line");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tootstrip_core::decode::{Account, Post};

    fn post(name: &str, content: &str) -> Post {
        Post {
            account: Account {
                username: name.to_lowercase(),
                display_name: name.to_string(),
                avatar: "https://example.com/a.png".to_string(),
            },
            content: content.to_string(),
        }
    }

    #[test]
    fn test_line_format_strips_markup() {
        let mut strip = LineStrip::new(Vec::new());
        strip.present(2, &post("Alice", "<p>hello &amp; welcome</p>"), 7);

        let written = String::from_utf8(strip.out).unwrap();
        assert_eq!(written, "[2] Alice: hello & welcome\n");
    }

    #[test]
    fn test_lines_accumulate_in_presentation_order() {
        let mut strip = LineStrip::new(Vec::new());
        strip.present(0, &post("A", "one"), 1);
        strip.present(1, &post("B", "two"), 2);

        let written = String::from_utf8(strip.out).unwrap();
        assert_eq!(written, "[0] A: one\n[1] B: two\n");
    }
}
