//! Line-cleaning helpers shared by the recognizers.
//!
//! Markers handled here:
//! - Markdown headings: `#` through `######` followed by whitespace
//! - Item markers: `1.`, `2)`, `-`, `•`, and `*` followed by whitespace
//! - Emphasis: `**bold**` and `*italic*`

use std::borrow::Cow;

use regex::Regex;

/// Bullet-extracted lines at or below this many characters are dropped as noise.
const MIN_BULLET_CHARS: usize = 5;

#[derive(Debug, Clone)]
pub struct Markup {
    heading_marker: Regex,
    item_marker: Regex,
    bold: Regex,
    italic: Regex,
    residual_lead: Regex,
}

impl Default for Markup {
    fn default() -> Self {
        Self::new()
    }
}

impl Markup {
    pub fn new() -> Self {
        Self {
            heading_marker: Regex::new(r"^#{1,6}\s").expect("valid regex"),
            // `*` only counts as a bullet when whitespace follows, so `**Label**` survives.
            item_marker: Regex::new(r"^(?:[0-9]{1,3}[.)]|[)\-•]|\*(?:\s|$))\s*")
                .expect("valid regex"),
            bold: Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"),
            italic: Regex::new(r"\*(.+?)\*").expect("valid regex"),
            residual_lead: Regex::new(r"^[-:]\s*").expect("valid regex"),
        }
    }

    /// True when the (trimmed) line is itself a markdown heading.
    pub fn is_heading_marker(&self, line: &str) -> bool {
        self.heading_marker.is_match(line)
    }

    /// Remove one leading ordinal or bullet marker and the whitespace after it.
    pub fn strip_item_marker<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.item_marker.replace(line, "")
    }

    /// Replace `**x**` with `x`, then `*x*` with `x`.
    pub fn strip_emphasis(&self, line: &str) -> String {
        let unbolded = self.bold.replace_all(line, "$1");
        self.italic.replace_all(&unbolded, "$1").into_owned()
    }

    /// Turn a raw text block into a list of clean content strings, preserving order.
    pub fn extract_bullets(&self, block: &str) -> Vec<String> {
        block
            .lines()
            .filter_map(|raw| {
                let line = raw.trim();
                let line = self.strip_item_marker(line);
                let line = self.strip_emphasis(&line);
                let line = self.residual_lead.replace(&line, "").into_owned();
                let keep =
                    line.chars().count() > MIN_BULLET_CHARS && !self.is_heading_marker(&line);
                keep.then_some(line)
            })
            .collect()
    }
}
