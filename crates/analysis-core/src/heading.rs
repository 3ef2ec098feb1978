//! Recognizer for sections introduced by markdown headings or `Label:` lines.
//!
//! The text is cut into segments before every line that is either a markdown heading
//! (`#`..`######` + whitespace + text) or a capitalized label line (`Label:` where the
//! label is an uppercase ASCII letter followed by 3-50 non-colon characters).
//! Each segment becomes one card unless it is too short or has no usable lines.

use regex::Regex;

use crate::analyze::Recognizer;
use crate::markup::Markup;
use crate::model::Card;

/// Segments shorter than this (trimmed, in characters) are noise.
const MIN_SEGMENT_CHARS: usize = 20;
/// Content lines at or below this many characters are dropped.
const MIN_LINE_CHARS: usize = 3;
const DEFAULT_TITLE: &str = "Analysis Section";

#[derive(Debug, Clone)]
pub struct HeadingRecognizer {
    heading_line: Regex,
    label_line: Regex,
    markup: Markup,
}

impl Default for HeadingRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingRecognizer {
    pub fn new() -> Self {
        Self {
            heading_line: Regex::new(r"^#{1,6}\s+(.+)$").expect("valid regex"),
            label_line: Regex::new(r"^[A-Z][^:]{3,50}:").expect("valid regex"),
            markup: Markup::new(),
        }
    }

    fn is_boundary(&self, line: &str) -> bool {
        self.heading_line.is_match(line) || self.label_line.is_match(line)
    }

    /// Split `text` before every boundary line. The first segment starts at offset 0.
    fn segments<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut start = 0;
        let mut offset = 0;

        for raw in text.split_inclusive('\n') {
            let line = raw.trim_end_matches(['\n', '\r']);
            if offset > start && self.is_boundary(line) {
                segments.push(&text[start..offset]);
                start = offset;
            }
            offset += raw.len();
        }
        if start < text.len() {
            segments.push(&text[start..]);
        }
        segments
    }

    /// Title from the first line when it is a heading or label line; the remaining
    /// lines are the body. Otherwise the whole segment is body.
    ///
    /// A `Label: inline text` line keeps its inline text in the title; `TitleParts`
    /// splits it back into label and value for display.
    fn split_title<'a>(&self, segment: &'a str) -> (String, &'a str) {
        let (first, rest) = segment.split_once('\n').unwrap_or((segment, ""));
        let first = first.trim_end_matches('\r');

        let title = if let Some(caps) = self.heading_line.captures(first) {
            caps[1].to_string()
        } else if self.label_line.is_match(first) {
            first.to_string()
        } else {
            return (DEFAULT_TITLE.to_string(), segment);
        };

        let title = title.trim().trim_end_matches([':', '：']).trim();
        if title.is_empty() {
            (DEFAULT_TITLE.to_string(), rest)
        } else {
            (title.to_string(), rest)
        }
    }

    fn body_lines(&self, body: &str) -> Vec<String> {
        body.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !self.markup.is_heading_marker(line))
            .map(|line| self.markup.strip_item_marker(line).trim().to_string())
            .filter(|line| line.chars().count() > MIN_LINE_CHARS)
            .collect()
    }
}

impl Recognizer for HeadingRecognizer {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn recognize(&self, text: &str) -> Vec<Card> {
        self.segments(text)
            .into_iter()
            .filter_map(|segment| {
                let trimmed = segment.trim();
                if trimmed.chars().count() < MIN_SEGMENT_CHARS {
                    return None;
                }
                let (title, body) = self.split_title(trimmed);
                let lines = self.body_lines(body);
                (!lines.is_empty()).then_some(Card { title, lines })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_headings_become_cards() {
        let text = "## Project 1: AgroSense\n- Both use soil moisture sensors\n- Same crop domain\n\n## Project 2: FarmEye\n1. Image based disease detection\n2) Shared dataset\n";
        let cards = HeadingRecognizer::new().recognize(text);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Project 1: AgroSense");
        assert_eq!(
            cards[0].lines,
            vec!["Both use soil moisture sensors", "Same crop domain"]
        );
        assert_eq!(cards[1].title, "Project 2: FarmEye");
        assert_eq!(cards[1].lines, vec!["Image based disease detection", "Shared dataset"]);
    }

    #[test]
    fn label_lines_start_segments() {
        let text = "Why Flagged:\n- Same sensor network design\nExact Matching:\n- Identical MQTT broker setup\n";
        let cards = HeadingRecognizer::new().recognize(text);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Why Flagged");
        assert_eq!(cards[0].lines, vec!["Same sensor network design"]);
        assert_eq!(cards[1].title, "Exact Matching");
    }

    #[test]
    fn inline_label_text_stays_in_title() {
        let text = "Summary: the project is an IoT irrigation system.\n- uses soil moisture probes\n";
        let cards = HeadingRecognizer::new().recognize(text);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Summary: the project is an IoT irrigation system.");
        assert_eq!(cards[0].lines, vec!["uses soil moisture probes"]);

        let parts = crate::display::TitleParts::from_title(&cards[0].title);
        assert_eq!(parts.label.as_deref(), Some("Summary"));
        assert_eq!(parts.value, "the project is an IoT irrigation system.");
    }

    #[test]
    fn leading_prose_gets_default_title() {
        let text = "some lowercase introductory prose here\n## Details\n- a detail that is long enough\n";
        let cards = HeadingRecognizer::new().recognize(text);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Analysis Section");
        assert_eq!(cards[0].lines, vec!["some lowercase introductory prose here"]);
        assert_eq!(cards[1].title, "Details");
    }

    #[test]
    fn short_segments_and_short_lines_are_dropped() {
        let text = "# Tiny\nab\n# Another heading\n- ok\n- abc\n# Real section\n- this line survives\n";
        let cards = HeadingRecognizer::new().recognize(text);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Real section");
        assert_eq!(cards[0].lines, vec!["this line survives"]);
    }

    #[test]
    fn nested_heading_lines_are_not_content() {
        let text = "# Outer heading\n####### not a heading but long enough\n";
        let cards = HeadingRecognizer::new().recognize(text);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].lines, vec!["####### not a heading but long enough"]);
    }

    #[test]
    fn plain_prose_is_one_segment() {
        let text = "this is just prose without any structure at all, spanning\ntwo lines of text";
        let cards = HeadingRecognizer::new().recognize(text);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Analysis Section");
    }
}
