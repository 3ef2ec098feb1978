//! Extractor for the fixed five-section report format.
//!
//! Each field has an ordered list of `(label, terminator)` patterns. The field body is
//! the text after the first label match, up to the first terminator match or the end
//! of the text. The bold-markup label is tried first, then the bare label. Fields are
//! searched independently, so section order in the source does not matter.

use regex::Regex;
use tracing::trace;

use crate::markup::Markup;
use crate::model::{Guideline, LegacyReport};

/// Guideline items at or below this many characters are skipped.
const MIN_GUIDELINE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyField {
    Introduction,
    WhyFlagged,
    ExactMatching,
    Uniqueness,
    Guidelines,
}

/// One way of locating a field: where it starts and what ends it.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    label: Regex,
    terminator: Regex,
}

impl FieldPattern {
    fn new(label: &str, terminator: &str) -> Self {
        Self {
            label: Regex::new(&format!("(?i){label}")).expect("valid regex"),
            terminator: Regex::new(&format!("(?i){terminator}")).expect("valid regex"),
        }
    }

    /// The body following the first label match, or `None` if the label is absent.
    pub fn capture<'a>(&self, text: &'a str) -> Option<&'a str> {
        let label = self.label.find(text)?;
        let start = label.end();
        let end = self
            .terminator
            .find_at(text, start)
            .map_or(text.len(), |m| m.start());
        Some(&text[start..end])
    }
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: LegacyField,
    pub patterns: Vec<FieldPattern>,
}

impl FieldRule {
    /// First pattern in priority order whose label matches wins.
    pub fn capture<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.patterns.iter().find_map(|p| p.capture(text))
    }
}

fn default_rules() -> Vec<FieldRule> {
    vec![
        FieldRule {
            field: LegacyField::Introduction,
            patterns: vec![
                FieldPattern::new(r"\*\*Introduction\*\*\s*\n", r"\*\*Why|##"),
                FieldPattern::new(r"(?:##\s*)?Introduction\s*\n", r"##|Why"),
            ],
        },
        FieldRule {
            field: LegacyField::WhyFlagged,
            patterns: vec![
                FieldPattern::new(
                    r"\*\*Why\s+it\s+was\s+flagged\s+as\s+similar[^*\n]*\*\*\s*\n",
                    r"\*\*Exact|##",
                ),
                FieldPattern::new(
                    r"Why\s+(?:it\s+was\s+)?flagged\s+as\s+similar[^*\n]*\n",
                    r"Exact|##",
                ),
            ],
        },
        FieldRule {
            field: LegacyField::ExactMatching,
            patterns: vec![
                FieldPattern::new(
                    r"\*\*Exact\s+matching\s+components[^*\n]*\*\*\s*\n",
                    r"\*\*Uniqueness|##",
                ),
                FieldPattern::new(r"Exact\s+matching\s+components[^*\n]*\n", r"Uniqueness|##"),
            ],
        },
        FieldRule {
            field: LegacyField::Uniqueness,
            patterns: vec![
                FieldPattern::new(
                    r"\*\*Uniqueness\s+improvement[^*\n]*\*\*\s*\n",
                    r"\*\*General|##",
                ),
                FieldPattern::new(r"Uniqueness\s+improvement[^*\n]*\n", r"General|##"),
            ],
        },
        FieldRule {
            field: LegacyField::Guidelines,
            patterns: vec![
                FieldPattern::new(r"\*\*General\s+originality\s+guidelines[^*\n]*\*\*\s*\n", r"##"),
                FieldPattern::new(r"General\s+originality\s+guidelines[^*\n]*\n", r"##"),
            ],
        },
    ]
}

#[derive(Debug, Clone)]
pub struct LegacyExtractor {
    rules: Vec<FieldRule>,
    bold_label: Regex,
    markup: Markup,
}

impl Default for LegacyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LegacyExtractor {
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
            bold_label: Regex::new(r"\*\*(.+?)\*\*:\s*(.+)").expect("valid regex"),
            markup: Markup::new(),
        }
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn extract(&self, text: &str) -> LegacyReport {
        let mut report = LegacyReport::default();

        for rule in &self.rules {
            let Some(body) = rule.capture(text) else {
                continue;
            };
            trace!(field = ?rule.field, body_len = body.len(), "legacy field located");

            match rule.field {
                LegacyField::Introduction => report.introduction = Some(body.trim().to_string()),
                LegacyField::WhyFlagged => report.why_flagged = Some(self.markup.extract_bullets(body)),
                LegacyField::ExactMatching => {
                    report.exact_matching = Some(self.markup.extract_bullets(body))
                }
                LegacyField::Uniqueness => report.uniqueness = Some(self.markup.extract_bullets(body)),
                LegacyField::Guidelines => {
                    report.guidelines = self.parse_guidelines(self.markup.extract_bullets(body))
                }
            }
        }

        report
    }

    /// Split guideline items into `{title, content}`, numbering the survivors from 1.
    ///
    /// `**Title**: rest` uses the bold label; otherwise the title is everything before
    /// the first colon. A title that itself contains a colon is mis-split; accepted.
    fn parse_guidelines(&self, items: Vec<String>) -> Vec<Guideline> {
        items
            .into_iter()
            .filter(|item| item.trim().chars().count() > MIN_GUIDELINE_CHARS)
            .enumerate()
            .map(|(idx, item)| {
                let (title, content) = match self.bold_label.captures(&item) {
                    Some(caps) => (caps[1].trim().to_string(), caps[2].trim().to_string()),
                    None => match item.split_once(':') {
                        Some((title, rest)) => (
                            title.replace("**", "").trim().to_string(),
                            rest.trim().to_string(),
                        ),
                        None => (
                            item.replace("**", "").trim().to_string(),
                            item.trim().to_string(),
                        ),
                    },
                };
                Guideline {
                    number: idx + 1,
                    title,
                    content: vec![content],
                }
            })
            .collect()
    }
}
