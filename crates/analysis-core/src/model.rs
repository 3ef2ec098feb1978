use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A titled block of analysis text, e.g. one `╭── Project A ──` box or one `## Heading` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Card {
    /// Card title as extracted from the source, markup not yet sanitized
    pub title: String,
    /// Content lines in source order; every entry is non-empty after trimming
    pub lines: Vec<String>,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }
}

/// A run of card lines grouped under a recognized heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Section {
    /// Canonical heading, e.g. "Why Flagged as Similar". `None` for lines before any heading.
    pub heading: Option<String>,
    /// Content items under the heading
    pub items: Vec<String>,
}

/// One numbered entry of the "General originality guidelines" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Guideline {
    /// 1-based position among the surviving guideline items
    pub number: usize,
    /// Short label, e.g. "Add sensors"
    pub title: String,
    /// Body text following the label
    pub content: Vec<String>,
}

/// The fixed five-field report recognized from historical section labels.
///
/// Every field is independent; `None` means the label was never found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LegacyReport {
    pub introduction: Option<String>,
    pub why_flagged: Option<Vec<String>>,
    pub exact_matching: Option<Vec<String>>,
    pub uniqueness: Option<Vec<String>>,
    pub guidelines: Vec<Guideline>,
}

impl LegacyReport {
    /// True when at least one field carries something to display.
    pub fn has_content(&self) -> bool {
        let non_empty = |items: &Option<Vec<String>>| items.as_ref().is_some_and(|v| !v.is_empty());

        self.introduction
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
            || non_empty(&self.why_flagged)
            || non_empty(&self.exact_matching)
            || non_empty(&self.uniqueness)
            || !self.guidelines.is_empty()
    }
}

/// Result of interpreting a free-form analysis narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedAnalysis {
    /// Two or more cards found by one recognizer
    CardSet { cards: Vec<Card> },
    /// No card convention, but at least one legacy section label had content
    LegacyReport(LegacyReport),
    /// Nothing recognized; the input text for literal display
    PlainText { text: String },
}

impl ParsedAnalysis {
    /// Short variant name, used in logs and tool responses.
    pub fn kind(&self) -> &'static str {
        match self {
            ParsedAnalysis::CardSet { .. } => "card_set",
            ParsedAnalysis::LegacyReport(_) => "legacy_report",
            ParsedAnalysis::PlainText { .. } => "plain_text",
        }
    }

    pub fn is_structured(&self) -> bool {
        !matches!(self, ParsedAnalysis::PlainText { .. })
    }
}
