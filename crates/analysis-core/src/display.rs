//! Render-ready view of a `ParsedAnalysis`.
//!
//! Everything here is plain data: the rendering layer decides markup and escaping.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{Card, LegacyReport, ParsedAnalysis, Section};
use crate::sections::{is_guidelines_title, sanitize_title, split_sections};

/// Sanitized title, split at the first colon: `Project 1: AgroSense` → label `Project 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TitleParts {
    pub label: Option<String>,
    pub value: String,
}

impl TitleParts {
    pub fn from_title(title: &str) -> Self {
        let cleaned = sanitize_title(title);
        match cleaned.split_once(':') {
            Some((label, value)) => Self {
                label: Some(label.trim().to_string()),
                value: value.trim().to_string(),
            },
            None => Self {
                label: None,
                value: cleaned,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "layout", content = "content", rename_all = "snake_case")]
pub enum CardBody {
    /// Originality guidelines card: a flat list, never split into sections
    Guidelines(Vec<String>),
    Sections(Vec<Section>),
    /// The card had lines but no section survived the split
    Flat(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CardView {
    pub title: TitleParts,
    pub body: CardBody,
}

impl CardView {
    pub fn from_card(card: &Card) -> Self {
        let body = if is_guidelines_title(&card.title) {
            CardBody::Guidelines(card.lines.clone())
        } else {
            let sections = split_sections(&card.lines);
            if sections.is_empty() {
                CardBody::Flat(card.lines.clone())
            } else {
                CardBody::Sections(sections)
            }
        };

        Self {
            title: TitleParts::from_title(&card.title),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum AnalysisView {
    Cards(Vec<CardView>),
    Report(LegacyReport),
    Text(String),
}

impl From<&ParsedAnalysis> for AnalysisView {
    fn from(parsed: &ParsedAnalysis) -> Self {
        match parsed {
            ParsedAnalysis::CardSet { cards } => {
                AnalysisView::Cards(cards.iter().map(CardView::from_card).collect())
            }
            ParsedAnalysis::LegacyReport(report) => AnalysisView::Report(report.clone()),
            ParsedAnalysis::PlainText { text } => AnalysisView::Text(text.clone()),
        }
    }
}
