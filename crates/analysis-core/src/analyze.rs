//! Dispatcher over the recognizer chain.
//!
//! Order: box cards, heading sections, legacy report, plain text. Each card recognizer
//! must produce at least `MIN_CARDS` cards to be used; otherwise the next one runs.
//! Box cards come first, so text that matches both card conventions parses as boxes.

use tracing::debug;

use crate::box_card::BoxCardRecognizer;
use crate::heading::HeadingRecognizer;
use crate::legacy::LegacyExtractor;
use crate::model::{Card, ParsedAnalysis};

/// A single detected card is treated as noise, not structure.
pub const MIN_CARDS: usize = 2;

/// A card-producing strategy in the fallback chain.
pub trait Recognizer: Send + Sync {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    /// All cards found in `text`, in source order. Never fails; no structure is an empty vec.
    fn recognize(&self, text: &str) -> Vec<Card>;
}

/// Stateless analysis service. Holds compiled patterns only, so one instance can be
/// shared across threads and call sites.
pub struct Analyzer {
    recognizers: Vec<Box<dyn Recognizer>>,
    legacy: LegacyExtractor,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::with_recognizers(vec![
            Box::new(BoxCardRecognizer::new()),
            Box::new(HeadingRecognizer::new()),
        ])
    }

    /// Build an analyzer with a custom recognizer chain, tried in the given order.
    pub fn with_recognizers(recognizers: Vec<Box<dyn Recognizer>>) -> Self {
        Self {
            recognizers,
            legacy: LegacyExtractor::new(),
        }
    }

    pub fn recognizer_names(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    pub fn analyze(&self, text: &str) -> ParsedAnalysis {
        if text.trim().is_empty() {
            return ParsedAnalysis::PlainText {
                text: String::new(),
            };
        }

        for recognizer in &self.recognizers {
            let cards = recognizer.recognize(text);
            debug!(recognizer = recognizer.name(), cards = cards.len(), "recognizer finished");
            if cards.len() >= MIN_CARDS {
                return ParsedAnalysis::CardSet { cards };
            }
        }

        let report = self.legacy.extract(text);
        if report.has_content() {
            debug!("legacy report recognized");
            return ParsedAnalysis::LegacyReport(report);
        }

        debug!(text_len = text.len(), "no structure recognized, using plain text");
        ParsedAnalysis::PlainText {
            text: text.to_string(),
        }
    }
}

/// Interpret `text` with the default recognizer chain.
pub fn analyze(text: &str) -> ParsedAnalysis {
    Analyzer::new().analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LegacyReport;

    #[test]
    fn empty_and_whitespace_are_plain_text() {
        for text in ["", "   \n\t  "] {
            assert_eq!(
                analyze(text),
                ParsedAnalysis::PlainText {
                    text: String::new()
                }
            );
        }
    }

    #[test]
    fn two_box_cards() {
        let text = "╭─ Project A ─╮\n│ Point one\n│ Point two\n╰──╯\n╭─ Project B ─╮\n│ Point three\n╰──╯";
        assert_eq!(
            analyze(text),
            ParsedAnalysis::CardSet {
                cards: vec![
                    Card {
                        title: "Project A".to_string(),
                        lines: vec!["Point one".to_string(), "Point two".to_string()],
                    },
                    Card {
                        title: "Project B".to_string(),
                        lines: vec!["Point three".to_string()],
                    },
                ],
            }
        );
    }

    #[test]
    fn single_box_card_falls_through_to_plain_text() {
        let text = "╭─ Project A ─╮\n│ Point one\n│ Point two\n╰──╯";
        assert_eq!(
            analyze(text),
            ParsedAnalysis::PlainText {
                text: text.to_string()
            }
        );
    }

    #[test]
    fn single_box_card_falls_through_to_headings() {
        let text = "╭─ Lone card ─╮\n│ only content\n╰──╯\n## First section\n- first section detail line\n## Second section\n- second section detail line\n";
        let ParsedAnalysis::CardSet { cards } = analyze(text) else {
            panic!("expected heading cards");
        };
        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Analysis Section", "First section", "Second section"]);
    }

    #[test]
    fn single_box_card_falls_through_to_legacy_report() {
        let text = "╭─ Lone card ─╮\n│ only content\n╰──╯\n**Why it was flagged as similar**\n- Same domain overlap";
        assert_eq!(
            analyze(text),
            ParsedAnalysis::LegacyReport(LegacyReport {
                why_flagged: Some(vec!["Same domain overlap".to_string()]),
                ..Default::default()
            })
        );
    }

    #[test]
    fn box_cards_win_over_headings() {
        let text = "## Heading one\n- heading content line\n## Heading two\n- heading content line\n╭── Box one ──\n│ box content\n╰──\n╭── Box two ──\n│ box content\n╰──\n";
        let ParsedAnalysis::CardSet { cards } = analyze(text) else {
            panic!("expected cards");
        };
        assert_eq!(cards[0].title, "Box one");
        assert_eq!(cards[1].title, "Box two");
    }

    #[test]
    fn legacy_report() {
        let text = "**Introduction**\nThis project explores X.\n\n**Why it was flagged as similar**\n- Same domain\n- Same tech stack";
        assert_eq!(
            analyze(text),
            ParsedAnalysis::LegacyReport(LegacyReport {
                introduction: Some("This project explores X.".to_string()),
                why_flagged: Some(vec!["Same domain".to_string(), "Same tech stack".to_string()]),
                exact_matching: None,
                uniqueness: None,
                guidelines: Vec::new(),
            })
        );
    }

    #[test]
    fn prose_is_returned_unchanged() {
        let text = "  the submitted synopsis overlaps with earlier work\nin several places, mostly in scope.  ";
        assert_eq!(
            analyze(text),
            ParsedAnalysis::PlainText {
                text: text.to_string()
            }
        );
    }

    #[test]
    fn custom_chain_order() {
        let analyzer = Analyzer::with_recognizers(vec![Box::new(HeadingRecognizer::new())]);
        assert_eq!(analyzer.recognizer_names(), vec!["heading"]);
        assert_eq!(Analyzer::new().recognizer_names(), vec!["box_card", "heading"]);
    }

    #[test]
    fn analyzer_is_shareable_across_threads() {
        let analyzer = std::sync::Arc::new(Analyzer::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let analyzer = std::sync::Arc::clone(&analyzer);
                std::thread::spawn(move || analyzer.analyze(&format!("plain text number {i}")))
            })
            .collect();
        for handle in handles {
            assert!(!handle.join().unwrap().is_structured());
        }
    }

    mod prop {
        use super::*;
        use crate::sections::sanitize_title;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn analyze_is_total(s in "\\PC*") {
                let parsed = analyze(&s);
                if let ParsedAnalysis::CardSet { cards } = &parsed {
                    prop_assert!(cards.len() >= MIN_CARDS);
                    for card in cards {
                        prop_assert!(!card.lines.is_empty());
                        prop_assert!(card.lines.iter().all(|l| !l.trim().is_empty()));
                    }
                }
            }

            #[test]
            fn analyze_handles_markup_soup(s in "[╭╰┌└│┃•*#:\\-─ \\nA-Za-z0-9]{0,200}") {
                let parsed = analyze(&s);
                if let ParsedAnalysis::PlainText { text } = parsed {
                    prop_assert!(text.is_empty() || text == s);
                }
            }

            #[test]
            fn sanitize_title_is_idempotent(s in "[*_` a-zA-Z:]{0,40}") {
                let once = sanitize_title(&s);
                prop_assert_eq!(sanitize_title(&once), once);
            }
        }
    }
}
