//! Recognizer for box-drawn cards:
//!
//! ```text
//! ╭── [Project A] ─────────
//! │ • Point one
//! │ • Point two
//! ╰────────────────────────
//! ```
//!
//! Line-by-line state machine with two states, idle and in-card. A card opens on a
//! `╭`/`┌` corner, or on any line containing `──` while idle, and closes on `╰`/`└`.
//! Input that ends with a card still open keeps that card.
//!
//! Known false positive: prose containing a `──` run while idle opens a card.

use tracing::trace;

use crate::analyze::Recognizer;
use crate::model::Card;

const OPEN_CORNERS: &[char] = &['╭', '┌'];
const CLOSE_CORNERS: &[char] = &['╰', '└'];
const CONTENT_MARKERS: &[char] = &['│', '┃', '•', '-', '*'];
/// A line starting with one of these inside a card is ambiguous and skipped.
const STRUCTURAL_GLYPHS: &[char] = &['╭', '╰', '┌', '└', '│', '┃', '#', '*'];
const HORIZONTAL_RULE: &str = "──";
const DEFAULT_TITLE: &str = "Analysis";

#[derive(Debug, Clone, Default)]
pub struct BoxCardRecognizer;

impl BoxCardRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl Recognizer for BoxCardRecognizer {
    fn name(&self) -> &'static str {
        "box_card"
    }

    fn recognize(&self, text: &str) -> Vec<Card> {
        let mut cards: Vec<Card> = Vec::new();
        let mut current: Option<Card> = None;

        for (line_number, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            if line.is_empty() {
                continue;
            }

            if line.starts_with(OPEN_CORNERS) || (current.is_none() && line.contains(HORIZONTAL_RULE)) {
                flush(&mut current, &mut cards);
                let title = extract_title(line);
                trace!(line_number = line_number + 1, title = %title, "box card opened");
                current = Some(Card::new(title));
            } else if line.starts_with(CLOSE_CORNERS) {
                flush(&mut current, &mut cards);
            } else if let Some(card) = current.as_mut() {
                if line.starts_with(CONTENT_MARKERS) {
                    let cleaned = line
                        .trim_start_matches(|c: char| CONTENT_MARKERS.contains(&c) || c.is_whitespace())
                        .trim();
                    if !cleaned.is_empty() {
                        card.lines.push(cleaned.to_string());
                    }
                } else if !line.starts_with(STRUCTURAL_GLYPHS) {
                    card.lines.push(line.trim().to_string());
                }
            }
        }

        flush(&mut current, &mut cards);
        cards
    }
}

/// Emit the open card, if any, unless it has no non-blank lines.
fn flush(current: &mut Option<Card>, cards: &mut Vec<Card>) {
    let Some(mut card) = current.take() else {
        return;
    };
    card.lines.retain(|line| !line.trim().is_empty());
    if !card.lines.is_empty() {
        cards.push(card);
    }
}

/// `╭── [Project A] ───╮` → `Project A`. Empty titles become "Analysis".
fn extract_title(line: &str) -> String {
    let is_lead = |c: char| matches!(c, '╭' | '┌' | '╰' | '└' | '─') || c.is_whitespace();
    let is_tail = |c: char| matches!(c, '─' | '╮' | '┐' | '╯' | '┘' | '╰' | '└') || c.is_whitespace();

    let inner = line.trim_start_matches(is_lead).trim_end_matches(is_tail);
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner).trim();

    if inner.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        inner.to_string()
    }
}
