//! Render-time classification of card titles and card lines.
//!
//! A line whose normalized text mentions one of a small closed vocabulary of phrases
//! is a section heading; everything else is a content item.

use crate::model::Section;

pub const WHY_FLAGGED: &str = "Why Flagged as Similar";
pub const EXACT_MATCHING: &str = "Exact Matching Components";
pub const UNIQUENESS: &str = "Uniqueness Enhancements";
pub const STUDENT_SYNOPSIS: &str = "Student Project Synopsis";

/// Phrase table in priority order: the first entry with any matching phrase wins.
const HEADING_VOCABULARY: &[(&[&str], &str)] = &[
    (&["why flagged", "why it was flagged"], WHY_FLAGGED),
    (&["exact matching", "matching components"], EXACT_MATCHING),
    (&["unique"], UNIQUENESS),
    (&["student project synopsis"], STUDENT_SYNOPSIS),
];

/// Strip `**`, `_` and backticks from a card title. Applying it twice changes nothing.
pub fn sanitize_title(title: &str) -> String {
    let without_marks: String = title.chars().filter(|c| !matches!(c, '_' | '`')).collect();
    without_marks.replace("**", "").trim().to_string()
}

/// Originality cards render as a flat list rather than being split into sections.
pub fn is_guidelines_title(title: &str) -> bool {
    sanitize_title(title).to_lowercase().contains("originality")
}

/// The canonical heading `line` stands for, if it is a heading at all.
pub fn detect_section_heading(line: &str) -> Option<&'static str> {
    let normalized = line
        .trim_end_matches(|c: char| c == ':' || c == '：' || c.is_whitespace())
        .to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    HEADING_VOCABULARY
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|p| normalized.contains(p)))
        .map(|(_, heading)| *heading)
}

/// Group card lines under the most recent heading. Lines before any heading form a
/// section with no heading. Sections that end up with no items are dropped.
pub fn split_sections<S: AsRef<str>>(lines: &[S]) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for raw in lines {
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        match detect_section_heading(line) {
            Some(heading) => sections.push(Section {
                heading: Some(heading.to_string()),
                items: Vec::new(),
            }),
            None => match sections.last_mut() {
                Some(current) => current.items.push(line.to_string()),
                None => sections.push(Section {
                    heading: None,
                    items: vec![line.to_string()],
                }),
            },
        }
    }

    sections.retain(|s| !s.items.is_empty());
    sections
}
