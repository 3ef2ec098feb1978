//! Interpreter for free-form similarity analysis narratives.
//!
//! `analyze` turns loosely formatted text into cards, a legacy five-field report,
//! or plain text. It never fails: unrecognized text comes back unchanged.
pub mod analyze;
pub mod box_card;
pub mod display;
pub mod heading;
pub mod legacy;
pub mod markup;
pub mod model;
pub mod sections;

pub use analyze::{analyze, Analyzer, Recognizer, MIN_CARDS};
pub use display::AnalysisView;
pub use model::{Card, Guideline, LegacyReport, ParsedAnalysis, Section};
