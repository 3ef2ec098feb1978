use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use analysis_core::display::AnalysisView;
use analysis_core::sections::{detect_section_heading, split_sections};
use analysis_core::{Analyzer, ParsedAnalysis, Section};

#[derive(Clone)]
pub struct AnalysisServer {
    analyzer: Arc<Analyzer>,
    tool_router: ToolRouter<AnalysisServer>,
}

impl AnalysisServer {
    pub fn new(analyzer: Arc<Analyzer>) -> Self {
        Self {
            analyzer,
            tool_router: Self::tool_router(),
        }
    }

    fn parse(&self, text: &str) -> ParsedAnalysis {
        let parsed = self.analyzer.analyze(text);
        info!(
            kind = parsed.kind(),
            structured = parsed.is_structured(),
            text_len = text.len(),
            "analysis parsed"
        );
        parsed
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AnalyzeTextParams {
    /// The raw narrative produced by the similarity report generator. May be empty.
    text: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ClassifyLineParams {
    /// A single card line, e.g. "Why Flagged as Similar:".
    line: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SplitSectionsParams {
    /// Card lines in source order.
    lines: Vec<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct AnalyzeTextResponse {
    /// "card_set", "legacy_report" or "plain_text"
    kind: String,
    analysis: ParsedAnalysis,
}

#[derive(Debug, Serialize, JsonSchema)]
struct DisplayResponse {
    view: AnalysisView,
}

#[derive(Debug, Serialize, JsonSchema)]
struct ClassifyLineResponse {
    /// Canonical section heading, or null when the line is content.
    heading: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
struct SplitSectionsResponse {
    sections: Vec<Section>,
}

#[tool_router]
impl AnalysisServer {
    #[tool(description = "Interpret a free-form similarity analysis narrative into cards, a legacy five-section report, or plain text. Never fails on unstructured input.")]
    async fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<Json<AnalyzeTextResponse>, String> {
        let analysis = self.parse(&params.text);
        Ok(Json(AnalyzeTextResponse {
            kind: analysis.kind().to_string(),
            analysis,
        }))
    }

    #[tool(description = "Interpret a narrative and return a render-ready view: card titles split into label/value, card lines grouped into sections, originality guidelines as a flat list.")]
    async fn analyze_for_display(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<Json<DisplayResponse>, String> {
        let analysis = self.parse(&params.text);
        Ok(Json(DisplayResponse {
            view: AnalysisView::from(&analysis),
        }))
    }

    #[tool(description = "Classify one card line: returns its canonical section heading (e.g. 'Why Flagged as Similar') or null when it is a content item.")]
    async fn classify_line(
        &self,
        Parameters(params): Parameters<ClassifyLineParams>,
    ) -> Result<Json<ClassifyLineResponse>, String> {
        if params.line.trim().is_empty() {
            return Err("line must not be empty".to_string());
        }
        Ok(Json(ClassifyLineResponse {
            heading: detect_section_heading(&params.line).map(str::to_string),
        }))
    }

    #[tool(description = "Group card lines into sections under their recognized headings. Lines before any heading form a section with a null heading.")]
    async fn split_sections(
        &self,
        Parameters(params): Parameters<SplitSectionsParams>,
    ) -> Result<Json<SplitSectionsResponse>, String> {
        Ok(Json(SplitSectionsResponse {
            sections: split_sections(&params.lines),
        }))
    }
}

#[tool_handler]
impl ServerHandler for AnalysisServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "analysis-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Similarity analysis interpreter. Use analyze_text to get the structured result \
                 of an analysis narrative, analyze_for_display for a render-ready view, and \
                 classify_line/split_sections to group card lines under canonical headings."
                    .to_string(),
            ),
        }
    }
}
