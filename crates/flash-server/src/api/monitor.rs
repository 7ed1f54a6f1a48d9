use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use flash_analysis::KpiReport;
use flash_core::{Mention, MonitorBrief};

use crate::middleware::RequestId;
use crate::pipeline;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct MonitorRequest {
    #[serde(flatten)]
    pub(super) brief: MonitorBrief,
    /// Caller-supplied mentions skip collection entirely; this is the spreadsheet
    /// upload path of the dashboard.
    #[serde(default)]
    pub(super) mentions: Option<Vec<Mention>>,
}

#[derive(Debug, Serialize)]
pub(super) struct KeywordItem {
    term: String,
    count: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct ClassificationMeta {
    llm_labeled: usize,
    rule_labeled: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct MonitorData {
    brief: MonitorBrief,
    kpis: KpiReport,
    keywords: Vec<KeywordItem>,
    recommendations: Vec<String>,
    classification: ClassificationMeta,
    mentions: Vec<Mention>,
}

pub(super) async fn run_monitor(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<MonitorRequest>,
) -> Result<Json<ApiResponse<MonitorData>>, ApiError> {
    let brief = request
        .brief
        .validated()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let run = pipeline::run_pipeline(&state.config, brief, request.mentions).await;

    let data = MonitorData {
        brief: run.brief,
        kpis: run.kpis,
        keywords: run
            .keywords
            .into_iter()
            .map(|(term, count)| KeywordItem { term, count })
            .collect(),
        recommendations: run.recommendations,
        classification: ClassificationMeta {
            llm_labeled: run.classify.llm_labeled,
            rule_labeled: run.classify.rule_labeled,
        },
        mentions: run.mentions,
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
