use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;

use flash_report::{generate_summary, render_csv, render_markdown, render_pdf, ReportInputs};

use crate::middleware::RequestId;
use crate::pipeline;

use super::{ApiError, AppState};

use super::monitor::MonitorRequest;

#[derive(Debug, Deserialize)]
pub(super) struct ReportQuery {
    format: Option<String>,
    /// Optional recipient; the rendered report is also emailed as an
    /// attachment when SMTP is configured. Delivery is best effort.
    email_to: Option<String>,
}

/// Run the pipeline for the posted brief and return the rendered report.
///
/// `?format=` selects `pdf` (default), `csv`, or `markdown`.
pub(super) async fn generate_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ReportQuery>,
    Json(request): Json<MonitorRequest>,
) -> Result<Response, ApiError> {
    let format = query.format.unwrap_or_else(|| "pdf".to_string());
    if !matches!(format.as_str(), "pdf" | "csv" | "markdown") {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            format!("unknown report format '{format}', expected pdf, csv, or markdown"),
        ));
    }

    let brief = request
        .brief
        .validated()
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?;

    let run = pipeline::run_pipeline(&state.config, brief, request.mentions).await;
    let inputs = ReportInputs {
        brief: &run.brief,
        kpis: &run.kpis,
        keywords: &run.keywords,
        mentions: &run.mentions,
        generated_at: Utc::now(),
    };
    let filename_stem = format!("flash_narrative_report_{}", run.brief.brand.replace(' ', "_"));

    let (content_type, filename, bytes) = match format.as_str() {
        "csv" => (
            "text/csv; charset=utf-8",
            format!("{filename_stem}.csv"),
            render_csv(&run.mentions).into_bytes(),
        ),
        "markdown" => {
            let llm = pipeline::llm_client(&state.config);
            let summary = generate_summary(llm.as_ref(), &inputs).await;
            (
                "text/markdown; charset=utf-8",
                format!("{filename_stem}.md"),
                render_markdown(&inputs, Some(&summary)).into_bytes(),
            )
        }
        _ => {
            let llm = pipeline::llm_client(&state.config);
            let summary = generate_summary(llm.as_ref(), &inputs).await;
            let bytes = render_pdf(&inputs, Some(&summary)).map_err(|e| {
                tracing::error!(error = %e, "PDF generation failed");
                ApiError::new(req_id.0.clone(), "internal_error", "report generation failed")
            })?;
            ("application/pdf", format!("{filename_stem}.pdf"), bytes)
        }
    };

    if let Some(to) = &query.email_to {
        email_report(
            &state.config,
            to,
            &run.brief.brand,
            &filename,
            content_type,
            bytes.clone(),
        )
        .await;
    }

    Ok(file_response(content_type, &filename, bytes))
}

/// Best-effort report mail; failures are logged, the response still carries
/// the rendered file.
async fn email_report(
    config: &flash_core::AppConfig,
    to: &str,
    brand: &str,
    filename: &str,
    content_type: &str,
    bytes: Vec<u8>,
) {
    let Some(smtp) = &config.smtp else {
        tracing::warn!("email_to requested but SMTP is not configured, skipping report mail");
        return;
    };
    let notifier = match flash_alerts::EmailNotifier::new(smtp) {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(error = %e, "SMTP transport setup failed, skipping report mail");
            return;
        }
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    match notifier
        .send_report(
            to,
            &format!("Flash Narrative report: {brand}"),
            "Attached is the latest Flash Narrative report.",
            filename,
            mime,
            bytes,
        )
        .await
    {
        Ok(()) => tracing::info!(to = %to, "report emailed"),
        Err(e) => tracing::warn!(error = %e, "report mail failed"),
    }
}

fn file_response(content_type: &str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
