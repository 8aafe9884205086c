//! Request handlers for the three operations and the report download.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use super::form::Form;
use crate::config::REPORT_FILE_NAME;
use crate::error::Result;
use crate::report::ReportData;
use crate::types::{ComparisonRecord, Salt, VerificationOutcome, VerificationRecord};
use crate::verifier::Verifier;

/// Body of `POST /download-report`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub report_data: ReportData,
}

/// `POST /generate-code`: field `file`.
pub async fn generate_code(State(verifier): State<Arc<Verifier>>, multipart: Multipart) -> Result<Json<VerificationRecord>> {
    let mut form = Form::collect(multipart, verifier.policy(), &["file"], &[]).await?;
    let file = form.take_file("file")?;

    Ok(Json(verifier.issue(file)?))
}

/// `POST /verify-code`: fields `file`, `code`, `salt`.
pub async fn verify_code(State(verifier): State<Arc<Verifier>>, multipart: Multipart) -> Result<Json<VerificationOutcome>> {
    let mut form = Form::collect(multipart, verifier.policy(), &["file"], &["code", "salt"]).await?;
    let file = form.take_file("file")?;
    let code = form.text("code")?;
    let salt = Salt::parse(form.text("salt")?)?;

    Ok(Json(verifier.check(file, code, &salt)?))
}

/// `POST /compare-files`: fields `file1`, `file2`.
pub async fn compare_files(State(verifier): State<Arc<Verifier>>, multipart: Multipart) -> Result<Json<ComparisonRecord>> {
    let mut form = Form::collect(multipart, verifier.policy(), &["file1", "file2"], &[]).await?;
    let first = form.take_file("file1")?;
    let second = form.take_file("file2")?;

    Ok(Json(verifier.compare(first, second)?))
}

/// `POST /download-report`: renders the posted result as a text attachment.
pub async fn download_report(Json(request): Json<ReportRequest>) -> impl IntoResponse {
    tracing::info!(operation = %request.report_data.operation(), "report generated");

    let disposition = format!("attachment; filename=\"{REPORT_FILE_NAME}\"");
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()), (header::CONTENT_DISPOSITION, disposition)], request.report_data.render())
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
