//! Axum route handlers for the Tailoring API.

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection,
        Multipart, State,
    },
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::tailoring::exporter::{
    available_formats, export_artifact, export_document, ExportDocument, ExportFormat, FormatInfo,
};
use crate::tailoring::normalizer::{normalize, CandidateInput, ResumeUpload};
use crate::tailoring::pipeline::tailor;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorBody {
    pub resume_text: Option<String>,
    /// `data:<media-type>;base64,<payload>`
    pub resume_file: Option<String>,
    #[serde(default)]
    pub job_description: String,
}

impl From<TailorBody> for CandidateInput {
    fn from(body: TailorBody) -> Self {
        Self {
            resume_text: body.resume_text,
            resume_file: body
                .resume_file
                .filter(|uri| !uri.trim().is_empty())
                .map(ResumeUpload::DataUri),
            job_description: body.job_description,
        }
    }
}

/// `request_id` lets a client drop responses from superseded submissions.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorResponse {
    pub request_id: Uuid,
    pub suggestions: String,
    pub full_resume: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportBody {
    pub text: String,
    pub format: ExportFormat,
    /// Picks the filename; suggestions when omitted.
    pub document: Option<ExportDocument>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tailor
///
/// JSON body; a file resume arrives as a data URI in `resumeFile`.
pub async fn handle_tailor(
    State(state): State<AppState>,
    body: Result<Json<TailorBody>, JsonRejection>,
) -> Result<Json<TailorResponse>, AppError> {
    let Json(body) = body?;
    run_tailoring(&state, body.into()).await
}

/// POST /api/v1/tailor/upload
///
/// Multipart form: `jobDescription`, optional `resumeText`, optional `resumeFile` part.
pub async fn handle_tailor_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TailorResponse>, AppError> {
    let input = read_multipart(multipart?).await?;
    run_tailoring(&state, input).await
}

/// POST /api/v1/export
///
/// Returns the artifact bytes with download headers. `pdf` answers 501.
pub async fn handle_export(
    body: Result<Json<ExportBody>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body?;
    if body.text.is_empty() {
        return Err(AppError::validation("text", "Nothing to export."));
    }

    let artifact = match body.document {
        Some(document) => export_document(&body.text, body.format, document)?,
        None => export_artifact(&body.text, body.format)?,
    };

    Ok((
        [
            (header::CONTENT_TYPE, artifact.media_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.filename),
            ),
        ],
        artifact.content,
    )
        .into_response())
}

/// GET /api/v1/export/formats
pub async fn handle_export_formats() -> Json<Vec<FormatInfo>> {
    Json(available_formats())
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn run_tailoring(
    state: &AppState,
    input: CandidateInput,
) -> Result<Json<TailorResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("tailor_request", %request_id);

    async move {
        let request = normalize(input).inspect_err(|e| {
            info!("Rejected tailoring input: {e}");
        })?;
        let result = tailor(state.backend.as_ref(), request).await?;

        Ok(Json(TailorResponse {
            request_id,
            suggestions: result.suggestions,
            full_resume: result.full_resume,
        }))
    }
    .instrument(span)
    .await
}

async fn read_multipart(mut multipart: Multipart) -> Result<CandidateInput, AppError> {
    let mut input = CandidateInput::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed_form)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "jobDescription" => input.job_description = field.text().await.map_err(malformed_form)?,
            "resumeText" => input.resume_text = Some(field.text().await.map_err(malformed_form)?),
            "resumeFile" => {
                let media_type = field
                    .content_type()
                    .filter(|ct| *ct != "application/octet-stream")
                    .map(str::to_string)
                    .or_else(|| field.file_name().map(media_type_from_file_name))
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let bytes = field.bytes().await.map_err(malformed_form)?;
                // Browsers send an empty part when no file was picked.
                if !bytes.is_empty() {
                    input.resume_file = Some(ResumeUpload::Bytes {
                        media_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(input)
}

fn malformed_form(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::validation("form", format!("Malformed multipart form: {e}"))
}

fn media_type_from_file_name(file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
    .to_string()
}
