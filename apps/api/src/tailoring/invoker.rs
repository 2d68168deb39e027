//! Tailoring Invoker — one backend call, one atomic `TailoringResult`.
//!
//! Transport failures, non-conforming payloads, and empty payloads all collapse
//! into `AppError::Generation`. The detail string is for operators; the HTTP
//! layer replaces it with a generic message.

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::llm_client::GenerativeBackend;
use crate::models::TailoringResult;
use crate::tailoring::composer::ComposedPrompt;

pub async fn invoke(
    backend: &dyn GenerativeBackend,
    prompt: &ComposedPrompt,
) -> Result<TailoringResult, AppError> {
    let payload = backend
        .generate(&prompt.system, &prompt.instruction, &prompt.schema)
        .await
        .map_err(|e| AppError::Generation(format!("Tailoring LLM call failed: {e}")))?;

    if payload.is_null() || payload.as_object().is_some_and(|o| o.is_empty()) {
        return Err(AppError::Generation(
            "Tailoring LLM call returned an empty payload".to_string(),
        ));
    }

    let result: TailoringResult = serde_json::from_value(payload).map_err(|e| {
        AppError::Generation(format!("Tailoring payload did not match the output schema: {e}"))
    })?;

    for (field, value) in [
        ("suggestions", &result.suggestions),
        ("fullResume", &result.full_resume),
    ] {
        if value.trim().is_empty() {
            warn!("Tailoring payload had a blank '{field}' field");
            return Err(AppError::Generation(format!(
                "Tailoring payload field '{field}' was empty"
            )));
        }
    }

    debug!(
        suggestions_chars = result.suggestions.len(),
        full_resume_chars = result.full_resume.len(),
        "Tailoring payload accepted"
    );

    Ok(result)
}
