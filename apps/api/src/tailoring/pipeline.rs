//! Pipeline entry point: compose → invoke.
//!
//! The request arrives already normalized. The only await point is the
//! backend call inside `invoke`.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::GenerativeBackend;
use crate::models::{ResumeSource, TailorRequest, TailoringResult};
use crate::tailoring::composer::compose;
use crate::tailoring::invoker::invoke;
use crate::tailoring::prompts::TEMPLATE_VERSION;

/// Runs one tailoring request. Callers attach their own request-id span.
pub async fn tailor(
    backend: &dyn GenerativeBackend,
    request: TailorRequest,
) -> Result<TailoringResult, AppError> {
    let source = match request.resume() {
        ResumeSource::Text(_) => "text",
        ResumeSource::File(media) => media.media_type(),
    };
    info!(
        resume_source = source,
        job_description_chars = request.job_description().chars().count(),
        template_version = TEMPLATE_VERSION,
        "Tailoring request"
    );

    let prompt = compose(&request);
    match invoke(backend, &prompt).await {
        Ok(result) => {
            info!("Tailoring succeeded");
            Ok(result)
        }
        Err(e) => {
            warn!("Tailoring failed: {e}");
            Err(e)
        }
    }
}
