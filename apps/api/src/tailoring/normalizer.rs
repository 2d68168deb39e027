//! Input Normalizer — turns a raw submission into a validated `TailorRequest`.
//!
//! Rules:
//! - a file beats text: when both are supplied the text is dropped
//! - neither supplied → `Validation { field: "resume" }`
//! - length bounds on job description and resume text, size and type bounds on files
//!
//! Mutual exclusivity is enforced by construction: `ResumeSource` holds one or the other.

use tracing::debug;

use crate::errors::AppError;
use crate::models::{InlineMedia, ResumeSource, TailorRequest};

pub const MIN_TEXT_CHARS: usize = 50;
pub const MAX_TEXT_CHARS: usize = 15_000;
/// Decoded size limit for uploaded resume files.
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// Media types the generative backend can read inline.
pub const ACCEPTED_MEDIA_TYPES: &[&str] = &[
    "application/pdf",
    "text/plain",
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
];

/// A resume file as the caller received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeUpload {
    /// Raw bytes plus the declared media type (multipart upload).
    Bytes { media_type: String, bytes: Vec<u8> },
    /// An already-encoded `data:<media-type>;base64,<payload>` string (JSON body).
    DataUri(String),
}

/// An unvalidated submission. Any combination of fields may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateInput {
    pub resume_text: Option<String>,
    pub resume_file: Option<ResumeUpload>,
    pub job_description: String,
}

impl From<&TailorRequest> for CandidateInput {
    fn from(request: &TailorRequest) -> Self {
        Self {
            resume_text: request.resume_text().map(str::to_string),
            resume_file: request
                .resume_file()
                .map(|media| ResumeUpload::DataUri(media.to_data_uri())),
            job_description: request.job_description().to_string(),
        }
    }
}

/// Validates a submission and builds the immutable request the pipeline runs on.
pub fn normalize(input: CandidateInput) -> Result<TailorRequest, AppError> {
    let job_description = check_text_bounds(
        "jobDescription",
        "Job description",
        &input.job_description,
    )?;

    let resume = match (input.resume_file, input.resume_text) {
        (Some(upload), text) => {
            if text.as_deref().is_some_and(|t| !t.trim().is_empty()) {
                debug!("Both resume text and file supplied; using the file");
            }
            ResumeSource::File(encode_upload(upload)?)
        }
        (None, Some(text)) if !text.trim().is_empty() => {
            ResumeSource::Text(check_text_bounds("resumeText", "Resume", &text)?)
        }
        (None, _) => {
            return Err(AppError::validation(
                "resume",
                "Resume source required: paste your resume or upload a file.",
            ))
        }
    };

    Ok(TailorRequest::new(resume, job_description))
}

/// Trims `raw` and enforces `MIN_TEXT_CHARS..=MAX_TEXT_CHARS` (counted in chars).
fn check_text_bounds(field: &'static str, label: &str, raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    let chars = trimmed.chars().count();

    if chars < MIN_TEXT_CHARS {
        return Err(AppError::validation(
            field,
            format!("{label} is too short (minimum {MIN_TEXT_CHARS} characters)."),
        ));
    }
    if chars > MAX_TEXT_CHARS {
        return Err(AppError::validation(
            field,
            format!("{label} is too long (maximum {MAX_TEXT_CHARS} characters)."),
        ));
    }

    Ok(trimmed.to_string())
}

fn encode_upload(upload: ResumeUpload) -> Result<InlineMedia, AppError> {
    let media = match upload {
        ResumeUpload::Bytes { media_type, bytes } => {
            if bytes.len() > MAX_FILE_BYTES {
                return Err(file_too_large());
            }
            InlineMedia::from_bytes(media_type, &bytes)
        }
        ResumeUpload::DataUri(uri) => InlineMedia::parse_data_uri(&uri).map_err(|e| {
            AppError::validation("resumeFile", format!("Resume file is not a valid data URI: {e}."))
        })?,
    };

    if !ACCEPTED_MEDIA_TYPES.contains(&media.media_type()) {
        return Err(AppError::validation(
            "resumeFile",
            format!(
                "Unsupported resume file type '{}'. Upload a PDF, plain-text, or image file.",
                media.media_type()
            ),
        ));
    }
    if media.decoded_len() == 0 {
        return Err(AppError::validation("resumeFile", "Resume file is empty."));
    }
    if media.decoded_len() > MAX_FILE_BYTES {
        return Err(file_too_large());
    }
    // Plain-text files travel to the backend as text, not base64.
    if media.media_type() == "text/plain" && std::str::from_utf8(&media.decode()).is_err() {
        return Err(AppError::validation(
            "resumeFile",
            "Plain-text resume must be UTF-8.",
        ));
    }

    debug!(
        media_type = media.media_type(),
        bytes = media.decoded_len(),
        "Encoded resume file"
    );
    Ok(media)
}

fn file_too_large() -> AppError {
    AppError::validation(
        "resumeFile",
        format!(
            "Resume file is too large (maximum {} MB).",
            MAX_FILE_BYTES / (1024 * 1024)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(len: usize) -> String {
        "x".repeat(len)
    }

    fn jd() -> String {
        "Senior Rust engineer to build distributed storage systems at scale.".to_string()
    }

    fn resume() -> String {
        "Jane Doe — 8 years building backend services in Rust and Go.".to_string()
    }

    fn pdf_upload() -> ResumeUpload {
        ResumeUpload::Bytes {
            media_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.7 fake resume".to_vec(),
        }
    }

    fn field_of(err: AppError) -> &'static str {
        err.field().expect("expected a validation error")
    }

    #[test]
    fn test_text_only_request() {
        let request = normalize(CandidateInput {
            resume_text: Some(resume()),
            resume_file: None,
            job_description: jd(),
        })
        .unwrap();
        assert_eq!(request.resume_text(), Some(resume().as_str()));
        assert!(request.resume_file().is_none());
        assert_eq!(request.job_description(), jd());
    }

    #[test]
    fn test_file_takes_precedence_and_clears_text() {
        let request = normalize(CandidateInput {
            resume_text: Some(resume()),
            resume_file: Some(pdf_upload()),
            job_description: jd(),
        })
        .unwrap();
        assert!(request.resume_text().is_none());
        let file = request.resume_file().unwrap();
        assert_eq!(file.media_type(), "application/pdf");
        assert!(file.to_data_uri().starts_with("data:application/pdf;base64,"));
    }

    #[test]
    fn test_file_wins_even_when_text_is_invalid() {
        let request = normalize(CandidateInput {
            resume_text: Some("too short".to_string()),
            resume_file: Some(pdf_upload()),
            job_description: jd(),
        })
        .unwrap();
        assert!(request.resume_file().is_some());
    }

    #[test]
    fn test_renormalizing_is_a_no_op() {
        for input in [
            CandidateInput {
                resume_text: Some(resume()),
                resume_file: Some(pdf_upload()),
                job_description: jd(),
            },
            CandidateInput {
                resume_text: Some(format!("  {}  ", resume())),
                resume_file: None,
                job_description: jd(),
            },
        ] {
            let once = normalize(input).unwrap();
            let twice = normalize(CandidateInput::from(&once)).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_neither_source_fails_on_resume_field() {
        let err = normalize(CandidateInput {
            resume_text: None,
            resume_file: None,
            job_description: jd(),
        })
        .unwrap_err();
        assert_eq!(field_of(err), "resume");
    }

    #[test]
    fn test_empty_text_without_file_fails_on_resume_field() {
        let err = normalize(CandidateInput {
            resume_text: Some(String::new()),
            resume_file: None,
            job_description: jd(),
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "resume", .. }));
    }

    #[test]
    fn test_whitespace_text_counts_as_missing() {
        let err = normalize(CandidateInput {
            resume_text: Some("   \n\t ".to_string()),
            resume_file: None,
            job_description: jd(),
        })
        .unwrap_err();
        assert_eq!(field_of(err), "resume");
    }

    #[test]
    fn test_job_description_bounds() {
        for bad in [text_of(MIN_TEXT_CHARS - 1), text_of(MAX_TEXT_CHARS + 1)] {
            let err = normalize(CandidateInput {
                resume_text: Some(resume()),
                resume_file: None,
                job_description: bad,
            })
            .unwrap_err();
            assert_eq!(field_of(err), "jobDescription");
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        for len in [MIN_TEXT_CHARS, MAX_TEXT_CHARS] {
            let request = normalize(CandidateInput {
                resume_text: Some(text_of(len)),
                resume_file: None,
                job_description: text_of(len),
            });
            assert!(request.is_ok(), "length {len} should be accepted");
        }
    }

    #[test]
    fn test_resume_text_bounds() {
        for bad in [text_of(MIN_TEXT_CHARS - 1), text_of(MAX_TEXT_CHARS + 1)] {
            let err = normalize(CandidateInput {
                resume_text: Some(bad),
                resume_file: None,
                job_description: jd(),
            })
            .unwrap_err();
            assert_eq!(field_of(err), "resumeText");
        }
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 50 multi-byte chars are 100+ bytes but still exactly at the minimum.
        let request = normalize(CandidateInput {
            resume_text: Some("é".repeat(MIN_TEXT_CHARS)),
            resume_file: None,
            job_description: jd(),
        });
        assert!(request.is_ok());
    }

    #[test]
    fn test_data_uri_upload_is_kept_verbatim() {
        let uri = "data:application/pdf;base64,JVBERi0xLjc=";
        let request = normalize(CandidateInput {
            resume_text: None,
            resume_file: Some(ResumeUpload::DataUri(uri.to_string())),
            job_description: jd(),
        })
        .unwrap();
        assert_eq!(request.resume_file().unwrap().to_data_uri(), uri);
    }

    #[test]
    fn test_malformed_data_uri_fails_on_resume_file() {
        let err = normalize(CandidateInput {
            resume_text: None,
            resume_file: Some(ResumeUpload::DataUri("not-a-data-uri".to_string())),
            job_description: jd(),
        })
        .unwrap_err();
        assert_eq!(field_of(err), "resumeFile");
    }

    #[test]
    fn test_unsupported_media_type_fails_on_resume_file() {
        let err = normalize(CandidateInput {
            resume_text: None,
            resume_file: Some(ResumeUpload::Bytes {
                media_type:
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                        .to_string(),
                bytes: b"PK\x03\x04".to_vec(),
            }),
            job_description: jd(),
        })
        .unwrap_err();
        assert_eq!(field_of(err), "resumeFile");
    }

    #[test]
    fn test_empty_file_fails_on_resume_file() {
        let err = normalize(CandidateInput {
            resume_text: None,
            resume_file: Some(ResumeUpload::Bytes {
                media_type: "application/pdf".to_string(),
                bytes: vec![],
            }),
            job_description: jd(),
        })
        .unwrap_err();
        assert_eq!(field_of(err), "resumeFile");
    }

    #[test]
    fn test_oversized_file_fails_on_resume_file() {
        let err = normalize(CandidateInput {
            resume_text: None,
            resume_file: Some(ResumeUpload::Bytes {
                media_type: "application/pdf".to_string(),
                bytes: vec![0u8; MAX_FILE_BYTES + 1],
            }),
            job_description: jd(),
        })
        .unwrap_err();
        assert_eq!(field_of(err), "resumeFile");
    }

    #[test]
    fn test_media_type_parameters_are_dropped() {
        let request = normalize(CandidateInput {
            resume_text: None,
            resume_file: Some(ResumeUpload::Bytes {
                media_type: "Text/Plain; charset=utf-8".to_string(),
                bytes: resume().into_bytes(),
            }),
            job_description: jd(),
        })
        .unwrap();
        assert_eq!(request.resume_file().unwrap().media_type(), "text/plain");
    }

    #[test]
    fn test_non_utf8_plain_text_file_fails_on_resume_file() {
        let err = normalize(CandidateInput {
            resume_text: None,
            resume_file: Some(ResumeUpload::Bytes {
                media_type: "text/plain".to_string(),
                bytes: vec![0x4a, 0x61, 0x6e, 0xe9, 0x20, 0xff, 0xfe],
            }),
            job_description: jd(),
        })
        .unwrap_err();
        assert_eq!(field_of(err), "resumeFile");
    }

    #[test]
    fn test_non_utf8_bytes_are_fine_for_binary_types() {
        let request = normalize(CandidateInput {
            resume_text: None,
            resume_file: Some(ResumeUpload::Bytes {
                media_type: "image/png".to_string(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe],
            }),
            job_description: jd(),
        });
        assert!(request.is_ok());
    }
}
