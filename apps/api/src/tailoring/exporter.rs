//! Result Exporter — turns one result field into a downloadable artifact.
//!
//! Pure: `(text, format)` fully determines the artifact. Nothing is written to disk.
//!
//! `richtext` is Word-compatible HTML served as `application/msword`. It is a
//! markup wrapper, not a binary document. The text goes in unescaped so the
//! artifact carries it verbatim apart from line breaks; a resume containing
//! something tag-like (`Vec<T>`, `<Company>`) will lose that span when Word
//! renders it. `pdf` is not built yet.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const LINE_BREAK: &str = "<br />";

pub const RICHTEXT_HEADER: &str = "<html xmlns:o='urn:schemas-microsoft-com:office:office' \
    xmlns:w='urn:schemas-microsoft-com:office:word' xmlns='http://www.w3.org/TR/REC-html40'>\
    <head><meta charset='utf-8'><title>Resume Suggestions</title></head><body>";

pub const RICHTEXT_FOOTER: &str = "</body></html>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Plain,
    RichText,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Plain, ExportFormat::RichText, ExportFormat::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Plain => "txt",
            ExportFormat::RichText => "doc",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            ExportFormat::Plain => "text/plain;charset=utf-8",
            ExportFormat::RichText => "application/msword",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// `false` for formats a UI should show but disable.
    pub fn is_enabled(self) -> bool {
        !matches!(self, ExportFormat::Pdf)
    }
}

/// Which result field is being exported. Only affects the filename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportDocument {
    #[default]
    Suggestions,
    FullResume,
}

impl ExportDocument {
    pub fn base_name(self) -> &'static str {
        match self {
            ExportDocument::Suggestions => "optimized-resume-suggestions",
            ExportDocument::FullResume => "tailored-resume",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub content: Vec<u8>,
    pub media_type: &'static str,
    pub filename: String,
}

/// Format descriptor for `GET /api/v1/export/formats`.
#[derive(Debug, Clone, Serialize)]
pub struct FormatInfo {
    pub format: ExportFormat,
    pub extension: &'static str,
    pub enabled: bool,
}

pub fn available_formats() -> Vec<FormatInfo> {
    ExportFormat::ALL
        .into_iter()
        .map(|format| FormatInfo {
            format,
            extension: format.extension(),
            enabled: format.is_enabled(),
        })
        .collect()
}

/// Exports suggestions text under the default filename.
pub fn export_artifact(text: &str, format: ExportFormat) -> Result<ExportArtifact, AppError> {
    export_document(text, format, ExportDocument::default())
}

pub fn export_document(
    text: &str,
    format: ExportFormat,
    document: ExportDocument,
) -> Result<ExportArtifact, AppError> {
    let content = match format {
        ExportFormat::Plain => text.as_bytes().to_vec(),
        ExportFormat::RichText => wrap_richtext(text).into_bytes(),
        ExportFormat::Pdf => return Err(AppError::NotImplemented),
    };

    Ok(ExportArtifact {
        content,
        media_type: format.media_type(),
        filename: format!("{}.{}", document.base_name(), format.extension()),
    })
}

fn wrap_richtext(text: &str) -> String {
    let body = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', LINE_BREAK);
    let mut out = String::with_capacity(RICHTEXT_HEADER.len() + body.len() + RICHTEXT_FOOTER.len());
    out.push_str(RICHTEXT_HEADER);
    out.push_str(&body);
    out.push_str(RICHTEXT_FOOTER);
    out
}
