use crate::models::media::InlineMedia;

/// Where the candidate's resume comes from. Exactly one source per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeSource {
    Text(String),
    File(InlineMedia),
}

/// A validated tailoring submission. Only `normalizer::normalize` builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailorRequest {
    resume: ResumeSource,
    job_description: String,
}

impl TailorRequest {
    pub(crate) fn new(resume: ResumeSource, job_description: String) -> Self {
        Self {
            resume,
            job_description,
        }
    }

    pub fn resume(&self) -> &ResumeSource {
        &self.resume
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn resume_text(&self) -> Option<&str> {
        match &self.resume {
            ResumeSource::Text(text) => Some(text),
            ResumeSource::File(_) => None,
        }
    }

    pub fn resume_file(&self) -> Option<&InlineMedia> {
        match &self.resume {
            ResumeSource::File(media) => Some(media),
            ResumeSource::Text(_) => None,
        }
    }
}
