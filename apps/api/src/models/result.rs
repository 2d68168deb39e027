use serde::{Deserialize, Serialize};

/// The backend's answer: improvement suggestions plus the complete rewritten resume.
///
/// Deserialization is strict (no unknown fields, both fields required) so a
/// payload that strays from the output schema is rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TailoringResult {
    pub suggestions: String,
    pub full_resume: String,
}
