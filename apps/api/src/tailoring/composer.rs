//! Prompt Composer — fills the fixed template and pairs it with the output schema.
//!
//! The resume block is selected by matching on `ResumeSource`: a file becomes an
//! inline media part, text is embedded literally. Exactly one branch is emitted.

use serde_json::json;

use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, STRUCTURED_OUTPUT_SYSTEM};
use crate::llm_client::{OutputSchema, PromptPart};
use crate::models::{ResumeSource, TailorRequest};
use crate::tailoring::prompts::{
    ATS_RULES, JOB_DESCRIPTION_LABEL, OUTPUT_TOOL_DESCRIPTION, OUTPUT_TOOL_NAME,
    RESUME_FILE_LABEL, RESUME_TEXT_LABEL, TAILOR_CLOSING, TAILOR_PREAMBLE_TEMPLATE, TAILOR_SYSTEM,
};

/// Everything the invoker hands to the backend for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub system: String,
    pub instruction: Vec<PromptPart>,
    pub schema: OutputSchema,
}

pub fn compose(request: &TailorRequest) -> ComposedPrompt {
    let preamble = TAILOR_PREAMBLE_TEMPLATE
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{ats_rules}", ATS_RULES);

    let mut instruction = vec![PromptPart::Text(preamble)];

    match request.resume() {
        ResumeSource::File(media) => {
            instruction.push(PromptPart::Text(RESUME_FILE_LABEL.to_string()));
            instruction.push(PromptPart::Media(media.clone()));
        }
        ResumeSource::Text(text) => {
            instruction.push(PromptPart::Text(format!("{RESUME_TEXT_LABEL}\n{text}")));
        }
    }

    instruction.push(PromptPart::Text(format!(
        "{JOB_DESCRIPTION_LABEL}\n{}",
        request.job_description()
    )));
    instruction.push(PromptPart::Text(TAILOR_CLOSING.to_string()));

    ComposedPrompt {
        system: format!("{TAILOR_SYSTEM} {STRUCTURED_OUTPUT_SYSTEM}"),
        instruction,
        schema: tailoring_schema(),
    }
}

/// Two required string fields, nothing else.
pub fn tailoring_schema() -> OutputSchema {
    OutputSchema {
        name: OUTPUT_TOOL_NAME,
        description: OUTPUT_TOOL_DESCRIPTION,
        schema: json!({
            "type": "object",
            "properties": {
                "suggestions": {
                    "type": "string",
                    "description": "Suggestions for tailoring the resume to the job description."
                },
                "fullResume": {
                    "type": "string",
                    "description": "The full, tailored resume text."
                }
            },
            "required": ["suggestions", "fullResume"],
            "additionalProperties": false
        }),
    }
}
