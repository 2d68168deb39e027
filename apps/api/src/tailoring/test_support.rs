//! Stub generative backend for pipeline and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::llm_client::{GenerativeBackend, LlmError, OutputSchema, PromptPart};
use crate::models::TailoringResult;

#[derive(Debug, Clone)]
pub struct SeenCall {
    pub system: String,
    pub schema_name: &'static str,
    pub parts: usize,
    pub media_parts: usize,
}

enum Behaviour {
    Return(Value),
    TransportFailure,
}

pub struct StubBackend {
    behaviour: Behaviour,
    seen: Mutex<Vec<SeenCall>>,
}

impl StubBackend {
    /// Always answers with `fixed_result()`.
    pub fn echo() -> Self {
        Self::returning(serde_json::to_value(Self::fixed_result()).unwrap())
    }

    pub fn returning(payload: Value) -> Self {
        Self {
            behaviour: Behaviour::Return(payload),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Fails the way an unreachable upstream does.
    pub fn transport_failure() -> Self {
        Self {
            behaviour: Behaviour::TransportFailure,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn fixed_result() -> TailoringResult {
        serde_json::from_value(json!({
            "suggestions": "- Lead the summary with distributed-systems work\n- Name Kubernetes explicitly",
            "fullResume": "JANE DOE\njane@example.com\n\nPROFESSIONAL SUMMARY\nBackend engineer."
        }))
        .unwrap()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<SeenCall> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl GenerativeBackend for StubBackend {
    async fn generate(
        &self,
        system: &str,
        instruction: &[PromptPart],
        schema: &OutputSchema,
    ) -> Result<Value, LlmError> {
        self.seen.lock().unwrap().push(SeenCall {
            system: system.to_string(),
            schema_name: schema.name,
            parts: instruction.len(),
            media_parts: instruction
                .iter()
                .filter(|p| matches!(p, PromptPart::Media(_)))
                .count(),
        });

        match &self.behaviour {
            Behaviour::Return(payload) => Ok(payload.clone()),
            Behaviour::TransportFailure => Err(LlmError::Api {
                status: 503,
                message: "upstream connect error or disconnect/reset before headers".to_string(),
            }),
        }
    }
}
