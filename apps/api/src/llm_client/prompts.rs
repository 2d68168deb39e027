// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that routes the answer through the output tool.
pub const STRUCTURED_OUTPUT_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST return your answer by calling the provided tool exactly once. \
    Fill every required field completely. \
    Do NOT add fields the tool schema does not declare. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every resume-writing prompt.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Every claim in the rewritten resume must be traceable to the candidate's \
    original resume. Do NOT invent employers, titles, dates, degrees, certifications, or metrics. \
    You may rephrase, reorder, and emphasise — never fabricate.";
