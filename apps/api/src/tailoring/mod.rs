// Resume tailoring pipeline.
// Normalizer → Composer → Invoker → Exporter; data only flows forward.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod composer;
pub mod exporter;
pub mod handlers;
pub mod invoker;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;

#[cfg(test)]
pub(crate) mod test_support;
