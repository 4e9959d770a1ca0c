//! Enrichment module
//! Reputation and geolocation lookups, LLM risk summaries, and the per-row
//! orchestration that merges them

pub mod assessment;
pub mod enricher;
pub mod geo;
pub mod llm;
pub mod prompts;
