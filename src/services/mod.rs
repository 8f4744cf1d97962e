// Service exports
pub mod endpoint_cache;
pub mod llm;

pub use endpoint_cache::EndpointCache;
pub use llm::{LlmConfig, LlmError, LlmJudge, CANDIDATE_ENDPOINTS, DEFAULT_ENDPOINT};
