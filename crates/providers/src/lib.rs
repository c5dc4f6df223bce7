pub mod ollama;
pub mod openai_compat;
pub mod registry;
pub mod traits;
pub(crate) mod util;

// Re-exports for convenience.
pub use registry::build_provider;
pub use traits::{ChatRequest, ChatResponse, LlmProvider, Usage};
