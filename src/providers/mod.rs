// Gateway module for providers - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod anthropic;
mod catalog;
mod gateway;
mod google;
mod groq;
mod ollama;
mod openai;
mod traits;
mod types;

// Public re-exports - the ONLY way to access provider functionality
pub use catalog::static_models;
pub use gateway::Gateway;
pub use traits::ProviderAdapter;
pub use types::{EnhanceRequest, KeyValidation, ModelInfo, Provider};
