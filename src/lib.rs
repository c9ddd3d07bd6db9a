pub mod app;
pub mod cli;
pub mod constants;
pub mod providers;
pub mod utils;

pub use app::{load_config, Config};
pub use providers::{EnhanceRequest, Gateway, KeyValidation, ModelInfo, Provider};
pub use utils::ProviderError;
