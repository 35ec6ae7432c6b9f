pub mod cli;
pub mod config;
pub mod generator;
pub mod i18n;
pub mod llm;
pub mod server;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use generator::context::GeneratorContext;
pub use generator::error::SplitterError;
pub use generator::workflow::launch;
pub use types::{AgentSpec, DecompositionResult, Microagent, Orchestrator};
