pub mod complexity_analyzer;
pub mod diagram_designer;
pub mod microagent_designer;
pub mod orchestrator_designer;

pub use complexity_analyzer::ComplexityAnalyzer;
pub use diagram_designer::{DiagramDesignInput, DiagramDesigner};
pub use microagent_designer::{MicroagentDesignInput, MicroagentDesigner};
pub use orchestrator_designer::{OrchestratorDesignInput, OrchestratorDesigner};
