pub mod agent;

pub use agent::{
    AgentSpec, ComplexityAnalysis, DanglingReference, DecompositionResult, FlowStep, JsonObject,
    Microagent, MicroagentPlan, Orchestrator, find_dangling_references,
};
