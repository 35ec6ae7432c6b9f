pub mod context;
pub mod error;
pub mod splitter;
pub mod step_forward_agent;
pub mod types;
pub mod workflow;
