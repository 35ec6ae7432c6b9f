use serde::{Deserialize, Serialize};

/// 拆分流水线的四个生成步骤，按执行顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    ComplexityAnalysis,
    MicroagentGeneration,
    OrchestratorGeneration,
    DiagramGeneration,
}

impl PipelineStep {
    /// 按执行顺序列出全部步骤
    pub const ALL: [PipelineStep; 4] = [
        PipelineStep::ComplexityAnalysis,
        PipelineStep::MicroagentGeneration,
        PipelineStep::OrchestratorGeneration,
        PipelineStep::DiagramGeneration,
    ];

    /// 用于日志和计时的键
    pub fn key(&self) -> &'static str {
        match self {
            PipelineStep::ComplexityAnalysis => "complexity_analysis",
            PipelineStep::MicroagentGeneration => "microagent_generation",
            PipelineStep::OrchestratorGeneration => "orchestrator_generation",
            PipelineStep::DiagramGeneration => "diagram_generation",
        }
    }
}

impl std::fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStep::ComplexityAnalysis => write!(f, "complexity analysis"),
            PipelineStep::MicroagentGeneration => write!(f, "microagent generation"),
            PipelineStep::OrchestratorGeneration => write!(f, "orchestrator generation"),
            PipelineStep::DiagramGeneration => write!(f, "diagram generation"),
        }
    }
}
