use crate::generator::context::GeneratorContext;
use crate::generator::step_forward_agent::{
    DataFormatter, FailurePolicy, LLMCallMode, PromptTemplate, StepForwardAgent,
};
use crate::generator::types::PipelineStep;
use crate::types::{Microagent, Orchestrator};

/// 架构图设计的输入：微代理与编排器
pub struct DiagramDesignInput {
    pub microagents: Vec<Microagent>,
    pub orchestrator: Orchestrator,
}

/// 架构图设计师 - 生成Mermaid或ASCII形式的架构图
///
/// 架构图只是辅助信息，失败时降级为没有架构图
#[derive(Default)]
pub struct DiagramDesigner;

impl StepForwardAgent for DiagramDesigner {
    type Input = DiagramDesignInput;
    type Output = String;

    fn step(&self) -> PipelineStep {
        PipelineStep::DiagramGeneration
    }

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Degrade
    }

    fn prompt_template(&self, context: &GeneratorContext) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"You are an expert in creating architecture diagrams.
Your task is to create a diagram in ASCII art or Mermaid format that clearly shows
the relationships between the different components of a system."#
                .to_string(),

            opening_instruction: "# Architecture Diagram".to_string(),

            closing_instruction: r#"# Task:
Create an architecture diagram in Mermaid or ASCII art format that visually represents:

1. Every microagent as a node
2. The orchestrator as the central node
3. The dependency relationships between microagents
4. The execution flow coordinated by the orchestrator

Where possible, organize the components logically, grouping related ones.
For Mermaid diagrams, use flowchart or graph syntax."#
                .to_string(),

            llm_call_mode: LLMCallMode::Prompt,
            max_tokens: Some(context.config.llm.diagram_max_tokens),
        }
    }

    fn provide_material(&self, input: &DiagramDesignInput) -> String {
        format!(
            "## Microagents:\n{}\n\n## Dependencies:\n{}\n\n## Orchestration flow ({}):\n{}\n\n",
            DataFormatter::format_microagents(&input.microagents),
            DataFormatter::format_dependencies(&input.microagents),
            input.orchestrator.name,
            DataFormatter::format_flow(&input.orchestrator)
        )
    }

    fn parse_output(&self, response: String) -> Result<String, serde_json::Error> {
        Ok(response)
    }
}
