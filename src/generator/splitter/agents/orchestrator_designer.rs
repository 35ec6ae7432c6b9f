use crate::generator::context::GeneratorContext;
use crate::generator::step_forward_agent::{
    DataFormatter, LLMCallMode, PromptTemplate, StepForwardAgent,
};
use crate::generator::types::PipelineStep;
use crate::types::{AgentSpec, Microagent, Orchestrator};
use crate::utils::json::parse_object;

/// 编排器设计的输入：主Agent与已生成的微代理
pub struct OrchestratorDesignInput {
    pub spec: AgentSpec,
    pub microagents: Vec<Microagent>,
}

/// 编排器设计师 - 为微代理设计调用顺序与条件步骤
#[derive(Default)]
pub struct OrchestratorDesigner;

impl StepForwardAgent for OrchestratorDesigner {
    type Input = OrchestratorDesignInput;
    type Output = Orchestrator;

    fn step(&self) -> PipelineStep {
        PipelineStep::OrchestratorGeneration
    }

    fn prompt_template(&self, _context: &GeneratorContext) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"You are an expert in service orchestration and workflows.
Your task is to design an orchestrator that coordinates communication between microagents
efficiently, making sure the data flow between them is adequate."#
                .to_string(),

            opening_instruction: "# Orchestrator Generation".to_string(),

            closing_instruction: r#"# Task:
Design an orchestrator to coordinate communication between the microagents listed above.
The orchestrator must:

1. Have a suitable name (following the pattern orchestrate-[context]-agent)
2. Have a clear description of its role
3. Define a step-by-step execution flow (which agents are called in which order)
4. Include conditions for conditional steps when needed

Return the orchestrator definition as a single JSON object."#
                .to_string(),

            llm_call_mode: LLMCallMode::Extract,
            max_tokens: None,
        }
    }

    fn provide_material(&self, input: &OrchestratorDesignInput) -> String {
        let mut material = DataFormatter::format_agent_overview(&input.spec);
        material.push_str("## Microagents:\n");
        material.push_str(&DataFormatter::format_microagents(&input.microagents));
        material.push_str("\n\n");
        material.push_str(&DataFormatter::format_output_schema::<Orchestrator>());
        material
    }

    fn parse_output(&self, response: String) -> Result<Orchestrator, serde_json::Error> {
        parse_object(&response, "orchestrator")
    }
}
