use crate::generator::context::GeneratorContext;
use crate::generator::step_forward_agent::{
    DataFormatter, LLMCallMode, PromptTemplate, StepForwardAgent,
};
use crate::generator::types::PipelineStep;
use crate::types::{AgentSpec, ComplexityAnalysis, Microagent, MicroagentPlan};
use crate::utils::json::parse_list;

/// 微代理设计的输入：主Agent与复杂度分析
pub struct MicroagentDesignInput {
    pub spec: AgentSpec,
    pub analysis: ComplexityAnalysis,
}

/// 微代理设计师 - 基于复杂度分析提出单一职责的微代理列表
#[derive(Default)]
pub struct MicroagentDesigner;

impl StepForwardAgent for MicroagentDesigner {
    type Input = MicroagentDesignInput;
    type Output = Vec<Microagent>;

    fn step(&self) -> PipelineStep {
        PipelineStep::MicroagentGeneration
    }

    fn prompt_template(&self, _context: &GeneratorContext) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"You are an expert in AI agent design and microservice architectures.
Your task is to propose specific microagents with well-defined responsibilities that split
a monolithic agent into smaller, more manageable components."#
                .to_string(),

            opening_instruction: "# Microagent Generation".to_string(),

            closing_instruction: r#"# Task:
Based on the complexity analysis and the main agent description, define a list of
microagents. For each microagent specify:

1. Name (following the pattern [function]-[context]-agent, in kebab-case)
2. A clear description of its specific responsibility
3. Input schema (only the fields needed for its function)
4. Output schema (what this microagent produces)
5. Dependencies (names of other microagents it depends on)

Each microagent must have a single, well-defined responsibility.
Make sure the set of microagents covers all of the main agent's functionality.
Return a JSON object with a "microagents" array."#
                .to_string(),

            llm_call_mode: LLMCallMode::Extract,
            max_tokens: None,
        }
    }

    fn provide_material(&self, input: &MicroagentDesignInput) -> String {
        let mut material = DataFormatter::format_agent_overview(&input.spec);
        material.push_str(&DataFormatter::format_complexity_analysis(&input.analysis));
        material.push_str(&DataFormatter::format_output_schema::<MicroagentPlan>());
        material
    }

    fn parse_output(&self, response: String) -> Result<Vec<Microagent>, serde_json::Error> {
        parse_list(&response, "microagents")
    }
}
