use crate::generator::context::GeneratorContext;
use crate::generator::step_forward_agent::{
    DataFormatter, LLMCallMode, PromptTemplate, StepForwardAgent,
};
use crate::generator::types::PipelineStep;
use crate::types::{AgentSpec, ComplexityAnalysis};

/// 复杂度分析员 - 判断主Agent的复杂度，识别可独立拆出的逻辑组件、依赖与数据流
///
/// 输出保持为原始文本，不做结构校验
#[derive(Default)]
pub struct ComplexityAnalyzer;

impl StepForwardAgent for ComplexityAnalyzer {
    type Input = AgentSpec;
    type Output = ComplexityAnalysis;

    fn step(&self) -> PipelineStep {
        PipelineStep::ComplexityAnalysis
    }

    fn prompt_template(&self, _context: &GeneratorContext) -> PromptTemplate {
        PromptTemplate {
            system_prompt: r#"You are an expert in systems analysis and microservice architecture.
Your task is to analyze the description and schemas of an AI agent and identify logical
components that can be separated into independent microagents."#
                .to_string(),

            opening_instruction: "# Agent Complexity Analysis".to_string(),

            closing_instruction: r#"# Task:
Analyze this agent and identify:
1. The overall complexity level (low, medium, high)
2. Logical components or responsibilities that can be separated
3. Dependencies between those components
4. The data flow required between components

Return your complete analysis as a JSON object covering these four aspects."#
                .to_string(),

            llm_call_mode: LLMCallMode::Extract,
            max_tokens: None,
        }
    }

    fn provide_material(&self, input: &AgentSpec) -> String {
        let mut material = DataFormatter::format_agent_overview(input);
        material.push_str(&DataFormatter::format_agent_contract(input));
        material
    }

    fn parse_output(&self, response: String) -> Result<ComplexityAnalysis, serde_json::Error> {
        Ok(ComplexityAnalysis::new(response))
    }
}
