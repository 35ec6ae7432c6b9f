use async_trait::async_trait;
use schemars::{JsonSchema, schema_for};
use serde_json::Value;
use tracing::{debug, info};

use crate::generator::context::GeneratorContext;
use crate::generator::error::{Result, SplitterError};
use crate::generator::types::PipelineStep;
use crate::llm::client::{CompletionRequest, ResponseFormat};
use crate::types::{AgentSpec, ComplexityAnalysis, Microagent, Orchestrator};

/// LLM调用方式配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LLMCallMode {
    /// 要求返回单个JSON对象
    Extract,
    /// 返回自由文本
    Prompt,
}

impl LLMCallMode {
    pub fn response_format(&self) -> ResponseFormat {
        match self {
            LLMCallMode::Extract => ResponseFormat::JsonObject,
            LLMCallMode::Prompt => ResponseFormat::Text,
        }
    }
}

/// 步骤失败时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// 中止整个流水线，错误返回给调用方
    Propagate,
    /// 在本地吞掉错误，该步骤视为没有产出
    Degrade,
}

impl FailurePolicy {
    /// 按策略处理步骤结果
    pub fn apply<T>(&self, result: Result<T>) -> Result<Option<T>> {
        match (self, result) {
            (_, Ok(output)) => Ok(Some(output)),
            (FailurePolicy::Propagate, Err(err)) => Err(err),
            (FailurePolicy::Degrade, Err(_)) => Ok(None),
        }
    }
}

/// Prompt模板配置
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// 系统提示词
    pub system_prompt: String,
    /// 开头的说明性指令
    pub opening_instruction: String,
    /// 结尾的任务要求
    pub closing_instruction: String,
    /// LLM调用方式
    pub llm_call_mode: LLMCallMode,
    /// 输出预算，为空时使用配置默认值
    pub max_tokens: Option<u32>,
}

/// 通用数据格式化器，把上一步的产出渲染成提示词中的文本块
pub struct DataFormatter;

impl DataFormatter {
    /// 格式化主Agent的描述信息
    pub fn format_agent_overview(spec: &AgentSpec) -> String {
        format!(
            "## Agent: {}\n\n## Description:\n{}\n\n",
            spec.agent_name, spec.agent_description
        )
    }

    /// 格式化主Agent的输入输出Schema和提示词
    pub fn format_agent_contract(spec: &AgentSpec) -> String {
        format!(
            "## Input schema:\n```json\n{}\n```\n\n## Output schema:\n```json\n{}\n```\n\n## Agent prompt (if available):\n{}\n\n",
            Self::pretty_json(&Value::Object(spec.input_schema.clone())),
            Self::pretty_json(&Value::Object(spec.output_schema.clone())),
            spec.agent_prompt.as_deref().unwrap_or("Not available")
        )
    }

    /// 格式化复杂度分析结果，原样嵌入
    pub fn format_complexity_analysis(analysis: &ComplexityAnalysis) -> String {
        format!("## Complexity analysis:\n{}\n\n", analysis)
    }

    /// 每个微代理一行：`- name: description`
    pub fn format_microagents(microagents: &[Microagent]) -> String {
        microagents
            .iter()
            .map(|agent| format!("- {}: {}", agent.name, agent.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 每个微代理一行依赖说明
    pub fn format_dependencies(microagents: &[Microagent]) -> String {
        microagents
            .iter()
            .map(|agent| {
                let dependencies = if agent.dependencies.is_empty() {
                    "none".to_string()
                } else {
                    agent.dependencies.join(", ")
                };
                format!("- {} depends on: {}", agent.name, dependencies)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 每个编排步骤一行，带条件时追加`(IF ...)`
    pub fn format_flow(orchestrator: &Orchestrator) -> String {
        orchestrator
            .flow
            .iter()
            .map(|step| match &step.condition {
                Some(condition) => format!("- Step {}: {} (IF {})", step.step, step.agent, condition),
                None => format!("- Step {}: {}", step.step, step.agent),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 期望输出结构的JSON Schema
    pub fn format_output_schema<T: JsonSchema>() -> String {
        let schema = schema_for!(T);
        format!(
            "## Expected JSON structure:\n```json\n{}\n```\n\n",
            serde_json::to_string_pretty(&schema).unwrap_or_default()
        )
    }

    fn pretty_json(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}

/// 标准的Prompt构建器
pub struct GeneratorPromptBuilder {
    template: PromptTemplate,
}

impl GeneratorPromptBuilder {
    pub fn new(template: PromptTemplate) -> Self {
        Self { template }
    }

    /// 构建系统提示词和用户提示词
    pub fn build_prompts(&self, context: &GeneratorContext, material: &str) -> (String, String) {
        let language_instruction = context.config.target_language.prompt_instruction();
        let system_prompt = format!(
            "{}\n\n{}\nKeep JSON keys and microagent names in English kebab-case.",
            self.template.system_prompt, language_instruction
        );

        let mut user_prompt = String::new();
        user_prompt.push_str(&self.template.opening_instruction);
        user_prompt.push_str("\n\n");
        user_prompt.push_str(material);
        user_prompt.push_str(&self.template.closing_instruction);

        (system_prompt, user_prompt)
    }
}

/// 流水线中单个生成步骤的统一抽象
#[async_trait]
pub trait StepForwardAgent: Send + Sync {
    /// 步骤输入
    type Input: Send + Sync;
    /// 步骤输出
    type Output: Send + Sync;

    /// 对应的流水线步骤
    fn step(&self) -> PipelineStep;

    /// 失败处理策略，默认中止流水线
    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Propagate
    }

    /// Prompt模板配置
    fn prompt_template(&self, context: &GeneratorContext) -> PromptTemplate;

    /// 提供嵌入用户提示词的材料
    fn provide_material(&self, input: &Self::Input) -> String;

    /// 把模型的原始响应转换为步骤输出
    fn parse_output(&self, response: String) -> std::result::Result<Self::Output, serde_json::Error>;

    /// 默认实现的execute方法：构建提示词、调用补全服务、解析输出
    async fn execute(&self, context: &GeneratorContext, input: &Self::Input) -> Result<Self::Output> {
        let step = self.step();
        let template = self.prompt_template(context);
        let prompt_builder = GeneratorPromptBuilder::new(template.clone());
        let material = self.provide_material(input);
        let (system_prompt, user_prompt) = prompt_builder.build_prompts(context, &material);

        let request = CompletionRequest {
            system_prompt,
            user_prompt,
            response_format: template.llm_call_mode.response_format(),
            temperature: context.config.llm.temperature,
            max_tokens: template.max_tokens,
        };

        info!(step = step.key(), model = context.llm_client.model_name(), "🤖 执行步骤");
        debug!(step = step.key(), prompt_len = request.user_prompt.len(), "提示词已构建");

        let response = context
            .llm_client
            .complete(request)
            .await
            .map_err(|source| SplitterError::Completion { step, source })?;

        let output = self
            .parse_output(response)
            .map_err(|source| SplitterError::MalformedOutput { step, source })?;

        info!(step = step.key(), "✅ 步骤执行完成");
        Ok(output)
    }
}
