//! LLM Provider支持模块

use anyhow::Result;
use rig::{agent::Agent, client::CompletionClient, completion::Prompt};
use serde_json::{Value, json};

use crate::config::{LLMConfig, LLMProvider};
use crate::llm::client::types::{CompletionRequest, ResponseFormat};

/// 统一的Provider客户端枚举
#[derive(Clone)]
pub enum ProviderClient {
    OpenAI(rig::providers::openai::Client),
    DeepSeek(rig::providers::deepseek::Client),
    Moonshot(rig::providers::moonshot::Client),
    OpenRouter(rig::providers::openrouter::Client),
    Anthropic(rig::providers::anthropic::Client),
    Ollama(rig::providers::ollama::Client),
}

/// 为各provider的AgentBuilder设置相同的参数
macro_rules! build_agent {
    ($builder:expr, $system_prompt:expr, $temperature:expr, $max_tokens:expr, $params:expr) => {{
        let mut builder = $builder
            .preamble($system_prompt)
            .max_tokens($max_tokens)
            .temperature($temperature);
        if let Some(params) = $params {
            builder = builder.additional_params(params);
        }
        builder.build()
    }};
}

impl ProviderClient {
    /// 根据配置创建相应的provider客户端
    pub fn new(config: &LLMConfig) -> Result<Self> {
        match config.provider {
            LLMProvider::OpenAI => {
                let client = rig::providers::openai::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::OpenAI(client))
            }
            LLMProvider::DeepSeek => {
                let client = rig::providers::deepseek::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::DeepSeek(client))
            }
            LLMProvider::Moonshot => {
                let client = rig::providers::moonshot::Client::builder(&config.api_key)
                    .base_url(&config.api_base_url)
                    .build();
                Ok(ProviderClient::Moonshot(client))
            }
            LLMProvider::OpenRouter => {
                let client = rig::providers::openrouter::Client::builder(&config.api_key).build();
                Ok(ProviderClient::OpenRouter(client))
            }
            LLMProvider::Anthropic => {
                let client =
                    rig::providers::anthropic::ClientBuilder::new(&config.api_key).build()?;
                Ok(ProviderClient::Anthropic(client))
            }
            LLMProvider::Ollama => {
                let client = rig::providers::ollama::Client::builder().build();
                Ok(ProviderClient::Ollama(client))
            }
        }
    }

    /// JSON模式对应的附加请求参数，不支持的provider仅依赖提示词约束输出格式
    fn json_mode_params(config: &LLMConfig, response_format: ResponseFormat) -> Option<Value> {
        match response_format {
            ResponseFormat::JsonObject if config.provider.supports_json_mode() => {
                Some(json!({ "response_format": { "type": "json_object" } }))
            }
            _ => None,
        }
    }

    /// 为一次补全请求创建Agent
    pub fn create_agent(
        &self,
        model: &str,
        request: &CompletionRequest,
        config: &LLMConfig,
    ) -> ProviderAgent {
        let system_prompt = request.system_prompt.as_str();
        let temperature = request.temperature;
        let max_tokens = u64::from(request.max_tokens.unwrap_or(config.max_tokens));
        let params = Self::json_mode_params(config, request.response_format);

        match self {
            ProviderClient::OpenAI(client) => {
                let agent = build_agent!(
                    client
                        .completion_model(model)
                        .completions_api()
                        .into_agent_builder(),
                    system_prompt,
                    temperature,
                    max_tokens,
                    params
                );
                ProviderAgent::OpenAI(agent)
            }
            ProviderClient::DeepSeek(client) => {
                let agent = build_agent!(
                    client.agent(model),
                    system_prompt,
                    temperature,
                    max_tokens,
                    params
                );
                ProviderAgent::DeepSeek(agent)
            }
            ProviderClient::Moonshot(client) => {
                let agent = build_agent!(
                    client.agent(model),
                    system_prompt,
                    temperature,
                    max_tokens,
                    params
                );
                ProviderAgent::Moonshot(agent)
            }
            ProviderClient::OpenRouter(client) => {
                let agent = build_agent!(
                    client.agent(model),
                    system_prompt,
                    temperature,
                    max_tokens,
                    params
                );
                ProviderAgent::OpenRouter(agent)
            }
            ProviderClient::Anthropic(client) => {
                let agent = build_agent!(
                    client.agent(model),
                    system_prompt,
                    temperature,
                    max_tokens,
                    params
                );
                ProviderAgent::Anthropic(agent)
            }
            ProviderClient::Ollama(client) => {
                let agent = build_agent!(
                    client.agent(model),
                    system_prompt,
                    temperature,
                    max_tokens,
                    params
                );
                ProviderAgent::Ollama(agent)
            }
        }
    }
}

/// 统一的Agent枚举
pub enum ProviderAgent {
    OpenAI(Agent<rig::providers::openai::CompletionModel>),
    DeepSeek(Agent<rig::providers::deepseek::CompletionModel>),
    Moonshot(Agent<rig::providers::moonshot::CompletionModel>),
    OpenRouter(Agent<rig::providers::openrouter::CompletionModel>),
    Anthropic(Agent<rig::providers::anthropic::completion::CompletionModel>),
    Ollama(Agent<rig::providers::ollama::CompletionModel<reqwest::Client>>),
}

impl ProviderAgent {
    /// 执行prompt
    pub async fn prompt(&self, prompt: &str) -> Result<String> {
        match self {
            ProviderAgent::OpenAI(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::DeepSeek(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Moonshot(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::OpenRouter(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Anthropic(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
            ProviderAgent::Ollama(agent) => agent.prompt(prompt).await.map_err(|e| e.into()),
        }
    }
}
