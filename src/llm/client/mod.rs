//! LLM客户端 - 提供统一的LLM服务接口

use anyhow::Result;
use async_trait::async_trait;

use crate::config::LLMConfig;

mod providers;
pub mod types;

pub use types::{CompletionRequest, ResponseFormat};

use providers::ProviderClient;

/// 文本补全服务
///
/// 流水线只依赖这个接口，进程内共享一个实例，实现必须无状态且可并发调用
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// 实际使用的模型名称，用于日志
    fn model_name(&self) -> &str;
}

/// LLM客户端 - 基于rig的CompletionService实现
#[derive(Clone)]
pub struct LLMClient {
    config: LLMConfig,
    client: ProviderClient,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: LLMConfig) -> Result<Self> {
        let client = ProviderClient::new(&config)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CompletionService for LLMClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let agent = self
            .client
            .create_agent(&self.config.model, &request, &self.config);

        agent.prompt(&request.user_prompt).await
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
