use std::sync::Arc;

use anyhow::Result;

use crate::{
    config::Config,
    llm::client::{CompletionService, LLMClient},
};

/// 生成器上下文，启动时创建一次，所有请求共享
#[derive(Clone)]
pub struct GeneratorContext {
    /// LLM调用器，用于与AI通信。
    pub llm_client: Arc<dyn CompletionService>,
    /// 配置
    pub config: Arc<Config>,
}

impl GeneratorContext {
    /// 根据配置创建新的生成器上下文
    pub fn new(config: Config) -> Result<Self> {
        let llm_client = LLMClient::new(config.llm.clone())?;
        Ok(Self::with_service(config, Arc::new(llm_client)))
    }

    /// 使用指定的补全服务创建上下文
    pub fn with_service(config: Config, llm_client: Arc<dyn CompletionService>) -> Self {
        Self {
            llm_client,
            config: Arc::new(config),
        }
    }
}
