use serde::{Deserialize, Serialize};

/// 期望的模型输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// 自由文本
    Text,
    /// 单个JSON对象
    JsonObject,
}

/// 一次补全调用的参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub response_format: ResponseFormat,
    pub temperature: f64,
    /// 输出预算，为空时使用配置中的max_tokens
    pub max_tokens: Option<u32>,
}
