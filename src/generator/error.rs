//! 拆分流水线的错误类型

use thiserror::Error;

use crate::generator::types::PipelineStep;

#[derive(Error, Debug)]
pub enum SplitterError {
    /// 调用补全服务失败（网络、鉴权、服务端错误等）
    #[error("{step} failed: {source}")]
    Completion {
        step: PipelineStep,
        #[source]
        source: anyhow::Error,
    },

    /// 补全服务返回的内容无法解析为期望的结构
    #[error("{step} returned malformed output: {source}")]
    MalformedOutput {
        step: PipelineStep,
        #[source]
        source: serde_json::Error,
    },
}

impl SplitterError {
    /// 出错的步骤
    pub fn step(&self) -> PipelineStep {
        match self {
            SplitterError::Completion { step, .. }
            | SplitterError::MalformedOutput { step, .. } => *step,
        }
    }
}

pub type Result<T> = std::result::Result<T, SplitterError>;
