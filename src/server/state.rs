//! HTTP服务的共享状态

use crate::generator::context::GeneratorContext;

/// 所有请求共享的应用状态
pub struct AppState {
    /// 生成器上下文，持有补全服务与配置
    pub context: GeneratorContext,

    /// 服务启动时间
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(context: GeneratorContext) -> Self {
        Self {
            context,
            start_time: std::time::Instant::now(),
        }
    }

    /// 运行时长（秒）
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
