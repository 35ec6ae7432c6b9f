use crate::generator::context::GeneratorContext;
use crate::generator::error::Result;
use crate::generator::splitter::SplitPipeline;
use crate::types::{AgentSpec, DecompositionResult};

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{Instrument, debug, info_span};

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: HashMap<String, Instant>,
    /// 按结束顺序记录的阶段耗时
    phase_durations: Vec<(String, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.phase_start_times
            .insert(phase_name.to_string(), Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &str) -> Option<Duration> {
        let start_time = self.phase_start_times.remove(phase_name)?;
        let duration = start_time.elapsed();
        self.phase_durations
            .push((phase_name.to_string(), duration));
        Some(duration)
    }

    /// 获取总执行时间
    pub fn get_total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 获取某个阶段的执行时间
    pub fn get_phase_duration(&self, phase_name: &str) -> Option<Duration> {
        self.phase_durations
            .iter()
            .find(|(phase, _)| phase == phase_name)
            .map(|(_, duration)| *duration)
    }

    /// 获取格式化的执行时间报告
    pub fn generate_timing_report(&self) -> String {
        let mut report = format!(
            "总执行时间: {:.2}秒\n",
            self.get_total_duration().as_secs_f64()
        );

        if !self.phase_durations.is_empty() {
            report.push_str("\n各阶段执行时间:\n");
            for (phase, duration) in &self.phase_durations {
                report.push_str(&format!("- {}: {:.3}秒\n", phase, duration.as_secs_f64()));
            }
        }

        report
    }
}

/// 启动一次Agent拆分工作流
///
/// 每次调用都在独立的span中执行，span携带请求ID与Agent名称
pub async fn launch(context: &GeneratorContext, spec: &AgentSpec) -> Result<DecompositionResult> {
    let span = info_span!(
        "split",
        request_id = %uuid::Uuid::new_v4(),
        agent = %spec.agent_name
    );

    async {
        let mut timing = TimingScope::new();
        let result = SplitPipeline
            .execute_pipeline(context, spec, &mut timing)
            .await;
        debug!("\n{}", timing.generate_timing_report());
        result
    }
    .instrument(span)
    .await
}

// Include tests
#[cfg(test)]
mod tests;
