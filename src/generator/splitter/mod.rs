//! Agent拆分流水线
//!
//! 1. 复杂度分析：识别主Agent的职责与耦合点
//! 2. 微代理生成：拆分为单一职责的微代理
//! 3. 编排器生成：设计微代理的调用顺序与条件
//! 4. 架构图生成：可选的Mermaid/ASCII图，失败时降级

pub mod agents;
pub mod pipeline;

pub use pipeline::SplitPipeline;
