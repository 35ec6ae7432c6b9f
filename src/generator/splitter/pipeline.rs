use tracing::{error, info, warn};

use crate::generator::context::GeneratorContext;
use crate::generator::error::Result;
use crate::generator::splitter::agents::{
    ComplexityAnalyzer, DiagramDesignInput, DiagramDesigner, MicroagentDesignInput,
    MicroagentDesigner, OrchestratorDesignInput, OrchestratorDesigner,
};
use crate::generator::step_forward_agent::{FailurePolicy, StepForwardAgent};
use crate::generator::workflow::TimingScope;
use crate::types::{AgentSpec, DecompositionResult, find_dangling_references};

/// 拆分流水线编排器
///
/// 四个步骤严格串行，每一步消费上一步的产出，不重试、不并行
#[derive(Default)]
pub struct SplitPipeline;

impl SplitPipeline {
    /// 执行完整的拆分流程
    pub async fn execute_pipeline(
        &self,
        context: &GeneratorContext,
        spec: &AgentSpec,
        timing: &mut TimingScope,
    ) -> Result<DecompositionResult> {
        info!(agent = %spec.agent_name, "🚀 开始拆分Agent");

        // 第一步：复杂度分析
        let analysis = self
            .execute_agent(&ComplexityAnalyzer, context, spec, timing)
            .await?;

        // 第二步：生成微代理
        let design_input = MicroagentDesignInput {
            spec: spec.clone(),
            analysis,
        };
        let microagents = self
            .execute_agent(&MicroagentDesigner, context, &design_input, timing)
            .await?;
        info!(count = microagents.len(), "微代理方案已生成");

        // 第三步：生成编排器
        let design_input = OrchestratorDesignInput {
            spec: spec.clone(),
            microagents,
        };
        let orchestrator = self
            .execute_agent(&OrchestratorDesigner, context, &design_input, timing)
            .await?;
        let OrchestratorDesignInput { microagents, .. } = design_input;

        for reference in find_dangling_references(&microagents, &orchestrator) {
            warn!(%reference, "⚠️ 引用了不存在的微代理");
        }

        // 第四步：生成架构图，失败时降级
        let design_input = DiagramDesignInput {
            microagents,
            orchestrator,
        };
        let architecture_diagram = self
            .execute_optional_agent(&DiagramDesigner, context, &design_input, timing)
            .await?;
        let DiagramDesignInput {
            microagents,
            orchestrator,
        } = design_input;

        // 第五步：组装结果
        info!(agent = %spec.agent_name, "✓ Agent拆分完成");
        Ok(DecompositionResult {
            microagents,
            orchestrator,
            architecture_diagram,
        })
    }

    /// 执行单个步骤，出错时按该步骤的失败策略记录日志，错误原样返回
    async fn execute_agent<T>(
        &self,
        agent: &T,
        context: &GeneratorContext,
        input: &T::Input,
        timing: &mut TimingScope,
    ) -> Result<T::Output>
    where
        T: StepForwardAgent,
    {
        let step = agent.step();
        timing.start_phase(step.key());
        let result = agent.execute(context, input).await;
        timing.end_phase(step.key());

        if let Err(err) = &result {
            match agent.failure_policy() {
                FailurePolicy::Propagate => {
                    error!(step = step.key(), error = %err, "❌ 步骤执行失败，终止流水线");
                }
                FailurePolicy::Degrade => {
                    warn!(step = step.key(), error = %err, "⚠️ 步骤执行失败，降级为无产出");
                }
            }
        }

        result
    }

    /// 执行产出可缺省的步骤，按失败策略决定错误是中止流水线还是降级为`None`
    async fn execute_optional_agent<T>(
        &self,
        agent: &T,
        context: &GeneratorContext,
        input: &T::Input,
        timing: &mut TimingScope,
    ) -> Result<Option<T::Output>>
    where
        T: StepForwardAgent,
    {
        let result = self.execute_agent(agent, context, input, timing).await;
        agent.failure_policy().apply(result)
    }
}
