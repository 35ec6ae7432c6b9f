use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 任意JSON对象，用于输入/输出Schema
pub type JsonObject = Map<String, Value>;

/// 待拆分的主Agent描述（请求体）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct AgentSpec {
    /// 主Agent名称
    pub agent_name: String,
    /// 主Agent的完整描述
    pub agent_description: String,
    /// 主Agent的输入Schema
    pub input_schema: JsonObject,
    /// 主Agent的输出Schema
    pub output_schema: JsonObject,
    /// 主Agent的详细提示词（如果有）
    #[serde(default)]
    pub agent_prompt: Option<String>,
}

/// 拆分出的单一职责微代理
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct Microagent {
    /// 名称，约定为`<function>-<context>-agent`的kebab-case形式
    pub name: String,
    /// 该微代理负责的具体职责
    pub description: String,
    /// 仅包含该职责所需字段的输入Schema
    pub input_schema: JsonObject,
    /// 该微代理产出的输出Schema
    pub output_schema: JsonObject,
    /// 所依赖的其他微代理名称
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// 编排流程中的一个步骤
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct FlowStep {
    /// 步骤序号
    pub step: i64,
    /// 该步骤调用的微代理名称
    pub agent: String,
    /// 执行该步骤的可选条件
    #[serde(default)]
    pub condition: Option<String>,
}

/// 协调各微代理调用顺序的编排器
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct Orchestrator {
    /// 名称，约定为`orchestrate-<context>-agent`
    pub name: String,
    /// 编排器职责描述
    pub description: String,
    /// 有序的执行流程
    pub flow: Vec<FlowStep>,
}

/// 微代理生成步骤期望的响应结构
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct MicroagentPlan {
    /// 覆盖主Agent全部功能的微代理列表
    pub microagents: Vec<Microagent>,
}

/// 复杂度分析结果
///
/// 模型返回的原始JSON文本，不做结构化解析，原样拼接进下一步的提示词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexityAnalysis(String);

impl ComplexityAnalysis {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComplexityAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 拆分结果（响应体）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DecompositionResult {
    pub microagents: Vec<Microagent>,
    pub orchestrator: Orchestrator,
    pub architecture_diagram: Option<String>,
}

/// 引用了不存在微代理的位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DanglingReference {
    /// `owner`的dependencies中引用了未知名称
    Dependency { owner: String, missing: String },
    /// 编排流程第`step`步引用了未知名称
    FlowStep { step: i64, missing: String },
}

impl std::fmt::Display for DanglingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DanglingReference::Dependency { owner, missing } => {
                write!(f, "microagent `{}` depends on unknown `{}`", owner, missing)
            }
            DanglingReference::FlowStep { step, missing } => {
                write!(f, "flow step {} calls unknown `{}`", step, missing)
            }
        }
    }
}

/// 找出依赖和编排流程中指向未知微代理的引用，结果只用于告警，不修改拆分结果
pub fn find_dangling_references(
    microagents: &[Microagent],
    orchestrator: &Orchestrator,
) -> Vec<DanglingReference> {
    let known = |name: &str| microagents.iter().any(|agent| agent.name == name);

    let dependency_refs = microagents.iter().flat_map(|agent| {
        agent
            .dependencies
            .iter()
            .filter(|dep| !known(dep))
            .map(|dep| DanglingReference::Dependency {
                owner: agent.name.clone(),
                missing: dep.clone(),
            })
    });

    let flow_refs = orchestrator
        .flow
        .iter()
        .filter(|step| !known(&step.agent))
        .map(|step| DanglingReference::FlowStep {
            step: step.step,
            missing: step.agent.clone(),
        });

    dependency_refs.chain(flow_refs).collect()
}
