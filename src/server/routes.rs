//! HTTP路由处理函数

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::generator::error::SplitterError;
use crate::generator::workflow::launch;
use crate::server::state::AppState;
use crate::types::{AgentSpec, DecompositionResult};

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// 健康检查，不触发任何模型调用
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!(uptime_seconds = state.uptime_seconds(), "Health check");
    Json(HealthResponse { status: "healthy" })
}

/// 错误响应，统一返回500与`{"detail": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl From<SplitterError> for ErrorResponse {
    fn from(err: SplitterError) -> Self {
        Self {
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

/// 拆分请求中的主Agent
pub async fn execute(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<AgentSpec>,
) -> Result<Json<DecompositionResult>, ErrorResponse> {
    let result = launch(&state.context, &spec).await.map_err(|e| {
        error!(agent = %spec.agent_name, error = %e, "Split failed");
        ErrorResponse::from(e)
    })?;

    Ok(Json(result))
}
