#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::generator::context::GeneratorContext;
    use crate::generator::error::SplitterError;
    use crate::generator::types::PipelineStep;
    use crate::generator::workflow::{TimingScope, launch};
    use crate::llm::client::ResponseFormat;
    use crate::testing::ScriptedCompletionService;
    use crate::types::AgentSpec;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn invoice_spec() -> AgentSpec {
        serde_json::from_value(json!({
            "agent_name": "invoice-agent",
            "agent_description": "Reads supplier invoices, validates totals and books them",
            "input_schema": {"invoice_pdf": "string"},
            "output_schema": {"entry_id": "string"},
            "agent_prompt": "You are a careful bookkeeper."
        }))
        .unwrap()
    }

    fn analysis_response() -> String {
        json!({
            "responsibilities": ["extract", "validate", "book"],
            "complexity": "medium"
        })
        .to_string()
    }

    fn microagents_response() -> String {
        json!({
            "microagents": [
                {
                    "name": "extract-invoice-agent",
                    "description": "Extracts invoice fields",
                    "input_schema": {"invoice_pdf": "string"},
                    "output_schema": {"fields": "object"},
                    "dependencies": []
                },
                {
                    "name": "book-entry-agent",
                    "description": "Books the ledger entry",
                    "input_schema": {"fields": "object"},
                    "output_schema": {"entry_id": "string"},
                    "dependencies": ["extract-invoice-agent"]
                }
            ]
        })
        .to_string()
    }

    fn orchestrator_response() -> String {
        json!({
            "name": "orchestrate-invoice-agent",
            "description": "Runs extraction then booking",
            "flow": [
                {"step": 1, "agent": "extract-invoice-agent"},
                {"step": 2, "agent": "book-entry-agent", "condition": "fields are valid"}
            ]
        })
        .to_string()
    }

    const DIAGRAM: &str = "graph TD\n  O[orchestrate-invoice-agent] --> A[extract-invoice-agent]";

    fn context_with(service: Arc<ScriptedCompletionService>) -> GeneratorContext {
        GeneratorContext::with_service(Config::default(), service)
    }

    #[tokio::test]
    async fn test_launch_passes_generated_artifacts_through() {
        let service = Arc::new(
            ScriptedCompletionService::new()
                .respond(analysis_response())
                .respond(microagents_response())
                .respond(orchestrator_response())
                .respond(DIAGRAM),
        );
        let context = context_with(service.clone());

        let result = launch(&context, &invoice_spec()).await.unwrap();

        assert_eq!(service.call_count(), 4);
        assert_eq!(result.microagents.len(), 2);
        assert_eq!(result.microagents[1].dependencies, vec!["extract-invoice-agent"]);
        assert_eq!(result.orchestrator.name, "orchestrate-invoice-agent");
        assert_eq!(result.orchestrator.flow.len(), 2);
        assert_eq!(
            result.orchestrator.flow[1].condition.as_deref(),
            Some("fields are valid")
        );
        assert_eq!(result.architecture_diagram.as_deref(), Some(DIAGRAM));
    }

    #[tokio::test]
    async fn test_each_step_receives_previous_output() {
        let service = Arc::new(
            ScriptedCompletionService::new()
                .respond(analysis_response())
                .respond(microagents_response())
                .respond(orchestrator_response())
                .respond(DIAGRAM),
        );
        let context = context_with(service.clone());

        launch(&context, &invoice_spec()).await.unwrap();

        let requests = service.requests();
        assert!(requests[0].user_prompt.contains("You are a careful bookkeeper."));
        assert!(requests[1].user_prompt.contains("\"complexity\":\"medium\""));
        assert!(
            requests[2]
                .user_prompt
                .contains("- extract-invoice-agent: Extracts invoice fields")
        );
        assert!(
            requests[3]
                .user_prompt
                .contains("- book-entry-agent depends on: extract-invoice-agent")
        );
        assert!(
            requests[3]
                .user_prompt
                .contains("- Step 2: book-entry-agent (IF fields are valid)")
        );
    }

    #[tokio::test]
    async fn test_request_parameters_per_step() {
        let service = Arc::new(
            ScriptedCompletionService::new()
                .respond(analysis_response())
                .respond(microagents_response())
                .respond(orchestrator_response())
                .respond(DIAGRAM),
        );
        let context = context_with(service.clone());

        launch(&context, &invoice_spec()).await.unwrap();

        let requests = service.requests();
        for request in &requests[..3] {
            assert_eq!(request.response_format, ResponseFormat::JsonObject);
            assert_eq!(request.max_tokens, None);
        }
        assert_eq!(requests[3].response_format, ResponseFormat::Text);
        assert_eq!(requests[3].max_tokens, Some(1000));
        assert!(requests.iter().all(|request| request.temperature == 0.7));
    }

    #[tokio::test]
    async fn test_diagram_failure_degrades_to_none() {
        let service = Arc::new(
            ScriptedCompletionService::new()
                .respond(analysis_response())
                .respond(microagents_response())
                .respond(orchestrator_response())
                .fail("rate limited"),
        );
        let context = context_with(service.clone());

        let result = launch(&context, &invoice_spec()).await.unwrap();

        assert_eq!(service.call_count(), 4);
        assert_eq!(result.microagents.len(), 2);
        assert!(result.architecture_diagram.is_none());
    }

    #[tokio::test]
    async fn test_launch_accepts_chatty_replies() {
        let microagents = format!(
            "Here is the JSON:\n```json\n{}\n```\nLet me know if anything is missing.",
            microagents_response()
        );
        let orchestrator = json!({
            "orchestrator": serde_json::from_str::<serde_json::Value>(&orchestrator_response()).unwrap(),
            "notes": "booking waits for validation"
        })
        .to_string();
        let service = Arc::new(
            ScriptedCompletionService::new()
                .respond(analysis_response())
                .respond(microagents)
                .respond(orchestrator)
                .respond(DIAGRAM),
        );
        let context = context_with(service.clone());

        let result = launch(&context, &invoice_spec()).await.unwrap();

        assert_eq!(service.call_count(), 4);
        assert_eq!(result.microagents.len(), 2);
        assert_eq!(result.orchestrator.name, "orchestrate-invoice-agent");
        assert_eq!(result.orchestrator.flow.len(), 2);
    }

    #[tokio::test]
    async fn test_analysis_failure_stops_pipeline() {
        let service = Arc::new(ScriptedCompletionService::new().fail("invalid api key"));
        let context = context_with(service.clone());

        let err = launch(&context, &invoice_spec()).await.unwrap_err();

        assert_eq!(service.call_count(), 1);
        assert!(matches!(err, SplitterError::Completion { .. }));
        assert_eq!(err.step(), PipelineStep::ComplexityAnalysis);
        assert!(err.to_string().contains("complexity analysis failed"));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[tokio::test]
    async fn test_microagent_failure_stops_pipeline() {
        let service = Arc::new(
            ScriptedCompletionService::new()
                .respond(analysis_response())
                .fail("connection reset"),
        );
        let context = context_with(service.clone());

        let err = launch(&context, &invoice_spec()).await.unwrap_err();

        assert_eq!(service.call_count(), 2);
        assert!(matches!(err, SplitterError::Completion { .. }));
        assert_eq!(err.step(), PipelineStep::MicroagentGeneration);
    }

    #[tokio::test]
    async fn test_malformed_microagents_is_reported() {
        let service = Arc::new(
            ScriptedCompletionService::new()
                .respond(analysis_response())
                .respond("{\"microagents\": \"none\"}"),
        );
        let context = context_with(service.clone());

        let err = launch(&context, &invoice_spec()).await.unwrap_err();

        assert_eq!(service.call_count(), 2);
        assert!(matches!(
            err,
            SplitterError::MalformedOutput {
                step: PipelineStep::MicroagentGeneration,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_orchestrator_failure_skips_diagram() {
        let service = Arc::new(
            ScriptedCompletionService::new()
                .respond(analysis_response())
                .respond(microagents_response())
                .respond("not json at all")
                .respond(DIAGRAM),
        );
        let context = context_with(service.clone());

        let err = launch(&context, &invoice_spec()).await.unwrap_err();

        assert_eq!(service.call_count(), 3);
        assert_eq!(err.step(), PipelineStep::OrchestratorGeneration);
    }

    #[tokio::test]
    async fn test_dangling_references_do_not_change_result() {
        let orchestrator = json!({
            "name": "orchestrate-invoice-agent",
            "description": "Runs the flow",
            "flow": [{"step": 1, "agent": "ghost-agent"}]
        })
        .to_string();
        let service = Arc::new(
            ScriptedCompletionService::new()
                .respond(analysis_response())
                .respond(microagents_response())
                .respond(orchestrator)
                .respond(DIAGRAM),
        );
        let context = context_with(service);

        let result = launch(&context, &invoice_spec()).await.unwrap();

        assert_eq!(result.orchestrator.flow[0].agent, "ghost-agent");
        assert!(result.architecture_diagram.is_some());
    }

    #[test]
    fn test_timing_scope_records_phases() {
        let mut timing = TimingScope::new();

        timing.start_phase(PipelineStep::ComplexityAnalysis.key());
        std::thread::sleep(Duration::from_millis(5));
        let duration = timing.end_phase(PipelineStep::ComplexityAnalysis.key());

        assert!(duration.is_some());
        assert!(
            timing
                .get_phase_duration("complexity_analysis")
                .is_some_and(|d| d >= Duration::from_millis(5))
        );
        assert!(timing.end_phase("never_started").is_none());
    }

    #[test]
    fn test_timing_report_lists_phases_in_order() {
        let mut timing = TimingScope::new();
        for step in PipelineStep::ALL {
            timing.start_phase(step.key());
            timing.end_phase(step.key());
        }

        let report = timing.generate_timing_report();

        assert!(report.starts_with("总执行时间"));
        let first = report.find("complexity_analysis").unwrap();
        let last = report.find("diagram_generation").unwrap();
        assert!(first < last);
    }
}
