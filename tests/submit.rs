//! Tests for graph serialization and the analyzer submission contract.
mod common;
use common::three_node_pipeline;
use keiro::prelude::*;

/// Relays a canned report after asserting the serialization is faithful
/// to the state it was built from.
struct MockAnalyzer {
    report: PipelineReport,
}

impl Analyzer for MockAnalyzer {
    async fn analyze(
        &self,
        request: PipelineRequest<'_>,
    ) -> Result<PipelineReport, SubmitError> {
        assert_eq!(request.nodes.len(), self.report.num_nodes);
        assert_eq!(request.edges.len(), self.report.num_edges);
        Ok(self.report)
    }
}

/// Fails every submission with an opaque transport-level outcome.
struct FailingAnalyzer;

impl Analyzer for FailingAnalyzer {
    async fn analyze(
        &self,
        _request: PipelineRequest<'_>,
    ) -> Result<PipelineReport, SubmitError> {
        Err(SubmitError::Status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        ))
    }
}

#[test]
fn test_request_serialization_shape() {
    let pipeline = three_node_pipeline();
    let value = serde_json::to_value(PipelineRequest::new(&pipeline)).unwrap();

    let nodes = value["nodes"].as_array().unwrap();
    let edges = value["edges"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(edges.len(), 2);

    // Node wire shape: {id, type, position{x,y}, data{id, nodeType, ...}}.
    assert_eq!(nodes[0]["id"], "customInput-1");
    assert_eq!(nodes[0]["type"], "customInput");
    assert_eq!(nodes[0]["position"]["x"], 0.0);
    assert_eq!(nodes[0]["data"]["nodeType"], "customInput");
    assert_eq!(nodes[0]["data"]["id"], "customInput-1");

    // Edge wire shape uses camelCase handle fields.
    assert_eq!(edges[0]["source"], "customInput-1");
    assert_eq!(edges[0]["sourceHandle"], "customInput-1-value");
    assert_eq!(edges[0]["target"], "llm-1");
    assert_eq!(edges[0]["targetHandle"], "llm-1-prompt");
}

#[test]
fn test_report_deserialization() {
    let report: PipelineReport =
        serde_json::from_str(r#"{"num_nodes":3,"num_edges":2,"is_dag":true}"#).unwrap();
    assert_eq!(
        report,
        PipelineReport {
            num_nodes: 3,
            num_edges: 2,
            is_dag: true,
        }
    );
}

#[test]
fn test_submission_relays_the_verdict_unchanged() {
    let pipeline = three_node_pipeline();
    let expected = PipelineReport {
        num_nodes: 3,
        num_edges: 2,
        is_dag: true,
    };
    let mut submitter = Submitter::new(MockAnalyzer { report: expected });

    let report = tokio_test::block_on(submitter.submit(&pipeline)).unwrap();
    assert_eq!(report, expected);
    assert_eq!(*submitter.status(), SubmissionStatus::Succeeded(expected));

    submitter.acknowledge();
    assert_eq!(*submitter.status(), SubmissionStatus::Idle);
}

#[test]
fn test_failed_submission_leaves_state_retryable() {
    let pipeline = three_node_pipeline();
    let mut failing = Submitter::new(FailingAnalyzer);

    let outcome = tokio_test::block_on(failing.submit(&pipeline));
    assert!(outcome.is_err());
    assert!(matches!(
        failing.status(),
        SubmissionStatus::Failed(message) if message.contains("500")
    ));

    // The pipeline itself is untouched; a retry against a healthy
    // analyzer sees the same state.
    assert_eq!(pipeline.nodes().len(), 3);
    assert_eq!(pipeline.edges().len(), 2);

    let expected = PipelineReport {
        num_nodes: 3,
        num_edges: 2,
        is_dag: true,
    };
    let mut retry = Submitter::new(MockAnalyzer { report: expected });
    let report = tokio_test::block_on(retry.submit(&pipeline)).unwrap();
    assert_eq!(report, expected);
}

#[test]
fn test_two_submissions_serialize_independently() {
    let mut pipeline = three_node_pipeline();
    let first = serde_json::to_value(PipelineRequest::new(&pipeline)).unwrap();

    pipeline.apply(CanvasChange::NodeRemoved {
        id: "customOutput-1".to_string(),
    });
    let second = serde_json::to_value(PipelineRequest::new(&pipeline)).unwrap();

    assert_eq!(first["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(second["nodes"].as_array().unwrap().len(), 2);
}
