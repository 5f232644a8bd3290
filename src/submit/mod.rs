//! Serialization of the assembled graph and the request/response contract
//! with the external DAG analyzer.
//!
//! The core performs no cycle detection of its own; its job ends at
//! producing a faithful serialization of the current state and relaying
//! the analyzer's verdict.

use crate::error::SubmitError;
use crate::graph::{Edge, Node, Pipeline};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default analyzer endpoint of the reference backend.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/pipelines/parse";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One validation request: the full node and edge collections as they
/// exist at call time. Two submissions produce two independent
/// serializations; nothing is shared or mutated.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRequest<'a> {
    pub nodes: &'a [Node],
    pub edges: &'a [Edge],
}

impl<'a> PipelineRequest<'a> {
    pub fn new(pipeline: &'a Pipeline) -> Self {
        Self {
            nodes: pipeline.nodes(),
            edges: pipeline.edges(),
        }
    }
}

/// The analyzer's verdict, relayed to the caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub is_dag: bool,
}

/// The seam to the analyzer collaborator. Production code uses
/// [`HttpAnalyzer`]; tests substitute their own implementations.
#[allow(async_fn_in_trait)]
pub trait Analyzer {
    async fn analyze(
        &self,
        request: PipelineRequest<'_>,
    ) -> Result<PipelineReport, SubmitError>;
}

/// Analyzer client speaking the JSON contract over HTTP.
pub struct HttpAnalyzer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalyzer {
    /// Builds a client for `endpoint` with a 30 second request timeout.
    /// The core threads no cancellation token through a submission, so
    /// the transport timeout is the only bound on an in-flight request.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Builds an analyzer around a preconfigured client, for callers that
    /// need their own timeout or proxy policy.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl Analyzer for HttpAnalyzer {
    async fn analyze(
        &self,
        request: PipelineRequest<'_>,
    ) -> Result<PipelineReport, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SubmitError::Status(response.status()));
        }

        let report = response.json::<PipelineReport>().await?;
        Ok(report)
    }
}

/// Where a single submission currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded(PipelineReport),
    Failed(String),
}

/// Drives the `Idle -> Submitting -> Succeeded | Failed -> Idle` cycle
/// for one analyzer.
///
/// Only one submission is expected to be in flight at a time; callers
/// that race a second submission get two independent serializations, not
/// an error.
pub struct Submitter<A: Analyzer> {
    analyzer: A,
    status: SubmissionStatus,
}

impl<A: Analyzer> Submitter<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer,
            status: SubmissionStatus::Idle,
        }
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Serializes the pipeline as it exists right now, sends it to the
    /// analyzer and relays the outcome. On failure no partial result is
    /// surfaced and the pipeline is untouched, so the caller may retry.
    pub async fn submit(&mut self, pipeline: &Pipeline) -> Result<PipelineReport, SubmitError> {
        self.status = SubmissionStatus::Submitting;
        let outcome = self.analyzer.analyze(PipelineRequest::new(pipeline)).await;
        self.status = match &outcome {
            Ok(report) => SubmissionStatus::Succeeded(*report),
            Err(error) => SubmissionStatus::Failed(error.to_string()),
        };
        outcome
    }

    /// Returns the submitter to `Idle` once the caller has consumed the
    /// outcome.
    pub fn acknowledge(&mut self) {
        self.status = SubmissionStatus::Idle;
    }
}
