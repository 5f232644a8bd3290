//! # Keiro - Pipeline Graph Assembly and Validation Engine
//!
//! **Keiro** is the core of a visual pipeline editor: a typed node/port
//! data model, a deterministic layout-and-synthesis engine that derives
//! ports and geometry from node content, and the request/response
//! contract for validating the assembled graph against an external DAG
//! analyzer.
//!
//! ## Core Workflow
//!
//! 1.  **Assemble**: Drop-to-canvas actions call [`graph::Pipeline::spawn_node`],
//!     which allocates a session-unique id and attaches the kind's initial
//!     payload. Canvas interactions (moves, removals, connections) arrive
//!     as [`graph::CanvasChange`] descriptors and are applied verbatim.
//! 2.  **Resolve**: The registry turns each node into everything the
//!     renderer needs: a title, placed input and output handles, and
//!     content-driven geometry for template-text nodes. Ports are a
//!     derived view, recomputed (with memoization) whenever a node's
//!     text changes, and are never stored.
//! 3.  **Submit**: A [`submit::Submitter`] serializes the current graph,
//!     ships it to the analyzer collaborator and relays the verdict:
//!     node and edge counts plus whether the graph is a valid DAG.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keiro::prelude::*;
//!
//! # async fn run() -> Result<(), SubmitError> {
//! let mut pipeline = Pipeline::new();
//! let source = pipeline
//!     .spawn_node(NodeKind::Input, Position { x: 0.0, y: 80.0 })
//!     .id
//!     .clone();
//! let template = pipeline
//!     .spawn_node(NodeKind::Text, Position { x: 260.0, y: 80.0 })
//!     .id
//!     .clone();
//!
//! // The canvas reports a connection from the input's output port to the
//! // template variable port synthesized from its "{{input}}" text.
//! pipeline.apply(CanvasChange::EdgeAdded(Edge::new(
//!     "edge-1",
//!     &source,
//!     format!("{source}-value"),
//!     &template,
//!     format!("{template}-input"),
//! )));
//!
//! // Resolve what the renderer needs: titles, placed handles, geometry.
//! let mut resolver = PortResolver::new();
//! for node in pipeline.nodes() {
//!     let view = resolver.view(node);
//!     println!("{}: {} input handle(s)", view.title, view.inputs.len());
//! }
//!
//! // Ship the graph to the analyzer and relay its verdict.
//! let analyzer = HttpAnalyzer::new(DEFAULT_ENDPOINT)?;
//! let mut submitter = Submitter::new(analyzer);
//! let report = submitter.submit(&pipeline).await?;
//! println!(
//!     "{} nodes, {} edges, DAG: {}",
//!     report.num_nodes, report.num_edges, report.is_dag
//! );
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod layout;
pub mod prelude;
pub mod registry;
pub mod submit;
pub mod template;
