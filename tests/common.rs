//! Common test utilities for assembling pipelines.
use keiro::prelude::*;

/// Assembles the canonical three-node pipeline used across tests:
/// Input -> LLM -> Output, with two edges.
#[allow(dead_code)]
pub fn three_node_pipeline() -> Pipeline {
    let mut pipeline = Pipeline::new();

    let input = pipeline
        .spawn_node(NodeKind::Input, Position { x: 0.0, y: 0.0 })
        .id
        .clone();
    let llm = pipeline
        .spawn_node(NodeKind::Llm, Position { x: 260.0, y: 40.0 })
        .id
        .clone();
    let output = pipeline
        .spawn_node(NodeKind::Output, Position { x: 520.0, y: 0.0 })
        .id
        .clone();

    pipeline.apply(CanvasChange::EdgeAdded(Edge::new(
        "edge-1",
        &input,
        format!("{input}-value"),
        &llm,
        format!("{llm}-prompt"),
    )));
    pipeline.apply(CanvasChange::EdgeAdded(Edge::new(
        "edge-2",
        &llm,
        format!("{llm}-response"),
        &output,
        format!("{output}-value"),
    )));

    pipeline
}

/// Spawns a template-text node and rewrites its template in one step.
#[allow(dead_code)]
pub fn spawn_text_node(pipeline: &mut Pipeline, text: &str) -> String {
    let id = pipeline
        .spawn_node(NodeKind::Text, Position { x: 0.0, y: 0.0 })
        .id
        .clone();
    pipeline.set_data(
        &id,
        NodeData::Text(TextData {
            id: id.clone(),
            text: text.to_string(),
        }),
    );
    id
}
