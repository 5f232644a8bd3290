//! Tests for assembly state, identity allocation and change application.
mod common;
use common::three_node_pipeline;
use keiro::prelude::*;
use std::collections::HashSet;

#[test]
fn test_factory_ids_are_unique_and_tagged() {
    let mut pipeline = Pipeline::new();
    let mut ids = HashSet::new();
    for _ in 0..5 {
        let id = pipeline
            .spawn_node(NodeKind::Input, Position::default())
            .id
            .clone();
        assert!(id.contains("customInput"));
        assert!(ids.insert(id), "factory produced a duplicate id");
    }
    assert_eq!(pipeline.nodes().len(), 5);
}

#[test]
fn test_factory_counters_are_per_kind() {
    let mut pipeline = Pipeline::new();
    let a = pipeline
        .spawn_node(NodeKind::Llm, Position::default())
        .id
        .clone();
    let b = pipeline
        .spawn_node(NodeKind::Text, Position::default())
        .id
        .clone();
    let c = pipeline
        .spawn_node(NodeKind::Llm, Position::default())
        .id
        .clone();
    assert_eq!(a, "llm-1");
    assert_eq!(b, "text-1");
    assert_eq!(c, "llm-2");
}

#[test]
fn test_factory_never_reuses_ids_after_removal() {
    let mut pipeline = Pipeline::new();
    let first = pipeline
        .spawn_node(NodeKind::Text, Position::default())
        .id
        .clone();
    pipeline.apply(CanvasChange::NodeRemoved { id: first.clone() });
    let second = pipeline
        .spawn_node(NodeKind::Text, Position::default())
        .id
        .clone();
    assert_ne!(first, second);
    assert_eq!(second, "text-2");
}

#[test]
fn test_initial_payload_carries_id_and_kind() {
    let mut pipeline = Pipeline::new();
    let node = pipeline.spawn_node(NodeKind::Input, Position::default());
    match &node.data {
        NodeData::Input(data) => {
            assert_eq!(data.id, node.id);
            // Default name derives from the id, as the editor does.
            assert_eq!(data.name, "input_1");
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[test]
#[should_panic(expected = "duplicate node id")]
fn test_adding_duplicate_node_id_is_an_invariant_violation() {
    let mut pipeline = Pipeline::new();
    let node = pipeline
        .spawn_node(NodeKind::Note, Position::default())
        .clone();
    pipeline.add_node(node);
}

#[test]
#[should_panic(expected = "duplicate edge id")]
fn test_adding_duplicate_edge_id_is_an_invariant_violation() {
    let mut pipeline = three_node_pipeline();
    pipeline.apply(CanvasChange::EdgeAdded(Edge::new(
        "edge-1", "llm-1", "llm-1-response", "customOutput-1", "customOutput-1-value",
    )));
}

#[test]
fn test_apply_node_moved() {
    let mut pipeline = three_node_pipeline();
    pipeline.apply(CanvasChange::NodeMoved {
        id: "llm-1".to_string(),
        position: Position { x: 300.0, y: 120.0 },
    });
    let node = pipeline.node("llm-1").unwrap();
    assert_eq!(node.position, Position { x: 300.0, y: 120.0 });
}

#[test]
fn test_apply_removals() {
    let mut pipeline = three_node_pipeline();
    pipeline.apply(CanvasChange::EdgeRemoved {
        id: "edge-2".to_string(),
    });
    pipeline.apply(CanvasChange::NodeRemoved {
        id: "customOutput-1".to_string(),
    });
    assert_eq!(pipeline.nodes().len(), 2);
    assert_eq!(pipeline.edges().len(), 1);
    assert!(pipeline.node("customOutput-1").is_none());
}

#[test]
fn test_apply_removal_of_missing_ids_is_a_no_op() {
    let mut pipeline = three_node_pipeline();
    pipeline.apply(CanvasChange::NodeRemoved {
        id: "ghost-99".to_string(),
    });
    pipeline.apply(CanvasChange::EdgeRemoved {
        id: "ghost-edge".to_string(),
    });
    assert_eq!(pipeline.nodes().len(), 3);
    assert_eq!(pipeline.edges().len(), 2);
}

#[test]
fn test_set_data_mutates_payload_in_place() {
    let mut pipeline = Pipeline::new();
    let id = pipeline
        .spawn_node(NodeKind::Api, Position::default())
        .id
        .clone();
    pipeline.set_data(
        &id,
        NodeData::Api(ApiData {
            id: id.clone(),
            url: "https://api.example.com".to_string(),
            method: "POST".to_string(),
        }),
    );
    match &pipeline.node(&id).unwrap().data {
        NodeData::Api(data) => {
            assert_eq!(data.url, "https://api.example.com");
            assert_eq!(data.method, "POST");
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[test]
fn test_restores_minimal_editor_payloads() {
    // The editor serializes `data` as just `{id, nodeType}` until a
    // field is edited; restore must accept that and fill the same
    // fallbacks the editor applies at render time.
    let json = r#"{
        "nodes": [
            {
                "id": "customInput-1",
                "type": "customInput",
                "position": {"x": 0.0, "y": 0.0},
                "data": {"id": "customInput-1", "nodeType": "customInput"}
            },
            {
                "id": "customOutput-1",
                "type": "customOutput",
                "position": {"x": 400.0, "y": 0.0},
                "data": {"id": "customOutput-1", "nodeType": "customOutput"}
            },
            {
                "id": "text-1",
                "type": "text",
                "position": {"x": 200.0, "y": 0.0},
                "data": {"id": "text-1", "nodeType": "text"}
            }
        ],
        "edges": []
    }"#;

    #[derive(serde::Deserialize)]
    struct RawPipeline {
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    }
    let raw: RawPipeline = serde_json::from_str(json).unwrap();
    let pipeline = Pipeline::from_parts(raw.nodes, raw.edges);

    match &pipeline.node("customInput-1").unwrap().data {
        NodeData::Input(data) => assert_eq!(data.name, "input_1"),
        other => panic!("unexpected payload: {:?}", other),
    }
    match &pipeline.node("customOutput-1").unwrap().data {
        NodeData::Output(data) => assert_eq!(data.name, "output_1"),
        other => panic!("unexpected payload: {:?}", other),
    }
    // The text default is the editor's "{{input}}" template, so the
    // restored node synthesizes its usual single input port.
    match &pipeline.node("text-1").unwrap().data {
        NodeData::Text(data) => assert_eq!(data.text, "{{input}}"),
        other => panic!("unexpected payload: {:?}", other),
    }
    let mut resolver = PortResolver::new();
    let view = resolver.view(pipeline.node("text-1").unwrap());
    assert_eq!(view.inputs.len(), 1);
    assert_eq!(view.inputs[0].id, "text-1-input");
}

#[test]
fn test_from_parts_seeds_the_allocator_past_restored_ids() {
    let source = three_node_pipeline();
    let mut restored =
        Pipeline::from_parts(source.nodes().to_vec(), source.edges().to_vec());
    assert_eq!(restored.nodes().len(), 3);
    assert_eq!(restored.edges().len(), 2);

    let fresh = restored
        .spawn_node(NodeKind::Llm, Position::default())
        .id
        .clone();
    assert_eq!(fresh, "llm-2");
}
