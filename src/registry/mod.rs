//! The single source of truth for what connects to what.
//!
//! Every node kind maps to a descriptor of titled input and output ports.
//! Template-text nodes are the one exception: their input ports are
//! synthesized from the `{{variable}}` references in their current text.

use crate::graph::{Node, NodeData, NodeKind};
use crate::layout::{NodeSize, OUTPUT_PIN, banded_offset, measure_text_box, spread_offset};
use crate::template::extract_variables;
use ahash::AHashMap;

/// A named, directional connection point on a node, before placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub id: String,
    pub label: Option<String>,
}

impl PortSpec {
    fn bare(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: None,
        }
    }

    fn labeled(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: Some(label.to_string()),
        }
    }
}

/// The resolved port set of a node: title plus input and output specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub title: &'static str,
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
}

/// Resolves the descriptor for a node from its kind and payload.
///
/// Total over every kind; foreign tags degrade to a portless default
/// instead of failing the render.
pub fn describe(kind: &NodeKind, data: &NodeData) -> NodeDescriptor {
    match kind {
        NodeKind::Input => NodeDescriptor {
            title: "Input",
            inputs: vec![],
            outputs: vec![PortSpec::bare("value")],
        },
        NodeKind::Output => NodeDescriptor {
            title: "Output",
            inputs: vec![PortSpec::bare("value")],
            outputs: vec![],
        },
        NodeKind::Text => NodeDescriptor {
            title: "Text",
            inputs: template_inputs(data),
            outputs: vec![PortSpec::bare("output")],
        },
        NodeKind::Llm => NodeDescriptor {
            title: "LLM",
            inputs: vec![
                PortSpec::labeled("system", "System"),
                PortSpec::labeled("prompt", "Prompt"),
            ],
            outputs: vec![PortSpec::bare("response")],
        },
        NodeKind::Api => NodeDescriptor {
            title: "API Request",
            inputs: vec![
                PortSpec::labeled("headers", "Headers"),
                PortSpec::labeled("body", "Body"),
            ],
            outputs: vec![PortSpec::bare("response")],
        },
        NodeKind::Filter => NodeDescriptor {
            title: "Filter",
            inputs: vec![PortSpec::bare("data")],
            outputs: vec![PortSpec::bare("filtered")],
        },
        NodeKind::Merge => NodeDescriptor {
            title: "Merge",
            inputs: vec![
                PortSpec::labeled("input1", "A"),
                PortSpec::labeled("input2", "B"),
                PortSpec::labeled("input3", "C"),
            ],
            outputs: vec![PortSpec::bare("merged")],
        },
        NodeKind::Conditional => NodeDescriptor {
            title: "Conditional",
            inputs: vec![PortSpec::bare("value")],
            outputs: vec![
                PortSpec::labeled("true", "True"),
                PortSpec::labeled("false", "False"),
            ],
        },
        NodeKind::Note => NodeDescriptor {
            title: "Note",
            inputs: vec![],
            outputs: vec![],
        },
        NodeKind::Unknown(_) => NodeDescriptor {
            title: "Node",
            inputs: vec![],
            outputs: vec![],
        },
    }
}

fn template_inputs(data: &NodeData) -> Vec<PortSpec> {
    let NodeData::Text(text_data) = data else {
        return vec![];
    };
    extract_variables(&text_data.text)
        .into_iter()
        .map(|variable| PortSpec {
            label: Some(variable.clone()),
            id: variable,
        })
        .collect()
}

/// A placed handle as handed to the rendering collaborator. The id is
/// node-qualified so it is unique across the whole canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleView {
    pub id: String,
    pub label: Option<String>,
    pub offset: f64,
}

/// Everything the renderer needs for one node: title, placed handles and
/// (for template-text nodes) content-driven geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub title: &'static str,
    pub inputs: Vec<HandleView>,
    pub outputs: Vec<HandleView>,
    pub size: Option<NodeSize>,
}

#[derive(Debug, Default)]
struct DerivedPorts {
    text: String,
    variables: Vec<String>,
}

/// Memoizing resolver for node descriptors and renderer views.
///
/// Template variables are cached per node, keyed by the text they were
/// computed from, so ports are re-derived only when that node's text
/// actually changes. The derived data is never persisted anywhere else.
#[derive(Debug, Default)]
pub struct PortResolver {
    derived: AHashMap<String, DerivedPorts>,
}

impl PortResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a node's descriptor, reusing cached template variables
    /// when the node's text is unchanged since the last resolution.
    pub fn descriptor(&mut self, node: &Node) -> NodeDescriptor {
        if let (NodeKind::Text, NodeData::Text(text_data)) = (&node.kind, &node.data) {
            let variables = self.cached_variables(&node.id, &text_data.text);
            NodeDescriptor {
                title: "Text",
                inputs: variables
                    .into_iter()
                    .map(|variable| PortSpec {
                        label: Some(variable.clone()),
                        id: variable,
                    })
                    .collect(),
                outputs: vec![PortSpec::bare("output")],
            }
        } else {
            describe(&node.kind, &node.data)
        }
    }

    /// Resolves the full renderer view: node-qualified handle ids with
    /// layout offsets, and geometry for template-text nodes.
    pub fn view(&mut self, node: &Node) -> NodeView {
        let descriptor = self.descriptor(node);
        let dynamic = matches!(node.kind, NodeKind::Text);

        let input_count = descriptor.inputs.len();
        let inputs = descriptor
            .inputs
            .into_iter()
            .enumerate()
            .map(|(index, port)| HandleView {
                id: format!("{}-{}", node.id, port.id),
                label: port.label,
                offset: if dynamic {
                    banded_offset(index, input_count)
                } else {
                    spread_offset(index, input_count)
                },
            })
            .collect();

        let output_count = descriptor.outputs.len();
        let outputs = descriptor
            .outputs
            .into_iter()
            .enumerate()
            .map(|(index, port)| HandleView {
                id: format!("{}-{}", node.id, port.id),
                label: port.label,
                offset: if dynamic {
                    OUTPUT_PIN
                } else {
                    spread_offset(index, output_count)
                },
            })
            .collect();

        let size = match (&node.kind, &node.data) {
            (NodeKind::Text, NodeData::Text(text_data)) => {
                Some(measure_text_box(&text_data.text))
            }
            _ => None,
        };

        NodeView {
            title: descriptor.title,
            inputs,
            outputs,
            size,
        }
    }

    /// Whether `port_id` names a port that actually exists on `node`.
    /// Connection enforcement stays with the canvas collaborator; this is
    /// the lookup it consults.
    pub fn has_port(&mut self, node: &Node, port_id: &str) -> bool {
        let descriptor = self.descriptor(node);
        descriptor
            .inputs
            .iter()
            .chain(descriptor.outputs.iter())
            .any(|port| port.id == port_id)
    }

    /// Drops the memoized derivation for a node. Callers evict when the
    /// canvas reports a node removal, so the cache only holds entries
    /// for nodes that still exist. Returns whether an entry was present.
    pub fn evict(&mut self, node_id: &str) -> bool {
        self.derived.remove(node_id).is_some()
    }

    fn cached_variables(&mut self, node_id: &str, text: &str) -> Vec<String> {
        let entry = self.derived.entry(node_id.to_string()).or_default();
        if entry.text != text {
            entry.text = text.to_string();
            entry.variables = extract_variables(text);
        }
        entry.variables.clone()
    }
}
