use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Canvas-space coordinate of a node. Mutated only through drag changes
/// reported by the canvas collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// The closed set of node kinds the editor can place on the canvas.
///
/// Wire tags match the visual editor's registry (`customInput`, `llm`,
/// `text`, ...). Tags that are not part of the set deserialize into
/// [`NodeKind::Unknown`], which the registry resolves to a portless
/// default descriptor instead of failing the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Input,
    Output,
    Text,
    Llm,
    Api,
    Filter,
    Merge,
    Conditional,
    Note,
    Unknown(String),
}

impl NodeKind {
    /// The tag used for this kind on the wire and inside node ids.
    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Input => "customInput",
            NodeKind::Output => "customOutput",
            NodeKind::Text => "text",
            NodeKind::Llm => "llm",
            NodeKind::Api => "api",
            NodeKind::Filter => "filter",
            NodeKind::Merge => "merge",
            NodeKind::Conditional => "conditional",
            NodeKind::Note => "note",
            NodeKind::Unknown(tag) => tag,
        }
    }

    /// Resolves a wire tag back into a kind, preserving foreign tags.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "customInput" => NodeKind::Input,
            "customOutput" => NodeKind::Output,
            "text" => NodeKind::Text,
            "llm" => NodeKind::Llm,
            "api" => NodeKind::Api,
            "filter" => NodeKind::Filter,
            "merge" => NodeKind::Merge,
            "conditional" => NodeKind::Conditional,
            "note" => NodeKind::Note,
            other => NodeKind::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagVisitor;
        impl Visitor<'_> for TagVisitor {
            type Value = NodeKind;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a node type tag")
            }
            fn visit_str<E: de::Error>(self, value: &str) -> Result<NodeKind, E> {
                Ok(NodeKind::from_tag(value))
            }
        }
        deserializer.deserialize_str(TagVisitor)
    }
}

/// A single processing unit in the pipeline graph.
///
/// Ports are never stored on the node; they are a view resolved on demand
/// by the registry from `kind` and `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    pub data: NodeData,
}

/// Type-specific payload owned by a single node.
///
/// Each variant carries the node id alongside its fields, matching the
/// editor's `{id, nodeType, ...}` payload shape on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType")]
pub enum NodeData {
    #[serde(rename = "customInput")]
    Input(InputData),
    #[serde(rename = "customOutput")]
    Output(OutputData),
    #[serde(rename = "text")]
    Text(TextData),
    #[serde(rename = "llm")]
    Llm(LlmData),
    #[serde(rename = "api")]
    Api(ApiData),
    #[serde(rename = "filter")]
    Filter(FilterData),
    #[serde(rename = "merge")]
    Merge(MergeData),
    #[serde(rename = "conditional")]
    Conditional(ConditionalData),
    #[serde(rename = "note")]
    Note(NoteData),
    #[serde(other)]
    Unknown,
}

impl NodeData {
    /// Builds the initial payload the factory attaches to a freshly
    /// dropped node. Field defaults follow the editor's node components.
    pub fn initial(kind: &NodeKind, id: &str) -> Self {
        match kind {
            NodeKind::Input => NodeData::Input(InputData {
                id: id.to_string(),
                name: id.replacen("customInput-", "input_", 1),
                input_type: "Text".to_string(),
            }),
            NodeKind::Output => NodeData::Output(OutputData {
                id: id.to_string(),
                name: id.replacen("customOutput-", "output_", 1),
                output_type: "Text".to_string(),
            }),
            NodeKind::Text => NodeData::Text(TextData {
                id: id.to_string(),
                text: default_template(),
            }),
            NodeKind::Llm => NodeData::Llm(LlmData { id: id.to_string() }),
            NodeKind::Api => NodeData::Api(ApiData {
                id: id.to_string(),
                url: String::new(),
                method: "GET".to_string(),
            }),
            NodeKind::Filter => NodeData::Filter(FilterData {
                id: id.to_string(),
                field: String::new(),
                operator: "equals".to_string(),
            }),
            NodeKind::Merge => NodeData::Merge(MergeData {
                id: id.to_string(),
                merge_type: "concat".to_string(),
            }),
            NodeKind::Conditional => NodeData::Conditional(ConditionalData {
                id: id.to_string(),
                compare_type: "equals".to_string(),
                condition: String::new(),
            }),
            NodeKind::Note => NodeData::Note(NoteData {
                id: id.to_string(),
                note: String::new(),
            }),
            NodeKind::Unknown(_) => NodeData::Unknown,
        }
    }

    /// Fills the display-name fallbacks the editor applies at render
    /// time. A payload serialized before its fields were ever edited
    /// carries only `{id, nodeType}`, so restored input/output names may
    /// be empty until derived from the node id here.
    pub fn fill_name_defaults(&mut self, node_id: &str) {
        match self {
            NodeData::Input(data) if data.name.is_empty() => {
                data.name = node_id.replacen("customInput-", "input_", 1);
            }
            NodeData::Output(data) if data.name.is_empty() => {
                data.name = node_id.replacen("customOutput-", "output_", 1);
            }
            _ => {}
        }
    }
}

fn default_template() -> String {
    "{{input}}".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputData {
    pub id: String,
    #[serde(default, rename = "inputName")]
    pub name: String,
    #[serde(default, rename = "inputType")]
    pub input_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputData {
    pub id: String,
    #[serde(default, rename = "outputName")]
    pub name: String,
    #[serde(default, rename = "outputType")]
    pub output_type: String,
}

/// Payload of a template-text node. The raw template string is the single
/// source of truth for the node's input ports and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    pub id: String,
    #[serde(default = "default_template")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmData {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiData {
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub method: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterData {
    pub id: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub operator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeData {
    pub id: String,
    #[serde(default, rename = "mergeType")]
    pub merge_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalData {
    pub id: String,
    #[serde(default, rename = "compareType")]
    pub compare_type: String,
    #[serde(default)]
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteData {
    pub id: String,
    #[serde(default)]
    pub note: String,
}
