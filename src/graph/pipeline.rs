use crate::graph::{Edge, Node, NodeData, NodeKind, Position};
use ahash::AHashMap;

/// Allocates process-unique node ids for one editing session.
///
/// Each pipeline owns its own allocator instance; there is no hidden
/// process-wide counter. Counters only ever increase, so an id is never
/// handed out twice even after the node it named is removed.
#[derive(Debug, Default)]
pub struct NodeIdAllocator {
    counters: AHashMap<String, u64>,
}

impl NodeIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id for `kind`, of the form `{tag}-{n}`.
    pub fn allocate(&mut self, kind: &NodeKind) -> String {
        let counter = self.counters.entry(kind.tag().to_string()).or_insert(0);
        *counter += 1;
        format!("{}-{}", kind.tag(), counter)
    }

    /// Advances counters past every id in `nodes`, so a session restored
    /// from serialized state keeps allocating fresh ids.
    pub fn seed_from(&mut self, nodes: &[Node]) {
        for node in nodes {
            let trailing: u64 = node
                .id
                .rsplit('-')
                .next()
                .unwrap_or("0")
                .parse()
                .unwrap_or(0);
            let counter = self.counters.entry(node.kind.tag().to_string()).or_insert(0);
            *counter = (*counter).max(trailing);
        }
    }
}

/// A change descriptor reported by the canvas collaborator.
///
/// The pipeline applies these verbatim: no semantic validation of the
/// connection beyond id uniqueness for newly created entities.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasChange {
    NodeMoved { id: String, position: Position },
    NodeRemoved { id: String },
    EdgeAdded(Edge),
    EdgeRemoved { id: String },
}

/// The authoritative, mutable node and edge collections of the current
/// editing session.
#[derive(Debug, Default)]
pub struct Pipeline {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    allocator: NodeIdAllocator,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds assembly state from a previously serialized node and edge
    /// collection, seeding the id allocator past the restored ids.
    ///
    /// The editor serializes a payload as minimal `{id, nodeType}` until
    /// its fields are edited, so display-name fallbacks are filled in
    /// from the node ids on restore.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut allocator = NodeIdAllocator::new();
        allocator.seed_from(&nodes);
        let mut pipeline = Pipeline {
            nodes: Vec::new(),
            edges: Vec::new(),
            allocator,
        };
        for mut node in nodes {
            node.data.fill_name_defaults(&node.id);
            pipeline.add_node(node);
        }
        for edge in edges {
            pipeline.apply(CanvasChange::EdgeAdded(edge));
        }
        pipeline
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Factory entry point for a drop-to-canvas action: allocates a fresh
    /// id, attaches the kind's initial payload and stores the node.
    pub fn spawn_node(&mut self, kind: NodeKind, position: Position) -> &Node {
        let id = self.allocator.allocate(&kind);
        let data = NodeData::initial(&kind, &id);
        self.add_node(Node {
            id,
            kind,
            position,
            data,
        });
        &self.nodes[self.nodes.len() - 1]
    }

    /// Appends a fully-formed node.
    ///
    /// # Panics
    ///
    /// Panics if a node with the same id already exists. The allocator
    /// makes this structurally impossible for factory-created nodes, so a
    /// collision is an invariant violation rather than a recoverable
    /// error.
    pub fn add_node(&mut self, node: Node) {
        assert!(
            self.node(&node.id).is_none(),
            "duplicate node id '{}' in pipeline",
            node.id
        );
        self.nodes.push(node);
    }

    /// Applies one canvas change descriptor verbatim.
    ///
    /// Removals of ids that are no longer present are no-ops, since the
    /// canvas may batch removals with the interactions that caused them.
    ///
    /// # Panics
    ///
    /// Panics if a newly connected edge reuses an existing edge id; the
    /// canvas guarantees edge id uniqueness, so this is an invariant
    /// violation.
    pub fn apply(&mut self, change: CanvasChange) {
        match change {
            CanvasChange::NodeMoved { id, position } => {
                if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
                    node.position = position;
                }
            }
            CanvasChange::NodeRemoved { id } => {
                self.nodes.retain(|n| n.id != id);
            }
            CanvasChange::EdgeAdded(edge) => {
                assert!(
                    !self.edges.iter().any(|e| e.id == edge.id),
                    "duplicate edge id '{}' in pipeline",
                    edge.id
                );
                self.edges.push(edge);
            }
            CanvasChange::EdgeRemoved { id } => {
                self.edges.retain(|e| e.id != id);
            }
        }
    }

    /// Replaces a node's payload in place, the field-edit path of the
    /// editor. Ports derived from the payload are recomputed on the next
    /// registry resolution; nothing is cached here.
    pub fn set_data(&mut self, id: &str, data: NodeData) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.data = data;
        }
    }
}
