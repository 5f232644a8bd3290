//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from
//! the keiro crate. Import this module to get access to the core
//! functionality without having to import each type individually.

// Graph assembly state and data model
pub use crate::graph::{
    CanvasChange, Edge, Node, NodeData, NodeIdAllocator, NodeKind, Pipeline, Position,
};
pub use crate::graph::{
    ApiData, ConditionalData, FilterData, InputData, LlmData, MergeData, NoteData, OutputData,
    TextData,
};

// Port layout and geometry
pub use crate::layout::{NodeSize, OUTPUT_PIN, banded_offset, measure_text_box, spread_offset};

// Template variable extraction
pub use crate::template::extract_variables;

// Node type registry and renderer views
pub use crate::registry::{HandleView, NodeDescriptor, NodeView, PortResolver, PortSpec, describe};

// Submission contract
pub use crate::submit::{
    Analyzer, DEFAULT_ENDPOINT, HttpAnalyzer, PipelineReport, PipelineRequest, SubmissionStatus,
    Submitter,
};

// Error types
pub use crate::error::SubmitError;
