//! Deterministic placement of ports along a node's vertical edge.
//!
//! Offsets are percentages of the node height. The functions are pure and
//! order-preserving: swapping two ports changes which port gets which
//! slot, never the set of slots produced.

/// Offset of the single pinned output port on a template-text node.
pub const OUTPUT_PIN: f64 = 50.0;

/// Evenly distributes `total` static ports over the full node height,
/// inset from both edges. A lone port is centered.
pub fn spread_offset(index: usize, total: usize) -> f64 {
    if total <= 1 {
        return 50.0;
    }
    (index as f64 + 1.0) / (total as f64 + 1.0) * 100.0
}

/// Distributes `total` dynamically synthesized ports over the [35, 85]
/// band, leaving the top of the node free for its header and content and
/// clearing the output port pinned at [`OUTPUT_PIN`].
pub fn banded_offset(index: usize, total: usize) -> f64 {
    if total <= 1 {
        return 50.0;
    }
    35.0 + (index as f64 / (total as f64 - 1.0)) * 50.0
}
