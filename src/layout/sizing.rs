//! Content-driven geometry for template-text nodes.

/// Rendered box geometry of a template-text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSize {
    /// Box width in canvas units, clamped to [200, 400].
    pub width: u32,
    /// Box height: 120 of header and padding chrome plus the text block.
    pub height: u32,
    /// Textarea row count, at least 2.
    pub rows: u32,
}

/// Computes a node's box from its current text. Pure function of the
/// text; never reads rendered state back.
pub fn measure_text_box(text: &str) -> NodeSize {
    let line_count = text.split('\n').count() as u32;
    let max_line_length = text
        .split('\n')
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .max(20) as u32;

    let width = (max_line_length * 8 + 50).clamp(200, 400);
    let text_height = (line_count * 20).max(40);

    NodeSize {
        width,
        height: 120 + text_height,
        rows: line_count.max(2),
    }
}
