//! Centralized label formatting.
//!
//! Every string shown by the overlay and the side panel goes through this
//! module so the viewport labels and the panel rows never drift apart.

/// Fallback line for a vertex that belongs to no group
pub const NO_GROUPS: &str = "No Groups";

/// Format a weight with a fixed number of decimal places.
///
/// # Examples
/// ```
/// use vgw_types::formatting::format_weight;
/// assert_eq!(format_weight(0.33333, 3), "0.333");
/// assert_eq!(format_weight(1.0, 3), "1.000");
/// assert_eq!(format_weight(0.5, 1), "0.5");
/// ```
pub fn format_weight(weight: f32, precision: usize) -> String {
    format!("{:.*}", precision, weight)
}

/// Header line of a vertex block: `Vertex <index>:`
///
/// # Examples
/// ```
/// use vgw_types::formatting::vertex_header;
/// assert_eq!(vertex_header(5), "Vertex 5:");
/// ```
pub fn vertex_header(index: u32) -> String {
    format!("Vertex {}:", index)
}

/// One group line of a vertex block: `<group name>: <weight>`
///
/// # Examples
/// ```
/// use vgw_types::formatting::weight_line;
/// assert_eq!(weight_line("Head", 0.5, 3), "Head: 0.500");
/// ```
pub fn weight_line(group_name: &str, weight: f32, precision: usize) -> String {
    format!("{}: {}", group_name, format_weight(weight, precision))
}

/// Label of the overlay toggle button for the given running state
pub fn toggle_label(running: bool) -> &'static str {
    if running {
        "Hide Weights Overlay"
    } else {
        "Show Weights Overlay"
    }
}
