//! Field clean-up applied to a parsed response before it reaches callers.

use tracing::warn;

use crate::models::{StationData, StationResponseSchema, TransitLine};
use crate::sanitize::strip_opt;

/// Background color for a line whose color is missing.
pub const DEFAULT_LINE_COLOR: &str = "#0f172a";

/// Text color for a line whose text color is missing.
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";

/// Sanitize free text and fill color defaults in place.
///
/// Ambiguous responses without `data` are returned untouched.
pub fn normalize(schema: &mut StationResponseSchema) {
    if let Some(data) = schema.data.as_mut() {
        strip_free_text(data);
        for line in &mut data.lines {
            default_line_colors(line);
        }
    }
}

/// Remove citation markers from every free-text field.
///
/// Absent fields stay absent; list entries are not touched.
pub fn strip_free_text(data: &mut StationData) {
    data.fun_fact = strip_opt(data.fun_fact.take());
    data.historical_context = strip_opt(data.historical_context.take());
    data.operational_status = strip_opt(data.operational_status.take());
    data.opening_info = strip_opt(data.opening_info.take());
    data.route_description = strip_opt(data.route_description.take());

    if let Some(access) = data.step_free_access.as_mut() {
        access.status = strip_opt(access.status.take());
        access.details = strip_opt(access.details.take());
    }
}

/// Ensure a line always carries populated colors.
pub fn default_line_colors(line: &mut TransitLine) {
    if line.color_hex.trim().is_empty() {
        warn!("Line '{}' has no colorHex, using {}", line.name, DEFAULT_LINE_COLOR);
        line.color_hex = DEFAULT_LINE_COLOR.to_string();
    }
    if line.text_color_hex.trim().is_empty() {
        line.text_color_hex = DEFAULT_TEXT_COLOR.to_string();
    }
}
