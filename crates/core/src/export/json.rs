//! JSON renderer.

use crate::project::ProjectRecord;

/// Renders the records exactly as received, pretty-printed with two-space indentation.
pub fn render_json(records: &[ProjectRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}
