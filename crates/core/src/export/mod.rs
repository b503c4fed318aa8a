//! Export pipeline.
//!
//! Records are mapped to rows once, then serialized by one renderer:
//!
//! | Format  | Renderer      | Artifact |
//! |---------|---------------|----------|
//! | csv     | `render_csv`  | `.csv` with BOM |
//! | excel   | `render_csv`  | `.csv` with BOM |
//! | json    | `render_json` | `.json` |
//! | pdf     | `render_text` | `.txt` |
//! | print   | `render_html` | `.html` |

pub mod csv;
pub mod format;
pub mod html;
pub mod json;
pub mod service;
pub mod text;


pub use format::{Artifact, ExportFormat, ExportRequest, artifact_filename};
pub use service::{DEFAULT_TITLE, ExportService};
