//! Project sources for Projex.
//!
//! Records reach the report pipeline through [`ProjectSource`]. Two sources
//! exist: the CRM REST backend and a local JSON file.

mod client;
mod source;

pub use client::{PROJECTS_PATH, ProjectsClient};
pub use source::{FileSource, ProjectSource, decode_page};
