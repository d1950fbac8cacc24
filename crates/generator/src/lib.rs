//! Turns `ghflow-types` workflows into schema-shaped documents and YAML text.
//!
//! [`generate`] is the pure half: it builds a [`Document`] whose keys, nesting, and omissions
//! match the workflow schema. [`render`] hands that document to `serde_yaml` with the chosen
//! [`RenderOptions`], and [`write_workflow`] puts the text on disk.

pub mod document;
pub mod generate;
pub mod io;
pub mod options;
mod record;
pub mod render;

pub use document::Document;
pub use generate::{event_key, generate};
pub use io::write_workflow;
pub use options::{OptionsError, RenderOptions};
pub use render::{RenderError, render, render_document, render_value, sort_keys};
