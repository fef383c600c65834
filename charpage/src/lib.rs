//! charpage - character profile page generator
//!
//! Edits a structured description of a character page and compiles it into
//! one self-contained HTML file (inline stylesheet and script). The
//! description is saved and restored as versioned JSON.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod document_model;
pub mod escape;
pub mod html_exporter;
pub mod pipeline;
pub mod project_config;
pub mod schema_codec;
pub mod slider;

pub use document_model::{Document, Theme, ThemePreset};
pub use html_exporter::{render, render_with, RenderOptions, ThemePolicy};
pub use schema_codec::{deserialize, serialize, SchemaError};
