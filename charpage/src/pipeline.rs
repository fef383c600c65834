//! Batch build of saved documents
//!
//! Two stages, mirroring the single-file build:
//! 1. **Loading**: discover `*.json` save files and decode each one
//! 2. **Rendering**: render every document and write `<stem>.html`

use crate::html_exporter::{self, HtmlExportError, RenderOptions};
use crate::schema_codec::{self, Decoded, SchemaError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A decoded save file and where it came from
#[derive(Debug)]
pub struct LoadedDocument {
    /// Path of the save file
    pub path: PathBuf,
    /// The decoded document and its migration report
    pub decoded: Decoded,
}

/// Outcome of a batch build
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// HTML files written, in input order
    pub outputs: Vec<PathBuf>,
    /// Documents that needed migration while loading
    pub migrated: usize,
    /// Total bytes written
    pub bytes_written: usize,
}

/// Find every save file below `root`, sorted by path
///
/// # Parameters
/// * `root` - Directory to search recursively
///
/// # Returns
/// * `Ok(Vec<PathBuf>)` - Paths of all `.json` files
/// * `Err(PipelineError)` - The directory could not be walked
pub fn discover_documents(root: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| PipelineError::IoError(root.to_path_buf(), e.into()))?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path.to_path_buf());
        }
    }

    Ok(paths)
}

/// Read and decode a single save file
pub fn load_document(path: &Path) -> Result<LoadedDocument, PipelineError> {
    let blob =
        std::fs::read_to_string(path).map_err(|e| PipelineError::IoError(path.to_path_buf(), e))?;

    let decoded = schema_codec::decode(&blob)
        .map_err(|e| PipelineError::SchemaError(path.to_path_buf(), e))?;

    if decoded.was_migrated() {
        log::info!(
            "{} (version {}) needed {} migration(s)",
            path.display(),
            decoded.source_version,
            decoded.migrations.len()
        );
    }

    Ok(LoadedDocument {
        path: path.to_path_buf(),
        decoded,
    })
}

/// Render every save file below `root` into `out_dir`
///
/// Each `<stem>.json` becomes `<out_dir>/<stem>.html`. Any load failure
/// aborts the batch before anything is written.
///
/// # Parameters
/// * `root` - Directory containing save files
/// * `out_dir` - Directory receiving the HTML files
/// * `options` - Render options applied to every document
///
/// # Returns
/// * `Ok(BuildSummary)` - Files written and totals
/// * `Err(PipelineError)` - No save files, or a load/write failure
pub fn build_directory(
    root: &Path,
    out_dir: &Path,
    options: &RenderOptions,
) -> Result<BuildSummary, PipelineError> {
    // Stage 1: load
    let paths = discover_documents(root)?;
    if paths.is_empty() {
        return Err(PipelineError::NoDocuments(root.to_path_buf()));
    }
    log::info!("Found {} save file(s) in {}", paths.len(), root.display());

    #[cfg(feature = "parallel")]
    let loaded: Result<Vec<_>, _> = paths.par_iter().map(|p| load_document(p)).collect();

    #[cfg(not(feature = "parallel"))]
    let loaded: Result<Vec<_>, _> = paths.iter().map(|p| load_document(p)).collect();

    let loaded = loaded?;

    // Stage 2: render
    #[cfg(feature = "parallel")]
    let written: Result<Vec<_>, _> = loaded
        .par_iter()
        .map(|doc| render_one(doc, out_dir, options))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let written: Result<Vec<_>, _> = loaded
        .iter()
        .map(|doc| render_one(doc, out_dir, options))
        .collect();

    let written = written?;

    let summary = BuildSummary {
        migrated: loaded.iter().filter(|d| d.decoded.was_migrated()).count(),
        bytes_written: written.iter().map(|(_, bytes)| bytes).sum(),
        outputs: written.into_iter().map(|(path, _)| path).collect(),
    };
    Ok(summary)
}

/// Output path for a save file: same stem, `.html`, inside `out_dir`
pub fn output_path_for(input: &Path, out_dir: &Path) -> PathBuf {
    let mut name = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "page".into());
    name.push(".html");
    out_dir.join(name)
}

fn render_one(
    loaded: &LoadedDocument,
    out_dir: &Path,
    options: &RenderOptions,
) -> Result<(PathBuf, usize), PipelineError> {
    let output = output_path_for(&loaded.path, out_dir);
    let bytes = html_exporter::to_html(&loaded.decoded.document, options, &output)
        .map_err(|e| PipelineError::ExportError(output.clone(), e))?;
    log::info!("Wrote {} ({} bytes)", output.display(), bytes);
    Ok((output, bytes))
}

/// Errors that can occur during a batch build
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error reading {path}: {source}", path = .0.display(), source = .1)]
    IoError(PathBuf, std::io::Error),

    #[error("Error loading {path}: {source}", path = .0.display(), source = .1)]
    SchemaError(PathBuf, SchemaError),

    #[error("Error writing {path}: {source}", path = .0.display(), source = .1)]
    ExportError(PathBuf, HtmlExportError),

    #[error("No save files (*.json) found in {path}", path = .0.display())]
    NoDocuments(PathBuf),
}
