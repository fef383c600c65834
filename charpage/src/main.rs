//! charpage - character profile page generator
//!
//! A CLI tool that turns JSON save files into standalone HTML pages.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]

mod cli;

use anyhow::{Context, Result};
use charpage::document_model::{Document, ThemePreset};
use charpage::html_exporter::{self, ThemePolicy};
use charpage::pipeline;
use charpage::project_config::ProjectConfig;
use charpage::schema_codec;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

/// Default file name written by `init`
const DEFAULT_SAVE_FILE: &str = "charpage.json";

/// Main entry point for the charpage CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; --verbose raises the default level to info
    let mut logger = env_logger::Builder::from_default_env();
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Info);
    }
    logger.init();

    let config = ProjectConfig::discover(cli.config.as_deref(), Path::new("."))
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Init {
            path,
            preset,
            force,
        } => {
            handle_init_command(&config, path, preset, force)?;
        }

        Commands::Build {
            input,
            output,
            strict_theme,
            lang,
        } => {
            handle_build_command(&config, input, output, strict_theme, lang)?;
        }

        Commands::Migrate { input, output } => {
            handle_migrate_command(input, output)?;
        }

        Commands::Validate { input } => {
            handle_validate_command(input)?;
        }

        Commands::ListThemes => {
            handle_list_themes_command(&config);
        }
    }

    Ok(())
}

/// Handle the init command
fn handle_init_command(
    config: &ProjectConfig,
    path: Option<PathBuf>,
    preset: Option<String>,
    force: bool,
) -> Result<()> {
    let target = match path {
        Some(path) if path.is_dir() => path.join(DEFAULT_SAVE_FILE),
        Some(path) => path,
        None => PathBuf::from(DEFAULT_SAVE_FILE),
    };

    let preset = match preset {
        Some(id) => ThemePreset::from_id(&id).with_context(|| {
            format!(
                "Theme preset '{}' not found. Run 'charpage list-themes' to see available presets",
                id
            )
        })?,
        None => config.preset(),
    };

    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it",
            target.display()
        );
    }

    let mut document = Document::default();
    document.apply_preset(preset);

    write_save_file(&document, &target)?;

    println!("✓ Created {} (theme: {})", target.display(), preset.id());
    println!("\nNext steps:");
    println!("  1. Edit {} to describe your character", target.display());
    println!("  2. Run 'charpage build {}' to generate the page", target.display());

    Ok(())
}

/// Handle the build command
fn handle_build_command(
    config: &ProjectConfig,
    input: PathBuf,
    output: Option<PathBuf>,
    strict_theme: bool,
    lang: Option<String>,
) -> Result<()> {
    let mut options = config.render_options();
    if strict_theme {
        options.theme_policy = ThemePolicy::Strict;
    }
    if let Some(lang) = lang {
        options.lang = lang;
    }

    println!("Building character page...");
    println!("Input: {}", input.display());

    if input.is_dir() {
        let out_dir = output.unwrap_or_else(|| input.clone());
        println!("Output: {}", out_dir.display());

        let summary = pipeline::build_directory(&input, &out_dir, &options)
            .with_context(|| format!("Failed to build pages from {}", input.display()))?;

        for path in &summary.outputs {
            println!("✓ Wrote: {}", path.display());
        }
        println!(
            "\n✓ Built {} page(s), {} bytes ({} migrated from an older format)",
            summary.outputs.len(),
            summary.bytes_written,
            summary.migrated
        );
        return Ok(());
    }

    let output = output.unwrap_or_else(|| input.with_extension("html"));
    println!("Output: {}", output.display());

    // Stage 1: Load the save file
    println!("\n[Stage 1/2] Loading save file...");
    let loaded = pipeline::load_document(&input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    for migration in &loaded.decoded.migrations {
        println!("  - {}", migration);
    }
    println!("✓ Loaded version {} save file", loaded.decoded.source_version);

    // Stage 2: Render
    println!("\n[Stage 2/2] Rendering HTML...");
    let bytes = html_exporter::to_html(&loaded.decoded.document, &options, &output)
        .with_context(|| format!("Failed to export HTML to {}", output.display()))?;
    println!("✓ Successfully wrote: {} ({} bytes)", output.display(), bytes);

    Ok(())
}

/// Handle the migrate command
fn handle_migrate_command(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| input.clone());

    let loaded = pipeline::load_document(&input)
        .with_context(|| format!("Failed to load {}", input.display()))?;

    if loaded.decoded.migrations.is_empty() {
        println!("{} is already in the current format", input.display());
    } else {
        println!(
            "Migrating {} (version {}):",
            input.display(),
            loaded.decoded.source_version
        );
        for migration in &loaded.decoded.migrations {
            println!("  - {}", migration);
        }
    }

    write_save_file(&loaded.decoded.document, &output)?;
    println!(
        "✓ Wrote version {} save file: {}",
        schema_codec::SCHEMA_VERSION,
        output.display()
    );

    Ok(())
}

/// Handle the validate command
fn handle_validate_command(input: PathBuf) -> Result<()> {
    println!("Validating save file...");
    println!("Input: {}", input.display());

    let loaded = pipeline::load_document(&input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let decoded = &loaded.decoded;
    let doc = &decoded.document;

    println!("✓ Schema version {}", decoded.source_version);
    println!("  - {} stats", doc.stats.len());
    println!("  - {} images", doc.images().len());
    println!("  - {} memo panels", doc.memo_panels.len());
    println!("  - {} mini-sections", doc.mini_sections.len());
    println!("  - {} pulldowns", doc.pulldowns.len());
    println!("  - {} list items", doc.item_count());

    for migration in &decoded.migrations {
        println!("Note: {}", migration);
    }

    let unsafe_slots = doc.theme.unsafe_slots();
    if unsafe_slots.is_empty() {
        println!("✓ All theme values are plain colors");
    } else {
        for slot in unsafe_slots {
            println!(
                "Warning: theme slot {} is not a plain color: {:?}",
                slot,
                doc.theme.get(slot)
            );
        }
        println!("Use 'charpage build --strict-theme' to replace these with defaults");
    }

    Ok(())
}

/// Handle the list-themes command
fn handle_list_themes_command(config: &ProjectConfig) {
    println!("Available theme presets:\n");

    let default = config.preset();
    for preset in ThemePreset::all() {
        let marker = if preset == default { " (default)" } else { "" };
        println!("  {}{} - {}", preset.id(), marker, preset.description());
    }

    println!("\nUsage: charpage init --preset <id> [path]");
}

/// Serialize a document and write it as a save file
fn write_save_file(document: &Document, path: &Path) -> Result<()> {
    let json = schema_codec::serialize(document).context("Failed to encode document")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write file {}", path.display()))?;

    Ok(())
}
