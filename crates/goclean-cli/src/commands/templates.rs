//! `goclean templates`: materialize and inspect templates.

use std::path::{Path, PathBuf};

use serde::Serialize;

use goclean_adapters::{HandlebarsRenderer, TemplateDirectory};
use goclean_core::application::{TemplateOrigin, TemplateRenderer};

use crate::{
    cli::{OutputFormat, TemplateCommands},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct TemplateRow {
    name: String,
    origin: &'static str,
    path: Option<PathBuf>,
}

/// Dispatch to the correct templates subcommand.
pub fn execute(cmd: TemplateCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        TemplateCommands::Init { dir, force } => {
            let root = config.templates_dir(dir.as_deref(), Path::new("."));
            let report = TemplateDirectory::new(&root).materialize(force)?;

            for path in &report.written {
                output.success(&format!("wrote {}", path.display()))?;
            }
            for path in &report.skipped {
                output.print(&format!("  kept {}", path.display()))?;
            }
            if !report.skipped.is_empty() {
                output.info("Existing templates were kept; use --force to overwrite them")?;
            }
        }

        TemplateCommands::List { dir } => {
            let root = config.templates_dir(dir.as_deref(), Path::new("."));
            let rows = list_templates(&root)?;

            if output.format() == OutputFormat::Json {
                output.json(&rows)?;
                return Ok(());
            }
            output.header(&format!("Templates (custom directory: {})", root.display()))?;
            for row in &rows {
                let line = match &row.path {
                    Some(path) => format!("{:<22} {:<8} {}", row.name, row.origin, path.display()),
                    None => format!("{:<22} {}", row.name, row.origin),
                };
                output.print(&line)?;
            }
        }
    }

    Ok(())
}

fn list_templates(root: &Path) -> CliResult<Vec<TemplateRow>> {
    let renderer = HandlebarsRenderer::with_custom_dir(root)?;
    Ok(renderer
        .names()
        .into_iter()
        .map(|name| {
            let (origin, path) = match renderer.origin(&name) {
                Some(TemplateOrigin::Custom(path)) => ("custom", Some(path)),
                _ => ("builtin", None),
            };
            TemplateRow { name, origin, path }
        })
        .collect())
}
