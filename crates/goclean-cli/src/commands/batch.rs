//! Implementation of the `goclean batch` command.
//!
//! The manifest is a TOML file with one `[[entity]]` table per entity:
//!
//! ```toml
//! [[entity]]
//! name = "User"
//! fields = "email:string,name:string"
//!
//! [[entity]]
//! name = "Order"
//! fields = "total:float64,placed_at:time"
//! layers = ["domain", "dto", "repository"]
//! timestamps = true
//! ```
//!
//! Per-entity keys override the flags resolved from config and the command
//! line. Every descriptor is validated before the first file is written.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, instrument};

use goclean_core::application::GenerateRequest;
use goclean_core::domain::{FileNaming, GenerationFlags, Layer};

use crate::{
    cli::{BatchArgs, OutputFormat},
    commands::entity::{build_service, ensure_complete},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    #[serde(rename = "entity", default)]
    entities: Vec<ManifestEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestEntity {
    name: String,
    fields: String,
    #[serde(default)]
    layers: Vec<Layer>,
    validation: Option<bool>,
    timestamps: Option<bool>,
    soft_delete: Option<bool>,
    file_naming: Option<FileNaming>,
}

impl ManifestEntity {
    fn into_request(self, base: &GenerationFlags, dry_run: bool) -> GenerateRequest {
        let flags = GenerationFlags {
            validation: self.validation.unwrap_or(base.validation),
            timestamps: self.timestamps.unwrap_or(base.timestamps),
            soft_delete: self.soft_delete.unwrap_or(base.soft_delete),
            file_naming: self.file_naming.unwrap_or(base.file_naming),
            module: base.module.clone(),
        };
        let mut request = GenerateRequest::new(self.name, self.fields)
            .with_flags(flags)
            .dry_run(dry_run);
        if !self.layers.is_empty() {
            request = request.with_layers(self.layers);
        }
        request
    }
}

/// Execute the `goclean batch` command.
#[instrument(skip_all, fields(manifest = %args.manifest.display()))]
pub fn execute(args: BatchArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let manifest = read_manifest(&args.manifest)?;
    let base = config.resolve_flags(&args.generation);
    let requests: Vec<GenerateRequest> = manifest
        .entities
        .into_iter()
        .map(|entity| entity.into_request(&base, args.generation.dry_run))
        .collect();

    let service = build_service(&args.generation, &config)?;

    let spinner = output.spinner(format!("Generating {} entities", requests.len()));
    let result = service.generate_batch(&requests);
    spinner.finish_and_clear();
    let reports = result?;

    if output.format() == OutputFormat::Json {
        output.json(&reports)?;
    } else {
        for report in &reports {
            output.report(report)?;
        }
        output.success(&format!("{} entities processed", reports.len()))?;
    }

    info!(entities = reports.len(), "batch finished");
    ensure_complete(&reports)
}

fn read_manifest(path: &Path) -> CliResult<Manifest> {
    let text = fs::read_to_string(path)
        .with_cli_context(|| format!("failed to read manifest {}", path.display()))?;
    let manifest: Manifest = toml::from_str(&text).map_err(|e| CliError::InvalidManifest {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;
    if manifest.entities.is_empty() {
        return Err(CliError::InvalidManifest {
            path: path.to_path_buf(),
            message: "no [[entity]] tables found".into(),
        });
    }
    Ok(manifest)
}
