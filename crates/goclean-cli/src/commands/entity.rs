//! Implementation of the `goclean entity` command.
//!
//! Responsibility: translate CLI arguments into a `GenerateRequest`, wire the
//! filesystem and template adapters into the core service, and display the
//! report. No generation logic lives here.

use tracing::{debug, info, instrument};

use goclean_adapters::{HandlebarsRenderer, LocalFilesystem, TemplateDirectory};
use goclean_core::application::{GenerateRequest, GenerateService, GenerationReport};

use crate::{
    cli::{EntityArgs, GenerationArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `goclean entity` command.
#[instrument(skip_all, fields(entity = %args.name))]
pub fn execute(args: EntityArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = build_service(&args.generation, &config)?;

    let mut request = GenerateRequest::new(&args.name, &args.fields)
        .with_flags(config.resolve_flags(&args.generation))
        .dry_run(args.generation.dry_run);
    if !args.layers.is_empty() {
        request = request.with_layers(args.layers);
    }
    debug!(?request, "request resolved");

    let report = service.generate(&request)?;
    output.report(&report)?;

    info!(written = report.written(), "entity generated");
    ensure_complete(std::slice::from_ref(&report))
}

/// Wire the local filesystem and the Handlebars renderer (built-ins plus any
/// custom overrides) into a [`GenerateService`].
///
/// The first real run in a project writes the built-in templates into the
/// templates directory so they can be edited. Dry runs leave it alone.
pub(crate) fn build_service(
    args: &GenerationArgs,
    config: &AppConfig,
) -> CliResult<GenerateService> {
    if !args.dir.is_dir() {
        return Err(CliError::InvalidInput {
            message: format!("project directory '{}' does not exist", args.dir.display()),
            source: None,
        });
    }

    let templates_dir = config.templates_dir(args.templates.as_deref(), &args.dir);
    debug!(
        project = %args.dir.display(),
        templates = %templates_dir.display(),
        "wiring adapters"
    );

    if !args.dry_run && !templates_dir.exists() {
        let report = TemplateDirectory::new(&templates_dir).materialize(false)?;
        info!(
            dir = %templates_dir.display(),
            written = report.written.len(),
            "built-in templates copied for editing"
        );
    }

    let renderer = HandlebarsRenderer::with_custom_dir(&templates_dir)?;
    let store = LocalFilesystem::new(&args.dir);
    Ok(GenerateService::new(Box::new(renderer), Box::new(store)))
}

/// Turn soft per-artifact failures into a non-zero exit after the report
/// has been shown.
pub(crate) fn ensure_complete(reports: &[GenerationReport]) -> CliResult<()> {
    let failed: usize = reports.iter().map(|r| r.failures().count()).sum();
    if failed > 0 {
        return Err(CliError::GenerationIncomplete { failed });
    }
    Ok(())
}
