//! Generate Service - main application orchestrator.
//!
//! This service coordinates one generation run:
//! 1. Parse the field descriptor and entity name
//! 2. Resolve the Go module path
//! 3. Classify fields and build the entity model
//! 4. Emit artifacts per layer (templates + procedural blocks)
//! 5. Persist: replace per-entity files, merge shared files
//!
//! Descriptor errors abort before anything is rendered or written. Sibling
//! artifacts already written are not rolled back when a later one fails.

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ArtifactStore, TemplateOrigin, TemplateRenderer},
        services::{
            merge_writer::MergeWriter,
            report::{GenerationReport, WriteOutcome},
        },
    },
    domain::{
        ArtifactKind, ArtifactPath, EntityModel, EntityName, GeneratedArtifact, GenerationFlags,
        Layer, MergeBlock, codegen, module_from_go_mod, parse_fields, template_names,
        validate_module_path,
    },
    error::{Context, GocleanError, GocleanResult},
};

/// One entity's worth of generation input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub entity: String,
    /// Field descriptor (`name:type,...`).
    pub fields: String,
    pub layers: Vec<Layer>,
    pub flags: GenerationFlags,
    pub dry_run: bool,
}

impl GenerateRequest {
    /// Request for every layer with default flags.
    pub fn new(entity: impl Into<String>, fields: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: fields.into(),
            layers: Layer::ALL.to_vec(),
            flags: GenerationFlags::default(),
            dry_run: false,
        }
    }

    pub fn with_layers(mut self, layers: impl IntoIterator<Item = Layer>) -> Self {
        self.layers = layers.into_iter().collect();
        self
    }

    pub fn with_flags(mut self, flags: GenerationFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Requested layers, deduplicated, in generation order.
    fn ordered_layers(&self) -> Vec<Layer> {
        let mut layers = self.layers.clone();
        layers.sort();
        layers.dedup();
        layers
    }
}

/// An artifact the plan could not produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFailure {
    pub path: ArtifactPath,
    pub layer: Layer,
    pub template: String,
    pub reason: String,
}

/// Everything a run would write, in order.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationPlan {
    pub model: EntityModel,
    pub artifacts: Vec<GeneratedArtifact>,
    pub failures: Vec<PlannedFailure>,
}

/// Main generation service.
pub struct GenerateService {
    renderer: Box<dyn TemplateRenderer>,
    store: Box<dyn ArtifactStore>,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use goclean_core::application::{GenerateRequest, GenerateService};
    ///
    /// let service = GenerateService::new(
    ///     renderer, // impl TemplateRenderer
    ///     store,    // impl ArtifactStore
    /// );
    /// let report = service.generate(&GenerateRequest::new("Product", "name:string"))?;
    /// ```
    pub fn new(renderer: Box<dyn TemplateRenderer>, store: Box<dyn ArtifactStore>) -> Self {
        Self { renderer, store }
    }

    /// Parse, classify and emit every artifact for `request` without
    /// touching the store (other than reading `go.mod`).
    #[instrument(skip_all, fields(entity = %request.entity, layers = request.layers.len()))]
    pub fn plan(&self, request: &GenerateRequest) -> GocleanResult<GenerationPlan> {
        let layers = request.ordered_layers();
        if layers.is_empty() {
            return Err(ApplicationError::InvalidRequest("no layers selected".into()).into());
        }

        let entity = EntityName::parse(&request.entity)?;
        let fields = parse_fields(&request.fields)?;
        let module = self.resolve_module(&request.flags)?;
        let model = EntityModel::build(entity, &fields, &request.flags, &module)?;
        let context = serde_json::to_value(&model).context("serializing render context")?;

        info!(
            entity = %model.entity.pascal,
            fields = model.field_count(),
            search_methods = model.search_methods.len(),
            "Entity model built"
        );

        let mut plan = GenerationPlan {
            model,
            artifacts: Vec::new(),
            failures: Vec::new(),
        };

        for layer in layers {
            for emission in emissions(&plan.model, layer, &request.flags)? {
                match emission {
                    Emission::Template { name, path } => {
                        self.render_into(&mut plan, layer, name, path, &context)?;
                    }
                    Emission::Merge { path, block } => {
                        plan.artifacts
                            .push(GeneratedArtifact::merge(path, layer, block));
                    }
                }
            }
        }

        debug!(
            artifacts = plan.artifacts.len(),
            failures = plan.failures.len(),
            "Plan complete"
        );
        Ok(plan)
    }

    /// Plan and persist one entity.
    #[instrument(skip_all, fields(entity = %request.entity, dry_run = request.dry_run))]
    pub fn generate(&self, request: &GenerateRequest) -> GocleanResult<GenerationReport> {
        let plan = self.plan(request)?;
        let mut report = GenerationReport::new(plan.model.entity.pascal.clone(), request.dry_run);

        for failure in &plan.failures {
            report.push(
                failure.path.clone(),
                failure.layer,
                WriteOutcome::Failed(failure.reason.clone()),
            );
        }

        let merger = MergeWriter::new(self.store.as_ref());
        for artifact in &plan.artifacts {
            let outcome = match &artifact.kind {
                ArtifactKind::Replace => self.replace(artifact, request.dry_run)?,
                ArtifactKind::Merge(block) => {
                    merger.write(&artifact.path, block, request.dry_run)?
                }
            };
            debug!(path = %artifact.path, outcome = %outcome, "Artifact persisted");
            report.push(artifact.path.clone(), artifact.layer, outcome);
        }

        for warning in report.warnings() {
            warn!(path = %warning.path, "Declarations appended outside the expected structure");
        }
        info!(
            written = report.written(),
            total = report.entries.len(),
            "Generation completed"
        );
        Ok(report)
    }

    /// Run several requests strictly one after another.
    ///
    /// Every descriptor is validated before the first write, so a typo in
    /// the last entry does not leave earlier entities half-generated.
    #[instrument(skip_all, fields(count = requests.len()))]
    pub fn generate_batch(
        &self,
        requests: &[GenerateRequest],
    ) -> GocleanResult<Vec<GenerationReport>> {
        for request in requests {
            EntityName::parse(&request.entity)
                .and_then(|_| parse_fields(&request.fields))
                .map_err(|e| ApplicationError::BatchAborted {
                    entity: request.entity.clone(),
                    completed: 0,
                    reason: e.to_string(),
                })?;
        }

        let mut reports = Vec::with_capacity(requests.len());
        for request in requests {
            match self.generate(request) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!(entity = %request.entity, error = %e, "Batch entry failed");
                    return Err(ApplicationError::BatchAborted {
                        entity: request.entity.clone(),
                        completed: reports.len(),
                        reason: e.to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(reports)
    }

    /// Module path from the flags, else from `go.mod` in the store.
    pub fn resolve_module(&self, flags: &GenerationFlags) -> GocleanResult<String> {
        if let Some(module) = &flags.module {
            validate_module_path(module)?;
            return Ok(module.clone());
        }

        let go_mod = ArtifactPath::try_new("go.mod")?;
        match self.store.read(&go_mod)? {
            Some(content) => module_from_go_mod(&content).ok_or_else(|| {
                ApplicationError::ModuleUnresolved {
                    reason: "go.mod has no module directive".into(),
                }
                .into()
            }),
            None => Err(ApplicationError::ModuleUnresolved {
                reason: "no --module given and no go.mod in the target directory".into(),
            }
            .into()),
        }
    }

    /// Every template the renderer knows, with its origin.
    pub fn templates(&self) -> Vec<(String, Option<TemplateOrigin>)> {
        self.renderer
            .names()
            .into_iter()
            .map(|name| {
                let origin = self.renderer.origin(&name);
                (name, origin)
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn render_into(
        &self,
        plan: &mut GenerationPlan,
        layer: Layer,
        name: &'static str,
        path: ArtifactPath,
        context: &serde_json::Value,
    ) -> GocleanResult<()> {
        match self.renderer.render(name, context) {
            Ok(mut content) => {
                if !content.ends_with('\n') {
                    content.push('\n');
                }
                plan.artifacts
                    .push(GeneratedArtifact::replace(path, layer, name, content));
                Ok(())
            }
            Err(e) => match self.renderer.origin(name) {
                Some(TemplateOrigin::Custom(file)) => {
                    warn!(
                        template = name,
                        file = %file.display(),
                        error = %e,
                        "Custom template failed; skipping artifact"
                    );
                    plan.failures.push(PlannedFailure {
                        path,
                        layer,
                        template: name.to_string(),
                        reason: e.to_string(),
                    });
                    Ok(())
                }
                // A broken built-in is a packaging defect, not bad input.
                _ => Err(e),
            },
        }
    }

    fn replace(&self, artifact: &GeneratedArtifact, dry_run: bool) -> GocleanResult<WriteOutcome> {
        let outcome = match self.store.read(&artifact.path)? {
            None => WriteOutcome::Created,
            Some(existing) if existing == artifact.content => WriteOutcome::Unchanged,
            Some(_) => WriteOutcome::Overwritten,
        };
        if outcome.writes() && !dry_run {
            self.store.write(&artifact.path, &artifact.content)?;
        }
        Ok(outcome)
    }
}

enum Emission {
    Template {
        name: &'static str,
        path: ArtifactPath,
    },
    Merge {
        path: ArtifactPath,
        block: MergeBlock,
    },
}

/// Artifacts one layer contributes, in write order.
fn emissions(
    model: &EntityModel,
    layer: Layer,
    flags: &GenerationFlags,
) -> Result<Vec<Emission>, GocleanError> {
    let e = &model.entity;
    let naming = flags.file_naming;
    let path = |p: String| ArtifactPath::try_new(p).map_err(GocleanError::from);

    let out = match layer {
        Layer::Domain => {
            let stem = e.file_stem(naming);
            let mut out = vec![Emission::Template {
                name: template_names::DOMAIN_ENTITY,
                path: path(format!("internal/domain/{stem}.go"))?,
            }];
            if flags.validation {
                // Go only picks up tests from `_test.go`, whatever the naming.
                out.push(Emission::Template {
                    name: template_names::DOMAIN_ENTITY_TEST,
                    path: path(format!("internal/domain/{stem}_test.go"))?,
                });
            }
            out.push(Emission::Merge {
                path: path("internal/domain/errors.go".into())?,
                block: codegen::errors_block(model),
            });
            out
        }
        Layer::Dto => vec![Emission::Template {
            name: template_names::DTO_ENTITY,
            path: path(format!("internal/dto/{}.go", e.file_stem_with(naming, "dto")))?,
        }],
        Layer::Repository => vec![
            Emission::Template {
                name: template_names::REPOSITORY_ENTITY,
                path: path(format!(
                    "internal/repository/{}.go",
                    e.file_stem_with(naming, "repository")
                ))?,
            },
            Emission::Merge {
                path: path("internal/repository/repository.go".into())?,
                block: codegen::repository_interface_block(model),
            },
        ],
        Layer::Usecase => vec![
            Emission::Template {
                name: template_names::USECASE_ENTITY,
                path: path(format!(
                    "internal/usecase/{}.go",
                    e.file_stem_with(naming, "usecase")
                ))?,
            },
            Emission::Merge {
                path: path("internal/usecase/usecase.go".into())?,
                block: codegen::usecase_interface_block(model),
            },
        ],
        Layer::Handler => vec![Emission::Template {
            name: template_names::HANDLER_ENTITY,
            path: path(format!(
                "internal/handler/{}.go",
                e.file_stem_with(naming, "handler")
            ))?,
        }],
        Layer::Messages => vec![Emission::Merge {
            path: path("internal/messages/messages.go".into())?,
            block: codegen::messages_block(model),
        }],
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::MockTemplateRenderer;
    use crate::application::services::test_support::FakeStore;
    use crate::domain::{DomainError, FileNaming};

    /// Store handle the test keeps while the service owns a clone.
    #[derive(Clone, Default)]
    struct SharedStore(Arc<FakeStore>);

    impl ArtifactStore for SharedStore {
        fn read(&self, path: &ArtifactPath) -> GocleanResult<Option<String>> {
            self.0.read(path)
        }
        fn write(&self, path: &ArtifactPath, content: &str) -> GocleanResult<()> {
            self.0.write(path, content)
        }
        fn exists(&self, path: &ArtifactPath) -> bool {
            self.0.exists(path)
        }
    }

    fn echo_renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|name, ctx| Ok(format!("// {name} for {}", ctx["entity"]["pascal"])));
        renderer
            .expect_origin()
            .returning(|_| Some(TemplateOrigin::Builtin));
        renderer
    }

    fn service(renderer: MockTemplateRenderer) -> (GenerateService, SharedStore) {
        let store = SharedStore::default();
        store.0.insert("go.mod", "module github.com/acme/shop\n\ngo 1.22\n");
        (
            GenerateService::new(Box::new(renderer), Box::new(store.clone())),
            store,
        )
    }

    fn request(entity: &str, fields: &str) -> GenerateRequest {
        GenerateRequest::new(entity, fields)
    }

    #[test]
    fn all_layers_write_expected_paths() {
        let (svc, store) = service(echo_renderer());
        let report = svc
            .generate(&request("Product", "name:string,price:float64,email:string"))
            .unwrap();

        let expected = [
            "internal/domain/product.go",
            "internal/domain/product_test.go",
            "internal/domain/errors.go",
            "internal/dto/product_dto.go",
            "internal/repository/product_repository.go",
            "internal/repository/repository.go",
            "internal/usecase/product_usecase.go",
            "internal/usecase/usecase.go",
            "internal/handler/product_handler.go",
            "internal/messages/messages.go",
        ];
        for path in expected {
            assert_eq!(report.outcome_of(path), Some(&WriteOutcome::Created), "{path}");
            assert!(store.0.get(path).is_some(), "{path} missing");
        }
        assert_eq!(report.written(), expected.len());
        assert_eq!(
            store.0.get("internal/domain/product.go").unwrap(),
            "// domain/entity for \"Product\"\n"
        );
    }

    #[test]
    fn descriptor_errors_abort_before_rendering() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().times(0);
        let (svc, store) = service(renderer);

        let err = svc.generate(&request("Product", "name,price:float64")).unwrap_err();
        match err {
            GocleanError::Domain(DomainError::InvalidFieldDeclaration { position, .. }) => {
                assert_eq!(position, 1)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.0.writes(), 0);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let (svc, store) = service(echo_renderer());
        let req = request("User", "email:string,name:string");
        svc.generate(&req).unwrap();
        let snapshot: Vec<_> = store.0.paths().iter().map(|p| store.0.get(p)).collect();
        let writes = store.0.writes();

        let again = svc.generate(&req).unwrap();
        assert_eq!(again.written(), 0);
        assert_eq!(
            again.outcome_of("internal/domain/errors.go"),
            Some(&WriteOutcome::Skipped)
        );
        assert_eq!(
            again.outcome_of("internal/domain/user.go"),
            Some(&WriteOutcome::Unchanged)
        );
        let after: Vec<_> = store.0.paths().iter().map(|p| store.0.get(p)).collect();
        assert_eq!(snapshot, after);
        assert_eq!(store.0.writes(), writes);
    }

    #[test]
    fn second_entity_appends_to_shared_files() {
        let (svc, store) = service(echo_renderer());
        svc.generate(&request("User", "email:string")).unwrap();
        let users = store.0.get("internal/repository/repository.go").unwrap();

        let report = svc.generate(&request("Order", "code:string")).unwrap();
        assert_eq!(
            report.outcome_of("internal/repository/repository.go"),
            Some(&WriteOutcome::Appended)
        );
        let both = store.0.get("internal/repository/repository.go").unwrap();
        assert!(both.starts_with(users.trim_end()));
        assert!(both.contains("type OrderRepository interface"));
    }

    #[test]
    fn custom_template_failure_only_fails_that_artifact() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|name, _| {
            if name == template_names::DTO_ENTITY {
                Err(ApplicationError::RenderingFailed {
                    template: name.to_string(),
                    reason: "Variable \"nope\" not found".into(),
                }
                .into())
            } else {
                Ok(format!("// {name}\n"))
            }
        });
        renderer.expect_origin().returning(|name| {
            if name == template_names::DTO_ENTITY {
                Some(TemplateOrigin::Custom(PathBuf::from("tpl/dto/entity.tmpl")))
            } else {
                Some(TemplateOrigin::Builtin)
            }
        });
        let (svc, store) = service(renderer);

        let report = svc.generate(&request("User", "email:string")).unwrap();
        assert!(report.has_failures());
        assert!(matches!(
            report.outcome_of("internal/dto/user_dto.go"),
            Some(WriteOutcome::Failed(_))
        ));
        assert!(store.0.get("internal/dto/user_dto.go").is_none());
        assert!(store.0.get("internal/handler/user_handler.go").is_some());
    }

    #[test]
    fn builtin_template_failure_is_fatal() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|name, _| {
            Err(ApplicationError::RenderingFailed {
                template: name.to_string(),
                reason: "helper missing".into(),
            }
            .into())
        });
        renderer
            .expect_origin()
            .returning(|_| Some(TemplateOrigin::Builtin));
        let (svc, store) = service(renderer);

        let err = svc.generate(&request("User", "email:string")).unwrap_err();
        assert!(matches!(
            err,
            GocleanError::Application(ApplicationError::RenderingFailed { .. })
        ));
        assert_eq!(store.0.writes(), 0);
    }

    #[test]
    fn module_flag_wins_and_missing_module_fails() {
        let (svc, _) = service(echo_renderer());
        let flags = GenerationFlags::default().with_module("example.com/other");
        assert_eq!(svc.resolve_module(&flags).unwrap(), "example.com/other");
        assert_eq!(
            svc.resolve_module(&GenerationFlags::default()).unwrap(),
            "github.com/acme/shop"
        );

        let bare = GenerateService::new(Box::new(echo_renderer()), Box::new(FakeStore::default()));
        let err = bare.generate(&request("User", "email:string")).unwrap_err();
        assert!(matches!(
            err,
            GocleanError::Application(ApplicationError::ModuleUnresolved { .. })
        ));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let (svc, store) = service(echo_renderer());
        let report = svc
            .generate(&request("User", "email:string").dry_run(true))
            .unwrap();
        assert!(report.dry_run);
        assert_eq!(
            report.outcome_of("internal/messages/messages.go"),
            Some(&WriteOutcome::Created)
        );
        assert_eq!(store.0.writes(), 0);
    }

    #[test]
    fn layer_selection_and_naming() {
        let (svc, _) = service(echo_renderer());
        let flags = GenerationFlags {
            validation: false,
            file_naming: FileNaming::Kebab,
            ..GenerationFlags::default()
        };
        let req = request("OrderItem", "qty:int")
            .with_layers([Layer::Dto, Layer::Domain, Layer::Dto])
            .with_flags(flags);
        let plan = svc.plan(&req).unwrap();
        let paths: Vec<_> = plan.artifacts.iter().map(|a| a.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "internal/domain/order-item.go",
                "internal/domain/errors.go",
                "internal/dto/order-item-dto.go",
            ]
        );
    }

    #[test]
    fn empty_layer_list_is_rejected() {
        let (svc, _) = service(echo_renderer());
        let err = svc
            .plan(&request("User", "email:string").with_layers([]))
            .unwrap_err();
        assert!(err.is_user_error());
    }

    #[test]
    fn batch_validates_everything_first() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().times(0);
        let (svc, store) = service(renderer);

        let err = svc
            .generate_batch(&[
                request("User", "email:string"),
                request("Order", "total:money"),
            ])
            .unwrap_err();
        match err {
            GocleanError::Application(ApplicationError::BatchAborted {
                entity, completed, ..
            }) => {
                assert_eq!(entity, "Order");
                assert_eq!(completed, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.0.writes(), 0);
    }

    #[test]
    fn batch_runs_sequentially_over_shared_files() {
        let (svc, store) = service(echo_renderer());
        let reports = svc
            .generate_batch(&[
                request("User", "email:string"),
                request("Order", "code:string"),
                request("User", "email:string"),
            ])
            .unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(
            reports[2].outcome_of("internal/messages/messages.go"),
            Some(&WriteOutcome::Skipped)
        );
        let messages = store.0.get("internal/messages/messages.go").unwrap();
        assert_eq!(messages.matches("MsgUserCreated ").count(), 1);
        assert_eq!(messages.matches("MsgOrderCreated ").count(), 1);
    }
}
