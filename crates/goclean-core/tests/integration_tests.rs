//! Integration tests for goclean-core through its public API.
//!
//! Ports are satisfied by small in-test doubles so these tests exercise
//! orchestration and merging without any real templates.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use goclean_core::application::{TemplateOrigin, TemplateRenderer};
use goclean_core::domain::template_names;
use goclean_core::prelude::*;
use serde_json::Value;

#[derive(Clone, Default)]
struct SharedFiles(Arc<Mutex<BTreeMap<String, String>>>);

impl SharedFiles {
    fn get(&self, path: &str) -> Option<String> {
        self.0.lock().unwrap().get(path).cloned()
    }

    fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl ArtifactStore for SharedFiles {
    fn read(&self, path: &ArtifactPath) -> GocleanResult<Option<String>> {
        Ok(self.get(path.as_str()))
    }

    fn write(&self, path: &ArtifactPath, content: &str) -> GocleanResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(path.as_str().to_string(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &ArtifactPath) -> bool {
        self.get(path.as_str()).is_some()
    }
}

/// Emits one comment line naming the template and entity.
struct EchoRenderer;

impl TemplateRenderer for EchoRenderer {
    fn render(&self, name: &str, context: &Value) -> GocleanResult<String> {
        let entity = context["entity"]["pascal"].as_str().unwrap_or("?");
        let module = context["module"].as_str().unwrap_or("?");
        Ok(format!("// {name} {entity} {module}\n"))
    }

    fn origin(&self, name: &str) -> Option<TemplateOrigin> {
        template_names::ALL
            .contains(&name)
            .then_some(TemplateOrigin::Builtin)
    }

    fn names(&self) -> Vec<String> {
        template_names::ALL.iter().map(|n| n.to_string()).collect()
    }
}

fn service_with_go_mod() -> (GenerateService, SharedFiles) {
    let files = SharedFiles::default();
    files
        .write(
            &ArtifactPath::try_new("go.mod").unwrap(),
            "module example.com/shop\n\ngo 1.22\n",
        )
        .unwrap();
    let service = GenerateService::new(Box::new(EchoRenderer), Box::new(files.clone()));
    (service, files)
}

#[test]
fn full_generation_workflow() {
    let (service, files) = service_with_go_mod();
    let request = GenerateRequest::new("Product", "name:string,price:float64,email:string");

    let report = service.generate(&request).unwrap();

    assert_eq!(report.entries.len(), 10);
    assert_eq!(report.written(), 10);
    assert_eq!(files.len(), 11);
    assert_eq!(
        files.get("internal/dto/product_dto.go").unwrap(),
        "// dto/entity Product example.com/shop\n"
    );

    let repository = files.get("internal/repository/repository.go").unwrap();
    assert!(repository.starts_with("package repository"));
    assert!(repository.contains("\"example.com/shop/internal/domain\""));
    assert!(repository.contains("FindByEmail(ctx context.Context, email string) (*domain.Product, error)"));
    assert!(repository.contains("FindAllByName(ctx context.Context, name string) ([]domain.Product, error)"));
}

#[test]
fn rerun_is_a_no_op() {
    let (service, files) = service_with_go_mod();
    let request = GenerateRequest::new("Product", "name:string,email:string");
    service.generate(&request).unwrap();
    let errors_before = files.get("internal/domain/errors.go").unwrap();

    let report = service.generate(&request).unwrap();

    assert_eq!(report.written(), 0);
    assert!(report.entries.iter().all(|e| matches!(
        e.outcome,
        WriteOutcome::Unchanged | WriteOutcome::Skipped
    )));
    assert_eq!(files.get("internal/domain/errors.go").unwrap(), errors_before);
}

#[test]
fn shared_files_accumulate_entities() {
    let (service, files) = service_with_go_mod();
    service
        .generate(&GenerateRequest::new("Product", "name:string"))
        .unwrap();
    let report = service
        .generate(&GenerateRequest::new("Customer", "email:string"))
        .unwrap();

    assert_eq!(
        report.outcome_of("internal/messages/messages.go"),
        Some(&WriteOutcome::Appended)
    );
    let messages = files.get("internal/messages/messages.go").unwrap();
    assert!(messages.contains("MsgProductCreated"));
    assert!(messages.contains("MsgCustomerCreated"));
    assert_eq!(messages.matches("const (").count(), 1);
    assert!(messages.trim_end().ends_with(')'));
}

#[test]
fn rerun_with_added_field_extends_shared_declarations() {
    let (service, files) = service_with_go_mod();
    service
        .generate(&GenerateRequest::new("Product", "price:float64"))
        .unwrap();
    assert!(!files.get("internal/domain/errors.go").unwrap().contains("AlreadyExists"));

    let report = service
        .generate(&GenerateRequest::new("Product", "price:float64,email:string"))
        .unwrap();

    for shared in [
        "internal/domain/errors.go",
        "internal/repository/repository.go",
        "internal/usecase/usecase.go",
    ] {
        assert_eq!(report.outcome_of(shared), Some(&WriteOutcome::Extended), "{shared}");
    }
    let errors = files.get("internal/domain/errors.go").unwrap();
    assert_eq!(errors.matches("ErrProductNotFound").count(), 1);
    assert!(errors.contains("ErrProductAlreadyExists"));
    let repository = files.get("internal/repository/repository.go").unwrap();
    assert_eq!(repository.matches("type ProductRepository interface").count(), 1);
    assert!(repository.contains("\tFindByEmail(ctx context.Context, email string) (*domain.Product, error)\n"));

    let again = service
        .generate(&GenerateRequest::new("Product", "price:float64,email:string"))
        .unwrap();
    assert_eq!(again.written(), 0);
}

#[test]
fn later_entity_adds_the_imports_it_needs() {
    let (service, files) = service_with_go_mod();
    service
        .generate(&GenerateRequest::new("User", "email:string"))
        .unwrap();
    assert!(!files.get("internal/repository/repository.go").unwrap().contains("\"time\""));

    service
        .generate(&GenerateRequest::new("Event", "code:timestamp"))
        .unwrap();

    for shared in ["internal/repository/repository.go", "internal/usecase/usecase.go"] {
        let content = files.get(shared).unwrap();
        assert!(content.contains("\t\"context\"\n\t\"time\"\n"), "{shared}:\n{content}");
        assert!(content.contains("FindByCode(ctx context.Context, code time.Time)"));
        assert_eq!(content.matches("import (").count(), 1);
    }
}

#[test]
fn plan_reads_but_never_writes() {
    let (service, files) = service_with_go_mod();
    let request = GenerateRequest::new("Product", "name:string").with_layers([Layer::Domain]);

    let plan = service.plan(&request).unwrap();

    assert_eq!(plan.model.field_count(), 2);
    assert_eq!(plan.artifacts.len(), 3);
    assert!(plan.failures.is_empty());
    assert_eq!(files.len(), 1);
}

#[test]
fn descriptor_error_stops_before_rendering() {
    let (service, files) = service_with_go_mod();
    let err = service
        .generate(&GenerateRequest::new("Product", "name:string,price"))
        .unwrap_err();

    assert!(err.is_user_error());
    assert_eq!(files.len(), 1);
}
