//! Merge blocks for the shared files every entity contributes to.
//!
//! | File | Marker |
//! |------|--------|
//! | `internal/domain/errors.go` | `Err<Entity>NotFound` |
//! | `internal/messages/messages.go` | `Msg<Entity>Created` |
//! | `internal/repository/repository.go` | `<Entity>Repository interface` |
//! | `internal/usecase/usecase.go` | `<Entity>Usecase interface` |
//!
//! Each indented line of a block (an error, a message, an interface method)
//! is also checked on its own, so re-running an entity with new fields adds
//! what its earlier run did not declare.

use crate::domain::{
    artifact::{MergeBlock, MergeLayout},
    classifier::Cardinality,
    codegen::{imports::ImportSet, writer::GoWriter},
    entity::EntityModel,
};

/// Sentinel errors in `package domain`.
pub fn errors_block(model: &EntityModel) -> MergeBlock {
    let e = &model.entity;
    let mut rows = vec![
        (
            format!("Err{}NotFound", e.pascal),
            format!("errors.New(\"{} not found\")", e.human),
        ),
        (
            format!("ErrInvalid{}", e.pascal),
            format!("errors.New(\"invalid {}\")", e.human),
        ),
    ];
    if model.has_unique {
        rows.push((
            format!("Err{}AlreadyExists", e.pascal),
            format!("errors.New(\"{} already exists\")", e.human),
        ));
    }

    let mut w = GoWriter::with_depth(1);
    w.comment(&e.pascal).aligned(&rows);

    MergeBlock {
        layout: MergeLayout {
            header: "package domain\n\nimport \"errors\"\n\nvar (\n".into(),
            opener: "var (\n".into(),
            closer: ")\n".into(),
        },
        marker: format!("Err{}NotFound", e.pascal),
        declarations: w.finish(),
        imports: vec!["errors".into()],
    }
}

/// User-facing response messages in `package messages`.
pub fn messages_block(model: &EntityModel) -> MergeBlock {
    let e = &model.entity;
    let plural = e.plural_snake.replace('_', " ");

    let rows = [
        (format!("Msg{}Created", e.pascal), format!("\"{} created successfully\"", e.human)),
        (format!("Msg{}Fetched", e.pascal), format!("\"{} retrieved successfully\"", e.human)),
        (format!("Msg{}Listed", e.pascal), format!("\"{plural} retrieved successfully\"")),
        (format!("Msg{}Updated", e.pascal), format!("\"{} updated successfully\"", e.human)),
        (format!("Msg{}Deleted", e.pascal), format!("\"{} deleted successfully\"", e.human)),
        (format!("Msg{}NotFound", e.pascal), format!("\"{} not found\"", e.human)),
    ];

    let mut w = GoWriter::with_depth(1);
    w.comment(&e.pascal).aligned(&rows);

    MergeBlock {
        layout: MergeLayout {
            header: "package messages\n\n// Response messages shared by HTTP handlers.\nconst (\n"
                .into(),
            opener: "const (\n".into(),
            closer: ")\n".into(),
        },
        marker: format!("Msg{}Created", e.pascal),
        declarations: w.finish(),
        imports: Vec::new(),
    }
}

/// Persistence port for one entity in `package repository`.
pub fn repository_interface_block(model: &EntityModel) -> MergeBlock {
    let e = &model.entity;
    let entity_type = format!("domain.{}", e.pascal);

    let mut w = GoWriter::new();
    w.comment(format!("{}Repository persists {entity_type} values.", e.pascal))
        .open(format!("type {}Repository interface {{", e.pascal))
        .line(format!("Create(ctx context.Context, {} *{entity_type}) error", e.var))
        .line(format!("FindByID(ctx context.Context, id uint) (*{entity_type}, error)"))
        .line(format!(
            "FindAll(ctx context.Context, offset, limit int) ([]{entity_type}, error)"
        ))
        .line(format!("Update(ctx context.Context, {} *{entity_type}) error", e.var))
        .line("Delete(ctx context.Context, id uint) error");
    for method in &model.search_methods {
        let ret = match method.cardinality {
            Cardinality::One => format!("*{entity_type}"),
            Cardinality::Many => format!("[]{entity_type}"),
        };
        w.line(format!(
            "{}(ctx context.Context, {} {}) ({ret}, error)",
            method.method_name, method.param_name, method.go_type
        ));
    }
    w.close("}");

    let mut imports = ImportSet::default();
    imports.std("context");
    imports.external(format!("{}/internal/domain", model.module));
    if model.search_methods.iter().any(|m| m.go_type == "time.Time") {
        imports.std("time");
    }

    MergeBlock {
        layout: MergeLayout {
            header: format!("package repository\n\n{}", imports.render()),
            opener: String::new(),
            closer: String::new(),
        },
        marker: format!("{}Repository interface", e.pascal),
        declarations: w.finish(),
        imports: imports.paths().map(str::to_string).collect(),
    }
}

/// Application port for one entity in `package usecase`.
pub fn usecase_interface_block(model: &EntityModel) -> MergeBlock {
    let e = &model.entity;
    let response = format!("dto.{}Response", e.pascal);

    let mut w = GoWriter::new();
    w.comment(format!(
        "{}Usecase exposes {} operations to transport layers.",
        e.pascal, e.human
    ))
    .open(format!("type {}Usecase interface {{", e.pascal))
    .line(format!(
        "Create(ctx context.Context, req dto.Create{}Request) (*{response}, error)",
        e.pascal
    ))
    .line(format!("GetByID(ctx context.Context, id uint) (*{response}, error)"))
    .line(format!(
        "List(ctx context.Context, page, pageSize int) ([]{response}, error)"
    ))
    .line(format!(
        "Update(ctx context.Context, id uint, req dto.Update{}Request) (*{response}, error)",
        e.pascal
    ))
    .line("Delete(ctx context.Context, id uint) error");
    for method in &model.search_methods {
        let ret = match method.cardinality {
            Cardinality::One => format!("*{response}"),
            Cardinality::Many => format!("[]{response}"),
        };
        w.line(format!(
            "{}(ctx context.Context, {} {}) ({ret}, error)",
            method.method_name, method.param_name, method.go_type
        ));
    }
    w.close("}");

    let mut imports = ImportSet::default();
    imports.std("context");
    imports.external(format!("{}/internal/dto", model.module));
    if model.search_methods.iter().any(|m| m.go_type == "time.Time") {
        imports.std("time");
    }

    MergeBlock {
        layout: MergeLayout {
            header: format!("package usecase\n\n{}", imports.render()),
            opener: String::new(),
            closer: String::new(),
        },
        marker: format!("{}Usecase interface", e.pascal),
        declarations: w.finish(),
        imports: imports.paths().map(str::to_string).collect(),
    }
}
