//! Entity names and the render context handed to emitters.

use serde::Serialize;

use crate::domain::{
    classifier::{self, FieldPlan, SearchMethod},
    codegen::imports::ImportSet,
    error::DomainError,
    field::{FieldList, SystemField},
    flags::{FileNaming, GenerationFlags},
    naming,
    types::FieldType,
};

/// Every naming variant of an entity, computed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityName {
    pub raw: String,
    pub pascal: String,
    pub camel: String,
    pub snake: String,
    pub kebab: String,
    pub plural_pascal: String,
    pub plural_camel: String,
    pub plural_snake: String,
    pub plural_kebab: String,
    /// `camel`, safe to use as a Go parameter or variable name.
    pub var: String,
    /// Lowercase words separated by spaces (`order item`), for messages.
    pub human: String,
}

impl EntityName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidEntityName {
                name: raw.to_string(),
                reason: "name is empty".into(),
            });
        }
        if !naming::is_identifier(trimmed) {
            return Err(DomainError::InvalidEntityName {
                name: raw.to_string(),
                reason: "must start with a letter and contain only letters, digits, '_' or '-'"
                    .into(),
            });
        }

        let pascal = naming::to_pascal(trimmed);
        if pascal.is_empty() {
            return Err(DomainError::InvalidEntityName {
                name: raw.to_string(),
                reason: "name has no letters".into(),
            });
        }
        let plural_pascal = naming::to_plural(&pascal);

        Ok(Self {
            raw: trimmed.to_string(),
            camel: naming::to_camel(&pascal),
            snake: naming::to_snake(&pascal),
            kebab: naming::to_kebab(&pascal),
            plural_camel: naming::to_camel(&plural_pascal),
            plural_snake: naming::to_snake(&plural_pascal),
            plural_kebab: naming::to_kebab(&plural_pascal),
            var: classifier::param_name(&naming::to_camel(&pascal)),
            human: naming::split_words(&pascal)
                .iter()
                .map(|w| w.to_lowercase())
                .collect::<Vec<_>>()
                .join(" "),
            plural_pascal,
            pascal,
        })
    }

    /// Per-entity file stem in the given convention.
    pub fn file_stem(&self, naming: FileNaming) -> String {
        naming.apply(&self.pascal)
    }

    /// Per-entity file stem with a role suffix (`user_dto`, `user-dto`, `userDto`).
    pub fn file_stem_with(&self, naming: FileNaming, suffix: &str) -> String {
        naming.with_suffix(&self.pascal, suffix)
    }
}

/// Check a Go module path well enough to keep import lines valid.
pub fn validate_module_path(path: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidModulePath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if path.is_empty() {
        return Err(invalid("module path is empty"));
    }
    if path.starts_with('/') || path.ends_with('/') {
        return Err(invalid("module path must not start or end with '/'"));
    }
    if path.contains("//") {
        return Err(invalid("module path contains an empty segment"));
    }
    if path
        .chars()
        .any(|c| c.is_whitespace() || c == '"' || c == '\\' || c == '`')
    {
        return Err(invalid("module path contains whitespace or quotes"));
    }
    Ok(())
}

/// Module path declared by a `go.mod` file.
pub fn module_from_go_mod(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// Go-side validation for one field, rendered inside `Validate()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationCheck {
    pub field: String,
    /// Go boolean expression that is true when the value is invalid.
    pub condition: String,
    /// Go literal that trips the check, used by generated tests.
    pub invalid_literal: &'static str,
    pub message: String,
}

impl ValidationCheck {
    fn for_plan(plan: &FieldPlan, receiver: &str) -> Option<Self> {
        if plan.validation.is_empty() {
            return None;
        }
        let accessor = format!("{receiver}.{}", plan.name);
        let (condition, invalid_literal, message) = match plan.field_type {
            FieldType::String => (
                format!("strings.TrimSpace({accessor}) == \"\""),
                "\"\"",
                format!("{} is required", plan.snake),
            ),
            FieldType::Int | FieldType::Int64 | FieldType::Float32 | FieldType::Float64 => (
                format!("{accessor} < 0"),
                "-1",
                format!("{} must not be negative", plan.snake),
            ),
            FieldType::Timestamp => (
                format!("{accessor}.IsZero()"),
                "time.Time{}",
                format!("{} is required", plan.snake),
            ),
            FieldType::Uint | FieldType::Uint64 | FieldType::Bool | FieldType::Opaque => {
                return None;
            }
        };
        Some(Self {
            field: plan.name.clone(),
            condition,
            invalid_literal,
            message,
        })
    }
}

/// A classified user field with everything templates print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelField {
    #[serde(flatten)]
    pub plan: FieldPlan,
    /// 0-based position among user fields.
    pub index: usize,
    /// Domain struct tag (persistence + wire + validation).
    pub tag: String,
    /// DTO request tag (`json` + gin `binding`).
    pub request_tag: String,
    /// Sample Go literal for generated tests.
    pub sample: String,
}

/// Rendered import blocks for files whose imports depend on the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelImports {
    pub domain: String,
    pub domain_test: String,
    pub dto: String,
    pub repository: String,
    pub usecase: String,
}

/// Everything an emitter needs for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityModel {
    pub entity: EntityName,
    pub module: String,
    /// Single-letter Go receiver (`p` for `Product`).
    pub receiver: String,
    pub validation: bool,
    pub timestamps: bool,
    pub soft_delete: bool,
    pub leading: Vec<SystemField>,
    pub fields: Vec<ModelField>,
    pub trailing: Vec<SystemField>,
    pub search_methods: Vec<SearchMethod>,
    pub checks: Vec<ValidationCheck>,
    pub has_unique: bool,
    pub imports: ModelImports,
}

impl EntityModel {
    pub fn build(
        entity: EntityName,
        fields: &FieldList,
        flags: &GenerationFlags,
        module: &str,
    ) -> Result<Self, DomainError> {
        validate_module_path(module)?;

        let receiver = entity
            .camel
            .chars()
            .next()
            .map(|c| c.to_ascii_lowercase().to_string())
            .unwrap_or_else(|| "e".to_string());

        let plans = classifier::classify_all(fields);
        let search_methods: Vec<SearchMethod> =
            plans.iter().filter_map(FieldPlan::search_method).collect();
        let checks: Vec<ValidationCheck> = if flags.validation {
            plans
                .iter()
                .filter_map(|p| ValidationCheck::for_plan(p, &receiver))
                .collect()
        } else {
            Vec::new()
        };
        let has_unique = plans.iter().any(|p| p.unique);
        let has_time_field = plans.iter().any(|p| p.field_type == FieldType::Timestamp);
        let search_time = search_methods_use_time(&search_methods);

        let fields: Vec<ModelField> = plans
            .into_iter()
            .enumerate()
            .map(|(index, plan)| {
                let mut request_tag = format!(r#"json:"{}""#, plan.snake);
                if flags.validation && !plan.validation.is_empty() {
                    request_tag.push_str(&format!(r#" binding:"{}""#, plan.validation));
                }
                ModelField {
                    index,
                    tag: plan.tag(flags.validation),
                    request_tag,
                    sample: (plan.def().sample)(index),
                    plan,
                }
            })
            .collect();

        let imports = ModelImports {
            domain: domain_imports(&checks, has_time_field, flags).render(),
            domain_test: test_imports(&checks, has_time_field).render(),
            dto: dto_imports(module, has_time_field, flags).render(),
            repository: repository_imports(module, search_time).render(),
            usecase: usecase_imports(module, search_time).render(),
        };

        Ok(Self {
            entity,
            module: module.to_string(),
            receiver,
            validation: flags.validation,
            timestamps: flags.timestamps,
            soft_delete: flags.soft_delete,
            leading: SystemField::leading(),
            fields,
            trailing: SystemField::trailing(flags),
            search_methods,
            checks,
            has_unique,
            imports,
        })
    }

    /// Struct field count including system-managed fields.
    pub fn field_count(&self) -> usize {
        self.leading.len() + self.fields.len() + self.trailing.len()
    }
}

fn domain_imports(checks: &[ValidationCheck], has_time: bool, flags: &GenerationFlags) -> ImportSet {
    let mut set = ImportSet::default();
    if !checks.is_empty() {
        set.std("fmt");
    }
    if checks.iter().any(|c| c.condition.starts_with("strings.")) {
        set.std("strings");
    }
    if has_time || flags.timestamps {
        set.std("time");
    }
    if flags.soft_delete {
        set.external("gorm.io/gorm");
    }
    set
}

fn test_imports(checks: &[ValidationCheck], has_time: bool) -> ImportSet {
    let mut set = ImportSet::default();
    if !checks.is_empty() {
        set.std("errors");
    }
    set.std("testing");
    if has_time {
        set.std("time");
    }
    set
}

fn dto_imports(module: &str, has_time: bool, flags: &GenerationFlags) -> ImportSet {
    let mut set = ImportSet::default();
    if has_time || flags.timestamps {
        set.std("time");
    }
    set.external(format!("{module}/internal/domain"));
    set
}

fn repository_imports(module: &str, search_time: bool) -> ImportSet {
    let mut set = ImportSet::default();
    set.std("context");
    set.std("errors");
    if search_time {
        set.std("time");
    }
    set.external("gorm.io/gorm");
    set.external(format!("{module}/internal/domain"));
    set
}

fn usecase_imports(module: &str, search_time: bool) -> ImportSet {
    let mut set = ImportSet::default();
    set.std("context");
    if search_time {
        set.std("time");
    }
    set.external(format!("{module}/internal/domain"));
    set.external(format!("{module}/internal/dto"));
    set.external(format!("{module}/internal/repository"));
    set
}

fn search_methods_use_time(methods: &[SearchMethod]) -> bool {
    methods.iter().any(|m| m.go_type == "time.Time")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::parse_fields;

    fn model(dsl: &str, flags: &GenerationFlags) -> EntityModel {
        let name = EntityName::parse("Product").unwrap();
        EntityModel::build(name, &parse_fields(dsl).unwrap(), flags, "github.com/acme/shop")
            .unwrap()
    }

    #[test]
    fn entity_name_variants() {
        let name = EntityName::parse("order_item").unwrap();
        assert_eq!(name.pascal, "OrderItem");
        assert_eq!(name.camel, "orderItem");
        assert_eq!(name.plural_snake, "order_items");
        assert_eq!(name.plural_kebab, "order-items");
        assert_eq!(name.human, "order item");
        assert_eq!(name.file_stem(FileNaming::Kebab), "order-item");
        assert_eq!(name.file_stem_with(FileNaming::Camel, "dto"), "orderItemDto");

        let category = EntityName::parse("Category").unwrap();
        assert_eq!(category.plural_pascal, "Categories");
        assert_eq!(EntityName::parse("Type").unwrap().var, "typeValue");
        assert_eq!(EntityName::parse("Domain").unwrap().var, "domainValue");
        assert_eq!(EntityName::parse("Error").unwrap().var, "errorValue");
    }

    #[test]
    fn entity_name_rejects_garbage() {
        assert!(EntityName::parse("").is_err());
        assert!(EntityName::parse("1st").is_err());
        assert!(EntityName::parse("my entity!").is_err());
    }

    #[test]
    fn module_path_checks() {
        assert!(validate_module_path("github.com/acme/shop").is_ok());
        assert!(validate_module_path("shop").is_ok());
        assert!(validate_module_path("").is_err());
        assert!(validate_module_path("/abs").is_err());
        assert!(validate_module_path("has space/x").is_err());
    }

    #[test]
    fn go_mod_module_line() {
        let go_mod = "// shop service\nmodule github.com/acme/shop // main\n\ngo 1.22\n";
        assert_eq!(module_from_go_mod(go_mod).as_deref(), Some("github.com/acme/shop"));
        assert_eq!(module_from_go_mod("module \"example.com/x\"\n").as_deref(), Some("example.com/x"));
        assert_eq!(module_from_go_mod("go 1.22\n"), None);
        assert_eq!(module_from_go_mod("modules x\n"), None);
    }

    #[test]
    fn scenario_product_has_four_fields() {
        let m = model("name:string,price:float64,email:string", &GenerationFlags::default());
        assert_eq!(m.field_count(), 4);
        assert_eq!(m.receiver, "p");

        let email = m.fields.iter().find(|f| f.plan.name == "Email").unwrap();
        assert!(email.plan.searchable && email.plan.unique);
        let price = m.fields.iter().find(|f| f.plan.name == "Price").unwrap();
        assert!(!price.plan.searchable);

        let conditions: Vec<_> = m.checks.iter().map(|c| c.condition.as_str()).collect();
        assert!(conditions.contains(&"strings.TrimSpace(p.Name) == \"\""));
        assert!(conditions.contains(&"p.Price < 0"));
    }

    #[test]
    fn validation_off_drops_checks_and_tags() {
        let flags = GenerationFlags {
            validation: false,
            ..GenerationFlags::default()
        };
        let m = model("name:string", &flags);
        assert!(m.checks.is_empty());
        assert!(!m.fields[0].tag.contains("validate"));
        assert!(!m.fields[0].request_tag.contains("binding"));
        assert!(!m.imports.domain.contains("fmt"));
    }

    #[test]
    fn imports_follow_fields_and_flags() {
        let flags = GenerationFlags {
            timestamps: true,
            soft_delete: true,
            ..GenerationFlags::default()
        };
        let m = model("title:string,qty:uint", &flags);
        assert!(m.imports.domain.contains("\"time\""));
        assert!(m.imports.domain.contains("\"gorm.io/gorm\""));
        assert!(m.imports.domain.contains("\"strings\""));
        assert!(m.imports.dto.contains("\"github.com/acme/shop/internal/domain\""));
        assert_eq!(m.trailing.len(), 3);
        assert!(m.imports.repository.contains("\"gorm.io/gorm\""));
        assert!(m.imports.usecase.contains("\"github.com/acme/shop/internal/repository\""));
        assert!(!m.imports.usecase.contains("\"time\""));
    }

    #[test]
    fn samples_are_indexed_by_field_order() {
        let m = model("name:string,title:string", &GenerationFlags::default());
        assert_eq!(m.fields[0].sample, "\"sample-1\"");
        assert_eq!(m.fields[1].sample, "\"sample-2\"");
    }

    #[test]
    fn context_serializes_flattened_fields() {
        let m = model("email:string", &GenerationFlags::default());
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["fields"][0]["name"], "Email");
        assert_eq!(value["fields"][0]["unique"], true);
        assert_eq!(value["entity"]["plural_kebab"], "products");
        assert_eq!(value["search_methods"][0]["method_name"], "FindByEmail");
    }
}
