//! Heuristic field classifier.
//!
//! `classify` is a pure function of a field's name and type. It decides the
//! validation rule, the persistence column, and whether the field warrants a
//! lookup accessor (searchable) that returns a single row (unique).
//!
//! The heuristics prefer missing an accessor over generating one with the
//! wrong cardinality, so anything ambiguous is searchable-but-not-unique or
//! not searchable at all.

use std::fmt;

use serde::Serialize;

use crate::domain::{
    field::Field,
    naming,
    types::{FieldType, TypeDef},
};

/// Commonly queried business terms (snake_case).
const SEARCH_DICTIONARY: &[&str] = &[
    "email",
    "username",
    "code",
    "slug",
    "phone",
    "national_id",
    "title",
    "name",
];

/// Identity-like terms; always a subset of [`SEARCH_DICTIONARY`].
const UNIQUE_NAMES: &[&str] = &["email", "username", "code", "slug", "national_id"];

/// Free-text, secret or binary names that never get an accessor on type alone.
const SEARCH_DENYLIST: &[&str] = &[
    "notes",
    "note",
    "description",
    "content",
    "body",
    "bio",
    "summary",
    "comment",
    "comments",
    "password",
    "password_hash",
    "secret",
    "token",
    "data",
    "payload",
    "blob",
    "metadata",
    "avatar",
    "image",
    "file",
];

/// Names a generated parameter or local must not take: Go keywords,
/// predeclared identifiers, packages the generated files import, and the
/// receivers and locals the templates already bind.
const RESERVED_PARAMS: &[&str] = &[
    // keywords
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
    // predeclared
    "any", "append", "bool", "byte", "cap", "close", "copy", "delete", "error", "false",
    "float32", "float64", "int", "int64", "iota", "len", "make", "new", "nil", "panic",
    "rune", "string", "true", "uint",
    // imported packages
    "context", "domain", "dto", "errors", "fmt", "gin", "gorm", "http", "messages",
    "repository", "strconv", "strings", "time", "usecase",
    // receivers and locals
    "c", "ctx", "db", "err", "g", "h", "id", "limit", "offset", "page", "r", "req", "rg", "u",
];

/// How many rows a lookup accessor returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    One,
    Many,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => f.write_str("one"),
            Self::Many => f.write_str("many"),
        }
    }
}

/// A derived lookup accessor, recomputed on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMethod {
    pub method_name: String,
    pub field_name: String,
    /// `lowerCamel` parameter name.
    pub param_name: String,
    pub column: String,
    pub field_type: FieldType,
    pub go_type: &'static str,
    pub cardinality: Cardinality,
    /// Convenience flag for templates (`cardinality == One`).
    pub one: bool,
}

/// Classification result for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPlan {
    pub name: String,
    pub snake: String,
    pub camel: String,
    pub field_type: FieldType,
    pub go_type: &'static str,
    pub zero_value: &'static str,
    /// Validator rule; empty when the type has none.
    pub validation: &'static str,
    /// Full GORM column definition without the `gorm:""` wrapper.
    pub column: String,
    pub searchable: bool,
    pub unique: bool,
}

impl FieldPlan {
    /// Serialized persistence + wire + validation tag bundle.
    pub fn tag(&self, validation: bool) -> String {
        let mut tag = format!(r#"gorm:"{}" json:"{}""#, self.column, self.snake);
        if validation && !self.validation.is_empty() {
            tag.push_str(&format!(r#" validate:"{}""#, self.validation));
        }
        tag
    }

    pub fn search_method(&self) -> Option<SearchMethod> {
        if !self.searchable {
            return None;
        }
        let (method_name, cardinality) = if self.unique {
            (format!("FindBy{}", self.name), Cardinality::One)
        } else {
            (format!("FindAllBy{}", self.name), Cardinality::Many)
        };
        Some(SearchMethod {
            method_name,
            field_name: self.name.clone(),
            param_name: param_name(&self.camel),
            column: self.snake.clone(),
            field_type: self.field_type,
            go_type: self.go_type,
            cardinality,
            one: cardinality == Cardinality::One,
        })
    }

    pub fn def(&self) -> &'static TypeDef {
        self.field_type.def()
    }
}

/// Classify one field. Depends only on the field's name and type.
pub fn classify(field: &Field) -> FieldPlan {
    let def = field.field_type.def();
    let snake = naming::to_snake(&field.name);

    let in_dictionary = SEARCH_DICTIONARY.contains(&snake.as_str());
    let by_type = def.searchable && !SEARCH_DENYLIST.contains(&snake.as_str());
    let searchable = in_dictionary || by_type;
    let unique = searchable && UNIQUE_NAMES.contains(&snake.as_str());

    let mut column = format!("column:{snake};{}", def.column);
    if unique {
        column.push_str(";uniqueIndex");
    }

    FieldPlan {
        name: field.name.clone(),
        camel: naming::to_camel(&field.name),
        snake,
        field_type: field.field_type,
        go_type: def.go_type,
        zero_value: def.zero_value,
        validation: def.validation,
        column,
        searchable,
        unique,
    }
}

/// `camel` as a Go parameter name, suffixed when it would shadow a keyword.
pub(crate) fn param_name(camel: &str) -> String {
    if RESERVED_PARAMS.contains(&camel) {
        format!("{camel}Value")
    } else {
        camel.to_string()
    }
}

/// Classify every field, preserving order.
pub fn classify_all<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Vec<FieldPlan> {
    fields.into_iter().map(classify).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::parse_fields;

    fn plan(name: &str, ty: FieldType) -> FieldPlan {
        classify(&Field::new(name, ty))
    }

    #[test]
    fn email_is_searchable_and_unique() {
        let p = plan("Email", FieldType::String);
        assert!(p.searchable);
        assert!(p.unique);
        let method = p.search_method().unwrap();
        assert_eq!(method.method_name, "FindByEmail");
        assert_eq!(method.cardinality, Cardinality::One);
    }

    #[test]
    fn notes_classifies_by_dictionary_only() {
        let p = plan("Notes", FieldType::String);
        assert!(!p.searchable);
        assert!(!p.unique);
        assert!(p.search_method().is_none());
    }

    #[test]
    fn classification_ignores_list_order() {
        let a = parse_fields("notes:string,email:string,name:string").unwrap();
        let b = parse_fields("name:string,email:string,notes:string").unwrap();
        let mut left = classify_all(&a);
        let mut right = classify_all(&b);
        left.sort_by(|x, y| x.name.cmp(&y.name));
        right.sort_by(|x, y| x.name.cmp(&y.name));
        assert_eq!(left, right);
    }

    #[test]
    fn price_float_is_not_searchable() {
        let p = plan("Price", FieldType::Float64);
        assert!(!p.searchable);
        assert_eq!(p.validation, "required,gte=0");
    }

    #[test]
    fn dictionary_terms_win_over_type() {
        // Phone numbers stored as int64 still get an accessor.
        let p = plan("Phone", FieldType::Int64);
        assert!(p.searchable);
        assert!(!p.unique);
        assert_eq!(p.search_method().unwrap().method_name, "FindAllByPhone");
    }

    #[test]
    fn name_variants_normalize_before_lookup() {
        for name in ["NationalID", "NationalId"] {
            let p = plan(name, FieldType::String);
            assert!(p.unique, "{name}");
        }
    }

    #[test]
    fn type_route_covers_string_int_uint() {
        assert!(plan("Category", FieldType::String).searchable);
        assert!(plan("Stock", FieldType::Int).searchable);
        assert!(plan("OwnerID", FieldType::Uint).searchable);
        assert!(!plan("Active", FieldType::Bool).searchable);
        assert!(!plan("Photo", FieldType::Opaque).searchable);
        assert!(!plan("Password", FieldType::String).searchable);
    }

    #[test]
    fn unique_is_subset_of_searchable() {
        let list = parse_fields(
            "email:string,username:string,code:int64,slug:string,phone:string,title:string,notes:string,payload:bytes",
        )
        .unwrap();
        for p in classify_all(&list) {
            assert!(!p.unique || p.searchable, "{}", p.name);
        }
    }

    #[test]
    fn keyword_params_are_renamed() {
        let method = plan("Type", FieldType::String).search_method().unwrap();
        assert_eq!(method.method_name, "FindAllByType");
        assert_eq!(method.param_name, "typeValue");
    }

    #[test]
    fn params_never_shadow_packages_or_receivers() {
        for name in ["domain", "errors", "time", "r", "u", "h", "c", "nil", "error"] {
            assert_eq!(param_name(name), format!("{name}Value"));
        }
        assert_eq!(param_name("email"), "email");
        assert_eq!(plan("R", FieldType::String).search_method().unwrap().param_name, "rValue");
    }

    #[test]
    fn tag_bundle_follows_validation_flag() {
        let p = plan("Email", FieldType::String);
        assert_eq!(
            p.tag(true),
            r#"gorm:"column:email;type:varchar(255);not null;uniqueIndex" json:"email" validate:"required,min=1""#
        );
        assert_eq!(
            p.tag(false),
            r#"gorm:"column:email;type:varchar(255);not null;uniqueIndex" json:"email""#
        );
        let flag = plan("Active", FieldType::Bool);
        assert!(!flag.tag(true).contains("validate"));
    }
}
