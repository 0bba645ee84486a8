//! Field type registry.
//!
//! # Design
//!
//! Every type the DSL accepts is described exactly once by a [`TypeDef`] in
//! [`TYPE_REGISTRY`]. Zero values, validation rules, column defaults, sample
//! literals and the searchability predicate all derive from that record.
//!
//! # Adding a New Type
//!
//! 1. Add a variant to [`FieldType`]
//! 2. Add one [`TypeDef`] entry to [`TYPE_REGISTRY`]
//! 3. Parser, classifier and emitters pick it up from the registry

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// The closed set of field types the DSL understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Int,
    Int64,
    Uint,
    Uint64,
    Float32,
    Float64,
    Bool,
    Timestamp,
    Opaque,
}

impl FieldType {
    /// Canonical DSL token for this type.
    pub fn as_str(self) -> &'static str {
        self.def().name
    }

    /// Capability record for this type.
    pub fn def(self) -> &'static TypeDef {
        // Registry integrity is asserted by tests; every variant has a row.
        TYPE_REGISTRY
            .iter()
            .find(|def| def.field_type == self)
            .unwrap_or(&TYPE_REGISTRY[0])
    }

    pub fn go_type(self) -> &'static str {
        self.def().go_type
    }

    pub fn zero_value(self) -> &'static str {
        self.def().zero_value
    }

    pub fn validation_rule(self) -> &'static str {
        self.def().validation
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Int | Self::Int64 | Self::Uint | Self::Uint64 | Self::Float32 | Self::Float64
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = DomainError;

    /// Case-sensitive lookup by canonical name or alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s).map(|def| def.field_type).ok_or_else(|| {
            DomainError::UnsupportedType {
                position: 0,
                token: s.to_string(),
                suggestions: suggest(s),
            }
        })
    }
}

/// Everything the generator needs to know about one field type.
#[derive(Debug, Clone, Copy)]
pub struct TypeDef {
    pub field_type: FieldType,

    /// Canonical DSL token.
    pub name: &'static str,

    /// Extra DSL tokens accepted for this type.
    pub aliases: &'static [&'static str],

    pub go_type: &'static str,

    /// Go literal for the zero value.
    pub zero_value: &'static str,

    /// go-playground/validator rule; empty means "no rule".
    pub validation: &'static str,

    /// GORM column options appended after `column:<name>`.
    pub column: &'static str,

    /// Go import this type drags into a file, if any.
    pub import: Option<&'static str>,

    /// Whether a field of this type may get a lookup accessor on type alone.
    pub searchable: bool,

    /// Sample Go literal for the field at `index` in the list.
    pub sample: fn(usize) -> String,
}

pub static TYPE_REGISTRY: &[TypeDef] = &[
    TypeDef {
        field_type: FieldType::String,
        name: "string",
        aliases: &[],
        go_type: "string",
        zero_value: "\"\"",
        validation: "required,min=1",
        column: "type:varchar(255);not null",
        import: None,
        searchable: true,
        sample: |i| format!("\"sample-{}\"", i + 1),
    },
    TypeDef {
        field_type: FieldType::Int,
        name: "int",
        aliases: &[],
        go_type: "int",
        zero_value: "0",
        validation: "required,gte=0",
        column: "not null;default:0",
        import: None,
        searchable: true,
        sample: |i| format!("{}", i + 1),
    },
    TypeDef {
        field_type: FieldType::Int64,
        name: "int64",
        aliases: &[],
        go_type: "int64",
        zero_value: "0",
        validation: "required,gte=0",
        column: "not null;default:0",
        import: None,
        searchable: false,
        sample: |i| format!("{}", (i + 1) * 1000),
    },
    TypeDef {
        field_type: FieldType::Uint,
        name: "uint",
        aliases: &[],
        go_type: "uint",
        zero_value: "0",
        validation: "required,gte=0",
        column: "not null;default:0",
        import: None,
        searchable: true,
        sample: |i| format!("{}", i + 1),
    },
    TypeDef {
        field_type: FieldType::Uint64,
        name: "uint64",
        aliases: &[],
        go_type: "uint64",
        zero_value: "0",
        validation: "required,gte=0",
        column: "not null;default:0",
        import: None,
        searchable: false,
        sample: |i| format!("{}", (i + 1) * 1000),
    },
    TypeDef {
        field_type: FieldType::Float32,
        name: "float32",
        aliases: &[],
        go_type: "float32",
        zero_value: "0",
        validation: "required,gte=0",
        column: "not null;default:0",
        import: None,
        searchable: false,
        sample: |i| format!("{}.5", i + 1),
    },
    TypeDef {
        field_type: FieldType::Float64,
        name: "float64",
        aliases: &[],
        go_type: "float64",
        zero_value: "0",
        validation: "required,gte=0",
        column: "not null;default:0",
        import: None,
        searchable: false,
        sample: |i| format!("{}.99", i + 1),
    },
    TypeDef {
        field_type: FieldType::Bool,
        name: "bool",
        aliases: &[],
        go_type: "bool",
        zero_value: "false",
        validation: "",
        column: "not null;default:false",
        import: None,
        searchable: false,
        sample: |i| (if i % 2 == 0 { "true" } else { "false" }).to_string(),
    },
    TypeDef {
        field_type: FieldType::Timestamp,
        name: "timestamp",
        aliases: &["time", "time.Time"],
        go_type: "time.Time",
        zero_value: "time.Time{}",
        validation: "required",
        column: "not null",
        import: Some("time"),
        searchable: false,
        sample: |i| format!("time.Date(2024, time.January, {}, 0, 0, 0, 0, time.UTC)", i % 28 + 1),
    },
    TypeDef {
        field_type: FieldType::Opaque,
        name: "opaque",
        aliases: &["bytes", "[]byte"],
        go_type: "[]byte",
        zero_value: "nil",
        validation: "",
        column: "type:bytea",
        import: None,
        searchable: false,
        sample: |i| format!("[]byte(\"blob-{}\")", i + 1),
    },
];

/// Case-sensitive lookup by canonical name or alias.
pub fn lookup(token: &str) -> Option<&'static TypeDef> {
    TYPE_REGISTRY
        .iter()
        .find(|def| def.name == token || def.aliases.contains(&token))
}

/// All canonical DSL type names, in registry order.
pub fn type_names() -> Vec<&'static str> {
    TYPE_REGISTRY.iter().map(|def| def.name).collect()
}

/// Up to three registry names closest to `token` by edit distance.
///
/// Only names within a distance of 3 qualify; a case-only mismatch
/// (`String` for `string`) always ranks first.
pub fn suggest(token: &str) -> Vec<String> {
    let lowered = token.to_lowercase();
    let mut scored: Vec<(usize, &'static str)> = TYPE_REGISTRY
        .iter()
        .map(|def| {
            let distance = if def.name == lowered {
                0
            } else {
                levenshtein(&lowered, def.name)
            };
            (distance, def.name)
        })
        .filter(|(distance, _)| *distance <= 3)
        .collect();

    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.to_string())
        .collect()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }

    row[b_chars.len()]
}
