//! Field DSL: `name:type` pairs separated by commas.
//!
//! ```text
//! FieldList := Field (',' Field)*
//! Field     := Identifier ':' TypeName
//! ```
//!
//! Surrounding whitespace is trimmed everywhere. Empty input is a valid,
//! empty list. Parsing is pure; every failure is a [`DomainError`] carrying
//! the 1-based position of the offending token.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    error::DomainError,
    flags::GenerationFlags,
    naming,
    types::{self, FieldType},
};

/// System-managed names, normalized (lowercase, separators removed), paired
/// with their display form.
const RESERVED_NAMES: &[(&str, &str)] = &[
    ("id", "id"),
    ("createdat", "created_at"),
    ("updatedat", "updated_at"),
    ("deletedat", "deleted_at"),
];

/// One user-declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Canonical (PascalCase) Go identifier.
    pub name: String,
    pub field_type: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Kind of a system-managed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemFieldKind {
    Id,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

/// A field controlled by feature flags rather than DSL input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemField {
    pub kind: SystemFieldKind,
    pub name: &'static str,
    pub go_type: &'static str,
    pub tag: &'static str,
}

impl SystemField {
    pub const ID: SystemField = SystemField {
        kind: SystemFieldKind::Id,
        name: "ID",
        go_type: "uint",
        tag: r#"gorm:"primaryKey" json:"id""#,
    };

    pub const CREATED_AT: SystemField = SystemField {
        kind: SystemFieldKind::CreatedAt,
        name: "CreatedAt",
        go_type: "time.Time",
        tag: r#"gorm:"autoCreateTime" json:"created_at""#,
    };

    pub const UPDATED_AT: SystemField = SystemField {
        kind: SystemFieldKind::UpdatedAt,
        name: "UpdatedAt",
        go_type: "time.Time",
        tag: r#"gorm:"autoUpdateTime" json:"updated_at""#,
    };

    pub const DELETED_AT: SystemField = SystemField {
        kind: SystemFieldKind::DeletedAt,
        name: "DeletedAt",
        go_type: "gorm.DeletedAt",
        tag: r#"gorm:"index" json:"-""#,
    };

    /// Leading system fields (always just the identifier).
    pub fn leading() -> Vec<SystemField> {
        vec![Self::ID]
    }

    /// Trailing system fields enabled by `flags`, in struct order.
    pub fn trailing(flags: &GenerationFlags) -> Vec<SystemField> {
        let mut out = Vec::new();
        if flags.timestamps {
            out.push(Self::CREATED_AT);
            out.push(Self::UPDATED_AT);
        }
        if flags.soft_delete {
            out.push(Self::DELETED_AT);
        }
        out
    }
}

/// Ordered list of user fields.
///
/// The list itself only holds DSL input; the implicit `ID` prefix and the
/// flag-driven suffix are added by [`FieldList::total_len`] and by the
/// entity model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldList {
    fields: Vec<Field>,
}

impl FieldList {
    /// Build a list from already-validated fields.
    pub fn new(fields: Vec<Field>) -> Result<Self, DomainError> {
        let mut list = Self::default();
        for (idx, field) in fields.into_iter().enumerate() {
            let raw = field.name.clone();
            list.push(idx + 1, &raw, field)?;
        }
        Ok(list)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        let key = normalize(name);
        self.fields.iter().find(|f| normalize(&f.name) == key)
    }

    /// Number of struct fields including system-managed ones.
    pub fn total_len(&self, flags: &GenerationFlags) -> usize {
        SystemField::leading().len() + self.fields.len() + SystemField::trailing(flags).len()
    }

    /// Serialize back to the DSL with canonical names and type tokens.
    pub fn to_dsl(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!("{}:{}", f.name, f.field_type))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn push(&mut self, position: usize, raw: &str, field: Field) -> Result<(), DomainError> {
        let key = normalize(&field.name);

        if let Some((_, reserved)) = RESERVED_NAMES.iter().find(|(norm, _)| *norm == key) {
            return Err(DomainError::ReservedFieldName {
                position,
                name: raw.to_string(),
                reserved,
            });
        }

        if self.fields.iter().any(|f| normalize(&f.name) == key) {
            return Err(DomainError::DuplicateField {
                position,
                name: raw.to_string(),
            });
        }

        self.fields.push(field);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Parse a field descriptor such as `"name:string,price:float64"`.
pub fn parse_fields(input: &str) -> Result<FieldList, DomainError> {
    let input = input.trim();
    let mut list = FieldList::default();
    if input.is_empty() {
        return Ok(list);
    }

    for (idx, token) in input.split(',').enumerate() {
        let position = idx + 1;
        let token = token.trim();
        let field = parse_pair(position, token)?;
        list.push(position, token_name(token), field)?;
    }

    debug!(fields = list.len(), "parsed field descriptor");
    Ok(list)
}

fn parse_pair(position: usize, token: &str) -> Result<Field, DomainError> {
    let invalid = |reason: &str| DomainError::InvalidFieldDeclaration {
        position,
        token: token.to_string(),
        reason: reason.to_string(),
    };

    if token.is_empty() {
        return Err(invalid("empty declaration"));
    }

    let (raw_name, raw_type) = token
        .split_once(':')
        .ok_or_else(|| invalid("expected 'name:type'"))?;
    let (raw_name, raw_type) = (raw_name.trim(), raw_type.trim());

    if raw_name.is_empty() {
        return Err(invalid("field name is empty"));
    }
    if raw_type.is_empty() {
        return Err(invalid("field type is empty"));
    }
    if !naming::is_identifier(raw_name) {
        return Err(invalid(
            "field name must start with a letter and contain only letters, digits, '_' or '-'",
        ));
    }

    let name = naming::to_pascal(raw_name);
    if name.is_empty() {
        return Err(invalid("field name has no letters"));
    }

    let def = types::lookup(raw_type).ok_or_else(|| DomainError::UnsupportedType {
        position,
        token: raw_type.to_string(),
        suggestions: types::suggest(raw_type),
    })?;

    Ok(Field::new(name, def.field_type))
}

fn token_name(token: &str) -> &str {
    token.split_once(':').map_or(token, |(name, _)| name.trim())
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
