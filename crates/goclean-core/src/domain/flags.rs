//! Effective generation flags and layer selection.
//!
//! The core never reads configuration files or CLI arguments. The caller
//! resolves everything into [`GenerationFlags`] and hands it over.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, naming};

/// Already-resolved feature flags for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFlags {
    /// Emit `validate` tags and `Validate()` methods.
    pub validation: bool,
    /// Append `CreatedAt` / `UpdatedAt` system fields.
    pub timestamps: bool,
    /// Append a `DeletedAt` soft-delete field.
    pub soft_delete: bool,
    /// Naming convention for per-entity file names.
    pub file_naming: FileNaming,
    /// Go module path used in import statements. `None` means "read go.mod".
    pub module: Option<String>,
}

impl Default for GenerationFlags {
    fn default() -> Self {
        Self {
            validation: true,
            timestamps: false,
            soft_delete: false,
            file_naming: FileNaming::Snake,
            module: None,
        }
    }
}

impl GenerationFlags {
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

/// File-name convention for generated per-entity files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileNaming {
    #[default]
    Snake,
    Kebab,
    Camel,
}

impl FileNaming {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Snake => "snake",
            Self::Kebab => "kebab",
            Self::Camel => "camel",
        }
    }

    /// Render `name` in this convention.
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::Snake => naming::to_snake(name),
            Self::Kebab => naming::to_kebab(name),
            Self::Camel => naming::to_camel(name),
        }
    }

    /// Join a base name and a suffix (`user` + `dto`) in this convention.
    pub fn with_suffix(&self, name: &str, suffix: &str) -> String {
        self.apply(&format!("{name}_{suffix}"))
    }
}

impl fmt::Display for FileNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileNaming {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "snake" | "snake_case" => Ok(Self::Snake),
            "kebab" | "kebab-case" => Ok(Self::Kebab),
            "camel" | "camelcase" => Ok(Self::Camel),
            _ => Err(DomainError::UnknownOption {
                kind: "file naming convention",
                value: s.to_string(),
                expected: "snake, kebab, camel".into(),
            }),
        }
    }
}

/// One architectural layer a generation command can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Domain,
    Dto,
    Repository,
    Usecase,
    Handler,
    Messages,
}

impl Layer {
    /// Every layer, in generation order.
    pub const ALL: [Layer; 6] = [
        Layer::Domain,
        Layer::Dto,
        Layer::Repository,
        Layer::Usecase,
        Layer::Handler,
        Layer::Messages,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Dto => "dto",
            Self::Repository => "repository",
            Self::Usecase => "usecase",
            Self::Handler => "handler",
            Self::Messages => "messages",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layer::ALL
            .into_iter()
            .find(|layer| layer.as_str() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| DomainError::UnknownOption {
                kind: "layer",
                value: s.to_string(),
                expected: Layer::ALL.map(|l| l.as_str()).join(", "),
            })
    }
}
