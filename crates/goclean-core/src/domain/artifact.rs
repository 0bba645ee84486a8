use std::fmt;

use serde::Serialize;

use crate::domain::{error::DomainError, flags::Layer};

/// Logical names of the fixed-shape templates (path minus extension).
pub mod template_names {
    pub const DOMAIN_ENTITY: &str = "domain/entity";
    pub const DOMAIN_ENTITY_TEST: &str = "domain/entity_test";
    pub const DTO_ENTITY: &str = "dto/entity";
    pub const REPOSITORY_ENTITY: &str = "repository/entity";
    pub const USECASE_ENTITY: &str = "usecase/entity";
    pub const HANDLER_ENTITY: &str = "handler/entity";

    pub const ALL: [&str; 6] = [
        DOMAIN_ENTITY,
        DOMAIN_ENTITY_TEST,
        DTO_ENTITY,
        REPOSITORY_ENTITY,
        USECASE_ENTITY,
        HANDLER_ENTITY,
    ];
}

/// A `/`-separated path relative to the Go project root.
///
/// Invariant: never absolute, never contains `..` or empty segments.
/// Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArtifactPath(String);

impl ArtifactPath {
    pub fn try_new(path: impl Into<String>) -> Result<Self, DomainError> {
        let path = path.into().replace('\\', "/");
        let invalid = |reason: &str| DomainError::InvalidArtifactPath {
            path: path.clone(),
            reason: reason.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("path is empty"));
        }
        if path.starts_with('/') || path.chars().nth(1) == Some(':') {
            return Err(invalid("path must be relative"));
        }
        if path.split('/').any(|seg| seg.is_empty() || seg == "..") {
            return Err(invalid("path must not contain empty or '..' segments"));
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, for adapters that map onto a real filesystem.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArtifactPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Shape of a shared file that accumulates declarations.
///
/// A well-formed file is `header`, then declaration blocks separated by a
/// blank line, then `closer`. `opener` re-opens a declaration group when a
/// block must be appended outside the parsed structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeLayout {
    pub header: String,
    pub opener: String,
    pub closer: String,
}

impl MergeLayout {
    /// First line of the header, used to recognise a file we wrote.
    pub fn signature(&self) -> &str {
        self.header.lines().next().unwrap_or("")
    }

    /// Content of a brand-new file holding only `declarations`.
    pub fn fresh(&self, declarations: &str) -> String {
        format!("{}{}{}", self.header, declarations, self.closer)
    }
}

/// Declarations one entity contributes to a shared file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeBlock {
    pub layout: MergeLayout,
    /// Declaration name whose presence means "already merged".
    ///
    /// Indented lines that follow it form the entity's region; declarations
    /// missing from that region are added on later runs.
    pub marker: String,
    pub declarations: String,
    /// Import paths the declarations rely on.
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Per-entity file, replaced wholesale.
    Replace,
    /// Shared file, reconciled through the merge protocol.
    Merge(MergeBlock),
}

/// Which emitter tier produced an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tier", content = "name", rename_all = "lowercase")]
pub enum ArtifactSource {
    Template(String),
    Procedural,
}

impl fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(name) => write!(f, "template {name}"),
            Self::Procedural => f.write_str("procedural"),
        }
    }
}

/// One file's worth of generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub path: ArtifactPath,
    /// Full file content as it would be written to an empty target.
    pub content: String,
    pub kind: ArtifactKind,
    pub layer: Layer,
    pub source: ArtifactSource,
}

impl GeneratedArtifact {
    pub fn replace(path: ArtifactPath, layer: Layer, template: &str, content: String) -> Self {
        Self {
            path,
            content,
            kind: ArtifactKind::Replace,
            layer,
            source: ArtifactSource::Template(template.to_string()),
        }
    }

    pub fn merge(path: ArtifactPath, layer: Layer, block: MergeBlock) -> Self {
        Self {
            path,
            content: block.layout.fresh(&block.declarations),
            kind: ArtifactKind::Merge(block),
            layer,
            source: ArtifactSource::Procedural,
        }
    }

    pub fn mergeable(&self) -> bool {
        matches!(self.kind, ArtifactKind::Merge(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_paths_stay_relative() {
        assert!(ArtifactPath::try_new("internal/domain/user.go").is_ok());
        assert!(ArtifactPath::try_new("/etc/passwd").is_err());
        assert!(ArtifactPath::try_new("../outside.go").is_err());
        assert!(ArtifactPath::try_new("internal//x.go").is_err());
        assert!(ArtifactPath::try_new("C:/x.go").is_err());
        assert!(ArtifactPath::try_new("").is_err());

        let path = ArtifactPath::try_new("internal\\dto\\user_dto.go").unwrap();
        assert_eq!(path.as_str(), "internal/dto/user_dto.go");
        assert_eq!(path.file_name(), "user_dto.go");
    }

    #[test]
    fn merge_artifact_content_is_fresh_file() {
        let block = MergeBlock {
            layout: MergeLayout {
                header: "package messages\n\nconst (\n".into(),
                opener: "const (\n".into(),
                closer: ")\n".into(),
            },
            marker: "MsgUserCreated".into(),
            declarations: "\tMsgUserCreated = \"user created\"\n".into(),
            imports: Vec::new(),
        };
        let path = ArtifactPath::try_new("internal/messages/messages.go").unwrap();
        let artifact = GeneratedArtifact::merge(path, Layer::Messages, block);
        assert!(artifact.mergeable());
        assert_eq!(
            artifact.content,
            "package messages\n\nconst (\n\tMsgUserCreated = \"user created\"\n)\n"
        );
        assert_eq!(artifact.source, ArtifactSource::Procedural);
    }
}
