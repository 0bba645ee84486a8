use std::fmt;

use serde::Serialize;

use crate::domain::{ArtifactPath, Layer};

/// What happened to one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum WriteOutcome {
    Created,
    Overwritten,
    Unchanged,
    Appended,
    /// Entity already merged; declarations it lacked were added.
    Extended,
    /// Declarations already present; the file was left alone.
    Skipped,
    /// Shared file had an unexpected shape; declarations went to end of file.
    FallbackAppended,
    /// Rendering a user template failed; nothing was written.
    Failed(String),
}

impl WriteOutcome {
    /// Whether this outcome changes the file on disk.
    pub fn writes(&self) -> bool {
        matches!(
            self,
            Self::Created
                | Self::Overwritten
                | Self::Appended
                | Self::Extended
                | Self::FallbackAppended
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Overwritten => "overwritten",
            Self::Unchanged => "unchanged",
            Self::Appended => "appended",
            Self::Extended => "extended",
            Self::Skipped => "skipped",
            Self::FallbackAppended => "appended (fallback)",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            other => f.write_str(other.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub path: ArtifactPath,
    pub layer: Layer,
    pub outcome: WriteOutcome,
}

/// Result of one `generate` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub entity: String,
    /// Nothing was written; outcomes describe what would happen.
    pub dry_run: bool,
    pub entries: Vec<ReportEntry>,
}

impl GenerationReport {
    pub fn new(entity: impl Into<String>, dry_run: bool) -> Self {
        Self {
            entity: entity.into(),
            dry_run,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, path: ArtifactPath, layer: Layer, outcome: WriteOutcome) {
        self.entries.push(ReportEntry {
            path,
            layer,
            outcome,
        });
    }

    /// Shared files that had to fall back to end-of-file appends.
    pub fn warnings(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == WriteOutcome::FallbackAppended)
    }

    /// Artifacts whose user template failed to render.
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, WriteOutcome::Failed(_)))
    }

    pub fn written(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.writes()).count()
    }

    pub fn outcome_of(&self, path: &str) -> Option<&WriteOutcome> {
        self.entries
            .iter()
            .find(|e| e.path.as_str() == path)
            .map(|e| &e.outcome)
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}
