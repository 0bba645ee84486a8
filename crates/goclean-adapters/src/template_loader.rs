//! Filesystem-based custom template loader.
//!
//! Discovers `*.tmpl` files under a directory tree and maps each one to a
//! logical template name: its path relative to the root, `/`-separated,
//! without the extension.
//!
//! # Directory layout expected
//!
//! ```text
//! .goclean/templates/
//! ├── domain/
//! │   ├── entity.tmpl          ← overrides "domain/entity"
//! │   └── entity_test.tmpl     ← overrides "domain/entity_test"
//! └── handler/
//!     └── entity.tmpl          ← overrides "handler/entity"
//! ```
//!
//! Files whose logical name is not a known template are skipped with a
//! `WARN` log; they would never be rendered.
//!
//! The same directory is the target of [`TemplateDirectory::materialize`],
//! which writes the built-in set out so users have something to edit.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use goclean_core::error::GocleanResult;

use crate::{
    builtin_templates::{self, BUILTIN_TEMPLATES},
    filesystem::{atomic_write, map_io_error},
};

/// Extension every template file carries.
pub const TEMPLATE_EXTENSION: &str = "tmpl";

/// Directory used when neither the command line nor config names one.
pub const DEFAULT_TEMPLATES_DIR: &str = ".goclean/templates";

/// A user-supplied template read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTemplate {
    /// Logical name, e.g. `dto/entity`.
    pub name: String,
    pub path: PathBuf,
    pub source: String,
}

/// What [`TemplateDirectory::materialize`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// A directory of custom template overrides.
#[derive(Debug, Clone)]
pub struct TemplateDirectory {
    root: PathBuf,
}

impl TemplateDirectory {
    /// Point at `root`. The directory does not need to exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every known template found under the root.
    ///
    /// A missing directory yields an empty list: custom templates are
    /// optional. Unreadable files are errors, since silently falling back to
    /// a built-in would hide the user's edit.
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    pub fn discover(&self) -> GocleanResult<Vec<CustomTemplate>> {
        if !self.root.is_dir() {
            debug!("custom templates directory absent");
            return Ok(Vec::new());
        }

        let mut templates = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                map_io_error(&path, e.into(), "walk templates directory")
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = logical_name(&self.root, entry.path()) else {
                continue;
            };
            if !builtin_templates::is_known(&name) {
                warn!(
                    file = %entry.path().display(),
                    name = %name,
                    "ignoring template with unknown logical name"
                );
                continue;
            }

            let source = fs::read_to_string(entry.path())
                .map_err(|e| map_io_error(entry.path(), e, "read template"))?;
            debug!(name = %name, "loaded custom template");
            templates.push(CustomTemplate {
                name,
                path: entry.path().to_path_buf(),
                source,
            });
        }

        info!(count = templates.len(), "custom templates discovered");
        Ok(templates)
    }

    /// Write the built-in set under the root.
    ///
    /// When the root does not exist yet, the whole set is staged in a sibling
    /// temporary directory and renamed into place, so an interrupted run
    /// leaves either nothing or a complete set. Otherwise each missing file
    /// is written atomically; existing files are kept unless `force` is set.
    #[instrument(skip(self), fields(dir = %self.root.display()))]
    pub fn materialize(&self, force: bool) -> GocleanResult<MaterializeReport> {
        if self.root.exists() {
            self.fill_existing(force)
        } else {
            self.stage_and_rename()
        }
    }

    fn fill_existing(&self, force: bool) -> GocleanResult<MaterializeReport> {
        let mut report = MaterializeReport::default();
        for template in BUILTIN_TEMPLATES {
            let target = self.root.join(template.file_name());
            if target.exists() && !force {
                debug!(file = %target.display(), "keeping existing template");
                report.skipped.push(target);
                continue;
            }
            atomic_write(&target, template.source)
                .map_err(|e| map_io_error(&target, e, "write template"))?;
            report.written.push(target);
        }
        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "templates materialized"
        );
        Ok(report)
    }

    fn stage_and_rename(&self) -> GocleanResult<MaterializeReport> {
        let parent = match self.root.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .map_err(|e| map_io_error(&parent, e, "create directory"))?;

        let staging = tempfile::Builder::new()
            .prefix(".goclean-templates-")
            .tempdir_in(&parent)
            .map_err(|e| map_io_error(&parent, e, "create staging directory"))?;

        for template in BUILTIN_TEMPLATES {
            let target = staging.path().join(template.file_name());
            if let Some(dir) = target.parent() {
                fs::create_dir_all(dir).map_err(|e| map_io_error(dir, e, "create directory"))?;
            }
            fs::write(&target, template.source)
                .map_err(|e| map_io_error(&target, e, "write template"))?;
        }

        // On failure the TempDir guard removes the staged copy; on success
        // the guard's cleanup finds nothing left to delete.
        fs::rename(staging.path(), &self.root)
            .map_err(|e| map_io_error(&self.root, e, "move templates into place"))?;

        let written = BUILTIN_TEMPLATES
            .iter()
            .map(|t| self.root.join(t.file_name()))
            .collect::<Vec<_>>();
        info!(written = written.len(), "templates materialized");
        Ok(MaterializeReport {
            written,
            skipped: Vec::new(),
        })
    }
}

/// `root/dto/entity.tmpl` → `dto/entity`; `None` for other extensions.
fn logical_name(root: &Path, file: &Path) -> Option<String> {
    if file.extension()? != TEMPLATE_EXTENSION {
        return None;
    }
    let relative = file.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}
