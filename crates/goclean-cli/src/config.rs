//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the resolved
//! [`GenerationFlags`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, see [`AppConfig::resolve_flags`])
//! 2. Environment variables: `GOCLEAN_<SECTION>__<KEY>`, e.g.
//!    `GOCLEAN_GENERATION__TIMESTAMPS=true`
//! 3. Config file: `--config FILE`, else the user config file plus
//!    `./goclean.toml` in the working directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use goclean_adapters::template_loader::DEFAULT_TEMPLATES_DIR;
use goclean_core::domain::{FileNaming, GenerationFlags};

use crate::cli::GenerationArgs;

/// Project-local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "goclean.toml";

const ENV_PREFIX: &str = "GOCLEAN";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for generation flags.
    pub generation: GenerationConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub validation: bool,
    pub timestamps: bool,
    pub soft_delete: bool,
    pub file_naming: FileNaming,
    /// Go module path; `go.mod` is read when unset.
    pub module: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let flags = GenerationFlags::default();
        Self {
            validation: flags.validation,
            timestamps: flags.timestamps,
            soft_delete: flags.soft_delete,
            file_naming: flags.file_naming,
            module: flags.module,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Custom templates directory; relative paths resolve against the
    /// project directory.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from all sources.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("failed to encode default configuration")?;

        let mut builder = Config::builder().add_source(defaults);
        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder
                .add_source(File::from(Self::config_path()).required(false))
                .add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("failed to read configuration sources")?
            .try_deserialize::<Self>()
            .context("configuration has invalid values")?;

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Path to the user configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `./goclean.toml`.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "goclean", "goclean")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Merge command-line overrides over the configured defaults.
    ///
    /// Boolean switches can only turn a feature on (or, for validation, off);
    /// leaving a switch out keeps the configured value.
    pub fn resolve_flags(&self, args: &GenerationArgs) -> GenerationFlags {
        let generation = &self.generation;
        GenerationFlags {
            validation: generation.validation && !args.no_validation,
            timestamps: generation.timestamps || args.timestamps,
            soft_delete: generation.soft_delete || args.soft_delete,
            file_naming: args.naming.unwrap_or(generation.file_naming),
            module: args.module.clone().or_else(|| generation.module.clone()),
        }
    }

    /// Custom templates directory for a project rooted at `project_dir`.
    pub fn templates_dir(&self, cli_override: Option<&Path>, project_dir: &Path) -> PathBuf {
        match cli_override.or(self.templates.dir.as_deref()) {
            Some(dir) if dir.is_absolute() => dir.to_path_buf(),
            Some(dir) => project_dir.join(dir),
            None => project_dir.join(DEFAULT_TEMPLATES_DIR),
        }
    }

    /// Look up a dotted key (`generation.timestamps`) in the effective
    /// configuration. `None` for unknown keys; unset optional values render
    /// as an empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut value = serde_json::to_value(self).ok()?;
        for part in key.split('.') {
            value = value.get_mut(part)?.take();
        }
        match value {
            serde_json::Value::Object(_) => None,
            serde_json::Value::Null => Some(String::new()),
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_core_flags() {
        let cfg = AppConfig::default();
        let flags = cfg.resolve_flags(&GenerationArgs::default());
        assert_eq!(flags, GenerationFlags::default());
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "[generation]\ntimestamps = true\nfile_naming = \"kebab\"\nmodule = \"example.com/shop\"\n\n[templates]\ndir = \"tpl\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert!(cfg.generation.timestamps);
        assert!(cfg.generation.validation);
        assert_eq!(cfg.generation.file_naming, FileNaming::Kebab);
        assert_eq!(cfg.generation.module.as_deref(), Some("example.com/shop"));
        assert_eq!(cfg.templates.dir, Some(PathBuf::from("tpl")));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[generation]\nfile_naming = \"shouty\"\n").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn cli_flags_win_over_config() {
        let mut cfg = AppConfig::default();
        cfg.generation.file_naming = FileNaming::Camel;
        cfg.generation.module = Some("example.com/from-config".into());

        let args = GenerationArgs {
            no_validation: true,
            soft_delete: true,
            naming: Some(FileNaming::Kebab),
            module: Some("example.com/from-cli".into()),
            ..GenerationArgs::default()
        };
        let flags = cfg.resolve_flags(&args);
        assert!(!flags.validation);
        assert!(flags.soft_delete);
        assert!(!flags.timestamps);
        assert_eq!(flags.file_naming, FileNaming::Kebab);
        assert_eq!(flags.module.as_deref(), Some("example.com/from-cli"));
    }

    #[test]
    fn templates_dir_resolution() {
        let project = Path::new("/work/shop");
        let mut cfg = AppConfig::default();
        assert_eq!(
            cfg.templates_dir(None, project),
            project.join(".goclean/templates")
        );

        cfg.templates.dir = Some(PathBuf::from("tpl"));
        assert_eq!(cfg.templates_dir(None, project), project.join("tpl"));
        assert_eq!(
            cfg.templates_dir(Some(Path::new("/abs/tpl")), project),
            PathBuf::from("/abs/tpl")
        );
    }

    #[test]
    fn get_reads_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("generation.validation").as_deref(), Some("true"));
        assert_eq!(cfg.get("generation.file_naming").as_deref(), Some("snake"));
        assert_eq!(cfg.get("generation.module").as_deref(), Some(""));
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("generation"), None);
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
