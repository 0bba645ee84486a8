//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use goclean_core::domain::{DomainError, FileNaming, Layer};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "goclean",
    bin_name = "goclean",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Clean-Architecture Go code generator",
    long_about = "goclean turns a compact field descriptor into domain, DTO, \
                  repository, usecase and handler code for a Go project, and \
                  merges shared declarations into existing files.",
    after_help = "EXAMPLES:\n\
        \x20 goclean entity Product --fields \"name:string,price:float64,email:string\"\n\
        \x20 goclean entity Order --fields \"total:float64\" --layers domain,dto --dry-run\n\
        \x20 goclean batch entities.toml\n\
        \x20 goclean fields \"email:string,status:string,placed_at:time\"\n\
        \x20 goclean completions bash > /usr/share/bash-completion/completions/goclean",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate code for one entity.
    #[command(
        visible_alias = "e",
        about = "Generate code for one entity",
        after_help = "EXAMPLES:\n\
            \x20 goclean entity User --fields \"email:string,name:string,age:int\"\n\
            \x20 goclean entity Invoice --fields \"total:float64\" --timestamps --soft-delete\n\
            \x20 goclean entity Tag --fields \"label:string\" --layers domain,repository --naming kebab"
    )]
    Entity(EntityArgs),

    /// Generate code for every entity listed in a manifest.
    #[command(
        about = "Generate code for several entities from a TOML manifest",
        after_help = "MANIFEST:\n\
            \x20 [[entity]]\n\
            \x20 name = \"User\"\n\
            \x20 fields = \"email:string,name:string\"\n\
            \x20 layers = [\"domain\", \"dto\"]   # optional\n\
            \x20 timestamps = true             # optional per-entity override\n\n\
            EXAMPLES:\n\
            \x20 goclean batch entities.toml\n\
            \x20 goclean batch entities.toml --dir ./service --dry-run"
    )]
    Batch(BatchArgs),

    /// Show how a field descriptor is parsed and classified.
    #[command(
        about = "Inspect a field descriptor without generating anything",
        after_help = "EXAMPLES:\n\
            \x20 goclean fields \"name:string,price:float64,email:string\"\n\
            \x20 goclean fields \"sku:string,stock:int\" --format json"
    )]
    Fields(FieldsArgs),

    /// Work with built-in and custom templates.
    #[command(
        about = "Template management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 goclean templates init\n\
            \x20 goclean templates init --dir ./tpl --force\n\
            \x20 goclean templates list"
    )]
    Templates(TemplateCommands),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 goclean config get generation.timestamps\n\
            \x20 goclean config list\n\
            \x20 goclean config path"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 goclean completions bash > ~/.local/share/bash-completion/completions/goclean\n\
            \x20 goclean completions zsh  > ~/.zfunc/_goclean\n\
            \x20 goclean completions fish > ~/.config/fish/completions/goclean.fish"
    )]
    Completions(CompletionsArgs),
}

// ── shared generation options ────────────────────────────────────────────────

/// Options shared by `entity` and `batch`.
///
/// Every flag here overrides the matching `[generation]` config key.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerationArgs {
    /// Root of the Go project (where `go.mod` lives).
    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        default_value = ".",
        help = "Go project root"
    )]
    pub dir: PathBuf,

    /// Go module path; read from go.mod when omitted.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "PATH",
        help = "Go module path (default: read from go.mod)"
    )]
    pub module: Option<String>,

    /// Skip validate tags, Validate() methods and their tests.
    #[arg(long = "no-validation", help = "Do not generate validation code")]
    pub no_validation: bool,

    /// Add CreatedAt / UpdatedAt fields.
    #[arg(long = "timestamps", help = "Add CreatedAt/UpdatedAt fields")]
    pub timestamps: bool,

    /// Add a DeletedAt field for soft deletes.
    #[arg(long = "soft-delete", help = "Add a DeletedAt soft-delete field")]
    pub soft_delete: bool,

    /// File naming convention for per-entity files.
    #[arg(
        long = "naming",
        value_name = "STYLE",
        value_parser = parse_naming,
        help = "File naming: snake, kebab or camel"
    )]
    pub naming: Option<FileNaming>,

    /// Directory with custom template overrides.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Custom templates directory (default: <dir>/.goclean/templates)"
    )]
    pub templates: Option<PathBuf>,

    /// Report what would be written without touching any file.
    #[arg(long = "dry-run", help = "Show what would change without writing")]
    pub dry_run: bool,
}

// ── entity ───────────────────────────────────────────────────────────────────

/// Arguments for `goclean entity`.
#[derive(Debug, Args)]
pub struct EntityArgs {
    /// Entity name in any case (`product`, `OrderItem`, `order_item`).
    #[arg(value_name = "NAME", help = "Entity name")]
    pub name: String,

    /// Field descriptor: `name:type,name:type,...`.
    #[arg(
        short = 'f',
        long = "fields",
        value_name = "DSL",
        help = "Field descriptor, e.g. \"name:string,price:float64\""
    )]
    pub fields: String,

    /// Layers to generate; all of them when omitted.
    #[arg(
        short = 'l',
        long = "layers",
        value_name = "LAYERS",
        value_delimiter = ',',
        value_parser = parse_layer,
        help = "Comma-separated layers: domain,dto,repository,usecase,handler,messages"
    )]
    pub layers: Vec<Layer>,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

// ── batch ────────────────────────────────────────────────────────────────────

/// Arguments for `goclean batch`.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// TOML manifest listing the entities.
    #[arg(value_name = "MANIFEST", help = "Path to the entities manifest")]
    pub manifest: PathBuf,

    #[command(flatten)]
    pub generation: GenerationArgs,
}

// ── fields ───────────────────────────────────────────────────────────────────

/// Arguments for `goclean fields`.
#[derive(Debug, Args)]
pub struct FieldsArgs {
    /// Field descriptor to inspect.
    #[arg(value_name = "DSL", help = "Field descriptor")]
    pub descriptor: String,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: FieldsFormat,
}

/// Output format for the `fields` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldsFormat {
    /// Human-readable table.
    Table,
    /// JSON document.
    Json,
}

// ── templates ────────────────────────────────────────────────────────────────

/// Subcommands for `goclean templates`.
#[derive(Debug, Subcommand)]
pub enum TemplateCommands {
    /// Write the built-in templates out for editing.
    Init {
        /// Target directory.
        #[arg(long = "dir", value_name = "DIR", help = "Templates directory")]
        dir: Option<PathBuf>,

        /// Overwrite templates that already exist.
        #[arg(short = 'f', long = "force", help = "Overwrite existing templates")]
        force: bool,
    },
    /// List every template and whether it is built-in or custom.
    #[command(visible_alias = "ls")]
    List {
        /// Custom templates directory to inspect.
        #[arg(long = "dir", value_name = "DIR", help = "Templates directory")]
        dir: Option<PathBuf>,
    },
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `goclean completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `goclean config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generation.file_naming`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the user configuration file.
    Path,
}

// ── value parsers ────────────────────────────────────────────────────────────

fn parse_layer(s: &str) -> Result<Layer, DomainError> {
    s.parse()
}

fn parse_naming(s: &str) -> Result<FileNaming, DomainError> {
    s.parse()
}

// ── tests ─────────────────────────────────────────────────────────────────────
