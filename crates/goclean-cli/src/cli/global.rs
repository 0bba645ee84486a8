//! Flags accepted by every goclean subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, builder::FalseyValueParser};

/// Global arguments, flattened into [`super::Cli`].
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log verbosity. Warnings only by default; `-v` adds INFO, `-vv` DEBUG
    /// and `-vvv` TRACE.
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity on stderr:
    (none)  - Only warnings and errors
    -v      - Info level (artifacts planned and written)
    -vv     - Debug level (merge decisions, template origins)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Only errors reach the terminal; the generation report is suppressed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Plain report lines without ANSI colour.
    ///
    /// Any non-empty `NO_COLOR` other than a falsey word (`0`, `false`, `no`,
    /// `off`) turns this on, following <https://no-color.org>.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Explicit settings file. Replaces the user config and `./goclean.toml`
    /// lookup; the file must exist.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// How reports and listings are printed. `json` also switches log lines
    /// on stderr to JSON.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// Report rendering mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain when piped.
    #[default]
    Auto,
    /// Coloured symbols per artifact.
    Human,
    /// Same lines, no colour or spinner.
    Plain,
    /// One JSON document per report.
    Json,
}
