//! Command-line interface for clr-trace.
//!
//! `render` prints the enhanced trace stored in a snapshot file; `decode`
//! shows how raw compiler-generated names are split.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clr_trace_config::TraceConfig;

use crate::debug::{self, DebugLevel};
use crate::naming::decode;
use crate::snapshot::TraceSnapshot;
use crate::trace::StackRenderer;

/// clr-trace - readable .NET stack traces from captured frames
#[derive(Parser)]
#[command(name = "clr-trace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set debug log level (overrides config and DEBUG_LEVEL)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the trace stored in a snapshot file
    Render {
        /// Snapshot JSON (metadata plus frames)
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Config file (default: ~/.config/clr-trace/config.yaml)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Keep frames marked as hidden
        #[arg(long)]
        show_hidden: bool,

        /// Omit the "in file:line n" suffix
        #[arg(long)]
        no_line_info: bool,
    },

    /// Show how raw routine or type names are decoded
    Decode {
        /// Raw names, e.g. "<Main>b__0_0"
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
}

/// Run the parsed command and return what should be printed.
pub fn run(cli: Cli) -> Result<String> {
    let cli_level = cli.log_level.map(LogLevelArg::to_level_filter);
    debug::init_log_bridge(cli_level);

    match cli.command {
        Commands::Render {
            snapshot,
            config,
            show_hidden,
            no_line_info,
        } => {
            let mut config = load_config(config.as_deref())?;
            if cli_level.is_none() && std::env::var_os("DEBUG_LEVEL").is_none() {
                apply_config_level(&config);
            }
            if show_hidden {
                config.show_hidden_frames = true;
            }
            if no_line_info {
                config.include_line_info = false;
            }
            render_snapshot(&snapshot, &config)
        }
        Commands::Decode { names } => decode_names(&names),
    }
}

fn load_config(path: Option<&Path>) -> Result<TraceConfig> {
    let config = match path {
        Some(path) => TraceConfig::load_from(path)?,
        None => TraceConfig::load()?,
    };
    crate::debug_info!("CONFIG", "using config {:?}", config);
    Ok(config)
}

fn apply_config_level(config: &TraceConfig) {
    let level = DebugLevel::from_level_filter(config.log_level.to_level_filter());
    if level != DebugLevel::Off {
        debug::set_level(level);
    }
}

/// Render the snapshot at `path` with `config`.
pub fn render_snapshot(path: &Path, config: &TraceConfig) -> Result<String> {
    let snapshot = TraceSnapshot::load(path)?;
    let trace = StackRenderer::from_config(config)
        .render(&snapshot.metadata, &snapshot.frames)
        .with_context(|| format!("failed to render {}", path.display()))?;
    crate::debug_log!("RENDER", "{} frames rendered", trace.len());
    Ok(trace.to_string())
}

/// One line per name: `{raw} => logical=.. nested=.. kind=..`.
pub fn decode_names(names: &[String]) -> Result<String> {
    let mut lines = Vec::with_capacity(names.len());
    for raw in names {
        let decoded = decode(raw).with_context(|| format!("cannot decode {raw:?}"))?;
        lines.push(format!(
            "{raw} => logical={} nested={} kind={}",
            decoded.logical_name,
            decoded.nested_name.as_deref().unwrap_or("-"),
            decoded
                .nested_kind
                .map_or_else(|| "-".to_string(), |k| format!("{k:?}")),
        ));
    }
    Ok(lines.join("\n"))
}
