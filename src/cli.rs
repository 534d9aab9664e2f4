use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{TypeProfile, DEFAULT_CONFIG_FILE};

/// Build a nested field schema interactively and preview a sample JSON document
#[derive(Parser, Debug, Clone)]
#[command(name = "schema-sampler", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "SCHEMA_SAMPLER_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Field types offered in the session
    #[arg(long, env = "SCHEMA_SAMPLER_PROFILE", value_enum)]
    pub profile: Option<TypeProfile>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SCHEMA_SAMPLER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory that `export` writes into
    #[arg(long, env = "SCHEMA_SAMPLER_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start an interactive schema-building session (default)
    Repl,
    /// List the field types of the active profile
    Types,
    /// Check whether names are valid field identifiers
    CheckName {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Repl)
    }
}
