use config::{Config, File};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub mod validator;

use crate::cli::Cli;
use crate::domain::{DefaultPolicy, FieldType};

pub const DEFAULT_CONFIG_FILE: &str = "schema-sampler.toml";
pub const EXPORT_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Which field types the session offers
    #[serde(default)]
    pub profile: TypeProfile,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Per-type replacements for the built-in default literals
    #[serde(default, deserialize_with = "deserialize_defaults")]
    pub defaults: HashMap<FieldType, Value>,
}

/// Keys go through `FieldType::from_str` since config sources lowercase them
fn deserialize_defaults<'de, D>(deserializer: D) -> Result<HashMap<FieldType, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    HashMap::<String, Value>::deserialize(deserializer)?
        .into_iter()
        .map(|(key, value)| {
            key.parse::<FieldType>()
                .map(|field_type| (field_type, value))
                .map_err(serde::de::Error::custom)
        })
        .collect()
}

/// Set of field types offered to the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TypeProfile {
    /// All ten field types
    #[default]
    Reference,
    /// String, Number and Nested only
    Minimal,
}

impl TypeProfile {
    pub fn types(&self) -> &'static [FieldType] {
        match self {
            TypeProfile::Reference => &FieldType::ALL,
            TypeProfile::Minimal => &[FieldType::String, FieldType::Number, FieldType::Nested],
        }
    }

    pub fn allows(&self, field_type: FieldType) -> bool {
        self.types().contains(&field_type)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportSettings {
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            directory: default_directory(),
        }
    }
}

fn default_file_name() -> String {
    "schema.json".to_string()
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl LoggingSettings {
    /// `None` when the level name is not recognised
    pub fn max_level(&self) -> Option<tracing::Level> {
        self.level.parse().ok()
    }
}

impl Settings {
    /// Load settings from a config file (optional) and built-in defaults
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let settings = Self::build(path.as_ref())?;
        settings.validated()
    }

    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::build(&cli.config)?;

        // Apply CLI overrides (CLI > env vars > config file)
        settings.apply_cli_overrides(cli);

        settings.validated()
    }

    fn build(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .set_default("profile", "reference")?
            .set_default("export.file_name", default_file_name())?
            .set_default("export.directory", ".")?
            .set_default("logging.level", default_level())?
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(profile) = cli.profile {
            self.profile = profile;
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }
        if let Some(dir) = &cli.out_dir {
            self.export.directory = dir.clone();
        }
    }

    fn validated(self) -> Result<Self, anyhow::Error> {
        validator::ConfigValidator::validate(&self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;
        Ok(self)
    }

    /// Default-literal policy with this configuration's overrides applied
    pub fn policy(&self) -> DefaultPolicy {
        DefaultPolicy::from_overrides(self.defaults.clone())
    }

    pub fn export_path(&self) -> PathBuf {
        self.export.directory.join(&self.export.file_name)
    }
}
