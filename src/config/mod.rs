//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::domain::identifier::IconId;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "glifo";
const DEFAULT_FALLBACK_ICON: &str = "lucide:circle-help";
const DEFAULT_PREWARM: &[&str] = &["lucide", "simple-icons"];
const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Command-line arguments for the glifo binary.
#[derive(Debug, Parser)]
#[command(name = "glifo", version, about = "Icon collection cache and renderer")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "GLIFO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render a single icon to SVG.
    Render(RenderArgs),
    /// Render many icons, printing a JSON identifier → markup mapping.
    Batch(BatchArgs),
    /// List collections resident in the cache after prewarm.
    List,
    /// Search icon names by substring.
    Search(SearchArgs),
    /// Load the configured prewarm collections and report the count.
    Warm,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    /// Icon identifier of the form `collection:name`.
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: String,

    #[command(flatten)]
    pub options: RenderOptionArgs,

    /// Write the markup to a file instead of stdout.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// Icon identifiers of the form `collection:name`.
    #[arg(value_name = "IDENTIFIER", required = true)]
    pub identifiers: Vec<String>,

    #[command(flatten)]
    pub options: RenderOptionArgs,

    /// Write the JSON mapping to a file instead of stdout.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    /// Substring to match against icon names (case-insensitive).
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Restrict the search to one collection, loading it if needed.
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,

    /// Maximum number of results.
    #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub limit: usize,
}

/// Render options shared by the `render` and `batch` subcommands.
#[derive(Debug, Args, Default, Clone)]
pub struct RenderOptionArgs {
    /// Override width and height (`24`, `1.5em`, ...).
    #[arg(long, value_name = "SIZE")]
    pub size: Option<String>,

    /// Attach a class attribute to the root element.
    #[arg(long, value_name = "CLASS")]
    pub class: Option<String>,

    /// Replace `currentColor` tokens with a literal color.
    #[arg(long, value_name = "COLOR")]
    pub color: Option<String>,
}

/// Global setting overrides, highest precedence layer.
#[derive(Debug, Args, Default, Clone)]
pub struct Overrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Load collections from a directory of `<name>.json` files instead of
    /// the embedded bundle.
    #[arg(long = "icons-data-dir", value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub icons_data_dir: Option<PathBuf>,

    /// Override the fallback icon identifier.
    #[arg(long = "icons-fallback", value_name = "IDENTIFIER")]
    pub icons_fallback: Option<String>,

    /// Override the prewarm collection set (repeatable).
    #[arg(long = "icons-prewarm", value_name = "NAME")]
    pub icons_prewarm: Vec<String>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub icons: IconSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct IconSettings {
    /// When absent, collections come from the embedded bundle.
    pub data_dir: Option<PathBuf>,
    pub fallback: IconId,
    pub prewarm: Vec<String>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("GLIFO").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    icons: RawIconSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(dir) = overrides.icons_data_dir.as_ref() {
            self.icons.data_dir = Some(dir.clone());
        }
        if let Some(fallback) = overrides.icons_fallback.as_ref() {
            self.icons.fallback = Some(fallback.clone());
        }
        if !overrides.icons_prewarm.is_empty() {
            self.icons.prewarm = Some(overrides.icons_prewarm.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { logging, icons } = raw;

        let logging = build_logging_settings(logging)?;
        let icons = build_icon_settings(icons)?;

        Ok(Self { logging, icons })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_icon_settings(icons: RawIconSettings) -> Result<IconSettings, LoadError> {
    let data_dir = icons.data_dir.and_then(|dir| {
        if dir.as_os_str().is_empty() {
            None
        } else {
            Some(dir)
        }
    });

    let fallback_raw = icons
        .fallback
        .unwrap_or_else(|| DEFAULT_FALLBACK_ICON.to_string());
    let fallback = IconId::parse(&fallback_raw)
        .map_err(|err| LoadError::invalid("icons.fallback", err.to_string()))?;

    let prewarm = icons
        .prewarm
        .unwrap_or_else(|| DEFAULT_PREWARM.iter().map(|name| name.to_string()).collect());
    for name in &prewarm {
        if name.is_empty() || name.contains(':') {
            return Err(LoadError::invalid(
                "icons.prewarm",
                format!("`{name}` is not a collection name"),
            ));
        }
    }

    Ok(IconSettings {
        data_dir,
        fallback,
        prewarm,
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawIconSettings {
    data_dir: Option<PathBuf>,
    fallback: Option<String>,
    prewarm: Option<Vec<String>>,
}
