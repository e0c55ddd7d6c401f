use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::classify::ClassifyPolicy;
use crate::core::emit::EmitOptions;
use crate::infra::layout::{ColumnLayout, TransceiverPolicy};

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Worksheets converted when --sheet is not given
    pub sheets: Vec<String>,

    /// Output header path
    pub output: PathBuf,

    /// Column layout name (built-in revision or a custom layout below)
    pub layout: String,

    /// Transceiver-row policy override (defaults to the layout's own)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transceivers: Option<TransceiverPolicy>,

    /// Length-column labels marking kit rows
    pub kit_labels: Vec<String>,

    /// Custom column layouts, resolvable by name like built-ins
    pub layouts: Vec<ColumnLayout>,

    /// Emitted header boilerplate
    pub emit: EmitOptions,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            sheets: Vec::new(),
            output: PathBuf::from("cable_db.h"),
            layout: "r4".to_string(),
            transceivers: None,
            kit_labels: ClassifyPolicy::default_kit_labels(),
            layouts: Vec::new(),
            emit: EmitOptions::default(),
        }
    }
}

pub fn load_config() -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["cablegen.toml", ".cablegen.toml"];

    for path in &config_paths
    {
        if Path::new(path).exists()
        {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with CABLEGEN_ prefix
    builder = builder.add_source(config::Environment::with_prefix("CABLEGEN").separator("_"));

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("cablegen.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
