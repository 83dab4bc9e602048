use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::core::forms::ModelDraft;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "catalogue")]
#[command(about = "Manage a catalogue of brands and their models")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding the catalogue file
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(long)]
    pub storage_key: Option<String>,

    /// Seed document (URL or file path) used when the catalogue is empty
    #[arg(long)]
    pub seed: Option<String>,

    /// Never seed, even when the catalogue is empty
    #[arg(long)]
    pub no_seed: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Print views as JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List brands, optionally filtered by brand or model name
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one brand and its models
    Show { brand_id: String },
    /// Create a brand; each --model is "name,seats,image-url"
    AddBrand {
        #[arg(long)]
        name: String,
        #[arg(long)]
        logo: String,
        #[arg(long = "model")]
        models: Vec<String>,
    },
    /// Edit a brand; passing any --model replaces the whole model list
    EditBrand {
        brand_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        logo: Option<String>,
        #[arg(long = "model")]
        models: Vec<String>,
    },
    DeleteBrand {
        brand_id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    AddModel {
        brand_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        seats: String,
        #[arg(long)]
        image: String,
    },
    EditModel {
        brand_id: String,
        model_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        seats: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    DeleteModel {
        brand_id: String,
        model_id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Seed the catalogue if it is empty
    Seed,
    /// Erase the whole catalogue
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

impl CliConfig {
    /// Loads the config file (if any) and applies command-line overrides.
    pub fn resolve(&self) -> Result<Settings> {
        let file_config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        let mut settings = Settings::from_file_config(&file_config);
        if let Some(data_dir) = &self.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(key) = &self.storage_key {
            settings.storage_key = key.clone();
        }
        if let Some(seed) = &self.seed {
            settings.seed_source = Some(seed.clone());
        }
        if self.no_seed {
            settings.seed_source = None;
        }
        settings.verbose |= self.verbose;
        Ok(settings)
    }
}

/// Parses a `name,seats,image-url` model argument. Missing parts come back
/// empty so form validation reports them.
pub fn parse_model_arg(value: &str) -> ModelDraft {
    let mut parts = value.splitn(3, ',').map(str::trim);
    ModelDraft {
        id: None,
        name: parts.next().unwrap_or_default().to_string(),
        seats: parts.next().unwrap_or_default().to_string(),
        interior_image: parts.next().unwrap_or_default().to_string(),
        removable: true,
    }
}
