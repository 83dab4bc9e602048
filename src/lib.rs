pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{FileSeedSource, HttpSeedSource, LocalStorage, MemoryStorage};
pub use config::Settings;
pub use core::controller::{CatalogueController, Confirmation, DeleteOutcome, SubmitOutcome};
pub use core::seed::SeedManager;
pub use core::state::FormMode;
pub use core::store::CatalogueStore;
pub use domain::model::{Brand, Model};
pub use utils::error::{CatalogueError, Result};
