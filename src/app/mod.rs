// App layer: wires settings to concrete adapters and the controller.

use crate::adapters::seed::seed_source_for;
use crate::adapters::storage::LocalStorage;
use crate::config::Settings;
use crate::core::controller::CatalogueController;
use crate::core::seed::SeedManager;
use crate::core::store::CatalogueStore;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

pub fn build_seed_manager(settings: &Settings) -> Result<SeedManager> {
    match &settings.seed_source {
        Some(location) => Ok(SeedManager::new(seed_source_for(
            location,
            settings.seed_timeout,
        )?)),
        None => Ok(SeedManager::disabled()),
    }
}

/// Builds a controller over the on-disk catalogue. Call `init` on the result
/// before use.
pub fn open_local_catalogue(settings: &Settings) -> Result<CatalogueController<LocalStorage>> {
    settings.validate()?;
    let storage = LocalStorage::new(&settings.data_dir);
    tracing::debug!(
        "Opening catalogue at {}",
        storage.path_for(&settings.storage_key).display()
    );
    let store = CatalogueStore::with_key(storage, settings.storage_key.clone());
    Ok(CatalogueController::new(store, build_seed_manager(settings)?))
}
