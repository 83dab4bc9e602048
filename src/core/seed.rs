use crate::core::store::CatalogueStore;
use crate::domain::model::Brand;
use crate::domain::ports::{SeedSource, Storage};
use crate::utils::error::{CatalogueError, Result};

/// Populates an empty store from a seed document on first run.
pub struct SeedManager {
    source: Option<Box<dyn SeedSource>>,
}

impl SeedManager {
    pub fn new(source: Box<dyn SeedSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// A manager that never seeds; an empty store stays empty.
    pub fn disabled() -> Self {
        Self { source: None }
    }

    /// Returns the stored catalogue, seeding it first when it is empty.
    /// Seed failures are logged and leave the (empty) catalogue untouched.
    pub async fn ensure_seeded<S: Storage>(&self, store: &CatalogueStore<S>) -> Vec<Brand> {
        let existing = store.get_brands().await;
        if !existing.is_empty() {
            return existing;
        }
        let Some(source) = &self.source else {
            return existing;
        };

        match self.seed_from(source.as_ref(), store).await {
            Ok(seeded) => {
                tracing::info!(
                    "Seeded catalogue with {} brands from {}",
                    seeded.len(),
                    source.describe()
                );
                seeded
            }
            Err(e) => {
                tracing::error!(
                    "Failed to seed catalogue data from {}: {}",
                    source.describe(),
                    e
                );
                existing
            }
        }
    }

    async fn seed_from<S: Storage>(
        &self,
        source: &dyn SeedSource,
        store: &CatalogueStore<S>,
    ) -> Result<Vec<Brand>> {
        let serde_json::Value::Array(items) = source.fetch().await? else {
            return Err(CatalogueError::Seed {
                message: "Seed data is not an array".to_string(),
            });
        };

        let brands: Vec<Brand> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(brand) => Some(brand),
                Err(e) => {
                    tracing::warn!("Skipping malformed seed brand at index {}: {}", index, e);
                    None
                }
            })
            .collect();
        store.set_brands(brands.clone()).await?;
        Ok(brands)
    }
}
