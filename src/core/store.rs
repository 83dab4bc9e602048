use crate::domain::model::{Brand, Model};
use crate::domain::ports::Storage;
use crate::utils::error::{CatalogueError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub const DEFAULT_STORAGE_KEY: &str = "catalogue-brands-v1";

/// Brand repository over a single storage record holding a JSON array of brands.
///
/// Every mutation reads the whole snapshot, applies the change and writes the
/// whole snapshot back. Mutations are serialized through `write_lock` so two
/// callers sharing one store cannot interleave their read-modify-write cycles.
/// Writers in other processes are still last-write-wins.
pub struct CatalogueStore<S: Storage> {
    storage: S,
    key: String,
    write_lock: Mutex<()>,
}

impl<S: Storage> CatalogueStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn get_brands(&self) -> Vec<Brand> {
        self.load().await.into_brands()
    }

    pub async fn get_brand(&self, brand_id: &str) -> Option<Brand> {
        self.load()
            .await
            .into_brands()
            .into_iter()
            .find(|brand| brand.id == brand_id)
    }

    /// Replaces the whole snapshot. Used by seeding.
    pub async fn set_brands(&self, brands: Vec<Brand>) -> Result<Vec<Brand>> {
        let _guard = self.write_lock.lock().await;
        self.persist(&Snapshot::from_brands(brands)).await?;
        Ok(self.load().await.into_brands())
    }

    /// Upsert by id: replaces the brand with the same id, otherwise appends.
    pub async fn save_brand(&self, brand: Brand) -> Result<Brand> {
        if brand.id.trim().is_empty() {
            return Err(CatalogueError::InvalidArgument {
                message: "saveBrand: brand with id required".to_string(),
            });
        }

        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.load().await;
        snapshot.upsert(brand.clone());
        self.persist(&snapshot).await?;
        tracing::debug!("Saved brand {} ({})", brand.id, brand.name);
        Ok(brand)
    }

    /// Removes the brand and, with it, all of its models. Absent ids are a no-op.
    pub async fn delete_brand(&self, brand_id: &str) -> Result<Vec<Brand>> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.load().await;
        snapshot.remove(brand_id);
        self.persist(&snapshot).await?;
        tracing::debug!("Deleted brand {}", brand_id);
        Ok(snapshot.into_brands())
    }

    pub async fn add_model(&self, brand_id: &str, model: Model) -> Result<Model> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.load().await;
        let brand = snapshot
            .find_mut(brand_id)
            .ok_or_else(|| CatalogueError::brand_not_found(brand_id))?;
        brand.models.push(model.clone());
        self.persist(&snapshot).await?;
        tracing::debug!("Added model {} to brand {}", model.id, brand_id);
        Ok(model)
    }

    pub async fn update_model(&self, brand_id: &str, model: Model) -> Result<Model> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.load().await;
        let brand = snapshot
            .find_mut(brand_id)
            .ok_or_else(|| CatalogueError::brand_not_found(brand_id))?;
        let existing = brand
            .models
            .iter_mut()
            .find(|item| item.id == model.id)
            .ok_or_else(|| CatalogueError::model_not_found(&model.id))?;
        *existing = model.clone();
        self.persist(&snapshot).await?;
        tracing::debug!("Updated model {} of brand {}", model.id, brand_id);
        Ok(model)
    }

    /// Returns the brand's remaining models. An absent model is a no-op.
    pub async fn delete_model(&self, brand_id: &str, model_id: &str) -> Result<Vec<Model>> {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.load().await;
        let brand = snapshot
            .find_mut(brand_id)
            .ok_or_else(|| CatalogueError::brand_not_found(brand_id))?;
        brand.models.retain(|model| model.id != model_id);
        let remaining = brand.models.clone();
        self.persist(&snapshot).await?;
        tracing::debug!("Deleted model {} from brand {}", model_id, brand_id);
        Ok(remaining)
    }

    pub async fn clear_all(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.storage.remove(&self.key).await
    }

    /// Missing, unreadable, non-array or unparseable snapshots load as an empty
    /// catalogue. Individual entries that do not decode as brands are hidden
    /// from callers but kept in place so the next write does not drop them.
    async fn load(&self) -> Snapshot {
        let raw = match self.storage.read(&self.key).await {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Snapshot::default(),
            Err(e) => {
                tracing::warn!("Failed to load catalogue from storage: {}", e);
                return Snapshot::default();
            }
        };

        let value: serde_json::Value = match serde_json::from_slice(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to load catalogue from storage: {}", e);
                return Snapshot::default();
            }
        };

        match value {
            serde_json::Value::Array(items) => Snapshot::from_values(items),
            _ => {
                tracing::warn!("Stored catalogue is not an array, treating it as empty");
                Snapshot::default()
            }
        }
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<()> {
        let data = serde_json::to_vec(&snapshot.entries)?;
        self.storage.write(&self.key, &data).await.map_err(|e| {
            tracing::warn!("Failed to persist catalogue to storage: {}", e);
            CatalogueError::Storage {
                message: e.to_string(),
            }
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Entry {
    Brand(Brand),
    Undecodable(serde_json::Value),
}

impl Entry {
    fn id(&self) -> Option<&str> {
        match self {
            Entry::Brand(brand) => Some(&brand.id),
            Entry::Undecodable(value) => value.get("id").and_then(|id| id.as_str()),
        }
    }
}

/// One loaded copy of the stored array, in stored order.
#[derive(Debug, Default)]
struct Snapshot {
    entries: Vec<Entry>,
}

impl Snapshot {
    fn from_brands(brands: Vec<Brand>) -> Self {
        Self {
            entries: brands.into_iter().map(Entry::Brand).collect(),
        }
    }

    fn from_values(items: Vec<serde_json::Value>) -> Self {
        let entries = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match Brand::deserialize(&item) {
                Ok(brand) => Entry::Brand(brand),
                Err(e) => {
                    tracing::warn!("Skipping malformed brand at index {}: {}", index, e);
                    Entry::Undecodable(item)
                }
            })
            .collect();
        Self { entries }
    }

    fn into_brands(self) -> Vec<Brand> {
        self.entries
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::Brand(brand) => Some(brand),
                Entry::Undecodable(_) => None,
            })
            .collect()
    }

    fn find_mut(&mut self, brand_id: &str) -> Option<&mut Brand> {
        self.entries.iter_mut().find_map(|entry| match entry {
            Entry::Brand(brand) if brand.id == brand_id => Some(brand),
            _ => None,
        })
    }

    /// A saved brand also takes the place of an undecodable entry with its id.
    fn upsert(&mut self, brand: Brand) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.id() == Some(brand.id.as_str()))
        {
            Some(entry) => *entry = Entry::Brand(brand),
            None => self.entries.push(Entry::Brand(brand)),
        }
    }

    fn remove(&mut self, brand_id: &str) {
        self.entries.retain(|entry| entry.id() != Some(brand_id));
    }
}
