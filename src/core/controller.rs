use crate::core::forms::{validate_brand_form, validate_model_form, FormDraft, ModelDraft};
use crate::core::id::TimestampIdGenerator;
use crate::core::render::{render, CatalogueView};
use crate::core::seed::SeedManager;
use crate::core::state::{AppState, FormMode, ModalKind, ModalState, ModalTarget};
use crate::core::store::CatalogueStore;
use crate::domain::model::Brand;
use crate::domain::ports::{IdGenerator, Storage};
use crate::utils::error::{CatalogueError, ErrorCategory};

pub const MSG_SAVE_FAILED: &str = "Unable to save changes. Please try again.";

/// Result of submitting the open modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved {
        brand_id: String,
        model_id: Option<String>,
    },
    /// Validation failed; the modal stays open showing `message`.
    Rejected { message: String },
    /// Persistence failed; the modal stays open and state is unchanged.
    Failed { message: String },
    /// Nothing to submit, or the submission targets an entity that is gone.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    NotFound,
    Failed { message: String },
}

/// The user's answer to a delete prompt, obtained by the shell beforehand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

/// Owns the application state and keeps it in lockstep with the store.
///
/// Every mutation persists first and only then updates the in-memory state,
/// so a failed write leaves the state exactly as it was. None of the public
/// operations return errors: failures are logged and reported through the
/// outcome enums or the modal's error slot.
pub struct CatalogueController<S: Storage> {
    store: CatalogueStore<S>,
    seed: SeedManager,
    ids: Box<dyn IdGenerator>,
    state: AppState,
}

impl<S: Storage> CatalogueController<S> {
    pub fn new(store: CatalogueStore<S>, seed: SeedManager) -> Self {
        Self {
            store,
            seed,
            ids: Box::new(TimestampIdGenerator),
            state: AppState::default(),
        }
    }

    pub fn with_id_generator(mut self, ids: Box<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &CatalogueStore<S> {
        &self.store
    }

    pub fn view(&self) -> CatalogueView {
        render(&self.state)
    }

    /// Loads the catalogue, seeding an empty store first.
    pub async fn init(&mut self) {
        self.state.brands = self.seed.ensure_seeded(&self.store).await;
        self.state.ensure_active_brand();
        tracing::info!("Catalogue loaded with {} brands", self.state.brands.len());
    }

    pub fn handle_search(&mut self, term: &str) {
        self.state.search_term = term.to_lowercase();
    }

    pub fn set_active_brand(&mut self, brand_id: &str) -> bool {
        if self.state.find_brand(brand_id).is_none() {
            return false;
        }
        self.state.active_brand_id = Some(brand_id.to_string());
        true
    }

    /// Opens the brand form. Editing pre-fills the brand and one row per model;
    /// returns `false` when the brand to edit does not exist.
    pub fn open_brand_modal(&mut self, brand_id: Option<&str>, mode: FormMode) -> bool {
        let modal = match (mode, brand_id) {
            (FormMode::Edit, Some(brand_id)) => {
                let Some(brand) = self.state.find_brand(brand_id) else {
                    tracing::warn!("Cannot edit unknown brand {}", brand_id);
                    return false;
                };
                let mut models: Vec<ModelDraft> = brand
                    .models
                    .iter()
                    .map(|model| ModelDraft::from_model(model, true))
                    .collect();
                if models.is_empty() {
                    models.push(ModelDraft::blank(true));
                }
                ModalState::open(
                    ModalTarget::BrandEdit {
                        brand_id: brand.id.clone(),
                    },
                    format!("Edit {}", brand.name),
                    FormDraft {
                        brand_name: brand.name.clone(),
                        brand_logo: brand.logo_url.clone(),
                        models,
                    },
                )
            }
            _ => ModalState::open(
                ModalTarget::BrandCreate,
                "Add Brand".to_string(),
                FormDraft {
                    models: vec![ModelDraft::blank(true)],
                    ..FormDraft::default()
                },
            ),
        };
        self.state.modal = modal;
        true
    }

    /// Opens the single-model form for `brand_id`.
    pub fn open_model_modal(
        &mut self,
        brand_id: &str,
        model_id: Option<&str>,
        mode: FormMode,
    ) -> bool {
        let Some(brand) = self.state.find_brand(brand_id) else {
            tracing::warn!("Cannot open model form for unknown brand {}", brand_id);
            return false;
        };

        let modal = match (mode, model_id) {
            (FormMode::Edit, Some(model_id)) => {
                let Some(model) = brand.find_model(model_id) else {
                    tracing::warn!("Cannot edit unknown model {} of {}", model_id, brand_id);
                    return false;
                };
                ModalState::open(
                    ModalTarget::ModelEdit {
                        brand_id: brand.id.clone(),
                        model_id: model.id.clone(),
                    },
                    format!("Edit {}", model.name),
                    FormDraft {
                        models: vec![ModelDraft::from_model(model, false)],
                        ..FormDraft::default()
                    },
                )
            }
            _ => ModalState::open(
                ModalTarget::ModelCreate {
                    brand_id: brand.id.clone(),
                },
                format!("Add Model for {}", brand.name),
                FormDraft {
                    models: vec![ModelDraft::blank(false)],
                    ..FormDraft::default()
                },
            ),
        };
        self.state.modal = modal;
        true
    }

    /// Mutable access to the open form's inputs.
    pub fn modal_form_mut(&mut self) -> Option<&mut FormDraft> {
        if self.state.modal.is_open() {
            Some(&mut self.state.modal.form)
        } else {
            None
        }
    }

    /// Appends a blank model row. Only brand forms accept extra rows.
    pub fn add_model_field(&mut self) -> bool {
        if self.state.modal.kind() != Some(ModalKind::Brand) {
            return false;
        }
        self.state.modal.form.models.push(ModelDraft::blank(true));
        true
    }

    pub fn remove_model_field(&mut self, index: usize) -> bool {
        if self.state.modal.kind() != Some(ModalKind::Brand) {
            return false;
        }
        let models = &mut self.state.modal.form.models;
        match models.get(index) {
            Some(row) if row.removable => {
                models.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.state.modal = ModalState::default();
    }

    /// Escape closes an open modal. Returns whether the key was handled.
    pub fn handle_key_down(&mut self, key: &str) -> bool {
        if key == "Escape" && self.state.modal.is_open() {
            self.close_modal();
            return true;
        }
        false
    }

    /// Submits whichever form the modal is showing.
    pub async fn submit_modal(&mut self) -> SubmitOutcome {
        match self.state.modal.kind() {
            Some(ModalKind::Brand) => self.submit_brand_form().await,
            Some(ModalKind::Model) => self.submit_model_form().await,
            None => SubmitOutcome::Ignored,
        }
    }

    pub async fn submit_brand_form(&mut self) -> SubmitOutcome {
        let current_id = match &self.state.modal.target {
            Some(ModalTarget::BrandCreate) => None,
            Some(ModalTarget::BrandEdit { brand_id }) => Some(brand_id.clone()),
            _ => return SubmitOutcome::Ignored,
        };

        let validated = match validate_brand_form(
            &self.state.modal.form,
            &self.state.brands,
            current_id.as_deref(),
        ) {
            Ok(validated) => validated,
            Err(e) => return self.reject(e),
        };
        self.state.modal.error = None;

        let brand_id = current_id.unwrap_or_else(|| self.ids.next_id("brand"));
        let models = validated
            .models
            .into_iter()
            .map(|model| {
                let id = model.id.clone().unwrap_or_else(|| self.ids.next_id("model"));
                model.into_model(id)
            })
            .collect();
        let brand = Brand {
            id: brand_id,
            name: validated.name,
            logo_url: validated.logo_url,
            models,
        };

        let saved = match self.store.save_brand(brand).await {
            Ok(saved) => saved,
            Err(e) => return self.fail(e),
        };

        let brand_id = saved.id.clone();
        tracing::info!("Saved brand {} ({})", saved.name, saved.id);
        self.state.upsert_brand(saved);
        self.state.active_brand_id = Some(brand_id.clone());
        self.close_modal();
        SubmitOutcome::Saved {
            brand_id,
            model_id: None,
        }
    }

    pub async fn submit_model_form(&mut self) -> SubmitOutcome {
        let (brand_id, editing_id) = match &self.state.modal.target {
            Some(ModalTarget::ModelCreate { brand_id }) => (brand_id.clone(), None),
            Some(ModalTarget::ModelEdit { brand_id, model_id }) => {
                (brand_id.clone(), Some(model_id.clone()))
            }
            _ => return SubmitOutcome::Ignored,
        };
        let Some(brand) = self.state.find_brand(&brand_id) else {
            return SubmitOutcome::Ignored;
        };

        let validated =
            match validate_model_form(&self.state.modal.form, brand, editing_id.as_deref()) {
                Ok(validated) => validated,
                Err(e) => return self.reject(e),
            };
        self.state.modal.error = None;

        let persisted = match editing_id {
            Some(model_id) => {
                let model = validated.into_model(model_id);
                self.store.update_model(&brand_id, model).await
            }
            None => {
                let model = validated.into_model(self.ids.next_id("model"));
                self.store.add_model(&brand_id, model).await
            }
        };
        let model = match persisted {
            Ok(model) => model,
            Err(e) => return self.fail(e),
        };

        let model_id = model.id.clone();
        if let Some(brand) = self.state.find_brand_mut(&brand_id) {
            match brand.models.iter_mut().find(|item| item.id == model.id) {
                Some(existing) => *existing = model,
                None => brand.models.push(model),
            }
        }
        tracing::info!("Saved model {} under brand {}", model_id, brand_id);
        self.close_modal();
        SubmitOutcome::Saved {
            brand_id,
            model_id: Some(model_id),
        }
    }

    pub fn brand_delete_prompt(&self, brand_id: &str) -> Option<String> {
        self.state
            .find_brand(brand_id)
            .map(|brand| format!("Are you sure you want to remove {}?", brand.name))
    }

    pub fn model_delete_prompt(&self, brand_id: &str, model_id: &str) -> Option<String> {
        let brand = self.state.find_brand(brand_id)?;
        let model_name = brand
            .find_model(model_id)
            .map(|model| model.name.as_str())
            .unwrap_or("this model");
        Some(format!("Delete {} from {}?", model_name, brand.name))
    }

    /// Deletes a brand and its models once the user has confirmed.
    pub async fn handle_brand_delete(
        &mut self,
        brand_id: &str,
        confirmation: Confirmation,
    ) -> DeleteOutcome {
        if self.state.find_brand(brand_id).is_none() {
            return DeleteOutcome::NotFound;
        }
        if confirmation == Confirmation::Declined {
            return DeleteOutcome::Cancelled;
        }

        if let Err(e) = self.store.delete_brand(brand_id).await {
            tracing::error!("Failed to delete brand {}: {}", brand_id, e);
            return DeleteOutcome::Failed {
                message: e.user_friendly_message(),
            };
        }

        self.state.brands.retain(|brand| brand.id != brand_id);
        self.state.ensure_active_brand();
        tracing::info!("Deleted brand {}", brand_id);
        DeleteOutcome::Deleted
    }

    pub async fn handle_model_delete(
        &mut self,
        brand_id: &str,
        model_id: &str,
        confirmation: Confirmation,
    ) -> DeleteOutcome {
        if self.state.find_brand(brand_id).is_none() {
            return DeleteOutcome::NotFound;
        }
        if confirmation == Confirmation::Declined {
            return DeleteOutcome::Cancelled;
        }

        match self.store.delete_model(brand_id, model_id).await {
            Ok(_) => {}
            Err(e) if e.category() == ErrorCategory::NotFound => {
                tracing::warn!("Brand {} vanished before model delete: {}", brand_id, e);
                return DeleteOutcome::NotFound;
            }
            Err(e) => {
                tracing::error!("Failed to delete model {} of {}: {}", model_id, brand_id, e);
                return DeleteOutcome::Failed {
                    message: e.user_friendly_message(),
                };
            }
        }

        if let Some(brand) = self.state.find_brand_mut(brand_id) {
            brand.models.retain(|model| model.id != model_id);
        }
        tracing::info!("Deleted model {} of brand {}", model_id, brand_id);
        DeleteOutcome::Deleted
    }

    fn reject(&mut self, e: CatalogueError) -> SubmitOutcome {
        let message = e.user_friendly_message();
        tracing::debug!("Form rejected: {}", message);
        self.state.modal.error = Some(message.clone());
        SubmitOutcome::Rejected { message }
    }

    fn fail(&mut self, e: CatalogueError) -> SubmitOutcome {
        tracing::error!("Failed to persist form: {}", e);
        let message = match e.category() {
            ErrorCategory::NotFound => e.user_friendly_message(),
            _ => MSG_SAVE_FAILED.to_string(),
        };
        self.state.modal.error = Some(message.clone());
        SubmitOutcome::Failed { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::core::forms::{MSG_DUPLICATE_BRAND_NAME, MSG_SEATS_INVALID};
    use crate::domain::model::Model;
    use crate::utils::error::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct SequentialIds(AtomicUsize);

    impl IdGenerator for SequentialIds {
        fn next_id(&self, prefix: &str) -> String {
            format!("{}-{}", prefix, self.0.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    /// Reads like an empty store, refuses every write.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        async fn read(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        async fn write(&self, _key: &str, _data: &[u8]) -> Result<()> {
            Err(CatalogueError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    fn acme() -> Brand {
        Brand {
            id: "b1".to_string(),
            name: "Acme".to_string(),
            logo_url: "https://x/a.png".to_string(),
            models: vec![
                Model {
                    id: "m1".to_string(),
                    name: "X1".to_string(),
                    seats: 4,
                    interior_image: "https://x/i.png".to_string(),
                },
                Model {
                    id: "m2".to_string(),
                    name: "X2".to_string(),
                    seats: 2,
                    interior_image: "https://x/j.png".to_string(),
                },
            ],
        }
    }

    fn globex() -> Brand {
        Brand {
            id: "b2".to_string(),
            name: "Globex".to_string(),
            logo_url: "https://x/g.png".to_string(),
            models: vec![],
        }
    }

    async fn controller(brands: Vec<Brand>) -> (CatalogueController<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = CatalogueStore::new(storage.clone());
        store.set_brands(brands).await.unwrap();
        let mut controller = CatalogueController::new(store, SeedManager::disabled())
            .with_id_generator(Box::new(SequentialIds(AtomicUsize::new(0))));
        controller.init().await;
        (controller, storage)
    }

    fn fill_brand(controller: &mut CatalogueController<MemoryStorage>, name: &str, logo: &str) {
        let form = controller.modal_form_mut().unwrap();
        form.brand_name = name.to_string();
        form.brand_logo = logo.to_string();
        form.models[0] = ModelDraft {
            id: None,
            name: "Z1".to_string(),
            seats: "5".to_string(),
            interior_image: "https://x/z.png".to_string(),
            removable: true,
        };
    }

    #[tokio::test]
    async fn test_init_selects_first_brand() {
        let (controller, _) = controller(vec![acme(), globex()]).await;
        assert_eq!(controller.state().brands.len(), 2);
        assert_eq!(controller.state().active_brand_id.as_deref(), Some("b1"));
    }

    #[tokio::test]
    async fn test_create_brand() {
        let (mut controller, _) = controller(vec![acme()]).await;
        assert!(controller.open_brand_modal(None, FormMode::Create));
        assert_eq!(controller.state().modal.title, "Add Brand");
        fill_brand(&mut controller, "Globex", "https://x/g.png");

        let outcome = controller.submit_modal().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Saved {
                brand_id: "brand-1".to_string(),
                model_id: None
            }
        );

        let stored = controller.store().get_brand("brand-1").await.unwrap();
        assert_eq!(stored.name, "Globex");
        assert_eq!(stored.models[0].id, "model-2");
        assert_eq!(stored.models[0].seats, 5);
        assert_eq!(controller.state().brands.len(), 2);
        assert_eq!(controller.state().active_brand_id.as_deref(), Some("brand-1"));
        assert!(!controller.state().modal.is_open());
    }

    #[tokio::test]
    async fn test_edit_brand_keeps_ids_and_replaces_models() {
        let (mut controller, _) = controller(vec![acme(), globex()]).await;
        assert!(controller.open_brand_modal(Some("b1"), FormMode::Edit));
        assert_eq!(controller.state().modal.title, "Edit Acme");
        assert_eq!(controller.state().modal.form.models.len(), 2);

        assert!(controller.remove_model_field(1));
        controller.modal_form_mut().unwrap().brand_name = "Acme Motors".to_string();

        let outcome = controller.submit_brand_form().await;
        assert!(matches!(outcome, SubmitOutcome::Saved { ref brand_id, .. } if brand_id == "b1"));

        let stored = controller.store().get_brand("b1").await.unwrap();
        assert_eq!(stored.name, "Acme Motors");
        assert_eq!(stored.models.len(), 1);
        assert_eq!(stored.models[0].id, "m1");
        assert_eq!(controller.store().get_brands().await.len(), 2);
        assert_eq!(controller.state().find_brand("b1"), Some(&stored));
    }

    #[tokio::test]
    async fn test_duplicate_brand_name_rejected_without_mutation() {
        let (mut controller, storage) = controller(vec![acme()]).await;
        let before = storage.raw(crate::core::store::DEFAULT_STORAGE_KEY).await;

        controller.open_brand_modal(None, FormMode::Create);
        fill_brand(&mut controller, "aCME", "https://x/y.png");
        let outcome = controller.submit_modal().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                message: MSG_DUPLICATE_BRAND_NAME.to_string()
            }
        );
        assert!(controller.state().modal.is_open());
        assert_eq!(
            controller.state().modal.error.as_deref(),
            Some(MSG_DUPLICATE_BRAND_NAME)
        );
        assert_eq!(storage.raw(crate::core::store::DEFAULT_STORAGE_KEY).await, before);
    }

    #[tokio::test]
    async fn test_error_slot_replaced_and_cleared_on_reopen() {
        let (mut controller, _) = controller(vec![acme()]).await;
        controller.open_brand_modal(None, FormMode::Create);

        controller.submit_modal().await;
        assert_eq!(
            controller.state().modal.error.as_deref(),
            Some("Brand name is required.")
        );

        controller.modal_form_mut().unwrap().brand_name = "Globex".to_string();
        controller.submit_modal().await;
        assert_eq!(
            controller.state().modal.error.as_deref(),
            Some("Brand logo URL is required.")
        );

        controller.open_brand_modal(None, FormMode::Create);
        assert_eq!(controller.state().modal.error, None);
    }

    #[tokio::test]
    async fn test_model_create_and_edit() {
        let (mut controller, _) = controller(vec![acme()]).await;

        assert!(controller.open_model_modal("b1", None, FormMode::Create));
        assert_eq!(controller.state().modal.title, "Add Model for Acme");
        assert!(!controller.add_model_field());
        {
            let row = &mut controller.modal_form_mut().unwrap().models[0];
            row.name = "X3".to_string();
            row.seats = "7".to_string();
            row.interior_image = "https://x/k.png".to_string();
        }
        let outcome = controller.submit_modal().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Saved {
                brand_id: "b1".to_string(),
                model_id: Some("model-1".to_string())
            }
        );
        assert_eq!(controller.state().find_brand("b1").unwrap().models.len(), 3);

        assert!(controller.open_model_modal("b1", Some("m1"), FormMode::Edit));
        assert_eq!(controller.state().modal.title, "Edit X1");
        controller.modal_form_mut().unwrap().models[0].seats = "5".to_string();
        controller.submit_modal().await;

        let stored = controller.store().get_brand("b1").await.unwrap();
        assert_eq!(stored.find_model("m1").unwrap().seats, 5);
        assert_eq!(controller.state().find_brand("b1"), Some(&stored));
    }

    #[tokio::test]
    async fn test_negative_seats_rejected_before_persisting() {
        let (mut controller, storage) = controller(vec![acme()]).await;
        let before = storage.raw(crate::core::store::DEFAULT_STORAGE_KEY).await;

        controller.open_model_modal("b1", None, FormMode::Create);
        {
            let row = &mut controller.modal_form_mut().unwrap().models[0];
            row.name = "X9".to_string();
            row.seats = "-1".to_string();
            row.interior_image = "https://x/k.png".to_string();
        }
        let outcome = controller.submit_model_form().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                message: MSG_SEATS_INVALID.to_string()
            }
        );
        assert_eq!(storage.raw(crate::core::store::DEFAULT_STORAGE_KEY).await, before);
    }

    #[tokio::test]
    async fn test_sibling_model_name_conflict() {
        let (mut controller, _) = controller(vec![acme()]).await;
        controller.open_model_modal("b1", Some("m2"), FormMode::Edit);
        controller.modal_form_mut().unwrap().models[0].name = "x1".to_string();

        let outcome = controller.submit_modal().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                message: "x1 is already listed under Acme.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_brand_delete_requires_confirmation() {
        let (mut controller, _) = controller(vec![acme(), globex()]).await;
        assert_eq!(
            controller.brand_delete_prompt("b1").as_deref(),
            Some("Are you sure you want to remove Acme?")
        );

        let outcome = controller
            .handle_brand_delete("b1", Confirmation::Declined)
            .await;
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(controller.store().get_brands().await.len(), 2);

        let outcome = controller.handle_brand_delete("b1", true.into()).await;
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(controller.store().get_brand("b1").await.is_none());
        assert_eq!(controller.state().active_brand_id.as_deref(), Some("b2"));

        controller.handle_brand_delete("b2", Confirmation::Confirmed).await;
        assert_eq!(controller.state().active_brand_id, None);
        assert_eq!(
            controller.handle_brand_delete("b2", Confirmation::Confirmed).await,
            DeleteOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_model_delete() {
        let (mut controller, _) = controller(vec![acme()]).await;
        assert_eq!(
            controller.model_delete_prompt("b1", "m2").as_deref(),
            Some("Delete X2 from Acme?")
        );
        assert_eq!(
            controller.model_delete_prompt("b1", "gone").as_deref(),
            Some("Delete this model from Acme?")
        );

        let outcome = controller
            .handle_model_delete("b1", "m2", Confirmation::Confirmed)
            .await;
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(controller.state().find_brand("b1").unwrap().models.len(), 1);
        assert_eq!(controller.store().get_brand("b1").await.unwrap().models.len(), 1);
    }

    #[tokio::test]
    async fn test_modal_transitions() {
        let (mut controller, _) = controller(vec![acme()]).await;
        assert!(!controller.open_brand_modal(Some("missing"), FormMode::Edit));
        assert!(!controller.open_model_modal("b1", Some("missing"), FormMode::Edit));
        assert!(!controller.state().modal.is_open());

        controller.open_brand_modal(None, FormMode::Create);
        assert!(controller.add_model_field());
        assert_eq!(controller.state().modal.form.models.len(), 2);
        assert!(!controller.handle_key_down("Enter"));
        assert!(controller.handle_key_down("Escape"));
        assert!(!controller.state().modal.is_open());
        assert!(controller.modal_form_mut().is_none());
        assert_eq!(controller.submit_modal().await, SubmitOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_search_and_active_brand() {
        let (mut controller, _) = controller(vec![acme(), globex()]).await;
        controller.handle_search("GLO");
        assert_eq!(controller.state().search_term, "glo");
        assert_eq!(controller.state().filtered_brands().len(), 1);

        assert!(controller.set_active_brand("b2"));
        assert!(!controller.set_active_brand("missing"));
        assert_eq!(controller.state().active_brand_id.as_deref(), Some("b2"));
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_state_and_modal() {
        let store = CatalogueStore::new(ReadOnlyStorage);
        let mut controller = CatalogueController::new(store, SeedManager::disabled());
        controller.init().await;

        controller.open_brand_modal(None, FormMode::Create);
        {
            let form = controller.modal_form_mut().unwrap();
            form.brand_name = "Acme".to_string();
            form.brand_logo = "https://x/a.png".to_string();
            form.models[0].name = "X1".to_string();
            form.models[0].seats = "4".to_string();
            form.models[0].interior_image = "https://x/i.png".to_string();
        }

        let outcome = controller.submit_modal().await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: MSG_SAVE_FAILED.to_string()
            }
        );
        assert!(controller.state().brands.is_empty());
        assert!(controller.state().modal.is_open());
    }
}
