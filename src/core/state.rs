use crate::core::forms::FormDraft;
use crate::domain::model::Brand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Brand,
    Model,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Which form the modal is showing. Closed is `None` on [`ModalState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalTarget {
    BrandCreate,
    BrandEdit { brand_id: String },
    ModelCreate { brand_id: String },
    ModelEdit { brand_id: String, model_id: String },
}

impl ModalTarget {
    pub fn kind(&self) -> ModalKind {
        match self {
            Self::BrandCreate | Self::BrandEdit { .. } => ModalKind::Brand,
            Self::ModelCreate { .. } | Self::ModelEdit { .. } => ModalKind::Model,
        }
    }

    pub fn mode(&self) -> FormMode {
        match self {
            Self::BrandCreate | Self::ModelCreate { .. } => FormMode::Create,
            Self::BrandEdit { .. } | Self::ModelEdit { .. } => FormMode::Edit,
        }
    }

    pub fn brand_id(&self) -> Option<&str> {
        match self {
            Self::BrandCreate => None,
            Self::BrandEdit { brand_id }
            | Self::ModelCreate { brand_id }
            | Self::ModelEdit { brand_id, .. } => Some(brand_id),
        }
    }

    pub fn model_id(&self) -> Option<&str> {
        match self {
            Self::ModelEdit { model_id, .. } => Some(model_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    pub target: Option<ModalTarget>,
    pub title: String,
    pub form: FormDraft,
    /// Single error slot; a new message replaces the previous one.
    pub error: Option<String>,
}

impl ModalState {
    pub fn open(target: ModalTarget, title: String, form: FormDraft) -> Self {
        Self {
            target: Some(target),
            title,
            form,
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn kind(&self) -> Option<ModalKind> {
        self.target.as_ref().map(ModalTarget::kind)
    }

    pub fn mode(&self) -> Option<FormMode> {
        self.target.as_ref().map(ModalTarget::mode)
    }
}

/// In-memory projection of the store plus transient interaction state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub brands: Vec<Brand>,
    /// Always stored lowercased.
    pub search_term: String,
    pub active_brand_id: Option<String>,
    pub modal: ModalState,
}

impl AppState {
    pub fn find_brand(&self, brand_id: &str) -> Option<&Brand> {
        self.brands.iter().find(|brand| brand.id == brand_id)
    }

    pub fn find_brand_mut(&mut self, brand_id: &str) -> Option<&mut Brand> {
        self.brands.iter_mut().find(|brand| brand.id == brand_id)
    }

    pub fn active_brand(&self) -> Option<&Brand> {
        self.active_brand_id
            .as_deref()
            .and_then(|id| self.find_brand(id))
    }

    pub fn filtered_brands(&self) -> Vec<&Brand> {
        derive_filtered_brands(&self.brands, &self.search_term)
    }

    /// Replaces the brand with the same id, otherwise appends.
    pub fn upsert_brand(&mut self, brand: Brand) {
        match self.find_brand_mut(&brand.id) {
            Some(existing) => *existing = brand,
            None => self.brands.push(brand),
        }
    }

    /// Points `active_brand_id` at the first brand when it no longer refers
    /// to an existing one.
    pub fn ensure_active_brand(&mut self) {
        let valid = self
            .active_brand_id
            .as_deref()
            .is_some_and(|id| self.find_brand(id).is_some());
        if !valid {
            self.active_brand_id = self.brands.first().map(|brand| brand.id.clone());
        }
    }
}

/// Brands whose name or any model name contains `term`, case-insensitively.
/// An empty or whitespace-only term matches everything.
pub fn derive_filtered_brands<'a>(brands: &'a [Brand], term: &str) -> Vec<&'a Brand> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return brands.iter().collect();
    }
    brands.iter().filter(|brand| brand.matches(&term)).collect()
}
