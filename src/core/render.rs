//! Declarative projection of [`AppState`] for whatever shell draws it.

use crate::core::forms::FormDraft;
use crate::core::state::{AppState, ModalTarget};
use crate::domain::model::{Brand, Model};
use serde::Serialize;

pub const EMPTY_SEARCH_MESSAGE: &str = "No brands match your search.";
pub const EMPTY_CATALOGUE_MESSAGE: &str = "No brands yet. Add a brand to get started.";
pub const EMPTY_MODELS_MESSAGE: &str = "No models added yet. Use \u{201c}Add Model\u{201d} to showcase seat cover work.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandListItem {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub logo_alt: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BrandListView {
    Empty { message: String },
    Items { items: Vec<BrandListItem> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCard {
    pub id: String,
    pub name: String,
    pub interior_image: String,
    pub image_alt: String,
    pub seat_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DetailsView {
    Empty,
    Brand {
        id: String,
        name: String,
        logo_url: String,
        logo_alt: String,
        model_count_label: String,
        models: Vec<ModelCard>,
        empty_message: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalView {
    pub title: String,
    pub show_brand_fields: bool,
    pub can_add_model_rows: bool,
    pub models_legend: String,
    #[serde(skip)]
    pub form: FormDraft,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueView {
    pub brand_list: BrandListView,
    pub details: DetailsView,
    pub modal: Option<ModalView>,
}

pub fn format_seat_label(seats: u32) -> String {
    format!("{} {}", seats, if seats == 1 { "seater" } else { "seaters" })
}

pub fn format_model_count(count: usize) -> String {
    format!("{} {}", count, if count == 1 { "model" } else { "models" })
}

fn by_name<T>(items: &mut [T], name: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| {
        name(a)
            .to_lowercase()
            .cmp(&name(b).to_lowercase())
            .then_with(|| name(a).cmp(name(b)))
    });
}

pub fn render_brand_list(state: &AppState) -> BrandListView {
    let mut brands = state.filtered_brands();
    if brands.is_empty() {
        let message = if state.search_term.is_empty() {
            EMPTY_CATALOGUE_MESSAGE
        } else {
            EMPTY_SEARCH_MESSAGE
        };
        return BrandListView::Empty {
            message: message.to_string(),
        };
    }

    by_name(&mut brands, |brand| brand.name.as_str());
    let active = state.active_brand_id.as_deref();
    BrandListView::Items {
        items: brands
            .into_iter()
            .map(|brand| BrandListItem {
                id: brand.id.clone(),
                name: brand.name.clone(),
                logo_url: brand.logo_url.clone(),
                logo_alt: format!("{} logo", brand.name),
                is_active: Some(brand.id.as_str()) == active,
            })
            .collect(),
    }
}

fn model_card(model: &Model) -> ModelCard {
    ModelCard {
        id: model.id.clone(),
        name: model.name.clone(),
        interior_image: model.interior_image.clone(),
        image_alt: format!("{} interior", model.name),
        seat_label: format_seat_label(model.seats),
    }
}

pub fn render_brand_details(brand: Option<&Brand>) -> DetailsView {
    let Some(brand) = brand else {
        return DetailsView::Empty;
    };

    let mut models: Vec<&Model> = brand.models.iter().collect();
    by_name(&mut models, |model| model.name.as_str());
    DetailsView::Brand {
        id: brand.id.clone(),
        name: brand.name.clone(),
        logo_url: brand.logo_url.clone(),
        logo_alt: format!("{} logo", brand.name),
        model_count_label: format_model_count(brand.models.len()),
        models: models.into_iter().map(model_card).collect(),
        empty_message: brand
            .models
            .is_empty()
            .then(|| EMPTY_MODELS_MESSAGE.to_string()),
    }
}

pub fn render_modal(state: &AppState) -> Option<ModalView> {
    let target = state.modal.target.as_ref()?;
    let (show_brand_fields, models_legend) = match target {
        ModalTarget::BrandCreate | ModalTarget::BrandEdit { .. } => (true, "Models".to_string()),
        ModalTarget::ModelCreate { brand_id } | ModalTarget::ModelEdit { brand_id, .. } => {
            let brand_name = state
                .find_brand(brand_id)
                .map(|brand| brand.name.as_str())
                .unwrap_or_default();
            (false, format!("Model for {}", brand_name))
        }
    };

    Some(ModalView {
        title: state.modal.title.clone(),
        show_brand_fields,
        can_add_model_rows: show_brand_fields,
        models_legend,
        form: state.modal.form.clone(),
        error: state.modal.error.clone(),
    })
}

pub fn render(state: &AppState) -> CatalogueView {
    CatalogueView {
        brand_list: render_brand_list(state),
        details: render_brand_details(state.active_brand()),
        modal: render_modal(state),
    }
}
