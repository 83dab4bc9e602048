//! Form drafts backing the modal, and the validation pipelines that turn a
//! draft into catalogue records. Every check fails fast: the first violation
//! becomes the single message shown in the modal's error slot.

use crate::domain::model::{Brand, Model};
use crate::utils::error::{CatalogueError, Result};
use crate::utils::validation::is_http_url;
use std::collections::HashSet;

pub const MSG_BRAND_NAME_REQUIRED: &str = "Brand name is required.";
pub const MSG_BRAND_LOGO_REQUIRED: &str = "Brand logo URL is required.";
pub const MSG_BRAND_LOGO_INVALID: &str = "Please provide a valid logo URL (https://).";
pub const MSG_MODEL_REQUIRED: &str = "Please add at least one model.";
pub const MSG_MODEL_NAME_REQUIRED: &str = "Each model requires a name.";
pub const MSG_SEATS_INVALID: &str = "Seats should be a positive number.";
pub const MSG_IMAGE_INVALID: &str = "Provide a valid interior image URL (https://).";
pub const MSG_SINGLE_MODEL: &str = "Exactly one model is required.";
pub const MSG_DUPLICATE_MODEL_NAMES: &str = "Model names within a brand must be unique.";
pub const MSG_DUPLICATE_BRAND_NAME: &str = "Brand name already exists in the catalogue.";

/// One row of model inputs. Values are kept as typed, seats included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelDraft {
    pub id: Option<String>,
    pub name: String,
    pub seats: String,
    pub interior_image: String,
    pub removable: bool,
}

impl ModelDraft {
    pub fn blank(removable: bool) -> Self {
        Self {
            removable,
            ..Self::default()
        }
    }

    pub fn from_model(model: &Model, removable: bool) -> Self {
        Self {
            id: Some(model.id.clone()),
            name: model.name.clone(),
            seats: model.seats.to_string(),
            interior_image: model.interior_image.clone(),
            removable,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub brand_name: String,
    pub brand_logo: String,
    pub models: Vec<ModelDraft>,
}

/// A model that passed field validation. `id` is `None` for new rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedModel {
    pub id: Option<String>,
    pub name: String,
    pub seats: u32,
    pub interior_image: String,
}

impl ValidatedModel {
    pub fn into_model(self, id: String) -> Model {
        Model {
            id,
            name: self.name,
            seats: self.seats,
            interior_image: self.interior_image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBrand {
    pub name: String,
    pub logo_url: String,
    pub models: Vec<ValidatedModel>,
}

/// Strict positive-integer parse; `"4.5"`, `"0"` and `"-1"` are all rejected.
pub fn parse_seats(value: &str) -> Option<u32> {
    match value.trim().parse::<u32>() {
        Ok(seats) if seats > 0 => Some(seats),
        _ => None,
    }
}

fn validate_model_fields(drafts: &[ModelDraft]) -> Result<Vec<ValidatedModel>> {
    drafts
        .iter()
        .map(|draft| {
            let name = draft.name.trim();
            if name.is_empty() {
                return Err(CatalogueError::validation(MSG_MODEL_NAME_REQUIRED));
            }
            let seats = parse_seats(&draft.seats)
                .ok_or_else(|| CatalogueError::validation(MSG_SEATS_INVALID))?;
            let image = draft.interior_image.trim();
            if image.is_empty() || !is_http_url(image) {
                return Err(CatalogueError::validation(MSG_IMAGE_INVALID));
            }
            Ok(ValidatedModel {
                id: draft.id.clone().filter(|id| !id.is_empty()),
                name: name.to_string(),
                seats,
                interior_image: image.to_string(),
            })
        })
        .collect()
}

pub fn has_duplicate_names<'a>(names: impl IntoIterator<Item = &'a str>) -> bool {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .any(|name| !seen.insert(name.to_lowercase()))
}

/// True when another brand (any id other than `current_id`) already uses `name`.
pub fn is_duplicate_brand_name(name: &str, brands: &[Brand], current_id: Option<&str>) -> bool {
    let key = name.to_lowercase();
    brands
        .iter()
        .any(|brand| brand.name.to_lowercase() == key && Some(brand.id.as_str()) != current_id)
}

/// Validates a brand draft against the known brands. `current_id` is the
/// brand being edited, if any.
pub fn validate_brand_form(
    draft: &FormDraft,
    brands: &[Brand],
    current_id: Option<&str>,
) -> Result<ValidatedBrand> {
    let name = draft.brand_name.trim();
    if name.is_empty() {
        return Err(CatalogueError::validation(MSG_BRAND_NAME_REQUIRED));
    }

    let logo = draft.brand_logo.trim();
    if logo.is_empty() {
        return Err(CatalogueError::validation(MSG_BRAND_LOGO_REQUIRED));
    }
    if !is_http_url(logo) {
        return Err(CatalogueError::validation(MSG_BRAND_LOGO_INVALID));
    }

    if draft.models.is_empty() {
        return Err(CatalogueError::validation(MSG_MODEL_REQUIRED));
    }
    let models = validate_model_fields(&draft.models)?;

    if has_duplicate_names(models.iter().map(|model| model.name.as_str())) {
        return Err(CatalogueError::validation(MSG_DUPLICATE_MODEL_NAMES));
    }

    if is_duplicate_brand_name(name, brands, current_id) {
        return Err(CatalogueError::validation(MSG_DUPLICATE_BRAND_NAME));
    }

    Ok(ValidatedBrand {
        name: name.to_string(),
        logo_url: logo.to_string(),
        models,
    })
}

/// Validates a single-model draft for `brand`. `editing_model_id` excludes
/// the model being edited from the sibling-name check.
pub fn validate_model_form(
    draft: &FormDraft,
    brand: &Brand,
    editing_model_id: Option<&str>,
) -> Result<ValidatedModel> {
    match draft.models.len() {
        0 => return Err(CatalogueError::validation(MSG_MODEL_REQUIRED)),
        1 => {}
        _ => return Err(CatalogueError::validation(MSG_SINGLE_MODEL)),
    }

    let model = validate_model_fields(&draft.models)?
        .pop()
        .ok_or_else(|| CatalogueError::validation(MSG_MODEL_REQUIRED))?;

    let key = model.name.to_lowercase();
    let conflict = brand
        .models
        .iter()
        .any(|item| item.name.to_lowercase() == key && Some(item.id.as_str()) != editing_model_id);
    if conflict {
        return Err(CatalogueError::validation(format!(
            "{} is already listed under {}.",
            model.name, brand.name
        )));
    }

    Ok(model)
}
