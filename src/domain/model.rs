use serde::{Deserialize, Serialize};

/// A manufacturer entry in the catalogue. Owns its models exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    #[serde(default)]
    pub models: Vec<Model>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,
    pub name: String,
    pub seats: u32,
    pub interior_image: String,
}

impl Brand {
    pub fn find_model(&self, model_id: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.id == model_id)
    }

    /// Case-insensitive substring match against the brand name or any model name.
    /// `term` must already be lowercased.
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self
                .models
                .iter()
                .any(|model| model.name.to_lowercase().contains(term))
    }
}
