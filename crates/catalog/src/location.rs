use serde::{Deserialize, Serialize};

use roofline_core::Entity;

/// A branch shown in the locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub slug: String,
    pub city: String,
    /// Two-letter state code (e.g. "SP").
    pub state: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Location {
    /// Listing order: state, then city.
    pub fn sort_key(&self) -> (String, String) {
        (self.state.to_uppercase(), self.city.to_lowercase())
    }
}

impl Entity for Location {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.slug
    }
}
