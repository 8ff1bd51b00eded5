use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use roofline_core::Entity;

/// A blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    /// `None` = draft. A future timestamp = scheduled.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl BlogPost {
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.published_at, Some(at) if at <= now)
    }
}

impl Entity for BlogPost {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.slug
    }
}
