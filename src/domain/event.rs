//! Event and category records as returned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EventId;

/// Image shown when an event was created without one.
pub const DEFAULT_IMAGE_URL: &str = "https://example.com/default-image.jpg";

/// A sport category (futsal, badminton, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id. Absent when the backend embeds only the name.
    #[serde(default)]
    pub id: Option<i64>,
    /// Display name.
    pub category_name: String,
}

/// A schedulable activity with capacity, time window and location.
///
/// Records are never mutated in place by the client: they are created
/// via POST, replaced wholesale by a re-fetch and removed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Backend identifier.
    pub id: EventId,
    /// Display name.
    pub event_name: String,
    /// Foreign key of the category.
    #[serde(default)]
    pub category_id: Option<i64>,
    /// Embedded category, when the backend expands the relation.
    #[serde(rename = "Category", alias = "category", default)]
    pub category: Option<Category>,
    /// Start of the time window.
    pub event_start_time: DateTime<Utc>,
    /// End of the time window.
    pub event_end_time: DateTime<Utc>,
    /// Free-text location.
    #[serde(default)]
    pub location: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Capacity.
    #[serde(default)]
    pub number_people: i64,
    /// Cover image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Username of the account that created the event.
    #[serde(default)]
    pub username: String,
}

impl Event {
    /// Category display name, or `"Unknown"` when the relation is missing.
    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map_or("Unknown", |c| c.category_name.as_str())
    }

    /// Image URL, falling back to [`DEFAULT_IMAGE_URL`].
    #[must_use]
    pub fn display_image_url(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_IMAGE_URL)
    }

    /// Returns `true` if the event was created by `username`.
    #[must_use]
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username == username
    }
}

/// Price information for `GET /events/{id}/price`.
///
/// The backend returns either a bare number or an object carrying a
/// `price` field; both decode into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPrice {
    /// `{ "price": 25000, "currency": "IDR" }`
    Detailed {
        /// Price amount.
        price: f64,
        /// Optional currency code.
        #[serde(default)]
        currency: Option<String>,
    },
    /// `25000`
    Bare(f64),
}

impl EventPrice {
    /// Returns the price amount regardless of shape.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        match self {
            Self::Detailed { price, .. } | Self::Bare(price) => *price,
        }
    }
}
