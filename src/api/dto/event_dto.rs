//! Request bodies for event and category endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Body of `POST /events`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateEventRequest {
    /// Owner; always the session username.
    pub username: String,
    /// Category foreign key.
    pub category_id: i64,
    /// Display name.
    pub event_name: String,
    /// Start of the time window.
    pub event_start_time: DateTime<Utc>,
    /// End of the time window.
    pub event_end_time: DateTime<Utc>,
    /// Free-text location.
    pub location: String,
    /// Capacity.
    pub number_people: i64,
    /// Free-text description.
    pub description: String,
    /// Cover image URL.
    pub image_url: String,
}

/// Body of `POST /categories`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCategoryRequest {
    /// Display name.
    pub category_name: String,
}
