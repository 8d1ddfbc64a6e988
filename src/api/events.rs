//! Event and category endpoints.

use super::ApiClient;
use super::dto::{CreateCategoryRequest, CreateEventRequest};
use crate::domain::{Category, Event, EventId, EventPrice};
use crate::error::ClientError;

impl ApiClient {
    /// `GET /events`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure.
    pub async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        self.get("/events", None).await
    }

    /// `GET /events/{id}`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure.
    pub async fn get_event(&self, id: EventId) -> Result<Event, ClientError> {
        self.get(&format!("/events/{id}"), None).await
    }

    /// `GET /events/{id}/price`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure.
    pub async fn get_event_price(&self, id: EventId) -> Result<EventPrice, ClientError> {
        self.get(&format!("/events/{id}/price"), None).await
    }

    /// `POST /events`, returning the server-confirmed record.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure.
    pub async fn create_event(
        &self,
        request: &CreateEventRequest,
        token: &str,
    ) -> Result<Event, ClientError> {
        self.post("/events", request, Some(token)).await
    }

    /// `DELETE /events/{id}`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure.
    pub async fn delete_event(&self, id: EventId, token: &str) -> Result<(), ClientError> {
        self.delete(&format!("/events/{id}"), Some(token)).await
    }

    /// `GET /categories`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get("/categories", None).await
    }

    /// `POST /categories`
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport or envelope failure.
    pub async fn create_category(
        &self,
        request: &CreateCategoryRequest,
        token: &str,
    ) -> Result<Category, ClientError> {
        self.post("/categories", request, Some(token)).await
    }
}
