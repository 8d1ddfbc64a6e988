//! Category service.

use crate::api::ApiClient;
use crate::api::dto::CreateCategoryRequest;
use crate::domain::Category;
use crate::error::ClientError;
use crate::session::SessionManager;

/// Lists and creates sport categories.
#[derive(Debug, Clone)]
pub struct CategoryService {
    api: ApiClient,
    sessions: SessionManager,
}

impl CategoryService {
    /// Creates a new `CategoryService`.
    #[must_use]
    pub fn new(api: ApiClient, sessions: SessionManager) -> Self {
        Self { api, sessions }
    }

    /// Lists all categories.
    ///
    /// # Errors
    ///
    /// Returns the backend's error.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.api.list_categories().await
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a blank name,
    /// [`ClientError::NotLoggedIn`] without a token, or the backend's
    /// error.
    pub async fn create_category(&self, name: &str) -> Result<Category, ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::Validation(
                "Category name is required".to_string(),
            ));
        }
        let token = self
            .sessions
            .current()?
            .access_token
            .ok_or(ClientError::NotLoggedIn)?;

        let category = self
            .api
            .create_category(
                &CreateCategoryRequest {
                    category_name: name.to_string(),
                },
                &token,
            )
            .await?;

        tracing::info!(category_id = ?category.id, name = %category.category_name, "category created");
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::MemorySecureStore;

    fn make_service() -> Option<CategoryService> {
        let api = ApiClient::new("http://127.0.0.1:9", None).ok()?;
        Some(CategoryService::new(
            api,
            SessionManager::new(Arc::new(MemorySecureStore::new())),
        ))
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let Some(service) = make_service() else {
            return;
        };
        assert!(matches!(
            service.create_category("   ").await,
            Err(ClientError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn create_requires_token() {
        let Some(service) = make_service() else {
            return;
        };
        assert!(matches!(
            service.create_category("Padel").await,
            Err(ClientError::NotLoggedIn)
        ));
    }
}
