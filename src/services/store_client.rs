//! Bookmark Store client for Marksync.
//!
//! The Store is an external access-controlled table of bookmark rows. This
//! module defines the `BookmarkStore` trait the rest of the crate consumes
//! and an HTTP implementation against the hosted REST endpoint.

use serde::Serialize;

use crate::types::bookmark::Bookmark;
use crate::types::errors::StoreError;

/// Trait defining the request/response operations consumed from the Store.
///
/// Ownership on write is untrusted input: the Store re-validates `owner_id`
/// against the authenticated identity behind every call. Nothing in this
/// crate enforces it locally.
pub trait BookmarkStore {
    /// Current rows for the owner, newest-first.
    fn list_by_owner(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Bookmark>, StoreError>> + Send;

    /// Create a row. The Store assigns the identifier and timestamp.
    fn insert(
        &self,
        owner_id: &str,
        title: &str,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Bookmark, StoreError>> + Send;

    /// Delete a row by identifier, scoped to the acting user by the Store's
    /// row policy. Deleting an already-absent row succeeds.
    fn delete_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

#[derive(Serialize)]
struct NewRow<'a> {
    owner_id: &'a str,
    title: &'a str,
    url: &'a str,
}

/// Store client backed by the hosted REST API.
pub struct HttpStoreClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl HttpStoreClient {
    /// `base_url` is the API root (no trailing slash); `access_token` is the
    /// session credential issued by the identity provider.
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    fn rows_url(&self) -> String {
        format!("{}/bookmarks", self.base_url)
    }

    /// Map a non-success response onto a `StoreError`.
    async fn response_error(response: reqwest::Response) -> StoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => StoreError::AccessDenied(body),
            409 | 422 => StoreError::ConstraintViolation(body),
            _ => StoreError::ApiError(format!("{}: {}", status, body)),
        }
    }
}

impl BookmarkStore for HttpStoreClient {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        let response = self
            .http
            .get(self.rows_url())
            .query(&[("owner_id", owner_id), ("order", "created_at.desc")])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        response
            .json::<Vec<Bookmark>>()
            .await
            .map_err(|e| StoreError::ApiError(e.to_string()))
    }

    async fn insert(
        &self,
        owner_id: &str,
        title: &str,
        url: &str,
    ) -> Result<Bookmark, StoreError> {
        let response = self
            .http
            .post(self.rows_url())
            .bearer_auth(&self.access_token)
            .json(&NewRow {
                owner_id,
                title,
                url,
            })
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::response_error(response).await);
        }
        response
            .json::<Bookmark>()
            .await
            .map_err(|e| StoreError::ApiError(e.to_string()))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(format!("{}/{}", self.rows_url(), id))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| StoreError::NetworkError(e.to_string()))?;

        // 404 counts as success: the row is gone either way.
        if !response.status().is_success() && response.status().as_u16() != 404 {
            return Err(Self::response_error(response).await);
        }
        Ok(())
    }
}
