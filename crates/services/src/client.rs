use std::sync::Arc;

use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use storage::repository::CredentialRepository;

use crate::error::ApiError;

/// The single authenticated-request abstraction.
///
/// Every request reads the bearer token from the credential store and a 401
/// response invalidates it in the same place, so callers never touch token
/// state themselves.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialRepository>,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if `base_url` is not an absolute URL.
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialRepository>,
    ) -> Result<Self, ApiError> {
        let parsed =
            Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        Ok(Self {
            http: Client::new(),
            base_url: parsed.to_string().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    #[must_use]
    pub fn credentials(&self) -> Arc<dyn CredentialRepository> {
        Arc::clone(&self.credentials)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for auth, status, and transport failures.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!("GET {url}");
        let response = self.send(self.http.get(&url)).await?;
        Ok(response.json().await?)
    }

    /// POST `body` as JSON to `path` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` for auth, status, and transport failures.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        debug!("POST {url}");
        let response = self.send(self.http.post(&url).json(body)).await?;
        Ok(response.json().await?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let Some(stored) = self.credentials.load().await? else {
            warn!("no stored credentials, treating request as unauthenticated");
            return Err(ApiError::Unauthorized);
        };

        let response = request.bearer_auth(&stored.token).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("server answered 401, clearing stored credentials");
            self.credentials.clear().await?;
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            warn!("request failed with status {status}");
            return Err(ApiError::Status(status));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryCredentialStore;

    #[test]
    fn rejects_relative_base_url() {
        let store: Arc<dyn CredentialRepository> = Arc::new(InMemoryCredentialStore::new());
        assert!(matches!(
            ApiClient::new("/api", store),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let store: Arc<dyn CredentialRepository> = Arc::new(InMemoryCredentialStore::new());
        let client = ApiClient::new("http://localhost:5000/api/", store).unwrap();
        assert_eq!(
            client.endpoint("/tests/7"),
            "http://localhost:5000/api/tests/7"
        );
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized_without_a_request() {
        let store: Arc<dyn CredentialRepository> = Arc::new(InMemoryCredentialStore::new());
        // Port 9 is discard; nothing should ever be contacted.
        let client = ApiClient::new("http://127.0.0.1:9/api", store).unwrap();
        let err = client.get_json::<serde_json::Value>("/tests").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
