use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::app_error::AppResult;

/// Opaque session token forwarded to the billing API as a bearer credential.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(SecretString::from(raw.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

/// A file picked in the clinic logo form.
#[derive(Debug, Clone)]
pub struct LogoUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Raw access to the billing / SaaS-configuration REST API.
///
/// Implementations return the decoded JSON body of successful responses and
/// map non-2xx statuses to `AppError`. Envelope unwrapping is left to callers.
#[async_trait]
pub trait BillingApi: Send + Sync {
    async fn get(
        &self,
        token: &SessionToken,
        path: &str,
        query: &[(String, String)],
    ) -> AppResult<Value>;

    async fn post(&self, token: &SessionToken, path: &str, body: &Value) -> AppResult<Value>;

    async fn put(&self, token: &SessionToken, path: &str, body: &Value) -> AppResult<Value>;

    async fn delete(&self, token: &SessionToken, path: &str) -> AppResult<Value>;

    /// Multipart upload; the file goes in the `logo` part.
    async fn upload(&self, token: &SessionToken, path: &str, file: LogoUpload)
    -> AppResult<Value>;
}
