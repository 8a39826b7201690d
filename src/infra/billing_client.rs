use async_trait::async_trait;
use billing_types::{error_message, is_failure};
use reqwest::{Client, RequestBuilder, StatusCode, multipart};
use serde_json::Value;
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::billing_api::{BillingApi, LogoUpload, SessionToken},
    infra::{
        cache::ResponseCache,
        http_client::{try_build_client, try_build_upload_client},
    },
};

/// Maps a non-2xx status and its best error message to an `AppError`.
pub fn error_for_status(status: u16, message: &str) -> AppError {
    let message = if message.trim().is_empty() {
        format!("The billing API answered with status {}.", status)
    } else {
        message.to_string()
    };
    match status {
        401 | 403 => AppError::Unauthorized,
        404 => AppError::NotFound,
        400 | 422 => AppError::InvalidInput(message),
        429 => AppError::RateLimited,
        _ => AppError::Upstream(message),
    }
}

pub struct HttpBillingApi {
    client: Client,
    upload_client: Client,
    base_url: Url,
    cache: Option<ResponseCache>,
}

impl HttpBillingApi {
    pub fn new(base_url: Url, cache: Option<ResponseCache>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: try_build_client()?,
            upload_client: try_build_upload_client()?,
            base_url,
            cache,
        })
    }

    /// Joins an absolute API path onto the base URL, keeping any base path
    /// prefix (e.g. `https://host/api` + `/v1/customers`).
    fn endpoint(&self, path: &str) -> AppResult<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
            .map_err(|e| AppError::Internal(format!("Invalid API path {}: {}", path, e)))
    }

    async fn send(&self, request: RequestBuilder, method: &str, path: &str) -> AppResult<Value> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(method, path, error = %e, "Billing API request failed");
            AppError::Upstream("The billing API could not be reached.".to_string())
        })?;

        handle_response(response, method, path).await
    }

    async fn mutate(&self, request: RequestBuilder, method: &str, path: &str) -> AppResult<Value> {
        let body = self.send(request, method, path).await?;
        if let Some(cache) = &self.cache {
            cache.invalidate(path).await;
        }
        Ok(body)
    }
}

#[async_trait]
impl BillingApi for HttpBillingApi {
    async fn get(
        &self,
        token: &SessionToken,
        path: &str,
        query: &[(String, String)],
    ) -> AppResult<Value> {
        if let Some(cache) = &self.cache
            && let Some(body) = cache.get(token.expose(), path, query).await
        {
            tracing::debug!(path, "Serving cached response");
            return Ok(body);
        }

        let request = self
            .client
            .get(self.endpoint(path)?)
            .bearer_auth(token.expose())
            .query(query);
        let body = self.send(request, "GET", path).await?;

        // `success: false` bodies carry a 200 but are errors; never replay them.
        if let Some(cache) = &self.cache
            && !is_failure(&body)
        {
            cache
                .insert(token.expose(), path, query, body.clone())
                .await;
        }
        Ok(body)
    }

    async fn post(&self, token: &SessionToken, path: &str, body: &Value) -> AppResult<Value> {
        let request = self
            .client
            .post(self.endpoint(path)?)
            .bearer_auth(token.expose())
            .json(body);
        self.mutate(request, "POST", path).await
    }

    async fn put(&self, token: &SessionToken, path: &str, body: &Value) -> AppResult<Value> {
        let request = self
            .client
            .put(self.endpoint(path)?)
            .bearer_auth(token.expose())
            .json(body);
        self.mutate(request, "PUT", path).await
    }

    async fn delete(&self, token: &SessionToken, path: &str) -> AppResult<Value> {
        let request = self
            .client
            .delete(self.endpoint(path)?)
            .bearer_auth(token.expose());
        self.mutate(request, "DELETE", path).await
    }

    async fn upload(
        &self,
        token: &SessionToken,
        path: &str,
        file: LogoUpload,
    ) -> AppResult<Value> {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|_| AppError::InvalidInput("Unsupported file type.".to_string()))?;
        let form = multipart::Form::new().part("logo", part);

        let request = self
            .upload_client
            .post(self.endpoint(path)?)
            .bearer_auth(token.expose())
            .multipart(form);
        self.mutate(request, "UPLOAD", path).await
    }
}

async fn handle_response(
    response: reqwest::Response,
    method: &str,
    path: &str,
) -> AppResult<Value> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to read billing API response: {}", e)))?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| error_message(&body))
            .unwrap_or_default();
        tracing::error!(method, path, status = %status, message = %message, "Billing API error");
        return Err(error_for_status(status.as_u16(), &message));
    }

    if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(method, path, error = %e, "Failed to parse billing API response");
        AppError::Upstream("The billing API returned an unreadable response.".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use axum::{Json, Router, extract::State, routing::get};
    use serde_json::json;

    /// Serves a stub billing API on a random local port; every GET reports how
    /// many GETs the server has answered so far.
    async fn spawn_stub() -> (Url, Arc<AtomicUsize>) {
        async fn customers(State(hits): State<Arc<AtomicUsize>>) -> Json<Value> {
            let hit = hits.fetch_add(1, Ordering::SeqCst) + 1;
            Json(json!({"success": true, "data": [], "meta": {"hit": hit}}))
        }
        async fn coupons(State(hits): State<Arc<AtomicUsize>>) -> Json<Value> {
            hits.fetch_add(1, Ordering::SeqCst);
            Json(json!({"success": false, "message": "Stripe is not configured"}))
        }
        async fn created() -> Json<Value> {
            Json(json!({"success": true, "data": {"id": "cus_1"}}))
        }

        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/v1/customers", get(customers).post(created))
            .route("/v1/coupons", get(coupons))
            .with_state(hits.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (Url::parse(&format!("http://{}", addr)).unwrap(), hits)
    }

    fn cached_api(base: Url) -> HttpBillingApi {
        HttpBillingApi::new(base, Some(ResponseCache::new(Duration::from_secs(60)))).unwrap()
    }

    fn api(base: &str) -> HttpBillingApi {
        HttpBillingApi::new(Url::parse(base).unwrap(), None).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(error_for_status(401, ""), AppError::Unauthorized));
        assert!(matches!(error_for_status(403, "nope"), AppError::Unauthorized));
        assert!(matches!(error_for_status(404, ""), AppError::NotFound));
        assert!(matches!(error_for_status(429, ""), AppError::RateLimited));
        assert!(
            matches!(error_for_status(422, "Invalid email"), AppError::InvalidInput(m) if m == "Invalid email")
        );
        assert!(
            matches!(error_for_status(502, ""), AppError::Upstream(m) if m.contains("502"))
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        assert_eq!(
            api("https://billing.test/api").endpoint("/v1/customers").unwrap().as_str(),
            "https://billing.test/api/v1/customers"
        );
        assert_eq!(
            api("https://billing.test/").endpoint("/v1/prices/price_1").unwrap().as_str(),
            "https://billing.test/v1/prices/price_1"
        );
    }

    #[tokio::test]
    async fn mutation_invalidates_cached_get() {
        let (base, hits) = spawn_stub().await;
        let api = cached_api(base);
        let token = SessionToken::new("sess_test");

        let first = api.get(&token, "/v1/customers", &[]).await.unwrap();
        let again = api.get(&token, "/v1/customers", &[]).await.unwrap();
        assert_eq!(first, again);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        api.post(&token, "/v1/customers", &json!({"email": "a@b.com"}))
            .await
            .unwrap();

        let fresh = api.get(&token, "/v1/customers", &[]).await.unwrap();
        assert_eq!(fresh["meta"]["hit"], json!(2));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failure_bodies_are_not_cached() {
        let (base, hits) = spawn_stub().await;
        let api = cached_api(base);
        let token = SessionToken::new("sess_test");

        for _ in 0..2 {
            let body = api.get(&token, "/v1/coupons", &[]).await.unwrap();
            assert!(is_failure(&body));
        }

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
