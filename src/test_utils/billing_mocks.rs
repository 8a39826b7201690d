//! In-memory implementation of the billing API port.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::{
    app_error::AppResult,
    application::ports::billing_api::{BillingApi, LogoUpload, SessionToken},
    infra::billing_client::error_for_status,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Upload,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub token: String,
}

enum Canned {
    Body(Value),
    Status(u16, String),
}

/// Serves canned responses keyed by method and path.
///
/// Unregistered GETs answer with an empty list envelope; other unregistered
/// calls answer `{"success": true}`.
#[derive(Default)]
pub struct InMemoryBillingApi {
    responses: Mutex<HashMap<(Method, String), Canned>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl InMemoryBillingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, method: Method, path: &str, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Canned::Body(body));
        self
    }

    /// Answers with a non-2xx status, mapped exactly like the HTTP client maps it.
    pub fn with_error(self, method: Method, path: &str, status: u16, message: &str) -> Self {
        self.responses.lock().unwrap().insert(
            (method, path.to_string()),
            Canned::Status(status, message.to_string()),
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    fn respond(
        &self,
        method: Method,
        token: &SessionToken,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> AppResult<Value> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            query: query.to_vec(),
            body,
            token: token.expose().to_string(),
        });

        match self.responses.lock().unwrap().get(&(method, path.to_string())) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(status, message)) => Err(error_for_status(*status, message)),
            None if method == Method::Get => Ok(json!({"success": true, "data": []})),
            None => Ok(json!({"success": true})),
        }
    }
}

#[async_trait]
impl BillingApi for InMemoryBillingApi {
    async fn get(
        &self,
        token: &SessionToken,
        path: &str,
        query: &[(String, String)],
    ) -> AppResult<Value> {
        self.respond(Method::Get, token, path, query, None)
    }

    async fn post(&self, token: &SessionToken, path: &str, body: &Value) -> AppResult<Value> {
        self.respond(Method::Post, token, path, &[], Some(body.clone()))
    }

    async fn put(&self, token: &SessionToken, path: &str, body: &Value) -> AppResult<Value> {
        self.respond(Method::Put, token, path, &[], Some(body.clone()))
    }

    async fn delete(&self, token: &SessionToken, path: &str) -> AppResult<Value> {
        self.respond(Method::Delete, token, path, &[], None)
    }

    async fn upload(
        &self,
        token: &SessionToken,
        path: &str,
        file: LogoUpload,
    ) -> AppResult<Value> {
        let meta = json!({
            "file_name": file.file_name,
            "content_type": file.content_type,
            "size": file.bytes.len(),
        });
        self.respond(Method::Upload, token, path, &[], Some(meta))
    }
}
