use std::collections::HashMap;
use std::sync::Arc;

use billing_types::{
    ClinicConfiguration, Customer, PageMeta, RedirectSession, StripeMetrics, error_message,
    is_failure, unwrap_items, unwrap_object,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::billing_api::{BillingApi, LogoUpload, SessionToken},
    domain::{
        pagination::ListQuery,
        resource::{ApiResource, Removal, item_path},
    },
};

pub const STRIPE_METRICS_PATH: &str = "/v1/stripe-metrics";
pub const CLINIC_CONFIGURATION_PATH: &str = "/v1/clinic/configuration";
pub const CLINIC_LOGO_PATH: &str = "/v1/clinic/configuration/logo";
pub const SAAS_CHECKOUT_PATH: &str = "/v1/saas/checkout";
pub const BILLING_PORTAL_PATH: &str = "/v1/billing-portal";

/// Upper bound for the customer lookup used to label rows by name.
const CUSTOMER_LOOKUP_LIMIT: u64 = 100;

/// One loaded page of a collection.
#[derive(Debug, Clone)]
pub struct ListPage<R> {
    pub items: Vec<R>,
    pub meta: Option<PageMeta>,
    /// Rows present in the response that could not be decoded.
    pub skipped: usize,
}

impl<R> ListPage<R> {
    pub fn total(&self) -> Option<u64> {
        self.meta.as_ref().and_then(|m| m.total)
    }
}

pub struct ConsoleUseCases {
    api: Arc<dyn BillingApi>,
}

impl ConsoleUseCases {
    pub fn new(api: Arc<dyn BillingApi>) -> Self {
        Self { api }
    }

    pub async fn list<R: ApiResource>(
        &self,
        token: &SessionToken,
        query: &ListQuery,
    ) -> AppResult<ListPage<R>> {
        let body = self.api.get(token, R::API_PATH, &query.api_params()).await?;
        ensure_success(&body)?;

        let (rows, meta) = unwrap_items(&body);
        let page = decode_rows::<R>(rows, meta);
        if page.skipped > 0 {
            warn!(
                path = R::API_PATH,
                skipped = page.skipped,
                "Dropped rows that did not match the expected shape"
            );
        }
        Ok(page)
    }

    pub async fn get<R: ApiResource>(&self, token: &SessionToken, id: &str) -> AppResult<R> {
        let body = self.api.get(token, &item_path::<R>(id), &[]).await?;
        ensure_success(&body)?;

        let object = unwrap_object(&body).ok_or(AppError::NotFound)?;
        decode(object)
    }

    /// Creates an item; the decoded echo is returned when the API sends one.
    pub async fn create<R: ApiResource>(
        &self,
        token: &SessionToken,
        body: Value,
    ) -> AppResult<Option<R>> {
        let response = self.api.post(token, R::API_PATH, &body).await?;
        ensure_success(&response)?;
        debug!(path = R::API_PATH, "Created item");

        Ok(unwrap_object(&response).and_then(|object| serde_json::from_value(object).ok()))
    }

    /// Removes an item the way the resource allows (delete, archive, detach).
    pub async fn remove<R: ApiResource>(&self, token: &SessionToken, id: &str) -> AppResult<()> {
        let response = match R::REMOVAL {
            Removal::None => {
                return Err(AppError::InvalidInput(format!(
                    "{} items cannot be removed",
                    R::NOUN
                )));
            }
            Removal::Delete => self.api.delete(token, &item_path::<R>(id)).await?,
            Removal::Archive => {
                self.api
                    .post(token, &item_path::<R>(id), &json!({ "active": false }))
                    .await?
            }
            Removal::Action(action) => {
                let path = format!("{}/{}", item_path::<R>(id), action);
                self.api.post(token, &path, &json!({})).await?
            }
        };
        ensure_success(&response)
    }

    /// Best-effort id → display name map. Failures yield an empty map and the
    /// screens fall back to raw ids.
    pub async fn customer_names(&self, token: &SessionToken) -> HashMap<String, String> {
        let query = ListQuery::first_page(CUSTOMER_LOOKUP_LIMIT);
        match self.list::<Customer>(token, &query).await {
            Ok(page) => page
                .items
                .into_iter()
                .filter_map(|customer| {
                    let name = customer.display_name()?.to_string();
                    Some((customer.id, name))
                })
                .collect(),
            Err(err) => {
                warn!(error = %err, "Customer lookup failed, showing raw ids");
                HashMap::new()
            }
        }
    }

    pub async fn stripe_metrics(&self, token: &SessionToken) -> AppResult<StripeMetrics> {
        let body = self.api.get(token, STRIPE_METRICS_PATH, &[]).await?;
        ensure_success(&body)?;
        match unwrap_object(&body) {
            Some(object) => decode(object),
            None => Ok(StripeMetrics::default()),
        }
    }

    pub async fn clinic_configuration(
        &self,
        token: &SessionToken,
    ) -> AppResult<ClinicConfiguration> {
        let body = self.api.get(token, CLINIC_CONFIGURATION_PATH, &[]).await?;
        ensure_success(&body)?;
        match unwrap_object(&body) {
            Some(object) => decode(object),
            None => Ok(ClinicConfiguration::default()),
        }
    }

    pub async fn update_clinic_configuration(
        &self,
        token: &SessionToken,
        config: &ClinicConfiguration,
    ) -> AppResult<()> {
        let body = serde_json::to_value(config)
            .map_err(|e| AppError::Internal(format!("Failed to encode configuration: {}", e)))?;
        let response = self.api.put(token, CLINIC_CONFIGURATION_PATH, &body).await?;
        ensure_success(&response)
    }

    /// Uploads the logo and returns the stored URL when the API reports it.
    pub async fn upload_clinic_logo(
        &self,
        token: &SessionToken,
        file: LogoUpload,
    ) -> AppResult<Option<String>> {
        let response = self.api.upload(token, CLINIC_LOGO_PATH, file).await?;
        ensure_success(&response)?;
        Ok(unwrap_object(&response).and_then(|object| {
            object
                .get("logo_url")
                .or_else(|| object.get("url"))
                .and_then(Value::as_str)
                .map(str::to_string)
        }))
    }

    /// Starts a plan checkout and returns the URL to send the browser to.
    pub async fn start_checkout(
        &self,
        token: &SessionToken,
        plan_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> AppResult<String> {
        let body = json!({
            "plan_id": plan_id,
            "success_url": success_url,
            "cancel_url": cancel_url,
        });
        let response = self.api.post(token, SAAS_CHECKOUT_PATH, &body).await?;
        redirect_target(&response)
    }

    pub async fn billing_portal(&self, token: &SessionToken, return_url: &str) -> AppResult<String> {
        let body = json!({ "return_url": return_url });
        let response = self.api.post(token, BILLING_PORTAL_PATH, &body).await?;
        redirect_target(&response)
    }
}

fn ensure_success(body: &Value) -> AppResult<()> {
    if is_failure(body) {
        let message = error_message(body).unwrap_or_else(|| "The request failed.".to_string());
        return Err(AppError::InvalidInput(message));
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(object: Value) -> AppResult<T> {
    serde_json::from_value(object)
        .map_err(|e| AppError::Upstream(format!("Unexpected response shape: {}", e)))
}

fn decode_rows<R: DeserializeOwned>(rows: Vec<Value>, meta: Option<PageMeta>) -> ListPage<R> {
    let total_rows = rows.len();
    let items: Vec<R> = rows
        .into_iter()
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect();
    ListPage {
        skipped: total_rows - items.len(),
        items,
        meta,
    }
}

fn redirect_target(response: &Value) -> AppResult<String> {
    ensure_success(response)?;
    let session: RedirectSession = match unwrap_object(response) {
        Some(object) => decode(object)?,
        None => RedirectSession::default(),
    };
    session
        .target_url()
        .map(str::to_string)
        .ok_or_else(|| AppError::Upstream("The billing API did not return a redirect URL.".into()))
}
