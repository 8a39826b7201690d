use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{opt_string_or_number, string_or_number};
use crate::timestamp::Timestamp;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditLogEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub action: Option<String>,
    #[serde(deserialize_with = "opt_string_or_number")]
    pub user_id: Option<String>,
    pub user_email: Option<String>,
    pub resource_type: Option<String>,
    #[serde(deserialize_with = "opt_string_or_number")]
    pub resource_id: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub details: Option<Value>,
    #[serde(alias = "timestamp")]
    pub created_at: Option<Timestamp>,
}

impl AuditLogEntry {
    pub fn actor(&self) -> Option<&str> {
        self.user_email.as_deref().or(self.user_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceMetric {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "metric")]
    pub name: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub endpoint: Option<String>,
    #[serde(alias = "timestamp")]
    pub recorded_at: Option<Timestamp>,
}

/// Clinic branding and contact settings managed by the SaaS configuration API.
/// Empty fields serialize as `null` so an update clears them; the logo is
/// managed by its own upload endpoint and is left out when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfiguration {
    pub clinic_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub timezone: Option<String>,
    pub currency: Option<String>,
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaasPlan {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Minor units.
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub interval: Option<String>,
    pub features: Vec<String>,
    pub active: Option<bool>,
    pub trial_days: Option<u32>,
    pub stripe_price_id: Option<String>,
}

/// Aggregates computed by the billing API; amounts are minor units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripeMetrics {
    pub mrr: Option<i64>,
    pub arr: Option<i64>,
    pub revenue: Option<i64>,
    pub arpu: Option<i64>,
    pub ltv: Option<i64>,
    pub currency: Option<String>,
    pub active_subscriptions: Option<u64>,
    pub trialing_subscriptions: Option<u64>,
    pub canceled_subscriptions: Option<u64>,
    pub total_customers: Option<u64>,
    pub new_customers: Option<u64>,
    /// Percentage, e.g. `2.5` for 2.5%.
    pub churn_rate: Option<f64>,
}

impl StripeMetrics {
    pub fn is_empty(&self) -> bool {
        self == &StripeMetrics::default()
    }
}

/// Checkout or billing-portal session; only the redirect target matters here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectSession {
    pub id: Option<String>,
    pub url: Option<String>,
    pub checkout_url: Option<String>,
}

impl RedirectSession {
    pub fn target_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or(self.checkout_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}
