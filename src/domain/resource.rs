use billing_types::{
    AuditLogEntry, Coupon, Customer, Dispute, InvoiceItem, PaymentMethod, PerformanceMetric,
    Price, Product, PromotionCode, Refund, SaasPlan, Subscription,
};
use serde::de::DeserializeOwned;

/// How a row is taken out of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Read-only resource.
    None,
    /// `DELETE {path}/{id}`.
    Delete,
    /// `POST {path}/{id}` with `{"active": false}`; the API never deletes these.
    Archive,
    /// `POST {path}/{id}/{action}`, e.g. payment method `detach`.
    Action(&'static str),
}

/// A collection exposed by the billing API.
pub trait ApiResource: DeserializeOwned + Send + Sync + 'static {
    /// Collection path, e.g. `/v1/customers`.
    const API_PATH: &'static str;
    /// Singular noun used in alerts ("Customer cus_123 created").
    const NOUN: &'static str;
    const REMOVAL: Removal = Removal::None;

    fn id(&self) -> &str;
}

impl ApiResource for Customer {
    const API_PATH: &'static str = "/v1/customers";
    const NOUN: &'static str = "Customer";
    const REMOVAL: Removal = Removal::Delete;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for Subscription {
    const API_PATH: &'static str = "/v1/subscriptions";
    const NOUN: &'static str = "Subscription";
    // Stripe cancels on DELETE.
    const REMOVAL: Removal = Removal::Delete;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for Product {
    const API_PATH: &'static str = "/v1/products";
    const NOUN: &'static str = "Product";
    const REMOVAL: Removal = Removal::Delete;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for Price {
    const API_PATH: &'static str = "/v1/prices";
    const NOUN: &'static str = "Price";
    const REMOVAL: Removal = Removal::Archive;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for Coupon {
    const API_PATH: &'static str = "/v1/coupons";
    const NOUN: &'static str = "Coupon";
    const REMOVAL: Removal = Removal::Delete;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for PromotionCode {
    const API_PATH: &'static str = "/v1/promotion-codes";
    const NOUN: &'static str = "Promotion code";
    const REMOVAL: Removal = Removal::Archive;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for Dispute {
    const API_PATH: &'static str = "/v1/disputes";
    const NOUN: &'static str = "Dispute";

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for Refund {
    const API_PATH: &'static str = "/v1/refunds";
    const NOUN: &'static str = "Refund";

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for InvoiceItem {
    const API_PATH: &'static str = "/v1/invoice-items";
    const NOUN: &'static str = "Invoice item";
    const REMOVAL: Removal = Removal::Delete;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for PaymentMethod {
    const API_PATH: &'static str = "/v1/payment-methods";
    const NOUN: &'static str = "Payment method";
    const REMOVAL: Removal = Removal::Action("detach");

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for AuditLogEntry {
    const API_PATH: &'static str = "/v1/audit-logs";
    const NOUN: &'static str = "Audit log entry";

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for PerformanceMetric {
    const API_PATH: &'static str = "/v1/metrics/performance";
    const NOUN: &'static str = "Metric";

    fn id(&self) -> &str {
        &self.id
    }
}

impl ApiResource for SaasPlan {
    const API_PATH: &'static str = "/v1/saas/plans";
    const NOUN: &'static str = "Plan";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Path of a single item under a collection; the id is percent-encoded.
pub fn item_path<R: ApiResource>(id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("{}/{}", R::API_PATH, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path_encodes_id() {
        assert_eq!(item_path::<Customer>("cus_123"), "/v1/customers/cus_123");
        assert_eq!(
            item_path::<Customer>("../admin?x=1"),
            "/v1/customers/..%2Fadmin%3Fx%3D1"
        );
    }
}
