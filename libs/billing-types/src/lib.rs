//! Shared shapes for the billing API consumed by the console.
//!
//! This crate provides:
//! - The `{success, data, meta}` response envelope and the unwrapping rules
//!   for the inconsistent shapes the API actually returns
//! - Lenient entity structs for every resource the console displays
//! - A `Timestamp` that accepts both unix seconds and ISO-8601 strings

mod billing;
mod envelope;
mod ids;
mod payments;
mod platform;
mod timestamp;

pub use billing::{
    Card, Coupon, Customer, Discount, InvoiceItem, ListObject, PaymentMethod, Price, Product,
    PromotionCode, Recurring, Subscription, SubscriptionItem,
};
pub use envelope::{PageMeta, error_message, is_failure, unwrap_items, unwrap_object};
pub use ids::{Expandable, ExpandedRef};
pub use payments::{Dispute, EvidenceDetails, Refund};
pub use platform::{
    AuditLogEntry, ClinicConfiguration, PerformanceMetric, RedirectSession, SaasPlan,
    StripeMetrics,
};
pub use timestamp::Timestamp;
