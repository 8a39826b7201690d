//! JSON fixtures shaped like billing API responses.
//!
//! Each factory returns a complete object with sensible defaults. Use the
//! closure parameter to override specific fields as needed.

use serde_json::{Value, json};

/// Session token accepted by every test route.
pub const TEST_SESSION_TOKEN: &str = "sess_test_token";

/// CSRF secret used by `TestAppStateBuilder`.
pub const TEST_CSRF_SECRET: &str = "test-csrf-secret-0123456789abcdef";

fn with_overrides(mut value: Value, overrides: impl FnOnce(&mut Value)) -> Value {
    overrides(&mut value);
    value
}

/// `{"success": true, "data": [...], "meta": {"total": ...}}`
pub fn list_envelope(items: Vec<Value>, total: Option<u64>) -> Value {
    match total {
        Some(total) => json!({"success": true, "data": items, "meta": {"total": total}}),
        None => json!({"success": true, "data": items}),
    }
}

pub fn object_envelope(object: Value) -> Value {
    json!({"success": true, "data": object})
}

pub fn test_customer(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": "cus_test_1",
            "object": "customer",
            "name": "Clínica Sorriso",
            "email": "financeiro@sorriso.com.br",
            "phone": "+55 11 99999-0000",
            "created": 1_714_564_800,
            "livemode": false
        }),
        overrides,
    )
}

pub fn test_subscription(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": "sub_test_1",
            "object": "subscription",
            "customer": "cus_test_1",
            "status": "active",
            "items": {
                "object": "list",
                "data": [{
                    "id": "si_test_1",
                    "quantity": 1,
                    "price": {
                        "id": "price_test_1",
                        "product": "prod_test_1",
                        "unit_amount": 9900,
                        "currency": "brl",
                        "recurring": {"interval": "month", "interval_count": 1}
                    }
                }]
            },
            "current_period_start": 1_714_564_800,
            "current_period_end": 1_717_243_200,
            "cancel_at_period_end": false,
            "created": 1_714_564_800
        }),
        overrides,
    )
}

pub fn test_product(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": "prod_test_1",
            "object": "product",
            "name": "Plano Clínica",
            "description": "Agenda e prontuário",
            "active": true,
            "created": 1_714_564_800
        }),
        overrides,
    )
}

pub fn test_price(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": "price_test_1",
            "object": "price",
            "product": "prod_test_1",
            "nickname": "Mensal",
            "unit_amount": 9900,
            "currency": "brl",
            "type": "recurring",
            "recurring": {"interval": "month", "interval_count": 1},
            "active": true,
            "created": 1_714_564_800
        }),
        overrides,
    )
}

pub fn test_coupon(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": "WELCOME10",
            "object": "coupon",
            "name": "Boas-vindas",
            "percent_off": 10,
            "duration": "once",
            "times_redeemed": 3,
            "valid": true,
            "created": 1_714_564_800
        }),
        overrides,
    )
}

pub fn test_promotion_code(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": "promo_test_1",
            "object": "promotion_code",
            "code": "SORRISO10",
            "coupon": test_coupon(|_| {}),
            "active": true,
            "times_redeemed": 1,
            "max_redemptions": 50,
            "created": 1_714_564_800
        }),
        overrides,
    )
}

pub fn test_dispute(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": "dp_test_1",
            "object": "dispute",
            "amount": 9900,
            "currency": "brl",
            "charge": "ch_test_1",
            "reason": "fraudulent",
            "status": "needs_response",
            "evidence_details": {"due_by": 1_717_243_200, "has_evidence": false},
            "created": 1_714_564_800
        }),
        overrides,
    )
}

pub fn test_refund(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": "re_test_1",
            "object": "refund",
            "amount": 4900,
            "currency": "brl",
            "charge": "ch_test_1",
            "reason": "requested_by_customer",
            "status": "succeeded",
            "created": 1_714_564_800
        }),
        overrides,
    )
}

pub fn test_invoice_item(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": "ii_test_1",
            "object": "invoiceitem",
            "customer": "cus_test_1",
            "amount": 2500,
            "currency": "brl",
            "description": "Setup fee",
            "date": 1_714_564_800
        }),
        overrides,
    )
}

pub fn test_payment_method(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": "pm_test_1",
            "object": "payment_method",
            "type": "card",
            "customer": "cus_test_1",
            "card": {"brand": "visa", "last4": "4242", "exp_month": 12, "exp_year": 2030},
            "created": 1_714_564_800
        }),
        overrides,
    )
}

pub fn test_audit_log(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": 1,
            "action": "customer.created",
            "user_email": "admin@sorriso.com.br",
            "resource_type": "customer",
            "resource_id": "cus_test_1",
            "ip_address": "10.0.0.1",
            "created_at": "2024-05-01T12:00:00Z"
        }),
        overrides,
    )
}

pub fn test_metric(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": 1,
            "metric": "api_latency",
            "value": 120.5,
            "unit": "ms",
            "endpoint": "/v1/customers",
            "timestamp": "2024-05-01T12:00:00Z"
        }),
        overrides,
    )
}

pub fn test_saas_plan(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "id": 1,
            "name": "Profissional",
            "description": "Para clínicas em crescimento",
            "amount": 19900,
            "currency": "brl",
            "interval": "month",
            "features": ["Agenda ilimitada", "Lembretes por WhatsApp"],
            "active": true,
            "trial_days": 14
        }),
        overrides,
    )
}

pub fn test_clinic_configuration(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "clinic_name": "Clínica Sorriso",
            "email": "contato@sorriso.com.br",
            "phone": "+55 11 3333-4444",
            "website": "https://sorriso.com.br",
            "address": "Rua das Flores, 100",
            "city": "São Paulo",
            "state": "SP",
            "zip_code": "01000-000",
            "timezone": "America/Sao_Paulo",
            "currency": "brl",
            "primary_color": "#0d6efd"
        }),
        overrides,
    )
}

pub fn test_stripe_metrics(overrides: impl FnOnce(&mut Value)) -> Value {
    with_overrides(
        json!({
            "mrr": 1_990_000,
            "arr": 23_880_000,
            "revenue": 5_970_000,
            "arpu": 19900,
            "currency": "brl",
            "active_subscriptions": 100,
            "trialing_subscriptions": 7,
            "canceled_subscriptions": 4,
            "total_customers": 111,
            "new_customers": 9,
            "churn_rate": 3.6
        }),
        overrides,
    )
}
