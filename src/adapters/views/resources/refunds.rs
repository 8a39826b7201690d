use std::collections::HashMap;

use billing_types::Refund;
use serde_json::{Value, json};

use super::{amount_field, currency_field, required_id};
use crate::{
    adapters::views::{
        components::{FieldKind, FilterField, FormField, code, status_badge, text, timestamp},
        resource::{AdminResource, RenderContext, form_value},
    },
    validators::FieldErrors,
};

const REASON_OPTIONS: &[(&str, &str)] = &[
    ("requested_by_customer", "Requested by customer"),
    ("duplicate", "Duplicate"),
    ("fraudulent", "Fraudulent"),
];

impl AdminResource for Refund {
    const SLUG: &'static str = "refunds";
    const TITLE: &'static str = "Refunds";
    const EMPTY_MESSAGE: &'static str = "No refunds found.";

    fn columns() -> &'static [&'static str] {
        &["ID", "Charge", "Amount", "Reason", "Status", "Created"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
        let source = self
            .charge
            .as_ref()
            .or(self.payment_intent.as_ref())
            .map(|s| s.id())
            .unwrap_or_default();
        vec![
            code(&self.id),
            code(source),
            ctx.money(self.amount, self.currency.as_deref()),
            text(&self.reason.as_deref().unwrap_or_default().replace('_', " ")),
            status_badge(self.status.as_deref().unwrap_or_default()),
            timestamp(self.created.as_ref(), ctx.locale),
        ]
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn amount(&self) -> Option<(i64, &str)> {
        Some((self.amount?, self.currency.as_deref()?))
    }

    fn filters() -> Vec<FilterField> {
        vec![
            FilterField::text("charge", "Charge ID"),
            FilterField::text("payment_intent", "Payment intent ID"),
        ]
    }

    fn create_form() -> Option<Vec<FormField>> {
        Some(vec![
            FormField::new("charge", "Charge or payment intent ID", FieldKind::Text)
                .required()
                .placeholder("ch_... or pi_..."),
            FormField::new("amount", "Amount (blank refunds in full)", FieldKind::Money),
            FormField::new("currency", "Currency", FieldKind::Text).placeholder("brl"),
            FormField::new("reason", "Reason", FieldKind::Select(REASON_OPTIONS)),
        ])
    }

    fn build_create_body(form: &HashMap<String, String>) -> Result<Value, FieldErrors> {
        let mut errors = FieldErrors::new();
        let source = required_id(
            form,
            "charge",
            "Charge or payment intent ID",
            &["ch_", "pi_", "py_"],
            &mut errors,
        );
        let currency = currency_field(form, &mut errors);
        let amount = amount_field(form, "amount", "Amount", &currency, false, &mut errors);

        let mut body = json!({});
        match source.as_deref() {
            Some(id) if id.starts_with("pi_") => body["payment_intent"] = json!(id),
            Some(id) => body["charge"] = json!(id),
            None => {}
        }
        if let Some(amount) = amount {
            body["amount"] = json!(amount);
        }
        if let Some(reason) = form_value(form, "reason") {
            if REASON_OPTIONS.iter().any(|(value, _)| *value == reason) {
                body["reason"] = json!(reason);
            } else {
                errors.push("reason", "Choose a refund reason.");
            }
        }
        errors.into_result(body)
    }
}
