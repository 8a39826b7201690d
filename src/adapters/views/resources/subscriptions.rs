use std::collections::HashMap;

use billing_types::Subscription;
use serde_json::{Value, json};

use super::{count_field, required_id};
use crate::{
    adapters::views::{
        components::{FieldKind, FilterField, FormField, code, muted, status_badge, timestamp, yes_no},
        resource::{AdminResource, RenderContext},
    },
    formatting::format_interval,
    validators::FieldErrors,
};

const STATUS_OPTIONS: &[(&str, &str)] = &[
    ("active", "Active"),
    ("trialing", "Trialing"),
    ("past_due", "Past due"),
    ("unpaid", "Unpaid"),
    ("canceled", "Canceled"),
    ("incomplete", "Incomplete"),
];

fn plan_cell(subscription: &Subscription, ctx: &RenderContext) -> String {
    match subscription.first_price() {
        Some(price) => {
            let interval = price
                .recurring
                .as_ref()
                .map(|r| format_interval(r.interval.as_deref(), r.interval_count));
            format!(
                "{}<div class=\"small text-muted\">{}</div>",
                ctx.money(price.unit_amount, price.currency.as_deref()),
                interval.unwrap_or_else(|| format_interval(None, None))
            )
        }
        None => muted("—"),
    }
}

impl AdminResource for Subscription {
    const SLUG: &'static str = "subscriptions";
    const TITLE: &'static str = "Subscriptions";
    const EMPTY_MESSAGE: &'static str = "No subscriptions found.";
    const HAS_DETAIL: bool = true;
    const NEEDS_CUSTOMER_NAMES: bool = true;
    const REMOVE_LABEL: &'static str = "Cancel";

    fn columns() -> &'static [&'static str] {
        &["ID", "Customer", "Status", "Plan", "Current period end", "Created"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
        vec![
            code(&self.id),
            ctx.customer_label(self.customer_ref()),
            status_badge(self.status.as_deref().unwrap_or_default()),
            plan_cell(self, ctx),
            timestamp(self.current_period_end.as_ref(), ctx.locale),
            timestamp(self.created.as_ref(), ctx.locale),
        ]
    }

    fn detail(&self, ctx: &RenderContext) -> Vec<(&'static str, String)> {
        vec![
            ("ID", code(&self.id)),
            ("Customer", ctx.customer_label(self.customer_ref())),
            ("Status", status_badge(self.status.as_deref().unwrap_or_default())),
            ("Plan", plan_cell(self, ctx)),
            (
                "Price",
                code(self.first_price().map(|p| p.id.as_str()).unwrap_or_default()),
            ),
            (
                "Current period",
                format!(
                    "{} → {}",
                    timestamp(self.current_period_start.as_ref(), ctx.locale),
                    timestamp(self.current_period_end.as_ref(), ctx.locale)
                ),
            ),
            ("Cancels at period end", yes_no(self.cancel_at_period_end)),
            ("Canceled at", timestamp(self.canceled_at.as_ref(), ctx.locale)),
            ("Trial ends", timestamp(self.trial_end.as_ref(), ctx.locale)),
            ("Created", timestamp(self.created.as_ref(), ctx.locale)),
        ]
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn amount(&self) -> Option<(i64, &str)> {
        let price = self.first_price()?;
        Some((price.unit_amount?, price.currency.as_deref()?))
    }

    fn filters() -> Vec<FilterField> {
        vec![
            FilterField::select("status", "Status", STATUS_OPTIONS),
            FilterField::text("customer", "Customer ID"),
        ]
    }

    fn create_form() -> Option<Vec<FormField>> {
        Some(vec![
            FormField::new("customer", "Customer ID", FieldKind::Text)
                .required()
                .placeholder("cus_..."),
            FormField::new("price", "Price ID", FieldKind::Text)
                .required()
                .placeholder("price_..."),
            FormField::new("quantity", "Quantity", FieldKind::Integer).placeholder("1"),
            FormField::new("trial_period_days", "Trial days", FieldKind::Integer),
        ])
    }

    fn build_create_body(form: &HashMap<String, String>) -> Result<Value, FieldErrors> {
        let mut errors = FieldErrors::new();
        let customer = required_id(form, "customer", "Customer ID", &["cus_"], &mut errors);
        let price = required_id(form, "price", "Price ID", &["price_"], &mut errors);
        let quantity = count_field(form, "quantity", "Quantity", &mut errors);
        let trial_days = count_field(form, "trial_period_days", "Trial days", &mut errors);

        if quantity == Some(0) {
            errors.push("quantity", "Quantity must be at least 1.");
        }

        let mut item = json!({ "price": price });
        if let Some(quantity) = quantity {
            item["quantity"] = json!(quantity);
        }
        let mut body = json!({ "customer": customer, "items": [item] });
        if let Some(days) = trial_days.filter(|d| *d > 0) {
            body["trial_period_days"] = json!(days);
        }
        errors.into_result(body)
    }
}
