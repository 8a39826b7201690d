use std::collections::HashMap;

use billing_types::{Coupon, Discount};
use serde_json::{Value, json};

use super::{amount_field, count_field, currency_field};
use crate::{
    adapters::views::{
        components::{FieldKind, FormField, code, muted, opt_text, text, yes_no},
        resource::{AdminResource, RenderContext, form_value},
    },
    formatting::{format_discount, format_number},
    validators::{FieldErrors, is_valid_name},
};

const DURATION_OPTIONS: &[(&str, &str)] = &[
    ("once", "Once"),
    ("repeating", "Repeating"),
    ("forever", "Forever"),
];

const DISCOUNT_OPTIONS: &[(&str, &str)] = &[("percent", "Percentage"), ("amount", "Fixed amount")];

fn duration_label(coupon: &Coupon) -> String {
    match (coupon.duration.as_deref(), coupon.duration_in_months) {
        (Some("repeating"), Some(months)) => format!("{} months", months),
        (Some(duration), _) => duration.replace('_', " "),
        (None, _) => String::new(),
    }
}

impl AdminResource for Coupon {
    const SLUG: &'static str = "coupons";
    const TITLE: &'static str = "Coupons";
    const EMPTY_MESSAGE: &'static str = "No coupons found.";

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Discount", "Duration", "Redeemed", "Valid"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
        let discount = match self.discount() {
            Discount::Unknown => muted("—"),
            discount => text(&format_discount(&discount, ctx.locale)),
        };
        let redeemed = match (self.times_redeemed, self.max_redemptions) {
            (Some(used), Some(max)) => format!(
                "{} / {}",
                format_number(used as i64, ctx.locale),
                format_number(max as i64, ctx.locale)
            ),
            (Some(used), None) => format_number(used as i64, ctx.locale),
            (None, _) => muted("—"),
        };
        vec![
            code(&self.id),
            opt_text(self.name.as_deref()),
            discount,
            text(&duration_label(self)),
            redeemed,
            yes_no(self.valid),
        ]
    }

    fn status(&self) -> Option<&str> {
        self.valid.map(|v| if v { "valid" } else { "invalid" })
    }

    fn create_form() -> Option<Vec<FormField>> {
        Some(vec![
            FormField::new("id", "Code", FieldKind::Text).placeholder("WELCOME10"),
            FormField::new("name", "Name", FieldKind::Text),
            FormField::new("discount_type", "Discount type", FieldKind::Select(DISCOUNT_OPTIONS)),
            FormField::new("percent_off", "Percent off", FieldKind::Integer),
            FormField::new("amount_off", "Amount off", FieldKind::Money),
            FormField::new("currency", "Currency", FieldKind::Text).placeholder("brl"),
            FormField::new("duration", "Duration", FieldKind::Select(DURATION_OPTIONS)),
            FormField::new("duration_in_months", "Months (repeating)", FieldKind::Integer),
            FormField::new("max_redemptions", "Max redemptions", FieldKind::Integer),
        ])
    }

    fn build_create_body(form: &HashMap<String, String>) -> Result<Value, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut body = json!({});

        if let Some(id) = form_value(form, "id") {
            if id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
                body["id"] = json!(id);
            } else {
                errors.push("id", "Code may only contain letters, digits, - and _.");
            }
        }
        if let Some(name) = form_value(form, "name") {
            if is_valid_name(name) {
                body["name"] = json!(name);
            } else {
                errors.push("name", "Name must be up to 100 characters.");
            }
        }

        match form_value(form, "discount_type").unwrap_or("percent") {
            "amount" => {
                let currency = currency_field(form, &mut errors);
                let amount =
                    amount_field(form, "amount_off", "Amount off", &currency, true, &mut errors);
                body["amount_off"] = json!(amount);
                body["currency"] = json!(currency);
            }
            _ => match form_value(form, "percent_off").map(str::parse::<f64>) {
                Some(Ok(percent)) if percent > 0.0 && percent <= 100.0 => {
                    body["percent_off"] = json!(percent);
                }
                Some(_) => errors.push("percent_off", "Percent off must be between 0 and 100."),
                None => errors.push("percent_off", "Percent off is required."),
            },
        }

        let duration = form_value(form, "duration").unwrap_or("once");
        if !DURATION_OPTIONS.iter().any(|(value, _)| *value == duration) {
            errors.push("duration", "Choose a duration.");
        }
        body["duration"] = json!(duration);
        if duration == "repeating" {
            match count_field(form, "duration_in_months", "Months", &mut errors) {
                Some(months) if months > 0 => body["duration_in_months"] = json!(months),
                _ => errors.push(
                    "duration_in_months",
                    "Repeating coupons need a number of months.",
                ),
            }
        }
        if let Some(max) = count_field(form, "max_redemptions", "Max redemptions", &mut errors) {
            body["max_redemptions"] = json!(max);
        }

        errors.into_result(body)
    }
}
