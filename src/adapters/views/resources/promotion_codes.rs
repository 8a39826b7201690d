use std::collections::HashMap;

use billing_types::PromotionCode;
use serde_json::{Value, json};

use super::{ACTIVE_OPTIONS, active_status, count_field};
use crate::{
    adapters::views::{
        components::{FieldKind, FilterField, FormField, code, muted, timestamp, yes_no},
        resource::{AdminResource, RenderContext, form_value},
    },
    formatting::format_number,
    validators::FieldErrors,
};

impl AdminResource for PromotionCode {
    const SLUG: &'static str = "promotion-codes";
    const TITLE: &'static str = "Promotion codes";
    const EMPTY_MESSAGE: &'static str = "No promotion codes found.";
    const REMOVE_LABEL: &'static str = "Deactivate";

    fn columns() -> &'static [&'static str] {
        &["ID", "Code", "Coupon", "Active", "Redeemed", "Expires"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
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
            code(self.code.as_deref().unwrap_or_default()),
            code(self.coupon.as_ref().map(|c| c.id()).unwrap_or_default()),
            yes_no(self.active),
            redeemed,
            timestamp(self.expires_at.as_ref(), ctx.locale),
        ]
    }

    fn status(&self) -> Option<&str> {
        active_status(self.active)
    }

    fn filters() -> Vec<FilterField> {
        vec![
            FilterField::text("code", "Code"),
            FilterField::select("active", "Active", ACTIVE_OPTIONS),
        ]
    }

    fn create_form() -> Option<Vec<FormField>> {
        Some(vec![
            FormField::new("coupon", "Coupon ID", FieldKind::Text).required(),
            FormField::new("code", "Customer-facing code", FieldKind::Text).placeholder("SORRISO10"),
            FormField::new("max_redemptions", "Max redemptions", FieldKind::Integer),
        ])
    }

    fn build_create_body(form: &HashMap<String, String>) -> Result<Value, FieldErrors> {
        let mut errors = FieldErrors::new();
        let coupon = form_value(form, "coupon");
        if coupon.is_none() {
            errors.push("coupon", "Coupon ID is required.");
        }
        let mut body = json!({ "coupon": coupon });

        if let Some(code) = form_value(form, "code") {
            if code.len() <= 500 && code.chars().all(|c| c.is_ascii_alphanumeric()) {
                body["code"] = json!(code.to_ascii_uppercase());
            } else {
                errors.push("code", "Code may only contain letters and digits.");
            }
        }
        if let Some(max) = count_field(form, "max_redemptions", "Max redemptions", &mut errors) {
            body["max_redemptions"] = json!(max);
        }
        errors.into_result(body)
    }
}
