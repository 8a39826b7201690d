use std::collections::HashMap;

use billing_types::Price;
use serde_json::{Value, json};

use super::{ACTIVE_OPTIONS, active_status, amount_field, currency_field, required_id};
use crate::{
    adapters::views::{
        components::{FieldKind, FilterField, FormField, code, opt_text, text, yes_no},
        resource::{AdminResource, RenderContext, form_value},
    },
    formatting::format_interval,
    validators::FieldErrors,
};

const INTERVAL_OPTIONS: &[(&str, &str)] = &[
    ("month", "Monthly"),
    ("year", "Yearly"),
    ("week", "Weekly"),
    ("day", "Daily"),
    ("one_time", "One-time"),
];

impl AdminResource for Price {
    const SLUG: &'static str = "prices";
    const TITLE: &'static str = "Prices";
    const EMPTY_MESSAGE: &'static str = "No prices found.";
    const REMOVE_LABEL: &'static str = "Archive";

    fn columns() -> &'static [&'static str] {
        &["ID", "Product", "Nickname", "Amount", "Interval", "Active"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
        let recurring = self.recurring.as_ref();
        vec![
            code(&self.id),
            code(self.product.as_ref().map(|p| p.id()).unwrap_or_default()),
            opt_text(self.nickname.as_deref()),
            ctx.money(self.unit_amount, self.currency.as_deref()),
            text(&format_interval(
                recurring.and_then(|r| r.interval.as_deref()),
                recurring.and_then(|r| r.interval_count),
            )),
            yes_no(self.active),
        ]
    }

    fn status(&self) -> Option<&str> {
        active_status(self.active)
    }

    fn amount(&self) -> Option<(i64, &str)> {
        Some((self.unit_amount?, self.currency.as_deref()?))
    }

    fn filters() -> Vec<FilterField> {
        vec![
            FilterField::text("product", "Product ID"),
            FilterField::select("active", "Active", ACTIVE_OPTIONS),
        ]
    }

    fn create_form() -> Option<Vec<FormField>> {
        Some(vec![
            FormField::new("product", "Product ID", FieldKind::Text)
                .required()
                .placeholder("prod_..."),
            FormField::new("unit_amount", "Amount", FieldKind::Money)
                .required()
                .placeholder("99,90"),
            FormField::new("currency", "Currency", FieldKind::Text).placeholder("brl"),
            FormField::new("interval", "Billing interval", FieldKind::Select(INTERVAL_OPTIONS)),
            FormField::new("nickname", "Nickname", FieldKind::Text),
        ])
    }

    fn build_create_body(form: &HashMap<String, String>) -> Result<Value, FieldErrors> {
        let mut errors = FieldErrors::new();
        let product = required_id(form, "product", "Product ID", &["prod_"], &mut errors);
        let currency = currency_field(form, &mut errors);
        let unit_amount = amount_field(form, "unit_amount", "Amount", &currency, true, &mut errors);

        let mut body = json!({
            "product": product,
            "unit_amount": unit_amount,
            "currency": currency,
        });
        match form_value(form, "interval").unwrap_or("month") {
            "one_time" => {}
            interval @ ("day" | "week" | "month" | "year") => {
                body["recurring"] = json!({ "interval": interval });
            }
            _ => errors.push("interval", "Choose a billing interval."),
        }
        if let Some(nickname) = form_value(form, "nickname") {
            body["nickname"] = json!(nickname);
        }
        errors.into_result(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_create_recurring_price() {
        let body = Price::build_create_body(&form(&[
            ("product", "prod_1"),
            ("unit_amount", "199,90"),
            ("interval", "year"),
        ]))
        .unwrap();

        assert_eq!(
            body,
            json!({
                "product": "prod_1",
                "unit_amount": 19990,
                "currency": "brl",
                "recurring": {"interval": "year"}
            })
        );
    }

    #[test]
    fn test_create_one_time_zero_decimal_price() {
        let body = Price::build_create_body(&form(&[
            ("product", "prod_1"),
            ("unit_amount", "1500"),
            ("currency", "JPY"),
            ("interval", "one_time"),
        ]))
        .unwrap();

        assert_eq!(body["unit_amount"], 1500);
        assert_eq!(body["currency"], "jpy");
        assert!(body.get("recurring").is_none());
    }

    #[test]
    fn test_row_formats_amount_and_interval() {
        let price: Price = serde_json::from_value(crate::test_utils::test_price(|_| {})).unwrap();
        let row = price.row(&RenderContext::default());
        assert_eq!(row[3], "R$\u{a0}99,00");
        assert_eq!(row[4], "Monthly");
    }
}
