use std::collections::HashMap;

use billing_types::InvoiceItem;
use serde_json::{Value, json};

use super::{amount_field, currency_field, required_id};
use crate::{
    adapters::views::{
        components::{FieldKind, FilterField, FormField, code, muted, opt_text, timestamp},
        resource::{AdminResource, RenderContext, form_value},
    },
    validators::FieldErrors,
};

impl AdminResource for InvoiceItem {
    const SLUG: &'static str = "invoice-items";
    const TITLE: &'static str = "Invoice items";
    const EMPTY_MESSAGE: &'static str = "No invoice items found.";
    const NEEDS_CUSTOMER_NAMES: bool = true;

    fn columns() -> &'static [&'static str] {
        &["ID", "Customer", "Description", "Amount", "Invoice", "Date"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
        let invoice = match self.invoice.as_ref() {
            Some(invoice) => code(invoice.id()),
            None => muted("pending"),
        };
        vec![
            code(&self.id),
            ctx.customer_label(self.customer.as_ref().map(|c| c.id())),
            opt_text(self.description.as_deref()),
            ctx.money(self.amount, self.currency.as_deref()),
            invoice,
            timestamp(self.date.as_ref(), ctx.locale),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(if self.invoice.is_some() {
            "invoiced"
        } else {
            "pending"
        })
    }

    fn amount(&self) -> Option<(i64, &str)> {
        Some((self.amount?, self.currency.as_deref()?))
    }

    fn filters() -> Vec<FilterField> {
        vec![FilterField::text("customer", "Customer ID")]
    }

    fn create_form() -> Option<Vec<FormField>> {
        Some(vec![
            FormField::new("customer", "Customer ID", FieldKind::Text)
                .required()
                .placeholder("cus_..."),
            FormField::new("amount", "Amount", FieldKind::Money).required(),
            FormField::new("currency", "Currency", FieldKind::Text).placeholder("brl"),
            FormField::new("description", "Description", FieldKind::Text),
        ])
    }

    fn build_create_body(form: &HashMap<String, String>) -> Result<Value, FieldErrors> {
        let mut errors = FieldErrors::new();
        let customer = required_id(form, "customer", "Customer ID", &["cus_"], &mut errors);
        let currency = currency_field(form, &mut errors);
        let amount = amount_field(form, "amount", "Amount", &currency, true, &mut errors);

        let mut body = json!({
            "customer": customer,
            "amount": amount,
            "currency": currency,
        });
        if let Some(description) = form_value(form, "description") {
            body["description"] = json!(description);
        }
        errors.into_result(body)
    }
}
