use std::collections::HashMap;

use billing_types::Customer;
use serde_json::{Value, json};

use crate::{
    adapters::views::{
        components::{FieldKind, FilterField, FormField, code, opt_text, timestamp, yes_no},
        resource::{AdminResource, RenderContext, form_value},
    },
    validators::{FieldErrors, is_valid_email, is_valid_name, is_valid_phone},
};

impl AdminResource for Customer {
    const SLUG: &'static str = "customers";
    const TITLE: &'static str = "Customers";
    const EMPTY_MESSAGE: &'static str = "No customers found.";
    const HAS_DETAIL: bool = true;

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Phone", "Created"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
        vec![
            code(&self.id),
            opt_text(self.name.as_deref()),
            opt_text(self.email.as_deref()),
            opt_text(self.phone.as_deref()),
            timestamp(self.created.as_ref(), ctx.locale),
        ]
    }

    fn detail(&self, ctx: &RenderContext) -> Vec<(&'static str, String)> {
        vec![
            ("ID", code(&self.id)),
            ("Name", opt_text(self.name.as_deref())),
            ("Email", opt_text(self.email.as_deref())),
            ("Phone", opt_text(self.phone.as_deref())),
            ("Description", opt_text(self.description.as_deref())),
            (
                "Currency",
                opt_text(self.currency.as_deref().map(str::to_uppercase).as_deref()),
            ),
            ("Delinquent", yes_no(self.delinquent)),
            ("Created", timestamp(self.created.as_ref(), ctx.locale)),
        ]
    }

    fn status(&self) -> Option<&str> {
        match self.delinquent {
            Some(true) => Some("delinquent"),
            _ => None,
        }
    }

    fn filters() -> Vec<FilterField> {
        vec![FilterField::text("email", "Email")]
    }

    fn create_form() -> Option<Vec<FormField>> {
        Some(vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("email", "Email", FieldKind::Email).required(),
            FormField::new("phone", "Phone", FieldKind::Tel).placeholder("+55 11 99999-0000"),
            FormField::new("description", "Description", FieldKind::TextArea),
        ])
    }

    fn build_create_body(form: &HashMap<String, String>) -> Result<Value, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = form_value(form, "name").unwrap_or_default();
        if !is_valid_name(name) {
            errors.push("name", "Name is required (up to 100 characters).");
        }
        let email = form_value(form, "email").unwrap_or_default();
        if !is_valid_email(email) {
            errors.push("email", "Enter a valid email address.");
        }
        let phone = form_value(form, "phone");
        if let Some(phone) = phone
            && !is_valid_phone(phone)
        {
            errors.push("phone", "Enter a valid phone number.");
        }

        let mut body = json!({ "name": name, "email": email });
        if let Some(phone) = phone {
            body["phone"] = json!(phone);
        }
        if let Some(description) = form_value(form, "description") {
            body["description"] = json!(description);
        }
        errors.into_result(body)
    }
}
