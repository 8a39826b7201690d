use std::collections::HashMap;

use billing_types::Product;
use serde_json::{Value, json};

use super::{ACTIVE_OPTIONS, active_status};
use crate::{
    adapters::views::{
        components::{FieldKind, FilterField, FormField, code, opt_text, timestamp, yes_no},
        resource::{AdminResource, RenderContext, form_value},
    },
    validators::{FieldErrors, is_valid_name},
};

impl AdminResource for Product {
    const SLUG: &'static str = "products";
    const TITLE: &'static str = "Products";
    const EMPTY_MESSAGE: &'static str = "No products found.";

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Description", "Default price", "Active", "Created"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
        vec![
            code(&self.id),
            opt_text(self.name.as_deref()),
            opt_text(self.description.as_deref()),
            code(self.default_price.as_ref().map(|p| p.id()).unwrap_or_default()),
            yes_no(self.active),
            timestamp(self.created.as_ref(), ctx.locale),
        ]
    }

    fn status(&self) -> Option<&str> {
        active_status(self.active)
    }

    fn filters() -> Vec<FilterField> {
        vec![FilterField::select("active", "Active", ACTIVE_OPTIONS)]
    }

    fn create_form() -> Option<Vec<FormField>> {
        Some(vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("description", "Description", FieldKind::TextArea),
        ])
    }

    fn build_create_body(form: &HashMap<String, String>) -> Result<Value, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = form_value(form, "name").unwrap_or_default();
        if !is_valid_name(name) {
            errors.push("name", "Name is required (up to 100 characters).");
        }
        let mut body = json!({ "name": name });
        if let Some(description) = form_value(form, "description") {
            body["description"] = json!(description);
        }
        errors.into_result(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{formatting::Locale, test_utils::test_product};

    fn ctx() -> RenderContext {
        RenderContext {
            locale: Locale::PtBr,
            ..Default::default()
        }
    }

    #[test]
    fn test_row_default_price() {
        let product: Product = serde_json::from_value(test_product(|_| {})).unwrap();
        let row = product.row(&ctx());
        assert_eq!(row[1], "Plano Clínica");
        assert_eq!(row[3], r#"<span class="text-muted">—</span>"#);

        let product: Product =
            serde_json::from_value(test_product(|p| p["default_price"] = json!("price_test_1")))
                .unwrap();
        assert_eq!(product.row(&ctx())[3], "<code>price_test_1</code>");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let form = HashMap::from([("name".to_string(), "   ".to_string())]);
        let errors = Product::build_create_body(&form).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name"]);
    }
}
