use billing_types::PaymentMethod;

use crate::adapters::views::{
    components::{FilterField, code, muted, text, timestamp},
    resource::{AdminResource, RenderContext},
};

const TYPE_OPTIONS: &[(&str, &str)] = &[
    ("card", "Card"),
    ("boleto", "Boleto"),
    ("pix", "Pix"),
];

/// "visa •••• 4242"
fn card_label(method: &PaymentMethod) -> String {
    let Some(card) = method.card.as_ref() else {
        return muted("—");
    };
    let brand = card.brand.as_deref().unwrap_or("card");
    match card.last4.as_deref() {
        Some(last4) => text(&format!("{} •••• {}", brand, last4)),
        None => text(brand),
    }
}

fn expiry(method: &PaymentMethod) -> String {
    match method.card.as_ref().map(|c| (c.exp_month, c.exp_year)) {
        Some((Some(month), Some(year))) => format!("{:02}/{}", month, year),
        _ => muted("—"),
    }
}

impl AdminResource for PaymentMethod {
    const SLUG: &'static str = "payment-methods";
    const TITLE: &'static str = "Payment methods";
    const EMPTY_MESSAGE: &'static str = "No payment methods found.";
    const HAS_DETAIL: bool = true;
    const NEEDS_CUSTOMER_NAMES: bool = true;
    const REMOVE_LABEL: &'static str = "Detach";

    fn columns() -> &'static [&'static str] {
        &["ID", "Customer", "Type", "Card", "Expires", "Created"]
    }

    fn row(&self, ctx: &RenderContext) -> Vec<String> {
        vec![
            code(&self.id),
            ctx.customer_label(self.customer.as_ref().map(|c| c.id())),
            text(self.method_type.as_deref().unwrap_or_default()),
            card_label(self),
            expiry(self),
            timestamp(self.created.as_ref(), ctx.locale),
        ]
    }

    fn detail(&self, ctx: &RenderContext) -> Vec<(&'static str, String)> {
        vec![
            ("ID", code(&self.id)),
            ("Type", text(self.method_type.as_deref().unwrap_or_default())),
            ("Customer", ctx.customer_label(self.customer.as_ref().map(|c| c.id()))),
            ("Card", card_label(self)),
            ("Expires", expiry(self)),
            ("Created", timestamp(self.created.as_ref(), ctx.locale)),
        ]
    }

    fn status(&self) -> Option<&str> {
        self.method_type.as_deref()
    }

    fn filters() -> Vec<FilterField> {
        vec![
            FilterField::text("customer", "Customer ID"),
            FilterField::select("type", "Type", TYPE_OPTIONS),
        ]
    }
}
