//! One `AdminResource` description per billing API collection.

mod audit_logs;
mod coupons;
mod customers;
mod disputes;
mod invoice_items;
mod payment_methods;
mod performance;
mod prices;
mod products;
mod promotion_codes;
mod refunds;
mod subscriptions;

use std::collections::HashMap;

use crate::{
    adapters::views::resource::form_value,
    formatting::parse_major_amount,
    validators::{FieldErrors, is_valid_currency, is_valid_stripe_id},
};

const ACTIVE_OPTIONS: &[(&str, &str)] = &[("true", "Active"), ("false", "Inactive")];

/// Required Stripe id with one of `prefixes`; records an error otherwise.
fn required_id(
    form: &HashMap<String, String>,
    name: &str,
    label: &str,
    prefixes: &[&str],
    errors: &mut FieldErrors,
) -> Option<String> {
    match form_value(form, name) {
        None => {
            errors.push(name, format!("{} is required.", label));
            None
        }
        Some(id) if prefixes.iter().any(|p| is_valid_stripe_id(id, p)) => Some(id.to_string()),
        Some(_) => {
            errors.push(
                name,
                format!("{} must start with {}.", label, prefixes.join(" or ")),
            );
            None
        }
    }
}

/// Lowercased currency code, `brl` when left blank.
fn currency_field(form: &HashMap<String, String>, errors: &mut FieldErrors) -> String {
    match form_value(form, "currency") {
        None => "brl".to_string(),
        Some(code) if is_valid_currency(code) => code.to_ascii_lowercase(),
        Some(_) => {
            errors.push("currency", "Currency must be a three-letter code.");
            "brl".to_string()
        }
    }
}

/// Major-unit amount converted to minor units; must be positive.
fn amount_field(
    form: &HashMap<String, String>,
    name: &str,
    label: &str,
    currency: &str,
    required: bool,
    errors: &mut FieldErrors,
) -> Option<i64> {
    match form_value(form, name) {
        None if required => {
            errors.push(name, format!("{} is required.", label));
            None
        }
        None => None,
        Some(raw) => match parse_major_amount(raw, currency) {
            Some(amount) if amount > 0 => Some(amount),
            _ => {
                errors.push(name, format!("{} must be a positive amount.", label));
                None
            }
        },
    }
}

/// Optional non-negative integer.
fn count_field(
    form: &HashMap<String, String>,
    name: &str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<u64> {
    let raw = form_value(form, name)?;
    match raw.parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(name, format!("{} must be a whole number.", label));
            None
        }
    }
}

fn active_status(active: Option<bool>) -> Option<&'static str> {
    active.map(|a| if a { "active" } else { "inactive" })
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
    fn test_required_id() {
        let mut errors = FieldErrors::new();
        let form = form(&[("customer", "cus_123"), ("price", "prod_1")]);

        assert_eq!(
            required_id(&form, "customer", "Customer", &["cus_"], &mut errors).as_deref(),
            Some("cus_123")
        );
        assert!(required_id(&form, "price", "Price", &["price_"], &mut errors).is_none());
        assert!(required_id(&form, "charge", "Charge", &["ch_", "pi_"], &mut errors).is_none());
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["price", "charge"]);
        assert!(errors.to_string().contains("Charge is required."));
    }

    #[test]
    fn test_amount_field() {
        let mut errors = FieldErrors::new();
        let form = form(&[("amount", "49,90"), ("zero", "0")]);

        assert_eq!(
            amount_field(&form, "amount", "Amount", "brl", true, &mut errors),
            Some(4990)
        );
        assert_eq!(amount_field(&form, "zero", "Zero", "brl", true, &mut errors), None);
        assert_eq!(amount_field(&form, "missing", "Missing", "brl", false, &mut errors), None);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["zero"]);
    }

    #[test]
    fn test_currency_defaults_to_brl() {
        let mut errors = FieldErrors::new();
        assert_eq!(currency_field(&form(&[]), &mut errors), "brl");
        assert_eq!(currency_field(&form(&[("currency", "USD")]), &mut errors), "usd");
        assert!(errors.is_empty());
    }
}
