use std::fmt;

use url::Url;
use validator::ValidateEmail;

/// Validates that the input looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

/// Validates a phone number as typed by an operator.
/// Rules:
/// - Only digits, spaces and `+ ( ) -`
/// - `+` only as the first character
/// - 10 to 15 digits (Brazilian numbers with area code, or E.164)
pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    if phone.is_empty() {
        return false;
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '(' | ')' | '-'))
    {
        return false;
    }
    if phone.char_indices().any(|(i, c)| c == '+' && i != 0) {
        return false;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (10..=15).contains(&digits)
}

/// Validates an absolute http(s) URL with a host.
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Validates a Stripe-style object id such as `cus_NffrFeUfNV2Hib`.
/// The prefix includes the underscore; the rest must be non-empty ASCII alphanumerics.
pub fn is_valid_stripe_id(id: &str, prefix: &str) -> bool {
    match id.trim().strip_prefix(prefix) {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric()),
        None => false,
    }
}

/// Validates a display name: 1-100 characters, not only whitespace.
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= 100
}

/// Validates an ISO-4217-shaped currency code (three ASCII letters).
pub fn is_valid_currency(code: &str) -> bool {
    let code = code.trim();
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Validates `#rgb` or `#rrggbb`.
pub fn is_valid_hex_color(color: &str) -> bool {
    match color.trim().strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Field-level validation failures for one submitted form.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push((field.to_string(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|(field, _)| field.as_str())
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|(_, m)| m.as_str()).collect();
        write!(f, "{}", messages.join(" "))
    }
}
