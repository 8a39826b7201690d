//! Clinic configuration form and logo upload.

use std::collections::HashMap;

use billing_types::ClinicConfiguration;

use crate::{
    adapters::views::{
        components::{FieldKind, FormField, csrf_input, form_fields},
        resource::form_value,
    },
    formatting::escape_html,
    validators::{
        FieldErrors, is_valid_currency, is_valid_email, is_valid_hex_color, is_valid_name,
        is_valid_phone, is_valid_url,
    },
};

/// Accepted logo content types.
pub const LOGO_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/svg+xml", "image/webp"];

pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

const TIMEZONE_OPTIONS: &[(&str, &str)] = &[
    ("America/Sao_Paulo", "Brasília (America/Sao_Paulo)"),
    ("America/Manaus", "Manaus (America/Manaus)"),
    ("America/Belem", "Belém (America/Belem)"),
    ("America/Fortaleza", "Fortaleza (America/Fortaleza)"),
    ("America/Recife", "Recife (America/Recife)"),
    ("America/Cuiaba", "Cuiabá (America/Cuiaba)"),
    ("America/Rio_Branco", "Rio Branco (America/Rio_Branco)"),
    ("America/Noronha", "Fernando de Noronha (America/Noronha)"),
    ("UTC", "UTC"),
];

const FIELDS: &[FormField] = &[
    FormField::new("clinic_name", "Clinic name", FieldKind::Text).required(),
    FormField::new("email", "Contact email", FieldKind::Email),
    FormField::new("phone", "Phone", FieldKind::Tel).placeholder("+55 11 3333-4444"),
    FormField::new("website", "Website", FieldKind::Url).placeholder("https://"),
    FormField::new("address", "Address", FieldKind::Text),
    FormField::new("city", "City", FieldKind::Text),
    FormField::new("state", "State", FieldKind::Text).placeholder("SP"),
    FormField::new("zip_code", "ZIP code", FieldKind::Text).placeholder("01000-000"),
    FormField::new("timezone", "Timezone", FieldKind::Select(TIMEZONE_OPTIONS)),
    FormField::new("currency", "Currency", FieldKind::Text).placeholder("brl"),
    FormField::new("primary_color", "Primary color", FieldKind::Color),
];

/// Current configuration as form values, for prefilling the form.
pub fn configuration_values(config: &ClinicConfiguration) -> HashMap<String, String> {
    let pairs = [
        ("clinic_name", &config.clinic_name),
        ("email", &config.email),
        ("phone", &config.phone),
        ("website", &config.website),
        ("address", &config.address),
        ("city", &config.city),
        ("state", &config.state),
        ("zip_code", &config.zip_code),
        ("timezone", &config.timezone),
        ("currency", &config.currency),
        ("primary_color", &config.primary_color),
    ];
    pairs
        .into_iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.clone()?)))
        .collect()
}

/// Validates the submitted form. `logo_url` is left unset so the update
/// does not touch the stored logo.
pub fn parse_configuration(
    form: &HashMap<String, String>,
) -> Result<ClinicConfiguration, FieldErrors> {
    let mut errors = FieldErrors::new();
    let value = |name: &str| form_value(form, name).map(str::to_string);

    let clinic_name = value("clinic_name");
    if !clinic_name.as_deref().is_some_and(is_valid_name) {
        errors.push("clinic_name", "Clinic name is required (up to 100 characters).");
    }
    let email = value("email");
    if email.as_deref().is_some_and(|e| !is_valid_email(e)) {
        errors.push("email", "Enter a valid email address.");
    }
    let phone = value("phone");
    if phone.as_deref().is_some_and(|p| !is_valid_phone(p)) {
        errors.push("phone", "Enter a valid phone number.");
    }
    let website = value("website");
    if website.as_deref().is_some_and(|w| !is_valid_url(w)) {
        errors.push("website", "Website must be an http(s) URL.");
    }
    let timezone = value("timezone");
    if let Some(tz) = timezone.as_deref()
        && !TIMEZONE_OPTIONS.iter().any(|(value, _)| *value == tz)
    {
        errors.push("timezone", "Choose a timezone from the list.");
    }
    let currency = value("currency").map(|c| c.to_ascii_lowercase());
    if currency.as_deref().is_some_and(|c| !is_valid_currency(c)) {
        errors.push("currency", "Currency must be a three-letter code.");
    }
    let primary_color = value("primary_color");
    if primary_color.as_deref().is_some_and(|c| !is_valid_hex_color(c)) {
        errors.push("primary_color", "Color must look like #0d6efd.");
    }

    errors.into_result(ClinicConfiguration {
        clinic_name,
        email,
        phone,
        website,
        address: value("address"),
        city: value("city"),
        state: value("state"),
        zip_code: value("zip_code"),
        timezone,
        currency,
        primary_color,
        logo_url: None,
    })
}

pub fn clinic_view(
    config: &ClinicConfiguration,
    values: &HashMap<String, String>,
    csrf_token: &str,
) -> String {
    let logo = match config.logo_url.as_deref() {
        Some(url) if !url.is_empty() => format!(
            r#"<img src="{}" alt="Clinic logo" class="img-thumbnail mb-3" style="max-height: 96px">"#,
            escape_html(url)
        ),
        _ => r#"<p class="text-muted">No logo uploaded.</p>"#.to_string(),
    };
    format!(
        r#"<div class="row g-4"><div class="col-lg-8"><div class="card"><div class="card-body">
<form method="post" action="/admin/clinic">{csrf}{fields}<button type="submit" class="btn btn-primary">Save configuration</button></form>
</div></div></div>
<div class="col-lg-4"><div class="card"><div class="card-body"><h2 class="h6">Logo</h2>{logo}
<form method="post" action="/admin/clinic/logo" enctype="multipart/form-data">{csrf}<div class="mb-3"><input class="form-control" type="file" name="logo" accept="{accept}" required><div class="form-text">PNG, JPEG, SVG or WebP, up to 2 MB.</div></div><button type="submit" class="btn btn-outline-primary">Upload logo</button></form>
</div></div></div></div>"#,
        csrf = csrf_input(csrf_token),
        fields = form_fields(FIELDS, values),
        logo = logo,
        accept = LOGO_CONTENT_TYPES.join(","),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_clinic_configuration;

    fn config() -> ClinicConfiguration {
        serde_json::from_value(test_clinic_configuration(|_| {})).unwrap()
    }

    #[test]
    fn test_values_roundtrip_through_parse() {
        let config = config();
        let values = configuration_values(&config);

        let parsed = parse_configuration(&values).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_cleared_fields_are_sent_as_null() {
        let form = HashMap::from([
            ("clinic_name".to_string(), "Vida".to_string()),
            ("website".to_string(), "  ".to_string()),
            ("phone".to_string(), "".to_string()),
        ]);

        let body = serde_json::to_value(parse_configuration(&form).unwrap()).unwrap();

        assert_eq!(body["clinic_name"], serde_json::json!("Vida"));
        assert!(body["website"].is_null());
        assert!(body.get("phone").is_some_and(serde_json::Value::is_null));
        assert!(body.get("website").is_some());
        assert!(body.get("logo_url").is_none());
    }

    #[test]
    fn test_parse_reports_each_bad_field() {
        let form = HashMap::from([
            ("clinic_name".to_string(), "".to_string()),
            ("website".to_string(), "sorriso.com.br".to_string()),
            ("primary_color".to_string(), "blue".to_string()),
        ]);

        let errors = parse_configuration(&form).unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["clinic_name", "website", "primary_color"]
        );
    }

    #[test]
    fn test_view_escapes_values() {
        let mut values = configuration_values(&config());
        values.insert("clinic_name".to_string(), "<b>Sorriso</b>".to_string());
        let html = clinic_view(&config(), &values, "tok");
        assert!(html.contains("&lt;b&gt;Sorriso&lt;/b&gt;"));
        assert!(html.contains(r#"enctype="multipart/form-data""#));
    }
}
