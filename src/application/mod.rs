pub mod app_error;
pub mod formatting;
pub mod ports;
pub mod use_cases;
pub mod validators;
