pub mod billing_api;
