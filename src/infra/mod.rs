pub mod app;
pub mod billing_client;
pub mod cache;
pub mod config;
pub mod csrf;
pub mod error;
pub mod http_client;
pub mod setup;
