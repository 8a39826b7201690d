use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::http::app_state::AppState,
    application::ports::billing_api::BillingApi,
    infra::{
        billing_client::HttpBillingApi, cache::ResponseCache, config::AppConfig, csrf::CsrfSigner,
        error::InfraError,
    },
    use_cases::console::ConsoleUseCases,
};

pub fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    let cache = config.response_cache_ttl.map(ResponseCache::new);
    if let Some(ttl) = config.response_cache_ttl {
        tracing::info!(ttl_secs = ttl.as_secs(), "Response cache enabled");
    }

    let api = HttpBillingApi::new(config.billing_api_url.clone(), cache)?;
    let api_arc = Arc::new(api) as Arc<dyn BillingApi>;

    let csrf = match &config.csrf_secret {
        Some(secret) => CsrfSigner::new(secret.clone()),
        None => {
            tracing::warn!("CSRF_SECRET not set, using a per-process key");
            CsrfSigner::random()
        }
    };

    Ok(AppState {
        config: Arc::new(config),
        console: Arc::new(ConsoleUseCases::new(api_arc)),
        csrf: Arc::new(csrf),
    })
}

pub fn init_tracing(log_file: Option<&Path>) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "billing_console=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), only when LOG_FILE is set
    let json_layer = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(InfraError::LogFile)?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(true)
                    .with_span_list(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
    Ok(())
}
