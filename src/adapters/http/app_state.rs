use std::sync::Arc;

use crate::{
    infra::{config::AppConfig, csrf::CsrfSigner},
    use_cases::console::ConsoleUseCases,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub console: Arc<ConsoleUseCases>,
    pub csrf: Arc<CsrfSigner>,
}
