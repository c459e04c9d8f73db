use std::sync::Arc;

use crate::{config::Config, utils::email::EmailService};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub email: Arc<EmailService>,
}

impl AppState {
    pub fn new(config: Config, email: EmailService) -> Self {
        Self {
            config,
            email: Arc::new(email),
        }
    }
}
