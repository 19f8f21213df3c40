// Application state (AppState)

use crate::core::config::Config;
use crate::metrics::collector::Metrics;
use crate::security::{csrf::CsrfStore, password::PasswordHasher};
use crate::stores::registration_store::RegistrationStore;
use crate::validation::rules::RuleTable;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Shared application state
///
/// Built once at startup; request handlers only read it. Every field is
/// wrapped in Arc for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Registration table
    pub store: Arc<RegistrationStore>,

    /// Validation rules for the form fields
    pub rules: Arc<RuleTable>,

    /// Argon2id hasher with the configured work factor
    pub hasher: Arc<PasswordHasher>,

    /// Issued anti-forgery tokens
    pub csrf: Arc<CsrfStore>,

    pub metrics: Arc<Metrics>,

    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: RegistrationStore) -> Result<Self> {
        let config = Arc::new(config);

        let rules = Arc::new(RuleTable::registration(&config.validation));

        let hasher = Arc::new(
            PasswordHasher::new(&config.hashing).context("Failed to build password hasher")?,
        );

        let csrf = Arc::new(CsrfStore::new(
            config.csrf.token_ttl,
            config.csrf.max_tokens,
        ));

        Ok(Self {
            store: Arc::new(store),
            rules,
            hasher,
            csrf,
            metrics: Arc::new(Metrics::new()),
            config,
        })
    }
}
