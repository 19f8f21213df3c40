use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::DatabaseConfig;
use crate::security::csrf::CsrfStore;
use crate::stores::registration_store::RegistrationStore;
use crate::utils::time::current_timestamp;

// this runs at boot time
pub async fn open_store(config: &DatabaseConfig) -> Result<RegistrationStore> {
    info!(
        path = %config.path.display(),
        max_connections = config.max_connections,
        "Opening registration database"
    );

    let store = RegistrationStore::open(config)
        .await
        .context("Failed to initialize registration store")?;

    let existing = store.count().await?;
    info!(registrations = existing, "Registration database ready");

    Ok(store)
}

/// Spawn a background task that periodically drops expired CSRF tokens
pub fn spawn_csrf_cleanup_task(csrf: Arc<CsrfStore>, cleanup_interval: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(cleanup_interval));

        loop {
            interval.tick().await;

            let removed = csrf.cleanup_expired(current_timestamp());

            if removed > 0 {
                info!(
                    removed_tokens = removed,
                    active_tokens = csrf.len(),
                    "CSRF token cleanup completed"
                );
            } else {
                debug!("CSRF token cleanup completed, no expired tokens found");
            }
        }
    });
}
