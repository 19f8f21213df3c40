// Shared fixtures for handler and client tests

use crate::core::config::{
    AdminConfig, Config, CsrfConfig, DatabaseConfig, HashingConfig, LoggingConfig, ServerConfig,
    ValidationConfig,
};
use crate::core::state::AppState;
use crate::stores::registration_store::RegistrationStore;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "test-api-key";

pub fn create_test_config(dir: &TempDir) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            num_threads: 2,
        },
        database: DatabaseConfig {
            path: dir.path().join("test.db"),
            max_connections: 2,
        },
        // Cheap work factor, tests hash a lot
        hashing: HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        validation: ValidationConfig::default(),
        csrf: CsrfConfig::default(),
        admin: AdminConfig {
            api_key: Some(TEST_API_KEY.to_string()),
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
            console: true,
        },
    }
}

/// Fresh state over a temporary database; keep the `TempDir` alive for the test
pub async fn create_test_state() -> (TempDir, Arc<AppState>) {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let store = RegistrationStore::open(&config.database).await.unwrap();

    let state = AppState::new(config, store).unwrap();
    (dir, Arc::new(state))
}
