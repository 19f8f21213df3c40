use crate::core::config::DatabaseConfig;
use crate::models::registration::{NewRegistration, UserRegistration};
use crate::utils::time::current_timestamp;
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS user_forms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )
";

/// SQLite-backed storage for registrations
///
/// The store is the only writer of `user_forms`. Each `create` is a single
/// INSERT, so concurrent submissions never share state.
pub struct RegistrationStore {
    pool: SqlitePool,
}

impl RegistrationStore {
    /// Open (creating if needed) the database file and make sure the table exists
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .context(format!("Failed to open database: {}", config.path.display()))?;

        let store = Self { pool };
        store.ensure_schema().await?;

        Ok(store)
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .context("Failed to create user_forms table")?;
        Ok(())
    }

    /// Insert one registration and return the stored row
    pub async fn create(&self, new: NewRegistration) -> Result<UserRegistration> {
        let now = current_timestamp();

        let result = sqlx::query(
            "INSERT INTO user_forms (name, email, password, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to insert registration")?;

        Ok(UserRegistration {
            id: result.last_insert_rowid(),
            name: new.name,
            email: new.email,
            password: new.password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    #[cfg(test)]
    pub async fn find(&self, id: i64) -> Result<Option<UserRegistration>> {
        sqlx::query_as::<_, UserRegistration>(
            "SELECT id, name, email, password, created_at, updated_at FROM user_forms WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to load registration")
    }

    #[cfg(test)]
    pub async fn find_by_email(&self, email: &str) -> Result<Vec<UserRegistration>> {
        sqlx::query_as::<_, UserRegistration>(
            "SELECT id, name, email, password, created_at, updated_at FROM user_forms \
             WHERE email = ? ORDER BY id",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load registrations by email")
    }

    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_forms")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count registrations")?;
        Ok(count)
    }

    /// Cheap round trip used by the health check
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database ping failed")?;
        Ok(())
    }

    /// Close every pooled connection; later queries fail
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
