use crate::core::config::HashingConfig;
use anyhow::{anyhow, Result};
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

/// Argon2id password hasher
///
/// Every hash gets a fresh 16-byte random salt. The output is a PHC string
/// (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`) so verification reads the
/// work factor back from the hash itself.
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(config: &HashingConfig) -> Result<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| anyhow!("Invalid Argon2 parameters: {}", e))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, password: &str) -> Result<String> {
        let mut salt_bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut salt_bytes);

        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| anyhow!("Failed to encode salt: {}", e))?;

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow!("Failed to hash password: {}", e))
    }

    /// `Ok(false)` on mismatch, `Err` only when `hash` is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| anyhow!("Invalid password hash: {}", e))?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
