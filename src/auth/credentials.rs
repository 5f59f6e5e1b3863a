use std::collections::HashMap;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{PasswordHashConfig, ProvisioningConfig};
use crate::models::AuthenticatedProvider;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("invalid password hash parameters: {0}")]
    InvalidParams(String),
    #[error("password hashing failed: {0}")]
    HashingFailed(String),
}

/// Provider id -> Argon2id PHC string. Built once at startup, read-only afterwards.
#[derive(Debug, Default)]
pub struct CredentialStore {
    hashes: HashMap<String, String>,
}

impl CredentialStore {
    /// Hash the manifest password of the configured provider.
    pub fn from_config(config: &ProvisioningConfig) -> Result<Self, CredentialError> {
        Self::with_credentials(
            &config.password_hash,
            [(config.provider_id.as_str(), config.provider_password.as_str())],
        )
    }

    pub fn with_credentials<'a, I>(
        settings: &PasswordHashConfig,
        credentials: I,
    ) -> Result<Self, CredentialError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| CredentialError::InvalidParams(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut hashes = HashMap::new();
        for (provider_id, password) in credentials {
            let salt = SaltString::generate(&mut OsRng);
            let hash = argon2
                .hash_password(password.as_bytes(), salt.as_salt())
                .map_err(|e| CredentialError::HashingFailed(e.to_string()))?;
            hashes.insert(provider_id.to_string(), hash.to_string());
        }

        info!("Loaded credentials for {} add-on provider(s)", hashes.len());
        Ok(Self { hashes })
    }

    /// True iff `provider_id` is known and `password` matches its hash.
    pub fn verify(&self, provider_id: &str, password: &str) -> bool {
        let Some(stored) = self.hashes.get(provider_id) else {
            debug!("Unknown provider id '{}'", provider_id);
            return false;
        };
        let parsed = match PasswordHash::new(stored) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Stored hash for '{}' is unreadable: {}", provider_id, e);
                return false;
            }
        };
        // Cost parameters come from the PHC string, not from this instance.
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Decode the credentials of a Basic Authorization header (base64 of
    /// "id:password") and check them.
    pub fn authenticate(&self, credentials: &str) -> Result<AuthenticatedProvider, String> {
        let decoded_bytes = general_purpose::STANDARD
            .decode(credentials)
            .map_err(|e| {
                warn!("Base64 decode error: {}", e);
                "Invalid base64 in Basic auth".to_string()
            })?;

        let decoded = String::from_utf8(decoded_bytes).map_err(|e| {
            warn!("Invalid UTF-8 in Basic auth: {}", e);
            "Invalid UTF-8 in Basic auth".to_string()
        })?;

        let (provider_id, password) = decoded.split_once(':').unwrap_or((decoded.as_str(), ""));
        if provider_id.is_empty() {
            return Err("No username in Basic credentials".to_string());
        }

        debug!("Basic auth attempt for provider '{}'", provider_id);
        if self.verify(provider_id, password) {
            Ok(AuthenticatedProvider::new(provider_id))
        } else {
            Err("Wrong provider id or password".to_string())
        }
    }
}
