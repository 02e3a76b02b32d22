//! Static credential store and HTTP Basic verification

use std::{collections::HashMap, sync::Arc};

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::{
    config::SecurityConfig,
    error::{AppError, AppResult},
    models::principal::{Principal, Role},
};

struct Credential {
    role: Role,
    password_hash: String,
}

/// Pre-provisioned principals, built once at start-up and shared read-only
#[derive(Clone)]
pub struct AccessControl {
    principals: Arc<HashMap<String, Credential>>,
    /// Verified in place of a real hash when the username is unknown
    decoy_hash: Arc<str>,
    realm: String,
    console_path: String,
}

impl AccessControl {
    /// Build the credential store, hashing any plain passwords from configuration
    pub fn from_config(config: &SecurityConfig) -> AppResult<Self> {
        let console_path = config.console_path.trim_end_matches('/');
        if !console_path.starts_with('/') {
            return Err(AppError::Internal(format!(
                "Console path {:?} must be a non-root path starting with '/'",
                config.console_path
            )));
        }

        let mut principals = HashMap::with_capacity(config.principals.len());

        for entry in &config.principals {
            let password_hash = match (&entry.password, &entry.password_hash) {
                (Some(password), None) => hash_password(password)?,
                (None, Some(hash)) => {
                    PasswordHash::new(hash).map_err(|e| {
                        AppError::Internal(format!(
                            "Invalid password hash for principal {}: {}",
                            entry.username, e
                        ))
                    })?;
                    hash.clone()
                }
                _ => {
                    return Err(AppError::Internal(format!(
                        "Principal {} needs exactly one of password or password_hash",
                        entry.username
                    )))
                }
            };

            let credential = Credential {
                role: entry.role,
                password_hash,
            };
            if principals.insert(entry.username.clone(), credential).is_some() {
                return Err(AppError::Internal(format!(
                    "Principal {} is configured twice",
                    entry.username
                )));
            }
        }

        tracing::info!(count = principals.len(), "credential store ready");

        Ok(Self {
            principals: Arc::new(principals),
            decoy_hash: hash_password("decoy-password-never-matches")?.into(),
            realm: config.realm.clone(),
            console_path: console_path.to_string(),
        })
    }

    /// Verify a username/password pair against the store
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Principal> {
        let invalid = || AppError::Authentication("Invalid username or password".to_string());

        // Unknown usernames still pay for one full verification
        let credential = self.principals.get(username);
        let hash: Arc<str> = match credential {
            Some(credential) => credential.password_hash.as_str().into(),
            None => self.decoy_hash.clone(),
        };

        let password = password.to_string();
        let valid = tokio::task::spawn_blocking(move || verify_password(&hash, &password))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))??;

        let Some(credential) = credential else {
            tracing::warn!(username, "authentication failed: unknown principal");
            return Err(invalid());
        };
        if !valid {
            tracing::warn!(username, "authentication failed: bad password");
            return Err(invalid());
        }

        Ok(Principal {
            username: username.to_string(),
            role: credential.role,
        })
    }

    /// Whether `path` lies under the administrative console prefix
    pub fn is_public_path(&self, path: &str) -> bool {
        match path.strip_prefix(self.console_path.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn console_path(&self) -> &str {
        &self.console_path
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
