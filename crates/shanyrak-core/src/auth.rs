//! Credential service: password hashing and bearer-token issuance/verification.
//!
//! Passwords are hashed with bcrypt. Tokens are HS256 JWTs carrying the
//! username as `sub` plus `iat`/`exp`; verification accepts HS256 only.

use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::MAX_PASSWORD_BYTES;

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// HS256 keys shorter than this are refused.
pub const MIN_SECRET_LEN: usize = 32;

const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Hashed once per `Credentials` to give unknown-user logins a real bcrypt check.
const DUMMY_PASSWORD: &str = "shanyrak-no-such-user";

/// Settings for the credential service, read once at startup.
#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub token_ttl: TimeDelta,
    pub hash_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("hash_cost", &self.hash_cost)
            .finish()
    }
}

impl AuthConfig {
    /// Config with the default token lifetime and bcrypt cost.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl: TimeDelta::seconds(DEFAULT_TOKEN_TTL_SECS),
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_token_ttl(mut self, ttl: TimeDelta) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Read configuration from environment variables.
    ///
    /// - `SHANYRAK_JWT_SECRET` (required, at least 32 bytes)
    /// - `SHANYRAK_TOKEN_TTL_SECS` (optional, defaults to 86400)
    /// - `SHANYRAK_BCRYPT_COST` (optional, defaults to bcrypt's default cost)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`AuthConfig::from_env`] with a custom variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let secret = var("SHANYRAK_JWT_SECRET").ok_or_else(|| {
            AppError::ConfigError("SHANYRAK_JWT_SECRET not set. Required to sign tokens.".into())
        })?;

        let mut config = Self::new(secret);

        if let Some(raw) = var("SHANYRAK_TOKEN_TTL_SECS") {
            let secs: i64 = raw.parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid SHANYRAK_TOKEN_TTL_SECS '{raw}': must be a positive integer"
                ))
            })?;
            if secs <= 0 {
                return Err(AppError::ConfigError(
                    "SHANYRAK_TOKEN_TTL_SECS must be at least 1".into(),
                ));
            }
            config.token_ttl = TimeDelta::try_seconds(secs).ok_or_else(|| {
                AppError::ConfigError(format!("SHANYRAK_TOKEN_TTL_SECS '{raw}' is too large"))
            })?;
        }

        if let Some(raw) = var("SHANYRAK_BCRYPT_COST") {
            config.hash_cost = raw.parse().map_err(|_| {
                AppError::ConfigError(format!(
                    "Invalid SHANYRAK_BCRYPT_COST '{raw}': must be an integer"
                ))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(AppError::ConfigError(format!(
                "SHANYRAK_JWT_SECRET must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        if !(4..=31).contains(&self.hash_cost) {
            return Err(AppError::ConfigError(format!(
                "bcrypt cost {} out of range 4..=31",
                self.hash_cost
            )));
        }
        Ok(())
    }
}

/// JWT claims. `sub` is the username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly issued bearer token.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Hashes and verifies passwords, issues and validates bearer tokens.
#[derive(Clone)]
pub struct Credentials {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: TimeDelta,
    hash_cost: u32,
    dummy_hash: Arc<OnceLock<String>>,
}

impl Credentials {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            token_ttl: config.token_ttl,
            hash_cost: config.hash_cost,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    /// Salted bcrypt hash of `password`. Blocking; call off the async executor.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.hash_cost)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
    }

    /// Blocking; call off the async executor.
    ///
    /// Passwords longer than bcrypt's input limit never match, so a stored
    /// hash cannot be satisfied by its password plus an arbitrary suffix.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        bcrypt::verify(password, hash)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {e}")))
    }

    /// Run a full-cost bcrypt check that always fails. Used when there is no
    /// stored hash, so unknown usernames take as long as wrong passwords.
    /// Blocking; call off the async executor.
    pub fn verify_dummy(&self, password: &str) -> Result<bool, AppError> {
        let hash = match self.dummy_hash.get() {
            Some(hash) => hash,
            None => {
                let hash = self.hash_password(DUMMY_PASSWORD)?;
                self.dummy_hash.get_or_init(|| hash)
            }
        };
        self.verify_password(password, hash)?;
        Ok(false)
    }

    /// Issue a signed token asserting `username`.
    pub fn issue_token(&self, username: &str) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))?;

        Ok(AccessToken { token, expires_at })
    }

    /// Validate a token and return the username it asserts.
    pub fn verify_token(&self, token: &str) -> Result<String, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token rejected: {e}");
            invalid_credentials()
        })?;

        if data.claims.sub.is_empty() {
            return Err(invalid_credentials());
        }

        Ok(data.claims.sub)
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Could not validate credentials".into())
}
