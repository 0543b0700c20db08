use uuid::Uuid;

use crate::auth::{AccessToken, Credentials};
use crate::error::AppError;
use crate::models::{NewAccount, NewUser, User, UserChanges};
use crate::traits::UserStore;

/// Registration, login, identity resolution and profile updates.
#[derive(Clone)]
pub struct AccountService<U: UserStore> {
    users: U,
    credentials: Credentials,
}

impl<U: UserStore> AccountService<U> {
    pub fn new(users: U, credentials: Credentials) -> Self {
        Self { users, credentials }
    }

    /// Create an account. Fails with [`AppError::Conflict`] if the username is taken.
    pub async fn register(&self, account: NewAccount) -> Result<User, AppError> {
        account.validate()?;

        if self.users.find_by_username(&account.username).await?.is_some() {
            tracing::warn!(username = %account.username, "Username already taken");
            return Err(username_taken());
        }

        let NewAccount {
            username,
            phone,
            password,
            name,
            city,
        } = account;

        let credentials = self.credentials.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || credentials.hash_password(&password))
                .await
                .map_err(|e| AppError::Internal(format!("Hashing task failed: {e}")))??;

        let user = self
            .users
            .create(&NewUser {
                username,
                phone,
                password_hash,
                name,
                city,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check a username/password pair and issue a token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccessToken, AppError> {
        let user = self.users.find_by_username(username).await?;

        let credentials = self.credentials.clone();
        let password = password.to_string();
        let hash = user.as_ref().map(|u| u.password_hash.clone());
        let valid = tokio::task::spawn_blocking(move || match hash {
            Some(hash) => credentials.verify_password(&password, &hash),
            None => credentials.verify_dummy(&password),
        })
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {e}")))??;

        let user = match user {
            Some(user) if valid => user,
            Some(_) => {
                tracing::warn!(%username, "Invalid password");
                return Err(invalid_login());
            }
            None => {
                tracing::warn!(%username, "Login for unknown user");
                return Err(invalid_login());
            }
        };

        let token = self.credentials.issue_token(&user.username)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Validate a bearer token and return the username it asserts.
    pub fn resolve_identity(&self, token: &str) -> Result<String, AppError> {
        self.credentials.verify_token(token)
    }

    /// Resolve a token all the way to the stored user.
    pub async fn current_user(&self, token: &str) -> Result<User, AppError> {
        let username = self.resolve_identity(token)?;
        self.users
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        changes: UserChanges,
    ) -> Result<User, AppError> {
        changes.validate()?;

        let user = self
            .users
            .update(user_id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;

        tracing::info!(%user_id, "User profile updated");
        Ok(user)
    }
}

fn username_taken() -> AppError {
    AppError::Conflict("Username already taken".into())
}

fn invalid_login() -> AppError {
    AppError::Unauthorized("Invalid credentials".into())
}
