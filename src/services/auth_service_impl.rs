//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;

use crate::auth::TokenSigner;
use crate::db::Store;
use crate::services::auth_service::{AuthError, AuthService, AuthenticatedUser, LoginResult};

pub struct SeaOrmAuthService {
    store: Store,
    signer: TokenSigner,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, signer: TokenSigner) -> Self {
        Self { store, signer }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        // verify_password treats an unknown username and a wrong password
        // identically, so this path leaks nothing about which failed
        let is_valid = self.store.verify_user_password(username, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self
            .signer
            .issue(user.id, &user.username, &user.role)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(LoginResult {
            id: user.id,
            username: user.username,
            role: user.role,
            token,
        })
    }

    async fn verify_token(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self
            .signer
            .verify(token)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
        })
    }
}
