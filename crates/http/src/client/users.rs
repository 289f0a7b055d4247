//! User account endpoints

use super::{ClientError, ContentType, Endpoint, GalleryClient, ResponseType, TokenCache};
use crate::types::{AuthLevel, CredentialModel, Token};
use reqwest::Method;

/// `POST users/login`, unauthenticated, returns a fresh token
pub fn login() -> Endpoint<CredentialModel, Token> {
    Endpoint::new(Method::POST, "users/login").auth(AuthLevel::None)
}

/// `POST users`, unauthenticated, empty response
pub fn register() -> Endpoint<CredentialModel, ()> {
    Endpoint::new(Method::POST, "users")
        .auth(AuthLevel::None)
        .response_type(ResponseType::Void)
}

/// `POST users/logout`, needs a user token, no body either way
pub fn logout() -> Endpoint<(), ()> {
    Endpoint::new(Method::POST, "users/logout")
        .auth(AuthLevel::User)
        .content_type(ContentType::Void)
        .response_type(ResponseType::Void)
}

/// `POST users/{id}`, admin only, confirms a pending account
pub fn confirm(id: i32) -> Endpoint<(), ()> {
    Endpoint::new(Method::POST, format!("users/{id}"))
        .auth(AuthLevel::Admin)
        .content_type(ContentType::Void)
        .response_type(ResponseType::Void)
}

impl GalleryClient {
    /// Exchange credentials for a token
    pub async fn login(
        &self,
        cache: &TokenCache,
        credentials: &CredentialModel,
    ) -> Result<Token, ClientError> {
        login().call(self, cache, credentials).await
    }

    /// Create an account
    pub async fn register(
        &self,
        cache: &TokenCache,
        credentials: &CredentialModel,
    ) -> Result<(), ClientError> {
        register().call(self, cache, credentials).await
    }

    /// Invalidate the cached token server-side
    pub async fn logout(&self, cache: &TokenCache) -> Result<(), ClientError> {
        logout().call(self, cache, &()).await
    }

    /// Confirm the account `id`. Needs an admin token.
    pub async fn confirm_user(&self, cache: &TokenCache, id: i32) -> Result<(), ClientError> {
        confirm(id).call(self, cache, &()).await
    }
}
