//! Login state shared by the front-end
//!
//! A [`Session`] owns the persisted `token` store and a [`TokenCache`] that
//! mirrors it. Requests read the cache; login and logout write the store.

use crate::config::AuthConfig;
use crate::storage::{KeyValueStorage, StoreError};
use crate::store::{PersistentStore, SubscriptionId};
use chrono::{DateTime, Utc};
use gallery_http::client::{ClientError, GalleryClient, TokenCache};
use gallery_http::types::{CredentialModel, Token};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Failed to persist token: {0}")]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Refused locally because the cached token was missing or insufficient
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Client(e) if e.is_authorization())
    }
}

pub struct Session {
    client: GalleryClient,
    store: PersistentStore<Token>,
    cache: TokenCache,
    subscription: SubscriptionId,
}

impl Session {
    /// Load the persisted token from `storage` and start mirroring it
    pub fn new(
        client: GalleryClient,
        storage: Arc<dyn KeyValueStorage>,
    ) -> Result<Self, SessionError> {
        let store = PersistentStore::open(AuthConfig::TOKEN_KEY, storage)?;
        Ok(Self::with_store(client, store))
    }

    /// Mirror an already opened store
    pub fn with_store(client: GalleryClient, store: PersistentStore<Token>) -> Self {
        let cache = TokenCache::new();
        let observer = cache.clone();
        let subscription = store.subscribe(move |token| observer.replace(token.cloned()));

        Self {
            client,
            store,
            cache,
            subscription,
        }
    }

    pub fn client(&self) -> &GalleryClient {
        &self.client
    }

    /// Auth context to pass into endpoint calls
    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    pub fn store(&self) -> &PersistentStore<Token> {
        &self.store
    }

    pub fn token(&self) -> Option<Token> {
        self.cache.current()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.cache.is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.cache.current().is_some_and(|token| token.admin)
    }

    /// Log in and persist the returned token
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &CredentialModel) -> Result<Token, SessionError> {
        let token = self.client.login(&self.cache, credentials).await?;
        self.store.set(Some(token.clone()))?;
        info!(admin = token.admin, expiration = %token.expiration, "Logged in");
        Ok(token)
    }

    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn register(&self, credentials: &CredentialModel) -> Result<(), SessionError> {
        self.client.register(&self.cache, credentials).await?;
        info!("Registered account");
        Ok(())
    }

    /// Log out server-side, then forget the token.
    ///
    /// The token is kept if the server call fails.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.client.logout(&self.cache).await?;
        self.store.set(None)?;
        info!("Logged out");
        Ok(())
    }

    /// Drop the token if it has expired. Returns whether it was dropped.
    pub fn validate(&self) -> Result<bool, SessionError> {
        self.validate_at(Utc::now())
    }

    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<bool, SessionError> {
        match self.cache.current() {
            Some(token) if token.is_expired_at(now) => {
                self.store.set(None)?;
                info!(expiration = %token.expiration, "Cleared expired token");
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::Duration;

    fn client() -> GalleryClient {
        GalleryClient::new("http://localhost:6060").unwrap()
    }

    fn token(admin: bool, expiration: DateTime<Utc>) -> Token {
        Token {
            token: "stored-token".to_string(),
            expiration,
            admin,
        }
    }

    #[test]
    fn test_new_session_mirrors_persisted_token() {
        let storage = Arc::new(MemoryStorage::new());
        let stored = token(true, Utc::now() + Duration::hours(1));
        storage
            .set(AuthConfig::TOKEN_KEY, &serde_json::to_string(&stored).unwrap())
            .unwrap();

        let session = Session::new(client(), storage).unwrap();

        assert_eq!(session.token(), Some(stored));
        assert!(session.is_authenticated());
        assert!(session.is_admin());
    }

    #[test]
    fn test_store_changes_reach_cache() {
        let session = Session::new(client(), Arc::new(MemoryStorage::new())).unwrap();
        assert!(!session.is_authenticated());

        let user = token(false, Utc::now() + Duration::hours(1));
        session.store().set(Some(user.clone())).unwrap();
        assert_eq!(session.cache().current(), Some(user));
        assert!(!session.is_admin());

        session.store().set(None).unwrap();
        assert!(session.cache().is_empty());
    }

    #[test]
    fn test_validate_clears_expired_token() {
        let storage = Arc::new(MemoryStorage::new());
        let session = Session::new(client(), storage.clone()).unwrap();
        let now = Utc::now();

        session
            .store()
            .set(Some(token(false, now + Duration::minutes(1))))
            .unwrap();
        assert!(!session.validate_at(now).unwrap());
        assert!(session.is_authenticated());

        assert!(session.validate_at(now + Duration::minutes(2)).unwrap());
        assert!(!session.is_authenticated());
        assert_eq!(storage.get(AuthConfig::TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_drop_unsubscribes_from_shared_store() {
        let store =
            PersistentStore::open(AuthConfig::TOKEN_KEY, Arc::new(MemoryStorage::new())).unwrap();

        let session = Session::with_store(client(), store.clone());
        assert_eq!(store.subscriber_count(), 1);

        drop(session);
        assert_eq!(store.subscriber_count(), 0);
    }
}
