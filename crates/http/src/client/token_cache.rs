//! In-memory mirror of the persisted token
//!
//! A `TokenCache` is a cheap cloneable handle. Whatever owns the persisted
//! token registers an observer that calls [`TokenCache::replace`] on every
//! change; requests read it through [`TokenCache::credential_for`].

use super::error::ClientError;
use crate::types::{AuthLevel, Token};
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Clone, Debug, Default)]
pub struct TokenCache {
    inner: Arc<RwLock<Option<Token>>>,
}

impl TokenCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache seeded with a token
    pub fn with_token(token: Option<Token>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(token)),
        }
    }

    /// Latest observed token
    pub fn current(&self) -> Option<Token> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Overwrite the cached token
    pub fn replace(&self, token: Option<Token>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Resolve the bearer credential a request at `level` should carry.
    ///
    /// `Ok(None)` means the request goes out without an Authorization header.
    pub fn credential_for(&self, level: AuthLevel) -> Result<Option<String>, ClientError> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        resolve_credential(level, guard.as_ref()).map(|token| token.map(str::to_owned))
    }
}

/// Authorization gate for a single request
pub fn resolve_credential(
    level: AuthLevel,
    token: Option<&Token>,
) -> Result<Option<&str>, ClientError> {
    match (level, token) {
        (AuthLevel::None, _) => Ok(None),
        (AuthLevel::User, Some(token)) => Ok(Some(&token.token)),
        (AuthLevel::Admin, Some(token)) if token.admin => Ok(Some(&token.token)),
        (required, _) => Err(ClientError::Authorization { required }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn token(admin: bool) -> Token {
        Token {
            token: if admin { "admin-token" } else { "user-token" }.to_string(),
            expiration: Utc::now() + Duration::hours(1),
            admin,
        }
    }

    #[test]
    fn test_none_level_never_needs_a_token() {
        for cached in [None, Some(token(false)), Some(token(true))] {
            let cache = TokenCache::with_token(cached);
            assert_eq!(cache.credential_for(AuthLevel::None).unwrap(), None);
        }
    }

    #[test]
    fn test_user_level_accepts_any_token() {
        let cache = TokenCache::with_token(Some(token(false)));
        assert_eq!(
            cache.credential_for(AuthLevel::User).unwrap().as_deref(),
            Some("user-token")
        );

        cache.replace(Some(token(true)));
        assert_eq!(
            cache.credential_for(AuthLevel::User).unwrap().as_deref(),
            Some("admin-token")
        );
    }

    #[test]
    fn test_user_level_requires_a_token() {
        let cache = TokenCache::new();
        let err = cache.credential_for(AuthLevel::User).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Authorization {
                required: AuthLevel::User
            }
        ));
    }

    #[test]
    fn test_admin_level_requires_admin_flag() {
        let cache = TokenCache::new();
        assert!(cache.credential_for(AuthLevel::Admin).is_err());

        cache.replace(Some(token(false)));
        assert!(matches!(
            cache.credential_for(AuthLevel::Admin),
            Err(ClientError::Authorization {
                required: AuthLevel::Admin
            })
        ));

        cache.replace(Some(token(true)));
        assert_eq!(
            cache.credential_for(AuthLevel::Admin).unwrap().as_deref(),
            Some("admin-token")
        );
    }

    #[test]
    fn test_clones_share_state() {
        let cache = TokenCache::new();
        let observer = cache.clone();

        let user = token(false);
        observer.replace(Some(user.clone()));
        assert_eq!(cache.current(), Some(user));

        observer.replace(None);
        assert!(cache.is_empty());
    }
}
