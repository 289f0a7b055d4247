//! Gallery HTTP client
//!
//! Typed access to the gallery backend. Each endpoint declares the privilege
//! it needs; the caller hands in the current auth state as a
//! [`client::TokenCache`] and the request is refused locally when the cached
//! token does not satisfy it.

pub mod client;
pub mod types;

pub use client::{ClientError, GalleryClient, TokenCache};
pub use types::{AuthLevel, CredentialModel, SessionImageModel, SessionModel, Token};
