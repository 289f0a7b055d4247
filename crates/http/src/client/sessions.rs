//! Voting session endpoints

use super::{ClientError, Endpoint, GalleryClient, ResponseType, TokenCache};
use crate::types::{AuthLevel, SessionImageModel, SessionModel};
use reqwest::Method;

/// `POST sessions`, admin only, answers `201 Created` with no body
pub fn create() -> Endpoint<SessionModel, ()> {
    Endpoint::new(Method::POST, "sessions")
        .auth(AuthLevel::Admin)
        .response_type(ResponseType::Void)
}

/// `POST sessions/images`, admin only, empty response
pub fn add_image() -> Endpoint<SessionImageModel, ()> {
    Endpoint::new(Method::POST, "sessions/images")
        .auth(AuthLevel::Admin)
        .response_type(ResponseType::Void)
}

impl GalleryClient {
    pub async fn create_session(
        &self,
        cache: &TokenCache,
        session: &SessionModel,
    ) -> Result<(), ClientError> {
        create().call(self, cache, session).await
    }

    /// Attach an uploaded image to a session
    pub async fn add_session_image(
        &self,
        cache: &TokenCache,
        association: SessionImageModel,
    ) -> Result<(), ClientError> {
        add_image().call(self, cache, &association).await
    }
}
