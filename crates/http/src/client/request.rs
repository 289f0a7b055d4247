//! Request factory
//!
//! An [`Endpoint`] describes one backend call: method, path, the privilege it
//! needs, how the input is sent and how the output is read. Calling it with a
//! [`GalleryClient`] and a [`TokenCache`] performs the request.

use super::{ClientError, GalleryClient, TokenCache};
use crate::types::AuthLevel;
use reqwest::{Method, Response, header};
use serde::{Serialize, de::DeserializeOwned};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, instrument, warn};

/// How the request input is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    /// Serialize the input as JSON and send it as the body
    #[default]
    Json,
    /// No body
    Void,
}

impl ContentType {
    pub fn mime(self) -> Option<&'static str> {
        match self {
            Self::Json => Some("application/json"),
            Self::Void => None,
        }
    }
}

/// How the response body is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// Parse the body as JSON
    #[default]
    Json,
    /// Ignore the body
    Void,
}

/// A callable backend endpoint taking `I` and producing `O`
pub struct Endpoint<I, O> {
    method: Method,
    path: Cow<'static, str>,
    auth: AuthLevel,
    content_type: ContentType,
    response_type: ResponseType,
    _marker: PhantomData<fn(&I) -> O>,
}

/// Build an endpoint from all of its parts
pub fn create_request<I, O>(
    method: Method,
    path: impl Into<Cow<'static, str>>,
    auth: AuthLevel,
    content_type: ContentType,
    response_type: ResponseType,
) -> Endpoint<I, O> {
    Endpoint::new(method, path)
        .auth(auth)
        .content_type(content_type)
        .response_type(response_type)
}

impl<I, O> Endpoint<I, O> {
    /// User-authenticated JSON in, JSON out
    pub fn new(method: Method, path: impl Into<Cow<'static, str>>) -> Self {
        Self {
            method,
            path: path.into(),
            auth: AuthLevel::default(),
            content_type: ContentType::default(),
            response_type: ResponseType::default(),
            _marker: PhantomData,
        }
    }

    pub fn auth(mut self, auth: AuthLevel) -> Self {
        self.auth = auth;
        self
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn auth_level(&self) -> AuthLevel {
        self.auth
    }
}

impl<I, O> Endpoint<I, O>
where
    I: Serialize,
    O: DeserializeOwned,
{
    /// Perform the request.
    ///
    /// The credential is resolved from `cache` first, so an unauthorized call
    /// fails without touching the network.
    #[instrument(
        name = "endpoint_call",
        skip_all,
        fields(method = %self.method, path = %self.path, auth = %self.auth)
    )]
    pub async fn call(
        &self,
        client: &GalleryClient,
        cache: &TokenCache,
        input: &I,
    ) -> Result<O, ClientError> {
        let credential = cache.credential_for(self.auth).inspect_err(|_| {
            warn!("Refusing request, cached token does not satisfy auth level");
        })?;

        let mut request = client.request(self.method.clone(), &self.path);

        if let Some(token) = credential {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        if let Some(mime) = self.content_type.mime() {
            let body = serde_json::to_vec(input).map_err(ClientError::Serialization)?;
            request = request.header(header::CONTENT_TYPE, mime).body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            warn!(status = status.as_u16(), "Request rejected by server");
            return Err(ClientError::Response {
                status: status.as_u16(),
                message,
            });
        }

        parse_response(response, self.response_type).await
    }
}

async fn parse_response<O: DeserializeOwned>(
    response: Response,
    response_type: ResponseType,
) -> Result<O, ClientError> {
    match response_type {
        ResponseType::Json => {
            let body = response.bytes().await?;
            serde_json::from_slice(&body).map_err(ClientError::Parse)
        }
        ResponseType::Void => {
            serde_json::from_value(serde_json::Value::Null).map_err(ClientError::Parse)
        }
    }
}

impl<I, O> Clone for Endpoint<I, O> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            path: self.path.clone(),
            auth: self.auth,
            content_type: self.content_type,
            response_type: self.response_type,
            _marker: PhantomData,
        }
    }
}

impl<I, O> fmt::Debug for Endpoint<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("auth", &self.auth)
            .field("content_type", &self.content_type)
            .field("response_type", &self.response_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_defaults() {
        let endpoint: Endpoint<(), ()> = Endpoint::new(Method::GET, "images");
        assert_eq!(endpoint.auth_level(), AuthLevel::User);
        assert_eq!(endpoint.content_type, ContentType::Json);
        assert_eq!(endpoint.response_type, ResponseType::Json);
        assert_eq!(endpoint.path(), "images");
    }

    #[test]
    fn test_create_request_sets_every_part() {
        let endpoint: Endpoint<(), ()> = create_request(
            Method::POST,
            "users/logout",
            AuthLevel::User,
            ContentType::Void,
            ResponseType::Void,
        );
        assert_eq!(endpoint.method(), &Method::POST);
        assert_eq!(endpoint.content_type, ContentType::Void);
        assert_eq!(endpoint.response_type, ResponseType::Void);
    }

    #[test]
    fn test_content_type_mime() {
        assert_eq!(ContentType::Json.mime(), Some("application/json"));
        assert_eq!(ContentType::Void.mime(), None);
    }
}
