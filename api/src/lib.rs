//! HTTP client for the Six Cities REST API.
//!
//! # Endpoints
//!
//! | Method | Path | Returns |
//! |--------|------|---------|
//! | `GET` | `/offers` | offer previews |
//! | `GET` | `/offers/{id}` | one offer with details |
//! | `GET` | `/offers/{id}/nearby` | offer previews |
//! | `GET` | `/comments/{id}` | reviews |
//! | `POST` | `/comments/{id}` | the created review |
//! | `GET` | `/favorite` | the user's favorite offers |
//! | `POST` | `/favorite/{id}/{0\|1}` | the updated offer |
//! | `GET` | `/login` | session info for a stored token |
//! | `POST` | `/login` | session info with a fresh token |
//! | `DELETE` | `/logout` | nothing |
//!
//! # Authentication
//!
//! The session token is sent on every request that has one, either as
//! `Authorization: Bearer <token>` or `X-Token: <token>` depending on
//! [`AuthHeader`].
//!
//! # Retries
//!
//! `GET` requests are retried per [`RetryConfig`]; everything else is sent once.

mod error;
pub mod retry;

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

pub use error::ApiError;
pub use retry::RetryConfig;

use retry::{RetryOutcome, send_with_retry};
use six_cities_types::{AuthInfo, CommentDraft, Credentials, Offer, OfferId, Review, Token};

/// Public endpoint used when no configuration overrides it.
pub const DEFAULT_API_URL: &str = "https://15.design.htmlacademy.pro/six-cities";

const DEFAULT_TIMEOUT_SECS: u64 = 5;
const CONNECT_TIMEOUT_SECS: u64 = 5;
const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// How the session token travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthHeader {
    /// `Authorization: Bearer <token>`
    #[default]
    Bearer,
    /// `X-Token: <token>`
    XToken,
}

impl AuthHeader {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bearer" | "authorization" => Some(Self::Bearer),
            "x-token" | "xtoken" | "token" => Some(Self::XToken),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub auth_header: AuthHeader,
    pub retry: RetryConfig,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth_header: AuthHeader::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    auth_header: AuthHeader,
    retry: RetryConfig,
}

fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    // `Url::join` replaces the last segment unless the base ends with '/'.
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Ok(Url::parse(&with_slash)?)
}

impl ApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&settings.base_url)?;
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(settings.timeout)
            .pool_idle_timeout(Some(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS)))
            .build()
            .map_err(ApiError::Client)?;
        tracing::info!(base_url = %base_url, "API client ready");
        Ok(Self {
            http,
            base_url,
            auth_header: settings.auth_header,
            retry: settings.retry,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn fetch_offers(&self, token: Option<&Token>) -> Result<Vec<Offer>, ApiError> {
        self.get_json("offers", token).await
    }

    pub async fn fetch_offer(&self, id: &OfferId, token: Option<&Token>) -> Result<Offer, ApiError> {
        self.get_json(&format!("offers/{id}"), token).await
    }

    pub async fn fetch_nearby(
        &self,
        id: &OfferId,
        token: Option<&Token>,
    ) -> Result<Vec<Offer>, ApiError> {
        self.get_json(&format!("offers/{id}/nearby"), token).await
    }

    pub async fn fetch_comments(&self, id: &OfferId) -> Result<Vec<Review>, ApiError> {
        self.get_json(&format!("comments/{id}"), None).await
    }

    pub async fn post_comment(
        &self,
        id: &OfferId,
        draft: &CommentDraft,
        token: &Token,
    ) -> Result<Review, ApiError> {
        let builder = self
            .request(Method::POST, &format!("comments/{id}"), Some(token))?
            .json(draft);
        self.send_json(builder).await
    }

    pub async fn fetch_favorites(&self, token: &Token) -> Result<Vec<Offer>, ApiError> {
        self.get_json("favorite", Some(token)).await
    }

    /// Mark (`true`) or unmark (`false`) an offer as favorite.
    pub async fn set_favorite(
        &self,
        id: &OfferId,
        favorite: bool,
        token: &Token,
    ) -> Result<Offer, ApiError> {
        let status = u8::from(favorite);
        let builder = self.request(Method::POST, &format!("favorite/{id}/{status}"), Some(token))?;
        self.send_json(builder).await
    }

    pub async fn check_login(&self, token: &Token) -> Result<AuthInfo, ApiError> {
        self.get_json("login", Some(token)).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthInfo, ApiError> {
        let builder = self.request(Method::POST, "login", None)?.json(credentials);
        self.send_json(builder).await
    }

    pub async fn logout(&self, token: &Token) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, "logout", Some(token))?;
        let response = builder.send().await.map_err(|source| ApiError::Transport {
            attempts: 1,
            source,
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    fn authorize(&self, builder: RequestBuilder, token: Option<&Token>) -> RequestBuilder {
        match token {
            Some(token) if !token.is_empty() => match self.auth_header {
                AuthHeader::Bearer => builder.bearer_auth(token.expose()),
                AuthHeader::XToken => builder.header("X-Token", token.expose()),
            },
            _ => builder,
        }
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&Token>,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.base_url.join(path)?;
        tracing::debug!(%method, path, "API request");
        Ok(self.authorize(self.http.request(method, url), token))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&Token>,
    ) -> Result<T, ApiError> {
        let url = self.base_url.join(path)?;
        tracing::debug!(method = "GET", path, "API request");
        let outcome = send_with_retry(
            || self.authorize(self.http.get(url.clone()), token),
            &self.retry,
        )
        .await;
        read_json(outcome).await
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let outcome = match builder.send().await {
            Ok(response) => RetryOutcome::Response(response),
            Err(source) => RetryOutcome::Transport {
                attempts: 1,
                source,
            },
        };
        read_json(outcome).await
    }
}

async fn read_json<T: DeserializeOwned>(outcome: RetryOutcome) -> Result<T, ApiError> {
    let response = match outcome {
        RetryOutcome::Response(response) => response,
        RetryOutcome::Transport { attempts, source } => {
            tracing::warn!(attempts, "API transport error: {source}");
            return Err(ApiError::Transport { attempts, source });
        }
    };

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|source| ApiError::Transport {
            attempts: 1,
            source,
        })?;

    if !status.is_success() {
        let err = ApiError::from_status(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), "API error response: {err}");
        return Err(err);
    }

    Ok(serde_json::from_slice(&body)?)
}
