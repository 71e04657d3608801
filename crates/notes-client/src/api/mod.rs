//! The single path through which the application reaches the backend.

pub mod endpoints;
pub mod request;

pub use request::ApiRequest;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::StatusCode;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{Config, MissingTokenPolicy};
use crate::error::ClientError;
use crate::session::Session;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    login_route: String,
    missing_token: MissingTokenPolicy,
    session: Session,
}

pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    login_route: String,
    missing_token: MissingTokenPolicy,
    session: Session,
}

impl ApiClientBuilder {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        let defaults = Config::default();
        Self {
            base_url: base_url.into(),
            timeout: defaults.api.timeout(),
            login_route: defaults.session.login_route,
            missing_token: defaults.api.missing_token,
            session,
        }
    }

    pub fn from_config(config: &Config, session: Session) -> Self {
        Self {
            base_url: config.api.base_url.clone(),
            timeout: config.api.timeout(),
            login_route: config.session.login_route.clone(),
            missing_token: config.api.missing_token,
            session,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    pub fn missing_token(mut self, policy: MissingTokenPolicy) -> Self {
        self.missing_token = policy;
        self
    }

    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(self.base_url));
        }
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(ApiClient {
            http,
            base,
            login_route: self.login_route,
            missing_token: self.missing_token,
            session: self.session,
        })
    }
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>, session: Session) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url, session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// `endpoint` is split on `/` and appended to the base path. Each extra
    /// segment is percent-encoded whole, so it can never add path levels or
    /// a query.
    fn url_for(&self, req: &ApiRequest) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?;
            path.pop_if_empty();
            path.extend(req.endpoint.split('/').filter(|s| !s.is_empty()));
            path.extend(&req.segments);
        }
        Ok(url)
    }

    /// Sends `req` and decodes a 2xx body as `T`.
    ///
    /// A 401 tears the session down, emits `SessionEvent::Expired` and ends
    /// the call with [`ClientError::SessionExpired`]. Any other non-2xx
    /// fails with the raw body as the message. Nothing is retried.
    pub async fn request<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T, ClientError> {
        let url = self.url_for(&req)?;
        let mut builder = self
            .http
            .request(req.method.clone(), url)
            .header(CONTENT_TYPE, "application/json");

        if req.requires_auth {
            match self.session.get_token() {
                Some(token) => builder = builder.header(AUTHORIZATION, token.bearer()),
                None => match self.missing_token {
                    MissingTokenPolicy::Send => {
                        warn!(
                            "{} {} requires auth but no token is held",
                            req.method, req.endpoint
                        );
                    }
                    MissingTokenPolicy::Reject => return Err(ClientError::NotAuthenticated),
                },
            }
        }

        if let Some(body) = &req.body {
            let bytes = serde_json::to_vec(body).map_err(|e| ClientError::Encode(e.to_string()))?;
            builder = builder.body(bytes);
        }

        debug!("{} {}", req.method, req.endpoint);
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!("{} {} -> {status}", req.method, req.endpoint);

        if status == StatusCode::UNAUTHORIZED {
            self.session.expire(self.login_route.clone());
            return Err(ClientError::SessionExpired);
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(ClientError::Request {
                status,
                message: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        decode(&bytes)
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Transport(e)
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ClientError> {
    let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(payload).map_err(|e| ClientError::Decode(e.to_string()))
}
