//! # HTTP Service
//!
//! Thin wrapper around `reqwest` that attaches the session credential,
//! sends one request and classifies the response status into [`ApiError`].
//! It never retries; every call is a single attempt.

use crate::config::ServerProfile;
use crate::repl::models::{ApiEnvelope, ErrorEnvelope, Session};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Query parameter carrying the session credential
pub const API_KEY_PARAM: &str = "api_key";

/// Failure of a single API call, keyed on HTTP status
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401: the session is invalid (or, for login, the password is wrong)
    #[error("unauthorized")]
    Unauthorized { error: Option<String> },

    /// 404: user or entry does not exist
    #[error("not found: {}", .error.as_deref().unwrap_or("no details"))]
    NotFound { error: Option<String> },

    /// 400: validation failure
    #[error("bad request: {}", .error.as_deref().unwrap_or("no details"))]
    BadRequest { error: Option<String> },

    /// 2xx response whose envelope still carries an error code
    #[error("request rejected with status {status}: {error}")]
    Rejected { status: u16, error: String },

    /// Any other non-2xx status
    #[error("unexpected status {status}")]
    Status { status: u16, error: Option<String> },

    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Error code from the response envelope, when the server sent one
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { error }
            | Self::NotFound { error }
            | Self::BadRequest { error }
            | Self::Status { error, .. } => error.as_deref(),
            Self::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// One request to the Onepass API
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach the session credential as the `api_key` query parameter
    ///
    /// An unauthenticated session sends an empty key, which the server rejects with 401.
    pub fn authorized(self, session: &Session) -> Self {
        let api_key = session.api_key().unwrap_or_default().to_string();
        self.query(API_KEY_PARAM, api_key)
    }

    /// Set a JSON request body
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

/// Successful (2xx) response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decode the `result` member of the envelope
    pub fn result<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let envelope: ApiEnvelope<T> = serde_json::from_str(&self.body)?;
        Ok(envelope.result)
    }
}

/// Service issuing requests against one Onepass server
#[derive(Debug, Clone)]
pub struct HttpService {
    client: Client,
    base_url: Url,
}

impl HttpService {
    /// Create a new HttpService with a profile
    pub fn new(profile: &ServerProfile) -> Result<Self, ApiError> {
        tracing::debug!("Creating HttpService for {}", profile.server());

        let mut base_url = Url::parse(profile.server()).map_err(|e| ApiError::InvalidUrl {
            url: profile.server().to_string(),
            reason: e.to_string(),
        })?;
        // Relative joins keep any path prefix only when the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(profile.timeout()).build()?;
        tracing::info!("HttpService ready for {}", base_url);

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of a request, query parameters included
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let relative = request.path.trim_start_matches('/');
        let mut url = self
            .base_url
            .join(relative)
            .map_err(|e| ApiError::InvalidUrl {
                url: request.path.clone(),
                reason: e.to_string(),
            })?;
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Execute one request and classify its status
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request)?;
        tracing::debug!("{} {}", request.method, request.path);

        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("{} {} failed: {}", request.method, request.path, e);
            ApiError::from(e)
        })?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("{} {} -> {}", request.method, request.path, status.as_u16());
        classify(status, body)
    }
}

/// Turn a status and body into the call outcome
pub fn classify(status: StatusCode, body: String) -> Result<ApiResponse, ApiError> {
    let error = error_code(&body);

    if status.is_success() {
        return match error {
            Some(error) => Err(ApiError::Rejected {
                status: status.as_u16(),
                error,
            }),
            None => Ok(ApiResponse {
                status: status.as_u16(),
                body,
            }),
        };
    }

    Err(match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized { error },
        StatusCode::NOT_FOUND => ApiError::NotFound { error },
        StatusCode::BAD_REQUEST => ApiError::BadRequest { error },
        other => ApiError::Status {
            status: other.as_u16(),
            error,
        },
    })
}

fn error_code(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
}
