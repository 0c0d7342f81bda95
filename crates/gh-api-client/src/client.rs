//! GitHub REST client.
//!
//! All calls are plain GETs. Listings walk every page before returning so
//! callers see one complete, server-ordered collection.

use crate::error::{GhApiError, GhApiResult};
use crate::pagination::next_page_url;
use crate::types::{RawObject, UserProfile};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use url::Url;

/// Public GitHub API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size GitHub accepts for listings.
pub const MAX_PER_PAGE: u8 = 100;

const API_VERSION: &str = "2022-11-28";
const MEDIA_TYPE: &str = "application/vnd.github+json";

/// Connection settings for [`GitHubClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API root, e.g. `https://api.github.com` or a GitHub Enterprise
    /// `https://ghe.example.com/api/v3`.
    pub base_url: String,
    /// Personal access token. `None` means anonymous, rate-limited access.
    pub token: Option<String>,
    /// Page size for listings (1..=100).
    pub per_page: u8,
    /// Value of the `User-Agent` header (GitHub rejects requests without one).
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            per_page: MAX_PER_PAGE,
            user_agent: concat!("ghex/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Read-only GitHub REST client.
#[derive(Clone)]
pub struct GitHubClient {
    http_client: reqwest::Client,
    base_url: Url,
    per_page: u8,
    authenticated: bool,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url.as_str())
            .field("per_page", &self.per_page)
            .field("authenticated", &self.authenticated)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl GitHubClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns `GhApiError::InvalidUrl` for an unparsable base URL and
    /// `GhApiError::InvalidResponse` when the token or user agent cannot be
    /// used as a header value.
    pub fn new(config: ClientConfig) -> GhApiResult<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|_| GhApiError::InvalidResponse("invalid user agent".to_string()))?,
        );

        let authenticated = match config.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| GhApiError::InvalidResponse("invalid access token".to_string()))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
                true
            }
            _ => false,
        };

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            per_page: config.per_page.clamp(1, MAX_PER_PAGE),
            authenticated,
        })
    }

    /// Whether requests carry an access token.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Fetch an owner's profile (`GET /users/{owner}`).
    pub async fn get_user(&self, owner: &str) -> GhApiResult<UserProfile> {
        let url = self.endpoint(&["users", owner])?;
        let raw = self
            .get_object(url, || format!("user '{owner}'"))
            .await?;
        Ok(UserProfile::from_raw(raw)?)
    }

    /// Fetch one repository (`GET /repos/{owner}/{name}`).
    pub async fn get_repo(&self, owner: &str, name: &str) -> GhApiResult<RawObject> {
        let url = self.endpoint(&["repos", owner, name])?;
        self.get_object(url, || format!("repository '{owner}/{name}'"))
            .await
    }

    /// List every repository of an owner (`GET /users/{owner}/repos`).
    pub async fn list_repos(&self, owner: &str) -> GhApiResult<Vec<RawObject>> {
        let url = self.endpoint(&["users", owner, "repos"])?;
        self.get_all_pages(url, || format!("repositories of '{owner}'"))
            .await
    }

    /// List every gist of an owner (`GET /users/{owner}/gists`).
    pub async fn list_gists(&self, owner: &str) -> GhApiResult<Vec<RawObject>> {
        let url = self.endpoint(&["users", owner, "gists"])?;
        self.get_all_pages(url, || format!("gists of '{owner}'"))
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> GhApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GhApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_object(
        &self,
        url: Url,
        resource: impl Fn() -> String,
    ) -> GhApiResult<RawObject> {
        tracing::debug!(url = %url, "GET");
        let response = self.http_client.get(url).send().await?;
        let response = check_status(response, &resource).await?;

        match response.json::<serde_json::Value>().await? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(GhApiError::InvalidResponse(format!(
                "expected an object for {}, got {}",
                resource(),
                json_type(&other)
            ))),
        }
    }

    async fn get_all_pages(
        &self,
        mut url: Url,
        resource: impl Fn() -> String,
    ) -> GhApiResult<Vec<RawObject>> {
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());

        let mut items = Vec::new();
        let mut next = Some(url.to_string());
        let mut page = 1usize;

        while let Some(current) = next.take() {
            tracing::debug!(url = %current, page, "GET page");
            let response = self.http_client.get(&current).send().await?;
            let response = check_status(response, &resource).await?;
            next = next_page_url(response.headers());

            match response.json::<serde_json::Value>().await? {
                serde_json::Value::Array(values) => {
                    for value in values {
                        match value {
                            serde_json::Value::Object(map) => items.push(map),
                            other => {
                                return Err(GhApiError::InvalidResponse(format!(
                                    "expected objects in {} listing, got {}",
                                    resource(),
                                    json_type(&other)
                                )))
                            }
                        }
                    }
                }
                other => {
                    return Err(GhApiError::InvalidResponse(format!(
                        "expected an array for {}, got {}",
                        resource(),
                        json_type(&other)
                    )))
                }
            }

            page += 1;
        }

        tracing::debug!(count = items.len(), resource = %resource(), "listing complete");
        Ok(items)
    }
}

async fn check_status(
    response: Response,
    resource: &impl Fn() -> String,
) -> GhApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        tracing::debug!(status = status.as_u16(), resource = %resource(), "not found");
        return Err(GhApiError::NotFound {
            resource: resource(),
        });
    }

    let headers = response.headers();
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false);
    if exhausted && (status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS) {
        let reset = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        tracing::debug!(status = status.as_u16(), reset = ?reset, "rate limited");
        return Err(GhApiError::RateLimited { reset });
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    tracing::debug!(status = status.as_u16(), message = %message, "GitHub API error");
    Err(GhApiError::Api {
        status: status.as_u16(),
        message,
    })
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
