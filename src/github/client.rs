// GitHub API HTTP client.
// Handles default headers, rate limit tracking, status mapping, and
// Link-header pagination.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{OctofeedError, Result};

use super::types::RateLimit;

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Unauthenticated GitHub API client with rate limit tracking.
pub struct GitHubClient {
    client: Client,
    rate_limit: RateLimit,
}

impl GitHubClient {
    /// Create a new client with the API version pinned in default headers.
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("octofeed"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(OctofeedError::Network)?;

        Ok(Self {
            client,
            rate_limit: RateLimit::default(),
        })
    }

    /// Get the current rate limit information.
    pub fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }

    /// Make a GET request to an API endpoint path.
    pub async fn get(&mut self, endpoint: &str) -> Result<Response> {
        let url = format!("{}{}", GITHUB_API_BASE, endpoint);
        self.get_url(&url).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &mut self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", GITHUB_API_BASE, endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(OctofeedError::Network)?;

        self.update_rate_limit(&response);
        self.check_response(response).await
    }

    /// Make a GET request to an absolute URL, as handed out by pagination
    /// Link headers.
    pub async fn get_url(&mut self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(OctofeedError::Network)?;

        self.update_rate_limit(&response);
        self.check_response(response).await
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&mut self, response: &Response) {
        if let Some(limit) = header_u64(response.headers(), "x-ratelimit-limit") {
            self.rate_limit.limit = limit;
        }
        if let Some(remaining) = header_u64(response.headers(), "x-ratelimit-remaining") {
            self.rate_limit.remaining = remaining;
        }
        if let Some(reset) = header_u64(response.headers(), "x-ratelimit-reset") {
            self.rate_limit.reset = reset;
        }
    }

    /// Check response status and convert failures into the error taxonomy.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK => Ok(response),
            StatusCode::NOT_FOUND => {
                let user = response
                    .url()
                    .path_segments()
                    .and_then(|mut segments| segments.nth(1))
                    .unwrap_or_default()
                    .to_string();
                Err(OctofeedError::UserNotFound(user))
            }
            StatusCode::FORBIDDEN if self.rate_limit.remaining == 0 => {
                Err(OctofeedError::RateLimited {
                    reset_at: self.reset_display(),
                })
            }
            StatusCode::TOO_MANY_REQUESTS => Err(OctofeedError::RateLimited {
                reset_at: self.reset_display(),
            }),
            status => Err(OctofeedError::Http {
                status,
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    fn reset_display(&self) -> String {
        chrono::DateTime::from_timestamp(self.rate_limit.reset as i64, 0)
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.parse().ok()
}

/// Extract the rel="next" pagination URL from a Link response header.
pub fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get("link")?.to_str().ok()?;

    for part in link.split(',') {
        let mut sections = part.split(';');
        let url = sections.next()?.trim();
        let is_next = sections
            .any(|attr| attr.trim() == "rel=\"next\"");
        if is_next {
            return Some(url.trim_start_matches('<').trim_end_matches('>').to_string());
        }
    }
    None
}
