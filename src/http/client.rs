// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use super::header_map::RequestHeaders;
use super::headers::LOCATION;
use super::request::Request;
use super::response::{Response, StatusKind};
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};
use crate::uri::{absolute, clean, IntoUri, Uri};

/// Redirect hops followed by [`HttpClient::get`]
pub const DEFAULT_REDIRECT_LIMIT: u32 = 5;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string, not sent when unset
    pub user_agent: Option<String>,
    /// Connect and per-request timeout, applied to every hop separately
    pub timeout: Option<Duration>,
    /// Maximum redirects to follow
    pub max_redirects: u32,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: None,
            max_redirects: DEFAULT_REDIRECT_LIMIT,
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    /// Create a new client config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the default redirect limit
    pub fn max_redirects(mut self, max: u32) -> Self {
        self.max_redirects = max;
        self
    }

    /// Accept invalid TLS certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Create config for fetching pages to index
    pub fn for_crawling() -> Self {
        Self {
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            timeout: Some(Duration::from_secs(20)),
            ..Default::default()
        }
    }
}

/// Blocking HTTP client that follows redirects itself
///
/// Holds no per-fetch state: every call builds its own requests and
/// responses, so a client can be cloned and reused freely.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .redirect(Policy::none())
            .no_gzip()
            .no_deflate()
            .no_brotli()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// GET `uri`, following up to the configured number of redirects
    ///
    /// Returns `Ok(None)` when the URI, or a redirect target, cannot be
    /// resolved to an `http` or `https` URI.
    pub fn get(&self, uri: impl IntoUri, headers: RequestHeaders) -> Result<Option<Response>> {
        self.get_with_limit(uri, headers, self.config.max_redirects)
    }

    /// GET `uri`, following at most `limit` redirects
    ///
    /// Caller headers go out with the first request only; later hops carry
    /// the defaults.
    pub fn get_with_limit(
        &self,
        uri: impl IntoUri,
        headers: RequestHeaders,
        limit: u32,
    ) -> Result<Option<Response>> {
        let uri = clean(uri).filter(Uri::is_http);
        if limit == 0 {
            return Err(Error::too_many_redirects(
                uri.map(|u| u.to_string()).unwrap_or_default(),
                limit,
            ));
        }
        let Some(mut current) = uri else {
            return Ok(None);
        };

        let mut headers = headers;
        let mut remaining = limit;
        loop {
            let request = Request::get(
                current.clone(),
                self.config.user_agent.as_deref(),
                std::mem::take(&mut headers),
            );
            let mut response = self.execute(request)?;

            match response.kind() {
                StatusKind::Success | StatusKind::NotModified => {
                    response.stamp_location();
                    response.decode();
                    return Ok(Some(response));
                }
                StatusKind::Redirect => {
                    if remaining == 0 {
                        return Err(Error::too_many_redirects(current.to_string(), limit));
                    }
                    remaining -= 1;

                    let Some(next) = self.redirect_target(&response, &current) else {
                        return Ok(None);
                    };
                    tracing::debug!(
                        from = %current,
                        to = %next,
                        remaining,
                        "Following redirect"
                    );
                    current = next;
                }
                StatusKind::Other => return Ok(Some(response)),
            }
        }
    }

    /// HEAD `uri` without following redirects
    pub fn head(&self, uri: impl IntoUri, headers: RequestHeaders) -> Result<Option<Response>> {
        let Some(uri) = clean(uri).filter(Uri::is_http) else {
            return Ok(None);
        };

        let request = Request::head(uri, self.config.user_agent.as_deref(), headers);
        let mut response = self.execute(request)?;
        response.stamp_location();
        Ok(Some(response))
    }

    /// Execute a single request, no redirect handling
    pub fn execute(&self, request: Request) -> Result<Response> {
        let start = Instant::now();
        tracing::debug!(method = %request.method, url = %request.uri, "Sending request");

        let response = self
            .client
            .request(request.method.clone(), request.uri.as_url().clone())
            .headers(request.headers.clone())
            .send()
            .map_err(|e| self.transport_error(e, &request))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .map_err(|e| self.transport_error(e, &request))?;
        let response_time = start.elapsed().as_millis() as u64;

        tracing::debug!(
            method = %request.method,
            url = %request.uri,
            status = status.as_u16(),
            elapsed_ms = response_time,
            "Received response"
        );

        Ok(Response::new(status, headers, body, request.uri, response_time))
    }

    fn redirect_target(&self, response: &Response, current: &Uri) -> Option<Uri> {
        let target = response
            .header(LOCATION)
            .and_then(|location| absolute(location, current))
            .filter(Uri::is_http);
        if target.is_none() {
            tracing::debug!(
                from = %current,
                location = response.header(LOCATION),
                "Redirect target is not fetchable"
            );
        }
        target
    }

    fn transport_error(&self, err: reqwest::Error, request: &Request) -> Error {
        if err.is_timeout() {
            let duration_ms = self
                .config
                .timeout
                .map(|t| t.as_millis() as u64)
                .unwrap_or_default();
            Error::timeout_with_url(request.method.as_str(), duration_ms, request.uri.as_str())
        } else {
            Error::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, None);
        assert_eq!(client.config().max_redirects, DEFAULT_REDIRECT_LIMIT);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpClientConfig::new()
            .user_agent("Custom Agent")
            .timeout(Duration::from_secs(60))
            .max_redirects(2);

        assert_eq!(config.user_agent.as_deref(), Some("Custom Agent"));
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.max_redirects, 2);
    }

    #[test]
    fn test_crawling_preset() {
        let config = HttpClientConfig::for_crawling();
        assert_eq!(config.user_agent.as_deref(), Some(DEFAULT_USER_AGENT));
        assert_eq!(config.timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_invalid_proxy() {
        let err = HttpClient::with_config(HttpClientConfig::new().proxy("::not a proxy::"))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_zero_limit_fails_before_request() {
        let client = HttpClient::new().unwrap();
        let err = client
            .get_with_limit("http://example.invalid/", RequestHeaders::new(), 0)
            .unwrap_err();
        assert!(matches!(err, Error::TooManyRedirects { limit: 0, .. }));
        assert_eq!(err.url(), Some("http://example.invalid/"));
    }

    #[test]
    fn test_unresolvable_uri_is_none() {
        let client = HttpClient::new().unwrap();
        assert!(client.get("", RequestHeaders::new()).unwrap().is_none());
        assert!(client
            .head("mailto:someone@example.com", RequestHeaders::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_non_http_scheme_is_none() {
        let client = HttpClient::new().unwrap();
        assert!(client
            .get("ftp://files.example.com/pub/", RequestHeaders::new())
            .unwrap()
            .is_none());
        assert!(client
            .head("file://localhost/etc/hosts", RequestHeaders::new())
            .unwrap()
            .is_none());
    }
}
