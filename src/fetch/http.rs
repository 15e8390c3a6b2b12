// src/fetch/http.rs
// =============================================================================
// The default page fetcher, built on reqwest.
//
// Key behavior:
// - One GET per URL, never retried
// - Fixed timeout and User-Agent from CrawlConfig
// - Redirects followed transparently (up to a limit)
// - Any non-2xx final status is a FetchError::HttpStatus
// =============================================================================

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, Response};

use super::PageFetcher;
use crate::config::CrawlConfig;
use crate::error::FetchError;

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    // reqwest::Client is an Arc internally, so cloning shares one pool
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(Policy::limited(config.max_redirects))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;
        let response = check_status(response)?;
        response.text().await.map_err(categorize_error)
    }
}

// Redirects were already followed by reqwest, so whatever status is left
// here is final. Only 2xx counts as a page.
fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::HttpStatus(status.as_u16()))
    }
}

// Maps reqwest's error into one of our fetch error kinds
//
// Order matters: a connect that times out reports both is_connect() and
// is_timeout(), and we want to call that a timeout.
fn categorize_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if let Some(status) = error.status() {
        FetchError::HttpStatus(status.as_u16())
    } else {
        FetchError::ConnectionFailed(error.to_string())
    }
}
