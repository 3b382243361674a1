use reqwest::blocking::{Client, Request};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::config::Config;
use crate::error::{Result, SampleError};
use crate::repolist::{GitHubError, RepoDetail, RepoSummary, UserProfile};

/// The three lookups the sampler needs.
pub trait RepoSource {
    /// Public repositories with ids greater than `since`, in id order.
    fn list_repositories(&self, since: u64) -> Result<Vec<RepoSummary>>;
    fn repository(&self, url: &str) -> Result<RepoDetail>;
    fn user(&self, url: &str) -> Result<UserProfile>;
}

pub struct GitHubClient {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| SampleError::Config(format!("invalid user_agent: {e}")))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn listing_request(&self, since: u64) -> Result<Request> {
        let url = format!("{}/repositories", self.api_base);
        Ok(self.authorized(self.client.get(url).query(&[("since", since)]))
            .build()?)
    }

    fn authorized(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        trace!(url = %request.url(), "GET");
        let response = self.client.execute(request)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text()?;
            let message = match serde_json::from_str::<GitHubError>(&body) {
                Ok(err) => err.message,
                Err(_) => body,
            };
            return Err(SampleError::GitHubApi {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>()?)
    }
}

impl RepoSource for GitHubClient {
    fn list_repositories(&self, since: u64) -> Result<Vec<RepoSummary>> {
        self.fetch(self.listing_request(since)?)
    }

    fn repository(&self, url: &str) -> Result<RepoDetail> {
        self.fetch(self.authorized(self.client.get(url)).build()?)
    }

    fn user(&self, url: &str) -> Result<UserProfile> {
        self.fetch(self.authorized(self.client.get(url)).build()?)
    }
}
