//! GitHub REST client for pull request files and labels.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BotConfig;
use crate::error::{BotError, Result};
use crate::labeler::{ChangeSource, LabelSink, LabelSource};

const PER_PAGE: usize = 100;

#[derive(Debug, Deserialize)]
struct PullRequestFile {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct RepoLabel {
    name: String,
}

#[derive(Debug, Serialize)]
struct AddLabelsRequest<'a> {
    labels: &'a [String],
}

/// GitHub API client used by the labeler.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    token: String,
    api_url: String,
}

impl GitHubClient {
    /// Create a client against `api_url`.
    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("nodejs-github-bot"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            token: token.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &BotConfig) -> Result<Self> {
        Self::new(&config.token, &config.api_url)
    }

    /// Fetch every page of a list endpoint.
    async fn get_all_pages<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = format!("{}{path}", self.api_url);
        let mut items = Vec::new();

        for page in 1.. {
            let response = self
                .client
                .get(&url)
                .header(AUTHORIZATION, format!("Bearer {}", self.token))
                .query(&[("per_page", PER_PAGE), ("page", page)])
                .send()
                .await?;

            let batch: Vec<T> = check_status(response).await?.json().await?;
            let len = batch.len();
            items.extend(batch);
            debug!(path, page, len, "Fetched page");

            if len < PER_PAGE {
                break;
            }
        }

        Ok(items)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(BotError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ChangeSource for GitHubClient {
    async fn list_files(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<String>> {
        let files: Vec<PullRequestFile> = self
            .get_all_pages(&format!("/repos/{owner}/{repo}/pulls/{number}/files"))
            .await?;
        Ok(files.into_iter().map(|f| f.filename).collect())
    }
}

#[async_trait]
impl LabelSource for GitHubClient {
    async fn list_repo_labels(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        let labels: Vec<RepoLabel> = self
            .get_all_pages(&format!("/repos/{owner}/{repo}/labels"))
            .await?;
        Ok(labels.into_iter().map(|l| l.name).collect())
    }
}

#[async_trait]
impl LabelSink for GitHubClient {
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<()> {
        let url = format!("{}/repos/{owner}/{repo}/issues/{number}/labels", self.api_url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(&AddLabelsRequest { labels })
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}
