//! Subsystem labelling for Node.js core pull requests.
//!
//! Fetches the files a pull request changes, resolves labels with the
//! [`labels`] crate and adds the ones that exist in the repository.
//!
//! - [`GitHubClient`] talks to the GitHub REST API
//! - [`PullRequestLabeler`] ties file listing, classification and labelling together
//! - [`PullRequestEvent`] turns `pull_request` webhook payloads into labelling requests

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod labeler;
pub mod webhook;

pub use cache::ExistingLabelCache;
pub use config::BotConfig;
pub use error::{BotError, Result};
pub use github::GitHubClient;
pub use labeler::{
    ChangeSource, LabelOutcome, LabelSink, LabelSource, PullRequestLabeler, PullRequestRef,
};
pub use webhook::{LabelRequest, PullRequestEvent};
