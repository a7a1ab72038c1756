//! `pull_request` webhook payloads.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::labeler::PullRequestRef;

const OPENED: &str = "opened";

/// The parts of a `pull_request` event the labeler needs.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub number: u64,
    pub pull_request: PullRequest,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub base: BaseRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseRef {
    #[serde(rename = "ref")]
    pub branch: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// A pull request that should be labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRequest {
    pub pull_request: PullRequestRef,
    pub base_branch: String,
}

impl PullRequestEvent {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// The labelling request for this event, if it warrants one.
    ///
    /// Only newly opened pull requests in a repository named `target_repo`
    /// qualify. The owner is not checked, so forks named like the target
    /// repository are labelled too.
    pub fn label_request(&self, target_repo: &str) -> Option<LabelRequest> {
        if self.action != OPENED {
            debug!(action = %self.action, "Ignoring pull_request action");
            return None;
        }
        if self.repository.name != target_repo {
            debug!(repo = %self.repository.name, "Ignoring repository");
            return None;
        }

        Some(LabelRequest {
            pull_request: PullRequestRef::new(
                &self.repository.owner.login,
                &self.repository.name,
                self.number,
            ),
            base_branch: self.pull_request.base.branch.clone(),
        })
    }
}
