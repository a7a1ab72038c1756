//! Applies resolved subsystem labels to pull requests.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use labels::Classifier;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::cache::ExistingLabelCache;
use crate::error::{BotError, Result};

/// Lists the files a pull request changes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangeSource: Send + Sync {
    async fn list_files(&self, owner: &str, repo: &str, number: u64) -> Result<Vec<String>>;
}

/// Lists the labels defined in a repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelSource: Send + Sync {
    async fn list_repo_labels(&self, owner: &str, repo: &str) -> Result<Vec<String>>;
}

/// Adds labels to an issue or pull request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelSink: Send + Sync {
    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<()>;
}

/// A pull request in a specific repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PullRequestRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }

    /// Build from an `owner/name` repository string.
    pub fn parse(repository: &str, number: u64) -> Result<Self> {
        match repository.split_once('/') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok(Self::new(owner, repo, number))
            }
            _ => Err(BotError::InvalidRepository(repository.to_string())),
        }
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// What happened when labelling a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelOutcome {
    /// Labels the classifier produced
    pub resolved: Vec<String>,
    /// Resolved labels that exist in the repository, in resolution order
    pub applied: Vec<String>,
}

/// Resolves and applies subsystem labels to pull requests.
pub struct PullRequestLabeler {
    changes: Arc<dyn ChangeSource>,
    labels: Arc<dyn LabelSource>,
    sink: Arc<dyn LabelSink>,
    classifier: Classifier,
    cache: ExistingLabelCache,
    wait: Duration,
    dry_run: bool,
}

impl PullRequestLabeler {
    pub fn new(
        changes: Arc<dyn ChangeSource>,
        labels: Arc<dyn LabelSource>,
        sink: Arc<dyn LabelSink>,
    ) -> Self {
        Self {
            changes,
            labels,
            sink,
            classifier: Classifier::node_core().clone(),
            cache: ExistingLabelCache::new(),
            wait: Duration::ZERO,
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = ExistingLabelCache::with_ttl(ttl);
        self
    }

    /// Delay applied before labelling a pull request from a webhook event.
    #[must_use]
    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Resolve labels without writing them to GitHub.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Wait for the configured delay, then label the pull request.
    ///
    /// Freshly opened pull requests may not list all their files right away.
    pub async fn label_after_wait(
        &self,
        pr: &PullRequestRef,
        base_branch: Option<&str>,
    ) -> Result<LabelOutcome> {
        if !self.wait.is_zero() {
            debug!(pr = %pr, wait_secs = self.wait.as_secs(), "Waiting before resolving labels");
            tokio::time::sleep(self.wait).await;
        }
        self.label_pull_request(pr, base_branch).await
    }

    /// Resolve labels for the pull request's files and add those the repository knows.
    #[instrument(skip(self, pr), fields(pr = %pr))]
    pub async fn label_pull_request(
        &self,
        pr: &PullRequestRef,
        base_branch: Option<&str>,
    ) -> Result<LabelOutcome> {
        let files = self
            .changes
            .list_files(&pr.owner, &pr.repo, pr.number)
            .await?;
        debug!(files = files.len(), "Fetched changed files");

        let resolved = self.classifier.resolve_labels(&files, base_branch, true);
        if resolved.is_empty() {
            info!("No labels resolved");
            return Ok(LabelOutcome::default());
        }

        let existing = self.existing_labels(&pr.owner, &pr.repo).await?;
        let existing: HashSet<&str> = existing.iter().map(String::as_str).collect();

        let (applied, unknown): (Vec<String>, Vec<String>) = resolved
            .iter()
            .cloned()
            .partition(|label| existing.contains(label.as_str()));

        if !unknown.is_empty() {
            debug!(labels = ?unknown, "Skipping labels missing from the repository");
        }

        if applied.is_empty() {
            info!(resolved = ?resolved, "None of the resolved labels exist");
        } else if self.dry_run {
            info!(labels = ?applied, "Dry run, not adding labels");
        } else {
            self.sink
                .add_labels(&pr.owner, &pr.repo, pr.number, &applied)
                .await?;
            info!(labels = ?applied, "Added labels");
        }

        Ok(LabelOutcome { resolved, applied })
    }

    async fn existing_labels(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        if let Some(labels) = self.cache.get(owner, repo).await {
            debug!(owner, repo, "Using cached repository labels");
            return Ok(labels);
        }

        let labels = self.labels.list_repo_labels(owner, repo).await?;
        debug!(owner, repo, count = labels.len(), "Fetched repository labels");
        self.cache.insert(owner, repo, labels.clone()).await;
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct StaticChanges(Vec<String>);

    #[async_trait]
    impl ChangeSource for StaticChanges {
        async fn list_files(&self, _owner: &str, _repo: &str, _number: u64) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    #[async_trait]
    impl LabelSink for RecordingSink {
        async fn add_labels(
            &self,
            owner: &str,
            repo: &str,
            number: u64,
            labels: &[String],
        ) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((format!("{owner}/{repo}#{number}"), labels.to_vec()));
            Ok(())
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    fn changes(files: &[&str]) -> Arc<StaticChanges> {
        Arc::new(StaticChanges(strings(files)))
    }

    fn repo_labels(names: &'static [&'static str]) -> Arc<MockLabelSource> {
        let mut source = MockLabelSource::new();
        source
            .expect_list_repo_labels()
            .returning(move |_, _| Ok(strings(names)));
        Arc::new(source)
    }

    fn node_pr() -> PullRequestRef {
        PullRequestRef::new("nodejs", "node", 42)
    }

    #[tokio::test]
    async fn test_applies_existing_labels_in_order() {
        let sink = Arc::new(RecordingSink::default());
        let labeler = PullRequestLabeler::new(
            changes(&["src/node_file.cc", "lib/fs.js"]),
            repo_labels(&["fs", "c++", "v6.x", "doc"]),
            sink.clone(),
        );

        let outcome = labeler
            .label_pull_request(&node_pr(), Some("v6.x"))
            .await
            .unwrap();

        assert_eq!(outcome.resolved, strings(&["c++", "fs", "v6.x"]));
        assert_eq!(outcome.applied, strings(&["c++", "fs", "v6.x"]));

        let calls = sink.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "nodejs/node#42");
        assert_eq!(calls[0].1, strings(&["c++", "fs", "v6.x"]));
    }

    #[tokio::test]
    async fn test_skips_labels_missing_from_repo() {
        let sink = Arc::new(RecordingSink::default());
        let labeler = PullRequestLabeler::new(
            changes(&["src/node_file.cc", "lib/fs.js"]),
            repo_labels(&["fs"]),
            sink.clone(),
        );

        let outcome = labeler.label_pull_request(&node_pr(), None).await.unwrap();

        assert_eq!(outcome.resolved, strings(&["c++", "fs"]));
        assert_eq!(outcome.applied, strings(&["fs"]));
        assert_eq!(sink.calls.lock().unwrap()[0].1, strings(&["fs"]));
    }

    #[tokio::test]
    async fn test_no_labels_resolved_makes_no_calls() {
        let mut source = MockLabelSource::new();
        source.expect_list_repo_labels().never();
        let mut sink = MockLabelSink::new();
        sink.expect_add_labels().never();

        let labeler = PullRequestLabeler::new(
            changes(&["src/node_version.h"]),
            Arc::new(source),
            Arc::new(sink),
        );

        let outcome = labeler.label_pull_request(&node_pr(), None).await.unwrap();
        assert_eq!(outcome, LabelOutcome::default());
    }

    #[tokio::test]
    async fn test_no_existing_labels_skips_sink() {
        let mut sink = MockLabelSink::new();
        sink.expect_add_labels().never();

        let labeler = PullRequestLabeler::new(
            changes(&["lib/fs.js"]),
            repo_labels(&["doc"]),
            Arc::new(sink),
        );

        let outcome = labeler.label_pull_request(&node_pr(), None).await.unwrap();
        assert_eq!(outcome.resolved, strings(&["fs"]));
        assert!(outcome.applied.is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_does_not_add_labels() {
        let mut sink = MockLabelSink::new();
        sink.expect_add_labels().never();

        let labeler = PullRequestLabeler::new(
            changes(&["lib/fs.js"]),
            repo_labels(&["fs"]),
            Arc::new(sink),
        )
        .with_dry_run(true);

        let outcome = labeler.label_pull_request(&node_pr(), None).await.unwrap();
        assert_eq!(outcome.applied, strings(&["fs"]));
    }

    #[tokio::test]
    async fn test_repo_labels_are_cached() {
        let mut source = MockLabelSource::new();
        source
            .expect_list_repo_labels()
            .times(1)
            .returning(|_, _| Ok(strings(&["fs"])));
        let mut sink = MockLabelSink::new();
        sink.expect_add_labels().times(2).returning(|_, _, _, _| Ok(()));

        let labeler = PullRequestLabeler::new(
            changes(&["lib/fs.js"]),
            Arc::new(source),
            Arc::new(sink),
        );

        labeler.label_pull_request(&node_pr(), None).await.unwrap();
        labeler
            .label_pull_request(&PullRequestRef::new("nodejs", "node", 43), None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_source_errors_propagate() {
        let mut files = MockChangeSource::new();
        files.expect_list_files().returning(|_, _, _| {
            Err(BotError::Api {
                status: 404,
                message: "Not Found".to_string(),
            })
        });
        let mut sink = MockLabelSink::new();
        sink.expect_add_labels().never();

        let labeler =
            PullRequestLabeler::new(Arc::new(files), repo_labels(&["fs"]), Arc::new(sink));

        let err = labeler.label_pull_request(&node_pr(), None).await.unwrap_err();
        assert!(matches!(err, BotError::Api { status: 404, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_label_after_wait_sleeps_first() {
        let sink = Arc::new(RecordingSink::default());
        let labeler = PullRequestLabeler::new(
            changes(&["lib/fs.js"]),
            repo_labels(&["fs"]),
            sink.clone(),
        )
        .with_wait(Duration::from_secs(2));

        let start = tokio::time::Instant::now();
        let outcome = labeler.label_after_wait(&node_pr(), None).await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(2));
        assert_eq!(outcome.applied, strings(&["fs"]));
        assert_eq!(sink.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_repository() {
        let pr = PullRequestRef::parse("nodejs/node", 7).unwrap();
        assert_eq!(pr, PullRequestRef::new("nodejs", "node", 7));
        assert_eq!(pr.to_string(), "nodejs/node#7");

        for bad in ["node", "/node", "nodejs/", "a/b/c"] {
            assert!(matches!(
                PullRequestRef::parse(bad, 1),
                Err(BotError::InvalidRepository(_))
            ));
        }
    }
}
