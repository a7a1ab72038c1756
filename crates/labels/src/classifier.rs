//! # Subsystem Label Classifier
//!
//! Maps the files changed by a pull request to an ordered, duplicate-free
//! list of labels.
//!
//! Resolution order:
//! 1. **Exclusive categories** - a changeset made only of `test/`, `doc/` or
//!    `benchmark/` paths is labelled from the exclusive table alone.
//! 2. **General rules** - otherwise every path goes through the general
//!    table, collapsing to `lib / src` once too many JS subsystems show up.
//! 3. **Release line** - a `vN.x` (or `vN.x-staging`) target branch appends
//!    its release-line label.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, instrument, trace};

use crate::label_set::LabelSet;
use crate::rules::RuleTable;
use crate::tables::{EXCLUSIVE_RULES, GENERAL_RULES, JS_SUBSYSTEMS, LIB_SRC_LABEL};
use crate::version::annotate_version;

const DOC_LABEL: &str = "doc";

static NODE_CORE: LazyLock<Classifier> = LazyLock::new(|| {
    Classifier::new(
        RuleTable::compile(GENERAL_RULES).expect("built-in general rules compile"),
        RuleTable::compile(EXCLUSIVE_RULES).expect("built-in exclusive rules compile"),
        JS_SUBSYSTEMS.iter().copied().collect(),
    )
});

/// Tunable thresholds for the noise heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    /// Distinct subsystem labels kept before the next new one collapses them
    pub collapse_threshold: usize,
    /// Exclusive results with `doc` and more labels than this are suppressed
    pub doc_collapse_min_labels: usize,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            collapse_threshold: 4,
            doc_collapse_min_labels: 2,
        }
    }
}

/// Labels that name a single fine-grained subsystem.
#[derive(Debug, Clone, Default)]
pub struct SubsystemSet(HashSet<String>);

impl SubsystemSet {
    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SubsystemSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

fn default_limit() -> bool {
    true
}

/// The files touched by a pull request and where it is headed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Changed file paths, relative to the repository root
    pub paths: Vec<String>,
    /// Branch the pull request targets
    #[serde(default)]
    pub target_branch: Option<String>,
    /// Whether the `lib / src` collapse is active
    #[serde(default = "default_limit")]
    pub limit: bool,
}

impl ChangeSet {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            target_branch: None,
            limit: true,
        }
    }

    #[must_use]
    pub fn with_target_branch(mut self, branch: impl Into<String>) -> Self {
        self.target_branch = Some(branch.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: bool) -> Self {
        self.limit = limit;
        self
    }
}

/// Rule tables plus the subsystem set they are judged against.
///
/// A classifier holds no per-call state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    general: RuleTable,
    exclusive: RuleTable,
    subsystems: SubsystemSet,
    options: ClassifierOptions,
}

impl Classifier {
    /// The shared classifier built from the Node.js core tables.
    pub fn node_core() -> &'static Classifier {
        &NODE_CORE
    }

    #[must_use]
    pub fn new(general: RuleTable, exclusive: RuleTable, subsystems: SubsystemSet) -> Self {
        Self {
            general,
            exclusive,
            subsystems,
            options: ClassifierOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ClassifierOptions) -> Self {
        self.options = options;
        self
    }

    pub fn general(&self) -> &RuleTable {
        &self.general
    }

    pub fn exclusive(&self) -> &RuleTable {
        &self.exclusive
    }

    pub fn subsystems(&self) -> &SubsystemSet {
        &self.subsystems
    }

    pub fn options(&self) -> ClassifierOptions {
        self.options
    }

    /// Resolve the labels for a [`ChangeSet`].
    pub fn classify(&self, change_set: &ChangeSet) -> Vec<String> {
        self.resolve_labels(
            &change_set.paths,
            change_set.target_branch.as_deref(),
            change_set.limit,
        )
    }

    /// Resolve labels for `paths`, appending the release line of `target_branch`.
    ///
    /// Unmatched paths and unrecognised branch names are ignored. An empty
    /// `paths` slice yields no subsystem labels.
    #[instrument(level = "debug", skip_all, fields(paths = paths.len(), target_branch = ?target_branch, limit = limit))]
    pub fn resolve_labels<S: AsRef<str>>(
        &self,
        paths: &[S],
        target_branch: Option<&str>,
        limit: bool,
    ) -> Vec<String> {
        let exclusive = self.resolve_exclusive(paths);
        let labels = if exclusive.is_empty() {
            self.resolve_general(paths, limit)
        } else {
            exclusive
        };

        let labels = annotate_version(labels, target_branch);
        debug!(labels = ?labels, "Resolved labels");
        labels
    }

    /// Labels for a changeset that lives entirely in one exclusive tree.
    ///
    /// Returns an empty list when any path falls outside the exclusive table,
    /// or when a doc-heavy changeset mixes in unrelated non-subsystem labels.
    pub fn resolve_exclusive<S: AsRef<str>>(&self, paths: &[S]) -> Vec<String> {
        if !paths.iter().all(|p| self.exclusive.matches(p.as_ref())) {
            return Vec::new();
        }

        let labels = self.aggregate(&self.exclusive, paths, false);

        if labels.contains(DOC_LABEL)
            && labels.len() > self.options.doc_collapse_min_labels
            && !all_under(paths, "test/")
        {
            let only_subsystems = labels
                .iter()
                .filter(|label| *label != DOC_LABEL)
                .all(|label| self.subsystems.contains(label));

            if only_subsystems || all_under(paths, "doc/") {
                debug!(
                    suppressed = labels.len() - 1,
                    "Collapsing doc changes to a single doc label"
                );
                return vec![DOC_LABEL.to_string()];
            }

            debug!("Doc changes mixed with other trees, not exclusive");
            return Vec::new();
        }

        labels.into_vec()
    }

    /// Labels from the general table, with the `lib / src` collapse when `limit` is set.
    pub fn resolve_general<S: AsRef<str>>(&self, paths: &[S], limit: bool) -> Vec<String> {
        self.aggregate(&self.general, paths, limit).into_vec()
    }

    fn aggregate<S: AsRef<str>>(&self, table: &RuleTable, paths: &[S], limit: bool) -> LabelSet {
        let collapsible = limit && paths.iter().any(|p| is_lib_or_src(p.as_ref()));

        let mut labels = LabelSet::new();
        let mut matched_subsystems: Vec<String> = Vec::new();
        let mut collapsed = false;

        for path in paths {
            let path = path.as_ref();
            let Some(resolved) = table.match_first(path) else {
                trace!(path, "No rule matched");
                continue;
            };

            for label in resolved {
                if collapsible && self.subsystems.contains(&label) {
                    if collapsed || matched_subsystems.contains(&label) {
                        continue;
                    }

                    if matched_subsystems.len() >= self.options.collapse_threshold {
                        for subsystem in &matched_subsystems {
                            labels.remove(subsystem);
                        }
                        labels.insert(LIB_SRC_LABEL);
                        collapsed = true;
                        debug!(
                            subsystems = ?matched_subsystems,
                            trigger = %label,
                            "Too many subsystems touched, collapsing to lib / src"
                        );
                        continue;
                    }

                    matched_subsystems.push(label.clone());
                }

                labels.insert(&label);
            }
        }

        labels
    }
}

fn is_lib_or_src(path: &str) -> bool {
    path.starts_with("lib/") || path.starts_with("src/")
}

fn all_under<S: AsRef<str>>(paths: &[S], prefix: &str) -> bool {
    paths.iter().all(|p| p.as_ref().starts_with(prefix))
}
