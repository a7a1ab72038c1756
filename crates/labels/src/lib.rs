//! Subsystem label resolution for Node.js core pull requests.
//!
//! Given the paths a pull request changes, this crate works out which
//! labels it should carry: `c++` for native code, `fs` or `crypto` for
//! subsystem work, `doc`/`test`/`benchmark` for changes that stay in one of
//! those trees, `lib / src` for sweeping changes, and `v6.x`-style release
//! lines for pull requests against maintenance branches.
//!
//! # Usage
//!
//! ```
//! let labels = labels::resolve_labels(&["src/node_file.cc", "lib/fs.js"], Some("v6.x"));
//! assert_eq!(labels, vec!["c++", "fs", "v6.x"]);
//! ```
//!
//! # Architecture
//!
//! - [`RuleTable`] holds ordered, first-match-wins path rules
//! - [`Classifier`] combines the general and exclusive tables with the
//!   [`SubsystemSet`] that drives the noise heuristics
//! - [`annotate_version`] appends the release-line label
//!
//! Resolution is pure and synchronous. The built-in tables are compiled once
//! and shared, so any number of threads may classify concurrently.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classifier;
pub mod label_set;
pub mod rules;
pub mod tables;
pub mod version;

pub use classifier::{ChangeSet, Classifier, ClassifierOptions, SubsystemSet};
pub use label_set::LabelSet;
pub use rules::{LabelTemplate, Rule, RuleError, RuleTable};
pub use tables::LIB_SRC_LABEL;
pub use version::{annotate_version, release_line};

/// Resolve labels with the built-in Node.js core tables and the collapse enabled.
pub fn resolve_labels<S: AsRef<str>>(paths: &[S], target_branch: Option<&str>) -> Vec<String> {
    Classifier::node_core().resolve_labels(paths, target_branch, true)
}

/// Resolve labels with the built-in tables, choosing whether the collapse applies.
pub fn resolve_labels_with_limit<S: AsRef<str>>(
    paths: &[S],
    target_branch: Option<&str>,
    limit: bool,
) -> Vec<String> {
    Classifier::node_core().resolve_labels(paths, target_branch, limit)
}
