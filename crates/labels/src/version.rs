//! Release-line labels for pull requests against maintenance branches.

use regex::Regex;
use std::sync::LazyLock;

static VERSION_BRANCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(v\d+\.(?:\d+|x))(?:-staging)?$").unwrap());

/// Extract the release line (`v6.x`, `v0.12`) from a target branch name.
///
/// Staging branches map to their release line. `master`, `main` and any
/// other name yield `None`.
pub fn release_line(target_branch: &str) -> Option<&str> {
    VERSION_BRANCH
        .captures(target_branch)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Append the release-line label for `target_branch`, if there is one.
pub fn annotate_version(mut labels: Vec<String>, target_branch: Option<&str>) -> Vec<String> {
    if let Some(line) = target_branch.and_then(release_line) {
        labels.push(line.to_string());
    }
    labels
}
