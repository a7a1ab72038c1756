//! Ordered path rules and label templates.
//!
//! A [`RuleTable`] is traversed top to bottom and the first [`Rule`] whose
//! pattern matches a path decides that path's labels. Later rules are never
//! consulted for the same path, so the order of entries is part of the
//! table's meaning.

use regex::{Captures, Regex};
use thiserror::Error;

/// Errors raised while compiling a custom rule table.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Invalid path pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Label template `${group}` references a missing capture group in `{pattern}`")]
    MissingCaptureGroup { pattern: String, group: usize },
}

/// A single label template attached to a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelTemplate {
    /// Emit this label verbatim
    Literal(String),
    /// Match the path but emit nothing for it
    Ignore,
    /// Emit the text captured by the given group
    Capture(usize),
}

impl LabelTemplate {
    /// Parse the textual template form used by the rule tables.
    ///
    /// `""` ignores the path, `"$2"` substitutes capture group 2, anything
    /// else is a literal label.
    #[must_use]
    pub fn parse(template: &str) -> Self {
        if template.is_empty() {
            return Self::Ignore;
        }

        match template.strip_prefix('$').map(str::parse::<usize>) {
            Some(Ok(group)) => Self::Capture(group),
            _ => Self::Literal(template.to_string()),
        }
    }

    fn resolve(&self, captures: &Captures<'_>) -> Option<String> {
        let label = match self {
            Self::Literal(label) => label.as_str(),
            Self::Ignore => return None,
            Self::Capture(group) => captures.get(*group)?.as_str(),
        };

        if label.is_empty() {
            None
        } else {
            Some(label.to_string())
        }
    }
}

/// A compiled path pattern and the labels it produces.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    templates: Vec<LabelTemplate>,
}

impl Rule {
    /// Compile a rule from a pattern and its textual label templates.
    pub fn new(pattern: &str, templates: &[&str]) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let templates: Vec<LabelTemplate> =
            templates.iter().map(|t| LabelTemplate::parse(t)).collect();

        // captures_len() counts the implicit whole-match group 0
        for template in &templates {
            if let LabelTemplate::Capture(group) = template {
                if *group >= regex.captures_len() {
                    return Err(RuleError::MissingCaptureGroup {
                        pattern: pattern.to_string(),
                        group: *group,
                    });
                }
            }
        }

        Ok(Self {
            pattern: regex,
            templates,
        })
    }

    /// The source text of this rule's pattern.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Label templates in declaration order.
    pub fn templates(&self) -> &[LabelTemplate] {
        &self.templates
    }

    fn apply(&self, path: &str) -> Option<Vec<String>> {
        let captures = self.pattern.captures(path)?;
        Some(
            self.templates
                .iter()
                .filter_map(|template| template.resolve(&captures))
                .collect(),
        )
    }
}

/// An ordered, first-match-wins list of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Compile a table from `(pattern, templates)` pairs, keeping their order.
    pub fn compile(entries: &[(&str, &[&str])]) -> Result<Self, RuleError> {
        let rules = entries
            .iter()
            .map(|(pattern, templates)| Rule::new(pattern, templates))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Build a table from already compiled rules.
    #[must_use]
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve the labels of the first rule matching `path`.
    ///
    /// Returns `None` when no rule matches. A matching rule whose templates
    /// all resolve to nothing yields `Some(vec![])`: the path is claimed by
    /// that rule and never falls through to later entries.
    pub fn match_first(&self, path: &str) -> Option<Vec<String>> {
        self.rules.iter().find_map(|rule| rule.apply(path))
    }

    /// Whether any rule in the table matches `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.rules.iter().any(|rule| rule.pattern.is_match(path))
    }
}
