//! crates/logging/src/levels.rs
//! Diagnostic topics that can be enabled individually with `--debug`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Prefix shared by every tracing target emitted by the workspace.
pub const TARGET_PREFIX: &str = "pageshift";

/// A subsystem whose debug output can be switched on independently.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Topic {
    /// Exact and tolerant shift searches.
    Search,
    /// Zero-shift bulk comparison.
    Bulk,
    /// Classification decisions.
    Policy,
    /// Page lookup and reads.
    Store,
    /// Batch processing of collision logs.
    Batch,
}

impl Topic {
    /// Every topic, in display order.
    pub const ALL: [Self; 5] = [
        Self::Search,
        Self::Bulk,
        Self::Policy,
        Self::Store,
        Self::Batch,
    ];

    /// Name accepted on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Bulk => "bulk",
            Self::Policy => "policy",
            Self::Store => "store",
            Self::Batch => "batch",
        }
    }

    /// Full tracing target for the topic, e.g. `pageshift::search`.
    pub fn target(self) -> String {
        format!("{TARGET_PREFIX}::{}", self.as_str())
    }

    /// Maps a tracing target back to its topic.
    ///
    /// Only targets under the workspace prefix are recognised, so
    /// `pageshift::search` maps to [`Topic::Search`] while `search` does not.
    pub fn from_target(target: &str) -> Option<Self> {
        let rest = target.strip_prefix(TARGET_PREFIX)?.strip_prefix("::")?;
        let head = rest.split("::").next().unwrap_or(rest);
        Self::ALL.into_iter().find(|topic| topic.as_str() == head)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a `--debug` topic name is not recognised.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("unknown debug topic '{name}' (expected one of: search, bulk, policy, store, batch, all)")]
pub struct UnknownTopic {
    /// Rejected name.
    pub name: String,
}

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let name = text.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == name)
            .ok_or(UnknownTopic {
                name: text.to_owned(),
            })
    }
}

/// Parses a comma-separated topic list such as `search,bulk` or `all`.
pub fn parse_topic_list(text: &str) -> Result<Vec<Topic>, UnknownTopic> {
    let mut topics = Vec::new();
    for part in text.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        if part.eq_ignore_ascii_case("all") {
            return Ok(Topic::ALL.to_vec());
        }
        let topic: Topic = part.parse()?;
        if !topics.contains(&topic) {
            topics.push(topic);
        }
    }
    Ok(topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_use_workspace_prefix() {
        assert_eq!(Topic::Search.target(), "pageshift::search");
        assert_eq!(Topic::Batch.target(), "pageshift::batch");
    }

    #[test]
    fn from_target_round_trips() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_target(&topic.target()), Some(topic));
        }
    }

    #[test]
    fn from_target_accepts_nested_targets() {
        assert_eq!(
            Topic::from_target("pageshift::store::lookup"),
            Some(Topic::Store)
        );
    }

    #[test]
    fn from_target_rejects_foreign_targets() {
        assert_eq!(Topic::from_target("search"), None);
        assert_eq!(Topic::from_target("pageshiftx::search"), None);
        assert_eq!(Topic::from_target("pageshift::unknown"), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("BULK".parse::<Topic>(), Ok(Topic::Bulk));
        assert_eq!(" policy ".parse::<Topic>(), Ok(Topic::Policy));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let error = "delta".parse::<Topic>().unwrap_err();
        assert_eq!(error.name, "delta");
        assert!(error.to_string().contains("unknown debug topic 'delta'"));
    }

    #[test]
    fn topic_list_deduplicates() {
        assert_eq!(
            parse_topic_list("search,bulk,search"),
            Ok(vec![Topic::Search, Topic::Bulk])
        );
    }

    #[test]
    fn topic_list_all_expands() {
        assert_eq!(parse_topic_list("store,all"), Ok(Topic::ALL.to_vec()));
    }

    #[test]
    fn empty_topic_list() {
        assert_eq!(parse_topic_list(""), Ok(Vec::new()));
        assert_eq!(parse_topic_list(" , "), Ok(Vec::new()));
    }
}
