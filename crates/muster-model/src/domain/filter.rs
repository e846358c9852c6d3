use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Peer;

/// Tag selection criterion for a dispatch round.
///
/// Built from the `--tag` flag: the empty string means "match every peer",
/// anything else requires an exact, case-sensitive tag membership. Liveness
/// is a separate, always-enforced condition checked by the dispatch engine,
/// not part of this predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TagFilter {
    /// Match every peer (empty filter string).
    Any,
    /// Match peers carrying exactly this tag.
    Exact(String),
}

impl TagFilter {
    /// Pure, total predicate: no side effects, no hidden state.
    pub fn matches(&self, peer: &Peer) -> bool {
        match self {
            TagFilter::Any => true,
            TagFilter::Exact(tag) => peer.has_tag(tag),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, TagFilter::Any)
    }
}

impl Default for TagFilter {
    fn default() -> Self {
        Self::Any
    }
}

impl From<&str> for TagFilter {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Self::Any
        } else {
            Self::Exact(s.to_string())
        }
    }
}

impl From<String> for TagFilter {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Self::Any
        } else {
            Self::Exact(s)
        }
    }
}

impl From<TagFilter> for String {
    fn from(f: TagFilter) -> Self {
        match f {
            TagFilter::Any => String::new(),
            TagFilter::Exact(tag) => tag,
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagFilter::Any => f.write_str("*"),
            TagFilter::Exact(tag) => f.write_str(tag),
        }
    }
}
