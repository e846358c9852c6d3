use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::domain::TagFilter;
use crate::error::{ModelError, ModelResult};

/// Parameters of one dispatch round, built once per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundSpec {
    /// Tag selection criterion. `Any` dispatches to every live peer.
    pub filter: TagFilter,
    /// Remote user the transport authenticates as.
    pub user: String,
    /// Command string executed verbatim on each selected peer.
    /// No shell escaping is applied anywhere; quoting is the caller's job.
    pub command: String,
    /// Concurrency cap. `None` (the default) launches one task per selected
    /// peer with no limit.
    pub limit: Option<NonZeroUsize>,
}

impl Default for RoundSpec {
    fn default() -> Self {
        Self {
            filter: TagFilter::Any,
            user: "root".to_string(),
            command: "echo Hello from $HOST".to_string(),
            limit: None,
        }
    }
}

impl RoundSpec {
    pub fn validate(&self) -> ModelResult<()> {
        if self.user.trim().is_empty() {
            return Err(ModelError::EmptyUser);
        }
        if self.command.trim().is_empty() {
            return Err(ModelError::EmptyCommand);
        }
        Ok(())
    }
}
