use serde::{Deserialize, Serialize};

/// One tailnet device as reported by the discovery layer.
///
/// Field names follow the `tailscale status --json` schema; unknown fields
/// in the status output are ignored. A `Peer` is read-only for the duration
/// of a dispatch round: tasks receive their own clone and never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    /// Human-readable device name. Assumed unique within a snapshot;
    /// uniqueness is not enforced here.
    #[serde(rename = "Hostname")]
    pub hostname: String,

    /// Tailnet addresses in the order the status output lists them.
    /// May be empty for devices without an assigned address.
    #[serde(rename = "TailscaleIPs", default)]
    pub addresses: Vec<String>,

    /// Reachability flag from the status output.
    #[serde(rename = "Online", default)]
    pub online: bool,

    /// ACL tags. Devices without tags omit the field entirely.
    #[serde(rename = "Tags", default)]
    pub tags: Vec<String>,
}

impl Peer {
    /// First entry of the address list, if any.
    ///
    /// Dispatch targets only the first address; there is no fallback to
    /// later entries when the first one is unreachable.
    pub fn first_address(&self) -> Option<&str> {
        self.addresses.first().map(|s| s.as_str())
    }

    /// Exact, case-sensitive tag membership check.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
