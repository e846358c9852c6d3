use muster_model::{Peer, TagFilter};

/// Selects the peers a round dispatches to: live peers matching the
/// filter, in inventory order, each at most once.
///
/// Liveness is enforced here unconditionally; the tag filter is the only
/// optional dimension. Skipped peers leave no trace.
pub fn select_peers(peers: &[Peer], filter: &TagFilter) -> Vec<Peer> {
    peers
        .iter()
        .filter(|p| p.online && filter.matches(p))
        .cloned()
        .collect()
}
