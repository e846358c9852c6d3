pub mod peer;
pub use peer::Peer;

pub mod filter;
pub use filter::TagFilter;
