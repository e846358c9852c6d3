mod domain;
pub use domain::{Peer, TagFilter};

mod wire;
pub use wire::StatusSnapshot;

mod round;
pub use round::{RoundId, RoundSpec};

mod error;
pub use error::{ModelError, ModelResult};
