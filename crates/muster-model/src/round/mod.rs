pub mod id;
pub use id::RoundId;

pub mod spec;
pub use spec::RoundSpec;
