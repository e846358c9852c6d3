pub mod status;
pub use status::StatusSnapshot;
