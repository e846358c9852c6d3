mod engine;
pub use engine::DispatchEngine;

mod select;
pub use select::select_peers;

mod summary;
pub use summary::RoundSummary;
