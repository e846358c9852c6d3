mod error;
pub use error::DiscoveryError;

mod provider;
pub use provider::{Inventory, StaticFile, StatusCli};
