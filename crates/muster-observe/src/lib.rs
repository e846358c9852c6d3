mod config;
pub use config::LoggerConfig;

mod error;
pub use error::{LoggerError, LoggerResult};

mod format;
pub use format::LoggerFormat;

mod level;
pub use level::LoggerLevel;

mod timezone;
pub use timezone::{LoggerTimeZone, init_local_offset};

mod timestamp;
pub use timestamp::LoggerRfc3339;

mod init;
pub use init::init_logger;
