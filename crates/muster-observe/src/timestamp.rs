use std::fmt;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

use crate::timezone::{LoggerTimeZone, local_offset};

/// RFC3339 timestamp formatter honoring the configured timezone.
///
/// The local offset is read from the cache populated by
/// [`crate::init_local_offset`]; if it was never populated, UTC is used.
#[derive(Debug, Clone, Copy)]
pub struct LoggerRfc3339(pub LoggerTimeZone);

impl FormatTime for LoggerRfc3339 {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = match self.0 {
            LoggerTimeZone::Utc => OffsetDateTime::now_utc(),
            LoggerTimeZone::Local => OffsetDateTime::now_utc().to_offset(local_offset()),
        };

        match now.format(&Rfc3339) {
            Ok(ts) => write!(w, "{} ", ts),
            Err(_) => write!(w, "<invalid-time> "),
        }
    }
}
