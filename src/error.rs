use std::num::ParseIntError;

use redis::RedisError;

// ─── Error taxonomy ──────────────────────────────────────────────

/// Which stage of the probe an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Handshake,
    Query,
}

/// Every failure the probe can hit. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("cannot connect to valkey at \"{addr}\": {source}")]
    Connect {
        addr: String,
        #[source]
        source: RedisError,
    },

    #[error("PING failed: {0}")]
    Handshake(#[source] RedisError),

    #[error("TIME failed: {0}")]
    Query(#[source] RedisError),

    #[error("time response array has {0} elements, expected at least 2")]
    ShortReply(usize),

    #[error("time response field {field} is not an integer ({value:?}): {source}")]
    InvalidField {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("time response {secs}s {micros}us is not a representable timestamp")]
    OutOfRange { secs: i64, micros: i64 },
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connect { .. } => ErrorKind::Connection,
            Self::Handshake(_) => ErrorKind::Handshake,
            Self::Query(_)
            | Self::ShortReply(_)
            | Self::InvalidField { .. }
            | Self::OutOfRange { .. } => ErrorKind::Query,
        }
    }
}
