use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::ProbeError;

const MICROS_PER_SEC: i64 = 1_000_000;
const NANOS_PER_MICRO: i64 = 1_000;

/// The server's wall clock at the moment a `TIME` query was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServerTime(DateTime<Utc>);

impl ServerTime {
    /// Decodes a `TIME` reply: `[unix seconds, microseconds, ..]`.
    ///
    /// Extra trailing elements are ignored. A microsecond field outside
    /// `0..1_000_000` is carried into the seconds.
    pub fn from_reply(parts: &[String]) -> Result<Self, ProbeError> {
        let [secs, micros, ..] = parts else {
            return Err(ProbeError::ShortReply(parts.len()));
        };

        let secs = parse_field("seconds", secs)?;
        let micros = parse_field("microseconds", micros)?;

        Self::from_parts(secs, micros)
    }

    pub fn from_parts(secs: i64, micros: i64) -> Result<Self, ProbeError> {
        let out_of_range = || ProbeError::OutOfRange { secs, micros };

        let whole = secs
            .checked_add(micros.div_euclid(MICROS_PER_SEC))
            .ok_or_else(out_of_range)?;
        let nanos = (micros.rem_euclid(MICROS_PER_SEC) * NANOS_PER_MICRO) as u32;

        DateTime::from_timestamp(whole, nanos)
            .map(Self)
            .ok_or_else(out_of_range)
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl fmt::Display for ServerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<i64, ProbeError> {
    raw.parse::<i64>()
        .map_err(|source| ProbeError::InvalidField {
            field,
            value: raw.to_owned(),
            source,
        })
}
