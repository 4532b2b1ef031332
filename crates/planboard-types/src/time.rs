//! Wire timestamp handling.
//!
//! One canonical textual format crosses the remote boundary: RFC 3339
//! UTC with millisecond precision (`2024-05-01T10:30:00.000Z`).
//! Parsers accept any RFC 3339 offset and normalize to UTC. Form
//! surfaces exchange values at minute precision (`%Y-%m-%dT%H:%M`,
//! the `datetime-local` input contract), so no client path may assume
//! sub-minute precision survives a form round-trip.

use chrono::{DateTime, DurationRound, NaiveDateTime, SecondsFormat, TimeDelta, Utc};

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Render a timestamp in the canonical wire format.
pub fn to_wire(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a wire timestamp, accepting any RFC 3339 offset.
pub fn parse_wire(raw: &str) -> crate::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim())?;
    Ok(parsed.with_timezone(&Utc))
}

/// Truncate below wire (millisecond) precision.
pub fn wire_trunc(at: DateTime<Utc>) -> DateTime<Utc> {
    at.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(at)
}

/// Render for a minute-precision form input.
pub fn to_input(at: DateTime<Utc>) -> String {
    at.format(INPUT_FORMAT).to_string()
}

/// Parse a minute-precision form input as UTC.
pub fn parse_input(raw: &str) -> crate::Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), INPUT_FORMAT)?;
    Ok(naive.and_utc())
}

/// Serde adapter for required wire timestamps.
pub mod wire {
    use super::{DateTime, Utc, parse_wire, to_wire};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_wire(*at))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_wire(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional wire timestamps. `None` serializes as an
/// explicit `null`: clearing a date must stay distinguishable from
/// leaving it unchanged.
pub mod wire_opt {
    use super::{DateTime, Utc, parse_wire, to_wire};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match at {
            Some(at) => serializer.serialize_some(&to_wire(*at)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|raw| parse_wire(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
