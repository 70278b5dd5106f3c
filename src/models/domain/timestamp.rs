//! The one place that knows how the store represents instants.
//!
//! Documents carry timestamps as native BSON dates, epoch milliseconds,
//! RFC 3339 strings, or `{seconds, nanoseconds}` objects exported from the
//! hosted store. [`to_instant`] turns all of them into a `DateTime<Utc>`;
//! anything unreadable becomes `None`, which sorts as the oldest possible
//! instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mongodb::bson;
use serde::de::{Deserialize, Deserializer, IgnoredAny};

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Native(bson::DateTime),
    Millis(i64),
    FractionalMillis(f64),
    Text(String),
    Parts {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    Unreadable(IgnoredAny),
}

impl RawTimestamp {
    pub fn to_instant(&self) -> Option<DateTime<Utc>> {
        to_instant(self)
    }
}

pub fn to_instant(raw: &RawTimestamp) -> Option<DateTime<Utc>> {
    match raw {
        RawTimestamp::Native(dt) => DateTime::from_timestamp_millis(dt.timestamp_millis()),
        RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        RawTimestamp::FractionalMillis(ms) if ms.is_finite() => {
            DateTime::from_timestamp_millis(ms.trunc() as i64)
        }
        RawTimestamp::FractionalMillis(_) => None,
        RawTimestamp::Text(s) => parse_text(s),
        RawTimestamp::Parts {
            seconds,
            nanoseconds,
        } => DateTime::from_timestamp(*seconds, *nanoseconds),
        RawTimestamp::Unreadable(_) => None,
    }
}

fn parse_text(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Field deserializer: any timestamp shape, `None` when unreadable.
pub fn instant<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = RawTimestamp::deserialize(d)?;
    let parsed = raw.to_instant();
    if parsed.is_none() && !matches!(raw, RawTimestamp::Unreadable(_)) {
        log::debug!("Treating unreadable timestamp {:?} as oldest", raw);
    }
    Ok(parsed)
}
