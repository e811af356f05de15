use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Milliseconds since Unix epoch.
pub type Timestamp = i64;

/// Seconds since Unix epoch (what the chart library plots).
pub type UnixSeconds = i64;

/// Number of milliseconds in one second.
pub const MS: i64 = 1_000;

/// Sampling period of a candle series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub seconds: u32,
    pub label: &'static str,
}

impl Interval {
    pub const M1: Interval = Interval::new(60, "1m");
    pub const M5: Interval = Interval::new(300, "5m");
    pub const M15: Interval = Interval::new(900, "15m");
    pub const M30: Interval = Interval::new(1800, "30m");
    pub const H4: Interval = Interval::new(14_400, "4h");

    const fn new(seconds: u32, label: &'static str) -> Self {
        Self { seconds, label }
    }

    /// Look up a configured interval by its period in seconds.
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        INTERVALS.iter().copied().find(|i| i.seconds == seconds)
    }

    /// Look up a configured interval by its display label ("1m", "4h", ...).
    pub fn from_label(label: &str) -> Option<Self> {
        INTERVALS.iter().copied().find(|i| i.label == label)
    }
}

impl Default for Interval {
    fn default() -> Self {
        DEFAULT_INTERVAL
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Intervals offered by the selector, in display order.
pub const INTERVALS: [Interval; 5] = [
    Interval::M1,
    Interval::M5,
    Interval::M15,
    Interval::M30,
    Interval::H4,
];

pub const DEFAULT_INTERVAL: Interval = Interval::M15;

/// One OHLC bar in display units. Serializes to the shape the chart series expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: UnixSeconds,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Convert a millisecond timestamp to whole seconds, rounding toward negative infinity.
pub fn ms_to_seconds(ms: f64) -> UnixSeconds {
    (ms / MS as f64).floor() as UnixSeconds
}

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("history body is not a record array: {0}")]
    Body(String),
    #[error("record {index}: missing timestamp")]
    MissingTimestamp { index: usize },
    #[error("record {index}: field `{field}` is not a finite number")]
    NotFinite { index: usize, field: &'static str },
}

/// A JSON number, or a string holding one. The history feed sends both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeric(pub f64);

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumericVisitor;

        impl Visitor<'_> for NumericVisitor {
            type Value = Numeric;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number or a numeric string")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Numeric, E> {
                Ok(Numeric(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Numeric, E> {
                Ok(Numeric(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Numeric, E> {
                Ok(Numeric(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Numeric, E> {
                v.trim()
                    .parse::<f64>()
                    .map(Numeric)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(NumericVisitor)
    }
}

/// A fallback field: anything that is not a number or numeric string reads
/// as absent instead of failing the record.
fn lenient_numeric<'de, D>(deserializer: D) -> Result<Option<Numeric>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| Numeric::deserialize(v).ok()))
}

/// One record of the remote history endpoint.
///
/// `time` carries the bucket start in milliseconds; some payloads only carry
/// `timestamp`, which is used as a fallback. Other payloads put a formatted
/// date string in `timestamp`, which is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRecord {
    #[serde(default)]
    pub time: Option<Numeric>,
    #[serde(default, deserialize_with = "lenient_numeric")]
    pub timestamp: Option<Numeric>,
    pub open: Numeric,
    pub high: Numeric,
    pub low: Numeric,
    pub close: Numeric,
}

impl HistoryRecord {
    pub fn timestamp_ms(&self) -> Option<f64> {
        self.time.or(self.timestamp).map(|n| n.0)
    }

    fn into_candle(self, index: usize) -> Result<Candle, DecodeError> {
        let ms = self
            .timestamp_ms()
            .ok_or(DecodeError::MissingTimestamp { index })?;
        let finite = |field: &'static str, v: f64| {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(DecodeError::NotFinite { index, field })
            }
        };
        Ok(Candle {
            time: ms_to_seconds(finite("time", ms)?),
            open: finite("open", self.open.0)?,
            high: finite("high", self.high.0)?,
            low: finite("low", self.low.0)?,
            close: finite("close", self.close.0)?,
        })
    }
}

/// Convert a whole batch; one bad record fails the batch.
pub fn candles_from_records(records: Vec<HistoryRecord>) -> Result<Vec<Candle>, DecodeError> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_candle(i))
        .collect()
}

/// Decode a raw history response body into display candles.
pub fn decode_history(body: &str) -> Result<Vec<Candle>, DecodeError> {
    let records: Vec<HistoryRecord> =
        serde_json::from_str(body).map_err(|e| DecodeError::Body(e.to_string()))?;
    candles_from_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_table_lookup() {
        assert_eq!(Interval::from_seconds(900), Some(Interval::M15));
        assert_eq!(Interval::from_label("4h").map(|i| i.seconds), Some(14_400));
        assert!(Interval::from_seconds(120).is_none());
        assert_eq!(Interval::default(), Interval::M15);
        let labels: Vec<&str> = INTERVALS.iter().map(|i| i.label).collect();
        assert_eq!(labels, ["1m", "5m", "15m", "30m", "4h"]);
    }

    #[test]
    fn decode_string_fields_and_floor_seconds() {
        let body = r#"[
            {"time":"1700000000999","timestamp":"1700000000999","open":"1.5","high":"2","low":"1","close":"1.75"},
            {"time":1700000060000,"open":1.75,"high":2.5,"low":1.5,"close":2.25}
        ]"#;
        let candles = decode_history(body).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].time, 1_700_000_000);
        assert_eq!(candles[0].open, 1.5);
        assert_eq!(candles[1].time, 1_700_000_060);
        assert_eq!(candles[1].close, 2.25);
    }

    #[test]
    fn timestamp_field_is_fallback() {
        let body = r#"[{"timestamp":"60000","open":1,"high":1,"low":1,"close":1}]"#;
        let candles = decode_history(body).unwrap();
        assert_eq!(candles[0].time, 60);
    }

    #[test]
    fn date_string_timestamp_is_ignored() {
        let body = r#"[{"time":"1700000000000","timestamp":"2023-11-14 22:13:20","open":"1","high":"2","low":"0.5","close":"1.5"}]"#;
        let candles = decode_history(body).unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].time, 1_700_000_000);
        assert_eq!(candles[0].high, 2.0);

        // Without `time` an unusable `timestamp` leaves the record undated.
        let body = r#"[{"timestamp":"2023-11-14 22:13:20","open":1,"high":1,"low":1,"close":1}]"#;
        assert_eq!(
            decode_history(body),
            Err(DecodeError::MissingTimestamp { index: 0 })
        );
    }

    #[test]
    fn negative_ms_floors_down() {
        assert_eq!(ms_to_seconds(-1.0), -1);
        assert_eq!(ms_to_seconds(1_999.0), 1);
    }

    #[test]
    fn malformed_record_fails_whole_batch() {
        let body = r#"[
            {"time":"1000","open":"1","high":"1","low":"1","close":"1"},
            {"time":"2000","open":"abc","high":"1","low":"1","close":"1"}
        ]"#;
        assert!(matches!(decode_history(body), Err(DecodeError::Body(_))));

        let body = r#"[{"open":"1","high":"1","low":"1","close":"1"}]"#;
        assert_eq!(
            decode_history(body),
            Err(DecodeError::MissingTimestamp { index: 0 })
        );

        assert!(matches!(decode_history("{}"), Err(DecodeError::Body(_))));
    }

    #[test]
    fn empty_array_is_empty_batch() {
        assert_eq!(decode_history("[]").unwrap(), Vec::new());
    }

    #[test]
    fn candle_serializes_for_chart_series() {
        let c = Candle {
            time: 60,
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
        };
        let v = serde_json::to_value(c).unwrap();
        assert_eq!(v["time"], 60);
        assert_eq!(v["low"], 0.5);
    }
}
