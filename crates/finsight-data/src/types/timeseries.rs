//! Daily and intraday time-series response types

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One OHLCV record as delivered upstream
///
/// Prices and volume arrive as strings; the accessor methods parse them and
/// surface malformed values as [`DataError::InvalidNumber`] instead of
/// defaulting to zero, since zeroes corrupt min/max/average computations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bar {
    #[serde(rename = "1. open", default)]
    pub open: String,
    #[serde(rename = "2. high", default)]
    pub high: String,
    #[serde(rename = "3. low", default)]
    pub low: String,
    #[serde(rename = "4. close", default)]
    pub close: String,
    #[serde(rename = "5. volume", default)]
    pub volume: String,
}

impl Bar {
    fn parse_price(&self, key: &str, field: &'static str, raw: &str) -> Result<f64> {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DataError::InvalidNumber {
                key: key.to_string(),
                field,
                value: raw.to_string(),
            })
    }

    /// Opening price, parsed
    pub fn open_price(&self, key: &str) -> Result<f64> {
        self.parse_price(key, "open", &self.open)
    }

    /// High price, parsed
    pub fn high_price(&self, key: &str) -> Result<f64> {
        self.parse_price(key, "high", &self.high)
    }

    /// Low price, parsed
    pub fn low_price(&self, key: &str) -> Result<f64> {
        self.parse_price(key, "low", &self.low)
    }

    /// Closing price, parsed
    pub fn close_price(&self, key: &str) -> Result<f64> {
        self.parse_price(key, "close", &self.close)
    }

    /// Share volume, parsed
    pub fn volume_count(&self, key: &str) -> Result<u64> {
        self.volume
            .parse::<u64>()
            .map_err(|_| DataError::InvalidNumber {
                key: key.to_string(),
                field: "volume",
                value: self.volume.clone(),
            })
    }
}

/// Metadata block of a daily time series
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSeriesMetaData {
    #[serde(rename = "1. Information", default)]
    pub information: String,
    #[serde(rename = "2. Symbol", default)]
    pub symbol: String,
    #[serde(rename = "3. Last Refreshed", default)]
    pub last_refreshed: String,
    #[serde(rename = "4. Output Size", default)]
    pub output_size: String,
    #[serde(rename = "5. Time Zone", default)]
    pub time_zone: String,
}

/// Daily OHLCV series keyed by `YYYY-MM-DD`
///
/// The map carries no inherent order; consumers sort keys lexicographically
/// to recover chronological order (lexical order equals chronological order
/// for this date format).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSeriesDailyResponse {
    #[serde(rename = "Meta Data", default)]
    pub meta: TimeSeriesMetaData,
    #[serde(rename = "Time Series (Daily)", default)]
    pub series: HashMap<String, Bar>,
}

/// Metadata block of an intraday time series
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntradayMetaData {
    #[serde(rename = "1. Information", default)]
    pub information: String,
    #[serde(rename = "2. Symbol", default)]
    pub symbol: String,
    #[serde(rename = "3. Last Refreshed", default)]
    pub last_refreshed: String,
    #[serde(rename = "4. Interval", default)]
    pub interval: String,
    #[serde(rename = "5. Output Size", default)]
    pub output_size: String,
    #[serde(rename = "6. Time Zone", default)]
    pub time_zone: String,
}

/// Intraday OHLCV series keyed by `YYYY-MM-DD HH:MM:SS`
///
/// The JSON series key is dynamic ("Time Series (5min)" etc.), so this type
/// is assembled manually by the client rather than derived in one pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeSeriesIntradayResponse {
    pub meta: IntradayMetaData,
    pub series: HashMap<String, Bar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_parses_valid_fields() {
        let bar = Bar {
            open: "100.5".to_string(),
            high: "105.0".to_string(),
            low: "99.25".to_string(),
            close: "104".to_string(),
            volume: "123456".to_string(),
        };
        assert_eq!(bar.open_price("2024-01-02").unwrap(), 100.5);
        assert_eq!(bar.high_price("2024-01-02").unwrap(), 105.0);
        assert_eq!(bar.low_price("2024-01-02").unwrap(), 99.25);
        assert_eq!(bar.close_price("2024-01-02").unwrap(), 104.0);
        assert_eq!(bar.volume_count("2024-01-02").unwrap(), 123_456);
    }

    #[test]
    fn test_bar_rejects_malformed_fields() {
        let bar = Bar {
            open: "garbage".to_string(),
            volume: "-5".to_string(),
            ..Bar::default()
        };
        let err = bar.open_price("2024-01-02").unwrap_err();
        assert!(matches!(err, DataError::InvalidNumber { field: "open", .. }));

        let err = bar.volume_count("2024-01-02").unwrap_err();
        assert!(matches!(err, DataError::InvalidNumber { field: "volume", .. }));
    }

    #[test]
    fn test_daily_response_deserializes_upstream_shape() {
        let body = r#"{
            "Meta Data": {
                "1. Information": "Daily Prices",
                "2. Symbol": "IBM",
                "3. Last Refreshed": "2024-01-03",
                "4. Output Size": "Compact",
                "5. Time Zone": "US/Eastern"
            },
            "Time Series (Daily)": {
                "2024-01-03": {
                    "1. open": "104.00",
                    "2. high": "110.00",
                    "3. low": "103.00",
                    "4. close": "108.00",
                    "5. volume": "1500"
                }
            }
        }"#;
        let resp: TimeSeriesDailyResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.meta.symbol, "IBM");
        assert_eq!(resp.series.len(), 1);
        assert_eq!(resp.series["2024-01-03"].close, "108.00");
    }
}
