//! Filtering and summary statistics over daily and intraday series
//!
//! Series maps carry no inherent order, so every function here sorts keys
//! lexicographically first. For the fixed-width `YYYY-MM-DD` and
//! `YYYY-MM-DD HH:MM:SS` formats, lexical order equals chronological order.

use crate::error::{DataError, Result};
use crate::types::Bar;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summary statistics over a span of daily bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRangeSummary {
    pub symbol: String,
    /// Earliest trading day in the span
    pub start_date: String,
    /// Latest trading day in the span
    pub end_date: String,
    /// Number of trading days present
    pub trading_days: usize,
    /// Open of the earliest day
    pub period_open: f64,
    /// Highest high across the span
    pub period_high: f64,
    /// Date the period high was first observed
    pub high_date: String,
    /// Lowest low across the span
    pub period_low: f64,
    /// Date the period low was first observed
    pub low_date: String,
    /// Close of the latest day
    pub period_close: f64,
    pub price_change: f64,
    /// Percentage change, 0.0 when the period open is zero
    pub price_change_pct: f64,
    pub total_volume: u64,
    /// Integer average of daily volume
    pub avg_volume: u64,
}

/// Summary statistics over a single day's intraday bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradaySummary {
    pub symbol: String,
    /// Calendar date of the earliest point
    pub date: String,
    pub interval: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub total_volume: u64,
    pub data_points: usize,
}

/// Keep only entries whose date falls within `[start, end]`
///
/// Either bound may be `None` to leave that side unbounded. Comparison is
/// lexical on the full key, which is chronological for `YYYY-MM-DD` keys.
/// The input is never mutated.
pub fn filter_daily_by_date_range(
    series: &HashMap<String, Bar>,
    start: Option<&str>,
    end: Option<&str>,
) -> HashMap<String, Bar> {
    series
        .iter()
        .filter(|(date, _)| start.is_none_or(|s| date.as_str() >= s))
        .filter(|(date, _)| end.is_none_or(|e| date.as_str() <= e))
        .map(|(date, bar)| (date.clone(), bar.clone()))
        .collect()
}

/// Keep only the `n` most recent trading days
///
/// Returns the whole series when `n` exceeds its length and an empty map when
/// `n` is zero or the input is empty.
pub fn filter_daily_last_n_days(series: &HashMap<String, Bar>, n: usize) -> HashMap<String, Bar> {
    if n == 0 || series.is_empty() {
        return HashMap::new();
    }
    let mut dates: Vec<&String> = series.keys().collect();
    dates.sort();
    dates
        .iter()
        .rev()
        .take(n)
        .map(|date| ((*date).clone(), series[*date].clone()))
        .collect()
}

/// Keep only intraday entries falling on the given `YYYY-MM-DD` date
pub fn filter_intraday_by_date(
    series: &HashMap<String, Bar>,
    date: &str,
) -> HashMap<String, Bar> {
    series
        .iter()
        .filter(|(timestamp, _)| timestamp.len() >= 10 && &timestamp[..10] == date)
        .map(|(timestamp, bar)| (timestamp.clone(), bar.clone()))
        .collect()
}

/// Earliest key in the series, if any
pub fn oldest_date(series: &HashMap<String, Bar>) -> Option<&str> {
    series.keys().min().map(String::as_str)
}

/// Latest key in the series, if any
pub fn most_recent_date(series: &HashMap<String, Bar>) -> Option<&str> {
    series.keys().max().map(String::as_str)
}

/// Look up the bar for a specific trading day
pub fn daily_bar<'a>(series: &'a HashMap<String, Bar>, date: &str) -> Option<&'a Bar> {
    series.get(date)
}

/// Reduce a daily series into a [`DailyRangeSummary`]
///
/// Fails with [`DataError::NoData`] on an empty series and with
/// [`DataError::InvalidNumber`] if any bar carries a malformed figure.
pub fn daily_range_summary(
    symbol: &str,
    series: &HashMap<String, Bar>,
) -> Result<DailyRangeSummary> {
    if series.is_empty() {
        return Err(DataError::NoData(format!(
            "no daily data for {symbol} in the requested range"
        )));
    }

    let mut dates: Vec<&String> = series.keys().collect();
    dates.sort();

    let first = dates[0];
    let last = dates[dates.len() - 1];
    let period_open = series[first].open_price(first)?;
    let period_close = series[last].close_price(last)?;

    let mut period_high = f64::NEG_INFINITY;
    let mut high_date = "";
    let mut period_low = f64::INFINITY;
    let mut low_date = "";
    let mut total_volume: u64 = 0;

    for date in &dates {
        let bar = &series[*date];
        let high = bar.high_price(date)?;
        let low = bar.low_price(date)?;
        // Ties keep the first occurrence in ascending date order
        if high > period_high {
            period_high = high;
            high_date = date;
        }
        if low < period_low {
            period_low = low;
            low_date = date;
        }
        total_volume += bar.volume_count(date)?;
    }

    let trading_days = dates.len();
    let price_change = period_close - period_open;
    let price_change_pct = if period_open == 0.0 {
        0.0
    } else {
        price_change / period_open * 100.0
    };

    Ok(DailyRangeSummary {
        symbol: symbol.to_string(),
        start_date: first.clone(),
        end_date: last.clone(),
        trading_days,
        period_open,
        period_high,
        high_date: high_date.to_string(),
        period_low,
        low_date: low_date.to_string(),
        period_close,
        price_change,
        price_change_pct,
        total_volume,
        avg_volume: total_volume / trading_days as u64,
    })
}

/// Reduce a single day's intraday series into an [`IntradaySummary`]
pub fn intraday_summary(
    symbol: &str,
    interval: &str,
    series: &HashMap<String, Bar>,
) -> Result<IntradaySummary> {
    if series.is_empty() {
        return Err(DataError::NoData(format!(
            "no intraday data for {symbol}"
        )));
    }

    let mut timestamps: Vec<&String> = series.keys().collect();
    timestamps.sort();

    let first = timestamps[0];
    let last = timestamps[timestamps.len() - 1];
    let open = series[first].open_price(first)?;
    let close = series[last].close_price(last)?;

    let mut high = f64::NEG_INFINITY;
    let mut low = f64::INFINITY;
    let mut total_volume: u64 = 0;

    for timestamp in &timestamps {
        let bar = &series[*timestamp];
        high = high.max(bar.high_price(timestamp)?);
        low = low.min(bar.low_price(timestamp)?);
        total_volume += bar.volume_count(timestamp)?;
    }

    let date = if first.len() >= 10 { &first[..10] } else { first.as_str() };

    Ok(IntradaySummary {
        symbol: symbol.to_string(),
        date: date.to_string(),
        interval: interval.to_string(),
        open,
        high,
        low,
        close,
        total_volume,
        data_points: timestamps.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: &str, high: &str, low: &str, close: &str, volume: &str) -> Bar {
        Bar {
            open: open.to_string(),
            high: high.to_string(),
            low: low.to_string(),
            close: close.to_string(),
            volume: volume.to_string(),
        }
    }

    fn two_day_series() -> HashMap<String, Bar> {
        let mut series = HashMap::new();
        series.insert(
            "2024-01-02".to_string(),
            bar("100", "105", "99", "104", "1000"),
        );
        series.insert(
            "2024-01-03".to_string(),
            bar("104", "110", "103", "108", "1500"),
        );
        series
    }

    #[test]
    fn test_filter_by_date_range_keeps_bounds_inclusive() {
        let series = two_day_series();
        let filtered =
            filter_daily_by_date_range(&series, Some("2024-01-02"), Some("2024-01-03"));
        assert_eq!(filtered.len(), 2);

        let filtered = filter_daily_by_date_range(&series, Some("2024-01-03"), None);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("2024-01-03"));

        let filtered = filter_daily_by_date_range(&series, None, Some("2024-01-02"));
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("2024-01-02"));
    }

    #[test]
    fn test_filter_by_date_range_introduces_no_new_keys() {
        let series = two_day_series();
        let filtered = filter_daily_by_date_range(&series, Some("2000-01-01"), Some("2099-12-31"));
        assert_eq!(filtered.len(), series.len());
        for key in filtered.keys() {
            assert!(series.contains_key(key));
        }
    }

    #[test]
    fn test_filter_by_date_range_no_match_yields_empty() {
        let series = two_day_series();
        let filtered = filter_daily_by_date_range(&series, Some("2025-01-01"), None);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_last_n_days_takes_latest() {
        let series = two_day_series();
        let filtered = filter_daily_last_n_days(&series, 1);
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("2024-01-03"));
    }

    #[test]
    fn test_filter_last_n_days_clamps_to_series_length() {
        let series = two_day_series();
        assert_eq!(filter_daily_last_n_days(&series, 10).len(), 2);
        assert!(filter_daily_last_n_days(&series, 0).is_empty());
        assert!(filter_daily_last_n_days(&HashMap::new(), 5).is_empty());
    }

    #[test]
    fn test_filter_intraday_by_date() {
        let mut series = HashMap::new();
        series.insert(
            "2024-06-10 09:30:00".to_string(),
            bar("50", "51", "49", "50.5", "100"),
        );
        series.insert(
            "2024-06-11 09:30:00".to_string(),
            bar("51", "52", "50", "51.5", "200"),
        );
        let filtered = filter_intraday_by_date(&series, "2024-06-10");
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("2024-06-10 09:30:00"));
    }

    #[test]
    fn test_oldest_and_most_recent_date() {
        let series = two_day_series();
        assert_eq!(oldest_date(&series), Some("2024-01-02"));
        assert_eq!(most_recent_date(&series), Some("2024-01-03"));
        assert_eq!(oldest_date(&HashMap::new()), None);
    }

    #[test]
    fn test_daily_range_summary_two_days() {
        let series = two_day_series();
        let summary = daily_range_summary("IBM", &series).unwrap();
        assert_eq!(summary.symbol, "IBM");
        assert_eq!(summary.start_date, "2024-01-02");
        assert_eq!(summary.end_date, "2024-01-03");
        assert_eq!(summary.trading_days, 2);
        assert_eq!(summary.period_open, 100.0);
        assert_eq!(summary.period_close, 108.0);
        assert_eq!(summary.period_high, 110.0);
        assert_eq!(summary.high_date, "2024-01-03");
        assert_eq!(summary.period_low, 99.0);
        assert_eq!(summary.low_date, "2024-01-02");
        assert_eq!(summary.total_volume, 2500);
        assert_eq!(summary.avg_volume, 1250);
        assert_eq!(summary.price_change, 8.0);
        assert_eq!(summary.price_change_pct, 8.0);
    }

    #[test]
    fn test_daily_range_summary_bounds_every_day() {
        let series = two_day_series();
        let summary = daily_range_summary("IBM", &series).unwrap();
        for (date, bar) in &series {
            assert!(summary.period_high >= bar.high_price(date).unwrap());
            assert!(summary.period_low <= bar.low_price(date).unwrap());
        }
    }

    #[test]
    fn test_daily_range_summary_idempotent_over_own_span() {
        let series = two_day_series();
        let summary = daily_range_summary("IBM", &series).unwrap();
        let refiltered = filter_daily_by_date_range(
            &series,
            Some(&summary.start_date),
            Some(&summary.end_date),
        );
        let again = daily_range_summary("IBM", &refiltered).unwrap();
        assert_eq!(summary, again);
    }

    #[test]
    fn test_daily_range_summary_tie_keeps_first_date() {
        let mut series = HashMap::new();
        series.insert(
            "2024-01-02".to_string(),
            bar("100", "110", "99", "104", "1000"),
        );
        series.insert(
            "2024-01-03".to_string(),
            bar("104", "110", "99", "108", "1500"),
        );
        let summary = daily_range_summary("IBM", &series).unwrap();
        assert_eq!(summary.high_date, "2024-01-02");
        assert_eq!(summary.low_date, "2024-01-02");
    }

    #[test]
    fn test_daily_range_summary_zero_open_guards_percentage() {
        let mut series = HashMap::new();
        series.insert("2024-01-02".to_string(), bar("0", "5", "0", "4", "10"));
        let summary = daily_range_summary("PENNY", &series).unwrap();
        assert_eq!(summary.price_change, 4.0);
        assert_eq!(summary.price_change_pct, 0.0);
    }

    #[test]
    fn test_daily_range_summary_empty_is_no_data() {
        let err = daily_range_summary("IBM", &HashMap::new()).unwrap_err();
        assert!(matches!(err, DataError::NoData(_)));
    }

    #[test]
    fn test_daily_range_summary_propagates_parse_errors() {
        let mut series = two_day_series();
        series.insert(
            "2024-01-04".to_string(),
            bar("108", "oops", "107", "109", "500"),
        );
        let err = daily_range_summary("IBM", &series).unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidNumber { field: "high", .. }
        ));
    }

    #[test]
    fn test_intraday_summary_two_points() {
        let mut series = HashMap::new();
        series.insert(
            "2024-06-10 09:30:00".to_string(),
            bar("50", "51", "49", "50.5", "100"),
        );
        series.insert(
            "2024-06-10 09:35:00".to_string(),
            bar("50.5", "52", "50", "51.5", "200"),
        );
        let summary = intraday_summary("IBM", "5min", &series).unwrap();
        assert_eq!(summary.date, "2024-06-10");
        assert_eq!(summary.interval, "5min");
        assert_eq!(summary.open, 50.0);
        assert_eq!(summary.high, 52.0);
        assert_eq!(summary.low, 49.0);
        assert_eq!(summary.close, 51.5);
        assert_eq!(summary.total_volume, 300);
        assert_eq!(summary.data_points, 2);
    }

    #[test]
    fn test_intraday_summary_empty_is_no_data() {
        let err = intraday_summary("IBM", "5min", &HashMap::new()).unwrap_err();
        assert!(matches!(err, DataError::NoData(_)));
    }
}
