//! Plain-text blocks the analysis prompts embed
//!
//! Upstream fundamentals arrive as strings ("None" for missing values), so
//! formatting here stays tolerant: unparseable figures print as "N/A" rather
//! than failing an entire prompt.

use crate::analysis::AnalysisInput;
use finsight_data::types::{NewsSentimentResponse, TimeSeriesDailyResponse};
use finsight_utils::{format_usd, truncate};
use std::fmt::Write as _;

/// Format an upstream string figure as abbreviated dollars, "N/A" if missing
pub(crate) fn format_figure(raw: &str) -> String {
    if raw.is_empty() || raw == "None" {
        return "N/A".to_string();
    }
    match raw.parse::<f64>() {
        Ok(value) => format_usd(value),
        Err(_) => "N/A".to_string(),
    }
}

/// Full data block covering prices, earnings, cash flow, and balance sheet
pub(crate) fn data_block(input: &AnalysisInput) -> String {
    let mut out = String::new();

    if let Some(daily) = &input.daily {
        if !daily.series.is_empty() {
            out.push_str(&price_block(daily));
            out.push_str("\n\n");
        }
    }

    if let Some(earnings) = &input.earnings {
        if !earnings.annual_earnings.is_empty() {
            out.push_str("EARNINGS (Recent Years):\n");
            for earning in earnings.annual_earnings.iter().take(5) {
                let _ = writeln!(
                    out,
                    "  {}: EPS ${}",
                    earning.fiscal_date_ending, earning.reported_eps
                );
            }
            out.push('\n');
        }
    }

    if let Some(cash_flow) = &input.cash_flow {
        if let Some(report) = cash_flow.annual_reports.first() {
            let _ = writeln!(out, "CASH FLOW ({}):", report.fiscal_date_ending);
            let _ = writeln!(out, "  Operating: {}", format_figure(&report.operating_cashflow));
            let _ = writeln!(
                out,
                "  Investing: {}",
                format_figure(&report.cashflow_from_investment)
            );
            let _ = writeln!(
                out,
                "  Financing: {}",
                format_figure(&report.cashflow_from_financing)
            );
            let _ = writeln!(out, "  Net Income: {}\n", format_figure(&report.net_income));
        }
    }

    if let Some(balance_sheet) = &input.balance_sheet {
        if let Some(report) = balance_sheet.annual_reports.first() {
            let _ = writeln!(out, "BALANCE SHEET ({}):", report.fiscal_date_ending);
            let _ = writeln!(out, "  Total Assets: {}", format_figure(&report.total_assets));
            let _ = writeln!(
                out,
                "  Total Liabilities: {}",
                format_figure(&report.total_liabilities)
            );
            let _ = writeln!(
                out,
                "  Shareholder Equity: {}",
                format_figure(&report.total_shareholder_equity)
            );
            let _ = writeln!(
                out,
                "  Cash: {}",
                format_figure(&report.cash_and_cash_equivalents_at_carrying_value)
            );
            let _ = writeln!(out, "  Long-term Debt: {}", format_figure(&report.long_term_debt));
        }
    }

    out
}

/// Price summary block: latest close, period change, extrema, and 20-day SMA
pub(crate) fn price_block(daily: &TimeSeriesDailyResponse) -> String {
    if daily.series.is_empty() {
        return String::new();
    }

    let mut dates: Vec<&String> = daily.series.keys().collect();
    dates.sort();

    let mut out = String::new();
    let _ = writeln!(out, "PRICE DATA ({}):", daily.meta.symbol);

    let latest = dates[dates.len() - 1];
    let latest_bar = &daily.series[latest];
    let _ = writeln!(
        out,
        "  Latest ({latest}): Close ${}, Volume {}",
        latest_bar.close, latest_bar.volume
    );

    // Best-effort stats for the prompt; malformed values are skipped rather
    // than aborting the whole block
    let closes: Vec<f64> = dates
        .iter()
        .filter_map(|d| daily.series[*d].close_price(d).ok())
        .collect();
    let highs: Vec<f64> = dates
        .iter()
        .filter_map(|d| daily.series[*d].high_price(d).ok())
        .collect();
    let lows: Vec<f64> = dates
        .iter()
        .filter_map(|d| daily.series[*d].low_price(d).ok())
        .collect();

    if !closes.is_empty() {
        if closes.len() > 1 {
            let first = closes[0];
            let last = closes[closes.len() - 1];
            if first != 0.0 {
                let change = (last - first) / first * 100.0;
                let _ = writeln!(out, "  Period Change: {change:.2}%");
            }
        }
        if let Some(max_high) = highs.iter().copied().reduce(f64::max) {
            let _ = writeln!(out, "  Period High: ${max_high:.2}");
        }
        if let Some(min_low) = lows.iter().copied().reduce(f64::min) {
            let _ = writeln!(out, "  Period Low: ${min_low:.2}");
        }
        if closes.len() >= 20 {
            let sma20: f64 = closes[closes.len() - 20..].iter().sum::<f64>() / 20.0;
            let _ = writeln!(out, "  20-day SMA: ${sma20:.2}");
        }
    }

    out
}

/// Fundamentals block: EPS trend, cash flow health, and key ratios
pub(crate) fn fundamentals_block(input: &AnalysisInput) -> String {
    let mut out = String::new();

    if let Some(earnings) = &input.earnings {
        if earnings.annual_earnings.len() >= 3 {
            out.push_str("EPS TREND:\n");
            for earning in earnings.annual_earnings.iter().take(5) {
                let _ = writeln!(
                    out,
                    "  {}: ${}",
                    earning.fiscal_date_ending, earning.reported_eps
                );
            }
            out.push('\n');
        }
    }

    if let Some(cash_flow) = &input.cash_flow {
        if let Some(report) = cash_flow.annual_reports.first() {
            out.push_str("CASH FLOW HEALTH:\n");
            let _ = writeln!(out, "  Operating CF: {}", format_figure(&report.operating_cashflow));
            let _ = writeln!(out, "  CapEx: {}", format_figure(&report.capital_expenditures));
            let _ = writeln!(out, "  Dividends: {}\n", format_figure(&report.dividend_payout));
        }
    }

    if let Some(balance_sheet) = &input.balance_sheet {
        if let Some(report) = balance_sheet.annual_reports.first() {
            let assets = report.total_assets.parse::<f64>().unwrap_or(0.0);
            let liabilities = report.total_liabilities.parse::<f64>().unwrap_or(0.0);
            let equity = report.total_shareholder_equity.parse::<f64>().unwrap_or(0.0);

            out.push_str("KEY RATIOS:\n");
            if equity > 0.0 {
                let _ = writeln!(out, "  Debt-to-Equity: {:.2}", liabilities / equity);
            }
            if assets > 0.0 {
                let _ = writeln!(out, "  Equity Ratio: {:.2}%", equity / assets * 100.0);
            }
        }
    }

    out
}

/// Risk block: debt levels, declining-EPS detection, and price coverage
pub(crate) fn risk_block(input: &AnalysisInput) -> String {
    let mut out = String::new();

    if let Some(balance_sheet) = &input.balance_sheet {
        if let Some(report) = balance_sheet.annual_reports.first() {
            let _ = writeln!(
                out,
                "Debt: Long-term {}, Short-term {}",
                format_figure(&report.long_term_debt),
                format_figure(&report.short_term_debt)
            );
            let _ = writeln!(
                out,
                "Cash Position: {}",
                format_figure(&report.cash_and_cash_equivalents_at_carrying_value)
            );
        }
    }

    if let Some(earnings) = &input.earnings {
        if earnings.annual_earnings.len() >= 3 {
            let eps: Vec<f64> = earnings
                .annual_earnings
                .iter()
                .take(5)
                .filter_map(|e| e.reported_eps.parse::<f64>().ok())
                .collect();
            // Annual earnings arrive newest-first, so a falling trend means
            // each entry is below the (older) one after it
            if eps.len() > 1 && eps.windows(2).all(|pair| pair[0] < pair[1]) {
                out.push_str("Warning: Declining EPS trend\n");
            }
        }
    }

    if let Some(daily) = &input.daily {
        if daily.series.len() > 20 {
            let _ = writeln!(out, "Price data points: {} days", daily.series.len());
        }
    }

    out
}

/// News block: up to five headlines with sentiment labels and scores
pub(crate) fn news_block(news: &NewsSentimentResponse) -> String {
    if news.feed.is_empty() {
        return String::new();
    }

    let mut out = String::from("RECENT NEWS:\n");
    for item in news.feed.iter().take(5) {
        let _ = writeln!(
            out,
            "- {} (Sentiment: {}, Score: {:.2})",
            truncate(&item.title, 80),
            item.overall_sentiment_label,
            item.overall_sentiment_score
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_data::types::{
        AnnualEarning, Bar, EarningsResponse, NewsFeedItem, TimeSeriesMetaData,
    };
    use std::collections::HashMap;

    fn daily_with_closes(closes: &[(&str, &str)]) -> TimeSeriesDailyResponse {
        let mut series = HashMap::new();
        for (date, close) in closes {
            series.insert(
                (*date).to_string(),
                Bar {
                    open: (*close).to_string(),
                    high: (*close).to_string(),
                    low: (*close).to_string(),
                    close: (*close).to_string(),
                    volume: "1000".to_string(),
                },
            );
        }
        TimeSeriesDailyResponse {
            meta: TimeSeriesMetaData {
                symbol: "IBM".to_string(),
                ..TimeSeriesMetaData::default()
            },
            series,
        }
    }

    #[test]
    fn test_format_figure() {
        assert_eq!(format_figure("1500000000"), "$1.50B");
        assert_eq!(format_figure("-2500000"), "-$2.50M");
        assert_eq!(format_figure("None"), "N/A");
        assert_eq!(format_figure(""), "N/A");
        assert_eq!(format_figure("garbage"), "N/A");
    }

    #[test]
    fn test_price_block_contents() {
        let daily = daily_with_closes(&[("2024-01-02", "100"), ("2024-01-03", "110")]);
        let block = price_block(&daily);
        assert!(block.contains("PRICE DATA (IBM):"));
        assert!(block.contains("Latest (2024-01-03)"));
        assert!(block.contains("Period Change: 10.00%"));
        assert!(block.contains("Period High: $110.00"));
        assert!(block.contains("Period Low: $100.00"));
        // Too few points for an SMA line
        assert!(!block.contains("20-day SMA"));
    }

    #[test]
    fn test_risk_block_flags_declining_eps() {
        let earnings = EarningsResponse {
            symbol: "IBM".to_string(),
            annual_earnings: vec![
                AnnualEarning {
                    fiscal_date_ending: "2023-12-31".to_string(),
                    reported_eps: "2.00".to_string(),
                },
                AnnualEarning {
                    fiscal_date_ending: "2022-12-31".to_string(),
                    reported_eps: "3.00".to_string(),
                },
                AnnualEarning {
                    fiscal_date_ending: "2021-12-31".to_string(),
                    reported_eps: "4.00".to_string(),
                },
            ],
            ..EarningsResponse::default()
        };
        let input = AnalysisInput::new("IBM").with_earnings(earnings);
        let block = risk_block(&input);
        assert!(block.contains("Warning: Declining EPS trend"));
    }

    #[test]
    fn test_news_block_truncates_and_limits() {
        let mut news = NewsSentimentResponse::default();
        for i in 0..7 {
            news.feed.push(NewsFeedItem {
                title: format!("Headline {i}"),
                overall_sentiment_label: "Neutral".to_string(),
                overall_sentiment_score: 0.1,
                ..NewsFeedItem::default()
            });
        }
        let block = news_block(&news);
        assert_eq!(block.matches("- Headline").count(), 5);
    }
}
