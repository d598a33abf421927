//! Chart rendering functions
//!
//! Every function draws into an in-memory RGB buffer and returns encoded PNG
//! bytes. Dates are plotted on an index axis with date labels, which keeps
//! trading series free of weekend gaps.

use crate::error::{ChartError, Result};
use crate::options::ChartOptions;
use finsight_data::api::{IncomeStatement, Price};
use finsight_data::types::{
    Bar, CashFlowResponse, EarningsResponse, TimeSeriesDailyResponse, TimeSeriesIntradayResponse,
};
use finsight_utils::format_volume;
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use plotters::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

#[derive(Debug)]
struct DailyPoint {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

fn sorted_daily_points(series: &HashMap<String, Bar>) -> Result<Vec<DailyPoint>> {
    let mut dates: Vec<&String> = series.keys().collect();
    dates.sort();
    dates
        .into_iter()
        .map(|date| {
            let bar = &series[date];
            Ok(DailyPoint {
                date: date.clone(),
                open: bar.open_price(date)?,
                high: bar.high_price(date)?,
                low: bar.low_price(date)?,
                close: bar.close_price(date)?,
                volume: bar.volume_count(date)?,
            })
        })
        .collect()
}

fn padded_range(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}

fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let image = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| ChartError::Render("pixel buffer size mismatch".to_string()))?;
    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image).write_to(&mut png, ImageOutputFormat::Png)?;
    Ok(png.into_inner())
}

fn pixel_buffer(options: &ChartOptions) -> Vec<u8> {
    vec![0u8; options.width as usize * options.height as usize * 3]
}

/// Close-price line over a daily series, with an optional volume overlay on
/// a secondary axis
pub fn daily_price_chart(
    data: &TimeSeriesDailyResponse,
    options: &ChartOptions,
) -> Result<Vec<u8>> {
    if data.series.is_empty() {
        return Err(ChartError::NoData(format!(
            "no daily data for {}",
            data.meta.symbol
        )));
    }

    let points = sorted_daily_points(&data.series)?;
    let default_title = format!("{} Daily Price", data.meta.symbol);
    let title = options.title_or(&default_title);
    debug!(symbol = %data.meta.symbol, points = points.len(), "rendering daily price chart");

    let (price_min, price_max) = padded_range(
        points.iter().map(|p| p.close).fold(f64::INFINITY, f64::min),
        points
            .iter()
            .map(|p| p.close)
            .fold(f64::NEG_INFINITY, f64::max),
    );
    let volume_max = points
        .iter()
        .map(|p| p.volume as f64)
        .fold(0.0, f64::max)
        .max(1.0)
        * 1.1;

    let mut buffer = pixel_buffer(options);
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::render)?;

        let chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .right_y_label_area_size(if options.show_volume { 70 } else { 0 })
            .build_cartesian_2d(0..points.len(), price_min..price_max)
            .map_err(ChartError::render)?;
        let mut chart = chart.set_secondary_coord(0..points.len(), 0.0..volume_max);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(8)
            .x_label_formatter(&|idx: &usize| {
                points.get(*idx).map(|p| p.date.clone()).unwrap_or_default()
            })
            .y_desc("Price ($)")
            .y_label_formatter(&|v: &f64| format!("${v:.2}"))
            .draw()
            .map_err(ChartError::render)?;

        if options.show_volume {
            chart
                .draw_secondary_series(AreaSeries::new(
                    points.iter().enumerate().map(|(i, p)| (i, p.volume as f64)),
                    0.0,
                    GREEN.mix(0.3),
                ))
                .map_err(ChartError::render)?
                .label("Volume")
                .legend(|(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 12, y + 5)], GREEN.mix(0.3).filled())
                });
            chart
                .configure_secondary_axes()
                .y_desc("Volume")
                .y_label_formatter(&|v: &f64| format_volume(*v))
                .draw()
                .map_err(ChartError::render)?;
        }

        chart
            .draw_series(LineSeries::new(
                points.iter().enumerate().map(|(i, p)| (i, p.close)),
                BLUE.stroke_width(2),
            ))
            .map_err(ChartError::render)?
            .label("Close Price")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(ChartError::render)?;

        root.present().map_err(ChartError::render)?;
    }

    encode_png(buffer, options.width, options.height)
}

/// Candlestick chart over a daily series
pub fn candlestick_chart(
    data: &TimeSeriesDailyResponse,
    options: &ChartOptions,
) -> Result<Vec<u8>> {
    if data.series.is_empty() {
        return Err(ChartError::NoData(format!(
            "no daily data for {}",
            data.meta.symbol
        )));
    }

    let points = sorted_daily_points(&data.series)?;
    let default_title = format!("{} Candlestick Chart", data.meta.symbol);
    let title = options.title_or(&default_title);

    let (price_min, price_max) = padded_range(
        points.iter().map(|p| p.low).fold(f64::INFINITY, f64::min),
        points
            .iter()
            .map(|p| p.high)
            .fold(f64::NEG_INFINITY, f64::max),
    );
    // Candle body width scales with horizontal density
    let candle_width =
        ((options.width as usize / points.len().max(1)) as u32).saturating_sub(4).clamp(1, 12);

    let mut buffer = pixel_buffer(options);
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::render)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0..points.len(), price_min..price_max)
            .map_err(ChartError::render)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(8)
            .x_label_formatter(&|idx: &usize| {
                points.get(*idx).map(|p| p.date.clone()).unwrap_or_default()
            })
            .y_desc("Price ($)")
            .y_label_formatter(&|v: &f64| format!("${v:.2}"))
            .draw()
            .map_err(ChartError::render)?;

        chart
            .draw_series(points.iter().enumerate().map(|(i, p)| {
                CandleStick::new(
                    i,
                    p.open,
                    p.high,
                    p.low,
                    p.close,
                    GREEN.filled(),
                    RED.filled(),
                    candle_width,
                )
            }))
            .map_err(ChartError::render)?;

        root.present().map_err(ChartError::render)?;
    }

    encode_png(buffer, options.width, options.height)
}

/// Close-price line over one day's intraday points
pub fn intraday_chart(
    data: &TimeSeriesIntradayResponse,
    options: &ChartOptions,
) -> Result<Vec<u8>> {
    if data.series.is_empty() {
        return Err(ChartError::NoData(format!(
            "no intraday data for {}",
            data.meta.symbol
        )));
    }

    let points = sorted_daily_points(&data.series)?;
    let default_title = format!("{} Intraday ({})", data.meta.symbol, data.meta.interval);
    let title = options.title_or(&default_title);

    let (price_min, price_max) = padded_range(
        points.iter().map(|p| p.close).fold(f64::INFINITY, f64::min),
        points
            .iter()
            .map(|p| p.close)
            .fold(f64::NEG_INFINITY, f64::max),
    );

    let mut buffer = pixel_buffer(options);
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::render)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0..points.len(), price_min..price_max)
            .map_err(ChartError::render)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(10)
            .x_label_formatter(&|idx: &usize| {
                // "YYYY-MM-DD HH:MM:SS" keys label as HH:MM
                points
                    .get(*idx)
                    .filter(|p| p.date.len() >= 16)
                    .map(|p| p.date[11..16].to_string())
                    .unwrap_or_default()
            })
            .y_desc("Price ($)")
            .y_label_formatter(&|v: &f64| format!("${v:.2}"))
            .draw()
            .map_err(ChartError::render)?;

        chart
            .draw_series(LineSeries::new(
                points.iter().enumerate().map(|(i, p)| (i, p.close)),
                BLUE.stroke_width(2),
            ))
            .map_err(ChartError::render)?;

        root.present().map_err(ChartError::render)?;
    }

    encode_png(buffer, options.width, options.height)
}

/// Annual-EPS bar chart over the most recent ten years
pub fn earnings_chart(data: &EarningsResponse, options: &ChartOptions) -> Result<Vec<u8>> {
    if data.annual_earnings.is_empty() {
        return Err(ChartError::NoData(format!(
            "no earnings data for {}",
            data.symbol
        )));
    }

    // "None" and blank EPS values are legitimate upstream gaps, so they are
    // skipped rather than failing the whole chart
    let mut earnings: Vec<(String, f64)> = data
        .annual_earnings
        .iter()
        .filter(|e| e.fiscal_date_ending.len() >= 4)
        .filter_map(|e| {
            e.reported_eps
                .parse::<f64>()
                .ok()
                .map(|eps| (e.fiscal_date_ending[..4].to_string(), eps))
        })
        .collect();
    earnings.sort_by(|a, b| a.0.cmp(&b.0));
    if earnings.len() > 10 {
        earnings.drain(..earnings.len() - 10);
    }
    if earnings.is_empty() {
        return Err(ChartError::NoData(format!(
            "no parseable earnings for {}",
            data.symbol
        )));
    }

    let default_title = format!("{} Annual EPS", data.symbol);
    let title = options.title_or(&default_title);

    let eps_max = earnings.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let eps_min = earnings.iter().map(|(_, v)| *v).fold(0.0, f64::min);
    let y_max = if eps_max > 0.0 { eps_max * 1.1 } else { 1.0 };
    let y_min = if eps_min < 0.0 { eps_min * 1.1 } else { 0.0 };

    let mut buffer = pixel_buffer(options);
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::render)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d((0..earnings.len()).into_segmented(), y_min..y_max)
            .map_err(ChartError::render)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|seg| match seg {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => earnings
                    .get(*i)
                    .map(|(year, _)| year.clone())
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .y_desc("EPS ($)")
            .y_label_formatter(&|v: &f64| format!("${v:.2}"))
            .draw()
            .map_err(ChartError::render)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BLUE.mix(0.6).filled())
                    .margin(8)
                    .data(earnings.iter().enumerate().map(|(i, (_, eps))| (i, *eps))),
            )
            .map_err(ChartError::render)?;

        root.present().map_err(ChartError::render)?;
    }

    encode_png(buffer, options.width, options.height)
}

/// Operating/investing/financing cash flow lines in billions, last ten years
pub fn cash_flow_chart(data: &CashFlowResponse, options: &ChartOptions) -> Result<Vec<u8>> {
    if data.annual_reports.is_empty() {
        return Err(ChartError::NoData(format!(
            "no cash flow data for {}",
            data.symbol
        )));
    }

    let mut rows: Vec<(String, f64, f64, f64)> = data
        .annual_reports
        .iter()
        .filter(|r| r.fiscal_date_ending.len() >= 4)
        .filter_map(|r| {
            let operating = r.operating_cashflow.parse::<f64>().ok()?;
            let investing = r.cashflow_from_investment.parse::<f64>().ok()?;
            let financing = r.cashflow_from_financing.parse::<f64>().ok()?;
            Some((
                r.fiscal_date_ending[..4].to_string(),
                operating / 1e9,
                investing / 1e9,
                financing / 1e9,
            ))
        })
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    if rows.len() > 10 {
        rows.drain(..rows.len() - 10);
    }
    if rows.is_empty() {
        return Err(ChartError::NoData(format!(
            "no parseable cash flow for {}",
            data.symbol
        )));
    }

    let default_title = format!("{} Cash Flow", data.symbol);
    let title = options.title_or(&default_title);

    let all: Vec<f64> = rows.iter().flat_map(|r| [r.1, r.2, r.3]).collect();
    let (y_min, y_max) = padded_range(
        all.iter().copied().fold(f64::INFINITY, f64::min),
        all.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    );

    let mut buffer = pixel_buffer(options);
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::render)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0..rows.len(), y_min..y_max)
            .map_err(ChartError::render)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(rows.len())
            .x_label_formatter(&|idx: &usize| {
                rows.get(*idx).map(|r| r.0.clone()).unwrap_or_default()
            })
            .y_desc("Cash Flow ($B)")
            .y_label_formatter(&|v: &f64| format!("${v:.1}B"))
            .draw()
            .map_err(ChartError::render)?;

        let series: [(&str, &RGBColor, fn(&(String, f64, f64, f64)) -> f64); 3] = [
            ("Operating", &GREEN, |r| r.1),
            ("Investing", &BLUE, |r| r.2),
            ("Financing", &RED, |r| r.3),
        ];
        for (name, color, pick) in series {
            chart
                .draw_series(LineSeries::new(
                    rows.iter().enumerate().map(|(i, r)| (i, pick(r))),
                    color.stroke_width(2),
                ))
                .map_err(ChartError::render)?
                .label(name)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(ChartError::render)?;

        root.present().map_err(ChartError::render)?;
    }

    encode_png(buffer, options.width, options.height)
}

/// Multi-symbol comparison, each close series normalized to percentage
/// change from its first value
pub fn comparison_chart(
    datasets: &HashMap<String, TimeSeriesDailyResponse>,
    options: &ChartOptions,
) -> Result<Vec<u8>> {
    if datasets.is_empty() {
        return Err(ChartError::NoData("no series to compare".to_string()));
    }

    // Union of all dates keeps the symbols on one shared axis
    let mut all_dates: Vec<String> = datasets
        .values()
        .flat_map(|d| d.series.keys().cloned())
        .collect();
    all_dates.sort();
    all_dates.dedup();
    if all_dates.is_empty() {
        return Err(ChartError::NoData("no series to compare".to_string()));
    }
    let date_index: HashMap<&str, usize> = all_dates
        .iter()
        .enumerate()
        .map(|(i, d)| (d.as_str(), i))
        .collect();

    let mut symbols: Vec<&String> = datasets.keys().collect();
    symbols.sort();

    // Normalized (index, pct-change) points per symbol
    let mut normalized: Vec<(&str, Vec<(usize, f64)>)> = Vec::new();
    for symbol in symbols {
        let points = sorted_daily_points(&datasets[symbol].series)?;
        let Some(base) = points.first().map(|p| p.close).filter(|c| *c != 0.0) else {
            continue;
        };
        let series: Vec<(usize, f64)> = points
            .iter()
            .filter_map(|p| {
                date_index
                    .get(p.date.as_str())
                    .map(|i| (*i, (p.close - base) / base * 100.0))
            })
            .collect();
        if !series.is_empty() {
            normalized.push((symbol, series));
        }
    }
    if normalized.is_empty() {
        return Err(ChartError::NoData("no valid series to compare".to_string()));
    }

    let title = options.title_or("Price Comparison");
    let all_values: Vec<f64> = normalized
        .iter()
        .flat_map(|(_, s)| s.iter().map(|(_, v)| *v))
        .collect();
    let (y_min, y_max) = padded_range(
        all_values.iter().copied().fold(f64::INFINITY, f64::min),
        all_values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    );

    let palette: [&RGBColor; 5] = [&BLUE, &RED, &GREEN, &MAGENTA, &CYAN];

    let mut buffer = pixel_buffer(options);
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::render)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0..all_dates.len(), y_min..y_max)
            .map_err(ChartError::render)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(8)
            .x_label_formatter(&|idx: &usize| {
                all_dates.get(*idx).cloned().unwrap_or_default()
            })
            .y_desc("Change (%)")
            .y_label_formatter(&|v: &f64| format!("{v:.1}%"))
            .draw()
            .map_err(ChartError::render)?;

        for (i, (symbol, series)) in normalized.iter().enumerate() {
            let color = palette[i % palette.len()];
            chart
                .draw_series(LineSeries::new(
                    series.iter().copied(),
                    color.stroke_width(2),
                ))
                .map_err(ChartError::render)?
                .label(*symbol)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(ChartError::render)?;

        root.present().map_err(ChartError::render)?;
    }

    encode_png(buffer, options.width, options.height)
}

/// Revenue bar chart over income statements, most recent ten periods
pub fn revenue_chart(statements: &[IncomeStatement], options: &ChartOptions) -> Result<Vec<u8>> {
    if statements.is_empty() {
        return Err(ChartError::NoData("no income statements".to_string()));
    }

    let mut rows: Vec<(String, f64)> = statements
        .iter()
        .map(|s| (s.report_period.clone(), s.revenue / 1e9))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    if rows.len() > 10 {
        rows.drain(..rows.len() - 10);
    }

    let ticker = statements[0].ticker.as_str();
    let default_title = format!("{ticker} Revenue");
    let title = options.title_or(&default_title);

    let revenue_max = rows.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let y_max = if revenue_max > 0.0 { revenue_max * 1.1 } else { 1.0 };

    let mut buffer = pixel_buffer(options);
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::render)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d((0..rows.len()).into_segmented(), 0.0..y_max)
            .map_err(ChartError::render)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|seg| match seg {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => rows
                    .get(*i)
                    .map(|(period, _)| period.clone())
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .y_desc("Revenue ($B)")
            .y_label_formatter(&|v: &f64| format!("${v:.1}B"))
            .draw()
            .map_err(ChartError::render)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(GREEN.mix(0.6).filled())
                    .margin(8)
                    .data(rows.iter().enumerate().map(|(i, (_, revenue))| (i, *revenue))),
            )
            .map_err(ChartError::render)?;

        root.present().map_err(ChartError::render)?;
    }

    encode_png(buffer, options.width, options.height)
}

/// Close-price line over historical price records
pub fn price_history_chart(
    symbol: &str,
    prices: &[Price],
    options: &ChartOptions,
) -> Result<Vec<u8>> {
    if prices.is_empty() {
        return Err(ChartError::NoData(format!("no price history for {symbol}")));
    }

    let mut rows: Vec<(&str, f64)> = prices
        .iter()
        .map(|p| (p.time.as_str(), p.close))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    let default_title = format!("{symbol} Price History");
    let title = options.title_or(&default_title);

    let (y_min, y_max) = padded_range(
        rows.iter().map(|(_, c)| *c).fold(f64::INFINITY, f64::min),
        rows.iter()
            .map(|(_, c)| *c)
            .fold(f64::NEG_INFINITY, f64::max),
    );

    let mut buffer = pixel_buffer(options);
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::render)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 24))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0..rows.len(), y_min..y_max)
            .map_err(ChartError::render)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(8)
            .x_label_formatter(&|idx: &usize| {
                // Timestamps label as their date prefix
                rows.get(*idx)
                    .map(|(time, _)| time.chars().take(10).collect::<String>())
                    .unwrap_or_default()
            })
            .y_desc("Price ($)")
            .y_label_formatter(&|v: &f64| format!("${v:.2}"))
            .draw()
            .map_err(ChartError::render)?;

        chart
            .draw_series(LineSeries::new(
                rows.iter().enumerate().map(|(i, (_, close))| (i, *close)),
                BLUE.stroke_width(2),
            ))
            .map_err(ChartError::render)?;

        root.present().map_err(ChartError::render)?;
    }

    encode_png(buffer, options.width, options.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_data::DataError;
    use finsight_data::types::TimeSeriesMetaData;

    fn bar(open: &str, high: &str, low: &str, close: &str, volume: &str) -> Bar {
        Bar {
            open: open.to_string(),
            high: high.to_string(),
            low: low.to_string(),
            close: close.to_string(),
            volume: volume.to_string(),
        }
    }

    #[test]
    fn test_empty_inputs_are_no_data() {
        let options = ChartOptions::default();

        let daily = TimeSeriesDailyResponse::default();
        assert!(matches!(
            daily_price_chart(&daily, &options),
            Err(ChartError::NoData(_))
        ));
        assert!(matches!(
            candlestick_chart(&daily, &options),
            Err(ChartError::NoData(_))
        ));

        assert!(matches!(
            intraday_chart(&TimeSeriesIntradayResponse::default(), &options),
            Err(ChartError::NoData(_))
        ));
        assert!(matches!(
            earnings_chart(&EarningsResponse::default(), &options),
            Err(ChartError::NoData(_))
        ));
        assert!(matches!(
            cash_flow_chart(&CashFlowResponse::default(), &options),
            Err(ChartError::NoData(_))
        ));
        assert!(matches!(
            comparison_chart(&HashMap::new(), &options),
            Err(ChartError::NoData(_))
        ));
        assert!(matches!(
            revenue_chart(&[], &options),
            Err(ChartError::NoData(_))
        ));
        assert!(matches!(
            price_history_chart("IBM", &[], &options),
            Err(ChartError::NoData(_))
        ));
    }

    #[test]
    fn test_sorted_daily_points_orders_and_parses() {
        let mut series = HashMap::new();
        series.insert("2024-01-03".to_string(), bar("104", "110", "103", "108", "1500"));
        series.insert("2024-01-02".to_string(), bar("100", "105", "99", "104", "1000"));

        let points = sorted_daily_points(&series).unwrap();
        assert_eq!(points[0].date, "2024-01-02");
        assert_eq!(points[1].date, "2024-01-03");
        assert_eq!(points[0].open, 100.0);
        assert_eq!(points[1].volume, 1500);
    }

    #[test]
    fn test_sorted_daily_points_propagates_parse_errors() {
        let mut series = HashMap::new();
        series.insert("2024-01-02".to_string(), bar("100", "bad", "99", "104", "1000"));
        let err = sorted_daily_points(&series).unwrap_err();
        assert!(matches!(
            err,
            ChartError::Data(DataError::InvalidNumber { field: "high", .. })
        ));
    }

    #[test]
    fn test_parse_error_fails_chart() {
        let mut daily = TimeSeriesDailyResponse {
            meta: TimeSeriesMetaData {
                symbol: "IBM".to_string(),
                ..TimeSeriesMetaData::default()
            },
            series: HashMap::new(),
        };
        daily
            .series
            .insert("2024-01-02".to_string(), bar("oops", "105", "99", "104", "1000"));
        let err = daily_price_chart(&daily, &ChartOptions::default()).unwrap_err();
        assert!(matches!(err, ChartError::Data(_)));
    }

    #[test]
    fn test_padded_range() {
        let (min, max) = padded_range(100.0, 200.0);
        assert!(min < 100.0 && max > 200.0);

        // Flat series still gets a non-degenerate range
        let (min, max) = padded_range(50.0, 50.0);
        assert!(min < max);
    }

    #[test]
    fn test_earnings_chart_skips_unparseable_eps() {
        let body = r#"{
            "symbol": "IBM",
            "annualEarnings": [
                {"fiscalDateEnding": "2023-12-31", "reportedEPS": "None"},
                {"fiscalDateEnding": "2022-12-31", "reportedEPS": "also bad"}
            ]
        }"#;
        let earnings: EarningsResponse = serde_json::from_str(body).unwrap();
        let err = earnings_chart(&earnings, &ChartOptions::default()).unwrap_err();
        assert!(matches!(err, ChartError::NoData(_)));
    }
}
