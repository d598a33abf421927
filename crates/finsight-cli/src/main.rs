//! Command-line interface for finsight

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use finsight_chart::ChartOptions;
use finsight_data::api::{AlphaVantageClient, Interval, NewsSentimentOptions, OutputSize};
use finsight_data::series;
use finsight_data::types::TimeSeriesDailyResponse;
use finsight_llm::{AnalysisInput, OpenRouterClient};
use finsight_report::{PaperSize, ReportBuilder, ReportOptions};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "finsight")]
#[command(about = "Market data summaries, charts, and PDF reports", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a trading-range summary for a symbol as JSON
    Summary {
        /// Ticker symbol
        symbol: String,

        /// Start date (YYYY-MM-DD), inclusive
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD), inclusive
        #[arg(long)]
        end: Option<String>,

        /// Keep only the most recent N trading days
        #[arg(long, conflicts_with_all = ["start", "end"])]
        days: Option<usize>,

        /// Fetch the full price history instead of the recent window
        #[arg(long)]
        full: bool,
    },

    /// Render a chart to a PNG file
    Chart {
        /// Ticker symbol
        symbol: String,

        /// Output PNG path
        #[arg(short, long, default_value = "chart.png")]
        output: PathBuf,

        /// Chart type
        #[arg(long, value_enum, default_value_t = ChartKind::Price)]
        kind: ChartKind,

        /// Image width in pixels
        #[arg(long, default_value_t = 1200)]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Omit the volume overlay on the price chart
        #[arg(long)]
        no_volume: bool,

        /// Intraday interval (1min, 5min, 15min, 30min, 60min)
        #[arg(long, default_value = "5min")]
        interval: String,
    },

    /// Assemble a full PDF analysis report
    Report {
        /// Ticker symbol
        symbol: String,

        /// Output PDF path
        #[arg(short, long, default_value = "report.pdf")]
        output: PathBuf,

        /// Directory holding the report font files
        #[arg(long, default_value = "./fonts")]
        fonts: PathBuf,

        /// Page size
        #[arg(long, value_enum, default_value_t = Paper::A4)]
        paper: Paper,

        /// Skip the model-generated analysis sections
        #[arg(long)]
        skip_analysis: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChartKind {
    Price,
    Candlestick,
    Intraday,
    Earnings,
    CashFlow,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Paper {
    A4,
    Letter,
    Legal,
}

impl From<Paper> for PaperSize {
    fn from(paper: Paper) -> Self {
        match paper {
            Paper::A4 => Self::A4,
            Paper::Letter => Self::Letter,
            Paper::Legal => Self::Legal,
        }
    }
}

fn parse_interval(s: &str) -> anyhow::Result<Interval> {
    match s {
        "1min" => Ok(Interval::Min1),
        "5min" => Ok(Interval::Min5),
        "15min" => Ok(Interval::Min15),
        "30min" => Ok(Interval::Min30),
        "60min" => Ok(Interval::Min60),
        other => bail!("unsupported interval: {other}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    finsight_utils::init_tracing();

    let args = Args::parse();
    match args.command {
        Command::Summary {
            symbol,
            start,
            end,
            days,
            full,
        } => run_summary(&symbol, start.as_deref(), end.as_deref(), days, full).await,
        Command::Chart {
            symbol,
            output,
            kind,
            width,
            height,
            no_volume,
            interval,
        } => run_chart(&symbol, &output, kind, width, height, no_volume, &interval).await,
        Command::Report {
            symbol,
            output,
            fonts,
            paper,
            skip_analysis,
        } => run_report(&symbol, &output, fonts, paper, skip_analysis).await,
    }
}

async fn run_summary(
    symbol: &str,
    start: Option<&str>,
    end: Option<&str>,
    days: Option<usize>,
    full: bool,
) -> anyhow::Result<()> {
    let client = AlphaVantageClient::from_env()?;
    let output_size = if full {
        OutputSize::Full
    } else {
        OutputSize::Compact
    };

    let daily = client.daily(symbol, output_size).await?;
    let filtered = match days {
        Some(n) => series::filter_daily_last_n_days(&daily.series, n),
        None => series::filter_daily_by_date_range(&daily.series, start, end),
    };
    let summary = series::daily_range_summary(symbol, &filtered)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn run_chart(
    symbol: &str,
    output: &Path,
    kind: ChartKind,
    width: u32,
    height: u32,
    no_volume: bool,
    interval: &str,
) -> anyhow::Result<()> {
    let client = AlphaVantageClient::from_env()?;
    let options = ChartOptions::new()
        .with_size(width, height)
        .with_volume(!no_volume);

    let png = match kind {
        ChartKind::Price => {
            let daily = client.daily(symbol, OutputSize::Compact).await?;
            finsight_chart::daily_price_chart(&daily, &options)?
        }
        ChartKind::Candlestick => {
            let daily = client.daily(symbol, OutputSize::Compact).await?;
            finsight_chart::candlestick_chart(&daily, &options)?
        }
        ChartKind::Intraday => {
            let interval = parse_interval(interval)?;
            let intraday = client
                .intraday(symbol, interval, OutputSize::Compact)
                .await?;
            finsight_chart::intraday_chart(&intraday, &options)?
        }
        ChartKind::Earnings => {
            let earnings = client.earnings(symbol).await?;
            finsight_chart::earnings_chart(&earnings, &options)?
        }
        ChartKind::CashFlow => {
            let cash_flow = client.cash_flow(symbol).await?;
            finsight_chart::cash_flow_chart(&cash_flow, &options)?
        }
    };

    std::fs::write(output, png)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), "chart written");
    Ok(())
}

async fn run_report(
    symbol: &str,
    output: &Path,
    fonts: PathBuf,
    paper: Paper,
    skip_analysis: bool,
) -> anyhow::Result<()> {
    let client = AlphaVantageClient::from_env()?;

    info!(symbol, "fetching report data");
    let daily = client.daily(symbol, OutputSize::Compact).await?;
    // Fundamentals and news are optional; a failed fetch drops the section
    let earnings = client.earnings(symbol).await.map_err(log_skip).ok();
    let cash_flow = client.cash_flow(symbol).await.map_err(log_skip).ok();
    let balance_sheet = client.balance_sheet(symbol).await.map_err(log_skip).ok();
    let news = client
        .news_sentiment(&NewsSentimentOptions::new().with_tickers(symbol).with_limit(5))
        .await
        .map_err(log_skip)
        .ok();

    let range_summary = series::daily_range_summary(symbol, &daily.series)?;

    let analysis = if skip_analysis {
        None
    } else {
        let llm = OpenRouterClient::from_env()?;
        let mut input = AnalysisInput::new(symbol).with_daily(daily.clone());
        if let Some(earnings) = earnings.clone() {
            input = input.with_earnings(earnings);
        }
        if let Some(cash_flow) = cash_flow.clone() {
            input = input.with_cash_flow(cash_flow);
        }
        if let Some(balance_sheet) = balance_sheet.clone() {
            input = input.with_balance_sheet(balance_sheet);
        }
        if let Some(news) = news.clone() {
            input = input.with_news(news);
        }
        Some(llm.full_analysis(&input).await)
    };

    let report_options = ReportOptions::new()
        .with_title(format!("{symbol} Analysis Report"))
        .with_fonts(fonts, "LiberationSans")
        .with_paper_size(paper.into())
        .with_header(format!("{symbol} Analysis"))
        .with_page_numbers();
    let chart_options = ChartOptions::new();

    let mut builder = ReportBuilder::new(report_options)?
        .add_title_page()
        .add_daily_range_summary(&range_summary)
        .add_daily_price_chart(&daily, &chart_options, &format!("{symbol} daily close and volume"))
        .add_candlestick_chart(&recent_window(&daily, 30), &chart_options, &format!("{symbol} 30-day candlesticks"));

    if let Some(earnings) = &earnings {
        builder = builder
            .add_earnings_chart(earnings, &chart_options, &format!("{symbol} annual EPS"))
            .add_earnings_table(earnings, 10);
    }
    if let Some(cash_flow) = &cash_flow {
        builder = builder
            .add_cash_flow_chart(cash_flow, &chart_options, &format!("{symbol} cash flow trends"))
            .add_cash_flow_summary(cash_flow);
    }
    if let Some(balance_sheet) = &balance_sheet {
        builder = builder.add_balance_sheet_summary(balance_sheet);
    }
    if let Some(analysis) = &analysis {
        builder = builder.add_page_break().add_analysis_summary(analysis);
    }
    if let Some(news) = &news {
        let articles: Vec<finsight_data::api::NewsArticle> = news
            .feed
            .iter()
            .map(|item| finsight_data::api::NewsArticle {
                title: item.title.clone(),
                source: item.source.clone(),
                date: item.time_published.clone(),
                sentiment: item.overall_sentiment_label.clone(),
                url: item.url.clone(),
                ..finsight_data::api::NewsArticle::default()
            })
            .collect();
        builder = builder.add_news_list(&articles, 5);
    }

    builder.add_line_break().add_timestamp().save(output)?;
    info!(path = %output.display(), "report written");
    Ok(())
}

/// Restrict a daily response to its most recent `n` trading days
fn recent_window(daily: &TimeSeriesDailyResponse, n: usize) -> TimeSeriesDailyResponse {
    TimeSeriesDailyResponse {
        meta: daily.meta.clone(),
        series: series::filter_daily_last_n_days(&daily.series, n),
    }
}

fn log_skip<E: std::fmt::Display>(err: E) -> E {
    warn!(error = %err, "skipping optional section");
    err
}
