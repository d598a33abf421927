//! PDF report builder
//!
//! Wraps a `genpdf` document behind chaining section methods. Chart sections
//! render through `finsight-chart` and degrade to an inline note when the
//! underlying data is missing, so a partially failed fetch still produces a
//! readable report.

use crate::error::Result;
use crate::options::ReportOptions;
use crate::sanitize::sanitize_text;
use finsight_chart::ChartOptions;
use finsight_data::api::{
    CompanyFacts, FinancialMetrics, IncomeStatement, InsiderTrade, InstitutionalOwnership,
    NewsArticle, Price, PriceSnapshot,
};
use finsight_data::series::{DailyRangeSummary, IntradaySummary};
use finsight_data::types::{
    BalanceSheetResponse, CashFlowResponse, EarningsResponse, MarketStatusResponse,
    TimeSeriesDailyResponse, TimeSeriesIntradayResponse,
};
use finsight_llm::analysis::AnalysisSummary;
use finsight_utils::{format_usd, format_volume, truncate};
use genpdf::elements::{
    Break, BulletPoint, FrameCellDecorator, Image, PageBreak, Paragraph, TableLayout,
};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Document, Element as _, Margins, Scale, SimplePageDecorator, fonts};
use std::collections::HashMap;
use std::fmt::Display;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

const TITLE_COLOR: Color = Color::Rgb(0, 51, 102);
const HEADING_COLOR: Color = Color::Rgb(0, 82, 147);
const MUTED_COLOR: Color = Color::Rgb(100, 100, 100);

/// Pixel-to-paper rendering density for embedded charts
const CHART_DPI: f64 = 96.0;

/// Scale factor that fits an image of `px_width` pixels into the content
/// width, never enlarging
fn image_scale(px_width: u32, content_width_mm: f64) -> f64 {
    let natural_mm = f64::from(px_width) * 25.4 / CHART_DPI;
    (content_width_mm / natural_mm).min(1.0)
}

/// Format a string-typed financial figure as USD, or "N/A" when upstream
/// sent "None" or an empty value
fn format_figure(value: &str) -> String {
    match value.parse::<f64>() {
        Ok(v) => format_usd(v),
        Err(_) => "N/A".to_string(),
    }
}

/// Signed money-and-percent change, e.g. "+$8.00 (+8.00%)"
fn format_change(change: f64, pct: f64) -> String {
    if change >= 0.0 {
        format!("+${change:.2} (+{pct:.2}%)")
    } else {
        format!("-${:.2} ({pct:.2}%)", change.abs())
    }
}

/// Assembles a PDF report section by section
///
/// Every `add_*` method consumes and returns the builder, so a report reads
/// as one chain:
///
/// ```rust,ignore
/// ReportBuilder::new(ReportOptions::default())?
///     .add_title("IBM Analysis")
///     .add_daily_range_summary(&summary)
///     .add_daily_price_chart(&daily, &chart_options, "90-day price and volume")
///     .save("ibm.pdf")?;
/// ```
pub struct ReportBuilder {
    doc: Document,
    options: ReportOptions,
    figure_counter: AtomicU64,
}

impl ReportBuilder {
    /// Create a builder, loading the configured font family from disk
    pub fn new(options: ReportOptions) -> Result<Self> {
        let font_family =
            fonts::from_files(&options.font_dir, &options.font_family, None)?;
        let mut doc = Document::new(font_family);
        doc.set_title(&options.title);

        let (width_mm, height_mm) = options.paper_size.dimensions_mm();
        doc.set_paper_size(genpdf::Size::new(width_mm, height_mm));

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(Margins::all(f64::from(options.margin_mm)));
        let header = options.header.clone();
        let page_numbers = options.page_numbers;
        decorator.set_header(move |page| {
            let mut layout = genpdf::elements::LinearLayout::vertical();
            if let Some(text) = &header {
                layout.push(
                    Paragraph::new(text.as_str())
                        .aligned(Alignment::Center)
                        .styled(Style::new().with_font_size(9).with_color(MUTED_COLOR)),
                );
            }
            if page_numbers && page > 1 {
                layout.push(
                    Paragraph::new(format!("Page {page}"))
                        .aligned(Alignment::Center)
                        .styled(Style::new().with_font_size(9).with_color(MUTED_COLOR)),
                );
            }
            layout.push(Break::new(1.0));
            layout
        });
        doc.set_page_decorator(decorator);

        Ok(Self {
            doc,
            options,
            figure_counter: AtomicU64::new(0),
        })
    }

    /// Centered report title
    pub fn add_title(mut self, title: &str) -> Self {
        self.doc.push(
            Paragraph::new(sanitize_text(title))
                .aligned(Alignment::Center)
                .styled(Style::new().bold().with_font_size(28).with_color(TITLE_COLOR)),
        );
        self.doc.push(Break::new(1.0));
        self
    }

    /// Centered subtitle under the title
    pub fn add_subtitle(mut self, subtitle: &str) -> Self {
        self.doc.push(
            Paragraph::new(sanitize_text(subtitle))
                .aligned(Alignment::Center)
                .styled(Style::new().with_font_size(18).with_color(MUTED_COLOR)),
        );
        self.doc.push(Break::new(1.0));
        self
    }

    /// Section heading
    pub fn add_heading(mut self, heading: &str) -> Self {
        self.doc.push(Break::new(1.0));
        self.doc.push(
            Paragraph::new(sanitize_text(heading))
                .styled(Style::new().bold().with_font_size(16).with_color(HEADING_COLOR)),
        );
        self.doc.push(Break::new(1.0));
        self
    }

    /// Body text; embedded newlines split into paragraphs
    pub fn add_text(mut self, text: &str) -> Self {
        self.push_body(text, Style::new().with_font_size(11));
        self
    }

    /// Bold body text
    pub fn add_bold_text(mut self, text: &str) -> Self {
        self.push_body(text, Style::new().bold().with_font_size(11));
        self
    }

    /// Italic body text
    pub fn add_italic_text(mut self, text: &str) -> Self {
        self.push_body(text, Style::new().italic().with_font_size(11));
        self
    }

    /// Bulleted line
    pub fn add_bullet(mut self, text: &str) -> Self {
        self.doc.push(BulletPoint::new(
            Paragraph::new(sanitize_text(text)).styled(Style::new().with_font_size(11)),
        ));
        self
    }

    /// "Key: value" line with a bold key
    pub fn add_key_value(mut self, key: &str, value: &str) -> Self {
        self.push_key_value(key, value);
        self
    }

    /// Bordered table with a bold header row
    pub fn add_table(mut self, headers: &[&str], rows: &[Vec<String>]) -> Self {
        self.push_table(headers, rows);
        self
    }

    pub fn add_line_break(mut self) -> Self {
        self.doc.push(Break::new(1.0));
        self
    }

    pub fn add_page_break(mut self) -> Self {
        self.doc.push(PageBreak::new());
        self
    }

    /// "Generated: ..." footer line with the current local time
    pub fn add_timestamp(mut self) -> Self {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        self.doc.push(
            Paragraph::new(format!("Generated: {stamp}"))
                .aligned(Alignment::Center)
                .styled(Style::new().italic().with_font_size(9).with_color(MUTED_COLOR)),
        );
        self
    }

    /// Full title page from the configured title, subject, and author,
    /// followed by a page break
    pub fn add_title_page(self) -> Self {
        let title = self.options.title.clone();
        let subject = self.options.subject.clone();
        let author = format!("Prepared by {}", self.options.author);
        let mut builder = self
            .add_line_break()
            .add_line_break()
            .add_title(&title)
            .add_subtitle(&subject);
        builder.doc.push(
            Paragraph::new(sanitize_text(&author))
                .aligned(Alignment::Center)
                .styled(Style::new().italic().with_font_size(11).with_color(MUTED_COLOR)),
        );
        builder.add_line_break().add_timestamp().add_page_break()
    }

    // ---- chart sections ----

    /// Daily close-price chart with volume overlay
    pub fn add_daily_price_chart(
        mut self,
        data: &TimeSeriesDailyResponse,
        options: &ChartOptions,
        caption: &str,
    ) -> Self {
        match finsight_chart::daily_price_chart(data, options) {
            Ok(png) => self.push_figure(&png, caption, options.width),
            Err(err) => self.push_chart_note(&err),
        }
        self
    }

    /// Daily candlestick chart
    pub fn add_candlestick_chart(
        mut self,
        data: &TimeSeriesDailyResponse,
        options: &ChartOptions,
        caption: &str,
    ) -> Self {
        match finsight_chart::candlestick_chart(data, options) {
            Ok(png) => self.push_figure(&png, caption, options.width),
            Err(err) => self.push_chart_note(&err),
        }
        self
    }

    /// Intraday close-price chart
    pub fn add_intraday_chart(
        mut self,
        data: &TimeSeriesIntradayResponse,
        options: &ChartOptions,
        caption: &str,
    ) -> Self {
        match finsight_chart::intraday_chart(data, options) {
            Ok(png) => self.push_figure(&png, caption, options.width),
            Err(err) => self.push_chart_note(&err),
        }
        self
    }

    /// Annual EPS bar chart
    pub fn add_earnings_chart(
        mut self,
        data: &EarningsResponse,
        options: &ChartOptions,
        caption: &str,
    ) -> Self {
        match finsight_chart::earnings_chart(data, options) {
            Ok(png) => self.push_figure(&png, caption, options.width),
            Err(err) => self.push_chart_note(&err),
        }
        self
    }

    /// Operating/investing/financing cash flow chart
    pub fn add_cash_flow_chart(
        mut self,
        data: &CashFlowResponse,
        options: &ChartOptions,
        caption: &str,
    ) -> Self {
        match finsight_chart::cash_flow_chart(data, options) {
            Ok(png) => self.push_figure(&png, caption, options.width),
            Err(err) => self.push_chart_note(&err),
        }
        self
    }

    /// Normalized multi-symbol comparison chart
    pub fn add_comparison_chart(
        mut self,
        datasets: &HashMap<String, TimeSeriesDailyResponse>,
        options: &ChartOptions,
        caption: &str,
    ) -> Self {
        match finsight_chart::comparison_chart(datasets, options) {
            Ok(png) => self.push_figure(&png, caption, options.width),
            Err(err) => self.push_chart_note(&err),
        }
        self
    }

    /// Revenue bar chart from income statements
    pub fn add_revenue_chart(
        mut self,
        statements: &[IncomeStatement],
        options: &ChartOptions,
        caption: &str,
    ) -> Self {
        match finsight_chart::revenue_chart(statements, options) {
            Ok(png) => self.push_figure(&png, caption, options.width),
            Err(err) => self.push_chart_note(&err),
        }
        self
    }

    /// Close-price chart from historical price records
    pub fn add_price_history_chart(
        mut self,
        symbol: &str,
        prices: &[Price],
        options: &ChartOptions,
        caption: &str,
    ) -> Self {
        match finsight_chart::price_history_chart(symbol, prices, options) {
            Ok(png) => self.push_figure(&png, caption, options.width),
            Err(err) => self.push_chart_note(&err),
        }
        self
    }

    // ---- data sections ----

    /// Market status table with open/close hours per market
    pub fn add_market_status(self, status: &MarketStatusResponse) -> Self {
        let rows: Vec<Vec<String>> = status
            .markets
            .iter()
            .map(|m| {
                vec![
                    m.region.clone(),
                    m.market_type.clone(),
                    m.current_status.clone(),
                    format!("{} - {}", m.local_open, m.local_close),
                ]
            })
            .collect();
        self.add_heading("Market Status")
            .add_table(&["Region", "Type", "Status", "Hours"], &rows)
    }

    /// Key figures for a daily date-range summary
    pub fn add_daily_range_summary(self, summary: &DailyRangeSummary) -> Self {
        self.add_heading(&format!("{} Period Summary", summary.symbol))
            .add_key_value("Symbol", &summary.symbol)
            .add_key_value(
                "Period",
                &format!("{} to {}", summary.start_date, summary.end_date),
            )
            .add_key_value("Trading Days", &summary.trading_days.to_string())
            .add_key_value("Open", &format!("${:.2}", summary.period_open))
            .add_key_value(
                "High",
                &format!("${:.2} on {}", summary.period_high, summary.high_date),
            )
            .add_key_value(
                "Low",
                &format!("${:.2} on {}", summary.period_low, summary.low_date),
            )
            .add_key_value("Close", &format!("${:.2}", summary.period_close))
            .add_key_value(
                "Change",
                &format_change(summary.price_change, summary.price_change_pct),
            )
            .add_key_value("Total Volume", &format_volume(summary.total_volume as f64))
            .add_key_value("Avg Daily Volume", &format_volume(summary.avg_volume as f64))
    }

    /// Key figures for a single-day intraday summary
    pub fn add_intraday_summary(self, summary: &IntradaySummary) -> Self {
        self.add_heading(&format!("{} Intraday Summary", summary.symbol))
            .add_key_value("Symbol", &summary.symbol)
            .add_key_value("Date", &summary.date)
            .add_key_value("Interval", &summary.interval)
            .add_key_value("Open", &format!("${:.2}", summary.open))
            .add_key_value("High", &format!("${:.2}", summary.high))
            .add_key_value("Low", &format!("${:.2}", summary.low))
            .add_key_value("Close", &format!("${:.2}", summary.close))
            .add_key_value("Total Volume", &format_volume(summary.total_volume as f64))
            .add_key_value("Data Points", &summary.data_points.to_string())
    }

    /// Headline figures from the most recent annual balance sheet
    pub fn add_balance_sheet_summary(self, data: &BalanceSheetResponse) -> Self {
        let builder = self.add_heading(&format!("{} Balance Sheet", data.symbol));
        let Some(report) = data.annual_reports.first() else {
            return builder.add_italic_text("No balance sheet data available.");
        };
        builder
            .add_key_value("Fiscal Year Ending", &report.fiscal_date_ending)
            .add_key_value("Total Assets", &format_figure(&report.total_assets))
            .add_key_value("Total Liabilities", &format_figure(&report.total_liabilities))
            .add_key_value(
                "Shareholder Equity",
                &format_figure(&report.total_shareholder_equity),
            )
            .add_key_value(
                "Cash & Equivalents",
                &format_figure(&report.cash_and_cash_equivalents_at_carrying_value),
            )
            .add_key_value("Long Term Debt", &format_figure(&report.long_term_debt))
    }

    /// Headline figures from the most recent annual cash flow report
    pub fn add_cash_flow_summary(self, data: &CashFlowResponse) -> Self {
        let builder = self.add_heading(&format!("{} Cash Flow", data.symbol));
        let Some(report) = data.annual_reports.first() else {
            return builder.add_italic_text("No cash flow data available.");
        };
        builder
            .add_key_value("Fiscal Year Ending", &report.fiscal_date_ending)
            .add_key_value(
                "Operating Cash Flow",
                &format_figure(&report.operating_cashflow),
            )
            .add_key_value(
                "Investing Cash Flow",
                &format_figure(&report.cashflow_from_investment),
            )
            .add_key_value(
                "Financing Cash Flow",
                &format_figure(&report.cashflow_from_financing),
            )
            .add_key_value(
                "Capital Expenditures",
                &format_figure(&report.capital_expenditures),
            )
            .add_key_value("Net Income", &format_figure(&report.net_income))
    }

    /// Annual EPS table, most recent `years` first
    pub fn add_earnings_table(self, data: &EarningsResponse, years: usize) -> Self {
        let rows: Vec<Vec<String>> = data
            .annual_earnings
            .iter()
            .take(years)
            .map(|e| {
                let eps = match e.reported_eps.parse::<f64>() {
                    Ok(v) => format!("${v:.2}"),
                    Err(_) => "N/A".to_string(),
                };
                vec![e.fiscal_date_ending.clone(), eps]
            })
            .collect();
        self.add_heading(&format!("{} Annual Earnings", data.symbol))
            .add_table(&["Fiscal Year Ending", "Reported EPS"], &rows)
    }

    /// All populated sections of a model-generated analysis
    pub fn add_analysis_summary(self, summary: &AnalysisSummary) -> Self {
        let sections = [
            ("Executive Summary", &summary.executive),
            ("Price Analysis", &summary.price_analysis),
            ("Fundamentals", &summary.fundamentals),
            ("Risk Factors", &summary.risks),
            ("Outlook", &summary.outlook),
        ];
        let mut builder = self;
        for (heading, text) in sections {
            if !text.is_empty() {
                builder = builder.add_heading(heading).add_text(text);
            }
        }
        builder
    }

    /// Single titled analysis section
    pub fn add_insight(self, title: &str, content: &str) -> Self {
        self.add_heading(title).add_text(content)
    }

    /// Company profile key-values
    pub fn add_company_facts(self, facts: &CompanyFacts) -> Self {
        self.add_heading(&format!("{} Company Profile", facts.ticker))
            .add_key_value("Name", &facts.name)
            .add_key_value("Sector", &facts.sector)
            .add_key_value("Industry", &facts.industry)
            .add_key_value("Exchange", &facts.exchange)
            .add_key_value("Location", &facts.location)
            .add_key_value("Market Cap", &format_usd(facts.market_cap))
            .add_key_value("Employees", &format!("{:.0}", facts.number_of_employees))
            .add_key_value("Listed", &facts.listing_date)
            .add_key_value("Website", &facts.website_url)
    }

    /// Real-time price snapshot key-values
    pub fn add_price_snapshot(self, snapshot: &PriceSnapshot) -> Self {
        self.add_heading(&format!("{} Price Snapshot", snapshot.ticker))
            .add_key_value("Price", &format!("${:.2}", snapshot.price))
            .add_key_value(
                "Day Change",
                &format_change(snapshot.day_change, snapshot.day_change_percent),
            )
            .add_key_value("Market Cap", &format_usd(snapshot.market_cap))
            .add_key_value("As Of", &snapshot.time)
    }

    /// Financial ratios grouped by valuation, profitability, and leverage
    pub fn add_financial_metrics(self, metrics: &FinancialMetrics) -> Self {
        self.add_heading(&format!("{} Financial Metrics", metrics.ticker))
            .add_bold_text("Valuation")
            .add_key_value("Market Cap", &format_usd(metrics.market_cap))
            .add_key_value("Enterprise Value", &format_usd(metrics.enterprise_value))
            .add_key_value("P/E Ratio", &format!("{:.2}", metrics.price_to_earnings_ratio))
            .add_key_value("P/B Ratio", &format!("{:.2}", metrics.price_to_book_ratio))
            .add_key_value("P/S Ratio", &format!("{:.2}", metrics.price_to_sales_ratio))
            .add_key_value("EV/EBITDA", &format!("{:.2}", metrics.ev_to_ebitda))
            .add_line_break()
            .add_bold_text("Profitability")
            .add_key_value("Gross Margin", &format!("{:.1}%", metrics.gross_margin * 100.0))
            .add_key_value(
                "Operating Margin",
                &format!("{:.1}%", metrics.operating_margin * 100.0),
            )
            .add_key_value("Net Margin", &format!("{:.1}%", metrics.net_margin * 100.0))
            .add_key_value(
                "Return on Equity",
                &format!("{:.1}%", metrics.return_on_equity * 100.0),
            )
            .add_key_value(
                "Return on Assets",
                &format!("{:.1}%", metrics.return_on_assets * 100.0),
            )
            .add_line_break()
            .add_bold_text("Liquidity & Leverage")
            .add_key_value("Current Ratio", &format!("{:.2}", metrics.current_ratio))
            .add_key_value("Quick Ratio", &format!("{:.2}", metrics.quick_ratio))
            .add_key_value("Debt-to-Equity", &format!("{:.2}", metrics.debt_to_equity))
            .add_key_value("Debt-to-Assets", &format!("{:.2}", metrics.debt_to_assets))
    }

    /// Income statement table, most recent `count` periods
    pub fn add_income_statement_table(
        self,
        statements: &[IncomeStatement],
        count: usize,
    ) -> Self {
        let rows: Vec<Vec<String>> = statements
            .iter()
            .take(count)
            .map(|s| {
                vec![
                    s.report_period.clone(),
                    format_usd(s.revenue),
                    format_usd(s.net_income),
                    format!("${:.2}", s.earnings_per_share),
                ]
            })
            .collect();
        let heading = statements
            .first()
            .map_or_else(|| "Income Statements".to_string(), |s| {
                format!("{} Income Statements", s.ticker)
            });
        self.add_heading(&heading)
            .add_table(&["Period", "Revenue", "Net Income", "EPS"], &rows)
    }

    /// Insider transaction table, most recent `count` trades
    pub fn add_insider_trades(self, trades: &[InsiderTrade], count: usize) -> Self {
        let rows: Vec<Vec<String>> = trades
            .iter()
            .take(count)
            .map(|t| {
                // Negative share counts are dispositions
                let action = if t.transaction_shares >= 0.0 { "Buy" } else { "Sell" };
                vec![
                    t.transaction_date.clone(),
                    t.name.clone(),
                    action.to_string(),
                    format!("{:.0}", t.transaction_shares.abs()),
                    format_usd(t.transaction_value.abs()),
                ]
            })
            .collect();
        self.add_heading("Insider Trades")
            .add_table(&["Date", "Name", "Action", "Shares", "Value"], &rows)
    }

    /// Institutional holdings table, largest `count` positions as returned
    pub fn add_institutional_ownership(
        self,
        holdings: &[InstitutionalOwnership],
        count: usize,
    ) -> Self {
        let rows: Vec<Vec<String>> = holdings
            .iter()
            .take(count)
            .map(|h| {
                vec![
                    h.investor.clone(),
                    format_volume(h.shares),
                    format_usd(h.market_value),
                    h.report_period.clone(),
                ]
            })
            .collect();
        self.add_heading("Institutional Ownership")
            .add_table(&["Investor", "Shares", "Market Value", "As Of"], &rows)
    }

    /// Recent headlines, up to `count`, each with source and sentiment
    pub fn add_news_list(self, articles: &[NewsArticle], count: usize) -> Self {
        let mut builder = self.add_heading("Recent News");
        for article in articles.iter().take(count) {
            builder = builder.add_bold_text(&format!("{} - {}", article.date, article.source));
            let mut line = truncate(&article.title, 100);
            if !article.sentiment.is_empty() {
                line = format!("{line} [{}]", article.sentiment);
            }
            builder = builder.add_text(&line).add_line_break();
        }
        builder
    }

    // ---- output ----

    /// Render the report to a file
    pub fn save(self, path: impl AsRef<Path>) -> Result<()> {
        self.doc.render_to_file(path)?;
        Ok(())
    }

    /// Render the report into a byte buffer
    pub fn to_bytes(self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.doc.render(&mut out)?;
        Ok(out)
    }

    // ---- internals ----

    fn push_body(&mut self, text: &str, style: Style) {
        for line in sanitize_text(text).lines() {
            if line.trim().is_empty() {
                self.doc.push(Break::new(1.0));
            } else {
                self.doc.push(Paragraph::new(line).styled(style));
            }
        }
    }

    fn push_key_value(&mut self, key: &str, value: &str) {
        self.doc.push(
            Paragraph::default()
                .styled_string(format!("{key}: "), Style::new().bold().with_font_size(11))
                .string(sanitize_text(value))
                .styled(Style::new().with_font_size(11)),
        );
    }

    fn push_table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        if headers.is_empty() || rows.is_empty() {
            self.doc
                .push(Paragraph::new("No data available.").styled(
                    Style::new().italic().with_font_size(10).with_color(MUTED_COLOR),
                ));
            return;
        }

        let mut table = TableLayout::new(vec![1; headers.len()]);
        table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

        let mut header_row = table.row();
        for header in headers {
            header_row = header_row.element(
                Paragraph::default()
                    .styled_string(*header, Style::new().bold().with_font_size(10))
                    .padded(1),
            );
        }
        if let Err(err) = header_row.push() {
            warn!(error = %err, "failed to push table header row");
            return;
        }

        for row in rows {
            let mut table_row = table.row();
            for cell in row.iter().take(headers.len()) {
                table_row = table_row.element(
                    Paragraph::new(sanitize_text(cell))
                        .styled(Style::new().with_font_size(10))
                        .padded(1),
                );
            }
            // Short rows pad out so the layout stays rectangular
            for _ in row.len()..headers.len() {
                table_row = table_row.element(Paragraph::new("").padded(1));
            }
            if let Err(err) = table_row.push() {
                warn!(error = %err, "failed to push table row");
            }
        }

        self.doc.push(table);
        self.doc.push(Break::new(1.0));
    }

    fn push_figure(&mut self, png: &[u8], caption: &str, px_width: u32) {
        let element = match Image::from_reader(Cursor::new(png)) {
            Ok(img) => img,
            Err(err) => {
                warn!(error = %err, "failed to embed chart image");
                self.push_chart_note(&err);
                return;
            }
        };

        let scale = image_scale(px_width, self.options.content_width_mm());
        self.doc.push(
            element
                .with_dpi(CHART_DPI)
                .with_alignment(Alignment::Center)
                .with_scale(Scale::new(scale, scale)),
        );

        let number = self.figure_counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.doc.push(
            Paragraph::new(format!("Figure {number}: {}", sanitize_text(caption)))
                .aligned(Alignment::Center)
                .styled(Style::new().italic().with_font_size(9).with_color(MUTED_COLOR)),
        );
        self.doc.push(Break::new(1.0));
    }

    fn push_chart_note(&mut self, err: &dyn Display) {
        warn!(error = %err, "chart unavailable, adding note");
        self.doc.push(
            Paragraph::new(format!("Chart unavailable: {err}"))
                .styled(Style::new().italic().with_font_size(10).with_color(MUTED_COLOR)),
        );
        self.doc.push(Break::new(1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_figure() {
        assert_eq!(format_figure("135241000000"), "$135.24B");
        assert_eq!(format_figure("None"), "N/A");
        assert_eq!(format_figure(""), "N/A");
    }

    #[test]
    fn test_format_change_signs() {
        assert_eq!(format_change(8.0, 8.0), "+$8.00 (+8.00%)");
        assert_eq!(format_change(-3.5, -2.1), "-$3.50 (-2.10%)");
        assert_eq!(format_change(0.0, 0.0), "+$0.00 (+0.00%)");
    }

    #[test]
    fn test_image_scale_fits_content_width() {
        // 1200px at 96 dpi is 317.5mm, wider than a 170mm content area
        let scale = image_scale(1200, 170.0);
        assert!(scale < 1.0);
        assert!((scale - 170.0 / 317.5).abs() < 1e-9);

        // Small images never upscale
        assert_eq!(image_scale(100, 170.0), 1.0);
    }
}
