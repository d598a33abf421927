//! AI-generated analysis summaries over fetched market data
//!
//! This crate wraps the OpenRouter chat-completions API and turns market data
//! from `finsight-data` into short narrative sections (executive summary,
//! price trend, fundamentals, risks, outlook, news sentiment) suitable for
//! embedding in a report.
//!
//! # Example
//!
//! ```rust,ignore
//! use finsight_llm::{AnalysisInput, OpenRouterClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = OpenRouterClient::from_env()?;
//!     let input = AnalysisInput::new("AAPL").with_daily(daily);
//!     let summary = client.full_analysis(&input).await;
//!     println!("{}", summary.executive);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod error;
mod format;
pub mod openrouter;

// Re-export main types for convenience
pub use analysis::{AnalysisInput, AnalysisSummary};
pub use error::{LlmError, Result};
pub use openrouter::{OpenRouterClient, OpenRouterConfig};
