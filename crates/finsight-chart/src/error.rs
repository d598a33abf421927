//! Error types for chart rendering

use thiserror::Error;

/// Errors that can occur while rendering a chart
#[derive(Error, Debug)]
pub enum ChartError {
    /// Input series carried no drawable records
    #[error("No data to chart: {0}")]
    NoData(String),

    /// A source record carried a malformed figure
    #[error(transparent)]
    Data(#[from] finsight_data::DataError),

    /// Drawing backend failure
    #[error("Render failed: {0}")]
    Render(String),

    /// PNG encoding failure
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

impl ChartError {
    pub(crate) fn render(e: impl std::fmt::Display) -> Self {
        Self::Render(e.to_string())
    }
}

/// Result type alias for chart operations
pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChartError::NoData("empty series".to_string());
        assert_eq!(err.to_string(), "No data to chart: empty series");

        let err = ChartError::render("backend unavailable");
        assert!(err.to_string().contains("backend unavailable"));
    }
}
