//! Report configuration

use std::path::PathBuf;

/// Supported page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    A4,
    Letter,
    Legal,
}

impl PaperSize {
    /// Page dimensions in millimeters (width, height)
    pub(crate) fn dimensions_mm(self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
            Self::Legal => (215.9, 355.6),
        }
    }
}

/// Options for a PDF report
///
/// Defaults: A4 paper, 20mm margins, fonts loaded from `./fonts` with the
/// `LiberationSans` family, no running header, no page numbers.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Document title (default: "Stock Analysis Report")
    pub title: String,

    /// Author shown on the title page (default: "finsight")
    pub author: String,

    /// Subject line shown on the title page (default: "Financial Analysis")
    pub subject: String,

    /// Page size (default: A4)
    pub paper_size: PaperSize,

    /// Page margins in millimeters (default: 20)
    pub margin_mm: u32,

    /// Directory holding the font family's .ttf files (default: "./fonts")
    pub font_dir: PathBuf,

    /// Font family name, e.g. "LiberationSans" expects
    /// LiberationSans-{Regular,Bold,Italic,BoldItalic}.ttf (default:
    /// "LiberationSans")
    pub font_family: String,

    /// Centered running header on every page (default: none)
    pub header: Option<String>,

    /// Print "Page N" on pages after the first (default: false)
    pub page_numbers: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: "Stock Analysis Report".to_string(),
            author: "finsight".to_string(),
            subject: "Financial Analysis".to_string(),
            paper_size: PaperSize::A4,
            margin_mm: 20,
            font_dir: PathBuf::from("./fonts"),
            font_family: "LiberationSans".to_string(),
            header: None,
            page_numbers: false,
        }
    }
}

impl ReportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_paper_size(mut self, paper_size: PaperSize) -> Self {
        self.paper_size = paper_size;
        self
    }

    pub fn with_margin(mut self, margin_mm: u32) -> Self {
        self.margin_mm = margin_mm;
        self
    }

    pub fn with_fonts(mut self, font_dir: impl Into<PathBuf>, family: impl Into<String>) -> Self {
        self.font_dir = font_dir.into();
        self.font_family = family.into();
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn with_page_numbers(mut self) -> Self {
        self.page_numbers = true;
        self
    }

    /// Width available for content after margins, in millimeters
    pub(crate) fn content_width_mm(&self) -> f64 {
        let (width, _) = self.paper_size.dimensions_mm();
        width - 2.0 * f64::from(self.margin_mm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ReportOptions::default();
        assert_eq!(options.title, "Stock Analysis Report");
        assert_eq!(options.paper_size, PaperSize::A4);
        assert_eq!(options.margin_mm, 20);
        assert_eq!(options.font_family, "LiberationSans");
        assert!(options.header.is_none());
        assert!(!options.page_numbers);
    }

    #[test]
    fn test_builder() {
        let options = ReportOptions::new()
            .with_title("IBM Deep Dive")
            .with_author("Research Desk")
            .with_paper_size(PaperSize::Letter)
            .with_margin(15)
            .with_header("IBM Deep Dive")
            .with_page_numbers();
        assert_eq!(options.title, "IBM Deep Dive");
        assert_eq!(options.paper_size, PaperSize::Letter);
        assert_eq!(options.margin_mm, 15);
        assert_eq!(options.header.as_deref(), Some("IBM Deep Dive"));
        assert!(options.page_numbers);
    }

    #[test]
    fn test_content_width() {
        let options = ReportOptions::default();
        assert!((options.content_width_mm() - 170.0).abs() < f64::EPSILON);

        let (width, height) = PaperSize::Legal.dimensions_mm();
        assert!(width < height);
    }
}
