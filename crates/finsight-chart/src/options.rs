//! Chart sizing and styling options

/// Options applied to every chart function
///
/// Defaults: 1200x600 pixels, volume overlay on, and a per-chart title
/// derived from the data when none is set.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Output width in pixels (default: 1200)
    pub width: u32,

    /// Output height in pixels (default: 600)
    pub height: u32,

    /// Chart title; charts derive one from the symbol when unset
    pub title: Option<String>,

    /// Overlay volume on price charts (default: true)
    pub show_volume: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            title: None,
            show_volume: true,
        }
    }
}

impl ChartOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output dimensions in pixels
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set an explicit chart title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable the volume overlay
    pub fn with_volume(mut self, show_volume: bool) -> Self {
        self.show_volume = show_volume;
        self
    }

    pub(crate) fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ChartOptions::default();
        assert_eq!(options.width, 1200);
        assert_eq!(options.height, 600);
        assert!(options.title.is_none());
        assert!(options.show_volume);
    }

    #[test]
    fn test_builder() {
        let options = ChartOptions::new()
            .with_size(800, 400)
            .with_title("IBM Weekly")
            .with_volume(false);
        assert_eq!(options.width, 800);
        assert_eq!(options.height, 400);
        assert_eq!(options.title_or("fallback"), "IBM Weekly");
        assert!(!options.show_volume);
    }

    #[test]
    fn test_title_fallback() {
        let options = ChartOptions::default();
        assert_eq!(options.title_or("IBM Daily Price"), "IBM Daily Price");
    }
}
