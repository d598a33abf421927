//! Human-readable number formatting shared across prompt and report output

/// Format a dollar amount with T/B/M/K abbreviations
///
/// Values below one thousand keep two decimals without a suffix. Negative
/// amounts keep their sign in front of the dollar sign.
pub fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let n = amount.abs();

    let result = if n >= 1e12 {
        format!("${:.2}T", n / 1e12)
    } else if n >= 1e9 {
        format!("${:.2}B", n / 1e9)
    } else if n >= 1e6 {
        format!("${:.2}M", n / 1e6)
    } else if n >= 1e3 {
        format!("${:.2}K", n / 1e3)
    } else {
        format!("${n:.2}")
    };

    if negative {
        format!("-{result}")
    } else {
        result
    }
}

/// Format a share/volume count with B/M/K abbreviations
pub fn format_volume(volume: f64) -> String {
    if volume >= 1e9 {
        format!("{:.1}B", volume / 1e9)
    } else if volume >= 1e6 {
        format!("{:.1}M", volume / 1e6)
    } else if volume >= 1e3 {
        format!("{:.1}K", volume / 1e3)
    } else {
        format!("{volume:.0}")
    }
}

/// Truncate a string to at most `max_len` characters, appending "..."
///
/// Truncation is on char boundaries so multi-byte text never splits.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let truncated: String = s.chars().take(keep).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_magnitudes() {
        assert_eq!(format_usd(2_500_000_000_000.0), "$2.50T");
        assert_eq!(format_usd(3_200_000_000.0), "$3.20B");
        assert_eq!(format_usd(45_000_000.0), "$45.00M");
        assert_eq!(format_usd(12_500.0), "$12.50K");
        assert_eq!(format_usd(99.5), "$99.50");
    }

    #[test]
    fn test_format_usd_negative() {
        assert_eq!(format_usd(-1_500_000_000.0), "-$1.50B");
        assert_eq!(format_usd(-5.0), "-$5.00");
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(2_400_000_000.0), "2.4B");
        assert_eq!(format_volume(15_300_000.0), "15.3M");
        assert_eq!(format_volume(9_800.0), "9.8K");
        assert_eq!(format_volume(312.0), "312");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 80), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        // exact length passes through untouched
        assert_eq!(truncate("abcdefgh", 8), "abcdefgh");
    }
}
