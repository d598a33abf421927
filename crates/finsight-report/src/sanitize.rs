//! Text cleanup for PDF rendering
//!
//! The built-in PDF fonts cover a narrow character set, and model output
//! often arrives with markdown markup. This pass folds both down to plain
//! text that renders cleanly.

/// Replace characters the PDF fonts cannot render and strip markdown markup
pub fn sanitize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => out.push('\''),
            '\u{2013}' | '\u{2014}' | '\u{2015}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{2022}' | '\u{2023}' | '\u{25E6}' | '\u{2043}' => out.push('-'),
            '\u{00A9}' => out.push_str("(c)"),
            '\u{00AE}' => out.push_str("(R)"),
            '\u{2122}' => out.push_str("(TM)"),
            '\u{00B0}' => out.push_str(" deg"),
            '\u{00D7}' => out.push('x'),
            '\u{00F7}' => out.push('/'),
            '\u{2248}' => out.push('~'),
            '\u{2260}' => out.push_str("!="),
            '\u{2264}' => out.push_str("<="),
            '\u{2265}' => out.push_str(">="),
            '\u{221E}' => out.push_str("inf"),
            '\u{20AC}' => out.push_str("EUR"),
            '\u{00A3}' => out.push_str("GBP"),
            '\u{00A5}' => out.push_str("JPY"),
            '\u{00A0}' => out.push(' '),
            _ => out.push(c),
        }
    }

    strip_markdown(&out)
}

fn strip_markdown(text: &str) -> String {
    let mut out = text.to_string();
    for marker in ["**", "__", "~~", "```", "`"] {
        out = out.replace(marker, "");
    }

    let lines: Vec<String> = out
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            // Demote headings and normalize list bullets
            let body = if let Some(rest) = trimmed.strip_prefix("### ") {
                rest.to_string()
            } else if let Some(rest) = trimmed.strip_prefix("## ") {
                rest.to_string()
            } else if let Some(rest) = trimmed.strip_prefix("# ") {
                rest.to_string()
            } else if let Some(rest) = trimmed.strip_prefix("* ") {
                format!("- {rest}")
            } else {
                trimmed.to_string()
            };
            format!("{indent}{body}")
        })
        .collect();
    out = lines.join("\n");

    out = strip_links(&out);
    out = out.replace('|', " ");
    out = out.replace("---", "");

    out.chars().map(fold_ascii).collect()
}

/// Rewrite `[text](url)` spans as bare text
fn strip_links(text: &str) -> String {
    let mut out = text.to_string();
    loop {
        let Some(open) = out.find('[') else { break };
        let Some(mid) = out[open..].find("](").map(|i| open + i) else {
            break;
        };
        let Some(close) = out[mid..].find(')').map(|i| mid + i) else {
            break;
        };
        let label = out[open + 1..mid].to_string();
        out.replace_range(open..=close, &label);
    }
    out
}

fn fold_ascii(c: char) -> char {
    match c {
        'à'..='å' => 'a',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ò'..='ö' => 'o',
        'ù'..='ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        c if c.is_ascii() || c == '\n' || c == '\t' => c,
        _ => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smart_punctuation() {
        assert_eq!(sanitize_text("\u{201C}quoted\u{201D}"), "'quoted'");
        assert_eq!(sanitize_text("it\u{2019}s"), "it's");
        assert_eq!(sanitize_text("a \u{2014} b"), "a - b");
        assert_eq!(sanitize_text("wait\u{2026}"), "wait...");
    }

    #[test]
    fn test_symbols() {
        assert_eq!(sanitize_text("5\u{00D7} growth"), "5x growth");
        assert_eq!(sanitize_text("\u{2264}10%"), "<=10%");
        assert_eq!(sanitize_text("Brand\u{2122}"), "Brand(TM)");
        assert_eq!(sanitize_text("\u{20AC}100"), "EUR100");
    }

    #[test]
    fn test_markdown_stripped() {
        assert_eq!(sanitize_text("**bold** and `code`"), "bold and code");
        assert_eq!(sanitize_text("## Heading\ntext"), "Heading\ntext");
        assert_eq!(sanitize_text("* item one\n* item two"), "- item one\n- item two");
    }

    #[test]
    fn test_links_become_text() {
        assert_eq!(
            sanitize_text("see [the filing](https://example.com/10k) today"),
            "see the filing today"
        );
        assert_eq!(
            sanitize_text("[a](x) and [b](y)"),
            "a and b"
        );
    }

    #[test]
    fn test_tables_and_rules_removed() {
        let input = "| Col A | Col B |\n---\nrow";
        let cleaned = sanitize_text(input);
        assert!(!cleaned.contains('|'));
        assert!(!cleaned.contains("---"));
    }

    #[test]
    fn test_accents_fold_to_ascii() {
        assert_eq!(sanitize_text("café"), "cafe");
        assert_eq!(sanitize_text("Señor"), "Senor");
        assert_eq!(sanitize_text("naïve"), "naive");
    }

    #[test]
    fn test_unknown_non_ascii_becomes_space() {
        assert_eq!(sanitize_text("a\u{4E2D}b"), "a b");
    }

    #[test]
    fn test_newlines_and_tabs_survive() {
        assert_eq!(sanitize_text("a\nb\tc"), "a\nb\tc");
    }
}
