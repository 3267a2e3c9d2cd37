//! Value Parsing and Display
//!
//! Sheet cells are free-typed: `"15,750"`, `"$\mathbf{5,250}$"`, `"12.5%"`.
//! These helpers turn them into numbers and back into display strings.

use regex::Regex;
use std::sync::OnceLock;

/// Placeholder shown when a value cannot be computed
pub const DASH: &str = "—";

/// Parse a loosely formatted number.
///
/// Commas and spaces are dropped, then every character other than digits,
/// `.` and `-`. Returns `None` for empty or unparsable input.
pub fn parse_number(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok()
}

/// Thousands-separated fixed-point rendering, e.g. `1234567.5` → `1,234,567.50`
pub fn fmt_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let raw = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Parse then format as money; "" when the value is not numeric
pub fn fmt_money(value: &str, decimals: usize) -> String {
    parse_number(value)
        .map(|n| fmt_grouped(n, decimals))
        .unwrap_or_default()
}

/// Whole-number display, e.g. `15750.0` → `15,750`
pub fn format_number(value: f64) -> String {
    fmt_grouped(value, 0)
}

/// Percentage display. Values within ±1 are ratios and get scaled by 100.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        None => DASH.to_string(),
        Some(v) => {
            let pct = if v.abs() <= 1.0 { v * 100.0 } else { v };
            format!("{:.1}%", pct)
        }
    }
}

/// Strip the LaTeX math markup some cells are typed with:
/// `$17\%$` style wrappers, `\mathbf{..}` and `\rightarrow`.
pub fn clean_latex_math(text: &str) -> String {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    static INLINE: OnceLock<Regex> = OnceLock::new();

    let bold = BOLD.get_or_init(|| Regex::new(r"\\mathbf\{([^}]*)\}").expect("valid regex"));
    let inline = INLINE.get_or_init(|| Regex::new(r"\$(.*?)\$").expect("valid regex"));

    let text = bold.replace_all(text, "$1");
    let text = text.replace(r"\rightarrow", "→");
    let text = inline.replace_all(&text, "$1");
    text.trim().to_string()
}

/// CRLF and lone CR become LF
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split a review cell into its bullet lines
pub fn parse_review_text(text: &str) -> Vec<String> {
    normalize_newlines(text)
        .lines()
        .map(strip_bullet)
        .filter(|line| !is_blank(line))
        .map(String::from)
        .collect()
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    for marker in ["•", "-", "*", "–"] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim_start();
        }
    }

    // Numbered items: "1." or "1)"
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            if rest.starts_with(' ') || rest.is_empty() {
                return rest.trim_start();
            }
        }
    }
    line
}

/// Empty, whitespace-only or a spreadsheet `nan`
pub fn is_blank(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

/// Cell text with blanks mapped to ""
pub fn display_cell(value: &str) -> String {
    if is_blank(value) {
        String::new()
    } else {
        value.to_string()
    }
}

/// Whether the text holds a run of at least `len` consecutive digits
pub fn has_digit_run(text: &str, len: usize) -> bool {
    let mut run = 0;
    for ch in text.chars() {
        if ch.is_numeric() {
            run += 1;
            if run >= len {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("15,750"), Some(15750.0));
        assert_eq!(parse_number("$\\mathbf{5,250}$"), Some(5250.0));
        assert_eq!(parse_number(" 12.5 % "), Some(12.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("1.2.3"), None);
    }

    #[test]
    fn test_fmt_grouped() {
        assert_eq!(fmt_grouped(1234567.5, 2), "1,234,567.50");
        assert_eq!(fmt_grouped(999.0, 0), "999");
        assert_eq!(fmt_grouped(1000.0, 0), "1,000");
        assert_eq!(fmt_grouped(-15750.4, 0), "-15,750");
        assert_eq!(fmt_grouped(0.0, 2), "0.00");
        assert_eq!(fmt_grouped(12.345, 1), "12.3");
    }

    #[test]
    fn test_fmt_money() {
        assert_eq!(fmt_money("1,250,000", 2), "1,250,000.00");
        assert_eq!(fmt_money("abc", 2), "");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(0.354)), "35.4%");
        assert_eq!(format_percent(Some(42.0)), "42.0%");
        assert_eq!(format_percent(None), DASH);
    }

    #[test]
    fn test_clean_latex_math() {
        assert_eq!(clean_latex_math("$17\\%$ growth"), "17\\% growth");
        assert_eq!(clean_latex_math(" \\mathbf{5,250} \\rightarrow 6,000 "), "5,250 → 6,000");
        assert_eq!(clean_latex_math("$\\mathbf{42}$"), "42");
    }

    #[test]
    fn test_parse_review_text() {
        let parsed = parse_review_text("- Influencer bundles\r\n• Faster dispatch\r\n\r\n2. Free shipping\nplain line");
        assert_eq!(
            parsed,
            vec!["Influencer bundles", "Faster dispatch", "Free shipping", "plain line"]
        );
        assert!(parse_review_text("nan").is_empty());
    }

    #[test]
    fn test_has_digit_run() {
        assert!(has_digit_run("revenue 1500 plan", 3));
        assert!(!has_digit_run("grew 12% in Q4", 3));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank("  "));
        assert!(is_blank("NaN"));
        assert!(!is_blank("0"));
    }
}
