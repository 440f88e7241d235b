//! Number, date and column formatting.
//!
//! The column helpers are ANSI-aware: escape codes are kept in the output but
//! never count toward display width.

use chrono::{DateTime, Utc};
use console::{measure_text_width, pad_str, Alignment};
use unicode_width::UnicodeWidthChar;

/// Date format of "last commit" cells.
pub const COMMIT_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

const SUFFIXES: [(f64, &str); 3] = [(1e6, "M"), (1e3, "k"), (1.0, "")];

/// Compact notation with `k`/`M` suffixes.
///
/// The scaled value is rounded to `digits` decimals and trailing zeros are
/// dropped. Anything below 1 renders as `"0"`.
///
/// ```
/// use repodeck::format::format_number;
///
/// assert_eq!(format_number(1234.0, 1), "1.2k");
/// assert_eq!(format_number(2_000_000.0, 1), "2M");
/// assert_eq!(format_number(999.0, 1), "999");
/// assert_eq!(format_number(0.0, 1), "0");
/// ```
pub fn format_number(num: f64, digits: usize) -> String {
    let Some((scale, symbol)) = SUFFIXES.iter().find(|(scale, _)| num >= *scale) else {
        return "0".to_string();
    };
    let scaled = round_number(num / scale, digits);
    let mut text = format!("{scaled:.digits$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    text.push_str(symbol);
    text
}

/// Rounds to `digits` decimals, ties away from zero.
pub fn round_number(num: f64, digits: usize) -> f64 {
    let factor = 10f64.powi(digits.min(15) as i32);
    (num * factor).round() / factor
}

/// Parses an RFC 3339 timestamp and formats it (in UTC) with `fmt`.
pub fn fmt_iso(iso: &str, fmt: &str) -> Result<String, chrono::ParseError> {
    let parsed = DateTime::parse_from_rfc3339(iso)?;
    Ok(parsed.with_timezone(&Utc).format(fmt).to_string())
}

/// Display width in terminal columns.
pub fn display_width(s: &str) -> usize {
    measure_text_width(s)
}

/// Cuts `s` to `max_width` columns, ending with `ellipsis` when shortened.
pub fn truncate_end(s: &str, max_width: usize, ellipsis: &str) -> String {
    if measure_text_width(s) <= max_width {
        return s.to_string();
    }
    let ellipsis_width = measure_text_width(ellipsis);
    if max_width <= ellipsis_width {
        return take_width(ellipsis, max_width);
    }
    let mut out = take_width(s, max_width - ellipsis_width);
    out.push_str(ellipsis);
    out
}

pub fn pad_right(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Left, None).into_owned()
}

pub fn pad_left(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Right, None).into_owned()
}

/// Truncates or pads `s` to exactly `width` columns.
pub fn fit(s: &str, width: usize, align: Alignment) -> String {
    let cut = truncate_end(s, width, "…");
    pad_str(&cut, width, align, None).into_owned()
}

// Longest prefix of at most `max_width` columns. Escape sequences are copied
// through whole.
fn take_width(s: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
            out.push(c);
            continue;
        }
        if in_escape {
            out.push(c);
            if c.is_ascii_alphabetic() || c == '~' {
                in_escape = false;
            }
            continue;
        }
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out
}
