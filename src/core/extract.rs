use crate::domain::model::ParserKind;
use crate::utils::error::Result;
use regex::Regex;

/// The first ten decimal places of Pi. Anchoring extraction on this prefix
/// avoids false matches against incidental numbers elsewhere in a page
/// (markup ids, dates, metadata).
pub const PI_ANCHOR: &str = "1415926535";

/// Dispatch a source's configured parsing strategy.
///
/// Returns `Ok(None)` when the content does not contain a usable digit
/// sequence; that is a per-source failure, not a run failure.
pub fn parse_decimals(kind: ParserKind, content: &str, places: usize) -> Result<Option<String>> {
    match kind {
        ParserKind::HtmlContinuous => parse_html_continuous(content, places),
        ParserKind::PlainText => parse_txt(content, places),
    }
}

/// Keep only the decimal digit characters of `text`.
pub fn extract_digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Parse pages with one continuous digit run: "3.14159265358979...".
///
/// Works for piday.org, damienelliott.com and similar formats. Returns the
/// decimal places without the leading "3.".
pub fn parse_html_continuous(content: &str, places: usize) -> Result<Option<String>> {
    // Anchored form first: "3." plus the known first ten decimals, followed
    // by a digit run long enough to cover the remaining places.
    let needed = places.saturating_sub(PI_ANCHOR.len());
    let anchored = Regex::new(&format!(r"3\.{}(\d+)", PI_ANCHOR))?;
    for caps in anchored.captures_iter(content) {
        let run = &caps[1];
        if run.len() >= needed {
            let mut decimals = String::with_capacity(PI_ANCHOR.len() + run.len());
            decimals.push_str(PI_ANCHOR);
            decimals.push_str(run);
            decimals.truncate(places);
            return Ok(Some(decimals));
        }
    }

    // Fall back to any "3." followed by a long enough run.
    let bare = Regex::new(r"3\.(\d+)")?;
    for caps in bare.captures_iter(content) {
        let run = &caps[1];
        if run.len() >= places {
            let mut decimals = run.to_string();
            decimals.truncate(places);
            return Ok(Some(decimals));
        }
    }

    Ok(None)
}

/// Parse plain-text digit tables.
///
/// These may interleave the digits with blank lines, dashed separators,
/// block markers ("*1") and trailing annotations ("<---- 50-th digit").
/// The stripping rules are deliberately source-specific and preserved as
/// observed, not generalized.
pub fn parse_txt(content: &str, places: usize) -> Result<Option<String>> {
    // Locate the start of the expansion, allowing whitespace between the
    // leading "3." and the first decimals.
    let anchor = Regex::new(&format!(r"3[.\s]*{}", PI_ANCHOR))?;
    let start = match anchor.find(content) {
        Some(m) => m.start(),
        None => return Ok(None),
    };

    let mut digits = String::with_capacity(places + 1);
    for line in content[start..].lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('*') || trimmed.starts_with('-') {
            continue;
        }

        // Cut trailing annotations and block markers.
        let mut line = line;
        if let Some(idx) = line.find('<') {
            line = &line[..idx];
        }
        if let Some(idx) = line.find('*') {
            line = &line[..idx];
        }

        digits.extend(line.chars().filter(|c| c.is_ascii_digit()));

        // +1 for the leading "3".
        if digits.len() >= places + 1 {
            break;
        }
    }

    let mut digits = match digits.strip_prefix('3') {
        Some(rest) => rest.to_string(),
        None => digits,
    };

    if digits.len() < places {
        return Ok(None);
    }
    digits.truncate(places);
    Ok(Some(digits))
}
