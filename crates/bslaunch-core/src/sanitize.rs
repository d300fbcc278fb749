//! Sanitizing of raw form input
//!
//! Field values may be interpolated into displayed links or written to the
//! config store, so every text field is HTML-escaped before use.

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Parse a port using integer-prefix semantics.
///
/// Leading whitespace and an optional sign are accepted, then as many
/// decimal digits as follow (`"8080abc"` parses as 8080). Returns `None` for
/// zero, negative, out-of-range or non-numeric input so the caller falls back
/// to its default.
pub fn parse_port(input: &str) -> Option<u16> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() || negative {
        return None;
    }

    match digits.parse::<u32>() {
        Ok(0) => None,
        Ok(port) => u16::try_from(port).ok(),
        Err(_) => None,
    }
}
