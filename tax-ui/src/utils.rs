use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^0-9]").expect("constant pattern is valid"));

/// Maps Persian (U+06F0..) and Arabic-Indic (U+0660..) digits to ASCII.
fn normalize_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            _ => c,
        })
        .collect()
}

/// Parses a free-text amount by keeping only its digits.
///
/// Separators, currency words and signs are discarded, so `"1,250,000 IRR"`
/// gives `1250000` and `"-5"` gives `5`. Input with no digits is treated as
/// 0; a digit run too long for an `i64` saturates at `i64::MAX` (logged as
/// a warning).
pub fn parse_number(s: &str) -> i64 {
    let normalized = normalize_digits(s);
    let digits = NON_DIGITS.replace_all(&normalized, "");
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or_else(|e| {
        tracing::warn!(input = %s, "number out of range, saturating: {}", e);
        i64::MAX
    })
}

/// Formats a Rial amount with thousands separators, e.g. `"1,250,000 IRR"`.
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-{grouped} IRR")
    } else {
        format!("{grouped} IRR")
    }
}

/// Deserializes a form field written either as text or as a bare number.
pub fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Integer(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}
