//! Model-year normalization.
//!
//! Price lists spell model years either as two digits ("HAYABUSA 08") or
//! four ("HAYABUSA 2008"). The four-digit form is canonical and becomes part
//! of the natural key; the two-digit form is kept as a legacy alias so rows
//! stored before the format change can still be found.

/// Result of normalizing a model string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelYear {
    /// Model with a four-digit year, or the input unchanged.
    pub canonical: String,
    pub year: Option<i32>,
    /// Two-digit spelling of the same model, when a year was found.
    pub legacy: Option<String>,
}

/// Two-digit years at or above this value belong to the 1900s.
pub const CENTURY_PIVOT: i32 = 50;

/// Normalize the trailing year token of a model string.
///
/// # Examples
///
/// ```
/// use faixa_catalog::model_year::normalize_model;
///
/// let m = normalize_model("HAYABUSA 08");
/// assert_eq!(m.canonical, "HAYABUSA 2008");
/// assert_eq!(m.year, Some(2008));
/// assert_eq!(m.legacy.as_deref(), Some("HAYABUSA 08"));
///
/// let m = normalize_model("CB 500 2019");
/// assert_eq!(m.canonical, "CB 500 2019");
/// assert_eq!(m.legacy.as_deref(), Some("CB 500 19"));
///
/// let m = normalize_model("GSX 750");
/// assert_eq!(m.year, None);
/// assert_eq!(m.legacy, None);
/// ```
pub fn normalize_model(text: &str) -> ModelYear {
    let original = text.trim();
    let tokens: Vec<&str> = original.split_whitespace().collect();

    let unchanged = ModelYear {
        canonical: original.to_string(),
        year: None,
        legacy: None,
    };

    let Some((last, head)) = tokens.split_last() else {
        return unchanged;
    };

    if let Some(short) = parse_digits(last, 2) {
        let year = if short >= CENTURY_PIVOT {
            1900 + short
        } else {
            2000 + short
        };
        return ModelYear {
            canonical: join_with(head, &year.to_string()),
            year: Some(year),
            legacy: Some(original.to_string()),
        };
    }

    if let Some(year) = parse_digits(last, 4)
        && (last.starts_with("19") || last.starts_with("20"))
    {
        return ModelYear {
            canonical: original.to_string(),
            year: Some(year),
            legacy: Some(join_with(head, &format!("{:02}", year % 100))),
        };
    }

    unchanged
}

/// Parse a token made of exactly `len` ASCII digits.
fn parse_digits(token: &str, len: usize) -> Option<i32> {
    if token.len() == len && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

fn join_with(head: &[&str], last: &str) -> String {
    let mut parts = head.to_vec();
    parts.push(last);
    parts.join(" ")
}
