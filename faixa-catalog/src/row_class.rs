//! Row classification: data, separator, or in-band brand header.

use crate::text::{normalize, tokens};
use crate::types::RawRow;

/// What a spreadsheet row means to the block segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Data,
    /// Blank row (price zero or empty) that closes the open block.
    Separator,
    /// A lone brand name in the model column of the catch-all sheet.
    BrandHeader,
}

/// Rules for recognizing brand-header rows.
///
/// A header candidate is vetoed when its normalized text contains any of the
/// exclusion tokens. Tokens are compared in normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRules {
    exclusions: Vec<String>,
}

impl HeaderRules {
    pub fn new<I, S>(exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            exclusions: exclusions
                .into_iter()
                .map(|s| normalize(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    fn is_excluded(&self, normalized: &str) -> bool {
        tokens(normalized).any(|t| self.exclusions.iter().any(|e| e == t))
    }
}

impl Default for HeaderRules {
    fn default() -> Self {
        Self::new(["KIT"])
    }
}

/// Classify a row. Brand headers are only recognized on the catch-all sheet.
///
/// The header test is a heuristic: a row whose only content is model text
/// without any digit is taken as a brand name. Brand names that contain a
/// digit or an exclusion token are read as data rows.
pub fn classify(row: &RawRow, sheet_is_catch_all: bool, rules: &HeaderRules) -> RowKind {
    let blank_except_model = row.color.is_empty()
        && row.part.is_empty()
        && row.location.is_empty()
        && row.reference.is_empty()
        && row.price_is_zero();

    if blank_except_model && row.model.is_empty() {
        return RowKind::Separator;
    }

    if sheet_is_catch_all && blank_except_model && row.element.is_empty() {
        let normalized = normalize(&row.model);
        if !normalized.chars().any(|c| c.is_ascii_digit()) && !rules.is_excluded(&normalized) {
            return RowKind::BrandHeader;
        }
    }

    RowKind::Data
}
