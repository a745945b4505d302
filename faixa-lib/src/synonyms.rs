//! Part-name abbreviation table.
//!
//! Price lists abbreviate part names ("TQ ESQ") while image files tend to
//! spell them out ("TANQUE ESQUERDO"), or the other way round. Each entry
//! pairs a short form with its full form and matches in both directions.

use faixa_catalog::text::normalize;

/// Built-in pairs, used when the settings file does not provide its own.
pub const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("TQ", "TANQUE"),
    ("LAT", "LATERAL"),
    ("CAR", "CARENAGEM"),
    ("PLM", "PARALAMA"),
    ("RAB", "RABETA"),
    ("DIANT", "DIANTEIRO"),
    ("TRAS", "TRASEIRO"),
    ("ESQ", "ESQUERDO"),
    ("DIR", "DIREITO"),
    ("FRT", "FRONTAL"),
    ("CJ", "CONJUNTO"),
    ("TP", "TAMPA"),
    ("BAG", "BAGAGEIRO"),
];

/// Bidirectional abbreviation table over normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable {
    pairs: Vec<(String, String)>,
}

impl SynonymTable {
    /// Build a table from (short, long) pairs. Both sides are normalized.
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(a, b)| (normalize(a.as_ref()), normalize(b.as_ref())))
                .filter(|(a, b)| !a.is_empty() && !b.is_empty())
                .collect(),
        }
    }

    /// A table with no entries; only verbatim matches count.
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Every counterpart of `token`, looking at both sides of each pair.
    pub fn alternates<'a>(&'a self, token: &'a str) -> impl Iterator<Item = &'a str> {
        self.pairs.iter().filter_map(move |(short, long)| {
            if short == token {
                Some(long.as_str())
            } else if long == token {
                Some(short.as_str())
            } else {
                None
            }
        })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::new(DEFAULT_SYNONYMS.iter().copied())
    }
}
