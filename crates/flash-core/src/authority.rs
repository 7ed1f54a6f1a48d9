//! Static outlet authority and reach tables.
//!
//! Unknown domains get a middle-of-the-road authority of 5 and a reach of
//! 10 000, matching how placeholder sources are weighted.

const AUTHORITY: &[(&str, u32)] = &[
    ("nytimes.com", 10),
    ("washingtonpost.com", 9),
    ("bbc.com", 9),
    ("bbc.co.uk", 9),
    ("reuters.com", 9),
    ("cnn.com", 8),
    ("ft.com", 8),
    ("bloomberg.com", 8),
    ("cnbc.com", 7),
    ("techcrunch.com", 7),
    ("theverge.com", 7),
    ("wired.com", 7),
    ("forbes.com", 7),
    ("statnews.com", 6),
    ("retaildive.com", 5),
];

const REACH: &[(&str, u64)] = &[
    ("nytimes.com", 1_000_000),
    ("bbc.com", 900_000),
    ("bbc.co.uk", 900_000),
    ("washingtonpost.com", 800_000),
    ("cnn.com", 700_000),
    ("reuters.com", 600_000),
    ("bloomberg.com", 500_000),
    ("ft.com", 400_000),
    ("cnbc.com", 350_000),
    ("forbes.com", 300_000),
    ("techcrunch.com", 200_000),
    ("theverge.com", 200_000),
    ("wired.com", 150_000),
];

pub const DEFAULT_AUTHORITY: u32 = 5;
pub const DEFAULT_REACH: u64 = 10_000;

/// Authority weight (1-10) for a source domain.
#[must_use]
pub fn source_authority(domain: &str) -> u32 {
    AUTHORITY
        .iter()
        .find(|(d, _)| *d == domain)
        .map_or(DEFAULT_AUTHORITY, |(_, a)| *a)
}

/// Estimated audience size for a source domain.
#[must_use]
pub fn source_reach(domain: &str) -> u64 {
    REACH
        .iter()
        .find(|(d, _)| *d == domain)
        .map_or(DEFAULT_REACH, |(_, r)| *r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_outlet_has_table_values() {
        assert_eq!(source_authority("nytimes.com"), 10);
        assert_eq!(source_reach("nytimes.com"), 1_000_000);
    }

    #[test]
    fn unknown_outlet_gets_defaults() {
        assert_eq!(source_authority("smallblog.example"), DEFAULT_AUTHORITY);
        assert_eq!(source_reach("smallblog.example"), DEFAULT_REACH);
    }
}
