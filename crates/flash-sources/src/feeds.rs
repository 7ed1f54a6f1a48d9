//! Industry → RSS feed table, with an optional YAML override file.

use std::collections::HashMap;
use std::path::Path;

use crate::error::SourceError;

const DEFAULT_INDUSTRY: &str = "default";

const BUILTIN_FEEDS: &[(&str, &[&str])] = &[
    (
        "default",
        &[
            "http://feeds.bbci.co.uk/news/rss.xml",
            "http://rss.cnn.com/rss/edition.rss",
            "http://feeds.reuters.com/reuters/topNews",
            "http://feeds.feedburner.com/TechCrunch/",
        ],
    ),
    (
        "tech",
        &[
            "http://feeds.feedburner.com/TechCrunch/",
            "https://www.theverge.com/rss/index.xml",
            "https://www.wired.com/feed/rss",
        ],
    ),
    (
        "finance",
        &[
            "https://www.ft.com/?format=rss",
            "https://www.cnbc.com/id/100003114/device/rss/rss.html",
        ],
    ),
    (
        "healthcare",
        &[
            "https://www.statnews.com/feed/",
            "https://www.medicalnewstoday.com/rss",
        ],
    ),
    (
        "retail",
        &[
            "https://www.retaildive.com/rss/all/",
            "https://www.forbes.com/retail/feed2/",
        ],
    ),
];

/// Maps industry slugs to the RSS feeds worth polling for that industry.
#[derive(Debug, Clone)]
pub struct FeedTable {
    feeds: HashMap<String, Vec<String>>,
}

impl FeedTable {
    /// The built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        let feeds = BUILTIN_FEEDS
            .iter()
            .map(|(industry, urls)| {
                (
                    (*industry).to_string(),
                    urls.iter().map(|u| (*u).to_string()).collect(),
                )
            })
            .collect();
        Self { feeds }
    }

    /// Load a table from a YAML file mapping industry slugs to URL lists.
    ///
    /// The file must contain a `default` entry; industries absent from the
    /// file fall back to it at lookup time.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] when the file cannot be read,
    /// [`SourceError::FeedTable`] when it does not parse or lacks `default`.
    pub fn from_yaml_file(path: &Path) -> Result<Self, SourceError> {
        let raw = std::fs::read_to_string(path)?;
        let feeds: HashMap<String, Vec<String>> = serde_yaml::from_str(&raw)
            .map_err(|e| SourceError::FeedTable(format!("{}: {e}", path.display())))?;
        if !feeds.contains_key(DEFAULT_INDUSTRY) {
            return Err(SourceError::FeedTable(format!(
                "{}: missing required 'default' entry",
                path.display()
            )));
        }
        Ok(Self { feeds })
    }

    /// Load from the optional override file, falling back to the built-in
    /// table (with a warning) when the file is missing or invalid.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(p) => match Self::from_yaml_file(p) {
                Ok(table) => table,
                Err(e) => {
                    tracing::warn!(error = %e, "feeds file unusable, using built-in feed table");
                    Self::builtin()
                }
            },
            None => Self::builtin(),
        }
    }

    /// Feeds for an industry slug, falling back to `default`.
    #[must_use]
    pub fn feeds_for(&self, industry: Option<&str>) -> &[String] {
        industry
            .map(str::to_lowercase)
            .and_then(|i| self.feeds.get(&i))
            .or_else(|| self.feeds.get(DEFAULT_INDUSTRY))
            .map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_default_and_industries() {
        let table = FeedTable::builtin();
        assert!(!table.feeds_for(None).is_empty());
        assert!(!table.feeds_for(Some("tech")).is_empty());
    }

    #[test]
    fn unknown_industry_falls_back_to_default() {
        let table = FeedTable::builtin();
        assert_eq!(table.feeds_for(Some("aerospace")), table.feeds_for(None));
    }

    #[test]
    fn industry_lookup_is_case_insensitive() {
        let table = FeedTable::builtin();
        assert_eq!(table.feeds_for(Some("Tech")), table.feeds_for(Some("tech")));
    }

    #[test]
    fn yaml_without_default_is_rejected() {
        let dir = std::env::temp_dir().join(format!("flash-feeds-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("feeds.yaml");
        std::fs::write(&path, "tech:\n  - https://example.com/feed.xml\n").expect("write");
        let result = FeedTable::from_yaml_file(&path);
        assert!(matches!(result, Err(SourceError::FeedTable(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn yaml_override_is_used_when_valid() {
        let dir = std::env::temp_dir().join(format!("flash-feeds-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("feeds.yaml");
        std::fs::write(
            &path,
            "default:\n  - https://example.com/feed.xml\nenergy:\n  - https://example.com/energy.xml\n",
        )
        .expect("write");
        let table = FeedTable::load(Some(&path));
        assert_eq!(
            table.feeds_for(Some("energy")),
            ["https://example.com/energy.xml".to_string()]
        );
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_override_file_falls_back_to_builtin() {
        let table = FeedTable::load(Some(Path::new("/nonexistent/feeds.yaml")));
        assert!(!table.feeds_for(None).is_empty());
    }
}
