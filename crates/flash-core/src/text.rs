//! Small text helpers shared by the fetchers and the analyzers.

/// Collapse whitespace runs and strip punctuation, keeping word characters.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else if ch.is_alphanumeric() || ch == '_' {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}

/// Crude host extraction from a URL, with any `www.` prefix removed.
///
/// Falls back to the input itself when there is nothing that looks like a
/// host, so callers always get a non-empty source label.
#[must_use]
pub fn domain_from_url(url: &str) -> String {
    let after_scheme = url.rsplit("//").next().unwrap_or(url);
    let host = after_scheme.split('/').next().unwrap_or(after_scheme);
    let host = host.split('?').next().unwrap_or(host).to_lowercase();
    let trimmed = host.trim_start_matches("www.");
    if trimmed.is_empty() {
        url.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("a  b\t\nc"), "a b c");
    }

    #[test]
    fn clean_text_strips_punctuation() {
        assert_eq!(clean_text("Hello, world! It's 9am."), "Hello world Its 9am");
    }

    #[test]
    fn clean_text_empty_input() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn domain_from_url_strips_scheme_path_and_www() {
        assert_eq!(
            domain_from_url("https://www.nytimes.com/2026/01/02/business/x.html"),
            "nytimes.com"
        );
        assert_eq!(domain_from_url("http://bbc.com"), "bbc.com");
    }

    #[test]
    fn domain_from_url_handles_bare_host() {
        assert_eq!(domain_from_url("TechCrunch.com/feed"), "techcrunch.com");
    }

    #[test]
    fn domain_from_url_query_only_urls() {
        assert_eq!(
            domain_from_url("https://news.example.org?id=1"),
            "news.example.org"
        );
    }
}
