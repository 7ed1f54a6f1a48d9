//! Spreadsheet export of the mention table.
//!
//! Plain RFC-4180-style CSV written locally: fields containing commas,
//! quotes, or newlines are quoted, with embedded quotes doubled.

use flash_core::Mention;

const HEADER: &str =
    "text,source,channel,published_at,link,mentioned_brands,authority,reach,likes,comments,sentiment";

#[must_use]
pub fn render_csv(mentions: &[Mention]) -> String {
    let mut out = String::with_capacity(mentions.len() * 120 + HEADER.len());
    out.push_str(HEADER);
    out.push('\n');

    for m in mentions {
        let channel = match m.channel {
            flash_core::Channel::News => "news",
            flash_core::Channel::Social => "social",
        };
        let row = [
            escape(&m.text),
            escape(&m.source),
            channel.to_string(),
            m.published_at.to_rfc3339(),
            escape(&m.link),
            escape(&m.mentioned_brands.join("; ")),
            m.authority.to_string(),
            m.reach.to_string(),
            m.likes.to_string(),
            m.comments.to_string(),
            m.sentiment.map(|s| s.as_str().to_string()).unwrap_or_default(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use flash_core::{Channel, Sentiment};

    fn mention(text: &str) -> Mention {
        Mention {
            text: text.to_string(),
            source: "example.com".to_string(),
            channel: Channel::News,
            published_at: Utc::now(),
            link: "https://example.com/a".to_string(),
            mentioned_brands: vec!["BrandX".to_string(), "Rival".to_string()],
            authority: 7,
            reach: 10_000,
            likes: 3,
            comments: 1,
            sentiment: Some(Sentiment::Positive),
        }
    }

    #[test]
    fn renders_header_and_one_row_per_mention() {
        let csv = render_csv(&[mention("plain headline"), mention("another one")]);
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.starts_with("text,source,channel"));
        assert!(csv.contains("BrandX; Rival"));
        assert!(csv.contains(",positive"));
    }

    #[test]
    fn commas_and_quotes_are_escaped() {
        let csv = render_csv(&[mention("she said \"hello, world\"")]);
        assert!(csv.contains("\"she said \"\"hello, world\"\"\""));
    }

    #[test]
    fn newlines_are_quoted() {
        let csv = render_csv(&[mention("line one\nline two")]);
        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn unlabelled_sentiment_is_an_empty_field() {
        let mut m = mention("plain");
        m.sentiment = None;
        let csv = render_csv(&[m]);
        let row = csv.lines().nth(1).expect("data row");
        assert!(row.ends_with(','));
    }

    #[test]
    fn empty_input_is_header_only() {
        let csv = render_csv(&[]);
        assert_eq!(csv.lines().count(), 1);
    }
}
