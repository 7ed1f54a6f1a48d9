//! Batch classification pass.

use flash_core::Mention;

use crate::llm::LlmClient;
use crate::rules;

/// How a batch was labelled, for logging and the API payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyOutcome {
    pub llm_labeled: usize,
    pub rule_labeled: usize,
}

/// Label every unlabelled mention in place.
///
/// With a client, each mention goes to the hosted model first; a per-mention
/// failure falls back to the keyword rules so one flaky call never aborts
/// the batch. Without a client the rules label everything. Mentions that
/// already carry a label are left untouched (the inline-mentions API path).
pub async fn classify_mentions(
    client: Option<&LlmClient>,
    mentions: &mut [Mention],
) -> ClassifyOutcome {
    let mut outcome = ClassifyOutcome::default();

    for mention in &mut *mentions {
        if mention.sentiment.is_some() {
            continue;
        }
        let label = match client {
            Some(llm) => match llm.classify(&mention.text).await {
                Ok(label) => {
                    outcome.llm_labeled += 1;
                    label
                }
                Err(e) => {
                    tracing::warn!(error = %e, "LLM classification failed, using keyword rules");
                    outcome.rule_labeled += 1;
                    rules::classify(&mention.text)
                }
            },
            None => {
                outcome.rule_labeled += 1;
                rules::classify(&mention.text)
            }
        };
        mention.sentiment = Some(label);
    }

    tracing::info!(
        llm = outcome.llm_labeled,
        rules = outcome.rule_labeled,
        "sentiment classification complete"
    );
    outcome
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
            link: String::new(),
            mentioned_brands: vec![],
            authority: 5,
            reach: 10_000,
            likes: 0,
            comments: 0,
            sentiment: None,
        }
    }

    #[tokio::test]
    async fn without_a_client_the_rules_label_everything() {
        let mut mentions = vec![mention("an excellent launch"), mention("boycott brewing")];
        let outcome = classify_mentions(None, &mut mentions).await;
        assert_eq!(outcome.rule_labeled, 2);
        assert_eq!(outcome.llm_labeled, 0);
        assert_eq!(mentions[0].sentiment, Some(Sentiment::Positive));
        assert_eq!(mentions[1].sentiment, Some(Sentiment::Anger));
    }

    #[tokio::test]
    async fn already_labelled_mentions_are_untouched() {
        let mut labelled = mention("an excellent launch");
        labelled.sentiment = Some(Sentiment::Negative);
        let mut mentions = vec![labelled];
        let outcome = classify_mentions(None, &mut mentions).await;
        assert_eq!(outcome.rule_labeled, 0);
        assert_eq!(mentions[0].sentiment, Some(Sentiment::Negative));
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let mut mentions: Vec<Mention> = vec![];
        let outcome = classify_mentions(None, &mut mentions).await;
        assert_eq!(outcome, ClassifyOutcome::default());
    }
}
