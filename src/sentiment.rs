//! Best-effort sentiment hint for the system directive.
//!
//! Optional and advisory: the hint only annotates the directive sent to the
//! model. An analyzer that fails yields [`Sentiment::Unknown`] and never
//! blocks a turn.

use anyhow::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Unknown,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Unknown => "unknown",
        }
    }

    /// Line appended to the base directive
    pub fn directive_hint(&self) -> String {
        format!("\nDetected user sentiment: {}.", self.as_str())
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pluggable sentiment collaborator
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<Sentiment>;
}

/// Run an analyzer, mapping any failure to `Unknown`
pub fn analyze_or_unknown(analyzer: &dyn SentimentAnalyzer, text: &str) -> Sentiment {
    match analyzer.analyze(text) {
        Ok(sentiment) => sentiment,
        Err(e) => {
            tracing::debug!("Sentiment analysis failed, using unknown: {}", e);
            Sentiment::Unknown
        }
    }
}

const POSITIVE_WORDS: &[&str] = &[
    "happy", "great", "good", "glad", "excited", "grateful", "love", "better", "calm", "proud",
    "fun", "awesome", "relieved",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad", "bad", "awful", "terrible", "anxious", "angry", "stressed", "lonely", "tired",
    "worried", "scared", "hate", "cry", "upset", "hopeless", "overwhelmed",
];

/// Word-count heuristic: whichever list has more hits wins
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSentiment;

impl SentimentAnalyzer for KeywordSentiment {
    fn analyze(&self, text: &str) -> Result<Sentiment> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Ok(Sentiment::Unknown);
        }

        let positive = words.iter().filter(|w| POSITIVE_WORDS.contains(*w)).count();
        let negative = words.iter().filter(|w| NEGATIVE_WORDS.contains(*w)).count();

        Ok(match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl SentimentAnalyzer for Broken {
        fn analyze(&self, _text: &str) -> Result<Sentiment> {
            anyhow::bail!("model unavailable")
        }
    }

    #[test]
    fn test_keyword_sentiment() {
        let analyzer = KeywordSentiment;
        assert_eq!(analyzer.analyze("I feel great and happy").unwrap(), Sentiment::Positive);
        assert_eq!(analyzer.analyze("so tired and lonely today").unwrap(), Sentiment::Negative);
        assert_eq!(analyzer.analyze("I went to school").unwrap(), Sentiment::Neutral);
        assert_eq!(analyzer.analyze("   ").unwrap(), Sentiment::Unknown);
    }

    #[test]
    fn test_failure_defaults_to_unknown() {
        assert_eq!(analyze_or_unknown(&Broken, "anything"), Sentiment::Unknown);
    }

    #[test]
    fn test_directive_hint() {
        assert_eq!(
            Sentiment::Negative.directive_hint(),
            "\nDetected user sentiment: negative."
        );
    }
}
