// System directive selection and user message framing

use crate::crisis::CrisisEvidence;
use crate::mood::MoodLabel;
use crate::sentiment::Sentiment;

/// Directive every session starts from
pub const BASE_DIRECTIVE: &str = "You are AI Buddy, a compassionate, non-judgmental conversational assistant. \
Your job is to listen actively, reflect feelings, validate the user's experience, and offer short, \
practical coping strategies or resources.\n\
Keep replies concise (2-4 short paragraphs), empathetic, and avoid medical jargon. Encourage seeking \
professional help when appropriate, and clearly advise contacting emergency services if the user \
appears to be in danger.";

/// Appended to the base directive once crisis language has been seen
pub const SAFETY_ADDENDUM: &str = "\nNOTE: The user may be in crisis. Prioritize calm, supportive language \
and encourage seeking immediate help. Do NOT provide instructions for self-harm. Give crisis resources \
and encourage contacting professionals.";

const USER_INSTRUCTIONS: &str = "Instructions for the assistant: respond as a calm, empathetic peer. \
Offer one short supportive reflection, one coping suggestion, and one resource/action the user can take next.";

/// The directive sent to the model for one call
pub fn effective_directive(base: &str, evidence: &CrisisEvidence) -> String {
    if evidence.flagged {
        format!("{}{}", base, SAFETY_ADDENDUM)
    } else {
        base.to_string()
    }
}

/// Like [`effective_directive`], annotating unflagged calls with a sentiment hint
///
/// `Unknown` adds nothing.
pub fn effective_directive_with_sentiment(
    base: &str,
    evidence: &CrisisEvidence,
    sentiment: Sentiment,
) -> String {
    if evidence.flagged || sentiment == Sentiment::Unknown {
        return effective_directive(base, evidence);
    }
    format!("{}{}", base, sentiment.directive_hint())
}

/// User message as sent to the model, carrying the selected mood
pub fn frame_user_message(mood: MoodLabel, text: &str) -> String {
    format!("MOOD: {}\nUser says: {}\n\n{}", mood.display_label(), text, USER_INSTRUCTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flagged() -> CrisisEvidence {
        CrisisEvidence {
            flagged: true,
            matches: vec!["want to die".to_string()],
        }
    }

    #[test]
    fn test_flagged_contains_addendum() {
        let directive = effective_directive(BASE_DIRECTIVE, &flagged());
        assert!(directive.starts_with(BASE_DIRECTIVE));
        assert!(directive.contains(SAFETY_ADDENDUM));
    }

    #[test]
    fn test_unflagged_is_unchanged() {
        let directive = effective_directive(BASE_DIRECTIVE, &CrisisEvidence::not_flagged());
        assert_eq!(directive, BASE_DIRECTIVE);
        assert!(!directive.contains(SAFETY_ADDENDUM));
    }

    #[test]
    fn test_sentiment_hint_only_when_unflagged() {
        let hinted = effective_directive_with_sentiment(
            "base",
            &CrisisEvidence::not_flagged(),
            Sentiment::Negative,
        );
        assert_eq!(hinted, "base\nDetected user sentiment: negative.");
        assert!(!hinted.contains(SAFETY_ADDENDUM));

        let crisis = effective_directive_with_sentiment("base", &flagged(), Sentiment::Negative);
        assert!(crisis.contains(SAFETY_ADDENDUM));
        assert!(!crisis.contains("Detected user sentiment"));
    }

    #[test]
    fn test_unknown_sentiment_adds_nothing() {
        let directive = effective_directive_with_sentiment(
            "base",
            &CrisisEvidence::not_flagged(),
            Sentiment::Unknown,
        );
        assert_eq!(directive, "base");
    }

    #[test]
    fn test_frame_user_message() {
        let framed = frame_user_message(MoodLabel::Anxious, "exams tomorrow");
        assert!(framed.starts_with("MOOD: 😨 Anxious\nUser says: exams tomorrow\n\n"));
        assert!(framed.ends_with("one resource/action the user can take next."));
    }
}
