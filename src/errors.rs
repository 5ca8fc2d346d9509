// Error taxonomy and user-friendly error messages
//
// Configuration errors are fatal at startup. Gateway errors are recovered in
// the session and shown as a fixed apology. Resource-load errors fall back
// to built-in data. The crisis classifier never errors.

use thiserror::Error;

/// Shown instead of any raw gateway error
pub const GATEWAY_APOLOGY: &str =
    "Sorry, I'm having trouble connecting right now. Please try again in a moment.";

#[derive(Debug, Error)]
pub enum BuddyError {
    #[error("No API key configured for the chat-completion service")]
    MissingApiKey,

    #[error("Failed to parse config file: {0}")]
    ConfigParse(String),

    #[error("Model gateway error: {0}")]
    Gateway(String),

    #[error("Model reply stream ended before completion")]
    StreamInterrupted,

    #[error("Failed to load resource {path}: {reason}")]
    ResourceLoad { path: String, reason: String },
}

impl BuddyError {
    /// Fatal errors stop the program before a session starts
    pub fn is_fatal(&self) -> bool {
        matches!(self, BuddyError::MissingApiKey | BuddyError::ConfigParse(_))
    }
}

/// Format a missing API key error with setup guidance
pub fn api_key_missing_error() -> String {
    "OpenAI API key not found\n\n\
    \x1b[1;32mTry:\x1b[0m\n\
    1. Export it for this shell:\n\
       \x1b[36mexport OPENAI_API_KEY=\"sk-...\"\x1b[0m\n\n\
    2. Or add it to your config file:\n\
       \x1b[36m~/.ai-buddy/config.toml\x1b[0m\n\
       api_key = \"sk-...\"\n\n\
    3. Get a key:\n\
       https://platform.openai.com/api-keys\n\n\
    Commands that never call the model still work without a key:\n\
       \x1b[36mai-buddy suggest <mood>\x1b[0m, \x1b[36mai-buddy helplines\x1b[0m, \x1b[36mai-buddy check <text>\x1b[0m"
        .to_string()
}

/// Format a config parse error with helpful suggestions
pub fn config_parse_error(error: &str) -> String {
    format!(
        "Failed to parse config file\n\n\
        \x1b[1;33mError:\x1b[0m {}\n\n\
        \x1b[1;32mTry:\x1b[0m\n\
        1. Check config file syntax:\n\
           \x1b[36mcat ~/.ai-buddy/config.toml\x1b[0m\n\n\
        2. Common mistakes:\n\
           • Missing quotes around strings\n\
           • Numbers written as strings (max_tokens = 350, not \"350\")\n\
           • crisis_policy must be \"short_circuit\" or \"amend_directive\"",
        error
    )
}

/// User-facing text for a fatal startup error
pub fn describe_fatal(error: &anyhow::Error) -> String {
    match error.downcast_ref::<BuddyError>() {
        Some(e) if e.is_fatal() => match e {
            BuddyError::ConfigParse(msg) => config_parse_error(msg),
            _ => api_key_missing_error(),
        },
        _ => format!("{:#}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_missing_has_env_var() {
        let msg = api_key_missing_error();
        assert!(msg.contains("OPENAI_API_KEY"));
        assert!(msg.contains("config.toml"));
    }

    #[test]
    fn test_config_parse_error_includes_cause() {
        let msg = config_parse_error("expected an integer");
        assert!(msg.contains("expected an integer"));
    }

    #[test]
    fn test_fatal_classification() {
        assert!(BuddyError::MissingApiKey.is_fatal());
        assert!(BuddyError::ConfigParse("x".into()).is_fatal());
        assert!(!BuddyError::Gateway("timeout".into()).is_fatal());
        assert!(!BuddyError::StreamInterrupted.is_fatal());
    }

    #[test]
    fn test_describe_fatal_missing_key() {
        let err: anyhow::Error = BuddyError::MissingApiKey.into();
        assert!(describe_fatal(&err).contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_describe_fatal_config_parse() {
        let err: anyhow::Error = BuddyError::ConfigParse("expected a string".into()).into();
        let text = describe_fatal(&err);
        assert!(text.contains("expected a string"));
        assert!(text.contains("crisis_policy"));
    }

    #[test]
    fn test_describe_non_fatal_is_plain() {
        let err: anyhow::Error = BuddyError::Gateway("timeout".into()).into();
        assert_eq!(describe_fatal(&err), "Model gateway error: timeout");
    }

    #[test]
    fn test_apology_has_no_error_detail() {
        assert!(!GATEWAY_APOLOGY.contains("error"));
    }
}
