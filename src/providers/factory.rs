// Provider factory
//
// Creates the chat-completion provider from configuration

use anyhow::Result;

use super::openai::OpenAIProvider;
use super::LlmProvider;
use crate::config::Config;

/// Create the configured provider; fails without an API key
pub fn create_provider(config: &Config) -> Result<Box<dyn LlmProvider>> {
    let api_key = config.require_api_key()?.to_string();

    let provider = OpenAIProvider::new(api_key, config.base_url.clone(), config.model.clone())?;
    tracing::debug!(base_url = %config.base_url, model = %config.model, "Created provider");

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BuddyError;

    #[test]
    fn test_create_openai_provider() {
        let config = Config {
            api_key: Some("test-key".to_string()),
            model: "gpt-4o-mini".to_string(),
            ..Default::default()
        };

        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.default_model(), "gpt-4o-mini");
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let err = create_provider(&Config::default()).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<BuddyError>(),
            Some(BuddyError::MissingApiKey)
        ));
    }
}
