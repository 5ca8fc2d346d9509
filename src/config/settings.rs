// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::BuddyError;
use crate::mood::SuggestionMode;
use crate::providers::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::session::CrisisPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Chat-completion API key (OPENAI_API_KEY takes precedence)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Stream replies fragment by fragment
    #[serde(default = "default_true")]
    pub streaming_enabled: bool,

    /// Most recent non-system turns sent with each call (0 = whole session)
    #[serde(default = "default_max_history_turns")]
    pub max_history_turns: usize,

    #[serde(default = "default_helplines_path")]
    pub helplines_path: PathBuf,

    /// Custom crisis pattern list; the built-in list is used when unset or unreadable
    #[serde(default)]
    pub crisis_patterns_path: Option<PathBuf>,

    #[serde(default)]
    pub crisis_policy: CrisisPolicy,

    /// Annotate the directive with a keyword sentiment hint
    #[serde(default)]
    pub sentiment_hint: bool,

    #[serde(default)]
    pub suggestions: SuggestionMode,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    350
}

fn default_true() -> bool {
    true
}

fn default_max_history_turns() -> usize {
    20
}

fn default_helplines_path() -> PathBuf {
    PathBuf::from("resources/helplines.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            streaming_enabled: default_true(),
            max_history_turns: default_max_history_turns(),
            helplines_path: default_helplines_path(),
            crisis_patterns_path: None,
            crisis_policy: CrisisPolicy::default(),
            sentiment_hint: false,
            suggestions: SuggestionMode::default(),
        }
    }
}

impl Config {
    /// The API key, or a fatal configuration error
    pub fn require_api_key(&self) -> Result<&str, BuddyError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(BuddyError::MissingApiKey)
    }

    /// Apply environment overrides using `lookup` (normally `std::env::var`)
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("OPENAI_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(url) = non_empty("OPENAI_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = non_empty("AI_BUDDY_MODEL") {
            self.model = model;
        }
    }
}
