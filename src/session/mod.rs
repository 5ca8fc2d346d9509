// Conversation state management
//
// One `Session` per user. A turn is classified, recorded, and (unless the
// crisis policy stops it) sent to the model with the effective directive.

mod conversation;
mod directive;
mod state;

pub use conversation::{ConversationLog, Turn};
pub use directive::{
    effective_directive, effective_directive_with_sentiment, frame_user_message, BASE_DIRECTIVE,
    SAFETY_ADDENDUM,
};
pub use state::{MoodEntry, SessionState};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::crisis::{CrisisDetector, CrisisEvidence};
use crate::errors::{BuddyError, GATEWAY_APOLOGY};
use crate::mood::MoodLabel;
use crate::providers::{collect_stream, LlmProvider, ProviderRequest};
use crate::sentiment::{analyze_or_unknown, KeywordSentiment, SentimentAnalyzer};
use crate::streak::StreakState;

/// What happens to a turn that contains crisis language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisPolicy {
    /// Show crisis resources and skip the model call for that turn
    #[default]
    ShortCircuit,
    /// Still call the model, with the safety addendum in the directive
    AmendDirective,
}

/// Model-call settings for a session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub streaming: bool,
    /// 0 sends the whole conversation
    pub max_history_turns: usize,
    pub crisis_policy: CrisisPolicy,
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            streaming: config.streaming_enabled,
            max_history_turns: config.max_history_turns,
            crisis_policy: config.crisis_policy,
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Blank input; nothing recorded
    Ignored,
    /// Crisis language under `ShortCircuit`; the model was not called
    CrisisResources,
    /// Complete model reply, already appended to the log
    Reply(String),
    /// The model call failed; the user turn is kept, no reply is recorded
    GatewayFailed(String),
}

/// Everything the front-end needs to render one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub evidence: CrisisEvidence,
    pub streak: StreakState,
    pub outcome: TurnOutcome,
}

impl TurnReport {
    /// Crisis resources should be shown for this turn
    pub fn show_resources(&self) -> bool {
        self.evidence.flagged
    }
}

pub struct Session {
    state: SessionState,
    detector: CrisisDetector,
    sentiment: Option<Box<dyn SentimentAnalyzer>>,
    options: SessionOptions,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            state: SessionState::new(BASE_DIRECTIVE),
            detector: CrisisDetector::builtin(),
            sentiment: None,
            options,
        }
    }

    /// Session with the configured options, crisis patterns and sentiment hint
    pub fn from_config(config: &Config) -> Self {
        let detector = CrisisDetector::load_or_builtin(config.crisis_patterns_path.as_deref());

        let session = Self::new(SessionOptions::from_config(config)).with_detector(detector);
        if config.sentiment_hint {
            session.with_sentiment(Box::new(KeywordSentiment))
        } else {
            session
        }
    }

    /// Replace the base directive (starts a fresh log)
    pub fn with_base_directive(mut self, directive: &str) -> Self {
        self.state = SessionState::new(directive);
        self
    }

    pub fn with_detector(mut self, detector: CrisisDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_sentiment(mut self, analyzer: Box<dyn SentimentAnalyzer>) -> Self {
        self.sentiment = Some(analyzer);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Drop everything and start over with the same base directive
    pub fn reset(&mut self) {
        let base = self.state.log.base_directive().to_string();
        self.state = SessionState::new(&base);
        tracing::info!(session_id = %self.state.id, "Session reset");
    }

    /// Run one user turn
    ///
    /// Reply fragments are passed to `on_fragment` as they arrive when
    /// streaming. Gateway failures never escape: they become
    /// [`TurnOutcome::GatewayFailed`] with a fixed apology.
    pub async fn handle_turn<F>(
        &mut self,
        provider: &dyn LlmProvider,
        mood: MoodLabel,
        text: &str,
        today: NaiveDate,
        on_fragment: F,
    ) -> TurnReport
    where
        F: FnMut(&str),
    {
        if text.trim().is_empty() {
            return TurnReport {
                evidence: CrisisEvidence::not_flagged(),
                streak: self.state.streak,
                outcome: TurnOutcome::Ignored,
            };
        }

        let evidence = self.detector.classify(text);
        self.state.streak = self.state.streak.advance(today);
        self.state.record_mood(mood, Utc::now());
        self.state.log.append_user(text, Some(mood));

        if evidence.flagged {
            if !self.state.crisis_mode {
                tracing::info!(session_id = %self.state.id, "Crisis mode enabled for session");
            }
            self.state.crisis_mode = true;

            if self.options.crisis_policy == CrisisPolicy::ShortCircuit {
                return TurnReport {
                    evidence,
                    streak: self.state.streak,
                    outcome: TurnOutcome::CrisisResources,
                };
            }
        }

        let directive = self.directive_for(text, &evidence);
        let request = ProviderRequest::new(
            self.state
                .log
                .messages(&directive, self.options.max_history_turns),
        )
        .with_model(self.options.model.clone())
        .with_max_tokens(self.options.max_tokens)
        .with_temperature(self.options.temperature)
        .with_stream(self.options.streaming && provider.supports_streaming());

        let outcome = match call_gateway(provider, &request, on_fragment).await {
            Ok(reply) => {
                self.state.log.append_assistant(reply.clone());
                TurnOutcome::Reply(reply)
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %self.state.id,
                    provider = provider.name(),
                    "Model call failed: {:#}",
                    e
                );
                TurnOutcome::GatewayFailed(GATEWAY_APOLOGY.to_string())
            }
        };

        TurnReport {
            evidence,
            streak: self.state.streak,
            outcome,
        }
    }

    /// Directive for this call: amended for the rest of the session once
    /// crisis language has been seen
    fn directive_for(&self, text: &str, evidence: &CrisisEvidence) -> String {
        let governing = if self.state.crisis_mode && !evidence.flagged {
            CrisisEvidence {
                flagged: true,
                matches: Vec::new(),
            }
        } else {
            evidence.clone()
        };

        let base = self.state.log.base_directive();
        match &self.sentiment {
            Some(analyzer) => effective_directive_with_sentiment(
                base,
                &governing,
                analyze_or_unknown(analyzer.as_ref(), text),
            ),
            None => effective_directive(base, &governing),
        }
    }
}

async fn call_gateway<F>(provider: &dyn LlmProvider, request: &ProviderRequest, on_fragment: F) -> Result<String>
where
    F: FnMut(&str),
{
    let reply = if request.stream {
        let rx = provider.send_message_stream(request).await?;
        collect_stream(rx, on_fragment).await?
    } else {
        provider.send_message(request).await?.text
    };

    let reply = reply.trim().to_string();
    if reply.is_empty() {
        return Err(BuddyError::Gateway("empty reply".to_string()).into());
    }
    Ok(reply)
}
