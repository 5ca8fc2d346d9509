// Interactive check-in loop

use anyhow::{Context, Result};
use chrono::Local;
use std::io::{self, BufRead, Write};

use super::commands::{format_help, Command};
use super::input::InputHandler;
use super::render;
use crate::helplines::HelplineRecord;
use crate::mood::{MoodLabel, SuggestionTable};
use crate::providers::LlmProvider;
use crate::session::{Session, TurnOutcome, TurnReport};

pub struct Repl {
    session: Session,
    provider: Box<dyn LlmProvider>,
    suggestions: SuggestionTable,
    helplines: Vec<HelplineRecord>,
    mood: MoodLabel,
}

impl Repl {
    pub fn new(
        session: Session,
        provider: Box<dyn LlmProvider>,
        suggestions: SuggestionTable,
        helplines: Vec<HelplineRecord>,
        mood: MoodLabel,
    ) -> Self {
        Self {
            session,
            provider,
            suggestions,
            helplines,
            mood,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the interactive loop until /quit or EOF
    pub async fn run_interactive(mut self, initial_prompt: Option<String>) -> Result<()> {
        println!("{}\n", render::banner());
        println!("Current mood: {} (change with /mood <m>)\n", self.mood);

        if let Some(prompt) = initial_prompt {
            self.process_message(&prompt).await?;
        }

        let mut input_handler = if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
            match InputHandler::new() {
                Ok(handler) => Some(handler),
                Err(e) => {
                    tracing::warn!("Failed to initialize input handler: {}", e);
                    None
                }
            }
        } else {
            None
        };

        loop {
            let prompt = format!("{} > ", self.mood.emoji());
            let line = match &mut input_handler {
                Some(handler) => match handler.read_line(&prompt)? {
                    Some(line) => line,
                    None => break,
                },
                None => {
                    // Fallback: basic stdin
                    print!("{}", prompt);
                    io::stdout().flush()?;
                    let mut line = String::new();
                    if io::stdin().lock().read_line(&mut line)? == 0 {
                        break;
                    }
                    line.trim().to_string()
                }
            };

            if line.is_empty() {
                continue;
            }

            if line.starts_with('/') {
                if self.handle_command(&line)? {
                    break;
                }
                continue;
            }

            self.process_message(&line).await?;
        }

        println!("Take care of yourself. Goodbye!");
        Ok(())
    }

    /// Send one message and print the outcome
    pub async fn process_message(&mut self, text: &str) -> Result<TurnReport> {
        let today = Local::now().date_naive();
        let streak_before = self.session.state().streak;

        let mut streamed = false;
        let report = self
            .session
            .handle_turn(self.provider.as_ref(), self.mood, text, today, |fragment| {
                if !streamed {
                    print!("{}", render::reply(""));
                    streamed = true;
                }
                print!("{}", fragment);
                let _ = io::stdout().flush();
            })
            .await;

        if streamed {
            println!();
        }

        match &report.outcome {
            TurnOutcome::Ignored => return Ok(report),
            TurnOutcome::Reply(reply) => {
                if !streamed {
                    println!("{}", render::reply(reply));
                }
            }
            TurnOutcome::GatewayFailed(apology) => {
                println!("{}", render::apology(apology));
            }
            TurnOutcome::CrisisResources => {}
        }

        if report.show_resources() {
            println!("\n{}", render::crisis_resources(&self.helplines));
        }
        if let Some(tip) = self.footer_suggestion(&report.outcome) {
            println!("\n{}", tip);
        }

        if report.streak != streak_before {
            println!("{}", render::streak(&report.streak));
        }
        println!();

        Ok(report)
    }

    /// Coping tip for the current mood shown under an answered or crisis turn
    fn footer_suggestion(&mut self, outcome: &TurnOutcome) -> Option<String> {
        match outcome {
            TurnOutcome::Reply(_) | TurnOutcome::CrisisResources => {
                Some(render::suggestion(self.mood, self.suggestions.suggest(self.mood)))
            }
            TurnOutcome::Ignored | TurnOutcome::GatewayFailed(_) => None,
        }
    }

    /// Handle a slash command; returns true when the user wants to quit
    fn handle_command(&mut self, line: &str) -> Result<bool> {
        let Some(command) = Command::parse(line) else {
            println!("Unknown command: {}", line);
            println!("Type /help for available commands");
            return Ok(false);
        };

        match command {
            Command::Quit => return Ok(true),
            Command::Help => println!("{}", format_help()),
            Command::Clear => {
                self.session.reset();
                println!("Session cleared.");
            }
            Command::ShowMood => println!("Current mood: {}", self.mood),
            Command::SetMood(mood) => {
                self.mood = mood;
                println!("Mood set to {}", mood);
            }
            Command::Suggest => {
                let tip = self.suggestions.suggest(self.mood);
                println!("{}", render::suggestion(self.mood, tip));
            }
            Command::Helplines => println!("{}", render::helplines(&self.helplines)),
            Command::Streak => println!("{}", render::streak(&self.session.state().streak)),
            Command::Moods => println!(
                "{}",
                render::mood_summary(&self.session.state().mood_summary())
            ),
            Command::Save(path) => {
                let transcript = self.session.state().log.transcript();
                if transcript.is_empty() {
                    println!("Nothing to save yet.");
                } else {
                    match std::fs::write(&path, transcript)
                        .with_context(|| format!("Failed to write transcript to {}", path.display()))
                    {
                        Ok(()) => println!("Transcript saved to {}", path.display()),
                        Err(e) => println!("{}", render::apology(&format!("{:#}", e))),
                    }
                }
            }
            Command::Invalid(usage) => println!("{}", usage),
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helplines::builtin_helplines;
    use crate::mood::SuggestionMode;
    use crate::providers::{ProviderRequest, ProviderResponse, StreamChunk};
    use crate::session::SessionOptions;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    struct SilentProvider;

    #[async_trait]
    impl LlmProvider for SilentProvider {
        async fn send_message(&self, _request: &ProviderRequest) -> Result<ProviderResponse> {
            anyhow::bail!("not used")
        }

        async fn send_message_stream(
            &self,
            _request: &ProviderRequest,
        ) -> Result<mpsc::Receiver<Result<StreamChunk>>> {
            anyhow::bail!("not used")
        }

        fn name(&self) -> &str {
            "silent"
        }

        fn default_model(&self) -> &str {
            "silent-1"
        }
    }

    fn repl(mood: MoodLabel) -> Repl {
        Repl::new(
            Session::new(SessionOptions::default()),
            Box::new(SilentProvider),
            SuggestionTable::new(SuggestionMode::First),
            builtin_helplines(),
            mood,
        )
    }

    #[test]
    fn test_footer_after_reply_and_crisis() {
        let mut repl = repl(MoodLabel::Sad);
        let first = SuggestionTable::options(MoodLabel::Sad)[0];

        let tip = repl
            .footer_suggestion(&TurnOutcome::Reply("ok".to_string()))
            .unwrap();
        assert!(tip.contains(first));
        assert!(repl.footer_suggestion(&TurnOutcome::CrisisResources).is_some());
    }

    #[test]
    fn test_no_footer_for_ignored_or_failed() {
        let mut repl = repl(MoodLabel::Anxious);
        assert!(repl.footer_suggestion(&TurnOutcome::Ignored).is_none());
        assert!(repl
            .footer_suggestion(&TurnOutcome::GatewayFailed(crate::errors::GATEWAY_APOLOGY.to_string()))
            .is_none());
    }

    #[test]
    fn test_set_mood_command_changes_footer() {
        let mut repl = repl(MoodLabel::Sad);
        assert!(!repl.handle_command("/mood happy").unwrap());

        let tip = repl.footer_suggestion(&TurnOutcome::CrisisResources).unwrap();
        assert!(tip.contains(SuggestionTable::options(MoodLabel::Happy)[0]));
    }

    #[test]
    fn test_quit_command() {
        let mut repl = repl(MoodLabel::Neutral);
        assert!(repl.handle_command("/quit").unwrap());
    }
}
