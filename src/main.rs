// AI Buddy - anonymous youth mental-wellness check-ins
// Main entry point

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use ai_buddy::cli::{render, Repl};
use ai_buddy::config::{load_config, Config};
use ai_buddy::crisis::CrisisDetector;
use ai_buddy::errors::describe_fatal;
use ai_buddy::helplines::load_helplines;
use ai_buddy::mood::{MoodLabel, SuggestionTable};
use ai_buddy::providers::create_provider;
use ai_buddy::session::{Session, TurnOutcome};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "ai-buddy")]
#[command(about = "Anonymous youth mental-wellness check-ins", version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (default: ~/.ai-buddy/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive check-in (default)
    Chat {
        /// How you feel right now
        #[arg(long, default_value = "neutral")]
        mood: MoodLabel,
        /// First message to send before reading input
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Send a single message and print the reply
    Ask {
        text: String,
        #[arg(long, default_value = "neutral")]
        mood: MoodLabel,
    },
    /// Screen text for crisis language without calling the model
    Check { text: String },
    /// Print a coping suggestion for a mood
    Suggest { mood: String },
    /// Print helplines and support services
    Helplines,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        eprintln!("{}", describe_fatal(&e));
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Some(Command::Check { text }) => run_check(&config, &text),
        Some(Command::Suggest { mood }) => {
            let mut table = SuggestionTable::new(config.suggestions);
            match mood.parse::<MoodLabel>() {
                Ok(label) => println!("{}", render::suggestion(label, table.suggest(label))),
                // Unknown labels still get the generic tip
                Err(_) => println!("{}", table.suggest_for_label(&mood)),
            }
            Ok(())
        }
        Some(Command::Helplines) => {
            println!("{}", render::helplines(&load_helplines(&config.helplines_path)));
            Ok(())
        }
        Some(Command::Ask { text, mood }) => run_ask(&config, &text, mood).await,
        Some(Command::Chat { mood, prompt }) => run_chat(&config, mood, prompt).await,
        None => {
            // Piped input: treat as a single message
            if !io::stdin().is_terminal() {
                let mut input = String::new();
                io::stdin().read_to_string(&mut input)?;
                if input.trim().is_empty() {
                    return Ok(());
                }
                return run_ask(&config, &input, MoodLabel::default()).await;
            }
            run_chat(&config, MoodLabel::default(), None).await
        }
    }
}

fn run_check(config: &Config, text: &str) -> Result<()> {
    let detector = CrisisDetector::load_or_builtin(config.crisis_patterns_path.as_deref());

    let evidence = detector.classify(text);
    if evidence.flagged {
        println!("flagged: yes");
        println!("matched: {}", evidence.matches.join(", "));
        println!("\n{}", render::crisis_resources(&load_helplines(&config.helplines_path)));
    } else {
        println!("flagged: no");
    }
    Ok(())
}

fn build_repl(config: &Config, mood: MoodLabel) -> Result<Repl> {
    // Missing key is fatal before any session starts
    let provider = create_provider(config)?;

    Ok(Repl::new(
        Session::from_config(config),
        provider,
        SuggestionTable::new(config.suggestions),
        load_helplines(&config.helplines_path),
        mood,
    ))
}

async fn run_ask(config: &Config, text: &str, mood: MoodLabel) -> Result<()> {
    let mut repl = build_repl(config, mood)?;
    let report = repl.process_message(text).await?;

    if matches!(report.outcome, TurnOutcome::GatewayFailed(_)) {
        std::process::exit(2);
    }
    Ok(())
}

async fn run_chat(config: &Config, mood: MoodLabel, prompt: Option<String>) -> Result<()> {
    let repl = build_repl(config, mood)?;
    tracing::info!(session_id = %repl.session().state().id, "Starting check-in session");
    repl.run_interactive(prompt).await
}

fn init_tracing() {
    let show_debug = std::env::var("AI_BUDDY_DEBUG")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    // Default: ERROR only, so raw gateway errors stay out of the conversation.
    // RUST_LOG overrides.
    let default_level = if show_debug { "debug" } else { "error" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .init();

    // Bridge log crate -> tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}
