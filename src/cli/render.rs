// Terminal rendering for check-in output

use crossterm::style::Stylize;

use crate::helplines::{format_helplines, HelplineRecord};
use crate::mood::MoodLabel;
use crate::streak::StreakState;

pub const ASSISTANT_PREFIX: &str = "AI Buddy: ";

pub const CRISIS_MESSAGE: &str = "It sounds like you may be in severe distress or crisis. \
If you are in immediate danger, please call your local emergency number now.";

pub fn banner() -> String {
    format!(
        "{}\n\
        An anonymous and empathetic listener for quick check-ins, mood tracking and self-help suggestions.\n\
        {} This is not a replacement for professional care. If you are in immediate danger, \
        call your local emergency number.\n\
        Type /help for commands, /quit to exit.",
        "🤝 AI Buddy - Youth Mental Wellness".bold(),
        "Note:".yellow().bold()
    )
}

pub fn crisis_resources(helplines: &[HelplineRecord]) -> String {
    format!(
        "{}\n\n{}\n{}",
        format!("⚠️  {}", CRISIS_MESSAGE).red().bold(),
        "Helplines & support".bold(),
        format_helplines(helplines)
    )
}

pub fn helplines(helplines: &[HelplineRecord]) -> String {
    format!("{}\n{}", "Helplines & support".bold(), format_helplines(helplines))
}

pub fn reply(text: &str) -> String {
    format!("{}{}", ASSISTANT_PREFIX.cyan().bold(), text)
}

pub fn apology(text: &str) -> String {
    text.yellow().to_string()
}

pub fn suggestion(mood: MoodLabel, text: &str) -> String {
    format!("{} {}", format!("[{}]", mood.display_label()).green(), text)
}

pub fn streak(state: &StreakState) -> String {
    match state.count {
        0 => "No check-ins yet this session.".to_string(),
        1 => "🔥 Check-in streak: 1 day".to_string(),
        n => format!("🔥 Check-in streak: {} days", n),
    }
}

pub fn mood_summary(summary: &[(MoodLabel, usize)]) -> String {
    if summary.is_empty() {
        return "No moods recorded yet this session.".to_string();
    }
    let total: usize = summary.iter().map(|(_, count)| count).sum();
    let mut lines = vec![format!("Moods this session ({} check-ins):", total)];
    for (mood, count) in summary {
        lines.push(format!("  {:<12} {}", mood.display_label(), "▇".repeat(*count)));
    }
    lines.join("\n")
}
