// Canned coping suggestions per mood

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::MoodLabel;

/// Returned for labels outside the enumerated set
pub const FALLBACK_SUGGESTION: &str = "Take a slow breath. You’re doing your best — that matters.";

const HAPPY: &[&str] = &[
    "Celebrate! Jot down one thing that made you smile — savor it for 60 seconds.",
    "Share your positive energy with someone else. A quick text or call can make their day.",
    "Reflect on why you're happy. Understanding the source of your joy can help you find more of it.",
];

const SAD: &[&str] = &[
    "Try a 3-2-1 grounding: name 3 things you see, 2 things you can touch, 1 thing you can hear.",
    "Listen to a comforting piece of music or a podcast. Sometimes it's good to let your mind rest.",
    "It's okay to feel this way. Allow yourself to feel your emotions without judgment.",
];

const ANXIOUS: &[&str] = &[
    "Try box breathing: inhale 4s, hold 4s, exhale 4s, hold 4s — repeat 4 times.",
    "Go for a short walk outside. Focusing on your environment can help you feel more grounded.",
    "Write down a list of what's making you anxious, then pick one small thing you can control right now.",
];

const ANGRY: &[&str] = &[
    "Step away for 2 mins. Put your hands on your belly and take slow breaths to calm your body.",
    "Squeeze a stress ball or a pillow. Physically releasing tension can help your mind calm down.",
    "Write down what's making you angry without holding back. Don't worry about grammar or spelling, just let it all out.",
];

const NEUTRAL: &[&str] = &[
    "Take a 2-minute mindful break: notice your breath and your surroundings.",
    "Think of a future goal you have and write down one tiny step you can take today to get closer to it.",
    "Notice something new in your environment. Engaging your senses can make the moment more interesting.",
];

const STRESSED: &[&str] = &[
    "Break tasks into tiny steps — write one next tiny action you can finish in 5 minutes.",
    "Do a quick body scan. Close your eyes and notice where you feel tension, then consciously try to relax that area.",
    "Listen to some calming background sounds, like rain or waves, while you work or rest.",
];

/// How a suggestion is picked when a mood has several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SuggestionMode {
    /// Always the first configured suggestion
    First,
    /// Uniformly random; a seed makes the sequence reproducible
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl Default for SuggestionMode {
    fn default() -> Self {
        SuggestionMode::Random { seed: None }
    }
}

/// Static mood -> suggestions mapping with a selection policy
#[derive(Debug)]
pub struct SuggestionTable {
    mode: SuggestionMode,
    rng: StdRng,
}

impl SuggestionTable {
    pub fn new(mode: SuggestionMode) -> Self {
        let rng = match mode {
            SuggestionMode::Random { seed: Some(seed) } => StdRng::seed_from_u64(seed),
            _ => StdRng::from_entropy(),
        };
        Self { mode, rng }
    }

    /// Every configured suggestion for a mood
    pub fn options(mood: MoodLabel) -> &'static [&'static str] {
        match mood {
            MoodLabel::Happy => HAPPY,
            MoodLabel::Sad => SAD,
            MoodLabel::Anxious => ANXIOUS,
            MoodLabel::Angry => ANGRY,
            MoodLabel::Neutral => NEUTRAL,
            MoodLabel::Stressed => STRESSED,
        }
    }

    pub fn suggest(&mut self, mood: MoodLabel) -> &'static str {
        let options = Self::options(mood);
        let picked = match self.mode {
            SuggestionMode::First => options.first(),
            SuggestionMode::Random { .. } => options.choose(&mut self.rng),
        };
        picked.copied().unwrap_or(FALLBACK_SUGGESTION)
    }

    /// Suggest for a free-form label; unknown labels get the generic fallback
    pub fn suggest_for_label(&mut self, label: &str) -> &'static str {
        match label.parse::<MoodLabel>() {
            Ok(mood) => self.suggest(mood),
            Err(_) => FALLBACK_SUGGESTION,
        }
    }
}

impl Default for SuggestionTable {
    fn default() -> Self {
        Self::new(SuggestionMode::default())
    }
}
