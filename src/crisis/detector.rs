// Crisis keyword detector
//
// Purely lexical: the lowercased input is tested against a fixed list of
// self-harm / suicidal-ideation patterns. False positives ("I'll die laughing")
// and false negatives (paraphrase, misspelling) are expected and accepted.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in crisis patterns, checked in this order.
pub const BUILTIN_PATTERNS: &[&str] = &[
    r"suicid",
    r"kill myself",
    r"end my life",
    r"want to die",
    r"hurt myself",
    r"self[- ]harm",
    r"overdose",
    r"hang myself",
    r"i'll die",
    r"no reason to live",
];

static BUILTIN_SET: Lazy<Option<RegexSet>> = Lazy::new(|| match compile(BUILTIN_PATTERNS) {
    Ok(set) => Some(set),
    Err(e) => {
        tracing::error!("Failed to compile built-in crisis patterns: {}", e);
        None
    }
});

fn compile<S: AsRef<str>>(patterns: &[S]) -> std::result::Result<RegexSet, regex::Error> {
    RegexSetBuilder::new(patterns.iter().map(|p| p.as_ref()))
        .case_insensitive(true)
        .build()
}

/// Result of classifying one piece of user text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrisisEvidence {
    pub flagged: bool,
    /// Every pattern that matched, in pattern-list order
    pub matches: Vec<String>,
}

impl CrisisEvidence {
    pub fn not_flagged() -> Self {
        Self::default()
    }
}

/// On-disk pattern list format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisPatterns {
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CrisisDetector {
    patterns: Vec<String>,
    set: Option<RegexSet>,
}

impl CrisisDetector {
    /// Detector over the built-in pattern list
    pub fn builtin() -> Self {
        Self {
            patterns: BUILTIN_PATTERNS.iter().map(|p| p.to_string()).collect(),
            set: BUILTIN_SET.clone(),
        }
    }

    /// Detector over a custom pattern list
    ///
    /// Fails if any pattern is not a valid regex; callers fall back to
    /// [`CrisisDetector::builtin`].
    pub fn with_patterns(patterns: Vec<String>) -> Result<Self> {
        let set = compile(&patterns).context("Invalid crisis pattern")?;
        Ok(Self {
            patterns,
            set: Some(set),
        })
    }

    /// Load a custom pattern list from a JSON file (`{"patterns": [...]}`)
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crisis patterns file: {}", path.display()))?;

        let list: CrisisPatterns = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Self::with_patterns(list.patterns)
    }

    /// Custom list from `path` when given and usable, otherwise the built-in list
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::from_json_file(path).unwrap_or_else(|e| {
                tracing::warn!("Using built-in crisis patterns: {:#}", e);
                Self::builtin()
            }),
            None => Self::builtin(),
        }
    }

    /// Classify user text. Never fails; an unusable pattern set means not flagged.
    pub fn classify(&self, text: &str) -> CrisisEvidence {
        let Some(set) = &self.set else {
            return CrisisEvidence::not_flagged();
        };

        let lower = text.to_lowercase();
        let matches: Vec<String> = set
            .matches(&lower)
            .into_iter()
            .map(|idx| self.patterns[idx].clone())
            .collect();

        if !matches.is_empty() {
            // Pattern ids only: user text stays out of the logs
            tracing::warn!(patterns = ?matches, "Crisis language detected");
        }

        CrisisEvidence {
            flagged: !matches.is_empty(),
            matches,
        }
    }

    /// Patterns this detector checks (for display purposes)
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::builtin()
    }
}
