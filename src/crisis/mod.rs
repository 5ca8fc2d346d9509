// Crisis detection
// Keyword screening of user text for self-harm and suicide-risk language

mod detector;

pub use detector::{CrisisDetector, CrisisEvidence, CrisisPatterns, BUILTIN_PATTERNS};
