// Helpline reference data
// Loaded once at startup, read-only afterwards

mod loader;

pub use loader::{builtin_helplines, load_helplines, try_load_helplines};

use serde::{Deserialize, Deserializer, Serialize};

/// One crisis/support service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelplineRecord {
    pub country: String,
    pub service: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl HelplineRecord {
    /// Single display line: country, service, then number and url when present
    pub fn display_line(&self) -> String {
        let mut line = format!("{} - {}", self.country, self.service);
        if let Some(number) = &self.number {
            line.push_str(&format!(" - {}", number));
        }
        if let Some(url) = &self.url {
            line.push_str(&format!(" - {}", url));
        }
        line
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// Render a helpline list, one service per line
pub fn format_helplines(helplines: &[HelplineRecord]) -> String {
    helplines
        .iter()
        .map(HelplineRecord::display_line)
        .collect::<Vec<_>>()
        .join("\n")
}
