// Helpline loader with built-in fallback

use std::fs;
use std::path::Path;

use super::HelplineRecord;
use crate::errors::BuddyError;

/// Read helplines from a JSON array file
pub fn try_load_helplines(path: &Path) -> Result<Vec<HelplineRecord>, BuddyError> {
    let resource_error = |reason: String| BuddyError::ResourceLoad {
        path: path.display().to_string(),
        reason,
    };

    let contents = fs::read_to_string(path).map_err(|e| resource_error(e.to_string()))?;

    let helplines: Vec<HelplineRecord> =
        serde_json::from_str(&contents).map_err(|e| resource_error(e.to_string()))?;

    if helplines.is_empty() {
        return Err(resource_error("no entries".to_string()));
    }

    Ok(helplines)
}

/// Read helplines, falling back to the built-in list on any failure
pub fn load_helplines(path: &Path) -> Vec<HelplineRecord> {
    match try_load_helplines(path) {
        Ok(helplines) => {
            tracing::debug!("Loaded {} helplines from {}", helplines.len(), path.display());
            helplines
        }
        Err(e) => {
            tracing::warn!("Using built-in helplines: {}", e);
            builtin_helplines()
        }
    }
}

/// Global and national services shown when no helplines file is usable
pub fn builtin_helplines() -> Vec<HelplineRecord> {
    vec![
        HelplineRecord {
            country: "Global".to_string(),
            service: "Befrienders Worldwide (find local centers)".to_string(),
            number: None,
            url: Some("https://www.befrienders.org/".to_string()),
        },
        HelplineRecord {
            country: "US".to_string(),
            service: "988 Suicide & Crisis Lifeline".to_string(),
            number: Some("988".to_string()),
            url: Some("https://988lifeline.org/".to_string()),
        },
        HelplineRecord {
            country: "UK".to_string(),
            service: "Samaritans".to_string(),
            number: Some("116 123".to_string()),
            url: Some("https://www.samaritans.org/".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_has_global_and_national() {
        let helplines = builtin_helplines();
        assert!(helplines.iter().any(|h| h.country == "Global"));
        assert!(helplines.iter().filter(|h| h.country != "Global").count() >= 2);
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"country": "IN", "service": "Tele MANAS", "number": "14416"}}]"#
        )
        .unwrap();

        let helplines = load_helplines(file.path());
        assert_eq!(helplines.len(), 1);
        assert_eq!(helplines[0].country, "IN");
        assert_eq!(helplines[0].number.as_deref(), Some("14416"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let helplines = load_helplines(Path::new("/nonexistent/helplines.json"));
        assert_eq!(helplines, builtin_helplines());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(try_load_helplines(file.path()).is_err());
        assert_eq!(load_helplines(file.path()), builtin_helplines());
    }

    #[test]
    fn test_empty_list_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        assert_eq!(load_helplines(file.path()), builtin_helplines());
    }
}
