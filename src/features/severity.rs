//! Severity vocabulary: level names → ascending numeric rank.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Score for any token outside the vocabulary; below every known level
pub const UNKNOWN_SEVERITY_SCORE: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info = 1,
    Warning = 2,
    Error = 3,
    Critical = 4,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn canonical(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    fn synonyms(self) -> &'static [&'static str] {
        match self {
            Severity::Info => &["INFORMATION"],
            Severity::Warning => &["WARN"],
            Severity::Error => &["ERR"],
            Severity::Critical => &["CRIT", "FATAL"],
        }
    }
}

/// Case-insensitive lookup from token to level. Total: unknown tokens score 0.
#[derive(Debug, Clone)]
pub struct SeverityVocabulary {
    entries: HashMap<&'static str, Severity>,
}

impl SeverityVocabulary {
    pub fn new(with_synonyms: bool) -> Self {
        let mut entries = HashMap::new();
        for level in Severity::ALL {
            entries.insert(level.canonical(), level);
            if with_synonyms {
                for alias in level.synonyms() {
                    entries.insert(*alias, level);
                }
            }
        }
        Self { entries }
    }

    pub fn classify(&self, token: &str) -> Option<Severity> {
        self.entries.get(token.to_ascii_uppercase().as_str()).copied()
    }

    pub fn score(&self, token: &str) -> f64 {
        self.classify(token)
            .map(|s| f64::from(s.rank()))
            .unwrap_or(UNKNOWN_SEVERITY_SCORE)
    }
}

impl Default for SeverityVocabulary {
    fn default() -> Self {
        Self::new(true)
    }
}
