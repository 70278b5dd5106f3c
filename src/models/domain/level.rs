use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::lenient;

/// Adaptive difficulty tier. `Advanced` is what older records call the top
/// tier; unknown names are kept so they can still be shown.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    Easy,
    Medium,
    Hard,
    Advanced,
    Other(String),
}

impl Level {
    pub fn as_str(&self) -> &str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
            Level::Advanced => "Advanced",
            Level::Other(name) => name,
        }
    }

    pub fn is_top_tier(&self) -> bool {
        matches!(self, Level::Hard | Level::Advanced)
    }
}

impl From<&str> for Level {
    fn from(value: &str) -> Self {
        match value {
            "Easy" => Level::Easy,
            "Medium" => Level::Medium,
            "Hard" => Level::Hard,
            "Advanced" => Level::Advanced,
            other => Level::Other(other.to_string()),
        }
    }
}

impl From<String> for Level {
    fn from(value: String) -> Self {
        Level::from(value.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Level::from(String::deserialize(deserializer)?))
    }
}

/// Field deserializer: a level name, or `None` for missing, empty or
/// non-string values.
pub fn optional_level<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Level>, D::Error> {
    Ok(lenient::text(d)?
        .filter(|name| !name.trim().is_empty())
        .map(Level::from))
}
