//! Persona-tagged advisory alerts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::finding::Severity;

/// Metadata key naming the decision source of a Safety alert.
pub const DECISION_SOURCE_KEY: &str = "decisionSource";
/// Metadata key carrying the advisory action (`ALLOW`, `REJECT`, ...).
pub const ACTION_KEY: &str = "action";

/// Originating advisory subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    /// Wire name `ABU`.
    Safety,
    /// Wire name `DR_DRE`.
    Pacing,
    /// Wire name `NEPTUNE`.
    Repair,
}

impl Persona {
    pub fn all() -> &'static [Persona] {
        &[Self::Safety, Self::Pacing, Self::Repair]
    }

    /// Parse the upstream persona tag. Accepts the internal wire names and
    /// the English role names, case-insensitively.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ABU" | "SAFETY" => Some(Self::Safety),
            "DR_DRE" | "DR-DRE" | "DRDRE" | "PACING" => Some(Self::Pacing),
            "NEPTUNE" | "REPAIR" => Some(Self::Repair),
            _ => None,
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Safety => "ABU",
            Self::Pacing => "DR_DRE",
            Self::Repair => "NEPTUNE",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safety => "safety",
            Self::Pacing => "pacing",
            Self::Repair => "repair",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory item tagged with its originating persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaAlert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub persona: Persona,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl PersonaAlert {
    pub fn new(
        persona: Persona,
        title: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            id: None,
            persona,
            title: title.into(),
            message: message.into(),
            severity,
            metadata: serde_json::Map::new(),
            created_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// The `decisionSource` metadata tag, if it is a non-empty string.
    pub fn decision_source(&self) -> Option<&str> {
        self.metadata_str(DECISION_SOURCE_KEY)
    }

    /// The `action` metadata tag, if it is a non-empty string.
    pub fn action(&self) -> Option<&str> {
        self.metadata_str(ACTION_KEY)
    }

    fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
