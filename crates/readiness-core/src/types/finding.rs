//! The canonical `Finding` and its enumerations.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Priority tier of a finding, in decreasing urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingLevel {
    Blocker,
    Must,
    Should,
    Optional,
}

impl FindingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocker => "blocker",
            Self::Must => "must",
            Self::Should => "should",
            Self::Optional => "optional",
        }
    }

    pub fn all() -> &'static [FindingLevel] {
        &[Self::Blocker, Self::Must, Self::Should, Self::Optional]
    }

    /// Parse a canonical level name. Accepts the plural bucket names
    /// (`blockers`) the nested upstream shape uses as keys.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blocker" | "blockers" => Some(Self::Blocker),
            "must" => Some(Self::Must),
            "should" => Some(Self::Should),
            "optional" => Some(Self::Optional),
            _ => None,
        }
    }
}

impl fmt::Display for FindingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source-reported display severity. Independent of `FindingLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
}

impl Severity {
    /// Roll-up rank: `Warning` beats `Info` beats `Success`.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Warning => 2,
            Self::Info => 1,
            Self::Success => 0,
        }
    }

    /// The more severe of two severities.
    pub fn worst(self, other: Severity) -> Severity {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// Lenient mapping from upstream severity vocabularies.
    /// Anything unrecognized is treated as `Info`.
    pub fn from_wire(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "warning" | "warn" | "error" | "critical" | "high" | "medium" => Self::Warning,
            "success" | "ok" | "passed" | "pass" => Self::Success,
            _ => Self::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evidence kinds the coverage map reports as missing for a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceType {
    OpeningHours,
    RoadClosure,
    Weather,
    Booking,
    Permit,
    #[serde(other)]
    Other,
}

/// One canonical, actionable readiness item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
    pub category: String,
    pub level: FindingLevel,
    pub severity: Severity,
    pub action_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_days: Option<SmallVec<[u32; 4]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_evidence_types: Option<BTreeSet<EvidenceType>>,
    /// Structured place key, when the upstream supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

impl Finding {
    /// Minimal constructor used by tests and fixtures.
    pub fn new(message: impl Into<String>, category: impl Into<String>, level: FindingLevel) -> Self {
        Self {
            id: None,
            title: None,
            message: message.into(),
            category: category.into(),
            level,
            severity: Severity::Info,
            action_required: matches!(level, FindingLevel::Blocker | FindingLevel::Must),
            affected_days: None,
            missing_evidence_types: None,
            place_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_blocker(&self) -> bool {
        self.level == FindingLevel::Blocker
    }
}
