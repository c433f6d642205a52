//! Raw upstream finding shapes, before normalization.
//!
//! Upstreams describe overlapping facts in three different shapes. Each shape
//! is one variant of `RawFinding`, and the normalizer has one total mapping
//! per variant.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::finding::{EvidenceType, FindingLevel};
use super::lenient;

/// A finding as delivered by some upstream, tagged by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFinding {
    /// Item from the nested `findings → {blockers, must, should, optional}`
    /// shape. The bucket it was listed under is its level.
    Nested {
        bucket: FindingLevel,
        item: RawFindingItem,
    },
    /// Item from the flat `findings[]` shape with a `type` discriminator.
    Flat(RawFindingItem),
    /// Persona-tagged advisory alert. Reconciled separately.
    Persona(RawPersonaAlert),
}

/// Field superset of the nested and flat item shapes. Every field except
/// `message` is optional upstream, and a field of the wrong type is dropped
/// rather than failing the item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFindingItem {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: Option<String>,
    /// Empty when missing or not a string; the normalizer rejects it then.
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub level: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::or_default")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub action_required: Option<bool>,
    #[serde(default, deserialize_with = "lenient::day_list")]
    pub affected_days: Option<Vec<u32>>,
    #[serde(default, alias = "missingEvidence", deserialize_with = "lenient::evidence_list")]
    pub missing_evidence_types: Option<Vec<EvidenceType>>,
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub place_id: Option<String>,
}

impl RawFindingItem {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Persona alert as delivered upstream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPersonaAlert {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub persona: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub metadata: Option<Map<String, Value>>,
}
