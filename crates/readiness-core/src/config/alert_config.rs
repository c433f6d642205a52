//! Persona alert reconciliation configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AlertConfig {
    /// `metadata.action` value that hard-blocks a group, compared
    /// case-insensitively. Default: "REJECT".
    pub reject_action: Option<String>,
    /// Group key for Safety alerts without a `decisionSource`.
    /// Default: "UNSPECIFIED".
    pub unspecified_source_label: Option<String>,
}

impl AlertConfig {
    pub fn effective_reject_action(&self) -> &str {
        self.reject_action.as_deref().unwrap_or("REJECT")
    }

    pub fn effective_unspecified_source_label(&self) -> &str {
        self.unspecified_source_label
            .as_deref()
            .unwrap_or("UNSPECIFIED")
    }
}
