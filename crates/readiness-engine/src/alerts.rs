//! Persona alert reconciliation.
//!
//! Alerts are advisory. They are grouped and rolled up for display and for
//! the Safety-local tri-state, and never feed the trip `GateStatus`.

use std::collections::BTreeMap;

use readiness_core::config::AlertConfig;
use readiness_core::types::{AlertGroup, Persona, PersonaAlert, PersonaAlertGroups, SafetyGate, Severity};

use crate::dedup::dedup;

/// Groups persona alerts and derives the Safety gate.
#[derive(Debug, Clone)]
pub struct AlertReconciler {
    reject_action: String,
    unspecified_source_label: String,
}

/// Reconciled alert groups and the number of duplicates dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledAlerts {
    pub groups: PersonaAlertGroups,
    pub duplicates: u32,
}

impl AlertReconciler {
    pub fn new(config: &AlertConfig) -> Self {
        Self {
            reject_action: config.effective_reject_action().to_string(),
            unspecified_source_label: config.effective_unspecified_source_label().to_string(),
        }
    }

    /// Dedup, group by persona and Safety decision source, roll up.
    pub fn reconcile(&self, alerts: Vec<PersonaAlert>) -> ReconciledAlerts {
        let deduped = dedup(alerts);

        let mut by_persona: BTreeMap<Persona, Vec<PersonaAlert>> =
            Persona::all().iter().map(|p| (*p, Vec::new())).collect();
        let mut by_source: BTreeMap<String, Vec<PersonaAlert>> = BTreeMap::new();

        for alert in deduped.items {
            if alert.persona == Persona::Safety {
                let source = alert
                    .decision_source()
                    .unwrap_or(self.unspecified_source_label.as_str())
                    .to_string();
                by_source.entry(source).or_default().push(alert.clone());
            }
            by_persona.entry(alert.persona).or_default().push(alert);
        }

        let by_persona: BTreeMap<Persona, AlertGroup> = by_persona
            .into_iter()
            .map(|(persona, alerts)| (persona, self.roll_up(alerts)))
            .collect();
        let safety_by_decision_source = by_source
            .into_iter()
            .map(|(source, alerts)| (source, self.roll_up(alerts)))
            .collect();

        let safety_gate = by_persona
            .get(&Persona::Safety)
            .map(safety_gate)
            .unwrap_or(SafetyGate::Allow);

        ReconciledAlerts {
            groups: PersonaAlertGroups {
                by_persona,
                safety_by_decision_source,
                safety_gate,
            },
            duplicates: deduped.duplicates,
        }
    }

    fn roll_up(&self, alerts: Vec<PersonaAlert>) -> AlertGroup {
        let worst_severity = worst_severity(&alerts);
        let hard_block = alerts.iter().any(|a| self.is_reject(a));
        AlertGroup {
            alerts,
            worst_severity,
            hard_block,
        }
    }

    fn is_reject(&self, alert: &PersonaAlert) -> bool {
        alert
            .action()
            .is_some_and(|action| action.eq_ignore_ascii_case(&self.reject_action))
    }
}

impl Default for AlertReconciler {
    fn default() -> Self {
        Self::new(&AlertConfig::default())
    }
}

/// Worst severity with `Warning > Info > Success`. `None` when empty.
pub fn worst_severity(alerts: &[PersonaAlert]) -> Option<Severity> {
    alerts.iter().map(|a| a.severity).reduce(Severity::worst)
}

/// Safety tri-state: a hard block wins, then any warning.
pub fn safety_gate(group: &AlertGroup) -> SafetyGate {
    if group.hard_block {
        SafetyGate::Block
    } else if group.worst_severity == Some(Severity::Warning) {
        SafetyGate::Warn
    } else {
        SafetyGate::Allow
    }
}
