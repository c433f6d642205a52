//! Persona alert parsing.

use readiness_core::types::{Persona, PersonaAlert, RawFinding, RawPersonaAlert, Severity};
use serde::Deserialize;
use serde_json::Value;

use super::{non_blank, Extracted, ItemError};
use crate::gateway::SourceKind;

/// Parse raw persona alerts. Items that are not alert objects, name an
/// unknown persona, or carry no message are skipped.
pub fn extract_persona(items: &[Value]) -> Extracted {
    let mut out = Extracted::default();
    for (index, value) in items.iter().enumerate() {
        if !value.is_object() {
            out.skip(SourceKind::PersonaAlerts, index, ItemError::NotAnObject);
            continue;
        }
        let checked = RawPersonaAlert::deserialize(value)
            .map_err(|e| ItemError::Malformed(e.to_string()))
            .and_then(|alert| check_persona(&alert).map(|_| alert));
        match checked {
            Ok(alert) => out.items.push(RawFinding::Persona(alert)),
            Err(err) => out.skip(SourceKind::PersonaAlerts, index, err),
        }
    }
    out
}

fn check_persona(raw: &RawPersonaAlert) -> Result<Persona, ItemError> {
    let persona =
        Persona::from_wire(&raw.persona).ok_or_else(|| ItemError::UnknownPersona(raw.persona.clone()))?;
    if raw.message.trim().is_empty() {
        return Err(ItemError::MissingMessage);
    }
    Ok(persona)
}

/// Map a raw alert into canonical form.
pub fn to_persona_alert(raw: RawPersonaAlert) -> Result<PersonaAlert, ItemError> {
    let persona = check_persona(&raw)?;
    Ok(PersonaAlert {
        id: non_blank(raw.id),
        persona,
        title: raw.title,
        message: raw.message,
        severity: raw
            .severity
            .as_deref()
            .map(Severity::from_wire)
            .unwrap_or(Severity::Info),
        metadata: raw.metadata.unwrap_or_default(),
        created_at: raw.created_at,
    })
}

/// Parse and map a whole persona alert list.
pub fn parse_persona_alerts(items: &[Value]) -> (Vec<PersonaAlert>, Extracted) {
    let extracted = extract_persona(items);
    let alerts = extracted
        .items
        .iter()
        .filter_map(|raw| match raw {
            RawFinding::Persona(alert) => to_persona_alert(alert.clone()).ok(),
            _ => None,
        })
        .collect();
    (alerts, extracted)
}
