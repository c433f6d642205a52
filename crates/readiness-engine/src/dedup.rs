//! Identity-based deduplication for findings and persona alerts.

use readiness_core::types::{Finding, PersonaAlert};
use rustc_hash::FxHashSet;

/// Logical identity of an item.
///
/// Two items are the same when both carry the same non-empty `id`, or when
/// neither carries one and their `title` and `message` are equal.
pub trait Identity {
    fn id(&self) -> Option<&str>;
    fn title(&self) -> &str;
    fn message(&self) -> &str;

    /// Hashable identity key. The `id:` / `text:` prefixes keep an id from
    /// colliding with a title/message pair.
    fn identity_key(&self) -> String {
        match self.id().map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => format!("id:{id}"),
            None => format!("text:{}\u{0000}{}", self.title(), self.message()),
        }
    }
}

impl Identity for Finding {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    fn message(&self) -> &str {
        &self.message
    }
}

impl Identity for PersonaAlert {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Deduplicated items and how many were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Deduped<T> {
    pub items: Vec<T>,
    pub duplicates: u32,
}

/// Order-preserving dedup; the first occurrence of each identity wins.
pub fn dedup<T: Identity>(items: Vec<T>) -> Deduped<T> {
    let mut seen = FxHashSet::default();
    let mut kept = Vec::with_capacity(items.len());
    let mut duplicates = 0u32;
    for item in items {
        if seen.insert(item.identity_key()) {
            kept.push(item);
        } else {
            duplicates += 1;
        }
    }
    Deduped {
        items: kept,
        duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readiness_core::types::{FindingLevel, Persona, Severity};

    #[test]
    fn same_text_without_ids_collapses_to_first() {
        let a = Finding::new("Bring chains", "transport", FindingLevel::Must).with_title("Winter road");
        let mut b = a.clone();
        b.category = "safety".into();
        let out = dedup(vec![a.clone(), b]);
        assert_eq!(out.items, vec![a]);
        assert_eq!(out.duplicates, 1);
    }

    #[test]
    fn distinct_ids_are_distinct() {
        let a = Finding::new("same", "x", FindingLevel::Should).with_id("r1");
        let b = Finding::new("same", "x", FindingLevel::Should).with_id("r2");
        assert_eq!(dedup(vec![a, b]).items.len(), 2);
    }

    #[test]
    fn same_id_different_text_collapses() {
        let a = Finding::new("one", "x", FindingLevel::Should).with_id("r1");
        let b = Finding::new("two", "x", FindingLevel::Blocker).with_id("r1");
        let out = dedup(vec![a, b]);
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].message, "one");
    }

    #[test]
    fn blank_id_falls_back_to_text() {
        let a = Finding::new("m", "x", FindingLevel::Should).with_id("  ");
        let b = Finding::new("m", "x", FindingLevel::Should);
        assert_eq!(dedup(vec![a, b]).items.len(), 1);
    }

    #[test]
    fn id_never_collides_with_text() {
        let a = Finding::new("x", "c", FindingLevel::Should).with_id("text:\u{0000}x");
        let b = Finding::new("x", "c", FindingLevel::Should);
        assert_eq!(dedup(vec![a, b]).items.len(), 2);
    }

    #[test]
    fn alerts_use_the_same_rule() {
        let a = PersonaAlert::new(Persona::Safety, "Road", "Closed", Severity::Warning);
        let b = PersonaAlert::new(Persona::Pacing, "Road", "Closed", Severity::Info);
        let out = dedup(vec![a, b]);
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].persona, Persona::Safety);
    }
}
