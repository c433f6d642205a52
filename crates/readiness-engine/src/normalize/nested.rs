//! The primary `findings → [{blockers, must, should, optional}]` shape.

use readiness_core::types::{FindingLevel, RawFinding};
use serde_json::Value;

use super::{parse_item, Extracted, ItemError};
use crate::gateway::SourceKind;

/// Bucket keys in the order they are read. `blocker` is the singular form
/// used by the personalized checklist.
const BUCKET_KEYS: &[(&str, FindingLevel)] = &[
    ("blockers", FindingLevel::Blocker),
    ("blocker", FindingLevel::Blocker),
    ("must", FindingLevel::Must),
    ("should", FindingLevel::Should),
    ("optional", FindingLevel::Optional),
];

/// Extract every item from a list of finding groups.
///
/// Groups are read in order, and within a group buckets are read
/// blockers-first. `index` in skip reports counts items across the whole
/// source. Keys other than the level buckets are ignored.
pub fn extract_nested(source: SourceKind, groups: &[Value]) -> Extracted {
    let mut out = Extracted::default();
    let mut index = 0usize;

    for group in groups {
        let Some(group) = group.as_object() else {
            out.skip(source, index, ItemError::NotAnObject);
            index += 1;
            continue;
        };

        for (key, bucket) in BUCKET_KEYS {
            let Some(items) = group.get(*key) else {
                continue;
            };
            let Some(items) = items.as_array() else {
                if !items.is_null() {
                    out.skip(
                        source,
                        index,
                        ItemError::Malformed(format!("bucket `{key}` is not a list")),
                    );
                    index += 1;
                }
                continue;
            };
            for value in items {
                match parse_item(value) {
                    Ok(item) => out.items.push(RawFinding::Nested {
                        bucket: *bucket,
                        item,
                    }),
                    Err(err) => out.skip(source, index, err),
                }
                index += 1;
            }
        }
    }

    out
}
