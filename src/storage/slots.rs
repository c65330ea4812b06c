//! Drive bay assignment parsing.

use std::collections::HashMap;

use crate::api::DriveSlot;
use crate::error::StorageError;

use super::tokens::parse_int;

/// Turns a flat position→model mapping into a list of bay assignments.
///
/// Keys are base-10 bay positions; a value of `None` explicitly clears
/// the bay. The whole call fails on the first non-numeric key; no partial
/// result is returned. Output order follows map iteration order and is
/// explicitly unspecified — callers must not depend on it.
///
/// # Errors
///
/// Returns a parse error naming the offending key.
pub fn parse_drive_slots(
    raw: &HashMap<String, Option<i64>>,
) -> Result<Vec<DriveSlot>, StorageError> {
    let mut slots = Vec::with_capacity(raw.len());

    for (position, model) in raw {
        slots.push(DriveSlot {
            position: parse_int("drive slot position", position)?,
            drive_model_id: *model,
        });
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageErrorKind;

    fn raw(entries: &[(&str, Option<i64>)]) -> HashMap<String, Option<i64>> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), *v))
            .collect()
    }

    #[test]
    fn test_one_assignment_per_entry() {
        let slots = parse_drive_slots(&raw(&[("1", Some(441)), ("2", Some(441)), ("8", None)]))
            .unwrap();

        // Map iteration order is unspecified; sort before asserting.
        let mut slots = slots;
        slots.sort_by_key(|s| s.position);

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].position, 1);
        assert_eq!(slots[0].drive_model_id, Some(441));
        assert_eq!(slots[2].position, 8);
        assert_eq!(slots[2].drive_model_id, None);
    }

    #[test]
    fn test_non_numeric_key_fails_whole_call() {
        let err = parse_drive_slots(&raw(&[("front-left", Some(441))])).unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::Parse);
        assert_eq!(
            err.to_string(),
            "can't parse drive slot position 'front-left' as an integer"
        );
    }

    #[test]
    fn test_empty_mapping_yields_empty_list() {
        assert!(parse_drive_slots(&HashMap::new()).unwrap().is_empty());
    }
}
