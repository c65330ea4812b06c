//! RAID layout parsing and merging.

use std::collections::HashSet;

use tracing::warn;

use crate::api::HostLayout;
use crate::error::StorageError;

use super::tokens::{parse_int, TokenPolicy};

/// Parses repeated `slot=N,...,raid=N` descriptor strings into layouts.
///
/// `slot` is repeatable; order of appearance is preserved and duplicates
/// are not removed at this stage. `raid` takes the last occurrence when
/// repeated. Each string is parsed independently and the whole call fails
/// on the first invalid one.
///
/// # Errors
///
/// Returns a parse error for non-integer `slot`/`raid` values, and a
/// validation error when a descriptor lacks `slot` or `raid` entirely.
pub fn parse_layouts(
    raw: &[String],
    policy: TokenPolicy,
) -> Result<Vec<HostLayout>, StorageError> {
    let mut layouts = Vec::with_capacity(raw.len());

    for desc in raw {
        let mut layout = HostLayout::default();

        for token in desc.split(',') {
            let Some((key, value)) = token.split_once('=') else {
                policy.on_bare_token(token, desc)?;
                continue;
            };
            match key {
                "slot" => layout.slot_positions.push(parse_int("slot", value)?),
                "raid" => layout.raid = Some(parse_int("raid", value)?),
                _ => policy.on_unknown_key(key, desc)?,
            }
        }

        if layout.slot_positions.is_empty() {
            return Err(StorageError::LayoutMissingSlots { raw: desc.clone() });
        }
        if layout.raid.is_none() {
            return Err(StorageError::LayoutMissingRaid { raw: desc.clone() });
        }

        layouts.push(layout);
    }

    Ok(layouts)
}

/// Folds newly supplied layouts into previously-known layouts.
///
/// Per incoming layout, in order: the first existing layout whose slot set
/// intersects the incoming one is the merge target — its slot set becomes
/// the sorted union of both and its RAID level is overwritten by the
/// incoming one. Without any overlap the incoming layout is appended
/// unchanged. Layouts are identified purely by slot-set overlap; two
/// layouts with disjoint slot sets are never merged, and only the layouts
/// that were already known before this call are merge candidates —
/// incoming layouts never merge with each other.
#[must_use]
pub fn merge_layouts(existing: Vec<HostLayout>, incoming: Vec<HostLayout>) -> Vec<HostLayout> {
    let mut merged = existing;
    let known = merged.len();

    for layout in incoming {
        let positions: HashSet<u32> = layout.slot_positions.iter().copied().collect();
        let matches: Vec<usize> = merged[..known]
            .iter()
            .enumerate()
            .filter(|(_, l)| l.slot_positions.iter().any(|p| positions.contains(p)))
            .map(|(i, _)| i)
            .collect();

        match matches.split_first() {
            Some((&first, rest)) => {
                if !rest.is_empty() {
                    // A slot should belong to exactly one layout; only the
                    // first overlapping layout receives the merge.
                    warn!(
                        "layout with slots {:?} overlaps {} existing layouts; merging into the first",
                        layout.slot_positions,
                        matches.len()
                    );
                }
                let target = &mut merged[first];
                for position in &layout.slot_positions {
                    if !target.slot_positions.contains(position) {
                        target.slot_positions.push(*position);
                    }
                }
                target.slot_positions.sort_unstable();
                target.raid = layout.raid;
            }
            None => merged.push(layout),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageErrorKind;

    fn descs(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_single_layout() {
        let layouts =
            parse_layouts(&descs(&["slot=1,slot=2,raid=1"]), TokenPolicy::Lenient).unwrap();
        assert_eq!(layouts.len(), 1);
        assert_eq!(layouts[0].slot_positions, vec![1, 2]);
        assert_eq!(layouts[0].raid, Some(1));
        assert!(layouts[0].partitions.is_empty());
    }

    #[test]
    fn test_parse_preserves_slot_order_and_duplicates() {
        let layouts =
            parse_layouts(&descs(&["slot=3,slot=1,slot=3,raid=0"]), TokenPolicy::Lenient)
                .unwrap();
        assert_eq!(layouts[0].slot_positions, vec![3, 1, 3]);
    }

    #[test]
    fn test_parse_last_raid_wins() {
        let layouts =
            parse_layouts(&descs(&["slot=1,raid=1,raid=10"]), TokenPolicy::Lenient).unwrap();
        assert_eq!(layouts[0].raid, Some(10));
    }

    #[test]
    fn test_parse_missing_slots_fails() {
        let err = parse_layouts(&descs(&["raid=5"]), TokenPolicy::Lenient).unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::Validation);
        assert_eq!(err.to_string(), "slots not passed for layout 'raid=5'");
    }

    #[test]
    fn test_parse_missing_raid_fails() {
        let err = parse_layouts(&descs(&["slot=1"]), TokenPolicy::Lenient).unwrap_err();
        assert_eq!(err.to_string(), "raid not passed for layout 'slot=1'");
    }

    #[test]
    fn test_parse_skips_unknown_and_malformed_tokens() {
        let layouts = parse_layouts(
            &descs(&["slot=1,spare,level=9,raid=6"]),
            TokenPolicy::Lenient,
        )
        .unwrap();
        assert_eq!(layouts[0].slot_positions, vec![1]);
        assert_eq!(layouts[0].raid, Some(6));
    }

    #[test]
    fn test_parse_strict_rejects_unknown_key() {
        let err = parse_layouts(&descs(&["slot=1,level=9,raid=6"]), TokenPolicy::Strict)
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown key 'level' in 'slot=1,level=9,raid=6'");
    }

    #[test]
    fn test_parse_non_integer_slot_fails() {
        let err = parse_layouts(&descs(&["slot=two,raid=1"]), TokenPolicy::Lenient).unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::Parse);
    }

    #[test]
    fn test_parse_fail_fast_discards_earlier_layouts() {
        let err = parse_layouts(
            &descs(&["slot=1,raid=1", "slot=2"]),
            TokenPolicy::Lenient,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "raid not passed for layout 'slot=2'");
    }

    fn layout(slots: &[u32], raid: u32) -> HostLayout {
        HostLayout {
            slot_positions: slots.to_vec(),
            raid: Some(raid),
            partitions: vec![],
        }
    }

    #[test]
    fn test_merge_disjoint_appends_unchanged() {
        let merged = merge_layouts(vec![layout(&[1], 1)], vec![layout(&[2], 1)]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].slot_positions, vec![1]);
        assert_eq!(merged[1].slot_positions, vec![2]);
    }

    #[test]
    fn test_merge_incoming_never_merge_with_each_other() {
        // Only previously-known layouts are merge candidates, so the same
        // disjoint descriptor supplied twice yields two separate entries.
        let merged = merge_layouts(vec![], vec![layout(&[4], 5), layout(&[4], 5)]);
        assert_eq!(merged.len(), 2);

        // A later call does merge against what an earlier call appended.
        let merged = merge_layouts(merged, vec![layout(&[4], 6)]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].raid, Some(6));
    }

    #[test]
    fn test_merge_overlap_unions_slots_and_takes_incoming_raid() {
        let merged = merge_layouts(vec![layout(&[1, 2], 1)], vec![layout(&[2, 3], 5)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].slot_positions, vec![1, 2, 3]);
        assert_eq!(merged[0].raid, Some(5));
    }

    #[test]
    fn test_merge_first_overlap_wins() {
        let merged = merge_layouts(
            vec![layout(&[1], 1), layout(&[2], 1)],
            vec![layout(&[1, 2], 10)],
        );
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].slot_positions, vec![1, 2]);
        assert_eq!(merged[0].raid, Some(10));
        // The second layout keeps its now-overlapping slot set untouched.
        assert_eq!(merged[1].slot_positions, vec![2]);
        assert_eq!(merged[1].raid, Some(1));
    }

    #[test]
    fn test_merge_keeps_target_partitions() {
        let mut existing = layout(&[1, 2], 1);
        existing.partitions.push(crate::api::LayoutPartition {
            target: String::from("/boot"),
            size: 500,
            fill: false,
            fs: Some(String::from("ext4")),
        });
        let merged = merge_layouts(vec![existing], vec![layout(&[2, 3], 5)]);
        assert_eq!(merged[0].partitions.len(), 1);
        assert_eq!(merged[0].partitions[0].target, "/boot");
    }

    #[test]
    fn test_merge_empty_incoming_is_identity() {
        let merged = merge_layouts(vec![layout(&[1, 2], 1)], vec![]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].slot_positions, vec![1, 2]);
    }
}
