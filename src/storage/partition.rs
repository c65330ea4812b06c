//! Partition parsing and application against merged layouts.

use crate::api::{HostLayout, LayoutPartition};
use crate::error::StorageError;

use super::tokens::{parse_int, TokenPolicy};

/// A parsed partition descriptor and the slot set that locates its layout.
///
/// Intermediate only: groups are consumed by [`apply_partitions`] and do
/// not appear in the final request structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionGroup {
    /// Sorted slot positions identifying the owning layout.
    pub slots: Vec<u32>,
    /// The partition to insert or override.
    pub partition: LayoutPartition,
}

/// Parses repeated partition descriptor strings into groups.
///
/// Recognized tokens: `slot` (repeatable integer), `target` (mount path),
/// `size` (megabytes), `fs` (filesystem type) and `fill` (true when the
/// value matches "true" case-insensitively, false otherwise). The group's
/// slot list is sorted ascending before being returned.
///
/// # Errors
///
/// Returns a parse error for non-integer `slot`/`size` values, and a
/// validation error when a descriptor carries no `slot` token.
pub fn parse_partitions(
    raw: &[String],
    policy: TokenPolicy,
) -> Result<Vec<PartitionGroup>, StorageError> {
    let mut groups = Vec::with_capacity(raw.len());

    for desc in raw {
        let mut slots: Vec<u32> = Vec::new();
        let mut partition = LayoutPartition::default();

        for token in desc.split(',') {
            let Some((key, value)) = token.split_once('=') else {
                policy.on_bare_token(token, desc)?;
                continue;
            };
            match key {
                "slot" => slots.push(parse_int("slot", value)?),
                "target" => partition.target = value.to_string(),
                "size" => partition.size = parse_int("size", value)?,
                "fs" => partition.fs = Some(value.to_string()),
                "fill" => partition.fill = value.eq_ignore_ascii_case("true"),
                _ => policy.on_unknown_key(key, desc)?,
            }
        }

        if slots.is_empty() {
            return Err(StorageError::PartitionMissingSlot { raw: desc.clone() });
        }
        slots.sort_unstable();

        groups.push(PartitionGroup { slots, partition });
    }

    Ok(groups)
}

/// Applies partition groups to the layout whose slot set matches exactly.
///
/// Matching is by value equality of sorted slot sets, never by subset. In
/// the matched layout, a partition with the same mount target is replaced
/// in place (keeping its list position); otherwise the partition is
/// appended. Changes are staged on a copy and swapped in only when every
/// group found its layout, so a failing group leaves `layouts` untouched.
///
/// # Errors
///
/// Returns a validation error naming the slot set of the first group that
/// matches no layout.
pub fn apply_partitions(
    layouts: &mut Vec<HostLayout>,
    groups: &[PartitionGroup],
) -> Result<(), StorageError> {
    let mut staged = layouts.clone();

    for group in groups {
        let target_layout = staged
            .iter_mut()
            .find(|layout| {
                let mut positions = layout.slot_positions.clone();
                positions.sort_unstable();
                positions == group.slots
            })
            .ok_or_else(|| StorageError::NoMatchingLayout {
                slots: group.slots.clone(),
            })?;

        match target_layout
            .partitions
            .iter_mut()
            .find(|p| p.target == group.partition.target)
        {
            Some(existing) => *existing = group.partition.clone(),
            None => target_layout.partitions.push(group.partition.clone()),
        }
    }

    *layouts = staged;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageErrorKind;

    fn descs(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    fn layout(slots: &[u32], raid: u32) -> HostLayout {
        HostLayout {
            slot_positions: slots.to_vec(),
            raid: Some(raid),
            partitions: vec![],
        }
    }

    #[test]
    fn test_parse_full_descriptor() {
        let groups = parse_partitions(
            &descs(&["slot=2,slot=1,target=/boot,size=500,fs=ext4"]),
            TokenPolicy::Lenient,
        )
        .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].slots, vec![1, 2]); // sorted ascending
        assert_eq!(groups[0].partition.target, "/boot");
        assert_eq!(groups[0].partition.size, 500);
        assert_eq!(groups[0].partition.fs.as_deref(), Some("ext4"));
        assert!(!groups[0].partition.fill);
    }

    #[test]
    fn test_parse_fill_is_case_insensitive() {
        let groups = parse_partitions(
            &descs(&["slot=1,target=/,fill=TRUE", "slot=2,target=/,fill=yes"]),
            TokenPolicy::Lenient,
        )
        .unwrap();
        assert!(groups[0].partition.fill);
        assert!(!groups[1].partition.fill); // anything but "true" is false
    }

    #[test]
    fn test_parse_missing_slot_fails() {
        let err = parse_partitions(&descs(&["target=/boot,size=500"]), TokenPolicy::Lenient)
            .unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "no slot specified for partition: 'target=/boot,size=500'"
        );
    }

    #[test]
    fn test_parse_non_integer_size_fails() {
        let err = parse_partitions(
            &descs(&["slot=1,target=/,size=big"]),
            TokenPolicy::Lenient,
        )
        .unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::Parse);
        assert_eq!(err.to_string(), "can't parse size 'big' as an integer");
    }

    #[test]
    fn test_parse_skips_unknown_tokens() {
        let groups = parse_partitions(
            &descs(&["slot=1,label=root,target=/,oops"]),
            TokenPolicy::Lenient,
        )
        .unwrap();
        assert_eq!(groups[0].partition.target, "/");
    }

    #[test]
    fn test_apply_appends_new_target() {
        let mut layouts = vec![layout(&[1, 2], 1)];
        let groups = parse_partitions(
            &descs(&["slot=1,slot=2,target=/boot,size=500,fs=ext4"]),
            TokenPolicy::Lenient,
        )
        .unwrap();

        apply_partitions(&mut layouts, &groups).unwrap();
        assert_eq!(layouts[0].partitions.len(), 1);
        assert_eq!(layouts[0].partitions[0].target, "/boot");
    }

    #[test]
    fn test_apply_overrides_by_target_in_place() {
        let mut layouts = vec![layout(&[1, 2], 1)];
        let groups = parse_partitions(
            &descs(&[
                "slot=1,slot=2,target=/boot,size=500,fs=ext4",
                "slot=1,slot=2,target=/,fill=true,fs=ext4",
                "slot=1,slot=2,target=/boot,size=1024,fs=xfs",
            ]),
            TokenPolicy::Lenient,
        )
        .unwrap();

        apply_partitions(&mut layouts, &groups).unwrap();

        // Exactly one /boot, replaced in place with the later definition.
        assert_eq!(layouts[0].partitions.len(), 2);
        assert_eq!(layouts[0].partitions[0].target, "/boot");
        assert_eq!(layouts[0].partitions[0].size, 1024);
        assert_eq!(layouts[0].partitions[0].fs.as_deref(), Some("xfs"));
        assert_eq!(layouts[0].partitions[1].target, "/");
    }

    #[test]
    fn test_apply_match_is_exact_set_equality() {
        // {1,2} matches neither a superset {1,2,3} nor a subset {1}.
        let mut layouts = vec![layout(&[1, 2, 3], 5), layout(&[1], 0)];
        let groups = parse_partitions(
            &descs(&["slot=1,slot=2,target=/boot,size=500"]),
            TokenPolicy::Lenient,
        )
        .unwrap();

        let err = apply_partitions(&mut layouts, &groups).unwrap_err();
        assert_eq!(
            err.to_string(),
            "can't apply partition: no layout found with slots: [1, 2]"
        );
    }

    #[test]
    fn test_apply_match_is_order_insensitive() {
        let mut layouts = vec![layout(&[2, 1], 1)];
        let groups = parse_partitions(
            &descs(&["slot=1,slot=2,target=/boot,size=500"]),
            TokenPolicy::Lenient,
        )
        .unwrap();

        apply_partitions(&mut layouts, &groups).unwrap();
        assert_eq!(layouts[0].partitions.len(), 1);
    }

    #[test]
    fn test_apply_failure_leaves_layouts_untouched() {
        // The second group matches nothing; the first group's partition
        // must not survive on the layout list.
        let mut layouts = vec![layout(&[1, 2], 1)];
        let groups = parse_partitions(
            &descs(&[
                "slot=1,slot=2,target=/boot,size=500",
                "slot=7,target=/data,fill=true",
            ]),
            TokenPolicy::Lenient,
        )
        .unwrap();

        let err = apply_partitions(&mut layouts, &groups).unwrap_err();
        assert_eq!(
            err.to_string(),
            "can't apply partition: no layout found with slots: [7]"
        );
        assert!(layouts[0].partitions.is_empty());
    }
}
