//! Drive/layout/partition configuration builder for dedicated server orders.
//!
//! This module translates flat, repeatable CLI flag values into the nested
//! drives structure of a [`DedicatedServerCreateInput`]:
//!
//! - `--drive-slot <position>=<model-id>` → bay assignments
//!   ([`parse_drive_slots`])
//! - `--layout slot=N,...,raid=N` → RAID groupings ([`parse_layouts`]),
//!   merged with any layouts pre-seeded from `--input` JSON
//!   ([`merge_layouts`])
//! - `--partition slot=N,...,target=PATH,...` → partition specs, located
//!   in the merged layout set by exact slot-set equality and inserted or
//!   overridden by mount target ([`parse_partitions`],
//!   [`apply_partitions`])
//!
//! [`populate_storage`] composes the four steps in the fixed order the
//! host command requires, short-circuiting on the first error. Everything
//! here is synchronous and pure over the request value being built; the
//! result is handed to the API client unchanged.

mod layout;
mod partition;
mod slots;
mod tokens;

pub use layout::{merge_layouts, parse_layouts};
pub use partition::{apply_partitions, parse_partitions, PartitionGroup};
pub use slots::parse_drive_slots;
pub use tokens::TokenPolicy;

use std::collections::HashMap;

use crate::api::DedicatedServerCreateInput;
use crate::error::StorageError;

/// Builds the drives structure of a create request from raw flag values.
///
/// Steps run in a fixed order, short-circuiting on the first error:
/// drive slots, then layouts, then a guard that partitions were not given
/// without any layout existing anywhere (supplied now or pre-seeded on
/// `input` from a JSON file), then the layout merge, then partition
/// application against the merged set. On error `input` may retain parsed
/// drive slots and merged layouts, but the caller aborts the whole order
/// before anything is sent, so no partially-built request ever leaves the
/// process.
///
/// # Errors
///
/// Returns any [`StorageError`] raised by the individual steps.
pub fn populate_storage(
    input: &mut DedicatedServerCreateInput,
    drive_slots: &HashMap<String, Option<i64>>,
    layouts: &[String],
    partitions: &[String],
    policy: TokenPolicy,
) -> Result<(), StorageError> {
    if !drive_slots.is_empty() {
        input.drives.slots = parse_drive_slots(drive_slots)?;
    }

    let incoming = parse_layouts(layouts, policy)?;

    if !partitions.is_empty() && incoming.is_empty() && input.drives.layout.is_empty() {
        return Err(StorageError::PartitionWithoutLayout);
    }

    let existing = std::mem::take(&mut input.drives.layout);
    input.drives.layout = merge_layouts(existing, incoming);

    if !partitions.is_empty() {
        let groups = parse_partitions(partitions, policy)?;
        apply_partitions(&mut input.drives.layout, &groups)?;
    }

    Ok(())
}
