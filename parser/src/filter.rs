//! Post-parse filtering for full-system listings.

use tracing::debug;

use sssu_session_core::{FULL_SYSTEM_LISTING, ObjectRecord};

/// Restricts a full-system listing to one named system.
///
/// Applies only when `command` is the canonical full-system listing
/// ([`FULL_SYSTEM_LISTING`]) and a target system name was configured; any
/// other command, or no target, passes the records through unchanged. The
/// filtered result may be empty when no record's `objectname` matches.
///
/// The target is an explicit parameter, not ambient configuration, so two
/// concurrent parses can filter for different systems.
pub fn filter_system_listing(
    records: Vec<ObjectRecord>,
    command: &str,
    target_system: Option<&str>,
) -> Vec<ObjectRecord> {
    let Some(target) = target_system else {
        return records;
    };
    if command != FULL_SYSTEM_LISTING {
        return records;
    }

    let before = records.len();
    let filtered: Vec<ObjectRecord> = records
        .into_iter()
        .filter(|record| record.attr("objectname") == Some(target))
        .collect();
    debug!(
        target,
        kept = filtered.len(),
        dropped = before - filtered.len(),
        "filtered full-system listing"
    );
    filtered
}
