//! Object stream parsing.
//!
//! Consumes the payload lines that follow a validated envelope and builds an
//! ordered list of top-level [`ObjectRecord`]s. Blocks are blank-line
//! delimited; a literal `object` line opens a top-level record, a subitem
//! key (see [`classify`](crate::classify)) opens a one-level-deep child
//! filed under the owner's pluralized collection, and dot-leader lines
//! (`key .....: value`) carry attributes.
//!
//! Top-level records live in an arena and the result list holds arena
//! indices, so the "already queued" check is an identity comparison: two
//! textually identical blocks always yield two distinct records, and one
//! record queued from several lines is emitted once.

use std::mem;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use sssu_session_core::ObjectRecord;

use crate::classify;

/// Attribute lines carry a dot-leader between key and value, either attached
/// to the key (`objectname.......: SYS1`) or as its own column
/// (`objectname .......: SYS1`).
static DOT_LEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.+:").expect("static regex must compile"));

/// Literal key opening a top-level object block.
const OBJECT_KEY: &str = "object";

/// Position of the record currently accumulating attributes.
///
/// Children address their owner by arena index, never by back-reference, so
/// the record graph stays acyclic.
#[derive(Debug, Clone, Copy)]
enum Cursor {
    Top(usize),
    Child {
        owner: usize,
        collection: &'static str,
        index: usize,
    },
}

impl Cursor {
    /// Arena index of the owning top-level record.
    fn owner(self) -> usize {
        match self {
            Cursor::Top(index) => index,
            Cursor::Child { owner, .. } => owner,
        }
    }
}

/// Parses payload lines into the ordered list of top-level records.
///
/// Malformed structure (a subitem or re-root key before any block has
/// opened) is tolerated as a local line skip; array firmware emits enough
/// textual variation that the stream parser must never hard-fail. End of
/// stream flushes nothing: a trailing block with no closing blank line is
/// emitted only if one of its own later lines already queued its owner via
/// the per-line rule above, so a bare trailing `object` line is dropped.
pub fn parse_object_stream(lines: &[String]) -> Vec<ObjectRecord> {
    let mut arena: Vec<ObjectRecord> = Vec::new();
    let mut results: Vec<usize> = Vec::new();
    let mut current: Option<Cursor> = None;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if let Some(cursor) = current.take() {
                queue_owner(&mut results, cursor.owner());
            }
            continue;
        }

        // A non-blank line while a block is open mirrors the closure of a
        // previous unterminated block: the owner is queued without clearing
        // the cursor. Identity dedup keeps repeats out of the results.
        if let Some(cursor) = current {
            queue_owner(&mut results, cursor.owner());
        }

        let first = trimmed.split_whitespace().next().unwrap_or_default();
        let key = classify::remap_key(normalize_key(first));

        if key == OBJECT_KEY {
            let index = arena.len();
            arena.push(ObjectRecord::top_level());
            current = Some(Cursor::Top(index));
        } else if classify::is_reroot_key(key) {
            if let Some(cursor) = current {
                current = Some(Cursor::Top(cursor.owner()));
            }
        } else if let Some(collection) = classify::collection_for_subitem(key) {
            if let Some(cursor) = current {
                let owner = cursor.owner();
                let children = arena[owner]
                    .collections
                    .entry(collection.to_string())
                    .or_default();
                children.push(ObjectRecord::child(key));
                let index = children.len() - 1;
                current = Some(Cursor::Child {
                    owner,
                    collection,
                    index,
                });
            }
        } else if DOT_LEADER_RE.is_match(trimmed) {
            if let Some(record) = current.and_then(|cursor| record_mut(&mut arena, cursor)) {
                record.set_attr_if_absent(key, &attribute_value(trimmed));
            }
        }
    }

    debug!(
        objects = results.len(),
        blocks = arena.len(),
        "parsed session object stream"
    );
    results
        .into_iter()
        .map(|index| mem::take(&mut arena[index]))
        .collect()
}

/// Queues an owner into the result list unless that exact record (by arena
/// index) is already there.
fn queue_owner(results: &mut Vec<usize>, owner: usize) {
    if !results.contains(&owner) {
        results.push(owner);
    }
}

/// Strips an attached dot-leader from a key token.
///
/// `objectname.......:` becomes `objectname`; tokens without a trailing
/// colon pass through untouched.
fn normalize_key(token: &str) -> &str {
    match token.strip_suffix(':') {
        Some(stripped) => stripped.trim_end_matches('.'),
        None => token,
    }
}

/// Extracts the attribute value from a dot-leader line.
///
/// With a detached leader the value starts at the third column; with the
/// leader attached to the key it starts at the second. Values are rejoined
/// with single spaces.
fn attribute_value(trimmed: &str) -> String {
    let mut tokens = trimmed.split_whitespace();
    let first = tokens.next().unwrap_or_default();
    if !first.ends_with(':') {
        tokens.next();
    }
    tokens.collect::<Vec<_>>().join(" ")
}

fn record_mut(arena: &mut [ObjectRecord], cursor: Cursor) -> Option<&mut ObjectRecord> {
    match cursor {
        Cursor::Top(index) => arena.get_mut(index),
        Cursor::Child {
            owner,
            collection,
            index,
        } => arena
            .get_mut(owner)?
            .collections
            .get_mut(collection)?
            .get_mut(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(lines: &[&str]) -> Vec<ObjectRecord> {
        let owned: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
        parse_object_stream(&owned)
    }

    #[test]
    fn one_block_with_detached_dot_leaders() {
        let records = parse(&[
            "object",
            "  objectname ..............: SYS1",
            "  operationalstate ........: good",
            "",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attr("objectname"), Some("SYS1"));
        assert_eq!(records[0].attr("operationalstate"), Some("good"));
        assert!(records[0].collections.is_empty());
    }

    #[test]
    fn attached_dot_leaders_parse_identically() {
        let records = parse(&[
            "object",
            "objectname.......: SYS1",
            "operationalstate.......: good",
            "",
            "",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attr("objectname"), Some("SYS1"));
        assert_eq!(records[0].attr("operationalstate"), Some("good"));
    }

    #[test]
    fn first_occurrence_of_a_key_wins() {
        let records = parse(&[
            "object",
            "  operationalstate ....: good",
            "  operationalstate ....: failed",
            "",
        ]);
        assert_eq!(records[0].attr("operationalstate"), Some("good"));
    }

    #[test]
    fn identical_blocks_stay_distinct_records() {
        let records = parse(&[
            "object",
            "  objectname ....: SYS1",
            "",
            "object",
            "  objectname ....: SYS1",
            "",
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[test]
    fn object_line_without_preceding_blank_starts_a_new_record() {
        // Structurally invalid input: SYS2's block opens before SYS1's
        // closes. Attributes must not merge across the two objects.
        let records = parse(&[
            "object",
            "  objectname ....: SYS1",
            "object",
            "  objectname ....: SYS2",
            "",
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].attr("objectname"), Some("SYS1"));
        assert_eq!(records[1].attr("objectname"), Some("SYS2"));
    }

    #[test]
    fn subitem_blocks_route_into_the_owner_collection() {
        let records = parse(&[
            "object",
            "  objectname ....: Controller A",
            "  fan",
            "    fanname ....: Fan 1",
            "    status ....: normal",
            "",
        ]);
        assert_eq!(records.len(), 1);
        let fans = records[0].collection("fans");
        assert_eq!(fans.len(), 1);
        assert_eq!(fans[0].object_type.as_deref(), Some("fan"));
        assert_eq!(fans[0].attr("fanname"), Some("Fan 1"));
        assert_eq!(fans[0].attr("status"), Some("normal"));
        // Child attributes never leak onto the owner.
        assert_eq!(records[0].attr("fanname"), None);
    }

    #[test]
    fn nested_subitems_always_file_under_the_top_level_owner() {
        // A sensor block opening while a fan block is current belongs to the
        // controller, not to the fan.
        let records = parse(&[
            "object",
            "  objectname ....: Controller A",
            "  fan",
            "    fanname ....: Fan 1",
            "  sensor",
            "    sensorname ....: Temp 1",
            "",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].collection("fans").len(), 1);
        assert_eq!(records[0].collection("sensors").len(), 1);
        assert!(records[0].collection("fans")[0].collections.is_empty());
    }

    #[test]
    fn iomodules_is_an_attribute_and_module_is_a_child() {
        let records = parse(&[
            "object",
            "  iomodules ....: 2",
            "  module",
            "    modulename ....: IO Module 1",
            "",
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attr("modules"), Some("2"));
        let modules = records[0].collection("modules");
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].attr("modulename"), Some("IO Module 1"));
    }

    #[test]
    fn reroot_key_collapses_back_to_the_owner() {
        let records = parse(&[
            "object",
            "  objectname ....: Controller A",
            "  sensor",
            "    sensorname ....: Temp 1",
            "  controllertemperaturestatus",
            "  cachecondition ....: good",
            "",
        ]);
        assert_eq!(records.len(), 1);
        // After the re-root the attribute lands on the controller, not the
        // sensor.
        assert_eq!(records[0].attr("cachecondition"), Some("good"));
        assert_eq!(records[0].collection("sensors")[0].attr("cachecondition"), None);
    }

    #[test]
    fn bare_trailing_object_line_is_dropped() {
        // Nothing follows the second `object` line, so its record is never
        // queued and end of stream does not flush it.
        let records = parse(&["object", "  objectname ....: SYS1", "", "object"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attr("objectname"), Some("SYS1"));
    }

    #[test]
    fn attribute_bearing_trailing_block_is_queued_per_line() {
        // The attribute line queues the open block's owner even though no
        // closing blank line ever arrives.
        let records = parse(&[
            "object",
            "  objectname ....: SYS1",
            "",
            "object",
            "  objectname ....: SYS2",
        ]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].attr("objectname"), Some("SYS2"));
    }

    #[test]
    fn subitem_before_any_block_is_skipped() {
        let records = parse(&["fan", "  fanname ....: Fan 1", "", "object", ""]);
        assert_eq!(records.len(), 1);
        assert!(records[0].collections.is_empty());
    }

    #[test]
    fn lines_without_a_dot_leader_are_not_attributes() {
        let records = parse(&["object", "  objectname ....: SYS1", "  loose prose line", ""]);
        assert_eq!(records[0].attributes.len(), 1);
    }

    #[test]
    fn parsing_is_deterministic() {
        let lines = [
            "object",
            "  objectname ....: SYS1",
            "  fan",
            "    fanname ....: Fan 1",
            "",
            "object",
            "  objectname ....: SYS2",
            "",
        ];
        assert_eq!(parse(&lines), parse(&lines));
    }

    #[test]
    fn multiple_spaces_in_values_collapse_to_single_spaces() {
        let records = parse(&["object", "  comments ....: spare   disk  group", ""]);
        assert_eq!(records[0].attr("comments"), Some("spare disk group"));
    }
}
