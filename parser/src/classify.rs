//! Key classification tables for the object stream.
//!
//! The session tool's output format varies across array firmware revisions,
//! so the line-level quirks live in data tables rather than parser control
//! flow: the subitem singular→plural table, the key remap table, and the
//! re-root key set. Accommodating a new firmware variant means extending a
//! table, not touching the stream parser.

/// Singular subitem keys mapped to the plural collection name they are filed
/// under on their owning top-level record.
pub const SUBITEMS: &[(&str, &str)] = &[
    ("fan", "fans"),
    ("source", "powersources"),
    ("hostport", "hostports"),
    ("module", "modules"),
    ("sensor", "sensors"),
    ("powersupply", "powersupplies"),
    ("bus", "communicationbuses"),
    ("port", "fibrechannelports"),
];

/// Firmware-specific key spellings rewritten before dispatch.
///
/// `iomodules` collides with nothing in the subitem table (the singular is
/// `module`), so after the rewrite it is handled as a plain attribute under
/// the key `modules` and never opens a child block.
pub const KEY_REMAPS: &[(&str, &str)] = &[("iomodules", "modules")];

/// Keys that collapse the current record back to its owning top-level
/// record without opening a new block.
pub const REROOT_KEYS: &[&str] = &["controllertemperaturestatus"];

/// Returns the plural collection name if `key` starts a subitem block.
pub fn collection_for_subitem(key: &str) -> Option<&'static str> {
    SUBITEMS
        .iter()
        .find(|(singular, _)| *singular == key)
        .map(|(_, plural)| *plural)
}

/// Applies the key remap table, returning `key` unchanged when no remap
/// matches.
pub fn remap_key(key: &str) -> &str {
    KEY_REMAPS
        .iter()
        .find(|(from, _)| *from == key)
        .map_or(key, |(_, to)| *to)
}

/// Returns `true` if `key` re-roots the current record to its owner.
pub fn is_reroot_key(key: &str) -> bool {
    REROOT_KEYS.contains(&key)
}
