//! Record types for array objects reported by the session tool.
//!
//! The session tool prints array objects as blank-line-delimited blocks of
//! `key .....: value` attribute lines, with nested sub-object blocks (fans,
//! power sources, host ports) interleaved. The parser turns each top-level
//! block into one [`ObjectRecord`]; nested blocks become child records filed
//! under a pluralized collection name on their owning top-level record.
//!
//! The types are designed for serialization with [`serde`] and round-trip
//! through JSON and YAML.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The canonical full-system listing command.
///
/// The system filter only applies to responses produced by this command.
pub const FULL_SYSTEM_LISTING: &str = "ls system full";

/// One array object parsed from session output.
///
/// An `ObjectRecord` is either top-level (emitted in parse results) or a
/// child filed under a named collection of a top-level record. Children are
/// always one level deep and carry the singular object-type key that
/// introduced them (`fan`, `module`, ...); top-level records do not.
///
/// Attribute writes are first-come-first-served: once a key is present its
/// value never changes for the lifetime of the record.
///
/// # Examples
///
/// ```
/// use sssu_session_core::ObjectRecord;
///
/// let mut system = ObjectRecord::top_level();
/// assert!(system.set_attr_if_absent("objectname", "SYS1"));
/// assert!(!system.set_attr_if_absent("objectname", "SYS2"));
/// assert_eq!(system.attr("objectname"), Some("SYS1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Singular object-type key for child records (`fan`, `sensor`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    /// Flat attributes, first occurrence wins.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Named collections of child records, in insertion order per collection.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub collections: BTreeMap<String, Vec<ObjectRecord>>,
}

impl ObjectRecord {
    /// Creates an empty top-level record.
    pub fn top_level() -> Self {
        Self::default()
    }

    /// Creates an empty child record of the given object type.
    ///
    /// # Examples
    ///
    /// ```
    /// use sssu_session_core::ObjectRecord;
    ///
    /// let fan = ObjectRecord::child("fan");
    /// assert_eq!(fan.object_type.as_deref(), Some("fan"));
    /// ```
    pub fn child(object_type: &str) -> Self {
        Self {
            object_type: Some(object_type.to_string()),
            ..Self::default()
        }
    }

    /// Returns an attribute value by name.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Stores an attribute unless the key is already present.
    ///
    /// Returns `true` if the value was stored. Repeated keys within one
    /// object block keep their first value, so callers must never overwrite.
    pub fn set_attr_if_absent(&mut self, key: &str, value: &str) -> bool {
        if self.attributes.contains_key(key) {
            return false;
        }
        self.attributes.insert(key.to_string(), value.to_string());
        true
    }

    /// Returns the child records of a named collection.
    ///
    /// Missing collections read as empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sssu_session_core::ObjectRecord;
    ///
    /// let system = ObjectRecord::top_level();
    /// assert!(system.collection("fans").is_empty());
    /// ```
    pub fn collection(&self, name: &str) -> &[ObjectRecord] {
        self.collections.get(name).map_or(&[], Vec::as_slice)
    }

    /// Appends a child record to a named collection, creating it if absent.
    pub fn push_child(&mut self, collection: &str, record: ObjectRecord) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    /// `true` for records filed under another record's collection.
    pub fn is_child(&self) -> bool {
        self.object_type.is_some()
    }
}

/// The raw material of one session-tool invocation.
///
/// Produced by whatever runs the session tool (out of this crate's scope)
/// and consumed by the response parser. The command string is kept verbatim
/// so the system filter can recognize the full-system listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The literal command issued to the session tool.
    pub command: String,
    /// Decoded stdout of the invocation.
    pub output: String,
    /// Exit status of the invocation.
    pub status: i32,
}

impl SessionResponse {
    /// Creates a response from an invocation's command, output, and status.
    pub fn new(command: &str, output: &str, status: i32) -> Self {
        Self {
            command: command.to_string(),
            output: output.to_string(),
            status,
        }
    }
}
