//! Core types for parsed SSSU session output.
//!
//! This crate defines the foundational types shared by the session-output
//! parser and its consumers:
//!
//! - [`ObjectRecord`] — one array object (system, disk, controller, vdisk)
//!   with flat attributes and named collections of child records.
//! - [`SessionResponse`] — the raw material one session-tool invocation hands
//!   to the parser (command string, decoded output, exit status).
//! - [`SessionError`] — the failure taxonomy for response validation.
//!
//! # Example
//!
//! ```
//! use sssu_session_core::ObjectRecord;
//!
//! let mut controller = ObjectRecord::top_level();
//! controller.set_attr_if_absent("objectname", "Controller A");
//! controller.set_attr_if_absent("operationalstate", "good");
//!
//! let mut fan = ObjectRecord::child("fan");
//! fan.set_attr_if_absent("fanname", "Fan 1");
//! controller.push_child("fans", fan);
//!
//! assert_eq!(controller.attr("objectname"), Some("Controller A"));
//! assert_eq!(controller.collection("fans").len(), 1);
//! ```

mod error;
mod types;

pub use error::{Result, SessionError};
pub use types::{FULL_SYSTEM_LISTING, ObjectRecord, SessionResponse};
