//! Parsing of SSSU session-tool output into typed array object records.
//!
//! The vendor session tool prints array objects (systems, disks,
//! controllers, vdisks and their sub-components) as unstructured text. This
//! crate validates the fixed response envelope, parses the object stream
//! into [`ObjectRecord`]s, and optionally restricts a full-system listing to
//! one named system. Running the session tool itself is out of scope; the
//! parser consumes a captured [`SessionResponse`].
//!
//! # Main entry points
//!
//! - [`parse_session_response`] — validate and parse one invocation's
//!   response, applying the system filter where it applies.
//! - [`parse_session_output`] — validate and parse raw output text without
//!   response-level status handling or filtering.
//!
//! # Example
//!
//! ```
//! use sssu_session_parser::parse_session_output;
//!
//! let output = "\n\
//! \n\
//! SSSU for HP StorageWorks Command View EVA\n\
//! Version: 6.0\n\
//! Build: 34\n\
//! NoSystemSelected> ls system full\n\
//! object\n\
//! objectname.......: SYS1\n\
//! operationalstate.......: good\n\
//! \n";
//!
//! let records = parse_session_output(output).unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].attr("objectname"), Some("SYS1"));
//! assert_eq!(records[0].attr("operationalstate"), Some("good"));
//! ```

pub mod classify;
pub mod envelope;
pub mod filter;
pub mod normalize;
pub mod output;
pub mod script;
pub mod stream;

pub use sssu_session_core::{
    FULL_SYSTEM_LISTING, ObjectRecord, Result, SessionError, SessionResponse,
};

use tracing::debug;

/// Exit statuses above this are unusable.
///
/// Scripts run with `set option on_error=continue`, so status 1 still
/// carries a complete transcript.
const MAX_USABLE_STATUS: i32 = 1;

/// Parses raw session output into top-level object records.
///
/// Normalizes the transcript, validates the envelope, and parses the object
/// stream. Any envelope or embedded-error failure aborts before object
/// parsing; no partial lists are returned.
pub fn parse_session_output(output: &str) -> Result<Vec<ObjectRecord>> {
    if output.is_empty() {
        return Err(SessionError::EmptyOutput);
    }

    let lines = normalize::session_lines(output);
    let payload = envelope::validate_envelope(&lines)?;
    Ok(stream::parse_object_stream(payload))
}

/// Parses one session-tool invocation's response.
///
/// Rejects unusable exit statuses and empty output before looking at the
/// text, then validates and parses it. When the issued command was the
/// full-system listing and a target system is given, the result is
/// restricted to that system (see
/// [`filter_system_listing`](filter::filter_system_listing)).
pub fn parse_session_response(
    response: &SessionResponse,
    target_system: Option<&str>,
) -> Result<Vec<ObjectRecord>> {
    if response.status > MAX_USABLE_STATUS {
        return Err(SessionError::ProcessFailure {
            status: response.status,
        });
    }

    let records = parse_session_output(&response.output)?;
    debug!(
        command = %response.command,
        objects = records.len(),
        "parsed session response"
    );
    Ok(filter::filter_system_listing(
        records,
        &response.command,
        target_system,
    ))
}
