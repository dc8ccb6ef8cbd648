//! Response-envelope validation.
//!
//! Every session-tool response opens with a fixed six-line preamble: two
//! blank lines, the banner, a `Version:` line, a `Build:` line, and the
//! "no system selected" prompt (with the first scripted command echoed after
//! it). The validator checks the preamble, scans the payload for embedded
//! error reports, and hands the payload on to the object stream parser.

use tracing::debug;

use sssu_session_core::{Result, SessionError};

/// Leading text of the banner line.
pub const BANNER_MARKER: &str = "SSSU for HP";
/// Leading text of the version line.
pub const VERSION_MARKER: &str = "Version:";
/// Leading text of the build line.
pub const BUILD_MARKER: &str = "Build:";
/// The prompt printed before any system is selected. The trailing space
/// matters: the prompt line echoes the first scripted command after it.
pub const NO_SYSTEM_PROMPT: &str = "NoSystemSelected> ";
/// Token the session tool embeds in failed-command reports.
pub const ERROR_TOKEN: &str = "Error";
/// Marker ending the payload region scanned for [`ERROR_TOKEN`].
pub const INFORMATION_MARKER: &str = "information:";

/// Number of preamble lines consumed before the payload starts.
const ENVELOPE_LINES: usize = 6;

/// Validates the response preamble and returns the payload lines.
///
/// The six preamble checks run independently and unconditionally, each
/// stamping its own code (1-6) on failure, so a later failing check
/// overwrites an earlier one and only the last failure is reported. This is
/// the session tool's historical contract and is kept as-is; callers must
/// treat any error as "the whole response is unusable".
///
/// After the preamble, payload lines are scanned for [`ERROR_TOKEN`]; the
/// scan stops once a line containing [`INFORMATION_MARKER`] has been
/// examined (that line itself is still checked). An embedded error outranks
/// a preamble mismatch.
///
/// On success the returned slice holds everything after the preamble,
/// including the `information:` line and beyond.
pub fn validate_envelope(lines: &[String]) -> Result<&[String]> {
    let starts_with = |index: usize, marker: &str| {
        lines
            .get(index)
            .is_some_and(|line| line.trim_start().starts_with(marker))
    };

    let mut code = 0u8;
    if !lines.first().is_some_and(|line| line.trim().is_empty()) {
        code = 1;
    }
    if !lines.get(1).is_some_and(|line| line.trim().is_empty()) {
        code = 2;
    }
    if !starts_with(2, BANNER_MARKER) {
        code = 3;
    }
    if !starts_with(3, VERSION_MARKER) {
        code = 4;
    }
    if !starts_with(4, BUILD_MARKER) {
        code = 5;
    }
    if !starts_with(5, NO_SYSTEM_PROMPT) {
        code = 6;
    }

    let payload = lines.get(ENVELOPE_LINES..).unwrap_or(&[]);

    let mut embedded_error = false;
    for line in payload {
        if line.contains(ERROR_TOKEN) {
            embedded_error = true;
        }
        if line.contains(INFORMATION_MARKER) {
            break;
        }
    }

    if embedded_error {
        debug!("session payload carries an embedded error report");
        return Err(SessionError::EmbeddedErrorToken);
    }
    if code != 0 {
        debug!(code, "session preamble mismatch");
        return Err(SessionError::EnvelopeMismatch { code });
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preamble() -> Vec<String> {
        [
            "",
            "",
            "SSSU for HP StorageWorks Command View EVA",
            "Version: 6.0",
            "Build: 34",
            "NoSystemSelected> set option on_error=continue",
        ]
        .map(String::from)
        .to_vec()
    }

    #[test]
    fn well_formed_preamble_yields_the_payload() {
        let mut lines = preamble();
        lines.push("object".to_string());
        lines.push("objectname ....: SYS1".to_string());

        let payload = validate_envelope(&lines).expect("preamble should validate");
        assert_eq!(payload.len(), 2);
        assert_eq!(payload[0], "object");
    }

    #[test]
    fn bare_prompt_line_still_validates() {
        let mut lines = preamble();
        lines[5] = "NoSystemSelected> ".to_string();
        assert!(validate_envelope(&lines).is_ok());
    }

    #[test]
    fn each_preamble_check_reports_its_own_code() {
        let cases: [(usize, &str, u8); 6] = [
            (0, "noise", 1),
            (1, "noise", 2),
            (2, "not the banner", 3),
            (3, "V: 6.0", 4),
            (4, "B: 34", 5),
            (5, "SYS1> ls system full", 6),
        ];
        for (index, text, expected) in cases {
            let mut lines = preamble();
            lines[index] = text.to_string();
            assert_eq!(
                validate_envelope(&lines),
                Err(SessionError::EnvelopeMismatch { code: expected }),
                "check {expected}"
            );
        }
    }

    #[test]
    fn later_failing_check_overwrites_an_earlier_one() {
        let mut lines = preamble();
        lines[0] = "noise".to_string();
        lines[4] = "wrong".to_string();
        assert_eq!(
            validate_envelope(&lines),
            Err(SessionError::EnvelopeMismatch { code: 5 })
        );
    }

    #[test]
    fn truncated_response_reports_the_last_missing_check() {
        let lines: Vec<String> = vec![String::new(), String::new()];
        assert_eq!(
            validate_envelope(&lines),
            Err(SessionError::EnvelopeMismatch { code: 6 })
        );
    }

    #[test]
    fn embedded_error_token_rejects_the_response() {
        let mut lines = preamble();
        lines.push("Error: cannot get object properties".to_string());
        lines.push("object".to_string());
        assert_eq!(
            validate_envelope(&lines),
            Err(SessionError::EmbeddedErrorToken)
        );
    }

    #[test]
    fn error_tokens_after_the_information_marker_are_ignored() {
        let mut lines = preamble();
        lines.push("object information:".to_string());
        lines.push("lasterror ....: Error 0x42".to_string());
        assert!(validate_envelope(&lines).is_ok());
    }

    #[test]
    fn the_information_line_itself_is_still_scanned() {
        let mut lines = preamble();
        lines.push("Error information:".to_string());
        assert_eq!(
            validate_envelope(&lines),
            Err(SessionError::EmbeddedErrorToken)
        );
    }

    #[test]
    fn embedded_error_outranks_a_preamble_mismatch() {
        let mut lines = preamble();
        lines[2] = "not the banner".to_string();
        lines.push("Error: no such command".to_string());
        assert_eq!(
            validate_envelope(&lines),
            Err(SessionError::EmbeddedErrorToken)
        );
    }
}
