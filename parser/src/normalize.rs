//! Transcript normalization utilities.

use regex::Regex;
use std::sync::LazyLock;

/// Splits a captured session transcript into clean lines.
///
/// The session tool usually runs on Windows, so transcripts arrive with CRLF
/// line endings; interactive captures may additionally carry ANSI escape
/// sequences. Both are stripped before the envelope validator sees the
/// lines.
pub fn session_lines(raw: &str) -> Vec<String> {
    // SAFETY: This regex is a compile-time constant and is validated by tests.
    static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("static regex must compile")
    });

    let stripped = ANSI_RE.replace_all(raw, "");
    let unified = stripped.replace("\r\n", "\n").replace('\r', "\n");
    unified.lines().map(str::to_string).collect()
}
