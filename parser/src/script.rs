//! Session script composition.
//!
//! The session tool takes its scripted commands as quoted command-line
//! arguments: a preamble that keeps the session alive across per-command
//! errors, a manager login, an optional system selection, then the listing
//! commands themselves. This module only composes the invocation string;
//! running it belongs to the caller.

use serde::{Deserialize, Serialize};

/// Name of the session-tool executable.
pub const SESSION_TOOL: &str = "sssu";

/// Scriptlet keeping the session alive when an individual command fails.
///
/// Without it the tool aborts the whole script on the first error and exit
/// statuses above 1 become meaningless.
pub const CONTINUE_ON_ERROR: &str = "set option on_error=continue";

/// Credentials for the manager appliance login scriptlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLogin {
    /// Manager appliance host name or address.
    pub manager: String,
    pub username: String,
    pub password: String,
}

impl SessionLogin {
    pub fn new(manager: &str, username: &str, password: &str) -> Self {
        Self {
            manager: manager.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn scriptlet(&self) -> String {
        format!(
            "select manager {} USERNAME={} PASSWORD={}",
            self.manager, self.username, self.password
        )
    }
}

/// Builder for one session-tool invocation.
///
/// # Examples
///
/// ```
/// use sssu_session_parser::script::{SessionLogin, SessionScript};
///
/// let script = SessionScript::new(SessionLogin::new("evamgr", "admin", "secret"))
///     .select_system("SYS1")
///     .command("ls vdisk full");
///
/// let invocation = script.to_command_string();
/// assert!(invocation.starts_with("sssu \"set option on_error=continue\""));
/// assert!(invocation.contains("\"select SYSTEM \"SYS1\"\""));
/// assert!(invocation.ends_with("\"ls vdisk full\" "));
/// ```
#[derive(Debug, Clone)]
pub struct SessionScript {
    login: SessionLogin,
    system: Option<String>,
    commands: Vec<String>,
}

impl SessionScript {
    /// Starts a script with the continue-on-error preamble and a login.
    pub fn new(login: SessionLogin) -> Self {
        Self {
            login,
            system: None,
            commands: Vec::new(),
        }
    }

    /// Selects a system before the listing commands run.
    pub fn select_system(mut self, name: &str) -> Self {
        self.system = Some(name.to_string());
        self
    }

    /// Appends a listing command.
    pub fn command(mut self, command: &str) -> Self {
        self.commands.push(command.to_string());
        self
    }

    /// The scriptlets in execution order.
    pub fn scriptlets(&self) -> Vec<String> {
        let mut scriptlets = vec![CONTINUE_ON_ERROR.to_string(), self.login.scriptlet()];
        if let Some(system) = &self.system {
            scriptlets.push(format!("select SYSTEM \"{system}\""));
        }
        scriptlets.extend(self.commands.iter().cloned());
        scriptlets
    }

    /// Renders the full invocation string, each scriptlet double-quoted.
    pub fn to_command_string(&self) -> String {
        let mut invocation = format!("{SESSION_TOOL} ");
        for scriptlet in self.scriptlets() {
            invocation.push_str(&format!("\"{scriptlet}\" "));
        }
        invocation
    }
}
