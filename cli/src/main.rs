use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use sssu_session_core::{SessionError, SessionResponse};
use sssu_session_parser::output::{OutputFormat, format_records};
use sssu_session_parser::script::{SessionLogin, SessionScript};
use sssu_session_parser::{FULL_SYSTEM_LISTING, parse_session_response};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Table,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Table => Self::Table,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "sssu-parse")]
#[command(about = "Parse captured SSSU session transcripts into typed records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a transcript file without executing the session tool.
    ParseFile(ParseFileArgs),
    /// Parse a transcript from stdin without executing the session tool.
    ParseStdin(ParseStdinArgs),
    /// Compose the session-tool invocation string for a listing command.
    Script(ScriptArgs),
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    /// Transcript file captured from one session-tool invocation.
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    parse: ParseOptions,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    #[command(flatten)]
    parse: ParseOptions,
}

#[derive(Debug, Args)]
struct ParseOptions {
    /// The command string the transcript was produced by.
    #[arg(long, default_value = FULL_SYSTEM_LISTING)]
    command: String,
    /// Exit status the session tool reported (statuses above 1 are unusable).
    #[arg(long, default_value_t = 0)]
    status: i32,
    /// Restrict a full-system listing to this system name.
    #[arg(long)]
    system: Option<String>,
    /// Output format for parsed records (default: json).
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ScriptArgs {
    /// Manager appliance host name or address.
    #[arg(long)]
    manager: String,
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
    /// Select this system before running the listing command.
    #[arg(long)]
    system: Option<String>,
    /// Listing command to script (may be repeated).
    #[arg(long = "command", required = true)]
    commands: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::ParseFile(args) => {
            let transcript = match fs::read_to_string(&args.input) {
                Ok(text) => text,
                Err(err) => {
                    eprintln!("cannot read {}: {err}", args.input.display());
                    return ExitCode::FAILURE;
                }
            };
            run_parse(&transcript, &args.parse)
        }
        Command::ParseStdin(args) => {
            let mut transcript = String::new();
            if let Err(err) = std::io::stdin().read_to_string(&mut transcript) {
                eprintln!("cannot read stdin: {err}");
                return ExitCode::FAILURE;
            }
            run_parse(&transcript, &args.parse)
        }
        Command::Script(args) => {
            let mut script = SessionScript::new(SessionLogin::new(
                &args.manager,
                &args.username,
                &args.password,
            ));
            if let Some(system) = &args.system {
                script = script.select_system(system);
            }
            for command in &args.commands {
                script = script.command(command);
            }
            println!("{}", script.to_command_string());
            ExitCode::SUCCESS
        }
    }
}

fn run_parse(transcript: &str, options: &ParseOptions) -> ExitCode {
    let response = SessionResponse::new(&options.command, transcript, options.status);

    let records = match parse_session_response(&response, options.system.as_deref()) {
        Ok(records) => records,
        Err(err) => {
            // Operators triage failed handoffs from the raw buffer, so print
            // it alongside the error.
            report_failure(&err, transcript);
            return ExitCode::FAILURE;
        }
    };

    match format_records(&records, options.format.into()) {
        Ok(rendered) => {
            print!("{rendered}");
            if !rendered.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn report_failure(err: &SessionError, transcript: &str) {
    eprintln!("session response rejected: {err}");
    if !transcript.trim().is_empty() {
        eprintln!("--- raw session output ---");
        eprintln!("{transcript}");
    }
}
