// crates/authproxy-cli/src/main.rs
// ============================================================================
// Module: AuthProxy CLI Entry Point
// Description: Command dispatcher for connector document tooling.
// Purpose: Validate and hash connector documents and print their schema.
// Dependencies: authproxy-config, authproxy-core, clap, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! The `authproxy` CLI loads connector documents the same way the proxy
//! does and reports every violation in one pass. It also prints drift
//! hashes, the companion schema, an example document, and namespace
//! prefixes. Logs go to stderr; command output goes to stdout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use authproxy_config::ConfigError;
use authproxy_config::connectors_document_schema;
use authproxy_config::connectors_yaml_example;
use authproxy_config::load_connectors;
use authproxy_core::NamespacePath;
use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";
/// Log filter used with `--verbose`.
const VERBOSE_LOG_FILTER: &str = "debug";
/// Placeholder printed for connectors without an id.
const MISSING_ID: &str = "-";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "authproxy", version, disable_help_subcommand = true)]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, short = 'v', action = ArgAction::SetTrue, global = true)]
    verbose: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and validate a connector document.
    Validate {
        /// Path to a `.json`, `.yaml`, or `.yml` document.
        path: PathBuf,
    },
    /// Print the drift hash of every connector in a document.
    Hash {
        /// Path to a `.json`, `.yaml`, or `.yml` document.
        path: PathBuf,
    },
    /// Print the connector document JSON schema.
    Schema,
    /// Print an example connector document.
    Example,
    /// Validate a namespace path and print its prefixes.
    Namespace {
        /// Namespace path such as `root/acme`.
        path: String,
    },
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing failures.
#[derive(Debug, Error)]
enum CliError {
    /// Connector document failed to load or validate.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Invalid namespace path argument.
    #[error(transparent)]
    Namespace(#[from] authproxy_core::NamespaceError),
    /// Output could not be written.
    #[error("failed to write {stream}: {message}")]
    Output {
        /// Stream name.
        stream: &'static str,
        /// Underlying failure.
        message: String,
    },
    /// Value could not be encoded for output.
    #[error("failed to encode output: {0}")]
    Encode(String),
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli.command) {
        Ok(code) => code,
        Err(err) => emit_error(&err),
    }
}

/// Installs the stderr log subscriber.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Executes the selected command.
fn run(command: Commands) -> CliResult<ExitCode> {
    match command {
        Commands::Validate {
            path,
        } => command_validate(&path),
        Commands::Hash {
            path,
        } => command_hash(&path),
        Commands::Schema => command_schema(),
        Commands::Example => {
            write_stdout(&connectors_yaml_example())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Namespace {
            path,
        } => command_namespace(path),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Loads and validates a connector document.
fn command_validate(path: &Path) -> CliResult<ExitCode> {
    let set = load_connectors(path)?;
    tracing::debug!(path = %path.display(), connectors = set.len(), "document is valid");
    write_stdout_line(&format!("ok: {} connectors", set.len()))?;
    Ok(ExitCode::SUCCESS)
}

/// Prints one drift hash line per connector.
fn command_hash(path: &Path) -> CliResult<ExitCode> {
    let set = load_connectors(path)?;
    for (index, connector) in set.iter().enumerate() {
        let hash = connector.hash().map_err(ConfigError::from)?;
        let id = connector.explicit_id().map_or_else(|| MISSING_ID.to_string(), |id| id.to_string());
        write_stdout_line(&format!(
            "{index} {} {id} {} {hash}",
            connector.connector_type, connector.version
        ))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Prints the connector document schema.
fn command_schema() -> CliResult<ExitCode> {
    let schema = serde_json::to_string_pretty(&connectors_document_schema())
        .map_err(|err| CliError::Encode(err.to_string()))?;
    write_stdout_line(&schema)?;
    Ok(ExitCode::SUCCESS)
}

/// Validates a namespace path and prints its prefixes.
fn command_namespace(path: String) -> CliResult<ExitCode> {
    let namespace = NamespacePath::parse(path)?;
    for prefix in namespace.prefixes() {
        write_stdout_line(prefix.as_str())?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| output_error("stdout", &err))
}

/// Writes text to stdout without adding a newline.
fn write_stdout(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(message.as_bytes()).map_err(|err| output_error("stdout", &err))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Builds an output error for a stream.
fn output_error(stream: &'static str, err: &std::io::Error) -> CliError {
    CliError::Output {
        stream,
        message: err.to_string(),
    }
}

/// Reports an error on stderr and returns a failure exit code.
///
/// Validation failures print one violation per line.
fn emit_error(err: &CliError) -> ExitCode {
    let lines: Vec<String> = match err {
        CliError::Config(ConfigError::Invalid(errors)) => {
            errors.iter().map(|error| format!("error: {error}")).collect()
        }
        other => vec![format!("error: {other}")],
    };
    for line in lines {
        let _ = write_stderr_line(&line);
    }
    ExitCode::FAILURE
}
