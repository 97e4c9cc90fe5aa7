//! dispatchd - one-shot command dispatch CLI.
//!
//! Runs a single operation through the same engine the server uses and
//! prints the normalized envelope to stdout as JSON. Exit status is 0
//! when the envelope carries a result, 1 when it carries an error. Logs
//! go to stderr so stdout stays machine-parseable.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dispatchd_core::dispatcher::{DispatchRequest, Dispatcher};
use dispatchd_core::envelope::Envelope;
use dispatchd_core::operations::builtin_registry;
use dispatchd_core::policy::CallerMode;
use dispatchd_core::project::{CredentialState, Project};

#[derive(Parser, Debug)]
#[command(name = "dispatchd")]
#[command(about = "Run a single dispatchd operation and print its result")]
#[command(version)]
struct Args {
    /// Name of the operation to run (e.g. ping, echo)
    name: String,

    /// JSON payload for the operation; pass `-` to read it from stdin
    #[arg(short, long)]
    body: Option<String>,

    /// Name of the project the operation targets
    #[arg(short, long)]
    project: Option<String>,

    /// Path to the project on disk
    #[arg(long)]
    project_path: Option<PathBuf>,

    /// Treat the project's stored credentials as needing re-authentication
    #[arg(long)]
    stale_credentials: bool,

    /// Editor that initiated this invocation (sublime, atom, vscode)
    #[arg(short, long)]
    editor: Option<String>,
}

/// Resolve the `--body` argument to a JSON value, reading stdin for `-`.
fn read_body(arg: Option<String>) -> anyhow::Result<Value> {
    let raw = match arg {
        None => return Ok(Value::Null),
        Some(raw) if raw == "-" => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(raw) => raw,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Map parsed arguments onto a dispatch request.
fn build_request(args: Args, body: Value) -> DispatchRequest {
    let mut request = DispatchRequest::new(args.name).with_body(body);

    if let Some(name) = args.project {
        let mut project = Project::new(name);
        project.path = args.project_path;
        if args.stale_credentials {
            project.credentials = CredentialState::RequiresReauth;
        }
        request = request.with_project(project);
    }

    if let Some(editor) = args.editor {
        request = request.with_editor(editor);
    }

    request
}

/// Serialize the envelope to stdout and translate it to a process status.
fn finish(envelope: Envelope) -> ExitCode {
    println!(
        "{}",
        serde_json::to_string(&envelope).expect("envelope serializes")
    );
    ExitCode::from(envelope.exit_code() as u8)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dispatchd_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let body = match read_body(args.body.clone()) {
        Ok(body) => body,
        Err(err) => return finish(Envelope::failure(format!("Invalid request body: {err}"))),
    };

    let registry = Arc::new(builtin_registry());
    let dispatcher = Dispatcher::new(registry, CallerMode::Cli);

    let envelope = dispatcher.execute(build_request(args, body)).await;
    finish(envelope)
}
