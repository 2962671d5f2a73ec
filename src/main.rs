use std::io;
use std::process::ExitCode;

use clap::Parser;
use lsp_types::ServerInfo;
use tracing_subscriber::EnvFilter;

use gdshader_ls::{Handler, Server};

/// Language server for the Godot shading language.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    let mut server = Server::new(
        io::stdin().lock(),
        io::stdout().lock(),
        ServerInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        },
        Handler::new(),
    );

    match server.serve() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "transport error");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout belongs to the protocol. `RUST_LOG` overrides
/// the flag-derived level.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .without_time()
        .init();
}
