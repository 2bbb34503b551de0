// hcs-logs - Application Entry Point
//
// Parses CLI arguments, initializes structured logging on stderr (prompts
// own stdout), and dispatches to the command handler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hcs_logs::cli::{execute, report_failure, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --log. Secrets never appear at any level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("hcs_logs={}", cli.log_level))),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(cli).await {
        let code = report_failure(&e, &mut std::io::stderr());
        std::process::exit(code);
    }
}
