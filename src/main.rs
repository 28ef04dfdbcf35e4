use std::io::{self, BufRead, Write};

use scribe_config::Config;
use scribe_ops::dispatch_line;
use tracing::info;

/// Stdio front end: one JSON request per line on stdin, one JSON
/// response per line on stdout. Logs go to stderr so stdout stays
/// protocol-clean.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env()?;
    info!(
        sandbox_root = ?config.sandbox_root,
        backup_root = %config.backup_root.display(),
        "scribe ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = dispatch_line(&config, &line);
        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }

    Ok(())
}
