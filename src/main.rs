use std::io::{self, BufRead, Write};

use kashi_core::config::Config;
use kashi_core::protocol;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();

    let config = Config::load();
    let core = match protocol::Core::from_config(&config) {
        Ok(core) => core,
        Err(e) => {
            tracing::error!(error = %e, "failed to start core");
            std::process::exit(1);
        }
    };

    tracing::info!(data_dir = %config.data_dir.display(), "kashi-core ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!(error = %e, "unreadable input line");
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            protocol::handle(&core, &line)
        }));

        let response = match result {
            Ok(resp) => resp,
            Err(_) => serde_json::json!({
                "status": "error",
                "message": "internal core error"
            })
            .to_string(),
        };

        if writeln!(stdout, "{response}").is_err() {
            break;
        }

        let _ = stdout.flush();
    }
}
