//! Darkroom host: one JSON message per line on stdin, replies as JSON lines
//! on stdout. Logs go to stderr.

use std::io::{self, BufRead, Write};

use darkroom_app::{AppConfig, Session, dispatch_json};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut session = Session::new(AppConfig::default());
    tracing::info!("darkroom ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        for reply in dispatch_json(&mut session, &line) {
            match serde_json::to_string(&reply) {
                Ok(json) => writeln!(stdout, "{json}")?,
                Err(e) => tracing::error!("failed to serialize reply: {e}"),
            }
        }
        stdout.flush()?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
