use financial_query_responder::{config::AppConfig, DataStore, QueryResponder};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Answers the query given as arguments, or each line read from stdin.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout carries only responses
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    let store = DataStore::load_or_unavailable(&config.data_path);
    let responder = QueryResponder::new(Arc::new(store));

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        println!("{}", responder.respond(&args.join(" ")));
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        writeln!(stdout, "{}\n", responder.respond(&line))?;
        stdout.flush()?;
    }

    Ok(())
}
