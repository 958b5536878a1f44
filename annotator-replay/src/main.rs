//! # Annotator Replay
//!
//! Replays a scripted annotation session and prints the host's view as JSON.

use annotator_replay::{replay, CliArgs, ReplayConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing on stderr so the report on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,annotator_core=debug,annotator_replay=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    // Use JSON format for log collectors (RUST_LOG_FORMAT=json)
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = ReplayConfig::from(args);

    tracing::info!("Starting replay of {}", config.session.display());
    if let Some(ref kind) = config.kind {
        tracing::info!("Shape override: {}", kind);
    }

    let report = replay(&config)?;
    println!("{report}");
    Ok(())
}
