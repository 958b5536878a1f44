//! # Annotator Replay
//!
//! Command-line host for annotator-core. Loads a JSON session (surface box,
//! committed annotations, scripted pointer and touch input), replays it
//! through an [`annotator_core::Annotator`] and prints what a host would have
//! seen as a JSON report.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p annotator-replay -- session.json --pretty
//! ```
//!
//! ## Reading the session from stdin, drawing ovals:
//!
//! ```bash
//! cat session.json | cargo run -p annotator-replay -- - --type OVAL
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ReplayConfig` - Overrides applied on top of the session's options
//! - `Session` - The session document and its scripted events
//! - `Replayer` - Host state around the annotator; produces a `ReplayReport`

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod error;
mod replayer;
mod session;

pub use error::{ReplayError, ReplayResult};
pub use replayer::{ReplayReport, Replayer, StepReport};
pub use session::{ScriptedEvent, Session};

use std::path::PathBuf;

use annotator_core::ShapeKind;
use clap::Parser;

/// Command-line arguments for annotator-replay.
#[derive(Debug, Clone, Parser)]
#[command(name = "annotator-replay")]
#[command(about = "Replay scripted annotation sessions through annotator-core")]
#[command(version)]
pub struct CliArgs {
    /// Session file, or `-` for stdin
    #[arg(env = "ANNOTATOR_SESSION", default_value = "-")]
    pub session: PathBuf,

    /// Shape kind to draw, overriding the session options (e.g. RECTANGLE, POINT, OVAL)
    #[arg(long = "type", env = "ANNOTATOR_SHAPE")]
    pub kind: Option<String>,

    /// Handle touch events even if the session options do not allow them
    #[arg(long)]
    pub allow_touch: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

/// Replay configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    /// Where to read the session from.
    pub session: PathBuf,
    /// Shape kind override.
    pub kind: Option<ShapeKind>,
    /// Force touch handling on.
    pub allow_touch: bool,
    /// Pretty-print the report.
    pub pretty: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayConfig {
    /// Create a replay configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: PathBuf::from("-"),
            kind: None,
            allow_touch: false,
            pretty: false,
        }
    }
}

impl From<CliArgs> for ReplayConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            session: args.session,
            kind: args.kind.map(|tag| ShapeKind::new(tag.to_uppercase())),
            allow_touch: args.allow_touch,
            pretty: args.pretty,
        }
    }
}

/// Load the configured session, replay it and serialize the report.
///
/// # Errors
///
/// Returns an error if the session cannot be loaded, its surface has no
/// area, or the report cannot be serialized.
pub fn replay(config: &ReplayConfig) -> ReplayResult<String> {
    let session = Session::load(&config.session)?;
    let report = Replayer::new(config, &session)?.run(&session.events);
    tracing::info!(
        "Replay finished: {} steps, {} committed annotations",
        report.steps.len(),
        report.annotations.len()
    );
    let json = if config.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(json)
}
