//! `courtside-replay`: drive the engine from a recorded pointer script.
//!
//! Reads `{"container": {...}, "events": [...]}` from the path given as the
//! first argument, or from stdin, and prints each domain event as one JSON
//! line on stdout. Logs go to stderr.
//!
//! The replay runs in lockstep: after each pointer event the gesture task
//! waits for the main loop to apply its commits, so hit-testing always sees
//! the markers earlier events placed.


use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use courtside::config::CourtConfig;
use courtside::engine::{Action, Engine};
use courtside::events::EventSink;
use courtside::geom::LayoutRect;
use courtside::input::PointerEvent;
use serde::Deserialize;
use tracing::{debug, error, info};

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("failed to read script: {0}")]
    Io(#[from] io::Error),
    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("replay task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A recorded session: one layout, then pointer events in order.
#[derive(Debug, Deserialize)]
struct Script {
    container: LayoutRect,
    events: Vec<PointerEvent>,
}

fn load_script(path: Option<PathBuf>) -> Result<Script, ReplayError> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&raw)?)
}

/// Time of the trailing tick that resolves a tap still pending at the end of
/// the script: just past the multi-tap window after the last event.
fn final_tick_ms(events: &[PointerEvent], multi_tap_delay_ms: u64) -> u64 {
    events.last().map_or(0, PointerEvent::t_ms).saturating_add(multi_tap_delay_ms).saturating_add(1)
}

/// Replay `script` and write each domain event to `out` as a JSON line.
/// Returns the writer once every event has been written.
async fn replay<W>(script: Script, config: CourtConfig, mut out: W) -> Result<W, ReplayError>
where
    W: Write + Send + 'static,
{
    let Script { container, events } = script;
    let (sink, mut events_rx) = EventSink::channel(config.event_queue_capacity);
    let (mut engine, mut worker) = Engine::new(&config, sink);
    engine.on_layout(container);

    let final_tick = PointerEvent::Tick { t_ms: final_tick_ms(&events, config.gesture.multi_tap_delay_ms) };
    let gestures = tokio::spawn(async move {
        for event in events.iter().chain(std::iter::once(&final_tick)) {
            worker.handle(event);
            worker.settle().await;
        }
    });

    let printer = tokio::spawn(async move {
        let mut written = 0usize;
        while let Some(event) = events_rx.recv().await {
            let line = serde_json::to_string(&event)?;
            writeln!(out, "{line}")?;
            written += 1;
        }
        out.flush()?;
        Ok::<(usize, W), ReplayError>((written, out))
    });

    let mut commits = 0usize;
    while let Some(actions) = engine.next_actions().await {
        commits += 1;
        for action in actions {
            if let Action::GestureLabel(label) = action {
                debug!(%label, "gesture");
            }
        }
    }
    gestures.await?;

    let markers = engine.markers().len();
    // Dropping the engine closes the event queue so the printer can finish.
    drop(engine);
    let (written, out) = printer.await??;
    info!(commits, markers, events = written, "replay finished");
    Ok(out)
}

async fn run(path: Option<PathBuf>, config: CourtConfig) -> Result<(), ReplayError> {
    let script = load_script(path)?;
    info!(events = script.events.len(), "script loaded");
    replay(script, config, io::stdout()).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    match run(path, CourtConfig::from_env()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "replay failed");
            ExitCode::FAILURE
        }
    }
}
