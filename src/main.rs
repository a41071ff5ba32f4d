//! `orbiter-replay`: run a recorded JSON input trace through an orbit
//! control and print every `camera-orbit-updated` payload as a JSON line.
//!
//! Usage: `orbiter-replay <trace.json> [config.toml]`

use std::io::{self, Write};
use std::path::Path;

use orbiter::camera::{CameraPose, SphericalOrbit};
use orbiter::control::{Lifecycle, OrbitControl, OrbitHost, OrbitUpdated};
use orbiter::error::OrbitError;
use orbiter::input::{Affordance, InputEvent};
use orbiter::options::OrbitConfig;
use serde::Deserialize;
use web_time::{Duration, Instant};

/// One recorded input event, `at_ms` after the control was attached.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TraceEntry {
    at_ms: u64,
    event: InputEvent,
}

fn parse_trace(content: &str) -> Result<Vec<TraceEntry>, OrbitError> {
    let mut trace: Vec<TraceEntry> = serde_json::from_str(content)
        .map_err(|e| OrbitError::Trace(e.to_string()))?;
    trace.sort_by_key(|entry| entry.at_ms);
    Ok(trace)
}

fn load_trace(path: &Path) -> Result<Vec<TraceEntry>, OrbitError> {
    let content = std::fs::read_to_string(path)?;
    parse_trace(&content)
}

/// Writes every emitted event as one JSON line.
struct JsonLinesHost<W: Write> {
    out: W,
    camera: CameraPose,
    affordance: Affordance,
}

impl<W: Write> JsonLinesHost<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            camera: CameraPose::default(),
            affordance: Affordance::default(),
        }
    }
}

impl<W: Write> OrbitHost for JsonLinesHost<W> {
    fn has_camera(&self) -> bool {
        true
    }

    fn sync_camera(&mut self, pose: &CameraPose) {
        self.camera = *pose;
    }

    fn set_affordance(&mut self, affordance: Affordance) {
        if affordance != self.affordance {
            log::debug!("cursor -> {}", affordance.css_cursor());
        }
        self.affordance = affordance;
    }

    fn emit(&mut self, event: &OrbitUpdated) {
        let written = event
            .to_json()
            .map_err(io::Error::from)
            .and_then(|line| writeln!(self.out, "{line}"));
        if let Err(e) = written {
            log::warn!("failed to write {}: {e}", OrbitUpdated::NAME);
        }
    }
}

/// Feed `trace` through a fresh control, stepping frames at the configured
/// minimum interval until every deferred notification has fired.
fn replay<W: Write>(
    config: OrbitConfig,
    trace: &[TraceEntry],
    out: W,
) -> Result<u64, OrbitError> {
    let step = config
        .timing
        .min_frame_interval()
        .max(Duration::from_millis(1));
    let mut control: OrbitControl<SphericalOrbit, _> =
        OrbitControl::new(JsonLinesHost::new(out), config);

    let start = Instant::now();
    let at = |entry: &TraceEntry| start + Duration::from_millis(entry.at_ms);
    control.initialize(start)?;

    let mut pending = trace.iter().peekable();
    let mut now = start;
    loop {
        while let Some(entry) = pending.next_if(|&e| at(e) <= now) {
            control.handle_event(entry.event, at(entry));
        }
        control.on_frame(now);
        if pending.peek().is_none() && control.next_deadline().is_none() {
            break;
        }
        now += step;
    }

    let emitted = control.emitted();
    control.dispose();
    Ok(emitted)
}

fn run(
    trace_path: &Path,
    config_path: Option<&Path>,
) -> Result<(), OrbitError> {
    let config = match config_path {
        Some(path) => OrbitConfig::load(path)?,
        None => OrbitConfig::default(),
    };
    let trace = load_trace(trace_path)?;
    log::info!("replaying {} input events", trace.len());

    let stdout = io::stdout();
    let emitted = replay(config, &trace, stdout.lock())?;
    log::info!("emitted {emitted} {} events", OrbitUpdated::NAME);
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(trace_path) = args.next() else {
        log::error!("Usage: orbiter-replay <trace.json> [config.toml]");
        std::process::exit(1);
    };
    let config_path = args.next();

    let config_path = config_path.as_deref().map(Path::new);
    if let Err(e) = run(Path::new(&trace_path), config_path) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
