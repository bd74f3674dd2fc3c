//! Stderr logger for the recognizer binaries.
//!
//! Each line carries the elapsed time, the level and the pipeline stage that
//! emitted it, e.g. `[  0.012s DEBUG components] largest component: 9 px`.
//! The stage is the last path segment of the record target. Records from
//! crates outside the `playcard` workspace are capped at `Warn` so codec
//! chatter does not drown the stage trace.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const WORKSPACE_PREFIX: &str = "playcard";

struct StageLogger {
    level: LevelFilter,
    started: Instant,
}

/// Stage name of a record target: `playcard_core::components` -> `components`.
fn stage_of(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

fn level_for(target: &str, level: LevelFilter) -> LevelFilter {
    if target.starts_with(WORKSPACE_PREFIX) {
        level
    } else {
        level.min(LevelFilter::Warn)
    }
}

fn format_line(elapsed: f64, level: Level, target: &str, message: &std::fmt::Arguments) -> String {
    format!("[{elapsed:7.3}s {level:>5} {}] {message}", stage_of(target))
}

impl Log for StageLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= level_for(metadata.target(), self.level)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args(),
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StageLogger> = OnceLock::new();

/// Install the stage logger with the provided level filter.
///
/// Later calls are no-ops.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StageLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// `EnvFilter` directive used when `RUST_LOG` is unset.
#[cfg(feature = "tracing")]
fn fallback_directive(level: LevelFilter) -> String {
    level.as_str().to_ascii_lowercase()
}

/// Install a `tracing` subscriber filtered by `RUST_LOG`, falling back to
/// `default_level` when the variable is unset or invalid.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool, default_level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_directive(default_level)));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
}
