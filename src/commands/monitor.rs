//! `watch` and `snapshot` command handlers.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::ArgMatches;
use colored::Colorize;
use serde::Serialize;

use crate::core::system_monitor::{
    create_platform_backend, evaluate, AlertConfig, MetricsBackend, SeverityState, SystemMetrics,
};
use crate::ui::{format_clock, format_snapshot};

pub const DEFAULT_INTERVAL_MS: u64 = 1000;
pub const MIN_INTERVAL_MS: u64 = 100;
/// Gap between the two samples of `snapshot`, long enough for a CPU delta
const SNAPSHOT_SAMPLE_GAP: Duration = Duration::from_millis(250);
const STOP_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn from_matches(matches: &ArgMatches) -> Self {
        if matches.get_flag("json") {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub interval: Duration,
    /// Stop after this many cycles; run until interrupted otherwise
    pub count: Option<u64>,
    pub format: OutputFormat,
}

/// One JSON line of `--json` output
#[derive(Debug, Serialize)]
pub struct SnapshotRecord<'a> {
    /// Unix seconds
    pub timestamp: i64,
    pub metrics: &'a SystemMetrics,
    pub severity: SeverityState,
}

pub fn execute_watch(matches: &ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    let options = WatchOptions {
        interval: Duration::from_millis(
            matches
                .get_one::<u64>("interval-ms")
                .copied()
                .unwrap_or(DEFAULT_INTERVAL_MS),
        ),
        count: matches.get_one::<u64>("count").copied(),
        format: OutputFormat::from_matches(matches),
    };

    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = stop.clone();
    ctrlc::set_handler(move || {
        stop_clone.store(true, Ordering::Relaxed);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let mut backend = create_platform_backend();
    log::debug!(
        "Watching with the {} backend every {:?}",
        backend.name(),
        options.interval
    );

    if options.format == OutputFormat::Text {
        println!("{}", "Press Ctrl+C to stop".dimmed());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let cycles = run_watch(&mut backend, &config.alerts, &options, &stop, &mut out)?;
    log::debug!("Stopped after {} cycle(s)", cycles);

    Ok(())
}

pub fn execute_snapshot(matches: &ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    let format = OutputFormat::from_matches(matches);

    let mut backend = create_platform_backend();
    // The first sample only primes the CPU delta
    backend.collect();
    thread::sleep(SNAPSHOT_SAMPLE_GAP);
    let metrics = backend.collect();
    let severity = evaluate(&metrics, &config.alerts);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_record(&mut out, &metrics, severity, format)
}

/// Sample, evaluate and print until `count` cycles ran or `stop` is set.
///
/// Returns the number of cycles printed.
pub fn run_watch<B, W>(
    backend: &mut B,
    alerts: &AlertConfig,
    options: &WatchOptions,
    stop: &AtomicBool,
    out: &mut W,
) -> Result<u64>
where
    B: MetricsBackend + ?Sized,
    W: Write,
{
    let mut cycles = 0u64;

    while !stop.load(Ordering::Relaxed) {
        let started = Instant::now();
        let metrics = backend.collect();
        let severity = evaluate(&metrics, alerts);
        write_record(out, &metrics, severity, options.format)?;
        cycles += 1;

        if options.count.is_some_and(|count| cycles >= count) {
            break;
        }

        sleep_unless_stopped(options.interval.saturating_sub(started.elapsed()), stop);
    }

    Ok(cycles)
}

fn sleep_unless_stopped(duration: Duration, stop: &AtomicBool) {
    let deadline = Instant::now() + duration;
    while !stop.load(Ordering::Relaxed) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        thread::sleep(remaining.min(STOP_POLL));
    }
}

pub fn write_record<W: Write>(
    out: &mut W,
    metrics: &SystemMetrics,
    severity: SeverityState,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let record = SnapshotRecord {
                timestamp: Utc::now().timestamp(),
                metrics,
                severity,
            };
            serde_json::to_writer(&mut *out, &record).context("Failed to serialize snapshot")?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "{}", format!("[{}]", format_clock(Local::now())).dimmed())?;
            writeln!(out, "{}", format_snapshot(metrics, &severity))?;
        }
    }
    out.flush()?;
    Ok(())
}
