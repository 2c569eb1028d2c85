// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Logging for Pelikan clients.
//!
//! Libraries log through the `log` facade, which this crate re-exports, so
//! they never depend on a particular backend. Applications call
//! `configure_logging` once to install a `tracing-subscriber` backend which
//! receives both `log` records and native `tracing` events.
//!
//! Command logs (klog) are regular log records with the `klog` target. They
//! can be routed to their own file so the debug log stays readable.

pub use log::*;

use config::{DebugConfig, KlogConfig};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{filter_fn, EnvFilter};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

/// Target used for all command log records.
pub const KLOG_TARGET: &str = "klog";

#[macro_export]
macro_rules! klog {
    ($($arg:tt)*) => (
        // we choose error level here because it is the lowest level and will
        // not be filtered unless the level filter is set to `off`
        $crate::error!(target: $crate::KLOG_TARGET, $($arg)*);
    )
}

/// Types which can write a command log line once their response is known.
pub trait Klog {
    type Response;

    fn klog(&self, response: &Self::Response);
}

/// Keeps the background log writers alive. Buffered log lines are flushed
/// when this is dropped, so hold it for the life of the process.
#[must_use]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

pub fn configure_logging<T: DebugConfig + KlogConfig>(
    config: &T,
) -> Result<LogGuard, std::io::Error> {
    let debug_config = config.debug();
    let klog_config = config.klog();

    let mut guards = Vec::new();

    let debug_writer = match debug_config.log_file() {
        Some(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(&file));
            guards.push(guard);
            BoxMakeWriter::new(writer)
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let klog_file = klog_config.file().filter(|_| klog_config.enabled());

    let filter = EnvFilter::builder()
        .parse(directives(
            debug_config.log_level(),
            klog_config.enabled() && klog_file.is_none(),
        ))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let debug_layer = tracing_subscriber::fmt::layer()
        .with_writer(debug_writer)
        .with_filter(filter);

    let klog_layer = klog_file.map(|file| {
        let (writer, guard) = tracing_appender::non_blocking(file_appender(&file));
        guards.push(guard);
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false)
            .with_level(false)
            .with_filter(filter_fn(|metadata| metadata.target() == KLOG_TARGET))
    });

    let subscriber = tracing_subscriber::registry()
        .with(debug_layer)
        .with(klog_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    // klog records are emitted at error level, so the facade must always let
    // them through to the subscriber's filters
    tracing_log::LogTracer::builder()
        .with_max_level(LevelFilter::Trace)
        .init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    Ok(LogGuard { _guards: guards })
}

/// Filter directives for the debug log. Command logs only show up in the debug
/// log when they have no file of their own.
fn directives(level: Level, klog_in_debug: bool) -> String {
    let level = level.as_str().to_lowercase();
    if klog_in_debug {
        level
    } else {
        format!("{level},{KLOG_TARGET}=off")
    }
}

fn file_appender(file: &str) -> tracing_appender::rolling::RollingFileAppender {
    let path = Path::new(file);
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path.file_name().unwrap_or(path.as_os_str());
    tracing_appender::rolling::never(directory, name)
}
