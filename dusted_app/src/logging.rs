//! Logging to stderr and an append-only log file.
//!
//! [init] installs a `tracing` subscriber for the whole process. Records from the `log`
//! crate are forwarded to it as well.

use std::{
    any::Any,
    backtrace::Backtrace,
    fmt, fs,
    io::Write,
    panic::{self, PanicInfo},
    path::Path,
    sync::{Arc, Mutex},
};

use once_cell::sync::{Lazy, OnceCell};
use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::Context, prelude::*, registry::LookupSpan, Layer};

use crate::AppError;

static LOG_FILE: OnceCell<Mutex<fs::File>> = OnceCell::new();
static RECENT_PANIC_DETAILS: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));

/// Open the log file and install the global subscriber and panic hook.
///
/// Returns an error if the log file can't be opened or if logging was already set up.
pub fn init(log_file_path: &Path) -> Result<(), AppError> {
    let log_file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_file_path)
        .map_err(|error| AppError::LogFileError {
            path: log_file_path.to_path_buf(),
            error: Arc::new(error),
        })?;
    LOG_FILE
        .set(Mutex::new(log_file))
        .map_err(|_| AppError::LoggingAlreadyInitialized)?;

    panic::set_hook(Box::new(panic_hook));
    LogTracer::init().map_err(|_| AppError::LoggingAlreadyInitialized)?;
    tracing::subscriber::set_global_default(tracing_subscriber::registry().with(LogLayer))
        .map_err(|_| AppError::LoggingAlreadyInitialized)?;

    print_to_log_file(&"-".repeat(80));
    Ok(())
}

/// Append a line to the log file, if logging has been initialized.
pub fn print_to_log_file(line: &str) {
    if let Some(log_file) = LOG_FILE.get() {
        if let Ok(mut log_file) = log_file.lock() {
            // Nowhere to report a failure to write the log.
            let _ = writeln!(log_file, "{}", line).and_then(|_| log_file.flush());
        }
    }
}

/// Take the details of the most recent panic, if one happened since the last call.
pub fn take_recent_panic_details() -> Option<String> {
    RECENT_PANIC_DETAILS
        .lock()
        .ok()
        .and_then(|mut details| details.take())
}

fn panic_hook(info: &PanicInfo<'_>) {
    let message = panic_message(info.payload());
    let summary = match info.location() {
        Some(location) => format!("panic at {}: {}", location, message),
        None => format!("panic: {}", message),
    };
    let details = format!("{}\n{}", summary, Backtrace::force_capture());

    if let Ok(mut recent) = RECENT_PANIC_DETAILS.lock() {
        *recent = Some(details.clone());
    }
    tracing::error!("{}", details);
}

/// The text passed to `panic!`, if the payload is a string.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string payload>")
}

fn format_line(timestamp: &str, level: Level, spans: &[&str], target: &str, message: &str) -> String {
    let mut line = format!("[{}] [{}] ", timestamp, level);
    if !spans.is_empty() {
        line.push_str(&format!("[{}] ", spans.join(".")));
    }
    line.push_str(&format!("[{}] {}", target, message));
    line
}

struct LogLayer;

#[derive(Default)]
struct MessageVisitor {
    message: String,
    log_target: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "log.target" => self.log_target = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

impl<S> Layer<S> for LogLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() > Level::INFO {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let spans: Vec<&str> = ctx
            .event_scope(event)
            .map(|scope| scope.from_root().map(|span| span.name()).collect())
            .unwrap_or_default();
        let target = visitor
            .log_target
            .unwrap_or_else(|| metadata.target().to_string());
        let timestamp = chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S%.3f")
            .to_string();

        let line = format_line(&timestamp, *metadata.level(), &spans, &target, &visitor.message);
        eprintln!("{}", line);
        print_to_log_file(&line);
    }
}
