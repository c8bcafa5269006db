//! Process-wide tracing setup for the wizard.
//!
//! Two layers share one reloadable level filter: a stdout layer that can be
//! muted at runtime and a file layer that stays silent until a log file is
//! attached.

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber, error};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

use crate::config::LoggingConfig;

const DEFAULT_FILTER: &str = "info,contract_ui=debug,contract_core=debug";

// --- Formatter ---

/// `HH:MM:SS.mmm LEVEL target: fields`, dimmed time and coloured level on a tty.
struct WizardFmt;

impl<S, N> FormatEvent<S, N> for WizardFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let time = Local::now().format("%H:%M:%S%.3f");

        if ansi {
            let colour = match *meta.level() {
                Level::ERROR => "1;31",
                Level::WARN => "1;33",
                Level::INFO => "1;32",
                Level::DEBUG => "1;34",
                Level::TRACE => "1;35",
            };
            write!(
                writer,
                "\x1b[2m{time}\x1b[0m \x1b[{colour}m{:>5}\x1b[0m \x1b[36m{}\x1b[0m: ",
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{time} {:>5} {}: ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Late-bound file writer ---

type FileHandle = Arc<Mutex<Option<File>>>;

fn lock_file(slot: &FileHandle) -> MutexGuard<'_, Option<File>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes into the attached log file, or drops output while none is attached.
#[derive(Clone)]
struct LogFile(FileHandle);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), |f| f.flush())
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(lock_file(&self.0))
    }
}

// --- Runtime control ---

type ReloadFn<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;

struct LogControl {
    set_level: ReloadFn<EnvFilter>,
    set_stdout: ReloadFn<EnvFilter>,
    file: FileHandle,
}

static CONTROL: OnceLock<LogControl> = OnceLock::new();
static APP_NAME: OnceLock<String> = OnceLock::new();

fn control() -> Result<&'static LogControl> {
    match CONTROL.get() {
        Some(control) => Ok(control),
        None => bail!("logging not yet initialized"),
    }
}

fn reloader<S>(handle: reload::Handle<EnvFilter, S>) -> ReloadFn<EnvFilter>
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |filter| {
        handle
            .reload(filter)
            .map_err(|e| anyhow!("filter reload failed: {e}"))
    })
}

// --- Public API ---

/// Changes the active filter. Accepts a bare level or any `EnvFilter` directive.
pub fn set_log_level(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| anyhow!("invalid log level '{directive}': {e}"))?;
    (control()?.set_level)(filter)
}

/// Mutes or unmutes stdout without touching the log file.
pub fn set_stdout_enabled(enabled: bool) -> Result<()> {
    // The shared level filter still caps what "trace" lets through.
    let gate = EnvFilter::new(if enabled { "trace" } else { "off" });
    (control()?.set_stdout)(gate)
}

/// Starts appending log records to `path`, replacing any open log file.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;
    *lock_file(&control()?.file) = Some(file);
    Ok(())
}

/// Closes the log file; records keep flowing to stdout if it is enabled.
pub fn disable_file_logging() {
    if let Ok(control) = control() {
        *lock_file(&control.file) = None;
    }
}

/// Executable stem, e.g. `ContractWizard`, or `"app"` if it cannot be read.
pub fn app_name() -> &'static str {
    APP_NAME.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "app".to_string())
    })
}

/// Installs the global subscriber. Later calls are no-ops.
///
/// The level comes from `RUST_LOG`, or `info` with debug output for the
/// wizard crates.
pub fn init_default_logging() {
    let _ = app_name();

    let file: FileHandle = Arc::new(Mutex::new(None));
    let default_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let (level_filter, level_handle) = reload::Layer::new(default_filter);
    let (stdout_gate, stdout_handle) = reload::Layer::new(EnvFilter::new("trace"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(WizardFmt)
        .with_ansi(io::stdout().is_terminal())
        .with_filter(stdout_gate);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(WizardFmt)
        .with_ansi(false)
        .with_writer(LogFile(file.clone()));

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        let _ = CONTROL.set(LogControl {
            set_level: reloader(level_handle),
            set_stdout: reloader(stdout_handle),
            file,
        });
    }
}

/// Applies the `[logging]` section of the user configuration.
pub fn apply_config(config: &LoggingConfig) -> Result<()> {
    if let Some(level) = &config.level {
        set_log_level(level)?;
    }
    set_stdout_enabled(config.stdout)?;
    match &config.file {
        Some(path) => enable_file_logging(path)?,
        None => disable_file_logging(),
    }
    Ok(())
}

/// Logs the failure of a spawned UI task.
pub fn log_task_error(
    task_name: &'static str,
    result: Result<()>,
) {
    if let Err(error) = result {
        error!(task = task_name, ?error, "background task failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_directive_is_rejected_before_reload() {
        let error = set_log_level("contract_core=loud").unwrap_err();

        assert!(error.to_string().contains("invalid log level"));
    }

    #[test]
    fn app_name_is_stable() {
        assert_eq!(app_name(), app_name());
        assert!(!app_name().is_empty());
    }
}
