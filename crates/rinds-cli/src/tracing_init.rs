use std::fmt::{self as stdfmt, Write as _};
use std::path::Path;

use anyhow::Result;
use rinds_config::{LogFormat, LoggingConfig};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::{DefaultFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::{LookupSpan, Registry};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

// ---------------------------------------------------------------------------
// FileFields: keeps the file layer's cached span fields apart from stderr's
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FileFields(DefaultFields);

impl<'writer> FormatFields<'writer> for FileFields {
    fn format_fields<R: tracing_subscriber::field::RecordFields>(
        &self,
        writer: Writer<'writer>,
        fields: R,
    ) -> stdfmt::Result {
        self.0.format_fields(writer, fields)
    }
}

// ---------------------------------------------------------------------------
// DomainFormat: `<time> <LEVEL> [domain] message k=v ...`
// ---------------------------------------------------------------------------

/// Plain-text formatter that lifts the `domain` field into a `[domain]`
/// prefix:
///
/// ```text
/// 2026-03-01T09:00:00Z  WARN [rule] invalid rule; treating as unsatisfied rule_type=not depth=1
/// ```
///
/// Events from dependencies carry no `domain` and get no prefix.
struct DomainFormat;

impl<S, N> FormatEvent<S, N> for DomainFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> stdfmt::Result {
        let ansi = writer.has_ansi_escapes();
        let paint = |code: &str, text: &dyn stdfmt::Display| {
            if ansi {
                format!("\x1b[{code}m{text}\x1b[0m")
            } else {
                text.to_string()
            }
        };

        let mut time = String::new();
        if SystemTime.format_time(&mut Writer::new(&mut time)).is_err() {
            time.push_str("<unknown time>");
        }
        write!(writer, "{}", paint("2", &time))?;

        let level = *event.metadata().level();
        let level_code = match level {
            Level::ERROR => "31",
            Level::WARN => "33",
            Level::INFO => "32",
            Level::DEBUG => "34",
            Level::TRACE => "35",
        };
        write!(writer, " {} ", paint(level_code, &format_args!("{level:>5}")))?;

        let mut fields = FieldSplitter::default();
        event.record(&mut fields);

        if let Some(domain) = &fields.domain {
            write!(writer, "{} ", paint("1;36", &format_args!("[{domain}]")))?;
        }
        write!(writer, "{}", fields.message)?;
        if !fields.rest.is_empty() {
            write!(writer, " {}", paint("3", &fields.rest))?;
        }
        writeln!(writer)
    }
}

/// Separates `domain` and `message` from the remaining event fields.
#[derive(Default)]
struct FieldSplitter {
    domain: Option<String>,
    message: String,
    rest: String,
}

impl FieldSplitter {
    fn push_field(&mut self, name: &str, value: stdfmt::Arguments<'_>) {
        if !self.rest.is_empty() {
            self.rest.push(' ');
        }
        write!(&mut self.rest, "{name}={value}").ok();
    }
}

impl Visit for FieldSplitter {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "domain" => self.domain = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            name => self.push_field(name, format_args!("{value:?}")),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn stdfmt::Debug) {
        match field.name() {
            "domain" => self.domain = Some(format!("{value:?}").trim_matches('"').to_string()),
            "message" => self.message = format!("{value:?}"),
            name => self.push_field(name, format_args!("{value:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Layer construction
// ---------------------------------------------------------------------------

fn stderr_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Plain => fmt::layer()
            .event_format(DomainFormat)
            .with_writer(std::io::stderr)
            .boxed(),
    }
}

fn file_layer<W>(format: LogFormat, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .fmt_fields(FileFields::default())
            .with_target(false)
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Plain => fmt::layer()
            .event_format(DomainFormat)
            .fmt_fields(FileFields::default())
            .with_ansi(false)
            .with_writer(writer)
            .boxed(),
    }
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if std::env::var("RUST_LOG").is_ok() {
        return Ok(EnvFilter::from_default_env());
    }
    let directives = config.filter_directives();
    EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("invalid log filter '{directives}': {e}"))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Install the `tracing` subscriber described by `[logging]`.
///
/// `RUST_LOG`, when set, replaces the configured level directives.  The
/// returned [`WorkerGuard`] flushes the file writer on drop; drop it before
/// the process exits or buffered lines are lost.
pub fn init_tracing(config: &LoggingConfig, base_dir: &Path) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config)?;

    let mut layers = vec![stderr_layer(config.format)];
    let mut guard = None;

    if let Some(resolved) = config.file_path(base_dir) {
        let dir = resolved
            .parent()
            .ok_or_else(|| anyhow::anyhow!("log file path has no parent directory"))?;
        let file_name = resolved
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("log file path has no file name"))?;
        std::fs::create_dir_all(dir)?;

        let (writer, file_guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
        layers.push(file_layer(config.format, writer));
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing init failed: {e}"))?;

    Ok(guard)
}
