//! Plain-text record layouts for the log file.

use std::fmt;
use std::path::Path;

use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

/// `2024-05-01 13:45:12,345`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Which columns a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `[<timestamp>] <LEVEL>: <message>`
    Simple,
    /// `[<timestamp>] \t<LEVEL> \t<line> \t<file> \t<function>() \t<message>`
    Detailed,
}

/// [`FormatEvent`] implementation for both plain-text layouts.
#[derive(Debug, Clone, Copy)]
pub struct RecordFormatter {
    layout: Layout,
}

impl RecordFormatter {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }
}

impl<S, N> FormatEvent<S, N> for RecordFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let level = level_name(meta.level());

        match self.layout {
            Layout::Simple => write!(writer, "[{timestamp}] {level}: ")?,
            Layout::Detailed => {
                let line = meta.line().unwrap_or(0);
                let file = meta.file().map(base_name).unwrap_or("<unknown>");
                // innermost span stands in for the enclosing function
                let function = match ctx.lookup_current() {
                    Some(span) => span.name(),
                    None => meta
                        .module_path()
                        .and_then(|path| path.rsplit("::").next())
                        .unwrap_or("<unknown>"),
                };
                write!(
                    writer,
                    "[{timestamp}] \t{level} \t{line} \t{file} \t{function}() \t"
                )?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Standard severity names as they appear in the log file.
pub fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

fn base_name(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}
