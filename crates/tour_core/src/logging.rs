use std::{
    fmt::Display,
    fs::File,
    io::{self, Write},
};

use env_logger::{Builder, Target};
use log::Record;

use crate::Result;
use crate::options::{LogFormat, TourOptions};

/// Target of the per-insertion `trace!` lines emitted while splicing.
pub const INSERTION_TARGET: &str = "tour_core::tour";

pub fn init_logger(options: &TourOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level)
        .write_style(env_logger::WriteStyle::Never)
        .format(move |buf, record| {
            if log_timestamp {
                let stamp = buf.timestamp_millis();
                write_line(buf, log_format, Some(stamp), record)
            } else {
                write_line(buf, log_format, None::<&str>, record)
            }
        });

    // Overrides the global level for the tour module only.
    if let Some(level) = options.insert_log_level {
        builder.filter_module(INSERTION_TARGET, level);
    }

    if let Some(log_path) = options.log_output_path() {
        let log_file = File::create(log_path).map_err(|e| {
            crate::Error::other(format!(
                "failed to create log output file {}: {e}",
                log_path.display()
            ))
        })?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| crate::Error::other(format!("logger init failed: {e}")))
}

fn write_line<W: Write, T: Display>(
    out: &mut W,
    format: LogFormat,
    stamp: Option<T>,
    record: &Record<'_>,
) -> io::Result<()> {
    if let Some(stamp) = stamp {
        write!(out, "{stamp} ")?;
    }
    let level = record.level().as_str();
    match format {
        LogFormat::Compact => writeln!(out, "{level} {}", record.args()),
        LogFormat::Pretty => {
            let target = record.target();
            let module = target.strip_prefix("tour_core::").unwrap_or(target);
            writeln!(out, "{level:<5} [{module}] {}", record.args())
        }
    }
}
