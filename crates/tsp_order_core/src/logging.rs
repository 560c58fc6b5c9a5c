use std::{fs::File, io::Write};

use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::{Level, Record};

use crate::options::{LogFormat, SolverOptions};
use crate::{Error, Result};

/// Installs the global logger described by `options`. Fails if a logger is
/// already installed or the log file cannot be created.
pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let log_format = options.log_format;
    let log_timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.into())
        .write_style(WriteStyle::Never)
        .format(move |buf, record| write_record(buf, record, log_format, log_timestamp));

    match options.log_output_path() {
        Some(log_path) => {
            let log_file = File::create(log_path).map_err(|e| {
                Error::other(format!(
                    "failed to create log output file {}: {e}",
                    log_path.display()
                ))
            })?;
            builder.target(Target::Pipe(Box::new(log_file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn write_record(
    buf: &mut Formatter,
    record: &Record<'_>,
    log_format: LogFormat,
    log_timestamp: bool,
) -> std::io::Result<()> {
    if log_timestamp {
        write!(buf, "{} ", buf.timestamp_millis())?;
    }

    match log_format {
        LogFormat::Compact => writeln!(buf, "{} {}", level_tag(record.level()), record.args()),
        LogFormat::Pretty => writeln!(
            buf,
            "{:<5} [{}] {}",
            level_tag(record.level()),
            record.target(),
            record.args()
        ),
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::level_tag;

    #[test]
    fn level_tag_is_upper_case_level_name() {
        assert_eq!(level_tag(Level::Error), "ERROR");
        assert_eq!(level_tag(Level::Warn), "WARN");
        assert_eq!(level_tag(Level::Info), "INFO");
        assert_eq!(level_tag(Level::Debug), "DEBUG");
        assert_eq!(level_tag(Level::Trace), "TRACE");
    }
}
