use std::{env, iter::Peekable, path::Path};

use log::LevelFilter;
use tsp_order_derive::{CliOptions, CliValue, KvDisplay};

use crate::{Error, MAX_EXACT_STOPS, Result, SolveConfig};

/// Value type of a `--name <value>` option.
pub(crate) trait OptionValue: Sized {
    /// Placeholder for the value in the usage text.
    const HINT: &'static str;

    fn parse_option(name: &str, raw: &str) -> Result<Self>;
}

impl OptionValue for usize {
    const HINT: &'static str = "<n>";

    fn parse_option(name: &str, raw: &str) -> Result<Self> {
        raw.trim()
            .parse()
            .map_err(|e| Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})")))
    }
}

impl OptionValue for String {
    const HINT: &'static str = "<text>";

    fn parse_option(_name: &str, raw: &str) -> Result<Self> {
        Ok(raw.to_owned())
    }
}

impl OptionValue for bool {
    const HINT: &'static str = "<bool>";

    fn parse_option(name: &str, raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(Error::invalid_input(format!(
                "Invalid boolean for --{name}: {raw} (expected true/false)"
            ))),
        }
    }
}

/// Command-line options for the `tsp-order` binary.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Largest stop count solved exactly by brute force.
    #[cli(hint = "<0..=12>")]
    pub exact_threshold: usize,
    /// Accepted for compatibility; stop 0 is always the start.
    pub fixed_start: bool,
    /// Return to the start stop at the end of the order.
    pub round_trip: bool,
    /// Log verbosity.
    pub log_level: LogLevel,
    /// Log line layout.
    pub log_format: LogFormat,
    /// Prefix log lines with a millisecond timestamp.
    pub log_timestamp: bool,
    /// Log file; empty or `-` logs to stderr.
    #[cli(hint = "<path>")]
    #[kv(empty = "stderr")]
    pub log_output: String,
    /// Cost matrix file; empty or `-` reads stdin.
    #[cli(hint = "<path>")]
    #[kv(empty = "stdin")]
    pub input: String,
    /// File for the visiting order; empty or `-` writes stdout.
    #[cli(hint = "<path>")]
    #[kv(empty = "stdout")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        let config = SolveConfig::default();
        Self {
            exact_threshold: config.exact_threshold,
            fixed_start: config.fixed_start,
            round_trip: config.round_trip,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: false,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    /// Applies `--name value`, `--name=value` and bare flag arguments over
    /// the defaults, then checks that the result makes a valid
    /// [`SolveConfig`]. `--help` comes back as an error carrying the usage.
    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            let (name, value) = option_parts(&arg, &mut args)?;
            if !options.apply_cli_option(&name, value)? {
                return Err(usage_error(format!("Unknown option: --{name}")));
            }
        }

        options.solve_config()?;
        Ok(options)
    }

    pub fn usage() -> String {
        let entries = Self::option_help();
        let width = entries.iter().map(|(form, _)| form.len()).max().unwrap_or(0);

        let mut text = String::from(concat!(
            "Usage:\n",
            "  tsp-order [options] [--input matrix.txt]\n",
            "  tsp-order [options] < matrix.txt\n\n",
            "Input: one matrix row per line, costs separated by commas or spaces.\n",
            "Output: one stop index per line, starting at stop 0.\n\n",
            "Options:\n",
        ));
        for (form, help) in &entries {
            text.push_str(&format!("  {form:<width$}  {help}\n"));
        }
        text.push_str(concat!(
            "  --help\n\n",
            "Examples:\n",
            "  tsp-order --round-trip < matrix.txt\n",
            "  tsp-order --input matrix.txt --output order.txt\n",
            "  tsp-order --exact-threshold=9 --log-level=info < matrix.txt\n",
        ));
        text
    }

    pub fn solve_config(&self) -> Result<SolveConfig> {
        if self.exact_threshold > MAX_EXACT_STOPS {
            return Err(Error::invalid_input(format!(
                "Invalid value for --exact-threshold: {} (expected at most {MAX_EXACT_STOPS})",
                self.exact_threshold
            )));
        }
        Ok(SolveConfig::new(self.fixed_start, self.round_trip)
            .with_exact_threshold(self.exact_threshold))
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        stdio_or_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        stdio_or_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        stdio_or_path(&self.input)
    }
}

/// Splits one argument into its option name and value. The value comes after
/// `=` or, failing that, from the next argument unless that is another
/// option.
fn option_parts(
    arg: &str,
    rest: &mut Peekable<impl Iterator<Item = String>>,
) -> Result<(String, Option<String>)> {
    if arg == "--help" || arg == "-h" {
        return Err(Error::invalid_input(SolverOptions::usage()));
    }

    let name = match arg.strip_prefix("--") {
        Some("") => return Err(usage_error(format!("Invalid option name: {arg}"))),
        Some(name) => name,
        None => return Err(usage_error(format!("Unexpected argument: {arg}"))),
    };

    if let Some((name, value)) = name.split_once('=') {
        return Ok((name.to_owned(), Some(value.to_owned())));
    }
    let value = rest.next_if(|next| !next.starts_with("--"));
    Ok((name.to_owned(), value))
}

fn usage_error(message: String) -> Error {
    Error::invalid_input(format!("{message}\n\n{}", SolverOptions::usage()))
}

/// Empty and `-` select the standard stream.
fn stdio_or_path(raw: &str) -> Option<&Path> {
    match raw.trim() {
        "" | "-" => None,
        path => Some(Path::new(path)),
    }
}
