use std::{env, fmt, path::Path};

use log::LevelFilter;

use crate::{Error, Heuristic, Result};

/// Runtime options for the tour builder.
#[derive(Clone, Debug)]
pub struct TourOptions {
    /// Insertion rule: `nearest` or `smallest`.
    pub heuristic: Heuristic,
    /// Optional input file path for points. Empty means stdin.
    pub input: String,
    /// Optional output file path for the tour. Empty means stdout.
    pub output: String,
    /// Generate this many random points instead of reading input.
    pub random: usize,
    /// Seed for random point generation.
    pub seed: u64,
    pub width: f64,
    pub height: f64,
    /// Edges longer than `outlier_factor` times the mean edge count as spikes.
    pub outlier_factor: f64,
    pub log_level: LevelFilter,
    /// Level for the per-insertion lines only. Unset follows `log_level`.
    pub insert_log_level: Option<LevelFilter>,
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    pub log_output: String,
}

/// Parses a `log` level name (`off|error|warn|info|debug|trace`).
fn parse_level(option: &str, raw: &str) -> Result<LevelFilter> {
    raw.parse()
        .map_err(|_| invalid_value(option, raw, "off|error|warn|info|debug|trace"))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(invalid_value("log-format", raw, "compact|pretty")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Pretty => write!(f, "pretty"),
        }
    }
}

impl Heuristic {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "smallest" => Ok(Self::Smallest),
            _ => Err(invalid_value("heuristic", raw, "nearest|smallest")),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Smallest => write!(f, "smallest"),
        }
    }
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::Smallest,
            input: String::new(),
            output: String::new(),
            random: 0,
            seed: 999,
            width: 600.0,
            height: 600.0,
            outlier_factor: 10.0,
            log_level: LevelFilter::Warn,
            insert_log_level: None,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl TourOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
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
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);

            match name.as_str() {
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "no-log-timestamp" => {
                    if value.is_some() {
                        return Err(Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    options.log_timestamp = false;
                }
                _ => {
                    let raw = value.ok_or_else(|| {
                        Error::invalid_input(format!("Missing value for --{name}"))
                    })?;
                    options.apply_value(&name, &raw)?;
                }
            }
        }

        Ok(options)
    }

    fn apply_value(&mut self, name: &str, raw: &str) -> Result<()> {
        match name {
            "heuristic" => self.heuristic = Heuristic::parse(raw)?,
            "input" => self.input = raw.to_string(),
            "output" => self.output = raw.to_string(),
            "random" => self.random = parse_number(name, raw)?,
            "seed" => self.seed = parse_number(name, raw)?,
            "width" => self.width = parse_number(name, raw)?,
            "height" => self.height = parse_number(name, raw)?,
            "outlier-factor" => self.outlier_factor = parse_number(name, raw)?,
            "log-level" => self.log_level = parse_level(name, raw)?,
            "insert-log-level" => self.insert_log_level = Some(parse_level(name, raw)?),
            "log-format" => self.log_format = LogFormat::parse(raw)?,
            "log-output" => self.log_output = raw.to_string(),
            _ => {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }
        Ok(())
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tour-insert [options] [--input points.txt]\n",
            "  tour-insert [options] < points.txt\n",
            "  tour-insert [options] --random <n>\n\n",
            "Options:\n",
            "  --heuristic <nearest|smallest>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --random <usize>\n",
            "  --seed <u64>\n",
            "  --width <f64>\n",
            "  --height <f64>\n",
            "  --outlier-factor <f64>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --insert-log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --help\n",
            "\n",
            "Input is whitespace-separated 'x,y' tokens.\n",
            "\n",
            "Examples:\n",
            "  tour-insert --heuristic nearest --input points.txt --output tour.txt\n",
            "  tour-insert --random 1000 --seed 7 --log-level=info\n",
            "  tour-insert --log-level=debug --log-format=pretty < points.txt\n",
            "  tour-insert --random 20 --insert-log-level=trace\n",
        )
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_stdio_path(&self.input)
    }
}

impl fmt::Display for TourOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "\theuristic      = {}", self.heuristic)?;
        writeln!(f, "\tinput          = {}", self.input)?;
        writeln!(f, "\toutput         = {}", self.output)?;
        writeln!(f, "\trandom         = {}", self.random)?;
        writeln!(f, "\tseed           = {}", self.seed)?;
        writeln!(f, "\twidth          = {}", self.width)?;
        writeln!(f, "\theight         = {}", self.height)?;
        writeln!(f, "\toutlier_factor = {}", self.outlier_factor)?;
        writeln!(f, "\tlog_level      = {}", self.log_level)?;
        match self.insert_log_level {
            Some(level) => writeln!(f, "\tinsert_log_lvl = {level}")?,
            None => writeln!(f, "\tinsert_log_lvl = (log_level)")?,
        }
        writeln!(f, "\tlog_format     = {}", self.log_format)?;
        writeln!(f, "\tlog_timestamp  = {}", self.log_timestamp)?;
        write!(f, "\tlog_output     = {}", self.log_output)
    }
}

fn split_arg(
    raw_name: &str,
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
) -> (String, Option<String>) {
    if let Some((k, v)) = raw_name.split_once('=') {
        return (k.to_string(), Some(v.to_string()));
    }

    let value = match args.peek() {
        Some(next) if !next.starts_with("--") => args.next(),
        _ => None,
    };

    (raw_name.to_string(), value)
}

fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn invalid_value(option: &str, raw: &str, expected: &str) -> Error {
    Error::invalid_input(format!(
        "Invalid value for --{option}: {raw} (expected {expected})"
    ))
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::invalid_input(format!("Invalid value for --{name}: {raw}")))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}
