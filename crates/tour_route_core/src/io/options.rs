use std::{env, path::Path, time::Duration};

use log::LevelFilter;
use tour_route_derive::{CliOptions, CliValue, KvDisplay};

use crate::{
    Error, Result,
    constants::{DEFAULT_JITTER_DEGREES, DEFAULT_MAX_WAYPOINTS, DEFAULT_PARALLEL_THRESHOLD},
    routing::{mode::TransportMode, synth::Jitter, synth::RouteSynthesizer},
    solver::TourRequest,
};

/// Runtime options for the `tour-route` binary.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct TourOptions {
    /// Transport mode used for the total duration.
    #[cli(long = "mode", parse_with = "TransportMode::parse")]
    pub mode: TransportMode,
    /// Inputs with more waypoints than this are refused.
    #[cli(long = "max-waypoints")]
    pub max_waypoints: usize,
    /// Wall-clock budget for ordering, in milliseconds.
    #[cli(long = "time-limit-ms")]
    #[kv(fmt = "opt")]
    pub time_limit_ms: Option<u64>,
    /// Remaining-candidate count at which a greedy step runs in parallel.
    #[cli(long = "parallel-threshold")]
    pub parallel_threshold: usize,
    /// 2-opt passes over the greedy order. 0 disables refinement.
    #[cli(long = "two-opt-passes")]
    pub two_opt_passes: usize,
    /// Emit a synthetic path for every segment.
    #[cli(long = "geometry")]
    pub geometry: bool,
    /// Perturbation source for synthetic paths.
    #[cli(long = "jitter", parse_with = "JitterMode::parse")]
    pub jitter: JitterMode,
    /// Seed used when `jitter` is `seeded`.
    #[cli(long = "seed")]
    pub seed: u64,
    /// Full width, in degrees, of the perturbation on intermediate path points.
    #[cli(long = "jitter-degrees")]
    pub jitter_degrees: f64,
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    #[cli(long = "log-timestamp")]
    pub log_timestamp: bool,
    /// Log file path. Empty or `-` means stderr.
    #[cli(long = "log-output")]
    pub log_output: String,
    /// Waypoint file path. Empty or `-` means stdin.
    #[cli(long = "input")]
    pub input: String,
    /// Result file path. Empty or `-` means stdout.
    #[cli(long = "output")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "jitter")]
pub enum JitterMode {
    Seeded,
    #[cli(alias = "random")]
    Entropy,
    #[cli(alias = "none")]
    Off,
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            mode: TransportMode::default(),
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
            time_limit_ms: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            two_opt_passes: 0,
            geometry: false,
            jitter: JitterMode::Seeded,
            seed: 0,
            jitter_degrees: DEFAULT_JITTER_DEGREES,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
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

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<()> {
        if self.max_waypoints == 0 {
            return Err(Error::invalid_input("--max-waypoints must be > 0"));
        }
        RouteSynthesizer::default().with_jitter_degrees(self.jitter_degrees)?;
        Ok(())
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tour-route [options] [--input waypoints.txt]\n",
            "  tour-route [options] < waypoints.txt\n\n",
            "Input is either whitespace-separated `a,b` pairs or a JSON array of pairs.\n",
            "Axis order is detected per pair.\n\n",
            "Options:\n",
            "  --mode <foot|bike|car>\n",
            "  --max-waypoints <usize>\n",
            "  --time-limit-ms <u64>\n",
            "  --parallel-threshold <usize>\n",
            "  --two-opt-passes <usize>\n",
            "  --geometry[=<bool>]\n",
            "  --no-geometry\n",
            "  --jitter <seeded|entropy|off>\n",
            "  --seed <u64>\n",
            "  --jitter-degrees <f64>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  tour-route --mode foot < stops.txt\n",
            "  tour-route --input stops.json --geometry --seed 7 --output plan.json\n",
            "  tour-route --two-opt-passes 20 --log-level info < stops.txt\n",
        )
    }

    /// Request handed to the optimizer for these options.
    pub fn request(&self) -> Result<TourRequest> {
        let jitter = match self.jitter {
            JitterMode::Seeded => Jitter::Seeded(self.seed),
            JitterMode::Entropy => Jitter::Entropy,
            JitterMode::Off => Jitter::Off,
        };
        let synthesizer = RouteSynthesizer::default().with_jitter_degrees(self.jitter_degrees)?;

        let mut request = TourRequest::default()
            .with_mode(self.mode)
            .with_max_waypoints(self.max_waypoints)
            .with_parallel_threshold(self.parallel_threshold)
            .with_two_opt_passes(self.two_opt_passes)
            .with_geometry(self.geometry)
            .with_jitter(jitter)
            .with_synthesizer(synthesizer);
        if let Some(ms) = self.time_limit_ms {
            request = request.with_time_limit(Duration::from_millis(ms));
        }
        Ok(request)
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_stdio_path(&self.input)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }
}

fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use std::{path::Path, time::Duration};

    use log::LevelFilter;

    use super::{JitterMode, LogFormat, LogLevel, TourOptions};
    use crate::{TransportMode, routing::synth::Jitter};

    #[test]
    fn log_level_maps_to_expected_filter() {
        assert_eq!(LogLevel::Error.to_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warn.to_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Debug.to_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.to_filter(), LevelFilter::Trace);
        assert_eq!(LogLevel::Off.to_filter(), LevelFilter::Off);
    }

    #[test]
    fn parse_from_iter_applies_known_options() {
        let options = TourOptions::parse_from_iter([
            "--mode=walking",
            "--max-waypoints=50",
            "--time-limit-ms",
            "250",
            "--parallel-threshold=16",
            "--two-opt-passes=4",
            "--geometry",
            "--jitter=off",
            "--seed=99",
            "--jitter-degrees=0.002",
            "--log-level=debug",
            "--log-format=pretty",
            "--no-log-timestamp",
            "--log-output=run.log",
            "--input=stops.txt",
            "--output=plan.json",
        ])
        .expect("parse options");

        assert_eq!(options.mode, TransportMode::Foot);
        assert_eq!(options.max_waypoints, 50);
        assert_eq!(options.time_limit_ms, Some(250));
        assert_eq!(options.parallel_threshold, 16);
        assert_eq!(options.two_opt_passes, 4);
        assert!(options.geometry);
        assert_eq!(options.jitter, JitterMode::Off);
        assert_eq!(options.seed, 99);
        assert_eq!(options.jitter_degrees, 0.002);
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.log_format, LogFormat::Pretty);
        assert!(!options.log_timestamp);
        assert_eq!(options.log_output, "run.log");
        assert_eq!(options.input, "stops.txt");
        assert_eq!(options.output, "plan.json");
    }

    #[test]
    fn flag_followed_by_option_does_not_swallow_it() {
        let options =
            TourOptions::parse_from_iter(["--geometry", "--seed", "5"]).expect("parse options");
        assert!(options.geometry);
        assert_eq!(options.seed, 5);
    }

    #[test]
    fn flag_accepts_explicit_boolean() {
        let options = TourOptions::parse_from_iter(["--log-timestamp=false"]).expect("parse");
        assert!(!options.log_timestamp);
        let err = TourOptions::parse_from_iter(["--geometry=maybe"]).expect_err("bad bool");
        assert!(err.to_string().contains("Invalid boolean for --geometry"));
    }

    #[test]
    fn negated_flag_rejects_a_value() {
        let err = TourOptions::parse_from_iter(["--no-geometry=true"]).expect_err("value");
        assert!(err.to_string().contains("does not take a value"));
    }

    #[test]
    fn rejects_unknown_option() {
        let err = TourOptions::parse_from_iter(["--colour=blue"]).expect_err("unknown");
        assert!(err.to_string().contains("Unknown option: --colour"));
    }

    #[test]
    fn rejects_positional_argument() {
        let err = TourOptions::parse_from_iter(["stops.txt"]).expect_err("positional");
        assert!(err.to_string().contains("Unexpected argument: stops.txt"));
    }

    #[test]
    fn requires_value_for_valued_option() {
        let err = TourOptions::parse_from_iter(["--seed"]).expect_err("missing value");
        assert!(err.to_string().contains("Missing value for --seed"));
    }

    #[test]
    fn rejects_bad_mode() {
        let err = TourOptions::parse_from_iter(["--mode=boat"]).expect_err("bad mode");
        assert!(err.to_string().contains("Invalid value for --mode: boat"));
    }

    #[test]
    fn rejects_negative_jitter_and_zero_limit() {
        assert!(TourOptions::parse_from_iter(["--jitter-degrees=-1"]).is_err());
        assert!(TourOptions::parse_from_iter(["--max-waypoints=0"]).is_err());
    }

    #[test]
    fn help_returns_usage_error() {
        let err = TourOptions::parse_from_iter(["--help"]).expect_err("help");
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn request_carries_options() {
        let options = TourOptions {
            seed: 12,
            time_limit_ms: Some(1_500),
            two_opt_passes: 3,
            ..TourOptions::default()
        };
        let request = options.request().expect("request");
        assert_eq!(request.jitter, Jitter::Seeded(12));
        assert_eq!(request.time_limit, Some(Duration::from_millis(1_500)));
        assert_eq!(request.two_opt_passes, 3);
        assert_eq!(request.mode, TransportMode::Car);
    }

    #[test]
    fn stdio_paths_treat_empty_and_dash_as_streams() {
        let options = TourOptions::default();
        assert!(options.input_path().is_none());
        assert!(options.output_path().is_none());
        assert!(options.log_output_path().is_none());

        let options = TourOptions {
            input: "-".to_string(),
            output: "out/plan.json".to_string(),
            ..TourOptions::default()
        };
        assert!(options.input_path().is_none());
        assert_eq!(options.output_path(), Some(Path::new("out/plan.json")));
    }

    #[test]
    fn display_lists_every_option() {
        let text = TourOptions::default().to_string();
        assert!(text.contains("mode"));
        assert!(text.contains("= car"));
        assert!(text.contains("time_limit_ms"));
        assert!(text.contains("= -"));

        let limited = TourOptions {
            time_limit_ms: Some(250),
            mode: TransportMode::Foot,
            ..TourOptions::default()
        };
        let text = limited.to_string();
        assert!(text.contains("= 250"));
        assert!(text.contains("= foot"));
    }
}
