//! Line-driven simulator wrapping a [`Robot`].
//!
//! The entry point is [`Simulator`]. Configure it with a [`SimulatorConfig`],
//! then either feed it lines one at a time with [`Simulator::run_line`] or hand
//! it a reader and writer with [`Simulator::run`]. Formatting and writing of
//! reports happen here; the robot only returns `X,Y,FACING` strings.

use crate::command::{CommandParser, tokenize};
use crate::error::SimulatorError;
use crate::robot::Robot;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

/// How PLACE and its payload reach the robot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenScheme {
    /// The parser attaches `x,y,FACING` to PLACE before the robot sees it.
    #[default]
    Combined,
    /// The robot receives PLACE and its payload as two consecutive tokens.
    Split,
}

/// Configuration for the simulator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Whether PLACE payloads are pre-combined by the parser or split across tokens.
    pub token_scheme: TokenScheme,
    /// Text written in front of every report. Default: `"Output: "`.
    pub report_prefix: String,
    /// Accept keywords and facings in any casing.
    pub case_insensitive: bool,
    /// Start every input line with a new, unplaced robot.
    pub fresh_robot_per_line: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            token_scheme: TokenScheme::Combined,
            report_prefix: "Output: ".to_owned(),
            case_insensitive: false,
            fresh_robot_per_line: true,
        }
    }
}

impl SimulatorConfig {
    /// Loads a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SimulatorError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| SimulatorError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| SimulatorError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Totals for one [`Simulator::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines: usize,
    pub reports: usize,
}

/// Drives a [`Robot`] from lines of text.
pub struct Simulator {
    config: SimulatorConfig,
    parser: CommandParser,
    robot: Robot,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Self {
        let parser = CommandParser::new(config.case_insensitive).with_standard_keywords();
        Self {
            config,
            parser,
            robot: Robot::new(),
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// The robot as left by the last processed line.
    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    /// Runs one line of commands and returns the formatted reports it produced.
    pub fn run_line(&mut self, line: &str) -> Vec<String> {
        if self.config.fresh_robot_per_line {
            self.robot = Robot::new();
        }

        let reports = match self.config.token_scheme {
            TokenScheme::Combined => {
                let commands = self.parser.parse_line(line);
                self.robot.execute(&commands)
            }
            TokenScheme::Split => self.robot.execute_tokens(tokenize(line), &self.parser),
        };

        reports
            .into_iter()
            .map(|report| format!("{}{}", self.config.report_prefix, report))
            .collect()
    }

    /// Reads `input` line by line until EOF, writing each report to `output`.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
    /// corrupt line only yields unrecognised tokens and the run carries on.
    pub fn run<R, W>(&mut self, mut input: R, mut output: W) -> Result<RunStats, SimulatorError>
    where
        R: BufRead,
        W: Write,
    {
        let mut stats = RunStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            stats.lines += 1;

            let line = String::from_utf8_lossy(&buf);
            let reports = self.run_line(&line);
            debug!(line = stats.lines, reports = reports.len(), "processed line");
            for report in &reports {
                writeln!(output, "{report}")?;
            }
            stats.reports += reports.len();
        }

        output.flush()?;
        info!(lines = stats.lines, reports = stats.reports, "input exhausted");
        Ok(stats)
    }
}
