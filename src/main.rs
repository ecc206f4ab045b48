use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use toy_robot::{Simulator, SimulatorConfig, TokenScheme};
use tracing::{Level, info};

#[derive(Parser)]
#[command(
    name = "toy-robot",
    about = "Toy robot simulator on a 6x6 table",
    version
)]
struct Cli {
    /// File of commands, one line per run (default: stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Deliver PLACE and its x,y,FACING payload as separate tokens
    #[arg(long)]
    split_tokens: bool,

    /// Accept commands and facings in any casing
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Keep the same robot across input lines
    #[arg(long)]
    keep_robot: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn simulator_config(&self) -> Result<SimulatorConfig> {
        let mut config = match &self.config {
            Some(path) => SimulatorConfig::from_json_file(path)?,
            None => SimulatorConfig::default(),
        };
        if self.split_tokens {
            config.token_scheme = TokenScheme::Split;
        }
        if self.ignore_case {
            config.case_insensitive = true;
        }
        if self.keep_robot {
            config.fresh_robot_per_line = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Reports own stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(io::stderr)
        .init();

    let config = cli.simulator_config()?;
    info!(?config, "starting simulator");
    let mut simulator = Simulator::new(config);

    let stdout = io::stdout().lock();
    let stats = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open input `{}`", path.display()))?;
            simulator.run(BufReader::new(file), stdout)?
        }
        None => simulator.run(io::stdin().lock(), stdout)?,
    };

    info!(lines = stats.lines, reports = stats.reports, "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let cli = Cli::parse_from(["toy-robot"]);
        assert_eq!(cli.simulator_config().unwrap(), SimulatorConfig::default());
        assert_eq!(cli.log_level(), Level::WARN);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "toy-robot",
            "--split-tokens",
            "-i",
            "--keep-robot",
            "-vv",
            "commands.txt",
        ]);
        let config = cli.simulator_config().unwrap();

        assert_eq!(config.token_scheme, TokenScheme::Split);
        assert!(config.case_insensitive);
        assert!(!config.fresh_robot_per_line);
        assert_eq!(config.report_prefix, "Output: ");
        assert_eq!(cli.input, Some(PathBuf::from("commands.txt")));
        assert_eq!(cli.log_level(), Level::DEBUG);
    }

    #[test]
    fn flags_apply_on_top_of_config_file() {
        let path =
            std::env::temp_dir().join(format!("toy-robot-cli-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "report_prefix": "=> ", "fresh_robot_per_line": false }"#,
        )
        .unwrap();

        let file_only = Cli::parse_from(["toy-robot", "--config", path.to_str().unwrap()])
            .simulator_config()
            .unwrap();
        let with_flags = Cli::parse_from([
            "toy-robot",
            "--config",
            path.to_str().unwrap(),
            "--split-tokens",
        ])
        .simulator_config()
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(file_only.report_prefix, "=> ");
        assert!(!file_only.fresh_robot_per_line);
        assert_eq!(file_only.token_scheme, TokenScheme::Combined);

        assert_eq!(with_flags.report_prefix, "=> ");
        assert!(!with_flags.fresh_robot_per_line);
        assert_eq!(with_flags.token_scheme, TokenScheme::Split);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::parse_from(["toy-robot", "-c", "/definitely/not/here.json"]);
        assert!(cli.simulator_config().is_err());
    }
}
