// src/config.rs
use crate::constants::{DEMO_DEFAULT_INPUT, LOG_FILE_ENV};
use crate::error::ConfigError;
use clap::Parser;
use std::fmt;
use std::path::PathBuf;

/// Parsed command-line input for the demo harness.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Scenario to run: maybe, until-error or saving-context
    #[arg(default_value = "until-error")]
    pub scenario: String,

    /// Input value fed to the scenario's chain
    #[arg(short, long, default_value_t = DEMO_DEFAULT_INPUT, allow_negative_numbers = true)]
    pub input: i64,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Also write the log to this file
    #[arg(long, env = LOG_FILE_ENV)]
    pub log_file: Option<String>,

    /// Print the intermediate value after every stage
    #[arg(short = 's', long, default_value_t = false)]
    pub steps: bool,
}

/// The demo chains the harness knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Maybe,
    UntilError,
    SavingContext,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Self::Maybe, Self::UntilError, Self::SavingContext];

    pub fn name(self) -> &'static str {
        match self {
            Self::Maybe => "maybe",
            Self::UntilError => "until-error",
            Self::SavingContext => "saving-context",
        }
    }

    /// Parses a scenario name; underscores and case are ignored.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        let normalized = name.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == normalized)
            .ok_or_else(|| ConfigError::UnknownScenario(name.to_string()))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved harness configuration, validated and ready to run.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub scenario: Scenario,
    pub input: i64,
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
    pub show_steps: bool,
}

impl HarnessConfig {
    /// Resolves a complete harness configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, ConfigError> {
        let scenario = Scenario::parse(&cli.scenario)?;
        let log_file = cli.log_file.map(validate_log_path).transpose()?;

        Ok(HarnessConfig {
            scenario,
            input: cli.input,
            verbose: cli.verbose,
            log_file,
            show_steps: cli.steps,
        })
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::UntilError,
            input: DEMO_DEFAULT_INPUT,
            verbose: false,
            log_file: None,
            show_steps: false,
        }
    }
}

fn validate_log_path(raw: String) -> Result<PathBuf, ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::InvalidLogPath {
            path: raw,
            reason: "path is empty".to_string(),
        });
    }

    let path = PathBuf::from(&raw);
    if path.is_dir() {
        return Err(ConfigError::InvalidLogPath {
            path: raw,
            reason: "path is a directory".to_string(),
        });
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> CommandLineInput {
        CommandLineInput::try_parse_from(std::iter::once("contextual-flow").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let mut cli = parse(&[]);
        cli.log_file = None;
        let config = HarnessConfig::resolve(cli).unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn test_full_command_line() {
        let cli = parse(&["maybe", "--input", "-3", "--verbose", "--steps"]);
        assert_eq!(cli.input, -3);

        let config = HarnessConfig::resolve(cli).unwrap();
        assert_eq!(config.scenario, Scenario::Maybe);
        assert!(config.verbose);
        assert!(config.show_steps);
    }

    #[test]
    fn test_scenario_names_are_normalized() {
        assert_eq!(Scenario::parse("Saving_Context").unwrap(), Scenario::SavingContext);
        for scenario in Scenario::ALL {
            assert_eq!(Scenario::parse(scenario.name()).unwrap(), scenario);
        }
    }

    #[test]
    fn test_unknown_scenario() {
        let err = Scenario::parse("either").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownScenario(name) if name == "either"));
    }

    #[test]
    fn test_log_path_validation() {
        assert!(validate_log_path("  ".to_string()).is_err());

        let dir = std::env::temp_dir();
        let err = validate_log_path(dir.display().to_string()).unwrap_err();
        assert!(err.to_string().contains("directory"));

        let file = dir.join("contextual-flow-test.log");
        assert_eq!(validate_log_path(file.display().to_string()).unwrap(), file);
    }
}
