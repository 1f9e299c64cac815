// src/main.rs

mod harness;

use clap::Parser;
use contextual_flow::{CommandLineInput, HarnessConfig};
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::path::Path;

/// Sets up logging configuration.
fn setup_logging(verbose: bool, log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let mut config = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(log_level)))
            .build("stdout", Box::new(stdout_appender)),
    );
    let mut root = Root::builder().appender("stdout");

    if let Some(log_file_path) = log_file {
        if let Some(parent) = log_file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file_appender = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
            )))
            .build(log_file_path)?;

        config = config.appender(Appender::builder().build("file", Box::new(file_appender)));
        root = root.appender("file");
    }

    // The file appender records every stage; the console follows --verbose.
    let root_level = if log_file.is_some() {
        LevelFilter::Trace
    } else {
        log_level
    };
    let config = config.build(root.build(root_level))?;

    log4rs::init_config(config)?;
    match log_file {
        Some(path) => log::info!("Logging initialized. Log file: {}", path.display()),
        None => log::info!("Logging initialized."),
    }
    Ok(())
}

fn main() {
    let cli = CommandLineInput::parse();

    let config = match HarnessConfig::resolve(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = setup_logging(config.verbose, config.log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = harness::run(&config) {
        log::error!("Scenario '{}' failed: {:#}", config.scenario, e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
