//! tour2gpx cli - GPX generator from tour pages

use std::error::Error as _;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{debug, warn};

use tour2gpx::{Configuration, Converter, Error};

/// CLI of tour2gpx - Convert a tour page into a GPX file
#[derive(Debug, Parser)]
#[command(name = "tour2gpx", version)]
struct Cli {
    /// The GPX file to create
    #[arg(short, long)]
    output: PathBuf,
    /// Tour page URL
    url: String,
    /// Settings file. Default: .tour2gpx.yaml, ~/.tour2gpx.yaml
    #[arg(long)]
    config: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    finish(run(cli))
}

fn finish(result: Result<(), Error>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error converting tour: {}", report(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = load_configs(cli.config);
    let deadline = config.start_deadline();

    let converter = Converter::new(config)?;
    converter.convert(&cli.url, &cli.output, &deadline)
}

/// Error message followed by the causes not already part of it
fn report(err: &Error) -> String {
    let mut message = err.to_string();

    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(&format!(": {}", text));
        }
        source = cause.source();
    }

    message
}

/// Load the current config
fn load_configs(provided: Option<String>) -> Configuration {
    let mut options = vec![];

    if let Some(sprovided) = provided {
        options.push(sprovided);
    }

    options.push(".tour2gpx.yaml".to_string());

    if let Some(home) = dirs::home_dir() {
        if let Some(shome) = home.to_str() {
            options.push(format!("{}/.tour2gpx.yaml", shome));
        }
    }

    for fi in options {
        let yaml = match fs::read_to_string(&fi) {
            Ok(s) => s,
            Err(_) => continue,
        };

        match serde_yaml::from_str::<Configuration>(&yaml) {
            Ok(conf) => {
                debug!("Using settings from {}", fi);
                return conf;
            }
            Err(e) => warn!("Ignoring settings file {}: {}", fi, e),
        }
    }

    Configuration::default()
}
