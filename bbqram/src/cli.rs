//! The bbqram command line interface.

use clap::{crate_version, Parser};

pub mod run;
pub mod show;

/// CLI arguments.
#[derive(Parser, Debug)]
#[clap(version = crate_version!(), long_about = None)]
#[clap(about = "Bucket-brigade QRAM circuits under randomized T-gate removal")]
pub enum Cli {
    /// Run the removal-experiment sweep.
    Run(run::RunArgs),
    /// Build one circuit and print it.
    Show(show::ShowArgs),
}

/// Error type for the CLI.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum CliError {
    /// Error reading or writing files.
    #[display("IO error: {_0}")]
    IO(std::io::Error),
    /// Error running the sweep.
    #[display("{_0}")]
    Experiment(crate::experiment::Error),
    /// Error building the circuit to show.
    #[display("{_0}")]
    Brigade(crate::brigade::BrigadeError),
    /// Invalid decomposition scenario.
    #[display("{_0}")]
    Scenario(crate::decompose::UnknownScenario),
}

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self {
            Cli::Run(args) => args.run(),
            Cli::Show(args) => args.run(),
        }
    }
}
