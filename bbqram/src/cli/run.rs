//! The `run` CLI subcommand.

use clap::Parser;
use std::path::PathBuf;

use super::CliError;
use crate::experiment::Sweep;

/// Run the full removal-experiment sweep.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Decomposition scenario id.
    #[arg(long, short, default_value = "1")]
    scenario: String,

    /// Fraction of T gates to remove, in [0, 1].
    #[arg(long, short, default_value_t = 0.2)]
    percentage: f64,

    /// Mutate a copy of each circuit instead of removing gates in place.
    #[arg(long)]
    copy: bool,

    /// Repetitions when executing each circuit.
    #[arg(long, short, default_value_t = 1000)]
    repetitions: usize,

    /// Smallest number of addressing qubits in the sweep.
    #[arg(long, default_value_t = 2)]
    min_qubits: usize,

    /// Largest number of addressing qubits in the sweep.
    #[arg(long, default_value_t = 3)]
    max_qubits: usize,

    /// Directory for the result tables.
    #[arg(long, short, default_value = "results")]
    out_dir: PathBuf,

    /// Seed for the removal draws and the samplers.
    #[arg(long)]
    seed: Option<u64>,

    /// Fan basis states out across the available CPU cores.
    #[arg(long)]
    parallel: bool,
}

impl RunArgs {
    /// Run the `run` command using the provided arguments.
    pub fn run(self) -> Result<(), CliError> {
        let sweep = Sweep {
            scenario: self.scenario,
            qubits: self.min_qubits..=self.max_qubits,
            fraction: self.percentage,
            in_place: !self.copy,
            repetitions: self.repetitions,
            out_dir: self.out_dir,
            seed: self.seed,
            parallel: self.parallel,
        };

        for path in sweep.run()? {
            println!("{}", path.display());
        }
        Ok(())
    }
}
