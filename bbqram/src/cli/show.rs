//! The `show` CLI subcommand.

use clap::Parser;
use std::fs;
use std::path::PathBuf;

use super::CliError;
use crate::brigade::BucketBrigade;
use crate::decompose::BucketBrigadeDecomp;

/// Build a single bucket-brigade circuit and print it.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Number of addressing qubits.
    #[arg(long, short = 'n', default_value_t = 2)]
    qubits: usize,

    /// Decomposition scenario id.
    #[arg(long, short, default_value = "1")]
    scenario: String,

    /// Initial basis state of the addressing qubits. Defaults to all
    /// zeros.
    #[arg(long, short)]
    initial_state: Option<String>,

    /// Output to a file instead of printing the circuit.
    #[arg(long, short)]
    out: Option<PathBuf>,
}

impl ShowArgs {
    /// Run the `show` command using the provided arguments.
    pub fn run(self) -> Result<(), CliError> {
        let decomp = BucketBrigadeDecomp::resolve(&self.scenario)?;
        let state = self
            .initial_state
            .unwrap_or_else(|| "0".repeat(self.qubits));
        let bb = BucketBrigade::build(self.qubits, &decomp, &state)?;

        let text = format!("{}\n{}\n", bb.circuit.to_qasm(), bb.circuit.stats());
        if let Some(out_path) = self.out {
            fs::write(out_path, text)?;
        } else {
            print!("{text}");
        }
        Ok(())
    }
}
