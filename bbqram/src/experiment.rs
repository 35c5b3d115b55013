//! Sweep orchestration for the T-gate-removal experiment: for every
//! qubit count and every input basis state, execute the bucket-brigade
//! circuit before and after the removal mutation and tabulate both
//! frequency distributions.

use crate::brigade::{BrigadeError, BucketBrigade};
use crate::decompose::{BucketBrigadeDecomp, UnknownScenario};
use crate::gate::GType;
use crate::mutate::{GateRemover, InvalidFraction};
use crate::report::{ResultRecord, ResultSink, WriteError};
use crate::sim::{Sampler, SimError};
use log::{debug, info};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// All binary strings of length `n`, in numeric order.
pub fn basis_states(n: usize) -> impl Iterator<Item = String> {
    (0..1usize << n).map(move |k| format!("{k:0n$b}", n = n))
}

/// Lazy enumeration of every (qubit count, basis state) work item of a
/// sweep. Each item is independent of every other.
pub fn sweep_points(qubits: RangeInclusive<usize>) -> impl Iterator<Item = (usize, String)> {
    qubits.flat_map(|n| basis_states(n).map(move |s| (n, s)))
}

#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum Error {
    /// Invalid decomposition scenario id.
    #[display("{_0}")]
    Scenario(UnknownScenario),
    /// Removal fraction outside [0, 1].
    #[display("{_0}")]
    Fraction(InvalidFraction),
    /// The sweep parameters produced an unbuildable circuit.
    #[display("{_0}")]
    Brigade(BrigadeError),
    /// The sampling engine rejected a circuit.
    #[display("simulation failure: {_0}")]
    Simulation(SimError),
    /// A result table could not be written.
    #[display("{_0}")]
    Output(WriteError),
}

impl std::error::Error for Error {}

/// One full experiment run: the nested sweep over qubit counts and
/// basis states, with one persisted table per qubit count.
#[derive(Debug, Clone)]
pub struct Sweep {
    /// Decomposition scenario id, resolved once per run.
    pub scenario: String,
    /// Inclusive bounds of the qubit-count sweep.
    pub qubits: RangeInclusive<usize>,
    /// Fraction of T gates to remove, in [0, 1].
    pub fraction: f64,
    /// Remove gates from the built circuit directly, or from a copy.
    pub in_place: bool,
    /// Executions per circuit per basis state.
    pub repetitions: usize,
    pub out_dir: PathBuf,
    /// Base seed for all removal draws and samplers; entropy if unset.
    pub seed: Option<u64>,
    /// Fan the basis states of each qubit count out across CPU cores.
    pub parallel: bool,
}

impl Sweep {
    /// Run the sweep and return the written artifact paths, in order.
    ///
    /// A simulation failure aborts the entire qubit-count iteration
    /// before anything is persisted for it, so no partial table can
    /// masquerade as a complete one.
    pub fn run(&self) -> Result<Vec<PathBuf>, Error> {
        if !(0.0..=1.0).contains(&self.fraction) {
            return Err(InvalidFraction(self.fraction).into());
        }
        let decomp = BucketBrigadeDecomp::resolve(&self.scenario)?;
        let base_seed = self.seed.unwrap_or_else(rand::random);

        let sink = ResultSink::new(&self.out_dir);
        let mut written = Vec::new();
        for n in self.qubits.clone() {
            info!(
                "qubit count {}: comparing {} basis states at fraction {}",
                n,
                1usize << n,
                self.fraction
            );

            let states: Vec<(usize, String)> = basis_states(n).enumerate().collect();
            let records: Result<Vec<ResultRecord>, Error> = if self.parallel {
                states
                    .par_iter()
                    .map(|(k, s)| self.compare_state(s, &decomp, item_seed(base_seed, n, *k)))
                    .collect()
            } else {
                states
                    .iter()
                    .map(|(k, s)| self.compare_state(s, &decomp, item_seed(base_seed, n, *k)))
                    .collect()
            };

            let path = sink.persist(n, self.fraction, &records?)?;
            info!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }

    fn compare_state(
        &self,
        state: &str,
        decomp: &BucketBrigadeDecomp,
        seed: u64,
    ) -> Result<ResultRecord, Error> {
        let bb = BucketBrigade::build(state.len(), decomp, state)?;
        let measured = bb.layout.address_qubits();
        let eligible = bb.circuit.num_gates_of_type(GType::T);

        let mut original_sampler = Sampler::new();
        original_sampler.seed(seed).shots(self.repetitions);
        let original = original_sampler.run(&bb.circuit, &measured)?;

        let mut remover = GateRemover::new(GType::T);
        remover.fraction(self.fraction).seed(next_seed(seed));

        let mut circuit = bb.circuit;
        let plan = if self.in_place {
            remover.remove_gates(&mut circuit)?
        } else {
            let plan = remover.plan(&circuit)?;
            circuit = plan.applied(&circuit);
            plan
        };
        debug!(
            "basis state {}: removed {}/{} T gates",
            state,
            plan.len(),
            eligible
        );

        let mut modified_sampler = Sampler::new();
        modified_sampler
            .seed(next_seed(next_seed(seed)))
            .shots(self.repetitions);
        let modified = modified_sampler.run(&circuit, &measured)?;

        Ok(ResultRecord {
            input: state.to_string(),
            original,
            modified,
        })
    }
}

// splitmix64: decorrelates the per-item rng streams from the base seed
// independently of worker scheduling
fn next_seed(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

fn item_seed(base: u64, n: usize, k: usize) -> u64 {
    next_seed(base ^ ((n as u64) << 32) ^ k as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn sweep(dir: &std::path::Path) -> Sweep {
        Sweep {
            scenario: "2".to_string(),
            qubits: 2..=2,
            fraction: 0.0,
            in_place: true,
            repetitions: 1000,
            out_dir: dir.to_path_buf(),
            seed: Some(1337),
            parallel: false,
        }
    }

    #[test]
    fn sweep_points_enumerate_in_order() {
        let points: Vec<_> = sweep_points(1..=2).collect();
        assert_eq!(
            points,
            vec![
                (1, "0".to_string()),
                (1, "1".to_string()),
                (2, "00".to_string()),
                (2, "01".to_string()),
                (2, "10".to_string()),
                (2, "11".to_string()),
            ]
        );
    }

    // with nothing removed both tables must be the exact point mass at
    // the input, each summing to the repetition count
    #[test]
    fn zero_fraction_tables_coincide() {
        let dir = tempdir().unwrap();
        let written = sweep(dir.path()).run().unwrap();
        assert_eq!(written, vec![dir.path().join("remove_t_2q_p0.csv")]);

        let body = fs::read_to_string(&written[0]).unwrap();
        assert_eq!(
            body,
            "input,original,modified\n\
             \"00\",\"{\"\"00\"\":1000}\",\"{\"\"00\"\":1000}\"\n\
             \"01\",\"{\"\"01\"\":1000}\",\"{\"\"01\"\":1000}\"\n\
             \"10\",\"{\"\"10\"\":1000}\",\"{\"\"10\"\":1000}\"\n\
             \"11\",\"{\"\"11\"\":1000}\",\"{\"\"11\"\":1000}\"\n"
        );
    }

    #[test]
    fn full_fraction_strips_every_t_gate() {
        let dir = tempdir().unwrap();
        let mut s = sweep(dir.path());
        s.scenario = "1".to_string();
        s.fraction = 1.0;
        s.repetitions = 200;

        let written = s.run().unwrap();
        assert_eq!(written, vec![dir.path().join("remove_t_2q_p100.csv")]);
        let body = fs::read_to_string(&written[0]).unwrap();
        assert_eq!(body.lines().count(), 5);
        // the original circuit is untouched by the removal and stays a
        // point mass at the input
        assert!(body.contains(r#""00","{""00"":200}""#));

        let decomp = BucketBrigadeDecomp::resolve("1").unwrap();
        let bb = BucketBrigade::build(2, &decomp, "00").unwrap();
        assert!(bb.circuit.num_gates_of_type(GType::T) > 0);
        let mut circuit = bb.circuit;
        GateRemover::new(GType::T)
            .fraction(1.0)
            .remove_gates(&mut circuit)
            .unwrap();
        assert_eq!(circuit.num_gates_of_type(GType::T), 0);
    }

    #[test]
    fn copy_mode_matches_in_place() {
        let dir_a = tempdir().unwrap();
        let dir_b = tempdir().unwrap();

        let mut a = sweep(dir_a.path());
        a.fraction = 0.5;
        let mut b = sweep(dir_b.path());
        b.fraction = 0.5;
        b.in_place = false;

        let wrote_a = a.run().unwrap();
        let wrote_b = b.run().unwrap();
        assert_eq!(
            fs::read_to_string(&wrote_a[0]).unwrap(),
            fs::read_to_string(&wrote_b[0]).unwrap()
        );
    }

    #[test]
    fn parallel_matches_serial() {
        let dir_a = tempdir().unwrap();
        let dir_b = tempdir().unwrap();

        let mut a = sweep(dir_a.path());
        a.fraction = 0.4;
        let mut b = sweep(dir_b.path());
        b.fraction = 0.4;
        b.parallel = true;

        let wrote_a = a.run().unwrap();
        let wrote_b = b.run().unwrap();
        assert_eq!(
            fs::read_to_string(&wrote_a[0]).unwrap(),
            fs::read_to_string(&wrote_b[0]).unwrap()
        );
    }

    #[test]
    fn invalid_parameters_fail_before_building() {
        let dir = tempdir().unwrap();

        let mut s = sweep(dir.path());
        s.fraction = 1.5;
        assert!(matches!(s.run(), Err(Error::Fraction(_))));

        let mut s = sweep(dir.path());
        s.scenario = "9".to_string();
        assert!(matches!(s.run(), Err(Error::Scenario(_))));

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn zero_repetitions_surface_as_simulation_failure() {
        let dir = tempdir().unwrap();
        let mut s = sweep(dir.path());
        s.repetitions = 0;
        assert!(matches!(s.run(), Err(Error::Simulation(SimError::ZeroShots))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
