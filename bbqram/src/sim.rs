// bbqram - Rust library for building and sampling bucket-brigade QRAM
//          circuits under randomized T-gate removal
// Copyright (C) 2025 - The bbqram developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::circuit::Circuit;
use crate::gate::*;
use itertools::Itertools;
use num::Complex;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;

pub type Amplitude = Complex<f64>;

/// Dense simulation keeps the full 2^n statevector in memory.
pub const MAX_QUBITS: usize = 28;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    QubitOutOfRange {
        gate: &'static str,
        qubit: usize,
        nqubits: usize,
    },
    DuplicateQubits {
        gate: &'static str,
        qubit: usize,
    },
    TooManyQubits(usize),
    ZeroShots,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::QubitOutOfRange {
                gate,
                qubit,
                nqubits,
            } => write!(
                f,
                "gate {gate} addresses qubit {qubit}, but the circuit has {nqubits} qubits"
            ),
            SimError::DuplicateQubits { gate, qubit } => {
                write!(f, "gate {gate} addresses qubit {qubit} more than once")
            }
            SimError::TooManyQubits(n) => write!(
                f,
                "circuit with {n} qubits is too large for dense simulation (max {MAX_QUBITS})"
            ),
            SimError::ZeroShots => write!(f, "repetition count must be positive"),
        }
    }
}

impl std::error::Error for SimError {}

fn check_qubits(gate: &'static str, qs: &[usize], nqubits: usize) -> Result<(), SimError> {
    for (i, &q) in qs.iter().enumerate() {
        if q >= nqubits {
            return Err(SimError::QubitOutOfRange {
                gate,
                qubit: q,
                nqubits,
            });
        }
        if qs[..i].contains(&q) {
            return Err(SimError::DuplicateQubits { gate, qubit: q });
        }
    }
    Ok(())
}

/// Run `circuit` on |0...0> and return the final statevector.
///
/// Amplitude index bits spell the qubits in order: qubit q is bit
/// (nqubits - 1 - q) of the index, so the binary rendering of an index
/// is the readout bit-string of all qubits.
pub fn statevector(circuit: &Circuit) -> Result<Vec<Amplitude>, SimError> {
    let n = circuit.num_qubits();
    if n > MAX_QUBITS {
        return Err(SimError::TooManyQubits(n));
    }
    for g in &circuit.gates {
        check_qubits(g.qasm_name(), &g.qs, n)?;
    }

    let mut amps = vec![Amplitude::new(0.0, 0.0); 1 << n];
    amps[0] = Amplitude::new(1.0, 0.0);
    for g in &circuit.gates {
        apply_gate(&mut amps, n, g);
    }
    Ok(amps)
}

fn phase_factor(t: GType) -> Amplitude {
    match t {
        Z => Amplitude::new(-1.0, 0.0),
        S => Amplitude::new(0.0, 1.0),
        Sdg => Amplitude::new(0.0, -1.0),
        T => Amplitude::from_polar(1.0, FRAC_PI_4),
        Tdg => Amplitude::from_polar(1.0, -FRAC_PI_4),
        _ => unreachable!("not a phase gate"),
    }
}

fn apply_gate(amps: &mut [Amplitude], nqubits: usize, gate: &Gate) {
    let bit = |q: usize| 1usize << (nqubits - 1 - q);

    match gate.t {
        NOT => {
            let m = bit(gate.qs[0]);
            for i in 0..amps.len() {
                if i & m == 0 {
                    amps.swap(i, i | m);
                }
            }
        }
        HAD => {
            let m = bit(gate.qs[0]);
            for i in 0..amps.len() {
                if i & m == 0 {
                    let a = amps[i];
                    let b = amps[i | m];
                    amps[i] = (a + b) * FRAC_1_SQRT_2;
                    amps[i | m] = (a - b) * FRAC_1_SQRT_2;
                }
            }
        }
        Z | S | Sdg | T | Tdg => {
            let m = bit(gate.qs[0]);
            let ph = phase_factor(gate.t);
            for (i, a) in amps.iter_mut().enumerate() {
                if i & m != 0 {
                    *a *= ph;
                }
            }
        }
        CNOT => {
            let c = bit(gate.qs[0]);
            let t = bit(gate.qs[1]);
            for i in 0..amps.len() {
                if i & c != 0 && i & t == 0 {
                    amps.swap(i, i | t);
                }
            }
        }
        CZ => {
            let c = bit(gate.qs[0]);
            let t = bit(gate.qs[1]);
            for (i, a) in amps.iter_mut().enumerate() {
                if i & c != 0 && i & t != 0 {
                    *a = -*a;
                }
            }
        }
        SWAP => {
            let a = bit(gate.qs[0]);
            let b = bit(gate.qs[1]);
            for i in 0..amps.len() {
                if i & a != 0 && i & b == 0 {
                    amps.swap(i, i ^ a ^ b);
                }
            }
        }
        TOFF => {
            let c0 = bit(gate.qs[0]);
            let c1 = bit(gate.qs[1]);
            let t = bit(gate.qs[2]);
            for i in 0..amps.len() {
                if i & c0 != 0 && i & c1 != 0 && i & t == 0 {
                    amps.swap(i, i | t);
                }
            }
        }
        CCZ => {
            let c0 = bit(gate.qs[0]);
            let c1 = bit(gate.qs[1]);
            let c2 = bit(gate.qs[2]);
            for (i, a) in amps.iter_mut().enumerate() {
                if i & c0 != 0 && i & c1 != 0 && i & c2 != 0 {
                    *a = -*a;
                }
            }
        }
    }
}

/// Outcome probabilities of the `measured` qubits, one entry per
/// bit-pattern, with `measured[0]` as the most significant bit.
pub fn marginal(circuit: &Circuit, measured: &[usize]) -> Result<Vec<f64>, SimError> {
    check_qubits("measure", measured, circuit.num_qubits())?;
    let amps = statevector(circuit)?;
    let n = circuit.num_qubits();

    let mut probs = vec![0.0; 1 << measured.len()];
    for (i, a) in amps.iter().enumerate() {
        let p = a.norm_sqr();
        if p == 0.0 {
            continue;
        }
        let mut k = 0;
        for &q in measured {
            k = (k << 1) | ((i >> (n - 1 - q)) & 1);
        }
        probs[k] += p;
    }
    Ok(probs)
}

/// Empirical histogram of observed readout bit-strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrequencyDistribution {
    counts: FxHashMap<String, usize>,
}

impl FrequencyDistribution {
    pub fn new() -> FrequencyDistribution {
        FrequencyDistribution::default()
    }

    pub fn add(&mut self, outcome: impl Into<String>, count: usize) {
        *self.counts.entry(outcome.into()).or_insert(0) += count;
    }

    pub fn count(&self, outcome: &str) -> usize {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter_sorted(&self) -> impl Iterator<Item = (&String, &usize)> {
        self.counts.iter().sorted()
    }
}

impl fmt::Display for FrequencyDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter_sorted().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        write!(f, "}}")
    }
}

// entries serialize in sorted key order so artifacts are
// byte-deterministic
impl Serialize for FrequencyDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (k, v) in self.iter_sorted() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Samples terminal readout outcomes over repeated executions of a
/// circuit. Each shot models one independent run; the circuits under
/// test are measurement-free until the terminal readout, so drawing
/// from the exact terminal marginal is equivalent.
pub struct Sampler {
    rng: StdRng,
    shots: usize,
}

impl Sampler {
    pub fn new() -> Sampler {
        Sampler {
            rng: StdRng::from_entropy(),
            shots: 1,
        }
    }

    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn shots(&mut self, shots: usize) -> &mut Self {
        self.shots = shots;
        self
    }

    pub fn run(
        &mut self,
        circuit: &Circuit,
        measured: &[usize],
    ) -> Result<FrequencyDistribution, SimError> {
        if self.shots == 0 {
            return Err(SimError::ZeroShots);
        }
        let probs = marginal(circuit, measured)?;
        let dist = WeightedIndex::new(&probs).expect("marginal probabilities sum to one");

        let mut tallies = vec![0usize; probs.len()];
        for _ in 0..self.shots {
            tallies[dist.sample(&mut self.rng)] += 1;
        }

        let width = measured.len();
        let mut freq = FrequencyDistribution::new();
        for (k, &count) in tallies.iter().enumerate() {
            if count > 0 {
                freq.add(format!("{k:0width$b}"), count);
            }
        }
        Ok(freq)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Sampler::new()
    }
}
