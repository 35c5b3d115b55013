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
use std::fmt;

/// Strategy for lowering a Toffoli gate to the Clifford+T alphabet.
///
/// `RelPhaseCompute` realises the Toffoli only up to a diagonal relative
/// phase; its adjoint `RelPhaseUncompute` cancels that phase exactly when
/// the two are paired on the same qubit triples in reversed order, which
/// is how a bucket brigade uses them (fan-in / fan-out).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ToffoliDecomp {
    /// Keep the Toffoli as a primitive three-qubit gate.
    NoDecomp,
    /// Textbook 7-T decomposition, T-depth 4.
    TDepth4,
    /// 4-T relative-phase Toffoli.
    RelPhaseCompute,
    /// Exact adjoint of [`ToffoliDecomp::RelPhaseCompute`].
    RelPhaseUncompute,
    /// Parity-ancilla construction: all seven T phases in one layer,
    /// four scratch qubits computed and uncomputed around them.
    TDepth1FourAncilla,
}

use ToffoliDecomp::*;

impl ToffoliDecomp {
    /// Scratch qubits needed per lowered Toffoli. Scratch is returned to
    /// |0> by every emission, so one pool can be shared sequentially.
    pub fn ancilla_cost(&self) -> usize {
        match self {
            TDepth1FourAncilla => 4,
            _ => 0,
        }
    }

    pub fn t_count_per_toffoli(&self) -> usize {
        match self {
            NoDecomp => 0,
            TDepth4 | TDepth1FourAncilla => 7,
            RelPhaseCompute | RelPhaseUncompute => 4,
        }
    }

    /// Append the gate sequence realising TOFF(c0, c1, tgt) to `circ`.
    pub fn emit(&self, circ: &mut Circuit, c0: usize, c1: usize, tgt: usize, scratch: &[usize]) {
        match self {
            NoDecomp => circ.push(Gate::new(TOFF, vec![c0, c1, tgt])),
            TDepth4 => {
                circ.push(Gate::new(HAD, vec![tgt]));
                push_ccz_tdepth4(circ, c0, c1, tgt);
                circ.push(Gate::new(HAD, vec![tgt]));
            }
            RelPhaseCompute => push_rel_phase(circ, c0, c1, tgt),
            RelPhaseUncompute => {
                let mut c = Circuit::new(circ.num_qubits());
                push_rel_phase(&mut c, c0, c1, tgt);
                c.adjoint();
                *circ += &c;
            }
            TDepth1FourAncilla => {
                assert!(
                    scratch.len() >= 4,
                    "T-depth-1 decomposition needs four scratch qubits"
                );
                push_tdepth1(circ, c0, c1, tgt, scratch);
            }
        }
    }
}

fn push_ccz_tdepth4(circ: &mut Circuit, a: usize, b: usize, c: usize) {
    circ.push(Gate::new(CNOT, vec![b, c]));
    circ.push(Gate::new(Tdg, vec![c]));
    circ.push(Gate::new(CNOT, vec![a, c]));
    circ.push(Gate::new(T, vec![c]));
    circ.push(Gate::new(CNOT, vec![b, c]));
    circ.push(Gate::new(Tdg, vec![c]));
    circ.push(Gate::new(CNOT, vec![a, c]));
    circ.push(Gate::new(T, vec![b]));
    circ.push(Gate::new(T, vec![c]));
    circ.push(Gate::new(CNOT, vec![a, b]));
    circ.push(Gate::new(T, vec![a]));
    circ.push(Gate::new(Tdg, vec![b]));
    circ.push(Gate::new(CNOT, vec![a, b]));
}

fn push_rel_phase(circ: &mut Circuit, a: usize, b: usize, c: usize) {
    circ.push(Gate::new(HAD, vec![c]));
    circ.push(Gate::new(T, vec![c]));
    circ.push(Gate::new(CNOT, vec![b, c]));
    circ.push(Gate::new(Tdg, vec![c]));
    circ.push(Gate::new(CNOT, vec![a, c]));
    circ.push(Gate::new(T, vec![c]));
    circ.push(Gate::new(CNOT, vec![b, c]));
    circ.push(Gate::new(Tdg, vec![c]));
    circ.push(Gate::new(HAD, vec![c]));
}

// CCZ as a phase polynomial over the parities of (a, b, c):
// 4abc = a + b + c - a^b - a^c - b^c + a^b^c
fn push_tdepth1(circ: &mut Circuit, a: usize, b: usize, c: usize, scratch: &[usize]) {
    let (w, x, y, z) = (scratch[0], scratch[1], scratch[2], scratch[3]);

    circ.push(Gate::new(HAD, vec![c]));

    circ.push(Gate::new(CNOT, vec![a, w]));
    circ.push(Gate::new(CNOT, vec![b, w]));
    circ.push(Gate::new(CNOT, vec![b, x]));
    circ.push(Gate::new(CNOT, vec![c, x]));
    circ.push(Gate::new(CNOT, vec![a, y]));
    circ.push(Gate::new(CNOT, vec![c, y]));
    circ.push(Gate::new(CNOT, vec![a, z]));
    circ.push(Gate::new(CNOT, vec![b, z]));
    circ.push(Gate::new(CNOT, vec![c, z]));

    circ.push(Gate::new(T, vec![a]));
    circ.push(Gate::new(T, vec![b]));
    circ.push(Gate::new(T, vec![c]));
    circ.push(Gate::new(T, vec![z]));
    circ.push(Gate::new(Tdg, vec![w]));
    circ.push(Gate::new(Tdg, vec![x]));
    circ.push(Gate::new(Tdg, vec![y]));

    circ.push(Gate::new(CNOT, vec![c, z]));
    circ.push(Gate::new(CNOT, vec![b, z]));
    circ.push(Gate::new(CNOT, vec![a, z]));
    circ.push(Gate::new(CNOT, vec![c, y]));
    circ.push(Gate::new(CNOT, vec![a, y]));
    circ.push(Gate::new(CNOT, vec![c, x]));
    circ.push(Gate::new(CNOT, vec![b, x]));
    circ.push(Gate::new(CNOT, vec![b, w]));
    circ.push(Gate::new(CNOT, vec![a, w]));

    circ.push(Gate::new(HAD, vec![c]));
}

/// Decomposition configuration for each structural role of a bucket
/// brigade: the address fan-in cascade, the memory read layer, and the
/// fan-out uncomputation.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct BucketBrigadeDecomp {
    pub fan_in: ToffoliDecomp,
    pub mem: ToffoliDecomp,
    pub fan_out: ToffoliDecomp,
}

impl BucketBrigadeDecomp {
    /// Look up one of the supported decomposition scenarios.
    pub fn resolve(id: &str) -> Result<BucketBrigadeDecomp, UnknownScenario> {
        match id {
            "1" => Ok(BucketBrigadeDecomp {
                fan_in: RelPhaseCompute,
                mem: TDepth4,
                fan_out: RelPhaseUncompute,
            }),
            "2" => Ok(BucketBrigadeDecomp {
                fan_in: NoDecomp,
                mem: TDepth4,
                fan_out: NoDecomp,
            }),
            "3" => Ok(BucketBrigadeDecomp {
                fan_in: TDepth1FourAncilla,
                mem: TDepth1FourAncilla,
                fan_out: TDepth1FourAncilla,
            }),
            _ => Err(UnknownScenario(id.to_string())),
        }
    }

    /// Size of the shared scratch pool the configuration requires.
    pub fn ancilla_cost(&self) -> usize {
        self.fan_in
            .ancilla_cost()
            .max(self.mem.ancilla_cost())
            .max(self.fan_out.ancilla_cost())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScenario(pub String);

impl fmt::Display for UnknownScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown decomposition scenario '{}', expected one of 1, 2, 3",
            self.0
        )
    }
}

impl std::error::Error for UnknownScenario {}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitted(decomp: ToffoliDecomp) -> Circuit {
        let mut c = Circuit::new(7);
        decomp.emit(&mut c, 0, 1, 2, &[3, 4, 5, 6]);
        c
    }

    #[test]
    fn resolve_known_scenarios() {
        let s1 = BucketBrigadeDecomp::resolve("1").unwrap();
        assert_eq!(s1.fan_in, RelPhaseCompute);
        assert_eq!(s1.mem, TDepth4);
        assert_eq!(s1.fan_out, RelPhaseUncompute);
        assert_eq!(s1.ancilla_cost(), 0);

        let s2 = BucketBrigadeDecomp::resolve("2").unwrap();
        assert_eq!(s2.fan_in, NoDecomp);
        assert_eq!(s2.fan_out, NoDecomp);

        let s3 = BucketBrigadeDecomp::resolve("3").unwrap();
        assert_eq!(s3.mem, TDepth1FourAncilla);
        assert_eq!(s3.ancilla_cost(), 4);
    }

    #[test]
    fn resolve_unknown_scenario() {
        let err = BucketBrigadeDecomp::resolve("unsupported").unwrap_err();
        assert_eq!(err, UnknownScenario("unsupported".to_string()));
        assert!(err.to_string().contains("unsupported"));
    }

    #[test]
    fn t_counts_match_emission() {
        for decomp in [
            NoDecomp,
            TDepth4,
            RelPhaseCompute,
            RelPhaseUncompute,
            TDepth1FourAncilla,
        ] {
            let c = emitted(decomp);
            let t = c.num_gates_of_type(T) + c.num_gates_of_type(Tdg);
            assert_eq!(t, decomp.t_count_per_toffoli(), "{decomp:?}");
        }
    }

    #[test]
    fn t_depths() {
        assert_eq!(emitted(TDepth4).stats().t_depth, 4);
        assert_eq!(emitted(RelPhaseCompute).stats().t_depth, 4);
        assert_eq!(emitted(TDepth1FourAncilla).stats().t_depth, 1);
        assert_eq!(emitted(NoDecomp).stats().t_depth, 0);
    }

    #[test]
    fn uncompute_is_adjoint_of_compute() {
        let compute = emitted(RelPhaseCompute);
        let uncompute = emitted(RelPhaseUncompute);
        assert_eq!(uncompute, compute.to_adjoint());
    }

    #[test]
    #[should_panic(expected = "four scratch qubits")]
    fn tdepth1_needs_scratch() {
        let mut c = Circuit::new(3);
        TDepth1FourAncilla.emit(&mut c, 0, 1, 2, &[]);
    }
}
