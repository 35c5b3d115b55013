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
use crate::decompose::BucketBrigadeDecomp;
use crate::gate::*;
use std::fmt;
use std::ops::Range;

/// Addressable register map of one bucket-brigade instance.
///
/// Qubits are laid out contiguously: address lines first, then the
/// routing register (one node per memory cell, one-hot after fan-in),
/// then the memory cells, the readout target, and finally the shared
/// scratch pool of the decomposition, if it needs one.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Layout {
    pub address: Range<usize>,
    pub routing: Range<usize>,
    pub memory: Range<usize>,
    pub target: usize,
    pub scratch: Range<usize>,
}

impl Layout {
    pub fn new(n: usize, ancillas: usize) -> Layout {
        let cells = 1 << n;
        Layout {
            address: 0..n,
            routing: n..n + cells,
            memory: n + cells..n + 2 * cells,
            target: n + 2 * cells,
            scratch: n + 2 * cells + 1..n + 2 * cells + 1 + ancillas,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.scratch.end
    }

    pub fn num_address(&self) -> usize {
        self.address.len()
    }

    pub fn num_cells(&self) -> usize {
        self.memory.len()
    }

    /// The measured register of the experiment.
    pub fn address_qubits(&self) -> Vec<usize> {
        self.address.clone().collect()
    }
}

/// A bucket-brigade addressing circuit together with its register map.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct BucketBrigade {
    pub circuit: Circuit,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrigadeError {
    NoAddressQubits,
    StateLength { expected: usize, got: usize },
    StateBit(char),
}

impl fmt::Display for BrigadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrigadeError::NoAddressQubits => {
                write!(f, "bucket brigade needs at least one address qubit")
            }
            BrigadeError::StateLength { expected, got } => write!(
                f,
                "initial state must have one bit per address qubit (expected {expected}, got {got})"
            ),
            BrigadeError::StateBit(c) => {
                write!(f, "initial state must consist of 0s and 1s, got '{c}'")
            }
        }
    }
}

impl std::error::Error for BrigadeError {}

impl BucketBrigade {
    /// Build the brigade over `n` address qubits, decomposed per
    /// `decomp`, with the addressing register prepared in the
    /// computational-basis state `initial_state`.
    ///
    /// Identical arguments produce gate-for-gate identical circuits.
    pub fn build(
        n: usize,
        decomp: &BucketBrigadeDecomp,
        initial_state: &str,
    ) -> Result<BucketBrigade, BrigadeError> {
        if n == 0 {
            return Err(BrigadeError::NoAddressQubits);
        }
        if initial_state.chars().count() != n {
            return Err(BrigadeError::StateLength {
                expected: n,
                got: initial_state.chars().count(),
            });
        }

        let layout = Layout::new(n, decomp.ancilla_cost());
        let scratch: Vec<usize> = layout.scratch.clone().collect();

        let mut circuit = Circuit::new(layout.num_qubits());
        for (i, b) in initial_state.chars().enumerate() {
            match b {
                '0' => {}
                '1' => circuit.push(Gate::new(NOT, vec![layout.address.start + i])),
                c => return Err(BrigadeError::StateBit(c)),
            }
        }

        // fan-in: activate the routing root, then split the activation
        // on each address bit until the register is one-hot at the
        // address value (bit i of the address carries weight 2^i)
        let mut fan_in = Circuit::new(layout.num_qubits());
        fan_in.push(Gate::new(NOT, vec![layout.routing.start]));
        for i in 0..n {
            for j in 0..1 << i {
                let lo = layout.routing.start + j;
                let hi = lo + (1 << i);
                decomp
                    .fan_in
                    .emit(&mut fan_in, layout.address.start + i, lo, hi, &scratch);
                fan_in.push(Gate::new(CNOT, vec![hi, lo]));
            }
        }

        // read every cell through its routing node
        let mut mem = Circuit::new(layout.num_qubits());
        for j in 0..layout.num_cells() {
            decomp.mem.emit(
                &mut mem,
                layout.routing.start + j,
                layout.memory.start + j,
                layout.target,
                &scratch,
            );
        }

        // fan-out: uncompute the routing register in exact reverse
        let mut fan_out = Circuit::new(layout.num_qubits());
        for i in (0..n).rev() {
            for j in (0..1 << i).rev() {
                let lo = layout.routing.start + j;
                let hi = lo + (1 << i);
                fan_out.push(Gate::new(CNOT, vec![hi, lo]));
                decomp
                    .fan_out
                    .emit(&mut fan_out, layout.address.start + i, lo, hi, &scratch);
            }
        }
        fan_out.push(Gate::new(NOT, vec![layout.routing.start]));

        circuit += &fan_in;
        circuit += &mem;
        circuit += &fan_out;

        Ok(BucketBrigade { circuit, layout })
    }

    /// Toffolis per structural role: (fan-in, memory read, fan-out).
    pub fn toffoli_counts(&self) -> (usize, usize, usize) {
        let cells = self.layout.num_cells();
        (cells - 1, cells, cells - 1)
    }

    pub fn t_count(&self) -> usize {
        self.circuit.num_gates_of_type(T) + self.circuit.num_gates_of_type(Tdg)
    }
}
