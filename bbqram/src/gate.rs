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

#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum GType {
    NOT,
    HAD,
    Z,
    S,
    Sdg,
    T,
    Tdg,
    CNOT,
    CZ,
    SWAP,
    TOFF,
    CCZ,
}

pub use GType::*;

impl GType {
    pub fn qasm_name(&self) -> &'static str {
        match self {
            NOT => "x",
            HAD => "h",
            Z => "z",
            S => "s",
            Sdg => "sdg",
            T => "t",
            Tdg => "tdg",
            CNOT => "cx",
            CZ => "cz",
            SWAP => "swap",
            TOFF => "ccx",
            CCZ => "ccz",
        }
    }

    /// number of qubits the gate acts on
    pub fn num_qubits(&self) -> usize {
        match self {
            CNOT | CZ | SWAP => 2,
            TOFF | CCZ => 3,
            _ => 1,
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Gate {
    pub t: GType,
    pub qs: Vec<usize>,
}

impl Gate {
    pub fn new(t: GType, qs: Vec<usize>) -> Gate {
        debug_assert_eq!(qs.len(), t.num_qubits());
        Gate { t, qs }
    }

    pub fn qasm_name(&self) -> &'static str {
        self.t.qasm_name()
    }

    pub fn to_qasm(&self) -> String {
        let mut s = String::from(self.qasm_name());

        s += " ";
        let qs: Vec<String> = self.qs.iter().map(|i| format!("q[{i}]")).collect();
        s += &qs.join(", ");

        s
    }

    pub fn adjoint(&mut self) {
        match self.t {
            S => self.t = Sdg,
            T => self.t = Tdg,
            Sdg => self.t = S,
            Tdg => self.t = T,
            _ => {} // everything else is self-adjoint
        }
    }
}
