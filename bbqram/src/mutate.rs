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
use crate::gate::GType;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;

/// The gate positions one random draw selected for removal.
///
/// A plan is a value: applying it in place and applying it to a copy
/// produce identical gate sequences, only the aliasing of the result
/// differs.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct GateRemovalPlan {
    pub kind: GType,
    /// Circuit gate indices, ascending and pairwise distinct.
    pub positions: Vec<usize>,
}

impl GateRemovalPlan {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Remove the planned gates from `circuit` directly.
    pub fn apply(&self, circuit: &mut Circuit) {
        for &pos in self.positions.iter().rev() {
            circuit.remove_gate(pos);
        }
    }

    /// Remove the planned gates from a copy, leaving `circuit` untouched.
    pub fn applied(&self, circuit: &Circuit) -> Circuit {
        let mut copy = circuit.clone();
        self.apply(&mut copy);
        copy
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidFraction(pub f64);

impl fmt::Display for InvalidFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "removal fraction must lie in [0, 1], got {}", self.0)
    }
}

impl std::error::Error for InvalidFraction {}

/// Removes a bounded-random subset of the gates of one type.
pub struct GateRemover {
    rng: StdRng,
    kind: GType,
    fraction: f64,
}

impl GateRemover {
    pub fn new(kind: GType) -> GateRemover {
        GateRemover {
            rng: StdRng::from_entropy(),
            kind,
            fraction: 0.0,
        }
    }

    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn fraction(&mut self, fraction: f64) -> &mut Self {
        self.fraction = fraction;
        self
    }

    /// Draw the removal plan for `circuit`: round(fraction * N) of the
    /// N eligible gates, uniformly, without replacement.
    pub fn plan(&mut self, circuit: &Circuit) -> Result<GateRemovalPlan, InvalidFraction> {
        if !(0.0..=1.0).contains(&self.fraction) {
            return Err(InvalidFraction(self.fraction));
        }

        let eligible = circuit.positions_of_type(self.kind);
        let count = (self.fraction * eligible.len() as f64).round() as usize;
        let mut positions: Vec<usize> = rand::seq::index::sample(&mut self.rng, eligible.len(), count)
            .into_iter()
            .map(|i| eligible[i])
            .collect();
        positions.sort_unstable();

        Ok(GateRemovalPlan {
            kind: self.kind,
            positions,
        })
    }

    /// Draw a plan and apply it to `circuit` in place.
    pub fn remove_gates(&mut self, circuit: &mut Circuit) -> Result<GateRemovalPlan, InvalidFraction> {
        let plan = self.plan(circuit)?;
        plan.apply(circuit);
        Ok(plan)
    }
}
