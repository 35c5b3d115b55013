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

use bbqram::experiment::Sweep;
use std::env;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<_> = env::args().collect();
    let (qs, fraction, reps) = if args.len() >= 4 {
        (
            args[1].parse().unwrap(),
            args[2].parse().unwrap(),
            args[3].parse().unwrap(),
        )
    } else {
        (2, 0.5, 1000)
    };
    println!("qubits: {}, fraction: {}, repetitions: {}", qs, fraction, reps);

    let sweep = Sweep {
        scenario: "1".to_string(),
        qubits: qs..=qs,
        fraction,
        in_place: true,
        repetitions: reps,
        out_dir: "results".into(),
        seed: Some(1337),
        parallel: false,
    };

    let time = Instant::now();
    for path in sweep.run()? {
        println!("{}", path.display());
    }
    println!("swept {} basis states in {:.2?}", 1usize << qs, time.elapsed());
    Ok(())
}
