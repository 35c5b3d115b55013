//! Tabular result artifacts: one file per (qubit count, removal
//! fraction), one row per input basis state.

use crate::sim::FrequencyDistribution;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

/// One basis state's comparison: the input label and the observed
/// frequency tables of the original and mutated circuits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub input: String,
    pub original: FrequencyDistribution,
    pub modified: FrequencyDistribution,
}

#[derive(Debug)]
pub struct WriteError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not write results to {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Persists one result table per (qubit count, fraction) key under a
/// deterministic name, so re-running with identical parameters
/// overwrites instead of duplicating.
#[derive(Debug, Clone)]
pub struct ResultSink {
    dir: PathBuf,
}

impl ResultSink {
    pub fn new(dir: impl Into<PathBuf>) -> ResultSink {
        ResultSink { dir: dir.into() }
    }

    /// Artifact path for a (qubit count, fraction) pair.
    pub fn path_for(&self, n: usize, fraction: f64) -> PathBuf {
        self.dir
            .join(format!("remove_t_{}q_p{}.csv", n, format_percent(fraction)))
    }

    pub fn persist(
        &self,
        n: usize,
        fraction: f64,
        records: &[ResultRecord],
    ) -> Result<PathBuf, WriteError> {
        let path = self.path_for(n, fraction);

        let mut table = String::from("input,original,modified\n");
        for r in records {
            let original = serde_json::to_string(&r.original).expect("frequency maps serialize");
            let modified = serde_json::to_string(&r.modified).expect("frequency maps serialize");
            table += &format!(
                "\"{}\",\"{}\",\"{}\"\n",
                r.input,
                csv_quote(&original),
                csv_quote(&modified)
            );
        }

        fs::create_dir_all(&self.dir).map_err(|source| WriteError {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, table).map_err(|source| WriteError {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn csv_quote(cell: &str) -> String {
    cell.replace('"', "\"\"")
}

fn format_percent(fraction: f64) -> String {
    let mut s = format!("{:.4}", fraction * 100.0);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}
