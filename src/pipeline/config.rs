// src/pipeline/config.rs
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::align::scoring::ScoringScheme;
use crate::error::Result;

/// Upper bound on reads fed into one scaffold's graph; later reads are ignored
pub const DEFAULT_MAX_READS_PER_SCAFFOLD: usize = 1000;

pub const DEFAULT_K: usize = 3;

/// What to do when a scaffold's graph has no start node
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the whole run on the first failing scaffold
    #[default]
    Abort,
    /// Record the scaffold as failed and keep going
    Skip,
}

/// Configuration for de Bruijn assembly
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// K-mer size
    pub k: usize,
    /// Maximum number of reads used per scaffold group
    pub max_reads_per_scaffold: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            max_reads_per_scaffold: DEFAULT_MAX_READS_PER_SCAFFOLD,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl AssemblyConfig {
    pub fn with_k(k: usize) -> Self {
        Self { k, ..Self::default() }
    }
}

/// Top-level settings, loadable from JSON
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub assembly: AssemblyConfig,
    pub scoring: ScoringScheme,
    /// Worker threads, all cores when unset
    pub threads: Option<usize>,
}

impl PipelineConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "assembly": { "k": 5, "failure_policy": "skip" }, "scoring": { "gap": -2 } }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.assembly.k, 5);
        assert_eq!(config.assembly.max_reads_per_scaffold, DEFAULT_MAX_READS_PER_SCAFFOLD);
        assert_eq!(config.assembly.failure_policy, FailurePolicy::Skip);
        assert_eq!(config.scoring, ScoringScheme::new(10, -4, -2));
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_threads_never_zero() {
        let config = PipelineConfig { threads: Some(0), ..PipelineConfig::default() };
        assert_eq!(config.threads(), 1);
    }
}
