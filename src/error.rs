//! Error types shared by the assembler, the aligner and the I/O layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneQuestError>;

#[derive(Error, Debug)]
pub enum GeneQuestError {
    /// The fragment length must be strictly below the shortest read length.
    #[error("k-mer size {k} must be smaller than the shortest read length ({min_len})")]
    KmerSize { k: usize, min_len: usize },

    /// The de Bruijn graph of a scaffold has no node with indegree 0.
    #[error("no zero-indegree nodes found in the graph of scaffold '{scaffold}'")]
    NoNodesFound { scaffold: String },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid FASTA format: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneQuestError {
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedInput(message.into())
    }

    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format(message.into())
    }
}
