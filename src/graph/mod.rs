//! K-mer graph construction and contig walks

pub mod assembler;
pub mod debruijn;
