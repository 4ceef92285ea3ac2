//! Read ingestion, contig persistence and matrix export

pub mod contig_store;
pub mod fasta;
pub mod matrix;
pub mod reads;
pub mod simulate;
