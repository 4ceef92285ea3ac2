use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "genequest", version, about = "De Bruijn read assembly and local query alignment", long_about = None)]
pub struct Cli {
    /// JSON configuration file; command-line flags override its values
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Assembly options shared by `assemble` and `run`
#[derive(Args, Debug, Clone)]
pub struct AssemblyArgs {
    /// FASTA(.gz) file containing reads
    #[arg(short, long)]
    pub reads: PathBuf,

    /// K-mer size
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Maximum reads used per scaffold group
    #[arg(long)]
    pub max_reads: Option<usize>,

    /// Record scaffolds without a start node as failed instead of aborting
    #[arg(long)]
    pub skip_failed: bool,

    /// Directory for the JSON contig store
    #[arg(short, long, default_value = "contig_data")]
    pub output_dir: PathBuf,

    /// Also write contigs to this FASTA(.gz) file
    #[arg(long)]
    pub fasta: Option<PathBuf>,
}

/// Scoring options shared by `align` and `run`
#[derive(Args, Debug, Clone)]
pub struct ScoringArgs {
    /// Score applied for matching nucleotides
    #[arg(short = 's', long, allow_hyphen_values = true)]
    pub match_score: Option<i32>,

    /// Score applied for mismatching nucleotides
    #[arg(short = 'm', long, allow_hyphen_values = true)]
    pub mismatch_score: Option<i32>,

    /// Score applied per gap position
    #[arg(short = 'p', long, allow_hyphen_values = true)]
    pub gap_penalty: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble reads into contigs per scaffold
    Assemble {
        #[command(flatten)]
        assembly: AssemblyArgs,
    },

    /// Align a query against a single contig or a saved assembly
    Align {
        /// Contig sequence given inline
        #[arg(long, conflicts_with = "contigs")]
        contig: Option<String>,

        /// Contig store file, or a store directory to use its latest file
        #[arg(long, required_unless_present = "contig")]
        contigs: Option<PathBuf>,

        /// FASTA(.gz) file with the gene query
        #[arg(short, long)]
        query: PathBuf,

        /// Write the score matrix as TSV (inline contig only)
        #[arg(long, requires = "contig")]
        matrix: Option<PathBuf>,

        #[command(flatten)]
        scoring: ScoringArgs,
    },

    /// Assemble reads, then align a query against every contig
    Run {
        #[command(flatten)]
        assembly: AssemblyArgs,

        /// FASTA(.gz) file with the gene query
        #[arg(short, long)]
        query: PathBuf,

        #[command(flatten)]
        scoring: ScoringArgs,
    },

    /// Print assembly statistics for a contig store
    Stats {
        /// Contig store file, or a store directory to use its latest file
        #[arg(long)]
        contigs: PathBuf,

        /// Print length and GC content of every contig instead of the summary
        #[arg(long)]
        per_contig: bool,
    },
}
