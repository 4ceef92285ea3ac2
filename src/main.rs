mod cli_main;

use std::path::Path;
use std::time::Instant;

use clap::Parser;
use rayon::ThreadPoolBuilder;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cli_main::{AssemblyArgs, Cli, Commands, ScoringArgs};
use genequest::align::run_local_alignment;
use genequest::align::scoring::ScoringScheme;
use genequest::graph::assembler::Assembly;
use genequest::io::contig_store::{ContigStore, StoredAssembly, DEFAULT_STEM};
use genequest::io::fasta::{read_fasta, read_query, FastaWriter};
use genequest::io::matrix::export_matrix;
use genequest::pipeline::align::{align_query, best_hit};
use genequest::pipeline::assemble::AssemblyPipeline;
use genequest::pipeline::config::{FailurePolicy, PipelineConfig};
use genequest::stats::{calculate_stats, generate_metadata};
use genequest::Result;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Setting tracing default failed");

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if cli.threads.is_some() {
        config.threads = cli.threads;
    }

    let threads = config.threads();
    if let Err(e) = ThreadPoolBuilder::new().num_threads(threads).build_global() {
        warn!("Could not configure thread pool: {}", e);
    }

    match cli.command {
        Commands::Assemble { assembly } => {
            apply_assembly_args(&mut config, &assembly);
            let start = Instant::now();
            let assembled = assemble(&config, &assembly)?;
            print_json(&calculate_stats(&assembled))?;
            info!("Assembly completed in {:.2}s", start.elapsed().as_secs_f32());
        }

        Commands::Align { contig, contigs, query, matrix, scoring } => {
            apply_scoring_args(&mut config.scoring, &scoring);
            let query = read_query(&query)?;

            if let Some(contig) = contig {
                let alignment = run_local_alignment(&contig, &query.seq, &config.scoring);
                if let Some(path) = matrix {
                    export_matrix(&path, &alignment.matrix, &contig, &query.seq)?;
                    info!("Wrote score matrix to {}", path.display());
                }
                print_json(&alignment.result.summarize())?;
            } else if let Some(path) = contigs {
                let stored = load_store(&path)?;
                report_hits(&stored.assembly, &query.seq, &config.scoring)?;
            }
        }

        Commands::Run { assembly, query, scoring } => {
            apply_assembly_args(&mut config, &assembly);
            apply_scoring_args(&mut config.scoring, &scoring);
            let query = read_query(&query)?;

            let start = Instant::now();
            let assembled = assemble(&config, &assembly)?;
            report_hits(&assembled, &query.seq, &config.scoring)?;
            info!("Run completed in {:.2}s", start.elapsed().as_secs_f32());
        }

        Commands::Stats { contigs, per_contig } => {
            let stored = load_store(&contigs)?;
            if per_contig {
                print_json(&generate_metadata(&stored.assembly))?;
            } else {
                print_json(&calculate_stats(&stored.assembly))?;
            }
        }
    }

    Ok(())
}

fn apply_assembly_args(config: &mut PipelineConfig, args: &AssemblyArgs) {
    if let Some(k) = args.k {
        config.assembly.k = k;
    }
    if let Some(max_reads) = args.max_reads {
        config.assembly.max_reads_per_scaffold = max_reads;
    }
    if args.skip_failed {
        config.assembly.failure_policy = FailurePolicy::Skip;
    }
}

fn apply_scoring_args(scheme: &mut ScoringScheme, args: &ScoringArgs) {
    if let Some(score) = args.match_score {
        scheme.match_score = score;
    }
    if let Some(score) = args.mismatch_score {
        scheme.mismatch_score = score;
    }
    if let Some(gap) = args.gap_penalty {
        scheme.gap = gap;
    }
}

fn assemble(config: &PipelineConfig, args: &AssemblyArgs) -> Result<Assembly> {
    let reads = read_fasta(&args.reads)?;
    info!("Loaded {} reads from {}", reads.len(), args.reads.display());

    let report = AssemblyPipeline::new(config.assembly.clone()).run(&reads)?;
    for scaffold in &report.failed_scaffolds {
        warn!("Scaffold {} produced no contigs", scaffold);
    }

    ContigStore::new(&args.output_dir).save(&report.assembly, config.assembly.k, DEFAULT_STEM)?;
    if let Some(path) = &args.fasta {
        let mut writer = FastaWriter::new(path)?;
        writer.write_assembly(&report.assembly)?;
        writer.finish()?;
        info!("Wrote contigs to {}", path.display());
    }

    Ok(report.assembly)
}

fn load_store(path: &Path) -> Result<StoredAssembly> {
    if path.is_dir() {
        ContigStore::new(path).load_latest()
    } else {
        ContigStore::load(path)
    }
}

fn report_hits(assembly: &Assembly, query: &str, scheme: &ScoringScheme) -> Result<()> {
    let hits = align_query(assembly, query, scheme);
    if let Some(best) = best_hit(&hits) {
        info!(
            "Best hit: {} {} (score {}, cumulative {})",
            best.scaffold_id, best.label, best.summary.best_score, best.summary.score
        );
    }
    print_json(&hits)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
