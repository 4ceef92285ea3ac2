use std::fs;

use genequest::io::contig_store::{ContigStore, DEFAULT_STEM};
use genequest::io::fasta::{read_fasta, read_query, FastaWriter};
use genequest::io::simulate::simulate_reads;
use genequest::pipeline::align::{align_query, best_hit};
use genequest::pipeline::assemble::AssemblyPipeline;
use genequest::pipeline::config::{AssemblyConfig, FailurePolicy, PipelineConfig};
use genequest::stats::{calculate_stats, generate_metadata};
use genequest::GeneQuestError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

#[test]
fn test_fasta_to_alignment_end_to_end() {
    let dir = tempdir().unwrap();
    let reads_path = dir.path().join("reads.fasta.gz");
    let query_path = dir.path().join("query.fasta");

    let mut rng = StdRng::seed_from_u64(21);
    let (genomes, reads) = simulate_reads(&mut rng, 3, 300, 30, 5);

    let mut writer = FastaWriter::new(&reads_path).unwrap();
    for read in reads.iter() {
        writer.write_record(&read.header_id, &read.seq).unwrap();
    }
    writer.finish().unwrap();

    let (target_scaffold, target_genome) = &genomes[1];
    let mut writer = FastaWriter::new(&query_path).unwrap();
    writer.write_record("gene:1", &target_genome[120..150]).unwrap();
    writer.finish().unwrap();

    let loaded = read_fasta(&reads_path).unwrap();
    assert_eq!(loaded.len(), reads.len());
    assert_eq!(loaded.scaffold_ids(), vec!["SCAF1", "SCAF2", "SCAF3"]);

    let report = AssemblyPipeline::new(AssemblyConfig::with_k(17)).run(&loaded).unwrap();
    assert!(report.failed_scaffolds.is_empty());
    assert_eq!(report.assembly.contig_count(), 3);

    let query = read_query(&query_path).unwrap();
    let hits = align_query(&report.assembly, &query.seq, &PipelineConfig::default().scoring);
    let best = best_hit(&hits).unwrap();
    assert_eq!(&best.scaffold_id, target_scaffold);
    assert_eq!(best.summary.best_score, 300.0);
    assert_eq!(best.summary.best_cell, (150, 30));

    let stats = calculate_stats(&report.assembly);
    assert_eq!(stats.total_length, 900);
}

#[test]
fn test_store_round_trip_and_fasta_export() {
    let dir = tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let (_, reads) = simulate_reads(&mut rng, 2, 80, 20, 4);
    let report = AssemblyPipeline::new(AssemblyConfig::with_k(11)).run(&reads).unwrap();

    let store = ContigStore::new(dir.path().join("contig_data"));
    let saved = store.save(&report.assembly, 11, DEFAULT_STEM).unwrap();
    let loaded = store.load_latest().unwrap();
    assert_eq!(store.latest().unwrap(), saved);
    assert_eq!(loaded.assembly, report.assembly);

    let metadata = generate_metadata(&loaded.assembly);
    assert_eq!(metadata.len(), loaded.assembly.contig_count());
    assert_eq!(metadata[0].scaffold_id, "SCAF1");
    assert_eq!(metadata[0].label, "contig1");
    let total: usize = metadata.iter().map(|m| m.length).sum();
    assert_eq!(total, calculate_stats(&loaded.assembly).total_length);
    assert!(metadata.iter().all(|m| (0.0..=1.0).contains(&m.gc_content)));

    let fasta_path = dir.path().join("contigs.fasta");
    let mut writer = FastaWriter::new(&fasta_path).unwrap();
    writer.write_assembly(&report.assembly).unwrap();
    writer.finish().unwrap();

    let text = fs::read_to_string(&fasta_path).unwrap();
    assert!(text.starts_with(">SCAF1|contig1\n"));
    assert_eq!(text.lines().filter(|l| l.starts_with('>')).count(), report.assembly.contig_count());
}

#[test]
fn test_skip_policy_keeps_other_scaffolds() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reads.fasta");
    fs::write(&path, ">loop:1\nAAAAAA\n>lin:1\nACGTTGCA\n>lin:2\nTTGCAGG\n").unwrap();
    let reads = read_fasta(&path).unwrap();

    let abort = AssemblyPipeline::new(AssemblyConfig::with_k(2)).run(&reads);
    assert!(matches!(abort, Err(GeneQuestError::NoNodesFound { .. })));

    let config = AssemblyConfig {
        failure_policy: FailurePolicy::Skip,
        ..AssemblyConfig::with_k(2)
    };
    let report = AssemblyPipeline::new(config).run(&reads).unwrap();
    assert_eq!(report.failed_scaffolds, vec!["loop".to_string()]);
    assert!(report.assembly.scaffold("lin").is_some());
}

#[test]
fn test_config_file_loading() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"assembly": {"k": 7, "max_reads_per_scaffold": 50}, "threads": 2}"#).unwrap();

    let config = PipelineConfig::from_json_file(&path).unwrap();
    assert_eq!(config.assembly.k, 7);
    assert_eq!(config.assembly.max_reads_per_scaffold, 50);
    assert_eq!(config.threads(), 2);
    assert_eq!(config.scoring.match_score, 10);
}
