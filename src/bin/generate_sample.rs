use genequest::io::fasta::FastaWriter;
use genequest::io::simulate::simulate_reads;
use rand::thread_rng;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let output_path = if args.len() > 1 {
        &args[1]
    } else {
        "sample_reads.fasta"
    };

    let num_scaffolds = 3;
    let genome_len = 500;
    let read_len = 50;
    let step = 10;

    println!(
        "Generating {} scaffolds of {}bp tiled into {}bp reads to {}",
        num_scaffolds, genome_len, read_len, output_path
    );

    let mut rng = thread_rng();
    let (genomes, reads) = simulate_reads(&mut rng, num_scaffolds, genome_len, read_len, step);

    let result = FastaWriter::new(output_path).and_then(|mut writer| {
        for read in reads.iter() {
            writer.write_record(&read.header_id, &read.seq)?;
        }
        writer.finish()
    });
    if let Err(e) = result {
        eprintln!("Error writing reads: {}", e);
        std::process::exit(1);
    }

    let query_path = format!("{}.query.fasta", output_path.trim_end_matches(".fasta"));
    let result = FastaWriter::new(&query_path).and_then(|mut writer| {
        let (scaffold_id, genome) = &genomes[0];
        writer.write_record(&format!("{}:query", scaffold_id), &genome[100..160])?;
        writer.finish()
    });
    if let Err(e) = result {
        eprintln!("Error writing query: {}", e);
        std::process::exit(1);
    }

    println!("Wrote {} reads and query {}", reads.len(), query_path);
}
