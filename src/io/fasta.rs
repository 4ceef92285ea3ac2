// src/io/fasta.rs
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use crate::error::{GeneQuestError, Result};
use crate::graph::assembler::Assembly;
use crate::io::reads::{Read, ReadSet};

pub enum FastaWriter {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
}

/// Open a FASTA file for reading, handles gzipped files automatically
pub fn open_fasta<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.extension().map_or(false, |ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Parse every record of a FASTA stream into reads.
///
/// The stream must start with a `>` header line and contain at least one record.
pub fn parse_reads<R: BufRead>(mut reader: R) -> Result<ReadSet> {
    let first = loop {
        let buf = reader.fill_buf()?;
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(pos) => {
                let byte = buf[pos];
                reader.consume(pos);
                break Some(byte);
            }
            None if buf.is_empty() => break None,
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    };

    match first {
        None => return Err(GeneQuestError::malformed("FASTA input contains no records")),
        Some(b'>') => {}
        Some(_) => return Err(GeneQuestError::format("expected '>' at the start of the FASTA input")),
    }

    let mut reads = Vec::new();
    for record in fasta::Reader::new(reader).records() {
        let record = record.map_err(|e| GeneQuestError::format(e.to_string()))?;
        let seq = String::from_utf8_lossy(record.seq()).into_owned();
        reads.push(Read::from_header(record.id(), seq));
    }

    if reads.is_empty() {
        return Err(GeneQuestError::malformed("FASTA input contains no records"));
    }

    debug!("Parsed {} FASTA records", reads.len());
    Ok(ReadSet::new(reads))
}

/// Load all reads of a FASTA(.gz) file
pub fn read_fasta<P: AsRef<Path>>(path: P) -> Result<ReadSet> {
    parse_reads(open_fasta(path)?)
}

/// Load the first sequence of a FASTA(.gz) file, typically a gene query
pub fn read_query<P: AsRef<Path>>(path: P) -> Result<Read> {
    let reads = read_fasta(path)?;
    reads
        .iter()
        .next()
        .cloned()
        .ok_or_else(|| GeneQuestError::malformed("query FASTA contains no records"))
}

impl FastaWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        if path.extension().map_or(false, |ext| ext == "gz") {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(FastaWriter::Compressed(BufWriter::new(encoder)))
        } else {
            Ok(FastaWriter::Plain(BufWriter::new(file)))
        }
    }

    pub fn write_record(&mut self, header: &str, sequence: &str) -> Result<()> {
        match self {
            FastaWriter::Plain(writer) => {
                writeln!(writer, ">{}", header)?;
                writeln!(writer, "{}", sequence)?;
            }
            FastaWriter::Compressed(writer) => {
                writeln!(writer, ">{}", header)?;
                writeln!(writer, "{}", sequence)?;
            }
        };
        Ok(())
    }

    /// Write every contig as `>scaffold|contigN`
    pub fn write_assembly(&mut self, assembly: &Assembly) -> Result<()> {
        for contig in assembly.contigs() {
            let header = format!("{}|{}", contig.scaffold_id, contig.label());
            self.write_record(&header, &contig.sequence)?;
        }
        Ok(())
    }

    pub fn finish(self) -> Result<()> {
        match self {
            FastaWriter::Plain(mut writer) => writer.flush()?,
            FastaWriter::Compressed(writer) => {
                let encoder = writer.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?;
            }
        }
        Ok(())
    }
}
