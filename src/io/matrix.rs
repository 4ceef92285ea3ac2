// src/io/matrix.rs
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::align::scoring::ScoreMatrix;
use crate::error::Result;

/// Write a score matrix as TSV.
///
/// The header row holds `*` followed by the query bases, every data row starts
/// with its contig base (`*` for row 0).
pub fn write_matrix_tsv<W: Write>(
    writer: &mut W,
    matrix: &ScoreMatrix,
    contig: &str,
    query: &str,
) -> Result<()> {
    write!(writer, "*")?;
    for base in query.chars() {
        write!(writer, "\t{}", base)?;
    }
    writeln!(writer)?;

    let labels = std::iter::once('*').chain(contig.chars());
    for (label, row) in labels.zip(matrix.cells().outer_iter()) {
        write!(writer, "{}", label)?;
        for value in row.iter() {
            write!(writer, "\t{}", value)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn export_matrix<P: AsRef<Path>>(
    path: P,
    matrix: &ScoreMatrix,
    contig: &str,
    query: &str,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_matrix_tsv(&mut writer, matrix, contig, query)?;
    writer.flush()?;
    Ok(())
}
