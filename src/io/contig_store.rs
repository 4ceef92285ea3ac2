// src/io/contig_store.rs
//! JSON persistence of assembled contigs.
//!
//! Each save produces a new `<stem>_<MMDDYY-HHMMSS>.json` file inside the
//! store directory. Existing files are never overwritten.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::graph::assembler::Assembly;

pub const DEFAULT_STEM: &str = "contigs_data";

/// On-disk document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAssembly {
    pub created_at: String,
    pub k: usize,
    pub assembly: Assembly,
}

/// Timestamp id in `%m%d%y-%H%M%S` form
pub fn generate_unique_id() -> String {
    Local::now().format("%m%d%y-%H%M%S").to_string()
}

pub struct ContigStore {
    dir: PathBuf,
}

impl ContigStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serialize `assembly` into a new timestamped file and return its path
    pub fn save(&self, assembly: &Assembly, k: usize, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}_{}.json", stem, generate_unique_id()));

        let file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        let doc = StoredAssembly {
            created_at: Local::now().to_rfc3339(),
            k,
            assembly: assembly.clone(),
        };
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &doc)?;
        writer.flush()?;

        info!("Saved {} contigs to {}", assembly.contig_count(), path.display());
        Ok(path)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<StoredAssembly> {
        let file = File::open(path.as_ref())?;
        let doc = serde_json::from_reader(BufReader::new(file))?;
        Ok(doc)
    }

    /// Most recently modified store file in the directory
    pub fn latest(&self) -> Result<PathBuf> {
        let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let modified = fs::metadata(&path)?.modified()?;
            if newest.as_ref().map_or(true, |(t, _)| modified >= *t) {
                newest = Some((modified, path));
            }
        }

        newest.map(|(_, path)| path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no contig files found in {}", self.dir.display()),
            )
            .into()
        })
    }

    pub fn load_latest(&self) -> Result<StoredAssembly> {
        let path = self.latest()?;
        info!("Loading contig data: {}", path.display());
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::assembler::{Contig, ScaffoldContigs};
    use tempfile::tempdir;

    fn sample_assembly() -> Assembly {
        Assembly {
            scaffolds: vec![ScaffoldContigs {
                scaffold_id: "2S43D".into(),
                contigs: vec![Contig {
                    id: 1,
                    scaffold_id: "2S43D".into(),
                    sequence: "ATGCAT".into(),
                    start_kmer: "ATG".into(),
                }],
            }],
        }
    }

    #[test]
    fn test_save_and_load_latest() {
        let dir = tempdir().unwrap();
        let store = ContigStore::new(dir.path().join("contig_data"));

        let path = store.save(&sample_assembly(), 3, DEFAULT_STEM).unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("contigs_data_"));

        let loaded = store.load_latest().unwrap();
        assert_eq!(loaded.k, 3);
        assert_eq!(loaded.assembly, sample_assembly());
        assert_eq!(loaded.assembly.get("2S43D", "contig1"), Some("ATGCAT"));
    }

    #[test]
    fn test_latest_on_empty_dir_fails() {
        let dir = tempdir().unwrap();
        let store = ContigStore::new(dir.path());
        assert!(store.load_latest().is_err());
    }

    #[test]
    fn test_unique_id_format() {
        let id = generate_unique_id();
        assert_eq!(id.len(), 13);
        assert_eq!(&id[6..7], "-");
    }
}
