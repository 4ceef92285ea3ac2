// src/io/reads.rs
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A single sequencing read tagged with the scaffold it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Read {
    pub header_id: String,
    pub scaffold_id: String,
    pub seq: String,
}

impl Read {
    pub fn new(header_id: impl Into<String>, scaffold_id: impl Into<String>, seq: impl Into<String>) -> Self {
        Self {
            header_id: header_id.into(),
            scaffold_id: scaffold_id.into(),
            seq: seq.into(),
        }
    }

    /// Build a read from a FASTA header, taking the scaffold id from the text before the first ':'
    pub fn from_header(header_id: &str, seq: impl Into<String>) -> Self {
        let header_id = header_id.trim().trim_start_matches('>');
        let scaffold_id = header_id.split(':').next().unwrap_or(header_id);
        Self::new(header_id, scaffold_id, seq)
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// Reads sharing one scaffold id, in input order
#[derive(Debug, Clone)]
pub struct ScaffoldGroup<'a> {
    pub scaffold_id: &'a str,
    pub reads: Vec<&'a Read>,
}

/// Ordered, immutable collection of reads
#[derive(Debug, Clone, Default)]
pub struct ReadSet {
    reads: Vec<Read>,
}

impl ReadSet {
    pub fn new(reads: Vec<Read>) -> Self {
        Self { reads }
    }

    pub fn reads(&self) -> &[Read] {
        &self.reads
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Read> {
        self.reads.iter()
    }

    /// Length of the shortest read, `None` for an empty set
    pub fn min_len(&self) -> Option<usize> {
        self.reads.iter().map(Read::len).min()
    }

    /// Distinct scaffold ids in first-appearance order
    pub fn scaffold_ids(&self) -> Vec<&str> {
        self.group_by_scaffold()
            .into_iter()
            .map(|g| g.scaffold_id)
            .collect()
    }

    /// Partition reads by scaffold id. Groups are ordered by first appearance
    /// and reads keep their input order inside each group.
    pub fn group_by_scaffold(&self) -> Vec<ScaffoldGroup<'_>> {
        let mut index: AHashMap<&str, usize> = AHashMap::new();
        let mut groups: Vec<ScaffoldGroup<'_>> = Vec::new();

        for read in &self.reads {
            let slot = *index.entry(read.scaffold_id.as_str()).or_insert_with(|| {
                groups.push(ScaffoldGroup {
                    scaffold_id: read.scaffold_id.as_str(),
                    reads: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].reads.push(read);
        }

        groups
    }

    /// Look up a read by its full header id
    pub fn search(&self, header_id: &str) -> Option<&Read> {
        self.reads.iter().find(|r| r.header_id == header_id)
    }

    pub fn cursor(&self) -> ReadCursor<'_> {
        ReadCursor::new(self)
    }
}

impl From<Vec<Read>> for ReadSet {
    fn from(reads: Vec<Read>) -> Self {
        Self::new(reads)
    }
}

impl<'a> IntoIterator for &'a ReadSet {
    type Item = &'a Read;
    type IntoIter = std::slice::Iter<'a, Read>;

    fn into_iter(self) -> Self::IntoIter {
        self.reads.iter()
    }
}

/// Externally owned position over a [`ReadSet`].
///
/// Yields `None` once every read has been returned and rewinds to the first
/// read, so the same cursor can drive another pass.
#[derive(Debug)]
pub struct ReadCursor<'a> {
    set: &'a ReadSet,
    position: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(set: &'a ReadSet) -> Self {
        Self { set, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}

impl<'a> Iterator for ReadCursor<'a> {
    type Item = &'a Read;

    fn next(&mut self) -> Option<Self::Item> {
        match self.set.reads.get(self.position) {
            Some(read) => {
                self.position += 1;
                Some(read)
            }
            None => {
                self.reset();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ReadSet {
        ReadSet::new(vec![
            Read::from_header("2S43D:04730:00438", "AAGATTTTTG"),
            Read::from_header("IDIDID:06986:00601", "GCGGGGGAGA"),
            Read::from_header("2S43D:03629:08794", "TTCAGG"),
        ])
    }

    #[test]
    fn test_scaffold_id_from_header() {
        let read = Read::from_header(">2S43D:04730:00438", "ACGT");
        assert_eq!(read.header_id, "2S43D:04730:00438");
        assert_eq!(read.scaffold_id, "2S43D");
        assert_eq!(read.len(), 4);

        let plain = Read::from_header("chr1", "ACGT");
        assert_eq!(plain.scaffold_id, "chr1");
    }

    #[test]
    fn test_group_by_scaffold_preserves_order() {
        let set = sample_set();
        let groups = set.group_by_scaffold();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].scaffold_id, "2S43D");
        assert_eq!(groups[1].scaffold_id, "IDIDID");

        let seqs: Vec<&str> = groups[0].reads.iter().map(|r| r.seq.as_str()).collect();
        assert_eq!(seqs, vec!["AAGATTTTTG", "TTCAGG"]);
        assert_eq!(set.scaffold_ids(), vec!["2S43D", "IDIDID"]);
    }

    #[test]
    fn test_min_len_and_search() {
        let set = sample_set();
        assert_eq!(set.min_len(), Some(6));
        assert_eq!(ReadSet::default().min_len(), None);

        let hit = set.search("IDIDID:06986:00601").unwrap();
        assert_eq!(hit.seq, "GCGGGGGAGA");
        assert!(set.search("missing").is_none());
    }

    #[test]
    fn test_cursor_resets_on_exhaustion() {
        let set = sample_set();
        let mut cursor = set.cursor();

        assert_eq!(cursor.by_ref().count(), 3);
        assert_eq!(cursor.position(), 0);

        // a second pass starts over from the first read
        let first = cursor.next().unwrap();
        assert_eq!(first.header_id, "2S43D:04730:00438");
        assert_eq!(cursor.position(), 1);
    }
}
