//! Species record lookup.
//!
//! Sequence and info files share one layout: a header line holding `>`
//! followed by the species identifier, then the record body, ending at a
//! blank line or end of file.
//!
//! ```text
//! >Aequorea victoria
//! ATGACAAGCAAACAATACTCAGTCAAGCTTACATCAGACTTCGACAACCCAAGATGGATT
//! GGACGACACAAGCATATGTTCAATTTCCTTGATGTCAACCACAATGGAAAAATCTCTCTT
//!
//! >Photinus pyralis
//! ...
//! ```
//!
//! Identifiers may contain spaces; the whole header after `>` is the
//! identifier. A record that runs into end of file without a blank line
//! simply ends there.

use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

/// Number of body lines in an info record.
const INFO_FIELDS: usize = 5;

/// Errors that can occur during record lookup.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to read records: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No record found for '{0}'")]
    NotFound(String),
}

/// Result type for record operations.
pub type RecordResult<T> = Result<T, RecordError>;

/// Source of raw sequence text for species identifiers.
pub trait SequenceLookup {
    /// Returns the concatenated fragment lines of the record for `id`.
    fn fetch(&self, id: &str) -> RecordResult<String>;

    /// Fetches two records. The default does two lookups.
    fn fetch_pair(&self, first: &str, second: &str) -> RecordResult<(String, String)> {
        Ok((self.fetch(first)?, self.fetch(second)?))
    }
}

/// In-memory record text, loaded once and scanned per lookup.
#[derive(Debug, Clone)]
pub struct RecordSource {
    content: String,
}

impl RecordSource {
    /// Wraps already-loaded record text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Reads a record file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use biolum::records::{RecordSource, SequenceLookup};
    ///
    /// let source = RecordSource::from_path("Info/Sequences.txt").unwrap();
    /// let raw = source.fetch("Aequorea victoria").unwrap();
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> RecordResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::new(content))
    }

    /// Returns the body lines of the record for `id`, or `None`.
    fn body(&self, id: &str) -> Option<Vec<&str>> {
        let mut lines = self.content.lines();

        while let Some(line) = lines.next() {
            if header_id(line) != Some(id) {
                continue;
            }

            let mut body = Vec::new();
            let mut terminated = false;
            for inner in lines.by_ref() {
                if inner.trim().is_empty() {
                    terminated = true;
                    break;
                }
                body.push(inner);
            }
            if !terminated {
                debug!("record '{}' runs to end of file", id);
            }
            return Some(body);
        }

        None
    }

    /// Looks up the descriptive record for a species.
    ///
    /// Missing trailing lines are left empty.
    pub fn info(&self, id: &str) -> RecordResult<SpeciesInfo> {
        let body = self
            .body(id)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))?;
        let mut fields = body.into_iter().map(|l| l.trim().to_string());
        let mut next = || fields.next().unwrap_or_default();

        Ok(SpeciesInfo {
            name: id.to_string(),
            location: next(),
            discovery: next(),
            size: next(),
            color: next(),
            common_name: next(),
        })
    }
}

impl SequenceLookup for RecordSource {
    fn fetch(&self, id: &str) -> RecordResult<String> {
        let body = self
            .body(id)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))?;
        Ok(body.concat())
    }

    /// Reads both records in a single pass over the text.
    fn fetch_pair(&self, first: &str, second: &str) -> RecordResult<(String, String)> {
        let mut found: [Option<String>; 2] = [None, None];
        let ids = [first, second];
        let mut current: Vec<usize> = Vec::new();

        for line in self.content.lines() {
            if current.is_empty() {
                if let Some(id) = header_id(line) {
                    current = (0..2).filter(|&k| found[k].is_none() && ids[k] == id).collect();
                    for &k in &current {
                        found[k] = Some(String::new());
                    }
                }
                continue;
            }

            if line.trim().is_empty() {
                current.clear();
                if found.iter().all(Option::is_some) {
                    break;
                }
                continue;
            }

            for &k in &current {
                if let Some(seq) = found[k].as_mut() {
                    seq.push_str(line);
                }
            }
        }

        let [a, b] = found;
        let a = a.ok_or_else(|| RecordError::NotFound(first.to_string()))?;
        let b = b.ok_or_else(|| RecordError::NotFound(second.to_string()))?;
        Ok((a, b))
    }
}

/// Returns the identifier of a header line.
fn header_id(line: &str) -> Option<&str> {
    line.trim_end().strip_prefix('>').map(str::trim)
}

/// Descriptive fields of a species from the info file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesInfo {
    pub name: String,
    pub location: String,
    pub discovery: String,
    pub size: String,
    pub color: String,
    pub common_name: String,
}

impl SpeciesInfo {
    /// Field labels and values in file order.
    pub fn fields(&self) -> [(&'static str, &str); INFO_FIELDS] {
        [
            ("Location", self.location.as_str()),
            ("Discovery", self.discovery.as_str()),
            ("Size", self.size.as_str()),
            ("Color", self.color.as_str()),
            ("Common name", self.common_name.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQUENCES: &str = "\
>Aequorea victoria
ATGACAAGCA
AACAATAC

>Photinus pyralis
GGCC
TT AA

>Vargula hilgendorfii
ACGT";

    #[test]
    fn test_fetch_multiline_record() {
        let source = RecordSource::new(SEQUENCES);
        assert_eq!(source.fetch("Aequorea victoria").unwrap(), "ATGACAAGCAAACAATAC");
        assert_eq!(source.fetch("Photinus pyralis").unwrap(), "GGCCTT AA");
    }

    #[test]
    fn test_fetch_record_ending_at_eof() {
        let source = RecordSource::new(SEQUENCES);
        assert_eq!(source.fetch("Vargula hilgendorfii").unwrap(), "ACGT");
    }

    #[test]
    fn test_fetch_not_found() {
        let source = RecordSource::new(SEQUENCES);
        let result = source.fetch("Aequorea");
        assert!(matches!(result, Err(RecordError::NotFound(ref id)) if id == "Aequorea"));
    }

    #[test]
    fn test_header_without_body() {
        let source = RecordSource::new(">Empty species\n\n>Other\nAC\n");
        assert_eq!(source.fetch("Empty species").unwrap(), "");
        let source = RecordSource::new(">Last");
        assert_eq!(source.fetch("Last").unwrap(), "");
    }

    #[test]
    fn test_crlf_lines() {
        let source = RecordSource::new(">Species one\r\nACGT\r\nTT\r\n\r\n");
        let raw = source.fetch("Species one").unwrap();
        assert_eq!(crate::sequence::clean(&raw).as_str(), "ACGTTT");
    }

    #[test]
    fn test_fetch_pair() {
        let source = RecordSource::new(SEQUENCES);
        let (a, b) = source.fetch_pair("Vargula hilgendorfii", "Aequorea victoria").unwrap();
        assert_eq!(a, "ACGT");
        assert_eq!(b, "ATGACAAGCAAACAATAC");
    }

    #[test]
    fn test_fetch_pair_same_species() {
        let source = RecordSource::new(SEQUENCES);
        let (a, b) = source.fetch_pair("Photinus pyralis", "Photinus pyralis").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "GGCCTT AA");
    }

    #[test]
    fn test_fetch_pair_not_found() {
        let source = RecordSource::new(SEQUENCES);
        let result = source.fetch_pair("Aequorea victoria", "Nobody");
        assert!(matches!(result, Err(RecordError::NotFound(ref id)) if id == "Nobody"));
    }

    #[test]
    fn test_species_info() {
        let content = "\
>Photinus pyralis
Eastern North America
Described 1767
1-1.4 cm
Yellow-green light
Common eastern firefly

>Short record
Somewhere
";
        let source = RecordSource::new(content);
        let info = source.info("Photinus pyralis").unwrap();
        assert_eq!(info.location, "Eastern North America");
        assert_eq!(info.common_name, "Common eastern firefly");
        assert_eq!(info.fields()[2], ("Size", "1-1.4 cm"));

        let short = source.info("Short record").unwrap();
        assert_eq!(short.location, "Somewhere");
        assert_eq!(short.discovery, "");
        assert_eq!(short.common_name, "");

        assert!(matches!(source.info("Nobody"), Err(RecordError::NotFound(_))));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Sequences.txt");
        fs::write(&path, SEQUENCES).unwrap();
        let source = RecordSource::from_path(&path).unwrap();
        assert_eq!(source.fetch("Vargula hilgendorfii").unwrap(), "ACGT");

        let missing = RecordSource::from_path(dir.path().join("missing.txt"));
        assert!(matches!(missing, Err(RecordError::IoError(_))));
    }
}
