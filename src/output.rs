//! Artifact names and text layout.
//!
//! Names are pure functions of the request so that the same request always
//! lands on the same artifact:
//!
//! ```text
//! DNA <species>
//! RNA <species>
//! Protein <frame> <species>
//! Global Alignment <match> <mismatch> <indel> <species 1> and <species 2>
//! Local Alignment <match> <mismatch> <indel> <species 1> and <species 2>
//! ```
//!
//! Content is laid out in 70-column lines. The last line never carries a
//! trailing newline.

use crate::align::AlignmentMode;
use crate::model::{Alphabet, ScoringConfig};
use crate::traceback::AlignmentResult;

/// Column width of every artifact line.
pub const LINE_WIDTH: usize = 70;

/// Name of a single-sequence artifact.
///
/// Only protein names carry the reading frame; DNA and RNA artifacts are
/// frame-independent.
pub fn sequence_artifact_name(alphabet: Alphabet, scoring: &ScoringConfig, species: &str) -> String {
    match alphabet {
        Alphabet::Dna | Alphabet::Rna => format!("{} {}", alphabet, species),
        Alphabet::Protein => format!("{} {} {}", alphabet, scoring.frame, species),
    }
}

/// Name of an alignment artifact.
pub fn alignment_artifact_name(
    mode: AlignmentMode,
    scoring: &ScoringConfig,
    first: &str,
    second: &str,
) -> String {
    format!(
        "{} Alignment {} {} {} {} and {}",
        mode, scoring.match_score, scoring.mismatch, scoring.indel, first, second
    )
}

/// Splits `data` into full-width chunks followed by the remainder.
///
/// An empty input yields one empty chunk, and an input whose length is a
/// multiple of the width keeps its last full chunk as the remainder, so
/// the caller never writes a dangling newline.
fn chunks(data: &str) -> Vec<&str> {
    let mut out = Vec::with_capacity(data.len() / LINE_WIDTH + 1);
    let mut k = 0;
    while k + LINE_WIDTH < data.len() {
        out.push(&data[k..k + LINE_WIDTH]);
        k += LINE_WIDTH;
    }
    out.push(&data[k..]);
    out
}

/// Lays out a sequence as 70-column lines.
pub fn wrap_sequence(data: &str) -> String {
    chunks(data).join("\n")
}

/// Lays out an alignment as blocks of two 70-column lines separated by a
/// blank line.
pub fn wrap_alignment(result: &AlignmentResult) -> String {
    let top = chunks(&result.aligned1);
    let bottom = chunks(&result.aligned2);

    top.iter()
        .zip(bottom.iter())
        .map(|(a, b)| format!("{}\n{}", a, b))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReadingFrame;

    fn result(a1: &str, a2: &str) -> AlignmentResult {
        AlignmentResult {
            mode: AlignmentMode::Global,
            score: 0,
            aligned1: a1.to_string(),
            aligned2: a2.to_string(),
        }
    }

    #[test]
    fn test_sequence_names() {
        let cfg = ScoringConfig::new(1, -1, -2, ReadingFrame::new(5).unwrap());
        assert_eq!(sequence_artifact_name(Alphabet::Dna, &cfg, "Photinus pyralis"), "DNA Photinus pyralis");
        assert_eq!(sequence_artifact_name(Alphabet::Rna, &cfg, "Photinus pyralis"), "RNA Photinus pyralis");
        assert_eq!(
            sequence_artifact_name(Alphabet::Protein, &cfg, "Photinus pyralis"),
            "Protein 5 Photinus pyralis"
        );
    }

    #[test]
    fn test_alignment_names() {
        let cfg = ScoringConfig::new(2, -1, -3, ReadingFrame::FIRST);
        assert_eq!(
            alignment_artifact_name(AlignmentMode::Global, &cfg, "A b", "C d"),
            "Global Alignment 2 -1 -3 A b and C d"
        );
        assert_eq!(
            alignment_artifact_name(AlignmentMode::Local, &cfg, "A b", "C d"),
            "Local Alignment 2 -1 -3 A b and C d"
        );
    }

    #[test]
    fn test_names_are_deterministic() {
        let cfg = ScoringConfig::default();
        let a = alignment_artifact_name(AlignmentMode::Local, &cfg, "x", "y");
        let b = alignment_artifact_name(AlignmentMode::Local, &cfg, "x", "y");
        assert_eq!(a, b);
    }

    #[test]
    fn test_wrap_short_and_empty() {
        assert_eq!(wrap_sequence(""), "");
        assert_eq!(wrap_sequence("ACGT"), "ACGT");
    }

    #[test]
    fn test_wrap_exact_multiple_has_no_trailing_newline() {
        let seq = "A".repeat(140);
        let wrapped = wrap_sequence(&seq);
        let lines: Vec<&str> = wrapped.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.len() == 70));
        assert!(!wrapped.ends_with('\n'));
    }

    #[test]
    fn test_wrap_partial_last_line() {
        let seq = format!("{}{}", "C".repeat(70), "GT");
        assert_eq!(wrap_sequence(&seq), format!("{}\nGT", "C".repeat(70)));
    }

    #[test]
    fn test_wrap_alignment_blocks() {
        let a1 = format!("{}{}", "A".repeat(70), "C-");
        let a2 = format!("{}{}", "T".repeat(70), "-G");
        let expected = format!("{}\n{}\n\n{}\n{}", "A".repeat(70), "T".repeat(70), "C-", "-G");
        assert_eq!(wrap_alignment(&result(&a1, &a2)), expected);
    }

    #[test]
    fn test_wrap_alignment_single_block() {
        assert_eq!(wrap_alignment(&result("AC-T", "A-GT")), "AC-T\nA-GT");
        assert_eq!(wrap_alignment(&result("", "")), "\n");
    }
}
