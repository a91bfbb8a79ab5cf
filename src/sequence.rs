//! Nucleotide cleaning and transcription.
//!
//! Raw record text goes through [`clean`] first, which keeps only the four
//! DNA bases. [`transcribe`] then turns cleaned DNA into RNA for a given
//! reading frame:
//!
//! - Frames 1-3: `T` becomes `U`, everything else is kept.
//! - Frames 4-6: the DNA is read end-to-start and every base is replaced
//!   by its RNA complement (`A→U`, `T→A`, `C→G`, `G→C`).

use crate::model::{Alphabet, ReadingFrame, Sequence, Strand};

/// Keeps `A`, `T`, `G` and `C` from `raw`, in order, dropping everything
/// else (whitespace, line breaks, lowercase letters, IUPAC codes).
pub fn clean(raw: &str) -> Sequence {
    let data: String = raw
        .chars()
        .filter(|c| matches!(c, 'A' | 'T' | 'G' | 'C'))
        .collect();
    Sequence::new(Alphabet::Dna, data)
}

/// Transcribes cleaned DNA into RNA for the strand of `frame`.
pub fn transcribe(dna: &Sequence, frame: ReadingFrame) -> Sequence {
    let data: String = match frame.strand() {
        Strand::Forward => dna.as_str().chars().map(sense_base).collect(),
        Strand::Reverse => dna.as_str().chars().rev().map(complement_base).collect(),
    };
    Sequence::new(Alphabet::Rna, data)
}

#[inline]
fn sense_base(base: char) -> char {
    if base == 'T' {
        'U'
    } else {
        base
    }
}

#[inline]
fn complement_base(base: char) -> char {
    match base {
        'A' => 'U',
        'T' => 'A',
        'C' => 'G',
        _ => 'C',
    }
}
