//! Codon table and translation logic.
//!
//! This module provides:
//! - The standard RNA codon table, with `-` as the stop marker
//! - The trailing partial-codon fallbacks (`CC`, `AC`, `GU`, `GC`, `GG`)
//! - Frame-relative translation of RNA into protein

use std::collections::HashMap;

use crate::model::{Alphabet, ReadingFrame, Sequence};

/// Symbol emitted for a stop codon.
pub const STOP: char = '-';

/// Standard code in NCBI order (UUU, UUC, UUA, UUG, UCU, ...), stops as `-`.
const STANDARD_AA: &str = "FFLLSSSSYY--CC-W LLLLPPPPHHQQRRRR IIIMTTTTNNKKSSRR VVVVAAAADDEEGGGG";

/// Two-base codons that still decode when they are all that is left.
/// Their third position is fourfold degenerate.
const PARTIAL_CODONS: [(&str, char); 5] = [
    ("CC", 'P'),
    ("AC", 'T'),
    ("GU", 'V'),
    ("GC", 'A'),
    ("GG", 'G'),
];

/// A codon table mapping RNA codons to amino-acid letters.
#[derive(Debug, Clone)]
pub struct CodonTable {
    /// Codon to amino acid mapping (64 full codons plus partial fallbacks)
    codon_table: HashMap<String, char>,
}

impl CodonTable {
    /// Creates the standard table.
    pub fn standard() -> Self {
        let bases = ['U', 'C', 'A', 'G'];
        let amino_acids: Vec<char> = STANDARD_AA.chars().filter(|c| !c.is_whitespace()).collect();
        let mut codon_table = HashMap::with_capacity(64 + PARTIAL_CODONS.len());

        // NCBI order: UUU, UUC, UUA, UUG, UCU, UCC, ... (Base1, Base2, Base3)
        let mut idx = 0;
        for &b1 in &bases {
            for &b2 in &bases {
                for &b3 in &bases {
                    codon_table.insert(format!("{}{}{}", b1, b2, b3), amino_acids[idx]);
                    idx += 1;
                }
            }
        }

        for (codon, aa) in PARTIAL_CODONS {
            codon_table.insert(codon.to_string(), aa);
        }

        Self { codon_table }
    }

    /// Translates a single codon.
    ///
    /// Full codons always decode. A one- or two-base trailing codon
    /// decodes only if it is one of the partial fallbacks; anything else
    /// returns `None` and contributes nothing to the protein.
    pub fn translate_codon(&self, codon: &str) -> Option<char> {
        self.codon_table.get(codon).copied()
    }

    /// Translates an RNA sequence in the given reading frame.
    ///
    /// Reading starts at the frame's codon offset and continues to the end
    /// of the sequence: stop codons emit `-` and do not end translation.
    /// A trailing one- or two-base remainder is looked up once as a
    /// partial codon.
    pub fn translate(&self, rna: &Sequence, frame: ReadingFrame) -> Sequence {
        let data = rna.as_str();
        let mut protein = String::with_capacity(data.len() / 3 + 1);
        let mut pos = frame.offset();

        while pos + 3 <= data.len() {
            if let Some(aa) = self.translate_codon(&data[pos..pos + 3]) {
                protein.push(aa);
            }
            pos += 3;
        }

        if pos < data.len() {
            if let Some(aa) = self.translate_codon(&data[pos..]) {
                protein.push(aa);
            }
        }

        Sequence::new(Alphabet::Protein, protein)
    }
}

impl Default for CodonTable {
    fn default() -> Self {
        Self::standard()
    }
}
