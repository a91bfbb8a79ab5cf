//! Data model for sequence derivation and alignment.
//!
//! This module contains the value types shared by every stage:
//! - Sequences tagged with their alphabet
//! - Reading frames and strands
//! - Scoring configuration for pairwise alignment
//! - Request modes
//!
//! Every type here is immutable once built. Derivation steps produce new
//! values instead of editing existing ones.

use std::fmt;

use thiserror::Error;

/// Default match reward.
pub const DEFAULT_MATCH: i32 = 1;
/// Default mismatch penalty.
pub const DEFAULT_MISMATCH: i32 = -1;
/// Default indel penalty.
pub const DEFAULT_INDEL: i32 = -2;

/// Errors raised while validating user-supplied parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Reading frame must be 1-6 (got {0})")]
    InvalidFrame(i64),

    #[error("Reading frame must be an integer 1-6 (got '{0}')")]
    FrameNotANumber(String),

    #[error("Invalid {name} value '{value}': expected an integer")]
    InvalidScore { name: &'static str, value: String },
}

/// Result type for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Alphabet a sequence is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// A, T, G, C
    Dna,
    /// A, U, G, C
    Rna,
    /// 20 amino-acid letters plus `-` for stop
    Protein,
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alphabet::Dna => write!(f, "DNA"),
            Alphabet::Rna => write!(f, "RNA"),
            Alphabet::Protein => write!(f, "Protein"),
        }
    }
}

/// An immutable biological sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    alphabet: Alphabet,
    data: String,
}

impl Sequence {
    /// Creates a new sequence. Callers are responsible for the data
    /// matching the alphabet; the derivation functions guarantee it.
    pub fn new(alphabet: Alphabet, data: impl Into<String>) -> Self {
        Self {
            alphabet,
            data: data.into(),
        }
    }

    /// Returns the alphabet of this sequence.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the sequence data as a string slice.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Returns the sequence data as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

/// Strand read by a reading frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    /// Frames 1-3: sense strand, read as given
    Forward,
    /// Frames 4-6: read end-to-start and complemented
    Reverse,
}

/// A reading frame in 1..=6.
///
/// Frames 1-3 read the forward strand at codon offsets 0, 1 and 2.
/// Frames 4-6 read the reverse complement at the same offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReadingFrame(u8);

impl ReadingFrame {
    /// Frame 1: forward strand, offset 0.
    pub const FIRST: ReadingFrame = ReadingFrame(1);

    /// Validates a frame number.
    pub fn new(frame: i64) -> ParameterResult<Self> {
        if (1..=6).contains(&frame) {
            Ok(Self(frame as u8))
        } else {
            Err(ParameterError::InvalidFrame(frame))
        }
    }

    /// Returns the frame number (1-6).
    pub fn get(self) -> u8 {
        self.0
    }

    /// Returns which strand this frame reads.
    pub fn strand(self) -> Strand {
        if self.0 <= 3 {
            Strand::Forward
        } else {
            Strand::Reverse
        }
    }

    /// Returns the intra-codon start offset (0, 1 or 2).
    pub fn offset(self) -> usize {
        match self.strand() {
            Strand::Forward => (self.0 as usize - 1) % 3,
            Strand::Reverse => (self.0 as usize - 4) % 3,
        }
    }
}

impl Default for ReadingFrame {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for ReadingFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scoring parameters for pairwise alignment plus the reading frame used
/// for translation.
///
/// The indel penalty is linear: every gap position costs the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Reward added for identical characters
    pub match_score: i32,
    /// Score added for differing characters
    pub mismatch: i32,
    /// Score added for each gap position
    pub indel: i32,
    /// Frame used by protein derivation
    pub frame: ReadingFrame,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH,
            mismatch: DEFAULT_MISMATCH,
            indel: DEFAULT_INDEL,
            frame: ReadingFrame::FIRST,
        }
    }
}

impl ScoringConfig {
    /// Creates a scoring configuration from already-validated values.
    pub fn new(match_score: i32, mismatch: i32, indel: i32, frame: ReadingFrame) -> Self {
        Self {
            match_score,
            mismatch,
            indel,
            frame,
        }
    }

    /// Builds a configuration from text fields, as typed by a user.
    ///
    /// Surrounding whitespace is ignored. Any field that is not an integer
    /// is rejected before anything runs.
    pub fn from_text(
        match_score: &str,
        mismatch: &str,
        indel: &str,
        frame: &str,
    ) -> ParameterResult<Self> {
        let frame_value: i64 = frame
            .trim()
            .parse()
            .map_err(|_| ParameterError::FrameNotANumber(frame.to_string()))?;

        Ok(Self {
            match_score: parse_score("match", match_score)?,
            mismatch: parse_score("mismatch", mismatch)?,
            indel: parse_score("indel", indel)?,
            frame: ReadingFrame::new(frame_value)?,
        })
    }

    /// Score for aligning `a` against `b`, widened to the matrix cell type.
    #[inline]
    pub fn substitution(&self, a: u8, b: u8) -> i64 {
        if a == b {
            i64::from(self.match_score)
        } else {
            i64::from(self.mismatch)
        }
    }
}

fn parse_score(name: &'static str, value: &str) -> ParameterResult<i32> {
    value.trim().parse().map_err(|_| ParameterError::InvalidScore {
        name,
        value: value.to_string(),
    })
}

/// What a request should derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Cleaned DNA of one species
    Dna,
    /// Forward transcription of one species
    Rna,
    /// Translation of one species in the configured frame
    Protein,
    /// Global and local alignment of two species
    Alignment,
}
