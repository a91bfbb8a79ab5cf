//! Request orchestration.
//!
//! An [`Explorer`] ties the pipeline together for one request:
//! - fetch raw record text from a [`SequenceLookup`]
//! - clean, transcribe, translate or align
//! - name and lay out the artifact, then hand it to an [`ArtifactStore`]
//!
//! The request mode is always passed in explicitly; an explorer holds no
//! per-request state and can serve any number of requests.

use log::info;
use thiserror::Error;

use crate::genetic_code::CodonTable;
use crate::model::{Alphabet, Mode, ParameterError, ReadingFrame, ScoringConfig, Sequence};
use crate::output::{alignment_artifact_name, sequence_artifact_name, wrap_alignment, wrap_sequence};
use crate::records::{RecordError, SequenceLookup};
use crate::sequence::{clean, transcribe};
use crate::store::{ArtifactStore, StoreError, WriteOutcome};
use crate::traceback::{align_pair, AlignmentResult};

/// Errors that can end a request.
#[derive(Error, Debug)]
pub enum ExploreError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{mode:?} mode takes {expected} species, got {found}")]
    SpeciesCount {
        mode: Mode,
        expected: usize,
        found: usize,
    },
}

/// Result type for controller operations.
pub type ExploreResult<T> = Result<T, ExploreError>;

/// A derived single sequence and what happened to its artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub name: String,
    pub sequence: Sequence,
    pub outcome: WriteOutcome,
}

/// Both alignments of a species pair and what happened to their artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentReport {
    pub global: AlignmentResult,
    pub local: AlignmentResult,
    pub global_name: String,
    pub local_name: String,
    pub global_outcome: WriteOutcome,
    pub local_outcome: WriteOutcome,
}

impl AlignmentReport {
    pub fn global_score(&self) -> i64 {
        self.global.score
    }

    pub fn local_score(&self) -> i64 {
        self.local.score
    }
}

/// Outcome of [`Explorer::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Sequence(Derivation),
    Alignment(AlignmentReport),
}

/// Runs requests against a record source and an artifact store.
pub struct Explorer<L, S> {
    records: L,
    store: S,
    codons: CodonTable,
}

impl<L: SequenceLookup, S: ArtifactStore> Explorer<L, S> {
    pub fn new(records: L, store: S) -> Self {
        Self {
            records,
            store,
            codons: CodonTable::standard(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Dispatches a request in the given mode.
    ///
    /// Alignment takes two species, every other mode exactly one.
    pub fn run(&self, mode: Mode, species: &[&str], scoring: &ScoringConfig) -> ExploreResult<Report> {
        let expected = if mode == Mode::Alignment { 2 } else { 1 };
        if species.len() != expected {
            return Err(ExploreError::SpeciesCount {
                mode,
                expected,
                found: species.len(),
            });
        }

        let report = match mode {
            Mode::Dna => Report::Sequence(self.derive(Alphabet::Dna, species[0], scoring)?),
            Mode::Rna => Report::Sequence(self.derive(Alphabet::Rna, species[0], scoring)?),
            Mode::Protein => Report::Sequence(self.derive(Alphabet::Protein, species[0], scoring)?),
            Mode::Alignment => Report::Alignment(self.align(species[0], species[1], scoring)?),
        };
        Ok(report)
    }

    /// Derives one sequence for `species` and stores it if it is new.
    pub fn derive(
        &self,
        alphabet: Alphabet,
        species: &str,
        scoring: &ScoringConfig,
    ) -> ExploreResult<Derivation> {
        let raw = self.records.fetch(species)?;
        let sequence = self.derive_sequence(alphabet, &raw, scoring.frame);

        let name = sequence_artifact_name(alphabet, scoring, species);
        let outcome = self.store.write_if_absent(&name, &wrap_sequence(sequence.as_str()))?;
        info!("{}: {} ({} residues)", name, outcome, sequence.len());

        Ok(Derivation {
            name,
            sequence,
            outcome,
        })
    }

    /// Derives a sequence from raw record text without storing it.
    ///
    /// RNA is always the forward transcription since its artifact name has
    /// no frame. Protein uses the strand and offset of `frame`.
    pub fn derive_sequence(&self, alphabet: Alphabet, raw: &str, frame: ReadingFrame) -> Sequence {
        let dna = clean(raw);
        match alphabet {
            Alphabet::Dna => dna,
            Alphabet::Rna => transcribe(&dna, ReadingFrame::FIRST),
            Alphabet::Protein => self.codons.translate(&transcribe(&dna, frame), frame),
        }
    }

    /// Aligns two species globally and locally and stores both alignments
    /// if they are new.
    pub fn align(
        &self,
        first: &str,
        second: &str,
        scoring: &ScoringConfig,
    ) -> ExploreResult<AlignmentReport> {
        let (raw1, raw2) = self.records.fetch_pair(first, second)?;
        let (s1, s2) = (clean(&raw1), clean(&raw2));
        let (global, local) = align_pair(s1.as_bytes(), s2.as_bytes(), scoring);

        let global_name = alignment_artifact_name(global.mode, scoring, first, second);
        let local_name = alignment_artifact_name(local.mode, scoring, first, second);
        let global_outcome = self.store.write_if_absent(&global_name, &wrap_alignment(&global))?;
        let local_outcome = self.store.write_if_absent(&local_name, &wrap_alignment(&local))?;

        info!("{}: score {}, {}", global_name, global.score, global_outcome);
        info!("{}: score {}, {}", local_name, local.score, local_outcome);

        Ok(AlignmentReport {
            global,
            local,
            global_name,
            local_name,
            global_outcome,
            local_outcome,
        })
    }
}
