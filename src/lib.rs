//! # BioLum - Bioluminescent species sequence explorer
//!
//! Derives DNA, RNA and protein sequences from species records and aligns
//! pairs of species, storing every result as a write-once text artifact.
//!
//! ## Architecture
//!
//! The pipeline runs leaves first:
//! - `model`: Sequences, reading frames, scoring parameters and request modes
//! - `sequence`: Cleaning raw record text and DNA to RNA transcription
//! - `genetic_code`: Codon table and frame-relative translation
//! - `align`: Global and local scoring matrices
//! - `traceback`: Reconstruction of aligned strings from a filled matrix
//! - `records`: Lookup of `>`-headed species records
//! - `output`: Artifact names and 70-column layout
//! - `store`: Write-once artifact persistence
//! - `controller`: Orchestration of a request in a given mode

pub mod align;
pub mod controller;
pub mod genetic_code;
pub mod model;
pub mod output;
pub mod records;
pub mod sequence;
pub mod store;
pub mod traceback;
