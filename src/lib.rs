//! Find occurrences of a DNA consensus motif in fasta sequences.
//!
//! # Overview
//! motifscan compiles a consensus pattern once and scans every sequence of a fasta file for it,
//! on the forward strand and optionally on the reverse complement. Each occurrence is reported
//! as a tab-separated line:
//! ```text
//! chr1	4	8	ACGT	0	+
//! ```
//! The columns are the sequence name, the 0-based start, the end, the matched bases, a constant
//! score of `0`, and the strand. Occurrences on the `-` strand are reported in forward strand
//! coordinates, with the matched bases as they read on the reverse complement.
//!
//! ## Consensus syntax
//! By default the consensus is a regular expression, so `GA[AT]TC` or `CA{3,5}G` work as
//! expected. With [`ConsensusSyntax::Iupac`], every character is an IUPAC nucleotide code that is
//! expanded to the bases it stands for (`R` is `A` or `G`, `N` is anything, and so on).
//!
//! ## Soft-masked repeats
//! Lowercase bases mark soft-masked repeats. Normally they match like any other base. With
//! `ignore_repeat`, the pattern becomes case-sensitive and any occurrence that touches a
//! lowercase base is dropped.
//!
//! ## Overlapping occurrences
//! Scanning restarts right after the end of each occurrence, so occurrences never share bases.
//! With `allow_overlap`, scanning restarts one base after the start of each occurrence instead.
//!
//! ## Pipeline
//! Records flow one at a time through a [`Graph`](graph::Graph) of nodes: reading
//! ([`InputFastaNode`](graph::node::InputFastaNode)), scanning
//! ([`ScanMotifNode`](graph::node::ScanMotifNode)), and writing
//! ([`OutputHitsNode`](graph::node::OutputHitsNode)). The graph can be run on multiple threads,
//! in which case records are written in an arbitrary order but the hits of a record stay
//! together.

pub mod config;
pub mod errors;
pub mod fasta;
pub mod graph;
pub mod hit;
pub mod mask;
pub mod patterns;
pub mod record;
pub mod revcomp;
pub mod run;
pub mod scan;

// commonly used functions and types

pub use crate::config::*;
pub use crate::hit::*;
pub use crate::patterns::*;
pub use crate::record::*;
pub use crate::revcomp::*;
pub use crate::run::*;
pub use crate::scan::*;
