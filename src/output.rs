//! The downstream writer boundary.
//!
//! Serialization formats (FASTA, FASTQ, compressed variants) live outside
//! this crate; executors hand finished batches to any [`OutputWriter`] the
//! integrator supplies.

use crate::record::OutputRecord;

/// Consumes decoded record batches and is responsible for their durability.
///
/// Implementations own serialization and must flush and sync a batch before
/// returning, so a crashed process never loses acknowledged output. Records
/// within a batch arrive in executor completion order, which is unspecified
/// for the parallel executor - writers must not rely on read ordering.
///
/// Policy decisions such as skipping records with empty sequences belong to
/// the writer, not to the executors, which pass every decoded record
/// through uninterpreted.
pub trait OutputWriter {
    /// Writes one batch of decoded records.
    fn write_batch(&mut self, records: &[OutputRecord]) -> std::io::Result<()>;
}
