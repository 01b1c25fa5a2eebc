//! The injected decoding capability contract.
//!
//! No default basecaller ships with this crate. The integrator injects any
//! object implementing [`Basecaller`] into a task executor via
//! `set_caller`; the trait bound is the setup-time interface check.

/// One decoded read: a base sequence and its per-base quality string.
///
/// Both fields are passed through from the capability without
/// interpretation. An empty sequence is a legitimate result; whether to
/// skip it is output-writer policy, not this crate's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basecall {
    /// Called base sequence, possibly empty.
    pub sequence: String,
    /// FASTQ-style quality scores, same length as `sequence` on success.
    pub quality: String,
}

/// A decoding capability mapping normalized signal to sequence + quality.
///
/// The injected object is shared by reference across pool workers and must
/// tolerate concurrent calls, hence the `Send + Sync` bound. Input signal
/// is already normalized by the library (see [`crate::signal::normalize`]).
pub trait Basecaller: Send + Sync {
    /// Decodes one normalized signal sequence.
    fn call_raw_signal(&self, signal: &[f32]) -> Basecall;
}
