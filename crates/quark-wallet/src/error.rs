//! Wallet and derivation error types.

use thiserror::Error;

/// Errors from secret handling and wallet derivation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Secret material below the minimum entropy requirement.
    #[error("invalid secret length: {bits} bits, need at least {min} bits")]
    InvalidSecretLength {
        /// Entropy supplied, in bits.
        bits: usize,
        /// Minimum entropy required, in bits.
        min: usize,
    },

    /// Secret supplied as malformed hex text.
    #[error("malformed secret hex: {0}")]
    MalformedSecretHex(String),

    /// Snapshot is missing a field required for restoration.
    #[error("snapshot missing field: {0}")]
    SnapshotMissingField(&'static str),

    /// Snapshot (de)serialization failure.
    #[error("snapshot serialization: {0}")]
    SnapshotSerialization(String),
}
