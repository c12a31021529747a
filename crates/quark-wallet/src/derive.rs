//! Deterministic derivation: bundle hash, positions, wallet addresses.
//!
//! Every function here is a pure function of its inputs. Peer nodes
//! recompute positions and addresses independently to validate records,
//! so the derivation must be bit-identical across all language clients
//! of the ledger.
//!
//! Chain shape: `secret → bundle hash` (public identity, SHA-256),
//! `(secret, token, context) → position` (BLAKE3 derive-key), and
//! `(secret, position, token) → address` through an intermediate key
//! plus a fixed number of hardening rounds so neither the secret nor
//! the position is recoverable from the address.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use quark_core::codec::{self, EncodeOptions};

use crate::secret::Secret;

/// BLAKE3 KDF context for position derivation.
const POSITION_CONTEXT: &str = "quark-wallet-position-v1";

/// BLAKE3 KDF context for the address intermediate key.
const ADDRESS_KEY_CONTEXT: &str = "quark-wallet-address-key-v1";

/// Hash rounds between the intermediate key and the address digest.
const HARDENING_ROUNDS: usize = 16;

/// Stable public identity digest derived once from a secret.
///
/// Identical secret always yields an identical bundle hash; it is what
/// correlates all wallets a user derives.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundleHash([u8; 32]);

impl BundleHash {
    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for BundleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", codec::encode(&self.0, &EncodeOptions::default()))
    }
}

impl fmt::Debug for BundleHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BundleHash({self})")
    }
}

/// Per-(secret, token, context) derivation salt for a one-time address.
///
/// Must not repeat for the same secret and token in normal operation;
/// reuse weakens the unlinkability of the derived addresses.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(String);

impl Position {
    /// Adopt an externally persisted position (snapshot restoration).
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// The position as lowercase hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A one-time wallet address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// The address as lowercase hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the bundle hash: the user's stable public identity.
///
/// One-way SHA-256 digest of the secret bytes; pure function of the
/// secret only.
pub fn bundle_hash(secret: &Secret) -> BundleHash {
    let digest = Sha256::digest(secret.as_bytes());
    BundleHash(digest.into())
}

/// Derive the position for a (secret, token, context) triple.
///
/// Deterministic and stable across clients: the same triple always
/// yields the same position. Length-prefixed input framing keeps
/// distinct (token, context) pairs from colliding.
pub fn derive_position(secret: &Secret, token: &str, context: &str) -> Position {
    let ikm = frame(&[secret.as_bytes(), token.as_bytes(), context.as_bytes()]);
    let derived = blake3::derive_key(POSITION_CONTEXT, &ikm);
    Position(codec::encode(&derived, &EncodeOptions::default()))
}

/// Derive the one-time wallet address for (secret, position, token).
///
/// One-way: an intermediate BLAKE3 key is rehashed for
/// [`HARDENING_ROUNDS`] rounds before the final digest, so recovering
/// the secret or position from the address requires inverting the full
/// chain.
pub fn derive_wallet_address(secret: &Secret, position: &Position, token: &str) -> Address {
    let ikm = frame(&[
        secret.as_bytes(),
        position.as_str().as_bytes(),
        token.as_bytes(),
    ]);
    let mut working = blake3::derive_key(ADDRESS_KEY_CONTEXT, &ikm);
    for _ in 0..HARDENING_ROUNDS {
        working = *blake3::hash(&working).as_bytes();
    }
    let digest = blake3::hash(&working);
    Address(codec::encode(digest.as_bytes(), &EncodeOptions::default()))
}

/// Derive the private key material a wallet signs with.
///
/// Same chain as [`derive_wallet_address`] but stops at the
/// intermediate key, before the hardening rounds that produce the
/// public address.
pub(crate) fn derive_wallet_key(secret: &Secret, position: &Position, token: &str) -> [u8; 32] {
    let ikm = frame(&[
        secret.as_bytes(),
        position.as_str().as_bytes(),
        token.as_bytes(),
    ]);
    blake3::derive_key(ADDRESS_KEY_CONTEXT, &ikm)
}

/// Length-prefix each part so adjacent fields cannot be re-split into a
/// colliding input.
fn frame(parts: &[&[u8]]) -> Vec<u8> {
    let total: usize = parts.iter().map(|p| p.len() + 8).sum();
    let mut out = Vec::with_capacity(total);
    for part in parts {
        out.extend_from_slice(&(part.len() as u64).to_le_bytes());
        out.extend_from_slice(part);
    }
    out
}
