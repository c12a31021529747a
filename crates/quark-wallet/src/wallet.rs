//! One-time wallet composition.
//!
//! A wallet ties a secret's derivation outputs for one token together:
//! bundle hash, position, one-time address, and the private key material
//! used for signing. It is an immutable value object; whoever derives it
//! owns it until it is handed off to a credential or an atom builder.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::derive::{
    Address, BundleHash, Position, bundle_hash, derive_position, derive_wallet_address,
    derive_wallet_key,
};
use crate::secret::Secret;

/// Private key material derived for one wallet position.
///
/// Zeroized on drop; never serialized.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct WalletKey {
    bytes: [u8; 32],
}

impl WalletKey {
    /// The raw key bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

impl Clone for WalletKey {
    fn clone(&self) -> Self {
        Self { bytes: self.bytes }
    }
}

impl fmt::Debug for WalletKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// A derived one-time wallet for a single token.
#[derive(Clone, Debug)]
pub struct Wallet {
    bundle: BundleHash,
    token: String,
    position: Position,
    address: Address,
    key: WalletKey,
    characters: Option<String>,
}

impl Wallet {
    /// Derive a wallet with a deterministic position for
    /// (secret, token, context).
    ///
    /// Two concurrent derivations of the same triple yield identical,
    /// independent values.
    pub fn create(secret: &Secret, token: &str, context: &str) -> Self {
        let position = derive_position(secret, token, context);
        Self::with_position(secret, token, position)
    }

    /// Derive a wallet at a known position (the restoration path).
    pub fn with_position(secret: &Secret, token: &str, position: Position) -> Self {
        let address = derive_wallet_address(secret, &position, token);
        let key = WalletKey {
            bytes: derive_wallet_key(secret, &position, token),
        };
        tracing::debug!(token, %address, "derived wallet");
        Self {
            bundle: bundle_hash(secret),
            token: token.to_owned(),
            position,
            address,
            key,
            characters: None,
        }
    }

    /// Attach a human-readable label. Display only; never hashed.
    pub fn with_characters(mut self, characters: impl Into<String>) -> Self {
        self.characters = Some(characters.into());
        self
    }

    /// The bundle hash correlating all of this user's wallets.
    pub fn bundle(&self) -> &BundleHash {
        &self.bundle
    }

    /// The token this wallet was derived for.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The derivation salt for this one-time address.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The one-time address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Private signing key material.
    pub fn key(&self) -> &WalletKey {
        &self.key
    }

    /// Optional display label.
    pub fn characters(&self) -> Option<&str> {
        self.characters.as_deref()
    }
}
