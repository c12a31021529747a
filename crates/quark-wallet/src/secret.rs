//! Secret material: generation, validation, hygiene.
//!
//! A secret is the root of every derivation chain a user owns. It is
//! never transmitted or persisted; it lives in client memory only as
//! long as wallets need deriving, and its bytes are zeroized on drop.

use rand::{CryptoRng, RngCore, rngs::OsRng};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use quark_core::codec::{self, EncodeOptions};

use crate::error::WalletError;

/// Minimum secret entropy, in bits.
pub const MIN_SECRET_BITS: usize = 256;

/// Default entropy for generated secrets, in bits.
pub const DEFAULT_SECRET_BITS: usize = 2048;

/// High-entropy root of a user's derivation chains.
///
/// Zeroized on drop; `Debug` never prints the bytes.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    bytes: Vec<u8>,
}

impl Secret {
    /// Generate a secret with the default entropy from the OS
    /// cryptographic RNG.
    pub fn generate() -> Self {
        Self::generate_with_rng(&mut OsRng, DEFAULT_SECRET_BITS)
            .expect("default entropy satisfies the minimum")
    }

    /// Generate a secret from an injected randomness provider.
    ///
    /// Fails with [`WalletError::InvalidSecretLength`] when `bits` is
    /// below [`MIN_SECRET_BITS`]; generation is never allowed to stretch
    /// low-entropy input.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(
        rng: &mut R,
        bits: usize,
    ) -> Result<Self, WalletError> {
        if bits < MIN_SECRET_BITS {
            return Err(WalletError::InvalidSecretLength {
                bits,
                min: MIN_SECRET_BITS,
            });
        }
        let mut bytes = vec![0u8; bits.div_ceil(8)];
        rng.fill_bytes(&mut bytes);
        Ok(Self { bytes })
    }

    /// Adopt user-supplied secret bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, WalletError> {
        let bits = bytes.len() * 8;
        if bits < MIN_SECRET_BITS {
            return Err(WalletError::InvalidSecretLength {
                bits,
                min: MIN_SECRET_BITS,
            });
        }
        Ok(Self { bytes })
    }

    /// Adopt a user-supplied secret in hex text form.
    pub fn from_hex(text: &str) -> Result<Self, WalletError> {
        let bytes =
            codec::decode(text).map_err(|e| WalletError::MalformedSecretHex(e.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// The raw secret bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex rendering of the secret. Only for controlled re-entry paths;
    /// never log or persist this.
    pub fn to_hex(&self) -> String {
        codec::encode(&self.bytes, &EncodeOptions::default())
    }
}

impl Clone for Secret {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("bytes", &"[REDACTED]")
            .field("bits", &(self.bytes.len() * 8))
            .finish()
    }
}
