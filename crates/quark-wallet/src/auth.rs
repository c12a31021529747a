//! Authentication credential lifecycle.
//!
//! An [`AuthToken`] binds a server-issued token bundle to a locally
//! derived wallet. It has exactly two states, active and expired,
//! decided purely by wall-clock time: [`AuthToken::is_expired`]
//! recomputes on every call, no transition is ever triggered
//! explicitly, and expiry is reported rather than raised. Rejecting an
//! expired credential and re-authenticating are the transport layer's
//! job.
//!
//! Credentials survive process restart only through
//! [`AuthToken::to_snapshot`] / [`AuthToken::restore`]: the snapshot
//! persists the wallet's position and label but never the secret or any
//! key material, and restoration re-derives the wallet from a
//! re-supplied secret.

use serde::{Deserialize, Serialize};

use crate::derive::Position;
use crate::error::WalletError;
use crate::secret::Secret;
use crate::wallet::Wallet;

/// Token code under which authentication wallets are derived.
pub const AUTH_TOKEN_CODE: &str = "AUTH";

/// Server-issued credential fields, as returned by the auth exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokenData {
    /// Opaque session token string.
    pub token: String,
    /// Expiry, seconds since the Unix epoch.
    pub expires_at: u64,
    /// Server-side public key for the session.
    pub pubkey: String,
    /// Whether the session requires encrypted payloads.
    pub encrypt: bool,
}

/// Persistable credential state. Never contains the secret or any
/// derived private key material.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokenSnapshot {
    pub token: String,
    pub expires_at: u64,
    pub pubkey: String,
    pub encrypt: bool,
    pub wallet: Option<WalletSnapshot>,
}

/// The wallet part of a snapshot: position and display label only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
}

/// Credential fields the transport layer attaches to outgoing requests.
#[derive(Debug)]
pub struct AuthData<'a> {
    pub token: &'a str,
    pub pubkey: &'a str,
    pub wallet: Option<&'a Wallet>,
}

/// A time-boxed authentication credential bound to a derived wallet.
#[derive(Clone, Debug)]
pub struct AuthToken {
    data: AuthTokenData,
    wallet: Option<Wallet>,
}

impl AuthToken {
    /// Bind server-issued credential data to a locally derived wallet.
    /// No network call happens here.
    pub fn create(data: AuthTokenData, wallet: Wallet) -> Self {
        Self {
            data,
            wallet: Some(wallet),
        }
    }

    /// Rebind the credential to a different wallet. The only mutation
    /// this type permits.
    pub fn set_wallet(&mut self, wallet: Wallet) {
        self.wallet = Some(wallet);
    }

    /// Whether the credential has passed its expiry.
    ///
    /// Recomputed from the wall clock on every call; never errors.
    pub fn is_expired(&self) -> bool {
        now_seconds() >= self.data.expires_at
    }

    /// Seconds until expiry, zero once expired.
    pub fn expires_in(&self) -> u64 {
        self.data.expires_at.saturating_sub(now_seconds())
    }

    /// The opaque session token.
    pub fn token(&self) -> &str {
        &self.data.token
    }

    /// Expiry, seconds since the Unix epoch.
    pub fn expires_at(&self) -> u64 {
        self.data.expires_at
    }

    /// The server's session public key.
    pub fn pubkey(&self) -> &str {
        &self.data.pubkey
    }

    /// Whether the session requires encrypted payloads.
    pub fn encrypt(&self) -> bool {
        self.data.encrypt
    }

    /// The bound wallet, if any.
    pub fn wallet(&self) -> Option<&Wallet> {
        self.wallet.as_ref()
    }

    /// Credential fields for the transport layer. Performs no I/O.
    pub fn auth_data(&self) -> AuthData<'_> {
        AuthData {
            token: &self.data.token,
            pubkey: &self.data.pubkey,
            wallet: self.wallet.as_ref(),
        }
    }

    /// Emit the persistable snapshot: token data plus the wallet's
    /// position and label. The secret and key material never appear.
    pub fn to_snapshot(&self) -> AuthTokenSnapshot {
        AuthTokenSnapshot {
            token: self.data.token.clone(),
            expires_at: self.data.expires_at,
            pubkey: self.data.pubkey.clone(),
            encrypt: self.data.encrypt,
            wallet: self.wallet.as_ref().map(|w| WalletSnapshot {
                position: w.position().as_str().to_owned(),
                characters: w.characters().map(str::to_owned),
            }),
        }
    }

    /// Rebuild a credential from a snapshot and a re-supplied secret.
    ///
    /// The wallet is re-derived deterministically from the secret plus
    /// the persisted position, then bound via [`AuthToken::create`].
    /// This is the only path by which a credential survives restart.
    pub fn restore(snapshot: AuthTokenSnapshot, secret: &Secret) -> Result<Self, WalletError> {
        let wallet_snapshot = snapshot
            .wallet
            .ok_or(WalletError::SnapshotMissingField("wallet"))?;
        let mut wallet = Wallet::with_position(
            secret,
            AUTH_TOKEN_CODE,
            Position::from_hex(wallet_snapshot.position),
        );
        if let Some(characters) = wallet_snapshot.characters {
            wallet = wallet.with_characters(characters);
        }
        tracing::debug!(address = %wallet.address(), "restored auth credential");
        Ok(Self::create(
            AuthTokenData {
                token: snapshot.token,
                expires_at: snapshot.expires_at,
                pubkey: snapshot.pubkey,
                encrypt: snapshot.encrypt,
            },
            wallet,
        ))
    }
}

fn now_seconds() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
