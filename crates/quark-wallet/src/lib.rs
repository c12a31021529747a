//! # quark-wallet — secrets, one-time wallets, auth credentials.
//!
//! Derives deterministic one-time wallet addresses from a user secret
//! and binds them to time-boxed authentication credentials. All
//! derivation is pure: the same (secret, token, context) triple yields
//! the same wallet on every client, which is what lets peer nodes
//! validate records independently. The only impure operation is secret
//! generation, which takes an injected cryptographic RNG.
//!
//! # Modules
//!
//! - [`error`] — `WalletError` enum
//! - [`secret`] — secret generation and hygiene
//! - [`derive`] — bundle hash, position, and address derivation
//! - [`wallet`] — one-time wallet composition
//! - [`auth`] — credential lifecycle and snapshots

pub mod auth;
pub mod derive;
pub mod error;
pub mod secret;
pub mod wallet;

// Re-exports for convenient access
pub use auth::{AUTH_TOKEN_CODE, AuthData, AuthToken, AuthTokenData, AuthTokenSnapshot};
pub use derive::{Address, BundleHash, Position, bundle_hash, derive_position, derive_wallet_address};
pub use error::WalletError;
pub use secret::{DEFAULT_SECRET_BITS, MIN_SECRET_BITS, Secret};
pub use wallet::{Wallet, WalletKey};
