//! # quark-core
//! Atom model, canonical hashing forms, and codec primitives for the
//! Quark client.
//!
//! Everything here is a synchronous, pure computation over in-memory
//! values; determinism across language clients is the point, so no
//! operation depends on ambient state.
//!
//! # Modules
//!
//! - [`error`] — per-domain error enums and the [`error::QuarkError`] roll-up
//! - [`codec`] — hex text codec with display grouping
//! - [`decimal`] — fixed-scale amount comparison
//! - [`canonical`] — order-normalized structuring of hashable values
//! - [`atom`] — the atom record and versioned canonical views
//! - [`meta`] — meta payload flattening and policy rules

pub mod atom;
pub mod canonical;
pub mod codec;
pub mod decimal;
pub mod error;
pub mod meta;

// Re-exports for convenient access
pub use atom::{Atom, AtomField, HashVersion, Isotope};
pub use canonical::structure;
pub use codec::{EncodeOptions, decode, encode};
pub use error::{AtomError, CodecError, MetaError, QuarkError};
pub use meta::{Comparison, Rule};
