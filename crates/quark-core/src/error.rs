//! Error types for the Quark client core.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid hex character {character:?} at offset {position}")]
    InvalidHexCharacter { character: char, position: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    #[error("missing required field: {field}")] MissingRequiredField { field: &'static str },
    #[error("meta payload is not a key/value object")] NotAnObject,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtomError {
    #[error("unknown isotope code: {0:?}")] UnknownIsotope(char),
    #[error("unknown hash version: {0}")] UnknownHashVersion(u16),
    #[error("atom source is not an object")] SourceNotAnObject,
    #[error("canonical form serialization: {0}")] Serialization(String),
}

#[derive(Error, Debug)]
pub enum QuarkError {
    #[error(transparent)] Codec(#[from] CodecError),
    #[error(transparent)] Meta(#[from] MetaError),
    #[error(transparent)] Atom(#[from] AtomError),
}
