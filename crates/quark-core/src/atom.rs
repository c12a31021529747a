//! Atom model and versioned canonical views.
//!
//! An atom is a single ledger record: one isotope (operation kind) tied
//! to a wallet address, hashed and signed individually. Once hashed, an
//! atom is a value object; changing any field invalidates the hash.
//!
//! Hashing rules are versioned. Each [`HashVersion`] variant owns a
//! fixed, ordered schema of the fields that count as hashable content;
//! [`Atom::view`] applies the shared canonicalization routine from
//! [`crate::canonical`] to exactly that schema, in schema order. Old
//! records keep verifying under the version they were produced with
//! while new versions can evolve the schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::canonical::structure;
use crate::codec::{self, EncodeOptions};
use crate::error::AtomError;

/// Semantic kind of an atom, encoded on the wire as a single character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Isotope {
    /// Continuity: links a wallet's one-time addresses into a chain.
    C,
    /// Identity assertion.
    I,
    /// Metadata write.
    M,
    /// Rule / policy definition.
    R,
    /// Token issuance request.
    T,
    /// User authentication.
    U,
    /// Value transfer.
    V,
}

impl Isotope {
    /// The single-character wire code.
    pub fn code(&self) -> char {
        match self {
            Isotope::C => 'C',
            Isotope::I => 'I',
            Isotope::M => 'M',
            Isotope::R => 'R',
            Isotope::T => 'T',
            Isotope::U => 'U',
            Isotope::V => 'V',
        }
    }

    /// Parse a wire code back into an isotope.
    pub fn from_code(code: char) -> Result<Self, AtomError> {
        match code.to_ascii_uppercase() {
            'C' => Ok(Isotope::C),
            'I' => Ok(Isotope::I),
            'M' => Ok(Isotope::M),
            'R' => Ok(Isotope::R),
            'T' => Ok(Isotope::T),
            'U' => Ok(Isotope::U),
            'V' => Ok(Isotope::V),
            other => Err(AtomError::UnknownIsotope(other)),
        }
    }
}

impl fmt::Display for Isotope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A hashable atom field, named by its wire key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomField {
    Position,
    WalletAddress,
    Isotope,
    Token,
    Value,
    BatchId,
    MetaType,
    MetaId,
    Meta,
    Index,
    CreatedAt,
    Version,
}

impl AtomField {
    /// Wire key for this field.
    pub fn name(&self) -> &'static str {
        match self {
            AtomField::Position => "position",
            AtomField::WalletAddress => "walletAddress",
            AtomField::Isotope => "isotope",
            AtomField::Token => "token",
            AtomField::Value => "value",
            AtomField::BatchId => "batchId",
            AtomField::MetaType => "metaType",
            AtomField::MetaId => "metaId",
            AtomField::Meta => "meta",
            AtomField::Index => "index",
            AtomField::CreatedAt => "createdAt",
            AtomField::Version => "version",
        }
    }
}

/// Ordered field schema for version-4 hashing.
const V4_FIELDS: [AtomField; 12] = [
    AtomField::Position,
    AtomField::WalletAddress,
    AtomField::Isotope,
    AtomField::Token,
    AtomField::Value,
    AtomField::BatchId,
    AtomField::MetaType,
    AtomField::MetaId,
    AtomField::Meta,
    AtomField::Index,
    AtomField::CreatedAt,
    AtomField::Version,
];

/// Closed set of hashing rule versions.
///
/// Each variant carries its own ordered field schema; the shared
/// canonicalization routine in [`crate::canonical`] is applied over
/// whichever schema is selected. Historical records hash under the
/// version they were created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HashVersion {
    /// Current rules: the full twelve-field schema.
    #[default]
    V4,
}

impl HashVersion {
    /// The version number as it appears in hashed content.
    pub fn number(&self) -> u16 {
        match self {
            HashVersion::V4 => 4,
        }
    }

    /// Select a version by number.
    pub fn from_number(n: u16) -> Result<Self, AtomError> {
        match n {
            4 => Ok(HashVersion::V4),
            other => Err(AtomError::UnknownHashVersion(other)),
        }
    }

    /// The ordered schema of hashable fields for this version.
    pub fn fields(&self) -> &'static [AtomField] {
        match self {
            HashVersion::V4 => &V4_FIELDS,
        }
    }
}

/// A single ledger record.
///
/// Fields outside the selected [`HashVersion`] schema never enter the
/// hash; fields in the schema that are absent hash as the explicit
/// absent marker (JSON `null`), not as an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Atom {
    pub position: Option<String>,
    pub wallet_address: Option<String>,
    pub isotope: Option<Isotope>,
    pub token: Option<String>,
    pub value: Option<f64>,
    pub batch_id: Option<String>,
    pub meta_type: Option<String>,
    pub meta_id: Option<String>,
    /// Free-form key/value payload; canonicalized recursively.
    pub meta: Option<Value>,
    pub index: Option<u64>,
    /// Milliseconds since the Unix epoch.
    pub created_at: Option<i64>,
    #[serde(default)]
    pub version: HashVersion,
}

impl Atom {
    /// Start an atom of the given kind under the current hash version,
    /// stamped with the current wall-clock time.
    pub fn new(isotope: Isotope) -> Self {
        Self {
            isotope: Some(isotope),
            created_at: Some(chrono::Utc::now().timestamp_millis()),
            ..Self::default()
        }
    }

    /// Copy the recognized schema fields off an arbitrary atom-like JSON
    /// object.
    ///
    /// Only fields in the version's schema are read; anything else in
    /// the source is ignored so unknown fields cannot leak into a hash.
    /// Schema fields missing from the source stay absent.
    pub fn from_value(source: &Value, version: HashVersion) -> Result<Self, AtomError> {
        let map = source.as_object().ok_or(AtomError::SourceNotAnObject)?;

        let mut atom = Atom {
            version,
            ..Self::default()
        };
        for field in version.fields() {
            let Some(value) = map.get(field.name()) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            match field {
                AtomField::Position => atom.position = value.as_str().map(str::to_owned),
                AtomField::WalletAddress => {
                    atom.wallet_address = value.as_str().map(str::to_owned)
                }
                AtomField::Isotope => {
                    if let Some(code) = value.as_str().and_then(|s| s.chars().next()) {
                        atom.isotope = Some(Isotope::from_code(code)?);
                    }
                }
                AtomField::Token => atom.token = value.as_str().map(str::to_owned),
                AtomField::Value => atom.value = value.as_f64(),
                AtomField::BatchId => atom.batch_id = value.as_str().map(str::to_owned),
                AtomField::MetaType => atom.meta_type = value.as_str().map(str::to_owned),
                AtomField::MetaId => atom.meta_id = value.as_str().map(str::to_owned),
                AtomField::Meta => atom.meta = Some(value.clone()),
                AtomField::Index => atom.index = value.as_u64(),
                AtomField::CreatedAt => atom.created_at = value.as_i64(),
                // The schema's own version field never overrides the
                // explicitly selected strategy.
                AtomField::Version => {}
            }
        }
        Ok(atom)
    }

    /// The raw (pre-canonicalization) value of a schema field.
    ///
    /// Absent fields are the explicit absent marker, JSON `null`.
    pub fn field(&self, field: AtomField) -> Value {
        fn opt_str(v: &Option<String>) -> Value {
            v.as_ref().map_or(Value::Null, |s| Value::from(s.as_str()))
        }
        match field {
            AtomField::Position => opt_str(&self.position),
            AtomField::WalletAddress => opt_str(&self.wallet_address),
            AtomField::Isotope => self
                .isotope
                .map_or(Value::Null, |i| Value::from(i.code().to_string())),
            AtomField::Token => opt_str(&self.token),
            AtomField::Value => self.value.map_or(Value::Null, Value::from),
            AtomField::BatchId => opt_str(&self.batch_id),
            AtomField::MetaType => opt_str(&self.meta_type),
            AtomField::MetaId => opt_str(&self.meta_id),
            AtomField::Meta => self.meta.clone().unwrap_or(Value::Null),
            AtomField::Index => self.index.map_or(Value::Null, Value::from),
            AtomField::CreatedAt => self.created_at.map_or(Value::Null, Value::from),
            AtomField::Version => Value::from(self.version.number()),
        }
    }

    /// The ordered canonical representation a hash function consumes.
    ///
    /// Exactly the version's schema fields, in schema order, each value
    /// canonicalized by [`structure`]. Represented as an array of
    /// single-key wrapper objects so field order survives any encoder.
    pub fn view(&self) -> Value {
        let wrapped = self
            .version
            .fields()
            .iter()
            .map(|field| {
                let mut wrapper = Map::with_capacity(1);
                wrapper.insert(field.name().to_owned(), structure(&self.field(*field)));
                Value::Object(wrapper)
            })
            .collect();
        Value::Array(wrapped)
    }

    /// Digest the canonical view with the default hash primitive.
    ///
    /// Serializes [`Atom::view`] to its JSON text form and hashes it with
    /// BLAKE3, returning lowercase hex. Callers that need a different
    /// primitive can consume [`Atom::view`] directly.
    pub fn molecular_hash(&self) -> Result<String, AtomError> {
        let encoded = serde_json::to_string(&self.view())
            .map_err(|e| AtomError::Serialization(e.to_string()))?;
        let digest = blake3::hash(encoded.as_bytes());
        Ok(codec::encode(digest.as_bytes(), &EncodeOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_atom() -> Atom {
        Atom {
            position: Some("aabbcc".into()),
            wallet_address: Some("ddeeff".into()),
            isotope: Some(Isotope::V),
            token: Some("USER".into()),
            value: Some(10.0),
            meta: Some(json!({"b": "2", "a": "1"})),
            index: Some(0),
            created_at: Some(1_700_000_000_000),
            ..Atom::default()
        }
    }

    #[test]
    fn isotope_code_roundtrip() {
        for iso in [
            Isotope::C,
            Isotope::I,
            Isotope::M,
            Isotope::R,
            Isotope::T,
            Isotope::U,
            Isotope::V,
        ] {
            assert_eq!(Isotope::from_code(iso.code()).unwrap(), iso);
        }
    }

    #[test]
    fn isotope_lowercase_accepted() {
        assert_eq!(Isotope::from_code('v').unwrap(), Isotope::V);
    }

    #[test]
    fn isotope_unknown_rejected() {
        assert_eq!(
            Isotope::from_code('X').unwrap_err(),
            AtomError::UnknownIsotope('X')
        );
    }

    #[test]
    fn hash_version_number_roundtrip() {
        assert_eq!(HashVersion::from_number(4).unwrap(), HashVersion::V4);
        assert_eq!(HashVersion::V4.number(), 4);
        assert_eq!(
            HashVersion::from_number(3).unwrap_err(),
            AtomError::UnknownHashVersion(3)
        );
    }

    #[test]
    fn v4_schema_order() {
        let names: Vec<&str> = HashVersion::V4.fields().iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            [
                "position",
                "walletAddress",
                "isotope",
                "token",
                "value",
                "batchId",
                "metaType",
                "metaId",
                "meta",
                "index",
                "createdAt",
                "version",
            ]
        );
    }

    #[test]
    fn view_covers_full_schema_in_order() {
        let atom = sample_atom();
        let view = atom.view();
        let items = view.as_array().unwrap();
        assert_eq!(items.len(), 12);
        for (item, field) in items.iter().zip(HashVersion::V4.fields()) {
            let obj = item.as_object().unwrap();
            assert_eq!(obj.len(), 1);
            assert!(obj.contains_key(field.name()), "missing {}", field.name());
        }
    }

    #[test]
    fn view_absent_fields_are_null() {
        let atom = Atom::default();
        let view = atom.view();
        let first = &view.as_array().unwrap()[0];
        assert_eq!(first["position"], Value::Null);
    }

    #[test]
    fn view_canonicalizes_meta() {
        let atom = sample_atom();
        let view = atom.view();
        let meta = &view.as_array().unwrap()[8]["meta"];
        assert_eq!(meta, &json!([{"a": "1"}, {"b": "2"}]));
    }

    #[test]
    fn view_independent_of_meta_insertion_order() {
        let mut a = sample_atom();
        let mut b = sample_atom();
        a.meta = Some(json!({"x": 1, "y": 2}));
        b.meta = Some(serde_json::from_str(r#"{"y": 2, "x": 1}"#).unwrap());
        assert_eq!(a.view(), b.view());
        assert_eq!(a.molecular_hash().unwrap(), b.molecular_hash().unwrap());
    }

    #[test]
    fn molecular_hash_deterministic() {
        let atom = sample_atom();
        assert_eq!(
            atom.molecular_hash().unwrap(),
            atom.molecular_hash().unwrap()
        );
        assert_eq!(atom.molecular_hash().unwrap().len(), 64);
    }

    #[test]
    fn molecular_hash_changes_with_content() {
        let a = sample_atom();
        let mut b = sample_atom();
        b.value = Some(11.0);
        assert_ne!(a.molecular_hash().unwrap(), b.molecular_hash().unwrap());
    }

    #[test]
    fn from_value_copies_schema_fields() {
        let source = json!({
            "position": "aa",
            "walletAddress": "bb",
            "isotope": "U",
            "token": "USER",
            "value": 10,
            "index": 2,
            "createdAt": 1_700_000_000_000i64,
        });
        let atom = Atom::from_value(&source, HashVersion::V4).unwrap();
        assert_eq!(atom.position.as_deref(), Some("aa"));
        assert_eq!(atom.isotope, Some(Isotope::U));
        assert_eq!(atom.value, Some(10.0));
        assert_eq!(atom.index, Some(2));
        assert_eq!(atom.created_at, Some(1_700_000_000_000));
    }

    #[test]
    fn from_value_ignores_unknown_fields() {
        let source = json!({
            "position": "aa",
            "secretLeak": "must never be read",
        });
        let atom = Atom::from_value(&source, HashVersion::V4).unwrap();
        let encoded = serde_json::to_string(&atom.view()).unwrap();
        assert!(!encoded.contains("secretLeak"));
        assert!(!encoded.contains("must never be read"));
    }

    #[test]
    fn from_value_missing_fields_default_absent() {
        let atom = Atom::from_value(&json!({}), HashVersion::V4).unwrap();
        assert_eq!(atom.position, None);
        assert_eq!(atom.isotope, None);
        assert_eq!(atom.field(AtomField::Token), Value::Null);
    }

    #[test]
    fn from_value_rejects_non_object() {
        assert_eq!(
            Atom::from_value(&json!([1, 2]), HashVersion::V4).unwrap_err(),
            AtomError::SourceNotAnObject
        );
    }

    #[test]
    fn from_value_rejects_bad_isotope() {
        let source = json!({"isotope": "Q"});
        assert_eq!(
            Atom::from_value(&source, HashVersion::V4).unwrap_err(),
            AtomError::UnknownIsotope('Q')
        );
    }

    #[test]
    fn construction_order_does_not_affect_hash() {
        // Same content assigned in different orders must hash identically.
        let mut a = Atom::new(Isotope::U);
        a.created_at = Some(1_700_000_000_000);
        a.position = Some("p".into());
        a.token = Some("USER".into());

        let mut b = Atom::default();
        b.token = Some("USER".into());
        b.position = Some("p".into());
        b.isotope = Some(Isotope::U);
        b.created_at = Some(1_700_000_000_000);

        assert_eq!(a.molecular_hash().unwrap(), b.molecular_hash().unwrap());
    }
}
