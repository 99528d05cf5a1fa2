//! Leaf type definitions for schema field modeling.
//!
//! This module defines the core data model used to represent scalar
//! ("leaf") schema fields. The types are designed for serialization with
//! [`serde`] and can round-trip through JSON and other storage backends.
//! All per-kind metadata is a pure function of [`LeafKind`], so adding a
//! new kind means one new variant plus one arm in each metadata table.

use serde::{Deserialize, Serialize};

/// Concrete kind of a leaf field.
///
/// Each kind fixes the field's validation rule and its type tags in every
/// export target. The metadata accessors are exhaustive matches: kinds
/// carry no runtime state of their own.
///
/// # Examples
///
/// ```
/// use field_schema::LeafKind;
///
/// assert_eq!(LeafKind::Long.index_type(), "long");
/// assert_eq!(LeafKind::Long.bit_width(), Some(64));
/// assert_eq!(LeafKind::ALL.len(), 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeafKind {
    /// English prose, analyzed with the standard analyzer.
    EnglishString,
    /// Free text analyzed with the simple analyzer.
    AnalyzedString,
    /// Opaque text stored verbatim (not analyzed).
    PlainString,
    /// Dotted-quad IPv4 address.
    IPv4Address,
    /// 8-bit integer.
    Byte,
    /// 16-bit integer.
    Short,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    Long,
    /// Single-precision floating point.
    Float,
    /// Double-precision floating point.
    Double,
    /// Boolean.
    Boolean,
    /// Base64-encoded bytes, excluded from the index.
    Binary,
    /// Base64-encoded bytes, indexed verbatim.
    IndexedBinary,
    /// Timestamp in any parseable textual form.
    DateTime,
}

/// Index mode for text and binary kinds.
///
/// Controls how a search index stores the field. Kinds that are not
/// text-like declare no index mode at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    /// Tokenized through an analyzer before indexing.
    Analyzed,
    /// Indexed as a single verbatim term.
    NotAnalyzed,
    /// Stored but not indexed.
    No,
}

impl IndexMode {
    /// Returns the wire spelling used in index mappings.
    pub fn as_str(self) -> &'static str {
        match self {
            IndexMode::Analyzed => "analyzed",
            IndexMode::NotAnalyzed => "not_analyzed",
            IndexMode::No => "no",
        }
    }
}

/// Analyzer applied to analyzed text kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Analyzer {
    /// Full-featured tokenizer for natural language.
    Standard,
    /// Lowercasing tokenizer splitting on non-letters.
    Simple,
}

impl Analyzer {
    /// Returns the wire spelling used in index mappings.
    pub fn as_str(self) -> &'static str {
        match self {
            Analyzer::Standard => "standard",
            Analyzer::Simple => "simple",
        }
    }
}

/// Column type in the warehouse schema target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarehouseType {
    String,
    Integer,
    Double,
    Float,
    Boolean,
    Timestamp,
}

impl WarehouseType {
    /// Returns the spelling used in warehouse schema fields.
    pub fn as_str(self) -> &'static str {
        match self {
            WarehouseType::String => "STRING",
            WarehouseType::Integer => "INTEGER",
            WarehouseType::Double => "DOUBLE",
            WarehouseType::Float => "FLOAT",
            WarehouseType::Boolean => "BOOLEAN",
            WarehouseType::Timestamp => "TIMESTAMP",
        }
    }
}

/// Shape of a runtime value, as used in type checks and mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueClass {
    /// Strings of any flavor.
    Textual,
    /// Whole numbers.
    Integral,
    /// Floating-point numbers.
    Floating,
    /// Booleans.
    Boolean,
}

impl std::fmt::Display for ValueClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ValueClass::Textual => "textual",
            ValueClass::Integral => "integral",
            ValueClass::Floating => "floating",
            ValueClass::Boolean => "boolean",
        };
        f.write_str(s)
    }
}

/// A runtime value submitted for validation against a [`Leaf`].
///
/// Integers are carried as `i128` so that every integer kind's full range
/// is exactly representable, including the 64-bit boundaries at
/// `±(2^64 - 1)`.
///
/// # Examples
///
/// ```
/// use field_schema::{Value, ValueClass};
///
/// assert_eq!(Value::from("asdf").class(), ValueClass::Textual);
/// assert_eq!(Value::from(34).class(), ValueClass::Integral);
/// assert_eq!(Value::from(10.0).class(), ValueClass::Floating);
/// assert_eq!(Value::from(true).class(), ValueClass::Boolean);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i128),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Returns the class this value belongs to.
    pub fn class(&self) -> ValueClass {
        match self {
            Value::Text(_) => ValueClass::Textual,
            Value::Int(_) => ValueClass::Integral,
            Value::Float(_) => ValueClass::Floating,
            Value::Bool(_) => ValueClass::Boolean,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i128::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i128::from(i))
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        Value::Int(i128::from(i))
    }
}

impl From<i128> for Value {
    fn from(i: i128) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

const TEXTUAL: &[ValueClass] = &[ValueClass::Textual];
const INTEGRAL: &[ValueClass] = &[ValueClass::Integral];
const FLOATING: &[ValueClass] = &[ValueClass::Floating];
const BOOLEAN: &[ValueClass] = &[ValueClass::Boolean];
const TEXTUAL_OR_INTEGRAL: &[ValueClass] = &[ValueClass::Textual, ValueClass::Integral];

impl LeafKind {
    /// Catalogue of every concrete leaf kind, in declaration order.
    ///
    /// Exposed for tooling that enumerates supported types (documentation
    /// generation, exhaustiveness checks).
    pub const ALL: [LeafKind; 14] = [
        LeafKind::EnglishString,
        LeafKind::AnalyzedString,
        LeafKind::PlainString,
        LeafKind::IPv4Address,
        LeafKind::Byte,
        LeafKind::Short,
        LeafKind::Integer,
        LeafKind::Long,
        LeafKind::Float,
        LeafKind::Double,
        LeafKind::Boolean,
        LeafKind::Binary,
        LeafKind::IndexedBinary,
        LeafKind::DateTime,
    ];

    /// Returns the kind name used in definition and flattened-doc exports.
    pub fn name(self) -> &'static str {
        match self {
            LeafKind::EnglishString => "EnglishString",
            LeafKind::AnalyzedString => "AnalyzedString",
            LeafKind::PlainString => "PlainString",
            LeafKind::IPv4Address => "IPv4Address",
            LeafKind::Byte => "Byte",
            LeafKind::Short => "Short",
            LeafKind::Integer => "Integer",
            LeafKind::Long => "Long",
            LeafKind::Float => "Float",
            LeafKind::Double => "Double",
            LeafKind::Boolean => "Boolean",
            LeafKind::Binary => "Binary",
            LeafKind::IndexedBinary => "IndexedBinary",
            LeafKind::DateTime => "DateTime",
        }
    }

    /// Returns the type tag used in the search-index mapping target.
    pub fn index_type(self) -> &'static str {
        match self {
            LeafKind::EnglishString | LeafKind::AnalyzedString | LeafKind::PlainString => "string",
            LeafKind::IPv4Address => "ip",
            LeafKind::Byte => "byte",
            LeafKind::Short => "short",
            LeafKind::Integer => "integer",
            LeafKind::Long => "long",
            LeafKind::Float => "float",
            LeafKind::Double => "double",
            LeafKind::Boolean => "boolean",
            LeafKind::Binary | LeafKind::IndexedBinary => "binary",
            LeafKind::DateTime => "datetime",
        }
    }

    /// Returns the column type used in the warehouse schema target.
    ///
    /// `Long` maps to `DOUBLE` rather than `INTEGER`, and `Double` maps to
    /// `FLOAT`: both are long-standing precision tradeoffs that existing
    /// schema consumers depend on, kept as-is.
    pub fn warehouse_type(self) -> WarehouseType {
        match self {
            LeafKind::EnglishString
            | LeafKind::AnalyzedString
            | LeafKind::PlainString
            | LeafKind::IPv4Address
            | LeafKind::Binary
            | LeafKind::IndexedBinary => WarehouseType::String,
            LeafKind::Byte | LeafKind::Short | LeafKind::Integer => WarehouseType::Integer,
            LeafKind::Long => WarehouseType::Double,
            LeafKind::Float | LeafKind::Double => WarehouseType::Float,
            LeafKind::Boolean => WarehouseType::Boolean,
            LeafKind::DateTime => WarehouseType::Timestamp,
        }
    }

    /// Returns the set of value classes this kind accepts.
    pub fn expected_classes(self) -> &'static [ValueClass] {
        match self {
            LeafKind::EnglishString
            | LeafKind::AnalyzedString
            | LeafKind::PlainString
            | LeafKind::IPv4Address
            | LeafKind::Binary
            | LeafKind::IndexedBinary => TEXTUAL,
            LeafKind::Byte | LeafKind::Short | LeafKind::Integer | LeafKind::Long => INTEGRAL,
            LeafKind::Float | LeafKind::Double => FLOATING,
            LeafKind::Boolean => BOOLEAN,
            LeafKind::DateTime => TEXTUAL_OR_INTEGRAL,
        }
    }

    /// Returns the index mode this kind declares by default, if any.
    pub fn default_index_mode(self) -> Option<IndexMode> {
        match self {
            LeafKind::EnglishString | LeafKind::AnalyzedString => Some(IndexMode::Analyzed),
            LeafKind::PlainString | LeafKind::IndexedBinary => Some(IndexMode::NotAnalyzed),
            LeafKind::Binary => Some(IndexMode::No),
            _ => None,
        }
    }

    /// Returns the analyzer this kind declares by default, if any.
    pub fn default_analyzer(self) -> Option<Analyzer> {
        match self {
            LeafKind::EnglishString => Some(Analyzer::Standard),
            LeafKind::AnalyzedString => Some(Analyzer::Simple),
            _ => None,
        }
    }

    /// Returns the bit width for integer kinds, `None` otherwise.
    ///
    /// A width `w` accepts the inclusive range `[-2^w + 1, 2^w - 1]`. The
    /// lower bound is intentionally asymmetric (one more than the two's
    /// complement minimum); existing consumers rely on it.
    pub fn bit_width(self) -> Option<u32> {
        match self {
            LeafKind::Byte => Some(8),
            LeafKind::Short => Some(16),
            LeafKind::Integer => Some(32),
            LeafKind::Long => Some(64),
            _ => None,
        }
    }
}

/// Definition of a single scalar schema field.
///
/// A leaf pairs a [`LeafKind`] with instance-level configuration: the
/// required flag, an optional documentation string, and optional overrides
/// of the kind's index mode and analyzer. Leaves are immutable after
/// construction and freely shareable; validation and export never mutate.
///
/// # Examples
///
/// ```
/// use field_schema::{IndexMode, Leaf, LeafKind, Value};
///
/// let ip = Leaf::required(LeafKind::IPv4Address)
///     .with_doc("Address the probe responded from");
///
/// assert!(ip.validate("ip", Some(&Value::from("141.212.120.0"))).is_ok());
/// assert!(ip.validate("ip", None).is_err());
///
/// let raw = Leaf::optional(LeafKind::PlainString).with_index_mode(IndexMode::No);
/// assert_eq!(raw.resolved_index_mode(), Some(IndexMode::No));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Concrete kind, fixing validation and export metadata.
    pub kind: LeafKind,
    /// Whether an absent value is a validation error.
    pub required: bool,
    /// Documentation string carried into exports.
    pub doc: Option<String>,
    /// Index mode override. Only meaningful for kinds that declare one;
    /// on any other kind it is ignored at export time.
    pub index_mode: Option<IndexMode>,
    /// Analyzer override. Only meaningful for kinds that declare one.
    pub analyzer: Option<Analyzer>,
}

impl Leaf {
    /// Creates an optional leaf of the given kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use field_schema::{Leaf, LeafKind};
    ///
    /// let leaf = Leaf::optional(LeafKind::Boolean);
    /// assert!(!leaf.required);
    /// assert!(leaf.validate("flag", None).is_ok());
    /// ```
    pub fn optional(kind: LeafKind) -> Self {
        Self {
            kind,
            required: false,
            doc: None,
            index_mode: None,
            analyzer: None,
        }
    }

    /// Creates a required leaf of the given kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use field_schema::{Leaf, LeafKind};
    ///
    /// let leaf = Leaf::required(LeafKind::Boolean);
    /// assert!(leaf.validate("flag", None).is_err());
    /// ```
    pub fn required(kind: LeafKind) -> Self {
        Self {
            required: true,
            ..Self::optional(kind)
        }
    }

    /// Adds a documentation string.
    pub fn with_doc(mut self, doc: &str) -> Self {
        self.doc = Some(doc.to_string());
        self
    }

    /// Overrides the kind's default index mode.
    pub fn with_index_mode(mut self, mode: IndexMode) -> Self {
        self.index_mode = Some(mode);
        self
    }

    /// Overrides the kind's default analyzer.
    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Returns the effective index mode: the override if set, else the
    /// kind's default. `None` when the kind declares no index mode.
    pub fn resolved_index_mode(&self) -> Option<IndexMode> {
        self.kind
            .default_index_mode()
            .map(|default| self.index_mode.unwrap_or(default))
    }

    /// Returns the effective analyzer: the override if set, else the
    /// kind's default. `None` when the kind declares no analyzer.
    pub fn resolved_analyzer(&self) -> Option<Analyzer> {
        self.kind
            .default_analyzer()
            .map(|default| self.analyzer.unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_covers_every_kind_once() {
        for (i, a) in LeafKind::ALL.iter().enumerate() {
            for b in &LeafKind::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_kind_metadata_table() {
        assert_eq!(LeafKind::IPv4Address.index_type(), "ip");
        assert_eq!(LeafKind::IPv4Address.warehouse_type(), WarehouseType::String);
        assert_eq!(LeafKind::Long.warehouse_type(), WarehouseType::Double);
        assert_eq!(LeafKind::Double.warehouse_type(), WarehouseType::Float);
        assert_eq!(LeafKind::DateTime.warehouse_type(), WarehouseType::Timestamp);
        assert_eq!(LeafKind::Byte.bit_width(), Some(8));
        assert_eq!(LeafKind::Float.bit_width(), None);
    }

    #[test]
    fn test_index_mode_declared_only_for_text_and_binary_kinds() {
        let declared = [
            LeafKind::EnglishString,
            LeafKind::AnalyzedString,
            LeafKind::PlainString,
            LeafKind::Binary,
            LeafKind::IndexedBinary,
        ];
        for kind in LeafKind::ALL {
            assert_eq!(
                kind.default_index_mode().is_some(),
                declared.contains(&kind),
                "index mode declaration mismatch for {}",
                kind.name()
            );
        }
    }

    #[test]
    fn test_resolved_attributes_prefer_override() {
        let leaf = Leaf::optional(LeafKind::EnglishString)
            .with_index_mode(IndexMode::NotAnalyzed)
            .with_analyzer(Analyzer::Simple);
        assert_eq!(leaf.resolved_index_mode(), Some(IndexMode::NotAnalyzed));
        assert_eq!(leaf.resolved_analyzer(), Some(Analyzer::Simple));
    }

    #[test]
    fn test_override_on_undeclared_kind_resolves_to_none() {
        let leaf = Leaf::optional(LeafKind::Integer).with_index_mode(IndexMode::Analyzed);
        assert_eq!(leaf.resolved_index_mode(), None);
        assert_eq!(leaf.resolved_analyzer(), None);
    }

    #[test]
    fn test_leaf_round_trips_through_json() {
        let leaf = Leaf::required(LeafKind::AnalyzedString).with_doc("free text");
        let json = serde_json::to_string(&leaf).unwrap();
        let back: Leaf = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, LeafKind::AnalyzedString);
        assert!(back.required);
        assert_eq!(back.doc.as_deref(), Some("free text"));
    }
}
