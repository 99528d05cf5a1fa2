//! Export projections from leaf definitions to target representations.
//!
//! Each projection is a total, pure function over a [`Leaf`]: given a leaf
//! that was constructed successfully, it cannot fail, mutates nothing, and
//! yields the same output on every call. Projections return
//! [`serde_json::Map`] so callers can serialize them directly; key order is
//! insertion order.

use serde_json::{Map, Value as Json, json};

use crate::{Analyzer, IndexMode, Leaf};

/// All index modes any kind may declare or be overridden to.
pub const ALLOWED_INDEX_MODES: [IndexMode; 3] =
    [IndexMode::Analyzed, IndexMode::NotAnalyzed, IndexMode::No];

/// All analyzers any kind may declare or be overridden to.
pub const ALLOWED_ANALYZERS: [Analyzer; 2] = [Analyzer::Standard, Analyzer::Simple];

/// Pluggable naming convention for target identifiers.
///
/// Supplied by the surrounding schema-composition layer; the core only
/// calls through it. The default methods pass names through unchanged.
pub trait NameFormat {
    /// Formats a declared field name for the warehouse schema target.
    fn warehouse_name(&self, name: &str) -> String {
        name.to_string()
    }

    /// Formats a declared field name for human-readable display.
    fn display_name(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Identity naming: declared names are used verbatim in every target.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNames;

impl NameFormat for IdentityNames {}

impl Leaf {
    /// Projects the leaf into its self-describing definition record.
    ///
    /// Keys: `required`, `doc`, `type`, `index_type_tag`,
    /// `warehouse_type_tag`, then `analyzer` / `index_mode` when the kind
    /// declares them. Used for introspection and round-tripping the schema
    /// itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use field_schema::{Leaf, LeafKind};
    ///
    /// let def = Leaf::required(LeafKind::EnglishString).to_definition();
    /// assert_eq!(def["type"], "EnglishString");
    /// assert_eq!(def["analyzer"], "standard");
    /// assert_eq!(def["index_mode"], "analyzed");
    /// ```
    pub fn to_definition(&self) -> Map<String, Json> {
        let mut out = Map::new();
        out.insert("required".to_string(), json!(self.required));
        out.insert("doc".to_string(), json!(self.doc));
        out.insert("type".to_string(), json!(self.kind.name()));
        out.insert("index_type_tag".to_string(), json!(self.kind.index_type()));
        out.insert(
            "warehouse_type_tag".to_string(),
            json!(self.kind.warehouse_type().as_str()),
        );
        if let Some(analyzer) = self.resolved_analyzer() {
            out.insert("analyzer".to_string(), json!(analyzer.as_str()));
        }
        if let Some(mode) = self.resolved_index_mode() {
            out.insert("index_mode".to_string(), json!(mode.as_str()));
        }
        out
    }

    /// Projects the leaf into a search-index field mapping.
    ///
    /// `index` and `analyzer` appear only for kinds that declare them.
    ///
    /// # Panics
    ///
    /// Panics if the emitted index mode or analyzer falls outside
    /// [`ALLOWED_INDEX_MODES`] / [`ALLOWED_ANALYZERS`]. That is a schema
    /// authoring bug, not a data error, and must not be reported as a
    /// per-record validation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use field_schema::{Leaf, LeafKind};
    ///
    /// let mapping = Leaf::optional(LeafKind::Binary).to_index_mapping();
    /// assert_eq!(mapping["type"], "binary");
    /// assert_eq!(mapping["index"], "no");
    /// assert!(!mapping.contains_key("analyzer"));
    /// ```
    pub fn to_index_mapping(&self) -> Map<String, Json> {
        let mut out = Map::new();
        out.insert("type".to_string(), json!(self.kind.index_type()));
        if let Some(mode) = self.resolved_index_mode() {
            assert!(
                ALLOWED_INDEX_MODES.contains(&mode),
                "index mode {} is not an allowed index mode",
                mode.as_str()
            );
            out.insert("index".to_string(), json!(mode.as_str()));
        }
        if let Some(analyzer) = self.resolved_analyzer() {
            assert!(
                ALLOWED_ANALYZERS.contains(&analyzer),
                "analyzer {} is not an allowed analyzer",
                analyzer.as_str()
            );
            out.insert("analyzer".to_string(), json!(analyzer.as_str()));
        }
        out
    }

    /// Projects the leaf into a warehouse schema field.
    ///
    /// # Examples
    ///
    /// ```
    /// use field_schema::{IdentityNames, Leaf, LeafKind};
    ///
    /// let field = Leaf::required(LeafKind::Long).to_warehouse_field("rtt", &IdentityNames);
    /// assert_eq!(field["name"], "rtt");
    /// assert_eq!(field["type"], "DOUBLE");
    /// assert_eq!(field["mode"], "REQUIRED");
    /// ```
    pub fn to_warehouse_field(&self, name: &str, names: &dyn NameFormat) -> Map<String, Json> {
        let mode = if self.required { "REQUIRED" } else { "NULLABLE" };
        let mut out = Map::new();
        out.insert("name".to_string(), json!(names.warehouse_name(name)));
        out.insert(
            "type".to_string(),
            json!(self.kind.warehouse_type().as_str()),
        );
        out.insert("mode".to_string(), json!(mode));
        if let Some(doc) = &self.doc {
            out.insert("doc".to_string(), json!(doc));
        }
        out
    }

    /// Projects the leaf into a flattened documentation record, keyed by
    /// its dotted path.
    ///
    /// # Examples
    ///
    /// ```
    /// use field_schema::{Leaf, LeafKind};
    ///
    /// let flat = Leaf::optional(LeafKind::Boolean).to_flat("p443.tls", "validation");
    /// assert_eq!(flat["name"], "p443.tls.validation");
    /// assert_eq!(flat["type"], "Boolean");
    /// assert_eq!(flat["mode"], "optional");
    /// ```
    pub fn to_flat(&self, parent: &str, name: &str) -> Map<String, Json> {
        let mode = if self.required { "required" } else { "optional" };
        let mut out = Map::new();
        out.insert("name".to_string(), json!(format!("{parent}.{name}")));
        out.insert("type".to_string(), json!(self.kind.name()));
        out.insert("documentation".to_string(), json!(self.doc));
        out.insert("mode".to_string(), json!(mode));
        out
    }

    /// Renders the leaf as a single display line.
    ///
    /// # Examples
    ///
    /// ```
    /// use field_schema::{IdentityNames, Leaf, LeafKind};
    ///
    /// let line = Leaf::optional(LeafKind::IPv4Address).to_display("saddr", &IdentityNames);
    /// assert_eq!(line, "saddr: ipv4address");
    /// ```
    pub fn to_display(&self, name: &str, names: &dyn NameFormat) -> String {
        format!(
            "{}: {}",
            names.display_name(name),
            self.kind.name().to_lowercase()
        )
    }

    /// Renders the display line indented by `depth` tabs, for nested
    /// schema listings.
    pub fn to_display_indented(&self, name: &str, depth: usize, names: &dyn NameFormat) -> String {
        format!("{}{}", "\t".repeat(depth), self.to_display(name, names))
    }
}
