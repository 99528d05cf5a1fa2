//! Core leaf field types, validation, and export projections.
//!
//! This crate defines the scalar ("leaf") building blocks of a structured
//! schema:
//!
//! - [`LeafKind`] — the closed catalogue of concrete leaf kinds (string
//!   variants, sized integers, floats, boolean, binary, IP address,
//!   timestamp), each fixing its validation rule and target type tags.
//! - [`Leaf`] — one declared field: a kind plus instance configuration
//!   (required flag, documentation, index mode/analyzer overrides).
//! - [`Value`] — the runtime value model handed to
//!   [`validate`](Leaf::validate).
//!
//! Validation ([`Leaf::validate`]) applies a shared required/class check
//! and then the kind's refinement, reporting failures as
//! [`ValidationError`].
//!
//! Export projections ([`to_definition`](Leaf::to_definition),
//! [`to_index_mapping`](Leaf::to_index_mapping),
//! [`to_warehouse_field`](Leaf::to_warehouse_field),
//! [`to_flat`](Leaf::to_flat), [`to_display`](Leaf::to_display)) emit the
//! same field in each target representation; naming conventions plug in
//! through [`NameFormat`].
//!
//! # Example
//!
//! ```
//! use field_schema::*;
//!
//! let saddr = Leaf::required(LeafKind::IPv4Address)
//!     .with_doc("Source address of the response");
//!
//! // Validate candidate record values.
//! assert!(saddr.validate("saddr", Some(&Value::from("141.212.120.0"))).is_ok());
//! assert!(saddr.validate("saddr", None).is_err());
//!
//! // Project the same definition into each target.
//! assert_eq!(saddr.to_index_mapping()["type"], "ip");
//! let field = saddr.to_warehouse_field("saddr", &IdentityNames);
//! assert_eq!(field["mode"], "REQUIRED");
//! assert_eq!(saddr.to_display("saddr", &IdentityNames), "saddr: ipv4address");
//! ```

mod export;
mod types;
mod validate;

pub use export::{ALLOWED_ANALYZERS, ALLOWED_INDEX_MODES, IdentityNames, NameFormat};
pub use types::{Analyzer, IndexMode, Leaf, LeafKind, Value, ValueClass, WarehouseType};
pub use validate::{ClassSet, ValidationError};
