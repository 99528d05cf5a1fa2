//! Value validation against leaf definitions.
//!
//! Validation is two-tiered: a generic pass (required check, then value
//! class check) shared by every kind, followed by a kind-specific
//! refinement where one exists. Adding a new kind never touches the
//! shared pass.
//!
//! # Examples
//!
//! ```
//! use field_schema::{Leaf, LeafKind, Value, ValidationError};
//!
//! let port = Leaf::required(LeafKind::Short);
//! assert!(port.validate("port", Some(&Value::from(443))).is_ok());
//!
//! let err = port.validate("port", None).unwrap_err();
//! assert!(matches!(err, ValidationError::RequiredFieldMissing { .. }));
//!
//! let err = port.validate("port", Some(&Value::from(1 << 20))).unwrap_err();
//! assert!(matches!(err, ValidationError::FormatViolation { .. }));
//! ```

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use thiserror::Error;

use crate::{Leaf, LeafKind, Value, ValueClass};

// Start-anchored only, and no per-octet range check: historical behavior
// that existing schema consumers depend on.
static IPV4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}").expect("static regex must compile"));

static BASE64_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$")
        .expect("static regex must compile")
});

/// Set of value classes a kind accepts, as carried in mismatch errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSet(pub &'static [ValueClass]);

impl std::fmt::Display for ClassSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, class) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{class}")?;
        }
        Ok(())
    }
}

/// Leaf validation errors.
///
/// Every variant is a caller/data-contract violation, never transient:
/// validation is deterministic, so retrying with the same input always
/// reproduces the same outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The field is required but no value was supplied.
    #[error("{field} is a required field, but received no value")]
    RequiredFieldMissing {
        /// Name of the offending field.
        field: String,
    },
    /// The value's runtime class is outside the kind's accepted set.
    #[error("class mismatch for {field}: expected {expected}, {actual_value} has class {actual}")]
    TypeMismatch {
        /// Name of the offending field.
        field: String,
        /// Classes the kind accepts.
        expected: ClassSet,
        /// Class the value actually had.
        actual: ValueClass,
        /// The value, rendered for the message.
        actual_value: String,
    },
    /// The value passed the class check but failed a kind-specific rule.
    #[error("{field}: {reason}")]
    FormatViolation {
        /// Name of the offending field.
        field: String,
        /// What the kind-specific rule rejected.
        reason: String,
    },
}

impl Leaf {
    /// Validates a candidate value for the field `name`.
    ///
    /// An absent value succeeds unless the leaf is required. A present
    /// value must belong to the kind's accepted classes and satisfy the
    /// kind's refinement, if it has one.
    ///
    /// # Examples
    ///
    /// ```
    /// use field_schema::{Leaf, LeafKind, Value};
    ///
    /// let ip = Leaf::optional(LeafKind::IPv4Address);
    /// assert!(ip.validate("saddr", Some(&Value::from("141.212.120.0"))).is_ok());
    /// assert!(ip.validate("saddr", Some(&Value::from("my string"))).is_err());
    /// assert!(ip.validate("saddr", None).is_ok());
    /// ```
    pub fn validate(&self, name: &str, value: Option<&Value>) -> Result<(), ValidationError> {
        let Some(value) = value else {
            if self.required {
                return Err(ValidationError::RequiredFieldMissing {
                    field: name.to_string(),
                });
            }
            return Ok(());
        };

        let expected = self.kind.expected_classes();
        if !expected.contains(&value.class()) {
            return Err(ValidationError::TypeMismatch {
                field: name.to_string(),
                expected: ClassSet(expected),
                actual: value.class(),
                actual_value: value.to_string(),
            });
        }

        self.refine(name, value)
    }

    /// Applies the kind-specific refinement. Assumes the class check has
    /// already passed.
    fn refine(&self, name: &str, value: &Value) -> Result<(), ValidationError> {
        match self.kind {
            LeafKind::IPv4Address => match value {
                Value::Text(s) if !IPV4_RE.is_match(s) => Err(violation(
                    name,
                    format!("the value {s} is not a valid IPv4 address"),
                )),
                _ => Ok(()),
            },
            LeafKind::Byte | LeafKind::Short | LeafKind::Integer | LeafKind::Long => {
                match (value, self.kind.bit_width()) {
                    (Value::Int(i), Some(width)) => check_range(name, *i, width),
                    _ => Ok(()),
                }
            }
            LeafKind::Binary | LeafKind::IndexedBinary => match value {
                Value::Text(s) if !BASE64_RE.is_match(s) => {
                    Err(violation(name, format!("the value {s} is not valid Base64")))
                }
                _ => Ok(()),
            },
            LeafKind::DateTime => match value {
                Value::Text(s) if !parses_as_timestamp(s) => {
                    Err(violation(name, format!("{s} is not a valid timestamp")))
                }
                // Integral values pass the class check but no integer is a
                // parseable timestamp; historical behavior, kept as-is.
                Value::Int(i) => Err(violation(name, format!("{i} is not a valid timestamp"))),
                _ => Ok(()),
            },
            _ => Ok(()),
        }
    }
}

fn violation(name: &str, reason: String) -> ValidationError {
    ValidationError::FormatViolation {
        field: name.to_string(),
        reason,
    }
}

fn check_range(name: &str, value: i128, width: u32) -> Result<(), ValidationError> {
    let max = (1i128 << width) - 1;
    let min = -(1i128 << width) + 1;
    if value > max {
        return Err(violation(name, format!("{value} is larger than max ({max})")));
    }
    if value < min {
        return Err(violation(name, format!("{value} is smaller than min ({min})")));
    }
    Ok(())
}

/// Tries each supported timestamp layout in turn, most specific first.
fn parses_as_timestamp(text: &str) -> bool {
    let text = text.trim();

    if chrono::DateTime::parse_from_rfc3339(text).is_ok()
        || chrono::DateTime::parse_from_rfc2822(text).is_ok()
    {
        return true;
    }

    const DATETIME_LAYOUTS: &[&str] = &[
        // ctime-style, with and without a zone name
        "%a %b %e %H:%M:%S %Z %Y",
        "%a %b %e %H:%M:%S %Y",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    if DATETIME_LAYOUTS
        .iter()
        .any(|layout| NaiveDateTime::parse_from_str(text, layout).is_ok())
    {
        return true;
    }

    const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%B %d, %Y"];
    DATE_LAYOUTS
        .iter()
        .any(|layout| NaiveDate::parse_from_str(text, layout).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_value_succeeds_iff_not_required() {
        for kind in LeafKind::ALL {
            assert!(Leaf::optional(kind).validate("f", None).is_ok());
            assert_eq!(
                Leaf::required(kind).validate("f", None),
                Err(ValidationError::RequiredFieldMissing {
                    field: "f".to_string()
                })
            );
        }
    }

    #[test]
    fn test_type_mismatch_carries_expected_and_actual() {
        let leaf = Leaf::optional(LeafKind::PlainString);
        let err = leaf.validate("tag", Some(&Value::from(23))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                field: "tag".to_string(),
                expected: ClassSet(&[ValueClass::Textual]),
                actual: ValueClass::Integral,
                actual_value: "23".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "class mismatch for tag: expected textual, 23 has class integral"
        );
    }

    #[test]
    fn test_ipv4_accepts_dotted_quad() {
        let leaf = Leaf::optional(LeafKind::IPv4Address);
        assert!(leaf.validate("ip", Some(&Value::from("141.212.120.0"))).is_ok());
        assert!(leaf.validate("ip", Some(&Value::from("my string"))).is_err());
    }

    #[test]
    fn test_ipv4_is_start_anchored_only() {
        let leaf = Leaf::optional(LeafKind::IPv4Address);
        // Historical behavior: trailing garbage and >255 octets pass.
        assert!(leaf.validate("ip", Some(&Value::from("1.2.3.4.5"))).is_ok());
        assert!(leaf.validate("ip", Some(&Value::from("999.999.999.999"))).is_ok());
        assert!(leaf.validate("ip", Some(&Value::from("x1.2.3.4"))).is_err());
    }

    #[test]
    fn test_integer_range_is_asymmetric() {
        for (kind, width) in [
            (LeafKind::Byte, 8u32),
            (LeafKind::Short, 16),
            (LeafKind::Integer, 32),
            (LeafKind::Long, 64),
        ] {
            let leaf = Leaf::optional(kind);
            let max = (1i128 << width) - 1;
            let min = -(1i128 << width) + 1;
            assert!(leaf.validate("n", Some(&Value::from(max))).is_ok());
            assert!(leaf.validate("n", Some(&Value::from(min))).is_ok());
            assert!(leaf.validate("n", Some(&Value::from(max + 1))).is_err());
            assert!(leaf.validate("n", Some(&Value::from(min - 1))).is_err());
        }
    }

    #[test]
    fn test_byte_and_short_exemplar_bounds() {
        let byte = Leaf::optional(LeafKind::Byte);
        assert!(byte.validate("b", Some(&Value::from(34))).is_ok());
        assert!(byte.validate("b", Some(&Value::from((1 << 8) + 5))).is_err());

        let short = Leaf::optional(LeafKind::Short);
        assert!(short.validate("s", Some(&Value::from(0xFFFF))).is_ok());
        assert!(short.validate("s", Some(&Value::from(1 << 16))).is_err());
    }

    #[test]
    fn test_range_violation_message_names_the_bound() {
        let leaf = Leaf::optional(LeafKind::Byte);
        let err = leaf.validate("b", Some(&Value::from(300))).unwrap_err();
        assert_eq!(err.to_string(), "b: 300 is larger than max (255)");
        let err = leaf.validate("b", Some(&Value::from(-300))).unwrap_err();
        assert_eq!(err.to_string(), "b: -300 is smaller than min (-255)");
    }

    #[test]
    fn test_base64_alphabet_and_padding() {
        let leaf = Leaf::optional(LeafKind::Binary);
        assert!(leaf.validate("blob", Some(&Value::from("03F87824"))).is_ok());
        assert!(leaf.validate("blob", Some(&Value::from("A1b2C3=="))).is_ok());
        assert!(leaf.validate("blob", Some(&Value::from("A1b2C3d"))).is_err());
        assert!(leaf.validate("blob", Some(&Value::from("normal"))).is_err());
    }

    #[test]
    fn test_indexed_binary_shares_the_base64_rule() {
        let leaf = Leaf::optional(LeafKind::IndexedBinary);
        assert!(leaf.validate("blob", Some(&Value::from("03F87824"))).is_ok());
        assert!(leaf.validate("blob", Some(&Value::from("normal"))).is_err());
    }

    #[test]
    fn test_datetime_accepts_common_layouts() {
        let leaf = Leaf::optional(LeafKind::DateTime);
        for ok in [
            "Wed Jul  8 08:52:01 EDT 2015",
            "2015-07-08T08:52:01Z",
            "Wed, 08 Jul 2015 08:52:01 +0000",
            "2015-07-08 08:52:01",
            "2015-07-08",
        ] {
            assert!(
                leaf.validate("ts", Some(&Value::from(ok))).is_ok(),
                "expected {ok:?} to parse"
            );
        }
    }

    #[test]
    fn test_datetime_rejects_impossible_dates() {
        let leaf = Leaf::optional(LeafKind::DateTime);
        for bad in ["Wed DNE 35 08:52:01 EDT 2015", "2015-02-30 10:00:00", "not a date"] {
            assert!(
                leaf.validate("ts", Some(&Value::from(bad))).is_err(),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_datetime_rejects_every_integral_value() {
        let leaf = Leaf::optional(LeafKind::DateTime);
        // Integers are in the accepted class set, so the failure is a
        // format violation rather than a class mismatch.
        for ts in [0i64, 1436359921, -1] {
            assert_eq!(
                leaf.validate("ts", Some(&Value::from(ts))),
                Err(ValidationError::FormatViolation {
                    field: "ts".to_string(),
                    reason: format!("{ts} is not a valid timestamp"),
                })
            );
        }
    }

    #[test]
    fn test_float_and_boolean_have_no_refinement() {
        assert!(Leaf::optional(LeafKind::Float)
            .validate("x", Some(&Value::from(10.0)))
            .is_ok());
        assert!(Leaf::optional(LeafKind::Float)
            .validate("x", Some(&Value::from("I'm a string!")))
            .is_err());
        assert!(Leaf::optional(LeafKind::Boolean)
            .validate("x", Some(&Value::from(true)))
            .is_ok());
        assert!(Leaf::optional(LeafKind::Boolean)
            .validate("x", Some(&Value::from(0)))
            .is_err());
    }
}
