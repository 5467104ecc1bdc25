//! Typed value conversion.
//!
//! # Data Flow
//! ```text
//! captured raw string ─┐
//!                      ├→ ValueType::parse(options, raw)  → Value
//! ValueOptions ────────┘
//!
//! Value → ValueType::format(options, value) → string → RoutePattern::render
//! ```
//!
//! # Design Decisions
//! - Per-placeholder settings (date format) are passed explicitly as
//!   `ValueOptions`, never looked up from ambient state
//! - The registry is built once, extended before it is shared, then read-only
//! - `Value` is a closed set of builtin variants plus an opaque `Custom` slot
//!   for registered extension types

pub mod builtin;
pub mod registry;

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use thiserror::Error;

pub use builtin::{
    BooleanType, ByteType, DateType, DoubleType, FloatType, IntegerType, LongType, ShortType,
    StringType, DEFAULT_DATE_FORMAT,
};
pub use registry::ValueTypeRegistry;

/// Errors raised while converting between strings and typed values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueError {
    /// The input string is not a valid representation of the type.
    #[error("cannot parse `{input}` as {type_name}: {reason}")]
    Parse {
        type_name: String,
        input: String,
        reason: String,
    },

    /// A value of the wrong variant was handed to `format`.
    #[error("expected a {expected} value, got {actual}")]
    Mismatch {
        expected: String,
        actual: &'static str,
    },

    /// The configured format string is not usable.
    #[error("invalid format `{format}`")]
    InvalidFormat { format: String },
}

/// Result type for value conversions.
pub type ValueResult<T> = Result<T, ValueError>;

/// Explicit per-placeholder conversion settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueOptions {
    /// Format string for types that need one (dates use `chrono` strftime syntax).
    pub format: Option<String>,
}

impl ValueOptions {
    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
        }
    }
}

/// A bidirectional string conversion for one semantic type.
pub trait ValueType: Send + Sync + fmt::Debug {
    /// Canonical type name, e.g. `"int"`.
    fn name(&self) -> &str;

    /// Other names this type answers to in lookups, e.g. `["i32", "integer"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Parse a raw string.
    fn parse(&self, options: &ValueOptions, raw: &str) -> ValueResult<Value>;

    /// Format a value back into its string form.
    fn format(&self, options: &ValueOptions, value: &Value) -> ValueResult<String>;

    /// Check that `options` are usable with this type. Called once at
    /// route construction so bad formats fail early.
    fn check_options(&self, _options: &ValueOptions) -> ValueResult<()> {
        Ok(())
    }

    /// Returns true if `name` is the canonical name or an alias.
    fn answers_to(&self, name: &str) -> bool {
        self.name() == name || self.aliases().iter().any(|a| *a == name)
    }
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Date(NaiveDateTime),
    Custom(CustomValue),
}

impl Value {
    /// Short variant label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Byte(_) => "byte",
            Value::Short(_) => "short",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Bool(_) => "boolean",
            Value::Date(_) => "date",
            Value::Custom(_) => "custom",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Any integer variant, widened.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(v) => Some(v.into()),
            Value::Short(v) => Some(v.into()),
            Value::Int(v) => Some(v.into()),
            Value::Long(v) => Some(v),
            _ => None,
        }
    }

    /// Any floating-point variant, widened.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v.into()),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match *self {
            Value::Date(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the payload of a `Custom` value as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom(c) => c.downcast_ref(),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Date(v)
    }
}

impl From<CustomValue> for Value {
    fn from(v: CustomValue) -> Self {
        Value::Custom(v)
    }
}

/// Payload produced by an extension [`ValueType`].
///
/// Serialises through its `Display` form. Two custom values are equal when
/// they hold the same Rust type and display identically.
#[derive(Clone)]
pub struct CustomValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    display: String,
}

impl CustomValue {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync + fmt::Display,
    {
        Self {
            display: value.to_string(),
            type_id: TypeId::of::<T>(),
            inner: Arc::new(value),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// The `Display` rendering captured at construction.
    pub fn as_display(&self) -> &str {
        &self.display
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomValue").field(&self.display).finish()
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.display == other.display
    }
}

impl Serialize for CustomValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug, PartialEq)]
    struct Slug(String);

    impl fmt::Display for Slug {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from(7i8).as_i64(), Some(7));
        assert_eq!(Value::from(7i64).as_i64(), Some(7));
        assert_eq!(Value::from(1.5f32).as_f64(), Some(1.5));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from("x").as_i64(), None);
        assert_eq!(Value::from(3i16).kind(), "short");
    }

    #[test]
    fn test_custom_value() {
        let v = Value::from(CustomValue::new(Slug("hello-world".into())));
        assert_eq!(v.downcast_ref::<Slug>(), Some(&Slug("hello-world".into())));
        assert!(v.downcast_ref::<String>().is_none());
        assert_eq!(v, Value::from(CustomValue::new(Slug("hello-world".into()))));
        assert_ne!(v, Value::from(CustomValue::new("hello-world".to_string())));
    }

    #[test]
    fn test_serialize() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let values = vec![
            Value::from("a"),
            Value::from(42i32),
            Value::from(false),
            Value::from(date),
            Value::from(CustomValue::new(Slug("s".into()))),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"["a",42,false,"2024-03-09T00:00:00","s"]"#);
    }

    #[test]
    fn test_error_display() {
        let err = ValueError::Parse {
            type_name: "int".into(),
            input: "7a".into(),
            reason: "invalid digit found in string".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot parse `7a` as int: invalid digit found in string"
        );
    }
}
