//! Builtin value types.
//!
//! | Type | Names | Parse | Format |
//! |---|---|---|---|
//! | string | `string`, `str` | identity | identity |
//! | byte/short/int/long | `byte`/`i8`, `short`/`i16`, `int`/`i32`/`integer`, `long`/`i64` | base-10, optional sign | decimal |
//! | float/double | `float`/`f32`, `double`/`f64` | decimal or scientific; also `inf`, `infinity`, `nan` in any case | shortest round-trip; `inf`, `-inf`, `NaN` |
//! | boolean | `boolean`, `bool` | `"true"` in any case → true, anything else → false | `true`/`false` |
//! | date | `date`, `datetime` | strftime pattern from options | same pattern |

use std::fmt::Write as _;

use chrono::format::{Item, ParseErrorKind, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::value::{Value, ValueError, ValueOptions, ValueResult, ValueType};

/// Date pattern used when a placeholder declares no format.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_error(type_name: &str, input: &str, reason: impl ToString) -> ValueError {
    ValueError::Parse {
        type_name: type_name.to_string(),
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

fn mismatch(expected: &str, actual: &Value) -> ValueError {
    ValueError::Mismatch {
        expected: expected.to_string(),
        actual: actual.kind(),
    }
}

/// Identity conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringType;

impl ValueType for StringType {
    fn name(&self) -> &str {
        "string"
    }

    fn aliases(&self) -> &[&str] {
        &["str"]
    }

    fn parse(&self, _options: &ValueOptions, raw: &str) -> ValueResult<Value> {
        Ok(Value::Str(raw.to_string()))
    }

    fn format(&self, _options: &ValueOptions, value: &Value) -> ValueResult<String> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            other => Err(mismatch(self.name(), other)),
        }
    }
}

macro_rules! numeric_type {
    ($(#[$doc:meta])* $ty:ident, $prim:ty, $variant:ident, $name:literal, [$($alias:literal),*]) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl ValueType for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn aliases(&self) -> &[&str] {
                &[$($alias),*]
            }

            fn parse(&self, _options: &ValueOptions, raw: &str) -> ValueResult<Value> {
                raw.parse::<$prim>()
                    .map(Value::$variant)
                    .map_err(|e| parse_error($name, raw, e))
            }

            fn format(&self, _options: &ValueOptions, value: &Value) -> ValueResult<String> {
                match value {
                    Value::$variant(v) => Ok(v.to_string()),
                    other => Err(mismatch($name, other)),
                }
            }
        }
    };
}

numeric_type!(
    /// Signed 8-bit integer.
    ByteType, i8, Byte, "byte", ["i8"]
);
numeric_type!(
    /// Signed 16-bit integer.
    ShortType, i16, Short, "short", ["i16"]
);
numeric_type!(
    /// Signed 32-bit integer.
    IntegerType, i32, Int, "int", ["i32", "integer"]
);
numeric_type!(
    /// Signed 64-bit integer.
    LongType, i64, Long, "long", ["i64"]
);
numeric_type!(
    /// Single-precision float.
    FloatType, f32, Float, "float", ["f32"]
);
numeric_type!(
    /// Double-precision float.
    DoubleType, f64, Double, "double", ["f64"]
);

/// Lenient boolean: only a case-insensitive `"true"` is true.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanType;

impl ValueType for BooleanType {
    fn name(&self) -> &str {
        "boolean"
    }

    fn aliases(&self) -> &[&str] {
        &["bool"]
    }

    fn parse(&self, _options: &ValueOptions, raw: &str) -> ValueResult<Value> {
        Ok(Value::Bool(raw.eq_ignore_ascii_case("true")))
    }

    fn format(&self, _options: &ValueOptions, value: &Value) -> ValueResult<String> {
        match value {
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(mismatch(self.name(), other)),
        }
    }
}

/// Date or date-time using a strftime pattern.
///
/// Patterns without time fields yield midnight.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateType;

impl DateType {
    fn pattern<'a>(&self, options: &'a ValueOptions) -> &'a str {
        options.format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }
}

impl ValueType for DateType {
    fn name(&self) -> &str {
        "date"
    }

    fn aliases(&self) -> &[&str] {
        &["datetime"]
    }

    fn parse(&self, options: &ValueOptions, raw: &str) -> ValueResult<Value> {
        let pattern = self.pattern(options);
        match NaiveDateTime::parse_from_str(raw, pattern) {
            Ok(dt) => Ok(Value::Date(dt)),
            Err(e) if e.kind() == ParseErrorKind::NotEnough => {
                NaiveDate::parse_from_str(raw, pattern)
                    .map(|d| Value::Date(d.and_time(NaiveTime::MIN)))
                    .map_err(|e| parse_error(self.name(), raw, e))
            }
            Err(e) => Err(parse_error(self.name(), raw, e)),
        }
    }

    fn format(&self, options: &ValueOptions, value: &Value) -> ValueResult<String> {
        let Value::Date(dt) = value else {
            return Err(mismatch(self.name(), value));
        };
        let pattern = self.pattern(options);
        let mut out = String::new();
        write!(out, "{}", dt.format(pattern)).map_err(|_| ValueError::InvalidFormat {
            format: pattern.to_string(),
        })?;
        Ok(out)
    }

    fn check_options(&self, options: &ValueOptions) -> ValueResult<()> {
        let pattern = self.pattern(options);
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(ValueError::InvalidFormat {
                format: pattern.to_string(),
            });
        }
        Ok(())
    }
}
