//! Column definition and value validation.
//!
//! Turns the raw text an operator types into checked column definitions and
//! typed [`Value`]s, rejecting anything that cannot be coerced to the
//! declared [`ColumnType`].
//!
//! # Examples
//!
//! ```
//! use flatfile_core::*;
//!
//! let (name, ty) = validate_column_definition("age:INT").unwrap();
//! assert_eq!((name.as_str(), ty), ("age", ColumnType::Int));
//!
//! assert_eq!(
//!     validate_value(&Value::from("'Ann'"), ColumnType::Str).unwrap(),
//!     Value::from("Ann")
//! );
//! assert!(validate_value(&Value::from("thirty"), ColumnType::Int).is_err());
//! ```

use thiserror::Error;

use crate::error::ErrorKind;
use crate::{ColumnType, Value};

/// Column definition and value coercion errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Definition is not of the form `name:type`.
    #[error("malformed column definition '{0}': use name:type with type one of int, str, bool")]
    MalformedDefinition(String),
    /// Definition has an empty name before the `:`.
    #[error("column name cannot be empty in '{0}'")]
    EmptyColumnName(String),
    /// Type tag is not one of the supported types.
    #[error("unsupported column type '{0}': available types are int, str, bool")]
    UnknownType(String),
    /// Value cannot be converted to the declared column type.
    #[error("cannot convert '{value}' to {expected}")]
    Coercion { value: String, expected: ColumnType },
}

impl ValidationError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Coercion { .. } => ErrorKind::TypeCoercion,
            _ => ErrorKind::MalformedInput,
        }
    }
}

/// Parses a `name:type` column definition.
///
/// The definition must contain exactly one `:`. The name is trimmed and must
/// not be empty; the type is matched case-insensitively against
/// [`SUPPORTED_TYPES`](crate::SUPPORTED_TYPES).
pub fn validate_column_definition(definition: &str) -> Result<(String, ColumnType), ValidationError> {
    let Some((name, ty)) = definition.split_once(':') else {
        return Err(ValidationError::MalformedDefinition(definition.to_string()));
    };
    if ty.contains(':') {
        return Err(ValidationError::MalformedDefinition(definition.to_string()));
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyColumnName(definition.to_string()));
    }

    let ty = ty.parse::<ColumnType>()?;
    Ok((name.to_string(), ty))
}

/// Coerces `raw` into a value of type `expected`.
///
/// - `int`: integers pass through; text must parse as a base-10 `i64` after
///   trimming surrounding whitespace. Booleans are rejected.
/// - `bool`: booleans pass through; otherwise the lowercase text form must be
///   one of `true`/`1`/`yes` or `false`/`0`/`no`.
/// - `str`: always succeeds. One layer of matching `"` or `'` quotes is
///   stripped from text.
pub fn validate_value(raw: &Value, expected: ColumnType) -> Result<Value, ValidationError> {
    let coercion = || ValidationError::Coercion {
        value: raw.to_string(),
        expected,
    };

    match (expected, raw) {
        (ColumnType::Int, Value::Integer(n)) => Ok(Value::Integer(*n)),
        (ColumnType::Int, Value::Text(text)) => text
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| coercion()),
        (ColumnType::Int, Value::Boolean(_)) => Err(coercion()),

        (ColumnType::Bool, Value::Boolean(b)) => Ok(Value::Boolean(*b)),
        (ColumnType::Bool, other) => match other.to_string().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Value::Boolean(true)),
            "false" | "0" | "no" => Ok(Value::Boolean(false)),
            _ => Err(coercion()),
        },

        (ColumnType::Str, Value::Text(text)) => Ok(Value::Text(strip_quotes(text).to_string())),
        (ColumnType::Str, other) => Ok(Value::Text(other.to_string())),
    }
}

/// Removes one layer of matching `"` or `'` quotes.
pub(crate) fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_column_definition_accepts_valid_forms() {
        assert_eq!(
            validate_column_definition("name:str").unwrap(),
            ("name".to_string(), ColumnType::Str)
        );
        assert_eq!(
            validate_column_definition("  active : Bool ").unwrap(),
            ("active".to_string(), ColumnType::Bool)
        );
    }

    #[test]
    fn test_column_definition_requires_single_colon() {
        assert_eq!(
            validate_column_definition("name").unwrap_err(),
            ValidationError::MalformedDefinition("name".to_string())
        );
        assert_eq!(
            validate_column_definition("a:b:int").unwrap_err(),
            ValidationError::MalformedDefinition("a:b:int".to_string())
        );
    }

    #[test]
    fn test_column_definition_rejects_empty_name_and_bad_type() {
        assert!(matches!(
            validate_column_definition(" :int"),
            Err(ValidationError::EmptyColumnName(_))
        ));
        let err = validate_column_definition("price:float").unwrap_err();
        assert_eq!(err, ValidationError::UnknownType("float".to_string()));
        assert!(err.to_string().contains("int, str, bool"));
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_int_coercion() {
        assert_eq!(validate_value(&text("12"), ColumnType::Int).unwrap(), Value::Integer(12));
        assert_eq!(validate_value(&text("-3"), ColumnType::Int).unwrap(), Value::Integer(-3));
        assert_eq!(validate_value(&text(" 7 "), ColumnType::Int).unwrap(), Value::Integer(7));
        assert_eq!(
            validate_value(&Value::Integer(5), ColumnType::Int).unwrap(),
            Value::Integer(5)
        );

        let err = validate_value(&text("12.5"), ColumnType::Int).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Coercion {
                value: "12.5".to_string(),
                expected: ColumnType::Int
            }
        );
        assert_eq!(err.kind(), ErrorKind::TypeCoercion);
        assert!(validate_value(&text("\"30\""), ColumnType::Int).is_err());
        assert!(validate_value(&Value::Boolean(true), ColumnType::Int).is_err());
    }

    #[test]
    fn test_bool_coercion() {
        for raw in ["true", "TRUE", "1", "yes", "Yes"] {
            assert_eq!(validate_value(&text(raw), ColumnType::Bool).unwrap(), Value::Boolean(true));
        }
        for raw in ["false", "0", "no", "NO"] {
            assert_eq!(validate_value(&text(raw), ColumnType::Bool).unwrap(), Value::Boolean(false));
        }
        assert_eq!(
            validate_value(&Value::Boolean(false), ColumnType::Bool).unwrap(),
            Value::Boolean(false)
        );
        assert_eq!(
            validate_value(&Value::Integer(1), ColumnType::Bool).unwrap(),
            Value::Boolean(true)
        );
        assert!(validate_value(&text("maybe"), ColumnType::Bool).is_err());
        assert!(validate_value(&Value::Integer(2), ColumnType::Bool).is_err());
    }

    #[test]
    fn test_str_strips_one_quote_layer() {
        assert_eq!(validate_value(&text("\"Ann\""), ColumnType::Str).unwrap(), text("Ann"));
        assert_eq!(validate_value(&text("'Ann'"), ColumnType::Str).unwrap(), text("Ann"));
        assert_eq!(
            validate_value(&text("\"'Ann'\""), ColumnType::Str).unwrap(),
            text("'Ann'")
        );
        assert_eq!(validate_value(&text("\"Ann'"), ColumnType::Str).unwrap(), text("\"Ann'"));
        assert_eq!(validate_value(&text("\""), ColumnType::Str).unwrap(), text("\""));
        assert_eq!(validate_value(&text("plain"), ColumnType::Str).unwrap(), text("plain"));
        assert_eq!(validate_value(&Value::Integer(4), ColumnType::Str).unwrap(), text("4"));
    }
}
