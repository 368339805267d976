use chrono::{DateTime, NaiveDate, Utc};

use crate::core::{DataType, Lookup, ModelError, Result, Value};

use super::FieldCodec;

/// Codec for single-valued columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarField {
    data_type: DataType,
}

impl ScalarField {
    pub fn new(data_type: DataType) -> Self {
        Self { data_type }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    fn mismatch(&self, found: &Value) -> ModelError {
        ModelError::InvalidValueType {
            field: None,
            expected: self.data_type.name(),
            found: found.type_name(),
        }
    }

    fn parse_text(&self, raw: &Value, s: &str) -> Result<Value> {
        let parsed = match self.data_type {
            DataType::Text => Some(Value::Text(s.to_string())),
            DataType::Integer => s.trim().parse::<i64>().ok().map(Value::Integer),
            DataType::Float => s.trim().parse::<f64>().ok().map(Value::Float),
            DataType::Boolean => match s.trim() {
                "true" | "1" => Some(Value::Boolean(true)),
                "false" | "0" => Some(Value::Boolean(false)),
                _ => None,
            },
            DataType::Date => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .ok()
                .map(Value::Date),
            DataType::Timestamp => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|ts| Value::Timestamp(ts.with_timezone(&Utc))),
        };
        parsed.ok_or_else(|| self.mismatch(raw))
    }
}

impl FieldCodec for ScalarField {
    fn parse(&self, raw: &Value) -> Result<Value> {
        match (self.data_type, raw) {
            (_, Value::Null) => Ok(Value::Null),
            (DataType::Float, Value::Integer(i)) => Ok(Value::Float(*i as f64)),
            (data_type, value) if data_type.is_compatible(value) => Ok(value.clone()),
            (_, Value::Text(s)) => self.parse_text(raw, s),
            (DataType::Text, Value::List(_)) => Err(self.mismatch(raw)),
            (DataType::Text, other) => Ok(Value::Text(other.to_string())),
            (_, other) => Err(self.mismatch(other)),
        }
    }

    fn serialize(&self, value: &Value) -> Result<Value> {
        self.parse(value)
    }

    fn validate(&self, value: &Value) -> Result<()> {
        if self.data_type.is_compatible(value) {
            Ok(())
        } else {
            Err(self.mismatch(value))
        }
    }

    fn prepare_lookup(&self, lookup: Lookup, value: &Value) -> Result<Value> {
        match lookup {
            Lookup::Exact => self.serialize(value),
            other => Err(ModelError::UnsupportedLookup(other.to_string())),
        }
    }

    fn empty_value(&self) -> Value {
        match self.data_type {
            DataType::Text => Value::Text(String::new()),
            _ => Value::Null,
        }
    }

    fn describe(&self) -> &'static str {
        self.data_type.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_parse_accepts_scalars() {
        let f = ScalarField::new(DataType::Text);
        assert_eq!(f.parse(&"hello".into()).unwrap(), Value::from("hello"));
        assert_eq!(f.parse(&Value::Integer(12)).unwrap(), Value::from("12"));
        assert_eq!(f.parse(&Value::Null).unwrap(), Value::Null);
        assert!(f.parse(&Value::from(["a"])).is_err());
    }

    #[test]
    fn test_numeric_parse() {
        let int = ScalarField::new(DataType::Integer);
        assert_eq!(int.parse(&" 42 ".into()).unwrap(), Value::Integer(42));
        assert!(matches!(
            int.parse(&"forty".into()),
            Err(ModelError::InvalidValueType { expected: "INTEGER", found: "TEXT", .. })
        ));

        let float = ScalarField::new(DataType::Float);
        assert_eq!(float.parse(&Value::Integer(2)).unwrap(), Value::Float(2.0));
        assert_eq!(float.parse(&"2.5".into()).unwrap(), Value::Float(2.5));
    }

    #[test]
    fn test_boolean_and_date_parse() {
        let boolean = ScalarField::new(DataType::Boolean);
        assert_eq!(boolean.parse(&"1".into()).unwrap(), Value::Boolean(true));
        assert_eq!(boolean.parse(&"false".into()).unwrap(), Value::Boolean(false));
        assert!(boolean.parse(&Value::Integer(1)).is_err());

        let date = ScalarField::new(DataType::Date);
        let expected = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        assert_eq!(date.parse(&"2023-12-01".into()).unwrap(), Value::Date(expected));

        let ts = ScalarField::new(DataType::Timestamp);
        let parsed = ts.parse(&"2023-12-01T08:00:00+02:00".into()).unwrap();
        assert_eq!(parsed.to_string(), "2023-12-01T06:00:00Z");
    }

    #[test]
    fn test_only_exact_lookup() {
        let f = ScalarField::new(DataType::Integer);
        assert_eq!(
            f.prepare_lookup(Lookup::Exact, &"7".into()).unwrap(),
            Value::Integer(7)
        );
        assert!(matches!(
            f.prepare_lookup(Lookup::Gt, &Value::Integer(7)),
            Err(ModelError::UnsupportedLookup(_))
        ));
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(ScalarField::new(DataType::Text).empty_value(), Value::from(""));
        assert_eq!(ScalarField::new(DataType::Integer).empty_value(), Value::Null);
    }
}
