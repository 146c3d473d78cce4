use std::fmt::{Display, Formatter};
use std::mem::discriminant;

/// Dynamically typed runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Bool(bool),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Double(_))
    }

    /// Same runtime variant, ignoring the payload.
    pub fn same_type(&self, other: &Value) -> bool {
        discriminant(self) == discriminant(other)
    }

    /// Converts raw user input, trying boolean, integer and floating point before falling back to text.
    pub fn from_input(raw: &str) -> Value {
        match raw {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => raw.parse::<i64>().map(Value::Int)
                .or_else(|_| raw.parse::<f64>().map(Value::Double))
                .unwrap_or_else(|_| Value::Str(raw.to_owned())),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) if is_integral(*value as f64) => write!(f, "{:.1}", value),
            Value::Double(value) if is_integral(*value) => write!(f, "{:.1}", value),
            Value::Float(value) => write!(f, "{}", value),
            Value::Double(value) => write!(f, "{}", value),
            Value::Str(value) => f.write_str(value),
            Value::Bool(value) => write!(f, "{}", value),
        }
    }
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}
