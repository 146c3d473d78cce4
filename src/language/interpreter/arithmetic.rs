//! Binary operator semantics and numeric widening.
//!
//! Mixed numeric operands are promoted pairwise along `Int -> Float -> Double` before an
//! operation is applied. All operator rules live here so the interpreter only dispatches.

use crate::language::interpreter::value::Value;
use crate::language::interpreter::RuntimeError;
use crate::language::lexer::TokenPos;

enum Widened {
    Ints(i64, i64),
    Floats(f32, f32),
    Doubles(f64, f64),
}

fn rank(value: &Value) -> Option<u8> {
    match value {
        Value::Int(_) => Some(0),
        Value::Float(_) => Some(1),
        Value::Double(_) => Some(2),
        _ => None,
    }
}

fn as_f32(value: &Value) -> f32 {
    match value {
        Value::Int(value) => *value as f32,
        Value::Float(value) => *value,
        Value::Double(value) => *value as f32,
        _ => 0.0,
    }
}

fn as_f64(value: &Value) -> f64 {
    match value {
        Value::Int(value) => *value as f64,
        Value::Float(value) => *value as f64,
        Value::Double(value) => *value,
        _ => 0.0,
    }
}

fn widen(left: &Value, right: &Value) -> Option<Widened> {
    let rank = rank(left)?.max(rank(right)?);

    Some(match (rank, left, right) {
        (0, Value::Int(left), Value::Int(right)) => Widened::Ints(*left, *right),
        (1, ..) => Widened::Floats(as_f32(left), as_f32(right)),
        _ => Widened::Doubles(as_f64(left), as_f64(right)),
    })
}

/// Applies `operator` to two evaluated operands.
pub fn apply(operator: &str, left: Value, right: Value, pos: TokenPos) -> Result<Value, RuntimeError> {
    match operator {
        "+" => add(left, right, pos),
        "-" | "*" | "/" => numeric(operator, left, right, pos),
        ">" | "<" => compare(operator, left, right, pos),
        _ => Err(RuntimeError::UnsupportedOperator { operator: operator.to_owned(), pos }),
    }
}

fn add(left: Value, right: Value, pos: TokenPos) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{}{}", a, b))),
        (Value::Str(a), number) if number.is_numeric() => Ok(Value::Str(format!("{}{}", a, number))),
        (number, Value::Str(b)) if number.is_numeric() => Ok(Value::Str(format!("{}{}", number, b))),
        _ => numeric("+", left, right, pos),
    }
}

fn numeric(operator: &str, left: Value, right: Value, pos: TokenPos) -> Result<Value, RuntimeError> {
    let widened = widen(&left, &right).ok_or_else(|| unsupported(operator, &left, &right, pos))?;

    match (operator, widened) {
        ("/", Widened::Ints(_, 0)) => Err(RuntimeError::DivisionByZero { pos }),
        ("/", Widened::Floats(_, b)) if b == 0.0 => Err(RuntimeError::DivisionByZero { pos }),
        ("/", Widened::Doubles(_, b)) if b == 0.0 => Err(RuntimeError::DivisionByZero { pos }),

        ("+", Widened::Ints(a, b)) => Ok(Value::Int(a.wrapping_add(b))),
        ("-", Widened::Ints(a, b)) => Ok(Value::Int(a.wrapping_sub(b))),
        ("*", Widened::Ints(a, b)) => Ok(Value::Int(a.wrapping_mul(b))),
        ("/", Widened::Ints(a, b)) => Ok(Value::Int(a.wrapping_div(b))),

        ("+", Widened::Floats(a, b)) => Ok(Value::Float(a + b)),
        ("-", Widened::Floats(a, b)) => Ok(Value::Float(a - b)),
        ("*", Widened::Floats(a, b)) => Ok(Value::Float(a * b)),
        ("/", Widened::Floats(a, b)) => Ok(Value::Float(a / b)),

        ("+", Widened::Doubles(a, b)) => Ok(Value::Double(a + b)),
        ("-", Widened::Doubles(a, b)) => Ok(Value::Double(a - b)),
        ("*", Widened::Doubles(a, b)) => Ok(Value::Double(a * b)),
        ("/", Widened::Doubles(a, b)) => Ok(Value::Double(a / b)),

        _ => Err(RuntimeError::UnsupportedOperator { operator: operator.to_owned(), pos }),
    }
}

fn compare(operator: &str, left: Value, right: Value, pos: TokenPos) -> Result<Value, RuntimeError> {
    match (operator, &left, &right) {
        (">", Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a > b)),
        ("<", Value::Int(a), Value::Int(b)) => Ok(Value::Bool(a < b)),
        _ => Err(unsupported(operator, &left, &right, pos)),
    }
}

fn unsupported(operator: &str, left: &Value, right: &Value, pos: TokenPos) -> RuntimeError {
    RuntimeError::UnsupportedOperands {
        operator: operator.to_owned(),
        left: left.type_name(),
        right: right.type_name(),
        pos,
    }
}
