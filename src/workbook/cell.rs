use calamine::Data;
use serde_json::Value;

/// True for empty cells and empty strings
pub fn is_blank(data: &Data) -> bool {
    match data {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

/// The string content of a text cell, `None` for any other kind of cell
pub fn as_str(data: &Data) -> Option<&str> {
    match data {
        Data::String(s) => Some(s.as_str()),
        _ => None,
    }
}

/// Display text of a non-blank cell
pub fn text(data: &Data) -> Option<String> {
    if is_blank(data) {
        None
    } else {
        Some(data.to_string())
    }
}

/// Numeric value of a cell; numeric strings are accepted
pub fn as_f64(data: &Data) -> Option<f64> {
    match data {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// JSON value for a cell, keeping numbers and booleans typed
pub fn to_json(data: &Data) -> Value {
    match data {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::String(other.to_string()),
    }
}

/// Text shown by the inspection commands; empty cells show as `None`
pub fn debug_text(data: &Data) -> String {
    match data {
        Data::Empty => "None".to_string(),
        other => other.to_string(),
    }
}
