//! Parameter values

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar parameter value
///
/// Base argument sets deserialize directly into maps of `Value`, so a TOML
/// parameter file needs no type annotations. `Display` produces the text
/// spliced into rendered RTL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag (e.g. a variant selector)
    Bool(bool),
    /// Integer quantity (bit widths, shifts, rates)
    Int(i64),
    /// Floating-point quantity (frequencies, raw coefficients)
    Float(f64),
    /// Literal text
    Str(String),
}

impl Value {
    /// The value as a boolean, if it is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as an integer, if it is one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as a float; integers widen losslessly enough for the
    /// frequency arithmetic done here
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Name of the variant, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_display_matches_spliced_text() {
        assert_eq!(Value::Int(16).to_string(), "16");
        assert_eq!(Value::Int(-2).to_string(), "-2");
        assert_eq!(Value::Str("clk".into()).to_string(), "clk");
    }

    #[test]
    fn test_as_f64_widens_integers() {
        assert_eq!(Value::Int(160).as_f64(), Some(160.0));
        assert_eq!(Value::Float(0.25).as_f64(), Some(0.25));
        assert_eq!(Value::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_toml_params_deserialize_untagged() {
        let text = "mf_clock_rec = false\nadc_width = 4\nifreq = 250000.0\n";
        let args: HashMap<String, Value> = toml::from_str(text).unwrap();
        assert_eq!(args["mf_clock_rec"], Value::Bool(false));
        assert_eq!(args["adc_width"], Value::Int(4));
        assert_eq!(args["ifreq"], Value::Float(250000.0));
    }
}
