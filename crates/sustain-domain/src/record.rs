//! Record module - typed property values written to a collection

use std::fmt;

/// A single typed property value as stored in a collection
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Free text
    Text(String),

    /// Floating point number
    Number(f64),

    /// Whole number
    Int(i64),
}

impl PropertyValue {
    /// Borrow the text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the numeric content, if this is a number value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the integer content, if this is an int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => write!(f, "{}", s),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Int(i) => write!(f, "{}", i),
        }
    }
}

/// Something that can be written to a collection as an ordered property list
///
/// Property names must match the [`PropertyDef`](crate::PropertyDef) names of
/// the collection the record is written to.
pub trait Record {
    /// Ordered `(name, value)` pairs for this record
    fn properties(&self) -> Vec<(&'static str, PropertyValue)>;
}
