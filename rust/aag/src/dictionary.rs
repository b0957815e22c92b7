// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed key-value payloads carried by custom node attributes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A typed value stored in a dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DictValue {
    Int(i64),
    Double(f64),
    String(String),
    List(Vec<DictValue>),
}

/// Key-value payload of a custom attribute. Keys are kept sorted so that
/// diagnostics print the same way every time.
pub type Dictionary = BTreeMap<String, DictValue>;

impl DictValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DictValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            DictValue::Double(v) => Some(*v),
            DictValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DictValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for DictValue {
    fn from(v: i64) -> Self {
        DictValue::Int(v)
    }
}

impl From<f64> for DictValue {
    fn from(v: f64) -> Self {
        DictValue::Double(v)
    }
}

impl From<&str> for DictValue {
    fn from(v: &str) -> Self {
        DictValue::String(v.to_string())
    }
}

impl From<String> for DictValue {
    fn from(v: String) -> Self {
        DictValue::String(v)
    }
}
