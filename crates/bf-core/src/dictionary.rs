//! Keyed configuration input.
//!
//! A `Dictionary` is the parsed form of one model's configuration block: scalar
//! coefficients, selection words, sample tables and nested sub-dictionaries.
//! It deserializes from YAML so material files can be kept alongside cases.

use crate::error::{BfError, BfResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One value stored under a dictionary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DictValue {
    Bool(bool),
    Scalar(f64),
    Word(String),
    List(Vec<f64>),
    Table(Vec<Vec<f64>>),
    Dict(Dictionary),
}

impl DictValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Scalar(_) => "scalar",
            Self::Word(_) => "word",
            Self::List(_) => "list",
            Self::Table(_) => "table",
            Self::Dict(_) => "dictionary",
        }
    }
}

impl From<f64> for DictValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<bool> for DictValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for DictValue {
    fn from(v: &str) -> Self {
        Self::Word(v.to_string())
    }
}

impl From<String> for DictValue {
    fn from(v: String) -> Self {
        Self::Word(v)
    }
}

impl From<Vec<f64>> for DictValue {
    fn from(v: Vec<f64>) -> Self {
        Self::List(v)
    }
}

impl From<Vec<Vec<f64>>> for DictValue {
    fn from(v: Vec<Vec<f64>>) -> Self {
        Self::Table(v)
    }
}

impl From<Dictionary> for DictValue {
    fn from(v: Dictionary) -> Self {
        Self::Dict(v)
    }
}

/// Ordered keyword -> value map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: BTreeMap<String, DictValue>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dictionary from YAML text.
    pub fn from_yaml_str(text: &str) -> BfResult<Self> {
        serde_yaml::from_str(text).map_err(|e| BfError::Parse {
            message: e.to_string(),
        })
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DictValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DictValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&DictValue> {
        self.entries.get(key)
    }

    fn lookup(&self, key: &str) -> BfResult<&DictValue> {
        self.entries.get(key).ok_or_else(|| BfError::MissingKey {
            key: key.to_string(),
        })
    }

    fn wrong_type(key: &str, expected: &'static str) -> BfError {
        BfError::WrongType {
            key: key.to_string(),
            expected,
        }
    }

    /// Required scalar entry.
    pub fn scalar(&self, key: &str) -> BfResult<f64> {
        match self.lookup(key)? {
            DictValue::Scalar(v) => Ok(*v),
            _ => Err(Self::wrong_type(key, "scalar")),
        }
    }

    /// Optional scalar entry with default.
    pub fn scalar_or(&self, key: &str, default: f64) -> BfResult<f64> {
        if self.contains(key) {
            self.scalar(key)
        } else {
            Ok(default)
        }
    }

    /// Optional non-negative integer entry with default.
    pub fn label_or(&self, key: &str, default: usize) -> BfResult<usize> {
        if !self.contains(key) {
            return Ok(default);
        }
        let v = self.scalar(key)?;
        if v < 0.0 || v.fract() != 0.0 {
            return Err(Self::wrong_type(key, "non-negative integer"));
        }
        Ok(v as usize)
    }

    /// Required word entry.
    pub fn word(&self, key: &str) -> BfResult<&str> {
        match self.lookup(key)? {
            DictValue::Word(w) => Ok(w.as_str()),
            _ => Err(Self::wrong_type(key, "word")),
        }
    }

    pub fn word_or<'a>(&'a self, key: &str, default: &'a str) -> BfResult<&'a str> {
        if self.contains(key) {
            self.word(key)
        } else {
            Ok(default)
        }
    }

    /// Required list of scalars.
    pub fn list(&self, key: &str) -> BfResult<&[f64]> {
        match self.lookup(key)? {
            DictValue::List(v) => Ok(v.as_slice()),
            _ => Err(Self::wrong_type(key, "list")),
        }
    }

    /// Required table (list of rows).
    pub fn table(&self, key: &str) -> BfResult<&[Vec<f64>]> {
        match self.lookup(key)? {
            DictValue::Table(v) => Ok(v.as_slice()),
            _ => Err(Self::wrong_type(key, "table")),
        }
    }

    /// Required sub-dictionary.
    pub fn sub_dict(&self, key: &str) -> BfResult<&Dictionary> {
        match self.lookup(key)? {
            DictValue::Dict(d) => Ok(d),
            other => Err(BfError::WrongType {
                key: format!("{key} ({})", other.kind()),
                expected: "dictionary",
            }),
        }
    }

    /// Optional sub-dictionary.
    pub fn optional_sub_dict(&self, key: &str) -> BfResult<Option<&Dictionary>> {
        if self.contains(key) {
            self.sub_dict(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Sub-dictionary, or an empty one when the key is absent.
    pub fn sub_dict_or_empty(&self, key: &str) -> BfResult<Dictionary> {
        Ok(self.optional_sub_dict(key)?.cloned().unwrap_or_default())
    }
}
