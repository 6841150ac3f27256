//! JSON persistence for test case records and verification links.
//!
//! Both collections are stored as a pretty-printed array of objects. An
//! object that has at least every key of an entity is that entity, extra keys
//! are ignored. [`decode`] checks only the requested entity's keys while
//! [`classify`] sorts arbitrary values into records, links or
//! [`Decoded::Other`].

use crate::io::{self, IoError};
use crate::models::{TestCaseRecord, VerificationLink};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a JSON array of {kind} objects")]
    NotAnArray { kind: &'static str },
    #[error("Entry {index} is not a {kind} object")]
    UnexpectedEntry { kind: &'static str, index: usize },
    #[error("Failed to decode {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: Box<CodecError>,
    },
}

/// A JSON object after classification
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    TestCase(TestCaseRecord),
    Link(VerificationLink),
    Other(Value),
}

/// Something the codec can persist as one object of a JSON array
pub trait Entity: Serialize + DeserializeOwned + Sized {
    /// Human readable name used in error messages
    const KIND: &'static str;

    /// Keys an object must carry at minimum to be read as this entity
    const KEYS: &'static [&'static str];
}

impl Entity for TestCaseRecord {
    const KIND: &'static str = "TestCaseRecord";
    const KEYS: &'static [&'static str] = &TestCaseRecord::KEYS;
}

impl Entity for VerificationLink {
    const KIND: &'static str = "VerificationLink";
    const KEYS: &'static [&'static str] = &VerificationLink::KEYS;
}

fn has_keys(object: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter().all(|key| object.contains_key(*key))
}

/// Classify a JSON value as a record, a link or something else.
///
/// Records are tried before links. An object that carries every key of an
/// entity but holds values of the wrong type is an error, not a pass-through.
pub fn classify(value: Value) -> Result<Decoded, CodecError> {
    let Value::Object(object) = &value else {
        return Ok(Decoded::Other(value));
    };

    if has_keys(object, <TestCaseRecord as Entity>::KEYS) {
        return Ok(Decoded::TestCase(serde_json::from_value(value)?));
    }
    if has_keys(object, <VerificationLink as Entity>::KEYS) {
        return Ok(Decoded::Link(serde_json::from_value(value)?));
    }
    Ok(Decoded::Other(value))
}

/// Serialize items as an indented JSON array, keeping non-ASCII text as is
pub fn encode<T: Entity>(items: &[T]) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Parse a JSON array where every element must be a `T`.
///
/// Only `T`'s own key set is checked, so an element carrying extra keys that
/// happen to belong to another entity is still read as a `T`.
pub fn decode<T: Entity>(text: &str) -> Result<Vec<T>, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(elements) = value else {
        return Err(CodecError::NotAnArray { kind: T::KIND });
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let is_entity = element
                .as_object()
                .is_some_and(|object| has_keys(object, T::KEYS));
            if !is_entity {
                return Err(CodecError::UnexpectedEntry {
                    kind: T::KIND,
                    index,
                });
            }
            Ok(serde_json::from_value(element)?)
        })
        .collect()
}

/// Write items to `path`, replacing whatever was there
pub fn store<T: Entity>(path: &Path, items: &[T]) -> Result<(), CodecError> {
    let text = encode(items)?;
    io::write_file(path, &text)?;
    Ok(())
}

/// Read back items written by [`store`]
pub fn load<T: Entity>(path: &Path) -> Result<Vec<T>, CodecError> {
    let text = io::read_file(path)?;
    decode(&text).map_err(|source| CodecError::Load {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}

pub fn store_links(path: &Path, links: &[VerificationLink]) -> Result<(), CodecError> {
    store(path, links)
}

pub fn load_links(path: &Path) -> Result<Vec<VerificationLink>, CodecError> {
    load(path)
}

pub fn store_records(path: &Path, records: &[TestCaseRecord]) -> Result<(), CodecError> {
    store(path, records)
}

pub fn load_records(path: &Path) -> Result<Vec<TestCaseRecord>, CodecError> {
    load(path)
}
