//! Data directory loading.
//! Walks a directory tree, parses every file as YAML (JSON included) and
//! merges the results into one namespace keyed by file stem.

use crate::config::CollisionPolicy;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A parsed structured-data value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataValue {
    Null,
    Bool(bool),
    Integer(i128),
    Float(f64),
    String(String),
    Sequence(Vec<DataValue>),
    Mapping(IndexMap<String, DataValue>),
}

impl DataValue {
    /// Converts a parsed YAML document.
    ///
    /// Scalar mapping keys are stringified; compound keys are rejected.
    /// Tags are dropped and the tagged value kept.
    pub fn from_yaml(value: serde_yaml::Value) -> std::result::Result<Self, String> {
        Ok(match value {
            serde_yaml::Value::Null => DataValue::Null,
            serde_yaml::Value::Bool(b) => DataValue::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DataValue::Integer(i.into())
                } else if let Some(u) = n.as_u64() {
                    DataValue::Integer(u.into())
                } else {
                    DataValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_yaml::Value::String(s) => DataValue::String(s),
            serde_yaml::Value::Sequence(seq) => DataValue::Sequence(
                seq.into_iter().map(Self::from_yaml).collect::<std::result::Result<_, _>>()?,
            ),
            serde_yaml::Value::Mapping(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(mapping_key(k)?, Self::from_yaml(v)?);
                }
                DataValue::Mapping(out)
            }
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(tagged.value)?,
        })
    }

    /// Parses the text of one data file.
    pub fn parse(contents: &str) -> std::result::Result<Self, String> {
        if contents.trim().is_empty() {
            return Ok(DataValue::Null);
        }
        let value: serde_yaml::Value =
            serde_yaml::from_str(contents).map_err(|e| e.to_string())?;
        Self::from_yaml(value)
    }
}

fn mapping_key(key: serde_yaml::Value) -> std::result::Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => mapping_key(tagged.value),
        other => Err(format!("unsupported mapping key: {other:?}")),
    }
}

/// Merged data from every file of a data directory, keyed by file stem.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DataNamespace {
    entries: IndexMap<String, DataValue>,
}

impl DataNamespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.entries.get(key)
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: DataValue) -> Option<DataValue> {
        self.entries.insert(key.into(), value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derives the namespace key of a data file: its file name without the
/// last extension.
pub fn data_key<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref().file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

/// Loads every file under `datadir` into a [`DataNamespace`].
///
/// Entries are walked depth-first in file-name order and symbolic links are
/// followed, so the file that wins a key collision is the one that sorts
/// last in that order.
///
/// # Errors
/// * `Error::FilesystemError` if `datadir` is not a directory or cannot be walked
/// * `Error::DataParseError` if any file is not valid structured data
/// * `Error::DataKeyCollision` on a duplicate key under [`CollisionPolicy::Error`]
pub fn load_data<P: AsRef<Path>>(
    datadir: P,
    on_collision: CollisionPolicy,
) -> Result<DataNamespace> {
    let datadir = datadir.as_ref();
    if !datadir.is_dir() {
        return Err(Error::FilesystemError {
            path: datadir.to_path_buf(),
            reason: if datadir.exists() {
                "not a directory".to_string()
            } else {
                "no such directory".to_string()
            },
        });
    }

    let mut namespace = DataNamespace::new();
    let mut sources: IndexMap<String, PathBuf> = IndexMap::new();

    for entry in WalkDir::new(datadir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::FilesystemError {
            path: e.path().unwrap_or(datadir).to_path_buf(),
            reason: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(key) = data_key(path) else {
            continue;
        };

        let contents = fs::read_to_string(path).map_err(|e| Error::DataParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let value = DataValue::parse(&contents).map_err(|reason| Error::DataParseError {
            path: path.to_path_buf(),
            reason,
        })?;

        if let Some(previous) = sources.get(&key) {
            match on_collision {
                CollisionPolicy::Error => {
                    return Err(Error::DataKeyCollision {
                        key,
                        first: previous.clone(),
                        second: path.to_path_buf(),
                    });
                }
                CollisionPolicy::Overwrite => warn!(
                    "Data key '{}' from '{}' overwritten by '{}'",
                    key,
                    previous.display(),
                    path.display()
                ),
            }
        }

        debug!("Loaded data file '{}' as '{}'", path.display(), key);
        sources.insert(key.clone(), path.to_path_buf());
        namespace.insert(key, value);
    }

    Ok(namespace)
}
