use crate::error::{
    EncodeDocument, MissingField, MissingInput, NotAMapping, ParseDocument, ReadFile, Result,
    WriteFile,
};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use snafu::{ensure, OptionExt, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

/// First line of every file this tool writes.
pub const GENERATED_HEADER: &str = "# Generated by build-manifests. Do not edit manually.\n";

/// A loosely structured YAML document, remembering where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    path: PathBuf,
    value: Value,
}

impl Document {
    pub fn new<P>(path: P, value: Value) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            path: path.into(),
            value,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = read_input(path)?;
        let value = serde_yaml::from_str(&content).context(ParseDocument { path })?;
        Ok(Self::new(path, value))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Looks up a field, failing if any segment of the path is absent.
    pub fn get(&self, field: &[&str]) -> Result<&Value> {
        lookup(&self.value, field).context(MissingField {
            path: &self.path,
            field: join(field),
        })
    }

    pub fn get_mut(&mut self, field: &[&str]) -> Result<&mut Value> {
        lookup_mut(&mut self.value, field).context(MissingField {
            path: &self.path,
            field: join(field),
        })
    }

    pub fn get_str(&self, field: &[&str]) -> Result<&str> {
        self.get(field)?.as_str().context(MissingField {
            path: &self.path,
            field: join(field),
        })
    }

    /// Sets a field, creating missing (or null) intermediate mappings on the way.
    pub fn set<V>(&mut self, field: &[&str], value: V) -> Result<()>
    where
        V: Into<Value>,
    {
        let (last, parents) = field.split_last().context(MissingField {
            path: &self.path,
            field: String::new(),
        })?;

        let mut current = &mut self.value;
        for (n, segment) in parents.iter().enumerate() {
            let mapping = mapping_mut(current, &self.path, &parents[..n])?;
            let key = key(segment);
            if !mapping.contains_key(&key) {
                mapping.insert(key.clone(), Value::Mapping(Mapping::new()));
            }
            current = mapping.get_mut(&key).context(MissingField {
                path: &self.path,
                field: join(&parents[..=n]),
            })?;
        }

        mapping_mut(current, &self.path, parents)?.insert(key(last), value.into());
        Ok(())
    }

    /// Removes a field. The field must exist: a missing field means the
    /// document no longer has the shape we expect.
    pub fn remove(&mut self, field: &[&str]) -> Result<Value> {
        let (last, parents) = field.split_last().context(MissingField {
            path: &self.path,
            field: String::new(),
        })?;

        lookup_mut(&mut self.value, parents)
            .and_then(Value::as_mapping_mut)
            .and_then(|mapping| mapping.remove(&key(last)))
            .context(MissingField {
                path: &self.path,
                field: join(field),
            })
    }

    pub fn render(&self) -> Result<String> {
        render_object(&self.path, &self.value)
    }
}

/// A file ready to be written.
#[derive(Clone, Debug, PartialEq)]
pub struct Generated {
    pub path: PathBuf,
    pub contents: String,
}

impl Generated {
    pub fn new<P>(path: P, contents: String) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            path: path.into(),
            contents,
        }
    }

    pub fn from_document(path: &Path, document: &Document) -> Result<Self> {
        Ok(Self::new(path, document.render()?))
    }

    pub fn write(&self) -> Result<()> {
        log::debug!("Writing {}", self.path.display());
        fs::write(&self.path, &self.contents).context(WriteFile { path: &self.path })
    }
}

pub fn read_input(path: &Path) -> Result<String> {
    ensure!(path.is_file(), MissingInput { path });
    fs::read_to_string(path).context(ReadFile { path })
}

/// Serializes any object to YAML, prefixed with the generated-file header.
pub fn render_object<T>(path: &Path, object: &T) -> Result<String>
where
    T: Serialize,
{
    let body = serde_yaml::to_string(object).context(EncodeDocument { path })?;
    Ok(with_header(&body))
}

pub fn with_header(body: &str) -> String {
    if body.starts_with(GENERATED_HEADER) {
        body.to_string()
    } else {
        format!("{}{}", GENERATED_HEADER, body)
    }
}

fn key(segment: &str) -> Value {
    Value::String(segment.to_string())
}

fn join(field: &[&str]) -> String {
    field.join(".")
}

fn lookup<'v>(value: &'v Value, field: &[&str]) -> Option<&'v Value> {
    field
        .iter()
        .try_fold(value, |value, segment| value.as_mapping()?.get(&key(segment)))
}

fn lookup_mut<'v>(value: &'v mut Value, field: &[&str]) -> Option<&'v mut Value> {
    field.iter().try_fold(value, |value, segment| {
        value.as_mapping_mut()?.get_mut(&key(segment))
    })
}

fn mapping_mut<'v>(value: &'v mut Value, path: &Path, field: &[&str]) -> Result<&'v mut Mapping> {
    if value.is_null() {
        *value = Value::Mapping(Mapping::new());
    }
    value.as_mapping_mut().context(NotAMapping {
        path,
        field: join(field),
    })
}
