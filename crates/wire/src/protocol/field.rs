use std::collections::HashMap;
use std::collections::hash_map;

use http::HeaderMap;

/// A header or trailer: a name with one or more values.
///
/// The name keeps the casing it was first seen with but compares
/// case-insensitively within [`Fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    values: Vec<String>,
}

impl Field {
    pub fn new<N, I, V>(name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self { name: name.into(), values: values.into_iter().map(Into::into).collect() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn first(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

/// Fields keyed by their lower-cased name.
///
/// Repeated names are merged into a single [`Field`]. When merging from an
/// unordered source the order of the combined values is not guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    fields: HashMap<String, Field>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects `(name, values)` pairs, merging names that differ only by case.
    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = Self::new();
        for (name, values) in entries {
            fields.append(name, values);
        }
        fields
    }

    /// Non UTF-8 header values are converted lossily.
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        let mut fields = Self::new();
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            fields.append(name.as_str(), vec![value]);
        }
        fields
    }

    pub fn append<K, I, V>(&mut self, name: K, values: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        match self.fields.entry(name.to_ascii_lowercase()) {
            hash_map::Entry::Occupied(mut entry) => {
                entry.get_mut().values.extend(values.into_iter().map(Into::into));
            }
            hash_map::Entry::Vacant(entry) => {
                entry.insert(Field::new(name, values));
            }
        }
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&Field> {
        self.fields.get(&name.to_ascii_lowercase())
    }

    /// Lower-cased names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
