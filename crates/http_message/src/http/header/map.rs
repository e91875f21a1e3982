use std::collections::{HashMap, hash_map};

use smallvec::SmallVec;
use unicase::UniCase;

pub type HeaderValues = SmallVec<[String; 1]>;

/// A header as first inserted, keeping the casing of its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    name: String,
    values: HeaderValues,
}

impl HeaderEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Multi-valued headers with case-insensitive names
///
/// Names and values are stored as given, checking them is left to the message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    map: HashMap<UniCase<String>, HeaderEntry>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn with_capacity(size: usize) -> Self {
        Self {
            map: HashMap::with_capacity(size),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&key(name))
    }

    pub fn get(&self, name: &str) -> Option<&HeaderEntry> {
        self.map.get(&key(name))
    }

    /// Values of `name`, empty if it is not set
    pub fn get_all(&self, name: &str) -> &[String] {
        self.get(name).map(HeaderEntry::values).unwrap_or_default()
    }

    /// Replaces every value of `name`, an existing header keeps its original casing
    pub fn insert<I>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        let values = values.into_iter().collect();
        match self.map.entry(key(name)) {
            hash_map::Entry::Occupied(mut entry) => entry.get_mut().values = values,
            hash_map::Entry::Vacant(entry) => {
                entry.insert(HeaderEntry {
                    name: name.to_owned(),
                    values,
                });
            }
        }
    }

    /// Adds values after the existing values of `name`
    pub fn append<I>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.map
            .entry(key(name))
            .or_insert_with(|| HeaderEntry {
                name: name.to_owned(),
                values: SmallVec::new(),
            })
            .values
            .extend(values);
    }

    pub fn remove(&mut self, name: &str) -> Option<HeaderEntry> {
        self.map.remove(&key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.map.values().map(|entry| (entry.name(), entry.values()))
    }
}

fn key(name: &str) -> UniCase<String> {
    UniCase::new(name.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", strings(&["text/html"]));
        assert!(headers.contains("content-type"));
        assert!(headers.contains("CONTENT-TYPE"));
        assert_eq!(headers.get_all("content-TYPE"), ["text/html"]);
        assert_eq!(headers.get_all("missing"), [] as [String; 0]);
    }

    #[test]
    fn test_insert_replaces_and_keeps_first_casing() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Foo", strings(&["a", "b"]));
        headers.insert("x-foo", strings(&["c"]));
        let entry = headers.get("X-FOO").unwrap();
        assert_eq!(entry.name(), "X-Foo");
        assert_eq!(entry.values(), ["c"]);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_append() {
        let mut headers = HeaderMap::new();
        headers.append("Accept", strings(&["text/html"]));
        headers.append("accept", strings(&["application/json", "*/*"]));
        assert_eq!(
            headers.get_all("ACCEPT"),
            ["text/html", "application/json", "*/*"]
        );
        assert_eq!(headers.get("accept").unwrap().name(), "Accept");
    }

    #[test]
    fn test_remove() {
        let mut headers = HeaderMap::with_capacity(2);
        headers.insert("Host", strings(&["localhost"]));
        assert_eq!(headers.remove("HOST").unwrap().name(), "Host");
        assert!(headers.remove("host").is_none());
        assert!(headers.is_empty());
    }

    #[test]
    fn test_iter() {
        let mut headers = HeaderMap::new();
        headers.insert("A", strings(&["1"]));
        headers.insert("B", strings(&["2", "3"]));
        let mut all: Vec<_> = headers
            .iter()
            .map(|(name, values)| (name.to_owned(), values.to_vec()))
            .collect();
        all.sort();
        assert_eq!(
            all,
            vec![
                ("A".to_owned(), strings(&["1"])),
                ("B".to_owned(), strings(&["2", "3"]))
            ]
        );
    }
}
