// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// String-to-string envelope metadata.
///
/// Insertion order is irrelevant (spec §4.1); equality is structural and
/// falls directly out of `HashMap`'s order-independent `PartialEq`.
///
/// # Examples
///
/// ```rust
/// use hive_rt::message::Header;
///
/// let mut h = Header::new();
/// h.insert("trace-id", "abc");
/// assert_eq!(h.get("trace-id"), Some("abc"));
///
/// let mut h2 = Header::new();
/// h2.insert("trace-id", "abc");
/// assert_eq!(h, h2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header(HashMap<String, String>);

impl Header {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Inserts or overwrites a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Reads a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the header is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over key/value pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<HashMap<String, String>> for Header {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, String)> for Header {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_insertion_order() {
        let mut a = Header::new();
        a.insert("x", "1");
        a.insert("y", "2");

        let mut b = Header::new();
        b.insert("y", "2");
        b.insert("x", "1");

        assert_eq!(a, b);
    }

    #[test]
    fn missing_key_returns_none() {
        let h = Header::new();
        assert_eq!(h.get("nope"), None);
    }
}
