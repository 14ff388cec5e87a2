//! Multi-valued header storage.
//!
//! [`HeaderStore`] maps a header key to every value received for it, in arrival order.
//! Keys are compared byte for byte: `Content-Length` and `content-length` are two
//! different keys. The store enforces a single ceiling on the total number of values
//! it holds, whatever keys they belong to.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use bytes::Bytes;

use crate::ensure;
use crate::protocol::HeaderError;

/// An append-only multimap from header key to an ordered sequence of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderStore {
    entries: HashMap<Bytes, Vec<Bytes>>,
    total_values: usize,
    max_values: usize,
}

impl HeaderStore {
    /// Creates an empty store accepting at most `max_values` values.
    ///
    /// The key table is reserved up front so that header parsing rarely reallocates.
    pub fn with_max_values(max_values: usize) -> Result<Self, HeaderError> {
        let mut entries = HashMap::new();
        entries.try_reserve(max_values).map_err(|_| HeaderError::OutOfMemory)?;
        Ok(Self { entries, total_values: 0, max_values })
    }

    /// Appends `value` to the sequence stored under `key`.
    ///
    /// # Errors
    ///
    /// - [`HeaderError::OutOfBounds`] once `max_values` values are stored; the store is unchanged
    /// - [`HeaderError::OutOfMemory`] if growing the table or the sequence failed; the store is
    ///   unchanged
    pub fn add(&mut self, key: Bytes, value: Bytes) -> Result<(), HeaderError> {
        ensure!(self.total_values < self.max_values, HeaderError::OutOfBounds { max_values: self.max_values });

        // reserve before touching the table, a failed insert must not leave an empty sequence behind
        self.entries.try_reserve(1).map_err(|_| HeaderError::OutOfMemory)?;
        let values = match self.entries.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let mut values = Vec::new();
                values.try_reserve(1).map_err(|_| HeaderError::OutOfMemory)?;
                entry.insert(values)
            }
        };

        values.try_reserve(1).map_err(|_| HeaderError::OutOfMemory)?;
        values.push(value);
        self.total_values += 1;
        Ok(())
    }

    /// Returns the most recently added value for `key`.
    pub fn last<K: AsRef<[u8]>>(&self, key: K) -> Option<&Bytes> {
        self.entries.get(key.as_ref())?.last()
    }

    /// Returns the value at `index` in insertion order.
    ///
    /// An out-of-range index returns `None` and leaves the store untouched.
    pub fn nth<K: AsRef<[u8]>>(&self, key: K, index: usize) -> Option<&Bytes> {
        self.entries.get(key.as_ref())?.get(index)
    }

    /// Number of values stored for `key`, `0` when the key was never seen.
    pub fn count<K: AsRef<[u8]>>(&self, key: K) -> usize {
        self.entries.get(key.as_ref()).map_or(0, Vec::len)
    }

    pub fn get_all<K: AsRef<[u8]>>(&self, key: K) -> &[Bytes] {
        self.entries.get(key.as_ref()).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.entries.contains_key(key.as_ref())
    }

    /// Total number of values across all keys.
    pub fn len(&self) -> usize {
        self.total_values
    }

    pub fn is_empty(&self) -> bool {
        self.total_values == 0
    }

    pub fn max_values(&self) -> usize {
        self.max_values
    }

    /// Iterates `(key, values)` pairs. Key order is unspecified, value order is insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, &[Bytes])> {
        self.entries.iter().map(|(key, values)| (key, values.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(max_values: usize) -> HeaderStore {
        HeaderStore::with_max_values(max_values).unwrap()
    }

    #[test]
    fn repeated_keys_keep_insertion_order() {
        let mut headers = store(8);
        headers.add(Bytes::from_static(b"Accept"), Bytes::from_static(b"text/html")).unwrap();
        headers.add(Bytes::from_static(b"Host"), Bytes::from_static(b"localhost")).unwrap();
        headers.add(Bytes::from_static(b"Accept"), Bytes::from_static(b"*/*")).unwrap();

        assert_eq!(headers.count("Accept"), 2);
        assert_eq!(headers.last("Accept"), Some(&Bytes::from_static(b"*/*")));
        assert_eq!(headers.nth("Accept", 0), Some(&Bytes::from_static(b"text/html")));
        assert_eq!(headers.nth("Accept", 1), Some(&Bytes::from_static(b"*/*")));
        assert_eq!(headers.get_all("Accept"), &[Bytes::from_static(b"text/html"), Bytes::from_static(b"*/*")]);
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn out_of_range_nth_has_no_side_effects() {
        let mut headers = store(4);
        headers.add(Bytes::from_static(b"Cookie"), Bytes::from_static(b"a=1")).unwrap();

        assert_eq!(headers.nth("Cookie", 1), None);
        assert_eq!(headers.nth("Cookie", usize::MAX), None);

        // the sequence still behaves normally afterwards
        assert_eq!(headers.nth("Cookie", 0), Some(&Bytes::from_static(b"a=1")));
        headers.add(Bytes::from_static(b"Cookie"), Bytes::from_static(b"b=2")).unwrap();
        assert_eq!(headers.nth("Cookie", 1), Some(&Bytes::from_static(b"b=2")));
    }

    #[test]
    fn missing_key() {
        let headers = store(4);
        assert_eq!(headers.last("Host"), None);
        assert_eq!(headers.nth("Host", 0), None);
        assert_eq!(headers.count("Host"), 0);
        assert!(headers.get_all("Host").is_empty());
        assert!(!headers.contains("Host"));
        assert!(headers.is_empty());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let mut headers = store(4);
        headers.add(Bytes::from_static(b"Content-Length"), Bytes::from_static(b"4")).unwrap();

        assert_eq!(headers.count("Content-Length"), 1);
        assert_eq!(headers.count("content-length"), 0);
        assert_eq!(headers.last(b"Content-Length"), Some(&Bytes::from_static(b"4")));
    }

    #[test]
    fn ceiling_applies_across_keys() {
        let mut headers = store(2);
        headers.add(Bytes::from_static(b"A"), Bytes::from_static(b"1")).unwrap();
        headers.add(Bytes::from_static(b"B"), Bytes::from_static(b"2")).unwrap();

        let result = headers.add(Bytes::from_static(b"A"), Bytes::from_static(b"3"));
        assert_eq!(result, Err(HeaderError::OutOfBounds { max_values: 2 }));

        let result = headers.add(Bytes::from_static(b"C"), Bytes::from_static(b"3"));
        assert_eq!(result, Err(HeaderError::OutOfBounds { max_values: 2 }));

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.count("A"), 1);
        assert!(!headers.contains("C"));
    }

    #[test]
    fn iter_visits_every_key() {
        let mut headers = store(4);
        headers.add(Bytes::from_static(b"A"), Bytes::from_static(b"1")).unwrap();
        headers.add(Bytes::from_static(b"B"), Bytes::from_static(b"2")).unwrap();
        headers.add(Bytes::from_static(b"A"), Bytes::from_static(b"3")).unwrap();

        let mut pairs: Vec<_> = headers.iter().map(|(key, values)| (key.clone(), values.len())).collect();
        pairs.sort();
        assert_eq!(pairs, vec![(Bytes::from_static(b"A"), 2), (Bytes::from_static(b"B"), 1)]);
    }
}
