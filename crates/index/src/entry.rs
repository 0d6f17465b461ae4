//! Index entries and the byte-wise key ordering
//!
//! Keys are compared byte by byte; the first differing byte decides, and a
//! key that is a strict prefix of another sorts first. No locale, encoding or
//! structural comparison is involved.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Compare two keys byte-wise (lexicographic, unsigned bytes)
pub fn compare_key_bytes(a: &[u8], b: &[u8]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Owned key ordered by [`compare_key_bytes`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexKey(Vec<u8>);

impl IndexKey {
    /// Wrap raw key bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        IndexKey(bytes.into())
    }

    /// Raw key bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwrap into the raw bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_key_bytes(&self.0, &other.0)
    }
}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One entry of the ordered index, or one logical index in the registry
///
/// Entries hold copies of key bytes. They are advisory: an entry may outlive
/// or lag behind the bucket item it was created from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Key bytes (empty for registry entries)
    pub key: Vec<u8>,
    /// Logical index name (empty for tree entries)
    pub index: String,
    /// Owning bucket/table name
    pub table: String,
    /// Set when a later write replaced this entry
    pub modified: bool,
}

impl IndexEntry {
    /// Tree entry for a key written to `table`
    pub fn for_key(key: &[u8], table: &str) -> Self {
        IndexEntry {
            key: key.to_vec(),
            index: String::new(),
            table: table.to_string(),
            modified: false,
        }
    }

    /// Registry entry for a logical index
    pub fn for_index(name: &str) -> Self {
        IndexEntry {
            index: name.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_equal() {
        assert_eq!(compare_key_bytes(b"abc", b"abc"), Ordering::Equal);
        assert_eq!(compare_key_bytes(b"", b""), Ordering::Equal);
    }

    #[test]
    fn test_compare_prefix_sorts_first() {
        assert_eq!(compare_key_bytes(b"ab", b"abc"), Ordering::Less);
        assert_eq!(compare_key_bytes(b"abc", b"ab"), Ordering::Greater);
        assert_eq!(compare_key_bytes(b"", b"a"), Ordering::Less);
    }

    #[test]
    fn test_compare_unsigned_bytes() {
        // 0xFF must sort after 0x7F (no sign extension)
        assert_eq!(compare_key_bytes(&[0xFF], &[0x7F]), Ordering::Greater);
        assert_eq!(compare_key_bytes(&[0x00, 0xFF], &[0x01]), Ordering::Less);
    }

    #[test]
    fn test_index_key_ord_matches_comparator() {
        let mut keys = vec![
            IndexKey::new(b"b".to_vec()),
            IndexKey::new(b"a".to_vec()),
            IndexKey::new(b"ab".to_vec()),
            IndexKey::new(Vec::new()),
        ];
        keys.sort();
        let raw: Vec<&[u8]> = keys.iter().map(|k| k.as_bytes()).collect();
        assert_eq!(raw, vec![&b""[..], b"a", b"ab", b"b"]);
    }

    #[test]
    fn test_entry_constructors() {
        let e = IndexEntry::for_key(b"alice", "users");
        assert_eq!(e.key, b"alice");
        assert_eq!(e.table, "users");
        assert!(!e.modified);

        let r = IndexEntry::for_index("by_name");
        assert_eq!(r.index, "by_name");
        assert!(r.key.is_empty());
    }
}
