//! Persistent insertion-ordered map.
//!
//! Every top-level collection in a document (components, colors, fonts,
//! breakpoints, artboards) and every per-layer prop/binding table is an
//! [`OrderedMap`]. Insertion order is semantically meaningful: it drives
//! default pickers ("first color") and the serialized boundary shape.
//!
//! All operations are copy-on-write. Values sit behind `Arc`, so cloning a
//! snapshot or producing an updated map shares every untouched entry.

use std::sync::Arc;

use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// An immutable associative container preserving insertion order.
///
/// `set` on an existing key replaces the value in place (position preserved);
/// `set` on a new key appends. Lookup is a linear scan, which is acceptable
/// for the tens-to-low-hundreds of entries a design document carries.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, Arc<V>)>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: Clone + PartialEq, V> OrderedMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Returns a new map with `key` bound to `value`.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set(&self, key: K, value: V) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter().position(|(k, _)| *k == key) {
            Some(idx) => entries[idx] = (key, Arc::new(value)),
            None => entries.push((key, Arc::new(value))),
        }
        Self { entries }
    }

    /// Returns a new map without `key`. Removing an absent key is a no-op.
    pub fn remove(&self, key: &K) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|(k, _)| k != key)
            .cloned()
            .collect();
        Self { entries }
    }

    /// Returns a new map with the entry at `old` rekeyed to `new`,
    /// preserving its position. A miss on `old` is a no-op.
    pub fn rename_key(&self, old: &K, new: K) -> Self {
        let mut entries = self.entries.clone();
        if let Some(idx) = entries.iter().position(|(k, _)| k == old) {
            entries[idx].0 = new;
        }
        Self { entries }
    }

    /// The key of the first (oldest) entry.
    pub fn first_key(&self) -> Option<&K> {
        self.entries.first().map(|(k, _)| k)
    }

    /// The key of the nth entry, in insertion order.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.entries.get(index).map(|(k, _)| k)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v.as_ref()))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v.as_ref())
    }

    /// Returns a new map with every value rebuilt by `f`, order preserved.
    pub fn map_values(&self, mut f: impl FnMut(&K, &V) -> V) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), Arc::new(f(k, v))))
            .collect();
        Self { entries }
    }
}

impl<K: Clone + PartialEq, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map = map.set(k, v);
        }
        map
    }
}

#[derive(Serialize)]
struct EntryRef<'a, K, V> {
    id: &'a K,
    #[serde(flatten)]
    fields: &'a V,
}

#[derive(Deserialize)]
struct Entry<K, V> {
    id: K,
    #[serde(flatten)]
    fields: V,
}

/// Serializes as an ordered array of objects with the key inlined as `id`
/// beside the value's own fields: `[{"id": …, …fields}, …]`.
///
/// Values must therefore serialize as maps and must not carry an `id` field
/// of their own. Tables with bare-string values use [`as_object`] instead.
impl<K: Serialize, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            seq.serialize_element(&EntryRef {
                id: k,
                fields: v.as_ref(),
            })?;
        }
        seq.end()
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedMap<K, V>
where
    K: Deserialize<'de> + Clone + PartialEq,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<Entry<K, V>>::deserialize(deserializer)?;
        Ok(entries.into_iter().map(|e| (e.id, e.fields)).collect())
    }
}

/// Serde adapter for name-keyed value tables, serialized as a plain JSON
/// object instead of an entry array.
///
/// Bare-string values have no fields to inline an `id` beside, so the tables
/// holding them (instance and example prop values) use
/// `#[serde(with = "crate::ordmap::as_object")]`. Entry order is the
/// object's key order.
pub mod as_object {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{Deserializer, MapAccess, Visitor};
    use serde::ser::{SerializeMap, Serializer};
    use serde::{Deserialize, Serialize};

    use super::OrderedMap;

    pub fn serialize<K, V, S>(map: &OrderedMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        K: Serialize + Clone + PartialEq,
        V: Serialize,
        S: Serializer,
    {
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (k, v) in map.iter() {
            out.serialize_entry(k, v)?;
        }
        out.end()
    }

    pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<OrderedMap<K, V>, D::Error>
    where
        K: Deserialize<'de> + Clone + PartialEq,
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        struct MapVisitor<K, V>(PhantomData<(K, V)>);

        impl<'de, K, V> Visitor<'de> for MapVisitor<K, V>
        where
            K: Deserialize<'de> + Clone + PartialEq,
            V: Deserialize<'de>,
        {
            type Value = OrderedMap<K, V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of prop values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry()? {
                    map = map.set(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor(PhantomData))
    }
}
