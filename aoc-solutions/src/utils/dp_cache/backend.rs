//! Storage backends for the DP caches.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

use dashmap::DashMap;

/// Storage for a single-threaded [`DpCache`](super::DpCache).
///
/// # Contract
///
/// - `get_or_insert` never replaces a stored value: once an index has a
///   value, every later lookup returns that same value.
pub trait Backend<I, K> {
    /// Returns the stored value for `index`, if any.
    fn get(&self, index: &I) -> Option<&K>;

    /// Stores `value` unless `index` already has one, and returns whichever
    /// value is now associated with `index`.
    fn get_or_insert(&mut self, index: I, value: K) -> K;

    /// Number of stored values.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Storage shared between threads by a [`ParallelDpCache`](super::ParallelDpCache).
///
/// Same contract as [`Backend`], through `&self`.
pub trait ParallelBackend<I, K>: Send + Sync {
    fn get(&self, index: &I) -> Option<K>;

    fn get_or_insert(&self, index: I, value: K) -> K;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A Vec-based backend for dense `usize` indices.
///
/// Grows to fit the largest index seen.
#[derive(Debug)]
pub struct VecBackend<K> {
    data: Vec<Option<K>>,
}

impl<K> VecBackend<K> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Option<&K> {
        self.data.get(*index)?.as_ref()
    }

    fn get_or_insert(&mut self, index: usize, value: K) -> K {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        self.data[index].get_or_insert(value).clone()
    }

    fn len(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}

/// A HashMap-based backend for arbitrary `Hash + Eq` indices.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K: Clone> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert(&mut self, index: I, value: K) -> K {
        self.data.entry(index).or_insert(value).clone()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

/// A backend that stores nothing, turning the cache into plain recursion.
///
/// Reference point for checking that memoization never changes a result.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCacheBackend;

impl<I, K> Backend<I, K> for NoCacheBackend {
    fn get(&self, _index: &I) -> Option<&K> {
        None
    }

    fn get_or_insert(&mut self, _index: I, value: K) -> K {
        value
    }

    fn len(&self) -> usize {
        0
    }
}

/// A concurrent backend using DashMap's sharded locking.
#[derive(Debug)]
pub struct DashMapBackend<I: Hash + Eq, K> {
    data: DashMap<I, K>,
}

impl<I: Hash + Eq, K> DashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }
}

impl<I: Hash + Eq, K> Default for DashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, K> ParallelBackend<I, K> for DashMapBackend<I, K>
where
    I: Hash + Eq + Send + Sync,
    K: Clone + Send + Sync,
{
    fn get(&self, index: &I) -> Option<K> {
        self.data.get(index).map(|entry| entry.value().clone())
    }

    fn get_or_insert(&self, index: I, value: K) -> K {
        self.data.entry(index).or_insert(value).value().clone()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

/// A single `RwLock<HashMap>`; suits read-heavy workloads.
///
/// A poisoned lock is still used: stored values are only ever inserted
/// whole, so a panicking writer cannot leave a half-written entry.
#[derive(Debug)]
pub struct RwLockHashMapBackend<I, K> {
    data: RwLock<HashMap<I, K>>,
}

impl<I, K> RwLockHashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }
}

impl<I, K> Default for RwLockHashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, K> ParallelBackend<I, K> for RwLockHashMapBackend<I, K>
where
    I: Hash + Eq + Send + Sync,
    K: Clone + Send + Sync,
{
    fn get(&self, index: &I) -> Option<K> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index)
            .cloned()
    }

    fn get_or_insert(&self, index: I, value: K) -> K {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(index)
            .or_insert(value)
            .clone()
    }

    fn len(&self) -> usize {
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Thread-safe counterpart of [`NoCacheBackend`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ParallelNoCacheBackend;

impl<I, K> ParallelBackend<I, K> for ParallelNoCacheBackend {
    fn get(&self, _index: &I) -> Option<K> {
        None
    }

    fn get_or_insert(&self, _index: I, value: K) -> K {
        value
    }

    fn len(&self) -> usize {
        0
    }
}
