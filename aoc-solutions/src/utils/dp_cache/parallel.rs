//! Thread-safe DP cache with rayon fan-out over independent queries.

use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use rayon::ThreadPool;
use rayon::prelude::*;

use super::backend::{DashMapBackend, ParallelBackend, RwLockHashMapBackend};
use super::problem::{DepthLimitExceeded, ParallelDpProblem};

/// A memoizing evaluator whose store is shared between threads.
///
/// Any number of threads may call [`get`](Self::get) at once. Each call
/// recurses on its own thread; only the backend is shared. Two threads can
/// race to compute the same index, in which case both produce the same
/// value and the first one stored is the one every caller sees afterwards.
///
/// [`get_many`](Self::get_many) evaluates a batch of independent indices
/// with rayon, on the configured pool if one was given.
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DashMapBackend, DepthLimitExceeded, DpProblem, ParallelDpCache, Recurse};
///
/// struct Collatz;
///
/// impl DpProblem<u64, u64> for Collatz {
///     type Error = DepthLimitExceeded;
///
///     fn compute(&self, n: &u64, recurse: &mut Recurse<'_, u64, u64, Self::Error>) -> Result<u64, Self::Error> {
///         match *n {
///             1 => Ok(0),
///             n if n % 2 == 0 => Ok(1 + recurse(&(n / 2))?),
///             n => Ok(1 + recurse(&(3 * n + 1))?),
///         }
///     }
/// }
///
/// let cache = ParallelDpCache::with_problem(DashMapBackend::new(), Collatz);
/// assert_eq!(cache.get(&27).unwrap(), 111);
/// assert_eq!(cache.get_many(&[1, 2, 3]).unwrap(), vec![0, 1, 7]);
/// ```
pub struct ParallelDpCache<I, K, B, P> {
    backend: B,
    problem: P,
    max_depth: Option<usize>,
    pool: Option<Arc<ThreadPool>>,
    _phantom: PhantomData<fn(&I) -> K>,
}

impl<I, K, B, P> ParallelDpCache<I, K, B, P>
where
    I: Hash + Eq + Clone + Send + Sync,
    K: Clone + Send + Sync,
    B: ParallelBackend<I, K>,
    P: ParallelDpProblem<I, K>,
    P::Error: From<DepthLimitExceeded> + Send,
{
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend,
            problem,
            max_depth: None,
            pool: None,
            _phantom: PhantomData,
        }
    }

    /// Runs [`get_many`](Self::get_many) batches on `pool` instead of the
    /// global rayon pool.
    pub fn with_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Same meaning as [`DpCacheBuilder::max_depth`](super::DpCacheBuilder::max_depth).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Returns the value for `index`, computing and storing it if needed.
    pub fn get(&self, index: &I) -> Result<K, P::Error> {
        self.get_at_depth(index, 1)
    }

    fn get_at_depth(&self, index: &I, depth: usize) -> Result<K, P::Error> {
        // Fast path: check if already computed
        if let Some(value) = self.backend.get(index) {
            return Ok(value);
        }

        if let Some(limit) = self.max_depth
            && depth > limit
        {
            return Err(DepthLimitExceeded { limit }.into());
        }

        // No lock is held while the problem recurses
        let value = self
            .problem
            .compute(index, &mut |next: &I| self.get_at_depth(next, depth + 1))?;

        Ok(self.backend.get_or_insert(index.clone(), value))
    }

    /// Evaluates every index in parallel, preserving order.
    ///
    /// Stops at the first error rayon observes.
    pub fn get_many(&self, indices: &[I]) -> Result<Vec<K>, P::Error> {
        let resolve = || {
            indices
                .par_iter()
                .map(|index| self.get(index))
                .collect::<Result<Vec<K>, P::Error>>()
        };

        match &self.pool {
            Some(pool) => pool.install(resolve),
            None => resolve(),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.backend.len()
    }
}

/// A parallel DP cache backed by DashMap.
pub type DashMapDpCache<I, K, P> = ParallelDpCache<I, K, DashMapBackend<I, K>, P>;

/// A parallel DP cache backed by `RwLock<HashMap>`.
pub type RwLockDpCache<I, K, P> = ParallelDpCache<I, K, RwLockHashMapBackend<I, K>, P>;
