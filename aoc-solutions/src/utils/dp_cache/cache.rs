//! Single-threaded DP cache implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::{DepthLimitExceeded, DpProblem};

/// A memoizing evaluator for a recursive [`DpProblem`].
///
/// `get` hands the problem a `recurse` callback that re-enters the cache,
/// so every sub-problem reached during the recursion is computed at most
/// once and every later request for it returns the stored value.
///
/// # Type Parameters
///
/// - `I`: Index type (must implement `Clone`)
/// - `K`: Value type (must implement `Clone`)
/// - `B`: Backend storage type (must implement `Backend<I, K>`)
/// - `P`: Problem type (must implement `DpProblem<I, K>`)
///
/// # Warning: No Cycle Detection
///
/// A problem whose recursion revisits an index it is still computing
/// recurses until the stack overflows, or until the depth budget set with
/// [`DpCacheBuilder::max_depth`] is hit.
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DepthLimitExceeded, DpCache, DpProblem, HashMapBackend, Recurse};
///
/// /// Number of ways to climb `n` stairs taking 1 or 2 steps at a time
/// struct Stairs;
///
/// impl DpProblem<u32, u64> for Stairs {
///     type Error = DepthLimitExceeded;
///
///     fn compute(&self, n: &u32, recurse: &mut Recurse<'_, u32, u64, Self::Error>) -> Result<u64, Self::Error> {
///         match *n {
///             0 | 1 => Ok(1),
///             n => Ok(recurse(&(n - 1))? + recurse(&(n - 2))?),
///         }
///     }
/// }
///
/// let cache = DpCache::builder()
///     .backend(HashMapBackend::new())
///     .problem(Stairs)
///     .build();
/// assert_eq!(cache.get(&40).unwrap(), 165_580_141);
/// assert_eq!(cache.cached_len(), 41);
/// ```
pub struct DpCache<I, K, B, P> {
    backend: RefCell<B>,
    problem: P,
    max_depth: Option<usize>,
    _phantom: PhantomData<fn(&I) -> K>,
}

impl DpCache<(), (), (), ()> {
    /// Starts building a cache; set a backend and a problem, then `build()`.
    pub fn builder() -> DpCacheBuilder<(), ()> {
        DpCacheBuilder {
            backend: (),
            problem: (),
            max_depth: None,
        }
    }
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
    P::Error: From<DepthLimitExceeded>,
{
    /// Creates a cache with no depth budget.
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            max_depth: None,
            _phantom: PhantomData,
        }
    }

    /// Returns the value for `index`, computing and storing it if needed.
    ///
    /// # Errors
    ///
    /// Whatever the problem's `compute` returns, or
    /// [`DepthLimitExceeded`] converted into `P::Error` when a depth
    /// budget is set and the recursion goes past it. Failed computations
    /// are not cached.
    pub fn get(&self, index: &I) -> Result<K, P::Error> {
        self.get_at_depth(index, 1)
    }

    fn get_at_depth(&self, index: &I, depth: usize) -> Result<K, P::Error> {
        // Fast path: check if already computed
        if let Some(value) = self.backend.borrow().get(index) {
            return Ok(value.clone());
        }

        if let Some(limit) = self.max_depth
            && depth > limit
        {
            return Err(DepthLimitExceeded { limit }.into());
        }

        // No borrow of the backend is held while the problem recurses
        let value = self
            .problem
            .compute(index, &mut |next: &I| self.get_at_depth(next, depth + 1))?;

        Ok(self.backend.borrow_mut().get_or_insert(index.clone(), value))
    }

    /// Number of values currently stored by the backend.
    pub fn cached_len(&self) -> usize {
        self.backend.borrow().len()
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Consumes the cache, handing back its backend.
    pub fn into_backend(self) -> B {
        self.backend.into_inner()
    }
}

/// Builder returned by [`DpCache::builder`].
pub struct DpCacheBuilder<B, P> {
    backend: B,
    problem: P,
    max_depth: Option<usize>,
}

impl<B, P> DpCacheBuilder<B, P> {
    pub fn backend<B2>(self, backend: B2) -> DpCacheBuilder<B2, P> {
        DpCacheBuilder {
            backend,
            problem: self.problem,
            max_depth: self.max_depth,
        }
    }

    pub fn problem<P2>(self, problem: P2) -> DpCacheBuilder<B, P2> {
        DpCacheBuilder {
            backend: self.backend,
            problem,
            max_depth: self.max_depth,
        }
    }

    /// Fails any `get` whose recursion nests deeper than `max_depth`
    /// uncached calls. The top-level call counts as depth 1.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn build<I, K>(self) -> DpCache<I, K, B, P>
    where
        I: Clone,
        K: Clone,
        B: Backend<I, K>,
        P: DpProblem<I, K>,
        P::Error: From<DepthLimitExceeded>,
    {
        DpCache {
            backend: RefCell::new(self.backend),
            problem: self.problem,
            max_depth: self.max_depth,
            _phantom: PhantomData,
        }
    }
}
