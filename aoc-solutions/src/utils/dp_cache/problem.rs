//! Recursive problem definitions for the DP caches.

use std::marker::PhantomData;

use thiserror::Error;

/// Memoized entry point handed to [`DpProblem::compute`].
///
/// Calling it with a sub-index returns that sub-index's value, computing
/// and caching it first if needed.
pub type Recurse<'r, I, K, E> = dyn FnMut(&I) -> Result<K, E> + 'r;

/// Returned when a cache with a depth budget would recurse past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("recursion depth limit of {limit} exceeded")]
pub struct DepthLimitExceeded {
    pub limit: usize,
}

/// A recursive problem over index type `I` producing values of type `K`.
///
/// `compute` receives the index to solve and a `recurse` handle. Every
/// sub-problem must be resolved through `recurse` so the cache sees it.
/// Infallible problems can use [`DepthLimitExceeded`] as their error type.
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DepthLimitExceeded, DpProblem, Recurse};
///
/// struct Fibonacci;
///
/// impl DpProblem<usize, u64> for Fibonacci {
///     type Error = DepthLimitExceeded;
///
///     fn compute(
///         &self,
///         n: &usize,
///         recurse: &mut Recurse<'_, usize, u64, Self::Error>,
///     ) -> Result<u64, Self::Error> {
///         if *n <= 1 {
///             Ok(*n as u64)
///         } else {
///             Ok(recurse(&(n - 1))? + recurse(&(n - 2))?)
///         }
///     }
/// }
/// ```
pub trait DpProblem<I, K> {
    /// Error raised by `compute`; must absorb depth budget failures
    type Error;

    fn compute(
        &self,
        index: &I,
        recurse: &mut Recurse<'_, I, K, Self::Error>,
    ) -> Result<K, Self::Error>;
}

/// Problems that can be shared across rayon workers.
pub trait ParallelDpProblem<I, K>: DpProblem<I, K> + Send + Sync {}

impl<T, I, K> ParallelDpProblem<I, K> for T where T: DpProblem<I, K> + Send + Sync {}

/// Adapts a closure `(index, recurse) -> value` to [`DpProblem`].
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{
///     ClosureProblem, DepthLimitExceeded, DpCache, Recurse, VecBackend,
/// };
///
/// let factorial = ClosureProblem::new(
///     |n: &usize, recurse: &mut Recurse<'_, usize, u64, DepthLimitExceeded>| {
///         if *n == 0 { Ok(1) } else { Ok(*n as u64 * recurse(&(n - 1))?) }
///     },
/// );
///
/// let cache = DpCache::builder()
///     .backend(VecBackend::new())
///     .problem(factorial)
///     .build();
///
/// assert_eq!(cache.get(&10).unwrap(), 3_628_800);
/// ```
pub struct ClosureProblem<I, K, E, F> {
    compute_fn: F,
    _phantom: PhantomData<fn(&I) -> Result<K, E>>,
}

impl<I, K, E, F> ClosureProblem<I, K, E, F>
where
    F: Fn(&I, &mut Recurse<'_, I, K, E>) -> Result<K, E>,
{
    pub fn new(compute_fn: F) -> Self {
        Self {
            compute_fn,
            _phantom: PhantomData,
        }
    }
}

impl<I, K, E, F> DpProblem<I, K> for ClosureProblem<I, K, E, F>
where
    F: Fn(&I, &mut Recurse<'_, I, K, E>) -> Result<K, E>,
{
    type Error = E;

    fn compute(&self, index: &I, recurse: &mut Recurse<'_, I, K, E>) -> Result<K, E> {
        (self.compute_fn)(index, recurse)
    }
}
