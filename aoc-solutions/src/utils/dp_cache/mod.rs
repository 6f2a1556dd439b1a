//! Memoization for recursive problems over hashable states
//!
//! A problem is written once as a plain recursive definition,
//! `(index, recurse) -> value`, against the [`DpProblem`] trait. The cache
//! supplies `recurse` as a handle back into itself, so the definition never
//! refers to the cache and every sub-problem it reaches is evaluated at
//! most once per cache instance.
//!
//! # Cache Types
//!
//! - [`DpCache`]: Single-threaded cache with `RefCell` for interior mutability
//! - [`ParallelDpCache`]: Thread-safe cache shared by rayon workers
//!
//! # Backend Types
//!
//! Sequential backends (for `DpCache`):
//! - [`HashMapBackend`]: Any `Hash + Eq` index, e.g. composite puzzle states
//! - [`VecBackend`]: Dense `usize` indices (auto-growing)
//! - [`NoCacheBackend`]: Stores nothing; plain recursion for reference runs
//!
//! Parallel backends (for `ParallelDpCache`):
//! - [`DashMapBackend`]: Sharded concurrent map
//! - [`RwLockHashMapBackend`]: Single `RwLock<HashMap>`, good for read-heavy workloads
//! - [`ParallelNoCacheBackend`]: Stores nothing
//!
//! # Depth Budget
//!
//! Recursion happens on the native stack. For untrusted inputs set a depth
//! budget (`max_depth`); a call nested deeper than the budget fails with
//! [`DepthLimitExceeded`] instead of overflowing the stack.
//!
//! # Warning: Cycle Behavior
//!
//! **These caches do NOT detect cycles.** A problem whose recursion comes
//! back to an index still being computed loops until the stack or the depth
//! budget runs out. Sub-problems must form a DAG.
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{
//!     DepthLimitExceeded, DpCache, DpProblem, HashMapBackend, NoCacheBackend, Recurse,
//! };
//!
//! /// Lattice paths from `(r, c)` to the origin moving up or left
//! struct GridPaths;
//!
//! impl DpProblem<(u32, u32), u64> for GridPaths {
//!     type Error = DepthLimitExceeded;
//!
//!     fn compute(
//!         &self,
//!         &(r, c): &(u32, u32),
//!         recurse: &mut Recurse<'_, (u32, u32), u64, Self::Error>,
//!     ) -> Result<u64, Self::Error> {
//!         match (r, c) {
//!             (0, _) | (_, 0) => Ok(1),
//!             _ => Ok(recurse(&(r - 1, c))? + recurse(&(r, c - 1))?),
//!         }
//!     }
//! }
//!
//! let memoized = DpCache::builder()
//!     .backend(HashMapBackend::new())
//!     .problem(GridPaths)
//!     .build();
//! let plain = DpCache::builder()
//!     .backend(NoCacheBackend)
//!     .problem(GridPaths)
//!     .build();
//!
//! assert_eq!(memoized.get(&(4, 4)).unwrap(), 70);
//! assert_eq!(plain.get(&(4, 4)).unwrap(), 70);
//! assert_eq!(memoized.get(&(16, 16)).unwrap(), 601_080_390);
//! ```

mod backend;
mod cache;
mod parallel;
mod problem;

pub use backend::{
    Backend, DashMapBackend, HashMapBackend, NoCacheBackend, ParallelBackend,
    ParallelNoCacheBackend, RwLockHashMapBackend, VecBackend,
};
pub use cache::{DpCache, DpCacheBuilder};
pub use parallel::{DashMapDpCache, ParallelDpCache, RwLockDpCache};
pub use problem::{ClosureProblem, DepthLimitExceeded, DpProblem, ParallelDpProblem, Recurse};
