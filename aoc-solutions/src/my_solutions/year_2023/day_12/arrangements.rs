//! Counting the ways a row's unknown springs can be resolved.

use tracing::debug;

use super::error::ArrangementError;
use super::springs::{Spring, SpringRow};
use crate::utils::dp_cache::{
    DashMapBackend, DpCache, DpProblem, HashMapBackend, ParallelDpCache, Recurse,
};

/// Nested evaluations allowed per query. Recursion goes one level per
/// placed group (about 30 for an unfolded puzzle row); the cap keeps debug
/// builds inside a 2 MiB rayon worker stack.
pub const MAX_DEPTH: usize = 256;

/// Places the first group at every feasible offset and recurses on what is
/// left of the row.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrangementCounter;

impl DpProblem<SpringRow, u64> for ArrangementCounter {
    type Error = ArrangementError;

    fn compute(
        &self,
        row: &SpringRow,
        recurse: &mut Recurse<'_, SpringRow, u64, Self::Error>,
    ) -> Result<u64, Self::Error> {
        let pattern = row.pattern();
        let Some((&first, rest)) = row.groups().split_first() else {
            return Ok(u64::from(!pattern.contains(&Spring::Damaged)));
        };

        let min_space_for_rest = rest
            .iter()
            .fold(rest.len(), |space, &group| space.saturating_add(group));
        let Some(last_offset) = pattern
            .len()
            .checked_sub(min_space_for_rest.saturating_add(first))
        else {
            return Ok(0);
        };

        let mut total = 0u64;
        for offset in 0..=last_offset {
            if fits_at(pattern, offset, first) {
                let ways = recurse(&row.remainder(offset + first + 1))?;
                total = total
                    .checked_add(ways)
                    .ok_or(ArrangementError::Overflow)?;
            }
            // Skipping past a damaged spring would leave it outside every group
            if pattern[offset] == Spring::Damaged {
                break;
            }
        }
        Ok(total)
    }
}

/// Whether a run of `len` damaged springs can start at `offset`, followed by
/// an operational separator unless the run ends the row.
///
/// The springs before `offset` are not checked: the caller stops at the
/// first damaged one.
fn fits_at(pattern: &[Spring], offset: usize, len: usize) -> bool {
    pattern[offset..offset + len]
        .iter()
        .all(|spring| spring.accepts(Spring::Damaged))
        && pattern
            .get(offset + len)
            .is_none_or(|spring| spring.accepts(Spring::Operational))
}

/// Counts the arrangements of a single row with a cache of its own.
pub fn count_arrangements(row: &SpringRow) -> Result<u64, ArrangementError> {
    DpCache::builder()
        .backend(HashMapBackend::new())
        .problem(ArrangementCounter)
        .max_depth(MAX_DEPTH)
        .build::<SpringRow, u64>()
        .get(row)
}

/// Sums the arrangements of every row, sharing one cache across rows.
pub fn total_arrangements<'a>(
    rows: impl IntoIterator<Item = &'a SpringRow>,
) -> Result<u64, ArrangementError> {
    let cache = DpCache::builder()
        .backend(HashMapBackend::new())
        .problem(ArrangementCounter)
        .max_depth(MAX_DEPTH)
        .build::<SpringRow, u64>();

    let mut total = 0u64;
    for row in rows {
        total = total
            .checked_add(cache.get(row)?)
            .ok_or(ArrangementError::Overflow)?;
    }
    debug!(states = cache.cached_len(), total, "counted arrangements");
    Ok(total)
}

/// Like [`total_arrangements`], with rows spread over rayon workers that
/// share one concurrent cache.
pub fn total_arrangements_parallel(rows: &[SpringRow]) -> Result<u64, ArrangementError> {
    let cache = ParallelDpCache::with_problem(DashMapBackend::new(), ArrangementCounter)
        .with_max_depth(MAX_DEPTH);

    let total = cache.get_many(rows)?.into_iter().try_fold(0u64, |total, ways| {
        total.checked_add(ways).ok_or(ArrangementError::Overflow)
    })?;
    debug!(
        rows = rows.len(),
        states = cache.cached_len(),
        total,
        "counted arrangements in parallel"
    );
    Ok(total)
}
