//! 2023 day 12: counting damaged-spring arrangements.

mod arrangements;
mod error;
mod springs;

#[cfg(test)]
mod tests;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

pub use arrangements::{
    count_arrangements, total_arrangements, total_arrangements_parallel, ArrangementCounter,
    MAX_DEPTH,
};
pub use error::ArrangementError;
pub use springs::{Spring, SpringRow};

/// Copies of each row in part two.
pub const UNFOLD_COPIES: usize = 5;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["2023", "memo"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<SpringRow>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rows = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                line.parse::<SpringRow>()
                    .map_err(|e| anyhow!("(line {}) {}", line_idx + 1, e))
            })
            .collect::<Result<Vec<_>, anyhow::Error>>()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        debug!(rows = rows.len(), "parsed spring rows");
        Ok(rows)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_arrangements(shared.iter())
            .map(|total| total.to_string())
            .map_err(SolveError::failed)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let unfolded: Vec<SpringRow> = shared
            .iter()
            .map(|row| row.unfold(UNFOLD_COPIES))
            .collect();
        total_arrangements_parallel(&unfolded)
            .map(|total| total.to_string())
            .map_err(SolveError::failed)
    }
}
