//! 2023 day 10: the pipe maze.

mod maze;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

pub use maze::{Direction, MazeError, PipeMaze, Position, Tile};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["2023", "grid"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    maze: PipeMaze,
    main_loop: Vec<Position>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let maze = PipeMaze::parse(input).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        let main_loop = maze
            .main_loop()
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        debug!(start = ?maze.start(), length = main_loop.len(), "traced main loop");
        Ok(SharedData { maze, main_loop })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((shared.main_loop.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.maze.enclosed_count(&shared.main_loop).to_string())
    }
}
