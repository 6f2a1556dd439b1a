use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, Solver,
    SolverRegistryBuilder,
};

#[derive(Debug, Default)]
struct Runs {
    lengths: Vec<u64>,
    longest: Option<u64>,
}

/// Splits `#`/`.` strings into damaged run lengths
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 3)]
#[aoc(year = 2015, day = 25, tags = ["macro-test", "runs"])]
struct RunLengths;

impl AocParser for RunLengths {
    type SharedData<'a> = Runs;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        if input.chars().any(|c| !matches!(c, '#' | '.' | '\n')) {
            return Err(ParseError::InvalidFormat("expected only '#' and '.'".into()));
        }
        let lengths = input
            .split(['.', '\n'])
            .filter(|run| !run.is_empty())
            .map(|run| run.len() as u64)
            .collect();
        Ok(Runs {
            lengths,
            longest: None,
        })
    }
}

impl PartSolver<1> for RunLengths {
    fn solve(shared: &mut Runs) -> Result<String, SolveError> {
        let longest = shared.lengths.iter().copied().max().unwrap_or(0);
        shared.longest = Some(longest);
        Ok(shared.lengths.len().to_string())
    }
}

impl PartSolver<2> for RunLengths {
    fn solve(shared: &mut Runs) -> Result<String, SolveError> {
        shared
            .longest
            .map(|longest| longest.to_string())
            .ok_or_else(|| SolveError::failed("part 1 must run first"))
    }
}

impl PartSolver<3> for RunLengths {
    fn solve(shared: &mut Runs) -> Result<String, SolveError> {
        Ok(shared.lengths.iter().sum::<u64>().to_string())
    }
}

#[test]
fn test_parts_constant_matches_attribute() {
    assert_eq!(<RunLengths as Solver>::PARTS, 3);
}

#[test]
fn test_dispatch_reaches_each_part() {
    let mut shared = RunLengths::parse("##..#.###").unwrap();
    assert_eq!(RunLengths::solve_part(&mut shared, 1).unwrap(), "3");
    assert_eq!(RunLengths::solve_part(&mut shared, 2).unwrap(), "3");
    assert_eq!(RunLengths::solve_part(&mut shared, 3).unwrap(), "6");
}

#[test]
fn test_later_part_sees_earlier_part_state() {
    let mut shared = RunLengths::parse("#.##").unwrap();
    assert!(matches!(
        RunLengths::solve_part(&mut shared, 2),
        Err(SolveError::SolveFailed(_))
    ));
    RunLengths::solve_part(&mut shared, 1).unwrap();
    assert_eq!(RunLengths::solve_part(&mut shared, 2).unwrap(), "2");
}

#[test]
fn test_unknown_part_is_not_implemented() {
    let mut shared = RunLengths::parse("#").unwrap();
    assert!(matches!(
        RunLengths::solve_part(&mut shared, 0),
        Err(SolveError::PartNotImplemented(0))
    ));
    assert!(matches!(
        RunLengths::solve_part(&mut shared, 4),
        Err(SolveError::PartNotImplemented(4))
    ));
}

#[test]
fn test_auto_registered_plugin_is_discoverable() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build();

    let info = registry.get_info(2015, 25).expect("plugin registered");
    assert_eq!(info.parts, 3);

    let mut solver = registry.create_solver(2015, 25, "#.#.#").unwrap();
    assert_eq!(solver.solve(3).unwrap().answer, "3");
}
