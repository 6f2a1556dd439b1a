use aoc_solutions as _;
use aoc_solver::{FactoryInfo, SolverError, SolverRegistryBuilder};

const SPRINGS: &str = "\
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

const PIPES: &str = "\
..F7.
.FJ|.
SJ.L7
|F--J
LJ...
";

#[test]
fn test_plugins_are_discovered() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let infos: Vec<FactoryInfo> = registry.iter_info().collect();
    assert_eq!(
        infos,
        vec![
            FactoryInfo { year: 2023, day: 10, parts: 2 },
            FactoryInfo { year: 2023, day: 12, parts: 2 },
        ]
    );
}

#[test]
fn test_tag_filter() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"memo"))
        .unwrap()
        .build();

    assert_eq!(registry.len(), 1);
    assert!(registry.contains(2023, 12));
    assert!(!registry.contains(2023, 10));
}

#[test]
fn test_solving_through_the_registry() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    let mut springs = registry.create_solver(2023, 12, SPRINGS).unwrap();
    assert_eq!(springs.solve(1).unwrap().answer, "21");
    assert_eq!(springs.solve(2).unwrap().answer, "525152");
    assert!(springs.solve(3).is_err());

    let mut pipes = registry.create_solver(2023, 10, PIPES).unwrap();
    assert_eq!(pipes.solve(1).unwrap().answer, "8");
    assert_eq!(pipes.solve(2).unwrap().answer, "1");
}

#[test]
fn test_bad_input_is_a_parse_error() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .unwrap()
        .build();

    assert!(matches!(
        registry.create_solver(2023, 12, "#?# one"),
        Err(SolverError::ParseError(_))
    ));
    assert!(matches!(
        registry.create_solver(2023, 10, "F-7\n|.|\nL-J"),
        Err(SolverError::ParseError(_))
    ));
}
