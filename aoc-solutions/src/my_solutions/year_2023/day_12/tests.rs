use aoc_solver::{AocParser, ParseError, PartSolver, Solver as _};
use proptest::prelude::*;

use super::*;
use crate::utils::dp_cache::{DepthLimitExceeded, DpCache, HashMapBackend, NoCacheBackend};

const SAMPLE: &str = "\
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

fn row(line: &str) -> SpringRow {
    line.parse().expect("valid row")
}

fn count(line: &str) -> u64 {
    count_arrangements(&row(line)).expect("count fits")
}

fn uncached(row: &SpringRow) -> Result<u64, ArrangementError> {
    DpCache::builder()
        .backend(NoCacheBackend)
        .problem(ArrangementCounter)
        .build::<SpringRow, u64>()
        .get(row)
}

fn damaged_runs(cells: &[Spring]) -> Vec<usize> {
    cells
        .split(|&spring| spring != Spring::Damaged)
        .map(<[Spring]>::len)
        .filter(|&len| len > 0)
        .collect()
}

/// Tries every resolution of the unknown springs.
fn brute_force(row: &SpringRow) -> u64 {
    let unknowns: Vec<usize> = row
        .pattern()
        .iter()
        .enumerate()
        .filter(|(_, spring)| **spring == Spring::Unknown)
        .map(|(pos, _)| pos)
        .collect();

    (0u32..1 << unknowns.len())
        .filter(|mask| {
            let mut cells = row.pattern().to_vec();
            for (bit, &pos) in unknowns.iter().enumerate() {
                cells[pos] = if mask >> bit & 1 == 1 {
                    Spring::Damaged
                } else {
                    Spring::Operational
                };
            }
            damaged_runs(&cells) == row.groups()
        })
        .count() as u64
}

#[test]
fn test_sample_rows() {
    let counts: Vec<u64> = SAMPLE.lines().map(count).collect();
    assert_eq!(counts, vec![1, 4, 1, 1, 4, 10]);
}

#[test]
fn test_sample_rows_unfolded() {
    let counts: Vec<u64> = SAMPLE
        .lines()
        .map(|line| count_arrangements(&row(line).unfold(UNFOLD_COPIES)).unwrap())
        .collect();
    assert_eq!(counts, vec![1, 16384, 1, 16, 2500, 506250]);
}

#[test]
fn test_solver_parts() {
    let mut rows = Solver::parse(SAMPLE).unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(<Solver as PartSolver<1>>::solve(&mut rows).unwrap(), "21");
    assert_eq!(<Solver as PartSolver<2>>::solve(&mut rows).unwrap(), "525152");
    assert_eq!(Solver::solve_part(&mut rows, 2).unwrap(), "525152");
}

#[test]
fn test_shared_and_parallel_totals_agree() {
    let rows: Vec<SpringRow> = SAMPLE.lines().map(row).collect();
    let unfolded: Vec<SpringRow> = rows.iter().map(|r| r.unfold(UNFOLD_COPIES)).collect();

    assert_eq!(total_arrangements(&rows), Ok(21));
    assert_eq!(total_arrangements_parallel(&rows), Ok(21));
    assert_eq!(total_arrangements(&unfolded), Ok(525152));
    assert_eq!(total_arrangements_parallel(&unfolded), Ok(525152));
}

#[test]
fn test_empty_rows() {
    let empty = SpringRow::new(vec![], vec![]).unwrap();
    assert_eq!(count_arrangements(&empty), Ok(1));

    let needs_group = SpringRow::new(vec![], vec![1]).unwrap();
    assert_eq!(count_arrangements(&needs_group), Ok(0));

    assert_eq!(total_arrangements(&Vec::new()), Ok(0));
}

#[test]
fn test_no_groups_left() {
    let no_groups = SpringRow::new(vec![Spring::Unknown, Spring::Operational], vec![]).unwrap();
    assert_eq!(count_arrangements(&no_groups), Ok(1));

    let leftover_damage = SpringRow::new(vec![Spring::Operational, Spring::Damaged], vec![]).unwrap();
    assert_eq!(count_arrangements(&leftover_damage), Ok(0));
}

#[test]
fn test_run_may_end_the_row() {
    assert_eq!(count("### 3"), 1);
    assert_eq!(count("#.# 1,1"), 1);
    assert_eq!(count("##.# 1,1"), 0);
    assert_eq!(count("## 3"), 0);
    assert_eq!(count("???? 4"), 1);
    assert_eq!(count("???? 2"), 3);
}

#[test]
fn test_unfold_layout() {
    assert_eq!(
        row(".# 1").unfold(UNFOLD_COPIES).to_string(),
        ".#?.#?.#?.#?.# 1,1,1,1,1"
    );
    assert_eq!(
        row("???.### 1,1,3").unfold(UNFOLD_COPIES).to_string(),
        "???.###????.###????.###????.###????.### 1,1,3,1,1,3,1,1,3,1,1,3,1,1,3"
    );
    assert_eq!(row("#?# 1,1").unfold(1), row("#?# 1,1"));
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        "??x 1".parse::<SpringRow>(),
        Err(ArrangementError::InvalidSpring('x'))
    );
    assert_eq!(
        "??? 1,0".parse::<SpringRow>(),
        Err(ArrangementError::ZeroGroup { position: 1 })
    );
    assert_eq!(
        "??? 1,-1".parse::<SpringRow>(),
        Err(ArrangementError::InvalidGroup("-1".to_string()))
    );
    assert_eq!(
        "??? 1,a".parse::<SpringRow>(),
        Err(ArrangementError::InvalidGroup("a".to_string()))
    );
    assert_eq!(
        "???".parse::<SpringRow>(),
        Err(ArrangementError::MissingGroups("???".to_string()))
    );
}

#[test]
fn test_parse_error_reports_line() {
    let err = Solver::parse("??? 1\n??? 0\n").unwrap_err();
    match err {
        ParseError::InvalidFormat(message) => {
            assert!(message.contains("line 2"), "{message}");
            assert!(message.contains("length 0"), "{message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_overflow_is_an_error() {
    // 35 single-spring groups in 104 unknowns: C(70, 35) arrangements
    let pattern = vec![Spring::Unknown; 104];
    let huge = SpringRow::new(pattern, vec![1; 35]).unwrap();
    assert_eq!(count_arrangements(&huge), Err(ArrangementError::Overflow));

    // C(64, 32) still fits
    let pattern = vec![Spring::Unknown; 95];
    let big = SpringRow::new(pattern, vec![1; 32]).unwrap();
    assert_eq!(count_arrangements(&big), Ok(1_832_624_140_942_590_534));
}

fn depth_capped_cache(limit: usize) -> DpCache<SpringRow, u64, HashMapBackend<SpringRow, u64>, ArrangementCounter> {
    DpCache::builder()
        .backend(HashMapBackend::new())
        .problem(ArrangementCounter)
        .max_depth(limit)
        .build()
}

/// `#.` repeated `n` times with `n` single groups: recursion nests `n + 1` deep.
fn deep_row(n: usize) -> SpringRow {
    let pattern = [Spring::Damaged, Spring::Operational].repeat(n);
    SpringRow::new(pattern, vec![1; n]).unwrap()
}

#[test]
fn test_depth_budget() {
    assert_eq!(depth_capped_cache(3).get(&row("#.# 1,1")), Ok(1));
    assert_eq!(
        depth_capped_cache(3).get(&row("#.#.#.#.# 1,1,1,1,1")),
        Err(ArrangementError::DepthLimit(DepthLimitExceeded { limit: 3 }))
    );
}

#[test]
fn test_cached_states_skip_the_depth_budget() {
    let four_groups = row("#.#.#.# 1,1,1,1");
    assert!(depth_capped_cache(3).get(&four_groups).is_err());

    let cache = depth_capped_cache(3);
    assert_eq!(cache.get(&row("#.# 1,1")), Ok(1));
    // The tail `#.# 1,1` is stored, so the recursion stops at depth 3
    assert_eq!(cache.get(&four_groups), Ok(1));
}

#[test]
fn test_deep_rows_stop_at_max_depth() {
    assert_eq!(count_arrangements(&deep_row(MAX_DEPTH - 1)), Ok(1));

    let too_deep = Err(ArrangementError::DepthLimit(DepthLimitExceeded { limit: MAX_DEPTH }));
    assert_eq!(count_arrangements(&deep_row(MAX_DEPTH + 10)), too_deep);
    assert_eq!(total_arrangements(&[deep_row(MAX_DEPTH)]), too_deep);
    assert_eq!(
        total_arrangements_parallel(&[row("???.### 1,1,3"), deep_row(MAX_DEPTH + 10)]),
        too_deep
    );
}

fn spring() -> impl Strategy<Value = Spring> {
    prop_oneof![
        Just(Spring::Operational),
        Just(Spring::Damaged),
        Just(Spring::Unknown),
    ]
}

fn spring_row(max_len: usize) -> impl Strategy<Value = SpringRow> {
    (
        prop::collection::vec(spring(), 0..=max_len),
        prop::collection::vec(1usize..=4, 0..=4),
    )
        .prop_map(|(pattern, groups)| SpringRow::new(pattern, groups).unwrap())
}

proptest! {
    #[test]
    fn prop_matches_brute_force(row in spring_row(12)) {
        prop_assert_eq!(count_arrangements(&row), Ok(brute_force(&row)));
    }

    #[test]
    fn prop_memoized_matches_uncached(row in spring_row(16)) {
        prop_assert_eq!(count_arrangements(&row), uncached(&row));
    }

    #[test]
    fn prop_known_rows_match_only_their_runs(
        pattern in prop::collection::vec(
            prop_oneof![Just(Spring::Operational), Just(Spring::Damaged)],
            0..20,
        ),
        groups in prop::collection::vec(1usize..=4, 0..=4),
    ) {
        let runs = damaged_runs(&pattern);
        let exact = SpringRow::new(pattern.clone(), runs.clone()).unwrap();
        prop_assert_eq!(count_arrangements(&exact), Ok(1));

        let expected = u64::from(runs == groups);
        let guessed = SpringRow::new(pattern, groups).unwrap();
        prop_assert_eq!(count_arrangements(&guessed), Ok(expected));
    }

    #[test]
    fn prop_unfolding_never_decreases(row in spring_row(8), copies in 1usize..=3) {
        prop_assume!(row.pattern().contains(&Spring::Unknown));
        let folded = count_arrangements(&row).unwrap();
        let unfolded = count_arrangements(&row.unfold(copies)).unwrap();
        prop_assert!(unfolded >= folded, "{} unfolded {}x: {} < {}", row, copies, unfolded, folded);
    }

    #[test]
    fn prop_row_display_parses_back(row in spring_row(10)) {
        prop_assume!(!row.pattern().is_empty() && !row.groups().is_empty());
        prop_assert_eq!(row.to_string().parse::<SpringRow>(), Ok(row));
    }
}
