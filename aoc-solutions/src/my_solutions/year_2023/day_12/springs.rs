//! Spring rows: the immutable state the arrangement counter recurses over.

use std::fmt;
use std::str::FromStr;

use super::error::ArrangementError;

/// Condition of a single spring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spring {
    Operational,
    Damaged,
    Unknown,
}

impl Spring {
    /// Whether a spring recorded as `self` can really be `actual`.
    #[inline]
    pub fn accepts(self, actual: Spring) -> bool {
        self == Spring::Unknown || self == actual
    }

    fn symbol(self) -> char {
        match self {
            Spring::Operational => '.',
            Spring::Damaged => '#',
            Spring::Unknown => '?',
        }
    }
}

impl TryFrom<char> for Spring {
    type Error = ArrangementError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(Spring::Operational),
            '#' => Ok(Spring::Damaged),
            '?' => Ok(Spring::Unknown),
            other => Err(ArrangementError::InvalidSpring(other)),
        }
    }
}

impl fmt::Display for Spring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A row of springs plus the damaged run lengths it must contain, in order.
///
/// Rows are values: equality and hashing cover both sequences, and nothing
/// mutates a row once built, so a row doubles as its own cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpringRow {
    pattern: Vec<Spring>,
    groups: Vec<usize>,
}

impl SpringRow {
    /// Builds a row, rejecting zero-length groups.
    pub fn new(pattern: Vec<Spring>, groups: Vec<usize>) -> Result<Self, ArrangementError> {
        if let Some(position) = groups.iter().position(|&g| g == 0) {
            return Err(ArrangementError::ZeroGroup { position });
        }
        Ok(Self { pattern, groups })
    }

    pub fn pattern(&self) -> &[Spring] {
        &self.pattern
    }

    pub fn groups(&self) -> &[usize] {
        &self.groups
    }

    /// Repeats the row `copies` times: pattern copies joined by one unknown
    /// spring, group lists concatenated.
    pub fn unfold(&self, copies: usize) -> Self {
        Self {
            pattern: vec![self.pattern.as_slice(); copies].join(&Spring::Unknown),
            groups: self.groups.repeat(copies),
        }
    }

    /// The row left after the first `consumed` springs and the first group
    /// have been placed. Consuming past the end leaves an empty pattern.
    pub(super) fn remainder(&self, consumed: usize) -> Self {
        Self {
            pattern: self.pattern.get(consumed..).unwrap_or_default().to_vec(),
            groups: self.groups.get(1..).unwrap_or_default().to_vec(),
        }
    }
}

impl FromStr for SpringRow {
    type Err = ArrangementError;

    /// Parses `<pattern> <g1,g2,...>`, e.g. `???.### 1,1,3`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (pattern, groups) = line
            .trim()
            .split_once(' ')
            .ok_or_else(|| ArrangementError::MissingGroups(line.to_string()))?;

        let pattern = pattern
            .chars()
            .map(Spring::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let groups = groups
            .trim()
            .split(',')
            .map(|token| {
                token
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ArrangementError::InvalidGroup(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(pattern, groups)
    }
}

impl fmt::Display for SpringRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spring in &self.pattern {
            write!(f, "{}", spring)?;
        }
        for (i, group) in self.groups.iter().enumerate() {
            let sep = if i == 0 { ' ' } else { ',' };
            write!(f, "{sep}{group}")?;
        }
        Ok(())
    }
}
