//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::{DateTime, TimeDelta, Utc};

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: DateTime<Utc>,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Utc::now(),
        }
    }

    /// Format and print a single result; answers go to stdout, errors to stderr
    pub fn print_result(&self, result: &SolverResult) {
        match self.format_result(result) {
            Ok(line) => println!("{}", line),
            Err(line) => eprintln!("{}", line),
        }
    }

    /// The line for one result: `Ok` for an answer, `Err` for a failure
    pub fn format_result(&self, result: &SolverResult) -> Result<String, String> {
        let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

        match (&result.answer, self.quiet) {
            (Ok(answer), true) => Ok(answer.clone()),
            (Ok(answer), false) => {
                let parse_timing = result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                Ok(format!(
                    "{}: {} ({}solve: {})",
                    prefix,
                    answer,
                    parse_timing,
                    format_duration(result.solve_duration)
                ))
            }
            (Err(e), true) => Err(format!("Error: {}", e)),
            (Err(e), false) => Err(format!("{}: Error - {}", prefix, e)),
        }
    }

    /// Print a summary after all results
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let total = results.len();
        let successes = results.iter().filter(|r| r.answer.is_ok()).count();
        let failures = total - successes;

        let total_parse_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .filter_map(|r| r.parse_duration)
            .sum();
        let total_solve_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .sum();
        let total_compute_time = total_parse_time + total_solve_time;
        let elapsed_time = Utc::now() - self.start_time;

        println!();
        println!("--- Summary ---");
        println!("Solvers: {} solved, {} failed", successes, failures);
        println!("Total parse time: {}", format_duration(total_parse_time));
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!("Elapsed wall-clock time: {}", format_duration(elapsed_time));
        if let (Some(compute), Some(elapsed)) = (
            total_compute_time.num_microseconds(),
            elapsed_time.num_microseconds(),
        ) && elapsed > 0
        {
            println!("Speedup factor: {:.2}x", compute as f64 / elapsed as f64);
        }
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecutorError;

    fn result(answer: Result<&str, ExecutorError>) -> SolverResult {
        SolverResult {
            year: 2023,
            day: 12,
            part: 2,
            answer: answer.map(str::to_string).map_err(Into::into),
            parse_duration: Some(TimeDelta::microseconds(250)),
            solve_duration: TimeDelta::milliseconds(1500),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::seconds(2)), "2.00s");
        assert_eq!(format_duration(TimeDelta::microseconds(-20)), "-20µs");
    }

    #[test]
    fn test_full_format() {
        let formatter = OutputFormatter::new(false);
        assert_eq!(
            formatter.format_result(&result(Ok("525152"))),
            Ok("2023/12 Part 2: 525152 (parse: 250µs, solve: 1.50s)".to_string())
        );
        assert_eq!(
            formatter.format_result(&result(Err(ExecutorError::ChannelSend))),
            Err("2023/12 Part 2: Error - Channel send error".to_string())
        );
    }

    #[test]
    fn test_quiet_format() {
        let formatter = OutputFormatter::new(true);
        assert_eq!(
            formatter.format_result(&result(Ok("21"))),
            Ok("21".to_string())
        );
        assert_eq!(
            formatter.format_result(&result(Err(ExecutorError::ChannelSend))),
            Err("Error: Channel send error".to_string())
        );
    }
}
