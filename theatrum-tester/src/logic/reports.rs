use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

struct Tally {
    total: usize,
    passed: usize,
}

impl Tally {
    fn of(results: &[ScenarioResult]) -> Self {
        Self {
            total: results.len(),
            passed: results.iter().filter(|r| r.passed).count(),
        }
    }

    const fn failed(&self) -> usize {
        self.total - self.passed
    }

    #[allow(clippy::cast_precision_loss)]
    fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.passed as f64 / self.total as f64) * 100.0
    }
}

pub fn generate_console_report(
    out: &mut impl Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    let tally = Tally::of(results);

    writeln!(out)?;
    writeln!(out, "{}", "📊 Booking Logic Results".bright_cyan().bold())?;
    writeln!(out, "{}", "========================".cyan())?;
    writeln!(out, "Total runs: {}", tally.total)?;
    writeln!(out, "Passed: {}", tally.passed.to_string().green())?;
    writeln!(out, "Failed: {}", tally.failed().to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", tally.success_rate())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{} {} (seed {})",
            status,
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let fastest = results.iter().min_by_key(|r| r.average_duration);
    let slowest = results.iter().max_by_key(|r| r.average_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.average_duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.average_duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut impl Write, results: &[ScenarioResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut impl Write, results: &[ScenarioResult]) -> Result<()> {
    let tally = Tally::of(results);

    writeln!(out, "# Theatrum Booking Logic Results\n")?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {}", tally.total)?;
    writeln!(out, "- **Passed**: {}", tally.passed)?;
    writeln!(out, "- **Failed**: {}", tally.failed())?;
    writeln!(out, "- **Success rate**: {:.1}%\n", tally.success_rate())?;
    writeln!(out, "## Detailed Results\n")?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {} {} (seed {})\n", status, result.scenario_name, result.seed)?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: name.to_string(),
            seed: 1337,
            passed,
            iterations_run: 2,
            successful_iterations: if passed { 2 } else { 1 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["Iteration 2 (seed 1338): checkout shows $40.00".to_string()]
            },
            average_duration: Duration::from_millis(3),
        }
    }

    #[test]
    fn markdown_report_lists_failures() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &[result("happy-path", true), result("seat-guard", false)])
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# Theatrum Booking Logic Results"));
        assert!(text.contains("- **Failed**: 1"));
        assert!(text.contains("checkout shows $40.00"));
    }

    #[test]
    fn json_report_round_trips_durations_as_millis() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &[result("smoke", true)]).unwrap();
        let parsed: Vec<ScenarioResult> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0].average_duration, Duration::from_millis(3));
        assert_eq!(parsed[0].scenario_name, "smoke");
    }

    #[test]
    fn console_report_handles_no_results() {
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &[], Duration::ZERO).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Total runs: 0"));
        assert!(!text.contains("Performance Summary"));
    }
}
