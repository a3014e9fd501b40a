//! @ai:module:intent Console reporting of build/run results
//! @ai:module:layer presentation
//! @ai:module:public_api print_suite_header, print_language, print_status, print_summary

use crate::lang::Language;
use crate::runner::{Mode, RunStatus, SuiteReport};

/// @ai:intent Print the per-suite header before its runs
/// @ai:effects io
pub fn print_suite_header(name: &str) {
    println!("------ Running {} ------", name);
}

/// @ai:intent Print the language folder line before launching its benchmark
/// @ai:effects io
pub fn print_language(language: Language) {
    println!("{}", language.folder());
}

/// @ai:intent Print one run result in the mode's output shape
/// @ai:effects io
pub fn print_status(status: &RunStatus) {
    match status {
        RunStatus::Passed => println!("Passed"),
        RunStatus::Failed => println!("Failed"),
        RunStatus::Timing {
            benchmark_secs,
            total_secs,
        } => {
            println!("benchmark {:.3}", benchmark_secs);
            println!("total {:.3}\n", total_secs);
        }
        RunStatus::TimedOut => println!("timed out\n"),
        RunStatus::Error(message) => println!("error: {}\n", message),
    }
}

/// @ai:intent Print the end-of-run summary table
/// @ai:effects io
pub fn print_summary(suites: &[SuiteReport], mode: Mode) {
    println!();
    println!("Benchmark Results");
    println!("=================");
    println!();

    match mode {
        Mode::Validate => print_validate_summary(suites),
        Mode::Timing => print_timing_summary(suites),
    }

    println!();
}

/// @ai:intent Pass/fail counts across all suites
/// @ai:effects io
fn print_validate_summary(suites: &[SuiteReport]) {
    let mut passed = 0;
    let mut failed = 0;
    let mut other = 0;

    for suite in suites {
        for report in &suite.reports {
            match report.status {
                RunStatus::Passed => passed += 1,
                RunStatus::Failed => failed += 1,
                _ => other += 1,
            }
        }
    }

    println!("{:<25} {:>10}", "Passed:", passed);
    println!("{:<25} {:>10}", "Failed:", failed);

    if other > 0 {
        println!("{:<25} {:>10}", "Not completed:", other);
    }
}

/// @ai:intent Per-(suite, language) timing table
/// @ai:effects io
fn print_timing_summary(suites: &[SuiteReport]) {
    println!(
        "{:<24} {:<12} {:>10} {:>10}",
        "Suite", "Language", "Benchmark", "Total"
    );
    println!("{}", "-".repeat(60));

    for suite in suites {
        for report in &suite.reports {
            match &report.status {
                RunStatus::Timing {
                    benchmark_secs,
                    total_secs,
                } => {
                    println!(
                        "{:<24} {:<12} {:>9.3}s {:>9.3}s",
                        suite.suite,
                        report.language.folder(),
                        benchmark_secs,
                        total_secs
                    );
                }
                RunStatus::TimedOut => {
                    println!(
                        "{:<24} {:<12} {:>10} {:>10}",
                        suite.suite,
                        report.language.folder(),
                        "timeout",
                        "-"
                    );
                }
                RunStatus::Error(_) => {
                    println!(
                        "{:<24} {:<12} {:>10} {:>10}",
                        suite.suite,
                        report.language.folder(),
                        "error",
                        "-"
                    );
                }
                RunStatus::Passed | RunStatus::Failed => {}
            }
        }
    }
}
