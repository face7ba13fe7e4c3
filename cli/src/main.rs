//! `modmeta` CLI entrypoint.
//!
//! Resolves every mod archive in a directory and writes the distribution
//! manifest as JSON.

use std::io::Write;

use clap::Parser;
use modmeta_cli::cli::Cli;
use modmeta_cli::error::Result;
use modmeta_cli::logger;
use modmeta_cli::run::{RunSummary, run};

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    if let Err(err) = logger::install(cli.log_level()) {
        write_stderr_line(&mut stderr, format!("logger unavailable: {err}"));
    }

    let mut stdout = std::io::stdout();
    let run_result = run(&cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, cli.quiet, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn exit_code_for_run_result(result: Result<RunSummary>, quiet: bool, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(summary) => {
            if !quiet {
                write_stderr_line(
                    stderr,
                    format!(
                        "Resolved {} archives ({} skipped).",
                        summary.resolved, summary.failed
                    ),
                );
            }
            0
        }
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modmeta_cli::error::CliError;

    #[test]
    fn success_reports_counts() {
        let mut stderr = Vec::new();
        let summary = RunSummary {
            resolved: 3,
            failed: 1,
        };
        assert_eq!(exit_code_for_run_result(Ok(summary), false, &mut stderr), 0);
        let text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert_eq!(text, "Resolved 3 archives (1 skipped).\n");
    }

    #[test]
    fn quiet_success_is_silent() {
        let mut stderr = Vec::new();
        let summary = RunSummary {
            resolved: 0,
            failed: 0,
        };
        assert_eq!(exit_code_for_run_result(Ok(summary), true, &mut stderr), 0);
        assert!(stderr.is_empty());
    }

    #[test]
    fn failure_prints_error_and_returns_one() {
        let err = CliError::Output(std::io::ErrorKind::BrokenPipe.into());
        let mut stderr = Vec::new();
        assert_eq!(exit_code_for_run_result(Err(err), false, &mut stderr), 1);
        let text = String::from_utf8(stderr).expect("stderr was not UTF-8");
        assert!(text.starts_with("failed to write output"));
    }
}
