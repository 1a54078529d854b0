//! PASS/FAIL reporting for scenario runs.

use std::future::Future;
use std::time::{Duration, Instant};

use colored::Colorize;
use tracing::info;

use crate::error::{CliError, Result};

/// Result of one scenario.
#[derive(Debug)]
pub struct Outcome {
	pub name: String,
	pub elapsed: Duration,
	pub result: screenplay::Result<()>,
}

impl Outcome {
	pub fn passed(&self) -> bool {
		self.result.is_ok()
	}

	pub fn line(&self) -> String {
		let secs = format!("({:.2}s)", self.elapsed.as_secs_f64());
		match &self.result {
			Ok(()) => format!("{} {} {}", "PASS".green().bold(), self.name, secs.dimmed()),
			Err(err) => format!("{} {} {}\n     {}", "FAIL".red().bold(), self.name, secs.dimmed(), err),
		}
	}
}

/// Outcomes in the order the scenarios ran.
#[derive(Debug, Default)]
pub struct Report {
	outcomes: Vec<Outcome>,
}

impl Report {
	pub fn new() -> Self {
		Self::default()
	}

	/// Runs `scenario`, prints its outcome and records it.
	pub async fn run<F>(&mut self, name: impl Into<String>, scenario: F)
	where
		F: Future<Output = screenplay::Result<()>>,
	{
		let name = name.into();
		info!(scenario = %name, "scenario started");
		let started = Instant::now();
		let result = scenario.await;
		self.record(Outcome {
			name,
			elapsed: started.elapsed(),
			result,
		});
	}

	pub fn record(&mut self, outcome: Outcome) {
		println!("{}", outcome.line());
		self.outcomes.push(outcome);
	}

	pub fn outcomes(&self) -> &[Outcome] {
		&self.outcomes
	}

	pub fn failed(&self) -> usize {
		self.outcomes.iter().filter(|outcome| !outcome.passed()).count()
	}

	pub fn summary(&self) -> String {
		let passed = self.outcomes.len() - self.failed();
		let failed = self.failed();
		let failed = if failed > 0 {
			format!("{failed} failed").red().bold().to_string()
		} else {
			format!("{failed} failed")
		};
		format!("{} passed, {failed}", passed.to_string().green())
	}

	/// Prints the summary line and turns any failure into [`CliError::ScenariosFailed`].
	pub fn finish(self) -> Result<()> {
		println!();
		println!("{}", self.summary());
		match self.failed() {
			0 => Ok(()),
			failed => Err(CliError::ScenariosFailed {
				failed,
				total: self.outcomes.len(),
			}),
		}
	}
}
