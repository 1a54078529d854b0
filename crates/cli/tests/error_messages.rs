//! Runs the `screenplay` binary in situations that fail before any browser
//! or network round trip succeeds.

use std::process::Command;

const GITHUB_VARS: [&str; 5] = [
	"GITHUB_USERNAME",
	"GITHUB_PASSWORD",
	"GITHUB_ACCESS_TOKEN",
	"GITHUB_PROJECT_NAME",
	"GITHUB_API_URL",
];

fn run_screenplay(args: &[&str]) -> (bool, String, String) {
	let mut command = Command::new(env!("CARGO_BIN_EXE_screenplay"));
	for var in GITHUB_VARS {
		command.env_remove(var);
	}
	let output = command
		.env_remove("WEBDRIVER_URL")
		.env("NO_COLOR", "1")
		.args(args)
		.output()
		.expect("failed to execute screenplay");
	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	(output.status.success(), stdout, stderr)
}

#[test]
fn missing_github_settings_are_named() {
	let (success, _stdout, stderr) = run_screenplay(&["github", "create-card"]);
	assert!(!success);
	assert!(stderr.contains("`GITHUB_USERNAME` is not set"), "stderr: {stderr}");

	let (success, _stdout, stderr) = run_screenplay(&["github", "--username", "octocat", "create-card"]);
	assert!(!success);
	assert!(stderr.contains("`GITHUB_ACCESS_TOKEN` is not set"), "stderr: {stderr}");
}

#[test]
fn move_card_needs_a_password() {
	let (success, _stdout, stderr) = run_screenplay(&[
		"github",
		"--username",
		"octocat",
		"--token",
		"t0ken",
		"--project",
		"Board",
		"move-card",
	]);
	assert!(!success);
	assert!(stderr.contains("`GITHUB_PASSWORD` is not set"), "stderr: {stderr}");
}

#[test]
fn unreachable_webdriver_fails_each_scenario() {
	let (success, stdout, _stderr) = run_screenplay(&["--webdriver-url", "http://127.0.0.1:9", "search", "panda", "parrot"]);

	assert!(!success);
	assert!(stdout.contains("FAIL search: panda"), "stdout: {stdout}");
	assert!(stdout.contains("FAIL search: parrot"), "stdout: {stdout}");
	assert!(stdout.contains("0 passed, 2 failed"), "stdout: {stdout}");
}

#[test]
fn help_lists_subcommands() {
	let (success, stdout, _stderr) = run_screenplay(&["--help"]);
	assert!(success);
	assert!(stdout.contains("search"));
	assert!(stdout.contains("github"));
}
