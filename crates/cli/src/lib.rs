//! `screenplay` command line runner.
//!
//! Wires WebDriver and GitHub API abilities from flags and environment
//! variables, runs the DuckDuckGo and GitHub scenarios and reports PASS/FAIL
//! per scenario.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod styles;
