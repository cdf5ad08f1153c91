//! CLI module
//!
//! Command-line interface for draining a scroll.
//!
//! # Commands
//!
//! - `scan` - Stream every matching hit as JSON lines
//! - `count` - Drain a scroll and report how many hits arrived

mod commands;
mod runner;

pub use commands::{Cli, Commands, ScrollArgs};
pub use runner::Runner;
