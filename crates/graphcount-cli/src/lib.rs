//! graphcount CLI - command line access to graph statistics
//!
//! The `graphcount` binary runs the fleet rollup, publishes it to the rollup
//! cache (`refresh`), and inspects single graphs.

mod config;

pub use config::{Command, Config, version_info};
