//! rtxtune CLI library.
//!
//! Command implementations behind the `rtxtune` binary: building a run
//! configuration from files and flags, running the tuning pipeline and
//! printing its report.

pub mod commands;
