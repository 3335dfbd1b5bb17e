// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for running segmental CoM estimation.
//!
//! This module contains the command-line interface logic, including argument parsing,
//! console logging and the `predict` command implementation.

// Modules
/// CLI arguments.
pub mod args;

/// Colored logging macros and the verbosity switch.
pub mod logging;

/// Prediction logic.
pub mod predict;
