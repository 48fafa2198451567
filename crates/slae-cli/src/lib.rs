//! slae-cli: command-line front end for `slae-linalg`.
//!
//! Every subcommand of the `slae` binary maps to one function in
//! [`commands`] that returns the text to print. The [`seminar`] module runs
//! the full scripted walk-through from a JSON configuration.
pub mod commands;
pub mod seminar;
pub mod util;
