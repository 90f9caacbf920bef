//! # CLI Behavior
//!
//! This is **one possible UI client** for tagkit, not the library itself. It is
//! the only place that knows about terminal I/O, exit codes and output format.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Inputs
//!
//! Item files are JSON arrays of `{id, name, tags}` objects. Record files (for
//! `convert`) are JSON arrays of arbitrary objects. A path of `-` reads stdin.
//!
//! ## Output
//!
//! Text by default, styled when stdout is a terminal. `--json` prints the
//! underlying library value instead, which is what scripts should consume.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch and per-command handlers
//! - `render`: text formatting
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
