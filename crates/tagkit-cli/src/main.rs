//! # Tagkit CLI
//!
//! A thin command-line client over the `tagkit` library. The binary only calls
//! `cli::run()` and turns an error into exit code 1; everything else lives in
//! `src/cli/`.
//!
//! ## Workspace Structure
//!
//! - `crates/tagkit/`: the UI-agnostic tag-state library
//! - `crates/tagkit-cli/`: this client
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/tagkit-cli/src/cli/)                     │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Input loading + dispatch (commands.rs)                   │
//! │  - Text rendering with console styles (render.rs)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (crates/tagkit/src/)                               │
//! │  - Pure functions and the TaggingSession facade             │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command reads JSON (a file path, or `-` for stdin) and writes either
//! styled text or, with `--json`, pretty-printed JSON. Logs go to stderr.
//!
//! ## Testing Approach
//!
//! - Library behavior is unit tested inside `crates/tagkit`.
//! - Rendering is unit tested in `render.rs` against canned values.
//! - `tests/cli_e2e.rs` runs the built binary with `assert_cmd`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
