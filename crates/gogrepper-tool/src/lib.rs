//! gogrep process execution and self-install for gogrepper.
//!
//! # Architecture
//!
//! - [`invoke`]: builds the gogrep command line and runs it
//! - [`relay`]: streams the child's output into a display sink
//! - [`sink`]: display sinks (terminal, in-memory)
//! - [`install`]: one-shot install of a bundled prebuilt binary
//! - [`resolve`]: locating the configured binary
//!
//! # Flow
//!
//! ```text
//! SearchRequest
//!     ↓ validate (inplace + line filter is refused)
//! info line → sink
//!     ↓
//! spawn gogrep ──(launch error)──→ error line → sink, LaunchFailed
//!     ↓                                   ↓ (not found)
//! stdout ─filter─→ sink               Installer::fix_missing_tool
//! stderr ────────→ sink                   (once per session)
//!     ↓
//! exit line → sink, show
//! ```
//!
//! # Example
//!
//! ```no_run
//! use gogrepper_core::{SearchRequest, SearchScope, pattern};
//! use gogrepper_tool::{ExecOptions, TerminalSink, run_search};
//! use std::path::PathBuf;
//!
//! # async fn example() -> gogrepper_core::Result<()> {
//! let scope = SearchScope::Root(PathBuf::from("."));
//! let parsed = pattern::parse("$x == nil -> $x != nil")?.expect("pattern");
//! let request = SearchRequest::new(&scope, parsed);
//!
//! let outcome = run_search(&request, &ExecOptions::new("gogrep"), &TerminalSink).await?;
//! println!("exit code: {}", outcome.exit_code);
//! # Ok(())
//! # }
//! ```

pub mod install;
pub mod invoke;
pub mod relay;
pub mod resolve;
pub mod sink;

// Re-export commonly used types
pub use install::{InstallOutcome, Installer, Platform};
pub use invoke::{ExecOptions, ProcessOutcome, build_args, describe, run_search};
pub use relay::OutputFilter;
pub use sink::{DisplaySink, MemorySink, TerminalSink};

pub type Result<T> = gogrepper_core::Result<T>;
