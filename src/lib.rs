//! # Snapshot regression testing for executables
//!
//! `snaprun` discovers executable files, runs each one and compares everything it prints
//! (stdout and stderr, interleaved) against the bytes recorded next to it in
//! `<case>.snapshot`.
//!
//! ## Workflow
//!
//! Write a case, any executable:
//! ```console
//! $ printf '#!/bin/sh\necho hello\n' > tests/hello && chmod +x tests/hello
//! ```
//! A case without a snapshot is skipped.  Record one with
//! ```console
//! $ snaprun -u tests/
//! ```
//! or `SNAPRUN=overwrite snaprun tests/`, review and commit `tests/hello.snapshot`, and from then
//! on
//! ```console
//! $ snaprun tests/
//! ```
//! fails whenever the output changes, showing a line diff (`-q` hides it).
//!
//! ## Library
//!
//! ```rust,no_run
//! let cases = snaprun::resolve(&["tests/cases"]).unwrap();
//! let mut report = snaprun::report::Terminal::new(snaprun::report::Palette::color(), &cases);
//! let tally = snaprun::Runner::new()
//!     .action_env(snaprun::DEFAULT_ACTION_ENV)
//!     .run(&cases, &mut report);
//! std::process::exit(tally.exit_code());
//! ```
//!
//! To debug what `snaprun` is doing, build with `-F snaprun/debug`.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod action;
mod case;
mod command;
mod error;
mod resolve;
mod runner;
mod snapshot;

pub mod report;

pub use action::Action;
pub use action::DEFAULT_ACTION_ENV;
pub use case::{Case, CaseResult, Failure, Outcome, Status};
pub use error::{Error, Result};
pub use resolve::resolve;
pub use runner::{Runner, SuiteResult};
pub use snapshot::{Snapshot, SNAPSHOT_EXTENSION};
