//! Run one case and classify the result

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Final state of a case, exactly one per case per run
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Passed,
    Failed,
    Skipped,
    Updated,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Passed,
        Status::Failed,
        Status::Skipped,
        Status::Updated,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
            Self::Updated => "UPDATED",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Updated => "updated",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

/// Why a case failed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    /// The case could not be launched, exited unsuccessfully or timed out
    Process(String),
    /// The case ran but its output differs from the snapshot
    Diff(String),
    /// The snapshot could not be read or written
    Io(crate::Error),
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Process(msg) => msg.fmt(f),
            Self::Diff(diff) => diff.fmt(f),
            Self::Io(err) => err.fmt(f),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Skipped,
    Updated,
    Failed(Failure),
}

impl Outcome {
    pub fn status(&self) -> Status {
        match self {
            Self::Passed => Status::Passed,
            Self::Skipped => Status::Skipped,
            Self::Updated => Status::Updated,
            Self::Failed(_) => Status::Failed,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Passed | Self::Skipped | Self::Updated => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseResult {
    pub path: PathBuf,
    pub outcome: Outcome,
    /// Wall-clock time of the case's process, zero when nothing was run
    pub duration: Duration,
}

impl CaseResult {
    pub fn status(&self) -> Status {
        self.outcome.status()
    }
}

/// An executable whose output is compared against its [`Snapshot`][crate::Snapshot]
#[derive(Clone, Debug)]
pub struct Case {
    path: PathBuf,
    snapshot: crate::Snapshot,
}

impl Case {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let snapshot = crate::Snapshot::for_case(&path);
        Self { path, snapshot }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> &crate::Snapshot {
        &self.snapshot
    }

    pub fn run(
        &self,
        action: crate::Action,
        timeout: Option<Duration>,
        palette: crate::report::Palette,
    ) -> CaseResult {
        let (outcome, duration) = self.run_inner(action, timeout, palette);
        snaprun_macros::debug!(
            "{}: {:?} in {:?}",
            self.path.display(),
            outcome.status(),
            duration
        );
        CaseResult {
            path: self.path.clone(),
            outcome,
            duration,
        }
    }

    fn run_inner(
        &self,
        action: crate::Action,
        timeout: Option<Duration>,
        palette: crate::report::Palette,
    ) -> (Outcome, Duration) {
        if !action.is_overwrite() && !self.snapshot.exists() {
            return (Outcome::Skipped, Duration::ZERO);
        }

        snaprun_macros::debug!("Running {}", self.path.display());
        let captured = match crate::command::run(&self.path, timeout) {
            Ok(captured) => captured,
            Err((err, duration)) => {
                return (Outcome::Failed(Failure::Process(err.to_string())), duration);
            }
        };
        let duration = captured.duration;
        if !captured.status.success() {
            let msg = format!(
                "Exit: {}",
                crate::command::display_exit_status(captured.status)
            );
            return (Outcome::Failed(Failure::Process(msg)), duration);
        }

        let outcome = match action {
            crate::Action::Overwrite => match self.snapshot.write(&captured.output) {
                Ok(()) => Outcome::Updated,
                Err(err) => Outcome::Failed(Failure::Io(err)),
            },
            crate::Action::Verify => {
                match self.snapshot.diff(&self.path, &captured.output, palette) {
                    Ok(None) => Outcome::Passed,
                    Ok(Some(diff)) => Outcome::Failed(Failure::Diff(diff)),
                    Err(err) => Outcome::Failed(Failure::Io(err)),
                }
            }
        };
        (outcome, duration)
    }
}
