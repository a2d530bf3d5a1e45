use std::collections::BTreeMap;
use std::path::PathBuf;

use rayon::prelude::*;

/// Runs every case and tallies the results
#[derive(Clone, Debug)]
pub struct Runner {
    action: crate::Action,
    quiet: bool,
    jobs: usize,
    timeout: Option<std::time::Duration>,
    palette: crate::report::Palette,
}

impl Runner {
    pub fn new() -> Self {
        Self {
            action: crate::Action::Verify,
            quiet: false,
            jobs: 1,
            timeout: None,
            palette: crate::report::Palette::plain(),
        }
    }

    /// Compare against snapshots, or record them
    pub fn action(mut self, action: crate::Action) -> Self {
        self.action = action;
        self
    }

    /// Read the action from an environment variable, keeping the current one if unset
    ///
    /// See [`DEFAULT_ACTION_ENV`][crate::DEFAULT_ACTION_ENV].
    pub fn action_env(mut self, var_name: &str) -> Self {
        if let Some(action) = crate::Action::with_env_var(var_name) {
            self.action = action;
        }
        self
    }

    /// Leave diffs out of the report
    ///
    /// Process and snapshot I/O errors are always reported.
    pub fn quiet(mut self, yes: bool) -> Self {
        self.quiet = yes;
        self
    }

    /// Number of cases to run at once
    ///
    /// Results are still reported and tallied in discovery order.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Kill and fail cases that run longer than `timeout`
    pub fn timeout(mut self, timeout: Option<std::time::Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Styling of rendered diffs, plain unless set
    ///
    /// Styles end up in [`Failure::Diff`][crate::Failure::Diff] as escape codes.
    pub fn palette(mut self, palette: crate::report::Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Run `cases` in order, reporting each as it completes
    ///
    /// A failing case never stops the run.
    pub fn run(&self, cases: &[PathBuf], report: &mut dyn crate::report::Report) -> SuiteResult {
        let mut tally = SuiteResult::new();
        if self.jobs <= 1 {
            for path in cases {
                report.case_header(path);
                let result = crate::Case::new(path.clone()).run(
                    self.action,
                    self.timeout,
                    self.palette,
                );
                self.record(&mut tally, &result, report);
            }
        } else {
            for result in self.run_parallel(cases) {
                report.case_header(&result.path);
                self.record(&mut tally, &result, report);
            }
        }
        report.summary(&tally);
        tally
    }

    fn run_parallel(&self, cases: &[PathBuf]) -> Vec<crate::CaseResult> {
        let run = || {
            cases
                .par_iter()
                .map(|path| {
                    crate::Case::new(path.clone()).run(self.action, self.timeout, self.palette)
                })
                .collect::<Vec<_>>()
        };
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
        {
            Ok(pool) => pool.install(run),
            Err(_err) => {
                snaprun_macros::debug!("Falling back to the global thread pool: {}", _err);
                run()
            }
        }
    }

    fn record(
        &self,
        tally: &mut SuiteResult,
        result: &crate::CaseResult,
        report: &mut dyn crate::report::Report,
    ) {
        report.status(result.status(), result.duration);
        match result.outcome.failure() {
            Some(crate::Failure::Diff(_)) if self.quiet => {}
            Some(failure) => report.failure(failure),
            None => {}
        }
        tally.add(result.status());
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of cases per [`Status`][crate::Status]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuiteResult {
    counts: BTreeMap<crate::Status, usize>,
}

impl SuiteResult {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add(&mut self, status: crate::Status) {
        *self.counts.entry(status).or_default() += 1;
    }

    pub fn count(&self, status: crate::Status) -> usize {
        self.counts.get(&status).copied().unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// The run fails exactly when a case failed
    pub fn is_ok(&self) -> bool {
        self.count(crate::Status::Failed) == 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_ok() {
            0
        } else {
            1
        }
    }
}

impl std::fmt::Display for SuiteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (status, count) in &self.counts {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{count} {status}")?;
        }
        Ok(())
    }
}
