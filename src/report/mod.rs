//! Presentation of case results

mod color;
mod diff;
mod duration;

#[cfg(feature = "color")]
use anstream::{eprint, eprintln, print, println, stdout};
#[cfg(not(feature = "color"))]
use std::io::stdout;
#[cfg(not(feature = "color"))]
use std::{eprint, eprintln, print, println};

pub use color::Palette;
pub use color::Styled;
pub use diff::write_diff;
pub use duration::format_duration;

/// Receives results as the [`Runner`][crate::Runner] produces them
///
/// For each case, in discovery order, `case_header` is followed by `status` and then, when the
/// case failed with something worth showing, `failure`.  `summary` comes once at the end.
pub trait Report {
    fn case_header(&mut self, case: &std::path::Path);

    fn status(&mut self, status: crate::Status, duration: std::time::Duration);

    fn failure(&mut self, failure: &crate::Failure);

    fn summary(&mut self, tally: &crate::SuiteResult);
}

/// Line-per-case output for a terminal
///
/// Names and statuses go to stdout, failure details to stderr.
#[derive(Clone, Debug)]
pub struct Terminal {
    palette: Palette,
    name_width: usize,
}

impl Terminal {
    pub fn new(palette: Palette, cases: &[std::path::PathBuf]) -> Self {
        let name_width = cases
            .iter()
            .map(|c| case_name(c).chars().count())
            .max()
            .unwrap_or_default();
        Self {
            palette,
            name_width,
        }
    }
}

impl Report for Terminal {
    fn case_header(&mut self, case: &std::path::Path) {
        print!(
            "{:<width$}",
            case_name(case),
            width = self.name_width + 8
        );
        // The status follows once the case finishes; a failed flush only delays the name
        std::io::Write::flush(&mut stdout()).ok();
    }

    fn status(&mut self, status: crate::Status, duration: std::time::Duration) {
        println!(
            "{}\t{}",
            self.palette.status(status, status.label()),
            self.palette.updated(format_duration(duration)),
        );
    }

    fn failure(&mut self, failure: &crate::Failure) {
        match failure {
            crate::Failure::Diff(diff) => eprint!("{diff}"),
            crate::Failure::Process(msg) => eprintln!("{}", self.palette.error(msg)),
            crate::Failure::Io(err) => eprintln!("{}", self.palette.error(err)),
        }
    }

    fn summary(&mut self, tally: &crate::SuiteResult) {
        println!("{}", self.palette.summary(tally));
    }
}

fn case_name(case: &std::path::Path) -> std::borrow::Cow<'_, str> {
    case.file_name()
        .unwrap_or(case.as_os_str())
        .to_string_lossy()
}
