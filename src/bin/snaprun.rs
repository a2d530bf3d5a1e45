use std::path::PathBuf;
use std::process::ExitCode;

#[cfg(feature = "color")]
use anstream::eprintln;
#[cfg(not(feature = "color"))]
use std::eprintln;

use clap::Parser;

/// Run executables and compare their output against recorded snapshots
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Test cases, or directories to search for executable test cases
    paths: Vec<PathBuf>,

    /// Update snapshots instead of comparing against them
    #[arg(short = 'u', long)]
    update: bool,

    /// Suppress diff output
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Number of cases to run at once
    #[arg(short = 'j', long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    jobs: u16,

    /// Fail cases that run longer than this, e.g. `30s` or `1m 30s`
    #[arg(long, value_parser = humantime::parse_duration)]
    timeout: Option<std::time::Duration>,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn write_global(self) {
        #[cfg(feature = "color")]
        {
            let choice = match self {
                Self::Auto => anstream::ColorChoice::Auto,
                Self::Always => anstream::ColorChoice::Always,
                Self::Never => anstream::ColorChoice::Never,
            };
            choice.write_global();
        }
    }

    /// `never` keeps escape codes out of rendered diffs entirely
    fn palette(self) -> snaprun::report::Palette {
        match self {
            Self::Auto | Self::Always => snaprun::report::Palette::color(),
            Self::Never => snaprun::report::Palette::plain(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    let palette = cli.color.palette();

    let cases = match snaprun::resolve(&cli.paths) {
        Ok(cases) => cases,
        Err(err) => {
            eprintln!("{}", palette.error(format_args!("Error parsing paths: {err}")));
            return ExitCode::FAILURE;
        }
    };
    if cases.is_empty() {
        eprintln!("{}", palette.error("No test cases found"));
        return ExitCode::FAILURE;
    }

    let mut runner = snaprun::Runner::new().action_env(snaprun::DEFAULT_ACTION_ENV);
    if cli.update {
        runner = runner.action(snaprun::Action::Overwrite);
    }
    let runner = runner
        .quiet(cli.quiet)
        .jobs(usize::from(cli.jobs))
        .timeout(cli.timeout)
        .palette(palette);

    let mut report = snaprun::report::Terminal::new(palette, &cases);
    let tally = runner.run(&cases, &mut report);
    if tally.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
