//! Spawn a case and capture what it prints

use std::io::Read as _;

/// What a finished case printed, stdout and stderr interleaved as written
#[derive(Debug)]
pub(crate) struct Captured {
    pub(crate) status: std::process::ExitStatus,
    pub(crate) output: Vec<u8>,
    pub(crate) duration: std::time::Duration,
}

#[derive(Debug)]
pub(crate) enum SpawnError {
    Launch(std::io::Error),
    Read(std::io::Error),
    Timeout(std::time::Duration),
}

impl std::fmt::Display for SpawnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Launch(err) => write!(f, "Failed to launch: {err}"),
            Self::Read(err) => write!(f, "Failed to read output: {err}"),
            Self::Timeout(timeout) => {
                write!(f, "timed out after {}", humantime::format_duration(*timeout))
            }
        }
    }
}

/// Run `path` with no arguments and no stdin, merging stdout and stderr
///
/// When `timeout` elapses the child is killed.  Anything it started may outlive it and keep the
/// pipe open, so the output of a timed out case is abandoned rather than waited on.
pub(crate) fn run(
    path: &std::path::Path,
    timeout: Option<std::time::Duration>,
) -> Result<Captured, (SpawnError, std::time::Duration)> {
    let start = std::time::Instant::now();
    let launch = |e: std::io::Error| (SpawnError::Launch(e), start.elapsed());

    let mut cmd = std::process::Command::new(path);
    cmd.stdin(std::process::Stdio::null());
    let (reader, writer) = os_pipe::pipe().map_err(launch)?;
    let writer_clone = writer.try_clone().map_err(launch)?;
    cmd.stdout(writer);
    cmd.stderr(writer_clone);
    let mut child = cmd.spawn().map_err(launch)?;
    // Avoid a deadlock! This parent process is still holding open pipe
    // writers (inside the Command object), and we have to close those
    // before we read. Here we do this by dropping the Command object.
    drop(cmd);

    let output = threaded_read(reader);
    let status = wait(&mut child, timeout).map_err(launch)?;
    let duration = start.elapsed();
    let Some(status) = status else {
        return Err((SpawnError::Timeout(timeout.unwrap_or_default()), duration));
    };
    let output = collect(output).map_err(|e| (SpawnError::Read(e), duration))?;

    Ok(Captured {
        status,
        output,
        duration,
    })
}

type Stream = std::thread::JoinHandle<Result<Vec<u8>, std::io::Error>>;

fn threaded_read<R>(mut input: R) -> Stream
where
    R: std::io::Read + Send + 'static,
{
    std::thread::spawn(move || {
        let mut ret = Vec::new();
        input.read_to_end(&mut ret).map(|_| ret)
    })
}

fn collect(stream: Stream) -> std::io::Result<Vec<u8>> {
    stream
        .join()
        .unwrap_or_else(|_| Err(std::io::Error::other("output reader panicked")))
}

/// Wait for `child`, returning `None` if it had to be killed
fn wait(
    child: &mut std::process::Child,
    timeout: Option<std::time::Duration>,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    if let Some(timeout) = timeout {
        match wait_timeout::ChildExt::wait_timeout(child, timeout)? {
            Some(status) => Ok(Some(status)),
            None => {
                let _ = child.kill();
                child.wait()?;
                Ok(None)
            }
        }
    } else {
        child.wait().map(Some)
    }
}

/// Converts an [`std::process::ExitStatus`]  to a human-readable value
pub(crate) fn display_exit_status(status: std::process::ExitStatus) -> String {
    #[cfg(unix)]
    fn detailed_exit_status(status: std::process::ExitStatus) -> Option<String> {
        use std::os::unix::process::ExitStatusExt;

        let signal = status.signal()?;
        let name = match signal as libc::c_int {
            libc::SIGABRT => ", SIGABRT: process abort signal",
            libc::SIGALRM => ", SIGALRM: alarm clock",
            libc::SIGFPE => ", SIGFPE: erroneous arithmetic operation",
            libc::SIGHUP => ", SIGHUP: hangup",
            libc::SIGILL => ", SIGILL: illegal instruction",
            libc::SIGINT => ", SIGINT: terminal interrupt signal",
            libc::SIGKILL => ", SIGKILL: kill",
            libc::SIGPIPE => ", SIGPIPE: write on a pipe with no one to read",
            libc::SIGQUIT => ", SIGQUIT: terminal quit signal",
            libc::SIGSEGV => ", SIGSEGV: invalid memory reference",
            libc::SIGTERM => ", SIGTERM: termination signal",
            libc::SIGBUS => ", SIGBUS: access to undefined memory",
            libc::SIGTRAP => ", SIGTRAP: trace/breakpoint trap",
            _ => "",
        };
        Some(format!("signal: {signal}{name}"))
    }

    #[cfg(not(unix))]
    fn detailed_exit_status(_status: std::process::ExitStatus) -> Option<String> {
        None
    }

    if let Some(extra) = detailed_exit_status(status) {
        format!("{} ({})", basic_exit_status(status), extra)
    } else {
        basic_exit_status(status)
    }
}

fn basic_exit_status(status: std::process::ExitStatus) -> String {
    if let Some(code) = status.code() {
        code.to_string()
    } else {
        "interrupted".to_owned()
    }
}
