//! Discover test cases on disk

use std::path::{Path, PathBuf};

/// Find every executable file reachable from `inputs`
///
/// Files are taken as-is when executable, directories are walked recursively (following
/// symlinks, entries sorted by file name).  Returned paths are absolute, in input order,
/// depth-first.
///
/// Any failure to stat or list an entry aborts the whole discovery.
pub fn resolve<P: AsRef<Path>>(inputs: &[P]) -> crate::Result<Vec<PathBuf>> {
    let cwd = std::env::current_dir()
        .map_err(|e| crate::Error::new(format!("Failed to read current directory: {e}")))?;

    let mut cases = Vec::new();
    for input in inputs {
        let root = absolute(&cwd, input.as_ref());
        for entry in walkdir::WalkDir::new(&root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&root).to_owned();
                crate::Error::io("read", &path, std::io::Error::from(e))
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            let meta = entry
                .metadata()
                .map_err(|e| crate::Error::io("stat", entry.path(), std::io::Error::from(e)))?;
            if is_executable(entry.path(), &meta) {
                snaprun_macros::debug!("Found case {}", entry.path().display());
                cases.push(entry.into_path());
            }
        }
    }
    Ok(cases)
}

/// Whether any of the user, group or other execute bits are set
#[cfg(unix)]
pub(crate) fn is_executable(_path: &Path, meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;

    meta.is_file() && meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
pub(crate) fn is_executable(path: &Path, meta: &std::fs::Metadata) -> bool {
    const EXTENSIONS: &[&str] = &["exe", "bat", "cmd", "com"];

    meta.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    normalize_path(&cwd.join(path))
}

/// Normalize a path, removing things like `.` and `..`.
///
/// CAUTION: This does not resolve symlinks (unlike [`std::fs::canonicalize`]), so the case
/// keeps the name it was discovered under.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut components = path.components().peekable();
    let mut ret = if let Some(c @ Component::Prefix(..)) = components.peek().cloned() {
        components.next();
        PathBuf::from(c.as_os_str())
    } else {
        PathBuf::new()
    };

    for component in components {
        match component {
            Component::Prefix(..) => unreachable!(),
            Component::RootDir => {
                ret.push(Component::RootDir);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if ret.ends_with(Component::ParentDir) {
                    ret.push(Component::ParentDir);
                } else {
                    let popped = ret.pop();
                    if !popped && !ret.has_root() {
                        ret.push(Component::ParentDir);
                    }
                }
            }
            Component::Normal(c) => {
                ret.push(c);
            }
        }
    }
    ret
}
