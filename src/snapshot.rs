//! Recorded output of a case, stored next to it as `<case>.snapshot`

use std::io::Write as _;
use std::path::{Path, PathBuf};

pub const SNAPSHOT_EXTENSION: &str = "snapshot";

/// The golden output of one case
///
/// The runner is the only writer; a run never touches a snapshot outside of
/// [`Action::Overwrite`][crate::Action::Overwrite].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    path: PathBuf,
}

impl Snapshot {
    pub fn for_case(case: &Path) -> Self {
        let mut path = case.as_os_str().to_owned();
        path.push(".");
        path.push(SNAPSHOT_EXTENSION);
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        std::fs::metadata(&self.path).is_ok()
    }

    pub fn read(&self) -> crate::Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|e| crate::Error::io("read", &self.path, e))
    }

    /// Replace the recorded output
    ///
    /// The content goes to a temporary file in the same directory which is then renamed over
    /// the snapshot, so readers only ever see the old or the new content.
    pub fn write(&self, content: &[u8]) -> crate::Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut temp = tempfile::Builder::new()
            .prefix(".snaprun")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| crate::Error::io("create temporary file in", dir, e))?;
        if let Err(e) = temp.write_all(content).and_then(|()| temp.flush()) {
            return Err(crate::Error::io("write", temp.path(), e));
        }
        temp.persist(&self.path)
            .map_err(|e| crate::Error::io("update", &self.path, e.error))?;
        snaprun_macros::debug!("Wrote {} bytes to {}", content.len(), self.path.display());
        Ok(())
    }

    /// Compare `actual` against the recorded bytes
    ///
    /// Returns `None` exactly when the two are byte-for-byte identical, otherwise the rendered
    /// differences.
    pub fn diff(
        &self,
        case: &Path,
        actual: &[u8],
        palette: crate::report::Palette,
    ) -> crate::Result<Option<String>> {
        let expected = self.read()?;
        if expected == actual {
            return Ok(None);
        }

        let mut rendered = String::new();
        crate::report::write_diff(
            &mut rendered,
            &expected,
            actual,
            Some(&self.path.display()),
            Some(&case.display()),
            palette,
        )
        .map_err(|e| crate::Error::new(format!("Failed to render diff: {e}")))?;
        Ok(Some(rendered))
    }
}
