pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Filesystem or environment failure, annotated with the path it concerns
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    inner: String,
}

impl Error {
    pub fn new(inner: impl std::fmt::Display) -> Self {
        Self {
            inner: inner.to_string(),
        }
    }

    pub(crate) fn io(action: &str, path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::new(format!("Failed to {} {}: {}", action, path.display(), err))
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

impl std::error::Error for Error {}

impl<'s> From<&'s str> for Error {
    fn from(other: &'s str) -> Self {
        Self::new(other)
    }
}

impl From<String> for Error {
    fn from(other: String) -> Self {
        Self { inner: other }
    }
}
