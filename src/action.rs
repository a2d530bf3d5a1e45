pub const DEFAULT_ACTION_ENV: &str = "SNAPRUN";

/// What to do with a case's output, see [`Runner::action`][crate::Runner::action]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Action {
    /// Compare against the recorded snapshot, skipping cases without one
    #[default]
    Verify,
    /// Record the output as the new snapshot
    Overwrite,
}

impl Action {
    pub fn with_env_var(var: impl AsRef<std::ffi::OsStr>) -> Option<Self> {
        let var = var.as_ref();
        let value = std::env::var_os(var)?;
        Self::with_env_value(value)
    }

    pub fn with_env_value(value: impl AsRef<std::ffi::OsStr>) -> Option<Self> {
        let value = value.as_ref();
        match value.to_str()? {
            "verify" => Some(Action::Verify),
            "overwrite" => Some(Action::Overwrite),
            _ => None,
        }
    }

    pub fn is_overwrite(self) -> bool {
        self == Self::Overwrite
    }
}
