/// Styles for each kind of output
#[derive(Copy, Clone, Debug, Default)]
pub struct Palette {
    pub(crate) info: anstyle::Style,
    pub(crate) warn: anstyle::Style,
    pub(crate) error: anstyle::Style,
    pub(crate) hint: anstyle::Style,
    pub(crate) updated: anstyle::Style,
    pub(crate) summary: anstyle::Style,
    pub(crate) expected: anstyle::Style,
    pub(crate) actual: anstyle::Style,
}

impl Palette {
    /// Styled output, left to the output stream to strip when it isn't a terminal
    pub fn color() -> Self {
        if cfg!(feature = "color") {
            Self {
                info: anstyle::AnsiColor::Green.on_default(),
                warn: anstyle::AnsiColor::Yellow.on_default(),
                error: anstyle::AnsiColor::Red.on_default(),
                hint: anstyle::Effects::DIMMED.into(),
                updated: anstyle::Ansi256Color(208).on_default(),
                summary: anstyle::AnsiColor::Magenta.on_default(),
                expected: anstyle::AnsiColor::Green.on_default() | anstyle::Effects::UNDERLINE,
                actual: anstyle::AnsiColor::Red.on_default() | anstyle::Effects::UNDERLINE,
            }
        } else {
            Self::plain()
        }
    }

    pub fn plain() -> Self {
        Self::default()
    }

    pub fn info<D: std::fmt::Display>(self, item: D) -> Styled<D> {
        Styled::new(item, self.info)
    }

    pub fn warn<D: std::fmt::Display>(self, item: D) -> Styled<D> {
        Styled::new(item, self.warn)
    }

    pub fn error<D: std::fmt::Display>(self, item: D) -> Styled<D> {
        Styled::new(item, self.error)
    }

    pub fn hint<D: std::fmt::Display>(self, item: D) -> Styled<D> {
        Styled::new(item, self.hint)
    }

    pub fn updated<D: std::fmt::Display>(self, item: D) -> Styled<D> {
        Styled::new(item, self.updated)
    }

    pub fn summary<D: std::fmt::Display>(self, item: D) -> Styled<D> {
        Styled::new(item, self.summary)
    }

    /// Style for a case status
    pub fn status<D: std::fmt::Display>(self, status: crate::Status, item: D) -> Styled<D> {
        let style = match status {
            crate::Status::Passed => self.info,
            crate::Status::Failed => self.error,
            crate::Status::Skipped => self.warn,
            crate::Status::Updated => self.updated,
        };
        Styled::new(item, style)
    }
}

#[derive(Debug)]
pub struct Styled<D> {
    display: D,
    style: anstyle::Style,
}

impl<D: std::fmt::Display> Styled<D> {
    pub(crate) fn new(display: D, style: anstyle::Style) -> Self {
        Self { display, style }
    }
}

impl<D: std::fmt::Display> std::fmt::Display for Styled<D> {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.style.render())?;
        self.display.fmt(f)?;
        write!(f, "{}", self.style.render_reset())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn plain_adds_nothing() {
        let palette = Palette::plain();
        assert_eq!(palette.error("FAILED").to_string(), "FAILED");
        assert_eq!(
            palette.status(crate::Status::Updated, "UPDATED").to_string(),
            "UPDATED"
        );
    }

    #[cfg(feature = "color")]
    #[test]
    fn color_wraps_in_escapes() {
        let palette = Palette::color();
        assert_eq!(
            palette.status(crate::Status::Passed, "PASSED").to_string(),
            "\u{1b}[32mPASSED\u{1b}[0m"
        );
    }
}
