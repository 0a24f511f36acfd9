//! Output verbosity.

/// How much the UI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Everything, plus retry hints for failed post-install commands.
    Verbose,
    #[default]
    Normal,
    /// Spinners and final status only.
    Quiet,
    /// Errors only.
    Silent,
}

impl OutputMode {
    /// Pick a mode from the `--verbose` / `--quiet` flags. Quiet wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    pub fn shows_details(&self) -> bool {
        *self == Self::Verbose
    }

    pub fn shows_spinners(&self) -> bool {
        *self != Self::Silent
    }

    pub fn shows_status(&self) -> bool {
        *self != Self::Silent
    }
}
