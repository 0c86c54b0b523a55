//! Verbosity-gated diagnostic trace for the scanners.
//!
//! Scanners never consult a global flag; the host builds a `Trace` from the
//! configured verbosity and hands it to each scan.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trace {
    enabled: bool,
}

impl Trace {
    /// A trace that emits nothing.
    pub fn silent() -> Self {
        Self { enabled: false }
    }

    /// Build from the 0/1 verbosity level used in the config file.
    pub fn from_verbosity(verbosity: u8) -> Self {
        Self {
            enabled: verbosity >= 1,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emit one trace line. `lno` is the 1-indexed transcript line.
    pub fn line(&self, scan: &str, lno: usize, msg: fmt::Arguments<'_>) {
        if self.enabled {
            log::info!("[{}] line {}: {}", scan, lno, msg);
        }
    }
}
