//! Sinks for non-fatal scan problems
//!
//! The scanner never decides how a problem is shown. It hands each
//! [`ScanError`] to a [`Diagnostics`] implementation and carries on.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::error::ScanError;

/// Receiver for warnings raised while walking a directory tree.
pub trait Diagnostics {
    fn emit(&mut self, error: ScanError);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn emit(&mut self, error: ScanError) {
        (**self).emit(error);
    }
}

/// Collect diagnostics for later inspection.
impl Diagnostics for Vec<ScanError> {
    fn emit(&mut self, error: ScanError) {
        self.push(error);
    }
}

/// Forward diagnostics to the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn emit(&mut self, error: ScanError) {
        log::warn!("{}", error);
    }
}

/// Print diagnostics to stderr as yellow `warning:` lines.
pub struct ConsoleDiagnostics {
    stderr: StandardStream,
}

impl ConsoleDiagnostics {
    pub fn new(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self {
            stderr: StandardStream::stderr(choice),
        }
    }

    fn write(&mut self, error: &ScanError) -> std::io::Result<()> {
        self.stderr
            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(self.stderr, "warning:")?;
        self.stderr.reset()?;
        writeln!(self.stderr, " {}", error)?;
        Ok(())
    }
}

impl Diagnostics for ConsoleDiagnostics {
    fn emit(&mut self, error: ScanError) {
        log::debug!("diagnostic: {:?}", error);
        // A closed stderr leaves nowhere to report to.
        let _ = self.write(&error);
    }
}
