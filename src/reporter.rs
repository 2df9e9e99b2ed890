// src/reporter.rs
//
// Seam between the inbox module and whatever test runner hosts it.

use log::error;

/// Receives hard failures. A failure always ends the current test step,
/// so implementations never return.
pub trait Reporter {
    fn fail(&self, reason: &str) -> !;
}

/// Turns failures into panics, which the Rust test harness records as a
/// failed test.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl Reporter for PanicReporter {
    fn fail(&self, reason: &str) -> ! {
        error!("{}", reason);
        panic!("{}", reason)
    }
}
