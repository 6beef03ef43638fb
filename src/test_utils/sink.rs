//! A [`DiagnosticSink`] that keeps every report for later assertions.

use std::cell::RefCell;

use crate::metadata::DiagnosticSink;

/// Records error and fatal reports in the order they arrive.
#[derive(Debug, Default)]
pub struct RecordingSink {
    errors: RefCell<Vec<String>>,
    fatals: RefCell<Vec<String>>,
}

impl RecordingSink {
    /// Recoverable errors reported so far.
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    /// Fatal errors reported so far.
    pub fn fatals(&self) -> Vec<String> {
        self.fatals.borrow().clone()
    }

    /// Returns `true` if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty() && self.fatals.borrow().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn fatal(&self, message: &str) {
        self.fatals.borrow_mut().push(message.to_string());
    }
}
