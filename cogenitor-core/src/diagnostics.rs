use std::sync::Mutex;

/// how severe a [`Diagnostic`] is. `Error` marks a component that could not
/// produce a usable result at all (the caller must still decide whether to
/// keep going); `Warning` marks a recoverable deviation (a dropped field, a
/// narrowed type); `Info` is purely informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// a single recorded deviation from a literal translation of the input
/// document. Diagnostics are how translators report "i did something
/// reasonable but lossy" instead of panicking or silently guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// dotted path to the offending element, e.g. `paths./pets.get.parameters[0]`
    pub location: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, location, message)
    }

    pub fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, location, message)
    }

    pub fn info(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, location, message)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}: {}", self.severity, self.location, self.message)
    }
}

/// accumulates [`Diagnostic`]s raised while translating a single document.
/// Wrapped in a `Mutex` rather than threaded through every call by `&mut`,
/// since translator functions are called from deep, branching recursion
/// (schema translation, parameter translation, response mapping) where
/// plumbing a mutable borrow through every signature would obscure the
/// actual logic; diagnostics are side information, not part of any
/// translator's control flow.
#[derive(Default)]
pub struct DiagnosticCollector {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, diagnostic: Diagnostic) {
        self.diagnostics
            .lock()
            .expect("diagnostics mutex poisoned")
            .push(diagnostic);
    }

    pub fn warning(&self, location: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::warning(location, message));
    }

    pub fn error(&self, location: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::error(location, message));
    }

    pub fn info(&self, location: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::info(location, message));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .lock()
            .expect("diagnostics mutex poisoned")
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// drains the collected diagnostics, leaving the collector empty.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.lock().expect("diagnostics mutex poisoned"))
    }

    pub fn len(&self) -> usize {
        self.diagnostics.lock().expect("diagnostics mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for DiagnosticCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticCollector")
            .field("diagnostics", &*self.diagnostics.lock().expect("diagnostics mutex poisoned"))
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_push_and_query() {
        let dc = DiagnosticCollector::new();
        assert!(dc.is_empty());
        dc.warning("paths./pets.get.parameters[2]", "cookie parameters are not supported, dropped");
        assert!(!dc.has_errors());
        dc.error("components.schemas.Pet", "unsupported schema shape");
        assert!(dc.has_errors());
        assert_eq!(dc.len(), 2);
    }

    #[test]
    fn test_take_all_drains() {
        let dc = DiagnosticCollector::new();
        dc.info("x", "y");
        let taken = dc.take_all();
        assert_eq!(taken.len(), 1);
        assert!(dc.is_empty());
    }
}
