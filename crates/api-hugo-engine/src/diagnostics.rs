//! Diagnostics reported while building pages.
//!
//! Components never talk to the logger directly. They hand [`Diagnostic`]s to
//! an injected [`DiagnosticSink`], which keeps warnings attributable to the
//! page and entity that produced them and lets tests capture them.

use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The page being composed when the diagnostic was raised.
    pub page: Option<String>,
    /// The entity the diagnostic is about.
    pub entity: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            page: None,
            entity: None,
            message: message.into(),
        }
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(Severity::Debug, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn on_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn for_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(page) = &self.page {
            write!(f, "[{page}] ")?;
        }
        if let Some(entity) = &self.entity {
            write!(f, "{entity}: ")?;
        }
        f.write_str(&self.message)
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let level = match diagnostic.severity {
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        };
        log::log!(level, "{diagnostic}");
    }
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    /// Diagnostics at warning severity or above.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.severity >= Severity::Warning)
            .collect()
    }

    pub fn has_no_warnings(&self) -> bool {
        self.warnings().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: Diagnostic) {
        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_page_and_entity() {
        let diagnostic = Diagnostic::warning("could not resolve Foo")
            .on_page("@scope/pkg")
            .for_entity("Widget");

        assert_eq!(
            diagnostic.to_string(),
            "[@scope/pkg] Widget: could not resolve Foo"
        );
    }

    #[test]
    fn memory_sink_separates_warnings_from_debug_output() {
        let sink = MemorySink::default();
        sink.emit(Diagnostic::debug("found 1 item"));
        assert!(sink.has_no_warnings());

        sink.emit(Diagnostic::warning("ambiguous"));

        assert_eq!(sink.diagnostics().len(), 2);
        assert_eq!(sink.warnings().len(), 1);
        assert!(!sink.has_no_warnings());
    }
}
