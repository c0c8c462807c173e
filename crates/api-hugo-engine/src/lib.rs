pub mod compose;
pub mod context;
pub mod diagnostics;
pub mod documenter;
pub mod model;
pub mod output;
pub mod page;
pub mod resolve;
pub mod sections;
pub mod table;
pub mod translate;
pub mod writer;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use compose::{ComposeError, Composition, FrontMatter, PageFailure, compose};
pub use context::{RenderContext, RenderOptions};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, MemorySink, Severity};
pub use documenter::{Documenter, DocumenterOutput};
pub use model::{ApiItem, ApiItemKind, ApiModel, ItemId, ModelError};
pub use output::OutputNode;
pub use page::PageUnit;
pub use resolve::{Resolver, locate};
pub use translate::TranslateError;
pub use writer::{NewlineKind, PageWriter, WriteError};
