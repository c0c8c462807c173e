//! Shared, read-only state threaded through page composition.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::model::{ApiModel, ItemId};
use crate::output::{OutputNode, link, text};
use crate::resolve::{NameMatch, Resolver};

pub const DEFAULT_URI_ROOT: &str = "/docs/apis/";
pub const DEFAULT_VARIABLE_TABLE_THRESHOLD: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix for every generated link; also the target of the breadcrumb root.
    pub uri_root: String,
    /// A package's variables only get a listing table above this many.
    pub variable_table_threshold: usize,
    pub output_file_name_suffix: String,
    /// Packages must start with one of these to be documented. Empty allows all.
    pub package_prefixes: Vec<String>,
    /// Report skipped packages and other progress at info level.
    pub verbose: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            uri_root: DEFAULT_URI_ROOT.to_string(),
            variable_table_threshold: DEFAULT_VARIABLE_TABLE_THRESHOLD,
            output_file_name_suffix: String::new(),
            package_prefixes: Vec::new(),
            verbose: false,
        }
    }
}

impl RenderOptions {
    pub fn is_allowed_package(&self, package_name: &str) -> bool {
        self.package_prefixes.is_empty()
            || self
                .package_prefixes
                .iter()
                .any(|prefix| package_name.starts_with(prefix.as_str()))
    }
}

/// Everything a builder needs: the model, the resolver, options and the
/// diagnostic sink, plus the name of the page being built.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub resolver: &'a Resolver<'a>,
    pub options: &'a RenderOptions,
    pub sink: &'a dyn DiagnosticSink,
    pub page: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        resolver: &'a Resolver<'a>,
        options: &'a RenderOptions,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            resolver,
            options,
            sink,
            page: "",
        }
    }

    /// The same context, attributing diagnostics to another page.
    pub fn for_page<'p>(&self, page: &'p str) -> RenderContext<'p>
    where
        'a: 'p,
    {
        RenderContext {
            resolver: self.resolver,
            options: self.options,
            sink: self.sink,
            page,
        }
    }

    pub fn model(&self) -> &'a ApiModel {
        self.resolver.model()
    }

    pub fn warn(&self, entity: &str, message: impl Into<String>) {
        self.emit(Diagnostic::warning(message).for_entity(entity));
    }

    pub fn debug(&self, entity: &str, message: impl Into<String>) {
        self.emit(Diagnostic::debug(message).for_entity(entity));
    }

    fn emit(&self, diagnostic: Diagnostic) {
        let diagnostic = if self.page.is_empty() {
            diagnostic
        } else {
            diagnostic.on_page(self.page)
        };
        self.sink.emit(diagnostic);
    }

    /// A link to an item, labelled with its display name.
    pub fn link_item(&self, id: ItemId) -> OutputNode {
        let item = self.model().get(id);
        link(self.resolver.link_for(id), item.name.as_str())
    }

    /// Looks `name` up by display name and links it, or returns it as plain text.
    ///
    /// Ambiguous names link to the first match and are reported.
    pub fn link_if_found(&self, name: &str) -> OutputNode {
        if name.trim().is_empty() {
            return text(name);
        }
        match self.resolver.find_by_name(name) {
            NameMatch::NotFound => text(name),
            NameMatch::Unique(id) => self.link_item(id),
            NameMatch::Ambiguous { first, count } => {
                self.warn(
                    name,
                    format!("Found {count} items when searching for {name}; using the first"),
                );
                self.link_item(first)
            }
        }
    }

    /// Resolves a `{@link}` code destination. Failures fall back to plain text
    /// using the explicit link text, else the reference itself.
    pub fn link_reference(
        &self,
        reference: &str,
        link_text: Option<&str>,
        origin: ItemId,
    ) -> OutputNode {
        match self.resolver.resolve_reference(reference, Some(origin)) {
            Ok(id) => {
                let label = link_text
                    .map(str::to_string)
                    .unwrap_or_else(|| self.model().get(id).name.clone());
                link(self.resolver.link_for(id), label)
            }
            Err(message) => {
                let origin_name = &self.model().get(origin).name;
                self.warn(
                    origin_name,
                    format!("Unable to resolve reference \"{reference}\": {message}"),
                );
                text(link_text.unwrap_or(reference))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use crate::tests::{find, widget_model};
    use pretty_assertions::assert_eq;

    #[test]
    fn allow_list_matches_prefixes() {
        let options = RenderOptions {
            package_prefixes: vec!["@scope/".into()],
            ..RenderOptions::default()
        };

        assert!(options.is_allowed_package("@scope/pkg"));
        assert!(!options.is_allowed_package("@other/extras"));
        assert!(RenderOptions::default().is_allowed_package("anything"));
    }

    #[test]
    fn link_if_found_falls_back_to_text() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);

        assert_eq!(ctx.link_if_found("number"), text("number"));
        assert_eq!(
            ctx.link_if_found("Widget"),
            link("/docs/apis/pkg/widget", "Widget")
        );
        assert!(sink.has_no_warnings());
    }

    #[test]
    fn ambiguous_name_warns_with_page() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink).for_page("pkg");

        let node = ctx.link_if_found("Options");

        assert_eq!(node, link("pkg/options", "Options"));
        let warnings = sink.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].page.as_deref(), Some("pkg"));
    }

    #[test]
    fn failed_reference_uses_link_text() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);
        let widget = find(&model, "@scope/pkg!Widget");

        let node = ctx.link_reference("Missing#thing", Some("the thing"), widget);

        assert_eq!(node, text("the thing"));
        assert_eq!(sink.warnings().len(), 1);
    }
}
