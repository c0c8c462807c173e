//! Runs composition over every documented package of a model.

use rayon::prelude::*;

use crate::compose::{PageFailure, compose};
use crate::context::{RenderContext, RenderOptions};
use crate::diagnostics::{Diagnostic, DiagnosticSink, Severity};
use crate::model::{ApiModel, ItemId};
use crate::page::PageUnit;
use crate::resolve::Resolver;

/// Everything one run produced. Failed pages don't prevent the others.
#[derive(Debug, Default)]
pub struct DocumenterOutput {
    pub pages: Vec<PageUnit>,
    pub failures: Vec<PageFailure>,
}

pub struct Documenter<'m> {
    model: &'m ApiModel,
    options: RenderOptions,
}

impl<'m> Documenter<'m> {
    pub fn new(model: &'m ApiModel, options: RenderOptions) -> Self {
        Self { model, options }
    }

    /// Packages that pass the allow-list, in model order.
    pub fn documented_packages(&self, sink: &dyn DiagnosticSink) -> Vec<ItemId> {
        let skipped_severity = if self.options.verbose {
            Severity::Info
        } else {
            Severity::Debug
        };
        self.model
            .packages()
            .filter(|package| {
                let allowed = self.options.is_allowed_package(&package.name);
                if !allowed {
                    sink.emit(
                        Diagnostic::new(skipped_severity, "Skipping package")
                            .for_entity(&package.name),
                    );
                }
                allowed
            })
            .map(|package| package.id)
            .collect()
    }

    /// Composes every documented package and its subordinate pages.
    pub fn run(&self, sink: &dyn DiagnosticSink) -> DocumenterOutput {
        let resolver = Resolver::new(self.model, self.options.uri_root.as_str());
        let ctx = RenderContext::new(&resolver, &self.options, sink);
        let packages = self.documented_packages(sink);

        let compositions: Vec<_> = packages
            .par_iter()
            .map(|package| (*package, compose(&ctx, *package)))
            .collect();

        let mut output = DocumenterOutput::default();
        for (package, composition) in compositions {
            match composition {
                Ok(composition) => {
                    output.pages.push(composition.page);
                    output.pages.extend(composition.subpages);
                    output.failures.extend(composition.failures);
                }
                Err(error) => output.failures.push(PageFailure {
                    entity: self.model.get(package).name.clone(),
                    error,
                }),
            }
        }
        for failure in &output.failures {
            sink.emit(Diagnostic::error(failure.error.to_string()).for_entity(&failure.entity));
        }
        output
    }
}
