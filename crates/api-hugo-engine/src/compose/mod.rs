//! # Page composition
//!
//! Packages, classes and interfaces each get a standalone page. A package page
//! lists its exports grouped by kind; classes and interfaces found there are
//! composed as subordinate pages, everything else is rendered inline.
//!
//! Independent blocks of a page are built with `rayon` and placed in fixed
//! slots afterwards, so the output never depends on completion order.

pub mod front_matter;

use std::fmt;

use rayon::prelude::*;

use crate::context::RenderContext;
use crate::model::{ApiItem, ApiItemKind, ApiModel, ItemId};
use crate::output::{OutputNode, heading, heading_text, plain_text_of, squeeze, text};
use crate::page::PageUnit;
use crate::resolve::unscoped_package_name;
use crate::sections::{
    breadcrumb, build_section, deprecated_badge, deprecated_callout, heritage, release_callout,
    remarks, signature, summary,
};
use crate::table::build_table;
use crate::translate::TranslateError;

pub use front_matter::{FrontMatter, FrontMatterBuilder};

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("{entity} is a {kind}, which does not get its own page")]
    UnexpectedContainerKind { entity: String, kind: ApiItemKind },
    #[error("{entity} does not belong to a package")]
    MissingPackage { entity: String },
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

/// A page that could not be composed.
#[derive(Debug)]
pub struct PageFailure {
    pub entity: String,
    pub error: ComposeError,
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entity, self.error)
    }
}

/// A composed container page plus the subordinate pages it spawned.
#[derive(Debug)]
pub struct Composition {
    pub page: PageUnit,
    pub subpages: Vec<PageUnit>,
    /// Subordinate pages that failed. The container page itself is still valid.
    pub failures: Vec<PageFailure>,
}

/// Export groups of a package page, in page order.
const PACKAGE_GROUPS: [(ApiItemKind, &str); 6] = [
    (ApiItemKind::Interface, "Interfaces"),
    (ApiItemKind::Class, "Classes"),
    (ApiItemKind::Enum, "Enums"),
    (ApiItemKind::Function, "Functions"),
    (ApiItemKind::Variable, "Variables"),
    (ApiItemKind::TypeAlias, "Type Aliases"),
];

/// Composes the page of a package, class or interface.
pub fn compose(ctx: &RenderContext<'_>, id: ItemId) -> Result<Composition, ComposeError> {
    let item = ctx.model().get(id);
    match item.kind() {
        ApiItemKind::Package => compose_package(ctx, id),
        ApiItemKind::Class | ApiItemKind::Interface => Ok(Composition {
            page: compose_class(ctx, id)?,
            subpages: Vec::new(),
            failures: Vec::new(),
        }),
        kind => Err(unexpected(item, kind)),
    }
}

fn unexpected(item: &ApiItem, kind: ApiItemKind) -> ComposeError {
    ComposeError::UnexpectedContainerKind {
        entity: item.name.clone(),
        kind,
    }
}

pub fn compose_package(ctx: &RenderContext<'_>, id: ItemId) -> Result<Composition, ComposeError> {
    let model = ctx.model();
    let package = model.get(id);
    if package.kind() != ApiItemKind::Package {
        return Err(unexpected(package, package.kind()));
    }

    let page_name = ctx.resolver.locate(id);
    let ctx = &ctx.for_page(&page_name);
    let unscoped = unscoped_package_name(&package.name);
    let exports = model.exported_members(id);

    let mut front_matter = FrontMatterBuilder::new(&package.name, ApiItemKind::Package)
        .package(&package.name, unscoped)
        .summary(short_summary(ctx, id)?);

    let ((crumb, deprecated), (full_summary, remarks_blocks)) = rayon::join(
        || (breadcrumb(ctx, id), deprecated_callout(ctx, id)),
        || rayon::join(|| summary(ctx, id, true), || remarks(ctx, id, 2)),
    );

    let mut blocks = vec![heading_text(1, format!("{} package", package.name)), crumb];
    blocks.extend(release_callout(ctx, id));
    blocks.extend(deprecated?);
    blocks.push(OutputNode::Paragraph(full_summary?));
    blocks.extend(remarks_blocks?);

    let mut standalone = Vec::new();
    for (kind, title) in PACKAGE_GROUPS {
        let group: Vec<ItemId> = exports
            .iter()
            .filter(|item| item.kind() == kind)
            .map(|item| item.id)
            .collect();
        if group.is_empty() {
            continue;
        }
        for member in &group {
            let member = model.get(*member);
            front_matter = front_matter.member(kind, &member.name, ctx.resolver.link_for(member.id));
        }

        blocks.push(heading_text(2, title));
        let with_table = kind != ApiItemKind::Variable
            || group.len() > ctx.options.variable_table_threshold;
        if with_table {
            blocks.extend(build_table(ctx, &group)?);
        }

        if kind.has_standalone_page() {
            standalone.extend(group);
        } else {
            for member in &group {
                blocks.push(build_section(ctx, *member, 3)?);
            }
        }
    }

    for namespace in exports
        .iter()
        .filter(|item| item.kind() == ApiItemKind::Namespace)
    {
        standalone.extend(namespaced_pages(model, namespace.id));
    }

    for skipped in exports
        .iter()
        .filter(|item| !PACKAGE_GROUPS.iter().any(|(kind, _)| *kind == item.kind()))
    {
        ctx.debug(
            &skipped.name,
            format!("{} exports are not documented", skipped.kind()),
        );
    }

    let subpages: Vec<Result<PageUnit, PageFailure>> = standalone
        .par_iter()
        .map(|member| {
            compose_class(ctx, *member).map_err(|error| PageFailure {
                entity: model.get(*member).name.clone(),
                error,
            })
        })
        .collect();
    let (subpages, failures): (Vec<_>, Vec<_>) = subpages.into_iter().partition(Result::is_ok);

    Ok(Composition {
        page: PageUnit {
            entity: id,
            name: package.name.clone(),
            path: ctx.resolver.page_file(id, &ctx.options.output_file_name_suffix),
            front_matter: front_matter.finish(),
            root: OutputNode::Root(squeeze(blocks)),
        },
        subpages: subpages.into_iter().filter_map(Result::ok).collect(),
        failures: failures.into_iter().filter_map(Result::err).collect(),
    })
}

pub fn compose_class(ctx: &RenderContext<'_>, id: ItemId) -> Result<PageUnit, ComposeError> {
    let model = ctx.model();
    let item = model.get(id);
    let kind = item.kind();
    if !matches!(kind, ApiItemKind::Class | ApiItemKind::Interface) {
        return Err(unexpected(item, kind));
    }
    let package = model
        .associated_package(id)
        .ok_or_else(|| ComposeError::MissingPackage {
            entity: item.name.clone(),
        })?;

    let page_name = ctx.resolver.locate(id);
    let ctx = &ctx.for_page(&page_name);
    let unscoped = unscoped_package_name(&package.name);

    let mut front_matter = FrontMatterBuilder::new(&item.name, kind)
        .package(&package.name, unscoped)
        .summary(short_summary(ctx, id)?);
    for member in model.members(id) {
        front_matter =
            front_matter.member(member.kind(), &member.name, ctx.resolver.link_for(member.id));
    }

    let ((crumb, heritage_blocks), (full_summary, remarks_blocks)) = rayon::join(
        || (breadcrumb(ctx, id), heritage(ctx, id)),
        || rayon::join(|| summary(ctx, id, true), || remarks(ctx, id, 2)),
    );

    let mut title = vec![text(format!(
        "{} {}",
        item.name,
        kind.as_str().to_lowercase()
    ))];
    if item.is_deprecated() {
        title.push(text(" "));
        title.push(deprecated_badge());
    }

    let mut blocks = vec![heading(1, title), crumb];
    blocks.extend(release_callout(ctx, id));
    blocks.extend(deprecated_callout(ctx, id)?);
    blocks.extend(heritage_blocks?);
    blocks.push(OutputNode::Paragraph(full_summary?));
    blocks.extend(remarks_blocks?);
    blocks.extend(signature(ctx, id));

    let members_of = |kinds: &[ApiItemKind]| -> Vec<ItemId> {
        model
            .members(id)
            .filter(|member| kinds.contains(&member.kind()))
            .map(|member| member.id)
            .collect()
    };

    for constructor in members_of(&[ApiItemKind::Constructor]) {
        blocks.push(build_section(ctx, constructor, 2)?);
    }

    let methods = members_of(&[ApiItemKind::Method, ApiItemKind::MethodSignature]);
    if !methods.is_empty() {
        blocks.push(heading_text(2, "Methods"));
        for method in methods {
            blocks.push(build_section(ctx, method, 3)?);
        }
    }

    let properties = members_of(&[ApiItemKind::Property, ApiItemKind::PropertySignature]);
    if !properties.is_empty() {
        blocks.push(heading_text(2, "Properties"));
        for property in properties {
            blocks.push(build_section(ctx, property, 3)?);
        }
    }

    Ok(PageUnit {
        entity: id,
        name: item.name.clone(),
        path: ctx.resolver.page_file(id, &ctx.options.output_file_name_suffix),
        front_matter: front_matter.finish(),
        root: OutputNode::Root(squeeze(blocks)),
    })
}

/// Classes and interfaces declared inside a namespace, at any depth.
fn namespaced_pages(model: &ApiModel, namespace: ItemId) -> Vec<ItemId> {
    model
        .members(namespace)
        .flat_map(|member| match member.kind() {
            ApiItemKind::Namespace => namespaced_pages(model, member.id),
            kind if kind.has_standalone_page() => vec![member.id],
            _ => Vec::new(),
        })
        .collect()
}

/// Plain text of the first summary paragraph.
fn short_summary(ctx: &RenderContext<'_>, id: ItemId) -> Result<String, TranslateError> {
    Ok(plain_text_of(&summary(ctx, id, false)?).trim().to_string())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderOptions;
    use crate::diagnostics::MemorySink;
    use crate::resolve::Resolver;
    use crate::tests::{find, widget_model};
    use pretty_assertions::assert_eq;
    use relative_path::RelativePathBuf;

    #[test]
    fn classes_inside_namespaces_get_pages_where_links_point() {
        // Given a class nested in a namespace
        let json = r#"{
            "kind": "Package",
            "name": "@scope/geo",
            "members": [
                { "kind": "Namespace", "name": "Shapes", "members": [{ "kind": "Class", "name": "Circle" }] }
            ]
        }"#;
        let mut model = ApiModel::new();
        let package = model
            .load_package_json(json, std::path::Path::new("geo.api.json"))
            .unwrap();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);

        // When composing the package
        let composition = compose(&ctx, package).unwrap();

        // Then the class page is written at the path its links resolve to
        assert_eq!(composition.subpages.len(), 1);
        let circle = &composition.subpages[0];
        assert_eq!(circle.path, RelativePathBuf::from("geo/Shapes/Circle.md"));
        assert_eq!(resolver.link_for(circle.entity), "/docs/apis/geo/shapes/circle");
    }

    #[test]
    fn package_spawns_pages_for_classes_and_interfaces_only() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);
        let package = model.find_package("@scope/pkg").unwrap().id;

        let composition = compose(&ctx, package).unwrap();

        let mut kinds: Vec<ApiItemKind> = composition
            .subpages
            .iter()
            .map(|page| model.get(page.entity).kind())
            .collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds, vec![ApiItemKind::Class, ApiItemKind::Interface]);
        assert_eq!(composition.subpages.len(), 4);
        assert!(composition.failures.is_empty());
        assert_eq!(composition.page.path, RelativePathBuf::from("pkg.md"));
    }

    #[test]
    fn subpages_keep_model_order() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);
        let package = model.find_package("@scope/pkg").unwrap().id;

        let composition = compose(&ctx, package).unwrap();
        let names: Vec<&str> = composition
            .subpages
            .iter()
            .map(|page| page.name.as_str())
            .collect();

        assert_eq!(names, vec!["Sizable", "Options", "Widget", "Gadget"]);
    }

    #[test]
    fn group_headings_follow_fixed_order() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);
        let package = model.find_package("@scope/pkg").unwrap().id;

        let composition = compose(&ctx, package).unwrap();
        let groups: Vec<String> = composition
            .page
            .root
            .children()
            .iter()
            .filter(|node| matches!(node, OutputNode::Heading { depth: 2, .. }))
            .map(OutputNode::plain_text)
            .collect();

        assert_eq!(
            groups,
            vec!["Interfaces", "Classes", "Enums", "Functions", "Variables", "Type Aliases"]
        );
    }

    #[test]
    fn small_variable_groups_skip_the_table() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let sink = MemorySink::default();
        let package = model.find_package("@scope/pkg").unwrap().id;

        let count_tables = |threshold: usize| {
            let options = RenderOptions {
                variable_table_threshold: threshold,
                ..RenderOptions::default()
            };
            let ctx = RenderContext::new(&resolver, &options, &sink);
            let page = compose(&ctx, package).unwrap().page;
            page.root
                .children()
                .iter()
                .filter(|node| matches!(node, OutputNode::Table(_)))
                .count()
        };

        assert_eq!(count_tables(0), count_tables(10) + 1);
    }

    #[test]
    fn class_page_sections() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);
        let widget = find(&model, "@scope/pkg!Widget");

        let page = compose_class(&ctx, widget).unwrap();
        let headings: Vec<String> = page
            .root
            .children()
            .iter()
            .filter(|node| matches!(node, OutputNode::Heading { .. }))
            .map(OutputNode::plain_text)
            .collect();

        assert_eq!(
            headings,
            vec![
                "Widget class",
                "Remarks",
                "Example 1",
                "Example 2",
                "Constructor",
                "Methods",
                "render",
                "Properties",
                "label",
            ]
        );
        assert_eq!(page.path, RelativePathBuf::from("pkg/Widget.md"));
        assert_eq!(page.front_matter.title, "Widget Class");
        assert_eq!(page.front_matter.summary, "Draws the widget.");
    }

    #[test]
    fn non_container_is_rejected() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);
        let function = find(&model, "@scope/pkg!createWidget");

        let error = compose(&ctx, function).unwrap_err();

        assert!(matches!(
            error,
            ComposeError::UnexpectedContainerKind {
                kind: ApiItemKind::Function,
                ..
            }
        ));
    }
}
