//! Small content blocks shared by item sections and container pages.

use crate::context::RenderContext;
use crate::model::{ApiItemKind, ItemId, ReleaseTag};
use crate::output::{
    OutputNode, TableCell, TableRow, callout, code_block, heading_text, into_inline, link,
    strong_text, table_class, text,
};
use crate::translate::{TranslateError, translate};

use super::heritage::linked_type;

pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// `Packages > pkg > Widget`, every level a link.
pub fn breadcrumb(ctx: &RenderContext<'_>, id: ItemId) -> OutputNode {
    let mut children = vec![
        link(ctx.resolver.uri_root(), "Packages"),
        text(BREADCRUMB_SEPARATOR),
    ];
    for item in ctx.model().hierarchy(id) {
        if item.kind().is_structural() {
            continue;
        }
        children.push(ctx.link_item(item.id));
        children.push(text(BREADCRUMB_SEPARATOR));
    }
    children.pop();
    OutputNode::Paragraph(children)
}

/// The summary of an item's doc comment. Without `extended` only the first
/// summary node is used, which is what listing tables show.
pub fn summary(
    ctx: &RenderContext<'_>,
    id: ItemId,
    extended: bool,
) -> Result<Vec<OutputNode>, TranslateError> {
    let Some(doc) = &ctx.model().get(id).doc_comment else {
        return Ok(Vec::new());
    };
    if extended {
        translate(&doc.summary, ctx, id)
    } else {
        translate(&doc.summary[..doc.summary.len().min(1)], ctx, id)
    }
}

pub fn deprecated_callout(
    ctx: &RenderContext<'_>,
    id: ItemId,
) -> Result<Option<OutputNode>, TranslateError> {
    let deprecated = ctx
        .model()
        .get(id)
        .doc_comment
        .as_ref()
        .and_then(|doc| doc.deprecated.as_ref());
    match deprecated {
        Some(nodes) => Ok(Some(callout(
            "warning",
            Some("Deprecated"),
            translate(nodes, ctx, id)?,
        ))),
        None => Ok(None),
    }
}

/// Warning shown on beta and alpha items right after their heading.
pub fn release_callout(ctx: &RenderContext<'_>, id: ItemId) -> Option<OutputNode> {
    let (title, stage) = match ctx.model().get(id).release_tag {
        ReleaseTag::Beta => ("Beta", "beta"),
        ReleaseTag::Alpha => ("Alpha", "alpha"),
        ReleaseTag::None | ReleaseTag::Internal | ReleaseTag::Public => return None,
    };
    Some(callout(
        "warning",
        Some(title),
        vec![text(format!("This API is in {stage} and may change."))],
    ))
}

/// The remarks section followed by the `@example` blocks.
///
/// A single example is headed "Example"; several are numbered from 1.
pub fn remarks(
    ctx: &RenderContext<'_>,
    id: ItemId,
    depth: u8,
) -> Result<Vec<OutputNode>, TranslateError> {
    let Some(doc) = &ctx.model().get(id).doc_comment else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    if let Some(remarks) = &doc.remarks {
        out.push(heading_text(depth, "Remarks"));
        out.push(OutputNode::Paragraph(translate(remarks, ctx, id)?));
    }

    let numbered = doc.examples.len() > 1;
    for (index, example) in doc.examples.iter().enumerate() {
        let title = if numbered {
            format!("Example {}", index + 1)
        } else {
            "Example".to_string()
        };
        out.push(heading_text(depth, title));
        out.push(OutputNode::Paragraph(translate(example, ctx, id)?));
    }
    Ok(out)
}

pub fn returns(ctx: &RenderContext<'_>, id: ItemId) -> Result<Vec<OutputNode>, TranslateError> {
    let item = ctx.model().get(id);
    if !item.kind().has_return_value() {
        return Ok(Vec::new());
    }
    let Some(nodes) = item.doc_comment.as_ref().and_then(|doc| doc.returns.as_ref()) else {
        return Ok(Vec::new());
    };
    Ok(vec![
        OutputNode::Paragraph(vec![strong_text("Returns:")]),
        OutputNode::Paragraph(translate(nodes, ctx, id)?),
    ])
}

pub fn signature(ctx: &RenderContext<'_>, id: ItemId) -> Vec<OutputNode> {
    let item = ctx.model().get(id);
    if item.excerpt.is_empty() {
        return Vec::new();
    }
    vec![
        OutputNode::Paragraph(vec![strong_text("Signature:")]),
        code_block("typescript", item.excerpt_with_modifiers()),
    ]
}

/// The parameter table of a constructor, method or function. Empty when the
/// item takes no parameters.
pub fn parameter_table(
    ctx: &RenderContext<'_>,
    id: ItemId,
) -> Result<Vec<OutputNode>, TranslateError> {
    let item = ctx.model().get(id);
    let parameters = match item.detail.parameters() {
        Some(parameters) if !parameters.is_empty() => parameters,
        _ => return Ok(Vec::new()),
    };
    let doc = item.doc_comment.as_ref();

    let mut rows = vec![TableRow::new(vec![
        TableCell::text("Parameter"),
        TableCell::text("Type"),
        TableCell::text("Description"),
        TableCell::text("Notes"),
    ])];
    for parameter in parameters {
        let description = match doc.and_then(|doc| doc.param(&parameter.name)) {
            Some(block) => into_inline(translate(&block.content, ctx, id)?),
            None => Vec::new(),
        };
        let notes = if parameter.is_optional {
            vec![text("Optional")]
        } else {
            Vec::new()
        };
        rows.push(TableRow::new(vec![
            TableCell::text(parameter.name.as_str()),
            TableCell::new(linked_type(ctx, &parameter.parameter_type, id)),
            TableCell::new(description),
            TableCell::new(notes),
        ]));
    }

    Ok(vec![
        OutputNode::Paragraph(vec![strong_text("Parameters:")]),
        OutputNode::Table(rows),
        table_class(parameter_table_kind(item.kind())),
    ])
}

fn parameter_table_kind(kind: ApiItemKind) -> &'static str {
    match kind {
        ApiItemKind::Constructor => "constructor",
        ApiItemKind::Function => "function",
        _ => "method",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderOptions;
    use crate::diagnostics::MemorySink;
    use crate::output::{plain_text_of, squeeze};
    use crate::resolve::Resolver;
    use crate::tests::{find, widget_model};
    use pretty_assertions::assert_eq;

    #[test]
    fn breadcrumb_links_every_visible_ancestor() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);
        let widget = find(&model, "@scope/pkg!Widget");

        assert_eq!(
            breadcrumb(&ctx, widget),
            OutputNode::Paragraph(vec![
                link("/docs/apis/", "Packages"),
                text(" > "),
                link("/docs/apis/pkg", "@scope/pkg"),
                text(" > "),
                link("/docs/apis/pkg/widget", "Widget"),
            ])
        );
    }

    #[test]
    fn multiple_examples_are_numbered_in_order() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);
        let widget = find(&model, "@scope/pkg!Widget");

        let headings: Vec<String> = remarks(&ctx, widget, 2)
            .unwrap()
            .iter()
            .filter(|node| matches!(node, OutputNode::Heading { .. }))
            .map(OutputNode::plain_text)
            .collect();

        assert_eq!(headings, vec!["Remarks", "Example 1", "Example 2"]);
    }

    #[test]
    fn short_summary_uses_first_node_only() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);
        let widget = find(&model, "@scope/pkg!Widget");

        let short = squeeze(summary(&ctx, widget, false).unwrap());

        assert_eq!(plain_text_of(&short), "Draws the widget.");
    }

    #[test]
    fn parameter_table_lists_each_parameter() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);
        let render = find(&model, "@scope/pkg!Widget#render");

        let blocks = parameter_table(&ctx, render).unwrap();
        let Some(OutputNode::Table(rows)) = blocks.get(1) else {
            panic!("expected a table, got {blocks:?}");
        };

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cells[0], TableCell::text("size"));
        assert_eq!(rows[1].cells[1], TableCell::text("number"));
        assert_eq!(blocks[2], table_class("method"));
    }

    #[test]
    fn beta_items_get_a_warning() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let options = RenderOptions::default();
        let sink = MemorySink::default();
        let ctx = RenderContext::new(&resolver, &options, &sink);
        let beta = find(&model, "@scope/pkg!defaultSize");
        let widget = find(&model, "@scope/pkg!Widget");

        let warning = release_callout(&ctx, beta).map(|node| node.plain_text());

        assert_eq!(warning.as_deref(), Some("This API is in beta and may change."));
        assert_eq!(release_callout(&ctx, widget), None);
    }
}
