//! Type excerpts with hyperlinks, and the extends/implements/type-parameters block.

use crate::context::RenderContext;
use crate::model::{Excerpt, ExcerptTokenKind, ItemDetail, ItemId};
use crate::output::{OutputNode, emphasis_text, into_inline, link, strong_text, text};
use crate::translate::{TranslateError, translate};

/// Renders an excerpt, linking every reference token that resolves.
///
/// Tokens whose canonical reference fails to resolve are looked up by name
/// before falling back to their text.
pub fn hyperlinked_excerpt(
    ctx: &RenderContext<'_>,
    excerpt: &Excerpt,
    origin: ItemId,
) -> Vec<OutputNode> {
    excerpt
        .spanned_tokens()
        .into_iter()
        .map(|token| match (token.kind, token.canonical_reference.as_deref()) {
            (ExcerptTokenKind::Reference, Some(reference)) => {
                match ctx.resolver.resolve_reference(reference, Some(origin)) {
                    Ok(id) => link(ctx.resolver.link_for(id), token.text),
                    Err(_) => ctx.link_if_found(&token.text),
                }
            }
            (ExcerptTokenKind::Reference, None) => ctx.link_if_found(&token.text),
            (ExcerptTokenKind::Content, _) => text(token.text),
        })
        .collect()
}

/// A type as a link where possible. Excerpts without reference tokens are
/// looked up by their whole text.
pub fn linked_type(ctx: &RenderContext<'_>, excerpt: &Excerpt, origin: ItemId) -> Vec<OutputNode> {
    let has_references = excerpt
        .tokens
        .iter()
        .any(|token| token.kind == ExcerptTokenKind::Reference);
    if has_references {
        hyperlinked_excerpt(ctx, excerpt, origin)
    } else {
        vec![ctx.link_if_found(excerpt.text.trim())]
    }
}

/// Extends, implements and type parameters of a class or interface.
pub fn heritage(ctx: &RenderContext<'_>, id: ItemId) -> Result<Vec<OutputNode>, TranslateError> {
    let item = ctx.model().get(id);
    let mut out = Vec::new();

    let (extends, implements): (Vec<&Excerpt>, Vec<&Excerpt>) = match &item.detail {
        ItemDetail::Class {
            extends_type,
            implements_types,
            ..
        } => (extends_type.iter().collect(), implements_types.iter().collect()),
        ItemDetail::Interface { extends_types, .. } => {
            (extends_types.iter().collect(), Vec::new())
        }
        _ => (Vec::new(), Vec::new()),
    };

    let extends: Vec<&Excerpt> = extends.into_iter().filter(|e| !e.is_empty()).collect();
    if !extends.is_empty() {
        out.push(excerpt_list(ctx, "Extends:", &extends, id));
    }
    let implements: Vec<&Excerpt> = implements.into_iter().filter(|e| !e.is_empty()).collect();
    if !implements.is_empty() {
        out.push(excerpt_list(ctx, "Implements:", &implements, id));
    }

    let type_parameters = item.detail.type_parameters();
    if !type_parameters.is_empty() {
        out.push(OutputNode::Paragraph(vec![strong_text("Type parameters:")]));
        let doc = item.doc_comment.as_ref();
        for type_parameter in type_parameters {
            let mut line = vec![strong_text(type_parameter.name.as_str()), text(" -- ")];
            match doc.and_then(|doc| doc.type_param(&type_parameter.name)) {
                Some(block) if !block.content.is_empty() => {
                    line.extend(into_inline(translate(&block.content, ctx, id)?));
                }
                _ => line.push(emphasis_text("No documentation.")),
            }
            out.push(OutputNode::Paragraph(line));
        }
    }

    Ok(out)
}

fn excerpt_list(
    ctx: &RenderContext<'_>,
    label: &str,
    excerpts: &[&Excerpt],
    origin: ItemId,
) -> OutputNode {
    let mut line = vec![strong_text(label), text(" ")];
    for (index, excerpt) in excerpts.iter().enumerate() {
        if index > 0 {
            line.push(text(", "));
        }
        line.extend(hyperlinked_excerpt(ctx, excerpt, origin));
    }
    OutputNode::Paragraph(line)
}
