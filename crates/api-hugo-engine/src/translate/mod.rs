//! # Comment-node translation
//!
//! Maps TSDoc comment nodes onto the output vocabulary. Every known node kind
//! has a fixed output shape:
//!
//! | comment node | output |
//! | --- | --- |
//! | `PlainText` | inline Markdown, parsed ([`plain_text`]) |
//! | `CodeSpan` | inline code |
//! | `FencedCode` | code block with the declared language |
//! | `EscapedText` | decoded text |
//! | `ErrorText` | the raw text, verbatim |
//! | `HtmlStartTag` / `HtmlEndTag` | raw HTML |
//! | `LinkTag` | link; code destinations go through the resolver |
//! | `Paragraph` / `Section` | paragraph |
//! | `SoftBreak` | break |
//!
//! Block tags and comments are reported and skipped. Node kinds the translator
//! was never written for fail with [`TranslateError::UnsupportedNodeKind`].

pub mod plain_text;

use crate::context::RenderContext;
use crate::model::{DocNode, ItemId};
use crate::output::{OutputNode, link, text};

pub use plain_text::parse_inline_markdown;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("Unsupported doc node kind: {0}")]
    UnsupportedNodeKind(&'static str),
}

/// Translates a sequence of comment nodes. `origin` is the documented item,
/// used as the context for relative references and in diagnostics.
pub fn translate(
    nodes: &[DocNode],
    ctx: &RenderContext<'_>,
    origin: ItemId,
) -> Result<Vec<OutputNode>, TranslateError> {
    let mut out = Vec::new();
    for node in nodes {
        out.extend(translate_node(node, ctx, origin)?);
    }
    Ok(out)
}

pub fn translate_node(
    node: &DocNode,
    ctx: &RenderContext<'_>,
    origin: ItemId,
) -> Result<Vec<OutputNode>, TranslateError> {
    let translated = match node {
        DocNode::Paragraph { nodes } => {
            let trimmed = trim_paragraph(nodes);
            vec![OutputNode::Paragraph(translate(&trimmed, ctx, origin)?)]
        }
        DocNode::Section { nodes } => vec![OutputNode::Paragraph(translate(nodes, ctx, origin)?)],
        DocNode::PlainText { text } => parse_inline_markdown(text),
        DocNode::CodeSpan { code } => vec![OutputNode::InlineCode(code.clone())],
        DocNode::FencedCode { language, code } => vec![OutputNode::CodeBlock {
            language: language.clone(),
            code: code.clone(),
        }],
        DocNode::EscapedText { decoded_text, .. } => vec![text(decoded_text.as_str())],
        DocNode::ErrorText { text: raw, message } => {
            if let Some(message) = message {
                ctx.debug(
                    &ctx.model().get(origin).name,
                    format!("Rendering malformed comment text verbatim: {message}"),
                );
            }
            vec![text(raw.as_str())]
        }
        DocNode::HtmlStartTag { html } | DocNode::HtmlEndTag { html } => {
            vec![OutputNode::Html(html.clone())]
        }
        DocNode::LinkTag {
            code_destination,
            url_destination,
            link_text,
        } => translate_link(
            code_destination.as_deref(),
            url_destination.as_deref(),
            link_text.as_deref(),
            ctx,
            origin,
        ),
        DocNode::SoftBreak => vec![OutputNode::Break],
        DocNode::Block { tag_name, .. } | DocNode::BlockTag { tag_name } => {
            ctx.warn(
                &ctx.model().get(origin).name,
                format!("Unsupported block tag: {tag_name}"),
            );
            Vec::new()
        }
        DocNode::Comment => {
            ctx.warn(&ctx.model().get(origin).name, "Unsupported comment node");
            Vec::new()
        }
        DocNode::InlineTag { tag_name, .. } => {
            ctx.debug(
                &ctx.model().get(origin).name,
                format!("Skipping inline tag {tag_name}"),
            );
            Vec::new()
        }
        DocNode::InheritDocTag { .. } | DocNode::ParamBlock { .. } | DocNode::Unrecognized => {
            return Err(TranslateError::UnsupportedNodeKind(node.kind_name()));
        }
    };
    Ok(translated)
}

fn translate_link(
    code_destination: Option<&str>,
    url_destination: Option<&str>,
    link_text: Option<&str>,
    ctx: &RenderContext<'_>,
    origin: ItemId,
) -> Vec<OutputNode> {
    if let Some(url) = url_destination {
        return vec![link(url, link_text.unwrap_or(url))];
    }
    if let Some(reference) = code_destination {
        return vec![ctx.link_reference(reference, link_text, origin)];
    }
    link_text.map(|label| vec![text(label)]).unwrap_or_default()
}

fn is_blank(node: &DocNode) -> bool {
    match node {
        DocNode::SoftBreak => true,
        DocNode::PlainText { text } => text.trim().is_empty(),
        _ => false,
    }
}

/// Removes whitespace-only nodes from both ends of a paragraph and trims the
/// text at its edges.
pub fn trim_paragraph(nodes: &[DocNode]) -> Vec<DocNode> {
    let Some(start) = nodes.iter().position(|node| !is_blank(node)) else {
        return Vec::new();
    };
    let end = nodes
        .iter()
        .rposition(|node| !is_blank(node))
        .unwrap_or(start);

    let mut trimmed = nodes[start..=end].to_vec();
    if let Some(DocNode::PlainText { text }) = trimmed.first_mut() {
        *text = text.trim_start().to_string();
    }
    if let Some(DocNode::PlainText { text }) = trimmed.last_mut() {
        *text = text.trim_end().to_string();
    }
    trimmed
}
