//! # Item sections
//!
//! [`build_section`] renders one API item inline, as a heading followed by a
//! fixed sequence of blocks:
//!
//! 1. heading (with a `Deprecated` badge) and the beta/alpha warning
//! 2. deprecation callout, full summary, remarks and examples
//! 3. `Returns:` for functions and methods
//! 4. parameter table
//! 5. `Type:` line for properties and variables
//! 6. enum member listing and one nested section per member
//! 7. signature (not for enums and enum members)
//!
//! Items without a doc comment simply skip the comment-driven blocks.

pub mod blocks;
pub mod heritage;

use crate::context::RenderContext;
use crate::model::{ApiItemKind, ItemId};
use crate::output::{OutputNode, code_block, heading, label, strong_text, text};
use crate::translate::TranslateError;

pub use blocks::{
    breadcrumb, deprecated_callout, parameter_table, release_callout, remarks, returns, signature,
    summary,
};
pub use heritage::{heritage, hyperlinked_excerpt, linked_type};

/// Heading title of an item: its name, or "Constructor".
pub fn section_title(ctx: &RenderContext<'_>, id: ItemId) -> String {
    let item = ctx.model().get(id);
    match item.kind() {
        ApiItemKind::Constructor => "Constructor".to_string(),
        _ => item.display_name().to_string(),
    }
}

pub fn deprecated_badge() -> OutputNode {
    label("Deprecated", "default")
}

pub fn build_section(
    ctx: &RenderContext<'_>,
    id: ItemId,
    level: u8,
) -> Result<OutputNode, TranslateError> {
    let item = ctx.model().get(id);
    let kind = item.kind();
    let mut out = Vec::new();

    let mut title = vec![text(section_title(ctx, id))];
    if item.is_deprecated() {
        title.push(text(" "));
        title.push(deprecated_badge());
    }
    out.push(heading(level, title));
    out.extend(release_callout(ctx, id));

    if item.doc_comment.is_some() {
        out.extend(deprecated_callout(ctx, id)?);
        out.push(OutputNode::Paragraph(summary(ctx, id, true)?));
        out.extend(remarks(ctx, id, level.saturating_add(1))?);
    }

    out.extend(returns(ctx, id)?);
    out.extend(parameter_table(ctx, id)?);

    if let Some(value_type) = item.detail.value_type() {
        let mut line = vec![strong_text("Type:"), text(" ")];
        line.extend(linked_type(ctx, value_type, id));
        out.push(OutputNode::Paragraph(line));
    }

    if kind == ApiItemKind::Enum {
        let listing: Vec<&str> = ctx
            .model()
            .members(id)
            .map(|member| member.excerpt.text.as_str())
            .collect();
        out.push(code_block("typescript", listing.join("\n")));
        for member in &item.members {
            out.push(build_section(ctx, *member, level.saturating_add(1))?);
        }
    }

    if !matches!(kind, ApiItemKind::Enum | ApiItemKind::EnumMember) {
        out.extend(signature(ctx, id));
    }

    Ok(OutputNode::Paragraph(out))
}
