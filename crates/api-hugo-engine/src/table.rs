//! Listing tables: one row per item of a homogeneous group.

use crate::context::RenderContext;
use crate::model::{ApiItemKind, ItemId};
use crate::output::{
    OutputNode, TableCell, TableRow, compact_inline, into_inline, table_class, text,
};
use crate::sections::{deprecated_badge, linked_type, summary};
use crate::translate::{TranslateError, translate};

/// Column header naming a kind of item.
pub fn kind_label(kind: ApiItemKind) -> &'static str {
    match kind {
        ApiItemKind::Model => "Model",
        ApiItemKind::Package => "Package",
        ApiItemKind::EntryPoint => "Entry point",
        ApiItemKind::Namespace => "Namespace",
        ApiItemKind::Class => "Class",
        ApiItemKind::Interface => "Interface",
        ApiItemKind::Constructor => "Constructor",
        ApiItemKind::Method | ApiItemKind::MethodSignature => "Method",
        ApiItemKind::Property | ApiItemKind::PropertySignature => "Property",
        ApiItemKind::Function => "Function",
        ApiItemKind::Variable => "Variable",
        ApiItemKind::TypeAlias => "Type Alias",
        ApiItemKind::Enum => "Enum",
        ApiItemKind::EnumMember => "Member",
    }
}

/// Builds the table for `items` followed by its class marker.
///
/// The column layout follows the first item's kind; rows keep input order.
pub fn build_table(
    ctx: &RenderContext<'_>,
    items: &[ItemId],
) -> Result<Vec<OutputNode>, TranslateError> {
    let Some(first) = items.first() else {
        return Ok(Vec::new());
    };
    let kind = ctx.model().get(*first).kind();
    let with_type = matches!(
        kind,
        ApiItemKind::Property | ApiItemKind::PropertySignature | ApiItemKind::Variable
    );

    let mut header = vec![TableCell::text(kind_label(kind))];
    if with_type {
        header.push(TableCell::text("Type"));
    }
    header.push(TableCell::text("Description"));
    header.push(TableCell::text("Notes"));

    let mut rows = vec![TableRow::new(header)];
    for id in items {
        let item = ctx.model().get(*id);
        let mut cells = vec![TableCell::new(vec![ctx.link_item(*id)])];
        if with_type {
            let value_type = item.detail.value_type().cloned().unwrap_or_default();
            cells.push(TableCell::new(linked_type(ctx, &value_type, *id)));
        }
        cells.push(TableCell::new(into_inline(summary(ctx, *id, false)?)));
        cells.push(TableCell::new(notes(ctx, *id)?));
        rows.push(TableRow::new(cells));
    }

    Ok(vec![
        OutputNode::Table(rows),
        table_class(kind.as_str()),
    ])
}

fn notes(ctx: &RenderContext<'_>, id: ItemId) -> Result<Vec<OutputNode>, TranslateError> {
    let deprecated = ctx
        .model()
        .get(id)
        .doc_comment
        .as_ref()
        .and_then(|doc| doc.deprecated.as_ref());
    let Some(nodes) = deprecated else {
        return Ok(Vec::new());
    };

    let mut out = vec![deprecated_badge(), text(" ")];
    out.extend(into_inline(translate(nodes, ctx, id)?));
    Ok(compact_inline(out))
}
