//! Paragraph squeezing.
//!
//! Section builders wrap everything in paragraphs, including headings, tables
//! and other paragraphs. Squeezing hoists block children out of paragraphs,
//! regroups stray inline runs into paragraphs, merges adjacent text and drops
//! paragraphs with nothing meaningful in them. Squeezing a squeezed tree is a
//! no-op.

use super::{OutputNode, TableCell, TableRow};

/// Normalizes a sequence of block-level nodes.
pub fn squeeze(nodes: Vec<OutputNode>) -> Vec<OutputNode> {
    let mut out = Vec::new();
    let mut inline_run = Vec::new();
    squeeze_into(nodes, &mut out, &mut inline_run);
    flush_inline(&mut out, &mut inline_run);
    out
}

fn squeeze_into(nodes: Vec<OutputNode>, out: &mut Vec<OutputNode>, inline_run: &mut Vec<OutputNode>) {
    for node in nodes {
        match node {
            OutputNode::Paragraph(children) => {
                if children.iter().any(OutputNode::is_block) {
                    flush_inline(out, inline_run);
                    squeeze_into(children, out, inline_run);
                    flush_inline(out, inline_run);
                } else {
                    flush_inline(out, inline_run);
                    inline_run.extend(children);
                    flush_inline(out, inline_run);
                }
            }
            OutputNode::Root(children) => {
                flush_inline(out, inline_run);
                out.push(OutputNode::Root(squeeze(children)));
            }
            OutputNode::Heading { depth, children } => {
                flush_inline(out, inline_run);
                out.push(OutputNode::Heading {
                    depth,
                    children: compact_inline(children),
                });
            }
            OutputNode::Table(rows) => {
                flush_inline(out, inline_run);
                out.push(OutputNode::Table(rows.into_iter().map(squeeze_row).collect()));
            }
            block @ OutputNode::CodeBlock { .. } => {
                flush_inline(out, inline_run);
                out.push(block);
            }
            inline => inline_run.push(inline),
        }
    }
}

fn squeeze_row(row: TableRow) -> TableRow {
    TableRow::new(
        row.cells
            .into_iter()
            .map(|cell| TableCell::new(super::into_inline(cell.children)))
            .collect(),
    )
}

fn flush_inline(out: &mut Vec<OutputNode>, inline_run: &mut Vec<OutputNode>) {
    if inline_run.is_empty() {
        return;
    }
    let children = trim_inline(compact_inline(std::mem::take(inline_run)));
    if children.iter().any(is_meaningful) {
        out.push(OutputNode::Paragraph(children));
    }
}

/// Merges adjacent text nodes and compacts nested inline containers.
pub fn compact_inline(nodes: Vec<OutputNode>) -> Vec<OutputNode> {
    let mut out: Vec<OutputNode> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let node = match node {
            OutputNode::Strong(children) => OutputNode::Strong(compact_inline(children)),
            OutputNode::Emphasis(children) => OutputNode::Emphasis(compact_inline(children)),
            OutputNode::Link { url, children } => OutputNode::Link {
                url,
                children: compact_inline(children),
            },
            other => other,
        };

        if let OutputNode::Text(value) = &node {
            if value.is_empty() {
                continue;
            }
            if let Some(OutputNode::Text(previous)) = out.last_mut() {
                previous.push_str(value);
                continue;
            }
        }
        out.push(node);
    }
    out
}

/// Drops breaks at either edge of a paragraph; a paragraph cannot start or end on a line break.
fn trim_inline(mut nodes: Vec<OutputNode>) -> Vec<OutputNode> {
    while matches!(nodes.last(), Some(OutputNode::Break)) {
        nodes.pop();
    }
    let leading = nodes
        .iter()
        .take_while(|node| matches!(node, OutputNode::Break))
        .count();
    nodes.drain(..leading);
    nodes
}

fn is_meaningful(node: &OutputNode) -> bool {
    match node {
        OutputNode::Text(value) => !value.trim().is_empty(),
        OutputNode::Break => false,
        _ => true,
    }
}
