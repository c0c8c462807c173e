//! # Output tree
//!
//! The abstract document every page is built as. Nodes are plain owned values:
//! each page builds its own tree bottom-up and hands it to the serializer.
//!
//! Builders are free to nest block content inside paragraphs; [`squeeze`]
//! normalizes a finished tree so the serializer only ever sees well-formed
//! nesting.

pub mod markdown;
pub mod squeeze;

pub use squeeze::{compact_inline, squeeze};

#[derive(Debug, Clone, PartialEq)]
pub enum OutputNode {
    Root(Vec<OutputNode>),
    Heading { depth: u8, children: Vec<OutputNode> },
    Paragraph(Vec<OutputNode>),
    Text(String),
    Strong(Vec<OutputNode>),
    Emphasis(Vec<OutputNode>),
    InlineCode(String),
    CodeBlock { language: String, code: String },
    Link { url: String, children: Vec<OutputNode> },
    /// The first row is the header row.
    Table(Vec<TableRow>),
    Break,
    /// Raw passthrough, written verbatim.
    Html(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableCell {
    pub children: Vec<OutputNode>,
}

impl TableCell {
    pub fn new(children: Vec<OutputNode>) -> Self {
        Self { children }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(vec![text(value)])
    }
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }
}

impl OutputNode {
    /// Block nodes cannot live inside a paragraph once the tree is squeezed.
    pub fn is_block(&self) -> bool {
        match self {
            OutputNode::Root(_)
            | OutputNode::Heading { .. }
            | OutputNode::Paragraph(_)
            | OutputNode::CodeBlock { .. }
            | OutputNode::Table(_) => true,
            OutputNode::Text(_)
            | OutputNode::Strong(_)
            | OutputNode::Emphasis(_)
            | OutputNode::InlineCode(_)
            | OutputNode::Link { .. }
            | OutputNode::Break
            | OutputNode::Html(_) => false,
        }
    }

    pub fn children(&self) -> &[OutputNode] {
        match self {
            OutputNode::Root(children)
            | OutputNode::Heading { children, .. }
            | OutputNode::Paragraph(children)
            | OutputNode::Strong(children)
            | OutputNode::Emphasis(children)
            | OutputNode::Link { children, .. } => children,
            OutputNode::Text(_)
            | OutputNode::InlineCode(_)
            | OutputNode::CodeBlock { .. }
            | OutputNode::Table(_)
            | OutputNode::Break
            | OutputNode::Html(_) => &[],
        }
    }

    /// Visits this node and every descendant in document order, table cells included.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a OutputNode)) {
        visit(self);
        if let OutputNode::Table(rows) = self {
            for cell in rows.iter().flat_map(|row| &row.cells) {
                for child in &cell.children {
                    child.walk(visit);
                }
            }
        }
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// The concatenated text content, without markup.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |node| match node {
            OutputNode::Text(value) | OutputNode::InlineCode(value) => out.push_str(value),
            OutputNode::CodeBlock { code, .. } => out.push_str(code),
            OutputNode::Break => out.push(' '),
            _ => {}
        });
        out
    }
}

pub fn plain_text_of(nodes: &[OutputNode]) -> String {
    nodes.iter().map(OutputNode::plain_text).collect()
}

pub fn text(value: impl Into<String>) -> OutputNode {
    OutputNode::Text(value.into())
}

pub fn strong_text(value: impl Into<String>) -> OutputNode {
    OutputNode::Strong(vec![text(value)])
}

pub fn emphasis_text(value: impl Into<String>) -> OutputNode {
    OutputNode::Emphasis(vec![text(value)])
}

pub fn heading(depth: u8, children: Vec<OutputNode>) -> OutputNode {
    OutputNode::Heading {
        depth: depth.clamp(1, 6),
        children,
    }
}

pub fn heading_text(depth: u8, value: impl Into<String>) -> OutputNode {
    heading(depth, vec![text(value)])
}

pub fn link(url: impl Into<String>, label: impl Into<String>) -> OutputNode {
    OutputNode::Link {
        url: url.into(),
        children: vec![text(label)],
    }
}

pub fn code_block(language: impl Into<String>, code: impl Into<String>) -> OutputNode {
    OutputNode::CodeBlock {
        language: language.into(),
        code: code.into(),
    }
}

/// A Hugo callout shortcode wrapped around `children`.
pub fn callout(kind: &str, title: Option<&str>, children: Vec<OutputNode>) -> OutputNode {
    let opener = match title {
        Some(title) => format!("{{{{% callout \"{kind}\" {title} %}}}}"),
        None => format!("{{{{% callout \"{kind}\" %}}}}"),
    };

    let mut content = vec![OutputNode::Paragraph(vec![OutputNode::Html(opener)])];
    content.push(OutputNode::Paragraph(children));
    content.push(OutputNode::Paragraph(vec![OutputNode::Html(
        "{{% /callout %}}".to_string(),
    )]));
    OutputNode::Paragraph(content)
}

/// A Hugo label shortcode, used as a badge next to headings and in table notes.
pub fn label(value: &str, style: &str) -> OutputNode {
    OutputNode::Html(format!(
        "{{{{< label \"{}\" \"{}\" >}}}}",
        html_escape::encode_double_quoted_attribute(value),
        html_escape::encode_double_quoted_attribute(style)
    ))
}

/// The class marker placed after a table, consumed by the site theme.
pub fn table_class(kind: &str) -> OutputNode {
    OutputNode::Paragraph(vec![OutputNode::Html(format!(
        "{{.table .{}-table}}",
        kind.to_lowercase()
    ))])
}

/// Flattens block content into a single run of inline nodes.
///
/// Table cells and other inline-only slots use this; separate paragraphs are
/// joined with a break.
pub fn into_inline(nodes: Vec<OutputNode>) -> Vec<OutputNode> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            OutputNode::Paragraph(children) | OutputNode::Root(children) => {
                let inner = into_inline(children);
                if inner.is_empty() {
                    continue;
                }
                if !out.is_empty() {
                    out.push(OutputNode::Break);
                }
                out.extend(inner);
            }
            OutputNode::Heading { children, .. } => out.extend(into_inline(children)),
            OutputNode::CodeBlock { code, .. } => out.push(OutputNode::InlineCode(code)),
            OutputNode::Table(_) => {}
            inline => out.push(inline),
        }
    }
    compact_inline(out)
}
