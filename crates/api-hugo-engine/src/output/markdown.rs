//! Serializes an output tree as GitHub-flavored Markdown with Hugo shortcodes passed through.

use super::{OutputNode, TableRow};

/// Renders block-level nodes, separated by blank lines.
pub fn to_markdown(nodes: &[OutputNode]) -> String {
    let blocks: Vec<String> = nodes
        .iter()
        .map(render_block)
        .filter(|block| !block.is_empty())
        .collect();
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn render_block(node: &OutputNode) -> String {
    match node {
        OutputNode::Root(children) => to_markdown(children).trim_end().to_string(),
        OutputNode::Heading { depth, children } => {
            format!(
                "{} {}",
                "#".repeat(usize::from(*depth)),
                render_inline(children, Context::Heading)
            )
        }
        OutputNode::Paragraph(children) => render_line(children, Context::Flow, true),
        OutputNode::CodeBlock { language, code } => {
            let fence = "`".repeat((longest_backtick_run(code) + 1).max(3));
            format!("{fence}{language}\n{}\n{fence}", code.trim_end_matches('\n'))
        }
        OutputNode::Table(rows) => render_table(rows),
        inline => render_line(std::slice::from_ref(inline), Context::Flow, true),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Flow,
    Heading,
    TableCell,
}

fn render_inline(nodes: &[OutputNode], context: Context) -> String {
    render_line(nodes, context, false)
}

/// Renders a run of inline nodes. `line_start` says whether the run opens a
/// line, where text must not read as block syntax.
fn render_line(nodes: &[OutputNode], context: Context, mut line_start: bool) -> String {
    let mut out = String::new();
    let mut heading_line = false;
    for (index, node) in nodes.iter().enumerate() {
        match node {
            OutputNode::Text(value) => {
                let escaped = escape_text(value, context);
                if line_start && context == Context::Flow {
                    out.push_str(&escape_line_start(escaped));
                    line_start = value.trim().is_empty();
                } else {
                    out.push_str(&escaped);
                }
                continue;
            }
            OutputNode::Strong(children) => {
                out.push_str("**");
                out.push_str(&render_inline(children, context));
                out.push_str("**");
            }
            OutputNode::Emphasis(children) => {
                out.push('_');
                out.push_str(&render_inline(children, context));
                out.push('_');
            }
            OutputNode::InlineCode(code) => out.push_str(&inline_code(code, context)),
            OutputNode::Link { url, children } => {
                out.push('[');
                out.push_str(&render_inline(children, context));
                out.push_str("](");
                out.push_str(&link_destination(url));
                out.push(')');
            }
            OutputNode::Break => {
                match context {
                    Context::Flow => {
                        // A hard break before a block marker, or at the end of
                        // a heading, would leave a literal backslash behind.
                        let block_follows = matches!(
                            nodes.get(index + 1),
                            Some(OutputNode::Html(raw)) if starts_block(raw)
                        );
                        if block_follows || heading_line {
                            out.push('\n');
                        } else {
                            out.push_str("\\\n");
                        }
                    }
                    Context::Heading => out.push(' '),
                    Context::TableCell => out.push_str("<br>"),
                }
                line_start = true;
                heading_line = false;
                continue;
            }
            OutputNode::Html(raw) => {
                if line_start && raw.starts_with('#') {
                    heading_line = true;
                }
                out.push_str(raw);
            }
            OutputNode::CodeBlock { code, .. } => out.push_str(&inline_code(code, context)),
            OutputNode::Root(children)
            | OutputNode::Paragraph(children)
            | OutputNode::Heading { children, .. } => {
                out.push_str(&render_inline(children, context));
            }
            OutputNode::Table(_) => {}
        }
        line_start = false;
    }
    out
}

fn render_table(rows: &[TableRow]) -> String {
    let Some(columns) = rows.iter().map(|row| row.cells.len()).max() else {
        return String::new();
    };
    if columns == 0 {
        return String::new();
    }

    let render_row = |row: &TableRow| {
        let cells: Vec<String> = (0..columns)
            .map(|index| {
                row.cells
                    .get(index)
                    .map(|cell| render_inline(&cell.children, Context::TableCell))
                    .unwrap_or_default()
            })
            .collect();
        format!("| {} |", cells.join(" | "))
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let mut rows = rows.iter();
    if let Some(header) = rows.next() {
        lines.push(render_row(header));
        lines.push(format!("|{}", " --- |".repeat(columns)));
    }
    lines.extend(rows.map(render_row));
    lines.join("\n")
}

fn escape_text(value: &str, context: Context) -> String {
    let encoded = html_escape::encode_text(value);
    let mut out = String::with_capacity(encoded.len());
    for c in encoded.chars() {
        match c {
            '\\' | '*' | '_' | '`' | '[' | ']' => {
                out.push('\\');
                out.push(c);
            }
            '|' if context == Context::TableCell => out.push_str("\\|"),
            '\n' if context == Context::TableCell => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Keeps text at the start of a line from being read as a heading, list item,
/// thematic break or setext underline.
fn escape_line_start(line: String) -> String {
    let body = line.trim_start_matches(' ');
    let indent = &line[..line.len() - body.len()];
    if body.starts_with(['#', '-', '+', '=']) {
        return format!("{indent}\\{body}");
    }
    match ordered_list_delimiter(body) {
        Some(digits) => format!("{indent}{}\\{}", &body[..digits], &body[digits..]),
        None => line,
    }
}

/// Byte offset of the `.` or `)` in an ordered list marker such as `2024. `.
fn ordered_list_delimiter(line: &str) -> Option<usize> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    let rest = &line[digits..];
    let is_marker = (1..=9).contains(&digits)
        && rest.starts_with(['.', ')'])
        && (rest.len() == 1 || rest[1..].starts_with([' ', '\t']));
    is_marker.then_some(digits)
}

/// Whether raw text opens a Markdown block: a heading, list item or block quote.
fn starts_block(raw: &str) -> bool {
    let body = raw.trim_start_matches(' ');
    body.starts_with('#')
        || body.starts_with("- ")
        || body.starts_with("> ")
        || ordered_list_delimiter(body).is_some()
}

fn inline_code(code: &str, context: Context) -> String {
    let code = if context == Context::TableCell {
        code.replace('|', "\\|").replace('\n', " ")
    } else {
        code.to_string()
    };
    let fence = "`".repeat(longest_backtick_run(&code) + 1);
    if code.starts_with('`') || code.ends_with('`') {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}

fn link_destination(url: &str) -> String {
    if url.contains([' ', '(', ')']) {
        format!("<{url}>")
    } else {
        url.to_string()
    }
}

fn longest_backtick_run(value: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in value.chars() {
        if c == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
