//! Plain comment text is parsed as inline Markdown so authors can embed markup.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::output::{OutputNode, compact_inline, text};

enum Frame {
    Root,
    Strong,
    Emphasis,
    Link(String),
    /// Block structure and unsupported inline containers: children are spliced into the parent.
    /// Block markers (list bullets, heading hashes, quote arrows) are kept as raw text.
    Transparent,
}

/// Parses `source` as inline Markdown.
///
/// Leading and trailing whitespace is preserved as text, since plain text runs
/// sit between code spans and links whose spacing matters.
pub fn parse_inline_markdown(source: &str) -> Vec<OutputNode> {
    let body = source.trim();
    if body.is_empty() {
        return if source.is_empty() {
            Vec::new()
        } else {
            vec![text(" ")]
        };
    }

    let leading = &source[..source.len() - source.trim_start().len()];
    let trailing = &source[source.trim_end().len()..];

    let mut stack: Vec<(Frame, Vec<OutputNode>)> = vec![(Frame::Root, Vec::new())];
    let mut paragraphs = 0;
    // Next number of each open list; `None` for bullet lists.
    let mut lists: Vec<Option<u64>> = Vec::new();

    for event in Parser::new_ext(body, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(tag) => {
                let frame = match tag {
                    Tag::Strong => Frame::Strong,
                    Tag::Emphasis => Frame::Emphasis,
                    Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                        Frame::Link(dest_url.to_string())
                    }
                    Tag::Paragraph => {
                        if paragraphs > 0
                            && let Some((_, children)) = stack.last_mut()
                        {
                            children.push(OutputNode::Break);
                        }
                        paragraphs += 1;
                        Frame::Transparent
                    }
                    Tag::List(start) => {
                        lists.push(start);
                        Frame::Transparent
                    }
                    Tag::Item => {
                        let marker = match lists.last_mut() {
                            Some(Some(number)) => {
                                *number += 1;
                                format!("{}. ", *number - 1)
                            }
                            _ => "- ".to_string(),
                        };
                        push(&mut stack, OutputNode::Html(marker));
                        Frame::Transparent
                    }
                    Tag::Heading { level, .. } => {
                        push(&mut stack, OutputNode::Html(format!("{} ", "#".repeat(level as usize))));
                        Frame::Transparent
                    }
                    Tag::BlockQuote(_) => {
                        push(&mut stack, OutputNode::Html("> ".to_string()));
                        Frame::Transparent
                    }
                    _ => Frame::Transparent,
                };
                stack.push((frame, Vec::new()));
            }
            Event::End(end) => {
                if let TagEnd::List(_) = end {
                    lists.pop();
                }
                if stack.len() < 2 {
                    continue;
                }
                let Some((frame, children)) = stack.pop() else {
                    continue;
                };
                let children = compact_inline(children);
                let Some((_, parent)) = stack.last_mut() else {
                    continue;
                };
                match frame {
                    Frame::Strong => parent.push(OutputNode::Strong(children)),
                    Frame::Emphasis => parent.push(OutputNode::Emphasis(children)),
                    Frame::Link(url) => parent.push(OutputNode::Link { url, children }),
                    Frame::Root | Frame::Transparent => parent.extend(children),
                }
            }
            Event::Text(value) => push(&mut stack, text(value.to_string())),
            Event::Code(code) => push(&mut stack, OutputNode::InlineCode(code.to_string())),
            Event::Html(raw) | Event::InlineHtml(raw) => {
                push(&mut stack, OutputNode::Html(raw.to_string()))
            }
            Event::SoftBreak => push(&mut stack, text(" ")),
            Event::HardBreak => push(&mut stack, OutputNode::Break),
            Event::Rule => push(&mut stack, text("---")),
            _ => {}
        }
    }

    // Unclosed frames cannot happen with a well-behaved parser, but never drop content.
    while stack.len() > 1 {
        if let Some((_, children)) = stack.pop()
            && let Some((_, parent)) = stack.last_mut()
        {
            parent.extend(children);
        }
    }

    let mut nodes = Vec::new();
    if !leading.is_empty() {
        nodes.push(text(leading));
    }
    if let Some((_, children)) = stack.pop() {
        nodes.extend(children);
    }
    if !trailing.is_empty() {
        nodes.push(text(trailing));
    }
    compact_inline(nodes)
}

fn push(stack: &mut [(Frame, Vec<OutputNode>)], node: OutputNode) {
    if let Some((_, children)) = stack.last_mut() {
        children.push(node);
    }
}
