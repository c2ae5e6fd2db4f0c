use pulldown_cmark::{Event, Options, Parser, Tag};

/// Block-level token in the flat sequence the compiler walks.
///
/// Inline content is grouped under a single `Inline` token per block so the
/// compiler can delimit paragraph ranges from cursor positions recorded at
/// the inline boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    HeadingOpen(u32),
    HeadingClose,
    ParagraphOpen,
    ParagraphClose,
    Inline(Vec<Inline>),
}

/// Child of an `Inline` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    StrongOpen,
    StrongClose,
    EmOpen,
    EmClose,
    SoftBreak,
}

/// How the currently open inline run was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    Heading,
    Paragraph,
    /// Opened for an unsupported container so its text degrades to a plain
    /// paragraph instead of being dropped.
    Synthetic,
}

/// Parse markdown into the flat token sequence.
///
/// Headings and paragraphs map directly. Anything else (lists, code blocks,
/// blockquotes, tables) is tolerated rather than supported: the outermost
/// unsupported container opens a synthetic paragraph and its text content is
/// carried through as literal text.
pub fn tokenize(markdown: &str) -> Vec<Token> {
    let parser = Parser::new_ext(markdown, Options::empty());

    let mut tokens = Vec::new();
    let mut run: Option<(RunKind, Vec<Inline>)> = None;
    // Nesting depth of unsupported containers inside the current run.
    let mut foreign_depth = 0usize;

    for event in parser {
        match event {
            Event::Start(Tag::Heading(level, _, _)) if run.is_none() => {
                tokens.push(Token::HeadingOpen(level as u32));
                run = Some((RunKind::Heading, Vec::new()));
            }
            Event::End(Tag::Heading(..)) if matches!(run, Some((RunKind::Heading, _))) => {
                let (_, children) = run.take().unwrap();
                tokens.push(Token::Inline(children));
                tokens.push(Token::HeadingClose);
            }
            Event::Start(Tag::Paragraph) if run.is_none() => {
                tokens.push(Token::ParagraphOpen);
                run = Some((RunKind::Paragraph, Vec::new()));
            }
            Event::End(Tag::Paragraph) if matches!(run, Some((RunKind::Paragraph, _))) => {
                let (_, children) = run.take().unwrap();
                tokens.push(Token::Inline(children));
                tokens.push(Token::ParagraphClose);
            }
            Event::Start(Tag::Strong) if run.is_some() => {
                push_child(&mut run, Inline::StrongOpen);
            }
            Event::End(Tag::Strong) if run.is_some() => {
                push_child(&mut run, Inline::StrongClose);
            }
            Event::Start(Tag::Emphasis) if run.is_some() => {
                push_child(&mut run, Inline::EmOpen);
            }
            Event::End(Tag::Emphasis) if run.is_some() => {
                push_child(&mut run, Inline::EmClose);
            }
            Event::Text(text) | Event::Code(text) | Event::Html(text) => {
                if run.is_none() {
                    tokens.push(Token::ParagraphOpen);
                    run = Some((RunKind::Synthetic, Vec::new()));
                }
                push_child(&mut run, Inline::Text(text.into_string()));
            }
            Event::SoftBreak | Event::HardBreak => {
                if run.is_some() {
                    push_child(&mut run, Inline::SoftBreak);
                }
            }
            Event::Start(tag) => {
                if run.is_none() {
                    tokens.push(Token::ParagraphOpen);
                    run = Some((RunKind::Synthetic, Vec::new()));
                } else if begins_inner_block(&tag)
                    && matches!(run, Some((RunKind::Synthetic, ref children)) if !children.is_empty())
                {
                    // A new item or paragraph starts inside the container;
                    // what was collected so far is a complete paragraph.
                    close_synthetic(&mut tokens, &mut run);
                }
                foreign_depth += 1;
            }
            Event::End(tag) => {
                foreign_depth = foreign_depth.saturating_sub(1);
                if foreign_depth == 0 || begins_inner_block(&tag) {
                    close_synthetic(&mut tokens, &mut run);
                }
            }
            Event::Rule | Event::FootnoteReference(_) | Event::TaskListMarker(_) => {}
        }
    }

    // A run left open by unbalanced events still yields its text.
    if let Some((kind, children)) = run.take() {
        tokens.push(Token::Inline(children));
        tokens.push(match kind {
            RunKind::Heading => Token::HeadingClose,
            RunKind::Paragraph | RunKind::Synthetic => Token::ParagraphClose,
        });
    }

    tokens
}

fn push_child(run: &mut Option<(RunKind, Vec<Inline>)>, child: Inline) {
    if let Some((_, children)) = run {
        children.push(child);
    }
}

/// Tags that delimit one paragraph's worth of content inside an unsupported
/// container. Each completed item or inner paragraph gets its own run so
/// container content keeps its line boundaries.
fn begins_inner_block(tag: &Tag) -> bool {
    matches!(tag, Tag::Item | Tag::Paragraph)
}

fn close_synthetic(tokens: &mut Vec<Token>, run: &mut Option<(RunKind, Vec<Inline>)>) {
    if matches!(run, Some((RunKind::Synthetic, _))) {
        if let Some((_, children)) = run.take() {
            tokens.push(Token::Inline(children));
            tokens.push(Token::ParagraphClose);
        }
    }
}
