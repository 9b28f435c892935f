//! Markdown rendering pipeline.
//!
//! Wraps pulldown-cmark with the extension set the site format relies
//! on (tables, strikethrough, footnotes, definition lists, heading
//! attributes, smart punctuation) and a fixed, ordered pair of
//! event-stream transformations:
//!
//! 1. **Heading shift** — every heading is demoted one level, so `#` in
//!    a document becomes `<h2>`. The page `<h1>` belongs to the
//!    template, which renders it from front matter; body headings slot
//!    in below it.
//! 2. **Heading anchors** — headings up to `<h4>` (after the shift)
//!    without an explicit `{#id}` attribute get a slug id derived from
//!    their text, deduplicated with a `-1`, `-2`, … suffix.
//!
//! The stage order is part of the format. There is no runtime stage
//! registration.
//!
//! Front matter is recognized here too: pulldown-cmark's YAML-style
//! metadata blocks let the same parse that renders the body also hand
//! back the raw metadata text, without a separate string-splitting
//! step. Whether a *missing* block is an error is the caller's call —
//! [`crate::document`] treats it as fatal.

use std::collections::{HashMap, VecDeque};

use pulldown_cmark::{
    Event, HeadingLevel, MetadataBlockKind, Options, Parser, Tag, TagEnd, html,
};

/// Deepest post-shift heading level that receives an anchor id.
const ANCHOR_MAX_LEVEL: HeadingLevel = HeadingLevel::H4;

/// Result of one parse: the raw front matter text (if the document
/// opened with a metadata block) and the rendered, trimmed HTML body.
#[derive(Debug)]
pub struct Rendered {
    pub metadata: Option<String>,
    pub html: String,
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_DEFINITION_LIST
        | Options::ENABLE_YAML_STYLE_METADATA_BLOCKS
}

/// Parse `text`, peel off a leading metadata block if present, and
/// render everything after it through the transformation stages.
pub fn render(text: &str) -> Rendered {
    let mut parser = Parser::new_ext(text, options());

    // The metadata block, when present, is always the first event.
    let mut metadata = None;
    let mut held = None;
    match parser.next() {
        Some(Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle))) => {
            let mut raw = String::new();
            for event in parser.by_ref() {
                match event {
                    Event::Text(text) => raw.push_str(&text),
                    Event::End(TagEnd::MetadataBlock(_)) => break,
                    _ => {}
                }
            }
            metadata = Some(raw);
        }
        Some(event) => held = Some(event),
        None => {}
    }

    let body = held.into_iter().chain(parser);
    let events = anchor_headings(shift_headings(body));

    let mut out = String::new();
    html::push_html(&mut out, events);

    Rendered {
        metadata,
        html: out.trim().to_string(),
    }
}

/// Slug for heading anchors: transliterate to ASCII, lowercase, and
/// collapse every non-alphanumeric run into a single dash.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

// ============================================================================
// Stage 1: heading shift
// ============================================================================

fn demote(level: HeadingLevel) -> HeadingLevel {
    match level {
        HeadingLevel::H1 => HeadingLevel::H2,
        HeadingLevel::H2 => HeadingLevel::H3,
        HeadingLevel::H3 => HeadingLevel::H4,
        HeadingLevel::H4 => HeadingLevel::H5,
        HeadingLevel::H5 | HeadingLevel::H6 => HeadingLevel::H6,
    }
}

fn shift_headings<'a, I>(events: I) -> impl Iterator<Item = Event<'a>>
where
    I: Iterator<Item = Event<'a>>,
{
    events.map(|event| match event {
        Event::Start(Tag::Heading {
            level,
            id,
            classes,
            attrs,
        }) => Event::Start(Tag::Heading {
            level: demote(level),
            id,
            classes,
            attrs,
        }),
        Event::End(TagEnd::Heading(level)) => Event::End(TagEnd::Heading(demote(level))),
        event => event,
    })
}

// ============================================================================
// Stage 2: heading anchors
// ============================================================================

struct AnchorHeadings<'a, I: Iterator<Item = Event<'a>>> {
    stack: VecDeque<Event<'a>>,
    seen: HashMap<String, usize>,
    inner: I,
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for AnchorHeadings<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.stack.pop_front() {
            return Some(event);
        }

        match self.inner.next()? {
            Event::Start(Tag::Heading {
                level,
                id: None,
                classes,
                attrs,
            }) if level <= ANCHOR_MAX_LEVEL => {
                // Buffer the heading's inline events to slug its text.
                let mut text = String::new();
                loop {
                    let event = self.inner.next()?;
                    if let Event::Text(ref s) | Event::Code(ref s) = event {
                        text.push_str(s);
                    } else if let Event::End(TagEnd::Heading(..)) = event {
                        self.stack.push_back(event);
                        break;
                    }
                    self.stack.push_back(event);
                }

                let mut id = slugify(&text);
                let count = self.seen.entry(id.clone()).or_insert(0);
                *count += 1;
                if *count > 1 {
                    id = format!("{id}-{}", *count - 1);
                }

                Some(Event::Start(Tag::Heading {
                    level,
                    id: Some(id.into()),
                    classes,
                    attrs,
                }))
            }
            event => Some(event),
        }
    }
}

fn anchor_headings<'a, I>(events: I) -> impl Iterator<Item = Event<'a>>
where
    I: Iterator<Item = Event<'a>>,
{
    AnchorHeadings {
        stack: VecDeque::with_capacity(4),
        seen: HashMap::new(),
        inner: events,
    }
}
