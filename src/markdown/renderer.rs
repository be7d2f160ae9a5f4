//! Markdown to HTML fragment rendering
//!
//! Parsing and serialization are delegated to pulldown-cmark. The event stream
//! in between goes through up to three passes, each controlled by
//! [`RenderOptions`]:
//! - bare URLs in text become links
//! - non-relative links get `target="_blank"`
//! - headings without an explicit `{#id}` get one derived from their text

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use pulldown_cmark::{html, CowStr, Event, LinkType, Parser, Tag, TagEnd, TextMergeStream};
use pulldown_cmark_escape::{escape_href, escape_html};
use regex::Regex;

use super::heading_id::{slugify, HeadingIds};
use super::options::RenderOptions;

static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\b(?:https?|ftp)://[^\s<>"]+"#).unwrap());

pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render markdown source to an HTML fragment.
    ///
    /// Never fails: malformed markdown is rendered on a best-effort basis, the
    /// same way any CommonMark implementation treats it.
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options.parser_options()).into_offset_iter();
        let events: Vec<Event<'_>> = if self.options.autolink() {
            autolink(markdown, parser)
        } else {
            parser.map(|(event, _)| event).collect()
        };
        let mut events: Vec<Event<'_>> = TextMergeStream::new(events.into_iter()).collect();

        if self.options.href_target_blank() {
            open_links_in_new_tab(&mut events);
        }
        if self.options.auto_heading_ids() {
            assign_heading_ids(&mut events);
        }

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        output
    }
}

/// A text event, with the source it was typed as when smart punctuation
/// replaced it (`--` shown as `–`).
struct TextPiece<'a> {
    shown: CowStr<'a>,
    typed: Option<&'a str>,
}

impl TextPiece<'_> {
    fn raw(&self) -> &str {
        self.typed.unwrap_or(&*self.shown)
    }
}

fn is_smartened(shown: &str, typed: &str) -> bool {
    !shown.is_empty()
        && shown
            .chars()
            .all(|c| matches!(c, '–' | '—' | '…' | '‘' | '’' | '“' | '”'))
        && !typed.is_empty()
        && typed.bytes().all(|b| matches!(b, b'-' | b'.' | b'\'' | b'"'))
}

/// Bare URLs are found in the text as typed, so smart punctuation never
/// rewrites an href.
fn autolink<'a>(
    source: &'a str,
    events: impl Iterator<Item = (Event<'a>, Range<usize>)>,
) -> Vec<Event<'a>> {
    let mut output = Vec::new();
    let mut run: Vec<TextPiece<'a>> = Vec::new();
    // depth of code blocks, links, images and raw <a> tags; their text is left alone
    let mut opaque = 0usize;

    for (event, range) in events {
        if opaque == 0 {
            if let Event::Text(shown) = event {
                let typed = source.get(range).filter(|typed| is_smartened(&shown, typed));
                run.push(TextPiece { shown, typed });
                continue;
            }
        }
        link_text_run(&mut run, &mut output);

        match &event {
            Event::Start(Tag::CodeBlock(_) | Tag::Link { .. } | Tag::Image { .. }) => opaque += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Link | TagEnd::Image) => {
                opaque = opaque.saturating_sub(1)
            }
            Event::InlineHtml(tag) if opens_anchor(tag) => opaque += 1,
            Event::InlineHtml(tag) if closes_anchor(tag) => opaque = opaque.saturating_sub(1),
            _ => {}
        }
        output.push(event);
    }
    link_text_run(&mut run, &mut output);
    output
}

fn opens_anchor(tag: &str) -> bool {
    let bytes = tag.as_bytes();
    bytes.len() > 2
        && bytes[0] == b'<'
        && bytes[1].eq_ignore_ascii_case(&b'a')
        && (bytes[2] == b'>' || bytes[2].is_ascii_whitespace())
}

fn closes_anchor(tag: &str) -> bool {
    tag.get(..3)
        .is_some_and(|head| head.eq_ignore_ascii_case("</a"))
        && tag[3..].trim_start().starts_with('>')
}

/// Flush a run of adjacent text events into `output`, turning the bare URLs
/// it contains into links.
fn link_text_run<'a>(run: &mut Vec<TextPiece<'a>>, output: &mut Vec<Event<'a>>) {
    if run.is_empty() {
        return;
    }
    let pieces = std::mem::take(run);
    let raw: String = pieces.iter().map(|piece| piece.raw()).collect();
    let urls = bare_urls(&raw);
    if urls.is_empty() {
        output.extend(pieces.into_iter().map(|piece| Event::Text(piece.shown)));
        return;
    }

    let mut last = 0;
    for url in urls {
        push_shown(&pieces, last..url.start, output);
        let href = raw[url.start..url.end].to_string();
        output.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: href.clone().into(),
            title: "".into(),
            id: "".into(),
        }));
        output.push(Event::Text(href.into()));
        output.push(Event::End(TagEnd::Link));
        last = url.end;
    }
    push_shown(&pieces, last..raw.len(), output);
}

fn bare_urls(text: &str) -> Vec<Range<usize>> {
    BARE_URL
        .find_iter(text)
        .filter_map(|m| {
            let url = trim_url(m.as_str());
            (!url.ends_with("://")).then(|| m.start()..m.start() + url.len())
        })
        .collect()
}

/// Push the displayed text of the part of `pieces` whose raw form spans `span`.
fn push_shown<'a>(pieces: &[TextPiece<'a>], span: Range<usize>, output: &mut Vec<Event<'a>>) {
    if span.is_empty() {
        return;
    }
    let mut shown = String::new();
    let mut offset = 0;
    for piece in pieces {
        let raw = piece.raw();
        let (start, end) = (offset, offset + raw.len());
        offset = end;
        if end <= span.start || start >= span.end {
            continue;
        }
        if piece.typed.is_some() && span.start <= start && end <= span.end {
            shown.push_str(&piece.shown);
        } else {
            shown.push_str(&raw[span.start.max(start) - start..span.end.min(end) - start]);
        }
    }
    output.push(Event::Text(shown.into()));
}

/// Drop sentence punctuation that trails a URL, and a closing parenthesis
/// that has no opening partner inside the URL.
fn trim_url(url: &str) -> &str {
    let mut end = url.len();
    while let Some(last) = url[..end].chars().last() {
        let strip = match last {
            '.' | ',' | ':' | ';' | '!' | '?' | '\'' | '\u{2019}' | '\u{201d}' => true,
            ')' => {
                let candidate = &url[..end];
                candidate.matches(')').count() > candidate.matches('(').count()
            }
            _ => false,
        };
        if !strip {
            break;
        }
        end -= last.len_utf8();
    }
    &url[..end]
}

fn is_relative_link(url: &str) -> bool {
    url.is_empty()
        || url.starts_with('#')
        || (url.starts_with('/') && !url.starts_with("//"))
        || url.starts_with("./")
        || url.starts_with("../")
}

fn open_links_in_new_tab(events: &mut [Event<'_>]) {
    // links inside image alt text render as plain text
    let mut image = 0usize;
    for event in events.iter_mut() {
        let anchor = match &*event {
            Event::Start(Tag::Image { .. }) => {
                image += 1;
                continue;
            }
            Event::End(TagEnd::Image) => {
                image = image.saturating_sub(1);
                continue;
            }
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            }) if image == 0 && *link_type != LinkType::Email && !is_relative_link(dest_url) => {
                match new_tab_anchor(dest_url, title) {
                    Ok(anchor) => anchor,
                    Err(_) => continue,
                }
            }
            _ => continue,
        };
        // the matching End(Link) still renders as </a>
        *event = Event::InlineHtml(anchor.into());
    }
}

/// Opening `<a>` tag escaped the way pulldown-cmark writes its own links.
fn new_tab_anchor(dest_url: &str, title: &str) -> Result<String, fmt::Error> {
    let mut anchor = String::from("<a href=\"");
    escape_href(&mut anchor, dest_url)?;
    if !title.is_empty() {
        anchor.push_str("\" title=\"");
        escape_html(&mut anchor, title)?;
    }
    anchor.push_str("\" target=\"_blank\">");
    Ok(anchor)
}

fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut ids = HeadingIds::new();
    for event in events.iter() {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            ids.reserve(id);
        }
    }

    for i in 0..events.len() {
        if !matches!(&events[i], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }
        let slug = slugify(&heading_text(&events[i + 1..]));
        if slug.is_empty() {
            continue;
        }
        let unique = ids.unique(&slug);
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(unique.into());
        }
    }
}

fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}
