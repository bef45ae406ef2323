//! Lenient HTML scanning into a [`PageNode`] tree.
//!
//! Only the structure the viewer and the prober care about is kept: element
//! tags, class lists, `<img>` attributes and figure captions. Text outside
//! `<figcaption>` is dropped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::debug;

use crate::error::Result;
use crate::page::{PageImage, PageNode};

/// Elements that never have children, whether or not they are self-closed.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose body is raw text and must not be tokenized as markup.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements dropped from the tree; their children attach to the parent.
const TRANSPARENT_ELEMENTS: &[&str] = &["html", "body"];

struct Frame {
    tag: String,
    classes: Vec<String>,
    children: Vec<PageNode>,
    caption: String,
}

impl Frame {
    fn new(tag: String, classes: Vec<String>) -> Self {
        Self {
            tag,
            classes,
            children: Vec::new(),
            caption: String::new(),
        }
    }

    fn into_node(self) -> PageNode {
        let mut node = PageNode::Element {
            tag: self.tag,
            classes: self.classes,
            children: self.children,
        };
        let caption = normalize_whitespace(&self.caption);
        if !caption.is_empty() {
            node.for_each_image_mut(&mut |img| {
                if img.caption.is_none() {
                    img.caption = Some(caption.clone());
                }
            });
        }
        node
    }
}

/// Parse markup and return the body as an element tree.
///
/// Unbalanced tags are tolerated: an end tag closes the nearest open element
/// with the same name and is ignored if there is none. Markup the reader
/// cannot tokenize ends the scan and the tree built so far is returned.
pub fn parse_body(html: &str) -> Result<PageNode> {
    let mut stack = vec![Frame::new("body".to_string(), Vec::new())];
    let mut offset = 0usize;

    'document: loop {
        let mut reader = Reader::from_str(&html[offset..]);
        let config = reader.config_mut();
        config.trim_text(true);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.allow_dangling_amp = true;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e @ (quick_xml::Error::Syntax(_) | quick_xml::Error::IllFormed(_))) => {
                    debug!("stopping HTML scan at malformed markup: {e}");
                    break 'document;
                }
                Err(e) => return Err(e.into()),
            };
            match event {
                Event::Start(e) => {
                    let tag = tag_name(&e);
                    if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                        let body_start = offset + reader.buffer_position() as usize;
                        offset = skip_raw_text(html, body_start, &tag);
                        continue 'document;
                    }
                    open_element(&mut stack, &e, tag);
                }
                Event::Empty(e) => {
                    let tag = tag_name(&e);
                    if tag == "body" {
                        stack[0].classes = read_attrs(&e).classes;
                    } else if tag == "img" {
                        push_child(&mut stack, PageNode::Image(read_image(&e)));
                    }
                }
                Event::End(e) => {
                    let tag = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                    close_element(&mut stack, &tag);
                }
                Event::Text(e) => {
                    append_caption_text(&mut stack, &String::from_utf8_lossy(&e));
                }
                Event::GeneralRef(e) => {
                    let resolved = match e.resolve_char_ref() {
                        Ok(Some(ch)) => ch.to_string(),
                        _ => {
                            let name = String::from_utf8_lossy(&e);
                            quick_xml::escape::resolve_predefined_entity(&name)
                                .unwrap_or(" ")
                                .to_string()
                        }
                    };
                    append_caption_text(&mut stack, &resolved);
                }
                Event::Eof => break 'document,
                _ => {}
            }
        }
    }

    while stack.len() > 1 {
        pop_frame(&mut stack);
    }
    let root = stack.pop().map(Frame::into_node);
    Ok(root.unwrap_or_else(|| PageNode::element("body", &[], Vec::new())))
}

fn open_element(stack: &mut Vec<Frame>, e: &BytesStart<'_>, tag: String) {
    if tag == "body" {
        stack[0].classes = read_attrs(e).classes;
        return;
    }
    if TRANSPARENT_ELEMENTS.contains(&tag.as_str()) {
        return;
    }
    if tag == "img" {
        push_child(stack, PageNode::Image(read_image(e)));
        return;
    }
    if VOID_ELEMENTS.contains(&tag.as_str()) {
        return;
    }
    stack.push(Frame::new(tag, read_attrs(e).classes));
}

fn close_element(stack: &mut Vec<Frame>, tag: &str) {
    let Some(depth) = stack.iter().skip(1).rposition(|f| f.tag == tag) else {
        return;
    };
    // `rposition` on the skipped iterator is relative to index 1.
    let target = depth + 1;
    while stack.len() > target {
        pop_frame(stack);
    }
}

fn pop_frame(stack: &mut Vec<Frame>) {
    if let Some(frame) = stack.pop() {
        push_child(stack, frame.into_node());
    }
}

fn push_child(stack: &mut [Frame], node: PageNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

/// Caption text is collected on the innermost `<figure>` while inside a
/// `<figcaption>`.
fn append_caption_text(stack: &mut [Frame], text: &str) {
    if !stack.iter().any(|f| f.tag == "figcaption") {
        return;
    }
    if let Some(figure) = stack.iter_mut().rev().find(|f| f.tag == "figure") {
        if !figure.caption.is_empty() {
            figure.caption.push(' ');
        }
        figure.caption.push_str(text);
    }
}

/// Byte offset just past the closing tag of a raw-text element starting at `from`.
fn skip_raw_text(html: &str, from: usize, tag: &str) -> usize {
    let closing = format!("</{tag}");
    let haystack = html[from..].to_ascii_lowercase();
    let Some(rel) = haystack.find(&closing) else {
        return html.len();
    };
    match haystack[rel..].find('>') {
        Some(gt) => from + rel + gt + 1,
        None => html.len(),
    }
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase()
}

#[derive(Default)]
struct Attrs {
    classes: Vec<String>,
    src: Option<String>,
    alt: Option<String>,
}

fn read_attrs(e: &BytesStart<'_>) -> Attrs {
    let mut attrs = Attrs::default();
    for attr in e.html_attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_ascii_lowercase();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = match quick_xml::escape::unescape(&raw) {
            Ok(v) => v.into_owned(),
            Err(_) => raw.to_string(),
        };
        match key.as_str() {
            "class" => {
                attrs.classes = value.split_whitespace().map(str::to_string).collect();
            }
            "src" => attrs.src = Some(value),
            "alt" => attrs.alt = Some(value),
            _ => {}
        }
    }
    attrs
}

fn read_image(e: &BytesStart<'_>) -> PageImage {
    let attrs = read_attrs(e);
    let mut img = PageImage::new(
        attrs.src.unwrap_or_default(),
        attrs.alt.unwrap_or_default(),
    );
    img.classes = attrs.classes;
    img
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
