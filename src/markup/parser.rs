//! Pull-parser that turns markup text into a [`Node`] tree.

use crate::markup::{MarkupParseError, Node};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, instrument};

/// An element whose end tag has not been seen yet.
struct Frame {
    name: String,
    children: Vec<(String, Node)>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>, position: u64) -> Result<Self, MarkupParseError> {
        let name = decode(start.name().as_ref(), position)?;
        let mut children = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| syntax(position, e))?;
            let key = decode(attribute.key.as_ref(), position)?;
            let value = attribute
                .unescape_value()
                .map_err(|e| syntax(position, e))?;
            children.push((format!("@{key}"), Node::Text(value.into_owned())));
        }
        Ok(Self {
            name,
            children,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Node) {
        let node = if self.children.is_empty() {
            if self.text.is_empty() {
                Node::Null
            } else {
                Node::Text(self.text)
            }
        } else {
            let mut children = self.children;
            if !self.text.is_empty() {
                children.push(("#text".to_string(), Node::Text(self.text)));
            }
            Node::Element(children)
        };
        (self.name, node)
    }

    /// Adds a closed child, folding repeated names into a list.
    fn attach(&mut self, name: String, node: Node) {
        match self.children.iter_mut().find(|(key, _)| *key == name) {
            Some((_, Node::List(items))) => items.push(node),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, Node::Null);
                *existing = Node::List(vec![first, node]);
            }
            None => self.children.push((name, node)),
        }
    }
}

/// Decodes a markup document.
///
/// The result is an element with a single entry keyed by the root element's
/// name, e.g. `{"Employees": {"Employee": [...]}}`.
///
/// # Errors
///
/// Returns [`MarkupParseError`] when the input is not well-formed: syntax
/// errors, mismatched or missing end tags, no root, several roots, or stray
/// text outside the root.
#[instrument(skip(raw), fields(size = raw.len()))]
pub fn parse(raw: &str) -> Result<Node, MarkupParseError> {
    let mut reader = Reader::from_str(raw);
    reader.trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Node)> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader.read_event().map_err(|e| syntax(position, e))?;
        match event {
            Event::Start(start) => {
                let frame = Frame::open(&start, position)?;
                check_single_root(&root, &stack, &frame.name)?;
                stack.push(frame);
            }
            Event::Empty(start) => {
                let frame = Frame::open(&start, position)?;
                check_single_root(&root, &stack, &frame.name)?;
                let (name, node) = frame.close();
                close_into(&mut stack, &mut root, name, node);
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| MarkupParseError::Syntax {
                    position,
                    message: "unexpected end tag".to_string(),
                })?;
                let (name, node) = frame.close();
                close_into(&mut stack, &mut root, name, node);
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| syntax(position, e))?;
                append_text(&mut stack, &text, position)?;
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                let text = String::from_utf8_lossy(&bytes);
                append_text(&mut stack, &text, position)?;
            }
            Event::Eof => break,
            // Comments, declaration, processing instructions, DOCTYPE.
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(MarkupParseError::Unclosed(open.name));
    }
    let (name, node) = root.ok_or(MarkupParseError::NoRoot)?;
    debug!(root = %name, "Markup decoded");
    Ok(Node::Element(vec![(name, node)]))
}

fn check_single_root(
    root: &Option<(String, Node)>,
    stack: &[Frame],
    name: &str,
) -> Result<(), MarkupParseError> {
    match root {
        Some((first, _)) if stack.is_empty() => Err(MarkupParseError::MultipleRoots {
            first: first.clone(),
            second: name.to_string(),
        }),
        _ => Ok(()),
    }
}

fn close_into(stack: &mut [Frame], root: &mut Option<(String, Node)>, name: String, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.attach(name, node),
        None => *root = Some((name, node)),
    }
}

fn append_text(stack: &mut [Frame], text: &str, position: u64) -> Result<(), MarkupParseError> {
    match stack.last_mut() {
        Some(frame) => {
            frame.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(MarkupParseError::TextOutsideRoot { position }),
    }
}

fn decode(bytes: &[u8], position: u64) -> Result<String, MarkupParseError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| syntax(position, e))
}

fn syntax(position: u64, error: impl std::fmt::Display) -> MarkupParseError {
    MarkupParseError::Syntax {
        position,
        message: error.to_string(),
    }
}
