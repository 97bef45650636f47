use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::ser::{Serialize, Serializer};

use crate::core::CfdiError;

/// A generic deserialized XML value.
///
/// Real-world tax documents vary in namespace prefixes, casing, and
/// attribute-vs-element representation, so the tree is schema-less:
/// attributes and child elements of one element are merged into a single
/// property bag, and a repeated child element becomes a [`XmlValue::List`]
/// while a single occurrence stays bare. Extraction sites normalize the
/// latter with [`XmlValue::as_sequence`].
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    /// Scalar text — an attribute value or a simple element's content,
    /// whitespace-trimmed.
    Text(String),
    /// Repeated sibling elements, in document order.
    List(Vec<XmlValue>),
    /// One element's merged attribute/child bag. Mixed-content text is
    /// kept under [`XmlValue::TEXT_KEY`].
    Node(BTreeMap<String, XmlValue>),
}

impl Default for XmlValue {
    fn default() -> Self {
        Self::Node(BTreeMap::new())
    }
}

impl XmlValue {
    /// Reserved bag key holding an element's own text when the element
    /// also carries attributes or children.
    pub const TEXT_KEY: &'static str = "$text";

    /// Try each candidate key in order and return the first present value.
    /// Returns `None` for non-`Node` values.
    pub fn get(&self, candidates: &[&str]) -> Option<&XmlValue> {
        let Self::Node(map) = self else { return None };
        candidates.iter().find_map(|key| map.get(*key))
    }

    /// Coerce to a sequence: a `List` as-is, anything else as a
    /// one-element slice. Combine with [`sequence`] where the value may be
    /// absent altogether.
    pub fn as_sequence(&self) -> &[XmlValue] {
        match self {
            Self::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Scalar text of this value: the string of a `Text`, the reserved
    /// text entry of a `Node`, or the text of a `List`'s first element.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Node(map) => map.get(Self::TEXT_KEY).and_then(XmlValue::text),
            Self::List(items) => items.first().and_then(XmlValue::text),
        }
    }

    /// True for values with no usable content: empty text, an empty bag,
    /// or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Node(map) => map.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

/// Normalize an optional repeated-element site to a slice: absent becomes
/// empty, a bare value becomes a singleton, a list is used as-is.
pub fn sequence(value: Option<&XmlValue>) -> &[XmlValue] {
    value.map(XmlValue::as_sequence).unwrap_or_default()
}

// Serializes as natural JSON (string / array / object) so the raw document
// can be passed through to persistence callers unchanged.
impl Serialize for XmlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::List(items) => items.serialize(serializer),
            Self::Node(map) => map.serialize(serializer),
        }
    }
}

struct Frame {
    name: String,
    bag: BTreeMap<String, XmlValue>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            bag: BTreeMap::new(),
            text: String::new(),
        }
    }

    fn finish(self) -> XmlValue {
        let text = self.text.trim().to_string();
        if self.bag.is_empty() {
            XmlValue::Text(text)
        } else {
            let mut bag = self.bag;
            if !text.is_empty() {
                bag.insert(XmlValue::TEXT_KEY.to_string(), XmlValue::Text(text));
            }
            XmlValue::Node(bag)
        }
    }
}

fn insert_child(bag: &mut BTreeMap<String, XmlValue>, key: String, value: XmlValue) {
    match bag.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => {
            let existing = slot.get_mut();
            if let XmlValue::List(items) = existing {
                items.push(value);
            } else {
                let first = std::mem::take(existing);
                *existing = XmlValue::List(vec![first, value]);
            }
        }
    }
}

fn read_attributes(element: &quick_xml::events::BytesStart<'_>, frame: &mut Frame) {
    for attr in element.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        insert_child(&mut frame.bag, key, XmlValue::Text(value));
    }
}

/// Deserialize one XML document into a generic value tree.
///
/// The returned root is a [`XmlValue::Node`] keyed by the root element's
/// name (prefix included, as written). Fails with
/// [`CfdiError::MalformedXml`] when the input is not well-formed.
pub fn read_document(xml: &str) -> Result<XmlValue, CfdiError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack = vec![Frame::new(String::new())];

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let mut frame = Frame::new(name);
                read_attributes(e, &mut frame);
                stack.push(frame);
            }
            Ok(Event::Empty(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let mut frame = Frame::new(name.clone());
                read_attributes(e, &mut frame);
                let value = frame.finish();
                if let Some(parent) = stack.last_mut() {
                    insert_child(&mut parent.bag, name, value);
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default();
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text);
                }
            }
            Ok(Event::End(_)) => {
                // The reader rejects mismatched end tags before we get here;
                // the root frame itself has no closing tag.
                if stack.len() > 1 {
                    let frame = stack.pop().unwrap_or_else(|| Frame::new(String::new()));
                    let name = frame.name.clone();
                    let value = frame.finish();
                    if let Some(parent) = stack.last_mut() {
                        insert_child(&mut parent.bag, name, value);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(CfdiError::MalformedXml(e.to_string())),
            _ => {}
        }
    }

    if stack.len() != 1 {
        return Err(CfdiError::MalformedXml(
            "unexpected end of document".to_string(),
        ));
    }

    let root = stack.pop().unwrap_or_else(|| Frame::new(String::new()));
    Ok(XmlValue::Node(root.bag))
}
