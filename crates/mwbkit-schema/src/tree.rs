//! The node API the deserializer reads from.
//!
//! Workbench stores its model as XML inside a zip container. Unpacking and
//! parsing that markup happens elsewhere; anything that can answer the
//! questions in [`Node`] can be loaded. [`Element`] is an owned tree for
//! callers that build documents by hand.

use indexmap::IndexMap;

use crate::{LoadError, SourceLine};

/// One element of a parsed value tree.
pub trait Node {
    /// Element name: `data`, `value`, `link`, ...
    fn name(&self) -> &str;

    fn attr(&self, name: &str) -> Option<&str>;

    /// 1-indexed line in the source markup.
    fn line(&self) -> Option<u32>;

    /// Child elements, in document order. Text and comments are not elements.
    fn children(&self) -> impl Iterator<Item = &Self>;

    /// Concatenated text of this element and its descendants.
    fn text(&self) -> String;

    /// Like [`Node::attr`], but a missing attribute is a load error.
    fn required_attr(&self, name: &str) -> Result<&str, LoadError> {
        self.attr(name).ok_or_else(|| LoadError::MissingAttribute {
            node: self.name().to_string(),
            attribute: name.to_string(),
            line: SourceLine(self.line()),
        })
    }
}

/// An owned element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<Element>,
    pub text: String,
    pub line: Option<u32>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A `<data>` element wrapping the given top-level entries.
    pub fn data(entries: impl IntoIterator<Item = Element>) -> Self {
        Self::new("data").with_children(entries)
    }

    /// `<value type="object" struct-name="...">`
    pub fn object(struct_name: &str) -> Self {
        Self::new("value")
            .with_attr("type", "object")
            .with_attr("struct-name", struct_name)
    }

    /// `<value type="list">`
    pub fn list() -> Self {
        Self::new("value").with_attr("type", "list")
    }

    /// `<value type="string">text</value>`
    pub fn string(text: impl Into<String>) -> Self {
        Self::scalar("string", text)
    }

    /// `<value type="int">n</value>`
    pub fn int(n: i64) -> Self {
        Self::scalar("int", n.to_string())
    }

    pub fn scalar(ty: &str, text: impl Into<String>) -> Self {
        Self::new("value").with_attr("type", ty).with_text(text)
    }

    /// `<link>id</link>`
    pub fn link(id: impl Into<String>) -> Self {
        Self::new("link").with_text(id)
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Shorthand for the `key` attribute of an object member.
    pub fn keyed(self, key: &str) -> Self {
        self.with_attr("key", key)
    }

    /// Shorthand for the `id` attribute.
    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

impl Node for Element {
    fn name(&self) -> &str {
        &self.name
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    fn line(&self) -> Option<u32> {
        self.line
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }

    fn text(&self) -> String {
        let mut text = self.text.clone();
        for child in &self.children {
            text.push_str(&child.text());
        }
        text
    }
}
