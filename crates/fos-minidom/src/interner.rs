//! Name interning for element and attribute identities
//!
//! Local names, namespace URIs and attribute names repeat constantly ("div",
//! "class", the XHTML namespace). Each environment keeps one copy of every
//! name in a shared buffer and nodes refer to it by a 4-byte id. Names are
//! delimited by stored lengths, so any byte (NUL included) may appear in one.

use std::collections::HashMap;
use std::ops::Range;

/// Id of an interned name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct InternedString(pub u32);

impl InternedString {
    /// The empty name, always id 0
    pub const EMPTY: InternedString = InternedString(0);
}

/// HTML tag names registered as element kinds in every environment
pub(crate) const COMMON_TAGS: &[&str] = &[
    "html", "head", "body", "div", "span", "p", "a", "img",
    "ul", "ol", "li", "table", "tr", "td", "th", "thead", "tbody",
    "form", "input", "button", "select", "option", "textarea", "label",
    "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "footer", "nav", "main", "section", "article", "aside",
    "script", "style", "link", "meta", "title", "template", "slot",
    "br", "hr", "strong", "em", "b", "i", "u", "pre", "code",
    "video", "audio", "canvas", "iframe",
];

/// SVG tag names registered as element kinds in every environment
pub(crate) const SVG_TAGS: &[&str] = &[
    "svg", "g", "path", "rect", "circle", "ellipse", "line", "polyline",
    "polygon", "text", "tspan", "defs", "use", "symbol", "image",
    "linearGradient", "radialGradient", "stop", "clipPath", "mask",
];

const PRELOADED_ATTRS: &[&str] = &[
    "id", "class", "style", "href", "src", "alt", "title",
    "type", "name", "value", "placeholder", "disabled", "checked",
    "width", "height", "role", "aria-label",
];

/// Where one name sits in the buffer
#[derive(Debug, Clone, Copy)]
struct Span {
    offset: u32,
    len: u32,
}

impl Span {
    fn range(self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.len as usize
    }
}

/// Per-environment name table
///
/// Names are appended back to back to `buffer` with no delimiter; `spans`
/// maps an id to its byte range and `ids` maps a name back to its id.
#[derive(Debug)]
pub struct StringInterner {
    buffer: String,
    ids: HashMap<Box<str>, u32>,
    spans: Vec<Span>,
}

impl StringInterner {
    /// Create a table with the built-in tag and attribute names preloaded
    pub fn new() -> Self {
        let mut interner = Self {
            buffer: String::with_capacity(1024),
            ids: HashMap::with_capacity(128),
            spans: Vec::with_capacity(128),
        };

        interner.intern("");
        for name in COMMON_TAGS.iter().chain(SVG_TAGS).chain(PRELOADED_ATTRS) {
            interner.intern(name);
        }
        interner
    }

    /// Id for `s`, adding it on first use
    pub fn intern(&mut self, s: &str) -> InternedString {
        if let Some(id) = self.lookup(s) {
            return id;
        }

        let id = self.spans.len() as u32;
        self.spans.push(Span {
            offset: self.buffer.len() as u32,
            len: s.len() as u32,
        });
        self.buffer.push_str(s);
        self.ids.insert(s.into(), id);
        InternedString(id)
    }

    /// Id for `s` if it was ever interned
    ///
    /// A name that was never interned cannot name any stored attribute or
    /// element, so reads use this to avoid growing the table.
    pub fn lookup(&self, s: &str) -> Option<InternedString> {
        self.ids.get(s).map(|&id| InternedString(id))
    }

    /// Name for an id; unknown ids read as the empty name
    #[inline]
    pub fn get(&self, id: InternedString) -> &str {
        self.spans
            .get(id.0 as usize)
            .map_or("", |span| &self.buffer[span.range()])
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Approximate heap bytes held by the table
    pub fn memory_usage(&self) -> usize {
        self.buffer.capacity()
            + self.ids.capacity() * (std::mem::size_of::<Box<str>>() + std::mem::size_of::<u32>())
            + self.spans.capacity() * std::mem::size_of::<Span>()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_dedup() {
        let mut interner = StringInterner::new();
        let id1 = interner.intern("my-widget");
        let id2 = interner.intern("my-widget");
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_get_string() {
        let mut interner = StringInterner::new();
        let id = interner.intern("world");
        assert_eq!(interner.get(id), "world");
        assert_eq!(interner.get(InternedString::EMPTY), "");
        assert_eq!(interner.get(InternedString(u32::MAX)), "");
    }

    #[test]
    fn test_lookup_does_not_grow() {
        let interner = StringInterner::new();
        let before = interner.len();
        assert!(interner.lookup("div").is_some());
        assert!(interner.lookup("never-seen").is_none());
        assert_eq!(interner.len(), before);
    }

    #[test]
    fn test_names_with_nul_keep_their_full_length() {
        let mut interner = StringInterner::new();
        let x = interner.intern("a\0x");
        let y = interner.intern("a\0y");
        let plain = interner.intern("a");
        assert_ne!(x, y);
        assert_eq!(interner.get(x), "a\0x");
        assert_eq!(interner.get(y), "a\0y");
        assert_eq!(interner.get(plain), "a");
    }
}
