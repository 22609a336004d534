//! DOM Node - Arena slot contents
//!
//! Memory layout notes:
//! - Links are `Option<NodeId>` (8 bytes each) instead of owning pointers
//! - Listener maps are boxed and only allocated for nodes that listen
//! - Element names and attribute names are interned ids

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::event_target::EventListeners;
use crate::interner::InternedString;
use crate::kind::NodeKind;
use crate::NodeId;

/// Node type, with the standard DOM numeric codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
    DocumentFragment = 11,
}

impl NodeType {
    /// Numeric `nodeType` value
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    /// Last child (for O(1) append)
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
    /// Document this node belongs to (never set on documents themselves)
    pub(crate) owner_document: Option<NodeId>,
    pub(crate) kind: Rc<NodeKind>,
    pub(crate) data: NodeData,
    pub(crate) listeners: Option<Box<EventListeners>>,
}

impl Node {
    pub(crate) fn new(kind: Rc<NodeKind>, data: NodeData, owner_document: Option<NodeId>) -> Self {
        Self {
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            owner_document,
            kind,
            data,
            listeners: None,
        }
    }

    /// Node type
    #[inline]
    pub fn node_type(&self) -> NodeType {
        match self.data {
            NodeData::Document => NodeType::Document,
            NodeData::DocumentFragment => NodeType::DocumentFragment,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
        }
    }

    /// Kind chain this node was created from
    pub fn kind(&self) -> &Rc<NodeKind> {
        &self.kind
    }

    /// Node payload
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Can this node hold children
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(
            self.data,
            NodeData::Document | NodeData::DocumentFragment | NodeData::Element(_)
        )
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is a document
    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document)
    }

    /// Check if this is a document fragment
    #[inline]
    pub fn is_fragment(&self) -> bool {
        matches!(self.data, NodeData::DocumentFragment)
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Character data payload of a text or comment node
    #[inline]
    pub fn as_character_data(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(s) | NodeData::Comment(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_character_data_mut(&mut self) -> Option<&mut String> {
        match &mut self.data {
            NodeData::Text(s) | NodeData::Comment(s) => Some(s),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// Transient container
    DocumentFragment,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    pub(crate) local_name: InternedString,
    pub(crate) namespace: Option<InternedString>,
    /// Attributes in insertion order
    pub(crate) attrs: Vec<AttributeEntry>,
    pub(crate) style: StyleSlot,
}

impl ElementData {
    pub(crate) fn new(local_name: InternedString, namespace: Option<InternedString>) -> Self {
        Self {
            local_name,
            namespace,
            attrs: Vec::new(),
            style: StyleSlot::default(),
        }
    }

    /// Position of the attribute with this identity
    pub(crate) fn find_attr(
        &self,
        namespace: Option<InternedString>,
        name: InternedString,
    ) -> Option<usize> {
        self.attrs
            .iter()
            .position(|a| a.namespace == namespace && a.name == name)
    }

    /// Set an attribute, updating in place if it already exists
    pub(crate) fn set_attr(
        &mut self,
        namespace: Option<InternedString>,
        name: InternedString,
        value: String,
    ) {
        match self.find_attr(namespace, name) {
            Some(index) => self.attrs[index].value = value,
            None => self.attrs.push(AttributeEntry { namespace, name, value }),
        }
    }

    /// Number of attributes
    pub fn attribute_count(&self) -> usize {
        self.attrs.len()
    }
}

/// Stored attribute (identity is namespace + lower-cased name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttributeEntry {
    pub(crate) namespace: Option<InternedString>,
    pub(crate) name: InternedString,
    pub(crate) value: String,
}

/// Opaque slot reserved for the style engine
#[derive(Clone, Default)]
pub struct StyleSlot(pub(crate) Option<Rc<dyn Any>>);

impl fmt::Debug for StyleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("StyleSlot(<opaque>)"),
            None => f.write_str("StyleSlot(None)"),
        }
    }
}
