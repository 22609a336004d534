//! Interface traits and typed handles
//!
//! The environment API works on bare [`NodeId`]s. The traits here group that
//! API by DOM interface (EventTarget, Node, ParentNode, CharacterData) so a
//! host can put them on its own wrapper types. Only `id()` is required; every
//! other method forwards to the [`Environment`].
//!
//! The handles are thin `Copy` wrappers that record which interfaces a node
//! supports, so `TextRef` has no `append_child` and `ElementRef` no `data`.

use std::any::Any;
use std::rc::Rc;

use crate::operations::NodeOrText;
use crate::{DomError, DomResult, Environment, Event, EventListener, ListenerOptions, NodeId, NodeType};

/// EventTarget interface
pub trait EventTargetBehavior {
    fn id(&self) -> NodeId;

    fn add_event_listener(
        &self,
        env: &mut Environment,
        event_type: &str,
        listener: &EventListener,
        options: impl Into<ListenerOptions>,
    ) -> DomResult<()> {
        env.add_event_listener(self.id(), event_type, listener, options)
    }

    fn remove_event_listener(
        &self,
        env: &mut Environment,
        event_type: &str,
        listener: &EventListener,
        options: impl Into<ListenerOptions>,
    ) -> DomResult<()> {
        env.remove_event_listener(self.id(), event_type, listener, options)
    }

    fn dispatch_event(&self, env: &mut Environment, event: &mut Event) -> DomResult<bool> {
        env.dispatch_event(self.id(), event)
    }
}

/// Node interface
pub trait NodeBehavior: EventTargetBehavior {
    fn node_type(&self, env: &Environment) -> Option<NodeType> {
        env.node_type(self.id())
    }

    fn node_name(&self, env: &Environment) -> Option<String> {
        env.node_name(self.id())
    }

    fn owner_document(&self, env: &Environment) -> Option<NodeId> {
        env.owner_document(self.id())
    }

    fn parent_node(&self, env: &Environment) -> Option<NodeId> {
        env.parent_node(self.id())
    }

    fn parent_element(&self, env: &Environment) -> Option<NodeId> {
        env.parent_element(self.id())
    }

    fn first_child(&self, env: &Environment) -> Option<NodeId> {
        env.first_child(self.id())
    }

    fn last_child(&self, env: &Environment) -> Option<NodeId> {
        env.last_child(self.id())
    }

    fn previous_sibling(&self, env: &Environment) -> Option<NodeId> {
        env.previous_sibling(self.id())
    }

    fn next_sibling(&self, env: &Environment) -> Option<NodeId> {
        env.next_sibling(self.id())
    }

    fn child_nodes(&self, env: &Environment) -> Vec<NodeId> {
        env.child_nodes(self.id())
    }

    fn has_child_nodes(&self, env: &Environment) -> bool {
        env.has_child_nodes(self.id())
    }

    fn contains(&self, env: &Environment, other: NodeId) -> bool {
        env.contains(self.id(), other)
    }

    fn root_node(&self, env: &Environment) -> Option<NodeId> {
        env.root_node(self.id())
    }

    fn text_content(&self, env: &Environment) -> DomResult<String> {
        env.text_content(self.id())
    }

    fn set_text_content(&self, env: &mut Environment, text: &str) -> DomResult<()> {
        env.set_text_content(self.id(), text)
    }

    fn clone_node(&self, env: &mut Environment, deep: bool) -> DomResult<Option<NodeId>> {
        env.clone_node(self.id(), deep)
    }

    fn remove(&self, env: &mut Environment) -> DomResult<()> {
        env.remove(self.id())
    }

    fn before(&self, env: &mut Environment, items: impl IntoIterator<Item = NodeOrText>) -> DomResult<()> {
        env.before(self.id(), items)
    }

    fn after(&self, env: &mut Environment, items: impl IntoIterator<Item = NodeOrText>) -> DomResult<()> {
        env.after(self.id(), items)
    }

    fn replace_with(&self, env: &mut Environment, items: impl IntoIterator<Item = NodeOrText>) -> DomResult<()> {
        env.replace_with(self.id(), items)
    }
}

/// ParentNode interface (elements, documents, fragments)
pub trait ParentNodeBehavior: NodeBehavior {
    fn insert_before(&self, env: &mut Environment, child: NodeId, reference: Option<NodeId>) -> DomResult<NodeId> {
        env.insert_before(self.id(), child, reference)
    }

    fn append_child(&self, env: &mut Environment, child: NodeId) -> DomResult<NodeId> {
        env.append_child(self.id(), child)
    }

    fn remove_child(&self, env: &mut Environment, child: NodeId) -> DomResult<NodeId> {
        env.remove_child(self.id(), child)
    }

    fn replace_child(&self, env: &mut Environment, new: NodeId, old: NodeId) -> DomResult<NodeId> {
        env.replace_child(self.id(), new, old)
    }

    fn append(&self, env: &mut Environment, items: impl IntoIterator<Item = NodeOrText>) -> DomResult<()> {
        env.append(self.id(), items)
    }

    fn prepend(&self, env: &mut Environment, items: impl IntoIterator<Item = NodeOrText>) -> DomResult<()> {
        env.prepend(self.id(), items)
    }

    fn children(&self, env: &Environment) -> Vec<NodeId> {
        env.children(self.id())
    }

    fn child_element_count(&self, env: &Environment) -> usize {
        env.child_element_count(self.id())
    }

    fn first_element_child(&self, env: &Environment) -> Option<NodeId> {
        env.first_element_child(self.id())
    }

    fn last_element_child(&self, env: &Environment) -> Option<NodeId> {
        env.last_element_child(self.id())
    }

    fn get_elements_by_tag_name(&self, env: &Environment, name: &str) -> Vec<NodeId> {
        env.get_elements_by_tag_name(self.id(), name)
    }
}

/// CharacterData interface (text, comments)
pub trait CharacterDataBehavior: NodeBehavior {
    fn data(&self, env: &Environment) -> DomResult<String> {
        env.data(self.id())
    }

    fn set_data(&self, env: &mut Environment, data: &str) -> DomResult<()> {
        env.set_data(self.id(), data)
    }

    fn append_data(&self, env: &mut Environment, data: &str) -> DomResult<()> {
        env.append_data(self.id(), data)
    }

    fn length(&self, env: &Environment) -> DomResult<usize> {
        env.length(self.id())
    }
}

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $node_type:path, $expected:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(NodeId);

        impl $name {
            /// Wrap `id`, checking the node type
            pub fn new(env: &Environment, id: NodeId) -> DomResult<Self> {
                if env.node(id)?.node_type() == $node_type {
                    Ok(Self(id))
                } else {
                    Err(DomError::InvalidNodeType { expected: $expected })
                }
            }
        }

        impl From<$name> for NodeId {
            fn from(handle: $name) -> NodeId {
                handle.0
            }
        }

        impl From<$name> for NodeOrText {
            fn from(handle: $name) -> NodeOrText {
                NodeOrText::Node(handle.0)
            }
        }

        impl EventTargetBehavior for $name {
            fn id(&self) -> NodeId {
                self.0
            }
        }

        impl NodeBehavior for $name {}
    };
}

handle!(
    /// Element handle
    ElementRef,
    NodeType::Element,
    "Element"
);
handle!(
    /// Text node handle
    TextRef,
    NodeType::Text,
    "Text"
);
handle!(
    /// Comment handle
    CommentRef,
    NodeType::Comment,
    "Comment"
);
handle!(
    /// Document handle
    DocumentRef,
    NodeType::Document,
    "Document"
);
handle!(
    /// Document fragment handle
    FragmentRef,
    NodeType::DocumentFragment,
    "DocumentFragment"
);

impl ParentNodeBehavior for ElementRef {}
impl ParentNodeBehavior for DocumentRef {}
impl ParentNodeBehavior for FragmentRef {}
impl CharacterDataBehavior for TextRef {}
impl CharacterDataBehavior for CommentRef {}

impl ElementRef {
    pub fn local_name(self, env: &Environment) -> Option<&str> {
        env.local_name(self.0)
    }

    pub fn tag_name(self, env: &Environment) -> Option<String> {
        env.tag_name(self.0)
    }

    pub fn get_attribute(self, env: &Environment, name: &str) -> Option<String> {
        env.get_attribute(self.0, name)
    }

    pub fn set_attribute(self, env: &mut Environment, name: &str, value: &str) -> DomResult<()> {
        env.set_attribute(self.0, name, value)
    }

    pub fn remove_attribute(self, env: &mut Environment, name: &str) -> DomResult<()> {
        env.remove_attribute(self.0, name)
    }

    pub fn has_attribute(self, env: &Environment, name: &str) -> bool {
        env.has_attribute(self.0, name)
    }

    pub fn outer_html(self, env: &Environment) -> DomResult<String> {
        env.outer_html(self.0)
    }

    pub fn style(self, env: &Environment) -> Option<Rc<dyn Any>> {
        env.style(self.0)
    }
}

impl DocumentRef {
    /// New HTML document with `head` and `body`
    pub fn create_html(env: &mut Environment) -> DomResult<Self> {
        env.create_html_document().map(Self)
    }

    pub fn create_element(self, env: &mut Environment, type_name: &str) -> DomResult<ElementRef> {
        env.create_element(self.0, type_name).map(ElementRef)
    }

    pub fn create_text_node(self, env: &mut Environment, data: &str) -> DomResult<TextRef> {
        env.create_text_node(self.0, data).map(TextRef)
    }

    pub fn create_comment(self, env: &mut Environment, data: &str) -> DomResult<CommentRef> {
        env.create_comment(self.0, data).map(CommentRef)
    }

    pub fn create_document_fragment(self, env: &mut Environment) -> DomResult<FragmentRef> {
        env.create_document_fragment(self.0).map(FragmentRef)
    }

    pub fn document_element(self, env: &Environment) -> Option<ElementRef> {
        env.document_element(self.0).map(ElementRef)
    }

    pub fn body(self, env: &Environment) -> Option<ElementRef> {
        env.body(self.0).map(ElementRef)
    }

    pub fn head(self, env: &Environment) -> Option<ElementRef> {
        env.head(self.0).map(ElementRef)
    }

    pub fn get_element_by_id(self, env: &Environment, id: &str) -> Option<ElementRef> {
        env.get_element_by_id(self.0, id).map(ElementRef)
    }
}
