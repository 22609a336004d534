//! fOS MiniDOM - Embeddable DOM runtime
//!
//! A small, host-agnostic DOM for renderers that are not browsers: nodes live
//! in a generational arena owned by an [`Environment`], element types come
//! from a per-environment registry, and a host mirrors the tree into its own
//! backing store through [`DomHooks`].
//!
//! ```
//! use fos_minidom::{Environment, EventInit, EventListener};
//!
//! let mut env = Environment::new();
//! let doc = env.create_html_document()?;
//! let body = env.body(doc).expect("html documents have a body");
//! let button = env.create_element(doc, "button")?;
//! env.append_child(body, button)?;
//!
//! let click = EventListener::new(|_, event| {
//!     event.prevent_default();
//!     Ok(())
//! });
//! env.add_event_listener(body, "click", &click, false)?;
//!
//! let mut event = env.create_event("click", EventInit { bubbles: true, cancelable: true, captures: true });
//! assert!(!env.dispatch_event(button, &mut event)?);
//! # Ok::<(), fos_minidom::DomError>(())
//! ```

mod character_data;
mod document;
mod element;
mod environment;
mod error;
mod event;
mod event_target;
mod generation;
mod hooks;
mod interfaces;
mod interner;
mod kind;
mod node;
mod operations;
mod registry;
mod serialize;
mod tree;

pub use element::Attribute;
pub use environment::{create_environment, Environment, EnvironmentOptions};
pub use error::{DomError, DomResult};
pub use event::{Event, EventInit};
pub use event_target::{AbortController, AbortSignal, EventListener, ListenerOptions};
pub use generation::Generation;
pub use hooks::{DomHooks, HookAction, NoHooks};
pub use interfaces::{
    CharacterDataBehavior, CommentRef, DocumentRef, ElementRef, EventTargetBehavior, FragmentRef,
    NodeBehavior, ParentNodeBehavior, TextRef,
};
pub use interner::{InternedString, StringInterner};
pub use kind::{NodeKind, SVG_NAMESPACE, XHTML_NAMESPACE};
pub use node::{ElementData, Node, NodeData, NodeType, StyleSlot};
pub use operations::NodeOrText;
pub use registry::Registry;
pub use tree::{Ancestors, Children, Descendants, DomTree};

/// Node identifier: arena slot plus the generation it was allocated in
///
/// Ids of released nodes never alias a node allocated later in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: Generation,
}

impl NodeId {
    /// Arena slot index
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> Generation {
        self.generation
    }
}
