//! Host Interception Hooks
//!
//! A host renderer mirrors the tree into its own backing store (a GPU scene
//! graph, a terminal buffer) by implementing [`DomHooks`]. Every method has a
//! no-op default, so a host overrides only what it needs.
//!
//! Three shapes of hook exist:
//! - observers (`()` return) run after the default behavior;
//! - "before" hooks return [`HookAction`]; `Handled` means the host took
//!   care of the operation and the default behavior is skipped;
//! - getter hooks return `Some(value)` to override what the tree would report.

use crate::{DomResult, Environment, NodeId};

/// Result of a "before" hook
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HookAction {
    /// Run the default behavior
    #[default]
    Proceed,
    /// The host handled it; skip the default behavior
    Handled,
}

/// Interception points for a host renderer
#[allow(unused_variables)]
pub trait DomHooks {
    /// Bootstrap a freshly created document
    ///
    /// The default adds `head` and `body` under an `html` document element.
    fn init_document(&self, env: &mut Environment, document: NodeId) -> DomResult<()> {
        env.init_default_document(document)
    }

    /// A node was created by one of the factories (or by cloning)
    fn on_create_node(&self, env: &Environment, node: NodeId) {}

    /// `child` was linked into `parent` before `reference`.
    /// Called once per moved child when a fragment is inserted.
    fn on_insert_before(&self, env: &Environment, parent: NodeId, child: NodeId, reference: Option<NodeId>) {}

    /// `child` was unlinked from `parent`
    fn on_remove_child(&self, env: &Environment, parent: NodeId, child: NodeId) {}

    /// `remove_child` was called with a node that is not a child of `parent`
    fn on_remove_non_child(&self, env: &Environment, parent: NodeId, child: NodeId) {}

    /// Override the character data reported for `node`
    fn on_get_data(&self, env: &Environment, node: NodeId) -> Option<String> {
        None
    }

    /// Character data of `node` changed
    fn on_set_data(&self, env: &Environment, node: NodeId, data: &str) {}

    /// Override the text content reported for `node`
    fn on_get_text_content(&self, env: &Environment, node: NodeId) -> Option<String> {
        None
    }

    fn on_set_text_content(&self, env: &Environment, node: NodeId, text: &str) -> HookAction {
        HookAction::Proceed
    }

    fn on_set_attribute_ns(
        &self,
        env: &Environment,
        element: NodeId,
        namespace: Option<&str>,
        name: &str,
        value: &str,
    ) -> HookAction {
        HookAction::Proceed
    }

    /// Override the attribute value reported for `element`
    fn on_get_attribute_ns(&self, env: &Environment, element: NodeId, namespace: Option<&str>, name: &str) -> Option<String> {
        None
    }

    fn on_remove_attribute_ns(&self, env: &Environment, element: NodeId, namespace: Option<&str>, name: &str) -> HookAction {
        HookAction::Proceed
    }

    /// Observes a rejected `innerHTML` write; the write still fails
    fn on_set_inner_html(&self, env: &Environment, element: NodeId, html: &str) {}

    /// Override `outerHTML` serialization
    fn on_get_outer_html(&self, env: &Environment, element: NodeId) -> Option<String> {
        None
    }

    /// Handle an `outerHTML` write; without it only `""` (removal) is accepted
    fn on_set_outer_html(&self, env: &Environment, element: NodeId, html: &str) -> HookAction {
        HookAction::Proceed
    }

    /// `node` moved from document `old` to document `new`
    fn on_change_owner_document(&self, env: &Environment, node: NodeId, old: Option<NodeId>, new: Option<NodeId>) {}

    fn on_add_event_listener(&self, env: &Environment, target: NodeId, event_type: &str, capture: bool) -> HookAction {
        HookAction::Proceed
    }

    fn on_added_event_listener(&self, env: &Environment, target: NodeId, event_type: &str, capture: bool) {}

    fn on_remove_event_listener(&self, env: &Environment, target: NodeId, event_type: &str, capture: bool) -> HookAction {
        HookAction::Proceed
    }

    fn on_removed_event_listener(&self, env: &Environment, target: NodeId, event_type: &str, capture: bool) {}
}

/// Hooks that only run the defaults
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl DomHooks for NoHooks {}
