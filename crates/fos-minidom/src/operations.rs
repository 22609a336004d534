//! DOM Node Operations
//!
//! Core node manipulation: insertBefore, appendChild, removeChild,
//! replaceChild, cloneNode, textContent, plus the ParentNode/ChildNode
//! conveniences built on them.
//!
//! Every operation validates first and mutates second. A call that fails
//! leaves the tree exactly as it found it.

use crate::hooks::HookAction;
use crate::node::NodeData;
use crate::{DomError, DomResult, Environment, Node, NodeId, NodeType};

/// Argument for `append`/`prepend`/`before`/`after`/`replace_with`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOrText {
    Node(NodeId),
    /// Becomes a new Text node
    Text(String),
}

impl From<NodeId> for NodeOrText {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<&str> for NodeOrText {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for NodeOrText {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl Environment {
    /// Document a node belongs to (a document is its own owner here)
    fn owner_for_children(&self, parent: &Node, parent_id: NodeId) -> Option<NodeId> {
        if parent.is_document() {
            Some(parent_id)
        } else {
            parent.owner_document
        }
    }

    /// Hierarchy checks shared by insert and replace
    ///
    /// `replaced` is a child of `parent` that will be removed first.
    fn validate_insertion(&self, parent: NodeId, child: NodeId, replaced: Option<NodeId>) -> DomResult<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;

        if !parent_node.is_container() {
            return Err(DomError::HierarchyRequest("this node type cannot have children"));
        }
        if child_node.is_document() {
            return Err(DomError::HierarchyRequest("a document cannot be inserted"));
        }
        if self.tree.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest("the new child contains the parent"));
        }

        if parent_node.is_document() {
            let incoming = if child_node.is_fragment() {
                self.tree.children(child).count()
            } else {
                1
            };
            let staying = self
                .tree
                .children(parent)
                .filter(|&c| c != child && Some(c) != replaced)
                .count();
            if staying + incoming > 1 {
                return Err(DomError::HierarchyRequest("a document can only hold one top-level child"));
            }
        }
        Ok(())
    }

    /// Insert `child` into `parent` before `reference` (or at the end)
    ///
    /// A fragment is emptied and its children spliced in order. A node that
    /// already has a parent is detached from it first. The inserted subtree
    /// takes `parent`'s owner document.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> DomResult<NodeId> {
        self.node(parent)?;
        if let Some(r) = reference {
            if self.tree.parent(r) != Some(parent) {
                return Err(DomError::HierarchyRequest(
                    "the reference node is not a child of this node",
                ));
            }
        }
        self.node(child)?;
        if reference == Some(child) {
            return Ok(child);
        }
        self.validate_insertion(parent, child, None)?;

        let parent_node = self.node(parent)?;
        let owner = self.owner_for_children(parent_node, parent);
        let hooks = self.hooks();

        if self.node(child)?.is_fragment() {
            let moved = self.tree.splice_children(child, parent, reference);
            for &node in &moved {
                self.adopt(node, owner);
                hooks.on_insert_before(self, parent, node, reference);
            }
            return Ok(child);
        }

        if let Some(old_parent) = self.tree.parent(child) {
            self.remove_child(old_parent, child)?;
        }
        self.tree.link_before(parent, child, reference);
        self.adopt(child, owner);
        hooks.on_insert_before(self, parent, child, reference);
        Ok(child)
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Unlink `child` from `parent`
    ///
    /// If `child` is not a child of `parent` nothing changes and the
    /// `on_remove_non_child` hook is consulted instead.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        self.node(child)?;
        let hooks = self.hooks();
        if self.tree.parent(child) != Some(parent) {
            hooks.on_remove_non_child(self, parent, child);
            return Ok(child);
        }
        self.tree.unlink(child);
        hooks.on_remove_child(self, parent, child);
        Ok(child)
    }

    /// Replace `old` with `new`, keeping `old`'s position
    pub fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> DomResult<NodeId> {
        self.node(parent)?;
        self.node(new)?;
        self.node(old)?;
        if self.tree.parent(old) != Some(parent) {
            return Err(DomError::ReplaceChildMismatch);
        }
        if new == old {
            return Ok(old);
        }
        self.validate_insertion(parent, new, Some(old))?;

        let reference = self.tree.next_sibling(old);
        self.remove_child(parent, old)?;
        self.insert_before(parent, new, reference)?;
        Ok(old)
    }

    /// Detach `node` from its parent, if any
    pub fn remove(&mut self, node: NodeId) -> DomResult<()> {
        if let Some(parent) = self.node(node)?.parent {
            self.remove_child(parent, node)?;
        }
        Ok(())
    }

    /// Move a subtree to `owner`, notifying the host for each node that changes
    fn adopt(&mut self, root: NodeId, owner: Option<NodeId>) {
        let changed: Vec<(NodeId, Option<NodeId>)> = self
            .tree
            .descendants(root)
            .filter_map(|id| {
                let node = self.tree.get(id)?;
                (!node.is_document() && node.owner_document != owner).then_some((id, node.owner_document))
            })
            .collect();
        if changed.is_empty() {
            return;
        }

        let hooks = self.hooks();
        for &(id, _) in &changed {
            if let Some(node) = self.tree.get_mut(id) {
                node.owner_document = owner;
            }
        }
        for (id, old) in changed {
            hooks.on_change_owner_document(self, id, old, owner);
        }
    }

    /// Clone a node; `deep` also clones the subtree in order
    ///
    /// Returns `None` for documents, which have no clone behavior here.
    pub fn clone_node(&mut self, node: NodeId, deep: bool) -> DomResult<Option<NodeId>> {
        let Some(copy) = self.alloc_copy(node)? else {
            return Ok(None);
        };
        if deep {
            let children: Vec<NodeId> = self.tree.children(node).collect();
            for child in children {
                if let Some(child_copy) = self.clone_node(child, true)? {
                    self.append_child(copy, child_copy)?;
                }
            }
        }
        Ok(Some(copy))
    }

    /// Text content
    ///
    /// Character data nodes report their data. Containers concatenate the
    /// text of all descendant Text nodes in tree order, skipping comments.
    pub fn text_content(&self, node: NodeId) -> DomResult<String> {
        if let Some(text) = self.hooks().on_get_text_content(self, node) {
            return Ok(text);
        }
        let target = self.node(node)?;
        if let Some(data) = target.as_character_data() {
            return Ok(data.to_string());
        }
        let mut out = String::new();
        for id in self.tree.descendants(node) {
            if let Some(NodeData::Text(text)) = self.tree.get(id).map(Node::data) {
                out.push_str(text);
            }
        }
        Ok(out)
    }

    /// Set text content
    ///
    /// Character data nodes replace their data. Containers drop all children
    /// and, for a non-empty value, get a single new Text child.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> DomResult<()> {
        let target = self.node(node)?;
        let is_character_data = target.as_character_data().is_some();
        let owner = self.owner_for_children(target, node);

        if self.hooks().on_set_text_content(self, node, text) == HookAction::Handled {
            return Ok(());
        }
        if is_character_data {
            return self.set_data(node, text);
        }

        while let Some(child) = self.tree.first_child(node) {
            self.remove_child(node, child)?;
        }
        if !text.is_empty() {
            let document = owner.ok_or(DomError::InvalidNodeType { expected: "node with an owner document" })?;
            let text_node = self.create_text_node(document, text)?;
            self.append_child(node, text_node)?;
        }
        Ok(())
    }

    /// Hierarchy checks for a whole `NodeOrText` list bound for `parent`
    ///
    /// Runs before any item is moved or any Text node is created.
    fn validate_items(&self, parent: NodeId, items: &[NodeOrText], replaced: Option<NodeId>) -> DomResult<()> {
        let parent_node = self.node(parent)?;
        if !parent_node.is_container() {
            return Err(DomError::HierarchyRequest("this node type cannot have children"));
        }

        let mut incoming = 0;
        for item in items {
            incoming += match item {
                NodeOrText::Node(id) => {
                    self.validate_insertion(parent, *id, replaced)?;
                    if self.node(*id)?.is_fragment() {
                        self.tree.children(*id).count()
                    } else {
                        1
                    }
                }
                NodeOrText::Text(_) => 1,
            };
        }

        if parent_node.is_document() {
            let staying = self
                .tree
                .children(parent)
                .filter(|&c| Some(c) != replaced && !items.contains(&NodeOrText::Node(c)))
                .count();
            if staying + incoming > 1 {
                return Err(DomError::HierarchyRequest("a document can only hold one top-level child"));
            }
        }
        Ok(())
    }

    /// Turn `items` into a single node (strings become Text nodes)
    ///
    /// The list is validated against `context` first, so a failing call
    /// leaves every item where it was.
    fn convert_items(&mut self, context: NodeId, items: Vec<NodeOrText>, replaced: Option<NodeId>) -> DomResult<NodeId> {
        self.validate_items(context, &items, replaced)?;
        let context_node = self.node(context)?;
        let document = self
            .owner_for_children(context_node, context)
            .ok_or(DomError::InvalidNodeType { expected: "node with an owner document" })?;

        let mut nodes = Vec::with_capacity(items.len());
        for item in items {
            nodes.push(match item {
                NodeOrText::Node(id) => id,
                NodeOrText::Text(text) => self.create_text_node(document, &text)?,
            });
        }
        if let [single] = nodes.as_slice() {
            return Ok(*single);
        }
        let fragment = self.create_document_fragment(document)?;
        for id in nodes {
            self.append_child(fragment, id)?;
        }
        Ok(fragment)
    }

    /// Append nodes or strings after the last child
    pub fn append(&mut self, parent: NodeId, items: impl IntoIterator<Item = NodeOrText>) -> DomResult<()> {
        let node = self.convert_items(parent, items.into_iter().collect(), None)?;
        self.append_child(parent, node)?;
        Ok(())
    }

    /// Insert nodes or strings before the first child
    pub fn prepend(&mut self, parent: NodeId, items: impl IntoIterator<Item = NodeOrText>) -> DomResult<()> {
        let node = self.convert_items(parent, items.into_iter().collect(), None)?;
        let reference = self.tree.first_child(parent);
        self.insert_before(parent, node, reference)?;
        Ok(())
    }

    /// Insert nodes or strings just before `node`
    pub fn before(&mut self, node: NodeId, items: impl IntoIterator<Item = NodeOrText>) -> DomResult<()> {
        let Some(parent) = self.node(node)?.parent else {
            return Ok(());
        };
        let inserted = self.convert_items(parent, items.into_iter().collect(), None)?;
        let reference = if self.tree.parent(node) == Some(parent) { Some(node) } else { None };
        self.insert_before(parent, inserted, reference)?;
        Ok(())
    }

    /// Insert nodes or strings just after `node`
    pub fn after(&mut self, node: NodeId, items: impl IntoIterator<Item = NodeOrText>) -> DomResult<()> {
        let Some(parent) = self.node(node)?.parent else {
            return Ok(());
        };
        let inserted = self.convert_items(parent, items.into_iter().collect(), None)?;
        // Computed after conversion: converting may have moved the old next sibling
        let reference = self.tree.next_sibling(node);
        self.insert_before(parent, inserted, reference)?;
        Ok(())
    }

    /// Replace `node` with nodes or strings
    pub fn replace_with(&mut self, node: NodeId, items: impl IntoIterator<Item = NodeOrText>) -> DomResult<()> {
        let Some(parent) = self.node(node)?.parent else {
            return Ok(());
        };
        let replacement = self.convert_items(parent, items.into_iter().collect(), Some(node))?;
        if self.tree.parent(node) == Some(parent) {
            self.replace_child(parent, replacement, node)?;
        } else {
            self.append_child(parent, replacement)?;
        }
        Ok(())
    }

    /// Node type of a node
    pub fn node_type(&self, node: NodeId) -> Option<NodeType> {
        self.tree.get(node).map(Node::node_type)
    }

    /// `nodeName`: tag name for elements, `#text`, `#comment`, ...
    pub fn node_name(&self, node: NodeId) -> Option<String> {
        match self.node_type(node)? {
            NodeType::Element => self.tag_name(node),
            NodeType::Text => Some("#text".to_string()),
            NodeType::Comment => Some("#comment".to_string()),
            NodeType::Document => Some("#document".to_string()),
            NodeType::DocumentFragment => Some("#document-fragment".to_string()),
        }
    }

    /// `nodeValue`: the data of character data nodes, otherwise `None`
    pub fn node_value(&self, node: NodeId) -> Option<String> {
        self.tree.get(node)?.as_character_data()?;
        self.data(node).ok()
    }

    pub fn owner_document(&self, node: NodeId) -> Option<NodeId> {
        self.tree.get(node)?.owner_document
    }

    pub fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }

    /// Parent, if it is an element
    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node).filter(|&p| self.is_element(p))
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.tree.first_child(node)
    }

    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.tree.last_child(node)
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.tree.prev_sibling(node)
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.tree.next_sibling(node)
    }

    /// Children in order
    pub fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.children(node).collect()
    }

    pub fn has_child_nodes(&self, node: NodeId) -> bool {
        self.tree.first_child(node).is_some()
    }

    /// Element children in order
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.children(node).filter(|&c| self.is_element(c)).collect()
    }

    pub fn child_element_count(&self, node: NodeId) -> usize {
        self.tree.children(node).filter(|&c| self.is_element(c)).count()
    }

    pub fn first_element_child(&self, node: NodeId) -> Option<NodeId> {
        self.tree.children(node).find(|&c| self.is_element(c))
    }

    pub fn last_element_child(&self, node: NodeId) -> Option<NodeId> {
        let mut current = self.tree.last_child(node);
        while let Some(id) = current {
            if self.is_element(id) {
                return Some(id);
            }
            current = self.tree.prev_sibling(id);
        }
        None
    }

    /// Is `other` an inclusive descendant of `node`
    pub fn contains(&self, node: NodeId, other: NodeId) -> bool {
        self.tree.contains_id(node) && self.tree.contains_id(other) && self.tree.is_inclusive_ancestor(node, other)
    }

    /// Topmost ancestor (the node itself when detached)
    pub fn root_node(&self, node: NodeId) -> Option<NodeId> {
        self.tree.get(node)?;
        Some(self.tree.ancestors(node).last().unwrap_or(node))
    }

    pub(crate) fn is_element(&self, node: NodeId) -> bool {
        self.tree.get(node).is_some_and(Node::is_element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Environment, NodeId, NodeId) {
        let mut env = Environment::new();
        let doc = env.create_html_document().unwrap();
        let body = env.body(doc).unwrap();
        (env, doc, body)
    }

    #[test]
    fn test_insert_before_foreign_reference() {
        let (mut env, doc, body) = setup();
        let a = env.create_element(doc, "div").unwrap();
        let stray = env.create_element(doc, "div").unwrap();
        let err = env.insert_before(body, a, Some(stray)).unwrap_err();
        assert!(matches!(err, DomError::HierarchyRequest(_)));
        assert_eq!(env.parent_node(a), None);
        assert!(!env.has_child_nodes(body));
    }

    #[test]
    fn test_insert_self_before_self_is_noop() {
        let (mut env, doc, body) = setup();
        let a = env.create_element(doc, "div").unwrap();
        env.append_child(body, a).unwrap();
        env.insert_before(body, a, Some(a)).unwrap();
        assert_eq!(env.child_nodes(body), vec![a]);
    }

    #[test]
    fn test_cycle_rejected() {
        let (mut env, doc, body) = setup();
        let outer = env.create_element(doc, "div").unwrap();
        let inner = env.create_element(doc, "div").unwrap();
        env.append_child(body, outer).unwrap();
        env.append_child(outer, inner).unwrap();
        assert!(env.append_child(inner, outer).is_err());
        assert!(env.append_child(outer, outer).is_err());
        assert_eq!(env.parent_node(outer), Some(body));
    }

    #[test]
    fn test_text_cannot_have_children() {
        let (mut env, doc, _) = setup();
        let text = env.create_text_node(doc, "x").unwrap();
        let span = env.create_element(doc, "span").unwrap();
        assert!(matches!(env.append_child(text, span), Err(DomError::HierarchyRequest(_))));
    }

    #[test]
    fn test_document_single_child() {
        let (mut env, doc, _) = setup();
        let extra = env.create_element(doc, "div").unwrap();
        assert!(matches!(env.append_child(doc, extra), Err(DomError::HierarchyRequest(_))));

        // Replacing the only child is allowed
        let html = env.document_element(doc).unwrap();
        env.replace_child(doc, extra, html).unwrap();
        assert_eq!(env.document_element(doc), Some(extra));
    }

    #[test]
    fn test_fragment_insertion_empties_fragment() {
        let (mut env, doc, body) = setup();
        let a = env.create_element(doc, "a").unwrap();
        let c = env.create_element(doc, "i").unwrap();
        env.append_child(body, a).unwrap();
        env.append_child(body, c).unwrap();

        let fragment = env.create_document_fragment(doc).unwrap();
        let b1 = env.create_element(doc, "b").unwrap();
        let b2 = env.create_element(doc, "b").unwrap();
        env.append_child(fragment, b1).unwrap();
        env.append_child(fragment, b2).unwrap();

        env.insert_before(body, fragment, Some(c)).unwrap();
        assert_eq!(env.child_nodes(body), vec![a, b1, b2, c]);
        assert!(!env.has_child_nodes(fragment));
        assert_eq!(env.parent_node(b2), Some(body));
        assert_eq!(env.previous_sibling(c), Some(b2));
    }

    #[test]
    fn test_move_between_parents() {
        let (mut env, doc, body) = setup();
        let left = env.create_element(doc, "div").unwrap();
        let right = env.create_element(doc, "div").unwrap();
        let item = env.create_element(doc, "span").unwrap();
        env.append_child(body, left).unwrap();
        env.append_child(body, right).unwrap();
        env.append_child(left, item).unwrap();

        env.append_child(right, item).unwrap();
        assert!(!env.has_child_nodes(left));
        assert_eq!(env.child_nodes(right), vec![item]);
    }

    #[test]
    fn test_replace_child_mismatch() {
        let (mut env, doc, body) = setup();
        let a = env.create_element(doc, "div").unwrap();
        let b = env.create_element(doc, "div").unwrap();
        assert_eq!(env.replace_child(body, a, b).unwrap_err(), DomError::ReplaceChildMismatch);
    }

    #[test]
    fn test_replace_child_keeps_position() {
        let (mut env, doc, body) = setup();
        let a = env.create_element(doc, "a").unwrap();
        let b = env.create_element(doc, "b").unwrap();
        let c = env.create_element(doc, "i").unwrap();
        let x = env.create_element(doc, "em").unwrap();
        for id in [a, b, c] {
            env.append_child(body, id).unwrap();
        }
        assert_eq!(env.replace_child(body, x, b).unwrap(), b);
        assert_eq!(env.child_nodes(body), vec![a, x, c]);
        assert_eq!(env.parent_node(b), None);

        // Replacing with the next sibling collapses onto it
        env.replace_child(body, c, x).unwrap();
        assert_eq!(env.child_nodes(body), vec![a, c]);
    }

    #[test]
    fn test_remove_non_child_is_noop() {
        let (mut env, doc, body) = setup();
        let a = env.create_element(doc, "div").unwrap();
        env.remove_child(body, a).unwrap();
        assert_eq!(env.parent_node(a), None);
    }

    #[test]
    fn test_owner_document_follows_insertion() {
        let mut env = Environment::new();
        let first = env.create_html_document().unwrap();
        let second = env.create_html_document().unwrap();
        let div = env.create_element(first, "div").unwrap();
        let text = env.create_text_node(first, "x").unwrap();
        env.append_child(div, text).unwrap();

        let body = env.body(second).unwrap();
        env.append_child(body, div).unwrap();
        assert_eq!(env.owner_document(div), Some(second));
        assert_eq!(env.owner_document(text), Some(second));
    }

    #[test]
    fn test_clone_shallow_and_deep() {
        let (mut env, doc, _) = setup();
        let div = env.create_element(doc, "div").unwrap();
        env.set_attribute(div, "class", "box").unwrap();
        let span = env.create_element(doc, "span").unwrap();
        env.append_child(div, span).unwrap();
        env.append(span, ["hi".into()]).unwrap();

        let shallow = env.clone_node(div, false).unwrap().unwrap();
        assert!(!env.has_child_nodes(shallow));
        assert_eq!(env.get_attribute(shallow, "class").as_deref(), Some("box"));

        let deep = env.clone_node(div, true).unwrap().unwrap();
        assert_eq!(env.outer_html(deep).unwrap(), env.outer_html(div).unwrap());
        assert_ne!(env.first_child(deep), Some(span));

        assert_eq!(env.clone_node(doc, true).unwrap(), None);
    }

    #[test]
    fn test_text_content_skips_comments() {
        let (mut env, doc, body) = setup();
        let p = env.create_element(doc, "p").unwrap();
        env.append_child(body, p).unwrap();
        let note = env.create_comment(doc, "hidden").unwrap();
        let em = env.create_element(doc, "em").unwrap();
        env.append(p, ["a".into(), note.into(), em.into()]).unwrap();
        env.append(em, ["b".into()]).unwrap();

        assert_eq!(env.text_content(p).unwrap(), "ab");
        assert_eq!(env.text_content(note).unwrap(), "hidden");
    }

    #[test]
    fn test_set_text_content_empty_clears() {
        let (mut env, doc, body) = setup();
        let p = env.create_element(doc, "p").unwrap();
        env.append_child(body, p).unwrap();
        env.append(p, ["a".into(), "b".into()]).unwrap();
        env.set_text_content(p, "").unwrap();
        assert!(!env.has_child_nodes(p));
    }

    #[test]
    fn test_child_node_conveniences() {
        let (mut env, doc, body) = setup();
        let mid = env.create_element(doc, "hr").unwrap();
        env.append_child(body, mid).unwrap();
        env.before(mid, ["x".into()]).unwrap();
        env.after(mid, ["y".into()]).unwrap();
        env.prepend(body, ["w".into()]).unwrap();
        assert_eq!(env.text_content(body).unwrap(), "wxy");

        let br = env.create_element(doc, "br").unwrap();
        env.replace_with(mid, [br.into()]).unwrap();
        assert_eq!(env.child_element_count(body), 1);
        assert_eq!(env.first_element_child(body), Some(br));
        assert_eq!(env.last_element_child(body), Some(br));
        assert_eq!(env.children(body), vec![br]);
    }

    #[test]
    fn test_failed_append_moves_nothing() {
        let (mut env, doc, body) = setup();
        let sibling = env.create_element(doc, "div").unwrap();
        let outer = env.create_element(doc, "section").unwrap();
        let p = env.create_element(doc, "p").unwrap();
        env.append_child(body, sibling).unwrap();
        env.append_child(body, outer).unwrap();
        env.append_child(outer, p).unwrap();
        let live = env.tree.len();

        let err = env.append(p, [sibling.into(), "text".into(), outer.into()]).unwrap_err();
        assert!(matches!(err, DomError::HierarchyRequest(_)));
        assert_eq!(env.child_nodes(body), vec![sibling, outer]);
        assert!(!env.has_child_nodes(p));
        assert_eq!(env.tree.len(), live);

        assert!(env.replace_with(p, [sibling.into(), outer.into()]).is_err());
        assert!(env.before(p, [sibling.into(), p.into(), outer.into()]).is_err());
        assert_eq!(env.child_nodes(body), vec![sibling, outer]);
        assert_eq!(env.child_nodes(outer), vec![p]);
    }

    #[test]
    fn test_failed_prepend_into_document_moves_nothing() {
        let (mut env, doc, body) = setup();
        let a = env.create_element(doc, "div").unwrap();
        env.append_child(body, a).unwrap();
        let html = env.document_element(doc).unwrap();

        env.remove(html).unwrap();
        assert!(env.prepend(doc, [a.into(), "tail".into()]).is_err());
        assert_eq!(env.parent_node(a), Some(body));
        assert!(!env.has_child_nodes(doc));
    }

    #[test]
    fn test_contains_and_root() {
        let (mut env, doc, body) = setup();
        let div = env.create_element(doc, "div").unwrap();
        assert_eq!(env.root_node(div), Some(div));
        env.append_child(body, div).unwrap();
        assert!(env.contains(doc, div));
        assert!(env.contains(div, div));
        assert!(!env.contains(div, body));
        assert_eq!(env.root_node(div), Some(doc));
        assert_eq!(env.parent_element(div), Some(body));
        assert_eq!(env.parent_element(env.document_element(doc).unwrap()), None);
    }

    #[test]
    fn test_node_names() {
        let (mut env, doc, body) = setup();
        let text = env.create_text_node(doc, "t").unwrap();
        let fragment = env.create_document_fragment(doc).unwrap();
        assert_eq!(env.node_name(body).as_deref(), Some("BODY"));
        assert_eq!(env.node_name(text).as_deref(), Some("#text"));
        assert_eq!(env.node_name(doc).as_deref(), Some("#document"));
        assert_eq!(env.node_name(fragment).as_deref(), Some("#document-fragment"));
        assert_eq!(env.node_value(text).as_deref(), Some("t"));
        assert_eq!(env.node_value(body), None);
    }
}
