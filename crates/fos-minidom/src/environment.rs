//! Environment - factory, registry and hook table
//!
//! An [`Environment`] owns the node arena, the string interner, the element
//! registry and the host hooks. Every factory and tree operation goes through
//! it explicitly, so several independent DOM instances can coexist in one
//! process.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::hooks::{DomHooks, NoHooks};
use crate::interner::{StringInterner, COMMON_TAGS, SVG_TAGS};
use crate::kind::{NodeKind, SVG_NAMESPACE, XHTML_NAMESPACE};
use crate::node::{ElementData, NodeData};
use crate::registry::Registry;
use crate::tree::DomTree;
use crate::{DomError, DomResult, Node, NodeId};

/// Environment configuration
#[derive(Clone, Default)]
pub struct EnvironmentOptions {
    /// Suppress the warning for unregistered element types
    pub silent: bool,
    /// Host base kinds, keyed by built-in kind name (`"Element"`, `"Text"`,
    /// `"Comment"`, `"Document"`, `"DocumentFragment"`, or `"Node"` for all)
    pub common_ancestors: HashMap<String, Rc<NodeKind>>,
    /// Registered kinds keep their base's class name
    pub preserve_class_name_on_register: bool,
    /// Host interception hooks
    pub hooks: Option<Rc<dyn DomHooks>>,
}

impl EnvironmentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub fn with_common_ancestor(mut self, kind_name: &str, base: Rc<NodeKind>) -> Self {
        self.common_ancestors.insert(kind_name.to_string(), base);
        self
    }

    pub fn preserve_class_name_on_register(mut self, preserve: bool) -> Self {
        self.preserve_class_name_on_register = preserve;
        self
    }

    pub fn with_hooks(mut self, hooks: Rc<dyn DomHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }
}

impl fmt::Debug for EnvironmentOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentOptions")
            .field("silent", &self.silent)
            .field("common_ancestors", &self.common_ancestors.keys().collect::<Vec<_>>())
            .field("preserve_class_name_on_register", &self.preserve_class_name_on_register)
            .field("hooks", &self.hooks.is_some())
            .finish()
    }
}

/// Built-in kind chains
#[derive(Debug)]
pub(crate) struct BuiltinKinds {
    pub(crate) text: Rc<NodeKind>,
    pub(crate) comment: Rc<NodeKind>,
    pub(crate) element: Rc<NodeKind>,
    pub(crate) html_element: Rc<NodeKind>,
    pub(crate) svg_element: Rc<NodeKind>,
    pub(crate) document: Rc<NodeKind>,
    pub(crate) fragment: Rc<NodeKind>,
}

impl BuiltinKinds {
    fn new(ancestors: &HashMap<String, Rc<NodeKind>>) -> Self {
        let base_for = |name: &str| {
            ancestors
                .get(name)
                .or_else(|| ancestors.get("Node"))
                .cloned()
        };

        let element = NodeKind::compose(base_for("Element"), &["EventTarget", "Node", "Element"]);
        let html_element = NodeKind::derive(&element, "HTMLElement", "HTMLElement", false, true);
        let svg_element = NodeKind::derive(&element, "SVGElement", "SVGElement", true, false);

        Self {
            text: NodeKind::compose(base_for("Text"), &["EventTarget", "Node", "CharacterData", "Text"]),
            comment: NodeKind::compose(base_for("Comment"), &["EventTarget", "Node", "CharacterData", "Comment"]),
            element,
            html_element,
            svg_element,
            document: NodeKind::compose(base_for("Document"), &["EventTarget", "Node", "Document"]),
            fragment: NodeKind::compose(
                base_for("DocumentFragment"),
                &["EventTarget", "Node", "DocumentFragment"],
            ),
        }
    }

    /// Look up a built-in kind by name
    fn get(&self, name: &str) -> Option<&Rc<NodeKind>> {
        match name {
            "Text" => Some(&self.text),
            "Comment" => Some(&self.comment),
            "Element" => Some(&self.element),
            "HTMLElement" => Some(&self.html_element),
            "SVGElement" => Some(&self.svg_element),
            "Document" => Some(&self.document),
            "DocumentFragment" => Some(&self.fragment),
            _ => None,
        }
    }
}

/// DOM environment
pub struct Environment {
    pub(crate) tree: DomTree,
    pub(crate) interner: StringInterner,
    pub(crate) registry: Registry,
    pub(crate) kinds: BuiltinKinds,
    silent: bool,
    preserve_class_name: bool,
    hooks: Rc<dyn DomHooks>,
}

/// Create an environment with the built-in HTML and SVG element kinds
/// registered
pub fn create_environment(options: EnvironmentOptions) -> Environment {
    let kinds = BuiltinKinds::new(&options.common_ancestors);
    let mut registry = Registry::new();
    // Built-ins always use derived class names (`HTMLDivElement`)
    let builtins = COMMON_TAGS
        .iter()
        .map(|tag| (tag, &kinds.html_element, false))
        .chain(SVG_TAGS.iter().map(|tag| (tag, &kinds.svg_element, true)));
    for (tag, base, is_svg) in builtins {
        if let Err(err) = registry.define(tag, base, is_svg, !is_svg, false) {
            tracing::warn!("Built-in element kind not registered: {}", err);
        }
    }

    tracing::debug!("Created DOM environment with {} element kinds", registry.len());

    Environment {
        tree: DomTree::new(),
        interner: StringInterner::new(),
        registry,
        kinds,
        silent: options.silent,
        preserve_class_name: options.preserve_class_name_on_register,
        hooks: options.hooks.unwrap_or_else(|| Rc::new(NoHooks)),
    }
}

impl Environment {
    /// Environment with default options
    pub fn new() -> Self {
        create_environment(EnvironmentOptions::default())
    }

    pub(crate) fn hooks(&self) -> Rc<dyn DomHooks> {
        Rc::clone(&self.hooks)
    }

    pub(crate) fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.tree.get(id).ok_or(DomError::NotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.tree.get_mut(id).ok_or(DomError::NotFound(id))
    }

    /// Read-only access to a node
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    /// The node arena
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// The element registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Kind chain of a node
    pub fn kind_of(&self, id: NodeId) -> Option<&Rc<NodeKind>> {
        self.tree.get(id).map(Node::kind)
    }

    /// A built-in kind (`"Element"`, `"HTMLElement"`, `"SVGElement"`, ...) or
    /// a registered element kind
    pub fn kind(&self, name: &str) -> Option<Rc<NodeKind>> {
        self.kinds
            .get(name)
            .or_else(|| self.registry.get(name))
            .cloned()
    }

    /// Register a new element kind derived from `base`
    pub fn register_element(
        &mut self,
        name: &str,
        base: &Rc<NodeKind>,
        is_svg: bool,
        is_html: bool,
    ) -> DomResult<Rc<NodeKind>> {
        let kind = self
            .registry
            .define(name, base, is_svg, is_html, self.preserve_class_name)?;
        tracing::debug!("Registered element kind {} ({})", name, kind.class_name());
        Ok(kind)
    }

    fn alloc(&mut self, kind: Rc<NodeKind>, data: NodeData, owner: Option<NodeId>) -> NodeId {
        let id = self.tree.alloc(Node::new(kind, data, owner));
        self.hooks().on_create_node(self, id);
        id
    }

    fn expect_document(&self, document: NodeId) -> DomResult<()> {
        if self.node(document)?.is_document() {
            Ok(())
        } else {
            Err(DomError::InvalidNodeType { expected: "Document" })
        }
    }

    /// Create a document, optionally with a document element, then run the
    /// `init_document` hook
    pub fn create_document(&mut self, namespace: Option<&str>, qualified_name: &str) -> DomResult<NodeId> {
        let kind = Rc::clone(&self.kinds.document);
        let document = self.alloc(kind, NodeData::Document, None);
        if !qualified_name.is_empty() {
            let root = self.create_element_ns(document, namespace, qualified_name)?;
            self.append_child(document, root)?;
        }
        self.hooks().init_document(self, document)?;
        tracing::debug!("Created document {:?}", document);
        Ok(document)
    }

    /// `<html>` document bootstrapped with `head` and `body`
    pub fn create_html_document(&mut self) -> DomResult<NodeId> {
        self.create_document(Some(XHTML_NAMESPACE), "html")
    }

    /// Default document bootstrap: `head` and `body` under an `html` root
    pub fn init_default_document(&mut self, document: NodeId) -> DomResult<()> {
        let Some(html) = self.document_element(document) else {
            return Ok(());
        };
        if self.local_name(html) != Some("html") {
            return Ok(());
        }
        if self.head(document).is_none() {
            let head = self.create_element(document, "head")?;
            let reference = self.tree.first_child(html);
            self.insert_before(html, head, reference)?;
        }
        if self.body(document).is_none() {
            let body = self.create_element(document, "body")?;
            self.append_child(html, body)?;
        }
        Ok(())
    }

    /// Create an element of a registered type
    ///
    /// Unregistered types fall back to a generic HTML element.
    pub fn create_element(&mut self, document: NodeId, type_name: &str) -> DomResult<NodeId> {
        self.expect_document(document)?;
        let kind = match self.registry.get(type_name) {
            Some(kind) => Rc::clone(kind),
            None => {
                if !self.silent {
                    tracing::warn!(
                        "Unregistered element type <{}>, falling back to a generic element",
                        type_name
                    );
                }
                Rc::clone(&self.kinds.html_element)
            }
        };
        let namespace = kind.namespace();
        self.create_element_of(document, kind, namespace, type_name)
    }

    /// Create an element in an explicit namespace
    pub fn create_element_ns(
        &mut self,
        document: NodeId,
        namespace: Option<&str>,
        qualified_name: &str,
    ) -> DomResult<NodeId> {
        self.expect_document(document)?;
        let kind = match self.registry.get(qualified_name) {
            Some(kind) if kind.namespace() == namespace => Rc::clone(kind),
            _ => match namespace {
                Some(XHTML_NAMESPACE) => Rc::clone(&self.kinds.html_element),
                Some(SVG_NAMESPACE) => Rc::clone(&self.kinds.svg_element),
                _ => Rc::clone(&self.kinds.element),
            },
        };
        self.create_element_of(document, kind, namespace, qualified_name)
    }

    fn create_element_of(
        &mut self,
        document: NodeId,
        kind: Rc<NodeKind>,
        namespace: Option<&str>,
        name: &str,
    ) -> DomResult<NodeId> {
        // HTML element names are case-insensitive and stored lower-cased
        let local_name = if namespace == Some(XHTML_NAMESPACE) {
            self.interner.intern(&name.to_ascii_lowercase())
        } else {
            self.interner.intern(name)
        };
        let namespace = namespace.map(|ns| self.interner.intern(ns));
        let data = NodeData::Element(ElementData::new(local_name, namespace));
        Ok(self.alloc(kind, data, Some(document)))
    }

    /// Create a text node owned by `document`
    pub fn create_text_node(&mut self, document: NodeId, data: &str) -> DomResult<NodeId> {
        self.expect_document(document)?;
        let kind = Rc::clone(&self.kinds.text);
        Ok(self.alloc(kind, NodeData::Text(data.to_string()), Some(document)))
    }

    /// Create a comment node owned by `document`
    pub fn create_comment(&mut self, document: NodeId, data: &str) -> DomResult<NodeId> {
        self.expect_document(document)?;
        let kind = Rc::clone(&self.kinds.comment);
        Ok(self.alloc(kind, NodeData::Comment(data.to_string()), Some(document)))
    }

    /// Create an empty document fragment owned by `document`
    pub fn create_document_fragment(&mut self, document: NodeId) -> DomResult<NodeId> {
        self.expect_document(document)?;
        let kind = Rc::clone(&self.kinds.fragment);
        Ok(self.alloc(kind, NodeData::DocumentFragment, Some(document)))
    }

    /// Allocate a copy of `source`'s payload (used by `clone_node`)
    pub(crate) fn alloc_copy(&mut self, source: NodeId) -> DomResult<Option<NodeId>> {
        let node = self.node(source)?;
        if node.is_document() {
            return Ok(None);
        }
        let kind = Rc::clone(&node.kind);
        let data = node.data.clone();
        let owner = node.owner_document;
        Ok(Some(self.alloc(kind, data, owner)))
    }

    /// Free a detached subtree; returns the number of nodes released
    ///
    /// Ids into the subtree become stale and are rejected with `NotFound`.
    pub fn release(&mut self, root: NodeId) -> DomResult<usize> {
        if self.node(root)?.parent.is_some() {
            return Err(DomError::HierarchyRequest("cannot release a node that is still attached"));
        }
        let subtree: Vec<NodeId> = self.tree.descendants(root).collect();
        for &id in &subtree {
            self.tree.free(id);
        }
        tracing::debug!("Released {} nodes", subtree.len());
        Ok(subtree.len())
    }

    /// Approximate bytes held by the arena and interner
    pub fn memory_usage(&self) -> usize {
        self.tree.memory_usage() + self.interner.memory_usage()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("nodes", &self.tree.len())
            .field("registered", &self.registry.len())
            .field("silent", &self.silent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeType;

    #[test]
    fn test_every_builtin_tag_is_registered() {
        let env = Environment::new();
        assert_eq!(env.registry.len(), COMMON_TAGS.len() + SVG_TAGS.len());
        assert!(env.kind("linearGradient").unwrap().is_svg());
        assert!(!env.kind("slot").unwrap().is_svg());
    }

    #[test]
    fn test_builtin_registry() {
        let env = Environment::new();
        let div = env.kind("div").unwrap();
        assert_eq!(div.class_name(), "HTMLDivElement");
        assert!(div.is_a("HTMLElement"));
        assert!(div.is_a("Element"));
        assert!(div.is_a("EventTarget"));
        assert!(env.kind("circle").unwrap().is_svg());
    }

    #[test]
    fn test_unregistered_falls_back() {
        let mut env = create_environment(EnvironmentOptions::new().silent(true));
        let doc = env.create_document(None, "").unwrap();
        let el = env.create_element(doc, "fancy-thing").unwrap();
        assert_eq!(env.kind_of(el).unwrap().name(), "HTMLElement");
        assert_eq!(env.tag_name(el).as_deref(), Some("FANCY-THING"));
    }

    #[test]
    fn test_common_ancestor_splices_host_base() {
        let host = NodeKind::root("SceneNode");
        let options = EnvironmentOptions::new().with_common_ancestor("Element", Rc::clone(&host));
        let mut env = create_environment(options);
        let doc = env.create_html_document().unwrap();
        let body = env.body(doc).unwrap();
        assert!(env.kind_of(body).unwrap().is_a("SceneNode"));
        assert!(!env.kind_of(doc).unwrap().is_a("SceneNode"));
    }

    #[test]
    fn test_factories_require_document() {
        let mut env = Environment::new();
        let doc = env.create_html_document().unwrap();
        let text = env.create_text_node(doc, "x").unwrap();
        assert_eq!(
            env.create_element(text, "div").unwrap_err(),
            DomError::InvalidNodeType { expected: "Document" }
        );
        assert_eq!(env.get(text).map(Node::node_type), Some(NodeType::Text));
    }

    #[test]
    fn test_release_detached_subtree() {
        let mut env = Environment::new();
        let doc = env.create_html_document().unwrap();
        let div = env.create_element(doc, "div").unwrap();
        let span = env.create_element(doc, "span").unwrap();
        env.append_child(div, span).unwrap();

        let body = env.body(doc).unwrap();
        env.append_child(body, div).unwrap();
        assert!(matches!(env.release(div), Err(DomError::HierarchyRequest(_))));

        env.remove(div).unwrap();
        assert_eq!(env.release(div).unwrap(), 2);
        assert_eq!(env.append_child(body, span).unwrap_err(), DomError::NotFound(span));
    }
}
