//! Node Kinds
//!
//! Every node points at an `Rc<NodeKind>`, a chain of named layers such as
//! `EventTarget -> Node -> Element -> HTMLElement -> HTMLDivElement`. A kind
//! is always built by deriving from an explicit base, so a host can slide its
//! own base underneath any chain (see `EnvironmentOptions::common_ancestors`)
//! or derive new kinds from the built-in ones without touching the tree or
//! event code.

use std::rc::Rc;

/// XHTML namespace URI
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// SVG namespace URI
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// One layer of a node kind chain
#[derive(Debug)]
pub struct NodeKind {
    name: String,
    class_name: String,
    base: Option<Rc<NodeKind>>,
    namespace: Option<&'static str>,
}

impl NodeKind {
    /// Create a kind with no base (the bottom of a chain)
    pub fn root(name: &str) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            class_name: name.to_string(),
            base: None,
            namespace: None,
        })
    }

    /// Derive a kind from `base`
    ///
    /// The namespace is inherited from the base unless `is_svg`/`is_html`
    /// pins it. `is_svg` wins if both are set.
    pub fn derive(
        base: &Rc<NodeKind>,
        name: &str,
        class_name: &str,
        is_svg: bool,
        is_html: bool,
    ) -> Rc<Self> {
        let namespace = if is_svg {
            Some(SVG_NAMESPACE)
        } else if is_html {
            Some(XHTML_NAMESPACE)
        } else {
            base.namespace
        };
        Rc::new(Self {
            name: name.to_string(),
            class_name: class_name.to_string(),
            base: Some(Rc::clone(base)),
            namespace,
        })
    }

    /// Stack `layers` on top of an optional base, returning the topmost kind
    pub(crate) fn compose(base: Option<Rc<NodeKind>>, layers: &[&str]) -> Rc<Self> {
        let mut current = base;
        for layer in layers {
            current = Some(match current {
                Some(base) => Self::derive(&base, layer, layer, false, false),
                None => Self::root(layer),
            });
        }
        // `layers` is never empty at call sites
        current.unwrap_or_else(|| Self::root("Node"))
    }

    /// Kind name (registry name for element kinds)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class name reported to hosts
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The kind this one derives from
    pub fn base(&self) -> Option<&Rc<NodeKind>> {
        self.base.as_ref()
    }

    /// Namespace applied to elements of this kind
    pub fn namespace(&self) -> Option<&'static str> {
        self.namespace
    }

    /// Is this an SVG kind
    pub fn is_svg(&self) -> bool {
        self.namespace == Some(SVG_NAMESPACE)
    }

    /// Is this an HTML kind
    pub fn is_html(&self) -> bool {
        self.namespace == Some(XHTML_NAMESPACE)
    }

    /// Walk the chain from this kind down to its root
    pub fn ancestry(&self) -> impl Iterator<Item = &NodeKind> {
        std::iter::successors(Some(self), |&kind| kind.base.as_deref())
    }

    /// Does any layer of the chain carry this name or class name
    pub fn is_a(&self, name: &str) -> bool {
        self.ancestry()
            .any(|kind| kind.name == name || kind.class_name == name)
    }
}

/// Class name for a newly registered element kind, e.g. `HTMLMyButtonElement`
pub(crate) fn derived_class_name(name: &str, namespace: Option<&str>) -> String {
    let prefix = match namespace {
        Some(SVG_NAMESPACE) => "SVG",
        Some(XHTML_NAMESPACE) => "HTML",
        _ => "",
    };
    let mut class_name = String::with_capacity(prefix.len() + name.len() + 7);
    class_name.push_str(prefix);
    for part in name.split(['-', '_', ':']).filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            class_name.push(first.to_ascii_uppercase());
            class_name.extend(chars);
        }
    }
    class_name.push_str("Element");
    class_name
}
