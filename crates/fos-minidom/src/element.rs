//! DOM Element
//!
//! Attributes, names, markup accessors and the opaque style slot.

use std::any::Any;
use std::rc::Rc;

use crate::hooks::HookAction;
use crate::interner::InternedString;
use crate::kind::XHTML_NAMESPACE;
use crate::node::ElementData;
use crate::{DomError, DomResult, Environment, NodeId};

const NOT_ELEMENT: DomError = DomError::InvalidNodeType { expected: "Element" };

/// Attribute snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn is_id(&self) -> bool {
        self.namespace.is_none() && self.name == "id"
    }
}

impl Environment {
    fn element_data(&self, element: NodeId) -> DomResult<&ElementData> {
        self.node(element)?.as_element().ok_or(NOT_ELEMENT)
    }

    /// Interned identity of an attribute, if both parts were ever interned
    ///
    /// A name that was never interned cannot be stored on any element.
    fn attribute_key(&self, namespace: Option<&str>, name: &str) -> Option<(Option<InternedString>, InternedString)> {
        let namespace = match namespace {
            Some(ns) => Some(self.interner.lookup(ns)?),
            None => None,
        };
        let name = self.interner.lookup(&name.to_ascii_lowercase())?;
        Some((namespace, name))
    }

    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.set_attribute_ns(element, None, name, value)
    }

    /// Set an attribute; names are stored lower-cased
    pub fn set_attribute_ns(
        &mut self,
        element: NodeId,
        namespace: Option<&str>,
        name: &str,
        value: &str,
    ) -> DomResult<()> {
        self.element_data(element)?;
        let name = name.to_ascii_lowercase();
        if self.hooks().on_set_attribute_ns(self, element, namespace, &name, value) == HookAction::Handled {
            return Ok(());
        }

        let namespace = namespace.map(|ns| self.interner.intern(ns));
        let name = self.interner.intern(&name);
        self.node_mut(element)?
            .as_element_mut()
            .ok_or(NOT_ELEMENT)?
            .set_attr(namespace, name, value.to_string());
        Ok(())
    }

    pub fn get_attribute(&self, element: NodeId, name: &str) -> Option<String> {
        self.get_attribute_ns(element, None, name)
    }

    /// Attribute value, or `None` when absent or `element` is not an element
    pub fn get_attribute_ns(&self, element: NodeId, namespace: Option<&str>, name: &str) -> Option<String> {
        let data = self.element_data(element).ok()?;
        if let Some(value) = self
            .hooks()
            .on_get_attribute_ns(self, element, namespace, &name.to_ascii_lowercase())
        {
            return Some(value);
        }
        let (namespace, name) = self.attribute_key(namespace, name)?;
        let index = data.find_attr(namespace, name)?;
        Some(data.attrs[index].value.clone())
    }

    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> DomResult<()> {
        self.remove_attribute_ns(element, None, name)
    }

    /// Remove an attribute; absent attributes are ignored
    pub fn remove_attribute_ns(&mut self, element: NodeId, namespace: Option<&str>, name: &str) -> DomResult<()> {
        self.element_data(element)?;
        let lowered = name.to_ascii_lowercase();
        if self.hooks().on_remove_attribute_ns(self, element, namespace, &lowered) == HookAction::Handled {
            return Ok(());
        }
        let Some((namespace, name)) = self.attribute_key(namespace, &lowered) else {
            return Ok(());
        };
        let data = self.node_mut(element)?.as_element_mut().ok_or(NOT_ELEMENT)?;
        if let Some(index) = data.find_attr(namespace, name) {
            data.attrs.remove(index);
        }
        Ok(())
    }

    pub fn has_attribute(&self, element: NodeId, name: &str) -> bool {
        self.get_attribute(element, name).is_some()
    }

    /// Toggle a boolean attribute; returns whether it is now present
    pub fn toggle_attribute(&mut self, element: NodeId, name: &str, force: Option<bool>) -> DomResult<bool> {
        let present = self.has_attribute(element, name);
        match force {
            Some(true) | None if !present => {
                self.set_attribute(element, name, "")?;
                Ok(true)
            }
            Some(false) | None if present => {
                self.remove_attribute(element, name)?;
                Ok(false)
            }
            _ => Ok(present),
        }
    }

    /// Attribute names in insertion order
    pub fn attribute_names(&self, element: NodeId) -> Vec<String> {
        self.element_data(element)
            .map(|data| {
                data.attrs
                    .iter()
                    .map(|attr| self.interner.get(attr.name).to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ordered snapshot of the stored attributes
    pub fn attributes(&self, element: NodeId) -> Vec<Attribute> {
        let Ok(data) = self.element_data(element) else {
            return Vec::new();
        };
        data.attrs
            .iter()
            .map(|attr| Attribute {
                namespace: attr.namespace.map(|ns| self.interner.get(ns).to_string()),
                name: self.interner.get(attr.name).to_string(),
                value: attr.value.clone(),
            })
            .collect()
    }

    /// `id` attribute, empty when unset
    pub fn id(&self, element: NodeId) -> String {
        self.get_attribute(element, "id").unwrap_or_default()
    }

    pub fn local_name(&self, element: NodeId) -> Option<&str> {
        let data = self.tree.get(element)?.as_element()?;
        Some(self.interner.get(data.local_name))
    }

    /// Tag name, upper-cased for HTML-namespace elements
    pub fn tag_name(&self, element: NodeId) -> Option<String> {
        let local = self.local_name(element)?;
        if self.namespace_uri(element) == Some(XHTML_NAMESPACE) {
            Some(local.to_ascii_uppercase())
        } else {
            Some(local.to_string())
        }
    }

    pub fn namespace_uri(&self, element: NodeId) -> Option<&str> {
        let namespace = self.tree.get(element)?.as_element()?.namespace?;
        Some(self.interner.get(namespace))
    }

    /// Always fails: markup parsing is not part of this DOM
    pub fn inner_html(&self, element: NodeId) -> DomResult<String> {
        self.element_data(element)?;
        Err(DomError::Unsupported { operation: "innerHTML" })
    }

    /// Always fails; the host hook only observes the attempt
    pub fn set_inner_html(&mut self, element: NodeId, html: &str) -> DomResult<()> {
        self.element_data(element)?;
        self.hooks().on_set_inner_html(self, element, html);
        Err(DomError::Unsupported { operation: "innerHTML" })
    }

    /// Serialized markup of the element and its subtree
    pub fn outer_html(&self, element: NodeId) -> DomResult<String> {
        self.element_data(element)?;
        if let Some(html) = self.hooks().on_get_outer_html(self, element) {
            return Ok(html);
        }
        Ok(self.serialize(element))
    }

    /// Replace the element with markup
    ///
    /// Only the host can parse markup. Without a handling hook the empty
    /// string removes the element and anything else fails.
    pub fn set_outer_html(&mut self, element: NodeId, html: &str) -> DomResult<()> {
        self.element_data(element)?;
        if self.hooks().on_set_outer_html(self, element, html) == HookAction::Handled {
            return Ok(());
        }
        if html.is_empty() {
            return self.remove(element);
        }
        Err(DomError::Unsupported { operation: "outerHTML" })
    }

    /// Value the host style engine stored on the element
    pub fn style(&self, element: NodeId) -> Option<Rc<dyn Any>> {
        self.element_data(element).ok()?.style.0.clone()
    }

    pub fn set_style(&mut self, element: NodeId, style: Option<Rc<dyn Any>>) -> DomResult<()> {
        self.node_mut(element)?.as_element_mut().ok_or(NOT_ELEMENT)?.style.0 = style;
        Ok(())
    }

    /// Descendant elements (excluding `root`) with a matching name
    ///
    /// `"*"` matches every element. HTML elements match case-insensitively.
    pub fn get_elements_by_tag_name(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        let lowered = name.to_ascii_lowercase();
        self.tree
            .descendants(root)
            .skip(1)
            .filter(|&id| match self.local_name(id) {
                Some(_) if name == "*" => true,
                Some(local) if self.namespace_uri(id) == Some(XHTML_NAMESPACE) => local == lowered,
                Some(local) => local == name,
                None => false,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::SVG_NAMESPACE;

    fn setup() -> (Environment, NodeId, NodeId) {
        let mut env = Environment::new();
        let doc = env.create_html_document().unwrap();
        let div = env.create_element(doc, "div").unwrap();
        (env, doc, div)
    }

    #[test]
    fn test_attribute_crud() {
        let (mut env, _, div) = setup();
        env.set_attribute(div, "Data-Value", "1").unwrap();
        assert_eq!(env.get_attribute(div, "data-value").as_deref(), Some("1"));
        assert_eq!(env.get_attribute(div, "DATA-VALUE").as_deref(), Some("1"));

        env.set_attribute(div, "data-value", "2").unwrap();
        assert_eq!(env.attribute_names(div), vec!["data-value"]);

        env.remove_attribute(div, "data-value").unwrap();
        assert!(!env.has_attribute(div, "data-value"));
        env.remove_attribute(div, "never-set").unwrap();
    }

    #[test]
    fn test_namespaced_attributes_are_distinct() {
        let (mut env, _, div) = setup();
        env.set_attribute(div, "href", "plain").unwrap();
        env.set_attribute_ns(div, Some("http://www.w3.org/1999/xlink"), "href", "linked").unwrap();

        assert_eq!(env.get_attribute(div, "href").as_deref(), Some("plain"));
        assert_eq!(
            env.get_attribute_ns(div, Some("http://www.w3.org/1999/xlink"), "href").as_deref(),
            Some("linked")
        );
        let attrs = env.attributes(div);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[1].namespace.as_deref(), Some("http://www.w3.org/1999/xlink"));
    }

    #[test]
    fn test_toggle_attribute() {
        let (mut env, _, div) = setup();
        assert!(env.toggle_attribute(div, "hidden", None).unwrap());
        assert_eq!(env.get_attribute(div, "hidden").as_deref(), Some(""));
        assert!(!env.toggle_attribute(div, "hidden", None).unwrap());
        assert!(!env.toggle_attribute(div, "hidden", Some(false)).unwrap());
        assert!(env.toggle_attribute(div, "hidden", Some(true)).unwrap());
        assert!(env.toggle_attribute(div, "hidden", Some(true)).unwrap());
    }

    #[test]
    fn test_names() {
        let (mut env, doc, div) = setup();
        assert_eq!(env.local_name(div), Some("div"));
        assert_eq!(env.tag_name(div).as_deref(), Some("DIV"));
        assert_eq!(env.namespace_uri(div), Some(XHTML_NAMESPACE));

        let gradient = env.create_element_ns(doc, Some(SVG_NAMESPACE), "linearGradient").unwrap();
        assert_eq!(env.tag_name(gradient).as_deref(), Some("linearGradient"));
        assert!(env.kind_of(gradient).unwrap().is_svg());
    }

    #[test]
    fn test_inner_html_unsupported() {
        let (mut env, _, div) = setup();
        let err = env.set_inner_html(div, "<b>x</b>").unwrap_err();
        assert_eq!(err, DomError::Unsupported { operation: "innerHTML" });
        assert!(err.to_string().contains("not supported for performance and memory reasons"));
        assert!(env.inner_html(div).is_err());
    }

    #[test]
    fn test_set_outer_html() {
        let (mut env, doc, div) = setup();
        let body = env.body(doc).unwrap();
        env.append_child(body, div).unwrap();

        assert_eq!(
            env.set_outer_html(div, "<p></p>").unwrap_err(),
            DomError::Unsupported { operation: "outerHTML" }
        );
        assert_eq!(env.parent_node(div), Some(body));

        env.set_outer_html(div, "").unwrap();
        assert_eq!(env.parent_node(div), None);
    }

    #[test]
    fn test_style_slot() {
        let (mut env, _, div) = setup();
        assert!(env.style(div).is_none());
        env.set_style(div, Some(Rc::new(42u32))).unwrap();
        let style = env.style(div).unwrap();
        assert_eq!(style.downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn test_get_elements_by_tag_name() {
        let (mut env, doc, div) = setup();
        let body = env.body(doc).unwrap();
        env.append_child(body, div).unwrap();
        let span = env.create_element(doc, "span").unwrap();
        env.append_child(div, span).unwrap();

        assert_eq!(env.get_elements_by_tag_name(doc, "SPAN"), vec![span]);
        assert_eq!(env.get_elements_by_tag_name(div, "div"), Vec::<NodeId>::new());
        assert_eq!(env.get_elements_by_tag_name(body, "*"), vec![div, span]);
    }
}
