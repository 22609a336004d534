//! Element Registry
//!
//! Maps element type names to the [`NodeKind`] that `create_element` should
//! instantiate. One registry lives in each `Environment`; there is no global
//! table, so independent environments never see each other's registrations.

use std::collections::HashMap;
use std::rc::Rc;

use crate::kind::{derived_class_name, NodeKind, SVG_NAMESPACE, XHTML_NAMESPACE};
use crate::{DomError, DomResult};

/// Element kinds registry
#[derive(Debug, Default)]
pub struct Registry {
    definitions: HashMap<String, Rc<NodeKind>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as a kind derived from `base`
    ///
    /// With `preserve_class_name` the new kind reports its base's class name
    /// instead of a derived one such as `HTMLMyButtonElement`.
    pub fn define(
        &mut self,
        name: &str,
        base: &Rc<NodeKind>,
        is_svg: bool,
        is_html: bool,
        preserve_class_name: bool,
    ) -> DomResult<Rc<NodeKind>> {
        if self.definitions.contains_key(name) {
            return Err(DomError::DuplicateRegistration(name.to_string()));
        }

        let namespace = if is_svg {
            Some(SVG_NAMESPACE)
        } else if is_html {
            Some(XHTML_NAMESPACE)
        } else {
            base.namespace()
        };
        let class_name = if preserve_class_name {
            base.class_name().to_string()
        } else {
            derived_class_name(name, namespace)
        };

        let kind = NodeKind::derive(base, name, &class_name, is_svg, is_html);
        self.definitions.insert(name.to_string(), Rc::clone(&kind));
        Ok(kind)
    }

    /// Look up a kind, falling back to the ASCII-lowercased name
    pub fn get(&self, name: &str) -> Option<&Rc<NodeKind>> {
        self.definitions.get(name).or_else(|| {
            if name.bytes().any(|b| b.is_ascii_uppercase()) {
                self.definitions.get(&name.to_ascii_lowercase())
            } else {
                None
            }
        })
    }

    /// Check if a name is registered
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
