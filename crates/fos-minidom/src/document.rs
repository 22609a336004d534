//! Document - High-level document queries

use crate::{Environment, NodeId};

impl Environment {
    /// The document's single element child
    pub fn document_element(&self, document: NodeId) -> Option<NodeId> {
        self.tree.get(document).filter(|node| node.is_document())?;
        self.first_element_child(document)
    }

    /// `<head>` child of the document element
    pub fn head(&self, document: NodeId) -> Option<NodeId> {
        self.html_child(document, "head")
    }

    /// `<body>` child of the document element
    pub fn body(&self, document: NodeId) -> Option<NodeId> {
        self.html_child(document, "body")
    }

    fn html_child(&self, document: NodeId, name: &str) -> Option<NodeId> {
        let html = self.document_element(document)?;
        self.tree
            .children(html)
            .find(|&id| self.local_name(id) == Some(name))
    }

    /// Text of the first `<title>` in `<head>`
    pub fn title(&self, document: NodeId) -> String {
        let Some(head) = self.head(document) else {
            return String::new();
        };
        self.tree
            .children(head)
            .find(|&id| self.local_name(id) == Some("title"))
            .and_then(|title| self.text_content(title).ok())
            .unwrap_or_default()
    }

    /// First element in tree order whose `id` attribute equals `id`
    pub fn get_element_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.tree
            .descendants(root)
            .find(|&node| self.is_element(node) && self.get_attribute(node, "id").as_deref() == Some(id))
    }
}
